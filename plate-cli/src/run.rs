use plate_core::{
    FieldPair, PlateError, PlateParams, ProgressObserver, ProgressPoint, RelaxConfig, RelaxOutcome,
    RelaxationEngine, Termination,
};
use serde::Serialize;
use std::io::{self, Write};
use std::time::{Duration, Instant};

pub struct Initialized {
    pub fields: FieldPair,
    pub elapsed: Duration,
}

pub fn initialize(params: &PlateParams) -> Result<Initialized, PlateError> {
    let before = Instant::now();
    let fields = FieldPair::initialize(params)?;
    Ok(Initialized {
        fields,
        elapsed: before.elapsed(),
    })
}

pub struct Relaxed {
    pub outcome: RelaxOutcome,
    pub elapsed: Duration,
}

pub fn relax<O: ProgressObserver>(
    engine: &RelaxationEngine,
    fields: &mut FieldPair,
    observer: &mut O,
) -> Relaxed {
    let before = Instant::now();
    let outcome = engine.run(fields, observer);
    Relaxed {
        outcome,
        elapsed: before.elapsed(),
    }
}

#[derive(Serialize)]
pub struct RunReport {
    pub params: PlateParams,
    pub config: RelaxConfig,
    pub average: f64,
    pub initial_checksum: u32,
    pub init_secs: f64,
    pub relax_secs: f64,
    pub termination: Termination,
    pub iterations: u64,
    pub residual: f64,
    pub final_checksum: u32,
    pub progress: Vec<ProgressPoint>,
}

/// Writes the field as a little-endian u32 order followed by N×N f64 cells.
pub fn write_field<W: Write>(w: &mut W, n: usize, cells: &[f64]) -> io::Result<()> {
    w.write_all(&(n as u32).to_le_bytes())?;
    for &x in cells {
        w.write_all(&x.to_le_bytes())?;
    }
    Ok(())
}

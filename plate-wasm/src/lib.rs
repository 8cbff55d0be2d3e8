use plate_core::{FieldPair, PlateParams, ProgressLog, RelaxConfig, RelaxationEngine, Schedule};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Plate {
    fields: FieldPair,
    engine: RelaxationEngine,
    epsilon: f64,
    iteration: u64,
}

#[wasm_bindgen]
impl Plate {
    #[wasm_bindgen(constructor)]
    pub fn new(n: usize, fire_temp: f64, wall_temp: f64, epsilon: f64) -> Result<Plate, JsValue> {
        let params = PlateParams::new(n, fire_temp, wall_temp, epsilon).map_err(to_js)?;
        // No threads in the browser; relax on the calling thread.
        let config = RelaxConfig::from_params(&params).with_schedule(Schedule::Sequential);
        let engine = RelaxationEngine::new(config).map_err(to_js)?;
        let fields = FieldPair::initialize(&params).map_err(to_js)?;
        Ok(Plate {
            fields,
            engine,
            epsilon,
            iteration: 0,
        })
    }

    pub fn n(&self) -> usize { self.fields.n() }
    pub fn average(&self) -> f64 { self.fields.average() }
    pub fn iteration(&self) -> u64 { self.iteration }
    pub fn checksum(&self) -> u32 { self.fields.current().checksum() }

    // Copy-based JS access (reliable)
    pub fn get_field(&self) -> Vec<f64> {
        self.fields.current().cells().to_vec()
    }

    // One pass + timing
    pub fn step(&mut self) -> StepInfo {
        let t0 = now_ms();
        let residual = self.engine.step(&mut self.fields);
        let t1 = now_ms();
        self.iteration += 1;
        StepInfo {
            iteration: self.iteration,
            residual,
            converged: residual <= self.epsilon,
            compute_ms: t1 - t0,
        }
    }

    /// Relaxes until converged or `max_passes` more passes have run.
    pub fn run(&mut self, max_passes: u64) -> Result<RunInfo, JsValue> {
        let config = self.engine.config().clone().with_max_iterations(Some(max_passes));
        let engine = RelaxationEngine::new(config).map_err(to_js)?;

        let mut log = ProgressLog::new();
        let t0 = now_ms();
        let outcome = engine.run(&mut self.fields, &mut log);
        let t1 = now_ms();
        self.iteration += outcome.iterations;

        Ok(RunInfo {
            iteration: self.iteration,
            residual: outcome.residual,
            converged: outcome.converged(),
            compute_ms: t1 - t0,
            sampled: log.points().iter().map(|p| p.residual).collect(),
        })
    }
}

#[wasm_bindgen]
pub struct StepInfo {
    iteration: u64,
    residual: f64,
    converged: bool,
    compute_ms: f64,
}

#[wasm_bindgen]
impl StepInfo {
    pub fn iteration(&self) -> u64 { self.iteration }
    pub fn residual(&self) -> f64 { self.residual }
    pub fn converged(&self) -> bool { self.converged }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
}

#[wasm_bindgen]
pub struct RunInfo {
    iteration: u64,
    residual: f64,
    converged: bool,
    compute_ms: f64,
    sampled: Vec<f64>,
}

#[wasm_bindgen]
impl RunInfo {
    pub fn iteration(&self) -> u64 { self.iteration }
    pub fn residual(&self) -> f64 { self.residual }
    pub fn converged(&self) -> bool { self.converged }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
    /// Residuals at passes 1, 2, 4, … of this call, then the last pass.
    pub fn sampled(&self) -> Vec<f64> { self.sampled.clone() }
}

fn to_js(e: plate_core::PlateError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

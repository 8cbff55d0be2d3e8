//! Temperature fields and the double buffer the relaxation loop runs on.

use crate::checksum::checksum;
use crate::error::PlateError;
use crate::params::PlateParams;

/// Mean of all boundary cells, used to seed the interior.
///
/// Row 0 contributes `n` cells at `north`; the other three edges
/// contribute `3n - 4` cells at `wall`, each corner counted once.
pub fn plate_average(n: usize, north: f64, wall: f64) -> f64 {
    let n = n as f64;
    (wall * (3.0 * n - 4.0) + north * n) / (4.0 * n - 4.0)
}

/// An N×N grid of temperatures in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    n: usize,
    cells: Vec<f64>,
}

impl Field {
    /// Allocates an N×N field with north edge, remaining walls and interior set.
    fn seeded(n: usize, north: f64, wall: f64, interior: f64) -> Result<Field, PlateError> {
        let size = n * n;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(size)
            .map_err(|_| PlateError::AllocationFailure { cells: size })?;
        cells.resize(size, interior);

        for y in 1..n {
            cells[y * n] = wall;
            cells[y * n + (n - 1)] = wall;
        }
        cells[(n - 1) * n..].fill(wall);
        cells[..n].fill(north);

        Ok(Field { n, cells })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.n + col]
    }

    pub fn is_boundary(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row == self.n - 1 || col == self.n - 1
    }

    /// 32-bit digest of the cell contents.
    pub fn checksum(&self) -> u32 {
        checksum(&self.cells)
    }
}

/// Names one of the two buffers in a [`FieldPair`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Buffer {
    A,
    B,
}

impl Buffer {
    pub fn other(self) -> Buffer {
        match self {
            Buffer::A => Buffer::B,
            Buffer::B => Buffer::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Buffer::A => 0,
            Buffer::B => 1,
        }
    }
}

/// The two generations of the plate.
///
/// Exactly one buffer holds the role "current" at any time; the other is
/// the write target of the next pass. The role only changes through
/// [`FieldPair::flip`], which the engine calls between passes.
#[derive(Clone, Debug)]
pub struct FieldPair {
    fields: [Field; 2],
    current: Buffer,
    average: f64,
}

impl FieldPair {
    /// Builds both buffers with identical content from validated parameters.
    pub fn initialize(params: &PlateParams) -> Result<FieldPair, PlateError> {
        let n = params.n();
        let average = plate_average(n, params.north(), params.wall());
        let a = Field::seeded(n, params.north(), params.wall(), average)?;
        let b = Field::seeded(n, params.north(), params.wall(), average)?;

        tracing::debug!(n, average, "plate initialized");

        Ok(FieldPair {
            fields: [a, b],
            current: Buffer::A,
            average,
        })
    }

    pub fn n(&self) -> usize {
        self.fields[0].n
    }

    /// The value every interior cell was seeded with.
    pub fn average(&self) -> f64 {
        self.average
    }

    pub fn current_role(&self) -> Buffer {
        self.current
    }

    pub fn current(&self) -> &Field {
        self.field(self.current)
    }

    pub fn field(&self, buffer: Buffer) -> &Field {
        &self.fields[buffer.index()]
    }

    /// Read view of "current" and write view of "next" for one pass.
    pub(crate) fn split_for_pass(&mut self) -> (&Field, &mut Field) {
        let [a, b] = &mut self.fields;
        match self.current {
            Buffer::A => (&*a, b),
            Buffer::B => (&*b, a),
        }
    }

    pub(crate) fn flip(&mut self) {
        self.current = self.current.other();
    }

    /// Releases the pair, keeping only the field that is current.
    pub fn into_current(self) -> Field {
        let [a, b] = self.fields;
        match self.current {
            Buffer::A => a,
            Buffer::B => b,
        }
    }
}

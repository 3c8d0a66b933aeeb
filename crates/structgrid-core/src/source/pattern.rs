use super::{BufferSource, SourceError, check_destination};
use crate::grid::{Grid, GridDims, Record};
use crate::layouts::record::encode_grid;

/// In-memory producer filled with a reproducible pattern.
///
/// For the cell at `(x, y)` with buffer index `i = x + y * width` the default
/// pattern stores `x`, `-y`, `i * 257` (wrapping `u16`) and `i * 37`
/// (wrapping `u8`), so every field changes from cell to cell and both bytes
/// of `a` are exercised.
#[derive(Debug, Clone)]
pub struct PatternSource {
    grid: Grid,
    data: Vec<u8>,
}

impl PatternSource {
    pub fn new(dims: GridDims) -> Result<Self, SourceError> {
        let width = dims.width();
        let records = (0..dims.height())
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| pattern_record(x, y, width))
            .collect();
        Ok(Self::from_grid(Grid::from_records(dims, records)?))
    }

    /// Every cell holds `record`.
    pub fn uniform(dims: GridDims, record: Record) -> Result<Self, SourceError> {
        let records = vec![record; dims.cells()];
        Ok(Self::from_grid(Grid::from_records(dims, records)?))
    }

    fn from_grid(grid: Grid) -> Self {
        let data = encode_grid(&grid);
        Self { grid, data }
    }

    /// The records the buffer was produced from.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

fn pattern_record(x: usize, y: usize, width: usize) -> Record {
    let index = x + y * width;
    Record {
        x: x as i32,
        y: -(y as i32),
        a: (index as u16).wrapping_mul(257),
        b: (index as u8).wrapping_mul(37),
    }
}

impl BufferSource for PatternSource {
    fn dims(&self) -> GridDims {
        self.grid.dims()
    }

    fn byte_len(&self) -> usize {
        self.data.len()
    }

    fn copy_to(&self, dst: &mut [u8]) -> Result<(), SourceError> {
        check_destination(self.data.len(), dst)?;
        dst.copy_from_slice(&self.data);
        Ok(())
    }
}

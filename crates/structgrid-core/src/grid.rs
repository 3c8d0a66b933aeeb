//! Typed records and the immutable grid they are decoded into.

use serde::{Deserialize, Serialize};

use crate::layouts::common::reader::{cell_offset, grid_byte_len};
use crate::layouts::record::error::RecordError;
use crate::layouts::record::layout::RECORD_STRIDE;

/// One decoded cell. The padding byte is not kept.
///
/// # Examples
/// ```
/// use structgrid_core::Record;
///
/// let record = Record { x: 1, y: 2, a: 3, b: 4 };
/// assert_eq!(record.a, 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub x: i32,
    pub y: i32,
    pub a: u16,
    pub b: u8,
}

/// Grid dimensions in cells.
///
/// # Examples
/// ```
/// use structgrid_core::GridDims;
///
/// let dims = GridDims::new(3, 2).unwrap();
/// assert_eq!(dims.byte_len(), 72);
/// assert!(GridDims::new(0, 2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDims")]
pub struct GridDims {
    width: usize,
    height: usize,
}

/// Unvalidated wire form of [`GridDims`].
#[derive(Deserialize)]
struct RawDims {
    width: usize,
    height: usize,
}

impl TryFrom<RawDims> for GridDims {
    type Error = RecordError;

    fn try_from(raw: RawDims) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl GridDims {
    /// Validate `width` and `height`: both non-zero, byte length representable.
    pub fn new(width: usize, height: usize) -> Result<Self, RecordError> {
        grid_byte_len(width, height, RECORD_STRIDE)
            .ok_or(RecordError::InvalidDimensions { width, height })?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Required buffer length at the fixed record stride.
    pub fn byte_len(&self) -> usize {
        self.cells() * RECORD_STRIDE
    }

    /// Byte offset of cell `(x, y)`.
    pub fn offset_of(&self, x: usize, y: usize) -> usize {
        cell_offset(x, y, self.width, RECORD_STRIDE)
    }
}

/// Immutable two-dimensional collection of records, addressed by
/// `(column, row)`. Records are kept in buffer order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: GridDims,
    records: Vec<Record>,
}

impl Grid {
    /// Build a grid from records in buffer order (`x + y * width`).
    pub fn from_records(dims: GridDims, records: Vec<Record>) -> Result<Self, RecordError> {
        if records.len() != dims.cells() {
            return Err(RecordError::InvalidDimensions {
                width: dims.width,
                height: dims.height,
            });
        }
        Ok(Self { dims, records })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Record> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        self.records.get(x + y * self.dims.width)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Cells in buffer order: every column of row 0, then row 1, ...
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Record)> + '_ {
        let width = self.dims.width;
        self.records
            .iter()
            .enumerate()
            .map(move |(index, record)| (index % width, index / width, record))
    }

    /// Cells column by column: every row of column 0, then column 1, ...
    pub fn iter_columns(&self) -> impl Iterator<Item = (usize, usize, &Record)> + '_ {
        let (width, height) = (self.dims.width, self.dims.height);
        (0..width).flat_map(move |x| {
            (0..height).map(move |y| (x, y, &self.records[x + y * width]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, GridDims, Record};
    use crate::layouts::record::error::RecordError;

    fn numbered(dims: GridDims) -> Grid {
        let records = (0..dims.cells())
            .map(|i| Record {
                x: i as i32,
                ..Record::default()
            })
            .collect();
        Grid::from_records(dims, records).unwrap()
    }

    #[test]
    fn get_addresses_column_then_row() {
        let grid = numbered(GridDims::new(3, 2).unwrap());
        assert_eq!(grid.get(2, 1).unwrap().x, 5);
        assert_eq!(grid.get(0, 1).unwrap().x, 3);
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 2).is_none());
    }

    #[test]
    fn from_records_rejects_wrong_count() {
        let dims = GridDims::new(2, 2).unwrap();
        let err = Grid::from_records(dims, vec![Record::default(); 3]).unwrap_err();
        assert_eq!(err, RecordError::InvalidDimensions { width: 2, height: 2 });
    }

    #[test]
    fn iter_follows_buffer_order() {
        let grid = numbered(GridDims::new(2, 2).unwrap());
        let cells: Vec<_> = grid.iter().map(|(x, y, r)| (x, y, r.x)).collect();
        assert_eq!(cells, vec![(0, 0, 0), (1, 0, 1), (0, 1, 2), (1, 1, 3)]);
    }

    #[test]
    fn iter_columns_walks_each_column() {
        let grid = numbered(GridDims::new(2, 2).unwrap());
        let cells: Vec<_> = grid.iter_columns().map(|(x, y, r)| (x, y, r.x)).collect();
        assert_eq!(cells, vec![(0, 0, 0), (0, 1, 2), (1, 0, 1), (1, 1, 3)]);
    }

    #[test]
    fn dims_deserialize_through_validation() {
        let dims: GridDims = serde_json::from_str(r#"{"width":3,"height":2}"#).unwrap();
        assert_eq!((dims.width(), dims.height()), (3, 2));

        let err = serde_json::from_str::<GridDims>(r#"{"width":0,"height":5}"#).unwrap_err();
        assert!(err.to_string().contains("invalid grid dimensions"));

        let huge = format!(r#"{{"width":{},"height":2}}"#, usize::MAX);
        assert!(serde_json::from_str::<GridDims>(&huge).is_err());
    }

    #[test]
    fn dims_reject_overflowing_size() {
        let err = GridDims::new(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            }
        );
    }

    #[test]
    fn dims_offset_matches_layout() {
        let dims = GridDims::new(3, 2).unwrap();
        assert_eq!(dims.offset_of(2, 1), 60);
        assert_eq!(dims.byte_len(), 72);
    }
}

use super::error::RecordError;
use super::layout;
use super::reader::RecordReader;
use crate::grid::{Grid, GridDims, Record};

/// Decode the record starting at `offset`.
pub fn decode_record(buffer: &[u8], offset: usize) -> Result<Record, RecordError> {
    let record = RecordReader::new(buffer).record_at(offset)?;
    Ok(Record {
        x: record.read_i32_le(layout::X_RANGE)?,
        y: record.read_i32_le(layout::Y_RANGE)?,
        a: record.read_u16_le(layout::A_RANGE)?,
        b: record.read_u8(layout::B_OFFSET)?,
    })
}

/// Decode a `width` x `height` grid of packed records.
///
/// The buffer must hold at least `width * height * 12` bytes; anything past
/// that is ignored. The returned grid owns its records.
///
/// # Examples
/// ```
/// use structgrid_core::decode_grid;
///
/// let mut buffer = vec![0u8; 12];
/// buffer[0..4].copy_from_slice(&7i32.to_le_bytes());
/// let grid = decode_grid(&buffer, 1, 1)?;
/// assert_eq!(grid.get(0, 0).map(|r| r.x), Some(7));
/// # Ok::<(), structgrid_core::RecordError>(())
/// ```
///
/// # Errors
/// `InvalidDimensions` for a zero or overflowing size, `BufferTooSmall` when
/// the buffer cannot hold every record.
pub fn decode_grid(buffer: &[u8], width: usize, height: usize) -> Result<Grid, RecordError> {
    let dims = GridDims::new(width, height)?;
    let reader = RecordReader::new(buffer);
    reader.require_len(dims.byte_len())?;

    let mut records = Vec::with_capacity(dims.cells());
    for y in 0..height {
        for x in 0..width {
            records.push(decode_record(buffer, dims.offset_of(x, y))?);
        }
    }
    Grid::from_records(dims, records)
}

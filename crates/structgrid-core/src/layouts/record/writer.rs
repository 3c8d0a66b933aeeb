use super::error::RecordError;
use super::layout;
use crate::grid::{Grid, Record};

/// Write `record` at `offset`, zeroing its padding byte.
pub fn encode_record(record: &Record, out: &mut [u8], offset: usize) -> Result<(), RecordError> {
    let actual = out.len();
    let end = offset
        .checked_add(layout::RECORD_STRIDE)
        .filter(|end| *end <= actual)
        .ok_or(RecordError::BufferTooSmall {
            needed: offset.saturating_add(layout::RECORD_STRIDE),
            actual,
        })?;
    write_slot(record, &mut out[offset..end]);
    Ok(())
}

/// `slot` must be exactly one stride long.
fn write_slot(record: &Record, slot: &mut [u8]) {
    slot[layout::X_RANGE].copy_from_slice(&record.x.to_le_bytes());
    slot[layout::Y_RANGE].copy_from_slice(&record.y.to_le_bytes());
    slot[layout::A_RANGE].copy_from_slice(&record.a.to_le_bytes());
    slot[layout::B_OFFSET] = record.b;
    slot[layout::PADDING_OFFSET] = 0;
}

/// Lay out every record of `grid` in a fresh buffer of exactly
/// `width * height * 12` bytes.
pub fn encode_grid(grid: &Grid) -> Vec<u8> {
    let dims = grid.dims();
    let mut out = vec![0u8; dims.byte_len()];
    for (chunk, record) in out
        .chunks_exact_mut(layout::RECORD_STRIDE)
        .zip(grid.records())
    {
        write_slot(record, chunk);
    }
    out
}

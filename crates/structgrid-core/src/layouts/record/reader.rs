use super::error::RecordError;
use super::layout;

#[derive(Debug)]
pub struct RecordReader<'a> {
    buffer: &'a [u8],
}

impl<'a> RecordReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), RecordError> {
        if self.buffer.len() < needed {
            return Err(RecordError::BufferTooSmall {
                needed,
                actual: self.buffer.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, RecordError> {
        self.buffer
            .get(offset)
            .copied()
            .ok_or(RecordError::BufferTooSmall {
                needed: offset.saturating_add(1),
                actual: self.buffer.len(),
            })
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, RecordError> {
        let bytes: [u8; 2] = self.read_array(range)?;
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_i32_le(&self, range: std::ops::Range<usize>) -> Result<i32, RecordError> {
        let bytes: [u8; 4] = self.read_array(range)?;
        Ok(i32::from_le_bytes(bytes))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], RecordError> {
        self.buffer
            .get(range.clone())
            .ok_or(RecordError::BufferTooSmall {
                needed: range.end,
                actual: self.buffer.len(),
            })
    }

    /// Slice of the record starting at `offset`, padding included.
    pub fn record_at(&self, offset: usize) -> Result<RecordReader<'a>, RecordError> {
        let end = offset
            .checked_add(layout::RECORD_STRIDE)
            .ok_or(RecordError::BufferTooSmall {
                needed: usize::MAX,
                actual: self.buffer.len(),
            })?;
        self.read_slice(offset..end).map(RecordReader::new)
    }

    fn read_array<const N: usize>(
        &self,
        range: std::ops::Range<usize>,
    ) -> Result<[u8; N], RecordError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| RecordError::BufferTooSmall {
            needed: N,
            actual: bytes.len(),
        })
    }
}

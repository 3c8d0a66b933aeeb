mod file;
mod pattern;

pub use file::FileSource;
pub use pattern::PatternSource;

use thiserror::Error;

use crate::grid::GridDims;
use crate::layouts::record::error::RecordError;

/// A producer of packed grid buffers.
///
/// Producers expose their contents through a public bulk copy into a
/// caller-owned buffer; consumers never reach into the producer's internal
/// representation.
pub trait BufferSource {
    /// Grid dimensions the buffer was produced for.
    fn dims(&self) -> GridDims;

    /// Number of bytes the producer holds.
    fn byte_len(&self) -> usize;

    /// Copy the whole buffer into `dst`, which must be exactly
    /// [`byte_len`](Self::byte_len) bytes long.
    fn copy_to(&self, dst: &mut [u8]) -> Result<(), SourceError>;

    /// RFC3339 timestamp of when the buffer was produced, when known.
    fn modified_at(&self) -> Option<String> {
        None
    }

    fn to_vec(&self) -> Result<Vec<u8>, SourceError> {
        let mut out = vec![0u8; self.byte_len()];
        self.copy_to(&mut out)?;
        Ok(out)
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("destination size mismatch: expected {expected} bytes, got {actual}")]
    DestinationSize { expected: usize, actual: usize },
    #[error("record error: {0}")]
    Record(#[from] RecordError),
}

fn check_destination(expected: usize, dst: &[u8]) -> Result<(), SourceError> {
    if dst.len() != expected {
        return Err(SourceError::DestinationSize {
            expected,
            actual: dst.len(),
        });
    }
    Ok(())
}

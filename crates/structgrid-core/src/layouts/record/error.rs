use thiserror::Error;

/// Errors returned by packed record decoding and encoding.
///
/// # Examples
/// ```
/// use structgrid_core::layouts::record::error::RecordError;
///
/// let err = RecordError::BufferTooSmall { needed: 72, actual: 71 };
/// assert!(err.to_string().contains("buffer too small"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

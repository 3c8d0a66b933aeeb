use std::fs;
use std::path::Path;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use super::{BufferSource, SourceError, check_destination};
use crate::grid::GridDims;

/// Raw buffer dump read from disk.
///
/// The file is read whole; its length is not checked against `dims` here so
/// the decoder can report a short buffer precisely.
#[derive(Debug, Clone)]
pub struct FileSource {
    dims: GridDims,
    data: Vec<u8>,
    modified_at: Option<String>,
}

impl FileSource {
    pub fn open(path: &Path, dims: GridDims) -> Result<Self, SourceError> {
        let data = fs::read(path)?;
        let modified_at = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| OffsetDateTime::from(modified).format(&Rfc3339).ok());
        Ok(Self {
            dims,
            data,
            modified_at,
        })
    }
}

impl BufferSource for FileSource {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn byte_len(&self) -> usize {
        self.data.len()
    }

    fn copy_to(&self, dst: &mut [u8]) -> Result<(), SourceError> {
        check_destination(self.data.len(), dst)?;
        dst.copy_from_slice(&self.data);
        Ok(())
    }

    fn modified_at(&self) -> Option<String> {
        self.modified_at.clone()
    }
}

use std::path::Path;

use thiserror::Error;

use crate::grid::{Grid, GridDims, Record};
use crate::layouts::record::decode_grid;
use crate::layouts::record::error::RecordError;
use crate::source::{BufferSource, FileSource, SourceError};
use crate::{CellRecord, DEFAULT_GENERATED_AT, FieldRange, FieldSummary, Report, make_stub_report};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Decode error: {0}")]
    Record(#[from] RecordError),
}

pub fn inspect_file(path: &Path, dims: GridDims) -> Result<Report, InspectError> {
    let source = FileSource::open(path, dims)?;
    inspect_source(path, &source)
}

pub fn inspect_source<S: BufferSource + ?Sized>(
    path: &Path,
    source: &S,
) -> Result<Report, InspectError> {
    let dims = source.dims();
    let buffer = source.to_vec()?;
    let grid = decode_grid(&buffer, dims.width(), dims.height())?;

    let mut report = make_stub_report(&path.display().to_string(), buffer.len() as u64, dims);
    report.generated_at = source
        .modified_at()
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    report.grid.trailing_bytes = (buffer.len() - dims.byte_len()) as u64;
    report.summary = build_summary(&grid);
    report.records = grid
        .iter()
        .map(|(col, row, record)| CellRecord {
            col,
            row,
            x: record.x,
            y: record.y,
            a: record.a,
            b: record.b,
        })
        .collect();
    Ok(report)
}

fn build_summary(grid: &Grid) -> Option<FieldSummary> {
    let mut records = grid.records().iter();
    let first = records.next()?;
    let mut summary = FieldSummary {
        x: FieldRange::single(i64::from(first.x)),
        y: FieldRange::single(i64::from(first.y)),
        a: FieldRange::single(i64::from(first.a)),
        b: FieldRange::single(i64::from(first.b)),
    };
    for &Record { x, y, a, b } in records {
        summary.x.include(i64::from(x));
        summary.y.include(i64::from(y));
        summary.a.include(i64::from(a));
        summary.b.include(i64::from(b));
    }
    Some(summary)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{InspectError, inspect_source};
    use crate::grid::{GridDims, Record};
    use crate::layouts::record::error::RecordError;
    use crate::source::{BufferSource, PatternSource, SourceError};
    use crate::{DEFAULT_GENERATED_AT, REPORT_VERSION};

    struct RawSource {
        dims: GridDims,
        data: Vec<u8>,
    }

    impl BufferSource for RawSource {
        fn dims(&self) -> GridDims {
            self.dims
        }

        fn byte_len(&self) -> usize {
            self.data.len()
        }

        fn copy_to(&self, dst: &mut [u8]) -> Result<(), SourceError> {
            dst.copy_from_slice(&self.data);
            Ok(())
        }
    }

    #[test]
    fn report_lists_cells_in_buffer_order() {
        let source = PatternSource::new(GridDims::new(2, 2).unwrap()).unwrap();
        let report = inspect_source(Path::new("pattern.bin"), &source).unwrap();
        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.generated_at, DEFAULT_GENERATED_AT);
        assert_eq!(report.input.bytes, 48);
        assert_eq!(report.grid.trailing_bytes, 0);
        let cells: Vec<_> = report.records.iter().map(|c| (c.col, c.row)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(report.records[3].y, -1);
    }

    #[test]
    fn summary_tracks_min_and_max() {
        let source = PatternSource::new(GridDims::new(2, 2).unwrap()).unwrap();
        let report = inspect_source(Path::new("pattern.bin"), &source).unwrap();
        let summary = report.summary.unwrap();
        assert_eq!((summary.x.min, summary.x.max), (0, 1));
        assert_eq!((summary.y.min, summary.y.max), (-1, 0));
        assert_eq!((summary.a.min, summary.a.max), (0, 771));
        assert_eq!((summary.b.min, summary.b.max), (0, 111));
    }

    #[test]
    fn trailing_bytes_are_counted() {
        let mut data = PatternSource::uniform(
            GridDims::new(1, 1).unwrap(),
            Record { x: 1, y: 2, a: 3, b: 4 },
        )
        .unwrap()
        .to_vec()
        .unwrap();
        data.extend_from_slice(&[0; 3]);
        let source = RawSource {
            dims: GridDims::new(1, 1).unwrap(),
            data,
        };
        let report = inspect_source(Path::new("raw.bin"), &source).unwrap();
        assert_eq!(report.grid.trailing_bytes, 3);
        assert_eq!(report.input.bytes, 15);
    }

    #[test]
    fn short_buffer_is_decode_error() {
        let source = RawSource {
            dims: GridDims::new(3, 2).unwrap(),
            data: vec![0; 71],
        };
        let err = inspect_source(Path::new("raw.bin"), &source).unwrap_err();
        assert!(matches!(
            err,
            InspectError::Record(RecordError::BufferTooSmall {
                needed: 72,
                actual: 71
            })
        ));
    }
}

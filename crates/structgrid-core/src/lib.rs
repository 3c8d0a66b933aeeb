//! structgrid core library for packed grid buffers.
//!
//! A compute step fills a two-dimensional allocation of fixed-layout structs
//! and hands over its raw bytes. This crate turns those bytes back into typed
//! records: producers (`source`) expose a public bulk copy, the record layout
//! decoder (layout/reader/parser) rebuilds an immutable `Grid`, and the
//! inspection layer turns the grid into a deterministic JSON report.
//! Decoding is byte-oriented and side-effect free; all I/O is isolated in
//! `source`.
//!
//! Invariants:
//! - Every multi-byte field is little-endian; the record stride is 12 bytes.
//! - A buffer shorter than `width * height * 12` is an error, never padded.
//! - Decoded grids own their records and never alias the input buffer.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use structgrid_core::{GridDims, inspect_file};
//!
//! let report = inspect_file(Path::new("allocation.bin"), GridDims::new(3, 2)?)?;
//! println!("cells: {}", report.records.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod grid;
mod inspect;
pub mod layouts;
mod source;

pub use grid::{Grid, GridDims, Record};
pub use inspect::{InspectError, inspect_file, inspect_source};
pub use layouts::record::error::RecordError;
pub use layouts::record::layout::RECORD_STRIDE;
pub use layouts::record::{decode_grid, decode_record, encode_grid, encode_record};
pub use source::{BufferSource, FileSource, PatternSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the producer has no modification time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Inspection report for one decoded buffer.
///
/// # Examples
/// ```
/// use structgrid_core::{GridDims, make_stub_report};
///
/// let report = make_stub_report("allocation.bin", 72, GridDims::new(3, 2).unwrap());
/// assert_eq!(report.report_version, structgrid_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the producer's buffer, or the epoch.
    pub generated_at: String,
    /// Input buffer metadata.
    pub input: InputInfo,
    /// Grid geometry used for decoding.
    pub grid: GridInfo,
    /// Per-field ranges; absent when no record was decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FieldSummary>,
    /// Decoded cells in buffer order.
    pub records: Vec<CellRecord>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input buffer metadata embedded in reports.
///
/// # Examples
/// ```
/// use structgrid_core::InputInfo;
///
/// let input = InputInfo {
///     path: "allocation.bin".to_string(),
///     bytes: 72,
/// };
/// assert_eq!(input.bytes, 72);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the inspector.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Grid geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridInfo {
    pub width: usize,
    pub height: usize,
    /// Bytes per record, padding included.
    pub stride: usize,
    /// Bytes past `width * height * stride`, ignored by the decoder.
    pub trailing_bytes: u64,
}

/// One decoded cell with its grid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub col: usize,
    pub row: usize,
    pub x: i32,
    pub y: i32,
    pub a: u16,
    pub b: u8,
}

/// Inclusive value range of each record field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSummary {
    pub x: FieldRange,
    pub y: FieldRange,
    pub a: FieldRange,
    pub b: FieldRange,
}

/// # Examples
/// ```
/// use structgrid_core::FieldRange;
///
/// let mut range = FieldRange::single(4);
/// range.include(-2);
/// assert_eq!((range.min, range.max), (-2, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: i64,
    pub max: i64,
}

impl FieldRange {
    pub fn single(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn include(&mut self, value: i64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

/// Build a stub report with base fields filled and no decoded records.
pub fn make_stub_report(input_path: &str, input_bytes: u64, dims: GridDims) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "structgrid".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        grid: GridInfo {
            width: dims.width(),
            height: dims.height(),
            stride: RECORD_STRIDE,
            trailing_bytes: 0,
        },
        summary: None,
        records: vec![],
    }
}

/// One line per cell, column by column, in the form
/// `(col,row): x=X, y=Y, a=A, b=B`.
///
/// # Examples
/// ```
/// use structgrid_core::{Grid, GridDims, Record, format_debug_lines};
///
/// let dims = GridDims::new(1, 1).unwrap();
/// let grid = Grid::from_records(dims, vec![Record { x: 1, y: 2, a: 3, b: 4 }]).unwrap();
/// assert_eq!(format_debug_lines(&grid), vec!["(0,0): x=1, y=2, a=3, b=4"]);
/// ```
pub fn format_debug_lines(grid: &Grid) -> Vec<String> {
    grid.iter_columns()
        .map(|(col, row, r)| format!("({col},{row}): x={}, y={}, a={}, b={}", r.x, r.y, r.a, r.b))
        .collect()
}

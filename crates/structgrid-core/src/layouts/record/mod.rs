//! Packed grid record decoding.
//!
//! A record is two little-endian `i32` (`x`, `y`), one little-endian `u16`
//! (`a`) and one `u8` (`b`), followed by a padding byte for a fixed 12-byte
//! stride. Records are stored one row after another, so cell `(x, y)` starts
//! at `(x + y * width) * 12`.
//!
//! The parser checks the whole required length before reading anything: a
//! short buffer is an error, never a truncated or zero-filled grid. Bytes past
//! the required length are ignored here and surfaced by the inspection layer.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use parser::{decode_grid, decode_record};
pub use writer::{encode_grid, encode_record};

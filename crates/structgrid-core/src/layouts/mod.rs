//! Packed layout decoding modules.
//!
//! Each layout follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: safe byte access and endianness conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `writer`: the inverse of `parser`, used by producers and fixtures
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; sources and the inspection layer
//! handle file access and reporting.

pub(crate) mod common;
pub mod record;

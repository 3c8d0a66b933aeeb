pub const X_RANGE: std::ops::Range<usize> = 0..4;
pub const Y_RANGE: std::ops::Range<usize> = 4..8;
pub const A_RANGE: std::ops::Range<usize> = 8..10;
pub const B_OFFSET: usize = 10;
pub const PADDING_OFFSET: usize = 11;

/// Bytes per record, padding included. The fields alone pack to 11.
pub const RECORD_STRIDE: usize = 12;

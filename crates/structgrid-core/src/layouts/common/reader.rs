/// Total byte length of a `width` x `height` grid at `stride` bytes per cell.
///
/// Returns `None` when either dimension is zero or the product overflows.
pub(crate) fn grid_byte_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    width.checked_mul(height)?.checked_mul(stride)
}

/// Byte offset of cell `(x, y)` in a buffer laid out row after row.
pub(crate) fn cell_offset(x: usize, y: usize, width: usize, stride: usize) -> usize {
    (x + y * width) * stride
}

#[cfg(test)]
mod tests {
    use super::{cell_offset, grid_byte_len};

    #[test]
    fn grid_byte_len_multiplies_dimensions() {
        assert_eq!(grid_byte_len(3, 2, 12), Some(72));
    }

    #[test]
    fn grid_byte_len_rejects_zero_dimension() {
        assert_eq!(grid_byte_len(0, 2, 12), None);
        assert_eq!(grid_byte_len(3, 0, 12), None);
    }

    #[test]
    fn grid_byte_len_rejects_overflow() {
        assert_eq!(grid_byte_len(usize::MAX, 2, 12), None);
    }

    #[test]
    fn cell_offset_walks_rows() {
        assert_eq!(cell_offset(2, 1, 3, 12), 60);
        assert_eq!(cell_offset(0, 0, 3, 12), 0);
    }
}

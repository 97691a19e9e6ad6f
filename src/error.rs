use core::fmt::{self, Formatter, Display};
use alloc::format;

/// The error type returned by the slice-addressed accessors of matrices and views when the number of coordinates does not match the number of dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DimensionMismatchError {
    /// The number of coordinates the matrix or view needs to address a cell.
    pub expected: usize,
    /// The number of coordinates which were actually provided.
    pub found: usize,
}
impl Display for DimensionMismatchError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&format!(
            "expected {} coordinates to address a cell, found {}",
            self.expected, self.found,
        ))
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DimensionMismatchError {}

/// Checks that a coordinate slice has exactly `expected` elements.
#[inline]
pub(crate) fn check_dimensions(
    coords: &[usize],
    expected: usize,
) -> Result<(), DimensionMismatchError> {
    if coords.len() == expected {
        Ok(())
    } else {
        Err(DimensionMismatchError {
            expected,
            found: coords.len(),
        })
    }
}

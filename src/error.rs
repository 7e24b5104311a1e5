//! The error type shared by every fallible operation in this crate.
//!
//! All errors are caller mistakes detected synchronously: a malformed
//! descriptor, a coordinate or linear index outside its domain, or a
//! dimension number that exceeds the rank. Each variant carries enough
//! context to fix the offending input.

/// Broad classification of an [`Error`].
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// The descriptor could not be constructed.
    InvalidShape,
    /// A coordinate does not fit the descriptor.
    CoordinateOutOfBounds,
    /// A linear index is outside `0..total_elements()`.
    IndexOutOfBounds,
    /// A dimension number is not less than the rank.
    OutOfRange,
    /// Backing storage is shorter than the span of its mapping.
    StorageTooSmall,
}

/// Errors that can occur while building or querying an index mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A descriptor must have at least one dimension.
    #[error("shape must have at least one dimension")]
    EmptyShape,

    #[error("extent of dim {dim} must be positive")]
    ZeroExtent { dim: usize },

    #[error("stride of dim {dim} must be positive")]
    ZeroStride { dim: usize },

    /// Stride list length doesn't match the number of extents.
    #[error("{strides} strides given for {rank} extents")]
    StrideLengthMismatch { rank: usize, strides: usize },

    /// A fixed-rank descriptor was built from a descriptor of another rank.
    #[error("rank mismatch: expected {expected}, found {found}")]
    RankMismatch { expected: usize, found: usize },

    /// The element count or the addressable span does not fit in `usize`.
    #[error("shape {extents:?} overflows usize")]
    ShapeOverflow { extents: Vec<usize> },

    #[error("coordinate has {found} components, rank is {rank}")]
    CoordinateRankMismatch { rank: usize, found: usize },

    #[error("coordinate {value} out of bounds for dim {dim} with extent {extent}")]
    CoordinateOutOfBounds { dim: usize, value: usize, extent: usize },

    #[error("linear index {index} out of bounds for {len} elements")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("dim {dim} out of range for rank {rank}")]
    DimOutOfRange { dim: usize, rank: usize },

    #[error("storage of {len} elements is too small for span {span}")]
    StorageTooSmall { span: usize, len: usize },
}

impl Error {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyShape
            | Error::ZeroExtent { .. }
            | Error::ZeroStride { .. }
            | Error::StrideLengthMismatch { .. }
            | Error::RankMismatch { .. }
            | Error::ShapeOverflow { .. } => ErrorKind::InvalidShape,
            Error::CoordinateRankMismatch { .. }
            | Error::CoordinateOutOfBounds { .. } => ErrorKind::CoordinateOutOfBounds,
            Error::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Error::DimOutOfRange { .. } => ErrorKind::OutOfRange,
            Error::StorageTooSmall { .. } => ErrorKind::StorageTooSmall,
        }
    }
}

/// `Result` specialised to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Error::ZeroExtent {dim: 1}.kind(), ErrorKind::InvalidShape);
        assert_eq!(Error::RankMismatch {expected: 2, found: 3}.kind(), ErrorKind::InvalidShape);
        assert_eq!(
            Error::CoordinateRankMismatch {rank: 2, found: 1}.kind(),
            ErrorKind::CoordinateOutOfBounds,
        );
        assert_eq!(Error::IndexOutOfBounds {index: 6, len: 6}.kind(), ErrorKind::IndexOutOfBounds);
        assert_eq!(Error::DimOutOfRange {dim: 2, rank: 2}.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn messages() {
        let e = Error::CoordinateOutOfBounds {dim: 1, value: 5, extent: 5};
        assert_eq!(e.to_string(), "coordinate 5 out of bounds for dim 1 with extent 5");
        let e = Error::IndexOutOfBounds {index: 6, len: 6};
        assert_eq!(e.to_string(), "linear index 6 out of bounds for 6 elements");
    }
}

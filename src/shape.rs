use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use super::{Error, Result, Mapping};

/// How the strides of a [`Shape`] were obtained.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Layout {
    /// Contiguous, last dimension varying fastest.
    RowMajor,
    /// Contiguous, first dimension varying fastest.
    ColumnMajor,
    /// Caller-supplied strides, possibly padded.
    Strided,
}

// ----------------------------------------------------------------------------

/// A runtime-rank shape descriptor: the extent of every dimension, and the
/// stride to advance in storage when that dimension's coordinate grows by one.
///
/// A `Shape` is immutable. Every constructor checks that the descriptor is
/// well-formed and that the number of elements and the addressable span both
/// fit in a `usize`, so queries on a `Shape` never overflow.
///
/// Two `Shape`s are equal if they have the same extents and strides, however
/// they were constructed. [`Shape::layout()`] does not take part.
///
/// ```
/// use ndindex::{Mapping, Shape};
/// let s = Shape::new([2, 4, 3, 5]).unwrap();
/// assert_eq!(s.strides(), [60, 15, 5, 1]);
/// assert_eq!(s.total_elements(), 120);
/// assert_eq!(s.to_linear(&[1, 2, 1, 4]), Ok(99));
/// ```
#[derive(Debug, Clone)]
pub struct Shape {
    extents: Box<[usize]>,
    strides: Box<[usize]>,
    layout: Layout,
}

impl Shape {
    fn new_inner(extents: Box<[usize]>, strides: Box<[usize]>, layout: Layout) -> Result<Self> {
        check_strides(&extents, &strides)?;
        log::trace!("new {:?} shape {:?} with strides {:?}", layout, extents, strides);
        Ok(Self {extents, strides, layout})
    }

    /// The caller must already have checked `extents` and `strides`.
    pub(crate) fn from_checked(extents: Box<[usize]>, strides: Box<[usize]>, layout: Layout) -> Self {
        Self {extents, strides, layout}
    }

    /// Constructs a row-major contiguous `Shape`.
    ///
    /// Fails with [`Error::EmptyShape`] if `extents` is empty, and with
    /// [`Error::ZeroExtent`] if any extent is zero.
    pub fn new(extents: impl Into<Box<[usize]>>) -> Result<Self> {
        let extents = extents.into();
        let mut strides = vec![0; extents.len()].into_boxed_slice();
        fill_row_major(&extents, &mut strides)?;
        Self::new_inner(extents, strides, Layout::RowMajor)
    }

    /// Constructs a column-major contiguous `Shape`, in which the first
    /// dimension varies fastest in storage.
    ///
    /// ```
    /// use ndindex::{Mapping, Shape};
    /// let s = Shape::column_major([3, 5]).unwrap();
    /// assert_eq!(s.strides(), [1, 3]);
    /// assert_eq!(s.to_linear(&[1, 2]), Ok(7));
    /// ```
    pub fn column_major(extents: impl Into<Box<[usize]>>) -> Result<Self> {
        let extents = extents.into();
        let mut strides = vec![0; extents.len()].into_boxed_slice();
        fill_column_major(&extents, &mut strides)?;
        Self::new_inner(extents, strides, Layout::ColumnMajor)
    }

    /// Constructs a `Shape` with explicit strides. This is how padding is
    /// expressed: a matrix of 3 rows of 5 elements, each row followed by 2
    /// unused slots, has strides `[7, 1]`.
    ///
    /// ```
    /// use ndindex::{Mapping, Shape};
    /// let s = Shape::with_strides([3, 5], [7, 1]).unwrap();
    /// assert_eq!(s.to_linear(&[1, 0]), Ok(7));
    /// assert_eq!(s.total_elements(), 15);
    /// assert_eq!(s.required_span(), 19);
    /// assert!(!s.is_exhaustive());
    /// ```
    pub fn with_strides(
        extents: impl Into<Box<[usize]>>,
        strides: impl Into<Box<[usize]>>,
    ) -> Result<Self> {
        Self::new_inner(extents.into(), strides.into(), Layout::Strided)
    }

    /// How the strides of this `Shape` were obtained.
    pub fn layout(&self) -> Layout { self.layout }
}

impl Mapping for Shape {
    #[inline(always)]
    fn extents(&self) -> &[usize] { &self.extents }
    #[inline(always)]
    fn strides(&self) -> &[usize] { &self.strides }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.extents == other.extents && self.strides == other.strides
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.extents.hash(state);
        self.strides.hash(state);
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.extents)?;
        if self.layout == Layout::Strided {
            write!(f, " / {:?}", self.strides)?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------

/// Returns the number of elements, checking that `extents` is a valid list of
/// extents.
pub(crate) fn check_extents(extents: &[usize]) -> Result<usize> {
    if extents.is_empty() { return Err(Error::EmptyShape); }
    let mut total: usize = 1;
    for (dim, &extent) in extents.iter().enumerate() {
        if extent == 0 { return Err(Error::ZeroExtent {dim}); }
        total = total.checked_mul(extent).ok_or_else(|| overflow(extents))?;
    }
    Ok(total)
}

/// Checks `extents`, then checks `strides` against them. Also checks that the
/// largest reachable offset fits in a `usize`.
pub(crate) fn check_strides(extents: &[usize], strides: &[usize]) -> Result<()> {
    check_extents(extents)?;
    if strides.len() != extents.len() {
        return Err(Error::StrideLengthMismatch {rank: extents.len(), strides: strides.len()});
    }
    let mut last: usize = 0;
    for (dim, (&extent, &stride)) in extents.iter().zip(strides).enumerate() {
        if stride == 0 { return Err(Error::ZeroStride {dim}); }
        last = (extent - 1).checked_mul(stride)
            .and_then(|step| last.checked_add(step))
            .ok_or_else(|| overflow(extents))?;
    }
    last.checked_add(1).ok_or_else(|| overflow(extents))?;
    Ok(())
}

/// Writes the row-major contiguous strides of `extents` into `strides`.
pub(crate) fn fill_row_major(extents: &[usize], strides: &mut [usize]) -> Result<()> {
    check_extents(extents)?;
    let mut stride = 1;
    for dim in (0..extents.len()).rev() {
        strides[dim] = stride;
        // Cannot overflow: bounded by the product of all extents.
        stride *= extents[dim];
    }
    Ok(())
}

/// Writes the column-major contiguous strides of `extents` into `strides`.
pub(crate) fn fill_column_major(extents: &[usize], strides: &mut [usize]) -> Result<()> {
    check_extents(extents)?;
    let mut stride = 1;
    for dim in 0..extents.len() {
        strides[dim] = stride;
        stride *= extents[dim];
    }
    Ok(())
}

fn overflow(extents: &[usize]) -> Error {
    Error::ShapeOverflow {extents: extents.to_vec()}
}

/// Returns the row-major contiguous strides for `extents`.
///
/// ```
/// assert_eq!(ndindex::row_major_strides(&[2, 3, 4]), Ok(vec![12, 4, 1]));
/// ```
pub fn row_major_strides(extents: &[usize]) -> Result<Vec<usize>> {
    let mut strides = vec![0; extents.len()];
    fill_row_major(extents, &mut strides)?;
    Ok(strides)
}

/// Returns the column-major contiguous strides for `extents`.
pub fn column_major_strides(extents: &[usize]) -> Result<Vec<usize>> {
    let mut strides = vec![0; extents.len()];
    fill_column_major(extents, &mut strides)?;
    Ok(strides)
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn row_major() {
        let s = Shape::new([2, 3]).unwrap();
        assert_eq!(s.rank(), 2);
        assert_eq!(s.extents(), [2, 3]);
        assert_eq!(s.strides(), [3, 1]);
        assert_eq!(s.layout(), Layout::RowMajor);
        assert_eq!(s.total_elements(), 6);
        assert_eq!(s.required_span(), 6);
        assert!(s.is_exhaustive());
        assert!(s.is_row_major());
    }

    #[test]
    fn rank_one() {
        let s = Shape::new(vec![7]).unwrap();
        assert_eq!(s.strides(), [1]);
        assert_eq!(s.total_elements(), 7);
    }

    #[test]
    fn column_major() {
        let s = Shape::column_major([2, 4, 3]).unwrap();
        assert_eq!(s.strides(), [1, 2, 8]);
        assert_eq!(s.layout(), Layout::ColumnMajor);
        assert_eq!(s.total_elements(), 24);
        assert!(s.is_exhaustive());
        assert!(!s.is_row_major());
    }

    #[test]
    fn padded() {
        let s = Shape::with_strides([3, 5], [7, 1]).unwrap();
        assert_eq!(s.layout(), Layout::Strided);
        assert_eq!(s.total_elements(), 15);
        assert_eq!(s.required_span(), 19);
        assert!(!s.is_exhaustive());
        assert!(!s.is_row_major());
        assert_eq!(s.to_string(), "[3, 5] / [7, 1]");
    }

    #[test]
    fn explicit_contiguous_strides() {
        let s = Shape::with_strides([3, 5], [5, 1]).unwrap();
        assert!(s.is_exhaustive());
        assert!(s.is_row_major());
        let t = Shape::with_strides([3, 5], [1, 3]).unwrap();
        assert!(t.is_exhaustive());
        assert!(!t.is_row_major());
    }

    #[test]
    fn equality_ignores_layout() {
        let s = Shape::new([2, 3]).unwrap();
        let t = Shape::with_strides([2, 3], [3, 1]).unwrap();
        assert_eq!(s, t);
        assert_ne!(s.layout(), t.layout());
        let mut set = std::collections::HashSet::new();
        set.insert(s);
        assert!(set.contains(&t));
        assert_ne!(Shape::new([2, 3]).unwrap(), Shape::column_major([2, 3]).unwrap());
        assert_eq!(Shape::new([4]).unwrap(), Shape::column_major([4]).unwrap());
    }

    #[test]
    fn queries() {
        let s = Shape::with_strides([3, 5], [7, 1]).unwrap();
        assert_eq!(s.extent(1), Ok(5));
        assert_eq!(s.stride(0), Ok(7));
        assert_eq!(s.extent(2), Err(Error::DimOutOfRange {dim: 2, rank: 2}));
        assert_eq!(s.stride(2).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn invalid() {
        assert_eq!(Shape::new(Vec::<usize>::new()), Err(Error::EmptyShape));
        assert_eq!(Shape::new([2, 0, 3]), Err(Error::ZeroExtent {dim: 1}));
        assert_eq!(
            Shape::with_strides([2, 3], [3]),
            Err(Error::StrideLengthMismatch {rank: 2, strides: 1}),
        );
        assert_eq!(Shape::with_strides([2, 3], [3, 0]), Err(Error::ZeroStride {dim: 1}));
        assert_eq!(Shape::column_major([0]).unwrap_err().kind(), ErrorKind::InvalidShape);
    }

    #[test]
    fn overflow() {
        let huge = usize::MAX / 2 + 1;
        assert_eq!(Shape::new([huge, 2]).unwrap_err().kind(), ErrorKind::InvalidShape);
        assert!(Shape::with_strides([2], [usize::MAX]).is_err());
        assert!(Shape::with_strides([1], [usize::MAX]).is_ok());
    }

    #[test]
    fn strides_helpers() {
        assert_eq!(row_major_strides(&[2, 4, 3, 5]), Ok(vec![60, 15, 5, 1]));
        assert_eq!(column_major_strides(&[2, 4, 3, 5]), Ok(vec![1, 2, 8, 24]));
        assert_eq!(row_major_strides(&[]), Err(Error::EmptyShape));
    }
}

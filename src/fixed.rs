use std::hash::{Hash, Hasher};

use super::{Error, Result, Mapping, Shape, Layout};
use super::shape::{check_strides, fill_row_major, fill_column_major};
use super::index::{decompose};

/// A shape descriptor whose rank is a compile-time constant.
///
/// Coordinates are `[usize; RANK]` arrays, so converting in either direction
/// allocates nothing. Otherwise a `FixedShape` behaves exactly like the
/// [`Shape`] it converts into. Like `Shape`, equality compares only the
/// extents and strides.
///
/// ```
/// use ndindex::{Mapping, FixedShape, Shape};
/// let f = FixedShape::new([2, 4, 3, 5]).unwrap();
/// assert_eq!(f.linear([1, 2, 1, 4]), Ok(99));
/// assert_eq!(f.coordinate(99), Ok([1, 2, 1, 4]));
/// let s: Shape = f.into();
/// assert_eq!(s.to_coordinate(99), Ok(vec![1, 2, 1, 4]));
/// ```
#[derive(Debug, Copy, Clone)]
pub struct FixedShape<const RANK: usize> {
    extents: [usize; RANK],
    strides: [usize; RANK],
    layout: Layout,
}

impl<const RANK: usize> FixedShape<RANK> {
    fn new_inner(extents: [usize; RANK], strides: [usize; RANK], layout: Layout) -> Result<Self> {
        check_strides(&extents, &strides)?;
        log::trace!("new fixed {:?} shape {:?} with strides {:?}", layout, extents, strides);
        Ok(Self {extents, strides, layout})
    }

    /// Constructs a row-major contiguous `FixedShape`.
    ///
    /// Fails with [`Error::EmptyShape`] if `RANK` is zero.
    pub fn new(extents: [usize; RANK]) -> Result<Self> {
        let mut strides = [0; RANK];
        fill_row_major(&extents, &mut strides)?;
        Self::new_inner(extents, strides, Layout::RowMajor)
    }

    /// Constructs a column-major contiguous `FixedShape`.
    pub fn column_major(extents: [usize; RANK]) -> Result<Self> {
        let mut strides = [0; RANK];
        fill_column_major(&extents, &mut strides)?;
        Self::new_inner(extents, strides, Layout::ColumnMajor)
    }

    /// Constructs a `FixedShape` with explicit, possibly padded, strides.
    pub fn with_strides(extents: [usize; RANK], strides: [usize; RANK]) -> Result<Self> {
        Self::new_inner(extents, strides, Layout::Strided)
    }

    /// How the strides of this `FixedShape` were obtained.
    pub fn layout(&self) -> Layout { self.layout }

    /// Same as [`Mapping::to_linear()`].
    #[inline(always)]
    pub fn linear(&self, coordinate: [usize; RANK]) -> Result<usize> {
        self.to_linear(&coordinate)
    }

    /// Same as [`Mapping::to_coordinate()`], without allocating.
    pub fn coordinate(&self, index: usize) -> Result<[usize; RANK]> {
        let mut coordinate = [0; RANK];
        decompose(&self.extents, index, &mut coordinate)?;
        Ok(coordinate)
    }
}

impl<const RANK: usize> Mapping for FixedShape<RANK> {
    #[inline(always)]
    fn extents(&self) -> &[usize] { &self.extents }
    #[inline(always)]
    fn strides(&self) -> &[usize] { &self.strides }
    #[inline(always)]
    fn rank(&self) -> usize { RANK }
}

impl<const RANK: usize> PartialEq for FixedShape<RANK> {
    fn eq(&self, other: &Self) -> bool {
        self.extents == other.extents && self.strides == other.strides
    }
}

impl<const RANK: usize> Eq for FixedShape<RANK> {}

impl<const RANK: usize> Hash for FixedShape<RANK> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.extents.hash(state);
        self.strides.hash(state);
    }
}

impl<const RANK: usize> From<FixedShape<RANK>> for Shape {
    fn from(f: FixedShape<RANK>) -> Self {
        Shape::from_checked(f.extents.into(), f.strides.into(), f.layout)
    }
}

impl<const RANK: usize> TryFrom<&Shape> for FixedShape<RANK> {
    type Error = Error;

    fn try_from(s: &Shape) -> Result<Self> {
        let mismatch = || Error::RankMismatch {expected: RANK, found: s.rank()};
        let extents = s.extents().try_into().map_err(|_| mismatch())?;
        let strides = s.strides().try_into().map_err(|_| mismatch())?;
        Ok(Self {extents, strides, layout: s.layout()})
    }
}

// ----------------------------------------------------------------------------

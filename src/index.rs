use std::ops::{Deref};

use super::{Error, Result, Offsets, Enumerate};

/// A coordinate in a runtime-rank index space: one component per dimension,
/// first dimension first.
pub type Coordinate = Vec<usize>;

/// Implemented by shape descriptors that map coordinates to storage offsets.
///
/// The two required methods expose the extents and strides. Everything else
/// is derived from them. [`Shape`] and [`FixedShape`] are the implementations
/// provided by this crate. If you write your own, it must uphold the same
/// invariants as those types: `extents` and `strides` have the same non-zero
/// length, all entries are positive, and
/// `1 + sum((extent[i] - 1) * stride[i])` fits in a `usize`.
///
/// [`Shape`]: super::Shape
/// [`FixedShape`]: super::FixedShape
pub trait Mapping {
    /// The number of valid coordinate values of each dimension.
    fn extents(&self) -> &[usize];

    /// The storage step of each dimension.
    fn strides(&self) -> &[usize];

    /// The number of dimensions.
    fn rank(&self) -> usize { self.extents().len() }

    /// Returns the extent of dimension `dim`.
    fn extent(&self, dim: usize) -> Result<usize> {
        self.extents().get(dim).copied().ok_or(Error::DimOutOfRange {dim, rank: self.rank()})
    }

    /// Returns the stride of dimension `dim`.
    fn stride(&self, dim: usize) -> Result<usize> {
        self.strides().get(dim).copied().ok_or(Error::DimOutOfRange {dim, rank: self.rank()})
    }

    /// The number of addressable elements. Padding is not counted.
    fn total_elements(&self) -> usize { self.extents().iter().product() }

    /// The number of storage slots needed to hold every element, including
    /// padding between elements but not after the last one.
    fn required_span(&self) -> usize {
        self.extents().iter().zip(self.strides())
            .fold(1, |span, (&extent, &stride)| span + (extent - 1) * stride)
    }

    /// Returns `true` if every storage slot in `0..required_span()` holds
    /// exactly one element, i.e. there is no padding and no aliasing.
    fn is_exhaustive(&self) -> bool {
        let mut dims: Vec<(usize, usize)> = self.strides().iter().copied()
            .zip(self.extents().iter().copied())
            .filter(|&(_, extent)| extent > 1)
            .collect();
        dims.sort_unstable();
        let mut expected = 1;
        for (stride, extent) in dims {
            if stride != expected { return false; }
            expected *= extent;
        }
        true
    }

    /// Returns `true` if the strides are exactly the contiguous row-major
    /// strides of the extents. The storage offset of such a mapping equals
    /// its logical index.
    fn is_row_major(&self) -> bool {
        let mut expected = 1;
        for (&extent, &stride) in self.extents().iter().zip(self.strides()).rev() {
            if stride != expected { return false; }
            expected *= extent;
        }
        true
    }

    /// Returns the storage offset of `coordinate`. See [`to_linear()`].
    fn to_linear(&self, coordinate: &[usize]) -> Result<usize> { to_linear(self, coordinate) }

    /// Returns the coordinate of logical index `index`. See
    /// [`to_coordinate()`].
    fn to_coordinate(&self, index: usize) -> Result<Coordinate> { to_coordinate(self, index) }

    /// Returns the storage offset of the element with logical index `index`.
    ///
    /// Equivalent to, but more efficient than,
    /// ```text
    /// self.to_linear(&self.to_coordinate(index)?)
    /// ```
    fn offset(&self, index: usize) -> Result<usize> {
        let extents = self.extents();
        check_index(extents, index)?;
        let mut offset = 0;
        let mut divisor = 1;
        for (&extent, &stride) in extents.iter().zip(self.strides()).rev() {
            offset += (index / divisor) % extent * stride;
            divisor *= extent;
        }
        Ok(offset)
    }

    /// Returns an iterator over the storage offsets of all elements, in
    /// row-major coordinate order.
    fn offsets(&self) -> Offsets<'_> { Offsets::new(self.extents(), self.strides()) }

    /// Returns an iterator over all `(coordinate, offset)` pairs, in
    /// row-major coordinate order.
    fn enumerate(&self) -> Enumerate<'_> { Enumerate::new(self.offsets()) }
}

impl<T: Deref> Mapping for T where T::Target: Mapping {
    #[inline(always)]
    fn extents(&self) -> &[usize] { T::Target::extents(self) }
    #[inline(always)]
    fn strides(&self) -> &[usize] { T::Target::strides(self) }
}

// ----------------------------------------------------------------------------

/// Computes the storage offset of `coordinate`: the sum over all dimensions
/// of `coordinate[i] * stride[i]`.
///
/// The same formula serves contiguous, column-major and padded mappings,
/// since the strides encode the storage pitch directly.
///
/// Fails with [`Error::CoordinateRankMismatch`] if `coordinate` has the wrong
/// number of components, and with [`Error::CoordinateOutOfBounds`] if any
/// component is not less than its extent.
///
/// ```
/// use ndindex::{Shape, to_linear};
/// let s = Shape::new([2, 3]).unwrap();
/// assert_eq!(to_linear(&s, &[1, 2]), Ok(5));
/// let padded = Shape::with_strides([3, 5], [7, 1]).unwrap();
/// assert_eq!(to_linear(&padded, &[1, 0]), Ok(7));
/// assert!(to_linear(&padded, &[0, 5]).is_err());
/// ```
pub fn to_linear<M: Mapping + ?Sized>(mapping: &M, coordinate: &[usize]) -> Result<usize> {
    let extents = mapping.extents();
    if coordinate.len() != extents.len() {
        return Err(Error::CoordinateRankMismatch {rank: extents.len(), found: coordinate.len()});
    }
    let mut index = 0;
    for (dim, ((&value, &extent), &stride)) in coordinate.iter().zip(extents).zip(mapping.strides()).enumerate() {
        if value >= extent { return Err(Error::CoordinateOutOfBounds {dim, value, extent}); }
        index += value * stride;
    }
    Ok(index)
}

/// Computes the coordinate of logical index `index`, which must be less than
/// `mapping.total_elements()`.
///
/// The index is always read in row-major order over the extents, whatever the
/// strides of `mapping`: `coordinate[d] = (index / divisor[d]) % extent[d]`,
/// where `divisor[d]` is the product of the extents after `d`. For a padded
/// mapping this is therefore not the inverse of [`to_linear()`].
///
/// ```
/// use ndindex::{Shape, to_coordinate};
/// let s = Shape::new([2, 3]).unwrap();
/// assert_eq!(to_coordinate(&s, 5), Ok(vec![1, 2]));
/// assert!(to_coordinate(&s, 6).is_err());
/// ```
pub fn to_coordinate<M: Mapping + ?Sized>(mapping: &M, index: usize) -> Result<Coordinate> {
    let mut coordinate = vec![0; mapping.rank()];
    decompose(mapping.extents(), index, &mut coordinate)?;
    Ok(coordinate)
}

/// Computes the same coordinate as [`to_coordinate()`], by peeling off one
/// dimension at a time, first dimension first: `x = rest / step`, then
/// `rest -= x * step`, where `step` is the number of elements in one
/// increment of the current dimension.
pub fn to_coordinate_by_steps<M: Mapping + ?Sized>(mapping: &M, index: usize) -> Result<Coordinate> {
    let extents = mapping.extents();
    let mut step = check_index(extents, index)?;
    let mut rest = index;
    let mut coordinate = Vec::with_capacity(extents.len());
    for &extent in extents {
        step /= extent;
        let x = rest / step;
        rest -= x * step;
        coordinate.push(x);
    }
    Ok(coordinate)
}

/// Writes the row-major coordinate of `index` into `coordinate`.
pub(crate) fn decompose(extents: &[usize], index: usize, coordinate: &mut [usize]) -> Result<()> {
    check_index(extents, index)?;
    let mut divisor = 1;
    for dim in (0..extents.len()).rev() {
        coordinate[dim] = (index / divisor) % extents[dim];
        divisor *= extents[dim];
    }
    Ok(())
}

/// Returns the number of elements if `index` is less than it.
fn check_index(extents: &[usize], index: usize) -> Result<usize> {
    let len: usize = extents.iter().product();
    if index >= len { return Err(Error::IndexOutOfBounds {index, len}); }
    Ok(len)
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{ErrorKind, Shape};

    #[test]
    fn scenario_2d() {
        let s = Shape::new([2, 3]).unwrap();
        assert_eq!(s.to_linear(&[1, 2]), Ok(5));
        assert_eq!(s.to_coordinate(5), Ok(vec![1, 2]));
        assert_eq!(s.to_coordinate(0), Ok(vec![0, 0]));
    }

    #[test]
    fn scenario_4d() {
        let s = Shape::new([2, 4, 3, 5]).unwrap();
        assert_eq!(s.total_elements(), 120);
        assert_eq!(s.to_linear(&[1, 2, 1, 4]), Ok(1 * 60 + 2 * 15 + 1 * 5 + 4));
        assert_eq!(s.to_linear(&[1, 2, 1, 4]), Ok(99));
        assert_eq!(s.to_coordinate(99), Ok(vec![1, 2, 1, 4]));
        assert_eq!(s.to_coordinate(119), Ok(vec![1, 3, 2, 4]));
    }

    #[test]
    fn column_major() {
        let s = Shape::column_major([2, 3]).unwrap();
        assert_eq!(s.to_linear(&[1, 2]), Ok(5));
        assert_eq!(s.to_linear(&[1, 0]), Ok(1));
        assert_eq!(s.to_linear(&[0, 1]), Ok(2));
        // Logical order is row-major whatever the layout.
        assert_eq!(s.to_coordinate(1), Ok(vec![0, 1]));
        assert_eq!(s.offset(1), Ok(2));
    }

    #[test]
    fn padding_isolation() {
        let s = Shape::with_strides([3, 5], [7, 1]).unwrap();
        assert_eq!(s.to_linear(&[1, 0]), Ok(7));
        assert_eq!(s.to_linear(&[0, 4]), Ok(4));
        assert_eq!(s.to_linear(&[2, 4]), Ok(18));
        let mut reached = Vec::new();
        for y in 0..3 {
            for x in 0..5 {
                reached.push(s.to_linear(&[y, x]).unwrap());
            }
        }
        for gap in [5, 6, 12, 13] {
            assert!(!reached.contains(&gap), "padding slot {} reached", gap);
        }
    }

    #[test]
    fn padding_breaks_round_trip() {
        let s = Shape::with_strides([3, 5], [7, 1]).unwrap();
        // Offset 7 is a valid storage offset, but as a logical index it names
        // another element.
        assert_eq!(s.to_coordinate(s.to_linear(&[1, 0]).unwrap()), Ok(vec![1, 2]));
        // Offset 18 is beyond the 15 logical elements.
        assert_eq!(
            s.to_coordinate(s.to_linear(&[2, 4]).unwrap()),
            Err(Error::IndexOutOfBounds {index: 18, len: 15}),
        );
        // `offset()` goes through logical indices and never lands on padding.
        assert_eq!(s.offset(5), Ok(7));
        assert_eq!(s.offset(14), Ok(18));
    }

    #[test]
    fn errors() {
        let s = Shape::new([2, 3]).unwrap();
        assert_eq!(s.to_coordinate(6), Err(Error::IndexOutOfBounds {index: 6, len: 6}));
        assert_eq!(s.to_coordinate(6).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
        assert_eq!(to_coordinate_by_steps(&s, 6), Err(Error::IndexOutOfBounds {index: 6, len: 6}));
        assert_eq!(s.offset(6).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
        assert_eq!(
            s.to_linear(&[1, 3]),
            Err(Error::CoordinateOutOfBounds {dim: 1, value: 3, extent: 3}),
        );
        assert_eq!(s.to_linear(&[1]), Err(Error::CoordinateRankMismatch {rank: 2, found: 1}));
        assert_eq!(s.to_linear(&[0, 0, 0]).unwrap_err().kind(), ErrorKind::CoordinateOutOfBounds);
    }

    #[test]
    fn through_references() {
        let s = Shape::new([4, 4]).unwrap();
        let r = &s;
        let b: Box<dyn Mapping> = Box::new(s.clone());
        assert_eq!(r.to_linear(&[2, 3]), Ok(11));
        assert_eq!(b.to_linear(&[2, 3]), Ok(11));
        assert_eq!(to_linear(&*b, &[3, 3]), Ok(15));
        let shared = std::rc::Rc::new(Shape::with_strides([2, 3], [4, 1]).unwrap());
        assert_eq!(shared.extents(), [2, 3]);
        assert_eq!(to_linear(&shared, &[1, 2]), Ok(6));
        let offsets: Vec<usize> = crate::enumerate(&shared).into_iter().map(|(_, i)| i).collect();
        assert_eq!(offsets, [0, 1, 2, 4, 5, 6]);
    }

    // ------------------------------------------------------------------------

    fn extents() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1usize..=6, 1..=5)
    }

    fn shape_and_index() -> impl Strategy<Value = (Shape, usize)> {
        extents().prop_flat_map(|extents| {
            let shape = Shape::new(extents).unwrap();
            let len = shape.total_elements();
            (Just(shape), 0..len)
        })
    }

    proptest! {
        #[test]
        fn index_round_trip((shape, index) in shape_and_index()) {
            let coordinate = shape.to_coordinate(index).unwrap();
            prop_assert_eq!(shape.to_linear(&coordinate), Ok(index));
            prop_assert_eq!(shape.to_coordinate(index), Ok(coordinate));
        }

        #[test]
        fn coordinate_round_trip((shape, index) in shape_and_index()) {
            let coordinate = to_coordinate_by_steps(&shape, index).unwrap();
            let linear = shape.to_linear(&coordinate).unwrap();
            prop_assert_eq!(shape.to_coordinate(linear), Ok(coordinate));
        }

        #[test]
        fn steps_agree_with_divisors((shape, index) in shape_and_index()) {
            prop_assert_eq!(to_coordinate_by_steps(&shape, index), to_coordinate(&shape, index));
        }

        #[test]
        fn offset_agrees((shape, index) in shape_and_index(), pad in 0usize..3) {
            let mut strides = shape.strides().to_vec();
            strides[0] += pad;
            let padded = Shape::with_strides(shape.extents(), strides).unwrap();
            let coordinate = padded.to_coordinate(index).unwrap();
            prop_assert_eq!(padded.offset(index), padded.to_linear(&coordinate));
        }
    }
}

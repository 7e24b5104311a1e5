//! Walking every coordinate of a [`Mapping`] in row-major order.
//!
//! The walk is an odometer: the last dimension advances fastest, and the
//! storage offset is updated incrementally from the strides. Padding slots are
//! therefore never visited.

use std::iter::{FusedIterator};

use super::{Mapping, Coordinate};

/// The return type of [`Mapping::offsets()`].
#[derive(Debug, Clone)]
pub struct Offsets<'a> {
    extents: &'a [usize],
    strides: &'a [usize],
    cursor: Box<[usize]>,
    offset: usize,
    remaining: usize,
}

impl<'a> Offsets<'a> {
    pub(crate) fn new(extents: &'a [usize], strides: &'a [usize]) -> Self {
        Self {
            extents,
            strides,
            cursor: vec![0; extents.len()].into_boxed_slice(),
            offset: 0,
            remaining: extents.iter().product(),
        }
    }

    /// The coordinate of the element whose offset `next()` will return.
    ///
    /// Meaningless once the iterator is exhausted.
    pub fn coordinate(&self) -> &[usize] { &self.cursor }

    fn advance(&mut self) {
        for dim in (0..self.extents.len()).rev() {
            if self.cursor[dim] + 1 < self.extents[dim] {
                self.cursor[dim] += 1;
                self.offset += self.strides[dim];
                return;
            }
            self.offset -= self.cursor[dim] * self.strides[dim];
            self.cursor[dim] = 0;
        }
    }
}

impl<'a> Iterator for Offsets<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 { return None; }
        let offset = self.offset;
        self.remaining -= 1;
        if self.remaining > 0 { self.advance(); }
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<'a> ExactSizeIterator for Offsets<'a> {}

impl<'a> FusedIterator for Offsets<'a> {}

// ----------------------------------------------------------------------------

/// The return type of [`Mapping::enumerate()`].
#[derive(Debug, Clone)]
pub struct Enumerate<'a>(Offsets<'a>);

impl<'a> Enumerate<'a> {
    pub(crate) fn new(offsets: Offsets<'a>) -> Self { Self(offsets) }
}

impl<'a> Iterator for Enumerate<'a> {
    type Item = (Coordinate, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.remaining == 0 { return None; }
        let coordinate = self.0.coordinate().to_vec();
        self.0.next().map(|offset| (coordinate, offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a> ExactSizeIterator for Enumerate<'a> {}

impl<'a> FusedIterator for Enumerate<'a> {}

// ----------------------------------------------------------------------------

/// Returns every `(coordinate, offset)` pair of `mapping`, in row-major
/// coordinate order. There are exactly `mapping.total_elements()` pairs, and
/// each offset is `mapping.to_linear(&coordinate)`.
///
/// ```
/// use ndindex::{Shape, enumerate};
/// let s = Shape::new([2]).unwrap();
/// assert_eq!(enumerate(&s), [(vec![0], 0), (vec![1], 1)]);
/// ```
pub fn enumerate<M: Mapping + ?Sized>(mapping: &M) -> Vec<(Coordinate, usize)> {
    mapping.enumerate().collect()
}

/// Equivalent to, but more efficient than,
/// ```text
/// for (c, i) in mapping.enumerate() { f(&c, i); }
/// ```
pub fn each<M: Mapping + ?Sized>(mapping: &M, mut f: impl FnMut(&[usize], usize)) {
    let mut offsets = mapping.offsets();
    while offsets.remaining > 0 {
        f(&offsets.cursor, offsets.offset);
        offsets.next();
    }
}

// ----------------------------------------------------------------------------

use std::ops::{Deref, DerefMut};

use super::{Error, Result, Mapping, Shape};

/// Presents storage laid out by a [`Mapping`] as a flat sequence of its
/// `total_elements()` logical elements, in row-major coordinate order.
///
/// Padding slots in the storage are skipped: logical index `i` is translated
/// to the storage offset of the `i`th coordinate. When the mapping is
/// contiguous row-major the translation is the identity, and the adapter
/// indexes the storage directly.
///
/// The storage `D` can be anything that dereferences to a slice, e.g.
/// `Vec<T>`, `Box<[T]>`, `&[T]` or `&mut [T]`.
///
/// ```
/// use ndindex::{LinearAdapter, Shape};
/// // 3 rows of 5 elements, each row followed by 2 padding slots.
/// let shape = Shape::with_strides([3, 5], [7, 1]).unwrap();
/// let mut storage = vec![0; 21];
/// let mut a = LinearAdapter::new(&mut storage[..], shape).unwrap();
/// a.fill(1);
/// assert_eq!(a.iter().sum::<i32>(), 15);
/// assert_eq!(storage[..7], [1, 1, 1, 1, 1, 0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearAdapter<D, M = Shape> {
    data: D,
    mapping: M,
    contiguous: bool,
}

impl<T, D: Deref<Target=[T]>, M: Mapping> LinearAdapter<D, M> {
    /// Wraps `data`, which must be at least `mapping.required_span()` long.
    pub fn new(data: D, mapping: M) -> Result<Self> {
        let span = mapping.required_span();
        if data.len() < span {
            return Err(Error::StorageTooSmall {span, len: data.len()});
        }
        let contiguous = mapping.is_row_major();
        if contiguous {
            log::debug!("contiguous adapter over {:?}", mapping.extents());
        } else {
            log::debug!(
                "strided adapter over {:?} with strides {:?}, span {}",
                mapping.extents(), mapping.strides(), span,
            );
        }
        Ok(Self {data, mapping, contiguous})
    }

    pub fn mapping(&self) -> &M { &self.mapping }

    /// The number of logical elements.
    pub fn len(&self) -> usize { self.mapping.total_elements() }

    /// Always `false` for a valid mapping, which has at least one element.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Returns the storage offset of logical index `index`.
    #[inline(always)]
    pub fn offset(&self, index: usize) -> Result<usize> {
        if self.contiguous {
            let len = self.len();
            if index >= len { return Err(Error::IndexOutOfBounds {index, len}); }
            Ok(index)
        } else {
            self.mapping.offset(index)
        }
    }

    /// Borrow the element at logical index `index`.
    pub fn at(&self, index: usize) -> Result<&T> {
        let offset = self.offset(index)?;
        Ok(&self.data[offset])
    }

    /// Borrow the element at `coordinate`.
    pub fn get(&self, coordinate: &[usize]) -> Result<&T> {
        let offset = self.mapping.to_linear(coordinate)?;
        Ok(&self.data[offset])
    }

    /// Iterate over the logical elements in order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item=&'a T> + 'a where T: 'a {
        self.mapping.offsets().map(move |offset| &self.data[offset])
    }

    /// Returns the storage and the mapping.
    pub fn into_inner(self) -> (D, M) { (self.data, self.mapping) }
}

impl<T, D: DerefMut<Target=[T]>, M: Mapping> LinearAdapter<D, M> {
    /// Mutably borrow the element at logical index `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let offset = self.offset(index)?;
        Ok(&mut self.data[offset])
    }

    /// Mutably borrow the element at `coordinate`.
    pub fn get_mut(&mut self, coordinate: &[usize]) -> Result<&mut T> {
        let offset = self.mapping.to_linear(coordinate)?;
        Ok(&mut self.data[offset])
    }

    /// Apply `f` to every logical element in turn. Padding is untouched.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        if self.contiguous {
            let len = self.len();
            self.data[..len].iter_mut().for_each(f);
        } else {
            for offset in self.mapping.offsets() { f(&mut self.data[offset]); }
        }
    }

    /// Set every logical element to `value`. Padding is untouched.
    pub fn fill(&mut self, value: T) where T: Clone {
        self.for_each_mut(|t| *t = value.clone());
    }
}

impl<T, D: Deref<Target=[T]>, M> AsRef<[T]> for LinearAdapter<D, M> {
    fn as_ref(&self) -> &[T] { &self.data }
}

impl<T, D: DerefMut<Target=[T]>, M> AsMut<[T]> for LinearAdapter<D, M> {
    fn as_mut(&mut self) -> &mut [T] { &mut self.data }
}

impl<T, D: Deref<Target=[T]>, M: Mapping> std::ops::Index<usize> for LinearAdapter<D, M> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T, D: DerefMut<Target=[T]>, M: Mapping> std::ops::IndexMut<usize> for LinearAdapter<D, M> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }
}

// ----------------------------------------------------------------------------

//! A pure-Rust library mapping between N-dimensional coordinates and linear
//! storage offsets.
//!
//! A [`Shape`] describes an index space: the extent of each dimension, and
//! the stride by which the storage offset advances when that dimension's
//! coordinate grows by one. Strides default to contiguous row-major order
//! (last dimension fastest), can be column-major, or can be given
//! explicitly, e.g. to describe rows followed by padding. A `Shape` is built
//! once, checked once, and then queried any number of times. [`FixedShape`]
//! is the same thing with a compile-time rank.
//!
//! Trait [`Mapping`] is the main way to query a descriptor:
//!
//! - [`Mapping::to_linear()`] maps a coordinate to its storage offset. This
//!   is a dot product with the strides, so it works for every layout.
//! - [`Mapping::to_coordinate()`] maps a logical index in
//!   `0..total_elements()` back to a coordinate, by mixed-radix decomposition
//!   over the extents in row-major order. For a padded layout, logical index
//!   and storage offset differ, and the two functions are not inverses.
//! - [`Mapping::enumerate()`] and [`Mapping::offsets()`] walk every
//!   coordinate in row-major order, skipping padding.
//!
//! ```
//! use ndindex::{Mapping, Shape};
//! let s = Shape::new([2, 3]).unwrap();
//! assert_eq!(s.to_linear(&[1, 2]), Ok(5));
//! assert_eq!(s.to_coordinate(5), Ok(vec![1, 2]));
//! ```
//!
//! [`LinearAdapter`] applies a `Mapping` to actual storage, presenting
//! padded or permuted data as a flat sequence of its logical elements.
//!
//! Every operation is a pure computation on immutable values. Failures are
//! reported as [`Error`]s, which carry the offending dimension, value and
//! bound.

mod error;
pub use error::{Error, ErrorKind, Result};

mod shape;
pub use shape::{Shape, Layout, row_major_strides, column_major_strides};

mod index;
pub use index::{Mapping, Coordinate, to_linear, to_coordinate, to_coordinate_by_steps};

pub mod walk;
pub use walk::{Offsets, Enumerate, enumerate, each};

mod fixed;
pub use fixed::{FixedShape};

mod adapter;
pub use adapter::{LinearAdapter};

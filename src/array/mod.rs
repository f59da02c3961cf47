//! A minimal set of array operations sufficient to implement finite-set limits and colimits.
//!
//! All tables in this crate are [`VecArray`]s: a newtype over [`Vec<T>`] which adds the
//! data-parallel primitives (`gather`, `argsort`, `cumulative_sum`, `bincount`) that the
//! join and quotient algorithms are written in terms of.
pub mod traits;
pub mod vec;

pub use traits::*;
pub use vec::*;

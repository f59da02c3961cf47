//! Finite functions, their preimage indexes, and functions into variable sets.
pub mod arrow;
pub mod index;
pub mod variable;

pub use arrow::*;
pub use index::*;
pub use variable::*;

//! Traits for the categorical structure of finite functions.
pub mod traits;

pub use traits::*;

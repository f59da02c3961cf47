use crate::array::*;
use crate::category::Arrow;
use crate::error::{Error, Result};
use crate::finite_function::FiniteFunction;
use crate::finite_set::FiniteSet;

use core::ops::{Add, Shr};
use num_traits::Zero;

/// A function whose *source* is finite, but whose *target* may be non-finite.
/// This is really just an array!
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemifiniteFunction<T>(pub VecArray<T>);

impl<T: Clone + PartialEq> SemifiniteFunction<T> {
    pub fn new(values: Vec<T>) -> Self {
        SemifiniteFunction(VecArray(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn apply(&self, x: usize) -> Result<&T> {
        self.0.as_slice().get(x).ok_or(Error::Domain {
            element: x,
            size: self.len(),
        })
    }

    /// Look up each value in the enumeration of `set`, giving a [`FiniteFunction`] into the
    /// skeleton of `set`.
    ///
    /// ```rust
    /// # use finset_limits::prelude::*;
    /// let names = Collection::new(vec!["a", "b", "c"]).unwrap();
    /// let f = SemifiniteFunction::new(vec!["c", "a", "c"]);
    /// let g = f.image_in(&names).unwrap();
    /// assert_eq!(g.table().as_slice(), &[2, 0, 2]);
    /// assert_eq!(g.target(), 3);
    /// ```
    pub fn image_in<S: FiniteSet<Element = T>>(&self, set: &S) -> Result<FiniteFunction> {
        let table = self
            .0
            .iter()
            .enumerate()
            .map(|(i, x)| set.position(x).ok_or(Error::NotAnElement { position: i }))
            .collect::<Result<Vec<_>>>()?;
        Ok(FiniteFunction::new_unchecked(VecArray(table), set.len()))
    }
}

impl<T> FromIterator<T> for SemifiniteFunction<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        SemifiniteFunction(VecArray(iter.into_iter().collect()))
    }
}

/// As a special case, we can precompose a [`FiniteFunction`] with a [`SemifiniteFunction`].
/// This is also overloaded with the `>>` syntax.
pub fn compose_semifinite<T: Clone + PartialEq>(
    lhs: &FiniteFunction,
    rhs: &SemifiniteFunction<T>,
) -> Result<SemifiniteFunction<T>> {
    if lhs.target() != rhs.len() {
        return Err(Error::TypeMismatch {
            leg: 0,
            expected: lhs.target(),
            found: rhs.len(),
        });
    }

    let table = rhs.0.gather(&lhs.checked()?.table());
    Ok(SemifiniteFunction(table))
}

impl<T: Clone + PartialEq> Add for SemifiniteFunction<T> {
    type Output = SemifiniteFunction<T>;

    fn add(self, rhs: Self) -> Self::Output {
        SemifiniteFunction(self.0.concatenate(&rhs.0))
    }
}

impl<T: Clone + PartialEq> Zero for SemifiniteFunction<T> {
    fn zero() -> Self {
        SemifiniteFunction(VecArray::empty())
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }
}

/// A [`FiniteFunction`] can be precomposed with a [`SemifiniteFunction`] to re-index it.
impl<T: Clone + PartialEq> Shr<&SemifiniteFunction<T>> for &FiniteFunction {
    type Output = Result<SemifiniteFunction<T>>;

    fn shr(self, other: &SemifiniteFunction<T>) -> Result<SemifiniteFunction<T>> {
        compose_semifinite(self, other)
    }
}

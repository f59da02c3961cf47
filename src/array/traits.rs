//! The array primitives the (co)limit algorithms are written in terms of.
use super::vec::VecArray;

/// A finite sequence of `T`s.
///
/// # Panics
///
/// Operations given an out-of-range index panic.
pub trait Array<T>: Clone + PartialEq<Self> {
    fn empty() -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `self` followed by `other`.
    fn concatenate(&self, other: &Self) -> Self;

    /// `n` copies of `x`.
    fn fill(x: T, n: usize) -> Self;

    /// `x.gather(idx)[i] = x[idx[i]]`, i.e. precomposition with the table `idx`.
    fn gather(&self, idx: &[usize]) -> Self;

    fn from_slice(slice: &[T]) -> Self;
}

/// Arrays whose elements are totally ordered.
pub trait OrdArray<T: Ord>: Array<T> {
    /// A *stable* sorting permutation: `self.gather(self.argsort())` is sorted, and equal elements
    /// keep their relative order.
    fn argsort(&self) -> VecArray<usize>;
}

/// Arrays of natural numbers: tables of finite functions, sizes and offsets.
pub trait NaturalArray: Array<usize> {
    /// `start, start + 1, …, stop - 1`
    fn arange(start: usize, stop: usize) -> Self;

    /// Offsets of consecutive segments with the given sizes: the result has one more entry than
    /// `self`, starting at `0` and ending at the total.
    fn cumulative_sum(&self) -> Self;

    /// Number of occurrences of each value in `0..size`.
    fn bincount(&self, size: usize) -> Self;

    /// Elementwise quotient and remainder by `d`.
    fn quot_rem(&self, d: usize) -> (Self, Self);
}

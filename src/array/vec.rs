//! The [`Vec`]-backed array used for every table in the crate.
use crate::array::*;
use core::ops::{Add, Deref, DerefMut};

/// A [`Vec<T>`] with the array primitives of [`Array`], [`OrdArray`] and [`NaturalArray`].
///
/// Derefs to the underlying [`Vec`], so slicing, indexing and iteration work as usual.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VecArray<T>(pub Vec<T>);

impl<T> Deref for VecArray<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.0
    }
}

impl<T> DerefMut for VecArray<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

impl<T> From<Vec<T>> for VecArray<T> {
    fn from(v: Vec<T>) -> Self {
        VecArray(v)
    }
}

impl<T> FromIterator<T> for VecArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        VecArray(Vec::from_iter(iter))
    }
}

impl<T> Extend<T> for VecArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<T: Clone + PartialEq> Array<T> for VecArray<T> {
    fn empty() -> Self {
        VecArray(Vec::new())
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn concatenate(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).cloned().collect()
    }

    fn fill(x: T, n: usize) -> Self {
        VecArray(vec![x; n])
    }

    fn gather(&self, idx: &[usize]) -> Self {
        idx.iter().map(|&i| self.0[i].clone()).collect()
    }

    fn from_slice(slice: &[T]) -> Self {
        VecArray(slice.to_vec())
    }
}

/// Shift every entry by a constant offset, as when injecting into the second summand of a
/// coproduct.
impl Add<&VecArray<usize>> for usize {
    type Output = VecArray<usize>;

    fn add(self, rhs: &VecArray<usize>) -> VecArray<usize> {
        rhs.iter().map(|&x| self + x).collect()
    }
}

impl<T: Ord + Clone> OrdArray<T> for VecArray<T> {
    /// ```rust
    /// # use finset_limits::array::*;
    /// // the positions holding 0, then those holding 1, then 2
    /// let table = VecArray(vec![2, 0, 1, 0]);
    /// assert_eq!(table.argsort(), VecArray(vec![1, 3, 2, 0]));
    /// ```
    fn argsort(&self) -> VecArray<usize> {
        let mut perm: Vec<usize> = (0..self.len()).collect();
        // stable, so ties keep their original order
        perm.sort_by(|&i, &j| self[i].cmp(&self[j]));
        VecArray(perm)
    }
}

impl NaturalArray for VecArray<usize> {
    fn arange(start: usize, stop: usize) -> Self {
        assert!(start <= stop, "arange: start {start} exceeds stop {stop}");
        (start..stop).collect()
    }

    /// ```rust
    /// # use finset_limits::array::*;
    /// // offsets of the summands of 2 + 0 + 3
    /// let sizes = VecArray(vec![2, 0, 3]);
    /// assert_eq!(sizes.cumulative_sum(), VecArray(vec![0, 2, 2, 5]));
    /// ```
    fn cumulative_sum(&self) -> Self {
        let partial_sums = self.iter().scan(0, |total, &x| {
            *total += x;
            Some(*total)
        });
        core::iter::once(0).chain(partial_sums).collect()
    }

    fn bincount(&self, size: usize) -> VecArray<usize> {
        let mut counts = VecArray(vec![0; size]);
        for &x in self.iter() {
            counts[x] += 1;
        }
        counts
    }

    /// ```rust
    /// # use finset_limits::array::*;
    /// // row and column of each element of a 2 × 3 product
    /// let (row, col) = VecArray::<usize>::arange(0, 6).quot_rem(3);
    /// assert_eq!(row, VecArray(vec![0, 0, 0, 1, 1, 1]));
    /// assert_eq!(col, VecArray(vec![0, 1, 2, 0, 1, 2]));
    /// ```
    fn quot_rem(&self, d: usize) -> (Self, Self) {
        assert!(d > 0, "quot_rem: division by zero");
        self.iter().map(|&x| (x / d, x % d)).unzip()
    }
}

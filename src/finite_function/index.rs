use crate::array::*;

/// The converse of a finite function `f : A → B`, stored as a segmented array.
///
/// `values[offsets[b]..offsets[b+1]]` is the preimage `f⁻¹(b)`, in increasing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preimages {
    offsets: VecArray<usize>,
    values: VecArray<usize>,
}

impl Preimages {
    /// Build the preimage index of a table of values in `0..target`.
    ///
    /// The segment sizes are the `bincount` of the table, and the segments are filled by a
    /// *stable* sort of the domain by image, so each preimage comes out sorted.
    ///
    /// # Panics
    ///
    /// When a value of `table` is `>= target`.
    pub fn new(table: &VecArray<usize>, target: usize) -> Self {
        let offsets = table.bincount(target).cumulative_sum();
        let values = table.argsort();
        Preimages { offsets, values }
    }

    /// Number of fibers (the size of the codomain).
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The preimage of `y`. Empty when `y` is outside the codomain.
    pub fn get(&self, y: usize) -> &[usize] {
        if y >= self.len() {
            return &[];
        }
        &self.values[self.offsets[y]..self.offsets[y + 1]]
    }

    /// The size of each fiber.
    pub fn counts(&self) -> VecArray<usize> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

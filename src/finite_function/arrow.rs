use super::index::Preimages;
use crate::array::*;
use crate::category::*;
use crate::error::{Error, Result};
use crate::finite_set::FiniteSet;
use crate::union_find::connected_components;

use core::fmt::Debug;
use core::ops::{Add, BitOr, Shr};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// The ways a finite function can be represented.
#[derive(Clone)]
enum Repr {
    /// The identity on `{0..n}`.
    Identity(usize),
    /// An explicit table of values.
    Table(VecArray<usize>),
    /// An opaque function, trusted to send `{0..source}` into `{0..target}`.
    Callable {
        source: usize,
        f: Arc<dyn Fn(usize) -> usize + Send + Sync>,
    },
}

/// A finite function `f : {0..A} → {0..B}`.
///
/// Finite functions are immutable values. A table-backed function may additionally carry its
/// [`Preimages`] index, which is built at most once (through a [`OnceLock`]) the first time a
/// preimage query needs it. The index is shared between clones made after it was built, and
/// concurrent first queries from several threads build it exactly once.
#[derive(Clone)]
pub struct FiniteFunction {
    repr: Repr,
    target: usize,
    index: OnceLock<Arc<Preimages>>,
}

impl FiniteFunction {
    fn from_repr(repr: Repr, target: usize) -> Self {
        Self {
            repr,
            target,
            index: OnceLock::new(),
        }
    }

    /// Construct a FiniteFunction from a table of indices
    ///
    /// # Errors
    ///
    /// [`Error::Codomain`] if a value of the table is not less than `target`.
    pub fn new(table: VecArray<usize>, target: usize) -> Result<Self> {
        if let Some((position, &value)) = table.iter().enumerate().find(|(_, &y)| y >= target) {
            return Err(Error::Codomain {
                position,
                value,
                size: target,
            });
        }
        Ok(Self::new_unchecked(table, target))
    }

    /// Construct a FiniteFunction from a table the caller guarantees is in range.
    pub fn new_unchecked(table: VecArray<usize>, target: usize) -> Self {
        Self::from_repr(Repr::Table(table), target)
    }

    /// Construct a FiniteFunction together with its preimage index.
    pub fn indexed(table: VecArray<usize>, target: usize) -> Result<Self> {
        let f = Self::new(table, target)?;
        f.preimages();
        Ok(f)
    }

    /// Wrap an opaque function `{0..source} → {0..target}`.
    ///
    /// The values of `f` are not checked up front. [`FiniteFunction::apply`] reports a value
    /// outside `target` when it is encountered, and every fallible operation that reads the whole
    /// table (composition, indexing, joins) checks it first.
    pub fn callable(
        source: usize,
        target: usize,
        f: impl Fn(usize) -> usize + Send + Sync + 'static,
    ) -> Self {
        Self::from_repr(
            Repr::Callable {
                source,
                f: Arc::new(f),
            },
            target,
        )
    }

    /// Build a function between two finite sets from a dictionary keyed by domain elements.
    ///
    /// # Errors
    ///
    /// - [`Error::Domain`] if an element of `domain` has no entry in `map`
    /// - [`Error::NotAnElement`] if a value of `map` is not an element of `codomain`
    pub fn from_map<A, B>(
        domain: &A,
        codomain: &B,
        map: &HashMap<A::Element, B::Element>,
    ) -> Result<Self>
    where
        A: FiniteSet,
        B: FiniteSet,
    {
        let mut table = Vec::with_capacity(domain.len());
        for (i, x) in domain.elements().iter().enumerate() {
            let y = map.get(x).ok_or(Error::Domain {
                element: i,
                size: domain.len(),
            })?;
            table.push(
                codomain
                    .position(y)
                    .ok_or(Error::NotAnElement { position: i })?,
            );
        }
        Ok(Self::new_unchecked(VecArray(table), codomain.len()))
    }

    /// Build a function from a list of codomain elements, one per domain element.
    pub fn from_values<B>(values: &[B::Element], codomain: &B) -> Result<Self>
    where
        B: FiniteSet,
    {
        let table = values
            .iter()
            .enumerate()
            .map(|(i, y)| codomain.position(y).ok_or(Error::NotAnElement { position: i }))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new_unchecked(VecArray(table), codomain.len()))
    }

    /// The length-`a` array of zeroes `!_a : a → 1`.
    pub fn terminal(a: usize) -> Self {
        Self::new_unchecked(VecArray::fill(0, a), 1)
    }

    /// Construct the constant finite function `f : a → x + 1 + b`,
    /// an array of length `a` mapping all elements to `x`.
    ///
    /// ```rust
    /// # use finset_limits::prelude::*;
    /// let (x, a, b) = (2, 3, 2);
    ///
    /// let actual = FiniteFunction::constant(a, x, b);
    /// let expected = FiniteFunction::new(VecArray(vec![2, 2, 2]), x + b + 1).unwrap();
    /// assert_eq!(actual, expected);
    /// ```
    pub fn constant(a: usize, x: usize, b: usize) -> Self {
        // We need the +1 to ensure entries in range.
        Self::new_unchecked(VecArray::fill(x, a), x + b + 1)
    }

    /// Evaluate `f(x)`.
    ///
    /// # Errors
    ///
    /// - [`Error::Domain`] if `x` is not in the domain
    /// - [`Error::Codomain`] if a callable function leaves its declared codomain
    pub fn apply(&self, x: usize) -> Result<usize> {
        let source = self.source();
        if x >= source {
            return Err(Error::Domain {
                element: x,
                size: source,
            });
        }
        match &self.repr {
            Repr::Identity(_) => Ok(x),
            Repr::Table(table) => Ok(table[x]),
            Repr::Callable { f, .. } => {
                let y = f(x);
                if y >= self.target {
                    return Err(Error::Codomain {
                        position: x,
                        value: y,
                        size: self.target,
                    });
                }
                Ok(y)
            }
        }
    }

    /// The values of `f` as a table. Only table-backed functions avoid a copy.
    ///
    /// The values of a callable are returned as computed; see [`FiniteFunction::checked`].
    pub fn table(&self) -> Cow<'_, VecArray<usize>> {
        match &self.repr {
            Repr::Table(table) => Cow::Borrowed(table),
            Repr::Identity(n) => Cow::Owned(VecArray::arange(0, *n)),
            Repr::Callable { source, f } => Cow::Owned((0..*source).map(|x| f(x)).collect()),
        }
    }

    /// Convert to an explicit table, checking a callable's values against the codomain.
    pub fn materialize(&self) -> Result<Self> {
        match &self.repr {
            Repr::Callable { .. } => Self::new(self.table().into_owned(), self.target),
            _ => Ok(self.clone()),
        }
    }

    /// `self`, with a callable replaced by its checked table.
    ///
    /// # Errors
    ///
    /// [`Error::Codomain`] if a callable leaves its declared codomain.
    pub fn checked(&self) -> Result<Cow<'_, Self>> {
        match &self.repr {
            Repr::Callable { .. } => self.materialize().map(Cow::Owned),
            _ => Ok(Cow::Borrowed(self)),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.repr, Repr::Identity(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.repr, Repr::Callable { .. })
    }

    /// Whether [`FiniteFunction::preimage`] runs in time proportional to its output rather than
    /// to the size of the domain.
    pub fn is_indexed(&self) -> bool {
        match &self.repr {
            Repr::Identity(_) => true,
            Repr::Table(_) => self.index.get().is_some(),
            Repr::Callable { .. } => false,
        }
    }

    /// An equivalent indexed function.
    /// Callables are materialized first, since an index needs the full table anyway.
    ///
    /// # Errors
    ///
    /// [`Error::Codomain`] if a callable leaves its declared codomain.
    pub fn ensure_indexed(&self) -> Result<Self> {
        if self.is_identity() {
            return Ok(self.clone());
        }
        let f = self.checked()?.into_owned();
        f.preimages();
        Ok(f)
    }

    /// The preimage index of this function, built on first use.
    ///
    /// # Panics
    ///
    /// When a callable leaves its codomain. [`FiniteFunction::ensure_indexed`] reports this as
    /// an error instead.
    pub fn preimages(&self) -> &Preimages {
        self.index.get_or_init(|| {
            tracing::trace!(
                source = self.source(),
                target = self.target,
                "building preimage index"
            );
            Arc::new(Preimages::new(&self.table(), self.target))
        })
    }

    /// The preimage `f⁻¹(y)`, in increasing order.
    ///
    /// An unindexed function falls back to a linear scan of its domain.
    pub fn preimage(&self, y: usize) -> Cow<'_, [usize]> {
        if y >= self.target {
            return Cow::Borrowed(&[]);
        }
        match (&self.repr, self.index.get()) {
            (Repr::Identity(_), _) => Cow::Owned(vec![y]),
            (_, Some(index)) => Cow::Borrowed(index.get(y)),
            _ => Cow::Owned(
                self.table()
                    .iter()
                    .enumerate()
                    .filter(|(_, &fx)| fx == y)
                    .map(|(x, _)| x)
                    .collect(),
            ),
        }
    }

    /// Directly construct `f ; ι₀` instead of computing by composition.
    pub fn inject0(&self, b: usize) -> FiniteFunction {
        let repr = match &self.repr {
            // the identity tag is only valid when source and target agree
            Repr::Identity(n) => Repr::Table(VecArray::arange(0, *n)),
            repr => repr.clone(),
        };
        Self::from_repr(repr, self.target + b)
    }

    /// Directly construct `f ; ι₁` instead of computing by composition.
    ///
    /// ```rust
    /// # use finset_limits::prelude::*;
    /// # let f = FiniteFunction::identity(5);
    /// # let a = 3;
    /// # let i1 = FiniteFunction::inj1(a, f.target());
    /// assert_eq!(f.inject1(a), (&f >> &i1).unwrap());
    /// ```
    pub fn inject1(&self, a: usize) -> Self {
        Self::new_unchecked(a + &*self.table(), a + self.target)
    }

    /// Tensor product `f ⊗ g : A + A' → B + B'`.
    pub fn tensor(&self, other: &Self) -> Self {
        let table = self
            .table()
            .concatenate(&(self.target + &*other.table()));
        Self::new_unchecked(table, self.target + other.target)
    }

    /// The coequalizer `q : B → Q` of a parallel pair `self, other : A → B`.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the two arrows are not parallel.
    pub fn coequalizer(&self, other: &Self) -> Result<Self> {
        if self.source() != other.source() {
            return Err(Error::TypeMismatch {
                leg: 1,
                expected: self.source(),
                found: other.source(),
            });
        }
        if self.target != other.target {
            return Err(Error::TypeMismatch {
                leg: 1,
                expected: self.target,
                found: other.target,
            });
        }

        let (table, target) = connected_components(&self.table(), &other.table(), self.target);
        Ok(Self::new_unchecked(table, target))
    }

    /// Tupling `⟨f₀, …, fₖ⟩ : A → B₀ × … × Bₖ` of functions sharing the source `a`.
    ///
    /// Product elements are numbered in row-major order: `(b₀, …, bₖ)` is
    /// `((b₀ · |B₁| + b₁) · |B₂| + b₂) …`, matching the legs built by
    /// [`crate::limits::product`].
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if some `fᵢ` does not have source `a`.
    pub fn pair(a: usize, fs: &[FiniteFunction]) -> Result<Self> {
        let mut table = VecArray::fill(0, a);
        let mut target = 1;
        for (leg, f) in fs.iter().enumerate() {
            if f.source() != a {
                return Err(Error::TypeMismatch {
                    leg,
                    expected: a,
                    found: f.source(),
                });
            }
            let n = f.target();
            for (acc, fx) in table.iter_mut().zip(f.table().iter()) {
                *acc = *acc * n + fx;
            }
            target *= n;
        }
        Ok(Self::new_unchecked(table, target))
    }
}

/// Compute the universal map `u : Q → C` for a quotient map `q : B → Q` and `h : B → C` such
/// that `q ; u = h`.
///
/// # Errors
///
/// - [`Error::TypeMismatch`] if `q` and `h` have different sources
/// - [`Error::IllDefinedQuotient`] if `h` takes two values on one fiber of `q`
/// - [`Error::NotSurjective`] if `q` misses an element of `Q`, so `u` is undetermined there
pub fn pass_to_quotient(q: &FiniteFunction, h: &FiniteFunction) -> Result<FiniteFunction> {
    if q.source() != h.source() {
        return Err(Error::TypeMismatch {
            leg: 1,
            expected: q.source(),
            found: h.source(),
        });
    }

    let mut table: Vec<Option<usize>> = vec![None; q.target()];
    for (&c, &v) in q.table().iter().zip(h.table().iter()) {
        match table[c] {
            None => table[c] = Some(v),
            Some(u) if u != v => {
                return Err(Error::IllDefinedQuotient {
                    element: c,
                    first: u,
                    second: v,
                })
            }
            Some(_) => {}
        }
    }

    let table = table
        .into_iter()
        .enumerate()
        .map(|(element, u)| u.ok_or(Error::NotSurjective { element }))
        .collect::<Result<VecArray<_>>>()?;
    Ok(FiniteFunction::new_unchecked(table, h.target()))
}

impl Arrow for FiniteFunction {
    type Object = usize;

    fn source(&self) -> usize {
        match &self.repr {
            Repr::Identity(n) => *n,
            Repr::Table(table) => table.len(),
            Repr::Callable { source, .. } => *source,
        }
    }

    fn target(&self) -> usize {
        self.target
    }

    fn identity(a: usize) -> Self {
        Self::from_repr(Repr::Identity(a), a)
    }

    fn compose(&self, other: &Self) -> Result<Self> {
        if self.target != other.source() {
            return Err(Error::TypeMismatch {
                leg: 1,
                expected: self.target,
                found: other.source(),
            });
        }
        let (lhs, rhs) = (self.checked()?, other.checked()?);
        if lhs.is_identity() {
            return Ok(rhs.into_owned());
        }
        if rhs.is_identity() {
            return Ok(lhs.into_owned());
        }
        let table = rhs.table().gather(&lhs.table());
        Ok(Self::new_unchecked(table, rhs.target))
    }
}

impl Coproduct for FiniteFunction {
    fn initial(a: usize) -> Self {
        Self::new_unchecked(VecArray::empty(), a)
    }

    fn coproduct(&self, other: &Self) -> Result<Self> {
        if self.target != other.target {
            return Err(Error::TypeMismatch {
                leg: 1,
                expected: self.target,
                found: other.target,
            });
        }
        Ok(Self::new_unchecked(
            self.table().concatenate(&other.table()),
            self.target,
        ))
    }

    /// Coproduct injection 0.
    ///
    /// As an array, the indices `0..a`
    fn inj0(a: usize, b: usize) -> Self {
        Self::new_unchecked(VecArray::arange(0, a), a + b)
    }

    /// Coproduct injection 1.
    ///
    /// As an array, the indices `a..(a+b)`
    ///
    /// ```rust
    /// # use finset_limits::prelude::*;
    /// assert_eq!(
    ///     FiniteFunction::inj1(3, 5).table().as_slice(),
    ///     &[3, 4, 5, 6, 7],
    /// )
    /// ```
    fn inj1(a: usize, b: usize) -> Self {
        Self::new_unchecked(VecArray::arange(a, a + b), a + b)
    }
}

// Two finite functions are equal when they have the same type and the same values, whatever their
// representation.
impl PartialEq for FiniteFunction {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
            && self.source() == other.source()
            && (self.is_identity() && other.is_identity() || self.table() == other.table())
    }
}

impl Eq for FiniteFunction {}

// Syntactic sugar for finite function composition
impl Shr<&FiniteFunction> for &FiniteFunction {
    type Output = Result<FiniteFunction>;

    fn shr(self, rhs: &FiniteFunction) -> Result<FiniteFunction> {
        self.compose(rhs)
    }
}

// Sugar for coproduct
impl Add<&FiniteFunction> for &FiniteFunction {
    type Output = Result<FiniteFunction>;

    fn add(self, rhs: &FiniteFunction) -> Result<FiniteFunction> {
        self.coproduct(rhs)
    }
}

// Sugar for tensor
impl BitOr<&FiniteFunction> for &FiniteFunction {
    type Output = FiniteFunction;

    fn bitor(self, rhs: &FiniteFunction) -> FiniteFunction {
        self.tensor(rhs)
    }
}

impl Debug for FiniteFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self.repr {
            Repr::Identity(_) => "identity",
            Repr::Table(_) => "table",
            Repr::Callable { .. } => "callable",
        };
        f.debug_struct("FiniteFunction")
            .field("repr", &repr)
            .field("table", &self.table())
            .field("target", &self.target)
            .field("indexed", &self.is_indexed())
            .finish()
    }
}

//! Limits of diagrams of finite sets.
//!
//! The general case is a multiway join: [`join`] computes the limit of a [`Multicospan`] with
//! one of several [`LimitAlgorithm`]s, and [`limit_bipartite`] reduces an arbitrary bipartite
//! diagram to a sequence of such joins. Products, equalizers and the terminal object are
//! computed directly.
pub mod join;
pub mod preprocess;
pub mod solver;

pub use join::join;
pub use preprocess::{equalize_all, pair_all};
pub use solver::limit_bipartite;

use crate::array::*;
use crate::category::*;
use crate::diagram::*;
use crate::error::{Error, Result};
use crate::finite_function::FiniteFunction;

use std::collections::HashMap;
use std::sync::OnceLock;

/// How to compute the multiway joins a limit reduces to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitAlgorithm {
    /// Choose by diagram shape; joins use [`LimitAlgorithm::Smart`].
    #[default]
    Default,
    NestedLoop,
    SortMerge,
    Hash,
    Smart,
}

/// A limit cone: an apex together with one leg per vertex of the diagram (see [`limit`] for
/// which vertices).
#[derive(Debug, Clone)]
pub struct Limit {
    apex: usize,
    legs: Vec<FiniteFunction>,
    // tuple of leg values ↦ apex element, built by the first call to `universal`
    index: OnceLock<HashMap<Vec<usize>, usize>>,
}

impl Limit {
    pub fn new(apex: usize, legs: Vec<FiniteFunction>) -> Self {
        Self {
            apex,
            legs,
            index: OnceLock::new(),
        }
    }

    pub fn apex(&self) -> usize {
        self.apex
    }

    pub fn legs(&self) -> &[FiniteFunction] {
        &self.legs
    }

    pub fn leg(&self, i: usize) -> &FiniteFunction {
        &self.legs[i]
    }

    /// The limit cone as a [`Multispan`].
    pub fn cone(&self) -> Multispan {
        Multispan::new(self.apex, self.legs.clone()).expect("by construction")
    }

    pub fn into_parts(self) -> (usize, Vec<FiniteFunction>) {
        (self.apex, self.legs)
    }

    fn tuples(&self) -> &HashMap<Vec<usize>, usize> {
        self.index.get_or_init(|| {
            tracing::trace!(apex = self.apex, legs = self.legs.len(), "building tuple index");
            let tables: Vec<_> = self.legs.iter().map(|f| f.table()).collect();
            (0..self.apex)
                .map(|e| (tables.iter().map(|t| t[e]).collect(), e))
                .collect()
        })
    }

    /// The unique map `u : cone.apex() → self.apex()` with `u ; self.leg(i) = cone.legs()[i]`.
    ///
    /// # Errors
    ///
    /// - [`Error::TypeMismatch`] if the cone has the wrong number of legs, or a leg has the wrong
    ///   target
    /// - [`Error::IncompatibleCone`] if the cone does not commute with the diagram
    pub fn universal(&self, cone: &Multispan) -> Result<FiniteFunction> {
        check_legs(self.legs.len(), cone.legs().len())?;
        for (leg, (f, g)) in self.legs.iter().zip(cone.legs()).enumerate() {
            if f.target() != g.target() {
                return Err(Error::TypeMismatch {
                    leg,
                    expected: f.target(),
                    found: g.target(),
                });
            }
        }

        let tuples = self.tuples();
        let tables: Vec<_> = cone.legs().iter().map(|g| g.table()).collect();
        let mut key = Vec::with_capacity(tables.len());
        let mut table = Vec::with_capacity(cone.apex());
        for element in 0..cone.apex() {
            key.clear();
            key.extend(tables.iter().map(|t| t[element]));
            let e = tuples
                .get(&key)
                .ok_or(Error::IncompatibleCone { element })?;
            table.push(*e);
        }
        Ok(FiniteFunction::new_unchecked(VecArray(table), self.apex))
    }
}

impl Universal for Limit {
    type Cone = Multispan;
    type Arrow = FiniteFunction;

    fn universal(&self, cone: &Multispan) -> Result<FiniteFunction> {
        Limit::universal(self, cone)
    }
}

pub(crate) fn check_legs(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(Error::TypeMismatch {
            leg: expected.min(found),
            expected,
            found,
        });
    }
    Ok(())
}

/// Compute the limit of a diagram.
///
/// The legs of the result depend on the shape:
///
/// - [`Diagram::Multicospan`]: one leg per foot (the apex leg is their common composite)
/// - [`Diagram::ParallelMorphisms`]: the inclusion into the shared domain
/// - [`Diagram::Discrete`]: one projection per object
/// - [`Diagram::Bipartite`]: one leg per layer 1 vertex
/// - [`Diagram::Free`], [`Diagram::Multispan`], [`Diagram::Singleton`]: one leg per vertex,
///   numbered as in [`Diagram::to_free`]
/// - [`Diagram::Empty`]: no legs, apex `1`
pub fn limit(diagram: &Diagram, algorithm: LimitAlgorithm) -> Result<Limit> {
    tracing::debug!(?algorithm, "computing limit");
    match diagram {
        Diagram::Empty => Ok(terminal()),
        Diagram::Singleton(n) => Ok(Limit::new(*n, vec![FiniteFunction::identity(*n)])),
        Diagram::Discrete(obs) => Ok(product(obs)),
        Diagram::ParallelMorphisms(p) => Ok(equalizer(p)),
        Diagram::Multicospan(c) => join(c, algorithm),
        Diagram::Multispan(s) => {
            let mut legs = vec![FiniteFunction::identity(s.apex())];
            legs.extend(s.legs().iter().cloned());
            Ok(Limit::new(s.apex(), legs))
        }
        Diagram::Bipartite(d) => limit_bipartite(d, algorithm),
        Diagram::Free(d) => limit_bipartite(&d.to_bipartite_for_limit(), algorithm),
    }
}

/// The terminal set `1`, the limit of the empty diagram.
pub fn terminal() -> Limit {
    Limit::new(1, vec![])
}

/// The product `X₀ × … × Xₖ` with its projections.
///
/// Elements are numbered in row-major order, so the projection `πᵢ` sends `e` to
/// `(e / sᵢ) % |Xᵢ|` where `sᵢ` is the product of the sizes after `Xᵢ`.
///
/// ```rust
/// # use finset_limits::prelude::*;
/// let p = limits::product(&[2, 3]);
/// assert_eq!(p.apex(), 6);
/// assert_eq!(p.leg(0).table().as_slice(), &[0, 0, 0, 1, 1, 1]);
/// assert_eq!(p.leg(1).table().as_slice(), &[0, 1, 2, 0, 1, 2]);
/// ```
pub fn product(obs: &[usize]) -> Limit {
    let apex: usize = obs.iter().product();
    if apex == 0 {
        let legs = obs.iter().map(|&n| FiniteFunction::initial(n)).collect();
        return Limit::new(0, legs);
    }

    let elements = VecArray::<usize>::arange(0, apex);
    let mut stride = apex;
    let legs = obs
        .iter()
        .map(|&n| {
            stride /= n;
            let (q, _) = elements.quot_rem(stride);
            let (_, r) = q.quot_rem(n);
            FiniteFunction::new_unchecked(r, n)
        })
        .collect();
    Limit::new(apex, legs)
}

/// The equalizer of a family of parallel arrows: the inclusion of the subset of the domain on
/// which they all agree. With fewer than two arrows this is the identity.
pub fn equalizer(p: &ParallelMorphisms) -> Limit {
    let inclusion = equalizer_inclusion(p.dom(), p.homs());
    Limit::new(inclusion.source(), vec![inclusion])
}

/// Inclusion of the elements of `0..dom` on which every arrow of `fs` takes the same value.
pub(crate) fn equalizer_inclusion(dom: usize, fs: &[FiniteFunction]) -> FiniteFunction {
    if fs.len() < 2 {
        return FiniteFunction::identity(dom);
    }

    let tables: Vec<_> = fs.iter().map(|f| f.table()).collect();
    let (first, rest) = tables.split_first().expect("by construction");
    let table: VecArray<usize> = (0..dom)
        .filter(|&x| rest.iter().all(|t| t[x] == first[x]))
        .collect();
    FiniteFunction::new_unchecked(table, dom)
}

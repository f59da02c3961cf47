//! Colimits of diagrams of finite sets.
//!
//! A colimit is a disjoint union followed by a quotient. The quotient is computed with a
//! [`UnionFind`] over the disjoint union of the layer 2 objects of a [`BipartiteDiagram`]: each
//! layer 1 element identifies all of its images.
pub mod named;
pub mod vars;

pub use named::colimit_named;
pub use vars::{colimit_vars, VarColimit, VarDiagram};

use crate::array::*;
use crate::category::*;
use crate::diagram::*;
use crate::error::{Error, Result};
use crate::finite_function::{pass_to_quotient, FiniteFunction};
use crate::limits::check_legs;
use crate::union_find::UnionFind;

/// How to compute a colimit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColimitAlgorithm {
    #[default]
    UnionFind,
    /// Union-find, then name each apex element after one of its members. `names[i][x]` is the
    /// name of element `x` of the object of the `i`-th colimit leg.
    Named(Vec<Vec<String>>),
}

/// A colimit cocone: an apex together with one leg per vertex of the diagram (see [`colimit`]
/// for which vertices).
#[derive(Debug, Clone, PartialEq)]
pub struct Colimit {
    apex: usize,
    legs: Vec<FiniteFunction>,
    names: Option<Vec<String>>,
}

impl Colimit {
    pub fn new(apex: usize, legs: Vec<FiniteFunction>) -> Self {
        Self {
            apex,
            legs,
            names: None,
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

    /// Names of the apex elements, if computed with [`ColimitAlgorithm::Named`].
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    pub(crate) fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    /// The colimit cocone as a [`Multicospan`], or `None` when there are no legs.
    pub fn cocone(&self) -> Option<Multicospan> {
        Multicospan::new(self.apex, self.legs.clone()).ok()
    }

    /// The unique map `u : self.apex() → cocone.apex()` with `self.leg(i) ; u = cocone.legs()[i]`.
    ///
    /// # Errors
    ///
    /// - [`Error::TypeMismatch`] if the cocone has the wrong number of legs, or a leg has the
    ///   wrong source
    /// - [`Error::IllDefinedQuotient`] if the cocone does not commute with the diagram
    pub fn universal(&self, cocone: &Multicospan) -> Result<FiniteFunction> {
        check_legs(self.legs.len(), cocone.legs().len())?;
        for (leg, (f, g)) in self.legs.iter().zip(cocone.legs()).enumerate() {
            if f.source() != g.source() {
                return Err(Error::TypeMismatch {
                    leg,
                    expected: f.source(),
                    found: g.source(),
                });
            }
        }

        // [l₀, …, lₖ] : ΣXᵢ → apex is surjective, so [c₀, …, cₖ] factors through it
        let copair = |fs: &[FiniteFunction]| -> Result<FiniteFunction> {
            fs.iter().skip(1).try_fold(fs[0].clone(), |acc, f| &acc + f)
        };
        pass_to_quotient(&copair(&self.legs)?, &copair(cocone.legs())?)
    }
}

impl Universal for Colimit {
    type Cone = Multicospan;
    type Arrow = FiniteFunction;

    fn universal(&self, cocone: &Multicospan) -> Result<FiniteFunction> {
        Colimit::universal(self, cocone)
    }
}

/// Compute the colimit of a diagram.
///
/// The legs of the result depend on the shape:
///
/// - [`Diagram::Multispan`]: one leg per foot
/// - [`Diagram::ParallelMorphisms`]: the quotient map out of the shared codomain
/// - [`Diagram::Discrete`]: the coproduct injections
/// - [`Diagram::Bipartite`]: one leg per layer 2 vertex
/// - [`Diagram::Free`], [`Diagram::Multicospan`], [`Diagram::Singleton`]: one leg per vertex,
///   numbered as in [`Diagram::to_free`]
/// - [`Diagram::Empty`]: no legs, apex `0`
pub fn colimit(diagram: &Diagram, algorithm: ColimitAlgorithm) -> Result<Colimit> {
    match algorithm {
        ColimitAlgorithm::UnionFind => colimit_union_find(diagram),
        ColimitAlgorithm::Named(names) => colimit_named(diagram, &names),
    }
}

fn colimit_union_find(diagram: &Diagram) -> Result<Colimit> {
    tracing::debug!("computing colimit");
    match diagram {
        Diagram::Empty => Ok(initial()),
        Diagram::Singleton(n) => Ok(Colimit::new(*n, vec![FiniteFunction::identity(*n)])),
        Diagram::Discrete(obs) => Ok(coproduct(obs)),
        Diagram::ParallelMorphisms(p) => {
            let q = coequalizer(p);
            Ok(Colimit::new(q.target(), vec![q]))
        }
        Diagram::Multicospan(c) => {
            let mut legs = vec![FiniteFunction::identity(c.apex())];
            legs.extend(c.legs().iter().cloned());
            Ok(Colimit::new(c.apex(), legs))
        }
        Diagram::Multispan(s) => {
            let mut d = BipartiteDiagram::new();
            let u = d.add_vertex1(s.apex());
            for f in s.legs() {
                let v = d.add_vertex2(f.target());
                d.add_edge(u, v, f.clone())?;
            }
            colimit_bipartite(&d)
        }
        Diagram::Bipartite(d) => colimit_bipartite(d),
        Diagram::Free(d) => colimit_bipartite(&d.to_bipartite_for_colimit()),
    }
}

/// The initial set `0`, the colimit of the empty diagram.
pub fn initial() -> Colimit {
    Colimit::new(0, vec![])
}

/// The coproduct `X₀ + … + Xₖ` with its injections.
///
/// ```rust
/// # use finset_limits::prelude::*;
/// let c = colimits::coproduct(&[2, 3]);
/// assert_eq!(c.apex(), 5);
/// assert_eq!(c.leg(1).table().as_slice(), &[2, 3, 4]);
/// ```
pub fn coproduct(obs: &[usize]) -> Colimit {
    let offsets = VecArray(obs.to_vec()).cumulative_sum();
    let apex = offsets[obs.len()];
    let legs = offsets
        .windows(2)
        .map(|w| FiniteFunction::new_unchecked(VecArray::arange(w[0], w[1]), apex))
        .collect();
    Colimit::new(apex, legs)
}

/// The quotient map `q : Y → Q` coequalizing a family of parallel arrows `fᵢ : X → Y`.
/// Equivalence classes are numbered in order of their least element.
pub fn coequalizer(p: &ParallelMorphisms) -> FiniteFunction {
    let mut uf = UnionFind::new(p.cod());
    if let Some((first, rest)) = p.homs().split_first() {
        let first = first.table();
        for f in rest {
            for (&a, &b) in first.iter().zip(f.table().iter()) {
                uf.union(a, b);
            }
        }
    }
    let components = uf.components();
    FiniteFunction::new_unchecked(uf.labels(), components)
}

/// The colimit of a bipartite diagram, with one leg per layer 2 vertex.
///
/// # Errors
///
/// [`Error::MalformedDiagram`] if a layer 1 vertex has no outgoing edges.
pub fn colimit_bipartite(d: &BipartiteDiagram) -> Result<Colimit> {
    if let Some(vertex) = (0..d.nv1()).find(|&u| d.incident_out(u).is_empty()) {
        return Err(Error::MalformedDiagram {
            vertex,
            reason: "layer 1 vertex has no outgoing edges".to_string(),
        });
    }

    let offsets = VecArray(d.obs2().to_vec()).cumulative_sum();
    let mut uf = UnionFind::new(offsets[d.nv2()]);
    for u in 0..d.nv1() {
        let es = d.incident_out(u);
        let (first, rest) = es.split_first().expect("by construction");
        let base = |e: usize| offsets[d.edge(e).tgt];
        let anchor = d.edge(*first).hom.table();
        for &e in rest {
            let table = d.edge(e).hom.table();
            for (&a, &b) in anchor.iter().zip(table.iter()) {
                uf.union(base(*first) + a, base(e) + b);
            }
        }
    }

    let apex = uf.components();
    let labels = uf.labels();
    tracing::debug!(elements = labels.len(), classes = apex, "union-find colimit");
    let legs = offsets
        .windows(2)
        .map(|w| FiniteFunction::new_unchecked(VecArray::from_slice(&labels[w[0]..w[1]]), apex))
        .collect();
    Ok(Colimit::new(apex, legs))
}

//! Diagrams of finite sets: the shapes that limits and colimits are computed over.
//!
//! Objects are skeleton sizes (`usize`) and morphisms are [`FiniteFunction`]s. A
//! [`BipartiteDiagram`] is the normal form the join and union-find algorithms work on; the other
//! shapes are either special-cased or converted into one.
use crate::category::*;
use crate::error::{Error, Result};
use crate::finite_function::FiniteFunction;

/// A family of arrows `fᵢ : Xᵢ → Y` into a shared apex `Y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Multicospan {
    apex: usize,
    legs: Vec<FiniteFunction>,
}

impl Multicospan {
    /// # Errors
    ///
    /// - [`Error::TypeMismatch`] if a leg's target is not `apex`
    /// - [`Error::MalformedDiagram`] if there are no legs
    pub fn new(apex: usize, legs: Vec<FiniteFunction>) -> Result<Self> {
        if legs.is_empty() {
            return Err(Error::MalformedDiagram {
                vertex: 0,
                reason: "a multicospan needs at least one leg".to_string(),
            });
        }
        if let Some((leg, f)) = legs.iter().enumerate().find(|(_, f)| f.target() != apex) {
            return Err(Error::TypeMismatch {
                leg,
                expected: apex,
                found: f.target(),
            });
        }
        Ok(Self { apex, legs })
    }

    pub fn apex(&self) -> usize {
        self.apex
    }

    pub fn legs(&self) -> &[FiniteFunction] {
        &self.legs
    }

    pub fn feet(&self) -> Vec<usize> {
        self.legs.iter().map(|f| f.source()).collect()
    }
}

/// A family of arrows `fᵢ : X → Yᵢ` out of a shared apex `X`.
///
/// This is also the shape of a *cone*: an apex with one leg per vertex of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Multispan {
    apex: usize,
    legs: Vec<FiniteFunction>,
}

impl Multispan {
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if a leg's source is not `apex`.
    pub fn new(apex: usize, legs: Vec<FiniteFunction>) -> Result<Self> {
        if let Some((leg, f)) = legs.iter().enumerate().find(|(_, f)| f.source() != apex) {
            return Err(Error::TypeMismatch {
                leg,
                expected: apex,
                found: f.source(),
            });
        }
        Ok(Self { apex, legs })
    }

    pub fn apex(&self) -> usize {
        self.apex
    }

    pub fn legs(&self) -> &[FiniteFunction] {
        &self.legs
    }

    pub fn feet(&self) -> Vec<usize> {
        self.legs.iter().map(|f| f.target()).collect()
    }
}

/// A nonempty family of parallel arrows `f₀, …, fₖ : X → Y`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelMorphisms {
    dom: usize,
    cod: usize,
    homs: Vec<FiniteFunction>,
}

impl ParallelMorphisms {
    /// # Errors
    ///
    /// - [`Error::MalformedDiagram`] if there are no arrows
    /// - [`Error::TypeMismatch`] if an arrow is not `dom → cod`
    pub fn new(dom: usize, cod: usize, homs: Vec<FiniteFunction>) -> Result<Self> {
        if homs.is_empty() {
            return Err(Error::MalformedDiagram {
                vertex: 0,
                reason: "no parallel arrows".to_string(),
            });
        }
        for (leg, f) in homs.iter().enumerate() {
            if f.source() != dom {
                return Err(Error::TypeMismatch {
                    leg,
                    expected: dom,
                    found: f.source(),
                });
            }
            if f.target() != cod {
                return Err(Error::TypeMismatch {
                    leg,
                    expected: cod,
                    found: f.target(),
                });
            }
        }
        Ok(Self { dom, cod, homs })
    }

    /// The parallel pair `f, g : X → Y`.
    pub fn pair(f: FiniteFunction, g: FiniteFunction) -> Result<Self> {
        Self::new(f.source(), f.target(), vec![f, g])
    }

    pub fn dom(&self) -> usize {
        self.dom
    }

    pub fn cod(&self) -> usize {
        self.cod
    }

    pub fn homs(&self) -> &[FiniteFunction] {
        &self.homs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub src: usize,
    pub tgt: usize,
    pub hom: FiniteFunction,
}

/// A diagram with two layers of vertices, and edges only from layer 1 to layer 2.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BipartiteDiagram {
    ob1: Vec<usize>,
    ob2: Vec<usize>,
    edges: Vec<Edge>,
}

impl BipartiteDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex to layer 1 with object `ob`, returning its id.
    pub fn add_vertex1(&mut self, ob: usize) -> usize {
        self.ob1.push(ob);
        self.ob1.len() - 1
    }

    /// Add a vertex to layer 2 with object `ob`, returning its id.
    pub fn add_vertex2(&mut self, ob: usize) -> usize {
        self.ob2.push(ob);
        self.ob2.len() - 1
    }

    /// Add an edge `src → tgt` labelled `hom`, returning its id.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedDiagram`] if either vertex does not exist
    /// - [`Error::TypeMismatch`] if `hom` is not an arrow `ob1(src) → ob2(tgt)`; `leg` is the
    ///   id the edge would have had
    pub fn add_edge(&mut self, src: usize, tgt: usize, hom: FiniteFunction) -> Result<usize> {
        let leg = self.edges.len();
        let expected_source = *self.ob1.get(src).ok_or(Error::MalformedDiagram {
            vertex: src,
            reason: "no such vertex in layer 1".to_string(),
        })?;
        let expected_target = *self.ob2.get(tgt).ok_or(Error::MalformedDiagram {
            vertex: tgt,
            reason: "no such vertex in layer 2".to_string(),
        })?;
        if hom.source() != expected_source {
            return Err(Error::TypeMismatch {
                leg,
                expected: expected_source,
                found: hom.source(),
            });
        }
        if hom.target() != expected_target {
            return Err(Error::TypeMismatch {
                leg,
                expected: expected_target,
                found: hom.target(),
            });
        }
        self.edges.push(Edge { src, tgt, hom });
        Ok(leg)
    }

    pub fn nv1(&self) -> usize {
        self.ob1.len()
    }

    pub fn nv2(&self) -> usize {
        self.ob2.len()
    }

    pub fn ob1(&self, u: usize) -> usize {
        self.ob1[u]
    }

    pub fn ob2(&self, v: usize) -> usize {
        self.ob2[v]
    }

    pub fn obs1(&self) -> &[usize] {
        &self.ob1
    }

    pub fn obs2(&self) -> &[usize] {
        &self.ob2
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, e: usize) -> &Edge {
        &self.edges[e]
    }

    /// Edges out of the layer 1 vertex `u`, in order of insertion.
    pub fn incident_out(&self, u: usize) -> Vec<usize> {
        (0..self.edges.len())
            .filter(|&e| self.edges[e].src == u)
            .collect()
    }

    /// Edges into the layer 2 vertex `v`, in order of insertion.
    pub fn incident_in(&self, v: usize) -> Vec<usize> {
        (0..self.edges.len())
            .filter(|&e| self.edges[e].tgt == v)
            .collect()
    }

    /// The sorted multiset of layer 1 vertices with an edge into `v`.
    pub fn in_neighbors(&self, v: usize) -> Vec<usize> {
        let mut us: Vec<usize> = self
            .incident_in(v)
            .into_iter()
            .map(|e| self.edges[e].src)
            .collect();
        us.sort_unstable();
        us
    }
}

/// A diagram of finite sets on an arbitrary graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreeDiagram {
    obs: Vec<usize>,
    edges: Vec<Edge>,
}

impl FreeDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, ob: usize) -> usize {
        self.obs.push(ob);
        self.obs.len() - 1
    }

    /// Add an edge `src → tgt` labelled `hom`, returning its id.
    ///
    /// # Errors
    ///
    /// As for [`BipartiteDiagram::add_edge`].
    pub fn add_edge(&mut self, src: usize, tgt: usize, hom: FiniteFunction) -> Result<usize> {
        let leg = self.edges.len();
        for (vertex, found) in [(src, hom.source()), (tgt, hom.target())] {
            let expected = *self.obs.get(vertex).ok_or(Error::MalformedDiagram {
                vertex,
                reason: "no such vertex".to_string(),
            })?;
            if expected != found {
                return Err(Error::TypeMismatch {
                    leg,
                    expected,
                    found,
                });
            }
        }
        self.edges.push(Edge { src, tgt, hom });
        Ok(leg)
    }

    pub fn nv(&self) -> usize {
        self.obs.len()
    }

    pub fn obs(&self) -> &[usize] {
        &self.obs
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The bipartite diagram with the same limit.
    ///
    /// Every vertex `v` becomes the layer 1 vertex `v`. Every vertex `t` with incoming edges is
    /// copied into layer 2, with an identity edge from its layer 1 copy; each edge `s → t`
    /// becomes an edge from layer 1 `s` to the layer 2 copy of `t`.
    pub fn to_bipartite_for_limit(&self) -> BipartiteDiagram {
        let mut d = BipartiteDiagram::new();
        for &ob in &self.obs {
            d.add_vertex1(ob);
        }
        let mut copy = vec![None; self.nv()];
        for e in &self.edges {
            if copy[e.tgt].is_none() {
                let v = d.add_vertex2(self.obs[e.tgt]);
                d.edges.push(Edge {
                    src: e.tgt,
                    tgt: v,
                    hom: FiniteFunction::identity(self.obs[e.tgt]),
                });
                copy[e.tgt] = Some(v);
            }
        }
        for e in &self.edges {
            let v = copy[e.tgt].expect("by construction");
            d.edges.push(Edge {
                src: e.src,
                tgt: v,
                hom: e.hom.clone(),
            });
        }
        d
    }

    /// The bipartite diagram with the same colimit.
    ///
    /// Every vertex `v` becomes the layer 2 vertex `v`. Every vertex `s` with outgoing edges is
    /// copied into layer 1, with an identity edge to its layer 2 copy; each edge `s → t`
    /// becomes an edge from the layer 1 copy of `s` to layer 2 `t`.
    pub fn to_bipartite_for_colimit(&self) -> BipartiteDiagram {
        let mut d = BipartiteDiagram::new();
        for &ob in &self.obs {
            d.add_vertex2(ob);
        }
        let mut copy = vec![None; self.nv()];
        for e in &self.edges {
            if copy[e.src].is_none() {
                let u = d.add_vertex1(self.obs[e.src]);
                d.edges.push(Edge {
                    src: u,
                    tgt: e.src,
                    hom: FiniteFunction::identity(self.obs[e.src]),
                });
                copy[e.src] = Some(u);
            }
        }
        for e in &self.edges {
            let u = copy[e.src].expect("by construction");
            d.edges.push(Edge {
                src: u,
                tgt: e.tgt,
                hom: e.hom.clone(),
            });
        }
        d
    }
}

/// The shapes of diagram that [`crate::limits::limit`] and [`crate::colimits::colimit`] accept.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagram {
    Empty,
    Singleton(usize),
    Discrete(Vec<usize>),
    ParallelMorphisms(ParallelMorphisms),
    Multicospan(Multicospan),
    Multispan(Multispan),
    Bipartite(BipartiteDiagram),
    Free(FreeDiagram),
}

impl Diagram {
    /// The discrete diagram on two objects.
    pub fn pair(a: usize, b: usize) -> Self {
        Diagram::Discrete(vec![a, b])
    }

    pub fn parallel_pair(f: FiniteFunction, g: FiniteFunction) -> Result<Self> {
        ParallelMorphisms::pair(f, g).map(Diagram::ParallelMorphisms)
    }

    pub fn cospan(f: FiniteFunction, g: FiniteFunction) -> Result<Self> {
        Multicospan::new(f.target(), vec![f, g]).map(Diagram::Multicospan)
    }

    pub fn span(f: FiniteFunction, g: FiniteFunction) -> Result<Self> {
        Multispan::new(f.source(), vec![f, g]).map(Diagram::Multispan)
    }

    /// The same diagram on an explicit graph.
    ///
    /// Vertices are numbered as follows: a parallel family has its domain at `0` and codomain at
    /// `1`; a multispan or multicospan has its apex at `0` and its feet at `1..`.
    pub fn to_free(&self) -> FreeDiagram {
        fn push_edge(d: &mut FreeDiagram, src: usize, tgt: usize, hom: &FiniteFunction) {
            d.edges.push(Edge {
                src,
                tgt,
                hom: hom.clone(),
            })
        }

        let mut d = FreeDiagram::new();
        match self {
            Diagram::Empty => {}
            Diagram::Singleton(n) => {
                d.add_vertex(*n);
            }
            Diagram::Discrete(obs) => {
                for &ob in obs {
                    d.add_vertex(ob);
                }
            }
            Diagram::ParallelMorphisms(p) => {
                d.add_vertex(p.dom());
                d.add_vertex(p.cod());
                for f in p.homs() {
                    push_edge(&mut d, 0, 1, f);
                }
            }
            Diagram::Multicospan(c) => {
                d.add_vertex(c.apex());
                for (i, f) in c.legs().iter().enumerate() {
                    d.add_vertex(f.source());
                    push_edge(&mut d, i + 1, 0, f);
                }
            }
            Diagram::Multispan(s) => {
                d.add_vertex(s.apex());
                for (i, f) in s.legs().iter().enumerate() {
                    d.add_vertex(f.target());
                    push_edge(&mut d, 0, i + 1, f);
                }
            }
            Diagram::Bipartite(b) => {
                for &ob in b.obs1().iter().chain(b.obs2()) {
                    d.add_vertex(ob);
                }
                for e in b.edges() {
                    push_edge(&mut d, e.src, b.nv1() + e.tgt, &e.hom);
                }
            }
            Diagram::Free(f) => return f.clone(),
        }
        d
    }
}

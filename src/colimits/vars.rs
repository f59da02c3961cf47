//! Colimits of diagrams of variable sets, where elements may be bound to concrete values.
//!
//! The objects of a [`VarDiagram`] are numbers of variables and its arrows are
//! [`VariableFunction`]s, which send each element to a variable or to a concrete value. The
//! colimit identifies variables as usual, and binds an equivalence class to a value whenever one
//! of its members is identified with it. Two different values in one class are an error.
use crate::array::*;
use crate::error::{Error, Result};
use crate::finite_function::VariableFunction;
use crate::finite_set::{AttrVal, AttrVar};
use crate::union_find::UnionFind;

use core::fmt::Debug;

#[derive(Debug, Clone, PartialEq)]
pub struct VarEdge<T> {
    pub src: usize,
    pub tgt: usize,
    pub hom: VariableFunction<T>,
}

/// A bipartite diagram whose layer 2 objects are sets of variables.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDiagram<T> {
    ob1: Vec<usize>,
    ob2: Vec<usize>,
    edges: Vec<VarEdge<T>>,
}

impl<T> Default for VarDiagram<T> {
    fn default() -> Self {
        Self {
            ob1: vec![],
            ob2: vec![],
            edges: vec![],
        }
    }
}

impl<T: Clone + PartialEq + Debug> VarDiagram<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex1(&mut self, ob: usize) -> usize {
        self.ob1.push(ob);
        self.ob1.len() - 1
    }

    /// Add a layer 2 vertex with `vars` variables.
    pub fn add_vertex2(&mut self, vars: usize) -> usize {
        self.ob2.push(vars);
        self.ob2.len() - 1
    }

    /// # Errors
    ///
    /// - [`Error::MalformedDiagram`] if either vertex does not exist
    /// - [`Error::TypeMismatch`] if `hom` does not go from `ob1(src)` to the variables of `tgt`
    pub fn add_edge(&mut self, src: usize, tgt: usize, hom: VariableFunction<T>) -> Result<usize> {
        let leg = self.edges.len();
        let source = *self.ob1.get(src).ok_or(Error::MalformedDiagram {
            vertex: src,
            reason: "no such vertex in layer 1".to_string(),
        })?;
        let vars = *self.ob2.get(tgt).ok_or(Error::MalformedDiagram {
            vertex: tgt,
            reason: "no such vertex in layer 2".to_string(),
        })?;
        for (expected, found) in [(source, hom.source()), (vars, hom.vars())] {
            if expected != found {
                return Err(Error::TypeMismatch {
                    leg,
                    expected,
                    found,
                });
            }
        }
        self.edges.push(VarEdge { src, tgt, hom });
        Ok(leg)
    }

    pub fn nv1(&self) -> usize {
        self.ob1.len()
    }

    pub fn nv2(&self) -> usize {
        self.ob2.len()
    }

    pub fn edges(&self) -> &[VarEdge<T>] {
        &self.edges
    }
}

/// The colimit of a [`VarDiagram`]: a set of `apex` fresh variables, and one leg per layer 2
/// vertex sending each variable to its bound value or to its class's fresh variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VarColimit<T> {
    apex: usize,
    legs: Vec<VariableFunction<T>>,
}

impl<T> VarColimit<T> {
    /// The number of unbound equivalence classes.
    pub fn apex(&self) -> usize {
        self.apex
    }

    pub fn legs(&self) -> &[VariableFunction<T>] {
        &self.legs
    }

    pub fn leg(&self, i: usize) -> &VariableFunction<T> {
        &self.legs[i]
    }
}

/// Union-find over variables, with a value bound to each class root.
struct Bindings<T> {
    uf: UnionFind,
    bound: Vec<Option<T>>,
}

impl<T: Clone + PartialEq + Debug> Bindings<T> {
    fn new(n: usize) -> Self {
        Self {
            uf: UnionFind::new(n),
            bound: vec![None; n],
        }
    }

    fn bind(&mut self, x: usize, value: &T) -> Result<()> {
        let root = self.uf.find(x);
        if let Some(existing) = &self.bound[root] {
            return check_consistent(root, existing, value);
        }
        self.bound[root] = Some(value.clone());
        Ok(())
    }

    fn union(&mut self, x: usize, y: usize) -> Result<()> {
        let (root, absorbed) = self.uf.union(x, y);
        let Some(absorbed) = absorbed else {
            return Ok(());
        };
        let Some(value) = self.bound[absorbed].take() else {
            return Ok(());
        };
        if let Some(existing) = &self.bound[root] {
            return check_consistent(root, existing, &value);
        }
        self.bound[root] = Some(value);
        Ok(())
    }
}

fn check_consistent<T: PartialEq + Debug>(class: usize, first: &T, second: &T) -> Result<()> {
    if first != second {
        return Err(Error::InconsistentColimit {
            class,
            first: format!("{first:?}"),
            second: format!("{second:?}"),
        });
    }
    Ok(())
}

/// Compute the colimit of a diagram of variable sets.
///
/// Every layer 1 element identifies all its images: variables are merged into one class, and
/// concrete values bind that class. Unbound classes become the fresh variables of the apex,
/// numbered in order of their least member.
///
/// # Errors
///
/// [`Error::InconsistentColimit`] if a class would be bound to two different values. `class`
/// is the position of the conflict in the disjoint union of the layer 2 variables, or, when a
/// layer 1 element is sent to two different values directly, that element.
pub fn colimit_vars<T: Clone + PartialEq + Debug>(d: &VarDiagram<T>) -> Result<VarColimit<T>> {
    let offsets = VecArray(d.ob2.clone()).cumulative_sum();
    let n = offsets[d.nv2()];
    let mut bindings = Bindings::new(n);

    for u in 0..d.nv1() {
        let edges: Vec<&VarEdge<T>> = d.edges.iter().filter(|e| e.src == u).collect();
        for x in 0..d.ob1[u] {
            let mut anchor: Option<usize> = None;
            let mut value: Option<&T> = None;
            for edge in &edges {
                match &edge.hom.values()[x] {
                    AttrVal::Var(AttrVar(i)) => {
                        let slot = offsets[edge.tgt] + i;
                        match anchor {
                            None => anchor = Some(slot),
                            Some(a) => bindings.union(a, slot)?,
                        }
                    }
                    AttrVal::Value(t) => match value {
                        None => value = Some(t),
                        Some(v) => check_consistent(x, v, t)?,
                    },
                }
            }
            if let (Some(a), Some(t)) = (anchor, value) {
                bindings.bind(a, t)?;
            }
        }
    }

    // fresh variables for unbound classes, values for bound ones
    let mut fresh = vec![None; n];
    let mut apex = 0;
    let mut images = Vec::with_capacity(n);
    for slot in 0..n {
        let root = bindings.uf.find(slot);
        let image = match &bindings.bound[root] {
            Some(t) => AttrVal::Value(t.clone()),
            None => AttrVal::var(*fresh[root].get_or_insert_with(|| {
                apex += 1;
                apex - 1
            })),
        };
        images.push(image);
    }
    tracing::debug!(variables = n, fresh = apex, "variable colimit");

    let legs = offsets
        .windows(2)
        .map(|w| VariableFunction::new(images[w[0]..w[1]].to_vec(), apex))
        .collect::<Result<Vec<_>>>()?;
    Ok(VarColimit { apex, legs })
}

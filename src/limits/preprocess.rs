//! Normalising bipartite diagrams before their limit is computed.
use super::{equalizer_inclusion, product};
use crate::category::*;
use crate::diagram::BipartiteDiagram;
use crate::error::Result;
use crate::finite_function::FiniteFunction;

use std::collections::HashMap;

/// Make a bipartite diagram *simple*: at most one edge between any two vertices.
///
/// Each layer 1 vertex `u` with several edges to the same `v` is replaced by the equalizer of
/// those edges, and each group of parallel edges by a single edge. Returns the simple diagram
/// together with the inclusion `ιᵤ` of each new layer 1 object into the old one. Layer 2 and
/// the vertex numbering are unchanged.
///
/// A diagram which is already simple comes back unchanged with identity inclusions.
pub fn equalize_all(d: &BipartiteDiagram) -> Result<(BipartiteDiagram, Vec<FiniteFunction>)> {
    let mut simple = BipartiteDiagram::new();
    for &ob in d.obs2() {
        simple.add_vertex2(ob);
    }

    let mut inclusions = Vec::with_capacity(d.nv1());
    let mut groups_of = Vec::with_capacity(d.nv1());
    for u in 0..d.nv1() {
        // out edges of u grouped by target, in order of first appearance
        let mut position: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
        for e in d.incident_out(u) {
            let v = d.edge(e).tgt;
            let i = *position.entry(v).or_insert_with(|| {
                groups.push((v, Vec::new()));
                groups.len() - 1
            });
            groups[i].1.push(e);
        }

        let mut inclusion = FiniteFunction::identity(d.ob1(u));
        for (_, es) in groups.iter().filter(|(_, es)| es.len() > 1) {
            let homs = es
                .iter()
                .map(|&e| inclusion.compose(&d.edge(e).hom))
                .collect::<Result<Vec<_>>>()?;
            let step = equalizer_inclusion(inclusion.source(), &homs);
            inclusion = step.compose(&inclusion)?;
        }

        simple.add_vertex1(inclusion.source());
        inclusions.push(inclusion);
        groups_of.push(groups);
    }

    for (u, groups) in groups_of.into_iter().enumerate() {
        for (v, es) in groups {
            let hom = inclusions[u].compose(&d.edge(es[0]).hom)?;
            simple.add_edge(u, v, hom)?;
        }
    }
    Ok((simple, inclusions))
}

/// Replace every group of layer 2 vertices with the same in-neighbours by their product.
///
/// Layer 2 vertices `v₀, …, vₖ` sharing the in-neighbours `u₀, …, uₘ` have the same limit as
/// the single vertex `v₀ × … × vₖ`, reached from each `uᵢ` by the tupling of its edges. Layer 1
/// is unchanged. The input should be simple (see [`equalize_all`]).
pub fn pair_all(d: &BipartiteDiagram) -> Result<BipartiteDiagram> {
    let mut position: HashMap<Vec<usize>, usize> = HashMap::new();
    let mut groups: Vec<(Vec<usize>, Vec<usize>)> = Vec::new();
    for v in 0..d.nv2() {
        let us = d.in_neighbors(v);
        match position.get(&us) {
            Some(&i) => groups[i].1.push(v),
            None => {
                position.insert(us.clone(), groups.len());
                groups.push((us, vec![v]));
            }
        }
    }

    let mut paired = BipartiteDiagram::new();
    for &ob in d.obs1() {
        paired.add_vertex1(ob);
    }

    for (us, vs) in groups {
        if let [v] = vs[..] {
            let w = paired.add_vertex2(d.ob2(v));
            for e in d.incident_in(v) {
                let edge = d.edge(e);
                paired.add_edge(edge.src, w, edge.hom.clone())?;
            }
            continue;
        }

        let obs: Vec<usize> = vs.iter().map(|&v| d.ob2(v)).collect();
        let w = paired.add_vertex2(product(&obs).apex());
        tracing::trace!(vertices = ?vs, "pairing layer 2 vertices");

        // edges into each v, sorted by source so the i-th edge into every v starts at us[i]
        let incoming: Vec<Vec<usize>> = vs
            .iter()
            .map(|&v| {
                let mut es = d.incident_in(v);
                es.sort_by_key(|&e| d.edge(e).src);
                es
            })
            .collect();
        for (i, &u) in us.iter().enumerate() {
            let homs: Vec<FiniteFunction> = incoming
                .iter()
                .map(|es| d.edge(es[i]).hom.clone())
                .collect();
            paired.add_edge(u, w, FiniteFunction::pair(d.ob1(u), &homs)?)?;
        }
    }
    Ok(paired)
}

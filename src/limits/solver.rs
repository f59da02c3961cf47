//! The limit of a bipartite diagram as a sequence of multiway joins.
//!
//! After [`equalize_all`] and [`pair_all`], every layer 2 vertex `v` has a distinct set of
//! in-neighbours. The solver greedily picks the vertex whose join is smallest to compute,
//! replaces `v` and its in-neighbours by their join (a single new layer 1 vertex), and recurses
//! until layer 2 is empty. What remains is a product of the layer 1 objects.
use super::{join, product, Limit, LimitAlgorithm};
use super::preprocess::{equalize_all, pair_all};
use crate::category::*;
use crate::diagram::{BipartiteDiagram, Multicospan};
use crate::error::{Error, Result};
use crate::finite_function::FiniteFunction;

/// Compute the limit of a bipartite diagram, with one leg per layer 1 vertex.
///
/// # Errors
///
/// [`Error::MalformedDiagram`] if a layer 2 vertex has no incoming edges.
pub fn limit_bipartite(d: &BipartiteDiagram, algorithm: LimitAlgorithm) -> Result<Limit> {
    if let Some(vertex) = (0..d.nv2()).find(|&v| d.incident_in(v).is_empty()) {
        return Err(Error::MalformedDiagram {
            vertex,
            reason: "layer 2 vertex has no incoming edges".to_string(),
        });
    }
    let (apex, legs) = solve(d, algorithm, 0)?;
    Ok(Limit::new(apex, legs))
}

fn solve(
    d: &BipartiteDiagram,
    algorithm: LimitAlgorithm,
    depth: usize,
) -> Result<(usize, Vec<FiniteFunction>)> {
    let (simple, inclusions) = equalize_all(d)?;
    let paired = pair_all(&simple)?;

    let (apex, legs) = if paired.nv2() == 0 {
        tracing::debug!(depth, vertices = paired.nv1(), "taking product of remaining vertices");
        match paired.obs1() {
            [n] => (*n, vec![FiniteFunction::identity(*n)]),
            obs => product(obs).into_parts(),
        }
    } else {
        contract(&paired, algorithm, depth)?
    };

    let legs = legs
        .iter()
        .zip(&inclusions)
        .map(|(leg, inclusion)| leg.compose(inclusion))
        .collect::<Result<Vec<_>>>()?;
    Ok((apex, legs))
}

/// The estimated size of the join at `v`: the product of the sizes of its in-neighbours.
fn join_cost(d: &BipartiteDiagram, v: usize) -> u128 {
    d.incident_in(v)
        .into_iter()
        .map(|e| d.ob1(d.edge(e).src) as u128)
        .fold(1, u128::saturating_mul)
}

/// Join at the cheapest layer 2 vertex, merge its in-neighbours into the result and recurse.
fn contract(
    d: &BipartiteDiagram,
    algorithm: LimitAlgorithm,
    depth: usize,
) -> Result<(usize, Vec<FiniteFunction>)> {
    let v = (0..d.nv2())
        .min_by_key(|&v| join_cost(d, v))
        .expect("by construction");
    let incoming = d.incident_in(v);
    let joined: Vec<usize> = incoming.iter().map(|&e| d.edge(e).src).collect();
    tracing::debug!(
        depth,
        vertex = v,
        cost = join_cost(d, v),
        legs = joined.len(),
        "joining at layer 2 vertex"
    );

    let homs = incoming.iter().map(|&e| d.edge(e).hom.clone()).collect();
    let pullback = join(&Multicospan::new(d.ob2(v), homs)?, algorithm)?;

    // The reduced diagram: untouched layer 1 vertices keep their order, the joined vertices
    // become one new vertex at the end, and `v` is dropped.
    let mut reduced = BipartiteDiagram::new();
    let mut new_u = vec![None; d.nv1()];
    for u in (0..d.nv1()).filter(|u| !joined.contains(u)) {
        new_u[u] = Some(reduced.add_vertex1(d.ob1(u)));
    }
    let w = reduced.add_vertex1(pullback.apex());

    let mut new_v = vec![None; d.nv2()];
    for x in (0..d.nv2()).filter(|&x| x != v) {
        new_v[x] = Some(reduced.add_vertex2(d.ob2(x)));
    }

    for edge in d.edges().iter().filter(|edge| edge.tgt != v) {
        let tgt = new_v[edge.tgt].expect("by construction");
        match joined.iter().position(|&u| u == edge.src) {
            Some(i) => {
                let hom = pullback.leg(i).compose(&edge.hom)?;
                reduced.add_edge(w, tgt, hom)?;
            }
            None => {
                let src = new_u[edge.src].expect("by construction");
                reduced.add_edge(src, tgt, edge.hom.clone())?;
            }
        }
    }

    let (apex, reduced_legs) = solve(&reduced, algorithm, depth + 1)?;
    let legs = (0..d.nv1())
        .map(|u| match joined.iter().position(|&x| x == u) {
            Some(i) => reduced_legs[w].compose(pullback.leg(i)),
            None => Ok(reduced_legs[new_u[u].expect("by construction")].clone()),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((apex, legs))
}

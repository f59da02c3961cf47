use {
    crate::finite_function::strategy::{arrow_to, objects_strategy},
    finset_limits::prelude::*,
    proptest::prelude::{Just, Strategy},
};

/// A multicospan with one to three legs into a nonempty apex.
pub(crate) fn multicospan_strategy() -> impl Strategy<Value = Multicospan> {
    (1usize..4, objects_strategy(false)).prop_flat_map(|(k, apex)| {
        let leg = objects_strategy(true).prop_flat_map(move |n| arrow_to(n, apex));
        proptest::collection::vec(leg, k)
            .prop_map(move |legs| Multicospan::new(apex, legs).expect("By construction"))
    })
}

/// A free diagram on one to three nonempty objects with up to four random edges.
pub(crate) fn free_diagram_strategy() -> impl Strategy<Value = FreeDiagram> {
    proptest::collection::vec(objects_strategy(false), 1..4)
        .prop_flat_map(|obs| {
            let nv = obs.len();
            let edge_obs = obs.clone();
            let edge = (0..nv, 0..nv).prop_flat_map(move |(s, t)| {
                (Just(s), Just(t), arrow_to(edge_obs[s], edge_obs[t]))
            });
            (Just(obs), proptest::collection::vec(edge, 0..5))
        })
        .prop_map(|(obs, edges)| {
            let mut d = FreeDiagram::new();
            for ob in obs {
                d.add_vertex(ob);
            }
            for (s, t, f) in edges {
                d.add_edge(s, t, f).expect("By construction");
            }
            d
        })
}

/// The tuples of leg values of a cone, one per apex element, sorted.
pub(crate) fn sorted_tuples(apex: usize, legs: &[FiniteFunction]) -> Vec<Vec<usize>> {
    let tables: Vec<_> = legs.iter().map(|f| f.table().into_owned()).collect();
    let mut tuples: Vec<Vec<usize>> = (0..apex)
        .map(|e| tables.iter().map(|t| t[e]).collect())
        .collect();
    tuples.sort();
    tuples
}

use finset_limits::limits::{equalize_all, pair_all};
use finset_limits::prelude::*;

use super::strategy::free_diagram_strategy;

use proptest::{prop_assert, prop_assert_eq, proptest};
use std::collections::HashSet;

proptest! {
    #[test]
    fn equalize_all_is_idempotent(d in free_diagram_strategy()) {
        let b = d.to_bipartite_for_limit();
        let (simple, _) = equalize_all(&b).unwrap();
        let (again, inclusions) = equalize_all(&simple).unwrap();
        prop_assert_eq!(&again, &simple);
        prop_assert!(inclusions.iter().all(|i| i.is_identity()));
    }

    #[test]
    fn equalized_diagrams_are_simple(d in free_diagram_strategy()) {
        let b = d.to_bipartite_for_limit();
        let (simple, inclusions) = equalize_all(&b).unwrap();
        let pairs: HashSet<(usize, usize)> =
            simple.edges().iter().map(|e| (e.src, e.tgt)).collect();
        prop_assert_eq!(pairs.len(), simple.edges().len());

        // each inclusion lands in the original layer 1 object
        for (u, i) in inclusions.iter().enumerate() {
            prop_assert_eq!(i.target(), b.ob1(u));
            prop_assert_eq!(i.source(), simple.ob1(u));
        }
    }

    #[test]
    fn paired_diagrams_have_distinct_neighbourhoods(d in free_diagram_strategy()) {
        let (simple, _) = equalize_all(&d.to_bipartite_for_limit()).unwrap();
        let paired = pair_all(&simple).unwrap();
        let neighbourhoods: HashSet<Vec<usize>> =
            (0..paired.nv2()).map(|v| paired.in_neighbors(v)).collect();
        prop_assert_eq!(neighbourhoods.len(), paired.nv2());
        prop_assert_eq!(paired.nv1(), simple.nv1());
    }
}

#[test]
fn free_diagrams_double_into_bipartite_ones() {
    // 0 → 1 → 2, and a loop on 1
    let mut d = FreeDiagram::new();
    for n in [2, 3, 2] {
        d.add_vertex(n);
    }
    d.add_edge(0, 1, FiniteFunction::new(VecArray(vec![0, 2]), 3).unwrap()).unwrap();
    d.add_edge(1, 2, FiniteFunction::new(VecArray(vec![0, 1, 1]), 2).unwrap()).unwrap();
    d.add_edge(1, 1, FiniteFunction::identity(3)).unwrap();

    let b = d.to_bipartite_for_limit();
    assert_eq!(b.obs1(), &[2, 3, 2]);
    assert_eq!(b.obs2(), &[3, 2]);
    // identity edges into the two copies, then one edge per original edge
    assert_eq!(b.edges().len(), 5);
    assert_eq!(b.in_neighbors(0), vec![0, 1, 1]);

    let c = d.to_bipartite_for_colimit();
    assert_eq!(c.obs2(), &[2, 3, 2]);
    assert_eq!(c.obs1(), &[2, 3]);
    assert_eq!(c.incident_out(1).len(), 3);
}

use finset_limits::prelude::*;

use super::strategy::{free_diagram_strategy, multicospan_strategy, sorted_tuples};
use crate::finite_function::strategy::permutation_strategy;

use proptest::{
    prelude::{Just, Strategy},
    prop_assert, prop_assert_eq, proptest,
};

fn ff(table: Vec<usize>, target: usize) -> FiniteFunction {
    FiniteFunction::new(VecArray(table), target).unwrap()
}

/// The limit of a free diagram by brute force: every tuple of the product of its objects which
/// commutes with every edge.
fn brute_force_limit(d: &FreeDiagram) -> Vec<Vec<usize>> {
    let p = limits::product(d.obs());
    let tuples = sorted_tuples(p.apex(), p.legs());
    tuples
        .into_iter()
        .filter(|xs| {
            d.edges()
                .iter()
                .all(|e| e.hom.apply(xs[e.src]) == Ok(xs[e.tgt]))
        })
        .collect()
}

proptest! {
    #[test]
    fn free_limit_matches_brute_force(d in free_diagram_strategy()) {
        let l = limit(&Diagram::Free(d.clone()), LimitAlgorithm::default()).unwrap();
        prop_assert_eq!(l.legs().len(), d.nv());
        prop_assert_eq!(sorted_tuples(l.apex(), l.legs()), brute_force_limit(&d));
    }

    #[test]
    fn free_limit_is_independent_of_algorithm(d in free_diagram_strategy()) {
        let expected = brute_force_limit(&d);
        let algorithms = [
            LimitAlgorithm::NestedLoop,
            LimitAlgorithm::SortMerge,
            LimitAlgorithm::Hash,
        ];
        for algorithm in algorithms {
            let l = limit(&Diagram::Free(d.clone()), algorithm).unwrap();
            prop_assert_eq!(sorted_tuples(l.apex(), l.legs()), expected.clone());
        }
    }

    // Permuting the limit cone gives a cone whose universal map is the permutation.
    #[test]
    fn limit_universal_round_trip(
        (d, p) in free_diagram_strategy().prop_flat_map(|d| {
            let apex = limit(&Diagram::Free(d.clone()), LimitAlgorithm::default()).unwrap().apex();
            (Just(d), permutation_strategy(apex))
        })
    ) {
        let l = limit(&Diagram::Free(d), LimitAlgorithm::default()).unwrap();
        let legs = l.legs().iter().map(|leg| p.compose(leg).unwrap()).collect();
        let cone = Multispan::new(p.source(), legs).unwrap();

        let u = l.universal(&cone).unwrap();
        prop_assert_eq!(&u, &p);
        for (leg, cone_leg) in l.legs().iter().zip(cone.legs()) {
            prop_assert_eq!(&u.compose(leg).unwrap(), cone_leg);
        }
    }

    #[test]
    fn join_limit_universal_round_trip(cospan in multicospan_strategy()) {
        let l = limit(&Diagram::Multicospan(cospan.clone()), LimitAlgorithm::Hash).unwrap();
        let other = limit(&Diagram::Multicospan(cospan), LimitAlgorithm::NestedLoop).unwrap();
        let u = l.universal(&other.cone()).unwrap();
        for (leg, other_leg) in l.legs().iter().zip(other.legs()) {
            prop_assert_eq!(&u.compose(leg).unwrap(), other_leg);
        }
        prop_assert!(u.source() == other.apex() && u.target() == l.apex());
    }
}

#[test]
fn trivial_shapes() {
    let t = limit(&Diagram::Empty, LimitAlgorithm::default()).unwrap();
    assert_eq!(t.apex(), 1);
    assert!(t.legs().is_empty());

    let s = limit(&Diagram::Singleton(4), LimitAlgorithm::default()).unwrap();
    assert_eq!(s.apex(), 4);
    assert_eq!(s.leg(0), &FiniteFunction::identity(4));

    let p = limit(&Diagram::pair(2, 3), LimitAlgorithm::default()).unwrap();
    assert_eq!(p.apex(), 6);
    assert_eq!(
        sorted_tuples(p.apex(), p.legs()),
        vec![
            vec![0, 0],
            vec![0, 1],
            vec![0, 2],
            vec![1, 0],
            vec![1, 1],
            vec![1, 2]
        ]
    );

    assert_eq!(limits::product(&[3, 0]).apex(), 0);
}

#[test]
fn equalizer_of_parallel_maps() {
    let f = ff(vec![0, 1, 2, 1], 3);
    let g = ff(vec![0, 2, 2, 1], 3);
    let h = ff(vec![0, 2, 2, 0], 3);

    let pair = Diagram::parallel_pair(f.clone(), g.clone()).unwrap();
    let e = limit(&pair, LimitAlgorithm::default()).unwrap();
    assert_eq!(e.leg(0), &ff(vec![0, 2, 3], 4));

    let three = ParallelMorphisms::new(4, 3, vec![f, g, h]).unwrap();
    let e = limit(&Diagram::ParallelMorphisms(three), LimitAlgorithm::default()).unwrap();
    assert_eq!(e.leg(0), &ff(vec![0, 2], 4));

    let one = ParallelMorphisms::new(4, 3, vec![ff(vec![0, 1, 2, 1], 3)]).unwrap();
    assert_eq!(limits::equalizer(&one).leg(0), &FiniteFunction::identity(4));
}

#[test]
fn parallel_family_needs_an_arrow() {
    assert!(matches!(
        ParallelMorphisms::new(2, 5, vec![]),
        Err(Error::MalformedDiagram { .. })
    ));
}

#[test]
fn limit_of_a_multispan_is_its_apex() {
    let span = Diagram::span(ff(vec![0, 1, 1], 2), ff(vec![2, 0, 1], 3)).unwrap();
    let l = limit(&span, LimitAlgorithm::default()).unwrap();
    assert_eq!(l.apex(), 3);
    assert_eq!(l.legs().len(), 3);
    assert_eq!(l.leg(0), &FiniteFunction::identity(3));
    assert_eq!(l.leg(2), &ff(vec![2, 0, 1], 3));
}

#[test]
fn bipartite_limit_has_a_leg_per_layer_one_vertex() {
    // x ∈ 3, y ∈ 2, z ∈ 2 with f(x) = g(y) in 2 and h(y) = k(z) in 2
    let mut d = BipartiteDiagram::new();
    let x = d.add_vertex1(3);
    let y = d.add_vertex1(2);
    let z = d.add_vertex1(2);
    let a = d.add_vertex2(2);
    let b = d.add_vertex2(2);
    d.add_edge(x, a, ff(vec![0, 0, 1], 2)).unwrap();
    d.add_edge(y, a, ff(vec![0, 1], 2)).unwrap();
    d.add_edge(y, b, ff(vec![1, 1], 2)).unwrap();
    d.add_edge(z, b, ff(vec![0, 1], 2)).unwrap();

    let l = limit(&Diagram::Bipartite(d), LimitAlgorithm::default()).unwrap();
    assert_eq!(l.legs().len(), 3);
    assert_eq!(
        sorted_tuples(l.apex(), l.legs()),
        vec![vec![0, 0, 1], vec![1, 0, 1], vec![2, 1, 1]]
    );
}

#[test]
fn isolated_layer_two_vertex_is_malformed() {
    let mut d = BipartiteDiagram::new();
    d.add_vertex1(2);
    d.add_vertex2(2);
    d.add_vertex2(1);
    d.add_edge(0, 0, FiniteFunction::identity(2)).unwrap();

    let res = limits::limit_bipartite(&d, LimitAlgorithm::default());
    assert!(matches!(res, Err(Error::MalformedDiagram { vertex: 1, .. })));
}

#[test]
fn incompatible_cones_are_rejected() {
    let cospan = Diagram::cospan(ff(vec![0, 1], 2), ff(vec![1, 1], 2)).unwrap();
    let l = limit(&cospan, LimitAlgorithm::default()).unwrap();
    assert_eq!(l.apex(), 2);

    // (0, 0) is not in the pullback: f(0) = 0 but g(0) = 1
    let cone = Multispan::new(1, vec![ff(vec![0], 2), ff(vec![0], 2)]).unwrap();
    assert_eq!(
        l.universal(&cone),
        Err(Error::IncompatibleCone { element: 0 })
    );

    let short = Multispan::new(1, vec![ff(vec![1], 2)]).unwrap();
    assert!(matches!(l.universal(&short), Err(Error::TypeMismatch { .. })));
}

#[test]
fn edges_are_type_checked() {
    let mut d = BipartiteDiagram::new();
    let u = d.add_vertex1(2);
    let v = d.add_vertex2(3);
    assert_eq!(
        d.add_edge(u, v, FiniteFunction::identity(2)),
        Err(Error::TypeMismatch {
            leg: 0,
            expected: 3,
            found: 2
        })
    );
    assert!(matches!(
        d.add_edge(u, 7, FiniteFunction::identity(2)),
        Err(Error::MalformedDiagram { vertex: 7, .. })
    ));

    let mut free = FreeDiagram::new();
    free.add_vertex(2);
    assert!(free.add_edge(0, 1, FiniteFunction::identity(2)).is_err());
}

#[test]
fn join_tables_on_a_shared_column() {
    let people = Tabular::new(
        vec!["name".to_string(), "city".to_string()],
        vec![
            vec!["ada", "london"],
            vec!["alan", "manchester"],
            vec!["grace", "london"],
        ],
    )
    .unwrap();
    let cities = Tabular::new(
        vec!["city".to_string(), "country".to_string()],
        vec![vec!["london", "uk"], vec!["paris", "france"]],
    )
    .unwrap();
    let keys = Collection::new(vec!["london", "manchester", "paris"]).unwrap();

    let f = people.column("city").unwrap().image_in(&keys).unwrap();
    let g = cities.column("city").unwrap().image_in(&keys).unwrap();
    let l = limit(&Diagram::cospan(f, g).unwrap(), LimitAlgorithm::default()).unwrap();

    let rows: Vec<(&str, &str)> = (0..l.apex())
        .map(|e| {
            let person = people.get(l.leg(0).apply(e).unwrap()).unwrap();
            let city = cities.get(l.leg(1).apply(e).unwrap()).unwrap();
            (person[0], city[1])
        })
        .collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.contains(&("ada", "uk")));
    assert!(rows.contains(&("grace", "uk")));
}

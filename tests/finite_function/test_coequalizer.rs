use finset_limits::prelude::*;

use super::strategy::{arrow_strategy, parallel_arrows_strategy, permutation_strategy};

use proptest::{prelude::Strategy, prop_assert, prop_assert_eq, proptest};
use std::collections::HashSet;

proptest! {
    #[test]
    fn test_coequalizer_commutes([f, g] in parallel_arrows_strategy::<2>()) {
        let c = f.coequalizer(&g).expect("By construction same domain");
        let lhs = f.compose(&c).expect("By construction composible");
        let rhs = g.compose(&c).expect("By construction composible");

        // Check that c really coequalizes f and g, i.e., `f >> c == g >> c`
        prop_assert_eq!(lhs, rhs);
    }

    // Check that coequalizing with the zero map gives a map where all elements in the image map
    // to a single component, and all other indices map to discrete components.
    #[test]
    fn test_coequalize_zero_map(
        f in arrow_strategy().prop_filter("0 domain", |f| f.source() > 0)
    ) {
        let im_f: HashSet<usize> = f.table().iter().copied().collect();

        // Construct the zero map parallel to f, and coequalizer(f, zero)
        let zero_map = FiniteFunction::constant(f.source(), 0, f.target() - 1);
        let coeq = f.coequalizer(&zero_map).expect("correct arguments");

        let mut components_seen = HashSet::new();
        for (q, &component) in coeq.table().iter().enumerate() {
            if im_f.contains(&q) || q == 0 {
                prop_assert_eq!(component, 0);
            } else {
                prop_assert!(component > 0);
                prop_assert!(components_seen.insert(component),
                    "Component {} was used multiple times", component);
            }
        }
    }

    // The universal map out of a coequalizer into a permuted copy of itself is the permutation.
    #[test]
    fn test_coequalizer_universal(
        ([f, g], p) in parallel_arrows_strategy::<2>().prop_flat_map(|[f, g]| {
            let q = f.coequalizer(&g).expect("By construction same domain");
            (proptest::prelude::Just([f, g]), permutation_strategy(q.target()))
        })
    ) {
        let q = f.coequalizer(&g).unwrap();
        let h = q.compose(&p).unwrap();
        let u = pass_to_quotient(&q, &h).expect("h coequalizes f and g");
        prop_assert_eq!(u, p);
    }
}

#[test]
fn coequalizer_of_constant_map_has_one_class() {
    let f = FiniteFunction::new(VecArray(vec![0, 1, 2]), 3).unwrap();
    let g = FiniteFunction::new(VecArray(vec![0, 0, 0]), 3).unwrap();
    let q = f.coequalizer(&g).unwrap();
    assert_eq!(q.target(), 1);
    assert_eq!(q.table().as_slice(), &[0, 0, 0]);
}

#[test]
fn coequalizer_of_non_parallel_maps() {
    let f = FiniteFunction::identity(2);
    let g = FiniteFunction::identity(3);
    assert!(matches!(f.coequalizer(&g), Err(Error::TypeMismatch { .. })));
}

#[test]
fn pass_to_quotient_rejects_ill_defined_maps() {
    // q identifies 0 and 1, but h separates them
    let q = FiniteFunction::new(VecArray(vec![0, 0, 1]), 2).unwrap();
    let h = FiniteFunction::new(VecArray(vec![0, 1, 1]), 2).unwrap();
    assert_eq!(
        pass_to_quotient(&q, &h),
        Err(Error::IllDefinedQuotient {
            element: 0,
            first: 0,
            second: 1
        })
    );
}

#[test]
fn pass_to_quotient_rejects_non_surjective_maps() {
    let q = FiniteFunction::new(VecArray(vec![0, 0]), 2).unwrap();
    let h = FiniteFunction::new(VecArray(vec![1, 1]), 2).unwrap();
    assert_eq!(
        pass_to_quotient(&q, &h),
        Err(Error::NotSurjective { element: 1 })
    );
}

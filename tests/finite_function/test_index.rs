use finset_limits::prelude::*;

use super::strategy::arrow_strategy;

use proptest::{prop_assert, prop_assert_eq, proptest};
use std::sync::Arc;

proptest! {
    #[test]
    fn indexed_preimages_agree_with_scan(f in arrow_strategy()) {
        let indexed = f.ensure_indexed().unwrap();
        prop_assert!(indexed.is_indexed());
        for y in 0..f.target() {
            prop_assert_eq!(f.preimage(y), indexed.preimage(y));
        }
    }

    #[test]
    fn preimages_partition_the_domain(f in arrow_strategy()) {
        let index = f.preimages();
        prop_assert_eq!(index.len(), f.target());
        let mut all: Vec<usize> = (0..f.target()).flat_map(|y| index.get(y).to_vec()).collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..f.source()).collect::<Vec<_>>());

        for y in 0..f.target() {
            for &x in index.get(y) {
                prop_assert_eq!(f.apply(x), Ok(y));
            }
        }
    }
}

#[test]
fn index_is_built_lazily() {
    let f = FiniteFunction::new(VecArray(vec![1, 0, 1]), 2).unwrap();
    assert!(!f.is_indexed());
    assert_eq!(&*f.preimage(1), &[0, 2]);
    assert!(!f.is_indexed(), "a scan does not build the index");

    f.preimages();
    assert!(f.is_indexed());
    assert_eq!(&*f.preimage(1), &[0, 2]);
    assert!(f.preimage(5).is_empty());
}

#[test]
fn identity_and_callable_indexing() {
    let id = FiniteFunction::identity(4);
    assert!(id.is_indexed());
    assert_eq!(&*id.preimage(2), &[2]);

    let c = FiniteFunction::callable(4, 2, |x| x % 2);
    assert!(!c.is_indexed());
    let indexed = c.ensure_indexed().unwrap();
    assert!(indexed.is_indexed());
    assert_eq!(&*indexed.preimage(1), &[1, 3]);

    let runaway = FiniteFunction::callable(4, 2, |x| x);
    assert!(matches!(
        runaway.ensure_indexed(),
        Err(Error::Codomain { position: 2, value: 2, size: 2 })
    ));
}

#[test]
fn indexed_constructor_builds_eagerly() {
    let f = FiniteFunction::indexed(VecArray(vec![0, 0, 2]), 3).unwrap();
    assert!(f.is_indexed());
    assert_eq!(f.preimages().counts(), VecArray(vec![2, 0, 1]));
}

#[test]
fn concurrent_queries_share_one_index() {
    let table: Vec<usize> = (0..1000).map(|x| (x * 7) % 13).collect();
    let f = Arc::new(FiniteFunction::new(VecArray(table), 13).unwrap());

    let results: Vec<Vec<usize>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let f = Arc::clone(&f);
                s.spawn(move || f.preimage(3).into_owned())
            })
            .collect();
        for _ in 0..8 {
            f.preimages();
        }
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let expected = f.preimage(3).into_owned();
    assert!(!expected.is_empty());
    assert!(results.iter().all(|r| *r == expected));
    assert!(f.is_indexed());
    // every query now returns a slice of the one shared index
    assert!(std::ptr::eq(f.preimages(), f.preimages()));
}

use {
    finset_limits::prelude::*,
    proptest::prelude::{Just, Strategy},
};

pub(crate) const MAX_OBJECT: usize = 6;

pub(crate) fn objects_strategy(allow_initial: bool) -> impl Strategy<Value = usize> {
    #[allow(clippy::bool_to_int_with_if)]
    let min_value = if allow_initial { 0 } else { 1 };
    min_value..MAX_OBJECT
}

/// An arrow of a fixed type `source → target`.
///
/// There are no arrows `n → 0` for `n > 0`, so `target` must be nonzero unless `source` is.
pub(crate) fn arrow_to(source: usize, target: usize) -> impl Strategy<Value = FiniteFunction> {
    assert!(target > 0 || source == 0, "no arrows {source} → 0");
    proptest::collection::vec(0..target.max(1), source).prop_map(move |table| {
        FiniteFunction::new(VecArray(table), target).expect("By construction")
    })
}

pub(crate) fn arrow_strategy() -> impl Strategy<Value = FiniteFunction> {
    (objects_strategy(true), objects_strategy(false)).prop_flat_map(|(a, b)| arrow_to(a, b))
}

pub(crate) fn parallel_arrows_strategy<const N: usize>(
) -> impl Strategy<Value = [FiniteFunction; N]> {
    (objects_strategy(true), objects_strategy(false))
        .prop_flat_map(|(a, b)| proptest::array::uniform(arrow_to(a, b)))
}

pub(crate) fn composible_arrows_strategy() -> impl Strategy<Value = [FiniteFunction; 2]> {
    (
        objects_strategy(true),
        objects_strategy(false),
        objects_strategy(false),
    )
        .prop_flat_map(|(a, b, c)| [arrow_to(a, b), arrow_to(b, c)])
}

pub(crate) fn three_composible_arrows_strategy() -> impl Strategy<Value = [FiniteFunction; 3]> {
    (
        objects_strategy(true),
        objects_strategy(false),
        objects_strategy(false),
        objects_strategy(false),
    )
        .prop_flat_map(|(a, b, c, d)| [arrow_to(a, b), arrow_to(b, c), arrow_to(c, d)])
}

pub(crate) fn permutation_strategy(n: usize) -> impl Strategy<Value = FiniteFunction> {
    let v: Vec<usize> = (0..n).collect();
    Just(v)
        .prop_shuffle()
        .prop_map(move |p| FiniteFunction::new(VecArray(p), n).expect("By construction"))
}

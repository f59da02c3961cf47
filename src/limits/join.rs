//! Multiway joins: limits of a [`Multicospan`] `fᵢ : Xᵢ → Y`.
//!
//! The limit is the set of tuples `(x₀, …, xₖ)` with `f₀(x₀) = … = fₖ(xₖ)`, with one projection
//! leg per foot. All algorithms agree up to the order of the tuples.
//!
//! Callable legs are checked against their codomain before any algorithm reads them.
use super::{product, Limit, LimitAlgorithm};
use crate::array::*;
use crate::category::*;
use crate::diagram::Multicospan;
use crate::error::Result;
use crate::finite_function::FiniteFunction;

use std::borrow::Cow;
use std::ops::Range;

/// Compute the limit of a multicospan with the chosen algorithm.
///
/// # Errors
///
/// [`crate::Error::Codomain`] if a callable leg leaves the apex.
pub fn join(cospan: &Multicospan, algorithm: LimitAlgorithm) -> Result<Limit> {
    tracing::debug!(
        ?algorithm,
        legs = cospan.legs().len(),
        apex = cospan.apex(),
        "computing multiway join"
    );
    match algorithm {
        LimitAlgorithm::NestedLoop => nested_loop_join(cospan),
        LimitAlgorithm::SortMerge => sort_merge_join(cospan),
        LimitAlgorithm::Hash => hash_join(cospan),
        LimitAlgorithm::Smart | LimitAlgorithm::Default => smart_join(cospan),
    }
}

/// Enumerate every tuple of the product of the feet and keep those on which all legs agree.
pub fn nested_loop_join(cospan: &Multicospan) -> Result<Limit> {
    let cospan = checked_legs(cospan)?;
    let legs = cospan.legs();
    let tables: Vec<_> = legs.iter().map(|f| f.table()).collect();
    let sizes = cospan.feet();
    let mut columns = vec![Vec::new(); legs.len()];

    for_each_tuple(&sizes, |xs| {
        let y = tables[0][xs[0]];
        if tables.iter().zip(xs).all(|(t, &x)| t[x] == y) {
            for (column, &x) in columns.iter_mut().zip(xs) {
                column.push(x);
            }
        }
    });
    Ok(into_limit(columns, &sizes))
}

/// Sort every leg by value, then scan the sorted legs in step, emitting the product of each
/// group of equal values that occurs in all legs.
pub fn sort_merge_join(cospan: &Multicospan) -> Result<Limit> {
    let cospan = checked_legs(cospan)?;
    let legs = cospan.legs();
    let sizes = cospan.feet();
    let tables: Vec<_> = legs.iter().map(|f| f.table()).collect();
    let sorts: Vec<VecArray<usize>> = tables.iter().map(|t| t.argsort()).collect();

    let k = legs.len();
    let mut ranges: Vec<Range<usize>> = vec![0..0; k];
    let mut values = vec![0; k];
    let mut columns = vec![Vec::new(); k];

    // Advance leg `i` to its next group of equal values.
    let next_range = |i: usize, ranges: &mut [Range<usize>], values: &mut [usize]| {
        let (table, sort, n) = (&tables[i], &sorts[i], sizes[i]);
        let start = ranges[i].end;
        if start >= n {
            ranges[i] = n..n;
            return;
        }
        let value = table[sort[start]];
        let mut stop = start + 1;
        while stop < n && table[sort[stop]] == value {
            stop += 1;
        }
        ranges[i] = start..stop;
        values[i] = value;
    };

    for i in 0..k {
        next_range(i, &mut ranges, &mut values);
    }

    while ranges.iter().all(|r| !r.is_empty()) {
        let max = *values.iter().max().expect("by construction");
        if values.iter().all(|&v| v == max) {
            let groups: Vec<&[usize]> = ranges
                .iter()
                .zip(&sorts)
                .map(|(r, sort)| &sort[r.clone()])
                .collect();
            push_product(&groups, &mut columns);
            for i in 0..k {
                next_range(i, &mut ranges, &mut values);
            }
        } else {
            let i = argmin(&values);
            next_range(i, &mut ranges, &mut values);
        }
    }
    Ok(into_limit(columns, &sizes))
}

/// Index every leg except one *probe* leg, then look up each probe element's value in the
/// indexes of the other legs.
///
/// The probe is the unindexed leg with the largest domain, so the most expensive index is the
/// one that is never built. When every leg is already indexed the first leg is the probe.
pub fn hash_join(cospan: &Multicospan) -> Result<Limit> {
    let cospan = checked_legs(cospan)?;
    let legs = cospan.legs();
    let sizes = cospan.feet();
    let probe = probe_leg(legs);
    tracing::debug!(probe, "hash join probe leg");

    let indexed: Vec<Option<FiniteFunction>> = legs
        .iter()
        .enumerate()
        .map(|(i, f)| (i != probe).then(|| f.ensure_indexed()).transpose())
        .collect::<Result<_>>()?;
    let probe_table = legs[probe].table();
    let mut columns = vec![Vec::new(); legs.len()];

    for (y, &value) in probe_table.iter().enumerate() {
        let mut matches: Vec<Cow<'_, [usize]>> = Vec::with_capacity(legs.len());
        for f in &indexed {
            match f {
                Some(f) => matches.push(f.preimage(value)),
                None => matches.push(Cow::Owned(vec![y])),
            }
        }
        if matches.iter().any(|m| m.is_empty()) {
            continue;
        }
        let groups: Vec<&[usize]> = matches.iter().map(|m| m.as_ref()).collect();
        push_product(&groups, &mut columns);
    }
    Ok(into_limit(columns, &sizes))
}

/// Short-circuit joins where one leg picks out a single value; otherwise [`hash_join`].
///
/// If leg `i` has domain `1` with value `c`, the limit is the product of the preimages
/// `fⱼ⁻¹(c)` of the other legs, and leg `i` is constant.
pub fn smart_join(cospan: &Multicospan) -> Result<Limit> {
    let cospan = checked_legs(cospan)?;
    let legs = cospan.legs();
    let Some(i) = legs.iter().position(|f| f.source() == 1) else {
        return hash_join(&cospan);
    };
    let c = legs[i].table()[0];
    tracing::debug!(leg = i, value = c, "joining on a constant");

    let selections: Vec<FiniteFunction> = legs
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(_, f)| {
            let table: VecArray<usize> = f.preimage(c).iter().copied().collect();
            FiniteFunction::new_unchecked(table, f.source())
        })
        .collect();

    let sizes: Vec<usize> = selections.iter().map(|s| s.source()).collect();
    let (apex, projections) = product(&sizes).into_parts();
    let mut out: Vec<FiniteFunction> = projections
        .iter()
        .zip(&selections)
        .map(|(p, s)| p.compose(s))
        .collect::<Result<_>>()?;
    out.insert(i, FiniteFunction::terminal(apex));
    Ok(Limit::new(apex, out))
}

/// The cospan with every callable leg replaced by its checked table.
fn checked_legs(cospan: &Multicospan) -> Result<Cow<'_, Multicospan>> {
    if !cospan.legs().iter().any(FiniteFunction::is_callable) {
        return Ok(Cow::Borrowed(cospan));
    }
    let legs = cospan
        .legs()
        .iter()
        .map(FiniteFunction::materialize)
        .collect::<Result<_>>()?;
    Ok(Cow::Owned(Multicospan::new(cospan.apex(), legs)?))
}

/// The leg that [`hash_join`] probes with.
fn probe_leg(legs: &[FiniteFunction]) -> usize {
    let mut best = 0;
    let mut best_cost = None;
    for (i, f) in legs.iter().enumerate() {
        let cost = (!f.is_indexed()).then(|| f.source());
        if cost > best_cost {
            best = i;
            best_cost = cost;
        }
    }
    best
}

fn argmin(values: &[usize]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v < values[best] {
            best = i;
        }
    }
    best
}

/// Call `f` on every tuple of `0..sizes[0] × … × 0..sizes[k]`, in row-major order.
pub(crate) fn for_each_tuple(sizes: &[usize], mut f: impl FnMut(&[usize])) {
    if sizes.iter().any(|&n| n == 0) {
        return;
    }
    let mut xs = vec![0; sizes.len()];
    loop {
        f(&xs);
        // odometer increment, last position fastest
        let mut i = sizes.len();
        loop {
            if i == 0 {
                return;
            }
            i -= 1;
            xs[i] += 1;
            if xs[i] < sizes[i] {
                break;
            }
            xs[i] = 0;
        }
    }
}

/// Append every tuple of `groups[0] × … × groups[k]` to `columns`.
fn push_product(groups: &[&[usize]], columns: &mut [Vec<usize>]) {
    let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    for_each_tuple(&sizes, |xs| {
        for ((column, group), &x) in columns.iter_mut().zip(groups).zip(xs) {
            column.push(group[x]);
        }
    });
}

fn into_limit(columns: Vec<Vec<usize>>, sizes: &[usize]) -> Limit {
    let apex = columns.first().map_or(0, |c| c.len());
    let legs = columns
        .into_iter()
        .zip(sizes)
        .map(|(column, &n)| FiniteFunction::new_unchecked(VecArray(column), n))
        .collect();
    Limit::new(apex, legs)
}

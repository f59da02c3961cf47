//! Colimits whose apex elements carry human-readable names.
use super::{colimit, Colimit, ColimitAlgorithm};
use crate::category::*;
use crate::diagram::Diagram;
use crate::error::{Error, Result};

use std::collections::HashSet;

/// Compute the colimit of `diagram` and name its apex elements.
///
/// `names[i][x]` names element `x` of the object of the `i`-th colimit leg. Each apex element
/// takes the name of its first member, scanning legs in order. Apex elements which would end
/// up with a name already taken get the first free name of the form `name#1`, `name#2`, …, so
/// distinct elements always have distinct names.
///
/// # Errors
///
/// [`Error::TypeMismatch`] if `names` does not have one name per element of each leg's object.
pub fn colimit_named(diagram: &Diagram, names: &[Vec<String>]) -> Result<Colimit> {
    let colim = colimit(diagram, ColimitAlgorithm::UnionFind)?;
    if names.len() != colim.legs().len() {
        return Err(Error::TypeMismatch {
            leg: names.len().min(colim.legs().len()),
            expected: colim.legs().len(),
            found: names.len(),
        });
    }
    for (leg, (f, ns)) in colim.legs().iter().zip(names).enumerate() {
        if f.source() != ns.len() {
            return Err(Error::TypeMismatch {
                leg,
                expected: f.source(),
                found: ns.len(),
            });
        }
    }

    let apex_names = name_apex(&colim, names)?;
    tracing::debug!(apex = colim.apex(), "named colimit");
    Ok(colim.with_names(apex_names))
}

fn name_apex(colim: &Colimit, names: &[Vec<String>]) -> Result<Vec<String>> {
    let mut preferred: Vec<Option<&str>> = vec![None; colim.apex()];
    for (f, ns) in colim.legs().iter().zip(names) {
        for (&c, name) in f.table().iter().zip(ns) {
            preferred[c].get_or_insert(name);
        }
    }

    let mut used: HashSet<String> = preferred.iter().flatten().map(|s| s.to_string()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    preferred
        .into_iter()
        .enumerate()
        .map(|(element, name)| {
            let name = name.ok_or(Error::NotSurjective { element })?;
            if seen.insert(name.to_string()) {
                return Ok(name.to_string());
            }
            let tagged = (1..)
                .map(|i| format!("{name}#{i}"))
                .find(|candidate| !used.contains(candidate))
                .expect("by construction");
            used.insert(tagged.clone());
            seen.insert(tagged.clone());
            Ok(tagged)
        })
        .collect()
}

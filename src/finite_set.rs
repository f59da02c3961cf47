//! Finite sets with a canonical enumeration.
//!
//! Every set in this module is identified with its *skeleton* `{0, …, n-1}` by enumerating its
//! elements; [`FiniteFunction`](crate::finite_function::FiniteFunction)s act on those positions.
//! The enumeration order is fixed at construction, so repeated iteration is stable.
use crate::error::{Error, Result};
use crate::semifinite::SemifiniteFunction;

use core::fmt::Debug;
use core::hash::Hash;
use core::marker::PhantomData;
use std::collections::HashMap;

pub trait FiniteSet {
    type Element: Clone + Eq + Hash + Debug;

    /// Number of elements, i.e. the skeleton object this set enumerates onto.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`th element in enumeration order.
    fn get(&self, i: usize) -> Option<Self::Element>;

    /// Position of `x` in the enumeration, if `x` is an element.
    fn position(&self, x: &Self::Element) -> Option<usize>;

    fn contains(&self, x: &Self::Element) -> bool {
        self.position(x).is_some()
    }

    fn elements(&self) -> Vec<Self::Element> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }
}

/// The set `{0, …, n-1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range(pub usize);

impl FiniteSet for Range {
    type Element = usize;

    fn len(&self) -> usize {
        self.0
    }

    fn get(&self, i: usize) -> Option<usize> {
        (i < self.0).then_some(i)
    }

    fn position(&self, x: &usize) -> Option<usize> {
        (*x < self.0).then_some(*x)
    }
}

/// A finite set wrapping an explicit list of distinct elements.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    elements: Vec<T>,
    positions: HashMap<T, usize>,
}

impl<T: Clone + Eq + Hash + Debug> Collection<T> {
    /// # Errors
    ///
    /// [`Error::DuplicateElement`] if an element occurs twice.
    pub fn new(elements: Vec<T>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(elements.len());
        for (i, x) in elements.iter().enumerate() {
            if positions.insert(x.clone(), i).is_some() {
                return Err(Error::DuplicateElement { position: i });
            }
        }
        Ok(Self {
            elements,
            positions,
        })
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Clone + Eq + Hash + Debug> FiniteSet for Collection<T> {
    type Element = T;

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn get(&self, i: usize) -> Option<T> {
        self.elements.get(i).cloned()
    }

    fn position(&self, x: &T) -> Option<usize> {
        self.positions.get(x).copied()
    }
}

/// The rows of a table. Each row is a tuple of values named by the table's columns.
///
/// Rows are elements by position: two equal rows are still distinct elements, and
/// [`FiniteSet::position`] returns the first matching row.
#[derive(Debug, Clone, PartialEq)]
pub struct Tabular<T> {
    columns: Vec<String>,
    rows: Vec<Vec<T>>,
}

impl<T: Clone + Eq + Hash + Debug> Tabular<T> {
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if a row's length differs from the number of columns; `leg` is the
    /// offending row.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<T>>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(Error::TypeMismatch {
                leg: i,
                expected: columns.len(),
                found: row.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The `i`th row as `(column, value)` pairs.
    pub fn named_row(&self, i: usize) -> Option<Vec<(&str, &T)>> {
        let row = self.rows.get(i)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect(),
        )
    }

    /// Project a named attribute: the function sending each row to its value in `name`.
    pub fn column(&self, name: &str) -> Result<SemifiniteFunction<T>> {
        let j = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::UnknownColumn {
                name: name.to_string(),
            })?;
        Ok(self.rows.iter().map(|row| row[j].clone()).collect())
    }
}

impl<T: Clone + Eq + Hash + Debug> FiniteSet for Tabular<T> {
    type Element = Vec<T>;

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn get(&self, i: usize) -> Option<Vec<T>> {
        self.rows.get(i).cloned()
    }

    fn position(&self, x: &Vec<T>) -> Option<usize> {
        self.rows.iter().position(|row| row == x)
    }
}

/// A variable: a placeholder for a value not yet known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrVar(pub usize);

/// An element of `T ⊎ [m]`: either a concrete value or a variable id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrVal<T> {
    Value(T),
    Var(AttrVar),
}

impl<T> AttrVal<T> {
    pub fn var(i: usize) -> Self {
        AttrVal::Var(AttrVar(i))
    }

    pub fn as_var(&self) -> Option<AttrVar> {
        match self {
            AttrVal::Var(v) => Some(*v),
            AttrVal::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            AttrVal::Value(t) => Some(t),
            AttrVal::Var(_) => None,
        }
    }
}

/// A set of `n` variables, standing in for values of type `T`.
///
/// The elements are `Var(0), …, Var(n-1)`; concrete values are not elements, but are valid
/// *images* of a [`VariableFunction`](crate::finite_function::VariableFunction) into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarSet<T> {
    vars: usize,
    _values: PhantomData<T>,
}

impl<T> VarSet<T> {
    pub fn new(vars: usize) -> Self {
        Self {
            vars,
            _values: PhantomData,
        }
    }

    pub fn vars(&self) -> usize {
        self.vars
    }
}

impl<T: Clone + Eq + Hash + Debug> FiniteSet for VarSet<T> {
    type Element = AttrVal<T>;

    fn len(&self) -> usize {
        self.vars
    }

    fn get(&self, i: usize) -> Option<AttrVal<T>> {
        (i < self.vars).then(|| AttrVal::var(i))
    }

    fn position(&self, x: &AttrVal<T>) -> Option<usize> {
        match x {
            AttrVal::Var(AttrVar(i)) if *i < self.vars => Some(*i),
            _ => None,
        }
    }
}

use super::arrow::FiniteFunction;
use crate::array::*;
use crate::category::Arrow;
use crate::error::{Error, Result};
use crate::finite_set::{AttrVal, AttrVar};

use core::fmt::Debug;

/// A function `[n] → T ⊎ [m]` sending each element either to a concrete value or to one of `m`
/// variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableFunction<T> {
    values: VecArray<AttrVal<T>>,
    vars: usize,
}

impl<T: Clone + PartialEq + Debug> VariableFunction<T> {
    /// # Errors
    ///
    /// [`Error::Codomain`] if a variable id is not less than `vars`.
    pub fn new(values: Vec<AttrVal<T>>, vars: usize) -> Result<Self> {
        for (position, x) in values.iter().enumerate() {
            if let AttrVal::Var(AttrVar(v)) = x {
                if *v >= vars {
                    return Err(Error::Codomain {
                        position,
                        value: *v,
                        size: vars,
                    });
                }
            }
        }
        Ok(Self {
            values: VecArray(values),
            vars,
        })
    }

    /// Regard `f : [n] → [m]` as sending every element to a variable.
    pub fn from_finite(f: &FiniteFunction) -> Self {
        Self {
            values: f.table().iter().map(|&v| AttrVal::var(v)).collect(),
            vars: f.target(),
        }
    }

    /// The identity `[n] → T ⊎ [n]`, sending `i` to `Var(i)`.
    pub fn identity(n: usize) -> Self {
        Self::from_finite(&FiniteFunction::identity(n))
    }

    pub fn source(&self) -> usize {
        self.values.len()
    }

    /// The number of variables in the codomain.
    pub fn vars(&self) -> usize {
        self.vars
    }

    pub fn values(&self) -> &[AttrVal<T>] {
        &self.values
    }

    pub fn apply(&self, x: usize) -> Result<&AttrVal<T>> {
        self.values.as_slice().get(x).ok_or(Error::Domain {
            element: x,
            size: self.source(),
        })
    }

    /// Kleisli composition `self ; next` for `self : [n] → T ⊎ [m]` and `next : [m] → T ⊎ [k]`.
    ///
    /// Concrete values pass straight through; variables are rewritten by `next`.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if `next` does not have source `m`.
    pub fn compose(&self, next: &VariableFunction<T>) -> Result<VariableFunction<T>> {
        if self.vars != next.source() {
            return Err(Error::TypeMismatch {
                leg: 1,
                expected: self.vars,
                found: next.source(),
            });
        }
        let values = self
            .values
            .iter()
            .map(|x| match x {
                AttrVal::Value(t) => AttrVal::Value(t.clone()),
                AttrVal::Var(AttrVar(v)) => next.values[*v].clone(),
            })
            .collect();
        Ok(VariableFunction {
            values,
            vars: next.vars,
        })
    }

    /// Reindex by a finite function `f : [p] → [n]`, giving `f ; self : [p] → T ⊎ [m]`.
    pub fn precompose(&self, f: &FiniteFunction) -> Result<VariableFunction<T>> {
        if f.target() != self.source() {
            return Err(Error::TypeMismatch {
                leg: 0,
                expected: self.source(),
                found: f.target(),
            });
        }
        Ok(VariableFunction {
            values: self.values.gather(&f.checked()?.table()),
            vars: self.vars,
        })
    }

    /// Apply `g` to every concrete value, leaving variables alone.
    pub fn map_values<U: Clone + PartialEq + Debug>(
        &self,
        g: impl Fn(&T) -> U,
    ) -> VariableFunction<U> {
        VariableFunction {
            values: self
                .values
                .iter()
                .map(|x| match x {
                    AttrVal::Value(t) => AttrVal::Value(g(t)),
                    AttrVal::Var(v) => AttrVal::Var(*v),
                })
                .collect(),
            vars: self.vars,
        }
    }

    /// The concrete values, if no element is sent to a variable.
    pub fn concrete(&self) -> Option<Vec<T>> {
        self.values
            .iter()
            .map(|x| x.as_value().cloned())
            .collect()
    }
}

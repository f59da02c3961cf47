//! # Finite set limits
//!
//! Limits and colimits of diagrams of finite sets.
//!
//! A finite set is represented by its size `n`, standing for `{0, …, n-1}`, and a function
//! between finite sets by a [FiniteFunction](crate::finite_function::FiniteFunction): a table of
//! values together with a target size. Richer sets (collections of values, tables with named
//! columns, sets of variables) are enumerated onto these integers through the
//! [FiniteSet](crate::finite_set::FiniteSet) trait.
//!
//! Limits are *multiway joins*: the limit of a cospan `f : X → Z ← Y : g` is the set of pairs
//! `(x, y)` with `f(x) = g(y)`. Colimits are *disjoint unions with identification*, computed with
//! a union-find.
//!
//! # Example
//!
//! ```rust
//! use finset_limits::prelude::*;
//!
//! // f : 3 → 2 and g : 2 → 2
//! let f = FiniteFunction::new(VecArray(vec![0, 0, 1]), 2)?;
//! let g = FiniteFunction::new(VecArray(vec![0, 1]), 2)?;
//!
//! // The pullback is {(0, 0), (1, 0), (2, 1)}
//! let pullback = limit(&Diagram::cospan(f, g)?, LimitAlgorithm::default())?;
//! assert_eq!(pullback.apex(), 3);
//!
//! // Coequalizing the identity on 3 with a constant map identifies everything
//! let id = FiniteFunction::identity(3);
//! let zero = FiniteFunction::new(VecArray(vec![0, 0, 0]), 3)?;
//! let quotient = colimit(&Diagram::parallel_pair(id, zero)?, ColimitAlgorithm::default())?;
//! assert_eq!(quotient.apex(), 1);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Algorithms
//!
//! The limit of a general diagram is reduced to a [bipartite
//! diagram](crate::diagram::BipartiteDiagram) and solved as a sequence of joins, each computed by
//! one of the algorithms in [`limits::join`], chosen with a
//! [LimitAlgorithm](crate::limits::LimitAlgorithm). Preimage indexes are built on demand and
//! cached inside each [FiniteFunction](crate::finite_function::FiniteFunction).
//!
//! Every (co)limit implements [Universal](crate::category::Universal), factoring any other
//! (co)cone over the same diagram through it.

pub mod array;
pub mod category;
pub mod error;
pub mod finite_function;
pub mod finite_set;
pub mod semifinite;
pub mod union_find;

pub mod diagram;

pub mod colimits;
pub mod limits;

pub use error::{Error, Result};

pub mod prelude {
    //! The types and entry points needed to build diagrams and compute their (co)limits.
    pub use crate::array::*;
    pub use crate::category::*;
    pub use crate::diagram::*;
    pub use crate::error::Error;
    pub use crate::finite_function::*;
    pub use crate::finite_set::*;
    pub use crate::semifinite::*;

    pub use crate::colimits::{self, colimit, Colimit, ColimitAlgorithm, VarColimit, VarDiagram};
    pub use crate::limits::{self, limit, Limit, LimitAlgorithm};
}

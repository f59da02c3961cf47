//! Errors raised while building or evaluating diagrams of finite sets.
//!
//! Every variant identifies the offending element, leg or vertex so a malformed diagram can be
//! traced back to its source.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An element was used outside the domain of a function.
    #[error("element {element} is outside the domain of size {size}")]
    Domain { element: usize, size: usize },

    /// A function value lies outside its declared codomain.
    #[error("value {value} at position {position} is outside the codomain of size {size}")]
    Codomain {
        position: usize,
        value: usize,
        size: usize,
    },

    /// A value is not an element of the set it should lie in.
    #[error("value at position {position} is not an element of the codomain")]
    NotAnElement { position: usize },

    /// Arrows which should share a source or target do not, e.g. the legs of a cospan, or
    /// `f ; g` where `cod(f) ≠ dom(g)`.
    #[error("type mismatch at leg {leg}: expected object {expected}, found {found}")]
    TypeMismatch {
        leg: usize,
        expected: usize,
        found: usize,
    },

    /// Two distinct concrete values were identified by a colimit.
    #[error("colimit identifies distinct values {first} and {second} in class {class}")]
    InconsistentColimit {
        class: usize,
        first: String,
        second: String,
    },

    /// A map that must be surjective misses an element of its codomain.
    #[error("element {element} is not in the image")]
    NotSurjective { element: usize },

    /// A map does not descend to a quotient: it disagrees on one equivalence class.
    #[error("quotient class {element} is sent to both {first} and {second}")]
    IllDefinedQuotient {
        element: usize,
        first: usize,
        second: usize,
    },

    #[error("malformed diagram at vertex {vertex}: {reason}")]
    MalformedDiagram { vertex: usize, reason: String },

    /// A cone does not factor through a limit: its legs send `element` to a tuple which is not
    /// in the limit.
    #[error("cone element {element} does not factor through the limit")]
    IncompatibleCone { element: usize },

    #[error("duplicate element at position {position}")]
    DuplicateElement { position: usize },

    #[error("no column named {name:?}")]
    UnknownColumn { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;

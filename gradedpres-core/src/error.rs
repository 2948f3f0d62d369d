//! Error types for gradedpres-core

use thiserror::Error;

use crate::field::Field;

/// Result type alias for the Segre and Veronese constructions
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the public constructions.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad user input, detected before any combinatorial work
    #[error("invalid input: {0}")]
    InputValidation(#[from] InputError),

    /// An engine contract was broken; not recoverable
    #[error("consistency violation: {what} (expected {expected}, found {found})")]
    Consistency {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Failure inside the algebra engine, passed through untouched
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// User-actionable input problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{which} ring is not a graded polynomial ring or graded quotient")]
    NotGraded { which: &'static str },

    #[error("coefficient fields differ: {left} vs {right}")]
    FieldMismatch { left: Field, right: Field },

    #[error("{which} ring generator {index} has degree {degree:?}; expected a single integer")]
    NotUnigraded {
        which: &'static str,
        index: usize,
        degree: Vec<i64>,
    },

    #[error("{which} ring generator {index} has non-positive degree {degree}")]
    NonPositiveDegree {
        which: &'static str,
        index: usize,
        degree: i64,
    },

    #[error("Veronese divisor must be a positive integer, got {0}")]
    NonPositiveDivisor(i64),

    #[error("product enumeration needs at least one element")]
    EmptyProductList,

    #[error("product enumeration target degree must be positive, got {0}")]
    NonPositiveTarget(i64),
}

/// Failures raised by an algebra engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{0} is not a prime characteristic")]
    InvalidCharacteristic(u64),

    #[error("unknown coefficient field {0:?}")]
    UnknownField(String),

    #[error("rings are defined over different fields ({0} and {1})")]
    FieldMismatch(Field, Field),

    #[error("expected {expected} {what}, got {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("element is not homogeneous")]
    NotHomogeneous,

    #[error("the zero element has no degree")]
    ZeroElement,

    #[error("relation {0} is not homogeneous for the given grading")]
    InhomogeneousRelation(usize),

    #[error("only cones cut out of the non-negative orthant are supported")]
    UnsupportedCone,

    #[error("Groebner basis computation exceeded {limit} critical pairs")]
    ResourceLimit { limit: usize },

    #[error("ring map domain and codomain do not match the operation")]
    RingMismatch,
}

// Exact commutative algebra: fields, polynomials, Groebner bases and graded rings
pub mod field;
pub mod monomial;
pub mod polynomial;
pub mod groebner;
pub mod linear_system;
pub mod ring;
pub mod cone;
pub mod parse;

// Engine seam and the presentation pipelines built on it
pub mod error;
pub mod engine;
pub mod presentation;
pub mod segre;
pub mod veronese;
mod validation;

// Public algebra API
pub use crate::field::Field;
pub use crate::polynomial::Polynomial;
pub use crate::groebner::EngineConfig;
pub use crate::linear_system::LinearSystem;
pub use crate::ring::{GradedRing, Ideal, RingElement, RingMap};
pub use crate::cone::Cone;
pub use crate::parse::{parse_polynomial, ParseError, RingDescription};

// Public presentation API
pub use crate::error::{EngineError, Error, InputError, Result};
pub use crate::engine::{AlgebraEngine, ExactEngine};
pub use crate::presentation::{Presentation, PresentationReport};
pub use crate::segre::segre_presentation;
pub use crate::veronese::{
	veronese_presentation, veronese_presentation_with, RedundancyTest, VeroneseOptions,
	VeroneseOutcome,
};

//! # Lie conformal: λ-brackets and their axioms
//!
//! This library implements Lie conformal algebras (vertex Lie algebras) given
//! by structure coefficients, together with generic tests of the axioms that
//! every algebra in the category inherits.
//!
//! ## Features
//!
//! - **Algebra**: the `LambdaBracket` element trait, divided-power monomials
//!   `T^(n) g`, sesquilinear brackets and skew-symmetric completion
//! - **Axioms**: symbolic Jacobi identity verification in `L[λ, μ]`, with
//!   the super sign rule, plus a skew-symmetry check
//! - **Category**: capability flags for the super, H-graded, finitely
//!   generated and with-basis variants
//! - **Config**: JSON descriptions of algebras and checker options

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Elements, brackets and structure-coefficient algebras
pub mod algebra;

/// Axiom tests (Jacobi identity, skew-symmetry)
pub mod axioms;

/// Capabilities and category naming
pub mod category;

/// Utility functions and helpers
pub mod utils;

// Re-export commonly used types
pub use algebra::{
    AlgebraSpec, ConformalElement, LambdaBracket, LieConformalAlgebra, Monomial, Parity,
    StructureCoefficientAlgebra,
};
pub use axioms::{check_jacobi, jacobiator, AxiomError, JacobiOptions, Jacobiator};
pub use category::{Capabilities, LieConformalCategory};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum LcaError {
    /// The parity of a non-homogeneous element was requested
    #[error("element {0} is not homogeneous")]
    NonHomogeneous(String),

    /// No elements to draw samples from
    #[error("cannot sample from an empty list of elements")]
    EmptySample,

    /// A name that is not a generator of the algebra
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    /// The same name was declared twice
    #[error("duplicate generator: {0}")]
    DuplicateGenerator(String),

    /// Two distinct values were given for the same bracket
    #[error("two distinct values given for [{0}_λ {1}], skew-symmetry is not satisfied")]
    InconsistentStructure(String, String),

    /// Parity or weight list does not match the generators
    #[error("{what} has {got} entries but {expected} were expected")]
    LengthMismatch {
        /// Which list was checked
        what: &'static str,
        /// Expected number of entries
        expected: usize,
        /// Number of entries given
        got: usize,
    },

    /// Parity entries must be 0 or 1
    #[error("invalid parity {0}, expected 0 or 1")]
    InvalidParity(u8),

    /// The bracket is not of degree -1 for the declared weights
    #[error("grading violation: {0}")]
    GradingViolation(String),

    /// A coefficient left the range of `Rational64`
    #[error("coefficient overflow: {0}")]
    CoefficientOverflow(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, LcaError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        algebra::{
            AlgebraSpec, ConformalElement, LambdaBracket, LieConformalAlgebra, Monomial, Parity,
            StructureCoefficientAlgebra,
        },
        axioms::{check_jacobi, check_skew_symmetry, jacobiator, AxiomError, JacobiOptions},
        category::{Capabilities, LieConformalCategory},
        LcaError, Result,
    };
}

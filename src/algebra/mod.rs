//! Lie conformal algebras given by structure coefficients

mod parity;
mod lambda_bracket;
mod coefficient;
mod element;
mod structure;
mod config;

pub use parity::Parity;
pub use lambda_bracket::{LambdaBracket, LieConformalAlgebra};
pub use element::{ConformalElement, Monomial};
pub use structure::StructureCoefficientAlgebra;
pub use config::{AlgebraSpec, BracketSpec, TermSpec};

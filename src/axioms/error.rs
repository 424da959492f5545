//! Failures of the axiom tests

use super::Jacobiator;
use crate::algebra::LambdaBracket;
use crate::LcaError;
use std::collections::BTreeMap;
use std::fmt;

/// Sampled elements together with their positions in the checked list.
///
/// When the algebra tests split non-homogeneous elements, the positions
/// refer to the elements the caller passed in.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<E> {
    /// Positions in the element list
    pub indices: Vec<usize>,
    /// The elements themselves
    pub elements: Vec<E>,
}

impl<E: fmt::Display> fmt::Display for Sample<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, ") at indices {:?}", self.indices)
    }
}

/// Error raised when an algebra fails an axiom on some sample
#[derive(Debug, thiserror::Error)]
pub enum AxiomError<E: LambdaBracket> {
    /// Nonzero jacobiator: the Jacobi identity fails for `triple`
    #[error("Jacobi identity fails on {triple}: {} != {{}}", render(.jacobiator))]
    Jacobi {
        /// The offending ordered triple `(x, y, z)`
        triple: Sample<E>,
        /// Nonzero coefficients of `λ^(j) μ^(k)`, keyed by `(j, k)`
        jacobiator: Jacobiator<E>,
    },

    /// `[a_λ b] + (-1)^{p(a)p(b)} [b_{-λ-T} a]` is nonzero
    #[error("skew-symmetry fails on {pair}: {} != {{}}", render(.defect))]
    SkewSymmetry {
        /// The offending pair `(a, b)`
        pair: Sample<E>,
        /// Nonzero coefficients of `λ^(n)`
        defect: BTreeMap<usize, E>,
    },

    /// The algebra could not provide what the test needed
    #[error(transparent)]
    Algebra(#[from] LcaError),
}

impl<E: LambdaBracket> AxiomError<E> {
    /// The jacobiator of a Jacobi failure
    pub fn jacobiator(&self) -> Option<&Jacobiator<E>> {
        match self {
            AxiomError::Jacobi { jacobiator, .. } => Some(jacobiator),
            _ => None,
        }
    }

    /// The failing tuple, if any
    pub fn sample(&self) -> Option<&Sample<E>> {
        match self {
            AxiomError::Jacobi { triple: sample, .. } | AxiomError::SkewSymmetry { pair: sample, .. } => Some(sample),
            AxiomError::Algebra(_) => None,
        }
    }

    /// Map sample positions to `origins[position]`
    pub(crate) fn reindex(mut self, origins: &[usize]) -> Self {
        if let AxiomError::Jacobi { triple: sample, .. } | AxiomError::SkewSymmetry { pair: sample, .. } = &mut self {
            for index in &mut sample.indices {
                *index = origins[*index];
            }
        }
        self
    }
}

/// Dictionary-style rendering, e.g. `{(0, 0): -3*a}`
fn render<K: fmt::Debug, V: fmt::Display>(map: &BTreeMap<K, V>) -> String {
    let entries: Vec<String> = map.iter().map(|(k, v)| format!("{:?}: {}", k, v)).collect();
    format!("{{{}}}", entries.join(", "))
}

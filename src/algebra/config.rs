//! Serializable descriptions of structure-coefficient algebras

use super::coefficient;
use super::structure::{Products, TableBuilder};
use super::{Monomial, Parity, StructureCoefficientAlgebra};
use crate::utils::{load_json, save_json};
use crate::{LcaError, Result};
use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::info;

/// One term `coefficient * T^(derivative) generator` of an n-th product
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermSpec {
    /// Generator name
    pub generator: String,
    /// Divided power of `T` applied to the generator
    #[serde(default)]
    pub derivative: usize,
    /// Coefficient, serialized as `[numerator, denominator]`
    pub coefficient: Rational64,
}

/// The n-th products `left_(n) right`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketSpec {
    /// Left generator
    pub left: String,
    /// Right generator
    pub right: String,
    /// Terms of each n-th product
    pub products: BTreeMap<usize, Vec<TermSpec>>,
}

/// Description of a Lie conformal algebra by structure coefficients.
///
/// Only one of `[a_λ b]`, `[b_λ a]` needs to be given; the other is
/// completed by skew-symmetry. Giving parities makes the algebra super.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgebraSpec {
    /// Optional descriptive name
    #[serde(default)]
    pub name: Option<String>,
    /// Names of the non-central generators
    pub names: Vec<String>,
    /// Names of central generators, which satisfy `T C = 0` and are even
    #[serde(default)]
    pub central_elements: Vec<String>,
    /// Parity (0 or 1) of each non-central generator
    #[serde(default)]
    pub parity: Option<Vec<u8>>,
    /// Conformal weight of every generator, central ones last
    #[serde(default)]
    pub weights: Option<Vec<Rational64>>,
    /// Force a super algebra even when every generator is even
    #[serde(default, rename = "super")]
    pub super_: bool,
    /// Brackets among generators
    #[serde(default)]
    pub brackets: Vec<BracketSpec>,
}

impl AlgebraSpec {
    /// Start a description with the given non-central generators
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AlgebraSpec {
            names: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the descriptive name
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Add central generators
    pub fn with_central<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.central_elements.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set generator parities; this makes the algebra super
    pub fn with_parity(mut self, parity: Vec<u8>) -> Self {
        self.parity = Some(parity);
        self
    }

    /// Set conformal weights, making the algebra H-graded
    pub fn with_weights(mut self, weights: Vec<Rational64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Make the algebra super without declaring odd generators
    pub fn super_algebra(mut self) -> Self {
        self.super_ = true;
        self
    }

    /// Append terms `(generator, derivative, coefficient)` to `left_(n) right`
    pub fn product(mut self, left: &str, right: &str, n: usize, terms: &[(&str, usize, Rational64)]) -> Self {
        let terms = terms.iter().map(|(generator, derivative, coefficient)| TermSpec {
            generator: generator.to_string(),
            derivative: *derivative,
            coefficient: *coefficient,
        });

        match self.brackets.iter_mut().find(|b| b.left == left && b.right == right) {
            Some(bracket) => bracket.products.entry(n).or_default().extend(terms),
            None => {
                let mut products = BTreeMap::new();
                products.insert(n, terms.collect());
                self.brackets.push(BracketSpec {
                    left: left.to_string(),
                    right: right.to_string(),
                    products,
                });
            }
        }
        self
    }

    /// Parse a description from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a description from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }

    /// Write the description to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(self, path)
    }

    /// Validate the description and build the algebra
    pub fn build(self) -> Result<StructureCoefficientAlgebra> {
        let ngens = self.names.len() + self.central_elements.len();
        let mut index = HashMap::new();
        let mut names = Vec::with_capacity(ngens);

        for name in self.names.iter().chain(&self.central_elements) {
            if index.insert(name.clone(), names.len()).is_some() {
                return Err(LcaError::DuplicateGenerator(name.clone()));
            }
            names.push(name.clone());
        }

        let mut central = vec![false; self.names.len()];
        central.resize(ngens, true);

        let super_ = self.super_ || self.parity.is_some();
        let mut parity = match &self.parity {
            Some(bits) => {
                if bits.len() != self.names.len() {
                    return Err(LcaError::LengthMismatch {
                        what: "parity",
                        expected: self.names.len(),
                        got: bits.len(),
                    });
                }
                bits.iter().map(|&b| Parity::from_bit(b)).collect::<Result<Vec<_>>>()?
            }
            None => vec![Parity::Even; self.names.len()],
        };
        parity.resize(ngens, Parity::Even);

        if let Some(weights) = &self.weights {
            if weights.len() != ngens {
                return Err(LcaError::LengthMismatch {
                    what: "weights",
                    expected: ngens,
                    got: weights.len(),
                });
            }
        }

        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| LcaError::UnknownGenerator(name.to_string()))
        };

        let mut builder = TableBuilder::new(names, central, parity, self.weights.clone(), super_);
        for bracket in &self.brackets {
            let a = lookup(&bracket.left)?;
            let b = lookup(&bracket.right)?;

            let mut products = Products::new();
            for (&n, terms) in &bracket.products {
                let product = products.entry(n).or_default();
                for term in terms {
                    let monomial = Monomial::new(lookup(&term.generator)?, term.derivative);
                    coefficient::add_to(product, monomial, term.coefficient)?;
                }
            }
            builder.add_bracket(a, b, products)?;
        }

        info!(
            name = self.name.as_deref().unwrap_or("<unnamed>"),
            generators = ngens,
            super_algebra = super_,
            "built Lie conformal algebra"
        );
        Ok(StructureCoefficientAlgebra::from_table(self.name, builder.finish()))
    }
}

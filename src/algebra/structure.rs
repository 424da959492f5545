//! Lie conformal algebras defined by the λ-brackets of their generators

use super::coefficient;
use super::{ConformalElement, LieConformalAlgebra, Monomial, Parity};
use crate::axioms::binomial;
use crate::category::Capabilities;
use crate::{LcaError, Result};
use num_rational::Rational64;
use num_traits::{One, Zero};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// n-th products of a pair of generators, as linear combinations of monomials
pub(crate) type Products = BTreeMap<usize, BTreeMap<Monomial, Rational64>>;

/// Shared data behind every element of one algebra
#[derive(Debug)]
pub(crate) struct StructureTable {
    /// Generator names, non-central first
    names: Vec<String>,
    central: Vec<bool>,
    parity: Vec<Parity>,
    weights: Option<Vec<Rational64>>,
    super_: bool,
    brackets: HashMap<(usize, usize), Products>,
}

impl StructureTable {
    pub(crate) fn name(&self, generator: usize) -> &str {
        &self.names[generator]
    }

    pub(crate) fn parity(&self, generator: usize) -> Parity {
        self.parity[generator]
    }

    pub(crate) fn weight(&self, generator: usize) -> Option<Rational64> {
        self.weights.as_ref().map(|w| w[generator])
    }

    pub(crate) fn is_super(&self) -> bool {
        self.super_
    }

    /// `T C = 0` for central generators
    pub(crate) fn is_basis(&self, monomial: &Monomial) -> bool {
        !self.central[monomial.generator] || monomial.order == 0
    }

    /// Bracket of two basis monomials by sesquilinearity:
    /// `[T^(m)a_λ T^(n)b] = (-λ)^(m) (λ+T)^(n) [a_λ b]`.
    ///
    /// With `[a_λ b] = Σ_k λ^(k) c_k` the coefficient of `λ^(l)` collects
    /// `(-1)^m l!/(m! i! k!) T^(n-i) c_k` over `l = m + i + k`, `i <= n`.
    pub(crate) fn bracket_monomials(&self, left: &Monomial, right: &Monomial) -> Result<Products> {
        let mut result = Products::new();
        let table = match self.brackets.get(&(left.generator, right.generator)) {
            Some(table) => table,
            None => return Ok(result),
        };

        let m = left.order;
        let n = right.order;
        let sign = Rational64::from(if m % 2 == 0 { 1 } else { -1 });

        for (&k, product) in table {
            for i in 0..=n {
                let l = m + i + k;
                let multinomial = coefficient::mul(
                    Rational64::from(binomial(l, m)?),
                    Rational64::from(binomial(l - m, k)?),
                )?;
                let coeff = coefficient::mul(sign, multinomial)?;
                let target = result.entry(l).or_default();

                for (monomial, c) in product {
                    let shift = n - i;
                    let shifted = Monomial::new(monomial.generator, monomial.order + shift);
                    if !self.is_basis(&shifted) {
                        continue;
                    }
                    let factor = Rational64::from(binomial(shifted.order, shift)?);
                    let value = coefficient::mul(coefficient::mul(coeff, factor)?, *c)?;
                    coefficient::add_to(target, shifted, value)?;
                }
            }
        }

        for product in result.values_mut() {
            product.retain(|_, c| !c.is_zero());
        }
        result.retain(|_, product| !product.is_empty());
        Ok(result)
    }
}

/// Builds a table from user-supplied brackets, completing it by
/// skew-symmetry
pub(crate) struct TableBuilder {
    table: StructureTable,
}

impl TableBuilder {
    pub(crate) fn new(
        names: Vec<String>,
        central: Vec<bool>,
        parity: Vec<Parity>,
        weights: Option<Vec<Rational64>>,
        super_: bool,
    ) -> Self {
        TableBuilder {
            table: StructureTable {
                names,
                central,
                parity,
                weights,
                super_,
                brackets: HashMap::new(),
            },
        }
    }

    fn insert(&mut self, key: (usize, usize), mut products: Products) -> Result<()> {
        for product in products.values_mut() {
            product.retain(|_, c| !c.is_zero());
        }
        products.retain(|_, product| !product.is_empty());

        if let Some(existing) = self.table.brackets.get(&key) {
            if *existing != products {
                return Err(LcaError::InconsistentStructure(
                    self.table.names[key.0].clone(),
                    self.table.names[key.1].clone(),
                ));
            }
        }
        if !products.is_empty() {
            self.table.brackets.insert(key, products);
        }
        Ok(())
    }

    /// Record `[a_λ b]` and the bracket `[b_λ a]` it determines:
    ///
    /// `b_(k) a = Σ_j -(-1)^{p(a)p(b)} (-1)^{k+j} T^(j) a_(k+j) b`
    pub(crate) fn add_bracket(&mut self, a: usize, b: usize, products: Products) -> Result<()> {
        let parsgn = -self.table.parity[a].koszul_sign(self.table.parity[b]);
        let maxpole = products.keys().max().copied().unwrap_or(0);
        let mut skew = Products::new();

        for k in 0..=maxpole {
            let mut kth = BTreeMap::new();
            for j in 0..=(maxpole - k) {
                let source = match products.get(&(k + j)) {
                    Some(source) => source,
                    None => continue,
                };
                let sign = if (k + j) % 2 == 0 { parsgn } else { -parsgn };
                for (monomial, c) in source {
                    let shifted = Monomial::new(monomial.generator, monomial.order + j);
                    if !self.table.is_basis(&shifted) {
                        continue;
                    }
                    let factor = Rational64::from(sign * binomial(shifted.order, j)?);
                    coefficient::add_to(&mut kth, shifted, coefficient::mul(factor, *c)?)?;
                }
            }
            skew.insert(k, kth);
        }

        self.insert((a, b), products)?;
        self.insert((b, a), skew)
    }

    pub(crate) fn finish(self) -> StructureTable {
        debug!(
            generators = self.table.names.len(),
            brackets = self.table.brackets.len(),
            "structure table complete"
        );
        self.table
    }
}

/// A finitely generated Lie conformal algebra with basis `{T^(n) g}`,
/// presented by the n-th products of its generators.
///
/// Construct one through [`AlgebraSpec`](super::AlgebraSpec).
#[derive(Clone, Debug)]
pub struct StructureCoefficientAlgebra {
    name: Option<String>,
    table: Arc<StructureTable>,
}

impl StructureCoefficientAlgebra {
    pub(crate) fn from_table(name: Option<String>, table: StructureTable) -> Self {
        StructureCoefficientAlgebra {
            name,
            table: Arc::new(table),
        }
    }

    /// Optional descriptive name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of generators, central ones included
    pub fn ngens(&self) -> usize {
        self.table.names.len()
    }

    /// Generators in declaration order, central ones last
    pub fn gens(&self) -> Vec<ConformalElement> {
        (0..self.ngens()).map(|g| self.monomial(Monomial::new(g, 0))).collect()
    }

    /// Generator names
    pub fn names(&self) -> &[String] {
        &self.table.names
    }

    /// Look up a generator by name
    pub fn generator(&self, name: &str) -> Result<ConformalElement> {
        let index = self.index_of(name)?;
        Ok(self.monomial(Monomial::new(index, 0)))
    }

    /// Index of a generator by name
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.table
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| LcaError::UnknownGenerator(name.to_string()))
    }

    /// Whether the generator is central
    pub fn is_central(&self, generator: usize) -> bool {
        self.table.central[generator]
    }

    /// The basis element `T^(order) g`, zero when `g` is central and
    /// `order > 0`
    pub fn monomial(&self, monomial: Monomial) -> ConformalElement {
        ConformalElement::monomial(self.table.clone(), monomial)
    }

    /// Build an element from `(monomial, coefficient)` pairs
    pub fn linear_combination<I>(&self, terms: I) -> Result<ConformalElement>
    where
        I: IntoIterator<Item = (Monomial, Rational64)>,
    {
        let mut combined = BTreeMap::new();
        for (monomial, coeff) in terms {
            coefficient::add_to(&mut combined, monomial, coeff)?;
        }
        Ok(ConformalElement::from_terms(self.table.clone(), combined))
    }

    /// Verify that the λ-bracket is of degree -1 for the declared weights:
    /// `a_(n) b ∈ L_{p + q - n - 1}` for `a ∈ L_p`, `b ∈ L_q`.
    pub fn check_grading(&self) -> Result<()> {
        let weights = match &self.table.weights {
            Some(weights) => weights,
            None => return Err(LcaError::GradingViolation("algebra has no weights".to_string())),
        };

        let mut keys: Vec<_> = self.table.brackets.keys().copied().collect();
        keys.sort();

        for (a, b) in keys {
            for (&n, product) in &self.table.brackets[&(a, b)] {
                let expected = weights[a] + weights[b] - Rational64::from(n as i64 + 1);
                for monomial in product.keys() {
                    let degree = weights[monomial.generator] + Rational64::from(monomial.order as i64);
                    if degree != expected {
                        return Err(LcaError::GradingViolation(format!(
                            "{}_({}){} has a term of weight {}, expected {}",
                            self.table.names[a], n, self.table.names[b], degree, expected
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl LieConformalAlgebra for StructureCoefficientAlgebra {
    type Element = ConformalElement;

    fn zero(&self) -> ConformalElement {
        ConformalElement::zero(self.table.clone())
    }

    /// Generators, the derivatives of the non-central ones, and sums of
    /// consecutive non-central generators
    fn some_elements(&self) -> Vec<ConformalElement> {
        let mut elements = self.gens();
        let free: Vec<usize> = (0..self.ngens()).filter(|&g| !self.is_central(g)).collect();

        for &g in &free {
            elements.push(self.monomial(Monomial::new(g, 1)));
        }
        for pair in free.windows(2) {
            let terms = pair.iter().map(|&g| (Monomial::new(g, 0), Rational64::one())).collect();
            elements.push(ConformalElement::from_terms(self.table.clone(), terms));
        }
        elements
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            super_: self.table.super_,
            graded: self.table.weights.is_some(),
            finitely_generated: true,
            with_basis: true,
        }
    }

    fn homogeneous_components(&self, element: &ConformalElement) -> Option<(ConformalElement, ConformalElement)> {
        Some((element.even_component(), element.odd_component()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{AlgebraSpec, LambdaBracket};

    fn r(n: i64) -> Rational64 {
        Rational64::from(n)
    }

    fn affine_sl2() -> StructureCoefficientAlgebra {
        AlgebraSpec::new(["e", "h", "f"])
            .with_central(["K"])
            .product("e", "f", 0, &[("h", 0, r(1))])
            .product("e", "f", 1, &[("K", 0, r(1))])
            .product("h", "e", 0, &[("e", 0, r(2))])
            .product("h", "f", 0, &[("f", 0, r(-2))])
            .product("h", "h", 1, &[("K", 0, r(2))])
            .build()
            .unwrap()
    }

    #[test]
    fn test_skew_completion() {
        let v = affine_sl2();
        let e = v.generator("e").unwrap();
        let f = v.generator("f").unwrap();
        let h = v.generator("h").unwrap();
        let k = v.generator("K").unwrap();

        // [f_λ e] = -h + λK
        let br = f.bracket(&e).unwrap();
        assert_eq!(br.len(), 2);
        assert_eq!(br[&0], h.neg().unwrap());
        assert_eq!(br[&1], k);

        // [e_λ h] = -2e
        let br = e.bracket(&h).unwrap();
        assert_eq!(br[&0], e.scale(r(-2)).unwrap());
    }

    #[test]
    fn test_central_brackets_vanish() {
        let v = affine_sl2();
        let e = v.generator("e").unwrap();
        let k = v.generator("K").unwrap();
        assert!(k.bracket(&e).unwrap().is_empty());
        assert!(e.bracket(&k).unwrap().is_empty());
    }

    #[test]
    fn test_inconsistent_structure() {
        // [a_λ a] = b is symmetric, incompatible with a being even
        let result = AlgebraSpec::new(["a", "b"])
            .product("a", "a", 0, &[("b", 0, r(1))])
            .build();
        assert!(matches!(result, Err(LcaError::InconsistentStructure(_, _))));
    }

    #[test]
    fn test_some_elements() {
        let v = affine_sl2();
        let elements = v.some_elements();

        // 4 generators, 3 derivatives, 2 consecutive sums
        assert_eq!(elements.len(), 9);
        assert_eq!(elements[0], v.generator("e").unwrap());
        let sum = v.linear_combination([(Monomial::new(0, 0), r(1)), (Monomial::new(1, 0), r(1))]).unwrap();
        assert_eq!(elements[7], sum);
    }

    #[test]
    fn test_high_order_brackets_report_overflow() {
        let v = affine_sl2();
        let e = v.monomial(Monomial::new(0, 40));
        let f = v.monomial(Monomial::new(2, 40));

        // [T^(40)e_λ T^(40)f] needs 80!/(40! 40!) > i64::MAX
        assert!(matches!(e.bracket(&f), Err(LcaError::CoefficientOverflow(_))));

        let e = v.monomial(Monomial::new(0, 2));
        let f = v.monomial(Monomial::new(2, 3));
        assert!(e.bracket(&f).is_ok());
    }

    #[test]
    fn test_capabilities() {
        let v = affine_sl2();
        assert!(v.is_finitely_generated());
        assert!(v.is_with_basis());
        assert!(!v.is_super());
        assert!(!v.is_graded());
    }

    #[test]
    fn test_check_grading() {
        let v = AlgebraSpec::new(["L", "G"])
            .with_central(["C"])
            .with_parity(vec![0, 1])
            .with_weights(vec![r(2), Rational64::new(3, 2), r(0)])
            .product("L", "L", 0, &[("L", 1, r(1))])
            .product("L", "L", 1, &[("L", 0, r(2))])
            .product("L", "L", 3, &[("C", 0, Rational64::new(1, 2))])
            .product("L", "G", 0, &[("G", 1, r(1))])
            .product("L", "G", 1, &[("G", 0, Rational64::new(3, 2))])
            .product("G", "G", 0, &[("L", 0, r(2))])
            .product("G", "G", 2, &[("C", 0, Rational64::new(2, 3))])
            .build()
            .unwrap();
        assert!(v.check_grading().is_ok());

        let bad = AlgebraSpec::new(["L"])
            .with_weights(vec![r(2)])
            .product("L", "L", 0, &[("L", 0, r(1))])
            .build()
            .unwrap();
        assert!(matches!(bad.check_grading(), Err(LcaError::GradingViolation(_))));
        assert!(affine_sl2().check_grading().is_err());
    }
}

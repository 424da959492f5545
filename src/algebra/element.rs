//! Elements as finite linear combinations of divided-power monomials

use super::coefficient;
use super::structure::StructureTable;
use super::{LambdaBracket, Parity};
use crate::axioms::binomial;
use crate::{LcaError, Result};
use num_rational::Rational64;
use num_traits::{CheckedAdd, One, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The basis monomial `T^(order) g = T^order g / order!`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Monomial {
    /// Index of the generator
    pub generator: usize,
    /// Divided power of the translation operator
    pub order: usize,
}

impl Monomial {
    /// Create a monomial
    pub fn new(generator: usize, order: usize) -> Self {
        Monomial { generator, order }
    }
}

/// An element of a [`StructureCoefficientAlgebra`](super::StructureCoefficientAlgebra)
#[derive(Clone)]
pub struct ConformalElement {
    table: Arc<StructureTable>,
    /// Coefficients for each monomial, zeros removed
    terms: BTreeMap<Monomial, Rational64>,
}

impl ConformalElement {
    pub(crate) fn zero(table: Arc<StructureTable>) -> Self {
        ConformalElement {
            table,
            terms: BTreeMap::new(),
        }
    }

    pub(crate) fn from_terms(table: Arc<StructureTable>, mut terms: BTreeMap<Monomial, Rational64>) -> Self {
        terms.retain(|monomial, coeff| !coeff.is_zero() && table.is_basis(monomial));
        ConformalElement { table, terms }
    }

    pub(crate) fn monomial(table: Arc<StructureTable>, monomial: Monomial) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(monomial, Rational64::one());
        Self::from_terms(table, terms)
    }

    /// Get coefficient of a monomial
    pub fn coefficient(&self, monomial: &Monomial) -> Rational64 {
        self.terms.get(monomial).cloned().unwrap_or_else(Rational64::zero)
    }

    /// Get all non-zero terms
    pub fn terms(&self) -> &BTreeMap<Monomial, Rational64> {
        &self.terms
    }

    /// Check if this is a single monomial with coefficient 1
    pub fn is_monomial(&self) -> bool {
        self.terms.len() == 1 && self.terms.values().all(|c| c.is_one())
    }

    /// The ordinary derivative `T^n`, applied one `T` at a time
    pub fn derivative(&self, n: usize) -> Result<ConformalElement> {
        let mut result = self.clone();
        for _ in 0..n {
            if result.is_zero() {
                break;
            }
            result = result.translate(1)?;
        }
        Ok(result)
    }

    /// Terms supported on even generators
    pub fn even_component(&self) -> ConformalElement {
        self.filter_parity(Parity::Even)
    }

    /// Terms supported on odd generators
    pub fn odd_component(&self) -> ConformalElement {
        self.filter_parity(Parity::Odd)
    }

    fn filter_parity(&self, parity: Parity) -> ConformalElement {
        let terms = self
            .terms
            .iter()
            .filter(|(m, _)| self.table.parity(m.generator) == parity)
            .map(|(m, c)| (*m, *c))
            .collect();
        ConformalElement::from_terms(self.table.clone(), terms)
    }

    /// Conformal weight, when the algebra is H-graded and the element is
    /// homogeneous for the grading. `T` raises the weight by one.
    pub fn degree(&self) -> Option<Rational64> {
        let mut degrees = self
            .terms
            .keys()
            .map(|m| {
                let order = Rational64::from(i64::try_from(m.order).ok()?);
                self.table.weight(m.generator)?.checked_add(&order)
            });
        let first = degrees.next()??;
        for degree in degrees {
            if degree? != first {
                return None;
            }
        }
        Some(first)
    }

    fn fmt_monomial(&self, monomial: &Monomial, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.table.name(monomial.generator);
        match monomial.order {
            0 => write!(f, "{}", name),
            1 => write!(f, "T{}", name),
            n => write!(f, "T^({}){}", n, name),
        }
    }

    fn fmt_term(&self, monomial: &Monomial, coeff: Rational64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if coeff == -Rational64::one() {
            write!(f, "-")?;
        } else if !coeff.is_one() {
            write!(f, "{}*", coeff)?;
        }
        self.fmt_monomial(monomial, f)
    }
}

impl LambdaBracket for ConformalElement {
    fn bracket(&self, other: &Self) -> Result<BTreeMap<usize, Self>> {
        let mut products: BTreeMap<usize, BTreeMap<Monomial, Rational64>> = BTreeMap::new();

        for (left, c1) in &self.terms {
            for (right, c2) in &other.terms {
                let c = coefficient::mul(*c1, *c2)?;
                for (n, product) in self.table.bracket_monomials(left, right)? {
                    let target = products.entry(n).or_default();
                    for (monomial, coeff) in product {
                        coefficient::add_to(target, monomial, coefficient::mul(c, coeff)?)?;
                    }
                }
            }
        }

        Ok(products
            .into_iter()
            .map(|(n, terms)| (n, ConformalElement::from_terms(self.table.clone(), terms)))
            .filter(|(_, v)| !v.is_zero())
            .collect())
    }

    fn parity(&self) -> Result<Parity> {
        if !self.table.is_super() {
            return Ok(Parity::Even);
        }

        let mut parities = self.terms.keys().map(|m| self.table.parity(m.generator));
        let first = match parities.next() {
            Some(p) => p,
            None => return Ok(Parity::Even),
        };
        if parities.all(|p| p == first) {
            Ok(first)
        } else {
            Err(LcaError::NonHomogeneous(self.to_string()))
        }
    }

    fn add(&self, other: &Self) -> Result<Self> {
        let mut terms = self.terms.clone();

        for (monomial, coeff) in &other.terms {
            coefficient::add_to(&mut terms, *monomial, *coeff)?;
        }

        Ok(ConformalElement::from_terms(self.table.clone(), terms))
    }

    fn scale(&self, scalar: Rational64) -> Result<Self> {
        let terms = self
            .terms
            .iter()
            .map(|(m, c)| Ok((*m, coefficient::mul(*c, scalar)?)))
            .collect::<Result<_>>()?;
        Ok(ConformalElement::from_terms(self.table.clone(), terms))
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    fn translate(&self, n: usize) -> Result<Self> {
        if n == 0 {
            return Ok(self.clone());
        }

        // T^(n) T^(k) g = C(k+n, n) T^(k+n) g
        let mut terms = BTreeMap::new();
        for (monomial, coeff) in &self.terms {
            let shifted = Monomial::new(monomial.generator, monomial.order + n);
            if !self.table.is_basis(&shifted) {
                continue;
            }
            let factor = Rational64::from(binomial(shifted.order, n)?);
            coefficient::add_to(&mut terms, shifted, coefficient::mul(*coeff, factor)?)?;
        }

        Ok(ConformalElement::from_terms(self.table.clone(), terms))
    }
}

impl PartialEq for ConformalElement {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl fmt::Display for ConformalElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }

        for (i, (monomial, coeff)) in self.terms.iter().enumerate() {
            if i == 0 {
                self.fmt_term(monomial, *coeff, f)?;
            } else if coeff.is_negative() {
                write!(f, " - ")?;
                self.fmt_term(monomial, -coeff, f)?;
            } else {
                write!(f, " + ")?;
                self.fmt_term(monomial, *coeff, f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ConformalElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConformalElement({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{AlgebraSpec, LieConformalAlgebra};

    fn virasoro() -> crate::StructureCoefficientAlgebra {
        AlgebraSpec::new(["L"])
            .with_central(["C"])
            .product("L", "L", 0, &[("L", 1, Rational64::from(1))])
            .product("L", "L", 1, &[("L", 0, Rational64::from(2))])
            .product("L", "L", 3, &[("C", 0, Rational64::new(1, 2))])
            .with_weights(vec![Rational64::from(2), Rational64::from(0)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_display() {
        let vir = virasoro();
        let l = vir.generator("L").unwrap();
        let c = vir.generator("C").unwrap();

        let x = l
            .translate(1)
            .unwrap()
            .add(&l.scale(Rational64::from(2)).unwrap())
            .unwrap()
            .add(&c.scale(Rational64::new(1, 12)).unwrap())
            .unwrap();
        assert_eq!(x.to_string(), "2*L + TL + 1/12*C");
        assert_eq!(l.translate(2).unwrap().neg().unwrap().to_string(), "-T^(2)L");
        assert_eq!(vir.zero().to_string(), "0");
    }

    #[test]
    fn test_translation_kills_central() {
        let vir = virasoro();
        let c = vir.generator("C").unwrap();
        assert!(c.translate(1).unwrap().is_zero());
        assert!(c.derivative(3).unwrap().is_zero());
    }

    #[test]
    fn test_derivative_uses_divided_powers() {
        let vir = virasoro();
        let l = vir.generator("L").unwrap();

        // T(T L) = 2 T^(2) L
        let tt = l.derivative(1).unwrap().derivative(1).unwrap();
        assert_eq!(tt.coefficient(&Monomial::new(0, 2)), Rational64::from(2));
        assert_eq!(tt, l.derivative(2).unwrap());
    }

    #[test]
    fn test_large_derivatives() {
        let vir = virasoro();
        let l = vir.generator("L").unwrap();

        // T^20 L = 20! T^(20) L still fits, T^21 L does not
        let d20 = l.derivative(20).unwrap();
        assert_eq!(d20.coefficient(&Monomial::new(0, 20)), Rational64::from(2432902008176640000));
        assert!(matches!(l.derivative(21), Err(LcaError::CoefficientOverflow(_))));

        // Divided powers stay small
        assert!(l.translate(25).unwrap().is_monomial());
    }

    #[test]
    fn test_translate_reports_overflow() {
        let vir = virasoro();

        // T^(33) T^(33) L = C(66, 33) T^(66) L
        let t33 = vir.monomial(Monomial::new(0, 33)).translate(33).unwrap();
        assert_eq!(t33.coefficient(&Monomial::new(0, 66)), Rational64::from(7219428434016265740));
        assert!(!t33.to_string().starts_with('-'));

        // C(70, 35) does not fit
        let t35 = vir.monomial(Monomial::new(0, 35));
        assert!(matches!(t35.translate(35), Err(LcaError::CoefficientOverflow(_))));
        assert!(matches!(t33.scale(Rational64::from(2)), Err(LcaError::CoefficientOverflow(_))));
    }

    #[test]
    fn test_sesquilinearity() {
        let vir = virasoro();
        let l = vir.generator("L").unwrap();
        let c = vir.generator("C").unwrap();
        let tl = l.translate(1).unwrap();
        let scaled = |x: &ConformalElement, n: i64| x.scale(Rational64::from(n)).unwrap();

        // [TL_λ L] = -λ [L_λ L] = -λ TL - 2λ^2 L - λ^4/12 C
        let br = tl.bracket(&l).unwrap();
        assert_eq!(br.len(), 3);
        assert_eq!(br[&1], tl.neg().unwrap());
        assert_eq!(br[&2], scaled(&l, -4));
        assert_eq!(br[&4], scaled(&c, -2));

        // [L_λ TL] = (λ + T) [L_λ L]
        let br = l.bracket(&tl).unwrap();
        assert_eq!(br[&0], scaled(&l.translate(2).unwrap(), 2));
        assert_eq!(br[&1], scaled(&tl, 3));
        assert_eq!(br[&2], scaled(&l, 4));
        assert_eq!(br[&4], scaled(&c, 2));
    }

    #[test]
    fn test_degree() {
        let vir = virasoro();
        let l = vir.generator("L").unwrap();
        let c = vir.generator("C").unwrap();

        assert_eq!(l.translate(1).unwrap().degree(), Some(Rational64::from(3)));
        assert_eq!(c.degree(), Some(Rational64::from(0)));
        assert_eq!(l.add(&c).unwrap().degree(), None);
        assert_eq!(vir.zero().degree(), None);
    }
}

//! Element and parent traits shared by every Lie conformal algebra

use super::Parity;
use crate::axioms::{self, AxiomError, JacobiOptions};
use crate::category::{Capabilities, LieConformalCategory, RATIONAL_FIELD};
use crate::Result;
use num_rational::Rational64;
use std::collections::BTreeMap;
use std::fmt;

/// An element of a Lie conformal algebra.
///
/// The λ-bracket is `[a_λ b] = Σ_n λ^n/n! a_(n) b`; `bracket` returns the
/// n-th products `a_(n) b` keyed by `n`, leaving out the ones that vanish.
/// Arithmetic is exact: a coefficient that does not fit is reported as
/// [`LcaError::CoefficientOverflow`](crate::LcaError::CoefficientOverflow).
pub trait LambdaBracket: Clone + fmt::Debug + fmt::Display + PartialEq + Send + Sync + 'static {
    /// The n-th products of `self` with `other`
    fn bracket(&self, other: &Self) -> Result<BTreeMap<usize, Self>>;

    /// Parity of this element.
    ///
    /// Every Lie conformal algebra can be seen as a purely even one, so this
    /// returns `Even` unless a super algebra overrides it.
    fn parity(&self) -> Result<Parity> {
        Ok(Parity::Even)
    }

    /// Sum of two elements
    fn add(&self, other: &Self) -> Result<Self>;

    /// Scalar multiplication
    fn scale(&self, scalar: Rational64) -> Result<Self>;

    /// Check if element is zero
    fn is_zero(&self) -> bool;

    /// Divided-power translation `T^(n) = T^n / n!`
    fn translate(&self, n: usize) -> Result<Self>;

    /// Additive inverse
    fn neg(&self) -> Result<Self> {
        self.scale(Rational64::from(-1))
    }

    /// Difference of two elements
    fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.neg()?)
    }
}

/// A Lie conformal algebra, the parent of its elements.
///
/// Category membership is expressed by [`Capabilities`], fixed when the
/// algebra is constructed.
pub trait LieConformalAlgebra: Sync {
    /// Element type
    type Element: LambdaBracket;

    /// The zero element
    fn zero(&self) -> Self::Element;

    /// Elements used by the axiom tests when none are given
    fn some_elements(&self) -> Vec<Self::Element>;

    /// Axioms satisfied by this algebra
    fn capabilities(&self) -> Capabilities;

    /// Even and odd components of an element, when the algebra has a
    /// preferred basis of homogeneous elements
    fn homogeneous_components(&self, _element: &Self::Element) -> Option<(Self::Element, Self::Element)> {
        None
    }

    /// The category of this algebra
    fn category(&self) -> LieConformalCategory {
        LieConformalCategory::new(RATIONAL_FIELD).with_capabilities(self.capabilities())
    }

    /// Whether this is a super Lie conformal algebra
    fn is_super(&self) -> bool {
        self.capabilities().super_
    }

    /// Whether this algebra is H-graded
    fn is_graded(&self) -> bool {
        self.capabilities().graded
    }

    /// Whether this algebra is finitely generated as an `R[T]`-module
    fn is_finitely_generated(&self) -> bool {
        self.capabilities().finitely_generated
    }

    /// Whether this algebra has a preferred basis
    fn is_with_basis(&self) -> bool {
        self.capabilities().with_basis
    }

    /// Test the Jacobi identity on `some_elements`
    fn test_jacobi(&self, options: &JacobiOptions) -> std::result::Result<(), AxiomError<Self::Element>>
    where
        Self: Sized,
    {
        axioms::test_jacobi(self, None, options)
    }

    /// Test the Jacobi identity on the given elements
    fn test_jacobi_on(
        &self,
        elements: &[Self::Element],
        options: &JacobiOptions,
    ) -> std::result::Result<(), AxiomError<Self::Element>>
    where
        Self: Sized,
    {
        axioms::test_jacobi(self, Some(elements), options)
    }

    /// Test skew-symmetry on `some_elements`
    fn test_skew_symmetry(&self, options: &JacobiOptions) -> std::result::Result<(), AxiomError<Self::Element>>
    where
        Self: Sized,
    {
        axioms::test_skew_symmetry(self, None, options)
    }
}

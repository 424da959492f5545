//! The category of Lie conformal algebras and its variants.
//!
//! Subcategories are described by axioms (finitely generated, with basis)
//! and by the functorial constructions `Graded` and `Super`, which commute.
//! Here every variant is a value: a base ring plus a set of capability
//! flags, so `graded().super_()` and `super_().graded()` are equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The base ring of every algebra built by this crate
pub const RATIONAL_FIELD: &str = "Rational Field";

/// Axioms satisfied by a Lie conformal algebra
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    /// ℤ/2ℤ-graded, with the super sign rule in the axioms
    #[serde(rename = "super")]
    pub super_: bool,
    /// H-graded: the λ-bracket has degree -1
    pub graded: bool,
    /// Finitely generated as an `R[T]`-module
    pub finitely_generated: bool,
    /// Has a preferred basis as an `R`-module
    pub with_basis: bool,
}

impl Capabilities {
    /// Check if every axiom of `other` holds here too
    pub fn implies(&self, other: &Capabilities) -> bool {
        (self.super_ || !other.super_)
            && (self.graded || !other.graded)
            && (self.finitely_generated || !other.finitely_generated)
            && (self.with_basis || !other.with_basis)
    }
}

/// A category of Lie conformal algebras over a commutative ring
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LieConformalCategory {
    base_ring: String,
    capabilities: Capabilities,
}

impl LieConformalCategory {
    /// The base category over `base_ring`
    pub fn new(base_ring: &str) -> Self {
        LieConformalCategory {
            base_ring: base_ring.to_string(),
            capabilities: Capabilities::default(),
        }
    }

    /// Name of the base ring
    pub fn base_ring(&self) -> &str {
        &self.base_ring
    }

    /// Axioms of this category
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Replace all axioms at once
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Super Lie conformal algebras
    pub fn super_(mut self) -> Self {
        self.capabilities.super_ = true;
        self
    }

    /// H-graded Lie conformal algebras
    pub fn graded(mut self) -> Self {
        self.capabilities.graded = true;
        self
    }

    /// Finitely generated Lie conformal algebras
    pub fn finitely_generated(mut self) -> Self {
        self.capabilities.finitely_generated = true;
        self
    }

    /// Lie conformal algebras with basis
    pub fn with_basis(mut self) -> Self {
        self.capabilities.with_basis = true;
        self
    }

    /// The category obtained by dropping one axiom, in the order with
    /// basis, finitely generated, graded, super. `None` for the base
    /// category, whose super category (modules over the base ring) is not
    /// modelled here.
    pub fn super_category(&self) -> Option<LieConformalCategory> {
        let mut caps = self.capabilities;
        if caps.with_basis {
            caps.with_basis = false;
        } else if caps.finitely_generated {
            caps.finitely_generated = false;
        } else if caps.graded {
            caps.graded = false;
        } else if caps.super_ {
            caps.super_ = false;
        } else {
            return None;
        }
        Some(self.clone().with_capabilities(caps))
    }

    /// Every category reached by repeatedly taking `super_category`,
    /// starting with this one
    pub fn all_super_categories(&self) -> Vec<LieConformalCategory> {
        let mut result = vec![self.clone()];
        while let Some(next) = result.last().and_then(|c| c.super_category()) {
            result.push(next);
        }
        result
    }

    /// Check if this is a subcategory of `other`
    pub fn is_subcategory(&self, other: &LieConformalCategory) -> bool {
        self.base_ring == other.base_ring && self.capabilities.implies(&other.capabilities)
    }

    /// Name of the objects, e.g. "H-graded super Lie conformal algebras
    /// over Rational Field"
    pub fn object_names(&self) -> String {
        let caps = &self.capabilities;
        let mut name = String::new();
        if caps.finitely_generated {
            name.push_str("finitely generated ");
        }
        if caps.graded {
            name.push_str("H-graded ");
        }
        if caps.super_ {
            name.push_str("super ");
        }
        name.push_str("Lie conformal algebras");
        if caps.with_basis {
            name.push_str(" with basis");
        }
        format!("{} over {}", name, self.base_ring)
    }
}

impl fmt::Display for LieConformalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category of {}", self.object_names())
    }
}

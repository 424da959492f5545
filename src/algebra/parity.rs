//! ℤ/2ℤ grading of super Lie conformal algebras

use crate::{LcaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parity of a homogeneous element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Parity {
    /// Even (bosonic)
    #[default]
    Even,
    /// Odd (fermionic)
    Odd,
}

impl Parity {
    /// Parse the `0`/`1` convention used in algebra descriptions
    pub fn from_bit(bit: u8) -> Result<Self> {
        match bit {
            0 => Ok(Parity::Even),
            1 => Ok(Parity::Odd),
            other => Err(LcaError::InvalidParity(other)),
        }
    }

    /// `0` for even, `1` for odd
    pub fn bit(self) -> u8 {
        match self {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }

    /// Check if odd
    pub fn is_odd(self) -> bool {
        self == Parity::Odd
    }

    /// `(-1)^{p(a)p(b)}`
    pub fn koszul_sign(self, other: Parity) -> i64 {
        if self.is_odd() && other.is_odd() {
            -1
        } else {
            1
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_koszul_sign() {
        assert_eq!(Parity::Odd.koszul_sign(Parity::Odd), -1);
        assert_eq!(Parity::Odd.koszul_sign(Parity::Even), 1);
        assert_eq!(Parity::Even.koszul_sign(Parity::Even), 1);
    }

    #[test]
    fn test_from_bit() {
        assert_eq!(Parity::from_bit(1).unwrap(), Parity::Odd);
        assert!(matches!(Parity::from_bit(2), Err(LcaError::InvalidParity(2))));
    }
}

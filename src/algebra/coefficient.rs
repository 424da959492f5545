//! Overflow-checked arithmetic on `Rational64` coefficients

use crate::{LcaError, Result};
use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedMul, Zero};
use std::collections::BTreeMap;

pub(crate) fn mul(a: Rational64, b: Rational64) -> Result<Rational64> {
    a.checked_mul(&b)
        .ok_or_else(|| LcaError::CoefficientOverflow(format!("{} * {}", a, b)))
}

/// `terms[key] += value`
pub(crate) fn add_to<K: Ord>(terms: &mut BTreeMap<K, Rational64>, key: K, value: Rational64) -> Result<()> {
    let entry = terms.entry(key).or_insert_with(Rational64::zero);
    let sum = entry
        .checked_add(&value)
        .ok_or_else(|| LcaError::CoefficientOverflow(format!("{} + {}", entry, value)))?;
    *entry = sum;
    Ok(())
}

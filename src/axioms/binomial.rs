//! Binomial coefficients and the re-expansion of `(λ+μ)^(j)`

use crate::{LcaError, Result};
use once_cell::sync::Lazy;
use std::sync::Mutex;

/// Memoized rows of Pascal's triangle; `None` marks entries beyond `i64`
static PASCAL: Lazy<Mutex<Vec<Vec<Option<i64>>>>> = Lazy::new(|| Mutex::new(vec![vec![Some(1)]]));

/// Binomial coefficient `C(n, k)`, zero when `k > n`.
///
/// Fails with `CoefficientOverflow` when the value does not fit in an `i64`.
pub fn binomial(n: usize, k: usize) -> Result<i64> {
    if k > n {
        return Ok(0);
    }

    let mut rows = PASCAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    while rows.len() <= n {
        let prev = &rows[rows.len() - 1];
        let mut row = Vec::with_capacity(prev.len() + 1);
        row.push(Some(1));
        for pair in prev.windows(2) {
            row.push(match (pair[0], pair[1]) {
                (Some(a), Some(b)) => a.checked_add(b),
                _ => None,
            });
        }
        row.push(Some(1));
        rows.push(row);
    }
    rows[n][k].ok_or_else(|| LcaError::CoefficientOverflow(format!("C({}, {})", n, k)))
}

/// Targets of the term `λ^(k) (λ+μ)^(j)` expanded in divided powers:
/// `Σ_r C(k+r, r) λ^(k+r) μ^(j-r)` for `r ∈ [0, j]`.
///
/// Returns `((λ-exponent, μ-exponent), factor)` pairs.
pub fn redistribute(k: usize, j: usize) -> Result<Vec<((usize, usize), i64)>> {
    (0..=j)
        .map(|r| Ok(((k + r, j - r), binomial(k + r, r)?)))
        .collect()
}

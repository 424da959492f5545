//! Skew-symmetry: `[a_λ b] = -(-1)^{p(a)p(b)} [b_{-λ-T} a]`

use super::{some_tuples, AxiomError, JacobiOptions, Sample};
use crate::algebra::LambdaBracket;
use crate::{LcaError, Result};
use num_rational::Rational64;
use std::collections::BTreeMap;
use tracing::info;

/// The nonzero coefficients of `λ^(i)` in
/// `[a_λ b] + (-1)^{p(a)p(b)} [b_{-λ-T} a]`.
///
/// `[b_{-λ-T} a] = Σ_k (-1)^k Σ_{i<=k} λ^(i) T^(k-i) b_(k) a`.
pub fn skew_defect<E: LambdaBracket>(a: &E, b: &E, signed: bool) -> Result<BTreeMap<usize, E>> {
    let sign = if signed {
        a.parity()?.koszul_sign(b.parity()?)
    } else {
        1
    };

    let mut defect = a.bracket(b)?;
    for (k, v) in b.bracket(a)? {
        let factor = if k % 2 == 0 { sign } else { -sign };
        for i in 0..=k {
            let term = v.translate(k - i)?.scale(Rational64::from(factor))?;
            let sum = match defect.get(&i) {
                Some(existing) => existing.add(&term)?,
                None => term,
            };
            defect.insert(i, sum);
        }
    }

    defect.retain(|_, v| !v.is_zero());
    Ok(defect)
}

/// Check skew-symmetry on ordered pairs drawn from `elements`
pub fn check_skew_symmetry<E: LambdaBracket>(
    elements: &[E],
    signed: bool,
    options: &JacobiOptions,
) -> std::result::Result<(), AxiomError<E>> {
    if elements.is_empty() {
        return Err(LcaError::EmptySample.into());
    }

    let pairs = some_tuples(elements, 2, options.max_runs, options.max_samples, options.seed);
    info!(pairs = pairs.len(), signed, "checking skew-symmetry");

    for indices in &pairs {
        let (a, b) = (&elements[indices[0]], &elements[indices[1]]);
        let defect = skew_defect(a, b, signed)?;
        if !defect.is_empty() {
            return Err(AxiomError::SkewSymmetry {
                pair: Sample {
                    indices: indices.clone(),
                    elements: vec![a.clone(), b.clone()],
                },
                defect,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{AlgebraSpec, LieConformalAlgebra};

    #[test]
    fn test_virasoro_is_skew_symmetric() {
        let vir = AlgebraSpec::new(["L"])
            .with_central(["C"])
            .product("L", "L", 0, &[("L", 1, Rational64::from(1))])
            .product("L", "L", 1, &[("L", 0, Rational64::from(2))])
            .product("L", "L", 3, &[("C", 0, Rational64::new(1, 2))])
            .build()
            .unwrap();

        assert!(vir.test_skew_symmetry(&JacobiOptions::default()).is_ok());
    }

    #[test]
    fn test_odd_generators_need_the_sign() {
        let fermion = AlgebraSpec::new(["psi"])
            .with_central(["K"])
            .with_parity(vec![1])
            .product("psi", "psi", 0, &[("K", 0, Rational64::from(1))])
            .build()
            .unwrap();
        let psi = fermion.generator("psi").unwrap();
        let k = fermion.generator("K").unwrap();

        assert!(skew_defect(&psi, &psi, true).unwrap().is_empty());

        let defect = skew_defect(&psi, &psi, false).unwrap();
        assert_eq!(defect[&0], k.scale(Rational64::from(2)).unwrap());

        let err = check_skew_symmetry(&[psi], false, &JacobiOptions::default()).unwrap_err();
        assert!(matches!(err, AxiomError::SkewSymmetry { .. }));
    }
}

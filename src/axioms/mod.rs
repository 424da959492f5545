//! Generic tests of the Lie conformal algebra axioms

mod binomial;
mod error;
mod jacobi;
mod options;
mod sampling;
mod skew;

pub use binomial::{binomial, redistribute};
pub use error::{AxiomError, Sample};
pub use jacobi::{check_jacobi, jacobiator, Jacobiator};
pub use options::JacobiOptions;
pub use sampling::some_tuples;
pub use skew::{check_skew_symmetry, skew_defect};

use crate::algebra::{LambdaBracket, LieConformalAlgebra};
use crate::utils::timing::Timer;
use tracing::warn;

/// Replace each non-homogeneous element by its even and odd components when
/// the algebra has a basis. Elements that cannot be split are kept.
///
/// Every entry carries the position of the element it came from.
pub fn homogeneous_sample<A: LieConformalAlgebra>(algebra: &A, elements: &[A::Element]) -> Vec<(usize, A::Element)> {
    let mut sample = Vec::with_capacity(elements.len());

    for (origin, element) in elements.iter().enumerate() {
        if element.parity().is_err() {
            if algebra.is_with_basis() {
                if let Some((even, odd)) = algebra.homogeneous_components(element) {
                    warn!(%element, "splitting non-homogeneous element into even and odd components");
                    sample.push((origin, even));
                    sample.push((origin, odd));
                    continue;
                }
            }
            warn!(%element, "keeping non-homogeneous element");
        }
        sample.push((origin, element.clone()));
    }

    sample
}

/// Run `check` on the sample the sign rule needs, reporting failures at
/// positions in `elements`
fn run_check<A, F>(
    algebra: &A,
    elements: Vec<A::Element>,
    signed: bool,
    check: F,
) -> Result<(), AxiomError<A::Element>>
where
    A: LieConformalAlgebra,
    F: FnOnce(&[A::Element]) -> Result<(), AxiomError<A::Element>>,
{
    if !signed {
        return check(&elements);
    }

    let (origins, sample): (Vec<usize>, Vec<A::Element>) = homogeneous_sample(algebra, &elements).into_iter().unzip();
    check(&sample).map_err(|err| err.reindex(&origins))
}

/// Jacobi identity on `elements`, or on `some_elements` when `None`.
///
/// The super sign rule applies when the algebra is super, unless
/// `options.signed` overrides it.
pub fn test_jacobi<A: LieConformalAlgebra>(
    algebra: &A,
    elements: Option<&[A::Element]>,
    options: &JacobiOptions,
) -> Result<(), AxiomError<A::Element>> {
    let _timer = Timer::new("test_jacobi");
    let signed = options.signed.unwrap_or_else(|| algebra.is_super());

    let elements = match elements {
        Some(elements) => elements.to_vec(),
        None => algebra.some_elements(),
    };
    run_check(algebra, elements, signed, |sample| check_jacobi(sample, signed, options))
}

/// Skew-symmetry on `elements`, or on `some_elements` when `None`
pub fn test_skew_symmetry<A: LieConformalAlgebra>(
    algebra: &A,
    elements: Option<&[A::Element]>,
    options: &JacobiOptions,
) -> Result<(), AxiomError<A::Element>> {
    let _timer = Timer::new("test_skew_symmetry");
    let signed = options.signed.unwrap_or_else(|| algebra.is_super());

    let elements = match elements {
        Some(elements) => elements.to_vec(),
        None => algebra.some_elements(),
    };
    run_check(algebra, elements, signed, |sample| check_skew_symmetry(sample, signed, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{AlgebraSpec, StructureCoefficientAlgebra};
    use num_rational::Rational64;

    /// [a_λ a] = b, [b_λ a] = a with a odd and b even
    fn wrong() -> StructureCoefficientAlgebra {
        AlgebraSpec::new(["a", "b"])
            .with_parity(vec![1, 0])
            .product("a", "a", 0, &[("b", 0, Rational64::from(1))])
            .product("b", "a", 0, &[("a", 0, Rational64::from(1))])
            .build()
            .unwrap()
    }

    #[test]
    fn test_split_components_remember_their_origin() {
        let v = wrong();
        let a = v.generator("a").unwrap();
        let b = v.generator("b").unwrap();
        let mixed = a.add(&b).unwrap();

        let sample = homogeneous_sample(&v, &[b.clone(), mixed]);
        assert_eq!(sample, vec![(0, b.clone()), (1, b), (1, a)]);
    }

    #[test]
    fn test_failures_cite_caller_indices() {
        let v = wrong();
        let a = v.generator("a").unwrap();
        let b = v.generator("b").unwrap();
        let elements = vec![b.clone(), a.add(&b).unwrap()];

        // (b, a, a) is the first failing triple; a is the odd part of
        // elements[1]
        let err = v.test_jacobi_on(&elements, &JacobiOptions::default()).unwrap_err();
        let triple = err.sample().unwrap();
        assert_eq!(triple.indices, vec![0, 1, 1]);
        assert_eq!(triple.elements, vec![b.clone(), a.clone(), a]);
        assert_eq!(err.jacobiator().unwrap()[&(0, 0)], b.scale(Rational64::from(-2)).unwrap());

        let err = v.test_jacobi_on(&elements, &JacobiOptions::default().parallel()).unwrap_err();
        assert_eq!(err.sample().unwrap().indices, vec![0, 1, 1]);
    }
}

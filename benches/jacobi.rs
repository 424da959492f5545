use criterion::{criterion_group, criterion_main, Criterion};
use lie_conformal::prelude::*;
use num_rational::Rational64;

fn neveu_schwarz() -> StructureCoefficientAlgebra {
    AlgebraSpec::new(["L", "G"])
        .with_central(["C"])
        .with_parity(vec![0, 1])
        .product("L", "L", 0, &[("L", 1, Rational64::from(1))])
        .product("L", "L", 1, &[("L", 0, Rational64::from(2))])
        .product("L", "L", 3, &[("C", 0, Rational64::new(1, 2))])
        .product("L", "G", 0, &[("G", 1, Rational64::from(1))])
        .product("L", "G", 1, &[("G", 0, Rational64::new(3, 2))])
        .product("G", "G", 0, &[("L", 0, Rational64::from(2))])
        .product("G", "G", 2, &[("C", 0, Rational64::new(2, 3))])
        .build()
        .expect("valid structure coefficients")
}

fn bench_jacobi(c: &mut Criterion) {
    let ns = neveu_schwarz();
    let sequential = JacobiOptions::default();
    let parallel = JacobiOptions::default().parallel();

    c.bench_function("neveu_schwarz_jacobi", |b| {
        b.iter(|| ns.test_jacobi(&sequential).is_ok())
    });
    c.bench_function("neveu_schwarz_jacobi_parallel", |b| {
        b.iter(|| ns.test_jacobi(&parallel).is_ok())
    });
}

criterion_group!(benches, bench_jacobi);
criterion_main!(benches);

//! Basic example: the Virasoro and Neveu-Schwarz Lie conformal algebras

use lie_conformal::prelude::*;
use lie_conformal::utils::timing::Timer;
use num_rational::Rational64;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Virasoro Lie Conformal Algebra ===\n");

    let vir = AlgebraSpec::new(["L"])
        .named("Virasoro")
        .with_central(["C"])
        .with_weights(vec![Rational64::from(2), Rational64::from(0)])
        .product("L", "L", 0, &[("L", 1, Rational64::from(1))])
        .product("L", "L", 1, &[("L", 0, Rational64::from(2))])
        .product("L", "L", 3, &[("C", 0, Rational64::new(1, 2))])
        .build()?;

    println!("{}", vir.category());

    let l = vir.generator("L")?;
    println!("\n--- λ-brackets ---");
    for (x, y) in [(l.clone(), l.clone()), (l.translate(1)?, l.clone())] {
        for (n, product) in x.bracket(&y)? {
            println!("  {}_({}){} = {}", x, n, y, product);
        }
    }

    println!("\n--- Axioms ---");
    {
        let _timer = Timer::new("Virasoro axioms");
        vir.test_jacobi(&JacobiOptions::default())?;
        vir.test_skew_symmetry(&JacobiOptions::default())?;
        vir.check_grading()?;
        println!("Jacobi identity, skew-symmetry and grading hold");
    }

    println!("\n=== Neveu-Schwarz Super Algebra ===\n");

    let ns = AlgebraSpec::new(["L", "G"])
        .named("Neveu-Schwarz")
        .with_central(["C"])
        .with_parity(vec![0, 1])
        .product("L", "L", 0, &[("L", 1, Rational64::from(1))])
        .product("L", "L", 1, &[("L", 0, Rational64::from(2))])
        .product("L", "L", 3, &[("C", 0, Rational64::new(1, 2))])
        .product("L", "G", 0, &[("G", 1, Rational64::from(1))])
        .product("L", "G", 1, &[("G", 0, Rational64::new(3, 2))])
        .product("G", "G", 0, &[("L", 0, Rational64::from(2))])
        .product("G", "G", 2, &[("C", 0, Rational64::new(2, 3))])
        .build()?;

    println!("{}", ns.category());

    let options = JacobiOptions::sampled(100, 2019).parallel();
    ns.test_jacobi(&options)?;
    println!("Jacobi identity holds on 100 random triples");

    // Forgetting the super sign breaks the identity
    match ns.test_jacobi(&JacobiOptions::default().with_signed(false)) {
        Err(err) => println!("Without the sign rule: {}", err),
        Ok(()) => println!("Without the sign rule the identity still holds"),
    }

    Ok(())
}

//! Compare simulated and theoretical extinction frequencies of Galton–Watson trees

use stochastic_graphs::prelude::*;
use stochastic_graphs::{extinction_probability, BranchingRegime};

fn main() {
    let trials = 2000;
    let max_generations = 12;
    let mut rng = seeded(7);

    println!("=== Galton–Watson extinction, {} trials ===\n", trials);

    for &lambda in &[0.5, 0.9, 1.0, 1.2, 1.5, 2.0] {
        let model = GaltonWatson::new(lambda, max_generations).unwrap();
        let extinct = (0..trials)
            .filter(|_| model.generate(&mut rng).is_extinct())
            .count();

        println!(
            "λ = {:.1}  simulated {:.3}  theory {:.3}  {}",
            lambda,
            extinct as f64 / trials as f64,
            extinction_probability(lambda),
            BranchingRegime::from_lambda(lambda)
        );
    }
}

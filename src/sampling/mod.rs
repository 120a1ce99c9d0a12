//! Randomness interface and shared parameter checks
//!
//! Generators never reach for a global RNG. They take a [`RandomSource`],
//! which every [`rand::Rng`] already is, so the usual call site looks like
//!
//! ```
//! use stochastic_graphs::{generate_erdos_renyi, seeded};
//!
//! let mut rng = seeded(42);
//! let graph = generate_erdos_renyi(10, 0.3, &mut rng).unwrap();
//! assert_eq!(graph.node_count(), 10);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

use crate::{GraphGenError, Result};

/// Validated Poisson(λ) offspring law
///
/// Built once per model. λ = 0 carries no distribution and always yields zero
/// offspring without consuming randomness.
#[derive(Clone, Debug)]
pub struct PoissonOffspring {
    lambda: f64,
    dist: Option<Poisson<f64>>,
}

impl PoissonOffspring {
    /// Check λ and prepare the distribution
    pub fn new(lambda: f64) -> Result<Self> {
        let lambda = check_rate("Poisson parameter lambda", lambda)?;
        let dist = if lambda > 0.0 {
            let dist = Poisson::new(lambda).map_err(|e| {
                GraphGenError::InvalidParameter(format!(
                    "Poisson parameter lambda {} rejected: {}",
                    lambda, e
                ))
            })?;
            Some(dist)
        } else {
            None
        };
        Ok(PoissonOffspring { lambda, dist })
    }

    /// Mean offspring count
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl PartialEq for PoissonOffspring {
    fn eq(&self, other: &Self) -> bool {
        self.lambda == other.lambda
    }
}

/// Source of the two kinds of draws the generators consume
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// Next offspring count drawn from `law`
    fn poisson(&mut self, law: &PoissonOffspring) -> u64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn poisson(&mut self, law: &PoissonOffspring) -> u64 {
        match &law.dist {
            Some(dist) => {
                let draw: f64 = dist.sample(self);
                draw as u64
            }
            None => 0,
        }
    }
}

/// Deterministic generator for reproducible samples
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Number of unordered vertex pairs on `n` vertices, `n(n-1)/2`, saturating at `usize::MAX`
pub fn pair_count(n: usize) -> usize {
    if n < 2 {
        0
    } else if n % 2 == 0 {
        (n / 2).saturating_mul(n - 1)
    } else {
        n.saturating_mul((n - 1) / 2)
    }
}

/// Accept `value` if it is a probability in `[0, 1]`
pub fn check_probability(name: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GraphGenError::InvalidParameter(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )))
    }
}

/// Accept `value` if it is a finite, non-negative rate
pub fn check_rate(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GraphGenError::InvalidParameter(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )))
    }
}

/// Accept `value` if it is finite and strictly positive
pub fn check_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GraphGenError::InvalidParameter(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_range() {
        let mut rng = seeded(7);
        for _ in 0..1000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = seeded(11);
        let mut b = seeded(11);
        let xs: Vec<f64> = (0..20).map(|_| a.uniform()).collect();
        let ys: Vec<f64> = (0..20).map(|_| b.uniform()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_poisson_zero_rate() {
        let mut rng = seeded(3);
        let mut reference = seeded(3);
        let law = PoissonOffspring::new(0.0).unwrap();
        assert_eq!(rng.poisson(&law), 0);
        // no randomness consumed
        assert_eq!(rng.uniform(), reference.uniform());
    }

    #[test]
    fn test_poisson_mean() {
        let mut rng = seeded(5);
        let samples = 20_000;
        let law = PoissonOffspring::new(3.0).unwrap();
        let total: u64 = (0..samples).map(|_| rng.poisson(&law)).sum();
        let mean = total as f64 / samples as f64;
        assert!((mean - 3.0).abs() < 0.1, "mean = {}", mean);
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(5), 10);
        assert_eq!(pair_count(6), 15);
        assert_eq!(pair_count(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_offspring_law_rejects_bad_rates() {
        for lambda in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                PoissonOffspring::new(lambda),
                Err(GraphGenError::InvalidParameter(_))
            ));
        }
        assert_eq!(PoissonOffspring::new(1.5).unwrap().lambda(), 1.5);
    }

    #[test]
    fn test_parameter_checks() {
        assert!(check_probability("p", 0.0).is_ok());
        assert!(check_probability("p", 1.0).is_ok());
        assert!(check_probability("p", 1.5).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
        assert!(check_rate("lambda", 0.0).is_ok());
        assert!(check_rate("lambda", -0.1).is_err());
        assert!(check_rate("lambda", f64::INFINITY).is_err());
        assert!(check_positive("k", 0.0).is_err());
    }
}

//! Galton–Watson branching trees with Poisson(λ) offspring
//!
//! Each individual of generation `t` independently has a Poisson(λ) number of
//! children in generation `t + 1`. The simulation stops at the first empty
//! generation (extinction) or once `max_generations` generations have been
//! produced (truncation).
//!
//! There is no cap on population size. With a large λ the tree grows roughly
//! like λᵗ, and bounding that is left to the caller through `max_generations`.

use std::fmt;
use tracing::{debug, trace};

use super::Tree;
use crate::sampling::{PoissonOffspring, RandomSource};
use crate::Result;

/// Why the simulation stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// `generation` came out empty
    Extinct {
        /// Index of the first empty generation
        generation: usize,
    },
    /// The generation bound was reached with individuals still alive
    Truncated,
}

/// A sampled tree and how its process ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchingOutcome {
    tree: Tree,
    termination: Termination,
    generation_sizes: Vec<usize>,
}

impl BranchingOutcome {
    /// The sampled tree
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Take ownership of the tree
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Termination status
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Whether the process died out before the bound
    pub fn is_extinct(&self) -> bool {
        matches!(self.termination, Termination::Extinct { .. })
    }

    /// Whether the bound stopped the process
    pub fn is_truncated(&self) -> bool {
        self.termination == Termination::Truncated
    }

    /// Population of every generation produced, starting with the root's 1
    ///
    /// On extinction the final entry is the empty generation's 0.
    pub fn generation_sizes(&self) -> &[usize] {
        &self.generation_sizes
    }

    /// Index of the deepest non-empty generation
    pub fn final_generation(&self) -> usize {
        self.tree.height()
    }

    /// Number of individuals ever born, root included
    pub fn total_population(&self) -> usize {
        self.tree.size()
    }
}

/// Criticality of a Galton–Watson process, set by the mean offspring λ
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchingRegime {
    /// λ < 1
    Subcritical,
    /// λ = 1
    Critical,
    /// λ > 1
    Supercritical,
}

impl BranchingRegime {
    /// Classify a mean offspring count
    pub fn from_lambda(lambda: f64) -> Self {
        if lambda < 1.0 {
            BranchingRegime::Subcritical
        } else if lambda > 1.0 {
            BranchingRegime::Supercritical
        } else {
            BranchingRegime::Critical
        }
    }

    /// One-line description for terminal output
    pub fn description(&self) -> &'static str {
        match self {
            BranchingRegime::Subcritical => "Subcritical (certain extinction)",
            BranchingRegime::Critical => "Critical (certain extinction, slow decay)",
            BranchingRegime::Supercritical => "Supercritical (possible survival)",
        }
    }
}

impl fmt::Display for BranchingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Probability that a Poisson(λ) Galton–Watson process eventually dies out
///
/// The smallest root in `[0, 1]` of `s = exp(λ(s - 1))`. Newton's method from
/// `s = 0` climbs to it monotonically because the map is convex.
pub fn extinction_probability(lambda: f64) -> f64 {
    if lambda <= 1.0 {
        return 1.0;
    }

    let mut s = 0.0_f64;
    for _ in 0..200 {
        let e = (lambda * (s - 1.0)).exp();
        let f = e - s;
        let df = lambda * e - 1.0;
        let next = s - f / df;
        if !next.is_finite() {
            break;
        }
        if (next - s).abs() < 1e-15 {
            s = next;
            break;
        }
        s = next;
    }
    s.clamp(0.0, 1.0)
}

/// Validated Galton–Watson parameters
#[derive(Clone, Debug, PartialEq)]
pub struct GaltonWatson {
    offspring: PoissonOffspring,
    max_generations: usize,
}

impl GaltonWatson {
    /// Check λ and build the model
    pub fn new(lambda: f64, max_generations: usize) -> Result<Self> {
        Ok(GaltonWatson {
            offspring: PoissonOffspring::new(lambda)?,
            max_generations,
        })
    }

    /// Mean offspring per individual
    pub fn lambda(&self) -> f64 {
        self.offspring.lambda()
    }

    /// Offspring law shared by every individual
    pub fn offspring(&self) -> &PoissonOffspring {
        &self.offspring
    }

    /// Generation bound
    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    /// Criticality of the process
    pub fn regime(&self) -> BranchingRegime {
        BranchingRegime::from_lambda(self.lambda())
    }

    /// Eventual extinction probability, ignoring the generation bound
    pub fn extinction_probability(&self) -> f64 {
        extinction_probability(self.lambda())
    }

    /// Mean population of generation `t`, λᵗ
    pub fn expected_generation_size(&self, generation: usize) -> f64 {
        let exponent = i32::try_from(generation).unwrap_or(i32::MAX);
        self.lambda().powi(exponent)
    }

    /// Sample one tree
    ///
    /// Generations are built in order; within a generation parents draw their
    /// offspring counts in id order, so a seeded source reproduces the tree.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> BranchingOutcome {
        let mut tree = Tree::new();
        let mut current = vec![tree.root()];
        let mut generation_sizes = vec![1];
        let mut termination = Termination::Truncated;

        for generation in 1..=self.max_generations {
            let mut next = Vec::new();
            for &parent in &current {
                let offspring = rng.poisson(&self.offspring);
                for _ in 0..offspring {
                    next.push(tree.add_child(parent));
                }
            }

            trace!(generation, size = next.len(), "generation produced");
            generation_sizes.push(next.len());

            if next.is_empty() {
                termination = Termination::Extinct { generation };
                break;
            }
            current = next;
        }

        debug!(
            lambda = self.lambda(),
            max_generations = self.max_generations,
            population = tree.size(),
            ?termination,
            "sampled Galton–Watson tree"
        );

        BranchingOutcome {
            tree,
            termination,
            generation_sizes,
        }
    }
}

/// Sample a Galton–Watson tree, failing before any draw if λ is negative or not finite
pub fn generate_galton_watson<R: RandomSource + ?Sized>(
    lambda: f64,
    max_generations: usize,
    rng: &mut R,
) -> Result<BranchingOutcome> {
    Ok(GaltonWatson::new(lambda, max_generations)?.generate(rng))
}

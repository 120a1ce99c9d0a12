//! # Stochastic Graphs: Erdős–Rényi graphs and Galton–Watson trees
//!
//! This library samples the two classical random structures of
//! introductory probability on graphs: the G(n, p) random graph and the
//! branching tree of a Galton–Watson process with Poisson offspring.
//!
//! ## Features
//!
//! - **Random graphs**: G(n, p) sampling, components, degree statistics
//! - **Branching trees**: Poisson(λ) Galton–Watson trees with extinction/truncation status
//! - **Layouts**: circular, spring and radial positions for drawing
//! - **Visualization**: SVG rendering with `plotters` (feature `viz`)
//!
//! Every generator takes its randomness as an explicit [`RandomSource`], so a
//! seeded [`rand::rngs::StdRng`] reproduces a sample exactly.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Randomness interface and shared parameter checks
pub mod sampling;

/// Undirected graphs and the G(n, p) generator
pub mod graph;

/// Rooted trees and the Galton–Watson generator
pub mod tree;

/// Node placement for drawing graphs and trees
pub mod layout;

/// Plot styling configuration
pub mod style;

/// SVG rendering of graphs and trees
#[cfg(feature = "viz")]
pub mod viz;

// Re-export commonly used types
pub use graph::{generate_erdos_renyi, ConnectivityRegime, ErdosRenyi, Graph};
pub use sampling::{seeded, PoissonOffspring, RandomSource};
pub use style::PlotStyle;
pub use tree::{
    extinction_probability, generate_galton_watson, BranchingOutcome, BranchingRegime,
    GaltonWatson, Termination, Tree,
};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum GraphGenError {
    /// A generator or layout parameter is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Drawing backend failure
    #[error("Render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, GraphGenError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        graph::{generate_erdos_renyi, ErdosRenyi, Graph},
        layout::{circular, radial, spring, Point, SpringParams},
        sampling::{seeded, PoissonOffspring, RandomSource},
        style::PlotStyle,
        tree::{generate_galton_watson, BranchingOutcome, GaltonWatson, Termination, Tree},
        GraphGenError, Result,
    };
}

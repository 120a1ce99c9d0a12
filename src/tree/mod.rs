//! Rooted trees and the Galton–Watson generator

mod rooted;
mod galton_watson;

pub use rooted::Tree;
pub use galton_watson::{
    extinction_probability, generate_galton_watson, BranchingOutcome, BranchingRegime,
    GaltonWatson, Termination,
};

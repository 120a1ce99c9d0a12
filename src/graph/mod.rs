//! Undirected graphs and the Erdős–Rényi generator

mod undirected;
mod erdos_renyi;

pub use undirected::Graph;
pub use erdos_renyi::{generate_erdos_renyi, ConnectivityRegime, ErdosRenyi};

//! Erdős–Rényi G(n, p) random graphs

use std::fmt;
use tracing::debug;

use super::Graph;
use crate::sampling::{check_probability, RandomSource};
use crate::Result;

/// Where a G(n, p) sample sits relative to the giant-component threshold `p = 1/n`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectivityRegime {
    /// `p < 0.5 / n`: only small clusters are expected
    Sparse,
    /// Within a factor two of `1/n`
    Critical,
    /// `p > 2 / n`: large clusters are likely
    Dense,
}

impl ConnectivityRegime {
    /// One-line description for terminal output
    pub fn description(&self) -> &'static str {
        match self {
            ConnectivityRegime::Sparse => "only small clusters are expected",
            ConnectivityRegime::Critical => {
                "near the critical point (interesting fluctuations)"
            }
            ConnectivityRegime::Dense => {
                "edges are dense enough that large clusters are likely"
            }
        }
    }
}

impl fmt::Display for ConnectivityRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Validated G(n, p) parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErdosRenyi {
    n: usize,
    p: f64,
}

impl ErdosRenyi {
    /// Check `p` and build the model
    pub fn new(n: usize, p: f64) -> Result<Self> {
        let p = check_probability("Edge probability", p)?;
        Ok(ErdosRenyi { n, p })
    }

    /// Number of vertices
    pub fn nodes(&self) -> usize {
        self.n
    }

    /// Edge inclusion probability
    pub fn probability(&self) -> f64 {
        self.p
    }

    /// Sample one graph
    ///
    /// Pairs are visited in lexicographic order `(0,1), (0,2), .., (n-2,n-1)`
    /// and each consumes exactly one uniform draw, including when `p` is 0 or 1.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Graph {
        let mut graph = Graph::new(self.n);

        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if rng.uniform() < self.p {
                    graph.push_edge(i, j);
                }
            }
        }

        debug!(
            n = self.n,
            p = self.p,
            edges = graph.edge_count(),
            "sampled G(n, p)"
        );
        graph
    }

    /// Mean edge count, `p * n(n-1)/2`
    pub fn expected_edges(&self) -> f64 {
        let n = self.n as f64;
        self.p * n * (n - 1.0).max(0.0) / 2.0
    }

    /// Mean vertex degree, `(n-1) p`
    pub fn expected_degree(&self) -> f64 {
        self.n.saturating_sub(1) as f64 * self.p
    }

    /// Giant-component threshold `1/n`
    pub fn critical_probability(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            1.0 / self.n as f64
        }
    }

    /// Classify `p` against the threshold
    pub fn regime(&self) -> ConnectivityRegime {
        let critical = self.critical_probability();
        if self.p > 2.0 * critical {
            ConnectivityRegime::Dense
        } else if self.p < 0.5 * critical {
            ConnectivityRegime::Sparse
        } else {
            ConnectivityRegime::Critical
        }
    }
}

/// Sample G(n, p), failing before any draw if `p` is not in `[0, 1]`
pub fn generate_erdos_renyi<R: RandomSource + ?Sized>(
    n: usize,
    p: f64,
    rng: &mut R,
) -> Result<Graph> {
    Ok(ErdosRenyi::new(n, p)?.generate(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{seeded, PoissonOffspring};
    use crate::GraphGenError;

    /// Counts draws and replays a fixed sequence of uniforms
    struct Scripted {
        values: Vec<f64>,
        draws: usize,
    }

    impl RandomSource for Scripted {
        fn uniform(&mut self) -> f64 {
            let value = self.values[self.draws % self.values.len()];
            self.draws += 1;
            value
        }

        fn poisson(&mut self, _law: &PoissonOffspring) -> u64 {
            self.draws += 1;
            0
        }
    }

    #[test]
    fn test_complete_graph() {
        let mut rng = seeded(1);
        let graph = generate_erdos_renyi(5, 1.0, &mut rng).unwrap();
        assert_eq!(graph.nodes(), 0..5);
        assert_eq!(graph.edge_count(), 10);
        for i in 0..5 {
            for j in (i + 1)..5 {
                assert!(graph.has_edge(i, j));
            }
        }
    }

    #[test]
    fn test_edgeless_graph() {
        let mut rng = seeded(1);
        let graph = generate_erdos_renyi(3, 0.0, &mut rng).unwrap();
        assert_eq!(graph.nodes(), 0..3);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_one_draw_per_pair_in_order() {
        // pairs: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
        let mut rng = Scripted {
            values: vec![0.1, 0.9, 0.1, 0.9, 0.9, 0.1],
            draws: 0,
        };
        let graph = generate_erdos_renyi(4, 0.5, &mut rng).unwrap();
        assert_eq!(rng.draws, 6);
        assert_eq!(graph.edges(), &[(0, 1), (0, 3), (2, 3)]);
    }

    #[test]
    fn test_degenerate_probabilities_still_draw() {
        for p in [0.0, 1.0] {
            let mut rng = Scripted { values: vec![0.5], draws: 0 };
            generate_erdos_renyi(6, p, &mut rng).unwrap();
            assert_eq!(rng.draws, 15);
        }
    }

    #[test]
    fn test_small_n() {
        let mut rng = seeded(9);
        assert_eq!(generate_erdos_renyi(0, 0.5, &mut rng).unwrap().node_count(), 0);
        let single = generate_erdos_renyi(1, 1.0, &mut rng).unwrap();
        assert_eq!(single.node_count(), 1);
        assert_eq!(single.edge_count(), 0);
    }

    #[test]
    fn test_invalid_probability_consumes_nothing() {
        let mut rng = Scripted { values: vec![0.5], draws: 0 };
        for p in [-0.1, 1.1, f64::NAN] {
            let err = generate_erdos_renyi(4, p, &mut rng).unwrap_err();
            assert!(matches!(err, GraphGenError::InvalidParameter(_)));
        }
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = generate_erdos_renyi(40, 0.1, &mut seeded(2024)).unwrap();
        let b = generate_erdos_renyi(40, 0.1, &mut seeded(2024)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_expected_edges_for_huge_n() {
        assert_eq!(ErdosRenyi::new(5, 1.0).unwrap().expected_edges(), 10.0);
        assert_eq!(ErdosRenyi::new(0, 1.0).unwrap().expected_edges(), 0.0);

        let expected = ErdosRenyi::new(5_000_000_000, 0.5).unwrap().expected_edges();
        assert!(expected.is_finite());
        assert!((expected / 6.25e18 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_regime() {
        let model = ErdosRenyi::new(100, 0.05).unwrap();
        assert_eq!(model.critical_probability(), 0.01);
        assert!((model.expected_degree() - 4.95).abs() < 1e-12);
        assert_eq!(model.regime(), ConnectivityRegime::Dense);
        assert_eq!(ErdosRenyi::new(100, 0.001).unwrap().regime(), ConnectivityRegime::Sparse);
        assert_eq!(ErdosRenyi::new(100, 0.01).unwrap().regime(), ConnectivityRegime::Critical);
    }
}

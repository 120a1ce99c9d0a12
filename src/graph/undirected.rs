//! Simple undirected graph on labeled vertices

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use std::collections::BTreeMap;
use std::ops::Range;

use crate::{GraphGenError, Result};

/// A simple undirected graph on vertices `0..n`
///
/// - No self-loops, no duplicate edges
/// - Edges are stored normalized as `(i, j)` with `i < j`, in insertion order
/// - The vertex count is fixed at construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    /// Number of vertices
    n_nodes: usize,
    /// Edge list, each pair once
    edges: Vec<(usize, usize)>,
    /// Adjacency list: adjacency[v] holds the neighbours of v
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Create an edgeless graph on `n_nodes` vertices
    pub fn new(n_nodes: usize) -> Self {
        Graph {
            n_nodes,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); n_nodes],
        }
    }

    /// Build a graph from an edge list, skipping self-loops and repeated pairs
    pub fn from_edges<I>(n_nodes: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Graph::new(n_nodes);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Add the undirected edge `{u, v}`
    ///
    /// Returns `Ok(false)` when the edge is a self-loop or already present.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<bool> {
        if u >= self.n_nodes || v >= self.n_nodes {
            return Err(GraphGenError::InvalidParameter(format!(
                "Edge ({}, {}) out of bounds for {} vertices",
                u, v, self.n_nodes
            )));
        }
        if u == v || self.has_edge(u, v) {
            return Ok(false);
        }
        self.push_edge(u.min(v), u.max(v));
        Ok(true)
    }

    /// Append an edge known to be new, with `i < j < n`
    pub(crate) fn push_edge(&mut self, i: usize, j: usize) {
        debug_assert!(i < j && j < self.n_nodes);
        self.edges.push((i, j));
        self.adjacency[i].push(j);
        self.adjacency[j].push(i);
    }

    /// Number of vertices
    pub fn node_count(&self) -> usize {
        self.n_nodes
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertex identifiers
    pub fn nodes(&self) -> Range<usize> {
        0..self.n_nodes
    }

    /// All edges as `(i, j)` with `i < j`
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Neighbours of a vertex
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Degree of a vertex
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Whether `{u, v}` is an edge
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        match self.adjacency.get(u) {
            Some(neighbors) => neighbors.contains(&v),
            None => false,
        }
    }

    /// Vertices with no incident edge
    pub fn isolated_vertices(&self) -> Vec<usize> {
        self.nodes().filter(|&v| self.degree(v) == 0).collect()
    }

    /// Map from degree to number of vertices with that degree
    pub fn degree_histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for v in self.nodes() {
            *histogram.entry(self.degree(v)).or_insert(0) += 1;
        }
        histogram
    }

    /// Average vertex degree, `2m / n`
    pub fn mean_degree(&self) -> f64 {
        if self.n_nodes == 0 {
            0.0
        } else {
            2.0 * self.edges.len() as f64 / self.n_nodes as f64
        }
    }

    /// Fraction of possible edges present
    pub fn density(&self) -> f64 {
        let pairs = crate::sampling::pair_count(self.n_nodes);
        if pairs == 0 {
            0.0
        } else {
            self.edges.len() as f64 / pairs as f64
        }
    }

    /// Connected components, each sorted, largest first
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut uf = UnionFind::<usize>::new(self.n_nodes);
        for &(u, v) in &self.edges {
            uf.union(u, v);
        }

        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (node, label) in uf.into_labeling().into_iter().enumerate() {
            groups.entry(label).or_default().push(node);
        }

        let mut components: Vec<Vec<usize>> = groups.into_values().collect();
        components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));
        components
    }

    /// Size of the largest connected component (0 for the empty graph)
    pub fn largest_component_size(&self) -> usize {
        self.connected_components()
            .first()
            .map(|c| c.len())
            .unwrap_or(0)
    }

    /// Number of connected components
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.to_petgraph())
    }

    /// Convert to a `petgraph` undirected graph with matching node indices
    pub fn to_petgraph(&self) -> UnGraph<(), ()> {
        let mut graph = UnGraph::with_capacity(self.n_nodes, self.edges.len());
        let indices: Vec<NodeIndex> = (0..self.n_nodes).map(|_| graph.add_node(())).collect();
        for &(u, v) in &self.edges {
            graph.add_edge(indices[u], indices[v], ());
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Graph {
        Graph::from_edges(n, (1..n).map(|v| (v - 1, v))).unwrap()
    }

    #[test]
    fn test_add_edge_rejects_loops_and_duplicates() {
        let mut graph = Graph::new(3);
        assert!(graph.add_edge(0, 1).unwrap());
        assert!(!graph.add_edge(1, 0).unwrap());
        assert!(!graph.add_edge(2, 2).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges(), &[(0, 1)]);
        assert!(graph.add_edge(0, 3).is_err());
    }

    #[test]
    fn test_degrees() {
        let graph = path(4);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.neighbors(1), &[0usize, 2]);
        assert_eq!(graph.mean_degree(), 1.5);

        let histogram = graph.degree_histogram();
        assert_eq!(histogram.get(&1), Some(&2));
        assert_eq!(histogram.get(&2), Some(&2));
    }

    #[test]
    fn test_components() {
        let graph = Graph::from_edges(6, vec![(0, 1), (1, 2), (4, 5)]).unwrap();
        let components = graph.connected_components();
        assert_eq!(components, vec![vec![0, 1, 2], vec![4, 5], vec![3]]);
        assert_eq!(graph.component_count(), 3);
        assert_eq!(graph.largest_component_size(), 3);
        assert_eq!(graph.isolated_vertices(), vec![3]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new(0);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.largest_component_size(), 0);
        assert_eq!(graph.component_count(), 0);
        assert_eq!(graph.density(), 0.0);
    }

    #[test]
    fn test_petgraph_conversion() {
        let graph = path(5);
        let pg = graph.to_petgraph();
        assert_eq!(pg.node_count(), 5);
        assert_eq!(pg.edge_count(), 4);
    }
}

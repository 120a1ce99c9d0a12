//! Rooted tree stored as a flat arena

use std::fmt;
use std::ops::Range;

/// A rooted tree represented as an arena of nodes
///
/// - Node 0 is always the root, at generation 0
/// - Nodes are only ever created as children of existing nodes, so ids grow
///   with generation and the structure is acyclic by construction
/// - The parent link is a plain index, the child lists are the only ownership
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Tree {
    /// children[i] contains indices of node i's children, in birth order
    children: Vec<Vec<usize>>,
    /// parents[i] is None only for the root
    parents: Vec<Option<usize>>,
    /// generations[i] is the distance from the root
    generations: Vec<usize>,
}

impl Tree {
    /// Create a new tree with a single root node
    pub fn new() -> Self {
        Tree {
            children: vec![Vec::new()],
            parents: vec![None],
            generations: vec![0],
        }
    }

    /// Attach a new leaf under `parent` and return its id
    pub(crate) fn add_child(&mut self, parent: usize) -> usize {
        let child = self.children.len();
        let generation = self.generations[parent] + 1;
        self.children.push(Vec::new());
        self.parents.push(Some(parent));
        self.generations.push(generation);
        self.children[parent].push(child);
        child
    }

    /// Id of the root
    pub fn root(&self) -> usize {
        0
    }

    /// Get the number of nodes
    pub fn size(&self) -> usize {
        self.children.len()
    }

    /// Node ids in creation order
    pub fn nodes(&self) -> Range<usize> {
        0..self.size()
    }

    /// Get children of a node
    pub fn children(&self, node: usize) -> &[usize] {
        &self.children[node]
    }

    /// Parent of a node (None for root)
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents[node]
    }

    /// Generation index of a node
    pub fn generation(&self, node: usize) -> usize {
        self.generations[node]
    }

    /// Deepest generation present
    pub fn height(&self) -> usize {
        self.generations.iter().copied().max().unwrap_or(0)
    }

    /// Parent-child pairs, ordered by child id
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(child, parent)| parent.map(|p| (p, child)))
            .collect()
    }

    /// Population of each generation from the root to the deepest one
    pub fn generation_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.height() + 1];
        for &g in &self.generations {
            sizes[g] += 1;
        }
        sizes
    }

    /// Leaves in depth-first order, children visited in birth order
    pub fn leaves_depth_first(&self) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            let children = &self.children[node];
            if children.is_empty() {
                leaves.push(node);
            } else {
                stack.extend(children.iter().rev());
            }
        }
        leaves
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tree(size={}, height={})", self.size(), self.height())?;
        let mut stack = vec![(self.root(), 0)];
        while let Some((node, indent)) = stack.pop() {
            for _ in 0..indent {
                write!(f, "  ")?;
            }
            writeln!(f, "● {}", node)?;
            stack.extend(self.children[node].iter().rev().map(|&c| (c, indent + 1)));
        }
        Ok(())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

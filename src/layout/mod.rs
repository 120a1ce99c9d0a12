//! Node placement for drawing graphs and trees
//!
//! Positions live in a square roughly `[-1, 1]²` and are indexed by vertex
//! or node id.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::graph::Graph;
use crate::sampling::{check_positive, check_rate, RandomSource};
use crate::tree::Tree;
use crate::Result;

/// Minimum separation used when computing forces
const MIN_DISTANCE: f64 = 0.01;

/// A position in the plane
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Point at `radius` along `angle` (radians) from the origin
    pub fn polar(radius: f64, angle: f64) -> Self {
        Point {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// Distance from the origin
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Place `n` vertices evenly on a circle, vertex 0 on the positive x-axis
pub fn circular(n: usize, radius: f64) -> Vec<Point> {
    (0..n)
        .map(|i| Point::polar(radius, TAU * i as f64 / n as f64))
        .collect()
}

/// Parameters of the force-directed layout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Number of force/update rounds
    pub iterations: usize,
    /// Spring constant, the natural edge length
    pub k: f64,
    /// Starting temperature, cooled linearly to 0
    pub initial_temp: f64,
}

impl SpringParams {
    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        check_positive("Spring constant", self.k)?;
        check_rate("Initial temperature", self.initial_temp)?;
        Ok(())
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        SpringParams {
            iterations: 50,
            k: 1.0,
            initial_temp: 1.0,
        }
    }
}

/// Force-directed layout
///
/// Vertices start uniformly in `[-1, 1]²`. Every round, each pair repels with
/// magnitude `k²/d²` and each edge attracts with magnitude `d/k`; vertices
/// then move by the net force scaled by `0.1 · temp`.
pub fn spring<R: RandomSource + ?Sized>(
    graph: &Graph,
    params: &SpringParams,
    rng: &mut R,
) -> Result<Vec<Point>> {
    params.validate()?;
    let n = graph.node_count();

    let mut positions: Vec<Point> = (0..n)
        .map(|_| {
            let x = 2.0 * rng.uniform() - 1.0;
            let y = 2.0 * rng.uniform() - 1.0;
            Point::new(x, y)
        })
        .collect();

    let k = params.k;
    for iteration in 0..params.iterations {
        let temp = params.initial_temp * (1.0 - iteration as f64 / params.iterations as f64);
        let mut forces = vec![(0.0_f64, 0.0_f64); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let dist = dx.hypot(dy).max(MIN_DISTANCE);
                let force = k * k / (dist * dist);
                let (fx, fy) = (force * dx / dist, force * dy / dist);
                forces[i].0 += fx;
                forces[i].1 += fy;
                forces[j].0 -= fx;
                forces[j].1 -= fy;
            }
        }

        for &(u, v) in graph.edges() {
            let dx = positions[u].x - positions[v].x;
            let dy = positions[u].y - positions[v].y;
            let dist = dx.hypot(dy).max(MIN_DISTANCE);
            let force = dist / k;
            let (fx, fy) = (force * dx / dist, force * dy / dist);
            forces[u].0 -= fx;
            forces[u].1 -= fy;
            forces[v].0 += fx;
            forces[v].1 += fy;
        }

        let step = 0.1 * temp;
        for (position, (fx, fy)) in positions.iter_mut().zip(forces) {
            position.x += fx * step;
            position.y += fy * step;
        }
    }

    Ok(positions)
}

/// Radial tree layout
///
/// Leaves are spread evenly around the circle in depth-first order. Every
/// other node sits at the middle of the angular span of its leaves, at a radius
/// proportional to its generation. The root is at the centre; other nodes stay
/// at least `0.08 * outer_radius` away from it.
pub fn radial(tree: &Tree, outer_radius: f64) -> Vec<Point> {
    let leaves = tree.leaves_depth_first();
    let leaf_step = TAU / leaves.len() as f64;

    // (first, last) leaf angle under each node
    let mut span = vec![(f64::INFINITY, f64::NEG_INFINITY); tree.size()];
    for (i, &leaf) in leaves.iter().enumerate() {
        let angle = leaf_step * i as f64;
        span[leaf] = (angle, angle);
    }
    // children always have larger ids than their parent
    for node in tree.nodes().rev() {
        if let Some(parent) = tree.parent(node) {
            let (lo, hi) = span[node];
            span[parent].0 = span[parent].0.min(lo);
            span[parent].1 = span[parent].1.max(hi);
        }
    }

    let depth_scale = tree.height().max(1) as f64;
    let min_radius = 0.08 * outer_radius;

    tree.nodes()
        .map(|node| {
            if node == tree.root() {
                return Point::new(0.0, 0.0);
            }
            let (lo, hi) = span[node];
            let depth = tree.generation(node) as f64 / depth_scale;
            let radius = min_radius + depth * (outer_radius - min_radius);
            Point::polar(radius, (lo + hi) / 2.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate_erdos_renyi;
    use crate::sampling::seeded;
    use crate::tree::generate_galton_watson;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_circular() {
        let points = circular(4, 0.8);
        assert_eq!(points.len(), 4);
        assert!(close(points[0].x, 0.8) && close(points[0].y, 0.0));
        assert!(close(points[1].x, 0.0) && close(points[1].y, 0.8));
        assert!(points.iter().all(|p| close(p.norm(), 0.8)));
        assert!(circular(0, 1.0).is_empty());
    }

    #[test]
    fn test_spring_is_finite_and_seeded() {
        let graph = generate_erdos_renyi(15, 0.3, &mut seeded(4)).unwrap();
        let params = SpringParams::default();
        let a = spring(&graph, &params, &mut seeded(8)).unwrap();
        let b = spring(&graph, &params, &mut seeded(8)).unwrap();
        assert_eq!(a.len(), 15);
        assert!(a.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_spring_rejects_bad_params() {
        let graph = Graph::new(3);
        let params = SpringParams { k: 0.0, ..SpringParams::default() };
        assert!(spring(&graph, &params, &mut seeded(1)).is_err());
        assert!(spring(&Graph::new(0), &SpringParams::default(), &mut seeded(1))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_radial_single_node() {
        let points = radial(&Tree::new(), 1.0);
        assert_eq!(points, vec![Point::new(0.0, 0.0)]);
    }

    #[test]
    fn test_radial_radii_follow_generations() {
        let outcome = generate_galton_watson(1.6, 5, &mut seeded(21)).unwrap();
        let tree = outcome.tree();
        let points = radial(tree, 1.0);
        assert_eq!(points.len(), tree.size());

        let height = tree.height().max(1) as f64;
        for node in tree.nodes().skip(1) {
            let expected = 0.08 + 0.92 * tree.generation(node) as f64 / height;
            assert!(close(points[node].norm(), expected));
        }
    }
}

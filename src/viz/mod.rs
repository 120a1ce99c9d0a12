//! SVG rendering of graphs and trees with `plotters`

use plotters::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::graph::Graph;
use crate::layout::{circular, radial};
use crate::style::{parse_hex_color, PlotStyle};
use crate::tree::{BranchingOutcome, Termination};
use crate::{GraphGenError, Result};

/// Axis extent around the unit layouts
const PAD: f64 = 1.2;

fn color(hex: &str) -> Result<RGBColor> {
    let (r, g, b) = parse_hex_color(hex)?;
    Ok(RGBColor(r, g, b))
}

fn render_error<E: std::fmt::Display>(e: E) -> GraphGenError {
    GraphGenError::Render(e.to_string())
}

/// Caption for a Galton–Watson plot, e.g. `Galton–Watson λ=1.20 (extinct)`
pub fn tree_title(lambda: f64, max_generations: usize, outcome: &BranchingOutcome) -> String {
    let status = match outcome.termination() {
        Termination::Extinct { .. } => "(extinct)".to_string(),
        Termination::Truncated => format!("(truncated with {} gens)", max_generations),
    };
    format!("Galton–Watson λ={:.2} {}", lambda, status)
}

/// Caption for an Erdős–Rényi plot, e.g. `Erdős–Rényi G(100, 0.050)`
pub fn graph_title(n: usize, p: f64) -> String {
    format!("Erdős–Rényi G({}, {:.3})", n, p)
}

/// Draw a graph on a circle: connected vertices in the parent colour,
/// isolated ones in the leaf colour
pub fn render_graph(graph: &Graph, title: &str, style: &PlotStyle, path: &Path) -> Result<()> {
    style.validate()?;
    let positions: Vec<(f64, f64)> = circular(graph.node_count(), 0.8)
        .into_iter()
        .map(<(f64, f64)>::from)
        .collect();

    let edge_style = color(&style.edge_color)?.mix(style.edge_opacity).stroke_width(1);
    let connected = color(&style.parent_color)?;
    let isolated = color(&style.leaf_color)?;
    let radius = style.node_radius as i32;

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24).into_font().color(&RGBColor(0x2C, 0x3E, 0x50)))
        .margin(10)
        .build_cartesian_2d(-PAD..PAD, -PAD..PAD)
        .map_err(render_error)?;

    chart
        .draw_series(graph.edges().iter().map(|&(u, v)| {
            PathElement::new(vec![positions[u], positions[v]], edge_style)
        }))
        .map_err(render_error)?;

    chart
        .draw_series(graph.nodes().map(|v| {
            let fill = if graph.degree(v) > 0 { connected } else { isolated };
            Circle::new(positions[v], radius, fill.filled())
        }))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    info!(path = %path.display(), "rendered graph");
    Ok(())
}

/// Draw a branching tree in the radial layout: root, internal nodes and
/// leaves each in their own colour
pub fn render_tree(
    outcome: &BranchingOutcome,
    title: &str,
    style: &PlotStyle,
    path: &Path,
) -> Result<()> {
    style.validate()?;
    let tree = outcome.tree();
    let positions: Vec<(f64, f64)> = radial(tree, 1.0)
        .into_iter()
        .map(<(f64, f64)>::from)
        .collect();

    let edge_style = color(&style.edge_color)?.mix(style.edge_opacity).stroke_width(2);
    let parent_fill = color(&style.parent_color)?;
    let leaf_fill = color(&style.leaf_color)?;
    let root_fill = color(&style.root_color)?;
    let radius = style.node_radius as i32;

    let root_area = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root_area.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(title, ("sans-serif", 24).into_font().color(&RGBColor(0x2C, 0x3E, 0x50)))
        .margin(10)
        .build_cartesian_2d(-PAD..PAD, -PAD..PAD)
        .map_err(render_error)?;

    chart
        .draw_series(tree.edges().into_iter().map(|(parent, child)| {
            PathElement::new(vec![positions[parent], positions[child]], edge_style)
        }))
        .map_err(render_error)?;

    let parents: HashSet<usize> = tree.edges().into_iter().map(|(p, _)| p).collect();
    chart
        .draw_series(tree.nodes().filter(|&n| n != tree.root()).map(|n| {
            let fill = if parents.contains(&n) { parent_fill } else { leaf_fill };
            Circle::new(positions[n], radius, fill.filled())
        }))
        .map_err(render_error)?;

    chart
        .draw_series(std::iter::once(Circle::new(
            positions[tree.root()],
            radius + 2,
            root_fill.filled(),
        )))
        .map_err(render_error)?;

    root_area.present().map_err(render_error)?;
    info!(path = %path.display(), nodes = tree.size(), "rendered tree");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate_erdos_renyi;
    use crate::sampling::seeded;
    use crate::tree::generate_galton_watson;

    fn temp_svg(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("stochastic_graphs_{}_{}.svg", name, std::process::id()))
    }

    #[test]
    fn test_titles() {
        assert_eq!(graph_title(100, 0.05), "Erdős–Rényi G(100, 0.050)");
        let outcome = generate_galton_watson(0.0, 4, &mut seeded(1)).unwrap();
        assert_eq!(tree_title(0.0, 4, &outcome), "Galton–Watson λ=0.00 (extinct)");
        let outcome = generate_galton_watson(1.2, 0, &mut seeded(1)).unwrap();
        assert_eq!(
            tree_title(1.2, 0, &outcome),
            "Galton–Watson λ=1.20 (truncated with 0 gens)"
        );
    }

    #[test]
    fn test_render_graph_writes_svg() {
        let graph = generate_erdos_renyi(12, 0.3, &mut seeded(3)).unwrap();
        let path = temp_svg("graph");
        render_graph(&graph, "test", &PlotStyle::default(), &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_render_tree_writes_svg() {
        let outcome = generate_galton_watson(1.5, 4, &mut seeded(3)).unwrap();
        let path = temp_svg("tree");
        render_tree(&outcome, "test", &PlotStyle::default(), &path).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }
}

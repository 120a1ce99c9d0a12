//! Plot styling configuration
//!
//! Styles are plain serde structs so they can be loaded from a JSON file:
//!
//! ```json
//! {
//!   "width": 900,
//!   "height": 800,
//!   "node_radius": 4,
//!   "parent_color": "#E74C3C",
//!   "leaf_color": "#3498DB",
//!   "root_color": "#8E44AD",
//!   "edge_color": "#333333",
//!   "edge_opacity": 0.7
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{GraphGenError, Result};

/// Colours and canvas geometry used when rendering
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Node marker radius in pixels
    pub node_radius: u32,
    /// Tree nodes with children, graph vertices with at least one edge
    pub parent_color: String,
    /// Tree leaves, isolated graph vertices
    pub leaf_color: String,
    /// Tree root
    pub root_color: String,
    /// Edges
    pub edge_color: String,
    /// Edge opacity in `[0, 1]`
    pub edge_opacity: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            width: 900,
            height: 800,
            node_radius: 4,
            parent_color: "#E74C3C".to_string(),
            leaf_color: "#3498DB".to_string(),
            root_color: "#8E44AD".to_string(),
            edge_color: "#333333".to_string(),
            edge_opacity: 0.7,
        }
    }
}

impl PlotStyle {
    /// Monochrome preset for print
    pub fn grayscale() -> Self {
        PlotStyle {
            parent_color: "#222222".to_string(),
            leaf_color: "#888888".to_string(),
            root_color: "#000000".to_string(),
            edge_color: "#555555".to_string(),
            ..Self::default()
        }
    }

    /// Load a style from a JSON file; missing fields take default values
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a style from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let style: PlotStyle =
            serde_json::from_str(json).map_err(|e| GraphGenError::Config(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GraphGenError::Config(
                "Canvas dimensions must be positive".to_string(),
            ));
        }

        if self.node_radius == 0 {
            return Err(GraphGenError::Config(
                "Node radius must be positive".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.edge_opacity) {
            return Err(GraphGenError::Config(format!(
                "Edge opacity must be between 0 and 1, got {}",
                self.edge_opacity
            )));
        }

        for color in [
            &self.parent_color,
            &self.leaf_color,
            &self.root_color,
            &self.edge_color,
        ] {
            parse_hex_color(color)?;
        }

        Ok(())
    }
}

/// Parse `#RRGGBB` into its channels
pub fn parse_hex_color(color: &str) -> Result<(u8, u8, u8)> {
    let invalid = || GraphGenError::Config(format!("Invalid colour '{}', expected #RRGGBB", color));

    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

//! Palette assignment for nodes and links
//!
//! A palette is a finite, ordered list of colors used cyclically: item `k`
//! gets `palette[k % palette.len()]`. Assignment is a pure function of
//! (index, palette, opacity) and holds no state.
//!
//! Named categorical palettes are loaded from palettes.json (embedded at
//! compile time) and looked up case-insensitively.

use super::colors::Color;
use super::error::{Result, SankeyError};
use super::graph::SankeyGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Default palette name (Plotly's qualitative colors)
pub const DEFAULT_PALETTE: &str = "Plotly";

/// Which endpoint of an edge drives its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    #[default]
    Source,
    Target,
}

impl ColorKey {
    /// Parse from string value; unknown values are a config error
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "source" => Ok(Self::Source),
            "target" => Ok(Self::Target),
            other => Err(SankeyError::Config(format!(
                "unknown color key '{}' (expected source or target)",
                other
            ))),
        }
    }
}

/// Color for item `index`: `palette[index % len]`, with `opacity` applied if given
pub fn color_for(index: usize, palette: &[Color], opacity: Option<f64>) -> Result<Color> {
    if palette.is_empty() {
        return Err(SankeyError::EmptyPalette);
    }
    let color = palette[index % palette.len()];
    match opacity {
        Some(alpha) => color.with_opacity(alpha),
        None => Ok(color),
    }
}

/// One color per node, keyed by node index
pub fn node_colors(
    graph: &SankeyGraph,
    palette: &[Color],
    opacity: Option<f64>,
) -> Result<Vec<Color>> {
    graph
        .nodes
        .iter()
        .map(|node| color_for(node.index, palette, opacity))
        .collect()
}

/// One color per edge, keyed by the source or target node index
pub fn edge_colors(
    graph: &SankeyGraph,
    palette: &[Color],
    opacity: Option<f64>,
    key: ColorKey,
) -> Result<Vec<Color>> {
    graph
        .edges
        .iter()
        .map(|edge| {
            let index = match key {
                ColorKey::Source => edge.source,
                ColorKey::Target => edge.target,
            };
            color_for(index, palette, opacity)
        })
        .collect()
}

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    pub colors: Vec<Color>,
}

impl PaletteDefinition {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// Palettes by lowercase name
    palettes: HashMap<String, PaletteDefinition>,
    /// Names in file order (for listing)
    names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)?;

        let mut registry = Self::default();
        for def in definitions {
            registry.names.push(def.name.clone());
            registry.palettes.insert(def.name.to_lowercase(), def);
        }

        tracing::debug!(count = registry.names.len(), "loaded palettes");
        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    /// Colors of a named palette, or `UnknownPalette`
    pub fn colors(&self, name: &str) -> Result<&[Color]> {
        self.get(name)
            .map(|p| p.colors.as_slice())
            .ok_or_else(|| SankeyError::UnknownPalette(name.to_string()))
    }

    /// List all palette names
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

static PALETTE_REGISTRY: OnceLock<PaletteRegistry> = OnceLock::new();

/// Get the global palette registry, initialized lazily on first access
pub fn registry() -> &'static PaletteRegistry {
    PALETTE_REGISTRY.get_or_init(|| {
        PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
            tracing::error!("failed to load palettes.json: {}", e);
            PaletteRegistry::default()
        })
    })
}

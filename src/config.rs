//! Sankey build configuration
//!
//! All settings are carried by one caller-owned value that is passed into
//! every build; nothing is held in global state. Missing fields in a JSON
//! config take the defaults listed on `SankeyConfig::default`.

use crate::sankey::colors::{check_opacity, opacity_from_percent, Color};
use crate::sankey::error::{Result, SankeyError};
use crate::sankey::figure::FigureOptions;
use crate::sankey::graph::{BuildOptions, NodeNamespacing};
use crate::sankey::labels::{LabelFormat, DEFAULT_LINE_BREAK};
use crate::sankey::palettes::{self, ColorKey, DEFAULT_PALETTE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Palette given by registry name or as an explicit color list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSource {
    Named(String),
    Colors(Vec<Color>),
}

impl Default for PaletteSource {
    fn default() -> Self {
        PaletteSource::Named(DEFAULT_PALETTE.to_string())
    }
}

impl PaletteSource {
    /// Resolve to a concrete color list
    pub fn resolve(&self) -> Result<Vec<Color>> {
        match self {
            PaletteSource::Named(name) => Ok(palettes::registry().colors(name)?.to_vec()),
            PaletteSource::Colors(colors) => Ok(colors.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyConfig {
    /// Merge repeated transitions (true) or keep one edge per row (false)
    pub aggregate: bool,

    /// Display-only label wrapping/truncation
    pub label_format: LabelFormat,

    /// Separator inserted between wrapped label lines
    pub line_break: String,

    pub palette: PaletteSource,

    /// Alpha applied to every node and link color, in [0, 1]
    pub opacity: Option<f64>,

    /// Which edge endpoint picks the link color
    pub color_key: ColorKey,

    pub node_namespacing: NodeNamespacing,

    pub figure: FigureOptions,
}

impl Default for SankeyConfig {
    fn default() -> Self {
        SankeyConfig {
            aggregate: true,
            label_format: LabelFormat::Wrap(40),
            line_break: DEFAULT_LINE_BREAK.to_string(),
            palette: PaletteSource::default(),
            opacity: None,
            color_key: ColorKey::Source,
            node_namespacing: NodeNamespacing::Global,
            figure: FigureOptions::default(),
        }
    }
}

impl SankeyConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SankeyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(opacity) = self.opacity {
            check_opacity(opacity)?;
        }
        match self.label_format {
            LabelFormat::Wrap(0) => {
                return Err(SankeyError::Config("label wrap width must be > 0".to_string()))
            }
            LabelFormat::Truncate(0) => {
                return Err(SankeyError::Config(
                    "label truncate width must be > 0".to_string(),
                ))
            }
            _ => {}
        }
        if let PaletteSource::Named(name) = &self.palette {
            palettes::registry().colors(name)?;
        }
        Ok(())
    }

    /// Options for the graph builder
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            aggregate: self.aggregate,
            namespacing: self.node_namespacing,
            label_format: self.label_format,
            line_break: self.line_break.clone(),
        }
    }
}

/// Command-line overrides layered on top of a loaded config
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub no_aggregate: bool,
    pub palette: Option<String>,
    /// Values above 1 are read as a percentage
    pub opacity: Option<f64>,
    pub color_key: Option<String>,
    pub namespacing: Option<String>,
    pub wrap: Option<usize>,
    pub truncate: Option<usize>,
    pub title: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut SankeyConfig) -> Result<()> {
        if self.no_aggregate {
            config.aggregate = false;
        }
        if let Some(palette) = &self.palette {
            config.palette = PaletteSource::Named(palette.clone());
        }
        if let Some(opacity) = self.opacity {
            config.opacity = Some(if opacity > 1.0 {
                opacity_from_percent(opacity)?
            } else {
                check_opacity(opacity)?
            });
        }
        if let Some(key) = &self.color_key {
            config.color_key = ColorKey::parse(key)?;
        }
        if let Some(namespacing) = &self.namespacing {
            config.node_namespacing = NodeNamespacing::parse(namespacing)?;
        }
        if let Some(width) = self.wrap {
            config.label_format = LabelFormat::Wrap(width);
        }
        if let Some(max) = self.truncate {
            config.label_format = LabelFormat::Truncate(max);
        }
        if let Some(title) = &self.title {
            config.figure.title = title.clone();
        }
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SankeyConfig::default();
        assert!(config.aggregate);
        assert_eq!(config.label_format, LabelFormat::Wrap(40));
        assert_eq!(config.color_key, ColorKey::Source);
        assert_eq!(config.node_namespacing, NodeNamespacing::Global);
        assert_eq!(config.palette, PaletteSource::Named("Plotly".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = SankeyConfig::from_json(
            r##"{
                "aggregate": false,
                "label_format": {"truncate": 12},
                "palette": ["#ff0000", "rgb(0,0,255)"],
                "opacity": 0.4,
                "color_key": "target",
                "node_namespacing": "per_column"
            }"##,
        )
        .unwrap();

        assert!(!config.aggregate);
        assert_eq!(config.label_format, LabelFormat::Truncate(12));
        assert_eq!(
            config.palette,
            PaletteSource::Colors(vec![Color::Hex([255, 0, 0]), Color::Rgb([0, 0, 255])])
        );
        assert_eq!(config.opacity, Some(0.4));
        assert_eq!(config.color_key, ColorKey::Target);
        assert_eq!(config.node_namespacing, NodeNamespacing::PerColumn);
        assert_eq!(config.figure, FigureOptions::default());
    }

    #[test]
    fn test_from_json_named_palette() {
        let config =
            SankeyConfig::from_json(r#"{"palette": "Set1", "label_format": "none"}"#).unwrap();
        assert_eq!(config.palette, PaletteSource::Named("Set1".to_string()));
        assert_eq!(config.label_format, LabelFormat::None);
        assert_eq!(config.palette.resolve().unwrap().len(), 9);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            SankeyConfig::from_json(r#"{"opacity": 1.5}"#),
            Err(SankeyError::InvalidOpacity(_))
        ));
        assert!(matches!(
            SankeyConfig::from_json(r#"{"label_format": {"wrap": 0}}"#),
            Err(SankeyError::Config(_))
        ));
        assert!(matches!(
            SankeyConfig::from_json(r#"{"palette": "Nope"}"#),
            Err(SankeyError::UnknownPalette(_))
        ));
        assert!(SankeyConfig::from_json(r#"{"palette": ["notacolor"]}"#).is_err());
    }

    #[test]
    fn test_build_options() {
        let config = SankeyConfig {
            aggregate: false,
            node_namespacing: NodeNamespacing::PerColumn,
            ..SankeyConfig::default()
        };
        let options = config.build_options();
        assert!(!options.aggregate);
        assert_eq!(options.namespacing, NodeNamespacing::PerColumn);
        assert_eq!(options.label_format, LabelFormat::Wrap(40));
        assert_eq!(options.line_break, "<br>");
    }

    #[test]
    fn test_overrides() {
        let mut config = SankeyConfig::default();
        let overrides = ConfigOverrides {
            no_aggregate: true,
            palette: Some("Category10".to_string()),
            opacity: Some(60.0),
            color_key: Some("target".to_string()),
            namespacing: Some("per-column".to_string()),
            truncate: Some(10),
            title: Some("Traffic".to_string()),
            ..ConfigOverrides::default()
        };
        overrides.apply(&mut config).unwrap();

        assert!(!config.aggregate);
        assert_eq!(config.palette, PaletteSource::Named("Category10".to_string()));
        assert_eq!(config.opacity, Some(0.6));
        assert_eq!(config.color_key, ColorKey::Target);
        assert_eq!(config.node_namespacing, NodeNamespacing::PerColumn);
        assert_eq!(config.label_format, LabelFormat::Truncate(10));
        assert_eq!(config.figure.title, "Traffic");
    }

    #[test]
    fn test_overrides_reject_unknown_palette() {
        let mut config = SankeyConfig::default();
        let overrides = ConfigOverrides {
            palette: Some("Missing".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(overrides.apply(&mut config).is_err());
    }

    #[test]
    fn test_overrides_reject_misspelled_enums() {
        let mut config = SankeyConfig::default();
        let overrides = ConfigOverrides {
            color_key: Some("targte".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            overrides.apply(&mut config),
            Err(SankeyError::Config(_))
        ));

        let overrides = ConfigOverrides {
            namespacing: Some("percolumn".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            overrides.apply(&mut config),
            Err(SankeyError::Config(_))
        ));
        assert_eq!(config.color_key, ColorKey::Source);
        assert_eq!(config.node_namespacing, NodeNamespacing::Global);

        // The config file rejects the same typo
        assert!(SankeyConfig::from_json(r#"{"node_namespacing": "percolumn"}"#).is_err());
    }
}

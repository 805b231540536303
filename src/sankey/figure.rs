//! Render-ready Sankey figure
//!
//! Serializes a built graph plus its colors into the document shape Plotly's
//! Sankey trace expects: parallel arrays for node labels/colors and for link
//! sources/targets/values/colors.

use super::colors::Color;
use super::error::Result;
use super::graph::SankeyGraph;
use serde::{Deserialize, Serialize};

/// Presentation settings passed straight through to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureOptions {
    pub title: String,
    /// Vertical gap between nodes (pixels)
    pub pad: u32,
    /// Node bar thickness (pixels)
    pub thickness: u32,
    /// Node outline width
    pub line_width: f64,
    pub line_color: String,
    pub font_size: u32,
}

impl Default for FigureOptions {
    fn default() -> Self {
        FigureOptions {
            title: "Sankey Diagram".to_string(),
            pad: 15,
            thickness: 20,
            line_width: 0.5,
            line_color: "black".to_string(),
            font_size: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyFigure {
    pub data: Vec<SankeyTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub node: NodeTrace,
    pub link: LinkTrace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeTrace {
    pub pad: u32,
    pub thickness: u32,
    pub line: LineStyle,
    pub label: Vec<String>,
    pub color: Vec<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkTrace {
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<u64>,
    pub color: Vec<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

impl SankeyFigure {
    /// Assemble a figure from a graph and per-node / per-edge colors
    pub fn new(
        graph: &SankeyGraph,
        node_colors: Vec<Color>,
        edge_colors: Vec<Color>,
        options: &FigureOptions,
    ) -> Self {
        let node = NodeTrace {
            pad: options.pad,
            thickness: options.thickness,
            line: LineStyle {
                color: options.line_color.clone(),
                width: options.line_width,
            },
            label: graph.nodes.iter().map(|n| n.label.clone()).collect(),
            color: node_colors,
        };

        let link = LinkTrace {
            source: graph.edges.iter().map(|e| e.source).collect(),
            target: graph.edges.iter().map(|e| e.target).collect(),
            value: graph.edges.iter().map(|e| e.weight).collect(),
            color: edge_colors,
        };

        SankeyFigure {
            data: vec![SankeyTrace {
                kind: "sankey",
                node,
                link,
            }],
            layout: Layout {
                title: Title {
                    text: options.title.clone(),
                },
                font: Font {
                    size: options.font_size,
                },
            },
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sankey::graph::{build, BuildOptions};
    use crate::sankey::table::Table;

    #[test]
    fn test_figure_json_shape() {
        let table = Table::from_rows(
            "t",
            &["A", "B"],
            vec![vec!["x", "y"], vec!["x", "y"], vec!["x", "z"]],
        )
        .unwrap();
        let graph = build(&table, &BuildOptions::default()).unwrap();
        let red = Color::Hex([255, 0, 0]);
        let figure = SankeyFigure::new(
            &graph,
            vec![red; 3],
            vec![red.with_opacity(0.5).unwrap(); 2],
            &FigureOptions::default(),
        );

        let json: serde_json::Value =
            serde_json::from_str(&figure.to_json_pretty().unwrap()).unwrap();
        let trace = &json["data"][0];
        assert_eq!(trace["type"], "sankey");
        assert_eq!(trace["node"]["label"], serde_json::json!(["x", "y", "z"]));
        assert_eq!(trace["node"]["color"][0], "#ff0000");
        assert_eq!(trace["node"]["pad"], 15);
        assert_eq!(trace["node"]["line"]["color"], "black");
        assert_eq!(trace["link"]["source"], serde_json::json!([0, 0]));
        assert_eq!(trace["link"]["target"], serde_json::json!([1, 2]));
        assert_eq!(trace["link"]["value"], serde_json::json!([2, 1]));
        assert_eq!(trace["link"]["color"][1], "rgba(255,0,0,0.5)");
        assert_eq!(json["layout"]["title"]["text"], "Sankey Diagram");
        assert_eq!(json["layout"]["font"]["size"], 10);
    }

    #[test]
    fn test_figure_options_partial_json() {
        let options: FigureOptions =
            serde_json::from_str(r#"{"title": "Funnel", "pad": 30}"#).unwrap();
        assert_eq!(options.title, "Funnel");
        assert_eq!(options.pad, 30);
        assert_eq!(options.thickness, 20);
    }
}

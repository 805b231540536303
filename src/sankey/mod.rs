//! Sankey graph construction
//!
//! Structure:
//! - `table.rs`: staged categorical table model
//! - `data.rs`, `table_convert.rs`: CSV and DataFrame producers
//! - `graph.rs`: node/link graph builder
//! - `labels.rs`: display label wrapping and truncation
//! - `colors.rs`, `palettes.rs`: color parsing and cyclic palette assignment
//! - `figure.rs`: render-ready output document
//! - `error.rs`: error types

pub mod colors;
pub mod data;
pub mod error;
pub mod figure;
pub mod graph;
pub mod labels;
pub mod palettes;
pub mod table;
pub mod table_convert;

// Re-exports for convenience
pub use colors::Color;
pub use error::{Result, SankeyError};
pub use figure::{FigureOptions, SankeyFigure};
pub use graph::{build, BuildOptions, Edge, Node, NodeNamespacing, SankeyGraph};
pub use labels::LabelFormat;
pub use palettes::{color_for, ColorKey};
pub use table::{CategoryValue, Column, Table};

//! Shared Sankey generation pipeline
//!
//! The pipeline:
//! 1. Resolves the palette once
//! 2. Builds the node/link graph for each table
//! 3. Assigns node and link colors
//! 4. Assembles the render-ready figure
//!
//! Tables are independent, so `generate_sankeys` runs them in parallel on the
//! blocking pool; the resolved palette is the only shared value and is read-only.

use crate::config::SankeyConfig;
use crate::sankey::colors::Color;
use crate::sankey::error::Result;
use crate::sankey::figure::SankeyFigure;
use crate::sankey::graph::{build, SankeyGraph};
use crate::sankey::palettes::{edge_colors, node_colors};
use crate::sankey::table::Table;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything produced for one table
#[derive(Debug, Clone, PartialEq)]
pub struct SankeyResult {
    pub table: String,
    pub graph: SankeyGraph,
    pub node_colors: Vec<Color>,
    pub edge_colors: Vec<Color>,
    pub figure: SankeyFigure,
}

/// Build graph, colors and figure for a single table
pub fn generate_sankey(table: &Table, config: &SankeyConfig) -> Result<SankeyResult> {
    let palette = config.palette.resolve()?;
    generate_with_palette(table, config, &palette)
}

fn generate_with_palette(
    table: &Table,
    config: &SankeyConfig,
    palette: &[Color],
) -> Result<SankeyResult> {
    debug!(
        table = table.name(),
        columns = table.n_columns(),
        rows = table.n_rows(),
        "building sankey"
    );

    let graph = build(table, &config.build_options())?;
    let nodes = node_colors(&graph, palette, config.opacity)?;
    let edges = edge_colors(&graph, palette, config.opacity, config.color_key)?;
    let figure = SankeyFigure::new(&graph, nodes.clone(), edges.clone(), &config.figure);

    info!(
        table = table.name(),
        nodes = graph.nodes.len(),
        links = graph.edges.len(),
        weight = graph.total_weight(),
        "built sankey"
    );

    Ok(SankeyResult {
        table: table.name().to_string(),
        graph,
        node_colors: nodes,
        edge_colors: edges,
        figure,
    })
}

/// Process several tables in parallel
///
/// Results come back in input order. A failing table yields an `Err` in its
/// slot without affecting the others.
pub async fn generate_sankeys(
    tables: Vec<Table>,
    config: Arc<SankeyConfig>,
) -> Vec<Result<SankeyResult>> {
    let palette: Arc<[Color]> = match config.palette.resolve() {
        Ok(colors) => colors.into(),
        Err(e) => {
            warn!("palette could not be resolved: {}", e);
            // Each table reports the same resolution error
            return tables
                .iter()
                .map(|table| generate_sankey(table, &config))
                .collect();
        }
    };

    let handles: Vec<_> = tables
        .into_iter()
        .map(|table| {
            let config = Arc::clone(&config);
            let palette = Arc::clone(&palette);
            tokio::task::spawn_blocking(move || generate_with_palette(&table, &config, &palette))
        })
        .collect();

    futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.map_err(Into::into).and_then(|result| result))
        .collect()
}

/// Output file name for each table, in input order
///
/// Tables are named after their file stem, so `a/flows.csv` and `b/flows.csv`
/// collide. Later duplicates get a numeric suffix (`flows-2.sankey.json`).
pub fn output_file_names(table_names: &[&str]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    table_names
        .iter()
        .map(|name| {
            let mut candidate = format!("{}.sankey.json", name);
            let mut n = 2;
            while taken.contains(&candidate) {
                candidate = format!("{}-{}.sankey.json", name, n);
                n += 1;
            }
            if n > 2 {
                warn!(table = *name, file = %candidate, "duplicate table name, renamed output");
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}

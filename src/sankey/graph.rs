//! Table to Sankey graph conversion
//!
//! Every distinct category value becomes a node, and every row contributes one
//! transition per adjacent column pair. Node indices are assigned in order of
//! first appearance while scanning the table column by column (left to right),
//! each column top to bottom. Edges are emitted row by row, and within a row
//! in column-pair order.

use super::error::{Result, SankeyError};
use super::labels::{format_label, LabelFormat, DEFAULT_LINE_BREAK};
use super::table::{CategoryValue, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether equal values in different columns share a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeNamespacing {
    /// One node per distinct value, whatever column it appears in
    #[default]
    Global,
    /// One node per (column, value); "Unknown" in stage 1 and stage 3 are two nodes
    PerColumn,
}

impl NodeNamespacing {
    /// Parse from string value; unknown values are a config error
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "global" => Ok(Self::Global),
            "per_column" => Ok(Self::PerColumn),
            other => Err(SankeyError::Config(format!(
                "unknown node namespacing '{}' (expected global or per_column)",
                other
            ))),
        }
    }
}

/// Options for a single graph build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Merge repeated transitions into one edge with summed weight
    pub aggregate: bool,
    pub namespacing: NodeNamespacing,
    pub label_format: LabelFormat,
    pub line_break: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            aggregate: true,
            namespacing: NodeNamespacing::Global,
            label_format: LabelFormat::None,
            line_break: DEFAULT_LINE_BREAK.to_string(),
        }
    }
}

/// A distinct category value
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Contiguous index, 0-based, in first-appearance order
    pub index: usize,
    /// Display label (possibly wrapped or truncated)
    pub label: String,
    /// Original value used for identity
    pub value: CategoryValue,
    /// Column in which the value was first seen
    pub stage: usize,
}

/// Directed weighted transition between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: u64,
    /// Index `i` of the column pair `(i, i + 1)` that produced this edge
    pub stage: usize,
}

/// Node set and edge list for one table
#[derive(Debug, Clone, PartialEq)]
pub struct SankeyGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub namespacing: NodeNamespacing,
}

impl SankeyGraph {
    /// Index of the node holding `value` in `column`
    ///
    /// With global namespacing the column is ignored.
    pub fn node_index(&self, column: usize, value: &CategoryValue) -> Option<usize> {
        self.nodes
            .iter()
            .find(|n| {
                &n.value == value
                    && (self.namespacing == NodeNamespacing::Global || n.stage == column)
            })
            .map(|n| n.index)
    }

    /// Sum of all edge weights
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Incoming plus outgoing weight of a node
    pub fn node_throughput(&self, index: usize) -> u64 {
        self.edges
            .iter()
            .map(|e| {
                let mut w = 0;
                if e.source == index {
                    w += e.weight;
                }
                if e.target == index {
                    w += e.weight;
                }
                w
            })
            .sum()
    }
}

/// Key identifying a node: the value, plus its column when namespaced
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NodeKey<'a> {
    column: Option<usize>,
    value: &'a CategoryValue,
}

/// Build the node set and edge list for `table`
///
/// Fails with `EmptyInput` when the table has no columns or no rows and with
/// `InsufficientColumns` when it has a single column.
pub fn build(table: &Table, options: &BuildOptions) -> Result<SankeyGraph> {
    let n_columns = table.n_columns();
    if n_columns == 0 {
        return Err(SankeyError::EmptyInput {
            table: table.name().to_string(),
            reason: "no columns".to_string(),
        });
    }
    if n_columns < 2 {
        return Err(SankeyError::InsufficientColumns {
            table: table.name().to_string(),
            found: n_columns,
        });
    }
    let n_rows = table.n_rows();
    if n_rows == 0 {
        return Err(SankeyError::EmptyInput {
            table: table.name().to_string(),
            reason: "no rows".to_string(),
        });
    }

    // Node discovery: column-major scan
    let mut index_of: HashMap<NodeKey<'_>, usize> = HashMap::new();
    let mut nodes: Vec<Node> = Vec::new();
    for (col_idx, column) in table.columns().iter().enumerate() {
        for value in &column.values {
            let key = node_key(options.namespacing, col_idx, value);
            if !index_of.contains_key(&key) {
                let index = nodes.len();
                index_of.insert(key, index);
                nodes.push(Node {
                    index,
                    label: format_label(
                        &value.to_string(),
                        &options.label_format,
                        &options.line_break,
                    ),
                    value: value.clone(),
                    stage: col_idx,
                });
            }
        }
    }

    // Edge construction: row-major, then column-pair order
    let columns = table.columns();
    let mut edges: Vec<Edge> = Vec::with_capacity(n_rows * (n_columns - 1));
    let mut position: HashMap<(usize, usize, usize), usize> = HashMap::new();
    for row in 0..n_rows {
        for stage in 0..n_columns - 1 {
            let source_value = &columns[stage].values[row];
            let target_value = &columns[stage + 1].values[row];
            let source = index_of[&node_key(options.namespacing, stage, source_value)];
            let target = index_of[&node_key(options.namespacing, stage + 1, target_value)];

            if options.aggregate {
                match position.get(&(source, target, stage)) {
                    Some(&pos) => edges[pos].weight += 1,
                    None => {
                        position.insert((source, target, stage), edges.len());
                        edges.push(Edge {
                            source,
                            target,
                            weight: 1,
                            stage,
                        });
                    }
                }
            } else {
                edges.push(Edge {
                    source,
                    target,
                    weight: 1,
                    stage,
                });
            }
        }
    }

    Ok(SankeyGraph {
        nodes,
        edges,
        namespacing: options.namespacing,
    })
}

fn node_key(namespacing: NodeNamespacing, column: usize, value: &CategoryValue) -> NodeKey<'_> {
    NodeKey {
        column: match namespacing {
            NodeNamespacing::Global => None,
            NodeNamespacing::PerColumn => Some(column),
        },
        value,
    }
}

//! Sankey Flow - command-line entry point
//!
//! Reads one or more CSV files, builds a Sankey graph for each, and writes a
//! Plotly-compatible `<name>.sankey.json` figure per input.

use anyhow::{Context, Result};
use clap::Parser;
use sankey_flow::config::{ConfigOverrides, SankeyConfig};
use sankey_flow::pipeline;
use sankey_flow::sankey::data::load_csv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "sankey_flow", version, about = "Generate Sankey diagrams from staged CSV tables")]
struct Args {
    /// CSV files; each column is one stage of the flow
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the generated .sankey.json files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Keep one link per row instead of merging repeated transitions
    #[arg(long)]
    no_aggregate: bool,

    /// Named palette (Plotly, Category10, Palette-1, Set1, Pastel1, Grey)
    #[arg(long)]
    palette: Option<String>,

    /// Opacity for node and link colors, 0-1 (values above 1 are percentages)
    #[arg(long)]
    opacity: Option<f64>,

    /// Edge endpoint that picks the link color: source or target
    #[arg(long)]
    color_key: Option<String>,

    /// Node identity: global or per_column
    #[arg(long)]
    namespacing: Option<String>,

    /// Wrap labels at this many characters
    #[arg(long, conflicts_with = "truncate")]
    wrap: Option<usize>,

    /// Truncate labels to this many characters
    #[arg(long)]
    truncate: Option<usize>,

    /// Figure title
    #[arg(long)]
    title: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            no_aggregate: self.no_aggregate,
            palette: self.palette.clone(),
            opacity: self.opacity,
            color_key: self.color_key.clone(),
            namespacing: self.namespacing.clone(),
            wrap: self.wrap,
            truncate: self.truncate,
            title: self.title.clone(),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<SankeyConfig> {
    let mut config = match &args.config {
        Some(path) => SankeyConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SankeyConfig::default(),
    };
    args.overrides()
        .apply(&mut config)
        .context("invalid command-line option")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Arc::new(load_config(&args)?);
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    let mut failures = 0usize;
    let mut tables = Vec::new();
    for path in &args.inputs {
        match load_csv(path) {
            Ok(table) => {
                info!(file = %path.display(), columns = ?table.column_names(), "found columns");
                tables.push(table);
            }
            Err(e) => {
                error!(file = %path.display(), "failed to read: {}", e);
                failures += 1;
            }
        }
    }

    let table_names: Vec<&str> = tables.iter().map(|t| t.name()).collect();
    let file_names = pipeline::output_file_names(&table_names);

    let results = pipeline::generate_sankeys(tables, Arc::clone(&config)).await;
    for (result, file_name) in results.into_iter().zip(file_names) {
        match result {
            Ok(sankey) => {
                let out = args.output_dir.join(file_name);
                let json = sankey.figure.to_json_pretty()?;
                std::fs::write(&out, json)
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!(
                    "✓ {}: {} nodes, {} links -> {}",
                    sankey.table,
                    sankey.graph.nodes.len(),
                    sankey.graph.edges.len(),
                    out.display()
                );
            }
            Err(e) => {
                eprintln!("✗ {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        error!(failures, "some tables could not be processed");
        std::process::exit(1);
    }
    Ok(())
}

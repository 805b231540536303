//! Sankey Flow Library
//!
//! Converts tables whose columns are successive stages of a categorical flow
//! into node/link graphs with deterministic colors, ready for a Sankey renderer.

pub mod config;
pub mod pipeline;
pub mod sankey;

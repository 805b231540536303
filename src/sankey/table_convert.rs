//! DataFrame to Table conversion
//!
//! Converts Polars DataFrames into staged tables. Rows containing a null in
//! any column are dropped first, so the graph builder only sees complete rows.

use super::error::Result;
use super::table::{CategoryValue, Column, Table};
use polars::prelude::*;

/// Convert a Polars DataFrame to a table
///
/// Column dtypes map to category values:
/// - String → `Str`
/// - Boolean → `Bool`
/// - integer types → `Int`
/// - float types → `Float`
/// - anything else is cast to String
pub fn dataframe_to_table(name: &str, df: &DataFrame) -> Result<Table> {
    let complete = complete_rows(df)?;
    let removed = df.height() - complete.height();
    if removed > 0 {
        tracing::warn!(table = name, removed, "dropped rows with null values");
    }

    let mut columns = Vec::with_capacity(complete.width());
    for col in complete.get_columns() {
        let series = col.as_materialized_series();
        let values = series_values(series)?;
        columns.push(Column::new(series.name().to_string(), values));
    }

    Table::new(name, columns)
}

/// Rows without a null in any column
fn complete_rows(df: &DataFrame) -> Result<DataFrame> {
    let mut mask = BooleanChunked::full("complete".into(), true, df.height());
    for col in df.get_columns() {
        mask = &mask & &col.as_materialized_series().is_not_null();
    }
    Ok(df.filter(&mask)?)
}

fn series_values(series: &Series) -> Result<Vec<CategoryValue>> {
    let values = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .flatten()
            .map(|s| CategoryValue::Str(s.to_string()))
            .collect(),
        DataType::Boolean => series
            .bool()?
            .into_iter()
            .flatten()
            .map(CategoryValue::Bool)
            .collect(),
        dtype if dtype.is_integer() => series
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .flatten()
            .map(CategoryValue::Int)
            .collect(),
        dtype if dtype.is_float() => series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .flatten()
            .map(CategoryValue::Float)
            .collect(),
        _ => series
            .cast(&DataType::String)?
            .str()?
            .into_iter()
            .flatten()
            .map(|s| CategoryValue::Str(s.to_string()))
            .collect(),
    };
    Ok(values)
}

//! CSV Loader Module
//! Reads the vehicle listings dataset into a DataFrame using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Dataset file expected next to the binary.
pub const DEFAULT_DATASET: &str = "car_price_prediction.csv";

/// Columns the cleaning pipeline and aggregates depend on.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Price",
    "Manufacturer",
    "Category",
    "Engine volume",
    "Doors",
    "Mileage",
    "Levy",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("dataset file not found: {0}")]
    NotFound(String),
    #[error("dataset is missing required column {0:?}")]
    MissingColumn(String),
}

/// Load the listings CSV and verify the expected columns are present.
pub fn load_listings(path: &str) -> Result<DataFrame, LoaderError> {
    if !Path::new(path).exists() {
        return Err(LoaderError::NotFound(path.to_string()));
    }

    // Use lazy evaluation for memory efficiency, then collect
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .finish()?
        .collect()?;

    for required in REQUIRED_COLUMNS {
        if df.column(required).is_err() {
            return Err(LoaderError::MissingColumn(required.to_string()));
        }
    }

    tracing::info!(rows = df.height(), columns = df.width(), path, "loaded listings");
    Ok(df)
}

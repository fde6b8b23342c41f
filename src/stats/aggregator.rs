//! Aggregator Module
//! Computes the dashboard KPIs and grouped mean-price tables from the
//! cleaned listings DataFrame.

use polars::prelude::*;
use statrs::statistics::Statistics;
use thiserror::Error;

/// Manufacturer chart shows only the highest-priced makes.
pub const TOP_MANUFACTURERS: usize = 10;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Scalar summary metrics.
#[derive(Debug, Clone)]
pub struct Kpis {
    pub total_listings: usize,
    pub average_price: f64,
    pub unique_manufacturers: usize,
}

/// One bar of a grouped mean-price chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub label: String,
    pub mean_price: f64,
}

/// Everything the dashboard view renders, recomputed per pipeline run.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub kpis: Kpis,
    pub price_by_category: Vec<GroupMean>,
    pub top_manufacturers: Vec<GroupMean>,
    /// Cleaned prices, for the histogram.
    pub prices: Vec<f64>,
}

/// Compute KPIs and both grouped aggregates over the cleaned table.
pub fn summarize(df: &DataFrame) -> Result<DashboardSummary, AggregateError> {
    let prices = price_values(df)?;

    let kpis = Kpis {
        total_listings: df.height(),
        average_price: Statistics::mean(&prices),
        unique_manufacturers: df
            .column("Manufacturer")?
            .as_materialized_series()
            .n_unique()?,
    };

    let price_by_category = mean_price_by(df, "Category")?;

    // Stable descending sort keeps first-appearance order for tied means,
    // which also decides ties at the top-10 cutoff.
    let mut top_manufacturers = mean_price_by(df, "Manufacturer")?;
    top_manufacturers.sort_by(|a, b| {
        b.mean_price
            .partial_cmp(&a.mean_price)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_manufacturers.truncate(TOP_MANUFACTURERS);

    tracing::info!(
        listings = kpis.total_listings,
        categories = price_by_category.len(),
        manufacturers = top_manufacturers.len(),
        "aggregates ready"
    );

    Ok(DashboardSummary {
        kpis,
        price_by_category,
        top_manufacturers,
        prices,
    })
}

/// Mean price per distinct value of `key`, in first-appearance order.
fn mean_price_by(df: &DataFrame, key: &str) -> Result<Vec<GroupMean>, AggregateError> {
    let grouped = df
        .clone()
        .lazy()
        .group_by_stable([col(key)])
        .agg([col("Price")
            .cast(DataType::Float64)
            .mean()
            .alias("mean_price")])
        .collect()?;

    let labels = grouped.column(key)?.cast(&DataType::String)?;
    let labels = labels.str()?;
    let means = grouped.column("mean_price")?.f64()?;

    let mut out = Vec::with_capacity(grouped.height());
    for idx in 0..grouped.height() {
        if let (Some(label), Some(mean_price)) = (labels.get(idx), means.get(idx)) {
            out.push(GroupMean {
                label: label.to_string(),
                mean_price,
            });
        }
    }
    Ok(out)
}

fn price_values(df: &DataFrame) -> Result<Vec<f64>, AggregateError> {
    let price = df.column("Price")?.cast(&DataType::Float64)?;
    Ok(price.f64()?.into_iter().flatten().collect())
}

/// Round to a whole unit and insert thousands separators ("18,587").
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}

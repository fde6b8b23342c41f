//! One-shot pipeline from the raw CSV to the dashboard summary.
//!
//! Pure function of the input file; every run loads and processes its own
//! copy of the data, so there is no shared state between runs.

use crate::data;
use crate::stats::{self, DashboardSummary};
use anyhow::Result;

pub fn run(path: &str) -> Result<DashboardSummary> {
    let raw = data::load_listings(path)?;
    let cleaned = data::clean(raw)?;
    let summary = stats::summarize(&cleaned)?;
    Ok(summary)
}

//! Stats module - KPI and grouped aggregate computation

mod aggregator;

pub use aggregator::{format_thousands, summarize, AggregateError, DashboardSummary, GroupMean, Kpis};

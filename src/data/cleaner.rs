//! Data Cleaner Module
//! Column-specific coercions and price outlier removal.
//!
//! The steps run unconditionally and in a fixed order: numeric extraction
//! on the mixed-format text columns, the Levy sentinel substitution, then
//! the two-step price outlier removal (single maximum first, 3-sigma
//! threshold over what remains).

use polars::prelude::*;
use statrs::statistics::Statistics;
use thiserror::Error;

/// Columns holding numbers embedded in free-form text ("2.0 Turbo", "192000 km").
pub const TEXT_NUMERIC_COLUMNS: [&str; 3] = ["Engine volume", "Doors", "Mileage"];

/// Source-data placeholder meaning "no levy charged".
const LEVY_SENTINEL: &str = "-";

/// A numeric token delimited by whitespace or end of string. A value like
/// "04-May" has no such token and coerces to null.
const NUMERIC_TOKEN_PATTERN: &str = r"(\d+\.?\d*)(?:\s|$)";

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Levy value {0:?} is neither an integer nor the \"-\" sentinel")]
    Levy(String),
    #[error("dataset has no priced rows")]
    Empty,
}

/// Run the full cleaning pipeline over a raw listings DataFrame.
pub fn clean(df: DataFrame) -> Result<DataFrame, CleanError> {
    let raw_rows = df.height();

    let mut df = extract_numeric_columns(df)?;
    let levy = parse_levy(&df)?;
    df.with_column(levy)?;

    let df = drop_max_price_row(df)?;
    let df = drop_price_outliers(df)?;

    tracing::info!(raw_rows, kept_rows = df.height(), "cleaning complete");
    Ok(df)
}

/// Extract the leading numeric token of each mixed-format text column and
/// coerce it to Float64. Values without a numeric token become null.
fn extract_numeric_columns(df: DataFrame) -> Result<DataFrame, CleanError> {
    let mut lf = df.lazy();
    for name in TEXT_NUMERIC_COLUMNS {
        lf = lf.with_column(
            col(name)
                .cast(DataType::String)
                .str()
                .extract(lit(NUMERIC_TOKEN_PATTERN), 1)
                .cast(DataType::Float64)
                .alias(name),
        );
    }
    let df = lf.collect()?;

    for name in TEXT_NUMERIC_COLUMNS {
        let nulls = df.column(name)?.null_count();
        if nulls > 0 {
            tracing::debug!(column = name, nulls, "unparseable values coerced to null");
        }
    }
    Ok(df)
}

/// Parse the Levy column: the "-" sentinel (and absent values) become 0,
/// anything else must parse as an integer.
fn parse_levy(df: &DataFrame) -> Result<Column, CleanError> {
    let levy = df.column("Levy")?.cast(&DataType::String)?;
    let levy = levy.str()?;

    let mut parsed: Vec<i64> = Vec::with_capacity(levy.len());
    for value in levy.into_iter() {
        let raw = value.map(str::trim).unwrap_or(LEVY_SENTINEL);
        if raw == LEVY_SENTINEL {
            parsed.push(0);
        } else {
            parsed.push(raw.parse().map_err(|_| CleanError::Levy(raw.to_string()))?);
        }
    }
    Ok(Column::new("Levy".into(), parsed))
}

/// Drop exactly the row holding the global maximum price (first occurrence
/// when tied), a known data-entry outlier.
fn drop_max_price_row(df: DataFrame) -> Result<DataFrame, CleanError> {
    let price = df.column("Price")?.cast(&DataType::Float64)?;
    let price = price.f64()?;

    let mut max_row: Option<(usize, f64)> = None;
    for (idx, value) in price.into_iter().enumerate() {
        if let Some(value) = value {
            match max_row {
                Some((_, best)) if best >= value => {}
                _ => max_row = Some((idx, value)),
            }
        }
    }
    let Some((max_idx, max_price)) = max_row else {
        return Err(CleanError::Empty);
    };

    tracing::debug!(max_price, row = max_idx, "dropping maximum-price row");
    let mask: BooleanChunked = (0..df.height()).map(|idx| Some(idx != max_idx)).collect();
    Ok(df.filter(&mask)?)
}

/// Keep only rows with Price strictly below mean + 3 standard deviations,
/// computed over the rows that survived the maximum-price removal.
fn drop_price_outliers(df: DataFrame) -> Result<DataFrame, CleanError> {
    let price = df.column("Price")?.cast(&DataType::Float64)?;
    let prices: Vec<f64> = price.f64()?.into_iter().flatten().collect();
    if prices.len() < 2 {
        return Ok(df);
    }

    let mean = Statistics::mean(&prices);
    let std = Statistics::std_dev(&prices);
    let upper_bound = mean + 3.0 * std;

    let kept = df
        .lazy()
        .filter(col("Price").cast(DataType::Float64).lt(lit(upper_bound)))
        .collect()?;

    tracing::debug!(
        mean,
        std,
        upper_bound,
        dropped = prices.len() - kept.height(),
        "applied 3-sigma price filter"
    );
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn listings(prices: Vec<i64>) -> DataFrame {
        let n = prices.len();
        df!(
            "Price" => prices,
            "Manufacturer" => vec!["TOYOTA"; n],
            "Category" => vec!["Jeep"; n],
            "Engine volume" => vec!["2.0"; n],
            "Doors" => vec!["4"; n],
            "Mileage" => vec!["1000 km"; n],
            "Levy" => vec!["-"; n],
        )
        .unwrap()
    }

    fn prices_of(df: &DataFrame) -> Vec<f64> {
        df.column("Price")
            .unwrap()
            .cast(&DataType::Float64)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn worked_example_keeps_three_rows() {
        // [100, 200, 300, 100000]: max removal leaves mean 200, std 100,
        // threshold 500; every remaining row passes.
        let cleaned = clean(listings(vec![100, 200, 300, 100_000])).unwrap();
        assert_eq!(cleaned.height(), 3);
        assert_eq!(prices_of(&cleaned), vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn sigma_filter_drops_high_prices() {
        // After removing the 100000 row, 500 sits above mean + 3 std of the
        // twenty 1s plus itself and is dropped as well.
        let mut prices = vec![1i64; 20];
        prices.push(500);
        prices.push(100_000);
        let raw_rows = prices.len();

        let cleaned = clean(listings(prices)).unwrap();
        assert_eq!(cleaned.height(), raw_rows - 1 - 1);
        assert!(prices_of(&cleaned).iter().all(|&p| p == 1.0));
    }

    #[test]
    fn tied_maximum_removes_only_first_row() {
        let cleaned = clean(listings(vec![5, 9, 9, 1])).unwrap();
        assert_eq!(cleaned.height(), 3);
        let nines = prices_of(&cleaned).iter().filter(|&&p| p == 9.0).count();
        assert_eq!(nines, 1);
    }

    #[test]
    fn text_columns_become_numeric_or_null() {
        let df = df!(
            "Engine volume" => ["2.0 Turbo", "1.6", "unknown"],
            "Doors" => ["04-May", "4", ">5"],
            "Mileage" => ["186005 km", "0 km", "n/a"],
        )
        .unwrap();

        let out = extract_numeric_columns(df).unwrap();

        let engine = out.column("Engine volume").unwrap().f64().unwrap().clone();
        assert_eq!(engine.get(0), Some(2.0));
        assert_eq!(engine.get(1), Some(1.6));
        assert_eq!(engine.get(2), None);

        let doors = out.column("Doors").unwrap().f64().unwrap().clone();
        assert_eq!(doors.get(0), None);
        assert_eq!(doors.get(1), Some(4.0));

        let mileage = out.column("Mileage").unwrap().f64().unwrap().clone();
        assert_eq!(mileage.get(0), Some(186005.0));
        assert_eq!(mileage.get(1), Some(0.0));
        assert_eq!(mileage.get(2), None);
    }

    #[test]
    fn levy_sentinel_maps_to_zero() {
        let df = df!("Levy" => ["-", "1200", "  891 "]).unwrap();
        let levy = parse_levy(&df).unwrap();
        let levy = levy.i64().unwrap();
        assert_eq!(levy.get(0), Some(0));
        assert_eq!(levy.get(1), Some(1200));
        assert_eq!(levy.get(2), Some(891));
    }

    #[test]
    fn non_integer_levy_is_fatal() {
        let df = df!("Levy" => ["1200", "12xx"]).unwrap();
        let err = parse_levy(&df).unwrap_err();
        assert!(matches!(err, CleanError::Levy(v) if v == "12xx"));
    }

    #[test]
    fn empty_frame_is_fatal() {
        let err = clean(listings(Vec::new())).unwrap_err();
        assert!(matches!(err, CleanError::Empty));
    }

    #[test]
    fn row_count_arithmetic_holds() {
        // raw - 1 (max removal) - rows at or above the threshold
        let prices = vec![100i64, 200, 300, 100_000];
        let raw_rows = prices.len();
        let cleaned = clean(listings(prices)).unwrap();
        assert_eq!(cleaned.height(), raw_rows - 1);

        let max = prices_of(&cleaned)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(max < 100_000.0);
    }
}

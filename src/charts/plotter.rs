//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::stats::GroupMean;
use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};

/// Bin count for the price histogram.
pub const HISTOGRAM_BINS: usize = 50;

const CHART_HEIGHT: f32 = 320.0;

/// Fill color for all bars.
pub const BAR_FILL: Color32 = Color32::from_rgb(99, 110, 250);

/// One equal-width histogram bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub center: f64,
    pub width: f64,
    pub count: usize,
}

/// Bucket values into `bins` equal-width bins over [min, max]. Values equal
/// to the maximum land in the last bin.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= 0.0 {
        return vec![HistogramBin {
            center: min,
            width: 1.0,
            count: values.len(),
        }];
    }

    let width = span / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in values {
        let idx = (((value - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            center: min + (idx as f64 + 0.5) * width,
            width,
            count,
        })
        .collect()
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the price distribution histogram.
    pub fn draw_price_histogram(ui: &mut egui::Ui, prices: &[f64]) {
        let bars: Vec<Bar> = histogram_bins(prices, HISTOGRAM_BINS)
            .into_iter()
            .map(|bin| {
                Bar::new(bin.center, bin.count as f64)
                    .width(bin.width)
                    .fill(BAR_FILL)
            })
            .collect();

        Plot::new("price_histogram")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Price")
            .y_axis_label("Listings")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Price"));
            });
    }

    /// Draw a mean-price bar chart with one bar per group, x-axis labels
    /// overridden to the group names.
    pub fn draw_mean_price_bars(
        ui: &mut egui::Ui,
        id: &str,
        entries: &[GroupMean],
        x_label: &str,
    ) {
        let x_labels: Vec<String> = entries.iter().map(|entry| entry.label.clone()).collect();
        let bars: Vec<Bar> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                Bar::new(idx as f64, entry.mean_price)
                    .width(0.6)
                    .fill(BAR_FILL)
                    .name(&entry.label)
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label.to_string())
            .y_axis_label("Mean price")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cover_every_value() {
        let values: Vec<f64> = (0..500).map(|i| i as f64).collect();
        let bins = histogram_bins(&values, HISTOGRAM_BINS);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let values = vec![0.0, 1.0, 2.0, 10.0];
        let bins = histogram_bins(&values, 5);
        assert_eq!(bins.last().unwrap().count, 1);
    }

    #[test]
    fn constant_values_collapse_to_one_bin() {
        let bins = histogram_bins(&[7.0, 7.0, 7.0], 50);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[0].center, 7.0);
    }

    #[test]
    fn empty_input_yields_no_bins() {
        assert!(histogram_bins(&[], 50).is_empty());
    }
}

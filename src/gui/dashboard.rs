//! Dashboard View
//! KPI metric row plus the three charts in a scrollable column.

use crate::charts::ChartPlotter;
use crate::stats::{format_thousands, DashboardSummary};
use egui::{Color32, RichText, ScrollArea};

const KPI_CARD_WIDTH: f32 = 220.0;
const SECTION_SPACING: f32 = 15.0;

/// Renders a pipeline summary; holds no state of its own.
#[derive(Default)]
pub struct DashboardView;

impl DashboardView {
    pub fn show(&self, ui: &mut egui::Ui, summary: &DashboardSummary) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(SECTION_SPACING);
                Self::draw_kpis(ui, summary);

                ui.add_space(SECTION_SPACING);
                ui.label(RichText::new("Price Distribution").size(16.0).strong());
                ChartPlotter::draw_price_histogram(ui, &summary.prices);

                ui.add_space(SECTION_SPACING);
                ui.label(RichText::new("Mean Price by Category").size(16.0).strong());
                ChartPlotter::draw_mean_price_bars(
                    ui,
                    "price_by_category",
                    &summary.price_by_category,
                    "Category",
                );

                ui.add_space(SECTION_SPACING);
                ui.label(
                    RichText::new("Top 10 Manufacturers by Mean Price")
                        .size(16.0)
                        .strong(),
                );
                ChartPlotter::draw_mean_price_bars(
                    ui,
                    "price_by_manufacturer",
                    &summary.top_manufacturers,
                    "Manufacturer",
                );
            });
    }

    fn draw_kpis(ui: &mut egui::Ui, summary: &DashboardSummary) {
        ui.horizontal(|ui| {
            Self::metric_card(
                ui,
                "Total Vehicles",
                &format_thousands(summary.kpis.total_listings as f64),
            );
            Self::metric_card(
                ui,
                "Average Price",
                &format!("${}", format_thousands(summary.kpis.average_price)),
            );
            Self::metric_card(
                ui,
                "Unique Manufacturers",
                &summary.kpis.unique_manufacturers.to_string(),
            );
        });
    }

    fn metric_card(ui: &mut egui::Ui, label: &str, value: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(KPI_CARD_WIDTH);
                ui.vertical(|ui| {
                    ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(24.0).strong());
                });
            });
        ui.add_space(12.0);
    }
}

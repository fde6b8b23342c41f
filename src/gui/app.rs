//! Dashboard Application
//! Main window; runs the data pipeline in a background thread and hands the
//! result to the dashboard view.

use crate::gui::DashboardView;
use crate::pipeline;
use crate::stats::DashboardSummary;
use egui::{Color32, RichText};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Pipeline result from background thread
enum PipelineResult {
    Complete(Box<DashboardSummary>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    dataset_path: String,
    view: DashboardView,
    summary: Option<DashboardSummary>,
    error: Option<String>,

    // Async pipeline run
    pipeline_rx: Option<Receiver<PipelineResult>>,
    is_running: bool,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut app = Self {
            dataset_path: crate::data::DEFAULT_DATASET.to_string(),
            view: DashboardView::default(),
            summary: None,
            error: None,
            pipeline_rx: None,
            is_running: false,
        };
        app.start_pipeline();
        app
    }

    /// Re-run the whole pipeline from the file, like a page refresh.
    fn start_pipeline(&mut self) {
        if self.is_running {
            return;
        }
        self.is_running = true;
        self.error = None;

        let (tx, rx) = channel();
        self.pipeline_rx = Some(rx);
        let path = self.dataset_path.clone();

        thread::spawn(move || {
            let result = match pipeline::run(&path) {
                Ok(summary) => PipelineResult::Complete(Box::new(summary)),
                Err(error) => {
                    tracing::error!(%error, "pipeline run failed");
                    PipelineResult::Error(error.to_string())
                }
            };
            let _ = tx.send(result);
        });
    }

    /// Check for pipeline results
    fn check_pipeline_results(&mut self) {
        // Take the receiver temporarily to avoid borrow issues
        let rx = self.pipeline_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    PipelineResult::Complete(summary) => {
                        self.summary = Some(*summary);
                        self.is_running = false;
                        should_keep_receiver = false;
                    }
                    PipelineResult::Error(error) => {
                        self.error = Some(error);
                        self.is_running = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.pipeline_rx = Some(rx);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_pipeline_results();

        // Repaint while the pipeline runs in the background
        if self.is_running {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("📈 Vehicle Price Dashboard")
                        .size(20.0)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!self.is_running, egui::Button::new("⟳ Reload"))
                        .clicked()
                    {
                        self.start_pipeline();
                    }
                    if self.is_running {
                        ui.spinner();
                        ui.label(RichText::new("Processing...").color(Color32::GRAY));
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.error {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Error: {error}"))
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
            } else if let Some(summary) = &self.summary {
                self.view.show(ui, summary);
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("Loading dataset...").size(16.0));
                });
            }
        });
    }
}

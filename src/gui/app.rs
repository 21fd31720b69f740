//! Glucose Chart Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartSlot, GlucoseChartRenderer, LineChart, SurfaceRegistry};
use crate::config::AppConfig;
use crate::data::{report_rows, write_report_csv, Reading, ReadingLoader, ReadingSeries};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, ReadingsTable};
use crate::stats::ReadingSummary;
use anyhow::Context as _;
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info};

/// Id of the surface the glucose chart is drawn on.
pub const CHART_SURFACE_ID: &str = "glucoseChart";

/// Readings loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(Vec<Reading>),
    Error(String),
}

/// Main application window.
pub struct GlucoseApp {
    config: AppConfig,
    surfaces: SurfaceRegistry,
    chart: ChartSlot<LineChart>,
    readings: Vec<Reading>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    readings_table: ReadingsTable,

    // Async readings loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl GlucoseApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut surfaces = SurfaceRegistry::new();
        surfaces.create(CHART_SURFACE_ID, config.chart_width, config.chart_height);

        let mut app = Self {
            chart_viewer: ChartViewer::new(config.chart_height),
            config,
            surfaces,
            chart: ChartSlot::new(),
            readings: Vec::new(),
            control_panel: ControlPanel::new(),
            readings_table: ReadingsTable::new(),
            load_rx: None,
            is_loading: false,
        };

        if let Some(path) = app.config.readings_path.clone() {
            app.start_load(path);
        }
        app
    }

    fn handle_browse_readings(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Readings", &["csv", "json"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Load readings in a background thread.
    fn start_load(&mut self, path: PathBuf) {
        self.control_panel.readings_path = Some(path.clone());
        self.control_panel.set_progress(10.0, "Loading readings...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let loader = ReadingLoader::new(self.config.utc_offset);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!(
                "Reading {}...",
                path.display()
            )));

            match loader.load_file(&path) {
                Ok(readings) => {
                    let _ = tx.send(LoadResult::Complete(readings));
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(30.0, &status);
                    }
                    LoadResult::Complete(readings) => {
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.set_readings(readings);
                    }
                    LoadResult::Error(e) => {
                        error!(error = %e, "loading readings failed");
                        self.control_panel.set_progress(0.0, &format!("Error: {}", e));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn set_readings(&mut self, readings: Vec<Reading>) {
        self.readings = readings;
        self.control_panel.summary = ReadingSummary::from_readings(&self.readings);
        self.control_panel.report_enabled = !self.readings.is_empty();
        self.readings_table.rows = report_rows(&self.readings, self.config.utc_offset);
        self.control_panel.set_progress(70.0, "Rendering chart...");
        self.render_chart();
    }

    /// Replace the chart with one built from the current readings.
    fn render_chart(&mut self) {
        let series = ReadingSeries::from_readings(&self.readings, self.config.utc_offset);
        let surfaces = &self.surfaces;
        let result = self.chart.replace(|| {
            GlucoseChartRenderer::render(surfaces, CHART_SURFACE_ID, &series.labels, &series.values)
        });

        match result {
            Ok(_) => {
                info!(readings = series.len(), "glucose chart ready");
                self.control_panel.export_enabled = true;
                self.control_panel.set_progress(
                    100.0,
                    &format!("Complete! {} readings", series.len()),
                );
            }
            Err(e) => {
                error!(error = %e, "rendering glucose chart failed");
                self.control_panel.export_enabled = false;
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    /// Handle PNG export of the current chart
    fn handle_export_png(&mut self) {
        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("glucose_chart.png")
            .save_file()
        else {
            return;
        };

        match self.export_png(&output_path) {
            Ok(()) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Chart exported to {}", output_path.display()),
                );
                if let Err(e) = open::that(&output_path) {
                    error!(error = %e, "could not open exported chart");
                }
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), "chart export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {:#}", e));
            }
        }
    }

    /// Handle CSV export of the readings report
    fn handle_export_report(&mut self) {
        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("glucose_report.csv")
            .save_file()
        else {
            return;
        };

        match write_report_csv(&self.readings, self.config.utc_offset, &output_path) {
            Ok(()) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Report exported to {}", output_path.display()),
                );
                if let Err(e) = open::that(&output_path) {
                    error!(error = %e, "could not open exported report");
                }
            }
            Err(e) => {
                error!(error = %e, "report export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    fn export_png(&self, path: &Path) -> anyhow::Result<()> {
        let chart = self.chart.get().context("no chart to export")?;
        let bytes = chart.to_png().context("encoding chart")?;
        std::fs::write(path, bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "chart exported");
        Ok(())
    }
}

impl eframe::App for GlucoseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseReadings => self.handle_browse_readings(),
                        ControlPanelAction::Reload => {
                            if let Some(path) = self.control_panel.readings_path.clone() {
                                if !self.is_loading {
                                    self.start_load(path);
                                }
                            }
                        }
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::ExportReport => self.handle_export_report(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Bottom panel - Readings Table
        egui::TopBottomPanel::bottom("readings_panel")
            .resizable(true)
            .min_height(120.0)
            .show(ctx, |ui| {
                ui.add_space(5.0);
                self.readings_table.show(ui);
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ctx, ui, self.chart.get_mut());
        });
    }
}

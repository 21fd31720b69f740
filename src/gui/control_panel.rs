//! Control Panel Widget
//! Left side panel with the readings source, summary and export controls.

use crate::stats::ReadingSummary;
use egui::{Color32, RichText};
use std::path::PathBuf;

const HYPO_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const NORMAL_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const ABOVE_COLOR: Color32 = Color32::from_rgb(255, 159, 64);

/// Left side control panel with file selection, summary and status.
pub struct ControlPanel {
    pub readings_path: Option<PathBuf>,
    pub summary: Option<ReadingSummary>,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
    pub report_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            readings_path: None,
            summary: None,
            progress: 0.0,
            status: "Ready".to_string(),
            export_enabled: false,
            report_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🩸 Glucose Chart")
                    .size(22.0)
                    .color(Color32::from_rgb(54, 162, 235)),
            );
            ui.label(RichText::new("Readings viewer").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Readings Source Section =====
        ui.label(RichText::new("📁 Readings").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .readings_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.readings_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseReadings;
                        }
                        if ui
                            .add_enabled(self.readings_path.is_some(), egui::Button::new("🔄"))
                            .on_hover_text("Reload")
                            .clicked()
                        {
                            action = ControlPanelAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Summary Section =====
        ui.label(RichText::new("📈 Summary").size(14.0).strong());
        ui.add_space(5.0);

        match &self.summary {
            Some(summary) => Self::draw_summary(ui, summary),
            None => {
                ui.label(RichText::new("No readings").size(12.0).color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.report_enabled, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export report").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportReport;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            HYPO_COLOR
        } else if self.status.contains("Complete") || self.status.contains("exported") {
            NORMAL_COLOR
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn draw_summary(ui: &mut egui::Ui, summary: &ReadingSummary) {
        let latest_color = if summary.latest.out_of_range {
            HYPO_COLOR
        } else {
            NORMAL_COLOR
        };

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{:.0} mg/dL", summary.latest.value))
                    .size(20.0)
                    .strong()
                    .color(latest_color),
            );
            ui.label(RichText::new(summary.latest.status.to_string()).size(12.0));
        });
        ui.add_space(5.0);

        egui::Grid::new("reading_summary")
            .num_columns(2)
            .spacing([20.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                let rows = [
                    ("Readings", summary.count.to_string()),
                    ("Mean", format!("{:.1}", summary.mean)),
                    ("Std dev", format!("{:.1}", summary.std)),
                    ("Median", format!("{:.1}", summary.median)),
                    ("Min", format!("{:.0}", summary.min)),
                    ("Max", format!("{:.0}", summary.max)),
                ];
                for (name, value) in rows {
                    ui.label(name);
                    ui.label(RichText::new(value).monospace());
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.label(RichText::new("Time in range").size(12.0).strong());
        for (name, pct, color) in [
            ("Below 70", summary.pct_below, HYPO_COLOR),
            ("70 to 180", summary.pct_within, NORMAL_COLOR),
            ("Above 180", summary.pct_above, ABOVE_COLOR),
        ] {
            ui.horizontal(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 2.0, color);
                ui.label(format!("{name}: {pct:.1}%"));
            });
        }
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseReadings,
    Reload,
    ExportPng,
    ExportReport,
}

//! Readings Table Widget
//! Lists every reading, newest first, with time, value, status and note.

use crate::data::{GlucoseStatus, ReportRow, REPORT_COLUMNS};
use egui::{Color32, RichText, ScrollArea};

const TABLE_MAX_HEIGHT: f32 = 260.0;

fn status_color(status: GlucoseStatus) -> Color32 {
    match status {
        GlucoseStatus::Hypoglycemia | GlucoseStatus::SeekCare => Color32::from_rgb(220, 53, 69),
        GlucoseStatus::Normal => Color32::from_rgb(40, 167, 69),
        GlucoseStatus::AboveTarget => Color32::from_rgb(255, 159, 64),
    }
}

/// Table of the loaded readings.
#[derive(Default)]
pub struct ReadingsTable {
    pub rows: Vec<ReportRow>,
}

impl ReadingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("📋 Readings").size(14.0).strong());
        ui.add_space(5.0);

        if self.rows.is_empty() {
            ui.label(RichText::new("No readings").size(12.0).color(Color32::GRAY));
            return;
        }

        ScrollArea::vertical()
            .id_salt("readings_table")
            .max_height(TABLE_MAX_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("readings_grid")
                    .num_columns(REPORT_COLUMNS.len())
                    .spacing([24.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for header in REPORT_COLUMNS {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for row in &self.rows {
                            ui.label(RichText::new(&row.when).monospace());
                            ui.label(RichText::new(format!("{:.0}", row.value)).monospace());
                            ui.label(
                                RichText::new(row.status.to_string())
                                    .color(status_color(row.status)),
                            );
                            ui.label(row.note.as_deref().unwrap_or("-"));
                            ui.end_row();
                        }
                    });
            });
    }
}

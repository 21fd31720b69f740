//! Chart Viewer Widget
//! Central panel showing the glucose chart surface as a texture.
//! The chart follows the panel width; hovering marks the nearest point and shows a tooltip.

use crate::charts::{ChartHandle, ChartId, LineChart};
use egui::{Color32, RichText, TextureHandle, TextureOptions};
use tracing::warn;

const MIN_CHART_WIDTH: f32 = 320.0;
const MIN_CHART_HEIGHT: f32 = 200.0;
const HOVER_RADIUS: f32 = 7.0;
const HOVER_COLOR: Color32 = Color32::from_rgb(54, 162, 235);

/// Displays the surface of the current chart.
pub struct ChartViewer {
    /// Surface height to keep while the width follows the panel.
    pub chart_height: u32,
    texture: Option<TextureHandle>,
    /// Chart and surface size the texture was uploaded from.
    shown: Option<(ChartId, (u32, u32))>,
}

impl ChartViewer {
    pub fn new(chart_height: u32) -> Self {
        Self {
            chart_height,
            texture: None,
            shown: None,
        }
    }

    /// Drop the uploaded texture.
    pub fn clear(&mut self) {
        self.texture = None;
        self.shown = None;
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, chart: Option<&mut LineChart>) {
        let Some(chart) = chart else {
            self.clear();
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let width = ui.available_width().max(MIN_CHART_WIDTH) as u32;
        let height = (self.chart_height as f32)
            .min(ui.available_height())
            .max(MIN_CHART_HEIGHT) as u32;
        if let Err(e) = chart.resize(width, height) {
            warn!(chart = %chart.id(), error = %e, "chart resize failed");
        }

        self.upload(ctx, chart);
        let Some(texture) = &self.texture else {
            return;
        };

        let image = egui::Image::new((texture.id(), texture.size_vec2()));
        let response = ui.add(image.sense(egui::Sense::hover()));
        if let Some(pos) = response.hover_pos() {
            let local = pos - response.rect.min;
            for element in chart.hovered_elements(local.x as f64, local.y as f64) {
                let center = response.rect.min + egui::vec2(element.x as f32, element.y as f32);
                ui.painter()
                    .circle_stroke(center, HOVER_RADIUS, egui::Stroke::new(2.0, HOVER_COLOR));
            }
            if let Some(tooltip) = chart.tooltip_at(local.x as f64, local.y as f64) {
                response.on_hover_ui_at_pointer(|ui| {
                    ui.label(RichText::new(&tooltip.title).strong());
                    for line in &tooltip.lines {
                        ui.label(line);
                    }
                });
            }
        }
    }

    /// Upload the surface if the chart or its size changed.
    fn upload(&mut self, ctx: &egui::Context, chart: &LineChart) {
        let surface = chart.surface().borrow();
        let canvas = surface.canvas();
        let key = (chart.id(), canvas.size());
        if self.shown == Some(key) && self.texture.is_some() {
            return;
        }

        let image = egui::ColorImage::from_rgb(
            [canvas.width() as usize, canvas.height() as usize],
            canvas.pixels(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                let texture = ctx.load_texture("glucose_chart", image, TextureOptions::LINEAR);
                self.texture = Some(texture);
            }
        }
        self.shown = Some(key);
    }
}

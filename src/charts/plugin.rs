//! Chart Plugins
//! Post-draw hooks and the normal glucose range overlay.

use crate::charts::canvas::{Canvas, Color};
use crate::charts::scale::{CategoryScale, ChartArea, LinearScale};
use std::fmt;

/// What a plugin sees after the chart has been drawn.
pub struct ChartFrame<'a> {
    pub ctx: &'a mut Canvas,
    pub chart_area: ChartArea,
    pub x: &'a CategoryScale,
    pub y: &'a LinearScale,
}

/// Hook run by the chart after every draw.
pub trait ChartPlugin: fmt::Debug {
    fn id(&self) -> &'static str;

    fn after_draw(&self, _frame: &mut ChartFrame<'_>) {}
}

/// Clinically normal glucose band in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
}

impl NormalRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const NORMAL_RANGE: NormalRange = NormalRange {
    min: 70.0,
    max: 180.0,
};

/// Opacity of the shaded band.
pub const NORMAL_BAND_ALPHA: f64 = 0.10;

/// Shades the normal range across the full chart width.
#[derive(Debug, Clone, Copy)]
pub struct NormalBandPlugin {
    pub range: NormalRange,
    pub color: Color,
    pub alpha: f64,
}

impl Default for NormalBandPlugin {
    fn default() -> Self {
        Self {
            range: NORMAL_RANGE,
            color: Color::GREEN,
            alpha: NORMAL_BAND_ALPHA,
        }
    }
}

impl NormalBandPlugin {
    /// Vertical pixel span of the band, top first.
    pub fn band_pixels(&self, y: &LinearScale) -> (f64, f64) {
        let y1 = y.get_pixel_for_value(self.range.max);
        let y2 = y.get_pixel_for_value(self.range.min);
        (y1.min(y2), y1.max(y2))
    }
}

impl ChartPlugin for NormalBandPlugin {
    fn id(&self) -> &'static str {
        "normalBand"
    }

    fn after_draw(&self, frame: &mut ChartFrame<'_>) {
        let (top, bottom) = self.band_pixels(frame.y);
        let area = frame.chart_area;

        frame.ctx.save();
        frame.ctx.set_global_alpha(self.alpha);
        frame.ctx.set_fill_style(self.color);
        frame.ctx.fill_rect(area.left, top, area.width(), bottom - top);
        frame.ctx.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::canvas::DrawState;

    fn frame_parts(values: &[f64]) -> (Canvas, ChartArea, CategoryScale, LinearScale) {
        let canvas = Canvas::new(200, 500);
        let area = ChartArea {
            left: 40.0,
            top: 20.0,
            right: 180.0,
            bottom: 460.0,
        };
        let x = CategoryScale::new(vec!["a".into(), "b".into()], area.left, area.right);
        let y = LinearScale::fit(values, area.top, area.bottom);
        (canvas, area, x, y)
    }

    #[test]
    fn test_band_span_tracks_scale() {
        let plugin = NormalBandPlugin::default();
        let (_, _, _, y) = frame_parts(&[95.0, 210.0]);
        let (top, bottom) = plugin.band_pixels(&y);
        assert_eq!(top, y.get_pixel_for_value(180.0));
        assert_eq!(bottom, y.get_pixel_for_value(70.0));

        // Data far below the band pushes it above the chart area.
        let (_, _, _, low) = frame_parts(&[20.0, 40.0]);
        let (top, bottom) = plugin.band_pixels(&low);
        assert_eq!(top, low.get_pixel_for_value(180.0));
        assert_eq!(bottom, low.get_pixel_for_value(70.0));
        assert!(bottom < 20.0);
    }

    #[test]
    fn test_after_draw_shades_band_and_restores_state() {
        let plugin = NormalBandPlugin::default();
        let (mut canvas, area, x, y) = frame_parts(&[0.0, 200.0]);
        let before = canvas.state();

        let mut frame = ChartFrame {
            ctx: &mut canvas,
            chart_area: area,
            x: &x,
            y: &y,
        };
        plugin.after_draw(&mut frame);

        assert_eq!(canvas.state(), before);
        assert_eq!(before, DrawState::default());

        let inside = y.get_pixel_for_value(125.0).round() as u32;
        let above = y.get_pixel_for_value(190.0).round() as u32;
        let below = y.get_pixel_for_value(60.0).round() as u32;

        assert_eq!(canvas.pixel(100, inside), Some([230, 242, 230]));
        assert_eq!(canvas.pixel(100, above), Some([255, 255, 255]));
        assert_eq!(canvas.pixel(100, below), Some([255, 255, 255]));
        // Outside the chart area horizontally.
        assert_eq!(canvas.pixel(10, inside), Some([255, 255, 255]));
    }

    #[test]
    fn test_normal_range_bounds() {
        assert!(NORMAL_RANGE.contains(70.0));
        assert!(NORMAL_RANGE.contains(180.0));
        assert!(!NORMAL_RANGE.contains(69.9));
        assert!(!NORMAL_RANGE.contains(180.1));
        assert_eq!(NormalBandPlugin::default().id(), "normalBand");
    }
}

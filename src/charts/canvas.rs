//! Canvas Module
//! RGB pixel surface with a 2D-context style state stack used by chart plugins.

use plotters::style::RGBAColor;
use serde::{Serialize, Serializer};
use std::fmt;

/// RGBA color with a 0.0..=1.0 alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// CSS `green`.
    pub const GREEN: Color = Color::rgb(0, 128, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn to_plotters(self) -> RGBAColor {
        RGBAColor(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Mutable drawing state, saved and restored as a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub global_alpha: f64,
    pub fill_style: Color,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            fill_style: Color::BLACK,
        }
    }
}

/// RGB pixel canvas (3 bytes per pixel, row major), the buffer layout plotters'
/// bitmap backend draws into.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; (width as usize) * (height as usize) * 3],
            state: DrawState::default(),
            saved: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Resize the canvas. Contents and drawing state are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![255; (width as usize) * (height as usize) * 3];
        self.state = DrawState::default();
        self.saved.clear();
    }

    /// Paint every pixel white and reset the drawing state.
    pub fn clear(&mut self) {
        self.pixels.fill(255);
        self.state = DrawState::default();
        self.saved.clear();
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Push the current drawing state.
    pub fn save(&mut self) {
        self.saved.push(self.state);
    }

    /// Pop the last saved drawing state. A restore without a matching save is ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    pub fn set_global_alpha(&mut self, alpha: f64) {
        // Out of range values are ignored, like a 2D context does.
        if (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    pub fn set_fill_style(&mut self, color: Color) {
        self.state.fill_style = color;
    }

    /// Fill a rectangle with the current fill style, blended source-over with
    /// the global alpha. Negative extents are normalised and the rectangle is
    /// clipped to the canvas.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return;
        }
        let (x0, x1) = ordered(x, x + width);
        let (y0, y1) = ordered(y, y + height);

        let x0 = x0.round().max(0.0) as u32;
        let y0 = y0.round().max(0.0) as u32;
        let x1 = (x1.round().max(0.0) as u32).min(self.width);
        let y1 = (y1.round().max(0.0) as u32).min(self.height);

        let color = self.state.fill_style;
        let alpha = (color.a * self.state.global_alpha).clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }

        for py in y0..y1 {
            for px in x0..x1 {
                let i = self.offset(px, py);
                self.pixels[i] = blend(self.pixels[i], color.r, alpha);
                self.pixels[i + 1] = blend(self.pixels[i + 1], color.g, alpha);
                self.pixels[i + 2] = blend(self.pixels[i + 2], color.b, alpha);
            }
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 3
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn blend(dst: u8, src: u8, alpha: f64) -> u8 {
    (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_white() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.pixels().len(), 4 * 3 * 3);
        assert_eq!(canvas.pixel(3, 2), Some([255, 255, 255]));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_rect_blends_with_global_alpha() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_global_alpha(0.1);
        canvas.set_fill_style(Color::GREEN);
        canvas.fill_rect(2.0, 2.0, 4.0, 4.0);

        // 255 * 0.9 = 229.5, 128 * 0.1 + 255 * 0.9 = 242.3
        assert_eq!(canvas.pixel(3, 3), Some([230, 242, 230]));
        assert_eq!(canvas.pixel(1, 1), Some([255, 255, 255]));
        assert_eq!(canvas.pixel(6, 6), Some([255, 255, 255]));
    }

    #[test]
    fn test_fill_rect_clips_and_normalises() {
        let mut canvas = Canvas::new(5, 5);
        canvas.set_fill_style(Color::BLACK);
        canvas.fill_rect(4.0, 4.0, -10.0, -10.0);
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(4, 4), Some([255, 255, 255]));

        canvas.clear();
        canvas.set_fill_style(Color::BLACK);
        canvas.fill_rect(-3.0, 3.0, 100.0, 100.0);
        assert_eq!(canvas.pixel(4, 4), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(4, 2), Some([255, 255, 255]));
    }

    #[test]
    fn test_save_restore() {
        let mut canvas = Canvas::new(2, 2);
        canvas.save();
        canvas.set_global_alpha(0.1);
        canvas.set_fill_style(Color::GREEN);
        assert_eq!(canvas.state().global_alpha, 0.1);
        canvas.restore();
        assert_eq!(canvas.state(), DrawState::default());

        // Unbalanced restore keeps the current state.
        canvas.set_global_alpha(0.5);
        canvas.restore();
        assert_eq!(canvas.state().global_alpha, 0.5);
    }

    #[test]
    fn test_invalid_alpha_is_ignored() {
        let mut canvas = Canvas::new(1, 1);
        canvas.set_global_alpha(1.5);
        assert_eq!(canvas.state().global_alpha, 1.0);
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::GREEN.to_string(), "rgb(0, 128, 0)");
        assert_eq!(
            Color::rgb(54, 162, 235).with_alpha(0.5).to_string(),
            "rgba(54, 162, 235, 0.5)"
        );
    }
}

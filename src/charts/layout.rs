//! Chart Layout
//! Splits a surface into legend, axis gutters and the chart area, and fits the scales.

use crate::charts::config::ChartConfig;
use crate::charts::scale::{CategoryScale, ChartArea, LinearScale};

/// Outer padding around everything.
pub const PADDING: f64 = 10.0;
/// Height of the legend strip when the legend is displayed.
pub const LEGEND_HEIGHT: f64 = 30.0;
/// Width of the y tick-label gutter.
pub const Y_LABEL_WIDTH: f64 = 44.0;
/// Extra width for the rotated y axis title.
pub const Y_TITLE_WIDTH: f64 = 20.0;
/// Height of the x tick-label strip.
pub const X_LABEL_HEIGHT: f64 = 30.0;
/// Approximate pixel width of one tick-label character.
pub const LABEL_CHAR_WIDTH: f64 = 7.0;

/// Where everything goes for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub chart_area: ChartArea,
    pub x: CategoryScale,
    pub y: LinearScale,
    pub x_ticks: Vec<usize>,
}

impl ChartLayout {
    pub fn compute(config: &ChartConfig, width: u32, height: u32) -> Self {
        let width = width as f64;
        let height = height as f64;
        let options = &config.options;

        let legend = if options.plugins.legend.display && !config.data.datasets.is_empty() {
            LEGEND_HEIGHT
        } else {
            0.0
        };
        let y_title = if options.scales.y.title.display {
            Y_TITLE_WIDTH
        } else {
            0.0
        };

        let left = PADDING + y_title + Y_LABEL_WIDTH;
        let top = PADDING + legend;
        let right = (width - PADDING).max(left);
        let bottom = (height - PADDING - X_LABEL_HEIGHT).max(top);
        let chart_area = ChartArea {
            left,
            top,
            right,
            bottom,
        };

        let values: Vec<f64> = config
            .data
            .datasets
            .iter()
            .flat_map(|d| d.data.iter().take(config.data.labels.len()).copied())
            .collect();

        let x = CategoryScale::new(config.data.labels.clone(), left, right);
        let y = LinearScale::fit(&values, top, bottom);

        let ticks = &options.scales.x.ticks;
        let max_ticks = ticks.max_ticks_limit.unwrap_or(usize::MAX);
        let label_width = Self::label_width(&config.data.labels);
        let x_ticks = x.visible_ticks(ticks.auto_skip, max_ticks, label_width);

        Self {
            width,
            height,
            chart_area,
            x,
            y,
            x_ticks,
        }
    }

    /// Pixel width a tick label needs, padding included.
    fn label_width(labels: &[String]) -> f64 {
        let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        longest as f64 * LABEL_CHAR_WIDTH + 12.0
    }

    /// Pixel positions of a dataset's points. Values past the last label, or
    /// non finite values, have no position.
    pub fn points(&self, data: &[f64]) -> Vec<Option<(f64, f64)>> {
        data.iter()
            .enumerate()
            .map(|(i, &v)| {
                if i >= self.x.len() || !v.is_finite() {
                    None
                } else {
                    Some((self.x.get_pixel_for_index(i), self.y.get_pixel_for_value(v)))
                }
            })
            .collect()
    }
}

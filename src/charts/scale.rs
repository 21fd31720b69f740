//! Axis Scales
//! Category (x) and linear (y) scales mapping chart values to pixels.

/// Chart area in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ChartArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Upper bound on generated linear ticks.
pub const MAX_LINEAR_TICKS: usize = 11;
/// Vertical pixels reserved per linear tick label.
const LINEAR_TICK_SPACING_PX: f64 = 40.0;

/// Linear value scale laid out vertically (value grows upwards).
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    pub top: f64,
    pub bottom: f64,
}

impl LinearScale {
    /// Fit a scale to the data range, snapping bounds to nicely spaced ticks.
    ///
    /// Non finite values are ignored. With no usable data the scale spans 0..1.
    pub fn fit(values: &[f64], top: f64, bottom: f64) -> Self {
        let (mut min, mut max) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 1.0;
        } else if min == max {
            let offset = if max == 0.0 { 1.0 } else { (max * 0.05).abs() };
            min -= offset;
            max += offset;
        }

        let max_ticks = Self::tick_limit(bottom - top);
        let ticks = nice_ticks(min, max, max_ticks);
        let (min, max) = match (ticks.first(), ticks.last()) {
            (Some(&lo), Some(&hi)) if hi > lo => (lo, hi),
            _ => (min, max),
        };

        Self {
            min,
            max,
            ticks,
            top,
            bottom,
        }
    }

    /// How many ticks fit in the given pixel height.
    pub fn tick_limit(height: f64) -> usize {
        ((height / LINEAR_TICK_SPACING_PX).ceil() as usize).clamp(2, MAX_LINEAR_TICKS)
    }

    pub fn get_pixel_for_value(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return self.bottom;
        }
        self.bottom - (value - self.min) / range * (self.bottom - self.top)
    }

    /// Pixel of the fill origin: zero clamped into the scale range.
    pub fn origin_pixel(&self) -> f64 {
        self.get_pixel_for_value(0.0_f64.clamp(self.min, self.max))
    }
}

/// Rounds a range to 1, 2, 5 or 10 times a power of ten.
fn nice_num(range: f64) -> f64 {
    let rounded = range.round();
    let range = if (range - rounded).abs() <= range / 1000.0 {
        rounded
    } else {
        range
    };
    let nice_range = 10f64.powf(range.log10().floor());
    let fraction = range / nice_range;
    let nice_fraction = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice_fraction * nice_range
}

/// Evenly spaced ticks covering `min..=max`, at most `max_ticks` of them.
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let max_spaces = max_ticks.max(2) as f64 - 1.0;
    let range = max - min;
    if !(range > 0.0) {
        return vec![min];
    }

    let mut spacing = nice_num(range / max_spaces);
    let mut nice_min = (min / spacing).floor() * spacing;
    let mut nice_max = (max / spacing).ceil() * spacing;
    let spaces = ((nice_max - nice_min) / spacing).round();
    if spaces > max_spaces {
        spacing = nice_num(spaces * spacing / max_spaces);
        nice_min = (min / spacing).floor() * spacing;
        nice_max = (max / spacing).ceil() * spacing;
    }

    let count = ((nice_max - nice_min) / spacing).round() as usize;
    (0..=count)
        .map(|i| {
            let v = nice_min + i as f64 * spacing;
            // Trim float noise such as 0.30000000000000004.
            (v / spacing).round() * spacing
        })
        .collect()
}

/// Horizontal scale over string categories, first label at the left edge and
/// the last at the right edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScale {
    pub labels: Vec<String>,
    pub left: f64,
    pub right: f64,
}

impl CategoryScale {
    pub fn new(labels: Vec<String>, left: f64, right: f64) -> Self {
        Self {
            labels,
            left,
            right,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Pixel of the category at `index`. Indices past the last label extrapolate
    /// beyond the right edge.
    pub fn get_pixel_for_index(&self, index: usize) -> f64 {
        if self.labels.len() <= 1 {
            return (self.left + self.right) / 2.0;
        }
        let step = (self.right - self.left) / (self.labels.len() - 1) as f64;
        self.left + index as f64 * step
    }

    /// Index of the category closest to a pixel.
    pub fn get_index_for_pixel(&self, pixel: f64) -> Option<usize> {
        if self.labels.is_empty() {
            return None;
        }
        if self.labels.len() == 1 {
            return Some(0);
        }
        let step = (self.right - self.left) / (self.labels.len() - 1) as f64;
        let index = ((pixel - self.left) / step).round();
        Some(index.clamp(0.0, (self.labels.len() - 1) as f64) as usize)
    }

    /// Indices of the tick labels to show.
    ///
    /// Keeps every n-th label so that no more than `max_ticks_limit` remain, and
    /// no more than fit side by side when each needs `label_width` pixels.
    pub fn visible_ticks(
        &self,
        auto_skip: bool,
        max_ticks_limit: usize,
        label_width: f64,
    ) -> Vec<usize> {
        let n = self.labels.len();
        if !auto_skip || n == 0 {
            return (0..n).collect();
        }

        let fit = if label_width > 0.0 {
            ((self.right - self.left) / label_width).floor().max(1.0) as usize
        } else {
            n
        };
        let limit = max_ticks_limit.max(1).min(fit);
        if n <= limit {
            return (0..n).collect();
        }

        let spacing = n.div_ceil(limit);
        (0..n).step_by(spacing).collect()
    }
}

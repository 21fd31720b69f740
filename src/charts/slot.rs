//! Chart Slot
//! Caller-side owner of the single chart shown on a surface.

use crate::charts::backend::{ChartError, ChartHandle};
use tracing::debug;

/// Holds at most one live chart. Replacing it destroys the previous chart
/// before the new one is rendered.
pub struct ChartSlot<H: ChartHandle> {
    chart: Option<H>,
}

impl<H: ChartHandle> Default for ChartSlot<H> {
    fn default() -> Self {
        Self { chart: None }
    }
}

impl<H: ChartHandle> ChartSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&H> {
        self.chart.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut H> {
        self.chart.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.chart.is_none()
    }

    /// Destroy the current chart, then render a new one with `render`.
    ///
    /// If rendering fails the slot stays empty.
    pub fn replace<F>(&mut self, render: F) -> Result<&mut H, ChartError>
    where
        F: FnOnce() -> Result<H, ChartError>,
    {
        self.clear();
        let chart = render()?;
        Ok(self.chart.insert(chart))
    }

    /// Destroy the current chart, if any.
    pub fn clear(&mut self) {
        if let Some(chart) = self.chart.take() {
            debug!(chart = %chart.id(), "disposing previous chart");
            chart.destroy();
        }
    }
}

impl<H: ChartHandle> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::render::GlucoseChartRenderer;
    use crate::charts::renderer::LineChart;
    use crate::charts::surface::SurfaceRegistry;

    #[test]
    fn test_failed_render_leaves_slot_empty() {
        let registry = SurfaceRegistry::new();
        let mut slot: ChartSlot<LineChart> = ChartSlot::new();
        let result = slot.replace(|| {
            GlucoseChartRenderer::render(&registry, "glucoseChart", &["01/05/2024 08:00"], &[95.0])
        });
        assert!(result.is_err());
        assert!(slot.is_empty());
    }

    #[test]
    fn test_replace_disposes_previous_chart() {
        let mut registry = SurfaceRegistry::new();
        let surface = registry.create("glucoseChart", 640, 360);
        let mut slot: ChartSlot<LineChart> = ChartSlot::new();

        for values in [[95.0, 210.0], [120.0, 60.0]] {
            slot.replace(|| {
                GlucoseChartRenderer::render(
                    &registry,
                    "glucoseChart",
                    &["01/05/2024 08:00", "01/05/2024 12:00"],
                    &values,
                )
            })
            .unwrap();
            assert_eq!(surface.borrow().bound_charts(), 1);
        }

        slot.clear();
        assert_eq!(surface.borrow().bound_charts(), 0);
    }
}

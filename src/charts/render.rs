//! Glucose Chart Renderer
//! Builds the glucose line chart with its normal-range band on a named surface.

use crate::charts::backend::{ChartBackend, ChartError};
use crate::charts::config::{
    AxisTitle, CategoryAxisOptions, CategoryTickOptions, ChartConfig, ChartData, ChartOptions,
    Dataset, InteractionMode, InteractionOptions, LegendOptions, LinearAxisOptions, PluginOptions,
    ScaleOptions,
};
use crate::charts::label::format_date_labels;
use crate::charts::plugin::NormalBandPlugin;
use crate::charts::renderer::{LineChart, RasterBackend};
use crate::charts::surface::SurfaceRegistry;
use tracing::debug;

pub const DATASET_LABEL: &str = "Glicemia (mg/dL)";
pub const Y_AXIS_TITLE: &str = "mg/dL";
pub const LINE_TENSION: f64 = 0.35;
pub const POINT_RADIUS: f64 = 4.0;
pub const BORDER_WIDTH: f64 = 2.0;
pub const MAX_X_TICKS: usize = 8;

/// Renders glucose readings as a line chart.
pub struct GlucoseChartRenderer;

impl GlucoseChartRenderer {
    /// Render on the surface `surface_id` with the raster backend.
    pub fn render<S: AsRef<str>>(
        surfaces: &SurfaceRegistry,
        surface_id: &str,
        labels: &[S],
        values: &[f64],
    ) -> Result<LineChart, ChartError> {
        Self::render_with(&RasterBackend, surfaces, surface_id, labels, values)
    }

    /// Render through any backend.
    ///
    /// The surface is looked up first, so a missing surface fails before
    /// anything is built. Label and value lengths are not checked.
    pub fn render_with<B: ChartBackend, S: AsRef<str>>(
        backend: &B,
        surfaces: &SurfaceRegistry,
        surface_id: &str,
        labels: &[S],
        values: &[f64],
    ) -> Result<B::Handle, ChartError> {
        let surface = surfaces.context(surface_id)?;
        let config = Self::build_config(labels, values);
        debug!(surface = surface_id, readings = values.len(), "rendering glucose chart");
        backend.construct(surface, config)
    }

    /// Chart configuration for a set of readings.
    pub fn build_config<S: AsRef<str>>(labels: &[S], values: &[f64]) -> ChartConfig {
        let dataset = Dataset {
            fill: true,
            tension: LINE_TENSION,
            point_radius: POINT_RADIUS,
            border_width: BORDER_WIDTH,
            ..Dataset::new(DATASET_LABEL, values.to_vec())
        };

        let data = ChartData {
            labels: format_date_labels(labels),
            datasets: vec![dataset],
        };

        ChartConfig::line(data, Self::options()).with_plugin(NormalBandPlugin::default())
    }

    fn options() -> ChartOptions {
        ChartOptions {
            responsive: true,
            plugins: PluginOptions {
                legend: LegendOptions { display: true },
                tooltip: InteractionOptions {
                    mode: InteractionMode::Index,
                    intersect: false,
                },
            },
            interaction: InteractionOptions {
                mode: InteractionMode::Nearest,
                intersect: false,
            },
            scales: ScaleOptions {
                x: CategoryAxisOptions {
                    axis_type: "category",
                    ticks: CategoryTickOptions {
                        auto_skip: true,
                        max_ticks_limit: Some(MAX_X_TICKS),
                    },
                },
                y: LinearAxisOptions {
                    title: AxisTitle {
                        display: true,
                        text: Y_AXIS_TITLE.to_string(),
                    },
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::backend::{ChartHandle, ChartId};
    use crate::charts::canvas::Canvas;
    use crate::charts::layout::ChartLayout;
    use crate::charts::plugin::{ChartFrame, NORMAL_RANGE};
    use crate::charts::surface::{SurfaceError, SurfaceRef};

    /// Records what it was asked to build and runs plugins on a bare canvas.
    struct StubBackend;

    struct StubChart {
        id: ChartId,
        surface: SurfaceRef,
        config: ChartConfig,
        draws: usize,
    }

    impl ChartBackend for StubBackend {
        type Handle = StubChart;

        fn construct(
            &self,
            surface: SurfaceRef,
            config: ChartConfig,
        ) -> Result<StubChart, ChartError> {
            surface.borrow_mut().bind_chart();
            let mut chart = StubChart {
                id: ChartId::next(),
                surface,
                config,
                draws: 0,
            };
            chart.update()?;
            Ok(chart)
        }
    }

    impl ChartHandle for StubChart {
        fn id(&self) -> ChartId {
            self.id
        }

        fn config(&self) -> &ChartConfig {
            &self.config
        }

        fn config_mut(&mut self) -> &mut ChartConfig {
            &mut self.config
        }

        fn update(&mut self) -> Result<(), ChartError> {
            let mut surface = self.surface.borrow_mut();
            let canvas = surface.canvas_mut();
            let layout = ChartLayout::compute(&self.config, canvas.width(), canvas.height());
            for plugin in &self.config.plugins {
                plugin.after_draw(&mut ChartFrame {
                    ctx: &mut *canvas,
                    chart_area: layout.chart_area,
                    x: &layout.x,
                    y: &layout.y,
                });
            }
            self.draws += 1;
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32) -> Result<(), ChartError> {
            self.surface.borrow_mut().canvas_mut().resize(width, height);
            self.update()
        }

        fn destroy(self) {
            self.surface.borrow_mut().canvas_mut().clear();
            self.surface.borrow_mut().unbind_chart();
        }
    }

    fn registry() -> SurfaceRegistry {
        let mut registry = SurfaceRegistry::new();
        registry.create("glucoseChart", 640, 360);
        registry
    }

    const LABELS: [&str; 2] = ["01/05/2024 08:00", "01/05/2024 12:00"];
    const VALUES: [f64; 2] = [95.0, 210.0];

    fn render_stub(registry: &SurfaceRegistry, surface_id: &str) -> StubChart {
        GlucoseChartRenderer::render_with(&StubBackend, registry, surface_id, &LABELS, &VALUES)
            .unwrap()
    }

    #[test]
    fn test_config_matches_chart_description() {
        let config = GlucoseChartRenderer::build_config(&LABELS, &VALUES);
        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        assert_eq!(json["type"], "line");
        let dataset = &json["data"]["datasets"][0];
        assert_eq!(dataset["label"], "Glicemia (mg/dL)");
        assert_eq!(dataset["fill"], true);
        assert_eq!(dataset["tension"], 0.35);
        assert_eq!(dataset["pointRadius"], 4.0);
        assert_eq!(dataset["borderWidth"], 2.0);

        let options = &json["options"];
        assert_eq!(options["responsive"], true);
        assert_eq!(options["plugins"]["legend"]["display"], true);
        assert_eq!(options["plugins"]["tooltip"]["mode"], "index");
        assert_eq!(options["plugins"]["tooltip"]["intersect"], false);
        assert_eq!(options["interaction"]["mode"], "nearest");
        assert_eq!(options["interaction"]["intersect"], false);
        assert_eq!(options["scales"]["x"]["type"], "category");
        assert_eq!(options["scales"]["x"]["ticks"]["autoSkip"], true);
        assert_eq!(options["scales"]["x"]["ticks"]["maxTicksLimit"], 8);
        assert_eq!(options["scales"]["y"]["title"]["display"], true);
        assert_eq!(options["scales"]["y"]["title"]["text"], "mg/dL");
        assert_eq!(json["plugins"][0]["id"], "normalBand");
    }

    #[test]
    fn test_example_readings() {
        let registry = registry();
        let chart = render_stub(&registry, "glucoseChart");

        let config = chart.config();
        assert_eq!(
            config.data.labels,
            vec!["01/05/2024 - 08:00", "01/05/2024 - 12:00"]
        );
        assert_eq!(config.data.datasets.len(), 1);
        assert_eq!(config.data.datasets[0].data, VALUES.to_vec());

        let (width, height) = chart.surface.borrow().canvas().size();
        let layout = ChartLayout::compute(config, width, height);
        let band_top = layout.y.get_pixel_for_value(NORMAL_RANGE.max);
        let band_bottom = layout.y.get_pixel_for_value(NORMAL_RANGE.min);
        let inside = layout.y.get_pixel_for_value(95.0);
        let above = layout.y.get_pixel_for_value(210.0);
        assert!(inside > band_top && inside < band_bottom);
        assert!(above < band_top);
        assert_eq!(chart.draws, 1);
    }

    #[test]
    fn test_values_pass_through_untouched() {
        let labels = ["03/05/2024 08:00", "01/05/2024 08:00", "02/05/2024 08:00"];
        let values = [250.0, 40.0, 120.5];
        let config = GlucoseChartRenderer::build_config(&labels, &values);
        assert_eq!(config.data.datasets[0].data, vec![250.0, 40.0, 120.5]);
        assert_eq!(config.data.labels[0], "03/05/2024 - 08:00");
    }

    #[test]
    fn test_band_is_painted_after_draw() {
        let registry = registry();
        let chart = render_stub(&registry, "glucoseChart");
        let surface = chart.surface.borrow();
        let canvas: &Canvas = surface.canvas();
        let layout = ChartLayout::compute(&chart.config, canvas.width(), canvas.height());

        let x = ((layout.chart_area.left + layout.chart_area.right) / 2.0) as u32;
        let y = layout.y.get_pixel_for_value(120.0) as u32;
        assert_eq!(canvas.pixel(x, y), Some([230, 242, 230]));
        let y = layout.y.get_pixel_for_value(215.0) as u32;
        assert_eq!(canvas.pixel(x, y), Some([255, 255, 255]));
    }

    #[test]
    fn test_missing_surface_fails() {
        let registry = registry();
        let result =
            GlucoseChartRenderer::render_with(&StubBackend, &registry, "nope", &LABELS, &VALUES);
        assert!(matches!(
            result,
            Err(ChartError::Surface(SurfaceError::NotFound(id))) if id == "nope"
        ));
    }

    #[test]
    fn test_mismatched_lengths_are_not_rejected() {
        let registry = registry();
        let chart = GlucoseChartRenderer::render_with(
            &StubBackend,
            &registry,
            "glucoseChart",
            &LABELS,
            &[95.0],
        )
        .unwrap();
        assert_eq!(chart.config().data.labels.len(), 2);
        assert_eq!(chart.config().data.datasets[0].data.len(), 1);
    }

    #[test]
    fn test_rendering_twice_creates_two_charts() {
        let registry = registry();
        let first = render_stub(&registry, "glucoseChart");
        let second = render_stub(&registry, "glucoseChart");

        assert_ne!(first.id(), second.id());
        let surface = registry.context("glucoseChart").unwrap();
        assert_eq!(surface.borrow().bound_charts(), 2);

        first.destroy();
        assert_eq!(surface.borrow().bound_charts(), 1);
        assert_eq!(second.config().data.labels.len(), 2);
    }
}

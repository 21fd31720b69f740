//! Raster Chart Renderer
//! Draws line charts onto surface canvases with plotters and runs post-draw plugins.
//!
//! Draw order:
//! 1. Background and legend strip
//! 2. Grid, tick labels and axis title
//! 3. Datasets: filled area, smoothed line, point markers
//! 4. `after_draw` plugins, in registration order

use crate::charts::backend::{ChartBackend, ChartError, ChartHandle, ChartId};
use crate::charts::canvas::Color;
use crate::charts::config::{ChartConfig, Dataset};
use crate::charts::curve::smooth_path;
use crate::charts::interaction::{self, ActiveElement, Tooltip};
use crate::charts::layout::{ChartLayout, LABEL_CHAR_WIDTH, PADDING};
use crate::charts::plugin::ChartFrame;
use crate::charts::surface::SurfaceRef;
use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, Circle, DrawingArea, DrawingBackend, IntoDrawingArea, IntoFont, PathElement,
    Polygon, Rectangle,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, Color as _, FontStyle, FontTransform, RGBAColor, TextStyle};
use std::io::Cursor;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

// Colors (RGBA)
const GRID: RGBAColor = RGBAColor(0, 0, 0, 0.1);
const AXIS: RGBAColor = RGBAColor(0, 0, 0, 0.25);
const TICK_TEXT: RGBAColor = RGBAColor(102, 102, 102, 1.0);

const FONT_FAMILY: &str = "sans-serif";
/// Registered as [`FONT_FAMILY`] so text does not depend on system fonts.
static FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const FONT_SIZE: f64 = 12.0;
/// Legend color box size.
const LEGEND_BOX: (i32, i32) = (40, 12);

fn drawing_error(err: impl std::fmt::Display) -> ChartError {
    ChartError::Drawing(err.to_string())
}

/// Register the bundled chart font once per process.
fn ensure_chart_font() -> Result<(), ChartError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *REGISTERED.get_or_init(|| {
        register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA).is_ok()
    });
    if registered {
        Ok(())
    } else {
        Err(ChartError::Drawing("bundled chart font could not be loaded".to_string()))
    }
}

/// Backend drawing into surface canvases.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterBackend;

impl ChartBackend for RasterBackend {
    type Handle = LineChart;

    fn construct(&self, surface: SurfaceRef, config: ChartConfig) -> Result<LineChart, ChartError> {
        LineChart::new(surface, config)
    }
}

/// Live line chart bound to a surface.
pub struct LineChart {
    id: ChartId,
    surface: SurfaceRef,
    config: ChartConfig,
    layout: ChartLayout,
}

impl LineChart {
    pub fn new(surface: SurfaceRef, config: ChartConfig) -> Result<Self, ChartError> {
        let (width, height) = surface.borrow().canvas().size();
        let layout = ChartLayout::compute(&config, width, height);
        surface.borrow_mut().bind_chart();

        let mut chart = Self {
            id: ChartId::next(),
            surface,
            config,
            layout,
        };

        for dataset in &chart.config.data.datasets {
            if dataset.data.len() != chart.config.data.labels.len() {
                warn!(
                    chart = %chart.id,
                    labels = chart.config.data.labels.len(),
                    values = dataset.data.len(),
                    "dataset length differs from label count"
                );
            }
        }

        // Dropping the chart on failure unbinds it again.
        chart.draw()?;
        info!(
            chart = %chart.id,
            surface = %chart.surface_id(),
            points = chart.config.data.labels.len(),
            "chart constructed"
        );
        Ok(chart)
    }

    pub fn surface(&self) -> &SurfaceRef {
        &self.surface
    }

    pub fn surface_id(&self) -> String {
        self.surface.borrow().id().to_string()
    }

    /// Layout of the last draw.
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Tooltip for a pointer position in surface pixels.
    pub fn tooltip_at(&self, x: f64, y: f64) -> Option<Tooltip> {
        interaction::tooltip_at(&self.config, &self.layout, x, y)
    }

    /// Elements highlighted by hovering at a pointer position.
    pub fn hovered_elements(&self, x: f64, y: f64) -> Vec<ActiveElement> {
        interaction::elements_at(&self.config, &self.layout, self.config.options.interaction, x, y)
    }

    /// Encode the surface as it is now to PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, ChartError> {
        let surface = self.surface.borrow();
        let canvas = surface.canvas();
        let (width, height) = canvas.size();
        let image = image::RgbImage::from_raw(width, height, canvas.pixels().to_vec())
            .ok_or_else(|| {
                ChartError::Drawing("surface buffer does not match its size".to_string())
            })?;

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    fn draw(&mut self) -> Result<(), ChartError> {
        ensure_chart_font()?;
        let mut surface = self.surface.borrow_mut();
        let canvas = surface.canvas_mut();
        let (width, height) = canvas.size();
        self.layout = ChartLayout::compute(&self.config, width, height);
        canvas.clear();

        {
            let root = BitMapBackend::with_buffer(canvas.pixels_mut(), (width, height))
                .into_drawing_area();
            draw_line_chart(&root, &self.config, &self.layout)?;
            root.present().map_err(drawing_error)?;
        }

        for plugin in &self.config.plugins {
            let mut frame = ChartFrame {
                ctx: &mut *canvas,
                chart_area: self.layout.chart_area,
                x: &self.layout.x,
                y: &self.layout.y,
            };
            plugin.after_draw(&mut frame);
        }

        debug!(chart = %self.id, width, height, "chart drawn");
        Ok(())
    }
}

impl ChartHandle for LineChart {
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
        self.draw()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), ChartError> {
        if !self.config.options.responsive {
            debug!(chart = %self.id, "ignoring resize of non-responsive chart");
            return Ok(());
        }
        if self.surface.borrow().canvas().size() == (width, height) {
            return Ok(());
        }
        self.surface.borrow_mut().canvas_mut().resize(width, height);
        self.draw()
    }

    fn destroy(self) {
        self.surface.borrow_mut().canvas_mut().clear();
        info!(chart = %self.id, "chart destroyed");
    }
}

impl Drop for LineChart {
    fn drop(&mut self) {
        self.surface.borrow_mut().unbind_chart();
    }
}

/// Draw a complete line chart (everything except plugins) on a drawing area.
pub fn draw_line_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
    layout: &ChartLayout,
) -> Result<(), ChartError> {
    root.fill(&Color::WHITE.to_plotters()).map_err(drawing_error)?;

    if config.options.plugins.legend.display {
        draw_legend(root, &config.data.datasets, layout.width)?;
    }
    draw_axes(root, config, layout)?;

    for dataset in &config.data.datasets {
        draw_dataset(root, dataset, layout)?;
    }
    Ok(())
}

fn text_style(anchor: Pos) -> TextStyle<'static> {
    (FONT_FAMILY, FONT_SIZE)
        .into_font()
        .color(&TICK_TEXT)
        .pos(anchor)
}

fn px(point: (f64, f64)) -> (i32, i32) {
    (point.0.round() as i32, point.1.round() as i32)
}

fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    datasets: &[Dataset],
    width: f64,
) -> Result<(), ChartError> {
    let item_widths: Vec<f64> = datasets
        .iter()
        .map(|d| LEGEND_BOX.0 as f64 + 10.0 + d.label.chars().count() as f64 * LABEL_CHAR_WIDTH)
        .collect();
    let gaps = item_widths.len().saturating_sub(1) as f64;
    let total: f64 = item_widths.iter().sum::<f64>() + 10.0 * gaps;

    let mut x = ((width - total) / 2.0).max(PADDING).round() as i32;
    let y = PADDING.round() as i32 + 6;

    for (dataset, item_width) in datasets.iter().zip(&item_widths) {
        let corners = [(x, y), (x + LEGEND_BOX.0, y + LEGEND_BOX.1)];
        root.draw(&Rectangle::new(corners, dataset.background_color.to_plotters().filled()))
            .map_err(drawing_error)?;
        root.draw(&Rectangle::new(
            corners,
            dataset
                .border_color
                .to_plotters()
                .stroke_width(dataset.border_width.round().max(1.0) as u32),
        ))
        .map_err(drawing_error)?;
        root.draw_text(
            &dataset.label,
            &text_style(Pos::new(HPos::Left, VPos::Center)),
            (x + LEGEND_BOX.0 + 10, y + LEGEND_BOX.1 / 2),
        )
        .map_err(drawing_error)?;
        x += (item_width + 10.0).round() as i32;
    }
    Ok(())
}

fn draw_axes<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
    layout: &ChartLayout,
) -> Result<(), ChartError> {
    let area = layout.chart_area;

    // Horizontal grid and y tick labels
    for &tick in &layout.y.ticks {
        let y = layout.y.get_pixel_for_value(tick);
        root.draw(&PathElement::new(
            vec![px((area.left, y)), px((area.right, y))],
            GRID.stroke_width(1),
        ))
        .map_err(drawing_error)?;
        root.draw_text(
            &format_tick(tick),
            &text_style(Pos::new(HPos::Right, VPos::Center)),
            px((area.left - 8.0, y)),
        )
        .map_err(drawing_error)?;
    }

    // Vertical grid and x tick labels
    for &index in &layout.x_ticks {
        let x = layout.x.get_pixel_for_index(index);
        root.draw(&PathElement::new(
            vec![px((x, area.top)), px((x, area.bottom))],
            GRID.stroke_width(1),
        ))
        .map_err(drawing_error)?;
        root.draw_text(
            &layout.x.labels[index],
            &text_style(Pos::new(HPos::Center, VPos::Top)),
            px((x, area.bottom + 8.0)),
        )
        .map_err(drawing_error)?;
    }

    // Axis lines
    root.draw(&PathElement::new(
        vec![
            px((area.left, area.top)),
            px((area.left, area.bottom)),
            px((area.right, area.bottom)),
        ],
        AXIS.stroke_width(1),
    ))
    .map_err(drawing_error)?;

    let title = &config.options.scales.y.title;
    if title.display {
        let style = (FONT_FAMILY, FONT_SIZE)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&TICK_TEXT)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw_text(
            &title.text,
            &style,
            px((PADDING + 8.0, (area.top + area.bottom) / 2.0)),
        )
        .map_err(drawing_error)?;
    }
    Ok(())
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let formatted = format!("{:.3}", value);
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn draw_dataset<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    layout: &ChartLayout,
) -> Result<(), ChartError> {
    let points = layout.points(&dataset.data);
    let origin = layout.y.origin_pixel();

    // Gaps (missing values) split the line into runs.
    let runs: Vec<Vec<(f64, f64)>> = points
        .split(|p| p.is_none())
        .map(|run| run.iter().flatten().copied().collect::<Vec<_>>())
        .filter(|run: &Vec<(f64, f64)>| !run.is_empty())
        .collect();

    for run in &runs {
        let path = smooth_path(run, dataset.tension, &layout.chart_area);
        let pixels: Vec<(i32, i32)> = path.iter().copied().map(px).collect();

        if dataset.fill && pixels.len() > 1 {
            let mut polygon = pixels.clone();
            polygon.push(px((run[run.len() - 1].0, origin)));
            polygon.push(px((run[0].0, origin)));
            root.draw(&Polygon::new(polygon, dataset.background_color.to_plotters().filled()))
                .map_err(drawing_error)?;
        }

        if dataset.border_width > 0.0 && pixels.len() > 1 {
            let style = dataset
                .border_color
                .to_plotters()
                .stroke_width(dataset.border_width.round() as u32);
            root.draw(&PathElement::new(pixels, style)).map_err(drawing_error)?;
        }

        if dataset.point_radius > 0.0 {
            let radius = dataset.point_radius.round() as i32;
            let fill = dataset.background_color.to_plotters().filled();
            let stroke = dataset.border_color.to_plotters().stroke_width(1);
            for &point in run {
                root.draw(&Circle::new(px(point), radius, fill))
                    .map_err(drawing_error)?;
                root.draw(&Circle::new(px(point), radius, stroke))
                    .map_err(drawing_error)?;
            }
        }
    }
    Ok(())
}

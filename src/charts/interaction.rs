//! Pointer Interaction
//! Hit testing for hover (nearest element) and tooltips (index mode).

use crate::charts::config::{ChartConfig, InteractionMode, InteractionOptions};
use crate::charts::layout::ChartLayout;

/// One drawn point: dataset and data index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveElement {
    pub dataset_index: usize,
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Tooltip content for a hovered position.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub lines: Vec<String>,
    pub elements: Vec<ActiveElement>,
}

/// Elements selected by an interaction mode at a pointer position.
///
/// With `intersect` set, only points whose marker lies under the pointer count.
pub fn elements_at(
    config: &ChartConfig,
    layout: &ChartLayout,
    options: InteractionOptions,
    x: f64,
    y: f64,
) -> Vec<ActiveElement> {
    let mut candidates = drawn_elements(config, layout);
    if options.intersect {
        candidates.retain(|e| {
            let radius = config.data.datasets[e.dataset_index].point_radius.max(1.0);
            distance(e.x, e.y, x, y) <= radius
        });
    }

    match options.mode {
        InteractionMode::Nearest => candidates
            .into_iter()
            .min_by(|a, b| {
                distance(a.x, a.y, x, y).total_cmp(&distance(b.x, b.y, x, y))
            })
            .into_iter()
            .collect(),
        InteractionMode::Index => {
            let Some(nearest) = candidates
                .iter()
                .min_by(|a, b| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
            else {
                return Vec::new();
            };
            let index = nearest.index;
            candidates.into_iter().filter(|e| e.index == index).collect()
        }
    }
}

/// Tooltip at a pointer position, using the tooltip interaction options.
pub fn tooltip_at(config: &ChartConfig, layout: &ChartLayout, x: f64, y: f64) -> Option<Tooltip> {
    if !layout.chart_area.contains(x, y) {
        return None;
    }
    let elements = elements_at(config, layout, config.options.plugins.tooltip, x, y);
    let first = elements.first()?;

    let title = config.data.labels.get(first.index).cloned().unwrap_or_default();
    let lines = elements
        .iter()
        .map(|e| {
            let dataset = &config.data.datasets[e.dataset_index];
            format!("{}: {}", dataset.label, dataset.data[e.index])
        })
        .collect();

    Some(Tooltip {
        title,
        lines,
        elements,
    })
}

fn drawn_elements(config: &ChartConfig, layout: &ChartLayout) -> Vec<ActiveElement> {
    config
        .data
        .datasets
        .iter()
        .enumerate()
        .flat_map(|(dataset_index, dataset)| {
            layout
                .points(&dataset.data)
                .into_iter()
                .enumerate()
                .filter_map(move |(index, point)| {
                    point.map(|(x, y)| ActiveElement {
                        dataset_index,
                        index,
                        x,
                        y,
                    })
                })
        })
        .collect()
}

fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

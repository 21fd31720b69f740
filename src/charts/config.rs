//! Chart Configuration
//! `{type, data, options, plugins}` description of a chart, serialisable to JSON.

use crate::charts::canvas::Color;
use crate::charts::plugin::ChartPlugin;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::rc::Rc;

/// Default dataset line color.
pub const DEFAULT_BORDER_COLOR: Color = Color::rgb(54, 162, 235);
/// Default dataset fill and point color.
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::rgba(54, 162, 235, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
}

/// Complete chart description handed to a backend.
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
    #[serde(serialize_with = "serialize_plugin_ids")]
    pub plugins: Vec<Rc<dyn ChartPlugin>>,
}

impl ChartConfig {
    pub fn line(data: ChartData, options: ChartOptions) -> Self {
        Self {
            chart_type: ChartType::Line,
            data,
            options,
            plugins: Vec::new(),
        }
    }

    pub fn with_plugin(mut self, plugin: impl ChartPlugin + 'static) -> Self {
        self.plugins.push(Rc::new(plugin));
        self
    }

    pub fn plugin_ids(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.id()).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn serialize_plugin_ids<S: Serializer>(
    plugins: &[Rc<dyn ChartPlugin>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(plugins.len()))?;
    for plugin in plugins {
        seq.serialize_element(&serde_json::json!({ "id": plugin.id() }))?;
    }
    seq.end()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub fill: bool,
    pub tension: f64,
    pub point_radius: f64,
    pub border_width: f64,
    pub border_color: Color,
    pub background_color: Color,
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            fill: false,
            tension: 0.0,
            point_radius: 3.0,
            border_width: 3.0,
            border_color: DEFAULT_BORDER_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: PluginOptions,
    pub interaction: InteractionOptions,
    pub scales: ScaleOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            plugins: PluginOptions::default(),
            interaction: InteractionOptions {
                mode: InteractionMode::Nearest,
                intersect: true,
            },
            scales: ScaleOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginOptions {
    pub legend: LegendOptions,
    pub tooltip: InteractionOptions,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            legend: LegendOptions { display: true },
            tooltip: InteractionOptions {
                mode: InteractionMode::Nearest,
                intersect: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendOptions {
    pub display: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Every dataset's element at the hovered index.
    Index,
    /// The single element closest to the pointer.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteractionOptions {
    pub mode: InteractionMode,
    pub intersect: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScaleOptions {
    pub x: CategoryAxisOptions,
    pub y: LinearAxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAxisOptions {
    #[serde(rename = "type")]
    pub axis_type: &'static str,
    pub ticks: CategoryTickOptions,
}

impl Default for CategoryAxisOptions {
    fn default() -> Self {
        Self {
            axis_type: "category",
            ticks: CategoryTickOptions {
                auto_skip: true,
                max_ticks_limit: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTickOptions {
    pub auto_skip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticks_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinearAxisOptions {
    pub title: AxisTitle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::plugin::NormalBandPlugin;

    #[test]
    fn test_config_json_shape() {
        let config = ChartConfig::line(
            ChartData {
                labels: vec!["a".into()],
                datasets: vec![Dataset::new("Series", vec![1.5])],
            },
            ChartOptions::default(),
        )
        .with_plugin(NormalBandPlugin::default());

        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["data"]["labels"][0], "a");
        assert_eq!(json["data"]["datasets"][0]["data"][0], 1.5);
        assert_eq!(json["data"]["datasets"][0]["borderColor"], "rgb(54, 162, 235)");
        assert_eq!(json["options"]["scales"]["x"]["type"], "category");
        assert_eq!(json["options"]["interaction"]["mode"], "nearest");
        assert!(json["options"]["scales"]["x"]["ticks"].get("maxTicksLimit").is_none());
        assert_eq!(json["plugins"][0]["id"], "normalBand");
    }

    #[test]
    fn test_plugin_ids() {
        let config = ChartConfig::line(ChartData::default(), ChartOptions::default());
        assert!(config.plugin_ids().is_empty());
        let config = config.with_plugin(NormalBandPlugin::default());
        assert_eq!(config.plugin_ids(), vec!["normalBand"]);
    }
}

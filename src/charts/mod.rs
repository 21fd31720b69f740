//! Charts module - Chart model, rendering and the glucose chart

pub mod backend;
pub mod canvas;
pub mod config;
pub mod curve;
pub mod interaction;
pub mod label;
pub mod layout;
pub mod plugin;
pub mod render;
pub mod renderer;
pub mod scale;
pub mod slot;
pub mod surface;

pub use backend::{ChartBackend, ChartError, ChartHandle, ChartId};
pub use canvas::{Canvas, Color};
pub use config::ChartConfig;
pub use interaction::Tooltip;
pub use label::format_date_label;
pub use plugin::{NormalRange, NORMAL_RANGE};
pub use render::GlucoseChartRenderer;
pub use renderer::LineChart;
pub use slot::ChartSlot;
pub use surface::{SurfaceError, SurfaceRegistry};

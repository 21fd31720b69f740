//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod readings_table;

pub use app::{GlucoseApp, CHART_SURFACE_ID};
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use readings_table::ReadingsTable;

//! Chart Backend Interface
//! The seam between the glucose renderer and whatever draws charts.

use crate::charts::config::ChartConfig;
use crate::charts::surface::{SurfaceError, SurfaceRef};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Failed to encode chart image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Process-unique chart identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartId(u64);

impl ChartId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ChartId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chart#{}", self.0)
    }
}

/// Builds live charts from a configuration.
pub trait ChartBackend {
    type Handle: ChartHandle;

    /// Construct a chart bound to `surface` and draw it once.
    fn construct(
        &self,
        surface: SurfaceRef,
        config: ChartConfig,
    ) -> Result<Self::Handle, ChartError>;
}

/// A live chart owned by the caller.
pub trait ChartHandle {
    fn id(&self) -> ChartId;

    fn config(&self) -> &ChartConfig;

    fn config_mut(&mut self) -> &mut ChartConfig;

    /// Redraw after the configuration changed.
    fn update(&mut self) -> Result<(), ChartError>;

    /// Resize the surface and redraw. Charts that are not responsive ignore it.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), ChartError>;

    /// Clear the surface and release the chart.
    fn destroy(self)
    where
        Self: Sized;
}

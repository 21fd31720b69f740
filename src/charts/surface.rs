//! Drawing Surfaces
//! Named canvases a host exposes for charts to paint on.

use crate::charts::canvas::Canvas;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("No drawing surface with id '{0}'")]
    NotFound(String),
}

/// Shared handle to a surface. Charts and their host hold it together.
pub type SurfaceRef = Rc<RefCell<Surface>>;

/// A drawable element: an id, its canvas and how many charts are bound to it.
pub struct Surface {
    id: String,
    canvas: Canvas,
    bound_charts: usize,
}

impl Surface {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            canvas: Canvas::new(width, height),
            bound_charts: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Number of live charts drawing on this surface.
    pub fn bound_charts(&self) -> usize {
        self.bound_charts
    }

    pub fn bind_chart(&mut self) {
        self.bound_charts += 1;
    }

    pub fn unbind_chart(&mut self) {
        self.bound_charts = self.bound_charts.saturating_sub(1);
    }
}

/// Element lookup of the hosting environment.
#[derive(Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<String, SurfaceRef>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or replace) a surface and return it.
    pub fn create(&mut self, id: &str, width: u32, height: u32) -> SurfaceRef {
        debug!(surface = id, width, height, "creating surface");
        let surface = Rc::new(RefCell::new(Surface::new(id, width, height)));
        self.surfaces.insert(id.to_string(), Rc::clone(&surface));
        surface
    }

    /// Acquire the drawing context of a surface.
    pub fn context(&self, id: &str) -> Result<SurfaceRef, SurfaceError> {
        self.surfaces
            .get(id)
            .cloned()
            .ok_or_else(|| SurfaceError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_lookup() {
        let mut registry = SurfaceRegistry::new();
        registry.create("glucoseChart", 320, 200);

        let surface = registry.context("glucoseChart").unwrap();
        assert_eq!(surface.borrow().id(), "glucoseChart");
        assert_eq!(surface.borrow().canvas().size(), (320, 200));

        assert_eq!(
            registry.context("missing").err(),
            Some(SurfaceError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_context_is_shared() {
        let mut registry = SurfaceRegistry::new();
        let created = registry.create("s", 10, 10);
        let looked_up = registry.context("s").unwrap();
        looked_up.borrow_mut().bind_chart();
        assert_eq!(created.borrow().bound_charts(), 1);
    }

    #[test]
    fn test_unbind_saturates() {
        let mut surface = Surface::new("s", 1, 1);
        surface.unbind_chart();
        assert_eq!(surface.bound_charts(), 0);
    }
}

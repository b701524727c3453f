//! Spring-driven scale-up while hovered.

use crate::animation::{Spring, SpringConfig};
use crate::element::ElementId;

/// Scale reached while hovered.
pub const HOVER_SCALE: f32 = 1.05;

/// Grows an element slightly while the pointer is over it.
#[derive(Debug, Clone)]
pub struct HoverScale {
    element: ElementId,
    scale: Spring,
}

impl HoverScale {
    /// Creates an unhovered (scale 1) controller.
    #[must_use]
    pub fn new(element: ElementId, spring: SpringConfig) -> Self {
        Self {
            element,
            scale: Spring::new(1.0, spring),
        }
    }

    /// The element being scaled.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Sets hover state.
    pub fn set_hovered(&mut self, hovered: bool) {
        self.scale.set_target(if hovered { HOVER_SCALE } else { 1.0 });
    }

    /// Advances one frame.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.scale.tick(dt)
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// Returns true when at rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.scale.is_settled()
    }
}

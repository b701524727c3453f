//! Magnetic buttons.
//!
//! While the pointer is over a button, the button is pulled toward it by a
//! fixed fraction of the pointer's distance from the button's center. On
//! leave it springs back home.

use crate::animation::Spring2D;
use crate::config::MagneticConfig;
use crate::element::ElementId;
use crate::layout::Rect;

/// Attraction state for one element.
#[derive(Debug, Clone)]
pub struct MagneticFieldController {
    element: ElementId,
    attraction: f32,
    max_offset: Option<f32>,
    offset: Spring2D,
    inside: bool,
}

impl MagneticFieldController {
    /// Creates a controller at rest for `element`.
    #[must_use]
    pub fn new(element: ElementId, config: &MagneticConfig) -> Self {
        Self {
            element,
            attraction: config.attraction,
            max_offset: config.max_offset,
            offset: Spring2D::new(0.0, 0.0, config.spring),
            inside: false,
        }
    }

    /// The element this controller moves.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Pull for a pointer at `(x, y)` over an element measured as `bounds`.
    ///
    /// Empty bounds (not laid out yet) give no pull.
    #[must_use]
    pub fn attraction_for(&self, x: f32, y: f32, bounds: Rect) -> (f32, f32) {
        if bounds.is_empty() {
            return (0.0, 0.0);
        }
        let (cx, cy) = bounds.center();
        let dx = (x - cx) * self.attraction;
        let dy = (y - cy) * self.attraction;

        match self.max_offset {
            Some(max) => {
                let len = dx.hypot(dy);
                if len > max {
                    let k = max / len;
                    (dx * k, dy * k)
                } else {
                    (dx, dy)
                }
            }
            None => (dx, dy),
        }
    }

    /// Pointer moved while over the element. `bounds` must be measured now,
    /// not cached, so layout shifts are honoured.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, bounds: Rect) {
        self.inside = true;
        let (tx, ty) = self.attraction_for(x, y, bounds);
        self.offset.set_target(tx, ty);
    }

    /// Pointer left the element.
    pub fn on_pointer_leave(&mut self) {
        self.inside = false;
        self.offset.set_target(0.0, 0.0);
    }

    /// Returns true between a move and the following leave.
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Offset the spring is heading for.
    #[must_use]
    pub fn target(&self) -> (f32, f32) {
        self.offset.target()
    }

    /// Smoothed offset to translate the element by.
    #[must_use]
    pub fn offset(&self) -> (f32, f32) {
        self.offset.value()
    }

    /// Advances one frame and returns the new offset.
    pub fn tick(&mut self, dt: f32) -> (f32, f32) {
        self.offset.tick(dt)
    }

    /// Returns true once the offset is at rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.offset.is_settled()
    }
}

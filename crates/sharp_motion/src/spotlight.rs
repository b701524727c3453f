//! Spotlight text reveal for the hero heading.
//!
//! The heading is drawn twice: an outline copy, and a solid copy clipped to a
//! circle under the pointer. The circle tracks the pointer 1:1 with no
//! easing, in contrast to the cursor.

use crate::config::SpotlightConfig;
use crate::element::ElementId;
use crate::input::PointerReader;
use crate::layout::Rect;
use crate::render::{RenderCommand, RenderLayer, RenderQueue};
use crate::style::Theme;

/// Mask center as a fraction of the region's size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpotlightState {
    /// Horizontal position in `[0, 1]`.
    pub x: f32,
    /// Vertical position in `[0, 1]`.
    pub y: f32,
}

impl SpotlightState {
    /// Center as percentages, for CSS-style positioning.
    #[must_use]
    pub fn as_percent(&self) -> (f32, f32) {
        (self.x * 100.0, self.y * 100.0)
    }
}

/// Computes the reveal circle for one region.
pub struct SpotlightMask {
    region: ElementId,
    pointer: PointerReader,
    config: SpotlightConfig,
    state: SpotlightState,
}

impl SpotlightMask {
    /// Creates a mask for `region` centered at its top-left corner.
    #[must_use]
    pub fn new(region: ElementId, pointer: PointerReader, config: SpotlightConfig) -> Self {
        Self {
            region,
            pointer,
            config,
            state: SpotlightState::default(),
        }
    }

    /// The region this mask belongs to.
    #[must_use]
    pub fn region(&self) -> ElementId {
        self.region
    }

    /// Current mask center.
    #[must_use]
    pub fn state(&self) -> SpotlightState {
        self.state
    }

    /// Recomputes the center from the latest pointer sample and the
    /// region's current bounds.
    ///
    /// Pointer outside the region, or an empty region, leaves the state
    /// unchanged. Returns true if the state was updated.
    pub fn on_pointer_move(&mut self, region_bounds: Rect) -> bool {
        let sample = self.pointer.sample();
        if !region_bounds.contains(sample.x, sample.y) {
            return false;
        }
        match region_bounds.normalize(sample.x, sample.y) {
            Some((x, y)) => {
                self.state = SpotlightState { x, y };
                true
            }
            None => false,
        }
    }

    /// Emits the outline and clipped solid layers.
    pub fn render(&self, theme: &Theme, queue: &mut RenderQueue) {
        queue.push(
            RenderLayer::Content,
            RenderCommand::SpotlightOutline {
                element: self.region,
                stroke: theme.spotlight_outline,
                width: self.config.outline_width,
            },
        );
        queue.push(
            RenderLayer::Content,
            RenderCommand::SpotlightReveal {
                element: self.region,
                center_percent: self.state.as_percent(),
                radius: self.config.radius,
                fill: theme.spotlight_fill,
            },
        );
    }
}

//! Custom cursor.
//!
//! A white circle that follows the pointer with a spring and grows while the
//! pointer is over anything interactive. It composites with
//! [`BlendMode::Difference`](crate::style::BlendMode::Difference) so it
//! inverts the content underneath.
//!
//! The springs chase an *anchor*, `pointer - diameter / 2`, rather than the
//! raw pointer. The anchor jumps the instant the mode flips; the drawn
//! circle eases after it.

use crate::animation::{Spring, Spring2D};
use crate::config::CursorConfig;
use crate::input::PointerReader;
use crate::layout::Rect;
use crate::render::{RenderCommand, RenderLayer, RenderQueue};
use crate::style::Theme;

/// Cursor state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Small circle.
    #[default]
    Idle,
    /// Enlarged circle over an interactive element.
    Hovering,
}

/// What the cursor looks like this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorVisualState {
    /// Smoothed left edge.
    pub anchor_x: f32,
    /// Smoothed top edge.
    pub anchor_y: f32,
    /// Smoothed diameter.
    pub diameter: f32,
    /// Mode flag.
    pub hovering: bool,
}

impl CursorVisualState {
    /// Bounds of the drawn circle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::square((self.anchor_x, self.anchor_y), self.diameter)
    }
}

/// Drives the custom cursor from the shared pointer snapshot.
pub struct CursorController {
    pointer: PointerReader,
    config: CursorConfig,
    mode: CursorMode,
    anchor: Spring2D,
    size: Spring,
    seen_generation: u64,
}

impl CursorController {
    /// Creates a cursor resting on the current pointer position.
    #[must_use]
    pub fn new(pointer: PointerReader, config: CursorConfig) -> Self {
        let snapshot = pointer.snapshot();
        let mode = if snapshot.hovering {
            CursorMode::Hovering
        } else {
            CursorMode::Idle
        };
        let diameter = Self::diameter_for(&config, mode);
        let half = diameter * 0.5;

        Self {
            anchor: Spring2D::new(snapshot.sample.x - half, snapshot.sample.y - half, config.spring),
            size: Spring::new(diameter, config.spring),
            pointer,
            config,
            mode,
            seen_generation: snapshot.generation,
        }
    }

    fn diameter_for(config: &CursorConfig, mode: CursorMode) -> f32 {
        match mode {
            CursorMode::Idle => config.idle_diameter,
            CursorMode::Hovering => config.hover_diameter,
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// Diameter the size spring is heading for.
    #[must_use]
    pub fn target_diameter(&self) -> f32 {
        Self::diameter_for(&self.config, self.mode)
    }

    /// Anchor the position springs are heading for.
    #[must_use]
    pub fn target_anchor(&self) -> (f32, f32) {
        self.anchor.target()
    }

    /// Pulls the latest pointer snapshot and retargets the springs.
    ///
    /// Called at the start of every tick; cheap when nothing changed.
    pub fn sync(&mut self) {
        let snapshot = self.pointer.snapshot();
        if snapshot.generation == self.seen_generation {
            return;
        }
        self.seen_generation = snapshot.generation;

        let mode = if snapshot.hovering {
            CursorMode::Hovering
        } else {
            CursorMode::Idle
        };
        if mode != self.mode {
            tracing::trace!(?mode, "cursor mode");
            self.mode = mode;
        }

        let diameter = self.target_diameter();
        let half = diameter * 0.5;
        self.anchor
            .set_target(snapshot.sample.x - half, snapshot.sample.y - half);
        self.size.set_target(diameter);
    }

    /// Advances one frame.
    pub fn tick(&mut self, dt: f32) -> CursorVisualState {
        self.sync();
        self.anchor.tick(dt);
        self.size.tick(dt);
        self.state()
    }

    /// Current visual state.
    #[must_use]
    pub fn state(&self) -> CursorVisualState {
        let (anchor_x, anchor_y) = self.anchor.value();
        CursorVisualState {
            anchor_x,
            anchor_y,
            diameter: self.size.value(),
            hovering: self.mode == CursorMode::Hovering,
        }
    }

    /// Returns true when position and size are at rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.anchor.is_settled() && self.size.is_settled()
    }

    /// Emits the cursor circle.
    pub fn render(&self, theme: &Theme, queue: &mut RenderQueue) {
        queue.push(
            RenderLayer::Overlay,
            RenderCommand::Cursor {
                bounds: self.state().bounds(),
                color: theme.cursor_fill,
                blend: theme.cursor_blend,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ElementState, ElementTree};
    use crate::input::{ListenerRegistry, PointerTracker};

    fn setup() -> (ListenerRegistry, PointerTracker, CursorController) {
        let registry = ListenerRegistry::new();
        let tracker = PointerTracker::mount(&registry);
        let cursor = CursorController::new(tracker.reader(), CursorConfig::default());
        (registry, tracker, cursor)
    }

    #[test]
    fn test_idle_anchor_is_pointer_minus_half() {
        let (_registry, mut tracker, mut cursor) = setup();
        tracker.on_move(300.0, 200.0);
        cursor.tick(1.0 / 60.0);

        assert_eq!(cursor.mode(), CursorMode::Idle);
        assert_eq!(cursor.target_anchor(), (292.0, 192.0));
        assert_eq!(cursor.target_diameter(), 16.0);
    }

    #[test]
    fn test_hover_grows_on_next_tick() {
        let (_registry, mut tracker, mut cursor) = setup();
        let mut tree = ElementTree::new();
        let button = tree.next_id();
        tree.add_root(ElementState::new(button, ElementKind::Button)).unwrap();

        tracker.on_move(100.0, 100.0);
        assert!(tracker.on_over(&tree, Some(button)));
        cursor.tick(1.0 / 60.0);

        assert_eq!(cursor.mode(), CursorMode::Hovering);
        assert_eq!(cursor.target_diameter(), 64.0);
        assert_eq!(cursor.target_anchor(), (68.0, 68.0));
        // target flipped, drawn size still easing
        assert!(cursor.state().diameter < 64.0);
    }

    #[test]
    fn test_converges_to_anchor() {
        let (_registry, mut tracker, mut cursor) = setup();
        tracker.on_move(640.0, 360.0);

        for _ in 0..180 {
            cursor.tick(1.0 / 60.0);
        }

        let state = cursor.state();
        assert!(cursor.is_settled());
        assert_eq!((state.anchor_x, state.anchor_y), (632.0, 352.0));
        assert_eq!(state.bounds().center(), (640.0, 360.0));
    }

    #[test]
    fn test_render_uses_difference_blend() {
        let (_registry, _tracker, cursor) = setup();
        let mut queue = RenderQueue::new();
        queue.begin_frame();
        cursor.render(&Theme::SHARP, &mut queue);
        let frame = queue.end_frame();

        match frame.cursor() {
            Some(RenderCommand::Cursor { bounds, blend, .. }) => {
                assert_eq!(*blend, crate::style::BlendMode::Difference);
                assert_eq!(bounds.width, 16.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

//! # Scripted Sessions
//!
//! Plays the role of the browser: owns the viewport and scroll position,
//! reports layout and visibility, and turns raw pointer positions into
//! move/over/leave events.
//!
//! Layout and intersection reports are applied synchronously, the way a
//! browser finishes layout before dispatching input. Pointer input goes
//! through the stage's event bus and is applied on the next tick.

use sharp_motion::{
    ElementId, EventSender, FrameOutput, HostEvent, MotionConfig, MotionResult, MotionStage, Rect,
    RenderCommand,
};

use crate::page::LandingPage;

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionReport {
    /// Frames ticked.
    pub frames: u64,
    /// Simulated seconds.
    pub seconds: f64,
    /// Reveals that have fired.
    pub reveals_triggered: usize,
    /// Reveals registered on the page.
    pub reveals_total: usize,
    /// Number of hover target changes.
    pub hover_changes: u32,
    /// Largest cursor diameter drawn.
    pub max_cursor_diameter: f32,
    /// Pointer moves superseded while the bus was full.
    pub events_dropped: u64,
}

/// A visitor session against the landing page.
pub struct ScriptedSession {
    stage: MotionStage,
    page: LandingPage,
    sender: EventSender,
    width: f32,
    height: f32,
    scroll: f32,
    document: Vec<(ElementId, Rect)>,
    hovered: Option<ElementId>,
    hover_changes: u32,
    max_cursor_diameter: f32,
}

impl ScriptedSession {
    /// Mounts the page on a fresh stage with a `width × height` viewport
    /// scrolled to the top.
    ///
    /// # Errors
    ///
    /// Invalid `config` or page registration failures.
    pub fn new(config: MotionConfig, width: f32, height: f32) -> MotionResult<Self> {
        let mut stage = MotionStage::new(config)?;
        let page = LandingPage::mount(&mut stage)?;
        let sender = stage.sender();
        let document = page.layout(width, height);

        let mut session = Self {
            stage,
            page,
            sender,
            width,
            height,
            scroll: 0.0,
            document,
            hovered: None,
            hover_changes: 0,
            max_cursor_diameter: 0.0,
        };
        session.report_layout();
        Ok(session)
    }

    /// The stage being driven.
    #[must_use]
    pub fn stage(&self) -> &MotionStage {
        &self.stage
    }

    /// Element handles.
    #[must_use]
    pub fn page(&self) -> &LandingPage {
        &self.page
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Largest valid scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        (self.page.document_height(self.width, self.height) - self.height).max(0.0)
    }

    /// Returns true if `id` is positioned relative to the viewport rather
    /// than the document.
    #[must_use]
    pub fn is_fixed_element(&self, id: ElementId) -> bool {
        id == self.page.nav || self.page.nav_links.contains(&id)
    }

    /// Sends viewport-space boxes for every element, then visibility for
    /// every element whose reveal is still waiting.
    fn report_layout(&mut self) {
        let viewport = Rect::new(0.0, 0.0, self.width, self.height);
        for &(id, doc_rect) in &self.document {
            let rect = if self.is_fixed_element(id) {
                doc_rect
            } else {
                doc_rect.translate(0.0, -self.scroll)
            };
            self.stage.handle_event(HostEvent::Layout { element: id, rect });

            if self.stage.reveals().is_observing(id) {
                let ratio = rect.visible_ratio(&viewport);
                self.stage.handle_event(HostEvent::Intersection {
                    element: id,
                    ratio,
                    intersecting: ratio > 0.0,
                });
            }
        }
    }

    /// Scrolls to `y`, clamped to the document.
    pub fn scroll_to(&mut self, y: f32) {
        let y = y.clamp(0.0, self.max_scroll());
        if (y - self.scroll).abs() > f32::EPSILON {
            self.scroll = y;
            self.report_layout();
        }
    }

    /// Moves the pointer, posting a pointer-over whenever the element under
    /// it changes and a leave for the element it came from.
    pub fn move_pointer(&mut self, x: f32, y: f32) {
        self.sender.send(HostEvent::PointerMove { x, y });

        let target = if x < 0.0 || y < 0.0 || x > self.width || y > self.height {
            None
        } else {
            self.stage.tree().hit_test(x, y)
        };
        if target != self.hovered {
            if let Some(previous) = self.hovered {
                self.sender.send(HostEvent::PointerLeave { element: previous });
            }
            self.sender.send(HostEvent::PointerOver { target });
            self.hovered = target;
            self.hover_changes += 1;
        }
    }

    /// Pointer leaves the window.
    pub fn exit_viewport(&mut self) {
        if self.hovered.take().is_some() {
            self.hover_changes += 1;
        }
        self.sender.send(HostEvent::PointerExitViewport);
    }

    /// Runs one frame.
    pub fn tick(&mut self, dt: f32) -> FrameOutput {
        let frame = self.stage.tick(dt);
        if let Some(RenderCommand::Cursor { bounds, .. }) = frame.cursor() {
            self.max_cursor_diameter = self.max_cursor_diameter.max(bounds.width);
        }
        frame
    }

    /// Runs `frames` frames of `dt` and returns the last one.
    pub fn run(&mut self, frames: u32, dt: f32) -> FrameOutput {
        let mut last = FrameOutput::default();
        for _ in 0..frames {
            last = self.tick(dt);
        }
        last
    }

    /// Moves the pointer in a straight line over `frames` frames.
    pub fn sweep_pointer(&mut self, from: (f32, f32), to: (f32, f32), frames: u32, dt: f32) {
        let steps = frames.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.move_pointer(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
            self.tick(dt);
        }
    }

    /// Scrolls from the current offset to the bottom in `step` pixel
    /// increments, ticking `frames_per_step` frames after each.
    pub fn scroll_through(&mut self, step: f32, frames_per_step: u32, dt: f32) {
        let step = step.max(1.0);
        while self.scroll < self.max_scroll() {
            self.scroll_to(self.scroll + step);
            self.run(frames_per_step, dt);
        }
    }

    /// Snapshot of what happened so far.
    #[must_use]
    pub fn report(&self) -> SessionReport {
        let reveals = self.page.revealed_elements();
        SessionReport {
            frames: self.stage.clock().frames(),
            seconds: self.stage.clock().elapsed(),
            reveals_triggered: reveals
                .iter()
                .filter(|id| !self.stage.reveals().is_observing(**id))
                .count(),
            reveals_total: reveals.len(),
            hover_changes: self.hover_changes,
            max_cursor_diameter: self.max_cursor_diameter,
            events_dropped: self.stage.dropped_events(),
        }
    }
}

//! # Entrance Reveals
//!
//! One-shot entrance animations. Each registered element waits in
//! [`RevealPhase::Pending`] until the host first reports it intersecting the
//! viewport, then tweens from its initial props to rest after a staggered
//! delay. It never re-arms: scrolling away and back does nothing.
//!
//! ```text
//! register ──> Pending ──(intersecting && ratio >= threshold)──> Triggered
//!                 │                                                  │
//!          (observing)                              delay = base + order × stagger
//! ```

use std::collections::BTreeMap;

use crate::animation::{Easing, Tween};
use crate::config::RevealConfig;
use crate::element::ElementId;
use crate::error::{MotionError, MotionResult};

/// Transform and opacity handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualProps {
    /// Horizontal offset in pixels.
    pub offset_x: f32,
    /// Vertical offset in pixels.
    pub offset_y: f32,
    /// Opacity (0-1).
    pub opacity: f32,
    /// Uniform scale.
    pub scale: f32,
}

impl VisualProps {
    /// In place, fully opaque, unscaled.
    pub const REST: Self = Self {
        offset_x: 0.0,
        offset_y: 0.0,
        opacity: 1.0,
        scale: 1.0,
    };

    /// Linear blend, `t = 0` gives `from`.
    #[must_use]
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            offset_x: mix(from.offset_x, to.offset_x),
            offset_y: mix(from.offset_y, to.offset_y),
            opacity: mix(from.opacity, to.opacity),
            scale: mix(from.scale, to.scale),
        }
    }
}

impl Default for VisualProps {
    fn default() -> Self {
        Self::REST
    }
}

/// What starts a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealTrigger {
    /// First qualifying viewport intersection.
    #[default]
    Viewport,
    /// Registration itself (page-load entrance).
    Mount,
}

/// How one element enters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSpec {
    /// Props before the reveal starts.
    pub initial: VisualProps,
    /// Props after it ends.
    pub rest: VisualProps,
    /// Position in its stagger group.
    pub order: u32,
    /// Extra delay per order step, in seconds.
    pub stagger: f32,
    /// Fixed delay added before the stagger, in seconds.
    pub delay: f32,
    /// Tween length in seconds.
    pub duration: f32,
    /// Tween curve.
    pub easing: Easing,
    /// Minimum visible ratio to trigger.
    pub threshold: f32,
    /// Trigger source.
    pub trigger: RevealTrigger,
}

impl RevealSpec {
    /// A plain fade-in with timings taken from `config`.
    #[must_use]
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            initial: VisualProps {
                opacity: 0.0,
                ..VisualProps::REST
            },
            rest: VisualProps::REST,
            order: 0,
            stagger: config.stagger,
            delay: 0.0,
            duration: config.duration,
            easing: Easing::default(),
            threshold: config.threshold,
            trigger: RevealTrigger::Viewport,
        }
    }

    /// A plain fade-in with default timings.
    #[must_use]
    pub fn fade() -> Self {
        Self::from_config(&RevealConfig::default())
    }

    /// Starts `dx` pixels off to the side.
    #[must_use]
    pub fn slide_x(mut self, dx: f32) -> Self {
        self.initial.offset_x = dx;
        self
    }

    /// Starts `dy` pixels above or below.
    #[must_use]
    pub fn slide_y(mut self, dy: f32) -> Self {
        self.initial.offset_y = dy;
        self
    }

    /// Starts at `scale`.
    #[must_use]
    pub fn scale_from(mut self, scale: f32) -> Self {
        self.initial.scale = scale;
        self
    }

    /// Sets the stagger position.
    #[must_use]
    pub fn order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Sets the per-order delay.
    #[must_use]
    pub fn stagger(mut self, stagger: f32) -> Self {
        self.stagger = stagger;
        self
    }

    /// Sets the fixed delay.
    #[must_use]
    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the tween length.
    #[must_use]
    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the tween curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the visible-ratio threshold.
    #[must_use]
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Fires at registration instead of on intersection.
    #[must_use]
    pub fn on_mount(mut self) -> Self {
        self.trigger = RevealTrigger::Mount;
        self
    }

    /// Seconds between trigger and the first visible change.
    #[must_use]
    pub fn total_delay(&self) -> f32 {
        self.delay + self.order as f32 * self.stagger
    }
}

/// Lifecycle of a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Waiting for its trigger.
    Pending,
    /// Fired. Terminal.
    Triggered,
}

/// Scheduler-owned state for one element.
#[derive(Debug, Clone)]
pub struct RevealEntry {
    spec: RevealSpec,
    phase: RevealPhase,
    tween: Option<Tween>,
}

impl RevealEntry {
    fn new(spec: RevealSpec) -> Self {
        Self {
            spec,
            phase: RevealPhase::Pending,
            tween: None,
        }
    }

    fn trigger(&mut self) {
        self.phase = RevealPhase::Triggered;
        self.tween = Some(
            Tween::new(self.spec.duration, self.spec.easing).with_delay(self.spec.total_delay()),
        );
    }

    /// The spec it was registered with.
    #[must_use]
    pub fn spec(&self) -> &RevealSpec {
        &self.spec
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Current props.
    #[must_use]
    pub fn props(&self) -> VisualProps {
        match &self.tween {
            None => self.spec.initial,
            Some(tween) if tween.is_complete() => self.spec.rest,
            Some(tween) => VisualProps::lerp(self.spec.initial, self.spec.rest, tween.progress()),
        }
    }

    /// Returns true while the tween still needs ticks.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.as_ref().is_some_and(|t| !t.is_complete())
    }
}

/// Tracks every reveal on the page.
#[derive(Debug, Default)]
pub struct ViewportRevealScheduler {
    entries: BTreeMap<ElementId, RevealEntry>,
}

impl ViewportRevealScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element. Mount-triggered specs fire immediately.
    ///
    /// # Errors
    ///
    /// [`MotionError::DuplicateElement`] if the element already has a reveal.
    pub fn register(&mut self, element: ElementId, spec: RevealSpec) -> MotionResult<()> {
        if self.entries.contains_key(&element) {
            return Err(MotionError::DuplicateElement(element));
        }
        let mut entry = RevealEntry::new(spec);
        if spec.trigger == RevealTrigger::Mount {
            entry.trigger();
            tracing::debug!(?element, delay = spec.total_delay(), "mount reveal triggered");
        }
        self.entries.insert(element, entry);
        Ok(())
    }

    /// Removes an element's reveal. Returns false if it had none.
    pub fn unregister(&mut self, element: ElementId) -> bool {
        self.entries.remove(&element).is_some()
    }

    /// Handles an intersection report. Returns true if this call triggered
    /// the reveal.
    pub fn on_intersection(&mut self, element: ElementId, ratio: f32, intersecting: bool) -> bool {
        let Some(entry) = self.entries.get_mut(&element) else {
            tracing::debug!(?element, "intersection for element without reveal");
            return false;
        };
        if entry.phase != RevealPhase::Pending || entry.spec.trigger != RevealTrigger::Viewport {
            return false;
        }
        if !intersecting || ratio < entry.spec.threshold {
            return false;
        }

        entry.trigger();
        tracing::debug!(?element, ratio, delay = entry.spec.total_delay(), "reveal triggered");
        true
    }

    /// Advances every running tween.
    pub fn tick(&mut self, dt: f32) {
        for entry in self.entries.values_mut() {
            if let Some(tween) = entry.tween.as_mut() {
                tween.advance(dt);
            }
        }
    }

    /// Looks up an entry.
    #[must_use]
    pub fn entry(&self, element: ElementId) -> Option<&RevealEntry> {
        self.entries.get(&element)
    }

    /// Current props of an element.
    #[must_use]
    pub fn props(&self, element: ElementId) -> Option<VisualProps> {
        self.entries.get(&element).map(RevealEntry::props)
    }

    /// Current phase of an element.
    #[must_use]
    pub fn phase(&self, element: ElementId) -> Option<RevealPhase> {
        self.entries.get(&element).map(RevealEntry::phase)
    }

    /// Returns true while the host should keep reporting intersections for
    /// `element`.
    #[must_use]
    pub fn is_observing(&self, element: ElementId) -> bool {
        self.entries.get(&element).is_some_and(|e| {
            e.phase == RevealPhase::Pending && e.spec.trigger == RevealTrigger::Viewport
        })
    }

    /// Returns true if any triggered reveal is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.entries.values().any(RevealEntry::is_animating)
    }

    /// Every element with its current props, in ID order.
    pub fn iter_props(&self) -> impl Iterator<Item = (ElementId, VisualProps)> + '_ {
        self.entries.iter().map(|(id, e)| (*id, e.props()))
    }

    /// Number of registered reveals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

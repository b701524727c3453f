//! # Motion Stage
//!
//! Owns one instance of every controller and runs them from a single frame
//! scheduler.
//!
//! ## Frame
//!
//! ```text
//! tick(dt)
//!   1. clamp dt                         (FrameClock)
//!   2. drain host events                (EventBus → handle_event)
//!   3. step springs, tweens, marquee
//!   4. emit commands                    (RenderQueue → FrameOutput)
//! ```
//!
//! Hosts may also call [`MotionStage::handle_event`] directly instead of going
//! through the bus; both paths apply events identically.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::MotionConfig;
use crate::cursor::CursorController;
use crate::element::{ElementFlags, ElementId, ElementKind, ElementState, ElementTree};
use crate::error::{MotionError, MotionResult};
use crate::events::{EventBus, EventSender, HostEvent};
use crate::frame::{FrameClock, FrameStats};
use crate::hover::HoverScale;
use crate::input::{ListenerRegistry, PointerReader, PointerTracker};
use crate::layout::{Rect, RowLayout};
use crate::magnetic::MagneticFieldController;
use crate::marquee::{InfiniteLoopAnimator, MarqueeStrip};
use crate::render::{FrameOutput, RenderCommand, RenderLayer, RenderQueue};
use crate::reveal::{RevealSpec, ViewportRevealScheduler, VisualProps};
use crate::spotlight::SpotlightMask;
use crate::style::Theme;

/// The interaction layer for one page.
pub struct MotionStage {
    config: MotionConfig,
    theme: Theme,
    tree: ElementTree,
    listeners: ListenerRegistry,
    tracker: PointerTracker,
    cursor: CursorController,
    magnets: BTreeMap<ElementId, MagneticFieldController>,
    hover_scales: BTreeMap<ElementId, HoverScale>,
    spotlight: Option<SpotlightMask>,
    reveals: ViewportRevealScheduler,
    marquee: Option<(ElementId, InfiniteLoopAnimator)>,
    events: EventBus,
    clock: FrameClock,
    queue: RenderQueue,
}

impl MotionStage {
    /// Creates a stage and mounts the pointer listeners.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: MotionConfig) -> MotionResult<Self> {
        config.validate()?;

        let listeners = ListenerRegistry::new();
        let tracker = PointerTracker::mount(&listeners);
        let cursor = CursorController::new(tracker.reader(), config.cursor);

        tracing::debug!(listeners = listeners.attached(), "motion stage mounted");

        Ok(Self {
            theme: Theme::SHARP,
            tree: ElementTree::new(),
            tracker,
            cursor,
            magnets: BTreeMap::new(),
            hover_scales: BTreeMap::new(),
            spotlight: None,
            reveals: ViewportRevealScheduler::new(),
            marquee: None,
            events: EventBus::new(config.events.capacity),
            clock: FrameClock::new(&config.frame),
            queue: RenderQueue::new(),
            listeners,
            config,
        })
    }

    /// Replaces the color theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers an element under `parent` (or as a root) and attaches the
    /// controllers its flags ask for.
    ///
    /// # Errors
    ///
    /// [`MotionError::UnknownElement`] if `parent` is not registered.
    pub fn add_element(
        &mut self,
        parent: Option<ElementId>,
        kind: ElementKind,
        flags: ElementFlags,
    ) -> MotionResult<ElementId> {
        let id = self.tree.next_id();
        let state = ElementState::new(id, kind).with_flags(flags);
        match parent {
            Some(parent) => self.tree.add_child(parent, state)?,
            None => self.tree.add_root(state)?,
        };

        if flags.has(ElementFlags::MAGNETIC) {
            self.magnets
                .insert(id, MagneticFieldController::new(id, &self.config.magnetic));
        }
        if flags.has(ElementFlags::HOVER_SCALE) {
            self.hover_scales
                .insert(id, HoverScale::new(id, self.config.cursor.spring));
        }
        Ok(id)
    }

    /// Removes an element, its descendants and all their controllers.
    /// Returns the removed IDs.
    pub fn remove_element(&mut self, id: ElementId) -> Vec<ElementId> {
        let removed = self.tree.remove(id);
        for id in &removed {
            self.magnets.remove(id);
            self.hover_scales.remove(id);
            self.reveals.unregister(*id);
            if self.spotlight.as_ref().is_some_and(|s| s.region() == *id) {
                self.spotlight = None;
            }
            if self.marquee.as_ref().is_some_and(|(m, _)| m == id) {
                self.marquee = None;
            }
        }
        removed
    }

    fn require(&self, id: ElementId) -> MotionResult<()> {
        if self.tree.contains(id) {
            Ok(())
        } else {
            Err(MotionError::UnknownElement(id))
        }
    }

    /// Makes `region` the spotlight region.
    ///
    /// # Errors
    ///
    /// [`MotionError::UnknownElement`] for an unregistered region,
    /// [`MotionError::DuplicateElement`] if a region is already set.
    pub fn set_spotlight_region(&mut self, region: ElementId) -> MotionResult<()> {
        self.require(region)?;
        if let Some(existing) = &self.spotlight {
            return Err(MotionError::DuplicateElement(existing.region()));
        }
        self.spotlight = Some(SpotlightMask::new(
            region,
            self.tracker.reader(),
            self.config.spotlight,
        ));
        Ok(())
    }

    /// Attaches an entrance reveal.
    ///
    /// # Errors
    ///
    /// [`MotionError::UnknownElement`] for an unregistered element,
    /// [`MotionError::DuplicateElement`] if it already has a reveal.
    pub fn add_reveal(&mut self, element: ElementId, spec: RevealSpec) -> MotionResult<()> {
        self.require(element)?;
        self.reveals.register(element, spec)
    }

    /// Attaches the marquee loop to `element`. The row travels one cycle of
    /// `strip` per period, laid out with `layout` and each item measured
    /// with `measure`.
    ///
    /// # Errors
    ///
    /// [`MotionError::UnknownElement`] for an unregistered element,
    /// [`MotionError::DuplicateElement`] if a marquee exists,
    /// [`MotionError::MarqueeNotSeamless`] for content that does not repeat
    /// or measures to no width.
    pub fn set_marquee(
        &mut self,
        element: ElementId,
        strip: &MarqueeStrip,
        layout: &RowLayout,
        measure: impl Fn(&str) -> f32,
    ) -> MotionResult<()> {
        self.require(element)?;
        if let Some((existing, _)) = &self.marquee {
            return Err(MotionError::DuplicateElement(*existing));
        }
        let animator =
            InfiniteLoopAnimator::for_strip(strip, layout, measure, &self.config.marquee)?;
        self.marquee = Some((element, animator));
        Ok(())
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Returns a handle hosts can post events through.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.events.sender()
    }

    /// Applies one host event immediately. Pointer events are ignored once
    /// the stage is unmounted.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            event if event.is_pointer() && !self.tracker.is_mounted() => {
                tracing::trace!(?event, "pointer event after unmount");
            }
            HostEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
            HostEvent::PointerOver { target } => self.on_pointer_over(target),
            HostEvent::PointerLeave { element } => self.on_pointer_leave(element),
            HostEvent::PointerExitViewport => self.on_exit_viewport(),
            HostEvent::Intersection {
                element,
                ratio,
                intersecting,
            } => {
                if !self.tree.set_flag(element, ElementFlags::VISIBLE, intersecting) {
                    tracing::debug!(?element, "intersection for unknown element");
                    return;
                }
                self.reveals.on_intersection(element, ratio, intersecting);
            }
            HostEvent::Layout { element, rect } => {
                if !self.tree.set_rect(element, rect) {
                    tracing::debug!(?element, "layout for unknown element");
                }
            }
        }
    }

    fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.tracker.on_move(x, y);

        // bounds are read fresh on every move so layout shifts are honoured
        for (id, magnet) in &mut self.magnets {
            let bounds = self.tree.rect(*id);
            if bounds.contains(x, y) {
                magnet.on_pointer_move(x, y, bounds);
            } else if magnet.is_inside() {
                magnet.on_pointer_leave();
            }
        }

        if let Some(spotlight) = &mut self.spotlight {
            spotlight.on_pointer_move(self.tree.rect(spotlight.region()));
        }
    }

    fn on_pointer_over(&mut self, target: Option<ElementId>) {
        if let Some(id) = target {
            if !self.tree.contains(id) {
                tracing::debug!(?id, "pointer over unknown element");
            }
        }
        self.tracker.on_over(&self.tree, target);

        let hovered: BTreeSet<ElementId> = target
            .map(|id| self.tree.ancestors(id).map(|s| s.id).collect())
            .unwrap_or_default();
        for (id, hover) in &mut self.hover_scales {
            hover.set_hovered(hovered.contains(id));
        }
    }

    fn on_pointer_leave(&mut self, element: ElementId) {
        if !self.tree.contains(element) {
            tracing::debug!(?element, "pointer leave for unknown element");
            return;
        }
        if let Some(magnet) = self.magnets.get_mut(&element) {
            magnet.on_pointer_leave();
        }
        if let Some(hover) = self.hover_scales.get_mut(&element) {
            hover.set_hovered(false);
        }
    }

    fn on_exit_viewport(&mut self) {
        for magnet in self.magnets.values_mut() {
            magnet.on_pointer_leave();
        }
        for hover in self.hover_scales.values_mut() {
            hover.set_hovered(false);
        }
        self.tracker.on_over(&self.tree, None);
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Runs one frame: drains events, steps every animation and returns
    /// what to draw.
    pub fn tick(&mut self, dt: f32) -> FrameOutput {
        let dt = self.clock.begin(dt);

        let pending: Vec<HostEvent> = self.events.drain().collect();
        let events_processed = u32::try_from(pending.len()).unwrap_or(u32::MAX);
        for event in pending {
            self.handle_event(event);
        }

        self.cursor.tick(dt);
        for magnet in self.magnets.values_mut() {
            magnet.tick(dt);
        }
        for hover in self.hover_scales.values_mut() {
            hover.tick(dt);
        }
        self.reveals.tick(dt);
        if let Some((_, marquee)) = &mut self.marquee {
            marquee.advance(f64::from(dt));
        }

        let output = self.render();
        self.clock.end(events_processed);
        output
    }

    fn render(&mut self) -> FrameOutput {
        self.queue.begin_frame();

        // one transform per element, merging every source that moves it
        let animated: BTreeSet<ElementId> = self
            .reveals
            .iter_props()
            .map(|(id, _)| id)
            .chain(self.magnets.keys().copied())
            .chain(self.hover_scales.keys().copied())
            .collect();
        for id in animated {
            let props = self.reveals.props(id).unwrap_or(VisualProps::REST);
            let (mx, my) = self.magnets.get(&id).map_or((0.0, 0.0), MagneticFieldController::offset);
            let hover = self.hover_scales.get(&id).map_or(1.0, HoverScale::scale);
            self.queue.push(
                RenderLayer::Content,
                RenderCommand::Transform {
                    element: id,
                    translate: (props.offset_x + mx, props.offset_y + my),
                    scale: props.scale * hover,
                    opacity: props.opacity,
                },
            );
        }

        if let Some((element, marquee)) = &self.marquee {
            self.queue.push(
                RenderLayer::Content,
                RenderCommand::MarqueeOffset {
                    element: *element,
                    offset: marquee.offset(),
                },
            );
        }
        if let Some(spotlight) = &self.spotlight {
            spotlight.render(&self.theme, &mut self.queue);
        }
        self.cursor.render(&self.theme, &mut self.queue);

        self.queue.end_frame()
    }

    /// Returns true while anything still needs frames. The marquee never
    /// stops, so a stage with one always animates.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.marquee.is_some()
            || !self.cursor.is_settled()
            || self.magnets.values().any(|m| !m.is_settled())
            || self.hover_scales.values().any(|h| !h.is_settled())
            || self.reveals.is_animating()
    }

    /// Forgets hover state after navigation: the cursor shrinks back, every
    /// magnet returns to rest and hover scales release. The pointer position
    /// is kept.
    pub fn reset_pointer(&mut self) {
        self.tracker.reset();
        for magnet in self.magnets.values_mut() {
            magnet.on_pointer_leave();
        }
        for hover in self.hover_scales.values_mut() {
            hover.set_hovered(false);
        }
        tracing::debug!("pointer state reset");
    }

    /// Detaches the pointer listeners. The stage keeps rendering its last
    /// state but ignores further pointer input.
    pub fn unmount(&mut self) {
        self.tracker.unmount();
        tracing::debug!("motion stage unmounted");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The element registry.
    #[must_use]
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Current bounds of an element.
    #[must_use]
    pub fn rect(&self, id: ElementId) -> Rect {
        self.tree.rect(id)
    }

    /// The cursor controller.
    #[must_use]
    pub fn cursor(&self) -> &CursorController {
        &self.cursor
    }

    /// The magnetic controller of an element.
    #[must_use]
    pub fn magnet(&self, id: ElementId) -> Option<&MagneticFieldController> {
        self.magnets.get(&id)
    }

    /// The hover-scale controller of an element.
    #[must_use]
    pub fn hover_scale(&self, id: ElementId) -> Option<&HoverScale> {
        self.hover_scales.get(&id)
    }

    /// The spotlight, if a region is set.
    #[must_use]
    pub fn spotlight(&self) -> Option<&SpotlightMask> {
        self.spotlight.as_ref()
    }

    /// The reveal scheduler.
    #[must_use]
    pub fn reveals(&self) -> &ViewportRevealScheduler {
        &self.reveals
    }

    /// The marquee animator, if one is set.
    #[must_use]
    pub fn marquee(&self) -> Option<&InfiniteLoopAnimator> {
        self.marquee.as_ref().map(|(_, m)| m)
    }

    /// A read handle on the shared pointer state.
    #[must_use]
    pub fn pointer(&self) -> PointerReader {
        self.tracker.reader()
    }

    /// The listener registry, for leak checks.
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Stats of the last frame.
    #[must_use]
    pub fn last_frame(&self) -> FrameStats {
        self.clock.last()
    }

    /// The frame clock.
    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Pointer moves superseded while the bus was full.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.events.dropped()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }
}

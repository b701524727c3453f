//! # Host Event Bus
//!
//! The host (browser shim, windowing layer, test script) posts immutable
//! [`HostEvent`]s; the stage drains them once per frame.
//!
//! ```text
//! ┌────────────┐  try_send  ┌──────────────┐  drain   ┌─────────────┐
//! │    Host    │───────────>│   bounded    │─────────>│ MotionStage │
//! │ (N senders)│            │   channel    │          │   (tick)    │
//! └────────────┘            └──────────────┘          └─────────────┘
//! ```
//!
//! A full channel never blocks the host. Overflow parks in a side queue that
//! is drained after the channel: pointer moves there coalesce to the latest
//! one, every other event is kept in order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;

use crate::element::ElementId;
use crate::layout::Rect;

/// Input from the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    // =========================================================================
    // Pointer
    // =========================================================================
    /// Raw pointer movement in viewport pixels.
    PointerMove {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },

    /// Pointer moved onto an element (or onto nothing registered).
    PointerOver {
        /// Deepest element under the pointer.
        target: Option<ElementId>,
    },

    /// Pointer left an element's bounds.
    PointerLeave {
        /// Element that was left.
        element: ElementId,
    },

    /// Pointer left the window.
    PointerExitViewport,

    // =========================================================================
    // Layout & visibility
    // =========================================================================
    /// Visibility change reported by the host's intersection observer.
    Intersection {
        /// Observed element.
        element: ElementId,
        /// Visible fraction in `[0, 1]`.
        ratio: f32,
        /// Whether any part is inside the viewport.
        intersecting: bool,
    },

    /// New bounding box after layout.
    Layout {
        /// Measured element.
        element: ElementId,
        /// Bounds in viewport pixels.
        rect: Rect,
    },
}

impl HostEvent {
    /// Returns true for events that come from the pointer listeners.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerMove { .. }
                | Self::PointerOver { .. }
                | Self::PointerLeave { .. }
                | Self::PointerExitViewport
        )
    }

    /// Returns true for events a later event of the same kind supersedes.
    #[must_use]
    pub fn is_coalescable(&self) -> bool {
        matches!(self, Self::PointerMove { .. })
    }
}

/// Bounded queue between host and stage.
pub struct EventBus {
    sender: Sender<HostEvent>,
    receiver: Receiver<HostEvent>,
    overflow: Arc<Mutex<Vec<HostEvent>>>,
    dropped: Arc<AtomicU64>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undrained events in its
    /// channel.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self {
            sender,
            receiver,
            overflow: Arc::new(Mutex::new(Vec::new())),
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
            overflow: Arc::clone(&self.overflow),
            dropped: Arc::clone(&self.dropped),
        }
    }

    /// Takes every pending event without blocking: the channel first, then
    /// anything that overflowed it.
    pub fn drain(&self) -> impl Iterator<Item = HostEvent> {
        // senders park while this is held, so nothing lands between the two
        let mut overflow = self.overflow.lock();
        let mut events: Vec<HostEvent> = self.receiver.try_iter().collect();
        events.append(&mut overflow);
        events.into_iter()
    }

    /// Returns the number of undrained events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len() + self.overflow.lock().len()
    }

    /// Returns how many pointer moves were superseded while the bus was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Handle for posting events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<HostEvent>,
    overflow: Arc<Mutex<Vec<HostEvent>>>,
    dropped: Arc<AtomicU64>,
}

impl EventSender {
    /// Posts an event without blocking.
    ///
    /// Returns `false` only if the stage is gone.
    #[inline]
    pub fn send(&self, event: HostEvent) -> bool {
        let mut overflow = self.overflow.lock();
        // once anything has overflowed, later events queue behind it
        if overflow.is_empty() {
            match self.sender.try_send(event) {
                Ok(()) => return true,
                Err(TrySendError::Disconnected(_)) => return false,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        capacity = ?self.sender.capacity(),
                        "event bus full, parking overflow"
                    );
                }
            }
        }

        if event.is_coalescable() {
            if let Some(stale) = overflow.iter().rposition(HostEvent::is_coalescable) {
                overflow.remove(stale);
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::debug!(total, "superseded pointer move");
            }
        }
        overflow.push(event);
        true
    }
}

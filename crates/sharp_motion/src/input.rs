//! Pointer tracking and listener lifetimes.
//!
//! [`PointerTracker`] is the single writer of the process-wide pointer
//! snapshot. Everything else reads through a [`PointerReader`].
//!
//! ```text
//!   host move/over events
//!            │
//!            ▼
//!   ┌─────────────────┐   write    ┌──────────────────────┐
//!   │ PointerTracker  │──────────>│ RwLock<PointerSnapshot> │
//!   └─────────────────┘            └──────────┬───────────┘
//!                                             │ read
//!                          ┌──────────────────┼──────────────┐
//!                          ▼                  ▼              ▼
//!                   CursorController    SpotlightMask    host thread
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::element::{ElementId, ElementTree};

/// Latest pointer position in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

/// Everything the tracker publishes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    /// Latest pointer position.
    pub sample: PointerSample,
    /// Hover classification from the latest pointer-over event.
    pub hovering: bool,
    /// Bumped on every write so readers can detect change.
    pub generation: u64,
}

/// Global listener kinds the tracker installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Raw pointer movement.
    PointerMove,
    /// Pointer-over (hover target changes).
    PointerOver,
}

#[derive(Debug, Default)]
struct ListenerTable {
    live: HashMap<u64, ListenerKind>,
    next_token: u64,
}

/// Tracks which global listeners are installed.
///
/// Hosts mirror `attach`/`detach` onto their real event surface. Every
/// attachment is owned by a [`ListenerGuard`]; dropping the guard detaches,
/// so teardown cannot leak a handler on any exit path.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    table: Arc<Mutex<ListenerTable>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a listener and returns the guard that owns it.
    #[must_use = "dropping the guard detaches the listener immediately"]
    pub fn attach(&self, kind: ListenerKind) -> ListenerGuard {
        let mut table = self.table.lock();
        let token = table.next_token;
        table.next_token += 1;
        table.live.insert(token, kind);
        tracing::debug!(?kind, token, "listener attached");
        ListenerGuard {
            table: Arc::clone(&self.table),
            token,
            kind,
        }
    }

    /// Number of currently attached listeners.
    #[must_use]
    pub fn attached(&self) -> usize {
        self.table.lock().live.len()
    }

    /// Number of attached listeners of one kind.
    #[must_use]
    pub fn attached_of(&self, kind: ListenerKind) -> usize {
        self.table.lock().live.values().filter(|k| **k == kind).count()
    }
}

/// Owns one attached listener. Detaches on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    table: Arc<Mutex<ListenerTable>>,
    token: u64,
    kind: ListenerKind,
}

impl ListenerGuard {
    /// The kind of listener this guard owns.
    #[must_use]
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if self.table.lock().live.remove(&self.token).is_some() {
            tracing::debug!(kind = ?self.kind, token = self.token, "listener detached");
        }
    }
}

/// Read-only view of the pointer snapshot.
#[derive(Debug, Clone)]
pub struct PointerReader {
    shared: Arc<RwLock<PointerSnapshot>>,
}

impl PointerReader {
    /// Returns a copy of the latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> PointerSnapshot {
        *self.shared.read()
    }

    /// Returns the latest pointer position.
    #[must_use]
    pub fn sample(&self) -> PointerSample {
        self.shared.read().sample
    }

    /// Returns the latest hover classification.
    #[must_use]
    pub fn hovering(&self) -> bool {
        self.shared.read().hovering
    }
}

/// Single writer of pointer position and hover classification.
pub struct PointerTracker {
    shared: Arc<RwLock<PointerSnapshot>>,
    listeners: Vec<ListenerGuard>,
}

impl PointerTracker {
    /// Creates a tracker and attaches its move and over listeners.
    #[must_use]
    pub fn mount(registry: &ListenerRegistry) -> Self {
        Self {
            shared: Arc::new(RwLock::new(PointerSnapshot::default())),
            listeners: vec![
                registry.attach(ListenerKind::PointerMove),
                registry.attach(ListenerKind::PointerOver),
            ],
        }
    }

    /// Detaches all listeners. Later events are ignored.
    pub fn unmount(&mut self) {
        self.listeners.clear();
    }

    /// Returns true while listeners are attached.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Returns a read-only handle for subscribers.
    #[must_use]
    pub fn reader(&self) -> PointerReader {
        PointerReader {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Returns the latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> PointerSnapshot {
        *self.shared.read()
    }

    /// Overwrites the pointer position. No smoothing, no clamping.
    pub fn on_move(&mut self, x: f32, y: f32) {
        if !self.is_mounted() {
            return;
        }
        let mut snapshot = self.shared.write();
        snapshot.sample = PointerSample { x, y };
        snapshot.generation += 1;
    }

    /// Reclassifies hover for a pointer-over event on `target`.
    ///
    /// Walks `target` and its ancestors in `tree`; `None` (document root or
    /// outside any element) is never interactive. Returns the new
    /// classification.
    pub fn on_over(&mut self, tree: &ElementTree, target: Option<ElementId>) -> bool {
        if !self.is_mounted() {
            return self.shared.read().hovering;
        }
        let hovering = target.is_some_and(|id| tree.is_interactive(id));

        let mut snapshot = self.shared.write();
        if snapshot.hovering != hovering {
            tracing::debug!(?target, hovering, "hover classification changed");
        }
        snapshot.hovering = hovering;
        snapshot.generation += 1;
        hovering
    }

    /// Clears hover state, e.g. on navigation. Position is kept.
    pub fn reset(&mut self) {
        let mut snapshot = self.shared.write();
        snapshot.hovering = false;
        snapshot.generation += 1;
    }
}

//! Element identity, kind and capability flags.

use crate::layout::Rect;

/// Unique identifier for a registered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Creates a new element ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What kind of node an element is.
///
/// Buttons and anchors are interactive by nature; everything else has to
/// opt in with [`ElementFlags::INTERACTIVE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    /// Plain container or text.
    #[default]
    Generic,
    /// Clickable button.
    Button,
    /// Link.
    Anchor,
    /// Page section (hero, services, ...).
    Section,
}

impl ElementKind {
    /// Returns true for kinds that enlarge the cursor without a marker.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Button | Self::Anchor)
    }
}

/// Element capability flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementFlags(u32);

impl ElementFlags {
    /// Enlarges the custom cursor while hovered (opt-in marker).
    pub const INTERACTIVE: u32 = 1 << 0;
    /// Attracted toward the pointer.
    pub const MAGNETIC: u32 = 1 << 1;
    /// Scales up slightly while hovered.
    pub const HOVER_SCALE: u32 = 1 << 2;
    /// Currently intersecting the viewport, as last reported by the host.
    pub const VISIBLE: u32 = 1 << 3;

    /// No capabilities.
    pub const NONE: Self = Self(0);

    /// Creates flags from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Returns a copy with `flag` set.
    #[must_use]
    pub const fn with(self, flag: u32) -> Self {
        Self(self.0 | flag)
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }
}

/// Registry entry for one element.
#[derive(Debug, Clone)]
pub struct ElementState {
    /// Element identifier.
    pub id: ElementId,
    /// Node kind.
    pub kind: ElementKind,
    /// Capability flags.
    pub flags: ElementFlags,
    /// Last bounding box reported by the host. [`Rect::ZERO`] until the
    /// element has been laid out.
    pub rect: Rect,
    /// Parent element ID (None for root).
    pub parent: Option<ElementId>,
}

impl ElementState {
    /// Creates an unlaid-out element.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            flags: ElementFlags::NONE,
            rect: Rect::ZERO,
            parent: None,
        }
    }

    /// Sets capability flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the initial bounding box.
    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Returns true if this element, by itself, carries the interactive
    /// marker.
    #[inline]
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.kind.is_interactive() || self.flags.has(ElementFlags::INTERACTIVE)
    }
}

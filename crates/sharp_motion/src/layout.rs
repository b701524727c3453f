//! Geometry for hit testing, normalization and row measurement.

/// A rectangle in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin. This is what an element measures as
    /// before the host has laid it out.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a square of side `size` whose top-left corner is `pos`.
    #[must_use]
    pub const fn square(pos: (f32, f32), size: f32) -> Self {
        Self {
            x: pos.0,
            y: pos.1,
            width: size,
            height: size,
        }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if either side has no extent.
    ///
    /// Non-finite and negative sizes count as empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Fraction of this rectangle's area that lies inside `viewport`.
    ///
    /// Hosts without a native intersection observer can use this to produce
    /// `Intersection` events. Empty rectangles report 0.
    #[must_use]
    pub fn visible_ratio(&self, viewport: &Self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.intersection(viewport)
            .map_or(0.0, |overlap| {
                (overlap.width * overlap.height) / (self.width * self.height)
            })
            .clamp(0.0, 1.0)
    }

    /// Maps a viewport point into `[0, 1]²` relative to this rectangle.
    ///
    /// Returns `None` for empty rectangles. Results are clamped so float
    /// error at the exact right/bottom edge never escapes the unit square.
    #[must_use]
    pub fn normalize(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.is_empty() {
            return None;
        }
        let nx = ((x - self.x) / self.width).clamp(0.0, 1.0);
        let ny = ((y - self.y) / self.height).clamp(0.0, 1.0);
        Some((nx, ny))
    }

    /// Returns a copy moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Horizontal row arrangement with a fixed gap, used to measure marquee
/// content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Gap between consecutive items.
    pub gap: f32,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self { gap: 4.0 }
    }
}

impl RowLayout {
    /// Creates a row with the given gap.
    #[must_use]
    pub const fn with_gap(gap: f32) -> Self {
        Self { gap }
    }

    /// Returns the left edge of every item when laid out from `start_x`.
    #[must_use]
    pub fn arrange(&self, start_x: f32, widths: &[f32]) -> Vec<f32> {
        let mut x = start_x;
        let mut positions = Vec::with_capacity(widths.len());
        for w in widths {
            positions.push(x);
            x += w + self.gap;
        }
        positions
    }

    /// Distance from the first item's left edge to where the same item
    /// would start again if the row repeated, i.e. total width plus one
    /// trailing gap.
    #[must_use]
    pub fn period(&self, widths: &[f32]) -> f32 {
        widths.iter().map(|w| w + self.gap).sum()
    }
}

//! Colors and blend modes for the animated layer.
//!
//! Black page, white inverted cursor, red accents.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Accent red (`#dc2626`).
    pub const ACCENT_RED: Self = Self::hex(0xDC26_26FF);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How a layer composites over what is beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Plain alpha over.
    #[default]
    Normal,
    /// `|dst - src|`: white inverts whatever it covers.
    Difference,
}

/// Colors the interaction layer paints with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Custom cursor fill.
    pub cursor_fill: Color,
    /// Cursor compositing.
    pub cursor_blend: BlendMode,
    /// Spotlight outline (base) layer stroke.
    pub spotlight_outline: Color,
    /// Spotlight solid (revealed) layer fill.
    pub spotlight_fill: Color,
}

impl Theme {
    /// The SHARP landing page look.
    pub const SHARP: Self = Self {
        cursor_fill: Color::WHITE,
        cursor_blend: BlendMode::Difference,
        spotlight_outline: Color::WHITE,
        spotlight_fill: Color::ACCENT_RED,
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::SHARP
    }
}

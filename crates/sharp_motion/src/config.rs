//! # Motion Configuration
//!
//! Every tunable constant of the interaction layer. Defaults reproduce the
//! SHARP landing page exactly; a TOML file can override any subset.
//!
//! ```toml
//! [cursor]
//! idle_diameter = 16.0
//! hover_diameter = 64.0
//!
//! [cursor.spring]
//! stiffness = 500.0
//! damping = 28.0
//! mass = 1.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::SpringConfig;
use crate::error::{MotionError, MotionResult};

/// Custom cursor settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Circle diameter while idle.
    pub idle_diameter: f32,
    /// Circle diameter while over an interactive element.
    pub hover_diameter: f32,
    /// Spring driving x, y and size.
    pub spring: SpringConfig,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            idle_diameter: 16.0,
            hover_diameter: 64.0,
            spring: SpringConfig::CURSOR,
        }
    }
}

/// Magnetic button settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagneticConfig {
    /// Fraction of the pointer's distance from center applied as offset.
    pub attraction: f32,
    /// Optional cap on offset magnitude in pixels. Unset means unclamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_offset: Option<f32>,
    /// Spring driving the offset.
    pub spring: SpringConfig,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            attraction: 0.2,
            max_offset: None,
            spring: SpringConfig::MAGNETIC,
        }
    }
}

/// Spotlight text reveal settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    /// Radius of the reveal circle in pixels.
    pub radius: f32,
    /// Stroke width of the outline layer.
    pub outline_width: f32,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            radius: 150.0,
            outline_width: 2.0,
        }
    }
}

/// Scroll reveal defaults. Individual entries may override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Seconds added per order index.
    pub stagger: f32,
    /// Transition length in seconds.
    pub duration: f32,
    /// Minimum visible ratio that counts as "in view". 0 means any overlap.
    pub threshold: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            stagger: 0.1,
            duration: 0.5,
            threshold: 0.0,
        }
    }
}

/// Marquee loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Pixels travelled per loop by an animator built with
    /// [`InfiniteLoopAnimator::new`](crate::marquee::InfiniteLoopAnimator::new).
    /// Strips attached to a stage travel their own measured cycle instead.
    pub distance: f32,
    /// Seconds per loop.
    pub period: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            distance: 1000.0,
            period: 20.0,
        }
    }
}

/// Frame clock settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Longest delta a single tick may consume; longer gaps (a backgrounded
    /// tab) are clamped.
    pub max_frame_dt: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { max_frame_dt: 0.1 }
    }
}

/// Host event queue settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Events the channel holds between two frames before overflow parks
    /// them (moves coalesce, nothing else is lost).
    pub capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}

/// Complete interaction layer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Custom cursor.
    pub cursor: CursorConfig,
    /// Magnetic buttons.
    pub magnetic: MagneticConfig,
    /// Hero spotlight.
    pub spotlight: SpotlightConfig,
    /// Scroll reveals.
    pub reveal: RevealConfig,
    /// Marquee strip.
    pub marquee: MarqueeConfig,
    /// Frame clock.
    pub frame: FrameConfig,
    /// Event queue.
    pub events: EventConfig,
}

impl MotionConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`MotionError::ConfigParse`] for malformed TOML,
    /// [`MotionError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> MotionResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| MotionError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`MotionError::ConfigRead`] if the file cannot be read, otherwise as
    /// [`MotionConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MotionError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "motion config loaded");
        Ok(config)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// [`MotionError::ConfigParse`] if serialization fails.
    pub fn to_toml_string(&self) -> MotionResult<String> {
        toml::to_string_pretty(self).map_err(|e| MotionError::ConfigParse(e.to_string()))
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidConfig`] naming the first bad key.
    pub fn validate(&self) -> MotionResult<()> {
        fn positive(name: &str, value: f32) -> MotionResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(MotionError::InvalidConfig(format!("{name} must be positive, got {value}")))
            }
        }

        positive("cursor.idle_diameter", self.cursor.idle_diameter)?;
        positive("cursor.hover_diameter", self.cursor.hover_diameter)?;
        if !self.cursor.spring.is_valid() {
            return Err(MotionError::InvalidConfig("cursor.spring has a non-positive parameter".into()));
        }
        if !self.magnetic.attraction.is_finite() || self.magnetic.attraction < 0.0 {
            return Err(MotionError::InvalidConfig(format!(
                "magnetic.attraction must be >= 0, got {}",
                self.magnetic.attraction
            )));
        }
        if let Some(max) = self.magnetic.max_offset {
            positive("magnetic.max_offset", max)?;
        }
        if !self.magnetic.spring.is_valid() {
            return Err(MotionError::InvalidConfig("magnetic.spring has a non-positive parameter".into()));
        }
        positive("spotlight.radius", self.spotlight.radius)?;
        if !(self.reveal.stagger >= 0.0 && self.reveal.duration >= 0.0) {
            return Err(MotionError::InvalidConfig("reveal timings must be >= 0".into()));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(MotionError::InvalidConfig(format!(
                "reveal.threshold must be in [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        positive("marquee.distance", self.marquee.distance)?;
        if !(self.marquee.period.is_finite() && self.marquee.period > 0.0) {
            return Err(MotionError::InvalidConfig(format!(
                "marquee.period must be positive, got {}",
                self.marquee.period
            )));
        }
        positive("frame.max_frame_dt", self.frame.max_frame_dt)?;
        if self.events.capacity == 0 {
            return Err(MotionError::InvalidConfig("events.capacity must be at least 1".into()));
        }
        Ok(())
    }
}

//! # Motion Error Types
//!
//! Errors surface only from registration and configuration. The per-frame
//! path never fails: bad geometry or unknown targets degrade to "no visible
//! animation".

use thiserror::Error;

use crate::element::ElementId;

/// Errors that can occur while setting up the interaction layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {reason}")]
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// OS error text.
        reason: String,
    },

    /// Configuration file is not valid TOML for [`crate::MotionConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    /// Element is not registered in the element tree.
    #[error("unknown element: {0:?}")]
    UnknownElement(ElementId),

    /// Element already has a controller of this kind attached.
    #[error("element {0:?} is already registered")]
    DuplicateElement(ElementId),

    /// Marquee content does not repeat, so the wrap would be visible.
    #[error("marquee content is not seamless: {reason}")]
    MarqueeNotSeamless {
        /// What failed the duplication check.
        reason: String,
    },
}

/// Result type for motion setup operations.
pub type MotionResult<T> = Result<T, MotionError>;

//! # SHARP
//!
//! The SHARP barbershop landing page, wired onto the motion layer.
//!
//! [`LandingPage::mount`] registers every animated element of the page on a
//! [`sharp_motion::MotionStage`]; [`session`] replays scripted visitor
//! sessions (pointer sweeps, scrolling) against it.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod page;
pub mod session;

pub use page::{
    marquee_strip, measure_marquee_item, ItemSection, LandingPage, MARQUEE_GAP, MARQUEE_GLYPH,
};
pub use session::{ScriptedSession, SessionReport};

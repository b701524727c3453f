//! # SHARP Motion
//!
//! Pointer-driven interaction layer for the SHARP landing page:
//! - Custom cursor that follows the pointer and grows over anything clickable
//! - Magnetic buttons pulled toward the pointer
//! - Spotlight text reveal under the pointer
//! - One-shot entrance reveals when sections scroll into view
//! - Infinite marquee strip
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       MOTION PIPELINE                       │
//! ├────────────────────────────────────────────────────────────┤
//! │  HostEvent → EventBus → MotionStage::tick → FrameOutput    │
//! │      ↓                        ↓                  ↓         │
//! │  PointerTracker        springs / tweens     RenderQueue    │
//! │  ElementTree           reveal scheduler     Transform buf  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on one thread from a single frame scheduler. The pointer
//! snapshot has exactly one writer; controllers only read it.
//!
//! ## Example
//!
//! ```
//! use sharp_motion::{ElementFlags, ElementKind, HostEvent, MotionConfig, MotionStage, Rect};
//!
//! let mut stage = MotionStage::new(MotionConfig::default())?;
//! let button = stage.add_element(
//!     None,
//!     ElementKind::Button,
//!     ElementFlags::NONE.with(ElementFlags::MAGNETIC),
//! )?;
//! stage.handle_event(HostEvent::Layout { element: button, rect: Rect::new(0.0, 0.0, 100.0, 40.0) });
//! stage.handle_event(HostEvent::PointerMove { x: 90.0, y: 20.0 });
//!
//! let frame = stage.tick(1.0 / 60.0);
//! assert!(frame.transform_of(button).is_some());
//! # Ok::<(), sharp_motion::MotionError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod cursor;
pub mod element;
pub mod error;
pub mod events;
pub mod frame;
pub mod hover;
pub mod input;
pub mod layout;
pub mod magnetic;
pub mod marquee;
pub mod render;
pub mod reveal;
pub mod spotlight;
pub mod stage;
pub mod style;

pub use animation::{Easing, Spring, Spring2D, SpringConfig, Tween};
pub use config::MotionConfig;
pub use cursor::{CursorController, CursorMode, CursorVisualState};
pub use element::{ElementFlags, ElementId, ElementKind, ElementState, ElementTree};
pub use error::{MotionError, MotionResult};
pub use events::{EventBus, EventSender, HostEvent};
pub use frame::{FrameClock, FrameStats};
pub use hover::HoverScale;
pub use input::{ListenerRegistry, PointerReader, PointerTracker};
pub use layout::{Rect, RowLayout};
pub use magnetic::MagneticFieldController;
pub use marquee::{InfiniteLoopAnimator, MarqueeStrip};
pub use render::{FrameOutput, RenderCommand, RenderLayer, RenderQueue, TransformInstance};
pub use reveal::{RevealPhase, RevealSpec, RevealTrigger, ViewportRevealScheduler, VisualProps};
pub use spotlight::{SpotlightMask, SpotlightState};
pub use stage::MotionStage;
pub use style::{BlendMode, Color, Theme};

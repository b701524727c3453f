//! # SHARP Demo
//!
//! Replays a scripted visit to the landing page and logs what the motion
//! layer does with it: hero entrance, a pointer sweep across the spotlight
//! and both magnetic buttons, the nav links, a full scroll to the footer and
//! a pass over the gallery.
//!
//! ```text
//! sharp_demo [CONFIG.toml]
//! RUST_LOG=sharp_motion=debug sharp_demo
//! ```

use sharp::{marquee_strip, measure_marquee_item, ScriptedSession, MARQUEE_GAP};
use sharp_motion::{MotionConfig, MotionError, RenderCommand, RowLayout};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Viewport the session runs in.
const VIEWPORT: (f32, f32) = (1280.0, 800.0);

/// 60 Hz display.
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> Result<(), MotionError> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => MotionConfig::load(&path)?,
        None => MotionConfig::default(),
    };
    tracing::info!(
        cursor_stiffness = config.cursor.spring.stiffness,
        attraction = config.magnetic.attraction,
        "configuration ready"
    );

    // the row travels exactly one cycle per loop
    let strip = marquee_strip()?;
    let cycle = strip.cycle_width(&RowLayout::with_gap(MARQUEE_GAP), measure_marquee_item);
    tracing::info!(items = strip.items().len(), cycle, "marquee strip");

    let (width, height) = VIEWPORT;
    let mut session = ScriptedSession::new(config, width, height)?;

    // hero entrance plays on its own
    session.run(90, FRAME_DT);
    tracing::info!(
        title = ?session.stage().reveals().props(session.page().hero_title),
        "hero entrance"
    );

    // across the heading, then through both hero buttons
    session.sweep_pointer((80.0, 240.0), (1200.0, 320.0), 60, FRAME_DT);
    let frame = session.run(1, FRAME_DT);
    if let Some(center) = frame.commands.iter().find_map(|c| match c {
        RenderCommand::SpotlightReveal { center_percent, .. } => Some(*center_percent),
        _ => None,
    }) {
        tracing::info!(x = center.0, y = center.1, "spotlight center (%)");
    }

    let button_y = height * 0.7 + 28.0;
    session.sweep_pointer(
        (width / 2.0 - 260.0, button_y),
        (width / 2.0 + 260.0, button_y),
        90,
        FRAME_DT,
    );
    for button in session.page().hero_buttons {
        if let Some(magnet) = session.stage().magnet(button) {
            tracing::info!(?button, offset = ?magnet.offset(), inside = magnet.is_inside(), "magnetic button");
        }
    }

    // nav links enlarge the cursor
    session.sweep_pointer((width - 420.0, 48.0), (width - 100.0, 48.0), 30, FRAME_DT);
    session.run(30, FRAME_DT);
    let cursor = session.stage().cursor().state();
    tracing::info!(diameter = cursor.diameter, hovering = cursor.hovering, "cursor over nav");

    // whole page
    session.exit_viewport();
    session.scroll_through(120.0, 6, FRAME_DT);
    session.run(120, FRAME_DT);

    let report = session.report();
    tracing::info!(
        frames = report.frames,
        seconds = report.seconds,
        revealed = report.reveals_triggered,
        total = report.reveals_total,
        hover_changes = report.hover_changes,
        max_cursor = report.max_cursor_diameter,
        dropped = report.events_dropped,
        marquee_offset = session.stage().marquee().map(|m| m.offset()),
        "session finished"
    );

    if report.reveals_triggered < report.reveals_total {
        tracing::warn!(
            missing = report.reveals_total - report.reveals_triggered,
            "some reveals never fired"
        );
    }
    Ok(())
}

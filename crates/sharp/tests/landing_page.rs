//! # Landing Page Tests
//!
//! Scripted visits against the mounted page:
//!
//! 1. **Entrance**: hero reveals play without scrolling
//! 2. **Scroll**: every reveal fires exactly once over a full scroll
//! 3. **Pointer**: nav cursor, gallery hover scale, hero magnets, spotlight
//!
//! Run with: cargo test --package sharp --test landing_page

use sharp::ScriptedSession;
use sharp_motion::{HoverScale, MotionConfig, RevealPhase, VisualProps};

const FRAME: f32 = 1.0 / 60.0;
const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 800.0;

fn session() -> ScriptedSession {
    ScriptedSession::new(MotionConfig::default(), WIDTH, HEIGHT).unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ============================================================================
// REVEALS
// ============================================================================

#[test]
fn verify_hero_entrance_plays_on_mount() {
    let mut session = session();
    let page = session.page().clone();

    let first = session.tick(FRAME);
    let reveals = session.stage().reveals();
    assert_eq!(reveals.phase(page.hero_title), Some(RevealPhase::Triggered));
    assert!(reveals.props(page.hero_title).unwrap().offset_y > 0.0);
    assert!(first.transform_of(page.hero_title).is_some());

    // subtitle waits 0.5 s, lasts 1 s
    session.run(60, FRAME);
    let subtitle = session.stage().reveals().entry(page.hero_subtitle);
    assert!(subtitle.is_some_and(|e| e.is_animating()));
    session.run(60, FRAME);
    let reveals = session.stage().reveals();
    assert_eq!(reveals.props(page.hero_title), Some(VisualProps::REST));
    assert_eq!(reveals.props(page.hero_subtitle), Some(VisualProps::REST));
}

#[test]
fn verify_full_scroll_triggers_every_reveal() {
    let mut session = session();
    let before = session.report();
    assert!(before.reveals_triggered < before.reveals_total);

    session.scroll_through(120.0, 4, FRAME);
    session.run(120, FRAME);

    let report = session.report();
    assert_eq!(report.reveals_total, 26);
    assert_eq!(report.reveals_triggered, report.reveals_total);
    assert!(!session.stage().reveals().is_animating());

    // scrolling back up does not re-arm anything
    session.scroll_to(0.0);
    session.run(10, FRAME);
    let page = session.page();
    assert_eq!(
        session.stage().reveals().props(page.contact_map),
        Some(VisualProps::REST)
    );
    assert_eq!(session.report().reveals_triggered, report.reveals_total);
}

#[test]
fn verify_gallery_tiles_stagger() {
    let mut session = session();
    let tiles = session.page().gallery.items.clone();

    session.scroll_to(3000.0);
    session.tick(FRAME);

    let reveals = session.stage().reveals();
    let first = reveals.props(tiles[0]).unwrap();
    let last = reveals.props(tiles[5]).unwrap();
    assert_eq!(reveals.phase(tiles[5]), Some(RevealPhase::Triggered));
    assert!(first.opacity >= last.opacity);
    assert_eq!(last.opacity, 0.0);
}

// ============================================================================
// POINTER
// ============================================================================

#[test]
fn verify_nav_link_enlarges_cursor() {
    let mut session = session();

    // last nav link sits at x 1148..1216, y 36..60
    session.move_pointer(1180.0, 48.0);
    session.run(180, FRAME);

    let state = session.stage().cursor().state();
    assert!(state.hovering);
    assert_eq!(state.diameter, 64.0);
    assert_eq!((state.anchor_x, state.anchor_y), (1180.0 - 32.0, 48.0 - 32.0));

    session.exit_viewport();
    session.run(180, FRAME);
    let state = session.stage().cursor().state();
    assert!(!state.hovering);
    assert_eq!(state.diameter, 16.0);
    assert_eq!(session.report().max_cursor_diameter, 64.0);
}

#[test]
fn verify_gallery_tile_scales_on_hover() {
    let mut session = session();
    let tile = session.page().gallery.items[0];

    // first tile spans document y 3132..3537
    session.scroll_to(3000.0);
    session.move_pointer(200.0, 300.0);
    session.run(120, FRAME);
    let scale = session.stage().hover_scale(tile).map(HoverScale::scale);
    assert!(approx(scale.unwrap(), 1.05));

    // off the tile, onto the page background
    session.move_pointer(1270.0, 790.0);
    session.run(120, FRAME);
    let scale = session.stage().hover_scale(tile).map(HoverScale::scale);
    assert!(approx(scale.unwrap(), 1.0));
}

#[test]
fn verify_hero_buttons_are_magnetic() {
    let mut session = session();
    let [book, _] = session.page().hero_buttons;

    // "Book Now" is centered at (528, 588)
    session.move_pointer(578.0, 598.0);
    session.run(120, FRAME);
    let magnet = session.stage().magnet(book).unwrap();
    assert!(magnet.is_inside());
    let (tx, ty) = magnet.target();
    assert!(approx(tx, 10.0) && approx(ty, 2.0));
    let (ox, oy) = magnet.offset();
    assert!(approx(ox, tx) && approx(oy, ty));

    session.move_pointer(100.0, 700.0);
    let mut last = session.stage().magnet(book).unwrap().offset().0;
    for _ in 0..120 {
        session.tick(FRAME);
        let x = session.stage().magnet(book).unwrap().offset().0;
        assert!(x <= last + 1e-4);
        last = x;
    }
    let magnet = session.stage().magnet(book).unwrap();
    assert!(!magnet.is_inside());
    assert_eq!(magnet.offset(), (0.0, 0.0));
}

#[test]
fn verify_spotlight_follows_pointer_over_hero() {
    let mut session = session();

    session.move_pointer(640.0, 400.0);
    session.tick(FRAME);
    let spotlight = session.stage().spotlight().unwrap();
    assert_eq!(spotlight.state().as_percent(), (50.0, 50.0));

    // below the hero the mask keeps its last center
    session.scroll_to(900.0);
    session.move_pointer(320.0, 700.0);
    session.tick(FRAME);
    let spotlight = session.stage().spotlight().unwrap();
    assert_eq!(spotlight.state().as_percent(), (50.0, 50.0));
}

#[test]
fn verify_scripted_visit_drops_nothing() {
    let mut session = session();

    session.run(60, FRAME);
    session.sweep_pointer((0.0, 0.0), (WIDTH, HEIGHT), 240, FRAME);
    session.scroll_through(200.0, 2, FRAME);
    session.sweep_pointer((WIDTH, 0.0), (0.0, HEIGHT), 240, FRAME);
    session.exit_viewport();
    session.run(60, FRAME);

    let report = session.report();
    assert_eq!(report.events_dropped, 0);
    assert!(report.hover_changes > 0);
    assert!(report.frames > 500);
    assert!(!session.stage().cursor().state().hovering);
}

//! # Interaction Verification Tests
//!
//! End-to-end checks of the motion layer through the public stage API:
//!
//! 1. **Cursor**: anchor = pointer - diameter / 2, grows one tick after hover
//! 2. **Magnetic**: 1/5 pull while inside, monotonic return after leave
//! 3. **Spotlight**: normalized, clamped mask center
//! 4. **Reveals**: staggered, one-shot
//! 5. **Marquee**: periodic offset
//! 6. **Lifetimes**: listeners released on every exit path
//!
//! Run with: cargo test --package sharp_motion --test interaction_verification

use sharp_motion::{
    ElementFlags, ElementId, ElementKind, HostEvent, InfiniteLoopAnimator, ListenerRegistry,
    MarqueeStrip, MotionConfig, MotionError, MotionStage, Rect, RenderCommand, RevealPhase,
    RevealSpec, RowLayout,
};

const FRAME: f32 = 1.0 / 60.0;

fn stage() -> MotionStage {
    MotionStage::new(MotionConfig::default()).unwrap()
}

fn place(stage: &mut MotionStage, element: ElementId, rect: Rect) {
    stage.handle_event(HostEvent::Layout { element, rect });
}

// ============================================================================
// CURSOR
// ============================================================================

#[test]
fn verify_cursor_anchor_for_all_positions() {
    let mut stage = stage();
    let link = stage.add_element(None, ElementKind::Anchor, ElementFlags::NONE).unwrap();

    for hovering in [false, true] {
        stage.handle_event(HostEvent::PointerOver {
            target: hovering.then_some(link),
        });
        let diameter = if hovering { 64.0 } else { 16.0 };

        for x in (0..=1920).step_by(160) {
            for y in (0..=1080).step_by(120) {
                let (x, y) = (x as f32, y as f32);
                stage.handle_event(HostEvent::PointerMove { x, y });
                stage.tick(FRAME);
                assert_eq!(
                    stage.cursor().target_anchor(),
                    (x - diameter / 2.0, y - diameter / 2.0)
                );
            }
        }
    }
}

#[test]
fn verify_cursor_converges_after_hover() {
    let mut stage = stage();
    let button = stage.add_element(None, ElementKind::Button, ElementFlags::NONE).unwrap();

    stage.handle_event(HostEvent::PointerMove { x: 400.0, y: 300.0 });
    stage.handle_event(HostEvent::PointerOver { target: Some(button) });

    // classification flips on the event itself
    assert!(stage.pointer().hovering());
    assert_eq!(stage.cursor().target_diameter(), 16.0);

    // the cursor picks it up on the next tick
    stage.tick(FRAME);
    assert_eq!(stage.cursor().target_diameter(), 64.0);

    for _ in 0..180 {
        stage.tick(FRAME);
    }
    let state = stage.cursor().state();
    assert!(state.hovering);
    assert_eq!(state.diameter, 64.0);
    assert_eq!((state.anchor_x, state.anchor_y), (368.0, 268.0));
}

#[test]
fn verify_hover_classification_walks_ancestors() {
    let mut stage = stage();
    let nav = stage.add_element(None, ElementKind::Generic, ElementFlags::NONE).unwrap();
    let link = stage.add_element(Some(nav), ElementKind::Anchor, ElementFlags::NONE).unwrap();
    let label = stage.add_element(Some(link), ElementKind::Generic, ElementFlags::NONE).unwrap();
    let card = stage
        .add_element(None, ElementKind::Generic, ElementFlags::NONE.with(ElementFlags::INTERACTIVE))
        .unwrap();
    let icon = stage.add_element(Some(card), ElementKind::Generic, ElementFlags::NONE).unwrap();
    let copy = stage.add_element(None, ElementKind::Section, ElementFlags::NONE).unwrap();

    let cases = [
        (Some(label), true),
        (Some(link), true),
        (Some(nav), false),
        (Some(icon), true),
        (Some(copy), false),
        (None, false),
    ];
    for (target, expected) in cases {
        stage.handle_event(HostEvent::PointerOver { target });
        assert_eq!(stage.pointer().hovering(), expected, "target {target:?}");
    }
}

// ============================================================================
// MAGNETIC
// ============================================================================

#[test]
fn verify_magnetic_leave_returns_monotonically() {
    let mut stage = stage();
    let button = stage
        .add_element(None, ElementKind::Button, ElementFlags::NONE.with(ElementFlags::MAGNETIC))
        .unwrap();
    place(&mut stage, button, Rect::new(100.0, 100.0, 200.0, 60.0));

    // displacement (40, 10) from the center (200, 130)
    stage.handle_event(HostEvent::PointerMove { x: 240.0, y: 140.0 });
    for _ in 0..120 {
        stage.tick(FRAME);
    }
    let settled = stage.magnet(button).unwrap().offset();
    assert!((settled.0 - 8.0).abs() < 0.05 && (settled.1 - 2.0).abs() < 0.05);

    stage.handle_event(HostEvent::PointerLeave { element: button });
    assert_eq!(stage.magnet(button).unwrap().target(), (0.0, 0.0));

    let mut last = settled;
    for _ in 0..120 {
        let frame = stage.tick(FRAME);
        let now = stage.magnet(button).unwrap().offset();
        assert!(now.0.abs() <= last.0.abs() && now.1.abs() <= last.1.abs());
        let instance = frame.transform_of(button).unwrap();
        assert_eq!(instance.translate, [now.0, now.1]);
        last = now;
    }
    assert_eq!(last, (0.0, 0.0));
}

#[test]
fn verify_magnetic_exit_detected_from_movement() {
    let mut stage = stage();
    let button = stage
        .add_element(None, ElementKind::Button, ElementFlags::NONE.with(ElementFlags::MAGNETIC))
        .unwrap();
    place(&mut stage, button, Rect::new(0.0, 0.0, 100.0, 100.0));

    stage.handle_event(HostEvent::PointerMove { x: 90.0, y: 50.0 });
    assert!(stage.magnet(button).unwrap().is_inside());

    stage.handle_event(HostEvent::PointerMove { x: 150.0, y: 50.0 });
    let magnet = stage.magnet(button).unwrap();
    assert!(!magnet.is_inside());
    assert_eq!(magnet.target(), (0.0, 0.0));
}

#[test]
fn verify_magnetic_uses_current_layout() {
    let mut stage = stage();
    let button = stage
        .add_element(None, ElementKind::Button, ElementFlags::NONE.with(ElementFlags::MAGNETIC))
        .unwrap();
    place(&mut stage, button, Rect::new(0.0, 0.0, 100.0, 100.0));
    stage.handle_event(HostEvent::PointerMove { x: 50.0, y: 50.0 });
    assert_eq!(stage.magnet(button).unwrap().target(), (0.0, 0.0));

    // the button moves under a still pointer, then the pointer twitches
    place(&mut stage, button, Rect::new(-20.0, 0.0, 100.0, 100.0));
    stage.handle_event(HostEvent::PointerMove { x: 50.0, y: 50.0 });
    assert!((stage.magnet(button).unwrap().target().0 - 4.0).abs() < 1e-5);
}

// ============================================================================
// SPOTLIGHT
// ============================================================================

#[test]
fn verify_spotlight_hero_scenario() {
    let mut stage = stage();
    let hero = stage.add_element(None, ElementKind::Section, ElementFlags::NONE).unwrap();
    place(&mut stage, hero, Rect::new(0.0, 0.0, 1000.0, 800.0));
    stage.set_spotlight_region(hero).unwrap();

    stage.handle_event(HostEvent::PointerMove { x: 100.0, y: 100.0 });
    let frame = stage.tick(FRAME);

    let reveal = frame
        .commands
        .iter()
        .find_map(|c| match c {
            RenderCommand::SpotlightReveal { center_percent, radius, .. } => Some((*center_percent, *radius)),
            _ => None,
        })
        .unwrap();
    assert!((reveal.0 .0 - 10.0).abs() < 1e-4);
    assert!((reveal.0 .1 - 12.5).abs() < 1e-4);
    assert_eq!(reveal.1, 150.0);

    // leaving the region keeps the last center
    stage.handle_event(HostEvent::PointerMove { x: 1500.0, y: 100.0 });
    let state = stage.spotlight().unwrap().state();
    assert!((state.x - 0.1).abs() < 1e-6);
}

// ============================================================================
// REVEALS
// ============================================================================

#[test]
fn verify_staggered_reveal_once() {
    let mut stage = stage();
    let cards: Vec<_> = (0..4)
        .map(|order| {
            let card = stage.add_element(None, ElementKind::Generic, ElementFlags::NONE).unwrap();
            stage
                .add_reveal(card, RevealSpec::fade().slide_y(30.0).order(order))
                .unwrap();
            card
        })
        .collect();

    for &card in &cards {
        assert_eq!(stage.reveals().phase(card), Some(RevealPhase::Pending));
        stage.handle_event(HostEvent::Intersection {
            element: card,
            ratio: 0.25,
            intersecting: true,
        });
    }

    for _ in 0..5 {
        stage.tick(0.05);
    }
    let frame = stage.tick(0.0);
    let first = frame.transform_of(cards[0]).unwrap();
    let last = frame.transform_of(cards[3]).unwrap();
    assert!(first.opacity > 0.0);
    assert_eq!(last.opacity, 0.0);
    assert_eq!(last.translate, [0.0, 30.0]);

    // scrolling away and back never re-arms
    for &card in &cards {
        stage.handle_event(HostEvent::Intersection {
            element: card,
            ratio: 0.0,
            intersecting: false,
        });
        stage.handle_event(HostEvent::Intersection {
            element: card,
            ratio: 1.0,
            intersecting: true,
        });
        assert!(!stage.reveals().is_observing(card));
    }

    for _ in 0..60 {
        stage.tick(FRAME);
    }
    for &card in &cards {
        let instance = stage.tick(0.0).transform_of(card).copied().unwrap();
        assert_eq!(instance.opacity, 1.0);
        assert_eq!(instance.translate, [0.0, 0.0]);
    }
    assert!(!stage.is_animating());
}

// ============================================================================
// MARQUEE
// ============================================================================

#[test]
fn verify_marquee_period() {
    let marquee = InfiniteLoopAnimator::new(&MotionConfig::default().marquee);
    for i in 0..200 {
        let t = f64::from(i) * 0.25;
        assert_eq!(marquee.offset_at(t), marquee.offset_at(t + 20.0));
    }
}

#[test]
fn verify_marquee_runs_on_stage() {
    let mut stage = stage();
    let row = stage.add_element(None, ElementKind::Generic, ElementFlags::NONE).unwrap();
    let strip = MarqueeStrip::from_cycle(&["Expert Barbers", "·", "Cold Drinks", "·"], 2).unwrap();
    let measure = |item: &str| item.chars().count() as f32 * 10.0;
    stage.set_marquee(row, &strip, &RowLayout::with_gap(50.0), measure).unwrap();
    // 140 + 10 + 110 + 10 px of text, four 50 px gaps
    assert_eq!(stage.marquee().map(InfiniteLoopAnimator::distance), Some(470.0));

    for _ in 0..59 {
        stage.tick(FRAME);
    }
    let frame = stage.tick(FRAME);
    let offset = frame
        .commands
        .iter()
        .find_map(|c| match c {
            RenderCommand::MarqueeOffset { offset, .. } => Some(*offset),
            _ => None,
        })
        .unwrap();
    // one second of a 20 s loop over one 470 px cycle
    assert!((offset + 23.5).abs() < 0.1, "offset {offset}");
    assert!(stage.is_animating());

    let bad = MarqueeStrip::new(vec!["a".into(), "b".into()]);
    assert!(matches!(bad, Err(MotionError::MarqueeNotSeamless { .. })));
}

// ============================================================================
// LIFETIMES
// ============================================================================

#[test]
fn verify_listeners_released_on_unmount_and_drop() {
    let mut stage_a = stage();
    let registry = stage_a.listeners().clone();
    assert_eq!(registry.attached(), 2);

    let button = stage_a
        .add_element(
            None,
            ElementKind::Button,
            ElementFlags::NONE
                .with(ElementFlags::MAGNETIC)
                .with(ElementFlags::HOVER_SCALE),
        )
        .unwrap();
    place(&mut stage_a, button, Rect::new(0.0, 0.0, 100.0, 100.0));

    let mut stage_b = stage_a;
    stage_b.unmount();
    assert_eq!(registry.attached(), 0);

    // unmounted stage ignores pointer input, including per-element controllers
    stage_b.handle_event(HostEvent::PointerMove { x: 90.0, y: 90.0 });
    stage_b.handle_event(HostEvent::PointerOver { target: Some(button) });
    stage_b.sender().send(HostEvent::PointerMove { x: 80.0, y: 80.0 });
    stage_b.tick(FRAME);

    assert_eq!(stage_b.pointer().sample().x, 0.0);
    assert!(!stage_b.pointer().hovering());
    let magnet = stage_b.magnet(button).unwrap();
    assert!(!magnet.is_inside());
    assert_eq!(magnet.target(), (0.0, 0.0));
    assert_eq!(stage_b.hover_scale(button).unwrap().scale(), 1.0);
    assert!(stage_b.hover_scale(button).unwrap().is_settled());
}

#[test]
fn verify_listeners_released_during_unwinding() {
    let slot: std::sync::Mutex<Option<ListenerRegistry>> = std::sync::Mutex::new(None);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let stage = stage();
        *slot.lock().unwrap() = Some(stage.listeners().clone());
        panic!("host crashed mid-frame");
    }));

    assert!(result.is_err());
    let registry = slot.lock().unwrap().take().unwrap();
    assert_eq!(registry.attached(), 0);
}

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn verify_checked_in_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/motion.toml");
    let config = MotionConfig::load(path).unwrap();
    assert_eq!(config, MotionConfig::default());
}

#[test]
fn verify_config_file_roundtrip_and_rejection() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("sharp_motion_roundtrip_{}.toml", std::process::id()));

    let mut config = MotionConfig::default();
    config.magnetic.max_offset = Some(24.0);
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
    assert_eq!(MotionConfig::load(&path).unwrap(), config);

    std::fs::write(&path, "[cursor.spring]\nstiffness = -1.0\ndamping = 1.0\nmass = 1.0\n").unwrap();
    assert!(matches!(MotionConfig::load(&path), Err(MotionError::InvalidConfig(_))));

    std::fs::remove_file(&path).unwrap();
    assert!(matches!(
        MotionConfig::load(&path),
        Err(MotionError::ConfigRead { .. })
    ));
}

use glam::Vec2;

use folio::frame::FrameClock;
use folio::parallax::{layer_translation, Parallax, FOLLOW_TIMEOUT_MS};

#[test]
fn clock_reports_seconds_between_frames() {
    let mut clock = FrameClock::new();

    let first = clock.tick(16.0).expect("first frame");
    assert!((first.dt - 0.016).abs() < 1e-6);
    assert_eq!(first.frame_index, 0);

    let second = clock.tick(32.0).expect("second frame");
    assert!((second.dt - 0.016).abs() < 1e-6);
    assert_eq!(second.frame_index, 1);
    assert_eq!(clock.frame_index(), 2);
}

#[test]
fn clock_drops_long_gaps_and_resumes() {
    let mut clock = FrameClock::new();
    clock.tick(16.0);

    assert!(clock.tick(5016.0).is_none());
    let resumed = clock.tick(5032.0).expect("frame after gap");
    assert!((resumed.dt - 0.016).abs() < 1e-6);
    assert_eq!(resumed.frame_index, 1);
}

#[test]
fn clock_drops_backwards_time() {
    let mut clock = FrameClock::new();
    clock.tick(100.0);
    assert!(clock.tick(50.0).is_none());
}

#[test]
fn idle_parallax_orbits_with_growing_rigidity() {
    let mut parallax = Parallax::new(Vec2::new(1000.0, 800.0));
    assert!(!parallax.is_following());

    let offset = parallax.update(0.0, 20.0);
    assert!((parallax.rigidity() - 0.001).abs() < 1e-6);
    assert!(offset.x.abs() < 1e-6);
    assert!((offset.y - 0.0005).abs() < 1e-6);

    for frame in 1..2000 {
        parallax.update(frame as f64 * 16.0, 20.0);
    }
    assert_eq!(parallax.rigidity(), 1.0);
    let offset = parallax.offset();
    assert!((offset.length() - 0.5).abs() < 1e-3, "orbit radius {}", offset.length());
}

#[test]
fn pointer_pulls_offset_until_timeout() {
    let mut parallax = Parallax::new(Vec2::new(1000.0, 800.0));
    parallax.pointer_moved(Vec2::new(1000.0, 800.0), 100.0);
    assert!(parallax.is_following());

    let offset = parallax.update(116.0, 20.0);
    assert_eq!(parallax.rigidity(), 0.5);
    assert!(offset.abs_diff_eq(Vec2::splat(0.25), 1e-6));

    for _ in 0..40 {
        parallax.update(132.0, 20.0);
    }
    assert!(parallax.offset().abs_diff_eq(Vec2::splat(0.5), 1e-4));

    parallax.update(100.0 + FOLLOW_TIMEOUT_MS + 1.0, 20.0);
    assert!(!parallax.is_following());
    assert!((parallax.rigidity() - 0.001).abs() < 1e-6);
}

#[test]
fn zero_parallax_amount_rests_at_centre() {
    let mut parallax = Parallax::new(Vec2::new(1000.0, 800.0));
    for frame in 0..100 {
        parallax.update(frame as f64 * 16.0, 0.0);
    }
    assert_eq!(parallax.offset(), Vec2::ZERO);
}

#[test]
fn layers_move_by_depth() {
    let offset = Vec2::new(0.25, -0.5);
    assert_eq!(layer_translation(offset, 2.0, 20.0), Vec2::new(10.0, -20.0));
    assert_eq!(layer_translation(offset, 0.0, 20.0), Vec2::ZERO);
}

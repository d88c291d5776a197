use glam::{Quat, Vec2, Vec3};

use folio::sim::{FieldConfig, Icon, IconField, RotationMode};

const DT: f32 = 1.0 / 60.0;

fn config(bounds: Vec2) -> FieldConfig {
    FieldConfig {
        bounds,
        ..FieldConfig::default()
    }
}

#[test]
fn overlapping_icons_push_apart() {
    let icons = vec![
        Icon::new(Vec2::new(1000.0, 500.0), Vec2::ZERO, 45.0),
        Icon::new(Vec2::new(1002.0, 500.0), Vec2::ZERO, 45.0),
    ];
    let mut field = IconField::with_icons(config(Vec2::new(2000.0, 1000.0)), icons);

    let mut previous = 2.0;
    for _ in 0..120 {
        field.step(DT);
        let distance = field.icons()[0].translation.distance(field.icons()[1].translation);
        assert!(distance >= previous - 1e-3, "distance shrank from {previous} to {distance}");
        previous = distance;
    }

    assert!(previous > field.config().icon_size, "icons still overlap at {previous}");
    assert!(field.icons()[0].translation.x < 1000.0);
    assert!(field.icons()[1].translation.x > 1002.0);
}

#[test]
fn scattered_icons_separate_and_stay_inside() {
    let bounds = Vec2::new(1280.0, 800.0);

    for seed in [1, 2, 3, 42] {
        let mut field = IconField::scatter(config(bounds), 10, seed);
        for _ in 0..600 {
            field.step(DT);
        }

        let icon_size = field.config().icon_size;
        let icons = field.icons();
        for (i, a) in icons.iter().enumerate() {
            let position = a.translation;
            assert!(
                position.cmpge(Vec2::ZERO).all() && position.cmple(bounds).all(),
                "seed {seed}: icon {i} left the viewport at {position}"
            );
            for (j, b) in icons.iter().enumerate().skip(i + 1) {
                let distance = position.distance(b.translation);
                assert!(distance > icon_size, "seed {seed}: icons {i} and {j} overlap at {distance}");
            }
        }
    }
}

#[test]
fn speed_relaxes_toward_default() {
    let icon = Icon::new(Vec2::splat(5000.0), Vec2::new(5.0, 0.0), 45.0);
    let mut field = IconField::with_icons(config(Vec2::splat(10_000.0)), vec![icon]);

    for _ in 0..600 {
        field.step(DT);
    }

    let default_speed = field.config().default_speed;
    let speed = field.icons()[0].speed();
    assert!(
        (speed - default_speed).abs() < default_speed * 0.05,
        "speed {speed} did not settle near {default_speed}"
    );
}

#[test]
fn fast_icons_slow_down() {
    let icon = Icon::new(Vec2::splat(5000.0), Vec2::new(0.0, 300.0), 45.0);
    let mut field = IconField::with_icons(config(Vec2::splat(10_000.0)), vec![icon]);

    for _ in 0..60 {
        field.step(DT);
    }

    let speed = field.icons()[0].speed();
    assert!(speed < 300.0 && speed > 30.0, "speed {speed}");
    assert!(field.icons()[0].velocity.y > 0.0);
}

#[test]
fn resting_icon_without_neighbours_stays_put() {
    let icon = Icon::new(Vec2::splat(5000.0), Vec2::ZERO, 45.0);
    let mut field = IconField::with_icons(FieldConfig::default(), vec![icon]);

    for _ in 0..60 {
        field.step(DT);
    }

    assert_eq!(field.icons()[0].translation, Vec2::splat(5000.0));
    assert_eq!(field.icons()[0].velocity, Vec2::ZERO);
}

#[test]
fn edges_turn_icons_back() {
    let icon = Icon::new(Vec2::new(30.0, 500.0), Vec2::new(-30.0, 0.0), 45.0);
    let mut field = IconField::with_icons(config(Vec2::new(2000.0, 1000.0)), vec![icon]);

    for _ in 0..300 {
        field.step(DT);
        assert!(field.icons()[0].translation.x > 0.0, "icon left the viewport");
    }

    assert!(field.icons()[0].velocity.x > 0.0);
}

#[test]
fn coincident_icons_split_along_x() {
    let icons = vec![
        Icon::new(Vec2::new(400.0, 400.0), Vec2::ZERO, 45.0),
        Icon::new(Vec2::new(400.0, 400.0), Vec2::ZERO, 45.0),
    ];
    let mut field = IconField::with_icons(FieldConfig::default(), icons);
    field.step(DT);

    let [a, b] = [field.icons()[0], field.icons()[1]];
    assert!(a.velocity.x > 0.0 && b.velocity.x < 0.0);
    assert!(a.velocity.y.abs() < 1e-6 && b.velocity.y.abs() < 1e-6);
    assert!(a.translation.is_finite() && b.translation.is_finite());
}

#[test]
fn result_does_not_depend_on_icon_order() {
    let a = Icon::new(Vec2::new(300.0, 310.0), Vec2::new(10.0, 0.0), 45.0);
    let b = Icon::new(Vec2::new(320.0, 300.0), Vec2::new(0.0, -10.0), 45.0);
    let bounds = Vec2::new(800.0, 600.0);

    let mut forward = IconField::with_icons(config(bounds), vec![a, b]);
    let mut reverse = IconField::with_icons(config(bounds), vec![b, a]);
    for _ in 0..30 {
        forward.step(DT);
        reverse.step(DT);
    }

    let eq = |x: Vec2, y: Vec2| x.abs_diff_eq(y, 1e-3);
    assert!(eq(forward.icons()[0].translation, reverse.icons()[1].translation));
    assert!(eq(forward.icons()[1].translation, reverse.icons()[0].translation));
}

#[test]
fn non_positive_dt_is_ignored() {
    let icon = Icon::new(Vec2::new(100.0, 100.0), Vec2::new(30.0, 0.0), 45.0);
    let mut field = IconField::with_icons(config(Vec2::new(800.0, 600.0)), vec![icon]);

    field.step(0.0);
    field.step(-0.5);

    assert_eq!(field.icons()[0], icon);
}

#[test]
fn scatter_is_seeded_and_inside_bounds() {
    let bounds = Vec2::new(1280.0, 720.0);
    let a = IconField::scatter(config(bounds), 8, 42);
    let b = IconField::scatter(config(bounds), 8, 42);
    let c = IconField::scatter(config(bounds), 8, 7);

    assert_eq!(a.len(), 8);
    assert_eq!(a.icons(), b.icons());
    assert_ne!(a.icons(), c.icons());

    let size = a.config().icon_size;
    for icon in a.icons() {
        let t = icon.translation;
        assert!(t.x >= size && t.x <= bounds.x - size, "x {}", t.x);
        assert!(t.y >= size && t.y <= bounds.y - size, "y {}", t.y);
        assert!((icon.speed() - a.config().default_speed).abs() < 1e-3);
        assert_eq!(icon.scale, size);
    }
}

#[test]
fn icon_size_change_rescales_icons() {
    let mut field = IconField::scatter(config(Vec2::new(800.0, 600.0)), 3, 1);
    field.set_icon_size(60.0);

    assert_eq!(field.config().icon_size, 60.0);
    assert!(field.icons().iter().all(|icon| icon.scale == 60.0));

    let model = field.model(0).expect("model for first icon");
    let translation = field.icons()[0].translation;
    assert!(model.w_axis.truncate().abs_diff_eq(translation.extend(0.0), 1e-4));
    assert!(field.model(3).is_none());
}

#[test]
fn still_rotation_is_unchanged() {
    let rotation = Quat::from_rotation_y(0.3);
    let next = RotationMode::Still.advance(rotation, Vec2::new(30.0, 0.0), 30.0, DT);
    assert_eq!(next, rotation);
}

#[test]
fn time_rotation_follows_rates() {
    let mode = RotationMode::Time {
        rates: Vec3::new(0.0, 0.0, 1.0),
    };
    let next = mode.advance(Quat::IDENTITY, Vec2::ZERO, 30.0, 0.5);
    assert!(next.abs_diff_eq(Quat::from_rotation_z(0.5), 1e-5));
}

#[test]
fn velocity_rotation_stays_normalized() {
    let mut rotation = Quat::IDENTITY;
    for _ in 0..1000 {
        rotation = RotationMode::default().advance(rotation, Vec2::new(25.0, -12.0), 30.0, DT);
    }
    assert!((rotation.length() - 1.0).abs() < 1e-4);
    assert!(!rotation.abs_diff_eq(Quat::IDENTITY, 1e-3));
}

use glam::Vec3;

use folio::geometry::{circle, cube_edges, grid_offsets, GlowInstance, LineInstance};
use folio::projection::{Projection, ProjectionKind, Viewport};

fn close(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, 1e-4)
}

#[test]
fn orthographic_maps_pixels_with_top_left_origin() {
    let mut projection = Projection::orthographic(400.0);
    assert!(projection.resize(Viewport::new(1280.0, 720.0), 2.0));

    assert!(close(projection.to_ndc(Vec3::new(640.0, 360.0, 0.0)), Vec3::ZERO));
    let corner = projection.to_ndc(Vec3::new(0.0, 0.0, 0.0));
    assert!((corner.x + 1.0).abs() < 1e-4 && (corner.y - 1.0).abs() < 1e-4);
    let far = projection.to_ndc(Vec3::new(1280.0, 720.0, 0.0));
    assert!((far.x - 1.0).abs() < 1e-4 && (far.y + 1.0).abs() < 1e-4);

    assert_eq!(projection.dpr(), 2.0);
    assert_eq!(projection.physical_size(), (2560, 1440));
}

#[test]
fn perspective_keeps_pixel_scale_on_the_image_plane() {
    let mut projection = Projection::perspective();
    assert!(projection.resize(Viewport::new(1000.0, 500.0), 1.0));

    let centre = projection.to_ndc(Vec3::new(500.0, 250.0, 0.0));
    assert!(centre.x.abs() < 1e-4 && centre.y.abs() < 1e-4);

    let corner = projection.to_ndc(Vec3::new(0.0, 0.0, 0.0));
    assert!((corner.x + 1.0).abs() < 1e-3, "x {}", corner.x);
    assert!((corner.y - 1.0).abs() < 1e-3, "y {}", corner.y);
}

#[test]
fn degenerate_resize_keeps_previous_state() {
    let mut projection = Projection::orthographic(100.0);
    assert!(projection.resize(Viewport::new(800.0, 600.0), 1.0));
    let matrix = projection.matrix();

    assert!(!projection.resize(Viewport::new(0.0, 600.0), 1.0));
    assert!(!projection.resize(Viewport::new(800.0, f32::NAN), 1.0));
    assert!(!projection.resize(Viewport::new(800.0, 600.0), 0.0));

    assert_eq!(projection.matrix(), matrix);
    assert_eq!(projection.viewport(), Viewport::new(800.0, 600.0));
}

#[test]
fn switching_kind_recomputes_matrix() {
    let mut projection = Projection::orthographic(100.0);
    projection.resize(Viewport::new(800.0, 600.0), 1.0);
    let ortho = projection.matrix();

    projection.set_kind(ProjectionKind::Perspective);
    assert_ne!(projection.matrix(), ortho);
}

#[test]
fn cube_edges_are_unit_and_centred() {
    let edges = cube_edges();
    assert_eq!(edges.len(), 12);

    for edge in edges {
        let start = Vec3::from_array(edge.start);
        let end = Vec3::from_array(edge.end);
        assert!((start.distance(end) - 1.0).abs() < 1e-6);
        assert!(start.abs().cmple(Vec3::splat(0.5)).all());
        assert!(end.abs().cmple(Vec3::splat(0.5)).all());
    }
}

#[test]
fn instance_strides_match_attribute_layout() {
    assert_eq!(LineInstance::STRIDE, 24);
    assert_eq!(GlowInstance::STRIDE, 28);
}

#[test]
fn circle_is_a_triangle_fan_as_list() {
    let disc = circle(8);
    assert_eq!(disc.len(), 24);
    for triangle in disc.chunks(3) {
        assert_eq!(triangle[0], [0.0, 0.0]);
        for [x, y] in &triangle[1..] {
            assert!((x.hypot(*y) - 1.0).abs() < 1e-5);
        }
    }
    assert_eq!(circle(1).len(), 9);
}

#[test]
fn grid_covers_viewport() {
    let offsets = grid_offsets(Viewport::new(100.0, 50.0), 34.0);
    assert_eq!(offsets.len(), 3 * 2);
    assert_eq!(offsets.first(), Some(&[0.0, 0.0]));
    assert_eq!(offsets.last(), Some(&[2.0, 1.0]));

    assert!(grid_offsets(Viewport::new(100.0, 50.0), 0.0).is_empty());
    assert!(grid_offsets(Viewport::default(), 34.0).is_empty());
}

// Host-side tests for box entities and their outlines.

use arrayviz_core::{lighten, Axis, BoxEntity, Dimension, Dimensions};
use glam::Vec3;

const EPS: f32 = 1e-5;

fn unit_box() -> BoxEntity {
    BoxEntity::new(Vec3::ZERO, [1.0, 0.0, 0.0], Dimensions::default(), 1.0)
}

#[test]
fn dimensions_fall_back_to_one_for_invalid_values() {
    let d = Dimensions::new(0.0, -3.0, f32::NAN);
    assert_eq!(d, Dimensions::new(1.0, 1.0, 1.0));
    assert_eq!(Dimensions::new(2.0, 3.0, 4.0).extents(), Vec3::new(2.0, 3.0, 4.0));
}

#[test]
fn set_dimension_touches_only_the_named_axis() {
    let mut b = unit_box();
    assert!(b.set_dimension(Dimension::Width, 4.0));
    let d = b.dimensions();
    assert_eq!(d.get(Dimension::Width), 4.0);
    assert_eq!(d.get(Dimension::Depth), 1.0);
    assert_eq!(d.get(Dimension::Height), 1.0);
}

#[test]
fn set_dimension_regenerates_the_outline_in_the_same_call() {
    let mut b = unit_box();
    assert_eq!(b.revision(), 0);
    b.set_dimension(Dimension::Height, 6.0);
    assert_eq!(b.revision(), 1);
    let half = b.outline().half_extents();
    assert!((half - Vec3::new(0.5, 0.5, 3.0)).length() < EPS);
    assert_eq!(b.outline().segments.len(), 12);
}

#[test]
fn set_dimension_rejects_non_positive_and_non_finite_values() {
    let mut b = unit_box();
    for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        assert!(!b.set_dimension(Dimension::Depth, bad), "accepted {bad}");
    }
    assert_eq!(b.dimensions().depth, 1.0);
    assert_eq!(b.revision(), 0);
}

#[test]
fn set_axis_y_offsets_by_half_the_width() {
    let mut b = unit_box();
    b.set_dimension(Dimension::Width, 2.0);
    b.set_axis(Axis::Y, Some(3.0));
    assert!((b.position().y - 4.0).abs() < EPS);

    b.set_axis(Axis::X, Some(-2.5));
    b.set_axis(Axis::Z, Some(7.0));
    assert_eq!(*b.position(), Vec3::new(-2.5, 4.0, 7.0));
}

#[test]
fn set_axis_without_value_leaves_the_box_in_place() {
    let mut b = unit_box();
    b.place_at(Vec3::new(1.0, 2.0, 3.0));
    b.set_axis(Axis::X, None);
    b.set_axis(Axis::Y, None);
    assert_eq!(*b.position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn z_from_bottom_rests_the_bottom_face() {
    let mut b = unit_box();
    b.set_dimension(Dimension::Height, 4.0);
    b.set_z_from_bottom(Some(10.0));
    assert!((b.position().z - 12.0).abs() < EPS);
    assert!((b.aabb().min.z - 10.0).abs() < EPS);

    // unset and zero elevations are ignored
    b.set_z_from_bottom(None);
    b.set_z_from_bottom(Some(0.0));
    assert!((b.position().z - 12.0).abs() < EPS);
}

#[test]
fn mirror_negates_only_y() {
    let mut b = unit_box();
    b.place_at(Vec3::new(1.0, 5.0, 2.0));
    b.mirror_across_y();
    assert_eq!(*b.position(), Vec3::new(1.0, -5.0, 2.0));
}

#[test]
fn aabb_matches_position_and_extents() {
    let mut b = BoxEntity::new(
        Vec3::new(1.0, 2.0, 3.0),
        [0.0, 0.0, 1.0],
        Dimensions::new(2.0, 4.0, 6.0),
        1.0,
    );
    let bb = b.aabb();
    assert_eq!(bb.min, Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(bb.max, Vec3::new(2.0, 4.0, 6.0));
    b.place_at(Vec3::splat(f32::NAN));
    assert_eq!(*b.position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn opacity_is_clamped_and_drives_translucency() {
    let solid = unit_box();
    assert!(!solid.is_translucent());
    let glass = BoxEntity::new(Vec3::ZERO, [0.0, 1.0, 0.0], Dimensions::default(), 0.15);
    assert!(glass.is_translucent());
    let over = BoxEntity::new(Vec3::ZERO, [0.0, 1.0, 0.0], Dimensions::default(), 3.0);
    assert_eq!(over.opacity(), 1.0);
}

#[test]
fn outline_color_is_a_lighter_shade() {
    let red = lighten([1.0, 0.0, 0.0], 0.2);
    assert!((red[0] - 1.0).abs() < 1e-4);
    assert!((red[1] - 0.4).abs() < 1e-4);
    assert!((red[2] - 0.4).abs() < 1e-4);

    let b = unit_box();
    assert_eq!(b.outline_color(), lighten(b.color(), 0.2));

    let grey = lighten([0.5, 0.5, 0.5], 0.2);
    for c in grey {
        assert!((c - 0.7).abs() < 1e-4);
    }
}

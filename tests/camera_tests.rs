// Host-side tests for camera fitting, transitions and manual orbit controls.

use arrayviz_core::{
    compute_fit, ease_out_quad, fit_distance, Aabb, Camera, CameraTransition, Orientation,
    ViewParams, ViewState,
};
use glam::Vec3;

const EPS: f32 = 1e-4;

fn unit_bounds_at(center: Vec3, size: f32) -> Aabb {
    Aabb::from_center_extents(center, Vec3::splat(size))
}

#[test]
fn fit_distance_reference_values() {
    let fov = 90f32.to_radians();
    // tan(45deg) = 1, so a 2-unit cube needs distance 1 at aspect 1
    assert!((fit_distance(2.0, fov, 1.0, 1.0) - 1.0).abs() < EPS);
    // a portrait viewport is width-limited
    assert!((fit_distance(2.0, fov, 0.5, 1.0) - 2.0).abs() < EPS);
    // offset scales linearly
    assert!((fit_distance(2.0, fov, 1.0, 3.0) - 3.0).abs() < EPS);
}

#[test]
fn fit_distance_is_positive_and_grows_with_size() {
    let fov = 75f32.to_radians();
    let mut prev = fit_distance(0.0, fov, 1.5, 1.0);
    assert!(prev > 0.0 && prev.is_finite());
    for i in 1..50 {
        let d = fit_distance(i as f32 * 0.5, fov, 1.5, 1.0);
        assert!(d > prev, "distance not increasing at size {}", i as f32 * 0.5);
        prev = d;
    }
}

#[test]
fn presets_place_the_eye_on_their_axis() {
    let camera = Camera::default();
    let bounds = unit_bounds_at(Vec3::new(1.0, 2.0, 3.0), 2.0);
    for (orientation, axis) in [
        (Orientation::Top, Vec3::Z),
        (Orientation::Side, Vec3::Y),
        (Orientation::Front, Vec3::X),
    ] {
        let fit = compute_fit(&bounds, &camera, 1.0, orientation);
        let expected = fit.center + axis * fit.distance;
        assert!((fit.eye - expected).length() < EPS, "{orientation:?}");
    }
}

#[test]
fn no_preset_keeps_the_current_view_direction() {
    let camera = Camera {
        eye: Vec3::new(10.0, 0.0, 0.0),
        target: Vec3::ZERO,
        ..Camera::default()
    };
    let bounds = unit_bounds_at(Vec3::new(0.0, 5.0, 0.0), 4.0);
    let fit = compute_fit(&bounds, &camera, 1.0, Orientation::None);
    let dir = (fit.eye - fit.center).normalize();
    assert!((dir - Vec3::X).length() < EPS);
    assert!((fit.eye.distance(fit.center) - fit.distance).abs() < EPS);
}

#[test]
fn clip_planes_and_zoom_limit_follow_the_distance() {
    let camera = Camera::default();
    let bounds = unit_bounds_at(Vec3::ZERO, 10.0);
    let fit = compute_fit(&bounds, &camera, 3.0, Orientation::Side);
    assert!((fit.znear - fit.distance / 10.0).abs() < EPS);
    assert!((fit.zfar - fit.distance * 10.0).abs() < EPS);
    assert!((fit.max_distance - fit.distance * 2.0).abs() < EPS);
    assert_eq!(fit.size, Vec3::splat(10.0));
}

#[test]
fn degenerate_bounds_still_fit() {
    let camera = Camera::default();
    let point = Aabb {
        min: Vec3::ONE,
        max: Vec3::ONE,
    };
    let fit = compute_fit(&point, &camera, 1.0, Orientation::Top);
    assert!(fit.distance > 0.0 && fit.distance.is_finite());
    assert!(fit.znear > 0.0 && fit.znear < fit.zfar);
}

#[test]
fn ease_out_quad_endpoints_and_midpoint() {
    assert_eq!(ease_out_quad(0.0), 0.0);
    assert_eq!(ease_out_quad(1.0), 1.0);
    assert!((ease_out_quad(0.5) - 0.75).abs() < EPS);
    assert_eq!(ease_out_quad(2.0), 1.0);
}

#[test]
fn transition_eases_and_lands_exactly() {
    let mut t = CameraTransition::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 1.0);
    let mid = t.step(0.5);
    assert!((mid.x - 3.0).abs() < EPS);
    assert!(!t.is_finished());
    let end = t.step(0.75);
    assert!(t.is_finished());
    assert_eq!(end, Vec3::new(4.0, 0.0, 0.0));
}

#[test]
fn view_tick_finishes_the_fit_and_resets_up() {
    let mut view = ViewState::new(&ViewParams::default(), 1.5);
    let fit = compute_fit(
        &unit_bounds_at(Vec3::new(0.0, 0.0, 5.0), 2.0),
        &view.camera,
        1.0,
        Orientation::Top,
    );
    view.apply_fit(&fit);
    assert_eq!(view.camera.target, fit.center);
    assert_eq!(view.max_distance, Some(fit.max_distance));
    assert!(view.is_animating());

    view.camera.up = Vec3::X;
    let mut frames = 0;
    while view.tick(1.0 / 60.0) {
        frames += 1;
        assert!(frames < 200, "transition never finished");
    }
    assert!(!view.is_animating());
    assert!((view.camera.eye - fit.eye).length() < 1e-3);
    assert_eq!(view.camera.up, Vec3::Z);
}

#[test]
fn a_new_fit_supersedes_the_one_in_flight() {
    let mut view = ViewState::new(&ViewParams::default(), 1.0);
    let first = compute_fit(
        &unit_bounds_at(Vec3::ZERO, 2.0),
        &view.camera,
        1.0,
        Orientation::Top,
    );
    view.apply_fit(&first);
    view.tick(0.5);
    let eye_mid = view.camera.eye;

    let second = compute_fit(
        &unit_bounds_at(Vec3::new(10.0, 0.0, 0.0), 2.0),
        &view.camera,
        1.0,
        Orientation::Side,
    );
    view.apply_fit(&second);
    let transition = view.transition().expect("transition running");
    assert_eq!(transition.target(), second.eye);
    assert_eq!(transition.sample(), eye_mid);
}

#[test]
fn manual_gestures_latch_and_cancel_the_transition() {
    let mut view = ViewState::new(&ViewParams::default(), 1.0);
    let fit = compute_fit(
        &unit_bounds_at(Vec3::ZERO, 2.0),
        &view.camera,
        1.0,
        Orientation::None,
    );
    view.apply_fit(&fit);
    assert!(!view.user_interacted());

    view.orbit(0.1, 0.0);
    assert!(view.user_interacted());
    assert!(!view.is_animating());

    view.reset_latch();
    assert!(!view.user_interacted());
}

#[test]
fn orbit_keeps_the_distance() {
    let mut view = ViewState::new(&ViewParams::default(), 1.0);
    let before = view.camera.distance();
    view.orbit(0.7, -0.3);
    assert!((view.camera.distance() - before).abs() < 1e-3);
    view.orbit(0.0, 10.0);
    assert!(view.camera.eye.is_finite());
}

#[test]
fn dolly_is_bounded_by_the_fit_limit() {
    let mut view = ViewState::new(&ViewParams::default(), 1.0);
    let fit = compute_fit(
        &unit_bounds_at(Vec3::ZERO, 2.0),
        &view.camera,
        1.0,
        Orientation::Front,
    );
    view.apply_fit(&fit);
    while view.tick(0.1) {}

    view.dolly(100.0);
    let max = fit.max_distance;
    assert!((view.camera.distance() - max).abs() < max * 1e-4);

    view.dolly(0.0);
    assert!(view.camera.distance() > 0.0);
}

#[test]
fn pan_moves_eye_and_target_together() {
    let mut view = ViewState::new(&ViewParams::default(), 1.0);
    let offset = view.camera.eye - view.camera.target;
    view.pan(0.1, 0.05);
    assert!(view.camera.target.length() > 0.0);
    assert!(((view.camera.eye - view.camera.target) - offset).length() < 1e-3);
}

#[test]
fn top_view_matrix_is_finite() {
    let camera = Camera {
        eye: Vec3::new(0.0, 0.0, 10.0),
        target: Vec3::ZERO,
        ..Camera::default()
    };
    assert!(camera.view_proj().is_finite());
}

fn screen_up(camera: &Camera) -> Vec3 {
    camera.view_matrix().row(1).truncate()
}

#[test]
fn pan_works_after_a_top_fit() {
    let mut view = ViewState::new(&ViewParams::default(), 1.0);
    let fit = compute_fit(
        &unit_bounds_at(Vec3::new(0.0, 0.0, 1.0), 4.0),
        &view.camera,
        1.0,
        Orientation::Top,
    );
    view.apply_fit(&fit);
    while view.tick(0.1) {}

    let before = view.camera.target;
    let offset = view.camera.eye - view.camera.target;
    view.pan(0.2, 0.2);
    assert!(view.user_interacted());
    assert!((view.camera.target - before).length() > 1e-3);
    assert!((view.camera.target.z - before.z).abs() < 1e-4);
    assert!(((view.camera.eye - view.camera.target) - offset).length() < 1e-3);
}

#[test]
fn leaving_the_top_view_does_not_flip_the_image() {
    let exact = Camera {
        eye: Vec3::new(0.0, 0.0, 10.0),
        target: Vec3::ZERO,
        ..Camera::default()
    };
    let near = Camera {
        eye: Vec3::new(0.01, 0.0, 10.0),
        ..exact.clone()
    };
    let (a, b) = (screen_up(&exact), screen_up(&near));
    assert!(a.dot(b) > 0.99, "exact={a:?} near={b:?}");

    // an orbit off the exact top view keeps the roll too
    let mut view = ViewState::new(&ViewParams::default(), 1.0);
    view.camera = exact.clone();
    view.orbit(0.0, 0.05);
    assert!(screen_up(&view.camera).dot(a) > 0.99);
}

#[test]
fn looking_straight_up_has_a_valid_roll() {
    let camera = Camera {
        eye: Vec3::new(0.0, 0.0, -10.0),
        target: Vec3::ZERO,
        ..Camera::default()
    };
    let near = Camera {
        eye: Vec3::new(0.01, 0.0, -10.0),
        ..camera.clone()
    };
    assert!(camera.view_matrix().is_finite());
    assert!(screen_up(&camera).dot(screen_up(&near)) > 0.99);
}

//! Placement rules: form values in, entity positions and dimensions out.
//!
//! The `*_x`, `*_y`, `*_z` and `*_depth` functions are pure; the `place_*` and
//! `sync_*` functions apply them to a `Scene` through the `BoxEntity` methods
//! only. Each rule touches just the axes whose inputs are present, so a half
//! filled form never disturbs unrelated coordinates.

use crate::constants::*;
use crate::entity::{Axis, BoxEntity, Dimension, Dimensions};
use crate::form::{FormState, Posture, UnitSystem};
use crate::scene::{EntityId, Scene};
use glam::Vec3;

// ---------------- Pure rules ----------------

/// Array depth/span: the input when positive, otherwise 1.
#[inline]
pub fn array_dimension(value: Option<f32>) -> f32 {
    value.filter(|v| *v > 0.0).unwrap_or(1.0)
}

/// Array center x. Referenced from below the array, the origin is the array's
/// leading face.
#[inline]
pub fn array_x(array_depth: f32, referenced_from_below: bool) -> f32 {
    if referenced_from_below {
        0.0
    } else {
        -array_depth / 2.0
    }
}

/// Sub center x for a front-face offset of `offset` from the reference origin.
#[inline]
pub fn sub_x(sub_depth: f32, offset: f32, array_depth: f32, referenced_from_below: bool) -> f32 {
    let x = -sub_depth / 2.0 + offset;
    if referenced_from_below {
        x + array_depth / 2.0
    } else {
        x
    }
}

/// Sub center y.
///
/// - LR configuration on with a distance: `distance + width/2`
/// - LR configuration on without a distance: the array's y
/// - LR configuration off: centered on 0
#[inline]
pub fn sub_y(sub_lr: bool, center_distance: Option<f32>, sub_width: f32, array_y: f32) -> f32 {
    match (sub_lr, center_distance) {
        (true, Some(d)) => d + sub_width / 2.0,
        (true, None) => array_y,
        (false, _) => 0.0,
    }
}

/// Audience depth from the first and last row distances; `None` unless both
/// are present and the last row lies beyond the first.
#[inline]
pub fn audience_depth(first_row: Option<f32>, last_row: Option<f32>) -> Option<f32> {
    match (first_row, last_row) {
        (Some(first), Some(last)) if last - first > 0.0 => Some(last - first),
        _ => None,
    }
}

#[inline]
pub fn audience_x(
    audience_depth: f32,
    first_row: f32,
    array_depth: f32,
    referenced_from_below: bool,
) -> f32 {
    let x = audience_depth / 2.0 + first_row;
    if referenced_from_below {
        x + array_depth / 2.0
    } else {
        x
    }
}

/// Audience width grows with the sub spread.
#[inline]
pub fn audience_width(center_distance: Option<f32>) -> Option<f32> {
    center_distance
        .map(|d| d * AUDIENCE_WIDTH_FACTOR)
        .filter(|w| *w > 0.0)
}

#[inline]
pub fn audience_z(posture: Posture, units: UnitSystem) -> f32 {
    match (posture, units) {
        (Posture::Seated, UnitSystem::Metric) => AUDIENCE_Z_SEATED_METERS,
        (Posture::Seated, UnitSystem::Imperial) => AUDIENCE_Z_SEATED_FEET,
        (Posture::Standing, UnitSystem::Metric) => AUDIENCE_Z_STANDING_METERS,
        (Posture::Standing, UnitSystem::Imperial) => AUDIENCE_Z_STANDING_FEET,
    }
}

// ---------------- Scene construction ----------------

/// Build the entities from the current form. The sub mirror slot stays
/// uninitialized until the LR configuration is first switched on.
pub fn initial_scene(form: &FormState) -> Scene {
    let mut scene = Scene::new();

    let array_dims = Dimensions::new(
        array_dimension(form.array_depth),
        1.0,
        array_dimension(form.array_span),
    );
    let array_pos = Vec3::new(
        array_x(array_dims.depth, form.reference_from_below),
        ARRAY_INITIAL_Y,
        array_dims.height / 2.0 + ARRAY_INITIAL_BOTTOM,
    );
    let mut array = BoxEntity::new(array_pos, ARRAY_COLOR, array_dims, 1.0);
    array.set_z_from_bottom(form.array_bottom);
    array.set_axis(Axis::Y, form.sub_center_distance);
    scene.insert(EntityId::Array, array.clone());

    let mut mirror = array;
    mirror.mirror_across_y();
    scene.insert(EntityId::ArrayMirror, mirror);

    let [d, w, h] = SUB_INITIAL_DIMENSIONS;
    let sub_x0 = sub_x(d, 0.0, array_dims.depth, form.reference_from_below);
    let sub = BoxEntity::new(
        Vec3::new(sub_x0, 0.0, h / 2.0),
        SUB_COLOR,
        Dimensions::new(d, w, h),
        1.0,
    );
    scene.insert(EntityId::Sub, sub);
    if let Some(offset) = form.sub_depth {
        place_sub_x(&mut scene, offset, form.reference_from_below);
    }
    place_sub_y(&mut scene, form);
    sync_sub_mirror(&mut scene, form.sub_lr);

    let initial_width = (array_pos_y(&scene) * AUDIENCE_WIDTH_FACTOR).abs();
    let audience_dims = Dimensions::new(AUDIENCE_INITIAL_DEPTH, initial_width, AUDIENCE_THICKNESS);
    let audience = BoxEntity::new(
        Vec3::new(
            audience_dims.depth / 2.0 + AUDIENCE_INITIAL_X_GAP,
            0.0,
            AUDIENCE_INITIAL_Z,
        ),
        AUDIENCE_COLOR,
        audience_dims,
        AUDIENCE_OPACITY,
    );
    scene.insert(EntityId::Audience, audience);
    place_audience(&mut scene, form);

    log::debug!(
        "[placement] initial scene: array=({:.2},{:.2},{:.2}) sub_lr={} referenced={}",
        array_pos.x,
        array_pos_y(&scene),
        scene.get(EntityId::Array).map(|a| a.position().z).unwrap_or_default(),
        form.sub_lr,
        form.reference_from_below
    );
    scene
}

fn array_pos_y(scene: &Scene) -> f32 {
    scene
        .get(EntityId::Array)
        .map(|a| a.position().y)
        .unwrap_or(ARRAY_INITIAL_Y)
}

fn snapshot(scene: &Scene, id: EntityId) -> Option<(Dimensions, Vec3)> {
    scene.get(id).map(|b| (*b.dimensions(), *b.position()))
}

// ---------------- Array ----------------

/// Apply a new array depth and re-derive the array x. Everything measured from
/// the array face follows when positions are referenced from below the array.
pub fn place_array_depth(scene: &mut Scene, form: &FormState) {
    let Some(array) = scene.get_mut(EntityId::Array) else {
        return;
    };
    if let Some(depth) = form.array_depth {
        array.set_dimension(Dimension::Depth, depth);
    }
    let depth = array.dimensions().depth;
    array.set_axis(Axis::X, Some(array_x(depth, form.reference_from_below)));
    sync_array_mirror(scene);
    if form.reference_from_below {
        place_sub_x(scene, form.sub_depth.unwrap_or(0.0), true);
        sync_sub_mirror(scene, form.sub_lr);
        place_audience(scene, form);
    }
}

/// Apply a new array span, keeping the bottom face where the form puts it.
pub fn place_array_span(scene: &mut Scene, form: &FormState) {
    let Some(array) = scene.get_mut(EntityId::Array) else {
        return;
    };
    if let Some(span) = form.array_span {
        if array.set_dimension(Dimension::Height, span) {
            array.set_z_from_bottom(form.array_bottom);
        }
    }
    sync_array_mirror(scene);
}

pub fn place_array_bottom(scene: &mut Scene, form: &FormState) {
    if let Some(array) = scene.get_mut(EntityId::Array) {
        array.set_z_from_bottom(form.array_bottom);
    }
    sync_array_mirror(scene);
}

/// The sub distance from center also spaces the array pair.
pub fn place_array_y(scene: &mut Scene, form: &FormState) {
    if form.sub_center_distance.is_none() {
        return;
    }
    if let Some(array) = scene.get_mut(EntityId::Array) {
        array.set_axis(Axis::Y, form.sub_center_distance);
    }
    sync_array_mirror(scene);
}

/// Copy the array's dimensions, x and z to its mirror and negate y.
pub fn sync_array_mirror(scene: &mut Scene) {
    let Some((dims, pos)) = snapshot(scene, EntityId::Array) else {
        return;
    };
    if let Some(mirror) = scene.get_mut(EntityId::ArrayMirror) {
        mirror.set_dimensions(dims);
        mirror.place_at(pos);
        mirror.mirror_across_y();
    }
}

/// Re-derive the array x for the current reference mode.
pub fn place_array_x(scene: &mut Scene, referenced_from_below: bool) {
    if let Some(array) = scene.get_mut(EntityId::Array) {
        let depth = array.dimensions().depth;
        array.set_axis(Axis::X, Some(array_x(depth, referenced_from_below)));
    }
    sync_array_mirror(scene);
}

// ---------------- Subwoofer ----------------

pub fn place_sub_x(scene: &mut Scene, offset: f32, referenced_from_below: bool) {
    let array_depth = scene
        .get(EntityId::Array)
        .map(|a| a.dimensions().depth)
        .unwrap_or(1.0);
    if let Some(sub) = scene.get_mut(EntityId::Sub) {
        let x = sub_x(sub.dimensions().depth, offset, array_depth, referenced_from_below);
        sub.set_axis(Axis::X, Some(x));
    }
}

pub fn place_sub_y(scene: &mut Scene, form: &FormState) {
    let array_y = array_pos_y(scene);
    if let Some(sub) = scene.get_mut(EntityId::Sub) {
        let y = sub_y(
            form.sub_lr,
            form.sub_center_distance,
            sub.dimensions().width,
            array_y,
        );
        let mut pos = *sub.position();
        pos.y = y;
        sub.place_at(pos);
    }
}

/// Create the sub mirror on first need, show or hide it with the LR
/// configuration, and keep it on the far side of the sub.
pub fn sync_sub_mirror(scene: &mut Scene, sub_lr: bool) {
    let Some((dims, pos)) = snapshot(scene, EntityId::Sub) else {
        return;
    };
    if sub_lr {
        let sub_color = scene
            .get(EntityId::Sub)
            .map(|s| s.color())
            .unwrap_or(SUB_COLOR);
        if scene.ensure_with(EntityId::SubMirror, || {
            BoxEntity::new(pos, sub_color, dims, 1.0)
        }) {
            log::debug!("[placement] sub mirror created");
        }
        scene.show(EntityId::SubMirror);
    } else {
        scene.hide(EntityId::SubMirror);
    }
    if let Some(mirror) = scene.get_mut(EntityId::SubMirror) {
        mirror.set_dimensions(dims);
        mirror.place_at(pos);
        mirror.mirror_across_y();
    }
}

// ---------------- Audience ----------------

/// Apply the three independent audience updates: depth and x from the row
/// distances, width from the sub spread, z from posture and units.
pub fn place_audience(scene: &mut Scene, form: &FormState) {
    let array_depth = scene
        .get(EntityId::Array)
        .map(|a| a.dimensions().depth)
        .unwrap_or(1.0);
    let Some(audience) = scene.get_mut(EntityId::Audience) else {
        return;
    };
    if let (Some(depth), Some(first)) = (
        audience_depth(form.audience_first_row, form.audience_last_row),
        form.audience_first_row,
    ) {
        audience.set_dimension(Dimension::Depth, depth);
        let x = audience_x(depth, first, array_depth, form.reference_from_below);
        audience.set_axis(Axis::X, Some(x));
    }
    if let Some(width) = audience_width(form.sub_center_distance) {
        audience.set_dimension(Dimension::Width, width);
    }
    audience.set_axis(Axis::Z, Some(audience_z(form.posture, form.units)));
}

use glam::Vec3;

// Shared layout/camera tuning constants used by the core and the web frontend.

// Audience ear height (box center z), by posture and unit system
pub const AUDIENCE_Z_SEATED_METERS: f32 = 1.26;
pub const AUDIENCE_Z_SEATED_FEET: f32 = 1.623;
pub const AUDIENCE_Z_STANDING_METERS: f32 = 4.13;
pub const AUDIENCE_Z_STANDING_FEET: f32 = 5.32;

// Audience plan width is the sub spread scaled by this factor
pub const AUDIENCE_WIDTH_FACTOR: f32 = 4.0;

// Initial layout
pub const ARRAY_INITIAL_Y: f32 = 20.0;
pub const ARRAY_INITIAL_BOTTOM: f32 = 10.0;
pub const SUB_INITIAL_DIMENSIONS: [f32; 3] = [1.0, 2.0, 1.0]; // depth, width, height
pub const AUDIENCE_INITIAL_DEPTH: f32 = 0.1;
pub const AUDIENCE_INITIAL_X_GAP: f32 = 5.0; // first row distance when no rows are given
pub const AUDIENCE_INITIAL_Z: f32 = 1.2;
pub const AUDIENCE_THICKNESS: f32 = 0.1;
pub const AUDIENCE_OPACITY: f32 = 0.15;

// Palette (linear rgb)
pub const ARRAY_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
pub const SUB_COLOR: [f32; 3] = [0.0, 0.0, 1.0];
pub const AUDIENCE_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
pub const OUTLINE_LIGHTEN: f32 = 0.2; // HSL lightness added to outlines

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_INITIAL_EYE: [f32; 3] = [70.0, -40.0, 15.0];
pub const CAMERA_INITIAL_NEAR: f32 = 0.1;
pub const CAMERA_INITIAL_FAR: f32 = 1000.0;
pub const CAMERA_TRANSITION_SECS: f32 = 1.0;
pub const CLIP_RATIO: f32 = 10.0; // near = d / ratio, far = d * ratio
pub const MAX_DISTANCE_FACTOR: f32 = 2.0; // orbit zoom-out limit relative to fit distance
pub const MIN_FIT_EXTENT: f32 = 1e-3; // floor for degenerate selections

// Fit offsets (zoom margins)
pub const FIT_OFFSET_CLOSE: f32 = 3.0; // a single entity or a tight group
pub const FIT_OFFSET_WIDE: f32 = 1.0; // whole scene or a mirrored pair

// Orbit interaction limits
pub const ORBIT_MIN_DISTANCE: f32 = 0.05;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-3;

#[inline]
pub fn camera_initial_eye() -> Vec3 {
    Vec3::from_array(CAMERA_INITIAL_EYE)
}

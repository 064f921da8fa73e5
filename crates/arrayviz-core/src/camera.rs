//! Camera description, camera fit and the animated fit transition.
//!
//! These types avoid platform APIs; the web frontend turns `Camera` into view
//! and projection matrices each frame.

use crate::bounds::Aabb;
use crate::constants::*;
use glam::{Mat4, Vec3};

/// Right-handed perspective camera with z up.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_initial_eye(),
            target: Vec3::ZERO,
            up: Vec3::Z,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_INITIAL_NEAR,
            zfar: CAMERA_INITIAL_FAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.effective_up())
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector from the eye towards the target, if the two are distinct.
    pub fn view_direction(&self) -> Option<Vec3> {
        (self.target - self.eye).try_normalize()
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Roll reference handed to `look_at`. Near the up axis the projection of
    /// `up` onto the view plane degenerates, so the reference becomes the
    /// horizontal heading instead. That heading is what the projection tends
    /// to, so the image does not flip when an orbit leaves the vertical. An
    /// exactly vertical view takes azimuth zero (eye on the +x side).
    pub(crate) fn effective_up(&self) -> Vec3 {
        let Some(dir) = self.view_direction() else {
            return self.up;
        };
        if dir.cross(self.up).length_squared() > 1e-8 {
            return self.up;
        }
        let heading = (dir - self.up * dir.dot(self.up))
            .try_normalize()
            .unwrap_or(Vec3::NEG_X);
        if dir.dot(self.up) > 0.0 {
            -heading
        } else {
            heading
        }
    }
}

/// Camera-fit direction preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Looking down from +z.
    Top,
    /// Looking in from +y.
    Side,
    /// Looking back from +x.
    Front,
    /// Keep the current view direction.
    #[default]
    None,
}

impl Orientation {
    pub fn axis(self) -> Option<Vec3> {
        match self {
            Orientation::Top => Some(Vec3::Z),
            Orientation::Side => Some(Vec3::Y),
            Orientation::Front => Some(Vec3::X),
            Orientation::None => None,
        }
    }
}

/// Everything a fit decides, computed without touching the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFit {
    pub center: Vec3,
    pub size: Vec3,
    pub distance: f32,
    pub eye: Vec3,
    pub max_distance: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// Distance at which a cube of side `max_extent` fills the view, scaled by the
/// zoom margin `offset`.
pub fn fit_distance(max_extent: f32, fovy_radians: f32, aspect: f32, offset: f32) -> f32 {
    let extent = max_extent.max(MIN_FIT_EXTENT);
    let fit_height = extent / (2.0 * (fovy_radians / 2.0).tan());
    let fit_width = fit_height / aspect.max(f32::EPSILON);
    offset * fit_height.max(fit_width)
}

/// Frame `bounds` from `camera`. With an orientation preset the eye sits on
/// that axis through the bounds center; otherwise the current view direction
/// is kept so the move reads as a dolly rather than a cut.
pub fn compute_fit(
    bounds: &Aabb,
    camera: &Camera,
    offset: f32,
    orientation: Orientation,
) -> CameraFit {
    let size = bounds.size();
    let center = bounds.center();
    let distance = fit_distance(bounds.max_extent(), camera.fovy_radians, camera.aspect, offset);
    let eye = match orientation.axis() {
        Some(axis) => center + axis * distance,
        None => {
            let dir = camera
                .view_direction()
                .unwrap_or_else(|| (Vec3::ZERO - camera_initial_eye()).normalize());
            center - dir * distance
        }
    };
    CameraFit {
        center,
        size,
        distance,
        eye,
        max_distance: distance * MAX_DISTANCE_FACTOR,
        znear: distance / CLIP_RATIO,
        zfar: distance * CLIP_RATIO,
    }
}

/// Eases the eye from one position to another over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransition {
    from: Vec3,
    to: Vec3,
    elapsed: f32,
    duration: f32,
}

impl CameraTransition {
    pub fn new(from: Vec3, to: Vec3, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt_sec` and return the eye position for this frame.
    pub fn step(&mut self, dt_sec: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt_sec.max(0.0)).min(self.duration);
        self.sample()
    }

    pub fn sample(&self) -> Vec3 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ease_out_quad(self.elapsed / self.duration);
        self.from.lerp(self.to, t)
    }
}

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

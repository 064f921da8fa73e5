//! Live view state: camera, orbit limits, in-flight transition and the
//! manual-interaction latch.

use crate::camera::{Camera, CameraFit, CameraTransition};
use crate::constants::*;
use glam::Vec3;

/// Runtime view parameters (see `constants.rs` for the defaults).
#[derive(Clone, Debug)]
pub struct ViewParams {
    pub fov_deg: f32,
    pub initial_eye: Vec3,
    pub initial_target: Vec3,
    pub transition_secs: f32,
    pub close_offset: f32,
    pub wide_offset: f32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            initial_eye: camera_initial_eye(),
            initial_target: Vec3::ZERO,
            transition_secs: CAMERA_TRANSITION_SECS,
            close_offset: FIT_OFFSET_CLOSE,
            wide_offset: FIT_OFFSET_WIDE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewState {
    pub camera: Camera,
    /// Orbit zoom-out limit; `None` until the first fit.
    pub max_distance: Option<f32>,
    transition: Option<CameraTransition>,
    transition_secs: f32,
    user_interacted: bool,
}

impl ViewState {
    pub fn new(params: &ViewParams, aspect: f32) -> Self {
        let camera = Camera {
            eye: params.initial_eye,
            target: params.initial_target,
            fovy_radians: params.fov_deg.to_radians(),
            aspect,
            ..Camera::default()
        };
        Self {
            camera,
            max_distance: None,
            transition: None,
            transition_secs: params.transition_secs,
            user_interacted: false,
        }
    }

    pub fn user_interacted(&self) -> bool {
        self.user_interacted
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Latch set on the first manual orbit/pan/zoom.
    pub fn begin_manual_interaction(&mut self) {
        if !self.user_interacted {
            log::debug!("[view] manual interaction, auto-fit suspended");
        }
        self.user_interacted = true;
        self.transition = None;
    }

    pub fn reset_latch(&mut self) {
        self.user_interacted = false;
    }

    /// Commit a fit: target, orbit limit and clip planes change now; the eye
    /// follows through a transition that replaces any in-flight one.
    pub fn apply_fit(&mut self, fit: &CameraFit) {
        self.transition = None;
        self.camera.target = fit.center;
        self.max_distance = Some(fit.max_distance);
        self.camera.znear = fit.znear;
        self.camera.zfar = fit.zfar;
        self.transition = Some(CameraTransition::new(
            self.camera.eye,
            fit.eye,
            self.transition_secs,
        ));
    }

    /// Sample the transition for this frame. Returns `true` while the camera
    /// is still moving.
    pub fn tick(&mut self, dt_sec: f32) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        self.camera.eye = transition.step(dt_sec);
        if transition.is_finished() {
            self.transition = None;
            self.camera.up = Vec3::Z;
            return false;
        }
        true
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    // ---------------- Manual orbit controls ----------------

    /// Rotate the eye around the target: `d_azimuth` about +z, `d_polar`
    /// towards/away from the zenith.
    pub fn orbit(&mut self, d_azimuth: f32, d_polar: f32) {
        self.begin_manual_interaction();
        let offset = self.camera.eye - self.camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let azimuth = offset.y.atan2(offset.x) + d_azimuth;
        let polar = ((offset.z / radius).clamp(-1.0, 1.0).acos() + d_polar).clamp(
            ORBIT_POLAR_EPSILON,
            std::f32::consts::PI - ORBIT_POLAR_EPSILON,
        );
        self.camera.eye = self.camera.target
            + radius
                * Vec3::new(
                    polar.sin() * azimuth.cos(),
                    polar.sin() * azimuth.sin(),
                    polar.cos(),
                );
    }

    /// Scale the eye distance by `scale`, bounded by the orbit limits.
    pub fn dolly(&mut self, scale: f32) {
        self.begin_manual_interaction();
        let Some(dir) = (self.camera.eye - self.camera.target).try_normalize() else {
            return;
        };
        let max = self.max_distance.unwrap_or(f32::INFINITY);
        let radius = (self.camera.distance() * scale.max(0.0)).clamp(ORBIT_MIN_DISTANCE, max);
        self.camera.eye = self.camera.target + dir * radius;
    }

    /// Slide eye and target together across the view plane. `dx`/`dy` are in
    /// view-height units (1.0 = one screen height).
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.begin_manual_interaction();
        let Some(forward) = self.camera.view_direction() else {
            return;
        };
        let Some(right) = forward.cross(self.camera.effective_up()).try_normalize() else {
            return;
        };
        let up = right.cross(forward);
        let span = 2.0 * self.camera.distance() * (self.camera.fovy_radians / 2.0).tan();
        let shift = (right * -dx + up * dy) * span;
        self.camera.eye += shift;
        self.camera.target += shift;
    }
}

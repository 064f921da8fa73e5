//! Reacts to form events: recompute the affected entities, re-frame the
//! camera for that field, and flag a render.

use crate::camera::{compute_fit, Orientation};
use crate::error::FitResult;
use crate::form::{Field, FormState};
use crate::placement;
use crate::scene::{EntityId, Scene, Selection};
use crate::view::{ViewParams, ViewState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiEvent {
    /// A control's value changed.
    Input(Field),
    /// A control gained focus; frame its entities without recomputing.
    Focus(Field),
    ResetView,
    Resize { width: u32, height: u32 },
    /// Start of a manual orbit/pan/zoom gesture.
    ManualInteraction,
}

/// What to frame and how.
#[derive(Clone, Debug, PartialEq)]
pub struct FitTarget {
    pub selection: Selection,
    pub offset: f32,
    pub orientation: Orientation,
}

pub struct Orchestrator {
    scene: Scene,
    view: ViewState,
    params: ViewParams,
    needs_render: bool,
}

impl Orchestrator {
    /// Lay out the scene from `form` and start framing all of it.
    pub fn new(form: &FormState, params: ViewParams, aspect: f32) -> Self {
        let scene = placement::initial_scene(form);
        let view = ViewState::new(&params, aspect);
        let mut orchestrator = Self {
            scene,
            view,
            params,
            needs_render: true,
        };
        let target = orchestrator.reset_target();
        orchestrator.fit(&target).ok();
        orchestrator
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Returns and clears the pending render flag.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    pub fn handle(&mut self, event: UiEvent, form: &FormState) {
        match event {
            UiEvent::Input(field) => {
                self.recompute(field, form);
                if let Some(target) = self.framing(field, form) {
                    self.fit(&target).ok();
                }
            }
            UiEvent::Focus(field) => {
                if let Some(target) = self.framing(field, form) {
                    self.fit(&target).ok();
                }
            }
            UiEvent::ResetView => {
                self.view.reset_latch();
                let target = self.reset_target();
                self.fit(&target).ok();
            }
            UiEvent::Resize { width, height } => {
                self.view.resize(width, height);
            }
            UiEvent::ManualInteraction => self.begin_manual_interaction(),
        }
        self.needs_render = true;
    }

    /// Advance the camera transition; `true` while the camera moved.
    pub fn tick(&mut self, dt_sec: f32) -> bool {
        let was_animating = self.view.is_animating();
        let moving = self.view.tick(dt_sec);
        if was_animating {
            self.needs_render = true;
        }
        moving
    }

    // ---------------- Manual camera gestures ----------------

    pub fn begin_manual_interaction(&mut self) {
        self.view.begin_manual_interaction();
        self.needs_render = true;
    }

    pub fn orbit(&mut self, d_azimuth: f32, d_polar: f32) {
        self.view.orbit(d_azimuth, d_polar);
        self.needs_render = true;
    }

    pub fn dolly(&mut self, scale: f32) {
        self.view.dolly(scale);
        self.needs_render = true;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.view.pan(dx, dy);
        self.needs_render = true;
    }

    fn recompute(&mut self, field: Field, form: &FormState) {
        let scene = &mut self.scene;
        match field {
            Field::ArraySpan => placement::place_array_span(scene, form),
            Field::ArrayDepth => placement::place_array_depth(scene, form),
            Field::ArrayBottom => placement::place_array_bottom(scene, form),
            Field::SubDepth => {
                if let Some(offset) = form.sub_depth {
                    placement::place_sub_x(scene, offset, form.reference_from_below);
                    placement::sync_sub_mirror(scene, form.sub_lr);
                }
            }
            Field::SubCenterDistance => {
                placement::place_array_y(scene, form);
                placement::place_sub_y(scene, form);
                placement::sync_sub_mirror(scene, form.sub_lr);
                placement::place_audience(scene, form);
            }
            Field::SubLrConfig => {
                placement::place_sub_y(scene, form);
                placement::sync_sub_mirror(scene, form.sub_lr);
            }
            Field::ReferenceFromBelow => {
                placement::place_array_x(scene, form.reference_from_below);
                placement::place_sub_x(
                    scene,
                    form.sub_depth.unwrap_or(0.0),
                    form.reference_from_below,
                );
                placement::sync_sub_mirror(scene, form.sub_lr);
                placement::place_audience(scene, form);
            }
            Field::AudienceFirstRow | Field::AudienceLastRow | Field::Posture | Field::Units => {
                placement::place_audience(scene, form)
            }
        }
    }

    /// Per-field framing policy. `None` means the field does not move the
    /// camera (switching the sub LR configuration off).
    pub fn framing(&self, field: Field, form: &FormState) -> Option<FitTarget> {
        let close = self.params.close_offset;
        let wide = self.params.wide_offset;
        let target = |ids: &[EntityId], offset: f32, orientation: Orientation| FitTarget {
            selection: Selection::only(ids),
            offset,
            orientation,
        };
        let whole = |orientation: Orientation| FitTarget {
            selection: Selection::Visible,
            offset: wide,
            orientation,
        };
        match field {
            Field::ArraySpan | Field::ArrayDepth | Field::ArrayBottom => {
                Some(target(&[EntityId::Array], close, Orientation::Side))
            }
            Field::ReferenceFromBelow => Some(target(
                &[EntityId::Array, EntityId::Sub],
                close,
                Orientation::Side,
            )),
            Field::SubDepth | Field::SubCenterDistance => Some(if form.sub_lr {
                target(&[EntityId::Sub, EntityId::SubMirror], wide, Orientation::Top)
            } else {
                target(&[EntityId::Sub], close, Orientation::Top)
            }),
            Field::SubLrConfig => form.sub_lr.then(|| {
                target(&[EntityId::Sub, EntityId::SubMirror], wide, Orientation::Front)
            }),
            Field::AudienceFirstRow | Field::AudienceLastRow => Some(whole(Orientation::Top)),
            Field::Posture | Field::Units => Some(whole(Orientation::Side)),
        }
    }

    fn reset_target(&self) -> FitTarget {
        FitTarget {
            selection: Selection::Visible,
            offset: self.params.wide_offset,
            orientation: Orientation::None,
        }
    }

    /// Frame `target` unless the user is steering the camera by hand.
    /// Failures are reported and leave the camera untouched.
    pub fn fit(&mut self, target: &FitTarget) -> FitResult<()> {
        if self.view.user_interacted() {
            log::trace!("[fit] suppressed while the user is steering the camera");
            return Ok(());
        }
        let bounds = self.scene.bounds(&target.selection).map_err(|e| {
            log::error!("[fit] {e}");
            e
        })?;
        let fit = compute_fit(&bounds, &self.view.camera, target.offset, target.orientation);
        log::debug!(
            "[fit] {:?} offset={} distance={:.2} eye=({:.2},{:.2},{:.2})",
            target.orientation,
            target.offset,
            fit.distance,
            fit.eye.x,
            fit.eye.y,
            fit.eye.z
        );
        self.view.apply_fit(&fit);
        self.needs_render = true;
        Ok(())
    }
}

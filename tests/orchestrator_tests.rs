// Host-side tests for event handling and the per-field framing policy.

use arrayviz_core::{
    EntityId, Field, FitError, FitTarget, FormState, Orchestrator, Orientation, Selection, UiEvent,
    ViewParams,
};
use glam::Vec3;

const EPS: f32 = 1e-4;

fn app_with(form: &FormState) -> Orchestrator {
    Orchestrator::new(form, ViewParams::default(), 1.5)
}

fn finish_transition(app: &mut Orchestrator) {
    let mut frames = 0;
    while app.tick(1.0 / 60.0) {
        frames += 1;
        assert!(frames < 200, "transition never finished");
    }
}

#[test]
fn startup_frames_every_visible_entity() {
    let mut app = app_with(&FormState::default());
    let bounds = app.scene().bounds(&Selection::Visible).unwrap();
    assert!((app.view().camera.target - bounds.center()).length() < EPS);
    assert!(app.view().is_animating());
    assert!(app.take_render_request());
    assert!(!app.take_render_request());
}

#[test]
fn ticking_requests_renders_until_the_camera_lands() {
    let mut app = app_with(&FormState::default());
    app.take_render_request();
    assert!(app.tick(0.1));
    assert!(app.take_render_request());
    finish_transition(&mut app);
    assert!(app.take_render_request());
    assert!(!app.tick(0.1));
    assert!(!app.take_render_request());
}

#[test]
fn empty_selection_is_refused_without_moving_the_camera() {
    let mut app = app_with(&FormState::default());
    let target_before = app.view().camera.target;
    let transition_before = app.view().transition().copied();

    let result = app.fit(&FitTarget {
        selection: Selection::only(&[]),
        offset: 1.0,
        orientation: Orientation::Top,
    });
    assert_eq!(result, Err(FitError::EmptySelection));
    assert_eq!(app.view().camera.target, target_before);
    assert_eq!(app.view().transition().copied(), transition_before);
}

#[test]
fn framing_an_uncreated_entity_is_an_error() {
    let mut app = app_with(&FormState::default());
    let result = app.fit(&FitTarget {
        selection: Selection::only(&[EntityId::SubMirror]),
        offset: 1.0,
        orientation: Orientation::Front,
    });
    assert_eq!(result, Err(FitError::MissingEntity(EntityId::SubMirror)));
}

#[test]
fn manual_interaction_suppresses_fits_but_not_recompute() {
    let mut app = app_with(&FormState::default());
    app.begin_manual_interaction();
    let target_before = app.view().camera.target;

    let form = FormState {
        array_span: Some(8.0),
        ..FormState::default()
    };
    app.handle(UiEvent::Input(Field::ArraySpan), &form);

    let array = app.scene().get(EntityId::Array).unwrap();
    assert!((array.dimensions().height - 8.0).abs() < EPS);
    assert_eq!(app.view().camera.target, target_before);
    assert!(!app.view().is_animating());
    assert!(app.take_render_request());
}

#[test]
fn reset_view_clears_the_latch_and_refits() {
    let form = FormState::default();
    let mut app = app_with(&form);
    finish_transition(&mut app);
    app.handle(UiEvent::ManualInteraction, &form);
    assert!(app.view().user_interacted());

    app.handle(UiEvent::ResetView, &form);
    assert!(!app.view().user_interacted());
    assert!(app.view().is_animating());
}

#[test]
fn resize_updates_aspect_without_refitting() {
    let form = FormState::default();
    let mut app = app_with(&form);
    let transition_before = app.view().transition().copied();
    let target_before = app.view().camera.target;

    app.handle(
        UiEvent::Resize {
            width: 800,
            height: 400,
        },
        &form,
    );
    assert!((app.view().camera.aspect - 2.0).abs() < EPS);
    assert_eq!(app.view().transition().copied(), transition_before);
    assert_eq!(app.view().camera.target, target_before);
}

#[test]
fn focus_frames_without_touching_the_scene() {
    let mut app = app_with(&FormState::default());
    let form = FormState {
        array_span: Some(8.0),
        ..FormState::default()
    };
    app.handle(UiEvent::Focus(Field::ArraySpan), &form);

    let array = app.scene().get(EntityId::Array).unwrap();
    assert!((array.dimensions().height - 1.0).abs() < EPS);
    assert!((app.view().camera.target - array.aabb().center()).length() < EPS);
    let eye_goal = app.view().transition().unwrap().target();
    let dir = (eye_goal - app.view().camera.target).normalize();
    assert!((dir - Vec3::Y).length() < EPS);
}

#[test]
fn framing_policy_per_field() {
    let app = app_with(&FormState::default());
    let off = FormState::default();
    let on = FormState {
        sub_lr: true,
        ..FormState::default()
    };
    let fit = |ids: &[EntityId], offset: f32, orientation| {
        Some(FitTarget {
            selection: Selection::only(ids),
            offset,
            orientation,
        })
    };
    let whole = |orientation| {
        Some(FitTarget {
            selection: Selection::Visible,
            offset: 1.0,
            orientation,
        })
    };

    for field in [Field::ArraySpan, Field::ArrayDepth, Field::ArrayBottom] {
        assert_eq!(
            app.framing(field, &off),
            fit(&[EntityId::Array], 3.0, Orientation::Side)
        );
    }
    assert_eq!(
        app.framing(Field::ReferenceFromBelow, &off),
        fit(&[EntityId::Array, EntityId::Sub], 3.0, Orientation::Side)
    );
    for field in [Field::SubDepth, Field::SubCenterDistance] {
        assert_eq!(
            app.framing(field, &on),
            fit(&[EntityId::Sub, EntityId::SubMirror], 1.0, Orientation::Top)
        );
        assert_eq!(
            app.framing(field, &off),
            fit(&[EntityId::Sub], 3.0, Orientation::Top)
        );
    }
    assert_eq!(
        app.framing(Field::SubLrConfig, &on),
        fit(&[EntityId::Sub, EntityId::SubMirror], 1.0, Orientation::Front)
    );
    assert_eq!(app.framing(Field::SubLrConfig, &off), None);
    for field in [Field::AudienceFirstRow, Field::AudienceLastRow] {
        assert_eq!(app.framing(field, &off), whole(Orientation::Top));
    }
    for field in [Field::Posture, Field::Units] {
        assert_eq!(app.framing(field, &off), whole(Orientation::Side));
    }
}

#[test]
fn lr_toggle_shows_and_hides_the_sub_mirror() {
    let mut app = app_with(&FormState::default());
    let on = FormState {
        sub_lr: true,
        ..FormState::default()
    };
    app.handle(UiEvent::Input(Field::SubLrConfig), &on);
    app.handle(UiEvent::Input(Field::SubLrConfig), &on);
    assert!(app.scene().is_visible(EntityId::SubMirror));
    assert_eq!(app.scene().visible().count(), 5);

    // the pair straddles y = 0
    assert!(app.view().camera.target.y.abs() < EPS);
    let transition_before = app.view().transition().copied();

    let off = FormState::default();
    app.handle(UiEvent::Input(Field::SubLrConfig), &off);
    assert!(!app.scene().is_visible(EntityId::SubMirror));
    assert_eq!(app.scene().visible().count(), 4);
    assert!(app.scene().get(EntityId::Sub).unwrap().position().y.abs() < EPS);
    assert_eq!(app.view().transition().copied(), transition_before);
}

#[test]
fn reference_toggle_moves_the_array_face_to_the_origin() {
    let mut app = app_with(&FormState::default());
    let form = FormState {
        reference_from_below: true,
        ..FormState::default()
    };
    app.handle(UiEvent::Input(Field::ReferenceFromBelow), &form);
    let array = app.scene().get(EntityId::Array).unwrap();
    assert!(array.position().x.abs() < EPS);
    let sub = app.scene().get(EntityId::Sub).unwrap();
    assert!(sub.position().x.abs() < EPS);
}

#[test]
fn audience_edit_refits_the_whole_scene_from_above() {
    let mut app = app_with(&FormState::default());
    let form = FormState {
        audience_first_row: Some(10.0),
        audience_last_row: Some(25.0),
        ..FormState::default()
    };
    app.handle(UiEvent::Input(Field::AudienceLastRow), &form);
    let bounds = app.scene().bounds(&Selection::Visible).unwrap();
    assert!((app.view().camera.target - bounds.center()).length() < EPS);
    let eye_goal = app.view().transition().unwrap().target();
    let dir = (eye_goal - app.view().camera.target).normalize();
    assert!((dir - Vec3::Z).length() < EPS);
}

use crate::constants::{FORM_ID, RESET_VIEW_ID};
use crate::dom;
use arrayviz_core::{Field, Orchestrator, UiEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Text fields update on every keystroke; toggles and radios on change.
#[inline]
fn value_event(field: Field) -> &'static str {
    if field.is_numeric() {
        "input"
    } else {
        "change"
    }
}

/// Only the text fields and the reference toggle re-frame on focus.
#[inline]
fn frames_on_focus(field: Field) -> bool {
    field.is_numeric() || field == Field::ReferenceFromBelow
}

pub fn wire_form_handlers(document: &web::Document, app: Rc<RefCell<Orchestrator>>) {
    for field in Field::ALL {
        for id in dom::field_element_ids(field) {
            let Some(el) = document.get_element_by_id(id) else {
                log::warn!("missing form control #{id}");
                continue;
            };

            let doc = document.clone();
            let app_input = app.clone();
            dom::add_listener(&el, value_event(field), move || {
                let form = dom::read_form_state(&doc);
                app_input.borrow_mut().handle(UiEvent::Input(field), &form);
            });

            if frames_on_focus(field) {
                let doc = document.clone();
                let app_focus = app.clone();
                dom::add_listener(&el, "focus", move || {
                    let form = dom::read_form_state(&doc);
                    app_focus.borrow_mut().handle(UiEvent::Focus(field), &form);
                });
            }
        }
    }

    let doc = document.clone();
    let app_reset = app.clone();
    dom::add_click_listener(document, RESET_VIEW_ID, move || {
        let form = dom::read_form_state(&doc);
        app_reset.borrow_mut().handle(UiEvent::ResetView, &form);
    });
}

/// Keep the canvas backing store and the camera aspect in step with the window.
pub fn wire_resize(canvas: &web::HtmlCanvasElement, app: Rc<RefCell<Orchestrator>>) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        let form = dom::window_document()
            .map(|d| dom::read_form_state(&d))
            .unwrap_or_default();
        app.borrow_mut().handle(
            UiEvent::Resize {
                width: canvas_resize.width(),
                height: canvas_resize.height(),
            },
            &form,
        );
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Submit navigates to the form action with the serialized state, leaving out
/// fields whose toggle is off.
pub fn wire_submit(document: &web::Document) {
    let Some(form_el) = document.get_element_by_id(FORM_ID) else {
        return;
    };
    let doc = document.clone();
    let action = form_el.get_attribute("action").unwrap_or_default();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
        let form = dom::read_form_state(&doc);
        let Some(query) = dom::encode_query(&form) else {
            log::error!("could not encode form query");
            return;
        };
        if let Some(window) = web::window() {
            let url = format!("{action}?{query}");
            if let Err(e) = window.location().set_href(&url) {
                log::error!("navigation failed: {:?}", e);
            }
        }
    }) as Box<dyn FnMut(_)>);
    _ = form_el.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
    closure.forget();
}

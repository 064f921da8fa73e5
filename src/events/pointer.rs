use crate::constants::{DOLLY_STEP, ORBIT_RADIANS_PER_PX, PAN_HEIGHTS_PER_PX, WHEEL_UNIT};
use crate::input;
use arrayviz_core::Orchestrator;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct CameraWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: Rc<RefCell<Orchestrator>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

/// Manual orbit/pan/zoom. The first gesture latches the orchestrator out of
/// auto-fitting until the view is reset.
pub fn wire_camera_handlers(w: CameraWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

fn wire_pointerdown(w: &CameraWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let mode = input::drag_mode_for(ev.button(), ev.shift_key() || ev.ctrl_key());
        w.drag_state.borrow_mut().begin(pos, mode);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        w.app.borrow_mut().begin_manual_interaction();
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &CameraWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let (delta, mode) = {
            let mut drag = w.drag_state.borrow_mut();
            (drag.advance(pos), drag.mode)
        };
        let Some(delta) = delta else {
            return;
        };
        let mut app = w.app.borrow_mut();
        match mode {
            input::DragMode::Orbit => app.orbit(
                -delta.x * ORBIT_RADIANS_PER_PX,
                -delta.y * ORBIT_RADIANS_PER_PX,
            ),
            input::DragMode::Pan => {
                app.pan(delta.x * PAN_HEIGHTS_PER_PX, delta.y * PAN_HEIGHTS_PER_PX)
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &CameraWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.drag_state.borrow_mut().end();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        _ = wnd
            .add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &CameraWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let scale = input::wheel_dolly_scale(ev.delta_y() as f32, DOLLY_STEP, WHEEL_UNIT);
        w.app.borrow_mut().dolly(scale);
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_contextmenu(w: &CameraWiring) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}

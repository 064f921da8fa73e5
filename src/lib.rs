#![cfg(target_arch = "wasm32")]
use arrayviz_core::{Orchestrator, ViewParams};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("arrayviz starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // A submitted page carries its form in the query string.
    if let Some(restored) = dom::form_state_from_location() {
        dom::write_form_state(&document, &restored);
    }
    let form = dom::read_form_state(&document);

    dom::sync_canvas_backing_size(&canvas);
    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
    let app = Rc::new(RefCell::new(Orchestrator::new(
        &form,
        ViewParams::default(),
        aspect,
    )));

    events::wire_resize(&canvas, app.clone());
    events::wire_form_handlers(&document, app.clone());
    events::wire_submit(&document);
    events::wire_camera_handlers(events::CameraWiring {
        canvas: canvas.clone(),
        app: app.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let Some(gpu) = frame::init_gpu(&canvas).await else {
        overlay::hide(&document, constants::CANVAS_ID);
        overlay::show_fallback_notice(&document);
        return Ok(());
    };

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        gpu,
        canvas,
        last_instant: Instant::now(),
        redraw: true,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

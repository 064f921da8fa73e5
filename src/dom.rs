use crate::constants::*;
use arrayviz_core::{Field, FormState, Posture, UnitSystem};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[inline]
pub fn add_listener(element: &web::Element, event: &str, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Every element whose events belong to `field`.
pub fn field_element_ids(field: Field) -> &'static [&'static str] {
    match field {
        Field::Posture => &[SEATED_ID, STANDING_ID],
        Field::Units => &[METERS_ID, FEET_ID],
        Field::ArraySpan => &["as"],
        Field::ArrayDepth => &["ad"],
        Field::ArrayBottom => &["abz"],
        Field::SubCenterDistance => &["sy"],
        Field::SubDepth => &["sx"],
        Field::AudienceFirstRow => &["axf"],
        Field::AudienceLastRow => &["axl"],
        Field::SubLrConfig => &[SUB_LR_ID],
        Field::ReferenceFromBelow => &[REFERENCE_FROM_BELOW_ID],
    }
}

fn input(document: &web::Document, id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

fn text_input(document: &web::Document, field: Field) -> Option<web::HtmlInputElement> {
    field_element_ids(field)
        .first()
        .and_then(|id| input(document, id))
}

fn checked(document: &web::Document, id: &str) -> bool {
    input(document, id).map(|i| i.checked()).unwrap_or(false)
}

/// Read every control once into a typed snapshot.
pub fn read_form_state(document: &web::Document) -> FormState {
    let mut form = FormState::default();
    for field in Field::NUMERIC {
        if let Some(el) = text_input(document, field) {
            form.set_raw(field, &el.value());
        }
    }
    form.sub_lr = checked(document, SUB_LR_ID);
    form.reference_from_below = checked(document, REFERENCE_FROM_BELOW_ID);
    form.posture = if checked(document, STANDING_ID) {
        Posture::Standing
    } else {
        Posture::Seated
    };
    form.units = if checked(document, FEET_ID) {
        UnitSystem::Imperial
    } else {
        UnitSystem::Metric
    };
    form
}

/// Push a snapshot back into the controls (used to restore from the URL).
pub fn write_form_state(document: &web::Document, form: &FormState) {
    for field in Field::NUMERIC {
        if let (Some(el), Some(v)) = (text_input(document, field), form.number(field)) {
            el.set_value(&v.to_string());
        }
    }
    let set_checked = |id: &str, on: bool| {
        if let Some(el) = input(document, id) {
            el.set_checked(on);
        }
    };
    set_checked(SUB_LR_ID, form.sub_lr);
    set_checked(REFERENCE_FROM_BELOW_ID, form.reference_from_below);
    set_checked(SEATED_ID, form.posture == Posture::Seated);
    set_checked(STANDING_ID, form.posture == Posture::Standing);
    set_checked(METERS_ID, form.units == UnitSystem::Metric);
    set_checked(FEET_ID, form.units == UnitSystem::Imperial);
}

/// Form state encoded in the page URL, if the page was loaded from a submit.
pub fn form_state_from_location() -> Option<FormState> {
    let search = web::window()?.location().search().ok()?;
    if search.trim_start_matches('?').is_empty() {
        return None;
    }
    let params = web::UrlSearchParams::new_with_str(&search).ok()?;
    let pairs: Vec<(String, String)> = js_sys::try_iter(&params)
        .ok()
        .flatten()?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let arr: js_sys::Array = entry.dyn_into().ok()?;
            Some((arr.get(0).as_string()?, arr.get(1).as_string()?))
        })
        .collect();
    Some(FormState::from_query_pairs(
        pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    ))
}

/// Query string for a form submission.
pub fn encode_query(form: &FormState) -> Option<String> {
    let params = web::UrlSearchParams::new().ok()?;
    for (key, value) in form.to_query_pairs() {
        params.append(key, &value);
    }
    Some(String::from(params.to_string()))
}

use crate::constants::{CONTAINER_ID, FALLBACK_NOTICE_ID};
use web_sys as web;

const FALLBACK_TEXT: &str = "Your browser or graphics card does not seem to support WebGPU. \
     The 3D view is unavailable; the form still works.";

/// Put a visible notice in place of the scene. Calling it twice keeps a
/// single notice.
pub fn show_fallback_notice(document: &web::Document) {
    if document.get_element_by_id(FALLBACK_NOTICE_ID).is_some() {
        return;
    }
    let Some(container) = document.get_element_by_id(CONTAINER_ID) else {
        log::error!("missing #{CONTAINER_ID}; cannot show fallback notice");
        return;
    };
    let Ok(notice) = document.create_element("div") else {
        return;
    };
    notice.set_id(FALLBACK_NOTICE_ID);
    _ = notice.set_attribute("role", "alert");
    _ = notice.set_attribute(
        "style",
        "padding:1em;margin:1em;border:1px solid #c00;color:#c00;background:#fff",
    );
    notice.set_text_content(Some(FALLBACK_TEXT));
    _ = container.append_child(&notice);
}

#[inline]
pub fn hide(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.set_attribute("style", "display:none");
    }
}

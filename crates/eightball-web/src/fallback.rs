use web_sys as web;

/// Element shown instead of the canvas when no GPU context is available.
pub const DEFAULT_FALLBACK_ID: &str = "eightball-fallback";

#[inline]
pub fn show(document: &web::Document, fallback_id: &str, canvas: &web::HtmlCanvasElement) {
    if let Some(el) = document.get_element_by_id(fallback_id) {
        let _ = el.set_attribute("style", "");
    } else {
        log::warn!("fallback element #{} not found", fallback_id);
    }
    let _ = canvas.set_attribute("aria-hidden", "true");
}

#[inline]
pub fn hide(document: &web::Document, fallback_id: &str) {
    if let Some(el) = document.get_element_by_id(fallback_id) {
        let _ = el.set_attribute("style", "display:none");
    }
}

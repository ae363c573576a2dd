use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// High resolution timestamp on the same clock as animation frames.
#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[inline]
pub fn prefers_reduced_motion() -> bool {
    web::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Backing-store size for a CSS box at `dpr`, with the ratio capped at
/// `max_dpr`. Never returns a zero dimension.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64, max_dpr: f64) -> (u32, u32) {
    let ratio = if dpr.is_finite() && dpr > 0.0 {
        dpr.min(max_dpr)
    } else {
        1.0
    };
    let w = (css_width.max(0.0) * ratio).round() as u32;
    let h = (css_height.max(0.0) * ratio).round() as u32;
    (w.max(1), h.max(1))
}

/// Matches the canvas backing store to its CSS size. Returns true when the
/// size changed.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, max_dpr: f64) -> bool {
    let Some(w) = web::window() else {
        return false;
    };
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = backing_size(rect.width(), rect.height(), w.device_pixel_ratio(), max_dpr);
    if canvas.width() == w_px && canvas.height() == h_px {
        return false;
    }
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    true
}

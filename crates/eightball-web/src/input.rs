use web_sys as web;

/// Maps a client position inside `rect` to [-1, 1] on both axes, +y up.
/// Degenerate rects map to the center.
#[inline]
pub fn normalized_pointer(
    client_x: f32,
    client_y: f32,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
) -> [f32; 2] {
    if !(width > 0.0 && height > 0.0) {
        return [0.0, 0.0];
    }
    let u = ((client_x - left) / width).clamp(0.0, 1.0);
    let v = ((client_y - top) / height).clamp(0.0, 1.0);
    [u * 2.0 - 1.0, 1.0 - v * 2.0]
}

/// Touch pointers press but never tilt the ball.
#[inline]
pub fn tilts_with_pointer(pointer_type: &str) -> bool {
    pointer_type != "touch"
}

#[inline]
pub fn pointer_offset(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> [f32; 2] {
    let rect = canvas.get_bounding_client_rect();
    normalized_pointer(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

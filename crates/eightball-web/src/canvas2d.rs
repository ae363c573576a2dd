use eightball_core::{BallError, FontSpec, Painter, Rect, Rgba, TextMeasure};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

fn canvas_err(what: &str, e: impl std::fmt::Debug) -> BallError {
    BallError::TextureCanvas(format!("{what}: {e:?}"))
}

/// Offscreen 2D canvas the face textures are painted into before upload.
pub struct CanvasPainter {
    ctx: web::CanvasRenderingContext2d,
    size: u32,
    font_px: f32,
}

impl CanvasPainter {
    pub fn new(document: &web::Document, size: u32) -> Result<Self, BallError> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| canvas_err("create canvas", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| canvas_err("canvas element", e))?;
        canvas.set_width(size);
        canvas.set_height(size);
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| canvas_err("get_context", e))?
            .ok_or_else(|| BallError::TextureCanvas("2d context unavailable".into()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| canvas_err("2d context", e))?;
        Ok(Self {
            ctx,
            size,
            font_px: 16.0,
        })
    }

    /// Straight-alpha RGBA8 rows, top row first.
    pub fn pixels(&self) -> Result<Vec<u8>, BallError> {
        let n = self.size as f64;
        let data = self
            .ctx
            .get_image_data(0.0, 0.0, n, n)
            .map_err(|e| canvas_err("get_image_data", e))?;
        Ok(data.data().0)
    }

    fn circle_path(&self, cx: f32, cy: f32, r: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(cx as f64, cy as f64, r.max(0.0) as f64, 0.0, TAU);
    }

    fn rounded_rect_path(&self, rect: Rect, radius: f32) {
        let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        let r = (radius as f64).clamp(0.0, w.min(h) * 0.5);
        let c = &self.ctx;
        c.begin_path();
        c.move_to(x + r, y);
        let _ = c.arc_to(x + w, y, x + w, y + h, r);
        let _ = c.arc_to(x + w, y + h, x, y + h, r);
        let _ = c.arc_to(x, y + h, x, y, r);
        let _ = c.arc_to(x, y, x + w, y, r);
        c.close_path();
    }
}

impl TextMeasure for CanvasPainter {
    fn measure(&self, text: &str) -> f32 {
        match self.ctx.measure_text(text) {
            Ok(m) => m.width() as f32,
            // rough average advance for a proportional sans face
            Err(_) => text.chars().count() as f32 * self.font_px * 0.55,
        }
    }
}

impl Painter for CanvasPainter {
    fn size_px(&self) -> u32 {
        self.size
    }

    fn clear(&mut self) {
        let n = self.size as f64;
        self.ctx.clear_rect(0.0, 0.0, n, n);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgba) {
        self.circle_path(cx, cy, r);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32, width: f32, color: Rgba) {
        self.circle_path(cx, cy, r);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgba) {
        self.rounded_rect_path(rect, radius);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Rgba) {
        self.rounded_rect_path(rect, radius);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font_px = font.size_px;
        self.ctx.set_font(&font.to_css());
    }

    fn fill_text_centered(&mut self, text: &str, cx: f32, cy: f32, color: Rgba) {
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, cx as f64, cy as f64);
    }
}

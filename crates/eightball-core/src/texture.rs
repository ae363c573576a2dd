//! Procedural face textures.
//!
//! Drawing goes through [`Painter`], a minimal 2D raster surface. The web
//! front-end backs it with an offscreen canvas; layout lives here so it can
//! be checked without a browser.

use crate::wrap::{line_centers, wrap_prompt, TextMeasure, WrappedLines};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub weight: u16,
    pub size_px: f32,
    pub family: &'static str,
}

impl FontSpec {
    pub fn to_css(&self) -> String {
        format!("{} {}px {}", self.weight, self.size_px, self.family)
    }
}

/// Square raster surface the face textures are drawn into.
pub trait Painter: TextMeasure {
    fn size_px(&self) -> u32;
    fn clear(&mut self);
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgba);
    fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32, width: f32, color: Rgba);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgba);
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, width: f32, color: Rgba);
    /// Selects the font used by subsequent measure and text calls.
    fn set_font(&mut self, font: &FontSpec);
    /// Draws `text` centered horizontally and vertically on (cx, cy).
    fn fill_text_centered(&mut self, text: &str, cx: f32, cy: f32, color: Rgba);
}

const FACE_FILL: Rgba = Rgba::new(243, 239, 230, 1.0);
const FACE_RING: Rgba = Rgba::new(0, 0, 0, 0.28);
const GLYPH_INK: Rgba = Rgba::new(17, 17, 20, 1.0);
const CARD_FILL: Rgba = Rgba::new(14, 20, 48, 0.78);
const CARD_STROKE: Rgba = Rgba::new(255, 255, 255, 0.14);
const CARD_INK: Rgba = Rgba::new(236, 240, 255, 0.95);

pub const GLYPH: &str = "8";
const SERIF: &str = "Georgia, 'Times New Roman', serif";
const SANS: &str = "system-ui, -apple-system, 'Segoe UI', sans-serif";

/// Geometry of the prompt card for a buffer of `size` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    pub card: Rect,
    pub corner_radius: f32,
    pub stroke_width: f32,
    pub max_text_width: f32,
    pub font: FontSpec,
    pub line_height: f32,
}

impl CardLayout {
    pub fn for_size(size: u32) -> Self {
        let n = size as f32;
        let inset = n * 0.11;
        let card = Rect {
            x: inset,
            y: inset,
            w: n - 2.0 * inset,
            h: n - 2.0 * inset,
        };
        let padding = n * 0.07;
        let font_px = (n * 0.06).round();
        Self {
            card,
            corner_radius: n * 0.07,
            stroke_width: (n * 0.004).max(1.0),
            max_text_width: card.w - 2.0 * padding,
            font: FontSpec {
                weight: 600,
                size_px: font_px,
                family: SANS,
            },
            line_height: font_px * 1.3,
        }
    }
}

/// The static ball face: a disc with a thin ring and a large "8".
pub fn draw_glyph_texture<P: Painter + ?Sized>(painter: &mut P) {
    let n = painter.size_px() as f32;
    let c = n * 0.5;
    let radius = n * 0.46;
    painter.clear();
    painter.fill_circle(c, c, radius, FACE_FILL);
    painter.stroke_circle(c, c, radius, (n * 0.012).max(1.0), FACE_RING);
    painter.set_font(&FontSpec {
        weight: 700,
        size_px: (n * 0.58).round(),
        family: SERIF,
    });
    // Serif numerals sit slightly high on a middle baseline.
    painter.fill_text_centered(GLYPH, c, c + n * 0.02, GLYPH_INK);
}

/// Redraws the prompt card for `text` and returns the lines it drew.
pub fn draw_prompt_texture<P: Painter + ?Sized>(
    painter: &mut P,
    text: &str,
    max_lines: usize,
) -> WrappedLines {
    let layout = CardLayout::for_size(painter.size_px());
    painter.clear();
    painter.fill_rounded_rect(layout.card, layout.corner_radius, CARD_FILL);
    painter.stroke_rounded_rect(
        layout.card,
        layout.corner_radius,
        layout.stroke_width,
        CARD_STROKE,
    );
    painter.set_font(&layout.font);
    let lines = wrap_prompt(text, layout.max_text_width, max_lines, &*painter);
    let (cx, cy) = layout.card.center();
    let centers: Vec<f32> = line_centers(lines.len(), cy, layout.line_height).collect();
    for (line, y) in lines.iter().zip(centers) {
        painter.fill_text_centered(line, cx, y, CARD_INK);
    }
    lines
}

//! # Text Rasterizer
//!
//! Renders a styled text string into a fixed-height monochrome bitmap ready
//! for packing: glyphs are laid out on one line, rasterized without
//! antialiasing (the printer is strictly binary, so coverage is thresholded
//! rather than dithered), cropped horizontally to the text's advance width,
//! and centered vertically on the canvas.
//!
//! ## Module Structure
//!
//! - [`font`]: host font resolution (fontdb) and face loading
//! - [`render`] / [`render_with_font`]: the rasterization pipeline
//!
//! ## Determinism
//!
//! The same spec, canvas height, and font data always produce a
//! bit-identical bitmap. The printer has no error correction and no
//! re-print negotiation; reproducibility is the only way to test what
//! actually reaches the tape.

pub mod font;

use ab_glyph::{Font, GlyphId, OutlinedGlyph, Rect, ScaleFont, point};

use crate::bitmap::Bitmap;
use crate::error::LabelError;

/// Stroke thickness for underline and strikethrough, in pixels.
const STROKE_WIDTH: u32 = 3;

/// Rows between the baseline and the center of the underline stroke.
const UNDERLINE_DROP: i32 = 4;

/// Glyph coverage at or above which a pixel is ink.
const INK_THRESHOLD: f32 = 0.5;

/// Style attributes for one label.
#[derive(Debug, Clone, Default)]
pub struct StyleSpec {
    /// The text to render, one line
    pub text: String,
    /// Host font family name, resolved exactly (no fallback)
    pub font_family: String,
    /// Em height in pixels
    pub font_size: u32,
    /// Use the bold face
    pub bold: bool,
    /// Use the italic face
    pub italic: bool,
    /// Underline the full advance width
    pub underline: bool,
    /// Strike through the glyph ink
    pub strikethrough: bool,
}

impl StyleSpec {
    /// Plain style with the given text, family, and size.
    pub fn new(text: impl Into<String>, font_family: impl Into<String>, font_size: u32) -> Self {
        Self {
            text: text.into(),
            font_family: font_family.into(),
            font_size,
            ..Self::default()
        }
    }
}

/// Render a label: resolve the font from the host, then rasterize.
///
/// ## Errors
///
/// Configuration problems ([`LabelError::EmptyText`],
/// [`LabelError::InvalidFontSize`], [`LabelError::InvalidCanvasHeight`],
/// [`LabelError::FontNotFound`]) are all surfaced before any drawing
/// happens.
pub fn render(spec: &StyleSpec, canvas_height: u32) -> Result<Bitmap, LabelError> {
    validate(spec, canvas_height)?;
    let font = font::load_font(&spec.font_family, spec.bold, spec.italic)?;
    render_with_font(&font, spec, canvas_height)
}

/// Rasterize with an already-loaded font.
///
/// Pure: consults no host state, so repeated calls with the same inputs
/// produce bit-identical bitmaps.
pub fn render_with_font(
    font: &impl Font,
    spec: &StyleSpec,
    canvas_height: u32,
) -> Result<Bitmap, LabelError> {
    validate(spec, canvas_height)?;

    let scale = font::px_scale(font, spec.font_size);
    let scaled = font.as_scaled(scale);

    // Layout: one line of glyphs, caret advancing from x = 0, baseline at
    // y = 0 for now. The real baseline row is picked after measuring ink.
    let mut glyphs: Vec<(GlyphId, f32)> = Vec::new();
    let mut caret_x = 0.0f32;

    for ch in spec.text.chars() {
        let glyph_id = font.glyph_id(ch);
        glyphs.push((glyph_id, caret_x));
        caret_x += scaled.h_advance(glyph_id);
    }

    // The canvas spans the full advance width even where no ink lands
    // (trailing spaces keep their width on the tape).
    let width = (caret_x.ceil() as u32).max(1);

    let outlines: Vec<OutlinedGlyph> = glyphs
        .iter()
        .filter_map(|&(glyph_id, glyph_x)| {
            font.outline_glyph(glyph_id.with_scale_and_position(scale, point(glyph_x, 0.0)))
        })
        .collect();

    let ink = ink_bounds(&outlines);
    let mut bitmap = Bitmap::blank(width, canvas_height);

    // Baseline row: one past the tallest ink, so the top ink row lands on
    // canvas row 1. With no ink the degenerate baseline sits at row 1.
    let (baseline, dx, ink_mid) = match ink {
        Some(rect) => {
            let baseline = 1 - rect.min.y as i32;
            let mid = ((rect.min.y + rect.max.y) / 2.0 + baseline as f32).round() as i32;
            (baseline, -(rect.min.x as i32), mid)
        }
        None => (1, 0, 1),
    };

    for outlined in &outlines {
        let bounds = outlined.px_bounds();
        outlined.draw(|px, py, coverage| {
            if coverage >= INK_THRESHOLD {
                let x = px as i32 + bounds.min.x as i32 + dx;
                let y = py as i32 + bounds.min.y as i32 + baseline;
                if x >= 0 && y >= 0 {
                    bitmap.set(x as u32, y as u32, true);
                }
            }
        });
    }

    // Strokes span the full width and are clipped like any other ink, then
    // travel with the glyphs through centering.
    if spec.underline {
        draw_stroke(&mut bitmap, baseline + UNDERLINE_DROP);
    }
    if spec.strikethrough {
        draw_stroke(&mut bitmap, ink_mid);
    }

    Ok(center_ink(&bitmap))
}

fn validate(spec: &StyleSpec, canvas_height: u32) -> Result<(), LabelError> {
    if spec.text.is_empty() {
        return Err(LabelError::EmptyText);
    }
    if spec.font_size == 0 {
        return Err(LabelError::InvalidFontSize(spec.font_size));
    }
    if canvas_height == 0 {
        return Err(LabelError::InvalidCanvasHeight(canvas_height));
    }
    Ok(())
}

/// Union of the outlines' pixel bounds. `px_bounds` reports whole-pixel
/// rectangles, so the union's edges are exact integers.
fn ink_bounds(outlines: &[OutlinedGlyph]) -> Option<Rect> {
    outlines
        .iter()
        .map(|outlined| outlined.px_bounds())
        .reduce(|a, b| Rect {
            min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
            max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
        })
}

/// Paint a full-width horizontal stroke centered on `center_row`.
fn draw_stroke(bitmap: &mut Bitmap, center_row: i32) {
    let half = (STROKE_WIDTH / 2) as i32;
    for y in (center_row - half)..=(center_row + half) {
        if y >= 0 {
            for x in 0..bitmap.width {
                bitmap.set(x, y as u32, true);
            }
        }
    }
}

/// Re-seat the ink rows so the blank margins above and below differ by at
/// most one row (the extra row goes below).
fn center_ink(bitmap: &Bitmap) -> Bitmap {
    let Some((top, bottom)) = bitmap.ink_rows() else {
        return bitmap.clone();
    };

    let ink_rows = bottom - top + 1;
    let offset = (bitmap.height - ink_rows) / 2;
    if offset == top {
        return bitmap.clone();
    }

    let mut centered = Bitmap::blank(bitmap.width, bitmap.height);
    for (dst, src) in (offset..offset + ink_rows).zip(top..=bottom) {
        let start = dst as usize * bitmap.width as usize;
        centered.pixels[start..start + bitmap.width as usize].copy_from_slice(bitmap.row(src));
    }
    centered
}

// ============================================================================
// TESTS
// ============================================================================

use std::sync::OnceLock;

use rusttype::{point, Font, PositionedGlyph, Scale};
use tiny_skia::{ColorU8, Pixmap, PremultipliedColorU8};

use super::RenderError;

static CARD_FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf");
static CARD_FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();

/// Bold monospace face used for every label on the card.
pub fn card_font() -> Result<&'static Font<'static>, RenderError> {
    CARD_FONT
        .get_or_init(|| Font::try_from_bytes(CARD_FONT_BYTES))
        .as_ref()
        .ok_or(RenderError::Font)
}

/// CSS points to pixels at 96 dpi.
pub fn pt_to_px(pt: f32) -> f32 {
    pt * 96.0 / 72.0
}

fn glyphs(font: &Font<'static>, px: f32, x: f32, baseline: f32, text: &str) -> Vec<PositionedGlyph<'static>> {
    font.layout(text, Scale::uniform(px), point(x, baseline)).collect()
}

/// Advance width of `text`, the way canvas `measureText` reports it.
pub fn measure(font: &Font<'static>, px: f32, text: &str) -> f32 {
    glyphs(font, px, 0.0, 0.0, text)
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Draws `text` horizontally centred on `cx` with its baseline at `baseline`.
pub fn draw_centered(
    pixmap: &mut Pixmap,
    font: &Font<'static>,
    px: f32,
    cx: f32,
    baseline: f32,
    color: ColorU8,
    text: &str,
) {
    let x = cx - measure(font, px, text) / 2.0;
    let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
    let stride = pixmap.width() as usize;
    let pixels = pixmap.pixels_mut();

    for glyph in glyphs(font, px, x, baseline, text) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let dx = gx as i32 + bb.min.x;
            let dy = gy as i32 + bb.min.y;
            if dx < 0 || dy < 0 || dx >= width || dy >= height {
                return;
            }
            let idx = dy as usize * stride + dx as usize;
            pixels[idx] = blend(pixels[idx], color, coverage);
        });
    }
}

/// Source-over of an opaque-ish colour at `coverage` onto a premultiplied pixel.
fn blend(dst: PremultipliedColorU8, color: ColorU8, coverage: f32) -> PremultipliedColorU8 {
    let a = coverage.clamp(0.0, 1.0) * f32::from(color.alpha()) / 255.0;
    if a <= 0.0 {
        return dst;
    }
    let inv = 1.0 - a;
    let mix = |s: u8, d: u8| (f32::from(s) * a + f32::from(d) * inv).round().min(255.0) as u8;

    let alpha = mix(255, dst.alpha());
    PremultipliedColorU8::from_rgba(
        mix(color.red(), dst.red()).min(alpha),
        mix(color.green(), dst.green()).min(alpha),
        mix(color.blue(), dst.blue()).min(alpha),
        alpha,
    )
    .unwrap_or(dst)
}

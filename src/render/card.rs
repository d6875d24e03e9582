use tiny_skia::{ColorU8, Pixmap};

use super::shapes::{draw_round_rect, Radii, Rect, RoundRect};
use super::text::{card_font, draw_centered, pt_to_px};
use super::{RenderError, RenderedImage};

pub const WIDTH: u32 = 600;
pub const HEIGHT: u32 = 400;

const MARGIN: f32 = 10.0;
const FRAME_RADIUS: f32 = 50.0;
const STROKE_WIDTH: f32 = 1.0;

const WIDE_BOX_WIDTH: f32 = 220.0;
const NARROW_BOX_WIDTH: f32 = 120.0;
const BOX_HEIGHT: f32 = 100.0;

const DAYS_PT: f32 = 70.0;
const CAPTION_PT: f32 = 40.0;

const WARNING: ColorU8 = ColorU8::from_rgba(0xFF, 0x00, 0x00, 0xFF);
const INK: ColorU8 = ColorU8::from_rgba(0x00, 0x00, 0x00, 0xFF);
const PAPER: ColorU8 = ColorU8::from_rgba(0xFF, 0xFF, 0xFF, 0xFF);

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Horizontal centre.
    pub x: f32,
    pub baseline: f32,
    pub size_px: f32,
    pub color: ColorU8,
}

/// Everything drawn on a card, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub frame: RoundRect,
    pub days_box: RoundRect,
    pub days_label: TextLabel,
    pub captions: [TextLabel; 2],
}

pub fn days_box_width(days: i64) -> f32 {
    if days >= 10 {
        WIDE_BOX_WIDTH
    } else {
        NARROW_BOX_WIDTH
    }
}

pub fn layout(days: i64) -> CardLayout {
    let (w, h) = (WIDTH as f32, HEIGHT as f32);

    let frame = RoundRect {
        rect: Rect { x: MARGIN, y: MARGIN, width: w - MARGIN * 2.0, height: h - MARGIN * 2.0 },
        radii: Radii::from(FRAME_RADIUS),
        fill: Some(PAPER),
        stroke: Some(INK),
    };

    let days_x = w / 3.0;
    let days_baseline = h / 3.0 + 15.0;
    let box_width = days_box_width(days);
    let days_box = RoundRect::outline(
        Rect {
            x: days_x - box_width / 2.0,
            y: days_baseline - 30.0 - BOX_HEIGHT / 2.0,
            width: box_width,
            height: BOX_HEIGHT,
        },
        INK,
    );

    let days_label = TextLabel {
        text: days.to_string(),
        x: days_x,
        baseline: days_baseline,
        size_px: pt_to_px(DAYS_PT),
        color: WARNING,
    };

    let caption = |text: &str, x: f32, baseline: f32| TextLabel {
        text: text.to_string(),
        x,
        baseline,
        size_px: pt_to_px(CAPTION_PT),
        color: INK,
    };

    CardLayout {
        frame,
        days_box,
        days_label,
        captions: [
            caption("days", w * 2.0 / 3.0, h / 3.0),
            caption("without incident", w / 2.0, h * 3.0 / 4.0),
        ],
    }
}

/// Draws the "N days without incident" card.
pub fn render(days: i64) -> Result<RenderedImage, RenderError> {
    let card = layout(days);
    let font = card_font()?;
    let mut pixmap = Pixmap::new(WIDTH, HEIGHT).ok_or(RenderError::Canvas(WIDTH, HEIGHT))?;

    draw_round_rect(&mut pixmap, &card.frame, STROKE_WIDTH)?;
    draw_round_rect(&mut pixmap, &card.days_box, STROKE_WIDTH)?;

    for label in std::iter::once(&card.days_label).chain(card.captions.iter()) {
        draw_centered(&mut pixmap, font, label.size_px, label.x, label.baseline, label.color, &label.text);
    }

    Ok(RenderedImage::new(pixmap))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_red(p: tiny_skia::PremultipliedColorU8) -> bool {
        p.alpha() == 255 && p.red() > 200 && p.green() < 60 && p.blue() < 60
    }

    #[test]
    fn box_width_switches_at_ten() {
        assert_eq!(layout(9).days_box.rect.width, 120.0);
        assert_eq!(layout(10).days_box.rect.width, 220.0);
        assert_eq!(layout(0).days_box.rect.width, 120.0);
        assert_eq!(layout(-42).days_box.rect.width, 120.0);
        assert_eq!(layout(i64::MAX).days_box.rect.width, 220.0);
    }

    #[test]
    fn box_corners_are_centered_on_first_third() {
        let narrow = layout(4).days_box.rect;
        assert_eq!((narrow.x, narrow.width, narrow.height), (140.0, 120.0, 100.0));
        let wide = layout(123).days_box.rect;
        assert_eq!((wide.x, wide.width), (90.0, 220.0));
        assert!((wide.y - (400.0 / 3.0 + 15.0 - 80.0)).abs() < 1e-3);
        assert_eq!(layout(4).days_box.radii, Radii::uniform(5.0));
    }

    #[test]
    fn frame_spans_canvas_minus_margin() {
        let frame = layout(1).frame;
        assert_eq!(frame.rect, Rect { x: 10.0, y: 10.0, width: 580.0, height: 380.0 });
        assert_eq!(frame.radii, Radii::uniform(50.0));
        assert!(frame.fill.is_some() && frame.stroke.is_some());
    }

    #[test]
    fn labels_carry_decimal_count() {
        assert_eq!(layout(7).days_label.text, "7");
        assert_eq!(layout(1234).days_label.text, "1234");
        assert_eq!(layout(-3).days_label.text, "-3");
        let captions: Vec<_> = layout(7).captions.iter().map(|c| c.text.clone()).collect();
        assert_eq!(captions, ["days", "without incident"]);
    }

    #[test]
    fn renders_fixed_canvas() {
        for days in [0, 9, 10, 365, -1, i64::MIN] {
            let img = render(days).unwrap();
            assert_eq!((img.width(), img.height()), (WIDTH, HEIGHT));
        }
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(render(17).unwrap().data(), render(17).unwrap().data());
        assert_ne!(render(8).unwrap().data(), render(9).unwrap().data());
    }

    #[test]
    fn count_is_painted_red_inside_box() {
        let img = render(5).unwrap();
        let r = layout(5).days_box.rect;
        let red = (r.y as u32..(r.y + r.height) as u32)
            .flat_map(|y| (r.x as u32..(r.x + r.width) as u32).map(move |x| (x, y)))
            .filter(|&(x, y)| img.pixmap().pixel(x, y).is_some_and(is_red))
            .count();
        assert!(red > 100, "only {red} red pixels in the days box");
    }

    #[test]
    fn corners_outside_frame_stay_transparent() {
        let img = render(3).unwrap();
        assert_eq!(img.pixmap().pixel(0, 0).unwrap().alpha(), 0);
        assert_eq!(img.pixmap().pixel(300, 200).unwrap().alpha(), 255);
    }
}

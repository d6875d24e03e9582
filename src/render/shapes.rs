use tiny_skia::{ColorU8, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use super::RenderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Per-corner radii: top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radii {
    pub tl: f32,
    pub tr: f32,
    pub br: f32,
    pub bl: f32,
}

impl Radii {
    pub const ZERO: Radii = Radii { tl: 0.0, tr: 0.0, br: 0.0, bl: 0.0 };

    pub const fn uniform(r: f32) -> Self {
        Self { tl: r, tr: r, br: r, bl: r }
    }
}

impl Default for Radii {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}

impl From<f32> for Radii {
    fn from(r: f32) -> Self {
        Self::uniform(r)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundRect {
    pub rect: Rect,
    pub radii: Radii,
    /// `None` leaves the interior untouched.
    pub fill: Option<ColorU8>,
    pub stroke: Option<ColorU8>,
}

impl RoundRect {
    /// Stroke-only outline with the default radius.
    pub fn outline(rect: Rect, color: ColorU8) -> Self {
        Self { rect, radii: Radii::default(), fill: None, stroke: Some(color) }
    }
}

/// Edges as straight lines, corners as quadratic curves through the bounding corner.
pub fn round_rect_path(rect: Rect, radii: Radii) -> Option<Path> {
    let Rect { x, y, width, height } = rect;
    let Radii { tl, tr, br, bl } = radii;

    let mut pb = PathBuilder::new();
    pb.move_to(x + tl, y);
    pb.line_to(x + width - tr, y);
    pb.quad_to(x + width, y, x + width, y + tr);
    pb.line_to(x + width, y + height - br);
    pb.quad_to(x + width, y + height, x + width - br, y + height);
    pb.line_to(x + bl, y + height);
    pb.quad_to(x, y + height, x, y + height - bl);
    pb.line_to(x, y + tl);
    pb.quad_to(x, y, x + tl, y);
    pb.close();
    pb.finish()
}

pub fn draw_round_rect(pixmap: &mut Pixmap, shape: &RoundRect, stroke_width: f32) -> Result<(), RenderError> {
    let path = round_rect_path(shape.rect, shape.radii).ok_or(RenderError::Path(shape.rect))?;

    if let Some(color) = shape.fill {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.red(), color.green(), color.blue(), color.alpha());
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    if let Some(color) = shape.stroke {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.red(), color.green(), color.blue(), color.alpha());
        let stroke = Stroke { width: stroke_width, ..Stroke::default() };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: ColorU8 = ColorU8::from_rgba(0, 0, 0, 255);
    const WHITE: ColorU8 = ColorU8::from_rgba(255, 255, 255, 255);

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect { x, y, width, height }
    }

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> tiny_skia::PremultipliedColorU8 {
        pixmap.pixel(x, y).unwrap()
    }

    #[test]
    fn radii_from_scalar_and_partial() {
        assert_eq!(Radii::from(50.0), Radii { tl: 50.0, tr: 50.0, br: 50.0, bl: 50.0 });
        assert_eq!(Radii::default(), Radii::uniform(5.0));
        let partial = Radii { tl: 8.0, ..Radii::ZERO };
        assert_eq!(partial.tr, 0.0);
        assert_eq!(partial.bl, 0.0);
    }

    #[test]
    fn path_bounds_match_rect() {
        let path = round_rect_path(rect(10.0, 20.0, 100.0, 50.0), Radii::from(10.0)).unwrap();
        let b = path.bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (10.0, 20.0, 110.0, 70.0));
    }

    #[test]
    fn fill_and_stroke_are_independent() {
        let shape = RoundRect {
            rect: rect(10.0, 10.0, 80.0, 80.0),
            radii: Radii::from(20.0),
            fill: Some(WHITE),
            stroke: None,
        };
        let mut pixmap = Pixmap::new(100, 100).unwrap();
        draw_round_rect(&mut pixmap, &shape, 1.0).unwrap();
        assert_eq!(pixel(&pixmap, 50, 50).alpha(), 255);
        assert_eq!(pixel(&pixmap, 50, 50).red(), 255);
        // Rounded corner leaves the bounding corner empty.
        assert_eq!(pixel(&pixmap, 11, 11).alpha(), 0);

        let mut pixmap = Pixmap::new(100, 100).unwrap();
        draw_round_rect(&mut pixmap, &RoundRect::outline(rect(10.0, 10.0, 80.0, 80.0), BLACK), 2.0).unwrap();
        assert_eq!(pixel(&pixmap, 50, 50).alpha(), 0);
        assert!(pixel(&pixmap, 50, 10).alpha() > 0);
    }
}

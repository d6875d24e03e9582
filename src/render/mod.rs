//! Raster card rendering.
//!
//! [`card::render`] turns a day count into a 600×400 RGBA image. Shapes are
//! filled and stroked with tiny-skia; glyphs come from the embedded font via
//! rusttype and are blended straight into the pixmap.

pub mod card;
pub mod shapes;
pub mod text;

use thiserror::Error;
use tiny_skia::Pixmap;

pub use card::{layout, render, CardLayout};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate {0}x{1} canvas")]
    Canvas(u32, u32),

    #[error("embedded font failed to parse")]
    Font,

    #[error("degenerate shape: {0:?}")]
    Path(shapes::Rect),

    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// Finished card. Read-only once built.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pixmap: Pixmap,
}

impl RenderedImage {
    fn new(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap.encode_png().map_err(|e| RenderError::Encode(e.to_string()))
    }
}

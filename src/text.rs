// ============================================================================
// GLYPH METRICS AND FONT LOADING
// ============================================================================

use crate::error::{ClockError, Result};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::path::{Path, PathBuf};

/// Locations probed, in order, when no font path is configured.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Measures rendered text so labels can be centered on a point.
pub trait TextMetrics {
    /// Height in pixels of the ink bounding box of `text` at `size`.
    fn text_height(&self, text: &str, size: f64) -> f64;
}

/// Metrics taken from a loaded font's glyph outlines.
#[derive(Clone)]
pub struct FontMetrics<'a> {
    font: &'a Font<'static>,
}

impl<'a> FontMetrics<'a> {
    pub fn new(font: &'a Font<'static>) -> Self {
        Self { font }
    }
}

impl TextMetrics for FontMetrics<'_> {
    fn text_height(&self, text: &str, size: f64) -> f64 {
        let (min_y, max_y) = ink_rows(self.font, text, Scale::uniform(size as f32));
        if min_y < max_y {
            (max_y - min_y) as f64
        } else {
            0.0
        }
    }
}

/// Font-free estimate for digit labels: cap height as a fixed fraction
/// of the em size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMetrics;

impl TextMetrics for ApproximateMetrics {
    fn text_height(&self, text: &str, size: f64) -> f64 {
        if text.is_empty() {
            0.0
        } else {
            size * 0.7
        }
    }
}

/// Topmost and bottommost inked pixel rows `(min_y, max_y)` of `text`
/// laid out with its baseline at y = 0.
fn ink_rows(font: &Font, text: &str, scale: Scale) -> (i32, i32) {
    let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
    glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold((i32::MAX, i32::MIN), |(min_y, max_y), bb| {
            (min_y.min(bb.min.y), max_y.max(bb.max.y))
        })
}

/// Parses font bytes.
pub fn font_from_bytes(data: Vec<u8>) -> Result<Font<'static>> {
    Font::try_from_vec(data).ok_or_else(|| ClockError::Font("unsupported font data".to_string()))
}

/// Loads the font at `path`.
pub fn load_font_file(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path)?;
    font_from_bytes(data)
        .map_err(|_| ClockError::Font(format!("{} is not a usable font", path.display())))
}

/// Loads the configured font, or the first usable system font when none
/// is configured. An explicitly configured font that fails to load is an
/// error; a missing system font is not.
pub fn load_font(configured: Option<&Path>) -> Result<Option<Font<'static>>> {
    if let Some(path) = configured {
        let font = load_font_file(path)?;
        log::info!("loaded label font {}", path.display());
        return Ok(Some(font));
    }

    for candidate in SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from) {
        if !candidate.is_file() {
            continue;
        }
        match load_font_file(&candidate) {
            Ok(font) => {
                log::info!("loaded label font {}", candidate.display());
                return Ok(Some(font));
            }
            Err(err) => log::debug!("skipping {}: {}", candidate.display(), err),
        }
    }

    log::warn!("no usable font found; hour labels will not be drawn");
    Ok(None)
}

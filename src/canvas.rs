// ============================================================================
// SOFTWARE CANVAS
// ============================================================================

use crate::config::{Color, LineCap};
use crate::error::{ClockError, Result};
use crate::scene::{Affine, DrawCommand, Scene};
use rusttype::{point, Font, PositionedGlyph, Scale};

/// Samples per axis when estimating polygon coverage.
const POLYGON_SUPERSAMPLE: usize = 4;

/// Rasterizes scenes into an RGBA8 frame of `width * height * 4` bytes.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    font: Option<&'a Font<'static>>,
    warned_missing_font: bool,
}

impl<'a> Canvas<'a> {
    /// Wraps an RGBA frame; fails if it holds fewer than `width * height` pixels.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Result<Self> {
        let needed = width.checked_mul(height).and_then(|px| px.checked_mul(4));
        if needed.map_or(true, |needed| frame.len() < needed) {
            return Err(ClockError::FrameTooSmall {
                len: frame.len(),
                width,
                height,
            });
        }
        Ok(Self {
            frame,
            width,
            height,
            font: None,
            warned_missing_font: false,
        })
    }

    pub fn with_font(mut self, font: Option<&'a Font<'static>>) -> Self {
        self.font = font;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// RGBA of the pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let px = self.frame.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Executes `scene` with `base` as the initial transform.
    pub fn draw_scene(&mut self, scene: &Scene, base: Affine) {
        scene.for_each_transformed(base, |m, command| self.draw_command(m, command));
    }

    fn draw_command(&mut self, m: &Affine, command: &DrawCommand) {
        let k = m.length_scale();
        match command {
            DrawCommand::Circle {
                cx,
                cy,
                radius,
                stroke,
            } => {
                let center = m.apply(*cx, *cy);
                self.stroke_circle(center, radius * k, stroke.width * k, stroke.color);
            }
            DrawCommand::Line {
                x0,
                y0,
                x1,
                y1,
                stroke,
            } => {
                self.draw_line(
                    m.apply(*x0, *y0),
                    m.apply(*x1, *y1),
                    stroke.width * k,
                    stroke.cap,
                    stroke.color,
                );
            }
            DrawCommand::Polygon { points, fill } => {
                let screen: Vec<(f64, f64)> = points.iter().map(|(x, y)| m.apply(*x, *y)).collect();
                self.fill_polygon(&screen, fill.color);
            }
            DrawCommand::Point { x, y, stroke } => match stroke.cap {
                LineCap::Round => {
                    self.fill_disc(m.apply(*x, *y), stroke.width * k / 2.0, stroke.color);
                }
                LineCap::Butt => {
                    let h = stroke.width / 2.0;
                    let corners = [
                        m.apply(x - h, y - h),
                        m.apply(x + h, y - h),
                        m.apply(x + h, y + h),
                        m.apply(x - h, y + h),
                    ];
                    self.fill_polygon(&corners, stroke.color);
                }
            },
            DrawCommand::Text {
                x,
                y,
                text,
                size,
                color,
            } => {
                self.draw_text(m.apply(*x, *y), text, size * k, *color);
            }
            DrawCommand::Save
            | DrawCommand::Restore
            | DrawCommand::Translate { .. }
            | DrawCommand::Rotate { .. } => {}
        }
    }

    /// Inclusive pixel range covering `[min, max]` expanded by `pad`,
    /// clipped to `limit`.
    fn span(min: f64, max: f64, pad: f64, limit: usize) -> Option<(usize, usize)> {
        let lo = (min - pad).floor().max(0.0);
        let hi = (max + pad).ceil().min(limit as f64 - 1.0);
        if limit == 0 || hi < lo || !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        Some((lo as usize, hi as usize))
    }

    pub fn stroke_circle(&mut self, center: (f64, f64), radius: f64, width: f64, color: Color) {
        let pad = width / 2.0 + 1.0;
        let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (
            Self::span(center.0 - radius, center.0 + radius, pad, self.width),
            Self::span(center.1 - radius, center.1 + radius, pad, self.height),
        ) else {
            return;
        };
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                let dx = x as f64 + 0.5 - center.0;
                let dy = y as f64 + 0.5 - center.1;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = (width / 2.0 + 0.5 - (dist - radius).abs()).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.set_pixel(x, y, color, aa as f32);
                }
            }
        }
    }

    pub fn fill_disc(&mut self, center: (f64, f64), radius: f64, color: Color) {
        let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (
            Self::span(center.0 - radius, center.0 + radius, 1.0, self.width),
            Self::span(center.1 - radius, center.1 + radius, 1.0, self.height),
        ) else {
            return;
        };
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                let dx = x as f64 + 0.5 - center.0;
                let dy = y as f64 + 0.5 - center.1;
                let dist = (dx * dx + dy * dy).sqrt();
                let aa = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.set_pixel(x, y, color, aa as f32);
                }
            }
        }
    }

    /// Thick anti-aliased line. Round caps extend half the width past
    /// each endpoint; butt caps stop at the endpoints.
    pub fn draw_line(
        &mut self,
        p0: (f64, f64),
        p1: (f64, f64),
        width: f64,
        cap: LineCap,
        color: Color,
    ) {
        let pad = width / 2.0 + 1.0;
        let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (
            Self::span(p0.0.min(p1.0), p0.0.max(p1.0), pad, self.width),
            Self::span(p0.1.min(p1.1), p0.1.max(p1.1), pad, self.height),
        ) else {
            return;
        };
        let dx = p1.0 - p0.0;
        let dy = p1.1 - p0.1;
        let len_sq = dx * dx + dy * dy;
        let len = len_sq.sqrt();
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                let px = x as f64 + 0.5 - p0.0;
                let py = y as f64 + 0.5 - p0.1;
                let t = if len_sq > 0.0 {
                    (px * dx + py * dy) / len_sq
                } else {
                    0.0
                };
                let aa = match cap {
                    LineCap::Round => {
                        let tc = t.clamp(0.0, 1.0);
                        let dist = ((px - tc * dx).powi(2) + (py - tc * dy).powi(2)).sqrt();
                        (width / 2.0 + 0.5 - dist).clamp(0.0, 1.0)
                    }
                    LineCap::Butt => {
                        if len_sq == 0.0 {
                            0.0
                        } else {
                            let across = ((px * dy - py * dx) / len).abs();
                            let along = (t.min(1.0 - t) * len + 0.5).clamp(0.0, 1.0);
                            (width / 2.0 + 0.5 - across).clamp(0.0, 1.0) * along
                        }
                    }
                };
                if aa > 0.01 {
                    self.set_pixel(x, y, color, aa as f32);
                }
            }
        }
    }

    /// Even-odd fill with supersampled edge coverage.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let (min_x, max_x, min_y, max_y) = points.iter().fold(
            (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
            |(min_x, max_x, min_y, max_y), (x, y)| {
                (min_x.min(*x), max_x.max(*x), min_y.min(*y), max_y.max(*y))
            },
        );
        let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (
            Self::span(min_x, max_x, 1.0, self.width),
            Self::span(min_y, max_y, 1.0, self.height),
        ) else {
            return;
        };
        let n = POLYGON_SUPERSAMPLE;
        let step = 1.0 / n as f64;
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                let mut hits = 0;
                for sy in 0..n {
                    for sx in 0..n {
                        let qx = x as f64 + (sx as f64 + 0.5) * step;
                        let qy = y as f64 + (sy as f64 + 0.5) * step;
                        if contains(points, qx, qy) {
                            hits += 1;
                        }
                    }
                }
                if hits > 0 {
                    self.set_pixel(x, y, color, hits as f32 / (n * n) as f32);
                }
            }
        }
    }

    /// Draws `text` horizontally centered on `anchor.0` with its baseline
    /// at `anchor.1`. Skipped when no font is attached.
    pub fn draw_text(&mut self, anchor: (f64, f64), text: &str, size: f64, color: Color) {
        let Some(font) = self.font else {
            if !self.warned_missing_font {
                log::warn!("no font attached; skipping text");
                self.warned_missing_font = true;
            }
            return;
        };
        let scale = Scale::uniform(size as f32);
        let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
        let (min_x, max_x) = glyphs
            .iter()
            .filter_map(|g| g.pixel_bounding_box())
            .fold((i32::MAX, i32::MIN), |(lo, hi), bb| {
                (lo.min(bb.min.x), hi.max(bb.max.x))
            });
        if min_x >= max_x {
            return;
        }
        let offset_x = anchor.0.round() as i32 - (max_x - min_x) / 2 - min_x;
        let offset_y = anchor.1.round() as i32;
        let (width, height) = (self.width as i32, self.height as i32);
        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = offset_x + bb.min.x + gx as i32;
                    let py = offset_y + bb.min.y + gy as i32;
                    if px >= 0 && px < width && py >= 0 && py < height {
                        self.set_pixel(px as usize, py as usize, color, v);
                    }
                });
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color, alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

/// Even-odd point-in-polygon test.
fn contains(points: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

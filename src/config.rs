use bon::Builder;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for clock face elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const GRAY: Color = Color::new(0x88, 0x88, 0x88);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// ============================================================================
// PAINT TYPES
// ============================================================================

/// How the ends of a stroked line (or a stroked point) are finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Square end flush with the endpoint. Points render as squares.
    #[default]
    Butt,
    /// Half-disc past the endpoint. Points render as discs.
    Round,
}

/// Stroke paint. `width` is in face units and gets multiplied by the
/// face scale at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub cap: LineCap,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
        }
    }

    pub const fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }

    /// Same paint with the width multiplied by `scale`.
    pub fn scaled(self, scale: f64) -> Self {
        Self {
            width: self.width * scale,
            ..self
        }
    }
}

/// Solid fill paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub color: Color,
}

impl Fill {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

// ============================================================================
// CLOCK STYLE
// ============================================================================

/// Palette and stroke configuration for every element of the face.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ClockStyle {
    #[builder(default = Stroke::new(Color::BLACK, 10.0))]
    pub outer_ring: Stroke,
    #[builder(default = Color::BLACK)]
    pub label_color: Color,
    #[builder(default = 36.0)]
    pub label_size: f64,
    #[builder(default = Stroke::new(Color::BLACK, 8.0))]
    pub major_tick: Stroke,
    #[builder(default = Stroke::new(Color::GRAY, 8.0))]
    pub minor_tick: Stroke,
    #[builder(default = Stroke::new(Color::BLACK, 10.0).round())]
    pub hour_pointer: Stroke,
    #[builder(default = Stroke::new(Color::BLACK, 7.0))]
    pub minute_pointer: Stroke,
    #[builder(default = Fill::new(Color::RED))]
    pub second_pointer: Fill,
    #[builder(default = Stroke::new(Color::WHITE, 10.0))]
    pub center_dot: Stroke,
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// HOST CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Builder)]
pub struct ClockConfig {
    #[builder(default = "Clock".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 400)]
    pub window_width: u32,
    #[builder(default = 400)]
    pub window_height: u32,
    #[builder(default = Color::WHITE)]
    pub background_color: Color,

    // Layout configuration
    /// Preferred size used when a dimension is unconstrained.
    #[builder(default = 400)]
    pub default_size: u32,
    /// Fixed radius in pixels; overrides layout negotiation when set.
    pub fixed_radius: Option<u32>,

    #[builder(default = Duration::from_millis(1000))]
    pub redraw_interval: Duration,

    #[builder(default)]
    pub style: ClockStyle,

    /// Font file for the hour labels. When unset, common system font
    /// locations are probed.
    pub font_path: Option<PathBuf>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

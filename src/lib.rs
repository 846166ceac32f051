// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod canvas;
pub mod config;
pub mod error;
pub mod face;
pub mod logging;
pub mod measure;
pub mod scene;
pub mod text;
pub mod time;
pub mod window;

pub use canvas::Canvas;
pub use config::{ClockConfig, ClockStyle, Color, Fill, LineCap, Stroke};
pub use error::{ClockError, Result};
pub use face::ClockFace;
pub use measure::{measure, resolve_dimension, MeasureSpec, Measurement};
pub use scene::{Affine, DrawCommand, Scene};
pub use time::{FixedTime, SystemClock, TimeSample, TimeSource};
pub use window::{ClockView, RedrawSchedule};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Analog clock widget - the primary public interface.
///
/// ```no_run
/// use clockface::{Clock, ClockConfig};
///
/// let config = ClockConfig::builder().title("Wall clock".to_string()).build();
/// Clock::new(config).show()?;
/// # Ok::<(), clockface::ClockError>(())
/// ```
pub struct Clock<S: TimeSource = SystemClock> {
    config: ClockConfig,
    source: S,
}

impl Clock<SystemClock> {
    /// A clock following local wall-clock time.
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            source: SystemClock::new(),
        }
    }
}

impl<S: TimeSource> Clock<S> {
    /// A clock reading its time from `source` on every redraw.
    pub fn with_source(config: ClockConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Builds the view without opening a window.
    pub fn into_view(self) -> Result<ClockView<S>> {
        ClockView::new(self.config, self.source)
    }

    /// Opens the clock window and blocks until it is closed.
    pub fn show(self) -> Result<()> {
        self.into_view()?.run()
    }
}

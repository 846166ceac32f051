use thiserror::Error;

/// Errors surfaced by the clock host. Rendering itself never fails.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("{field} out of range: {value}")]
    InvalidTime { field: &'static str, value: u32 },

    #[error("expected HH:MM or HH:MM:SS, got {0:?}")]
    TimeFormat(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("frame of {len} bytes is too small for {width}x{height} RGBA")]
    FrameTooSmall {
        len: usize,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, ClockError>;

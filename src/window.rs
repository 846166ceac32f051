// ============================================================================
// HOST VIEW AND EVENT LOOP
// ============================================================================

use crate::canvas::Canvas;
use crate::config::ClockConfig;
use crate::error::Result;
use crate::face::ClockFace;
use crate::measure::{measure, MeasureSpec, Measurement};
use crate::scene::{Affine, Scene};
use crate::text::{load_font, ApproximateMetrics, FontMetrics};
use crate::time::{TimeSample, TimeSource};

use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::dpi::LogicalSize;
use winit::event::{Event, StartCause, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Fixed-delay redraw timer: each completed render arms the next one.
#[derive(Debug, Clone, Copy)]
pub struct RedrawSchedule {
    interval: Duration,
    next: Option<Instant>,
}

impl RedrawSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records a render finished at `now` and returns the next deadline.
    pub fn rendered(&mut self, now: Instant) -> Instant {
        let next = now + self.interval;
        self.next = Some(next);
        next
    }

    /// Due before the first render and once the deadline has passed.
    pub fn is_due(&self, now: Instant) -> bool {
        self.next.map_or(true, |next| now >= next)
    }
}

/// Window size next to the buffer size `pixels` last accepted. A failed
/// `resize_buffer` leaves the old buffer in place, so frames are only
/// drawn while the two agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameSize {
    window: (u32, u32),
    buffer: (u32, u32),
}

impl FrameSize {
    fn new(width: u32, height: u32) -> Self {
        Self {
            window: (width, height),
            buffer: (width, height),
        }
    }

    fn window_resized(&mut self, width: u32, height: u32) {
        self.window = (width, height);
    }

    fn buffer_resized(&mut self, width: u32, height: u32) {
        self.buffer = (width, height);
    }

    /// Buffer dimensions to draw into, if any.
    fn drawable(&self) -> Option<(usize, usize)> {
        let (width, height) = self.buffer;
        if self.buffer != self.window || width == 0 || height == 0 {
            return None;
        }
        Some((width as usize, height as usize))
    }
}

/// A clock face bound to a time source, a font and a layout.
pub struct ClockView<S: TimeSource> {
    config: ClockConfig,
    face: ClockFace,
    font: Option<Font<'static>>,
    source: S,
}

impl<S: TimeSource> ClockView<S> {
    /// Loads the label font; the face stays empty until `layout` runs.
    pub fn new(config: ClockConfig, source: S) -> Result<Self> {
        let font = load_font(config.font_path.as_deref())?;
        Ok(Self::with_font(config, source, font))
    }

    pub fn with_font(config: ClockConfig, source: S, font: Option<Font<'static>>) -> Self {
        let face = ClockFace::new(0.0, config.style.clone());
        Self {
            config,
            face,
            font,
            source,
        }
    }

    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Negotiates the face size against the host's constraints.
    pub fn layout(&mut self, width: MeasureSpec, height: MeasureSpec) -> Measurement {
        let measurement = measure(
            width,
            height,
            self.config.fixed_radius,
            self.config.default_size,
        );
        self.face.set_radius(measurement.radius as f64);
        measurement
    }

    /// Builds the scene for `time` with the view's text metrics.
    pub fn scene_at(&self, time: TimeSample) -> Scene {
        match &self.font {
            Some(font) => self.face.render(time, &FontMetrics::new(font)),
            None => self.face.render(time, &ApproximateMetrics),
        }
    }

    /// Reads the time source once and builds that frame's scene.
    pub fn scene(&self) -> Scene {
        self.scene_at(self.source.now())
    }

    /// Paints one frame into an RGBA buffer, centering the face.
    pub fn render_frame(&self, frame: &mut [u8], width: usize, height: usize) -> Result<()> {
        let mut canvas = Canvas::new(frame, width, height)?.with_font(self.font.as_ref());
        let scene = self.scene();
        canvas.clear(self.config.background_color);
        let diameter = self.face.diameter();
        let origin = Affine::translation(
            ((width as f64 - diameter) / 2.0).max(0.0).floor(),
            ((height as f64 - diameter) / 2.0).max(0.0).floor(),
        );
        canvas.draw_scene(&scene, origin);
        Ok(())
    }

    /// Opens a window and redraws on the configured interval until it closes.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let mut frame_size = FrameSize::new(size.width, size.height);
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        self.layout(
            MeasureSpec::Exact(size.width),
            MeasureSpec::Exact(size.height),
        );

        let mut schedule = RedrawSchedule::new(self.config.redraw_interval);
        window.request_redraw();
        log::info!(
            "clock window {}x{} open, redrawing every {:?}",
            size.width,
            size.height,
            schedule.interval()
        );

        let window_clone = window.clone();
        event_loop.run(move |event, window_target| match event {
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                if schedule.is_due(Instant::now()) {
                    window_clone.request_redraw();
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    log::info!("close requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    let (width, height) = (new_size.width, new_size.height);
                    frame_size.window_resized(width, height);
                    if width > 0 && height > 0 {
                        match pixels.resize_buffer(width, height) {
                            Ok(()) => frame_size.buffer_resized(width, height),
                            Err(err) => {
                                log::warn!("buffer resize to {width}x{height} failed: {err}")
                            }
                        }
                        if let Err(err) = pixels.resize_surface(width, height) {
                            log::warn!("surface resize to {width}x{height} failed: {err}");
                        }
                    }
                    self.layout(MeasureSpec::Exact(width), MeasureSpec::Exact(height));
                    window_clone.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    if let Some((width, height)) = frame_size.drawable() {
                        match self.render_frame(pixels.frame_mut(), width, height) {
                            Ok(()) => {
                                if let Err(err) = pixels.render() {
                                    log::error!("present failed: {err}");
                                    window_target.exit();
                                    return;
                                }
                            }
                            Err(err) => log::warn!("frame skipped: {err}"),
                        }
                    } else {
                        log::trace!("frame skipped: buffer and window sizes differ");
                    }
                    let next = schedule.rendered(Instant::now());
                    window_target.set_control_flow(ControlFlow::WaitUntil(next));
                }
                _ => {}
            },
            _ => {}
        })?;

        Ok(())
    }
}

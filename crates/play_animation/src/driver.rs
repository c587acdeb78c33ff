//! Frame driver
//!
//! Runs a sketch against a draw context, once or once per frame.
//!
//! ```text
//!            new(playing = false)          new(playing = true)
//!                    │                            │
//!                    ▼     set_playing(true)      ▼
//!                 ┌──────┐ ─────────────────▶ ┌───────────┐
//!                 │ Idle │                    │ Animating │ ──┐ on_frame: draw,
//!                 └──────┘ ◀───────────────── └───────────┘ ◀─┘ request next
//!                          set_playing(false)
//!                          or sketch error
//! ```
//!
//! Frame requests go through a [`FrameScheduler`] provided by the host. A
//! pending flag guarantees there is never more than one request outstanding,
//! however often the driver is poked between frames.

use std::time::Duration;

use play_core::{check_size, DrawContext, PlayError, PlayResult, Point, Size};
use play_paint::PlayCanvas;

/// A boxed sketch function
pub type Sketch = Box<dyn FnMut(&mut PlayCanvas<'_>) -> PlayResult<()>>;

/// Host hook for asking for the next display frame
pub trait FrameScheduler {
    /// Ask the host to call [`FrameDriver::on_frame`] once more
    fn request_frame(&mut self);
}

/// Scheduler that just remembers that a frame was requested
///
/// Hosts without a display loop (export, tests) poll it with
/// [`FrameFlag::take_request`] and deliver the frame themselves.
#[derive(Debug, Default)]
pub struct FrameFlag {
    requested: bool,
    total: u64,
}

impl FrameFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check and clear the request flag
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Number of requests made since construction
    pub fn total_requests(&self) -> u64 {
        self.total
    }
}

impl FrameScheduler for FrameFlag {
    fn request_frame(&mut self) {
        self.requested = true;
        self.total += 1;
    }
}

/// Driver state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriverState {
    /// Drawn; nothing further scheduled
    #[default]
    Idle,
    /// Redrawing on every delivered frame
    Animating,
}

/// What to draw and how
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverConfig {
    /// Surface size in device pixels
    pub size: Size,
    pub seed: u64,
    pub playing: bool,
}

impl DriverConfig {
    pub fn new(size: Size, seed: u64) -> Self {
        Self {
            size,
            seed,
            playing: false,
        }
    }

    pub fn playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }
}

/// Redraw state machine for one sketch on one context
pub struct FrameDriver<C: DrawContext, S: FrameScheduler> {
    context: C,
    scheduler: S,
    sketch: Sketch,
    config: DriverConfig,
    state: DriverState,
    pending: bool,
    started_at: Option<Duration>,
    elapsed: f64,
    frames: u64,
}

impl<C: DrawContext, S: FrameScheduler> FrameDriver<C, S> {
    /// Size the context, draw once and start animating if configured to
    pub fn new(context: C, scheduler: S, sketch: Sketch, config: DriverConfig) -> PlayResult<Self> {
        let mut driver = Self {
            context,
            scheduler,
            sketch,
            config,
            state: DriverState::Idle,
            pending: false,
            started_at: None,
            elapsed: 0.0,
            frames: 0,
        };

        driver.context.resize(check_size(config.size)?)?;
        driver.redraw()?;
        if config.playing {
            driver.set_playing(true);
        }
        Ok(driver)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Whether a frame request is outstanding
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Number of completed sketch invocations
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Elapsed seconds passed to the most recent frame
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn into_context(self) -> C {
        self.context
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frames
    // ─────────────────────────────────────────────────────────────────────────

    /// Deliver a display frame at host time `timestamp`
    ///
    /// Elapsed time is measured from the first delivered frame. A frame that
    /// arrives after playback stopped is a no-op.
    pub fn on_frame(&mut self, timestamp: Duration) -> PlayResult<()> {
        self.pending = false;
        if self.state == DriverState::Idle {
            tracing::trace!("frame delivered while idle; ignoring");
            return Ok(());
        }

        let started_at = *self.started_at.get_or_insert(timestamp);
        self.elapsed = timestamp.saturating_sub(started_at).as_secs_f64();
        tracing::trace!(elapsed = self.elapsed, frame = self.frames, "animation frame");

        if let Err(err) = self.redraw() {
            self.state = DriverState::Idle;
            tracing::debug!("animation stopped after sketch error");
            return Err(err);
        }

        if self.state == DriverState::Animating {
            self.schedule();
        }
        Ok(())
    }

    /// Start or stop animating
    ///
    /// Stopping takes effect immediately; a frame already requested will
    /// arrive and be ignored.
    pub fn set_playing(&mut self, playing: bool) {
        self.config.playing = playing;
        let next = if playing {
            DriverState::Animating
        } else {
            DriverState::Idle
        };
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "frame driver state change");
            self.state = next;
        }
        if self.state == DriverState::Animating {
            self.schedule();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Parameter Changes
    // ─────────────────────────────────────────────────────────────────────────

    /// Change the seed and redraw immediately
    pub fn set_seed(&mut self, seed: u64) -> PlayResult<()> {
        self.config.seed = seed;
        self.redraw()
    }

    /// Resize the surface and redraw immediately
    pub fn set_size(&mut self, size: Size) -> PlayResult<()> {
        let size = check_size(size)?;
        self.context.resize(size)?;
        self.config.size = size;
        self.redraw()
    }

    /// Keep the width, derive the height from `aspect_ratio`, and redraw
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) -> PlayResult<()> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(PlayError::InvalidParameter(format!(
                "aspect ratio must be finite and positive, got {aspect_ratio}"
            )));
        }
        self.set_size(self.config.size.with_aspect_ratio(aspect_ratio))
    }

    /// Clear the context and run the sketch on a fresh canvas
    pub fn redraw(&mut self) -> PlayResult<()> {
        let Size { width, height } = self.config.size;
        self.context.reset_transform();
        self.context.clear_rect(Point::ZERO, width, height);

        let mut canvas = PlayCanvas::new(&mut self.context, self.config.size, Some(self.config.seed))?
            .with_time(self.elapsed);

        if let Err(err) = (self.sketch)(&mut canvas) {
            tracing::error!(error = %err, seed = self.config.seed, "sketch failed");
            return Err(err);
        }
        self.frames += 1;
        Ok(())
    }

    fn schedule(&mut self) {
        if !self.pending {
            self.pending = true;
            self.scheduler.request_frame();
        }
    }
}

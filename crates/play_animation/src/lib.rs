//! Play Animation
//!
//! Decides *when* a sketch runs. A [`FrameDriver`] owns a draw context and a
//! sketch, draws once on construction and, while playing, redraws once per
//! display frame delivered by the host through [`FrameDriver::on_frame`].
//!
//! # Features
//!
//! - **Explicit states**: `Idle` and `Animating`, no self-recursive callbacks
//! - **Injected scheduling**: hosts implement [`FrameScheduler`]
//! - **Bounded requests**: at most one frame request is ever outstanding
//! - **Immediate redraw** when the seed, size or aspect ratio changes

pub mod driver;

pub use driver::{DriverConfig, DriverState, FrameDriver, FrameFlag, FrameScheduler, Sketch};

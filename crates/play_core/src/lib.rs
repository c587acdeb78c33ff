//! Play Core
//!
//! Foundational primitives for the Play sketch toolkit:
//!
//! - **Geometry**: `Point`/`Vector` math, `Size`, `Affine2D`
//! - **Colour**: CSS-style HSLA colours, resolved gradients and brushes
//! - **Draw Context**: the canvas-like seam every backend implements
//! - **Randomness**: a seeded, reproducible `Rng` with sampling helpers
//!
//! # Example
//!
//! ```rust
//! use play_core::{IntRange, Rng};
//!
//! let mut a = Rng::new(42);
//! let mut b = Rng::new(42);
//!
//! assert_eq!(a.uniform(), b.uniform());
//! assert_eq!(
//!     a.uniform_int(IntRange::new(1, 6)).unwrap(),
//!     b.uniform_int(IntRange::new(1, 6)).unwrap(),
//! );
//! ```

pub mod collection;
pub mod color;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod random;

pub use collection::{pair_wise, triple_wise};
pub use color::{Brush, Color, Gradient, GradientStop, GradientStops};
pub use draw::{
    check_size, DrawCommand, DrawContext, DrawContextExt, DrawState, LineCap, RecordingContext,
    TextAlign, TextBaseline, TextStyle,
};
pub use error::{PlayError, PlayResult};
pub use geometry::{point_along, Affine2D, Point, Size, Vector};
pub use random::{Gaussian, IntRange, Rng};

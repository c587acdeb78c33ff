//! Play Paint
//!
//! The sketch-facing half of the toolkit: geometry you can trace into a
//! [`DrawContext`], gradient descriptors, iteration combinators and the
//! [`PlayCanvas`] drawing surface that ties them to a seeded generator.
//!
//! # Features
//!
//! - Paths with organic cubic curves ([`Path::add_curve_to`])
//! - Polylines with Chaikin smoothing ([`SimplePath::chaikin`])
//! - Shape primitives (rect with split, rounded rect, arc, ellipse, polygon, star)
//! - Linear and radial gradients
//! - Tiling, band, circle and range iteration with shuffled replay
//!
//! # Example
//!
//! ```rust
//! use play_core::{Point, RecordingContext, Size};
//! use play_paint::{PlayCanvas, SimplePath, Tiling};
//!
//! let mut ctx = RecordingContext::new(Size::new(400.0, 400.0));
//! let mut p = PlayCanvas::new(&mut ctx, Size::new(400.0, 400.0), Some(7)).unwrap();
//!
//! p.for_tiling(Tiling::new(4).with_margin(0.1), |p, at, delta| {
//!     let blob = SimplePath::start_at(at)
//!         .add_point(at + delta)
//!         .add_point(Point::new(at.x, at.y + delta.y))
//!         .close()
//!         .chaikin(3);
//!     p.draw(&blob);
//!     Ok(())
//! })
//! .unwrap();
//! ```

pub mod canvas;
pub mod gradient;
pub mod iteration;
pub mod path;
pub mod shapes;
pub mod simple_path;
pub mod trace;

// ─────────────────────────────────────────────────────────────────────────────
// Core type re-exports from play_core
// ─────────────────────────────────────────────────────────────────────────────

pub use play_core::{
    Brush, Color, DrawContext, Gaussian, IntRange, LineCap, PlayError, PlayResult, Point, Size,
    TextAlign, TextBaseline, Vector,
};

// ─────────────────────────────────────────────────────────────────────────────
// Paint types
// ─────────────────────────────────────────────────────────────────────────────

pub use canvas::{PlayCanvas, TextConfig, TextMode, TextSize};
pub use gradient::{Gradientable, LinearGradient, RadialGradient};
pub use iteration::{
    AroundCircle, Dimensions, Horizontal, Iteration, Range, Tiling, TilingKind, Vertical,
};
pub use path::{CurveConfig, Path, PathEdge};
pub use shapes::{
    Arc, Ellipse, Orientation, Rect, RegularPolygon, RoundedRect, Split, SplitConfig, Star,
};
pub use simple_path::SimplePath;
pub use trace::{Shape, Traceable};

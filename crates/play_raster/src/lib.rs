//! Play Raster
//!
//! CPU rendering for Play sketches using tiny-skia:
//!
//! - [`PixmapContext`]: a [`DrawContext`](play_core::DrawContext) over an RGBA pixmap
//! - [`Exporter`]: render a sketch once and encode it as PNG
//!
//! # Example
//!
//! ```rust,no_run
//! use play_core::{Point, PlayResult};
//! use play_paint::{Ellipse, PlayCanvas};
//! use play_raster::{ExportConfig, Exporter};
//!
//! fn dot(p: &mut PlayCanvas<'_>) -> PlayResult<()> {
//!     let hue = p.random() * 360.0;
//!     p.set_fill_colour(hue, 70.0, 50.0, 1.0);
//!     p.fill(&Ellipse::circle(Point::new(0.5, 0.5), 0.2));
//!     Ok(())
//! }
//!
//! Exporter::new(ExportConfig::new(400).with_seed(42))
//!     .export(dot, "dot.png")
//!     .unwrap();
//! ```

pub mod error;
pub mod export;
pub mod pixmap;

pub use error::{RasterError, RasterResult};
pub use export::{ExportConfig, Exporter};
pub use pixmap::PixmapContext;

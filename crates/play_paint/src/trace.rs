//! The trace protocol
//!
//! Anything that can describe its outline implements [`Traceable`]. Tracing
//! only emits path commands; the caller decides whether to stroke, fill or
//! clip afterwards, so one geometry value serves all three.

use play_core::DrawContext;

use crate::path::Path;
use crate::shapes::{Arc, Ellipse, Rect, RegularPolygon, RoundedRect, Star};
use crate::simple_path::SimplePath;

/// Emit an outline into a draw context
pub trait Traceable {
    /// Emit `move_to` followed by line/curve commands (and `close_path` for
    /// closed outlines). Does not begin, stroke or fill the path.
    fn trace_in(&self, ctx: &mut dyn DrawContext);
}

impl<T: Traceable + ?Sized> Traceable for &T {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        (**self).trace_in(ctx);
    }
}

/// Every drawable geometry kind
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Path(Path),
    SimplePath(SimplePath),
    Rect(Rect),
    RoundedRect(RoundedRect),
    Arc(Arc),
    Ellipse(Ellipse),
    RegularPolygon(RegularPolygon),
    Star(Star),
}

impl Traceable for Shape {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        match self {
            Shape::Path(s) => s.trace_in(ctx),
            Shape::SimplePath(s) => s.trace_in(ctx),
            Shape::Rect(s) => s.trace_in(ctx),
            Shape::RoundedRect(s) => s.trace_in(ctx),
            Shape::Arc(s) => s.trace_in(ctx),
            Shape::Ellipse(s) => s.trace_in(ctx),
            Shape::RegularPolygon(s) => s.trace_in(ctx),
            Shape::Star(s) => s.trace_in(ctx),
        }
    }
}

macro_rules! impl_shape_from {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for Shape {
                fn from(shape: $kind) -> Self {
                    Shape::$kind(shape)
                }
            }
        )*
    };
}

impl_shape_from!(Path, SimplePath, Rect, RoundedRect, Arc, Ellipse, RegularPolygon, Star);

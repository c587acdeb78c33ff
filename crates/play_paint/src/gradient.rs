//! Gradient descriptors
//!
//! Descriptors only record anchors and colour stops. They are resolved into a
//! [`Brush`] by the context they are about to paint with, every time they are
//! bound, so one descriptor can be reused across surfaces.

use play_core::{Brush, Color, DrawContext, GradientStop, GradientStops, Point};

/// Something that can produce a paint for a given context
pub trait Gradientable {
    fn gradient(&self, ctx: &mut dyn DrawContext) -> Brush;
}

/// Linear gradient between two points
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub from: Point,
    pub to: Point,
    pub stops: GradientStops,
}

impl LinearGradient {
    pub fn new(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            stops: GradientStops::new(),
        }
    }

    /// Add a colour stop; the offset is clamped to `[0, 1]`
    pub fn stop(mut self, offset: f64, color: Color) -> Self {
        self.stops.push(GradientStop::new(offset, color));
        self
    }
}

impl Gradientable for LinearGradient {
    fn gradient(&self, ctx: &mut dyn DrawContext) -> Brush {
        ctx.create_linear_gradient(self.from, self.to, &self.stops)
    }
}

/// Radial gradient between two circles
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub start: Point,
    pub start_radius: f64,
    pub end: Point,
    pub end_radius: f64,
    pub stops: GradientStops,
}

impl RadialGradient {
    pub fn new(start: Point, start_radius: f64, end: Point, end_radius: f64) -> Self {
        Self {
            start,
            start_radius,
            end,
            end_radius,
            stops: GradientStops::new(),
        }
    }

    /// Concentric gradient from the centre out to `radius`
    pub fn centred(centre: Point, radius: f64) -> Self {
        Self::new(centre, 0.0, centre, radius)
    }

    /// Add a colour stop; the offset is clamped to `[0, 1]`
    pub fn stop(mut self, offset: f64, color: Color) -> Self {
        self.stops.push(GradientStop::new(offset, color));
        self
    }
}

impl Gradientable for RadialGradient {
    fn gradient(&self, ctx: &mut dyn DrawContext) -> Brush {
        ctx.create_radial_gradient(
            self.start,
            self.start_radius,
            self.end,
            self.end_radius,
            &self.stops,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::{Gradient, RecordingContext, Size};

    #[test]
    fn test_linear_resolves_through_context() {
        let mut ctx = RecordingContext::new(Size::new(10.0, 10.0));
        let descriptor = LinearGradient::new(Point::ZERO, Point::new(1.0, 0.0))
            .stop(0.0, Color::hsl(0.0, 100.0, 50.0))
            .stop(1.5, Color::WHITE);

        match descriptor.gradient(&mut ctx) {
            Brush::Gradient(Gradient::Linear { from, to, stops }) => {
                assert_eq!(from, Point::ZERO);
                assert_eq!(to, Point::new(1.0, 0.0));
                assert_eq!(stops.len(), 2);
                assert_eq!(stops[1].offset, 1.0);
            }
            other => panic!("unexpected brush {other:?}"),
        }
    }

    #[test]
    fn test_radial_resolves_through_context() {
        let mut ctx = RecordingContext::new(Size::new(10.0, 10.0));
        let descriptor = RadialGradient::centred(Point::new(0.5, 0.5), 0.3)
            .stop(0.0, Color::WHITE)
            .stop(1.0, Color::BLACK);

        match descriptor.gradient(&mut ctx) {
            Brush::Gradient(Gradient::Radial {
                start_radius,
                end_radius,
                stops,
                ..
            }) => {
                assert_eq!(start_radius, 0.0);
                assert_eq!(end_radius, 0.3);
                assert_eq!(stops.len(), 2);
            }
            other => panic!("unexpected brush {other:?}"),
        }
    }
}

//! Path building and representation
//!
//! A [`Path`] is a start point followed by connected edges. Edges are only ever
//! appended through the builder methods, so each edge starts where the
//! previous one ended.
//!
//! ```rust
//! use play_core::Point;
//! use play_paint::{CurveConfig, Path};
//!
//! let path = Path::start_at(Point::new(0.1, 0.5))
//!     .add_line_to(Point::new(0.3, 0.5))
//!     .add_curve_to(Point::new(0.9, 0.5), &CurveConfig::default().with_curve_size(0.5));
//!
//! assert_eq!(path.edges().len(), 2);
//! assert_eq!(path.current_point(), Point::new(0.9, 0.5));
//! ```

use std::f64::consts::FRAC_PI_2;

use play_core::{DrawContext, Point};

use crate::trace::Traceable;

/// A single segment of a [`Path`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEdge {
    Line {
        from: Point,
        to: Point,
    },
    Quad {
        from: Point,
        to: Point,
        control: Point,
    },
    Cubic {
        from: Point,
        to: Point,
        control1: Point,
        control2: Point,
    },
}

impl PathEdge {
    pub fn from(&self) -> Point {
        match *self {
            PathEdge::Line { from, .. }
            | PathEdge::Quad { from, .. }
            | PathEdge::Cubic { from, .. } => from,
        }
    }

    pub fn to(&self) -> Point {
        match *self {
            PathEdge::Line { to, .. } | PathEdge::Quad { to, .. } | PathEdge::Cubic { to, .. } => {
                to
            }
        }
    }
}

/// Knobs for [`Path::add_curve_to`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveConfig {
    /// Offset of the curve's belly from the chord, as a fraction of half the chord
    pub curve_size: f64,
    /// Rotation of the belly direction away from the chord normal (radians)
    pub curve_angle: f64,
    /// Spread of the two control points, as a fraction of half the chord
    pub bulbousness: f64,
    /// Extra rotation of the control-point axis (radians)
    pub twist: f64,
    /// Which side of the chord the curve bulges towards (`+1` or `-1`)
    pub polarity: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            curve_size: 1.0,
            curve_angle: 0.0,
            bulbousness: 1.0,
            twist: 0.0,
            polarity: 1.0,
        }
    }
}

impl CurveConfig {
    pub fn with_curve_size(mut self, curve_size: f64) -> Self {
        self.curve_size = curve_size;
        self
    }

    pub fn with_curve_angle(mut self, curve_angle: f64) -> Self {
        self.curve_angle = curve_angle;
        self
    }

    pub fn with_bulbousness(mut self, bulbousness: f64) -> Self {
        self.bulbousness = bulbousness;
        self
    }

    pub fn with_twist(mut self, twist: f64) -> Self {
        self.twist = twist;
        self
    }

    pub fn with_polarity(mut self, polarity: f64) -> Self {
        self.polarity = polarity;
        self
    }

    /// Cubic control points for a curve from `from` to `to`
    ///
    /// Returns `(control_mid, control1, control2)`. A zero-length chord puts
    /// every control point on `from`.
    pub fn control_points(&self, from: Point, to: Point) -> (Point, Point, Point) {
        let u = to - from;
        let d = u.magnitude();
        let m = from + u / 2.0;

        let perp = u.perpendicular().normalise().rotate(self.curve_angle);
        let control_mid = m + perp * (self.curve_size * self.polarity * d / 2.0);

        let perp2 = perp.rotate(-FRAC_PI_2 - self.twist);
        let offset = perp2 * (self.bulbousness * d / 2.0);

        (control_mid, control_mid + offset, control_mid - offset)
    }
}

/// Open path made of line, quadratic and cubic edges
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    start: Point,
    current: Point,
    edges: Vec<PathEdge>,
}

impl Path {
    pub fn start_at(point: Point) -> Self {
        Self {
            start: point,
            current: point,
            edges: Vec::new(),
        }
    }

    pub fn add_line_to(mut self, point: Point) -> Self {
        self.edges.push(PathEdge::Line {
            from: self.current,
            to: point,
        });
        self.current = point;
        self
    }

    pub fn add_quadratic_to(mut self, point: Point, control: Point) -> Self {
        self.edges.push(PathEdge::Quad {
            from: self.current,
            to: point,
            control,
        });
        self.current = point;
        self
    }

    /// Append an organic cubic curve to `point`
    ///
    /// The control points are derived from the chord and the knobs in
    /// `config`; see [`CurveConfig::control_points`].
    pub fn add_curve_to(mut self, point: Point, config: &CurveConfig) -> Self {
        let (_, control1, control2) = config.control_points(self.current, point);
        self.edges.push(PathEdge::Cubic {
            from: self.current,
            to: point,
            control1,
            control2,
        });
        self.current = point;
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn current_point(&self) -> Point {
        self.current
    }

    pub fn edges(&self) -> &[PathEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl Traceable for Path {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        ctx.move_to(self.start);
        for edge in &self.edges {
            match *edge {
                PathEdge::Line { to, .. } => ctx.line_to(to),
                PathEdge::Quad { to, control, .. } => ctx.quadratic_curve_to(control, to),
                PathEdge::Cubic {
                    to,
                    control1,
                    control2,
                    ..
                } => ctx.bezier_curve_to(control1, control2, to),
            }
        }
    }
}

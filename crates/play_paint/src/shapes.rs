//! Shape primitives
//!
//! Immutable values fully determined by their fields. All of them trace
//! deterministically; curved outlines are approximated with cubic Béziers.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use play_core::{DrawContext, PlayError, PlayResult, Point};

use crate::trace::Traceable;

/// Control-point distance for a quarter circle of unit radius
const KAPPA: f64 = 0.552_284_749_8;

// ─────────────────────────────────────────────────────────────────────────────
// Rect
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub at: Point,
    pub width: f64,
    pub height: f64,
}

/// Axis a rectangle is cut along
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Vertical cut lines; parts are laid out left to right
    #[default]
    Vertical,
    /// Horizontal cut lines; parts are laid out top to bottom
    Horizontal,
}

/// How to divide the split axis
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Split {
    /// Two equal parts
    #[default]
    Halves,
    /// `n` equal parts
    Even(usize),
    /// Parts proportional to the weights
    Weights(Vec<f64>),
}

/// Configuration for [`Rect::split`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitConfig {
    pub orientation: Orientation,
    pub split: Split,
}

impl SplitConfig {
    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
            split: Split::Halves,
        }
    }

    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            split: Split::Halves,
        }
    }

    pub fn even(mut self, n: usize) -> Self {
        self.split = Split::Even(n);
        self
    }

    pub fn weights(mut self, weights: impl Into<Vec<f64>>) -> Self {
        self.split = Split::Weights(weights.into());
        self
    }
}

impl Rect {
    pub const fn new(at: Point, width: f64, height: f64) -> Self {
        Self { at, width, height }
    }

    pub fn right(&self) -> f64 {
        self.at.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.at.y + self.height
    }

    pub fn centre(&self) -> Point {
        Point::new(self.at.x + self.width / 2.0, self.at.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.at.x
            && point.x <= self.right()
            && point.y >= self.at.y
            && point.y <= self.bottom()
    }

    /// Partition into contiguous parts along one axis
    ///
    /// Part boundaries come from cumulative weight sums. The first part starts
    /// on the source edge, each part starts exactly on the previous part's
    /// end boundary, and the final boundary is the source's far edge.
    pub fn split(&self, config: &SplitConfig) -> PlayResult<Vec<Rect>> {
        let weights: Vec<f64> = match &config.split {
            Split::Halves => vec![1.0, 1.0],
            Split::Even(0) => {
                return Err(PlayError::InvalidParameter(
                    "cannot split into zero parts".to_string(),
                ))
            }
            Split::Even(n) => vec![1.0; *n],
            Split::Weights(ws) if ws.is_empty() => {
                return Err(PlayError::InvalidParameter(
                    "split weights must not be empty".to_string(),
                ))
            }
            Split::Weights(ws) => ws.clone(),
        };

        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(PlayError::InvalidParameter(format!(
                "split weights must be finite and non-negative, got {bad}"
            )));
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(PlayError::NonPositiveWeight(total));
        }

        let (start, extent) = match config.orientation {
            Orientation::Vertical => (self.at.x, self.width),
            Orientation::Horizontal => (self.at.y, self.height),
        };

        let mut boundaries = Vec::with_capacity(weights.len() + 1);
        boundaries.push(start);
        let mut cumulative = 0.0;
        for w in &weights[..weights.len() - 1] {
            cumulative += w;
            boundaries.push(start + extent * (cumulative / total));
        }
        boundaries.push(start + extent);

        let parts = boundaries
            .windows(2)
            .map(|b| match config.orientation {
                Orientation::Vertical => {
                    Rect::new(Point::new(b[0], self.at.y), b[1] - b[0], self.height)
                }
                Orientation::Horizontal => {
                    Rect::new(Point::new(self.at.x, b[0]), self.width, b[1] - b[0])
                }
            })
            .collect();

        Ok(parts)
    }
}

impl Traceable for Rect {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        ctx.move_to(self.at);
        ctx.line_to(Point::new(self.right(), self.at.y));
        ctx.line_to(Point::new(self.right(), self.bottom()));
        ctx.line_to(Point::new(self.at.x, self.bottom()));
        ctx.close_path();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RoundedRect
// ─────────────────────────────────────────────────────────────────────────────

/// Rectangle with circular corners of one radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    pub at: Point,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl RoundedRect {
    pub const fn new(at: Point, width: f64, height: f64, radius: f64) -> Self {
        Self {
            at,
            width,
            height,
            radius,
        }
    }

    /// Radius clamped to half the shorter side
    pub fn effective_radius(&self) -> f64 {
        self.radius
            .min(self.width.abs() / 2.0)
            .min(self.height.abs() / 2.0)
            .max(0.0)
    }
}

impl Traceable for RoundedRect {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        let r = self.effective_radius();
        let k = r * KAPPA;
        let (x, y) = (self.at.x, self.at.y);
        let (w, h) = (self.width, self.height);

        ctx.move_to(Point::new(x + r, y));
        // Top edge and top-right corner
        ctx.line_to(Point::new(x + w - r, y));
        ctx.bezier_curve_to(
            Point::new(x + w - r + k, y),
            Point::new(x + w, y + r - k),
            Point::new(x + w, y + r),
        );
        // Right edge and bottom-right corner
        ctx.line_to(Point::new(x + w, y + h - r));
        ctx.bezier_curve_to(
            Point::new(x + w, y + h - r + k),
            Point::new(x + w - r + k, y + h),
            Point::new(x + w - r, y + h),
        );
        // Bottom edge and bottom-left corner
        ctx.line_to(Point::new(x + r, y + h));
        ctx.bezier_curve_to(
            Point::new(x + r - k, y + h),
            Point::new(x, y + h - r + k),
            Point::new(x, y + h - r),
        );
        // Left edge and top-left corner
        ctx.line_to(Point::new(x, y + r));
        ctx.bezier_curve_to(
            Point::new(x, y + r - k),
            Point::new(x + r - k, y),
            Point::new(x + r, y),
        );
        ctx.close_path();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Arc / Ellipse
// ─────────────────────────────────────────────────────────────────────────────

/// Open circular arc from `start_angle` to `end_angle` (radians)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub centre: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub const fn new(centre: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            centre,
            radius,
            start_angle,
            end_angle,
        }
    }

    fn point_at(&self, angle: f64) -> Point {
        self.centre + Point::from_angle(angle) * self.radius
    }
}

impl Traceable for Arc {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        let sweep = self.end_angle - self.start_angle;
        ctx.move_to(self.point_at(self.start_angle));
        if sweep == 0.0 || !sweep.is_finite() {
            return;
        }

        // Anything past a full turn retraces the same circle
        let (sweep, end_angle) = if sweep.abs() > TAU {
            let sweep = TAU.copysign(sweep);
            (sweep, self.start_angle + sweep)
        } else {
            (sweep, self.end_angle)
        };

        // At most a quarter turn per cubic
        let segments = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan() * self.radius;

        for i in 0..segments {
            let a0 = self.start_angle + step * i as f64;
            let a1 = if i + 1 == segments {
                end_angle
            } else {
                a0 + step
            };
            let p0 = self.point_at(a0);
            let p1 = self.point_at(a1);
            let tangent0 = Point::new(-a0.sin(), a0.cos());
            let tangent1 = Point::new(-a1.sin(), a1.cos());
            ctx.bezier_curve_to(p0 + tangent0 * k, p1 - tangent1 * k, p1);
        }
    }
}

/// Axis-aligned ellipse given by its centre and full width and height
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub centre: Point,
    pub width: f64,
    pub height: f64,
}

impl Ellipse {
    pub const fn new(centre: Point, width: f64, height: f64) -> Self {
        Self {
            centre,
            width,
            height,
        }
    }

    pub fn circle(centre: Point, radius: f64) -> Self {
        Self::new(centre, radius * 2.0, radius * 2.0)
    }
}

impl Traceable for Ellipse {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        let Point { x: cx, y: cy } = self.centre;
        let rx = self.width / 2.0;
        let ry = self.height / 2.0;
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;

        ctx.move_to(Point::new(cx + rx, cy));
        ctx.bezier_curve_to(
            Point::new(cx + rx, cy + ky),
            Point::new(cx + kx, cy + ry),
            Point::new(cx, cy + ry),
        );
        ctx.bezier_curve_to(
            Point::new(cx - kx, cy + ry),
            Point::new(cx - rx, cy + ky),
            Point::new(cx - rx, cy),
        );
        ctx.bezier_curve_to(
            Point::new(cx - rx, cy - ky),
            Point::new(cx - kx, cy - ry),
            Point::new(cx, cy - ry),
        );
        ctx.bezier_curve_to(
            Point::new(cx + kx, cy - ry),
            Point::new(cx + rx, cy - ky),
            Point::new(cx + rx, cy),
        );
        ctx.close_path();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RegularPolygon / Star
// ─────────────────────────────────────────────────────────────────────────────

fn trace_closed_polygon(ctx: &mut dyn DrawContext, vertices: &[Point]) {
    let Some(&first) = vertices.first() else {
        return;
    };
    ctx.move_to(first);
    for vertex in &vertices[1..] {
        ctx.line_to(*vertex);
    }
    ctx.line_to(first);
    ctx.close_path();
}

/// Polygon with `n` equally spaced vertices on a circle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegularPolygon {
    pub centre: Point,
    pub radius: f64,
    pub n: usize,
    /// Angle of the first vertex; the default points straight up
    pub start_angle: f64,
}

impl RegularPolygon {
    pub fn new(centre: Point, radius: f64, n: usize) -> Self {
        Self {
            centre,
            radius,
            n,
            start_angle: -FRAC_PI_2,
        }
    }

    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    pub fn vertices(&self) -> Vec<Point> {
        (0..self.n)
            .map(|i| {
                let angle = self.start_angle + TAU * i as f64 / self.n as f64;
                self.centre + Point::from_angle(angle) * self.radius
            })
            .collect()
    }
}

impl Traceable for RegularPolygon {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        trace_closed_polygon(ctx, &self.vertices());
    }
}

/// Star with `n` points alternating between an outer and inner radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub centre: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub n: usize,
    /// Angle of the first outer point; the default points straight up
    pub start_angle: f64,
}

impl Star {
    pub fn new(centre: Point, outer_radius: f64, inner_radius: f64, n: usize) -> Self {
        Self {
            centre,
            outer_radius,
            inner_radius,
            n,
            start_angle: -FRAC_PI_2,
        }
    }

    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    pub fn vertices(&self) -> Vec<Point> {
        (0..2 * self.n)
            .map(|i| {
                let angle = self.start_angle + PI * i as f64 / self.n as f64;
                let radius = if i % 2 == 0 {
                    self.outer_radius
                } else {
                    self.inner_radius
                };
                self.centre + Point::from_angle(angle) * radius
            })
            .collect()
    }
}

impl Traceable for Star {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        trace_closed_polygon(ctx, &self.vertices());
    }
}

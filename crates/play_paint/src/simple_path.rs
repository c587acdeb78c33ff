//! Polyline paths with Chaikin smoothing

use play_core::{point_along, triple_wise, DrawContext, PlayError, PlayResult, Point};

use crate::trace::Traceable;

/// Ordered point sequence traced with straight segments
///
/// A path closed with [`SimplePath::close`] ends with an exact copy of its
/// first point and is smoothed as a ring.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplePath {
    points: Vec<Point>,
    closed: bool,
}

impl SimplePath {
    pub fn start_at(point: Point) -> Self {
        Self {
            points: vec![point],
            closed: false,
        }
    }

    /// Build from existing points; errors on an empty list
    pub fn from_points(points: Vec<Point>) -> PlayResult<Self> {
        if points.is_empty() {
            return Err(PlayError::EmptyPoints);
        }
        Ok(Self {
            points,
            closed: false,
        })
    }

    /// Append a point, reopening the path if it was closed
    pub fn add_point(mut self, point: Point) -> Self {
        self.points.push(point);
        self.closed = false;
        self
    }

    /// Close the path by repeating the first point
    pub fn close(mut self) -> Self {
        if !self.closed {
            let first = self.points[0];
            self.points.push(first);
            self.closed = true;
        }
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Apply `iterations` rounds of Chaikin corner cutting
    ///
    /// Every corner `b` with neighbours `a`, `c` becomes the two points a
    /// quarter of the way from `b` towards `a` and towards `c`. Open paths keep
    /// their end points; closed paths treat every vertex as a corner and stay
    /// closed. Paths with fewer than three points are returned unchanged.
    pub fn chaikin(mut self, iterations: usize) -> Self {
        for _ in 0..iterations {
            let smoothed = if self.closed {
                chaikin_ring(&self.points)
            } else {
                chaikin_open(&self.points)
            };
            match smoothed {
                Some(points) => self.points = points,
                None => break,
            }
        }
        self
    }
}

fn cut_corner(a: Point, b: Point, c: Point) -> [Point; 2] {
    [point_along(b, a, 0.25), point_along(b, c, 0.25)]
}

fn chaikin_open(points: &[Point]) -> Option<Vec<Point>> {
    let (&first, &last) = (points.first()?, points.last()?);
    if points.len() < 3 {
        return None;
    }

    let mut out = Vec::with_capacity(2 * points.len() - 2);
    out.push(first);
    for (a, b, c) in triple_wise(points) {
        out.extend(cut_corner(a, b, c));
    }
    out.push(last);
    Some(out)
}

fn chaikin_ring(points: &[Point]) -> Option<Vec<Point>> {
    // Closed paths store the first point again at the end
    let ring = &points[..points.len().saturating_sub(1)];
    let n = ring.len();
    if n < 3 {
        return None;
    }

    let mut out = Vec::with_capacity(2 * n + 1);
    for i in 0..n {
        let a = ring[(i + n - 1) % n];
        let c = ring[(i + 1) % n];
        out.extend(cut_corner(a, ring[i], c));
    }
    out.push(out[0]);
    Some(out)
}

impl Traceable for SimplePath {
    fn trace_in(&self, ctx: &mut dyn DrawContext) {
        let Some((first, rest)) = self.points.split_first() else {
            return;
        };
        ctx.move_to(*first);
        for point in rest {
            ctx.line_to(*point);
        }
        if self.closed {
            ctx.close_path();
        }
    }
}

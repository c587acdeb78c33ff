//! Geometry for the unit-square drawing model
//!
//! `Point` doubles as a position and as a direction (see [`Vector`]). All
//! operations are pure and total over finite values.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// ─────────────────────────────────────────────────────────────────────────────
// Point / Vector
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point or vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A point used as a direction or delta
pub type Vector = Point;

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Length of the vector
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction
    ///
    /// The zero vector normalises to the zero vector.
    pub fn normalise(&self) -> Self {
        let len = self.magnitude();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }

    /// Scale by a scalar factor
    pub fn scale(&self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    /// Rotate by `angle` radians (counter-clockwise positive)
    pub fn rotate(&self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// The vector rotated by -90°
    pub fn perpendicular(&self) -> Self {
        Self::new(self.y, -self.x)
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other - *self).magnitude()
    }

    pub fn midpoint(&self, other: Point) -> Point {
        point_along(*self, other, 0.5)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Linear interpolation `a + t·(b − a)`
pub fn point_along(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        self.scale(k)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, k: f64) -> Point {
        Point::new(self.x / k, self.y / k)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Size
// ─────────────────────────────────────────────────────────────────────────────

/// Surface size in device pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// True when both sides are finite and strictly positive
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Size with the same width and the given aspect ratio
    ///
    /// The height is floored to whole pixels, matching how export targets are
    /// allocated.
    pub fn with_aspect_ratio(&self, aspect_ratio: f64) -> Self {
        Self::new(self.width, (self.width / aspect_ratio).floor())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Affine transform
// ─────────────────────────────────────────────────────────────────────────────

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f64; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            elements: [c, s, -s, c, 0.0, 0.0],
        }
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(
            a * point.x + c * point.y + tx,
            b * point.x + d * point.y + ty,
        )
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: Point, b: Point) -> bool {
        (a - b).magnitude() < 1e-12
    }

    #[test]
    fn test_vector_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);

        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(a - b, Point::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(-a, Point::new(-1.0, -2.0));
        assert_eq!(Point::new(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_normalise() {
        let n = Point::new(3.0, 4.0).normalise();
        assert!((n.magnitude() - 1.0).abs() < 1e-12);

        // Zero vector convention
        assert_eq!(Point::ZERO.normalise(), Point::ZERO);
    }

    #[test]
    fn test_rotate_counter_clockwise() {
        let r = Point::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert!(close(r, Point::new(0.0, 1.0)));

        let p = Point::new(1.0, 0.0).perpendicular();
        assert!(close(p, Point::new(1.0, 0.0).rotate(-FRAC_PI_2)));
    }

    #[test]
    fn test_point_along() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, -4.0);

        assert_eq!(point_along(a, b, 0.0), a);
        assert_eq!(point_along(a, b, 1.0), b);
        assert_eq!(point_along(a, b, 0.25), Point::new(2.5, -1.0));
        assert_eq!(a.midpoint(b), Point::new(5.0, -2.0));
    }

    #[test]
    fn test_size_aspect() {
        let size = Size::new(800.0, 600.0);
        assert!((size.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
        assert!(size.is_drawable());
        assert!(!Size::new(0.0, 10.0).is_drawable());
        assert!(!Size::new(f64::NAN, 10.0).is_drawable());
        assert_eq!(Size::new(200.0, 1.0).with_aspect_ratio(1.5), Size::new(200.0, 133.0));
    }

    #[test]
    fn test_affine_then() {
        let scale = Affine2D::scale(2.0, 2.0);
        let translate = Affine2D::translation(10.0, 0.0);

        // translate first, then scale
        let t = scale.then(&translate);
        assert!(close(t.transform_point(Point::new(1.0, 1.0)), Point::new(22.0, 2.0)));
        assert!(Affine2D::default().is_identity());
    }
}

//! Iteration combinators
//!
//! Declarative replacements for the nested loops sketches keep writing. Each
//! combinator is a small config value that expands into the items a sketch
//! visits, in unit-square coordinates bounded by a [`Dimensions`] record.

use std::f64::consts::{FRAC_PI_2, TAU};

use play_core::{Point, Vector};

/// Bounds of the drawable region in unit-square coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Dimensions {
    /// Region for a surface with the given aspect ratio
    pub fn for_aspect_ratio(aspect_ratio: f64) -> Self {
        Self {
            top: 0.0,
            bottom: 1.0 / aspect_ratio,
            left: 0.0,
            right: 1.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Inclusive bounds test
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// A combinator that expands into a sequence of items
pub trait Iteration {
    type Item;

    fn items(&self, bounds: &Dimensions) -> Vec<Self::Item>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tiling
// ─────────────────────────────────────────────────────────────────────────────

/// How a tiling derives its row count
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TilingKind {
    /// Square cells; as many whole rows as fit
    Square,
    /// `n` rows that exactly fill the height
    #[default]
    Proportionate,
}

/// Grid of `n` columns; yields `(top_left, cell_size)` column by column
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tiling {
    pub n: usize,
    pub kind: TilingKind,
    pub margin: f64,
}

impl Tiling {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            kind: TilingKind::Proportionate,
            margin: 0.0,
        }
    }

    pub fn square(mut self) -> Self {
        self.kind = TilingKind::Square;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

impl Iteration for Tiling {
    type Item = (Point, Vector);

    fn items(&self, bounds: &Dimensions) -> Vec<Self::Item> {
        if self.n == 0 {
            return Vec::new();
        }
        let width = bounds.width() - 2.0 * self.margin;
        let height = bounds.height() - 2.0 * self.margin;
        let dx = width / self.n as f64;

        let (rows, dy) = match self.kind {
            TilingKind::Proportionate => (self.n, height / self.n as f64),
            // Tolerate rounding when the height is an exact multiple
            TilingKind::Square => (((height / dx) + 1e-9).floor().max(0.0) as usize, dx),
        };

        let origin = Point::new(bounds.left + self.margin, bounds.top + self.margin);
        let mut cells = Vec::with_capacity(self.n * rows);
        for i in 0..self.n {
            for j in 0..rows {
                let at = origin + Point::new(i as f64 * dx, j as f64 * dy);
                cells.push((at, Vector::new(dx, dy)));
            }
        }
        cells
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bands
// ─────────────────────────────────────────────────────────────────────────────

/// `n` side-by-side columns spanning the full height
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Horizontal {
    pub n: usize,
    pub margin: f64,
}

/// `n` stacked rows spanning the full width
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertical {
    pub n: usize,
    pub margin: f64,
}

impl Horizontal {
    pub fn new(n: usize) -> Self {
        Self { n, margin: 0.0 }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

impl Vertical {
    pub fn new(n: usize) -> Self {
        Self { n, margin: 0.0 }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

impl Iteration for Horizontal {
    type Item = (Point, Vector);

    fn items(&self, bounds: &Dimensions) -> Vec<Self::Item> {
        if self.n == 0 {
            return Vec::new();
        }
        let dx = (bounds.width() - 2.0 * self.margin) / self.n as f64;
        let dy = bounds.height() - 2.0 * self.margin;
        let origin = Point::new(bounds.left + self.margin, bounds.top + self.margin);

        (0..self.n)
            .map(|i| (origin + Point::new(i as f64 * dx, 0.0), Vector::new(dx, dy)))
            .collect()
    }
}

impl Iteration for Vertical {
    type Item = (Point, Vector);

    fn items(&self, bounds: &Dimensions) -> Vec<Self::Item> {
        if self.n == 0 {
            return Vec::new();
        }
        let dx = bounds.width() - 2.0 * self.margin;
        let dy = (bounds.height() - 2.0 * self.margin) / self.n as f64;
        let origin = Point::new(bounds.left + self.margin, bounds.top + self.margin);

        (0..self.n)
            .map(|i| (origin + Point::new(0.0, i as f64 * dy), Vector::new(dx, dy)))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Circle / Range
// ─────────────────────────────────────────────────────────────────────────────

/// `n` equally spaced points on a circle, clockwise on screen from the top
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AroundCircle {
    pub at: Point,
    pub radius: f64,
    pub n: usize,
}

impl AroundCircle {
    pub fn new(at: Point, radius: f64, n: usize) -> Self {
        Self { at, radius, n }
    }
}

impl Iteration for AroundCircle {
    type Item = (Point, usize);

    fn items(&self, _bounds: &Dimensions) -> Vec<Self::Item> {
        (0..self.n)
            .map(|i| {
                let angle = -FRAC_PI_2 + TAU * i as f64 / self.n as f64;
                (self.at + Point::from_angle(angle) * self.radius, i)
            })
            .collect()
    }
}

/// Evenly spaced scalars from `from` towards `to`
///
/// Yields `n` values, or `n + 1` when inclusive so that `to` itself is the
/// last value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub from: f64,
    pub to: f64,
    pub n: usize,
    pub inclusive: bool,
}

impl Range {
    /// Inclusive range
    pub fn new(from: f64, to: f64, n: usize) -> Self {
        Self {
            from,
            to,
            n,
            inclusive: true,
        }
    }

    pub fn exclusive(mut self) -> Self {
        self.inclusive = false;
        self
    }
}

impl Iteration for Range {
    type Item = f64;

    fn items(&self, _bounds: &Dimensions) -> Vec<Self::Item> {
        if self.n == 0 {
            return Vec::new();
        }
        let step = (self.to - self.from) / self.n as f64;
        let count = self.n + usize::from(self.inclusive);
        (0..count)
            .map(|i| {
                if i == self.n {
                    self.to
                } else {
                    self.from + step * i as f64
                }
            })
            .collect()
    }
}

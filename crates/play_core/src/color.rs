//! Colours, gradients and brushes
//!
//! Sketches pick colours in HSLA, the way CSS does: hue in degrees (wrapped),
//! saturation and lightness in percent, alpha in `[0, 1]`.

use smallvec::SmallVec;

use crate::geometry::Point;

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color (sRGB, straight alpha)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a colour from CSS-style HSLA components
    ///
    /// `h` is in degrees and may lie outside `[0, 360)`; `s` and `l` are
    /// percentages clamped to `[0, 100]`; `a` is clamped to `[0, 1]`.
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        let h = h.rem_euclid(360.0) / 360.0;
        let s = (s / 100.0).clamp(0.0, 1.0);
        let l = (l / 100.0).clamp(0.0, 1.0);
        let a = a.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgba(l as f32, l as f32, l as f32, a as f32);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::rgba(
            hue_to_channel(p, q, h + 1.0 / 3.0) as f32,
            hue_to_channel(p, q, h) as f32,
            hue_to_channel(p, q, h - 1.0 / 3.0) as f32,
            a as f32,
        )
    }

    /// Opaque HSL colour
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::hsla(h, s, l, 1.0)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gradients
// ─────────────────────────────────────────────────────────────────────────────

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f64,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop
    pub fn new(offset: f64, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Colour stops, inline for the common short case
pub type GradientStops = SmallVec<[GradientStop; 4]>;

/// A gradient resolved against a draw context
///
/// Coordinates are in the user space of the context at the time the brush is
/// used, like a canvas gradient.
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    /// Linear gradient between two points
    Linear {
        from: Point,
        to: Point,
        stops: GradientStops,
    },
    /// Radial gradient between two circles
    Radial {
        start: Point,
        start_radius: f64,
        end: Point,
        end_radius: f64,
        stops: GradientStops,
    },
}

impl Gradient {
    /// Get the gradient stops
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Linear { stops, .. } => stops,
            Gradient::Radial { stops, .. } => stops,
        }
    }

    /// Get the first color in the gradient (or BLACK if no stops)
    pub fn first_color(&self) -> Color {
        self.stops()
            .first()
            .map(|s| s.color)
            .unwrap_or(Color::BLACK)
    }
}

/// Paint used for strokes and fills
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Gradient(Gradient),
}

impl Default for Brush {
    fn default() -> Self {
        Brush::Solid(Color::BLACK)
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl From<Gradient> for Brush {
    fn from(gradient: Gradient) -> Self {
        Brush::Gradient(gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-6
            && (a.g - b.g).abs() < 1e-6
            && (a.b - b.b).abs() < 1e-6
            && (a.a - b.a).abs() < 1e-6
    }

    #[test]
    fn test_hsla_primaries() {
        assert!(approx(Color::hsl(0.0, 100.0, 50.0), Color::rgb(1.0, 0.0, 0.0)));
        assert!(approx(Color::hsl(120.0, 100.0, 50.0), Color::rgb(0.0, 1.0, 0.0)));
        assert!(approx(Color::hsl(240.0, 100.0, 50.0), Color::rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hsla_greys_and_extremes() {
        assert!(approx(Color::hsl(77.0, 0.0, 50.0), Color::rgb(0.5, 0.5, 0.5)));
        assert!(approx(Color::hsl(0.0, 0.0, 100.0), Color::WHITE));
        assert!(approx(Color::hsl(200.0, 80.0, 0.0), Color::BLACK));
    }

    #[test]
    fn test_hue_wraps() {
        // Sketches routinely pass hues like x * 360 or i * 100
        assert!(approx(Color::hsl(480.0, 90.0, 40.0), Color::hsl(120.0, 90.0, 40.0)));
        assert!(approx(Color::hsl(-120.0, 90.0, 40.0), Color::hsl(240.0, 90.0, 40.0)));
    }

    #[test]
    fn test_alpha_clamped() {
        assert_eq!(Color::hsla(0.0, 0.0, 0.0, 3.0).a, 1.0);
        assert_eq!(Color::hsla(0.0, 0.0, 0.0, -1.0).a, 0.0);
    }

    #[test]
    fn test_with_alpha_and_array() {
        let color = Color::rgb(0.0, 0.0, 1.0).with_alpha(0.25);
        assert_eq!(color.to_array(), [0.0, 0.0, 1.0, 0.25]);
        assert!(approx(Color::hsl(240.0, 100.0, 50.0).with_alpha(0.25), color));
        assert_eq!(Color::WHITE.to_array(), [1.0; 4]);
    }

    #[test]
    fn test_gradient_stop_clamps() {
        assert_eq!(GradientStop::new(1.5, Color::WHITE).offset, 1.0);
        assert_eq!(GradientStop::new(-0.5, Color::WHITE).offset, 0.0);
    }

    #[test]
    fn test_brush_from() {
        let brush: Brush = Color::WHITE.into();
        assert_eq!(brush, Brush::Solid(Color::WHITE));

        let g = Gradient::Linear {
            from: Point::ZERO,
            to: Point::new(1.0, 0.0),
            stops: SmallVec::new(),
        };
        assert_eq!(g.first_color(), Color::BLACK);
    }
}

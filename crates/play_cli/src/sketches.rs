//! Built-in demo sketches

use std::convert::Infallible;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use play_core::{Color, Gaussian, IntRange, PlayResult, Point, Vector};
use play_paint::{
    AroundCircle, Horizontal, Iteration, PlayCanvas, RadialGradient, SimplePath, Star, Tiling,
};

/// Signature shared by every catalog entry
pub type SketchFn = fn(&mut PlayCanvas<'_>) -> PlayResult<()>;

/// A named sketch
#[derive(Clone, Copy)]
pub struct SketchEntry {
    pub name: &'static str,
    pub sketch: SketchFn,
}

impl fmt::Debug for SketchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SketchEntry").field("name", &self.name).finish()
    }
}

pub const SKETCHES: &[SketchEntry] = &[
    SketchEntry {
        name: "Rainbow Drips",
        sketch: rainbow_drips,
    },
    SketchEntry {
        name: "Rainbow",
        sketch: rainbow,
    },
    SketchEntry {
        name: "Star",
        sketch: star,
    },
    SketchEntry {
        name: "Chaikin Blob",
        sketch: chaikin_blob,
    },
];

/// Picks a catalog entry by position or by name
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SketchSelector {
    Index(usize),
    Name(String),
}

impl Default for SketchSelector {
    fn default() -> Self {
        SketchSelector::Index(0)
    }
}

impl FromStr for SketchSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse() {
            Ok(index) => SketchSelector::Index(index),
            Err(_) => SketchSelector::Name(s.trim().to_string()),
        })
    }
}

impl fmt::Display for SketchSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SketchSelector::Index(index) => write!(f, "#{index}"),
            SketchSelector::Name(name) => f.write_str(name),
        }
    }
}

/// Find a sketch; names match case-insensitively
pub fn find(selector: &SketchSelector) -> Option<&'static SketchEntry> {
    match selector {
        SketchSelector::Index(index) => SKETCHES.get(*index),
        SketchSelector::Name(name) => SKETCHES
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name)),
    }
}

/// File-name friendly form of a sketch name
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

// ─────────────────────────────────────────────────────────────────────────────
// Sketches
// ─────────────────────────────────────────────────────────────────────────────

fn rainbow_drips(p: &mut PlayCanvas<'_>) -> PlayResult<()> {
    let dims = p.meta();
    p.set_fill_brush(Color::WHITE);
    p.fill_rect(
        Point::new(dims.left, dims.top),
        Vector::new(dims.width(), dims.height()),
    );

    let tiling = Tiling::new(20).square().with_margin(0.1);
    p.with_random_order(&tiling, |p, (at, delta)| {
        p.do_proportion(0.7, |p| {
            p.set_stroke_colour(at.x * 100.0, 80.0, 10.0 + at.y * 50.0, 1.0);
            p.set_line_width(0.04 * (1.0 - at.x));
            p.draw_line(
                at + delta * 0.25,
                Point::new(at.x + delta.x * 0.75, at.y + delta.y * 2.5),
            );
            Ok(())
        })
    })
}

fn rainbow(p: &mut PlayCanvas<'_>) -> PlayResult<()> {
    p.for_horizontal(Horizontal::new(20).with_margin(0.1), |p, at, delta| {
        p.set_stroke_colour(at.x * 360.0, 90.0, 40.0, 1.0);
        p.draw_line(at, at + delta);
        Ok(())
    })
}

fn star(p: &mut PlayCanvas<'_>) -> PlayResult<()> {
    let dims = p.meta();
    let centre = Point::new(0.5, dims.bottom / 2.0);
    let radius = 0.4 * dims.width().min(dims.height());

    let hue = p.random() * 360.0;
    let angle = p.random() * TAU + p.t() * 0.5;
    let points = p.uniform_int(IntRange::new(5, 9))? as usize;

    p.set_fill_colour(hue, 80.0, 60.0, 1.0);
    p.set_stroke_colour(hue, 80.0, 25.0, 1.0);
    p.with_translation(centre, |p| {
        p.with_rotation(angle, |p| {
            p.draw_and_fill(&Star::new(Point::ZERO, radius, radius * 0.4, points));
            Ok(())
        })
    })
}

fn chaikin_blob(p: &mut PlayCanvas<'_>) -> PlayResult<()> {
    let dims = p.meta();
    let centre = Point::new(0.5, dims.bottom / 2.0);
    let radius = 0.3 * dims.width().min(dims.height());
    let n = p.uniform_int(IntRange::new(6, 12))? as usize;

    let mut corners = Vec::with_capacity(n);
    for (at, _) in AroundCircle::new(centre, radius, n).items(&dims) {
        let stretch = 1.0 + 0.2 * p.gaussian(Gaussian::default()).clamp(-2.0, 2.0);
        corners.push(centre + (at - centre) * stretch);
    }
    let blob = SimplePath::from_points(corners)?.close().chaikin(4);

    let hue = p.random() * 360.0;
    let gradient = RadialGradient::centred(centre, radius * 1.4)
        .stop(0.0, Color::hsl(hue, 90.0, 75.0))
        .stop(1.0, Color::hsl(hue + 40.0, 70.0, 35.0));
    p.set_fill_gradient(&gradient);
    p.set_stroke_brush(Color::hsl(hue, 60.0, 20.0).with_alpha(0.8));
    p.draw_and_fill(&blob);
    Ok(())
}

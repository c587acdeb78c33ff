//! Play canvas - the drawing surface handed to sketches
//!
//! `PlayCanvas` wraps a borrowed [`DrawContext`] and installs a unit-square
//! coordinate system: one unit is the full surface width, so the drawable
//! region is `[0, 1] × [0, 1 / aspect_ratio]` whatever the pixel size.
//!
//! A canvas is built fresh for every frame. It owns the frame's [`Rng`], so
//! everything a sketch randomises is reproducible from the seed.
//!
//! # Example
//!
//! ```rust
//! use play_core::{PlayResult, Point, RecordingContext, Size};
//! use play_paint::{PlayCanvas, Star};
//!
//! fn sketch(p: &mut PlayCanvas<'_>) -> PlayResult<()> {
//!     let angle = p.random() * 0.5;
//!     p.with_rotation(angle, |p| {
//!         p.set_fill_colour(200.0, 80.0, 50.0, 1.0);
//!         p.fill(&Star::new(Point::new(0.5, 0.5), 0.25, 0.1, 5));
//!         Ok(())
//!     })
//! }
//!
//! let mut ctx = RecordingContext::new(Size::new(200.0, 200.0));
//! let mut canvas = PlayCanvas::new(&mut ctx, Size::new(200.0, 200.0), Some(42)).unwrap();
//! sketch(&mut canvas).unwrap();
//! ```

use play_core::{
    check_size, Brush, Color, DrawContext, DrawContextExt, Gaussian, IntRange, LineCap,
    PlayError, PlayResult, Point, Rng, Size, TextAlign, TextBaseline, TextStyle, Vector,
};

use crate::gradient::Gradientable;
use crate::iteration::{AroundCircle, Dimensions, Horizontal, Iteration, Range, Tiling, Vertical};
use crate::trace::Traceable;

// ─────────────────────────────────────────────────────────────────────────────
// Text Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// How large to draw text
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextSize {
    /// Font size in unit-square units
    Fixed(f64),
    /// Scale the font so the text spans this width
    FitWidth(f64),
}

/// Whether text is filled or outlined
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextMode {
    #[default]
    Fill,
    Stroke,
}

/// Placement and styling for [`PlayCanvas::text`]
#[derive(Clone, Debug, PartialEq)]
pub struct TextConfig {
    pub at: Point,
    pub size: TextSize,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub mode: TextMode,
    pub family: String,
}

impl TextConfig {
    pub fn new(at: Point, size: TextSize) -> Self {
        Self {
            at,
            size,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            mode: TextMode::Fill,
            family: "sans-serif".to_string(),
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    pub fn stroked(mut self) -> Self {
        self.mode = TextMode::Stroke;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PlayCanvas
// ─────────────────────────────────────────────────────────────────────────────

/// Drawing surface for one sketch invocation
pub struct PlayCanvas<'a> {
    ctx: &'a mut dyn DrawContext,
    aspect_ratio: f64,
    original_scale: f64,
    rng: Rng,
    t: f64,
}

/// Restores the context state when dropped, including while unwinding
struct Restore<'c, 'a> {
    canvas: &'c mut PlayCanvas<'a>,
}

impl<'c, 'a> Restore<'c, 'a> {
    fn save(canvas: &'c mut PlayCanvas<'a>) -> Self {
        canvas.ctx.save();
        Self { canvas }
    }
}

impl Drop for Restore<'_, '_> {
    fn drop(&mut self) {
        self.canvas.ctx.restore();
    }
}

impl<'a> PlayCanvas<'a> {
    /// Set up the unit-square coordinate system on `ctx`
    ///
    /// With no seed the generator is seeded from entropy; the chosen seed is
    /// still available through [`PlayCanvas::seed`].
    pub fn new(ctx: &'a mut dyn DrawContext, size: Size, seed: Option<u64>) -> PlayResult<Self> {
        let Size { width, height } = check_size(size)?;

        ctx.reset_transform();
        ctx.scale(width, width);
        ctx.set_line_width(0.01);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_stroke_style(Color::BLACK.into());
        ctx.set_fill_style(Color::GRAY.into());

        let rng = seed.map_or_else(Rng::from_entropy, Rng::new);
        tracing::debug!(width, height, seed = rng.seed(), "canvas ready");

        Ok(Self {
            ctx,
            aspect_ratio: width / height,
            original_scale: width,
            rng,
            t: 0.0,
        })
    }

    /// Attach the elapsed animation time in seconds
    pub fn with_time(mut self, t: f64) -> Self {
        self.t = t;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn meta(&self) -> Dimensions {
        Dimensions::for_aspect_ratio(self.aspect_ratio)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Pixels per unit
    pub fn original_scale(&self) -> f64 {
        self.original_scale
    }

    /// Elapsed animation time in seconds
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Whether `point` lies inside the drawable region
    pub fn in_drawing(&self, point: Point) -> bool {
        self.meta().contains(point)
    }

    /// Direct access to the underlying context
    pub fn context(&mut self) -> &mut dyn DrawContext {
        &mut *self.ctx
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Style
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap);
    }

    /// Fill colour from CSS-style HSLA components
    pub fn set_fill_colour(&mut self, h: f64, s: f64, l: f64, a: f64) {
        self.ctx.set_fill_style(Color::hsla(h, s, l, a).into());
    }

    /// Stroke colour from CSS-style HSLA components
    pub fn set_stroke_colour(&mut self, h: f64, s: f64, l: f64, a: f64) {
        self.ctx.set_stroke_style(Color::hsla(h, s, l, a).into());
    }

    pub fn set_fill_gradient(&mut self, gradient: &impl Gradientable) {
        let brush = gradient.gradient(&mut *self.ctx);
        self.ctx.set_fill_style(brush);
    }

    pub fn set_stroke_gradient(&mut self, gradient: &impl Gradientable) {
        let brush = gradient.gradient(&mut *self.ctx);
        self.ctx.set_stroke_style(brush);
    }

    pub fn set_fill_brush(&mut self, brush: impl Into<Brush>) {
        self.ctx.set_fill_style(brush.into());
    }

    pub fn set_stroke_brush(&mut self, brush: impl Into<Brush>) {
        self.ctx.set_stroke_style(brush.into());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    pub fn draw_line(&mut self, from: Point, to: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(from);
        self.ctx.line_to(to);
        self.ctx.stroke();
    }

    /// Stroke an open polyline
    pub fn draw_lines(&mut self, points: &[Point]) -> PlayResult<()> {
        let (first, rest) = points.split_first().ok_or(PlayError::EmptyPoints)?;
        self.ctx.begin_path();
        self.ctx.move_to(*first);
        for point in rest {
            self.ctx.line_to(*point);
        }
        self.ctx.stroke();
        Ok(())
    }

    /// Stroke a closed polygon
    pub fn draw_poly(&mut self, points: &[Point]) -> PlayResult<()> {
        let (first, rest) = points.split_first().ok_or(PlayError::EmptyPoints)?;
        self.ctx.begin_path();
        self.ctx.move_to(*first);
        for point in rest {
            self.ctx.line_to(*point);
        }
        self.ctx.line_to(*first);
        self.ctx.close_path();
        self.ctx.stroke();
        Ok(())
    }

    /// Fill an axis-aligned rectangle with the fill style
    pub fn fill_rect(&mut self, at: Point, size: Vector) {
        self.ctx.fill_rect(at, size.x, size.y);
    }

    /// Stroke a shape's outline
    pub fn draw<T: Traceable + ?Sized>(&mut self, shape: &T) {
        self.ctx.begin_path();
        shape.trace_in(&mut *self.ctx);
        self.ctx.stroke();
    }

    /// Fill a shape
    pub fn fill<T: Traceable + ?Sized>(&mut self, shape: &T) {
        self.ctx.begin_path();
        shape.trace_in(&mut *self.ctx);
        self.ctx.fill();
    }

    /// Fill a shape, then stroke its outline on top
    pub fn draw_and_fill<T: Traceable + ?Sized>(&mut self, shape: &T) {
        self.ctx.begin_path();
        shape.trace_in(&mut *self.ctx);
        self.ctx.fill();
        self.ctx.stroke();
    }

    /// Draw text using the current fill or stroke style
    ///
    /// With [`TextSize::FitWidth`] the text is measured at size 1 and scaled
    /// so its advance equals the requested width. Text that measures zero
    /// wide draws nothing.
    pub fn text(&mut self, config: &TextConfig, text: &str) {
        let style = TextStyle::new(1.0)
            .with_align(config.align)
            .with_baseline(config.baseline)
            .with_family(config.family.clone());

        let size = match config.size {
            TextSize::Fixed(size) => size,
            TextSize::FitWidth(width) => {
                let measured = self.ctx.measure_text(text, &style);
                if measured <= 0.0 {
                    return;
                }
                width / measured
            }
        };
        let style = TextStyle { size, ..style };

        match config.mode {
            TextMode::Fill => self.ctx.fill_text(text, config.at, &style),
            TextMode::Stroke => self.ctx.stroke_text(text, config.at, &style),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scoped Transforms
    // ─────────────────────────────────────────────────────────────────────────

    /// Save state, apply `setup`, run `f`, restore on every exit path
    fn scoped<R>(
        &mut self,
        setup: impl FnOnce(&mut dyn DrawContext),
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let mut guard = Restore::save(self);
        setup(&mut *guard.canvas.ctx);
        f(&mut *guard.canvas)
    }

    pub fn with_translation<R>(&mut self, offset: Vector, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(|ctx| ctx.translate(offset.x, offset.y), f)
    }

    /// Rotate by `angle` radians around the origin
    pub fn with_rotation<R>(&mut self, angle: f64, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(|ctx| ctx.rotate(angle), f)
    }

    pub fn with_scale<R>(&mut self, scale: Vector, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(|ctx| ctx.scale(scale.x, scale.y), f)
    }

    /// Restrict drawing inside `f` to the interior of `shape`
    pub fn with_clipping<T, R>(&mut self, shape: &T, f: impl FnOnce(&mut Self) -> R) -> R
    where
        T: Traceable + ?Sized,
    {
        self.scoped(
            |ctx| {
                ctx.begin_path();
                shape.trace_in(ctx);
                ctx.clip();
            },
            f,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Iteration
    // ─────────────────────────────────────────────────────────────────────────

    /// Visit every item of `iteration` in order
    pub fn each<I, F>(&mut self, iteration: &I, mut f: F) -> PlayResult<()>
    where
        I: Iteration,
        F: FnMut(&mut Self, I::Item) -> PlayResult<()>,
    {
        for item in iteration.items(&self.meta()) {
            f(self, item)?;
        }
        Ok(())
    }

    /// Collect mapped items without drawing
    pub fn build<I, T, F>(&self, iteration: &I, mapper: F) -> Vec<T>
    where
        I: Iteration,
        F: FnMut(I::Item) -> T,
    {
        iteration.items(&self.meta()).into_iter().map(mapper).collect()
    }

    /// Visit every item in an order shuffled by the canvas generator
    pub fn with_random_order<I, F>(&mut self, iteration: &I, mut f: F) -> PlayResult<()>
    where
        I: Iteration,
        F: FnMut(&mut Self, I::Item) -> PlayResult<()>,
    {
        let mut items = iteration.items(&self.meta());
        self.rng.shuffle(&mut items);
        for item in items {
            f(self, item)?;
        }
        Ok(())
    }

    pub fn for_tiling<F>(&mut self, tiling: Tiling, mut f: F) -> PlayResult<()>
    where
        F: FnMut(&mut Self, Point, Vector) -> PlayResult<()>,
    {
        self.each(&tiling, |p, (at, delta)| f(p, at, delta))
    }

    pub fn for_horizontal<F>(&mut self, bands: Horizontal, mut f: F) -> PlayResult<()>
    where
        F: FnMut(&mut Self, Point, Vector) -> PlayResult<()>,
    {
        self.each(&bands, |p, (at, delta)| f(p, at, delta))
    }

    pub fn for_vertical<F>(&mut self, bands: Vertical, mut f: F) -> PlayResult<()>
    where
        F: FnMut(&mut Self, Point, Vector) -> PlayResult<()>,
    {
        self.each(&bands, |p, (at, delta)| f(p, at, delta))
    }

    pub fn around_circle<F>(&mut self, circle: AroundCircle, mut f: F) -> PlayResult<()>
    where
        F: FnMut(&mut Self, Point, usize) -> PlayResult<()>,
    {
        self.each(&circle, |p, (at, i)| f(p, at, i))
    }

    pub fn range<F>(&mut self, range: Range, f: F) -> PlayResult<()>
    where
        F: FnMut(&mut Self, f64) -> PlayResult<()>,
    {
        self.each(&range, f)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Randomness
    // ─────────────────────────────────────────────────────────────────────────

    pub fn rng(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// Uniform draw in `[0, 1)`
    pub fn random(&mut self) -> f64 {
        self.rng.uniform()
    }

    pub fn uniform_int(&mut self, range: IntRange) -> PlayResult<i64> {
        self.rng.uniform_int(range)
    }

    pub fn polarity(&mut self) -> f64 {
        self.rng.polarity()
    }

    pub fn sample<'i, T>(&mut self, items: &'i [T]) -> PlayResult<&'i T> {
        self.rng.sample(items)
    }

    pub fn samples<'i, T>(&mut self, n: usize, items: &'i [T]) -> PlayResult<Vec<&'i T>> {
        self.rng.samples(n, items)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        self.rng.shuffle(items);
    }

    pub fn gaussian(&mut self, params: Gaussian) -> f64 {
        self.rng.gaussian(params)
    }

    pub fn poisson(&mut self, lambda: f64) -> PlayResult<u64> {
        self.rng.poisson(lambda)
    }

    pub fn proportionately<'i, T>(&mut self, cases: &'i [(f64, T)]) -> PlayResult<&'i T> {
        self.rng.proportionately(cases)
    }

    /// Run `f` with probability `p`
    pub fn do_proportion<F>(&mut self, p: f64, f: F) -> PlayResult<()>
    where
        F: FnOnce(&mut Self) -> PlayResult<()>,
    {
        if self.rng.chance(p) {
            f(self)
        } else {
            Ok(())
        }
    }
}

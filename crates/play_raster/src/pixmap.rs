//! CPU draw context backed by a tiny-skia pixmap
//!
//! Follows canvas semantics: path points are mapped through the transform
//! current when they are added, while stroke width and gradients use the
//! transform current when the path is painted. Clipping intersects a mask
//! that is saved and restored with the rest of the state.
//!
//! Text is not rasterized. Text calls are logged and skipped.

use std::path::Path as FsPath;

use tiny_skia::{
    BlendMode, FillRule, LinearGradient, Mask, Paint, PathBuilder, Pixmap, RadialGradient,
    Shader, SpreadMode, Stroke, Transform,
};
use tracing::{debug, warn};

use play_core::{
    check_size, Affine2D, Brush, Color, DrawContext, Gradient, LineCap, PlayError, PlayResult,
    Point, Size, TextStyle,
};

use crate::error::{RasterError, RasterResult};

// ─────────────────────────────────────────────────────────────────────────────
// State
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
struct RasterState {
    transform: Affine2D,
    stroke_style: Brush,
    fill_style: Brush,
    line_width: f64,
    line_cap: LineCap,
    clip: Option<Mask>,
}

impl Default for RasterState {
    fn default() -> Self {
        Self {
            transform: Affine2D::IDENTITY,
            stroke_style: Brush::default(),
            fill_style: Brush::default(),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            clip: None,
        }
    }
}

/// Path segment in device space
#[derive(Clone, Copy, Debug, PartialEq)]
enum Segment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pixmap Context
// ─────────────────────────────────────────────────────────────────────────────

/// Draw context that renders into an RGBA pixmap
pub struct PixmapContext {
    pixmap: Pixmap,
    state: RasterState,
    stack: Vec<RasterState>,
    segments: Vec<Segment>,
    /// Start of the open subpath and the pen position, in device space
    subpath_start: Option<Point>,
    current: Option<Point>,
    warned_text: bool,
}

impl PixmapContext {
    /// Create a transparent context of the given pixel size
    pub fn new(width: u32, height: u32) -> RasterResult<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RasterError::Pixmap(format!("failed to allocate {width}x{height}")))?;

        Ok(Self {
            pixmap,
            state: RasterState::default(),
            stack: Vec::new(),
            segments: Vec::new(),
            subpath_start: None,
            current: None,
            warned_text: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Premultiplied RGBA of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap
            .pixel(x, y)
            .map(|c| [c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Flood the whole pixmap, ignoring transform and clip
    pub fn fill_background(&mut self, color: Color) {
        self.pixmap.fill(skia_color(color));
    }

    /// Encode the current pixels as PNG
    pub fn encode_png(&self) -> RasterResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RasterError::Encode(e.to_string()))
    }

    /// Encode as PNG and write to `path`
    pub fn save_png(&self, path: impl AsRef<FsPath>) -> RasterResult<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path.as_ref(), bytes)?;
        debug!(path = %path.as_ref().display(), "wrote png");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Path helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn device_point(&self, point: Point) -> Point {
        self.state.transform.transform_point(point)
    }

    /// Start a subpath at `point` unless one is already open
    fn ensure_subpath(&mut self, point: Point) {
        if self.current.is_none() {
            self.segments.push(Segment::MoveTo(point));
            self.subpath_start = Some(point);
            self.current = Some(point);
        }
    }

    fn device_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
                Segment::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
                Segment::QuadTo(c, p) => {
                    builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32)
                }
                Segment::CubicTo(c1, c2, p) => builder.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                ),
                Segment::Close => builder.close(),
            }
        }
        builder.finish()
    }

    /// The current path mapped back into user space, with the transform that
    /// takes it to the device
    fn user_path(&self) -> Option<(tiny_skia::Path, Transform)> {
        let transform = skia_transform(&self.state.transform);
        let inverse = transform.invert()?;
        let path = self.device_path()?.transform(inverse)?;
        Some((path, transform))
    }

    fn paint(brush: &Brush) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.shader = shader(brush);
        paint.anti_alias = true;
        paint
    }

    fn warn_text(&mut self, text: &str) {
        if !self.warned_text {
            warn!("text rendering is not supported by the pixmap backend; skipping");
            self.warned_text = true;
        }
        debug!(text, "skipped text");
    }
}

impl DrawContext for PixmapContext {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width() as f64, self.pixmap.height() as f64)
    }

    fn resize(&mut self, size: Size) -> PlayResult<()> {
        let size = check_size(size)?;
        let (width, height) = (size.width.round(), size.height.round());
        if width < 1.0 || height < 1.0 || width > u32::MAX as f64 || height > u32::MAX as f64 {
            return Err(PlayError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        self.pixmap = Pixmap::new(width as u32, height as u32).ok_or(
            PlayError::InvalidDimensions {
                width: size.width,
                height: size.height,
            },
        )?;
        self.state = RasterState::default();
        self.stack.clear();
        self.begin_path();
        debug!(width, height, "resized pixmap context");
        Ok(())
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn reset_transform(&mut self) {
        self.state.transform = Affine2D::IDENTITY;
    }

    fn transform(&mut self, transform: Affine2D) {
        self.state.transform = self.state.transform.then(&transform);
    }

    fn current_transform(&self) -> Affine2D {
        self.state.transform
    }

    fn set_stroke_style(&mut self, brush: Brush) {
        self.state.stroke_style = brush;
    }

    fn set_fill_style(&mut self, brush: Brush) {
        self.state.fill_style = brush;
    }

    fn set_line_width(&mut self, width: f64) {
        // Canvas ignores widths that are not finite and positive
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn begin_path(&mut self) {
        self.segments.clear();
        self.subpath_start = None;
        self.current = None;
    }

    fn move_to(&mut self, point: Point) {
        let point = self.device_point(point);
        self.segments.push(Segment::MoveTo(point));
        self.subpath_start = Some(point);
        self.current = Some(point);
    }

    fn line_to(&mut self, point: Point) {
        let point = self.device_point(point);
        if self.current.is_none() {
            self.ensure_subpath(point);
            return;
        }
        self.segments.push(Segment::LineTo(point));
        self.current = Some(point);
    }

    fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        let (control, to) = (self.device_point(control), self.device_point(to));
        self.ensure_subpath(control);
        self.segments.push(Segment::QuadTo(control, to));
        self.current = Some(to);
    }

    fn bezier_curve_to(&mut self, control1: Point, control2: Point, to: Point) {
        let control1 = self.device_point(control1);
        let control2 = self.device_point(control2);
        let to = self.device_point(to);
        self.ensure_subpath(control1);
        self.segments.push(Segment::CubicTo(control1, control2, to));
        self.current = Some(to);
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.segments.push(Segment::Close);
            self.current = self.subpath_start;
        }
    }

    fn stroke(&mut self) {
        let Some((path, transform)) = self.user_path() else {
            return;
        };
        let paint = Self::paint(&self.state.stroke_style);
        let stroke = Stroke {
            width: self.state.line_width as f32,
            line_cap: skia_line_cap(self.state.line_cap),
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, transform, self.state.clip.as_ref());
    }

    fn fill(&mut self) {
        let Some((path, transform)) = self.user_path() else {
            return;
        };
        let paint = Self::paint(&self.state.fill_style);
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            transform,
            self.state.clip.as_ref(),
        );
    }

    fn clip(&mut self) {
        let Some(path) = self.device_path() else {
            return;
        };
        match self.state.clip.as_mut() {
            Some(mask) => mask.intersect_path(&path, FillRule::Winding, true, Transform::identity()),
            None => {
                let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
                    return;
                };
                mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
                self.state.clip = Some(mask);
            }
        }
    }

    fn fill_rect(&mut self, at: Point, width: f64, height: f64) {
        let Some(rect) = skia_rect(at, width, height) else {
            return;
        };
        let paint = Self::paint(&self.state.fill_style);
        self.pixmap.fill_rect(
            rect,
            &paint,
            skia_transform(&self.state.transform),
            self.state.clip.as_ref(),
        );
    }

    fn clear_rect(&mut self, at: Point, width: f64, height: f64) {
        let Some(rect) = skia_rect(at, width, height) else {
            return;
        };
        let mut paint = Self::paint(&Brush::Solid(Color::TRANSPARENT));
        paint.blend_mode = BlendMode::Clear;
        self.pixmap.fill_rect(
            rect,
            &paint,
            skia_transform(&self.state.transform),
            self.state.clip.as_ref(),
        );
    }

    fn fill_text(&mut self, text: &str, _at: Point, _style: &TextStyle) {
        self.warn_text(text);
    }

    fn stroke_text(&mut self, text: &str, _at: Point, _style: &TextStyle) {
        self.warn_text(text);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

fn skia_transform(transform: &Affine2D) -> Transform {
    let [a, b, c, d, tx, ty] = transform.elements;
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, tx as f32, ty as f32)
}

fn skia_point(point: Point) -> tiny_skia::Point {
    tiny_skia::Point::from_xy(point.x as f32, point.y as f32)
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_array().map(|channel| channel.clamp(0.0, 1.0));
    tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(tiny_skia::Color::BLACK)
}

fn skia_line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

/// Rect with negative extents flipped, as canvas does
fn skia_rect(at: Point, width: f64, height: f64) -> Option<tiny_skia::Rect> {
    let x = at.x.min(at.x + width);
    let y = at.y.min(at.y + height);
    tiny_skia::Rect::from_xywh(x as f32, y as f32, width.abs() as f32, height.abs() as f32)
}

fn shader(brush: &Brush) -> Shader<'static> {
    match brush {
        Brush::Solid(color) => Shader::SolidColor(skia_color(*color)),
        Brush::Gradient(gradient) => gradient_shader(gradient)
            .unwrap_or_else(|| Shader::SolidColor(skia_color(gradient.first_color()))),
    }
}

/// Gradient coordinates are in user space; the paint transform maps them
///
/// tiny-skia's radial gradient is a focal gradient with a single radius, so
/// the start radius of a two-circle gradient is dropped.
fn gradient_shader(gradient: &Gradient) -> Option<Shader<'static>> {
    let mut stops = gradient.stops().to_vec();
    stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    let stops = stops
        .iter()
        .map(|s| tiny_skia::GradientStop::new(s.offset as f32, skia_color(s.color)))
        .collect();

    match gradient {
        Gradient::Linear { from, to, .. } => LinearGradient::new(
            skia_point(*from),
            skia_point(*to),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ),
        Gradient::Radial {
            start,
            end,
            end_radius,
            ..
        } => RadialGradient::new(
            skia_point(*start),
            skia_point(*end),
            *end_radius as f32,
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::{DrawContextExt, GradientStop};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn context() -> PixmapContext {
        PixmapContext::new(10, 10).unwrap()
    }

    fn red_fill(ctx: &mut PixmapContext) {
        ctx.set_fill_style(Brush::Solid(Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            PixmapContext::new(0, 10),
            Err(RasterError::InvalidDimensions { width: 0, height: 10 })
        ));
        let ctx = context();
        assert_eq!(ctx.size(), Size::new(10.0, 10.0));
        assert_eq!(ctx.pixel(5, 5), Some(CLEAR));
    }

    #[test]
    fn test_fill_rect() {
        let mut ctx = context();
        red_fill(&mut ctx);
        ctx.fill_rect(Point::ZERO, 10.0, 10.0);

        assert_eq!(ctx.pixel(0, 0), Some(RED));
        assert_eq!(ctx.pixel(9, 9), Some(RED));
    }

    #[test]
    fn test_into_pixmap_keeps_pixels() {
        let mut ctx = context();
        ctx.set_fill_style(Brush::Solid(Color::rgb(1.0, 0.0, 0.0).with_alpha(0.5)));
        ctx.fill_rect(Point::ZERO, 10.0, 10.0);
        let expected = ctx.pixel(3, 3);

        let pixmap = ctx.into_pixmap();
        assert_eq!((pixmap.width(), pixmap.height()), (10, 10));
        let pixel = pixmap.pixel(3, 3).unwrap();
        assert_eq!(Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]), expected);
        assert!(pixel.alpha() > 0 && pixel.alpha() < 255);
    }

    #[test]
    fn test_fill_rect_uses_transform() {
        let mut ctx = context();
        red_fill(&mut ctx);
        ctx.scale(10.0, 10.0);
        ctx.fill_rect(Point::ZERO, 0.5, 1.0);

        assert_eq!(ctx.pixel(2, 5), Some(RED));
        assert_eq!(ctx.pixel(7, 5), Some(CLEAR));
    }

    #[test]
    fn test_fill_path() {
        let mut ctx = context();
        red_fill(&mut ctx);
        ctx.begin_path();
        ctx.move_to(Point::ZERO);
        ctx.line_to(Point::new(10.0, 0.0));
        ctx.line_to(Point::new(10.0, 5.0));
        ctx.line_to(Point::new(0.0, 5.0));
        ctx.close_path();
        ctx.fill();

        assert_eq!(ctx.pixel(5, 2), Some(RED));
        assert_eq!(ctx.pixel(5, 8), Some(CLEAR));
    }

    #[test]
    fn test_stroke_line() {
        let mut ctx = context();
        ctx.set_stroke_style(Brush::Solid(Color::rgb(1.0, 0.0, 0.0)));
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(Point::new(0.0, 5.0));
        ctx.line_to(Point::new(10.0, 5.0));
        ctx.stroke();

        assert_eq!(ctx.pixel(5, 4), Some(RED));
        assert_eq!(ctx.pixel(5, 0), Some(CLEAR));
    }

    #[test]
    fn test_stroke_width_follows_transform() {
        let mut ctx = context();
        ctx.set_stroke_style(Brush::Solid(Color::rgb(1.0, 0.0, 0.0)));
        ctx.scale(10.0, 10.0);
        ctx.set_line_width(0.4);
        ctx.begin_path();
        ctx.move_to(Point::new(0.0, 0.5));
        ctx.line_to(Point::new(1.0, 0.5));
        ctx.stroke();

        // Four pixels wide around y = 5
        assert_eq!(ctx.pixel(5, 3), Some(RED));
        assert_eq!(ctx.pixel(5, 6), Some(RED));
        assert_eq!(ctx.pixel(5, 1), Some(CLEAR));
    }

    #[test]
    fn test_invalid_line_width_ignored() {
        let mut ctx = context();
        ctx.set_line_width(3.0);
        ctx.set_line_width(0.0);
        ctx.set_line_width(f64::NAN);
        assert_eq!(ctx.state.line_width, 3.0);
    }

    #[test]
    fn test_clip_restored() {
        let mut ctx = context();
        red_fill(&mut ctx);

        ctx.save();
        ctx.begin_path();
        ctx.move_to(Point::ZERO);
        ctx.line_to(Point::new(5.0, 0.0));
        ctx.line_to(Point::new(5.0, 10.0));
        ctx.line_to(Point::new(0.0, 10.0));
        ctx.close_path();
        ctx.clip();
        ctx.fill_rect(Point::ZERO, 10.0, 10.0);

        assert_eq!(ctx.pixel(2, 5), Some(RED));
        assert_eq!(ctx.pixel(7, 5), Some(CLEAR));

        ctx.restore();
        ctx.fill_rect(Point::ZERO, 10.0, 10.0);
        assert_eq!(ctx.pixel(7, 5), Some(RED));
    }

    #[test]
    fn test_clear_rect() {
        let mut ctx = context();
        red_fill(&mut ctx);
        ctx.fill_rect(Point::ZERO, 10.0, 10.0);
        ctx.clear_rect(Point::new(10.0, 10.0), -5.0, -5.0);

        assert_eq!(ctx.pixel(2, 2), Some(RED));
        assert_eq!(ctx.pixel(7, 7), Some(CLEAR));
    }

    #[test]
    fn test_linear_gradient() {
        let mut ctx = context();
        let stops = [
            GradientStop::new(1.0, Color::WHITE),
            GradientStop::new(0.0, Color::BLACK),
        ];
        let brush = ctx.create_linear_gradient(Point::ZERO, Point::new(10.0, 0.0), &stops);
        ctx.set_fill_style(brush);
        ctx.fill_rect(Point::ZERO, 10.0, 10.0);

        let left = ctx.pixel(0, 5).unwrap();
        let right = ctx.pixel(9, 5).unwrap();
        assert_eq!(left[3], 255);
        assert!(left[0] < right[0]);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut ctx = context();
        red_fill(&mut ctx);
        ctx.fill_rect(Point::ZERO, 10.0, 10.0);
        ctx.translate(3.0, 3.0);
        ctx.save();

        ctx.resize(Size::new(20.0, 4.0)).unwrap();
        assert_eq!((ctx.width(), ctx.height()), (20, 4));
        assert_eq!(ctx.pixel(1, 1), Some(CLEAR));
        assert!(ctx.current_transform().is_identity());
        assert!(ctx.stack.is_empty());

        assert!(ctx.resize(Size::new(0.0, 4.0)).is_err());
        assert!(ctx.resize(Size::new(0.2, 4.0)).is_err());
    }

    #[test]
    fn test_text_is_skipped() {
        let mut ctx = context();
        ctx.fill_text("hello", Point::new(1.0, 5.0), &TextStyle::new(8.0));
        ctx.stroke_text("hello", Point::new(1.0, 5.0), &TextStyle::new(8.0));

        assert!(ctx.warned_text);
        assert!(ctx.pixmap().data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_line_to_without_move_starts_subpath() {
        let mut ctx = context();
        ctx.begin_path();
        ctx.line_to(Point::new(1.0, 1.0));
        assert_eq!(ctx.segments, vec![Segment::MoveTo(Point::new(1.0, 1.0))]);

        ctx.close_path();
        ctx.line_to(Point::new(2.0, 2.0));
        assert_eq!(ctx.current, Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_encode_png() {
        let mut ctx = context();
        ctx.fill_background(Color::WHITE);
        assert_eq!(ctx.pixel(3, 3), Some([255, 255, 255, 255]));

        let png = ctx.encode_png().unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }
}

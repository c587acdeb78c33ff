//! Draw Context - Immediate-Mode Canvas API
//!
//! The `DrawContext` trait is the single seam between sketches and whatever
//! turns geometry into pixels. It follows the 2D canvas model: a current
//! transform and style live in a save/restore stack, paths are built with
//! `move_to`/`line_to`/curve calls and then stroked, filled or used as a clip.
//!
//! Implementations:
//!
//! - [`RecordingContext`] logs every call as a [`DrawCommand`] (tests, replay)
//! - `play_raster::PixmapContext` rasterizes onto a CPU pixmap
//!
//! # Example
//!
//! ```rust
//! use play_core::{Color, DrawContext, DrawContextExt, Point, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
//! ctx.save();
//! ctx.scale(800.0, 800.0);
//! ctx.set_stroke_style(Color::BLACK.into());
//! ctx.begin_path();
//! ctx.move_to(Point::new(0.1, 0.1));
//! ctx.line_to(Point::new(0.9, 0.6));
//! ctx.stroke();
//! ctx.restore();
//!
//! assert_eq!(ctx.depth(), 0);
//! ```

use crate::color::{Brush, Color, Gradient, GradientStop};
use crate::error::{PlayError, PlayResult};
use crate::geometry::{Affine2D, Point, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Stroke and Text Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Text alignment relative to the anchor point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text baseline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Text style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font family name
    pub family: String,
    /// Font size in user units
    pub size: f64,
    /// Text alignment
    pub align: TextAlign,
    /// Text baseline
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 0.05,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

impl TextStyle {
    /// Create a new text style with the given size
    pub fn new(size: f64) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Set alignment
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Set baseline
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Set font family
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DrawContext Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Immediate-mode 2D drawing context
///
/// All coordinates are in user space, i.e. transformed by the current
/// transform. Lengths such as the line width are scaled by it too.
pub trait DrawContext {
    // ─────────────────────────────────────────────────────────────────────────
    // Surface
    // ─────────────────────────────────────────────────────────────────────────

    /// Size of the backing surface in device pixels
    fn size(&self) -> Size;

    /// Reallocate the backing surface
    ///
    /// Drawing state is reset; previous content is discarded.
    fn resize(&mut self, size: Size) -> PlayResult<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // State Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Push the transform, styles and clip onto the state stack
    fn save(&mut self);

    /// Pop the state stack; a restore without a matching save is ignored
    fn restore(&mut self);

    /// Set the current transform back to identity
    fn reset_transform(&mut self);

    /// Multiply the current transform by `transform`
    ///
    /// `transform` applies to user coordinates before the existing transform.
    fn transform(&mut self, transform: Affine2D);

    /// Get the current transform
    fn current_transform(&self) -> Affine2D;

    // ─────────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────────

    fn set_stroke_style(&mut self, brush: Brush);

    fn set_fill_style(&mut self, brush: Brush);

    fn set_line_width(&mut self, width: f64);

    fn set_line_cap(&mut self, cap: LineCap);

    // ─────────────────────────────────────────────────────────────────────────
    // Paths
    // ─────────────────────────────────────────────────────────────────────────

    /// Discard the current path and start a new one
    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    fn quadratic_curve_to(&mut self, control: Point, to: Point);

    fn bezier_curve_to(&mut self, control1: Point, control2: Point, to: Point);

    fn close_path(&mut self);

    /// Stroke the current path with the stroke style
    fn stroke(&mut self);

    /// Fill the current path (non-zero winding) with the fill style
    fn fill(&mut self);

    /// Intersect the clip region with the current path
    fn clip(&mut self);

    // ─────────────────────────────────────────────────────────────────────────
    // Immediate Primitives
    // ─────────────────────────────────────────────────────────────────────────

    /// Fill a rectangle with the fill style without touching the current path
    fn fill_rect(&mut self, at: Point, width: f64, height: f64);

    /// Clear a rectangle to transparent
    fn clear_rect(&mut self, at: Point, width: f64, height: f64);

    /// Fill text with the fill style
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Stroke text outlines with the stroke style
    fn stroke_text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Advance width of `text` in user units
    ///
    /// Contexts without font metrics use a fixed per-character estimate.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        0.6 * style.size * text.chars().count() as f64
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Paint Servers
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a linear gradient brush bound to this context
    fn create_linear_gradient(&mut self, from: Point, to: Point, stops: &[GradientStop]) -> Brush {
        Brush::Gradient(Gradient::Linear {
            from,
            to,
            stops: stops.iter().copied().collect(),
        })
    }

    /// Create a two-circle radial gradient brush bound to this context
    fn create_radial_gradient(
        &mut self,
        start: Point,
        start_radius: f64,
        end: Point,
        end_radius: f64,
        stops: &[GradientStop],
    ) -> Brush {
        Brush::Gradient(Gradient::Radial {
            start,
            start_radius,
            end,
            end_radius,
            stops: stops.iter().copied().collect(),
        })
    }
}

/// Convenience transforms for every DrawContext
pub trait DrawContextExt: DrawContext {
    fn translate(&mut self, x: f64, y: f64) {
        self.transform(Affine2D::translation(x, y));
    }

    /// Rotate by `angle` radians around the user-space origin
    fn rotate(&mut self, angle: f64) {
        self.transform(Affine2D::rotation(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform(Affine2D::scale(sx, sy));
    }
}

// Blanket implementation for all DrawContext implementers
impl<T: DrawContext + ?Sized> DrawContextExt for T {}

/// Validate dimensions for a drawable surface
pub fn check_size(size: Size) -> PlayResult<Size> {
    if size.is_drawable() {
        Ok(size)
    } else {
        Err(PlayError::InvalidDimensions {
            width: size.width,
            height: size.height,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw call that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    Save,
    Restore,
    ResetTransform,
    Transform(Affine2D),
    SetStrokeStyle(Brush),
    SetFillStyle(Brush),
    SetLineWidth(f64),
    SetLineCap(LineCap),

    // Path
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadraticCurveTo {
        control: Point,
        to: Point,
    },
    BezierCurveTo {
        control1: Point,
        control2: Point,
        to: Point,
    },
    ClosePath,
    Stroke,
    Fill,
    Clip,

    // Immediate
    FillRect {
        at: Point,
        width: f64,
        height: f64,
    },
    ClearRect {
        at: Point,
        width: f64,
        height: f64,
    },
    FillText {
        text: String,
        at: Point,
        style: TextStyle,
    },
    StrokeText {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// Graphics state tracked by the recording context
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub transform: Affine2D,
    pub stroke_style: Brush,
    pub fill_style: Brush,
    pub line_width: f64,
    pub line_cap: LineCap,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2D::IDENTITY,
            stroke_style: Brush::Solid(Color::BLACK),
            fill_style: Brush::Solid(Color::BLACK),
            line_width: 1.0,
            line_cap: LineCap::Butt,
        }
    }
}

/// A draw context that records commands for later inspection
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    state: DrawState,
    stack: Vec<DrawState>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            state: DrawState::default(),
            stack: Vec::new(),
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clear all recorded commands and reset the state stack
    pub fn clear(&mut self) {
        self.commands.clear();
        self.state = DrawState::default();
        self.stack.clear();
    }

    /// Current graphics state
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Number of unmatched `save` calls
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl DrawContext for RecordingContext {
    fn size(&self) -> Size {
        self.viewport
    }

    fn resize(&mut self, size: Size) -> PlayResult<()> {
        self.viewport = check_size(size)?;
        self.state = DrawState::default();
        self.stack.clear();
        Ok(())
    }

    fn save(&mut self) {
        self.record(DrawCommand::Save);
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        self.record(DrawCommand::Restore);
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn reset_transform(&mut self) {
        self.record(DrawCommand::ResetTransform);
        self.state.transform = Affine2D::IDENTITY;
    }

    fn transform(&mut self, transform: Affine2D) {
        self.record(DrawCommand::Transform(transform));
        self.state.transform = self.state.transform.then(&transform);
    }

    fn current_transform(&self) -> Affine2D {
        self.state.transform
    }

    fn set_stroke_style(&mut self, brush: Brush) {
        self.record(DrawCommand::SetStrokeStyle(brush.clone()));
        self.state.stroke_style = brush;
    }

    fn set_fill_style(&mut self, brush: Brush) {
        self.record(DrawCommand::SetFillStyle(brush.clone()));
        self.state.fill_style = brush;
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(DrawCommand::SetLineWidth(width));
        self.state.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.record(DrawCommand::SetLineCap(cap));
        self.state.line_cap = cap;
    }

    fn begin_path(&mut self) {
        self.record(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.record(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.record(DrawCommand::LineTo(point));
    }

    fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.record(DrawCommand::QuadraticCurveTo { control, to });
    }

    fn bezier_curve_to(&mut self, control1: Point, control2: Point, to: Point) {
        self.record(DrawCommand::BezierCurveTo {
            control1,
            control2,
            to,
        });
    }

    fn close_path(&mut self) {
        self.record(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.record(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.record(DrawCommand::Fill);
    }

    fn clip(&mut self) {
        self.record(DrawCommand::Clip);
    }

    fn fill_rect(&mut self, at: Point, width: f64, height: f64) {
        self.record(DrawCommand::FillRect { at, width, height });
    }

    fn clear_rect(&mut self, at: Point, width: f64, height: f64) {
        self.record(DrawCommand::ClearRect { at, width, height });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.record(DrawCommand::FillText {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }

    fn stroke_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.record(DrawCommand::StrokeText {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }
}

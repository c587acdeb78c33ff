//! One-shot sketch export
//!
//! Renders a sketch once into an offscreen [`PixmapContext`] and encodes the
//! result as PNG.

use std::path::Path;

use tracing::debug;

use play_core::{Color, DrawContext, PlayResult};
use play_paint::PlayCanvas;

use crate::error::{RasterError, RasterResult};
use crate::pixmap::PixmapContext;

/// Output settings for a single render
#[derive(Clone, Debug, PartialEq)]
pub struct ExportConfig {
    /// Output width in pixels
    pub width: u32,
    /// Width over height; the height is floored
    pub aspect_ratio: f64,
    /// Generator seed, or a fresh one per render
    pub seed: Option<u64>,
    /// Elapsed time handed to the sketch, in seconds
    pub time: f64,
    /// Flood colour painted before the sketch runs
    pub background: Option<Color>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            aspect_ratio: 1.0,
            seed: None,
            time: 0.0,
            background: None,
        }
    }
}

impl ExportConfig {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Pixel size of the output
    pub fn pixel_size(&self) -> RasterResult<(u32, u32)> {
        let height = if self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0 {
            (self.width as f64 / self.aspect_ratio).floor()
        } else {
            0.0
        };
        if self.width == 0 || height < 1.0 || height > u32::MAX as f64 {
            return Err(RasterError::InvalidDimensions {
                width: self.width,
                height: height.min(u32::MAX as f64) as u32,
            });
        }
        Ok((self.width, height as u32))
    }
}

/// Renders sketches into PNG images
///
/// Text is not rasterized. [`PlayCanvas::text`] calls are skipped with a
/// warning, so a sketch that draws text exports without it.
#[derive(Clone, Debug, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Run `sketch` once on a fresh pixmap
    pub fn render<F>(&self, mut sketch: F) -> RasterResult<PixmapContext>
    where
        F: FnMut(&mut PlayCanvas<'_>) -> PlayResult<()>,
    {
        let (width, height) = self.config.pixel_size()?;
        let mut context = PixmapContext::new(width, height)?;
        if let Some(background) = self.config.background {
            context.fill_background(background);
        }

        let size = context.size();
        let mut canvas =
            PlayCanvas::new(&mut context, size, self.config.seed)?.with_time(self.config.time);
        let seed = canvas.seed();
        sketch(&mut canvas)?;
        drop(canvas);

        debug!(width, height, seed, "rendered sketch");
        Ok(context)
    }

    /// Render and encode as PNG
    pub fn render_png<F>(&self, sketch: F) -> RasterResult<Vec<u8>>
    where
        F: FnMut(&mut PlayCanvas<'_>) -> PlayResult<()>,
    {
        self.render(sketch)?.encode_png()
    }

    /// Render and write a PNG file
    pub fn export<F>(&self, sketch: F, path: impl AsRef<Path>) -> RasterResult<()>
    where
        F: FnMut(&mut PlayCanvas<'_>) -> PlayResult<()>,
    {
        self.render(sketch)?.save_png(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::{PlayError, Point, Vector};
    use play_paint::{Star, TextConfig, TextSize};
    use std::f64::consts::TAU;

    fn star(p: &mut PlayCanvas<'_>) -> PlayResult<()> {
        let angle = p.random() * TAU;
        let hue = p.random() * 360.0;
        p.set_fill_colour(hue, 80.0, 50.0, 1.0);
        p.with_translation(Vector::new(0.5, 0.5), |p| {
            p.with_rotation(angle, |p| {
                p.fill(&Star::new(Point::ZERO, 0.4, 0.15, 5));
                Ok(())
            })
        })
    }

    fn render(seed: u64) -> Vec<u8> {
        Exporter::new(ExportConfig::new(200).with_seed(seed))
            .render(star)
            .unwrap()
            .pixmap()
            .data()
            .to_vec()
    }

    #[test]
    fn test_pixel_size() {
        assert_eq!(ExportConfig::new(200).pixel_size().unwrap(), (200, 200));
        assert_eq!(
            ExportConfig::new(201).with_aspect_ratio(2.0).pixel_size().unwrap(),
            (201, 100)
        );
        assert!(ExportConfig::new(0).pixel_size().is_err());
        assert!(ExportConfig::new(10).with_aspect_ratio(0.0).pixel_size().is_err());
        assert!(ExportConfig::new(10).with_aspect_ratio(f64::NAN).pixel_size().is_err());
        assert!(ExportConfig::new(10).with_aspect_ratio(20.0).pixel_size().is_err());
    }

    #[test]
    fn test_same_seed_same_pixels() {
        let first = render(42);
        assert!(first.iter().any(|&b| b != 0));
        assert_eq!(first, render(42));
    }

    #[test]
    fn test_different_seed_different_pixels() {
        assert_ne!(render(42), render(43));
    }

    #[test]
    fn test_background() {
        let context = Exporter::new(ExportConfig::new(20).with_background(Color::WHITE))
            .render(|_: &mut PlayCanvas<'_>| Ok(()))
            .unwrap();
        assert_eq!(context.pixel(10, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_sketch_sees_config() {
        let mut seen = None;
        Exporter::new(ExportConfig::new(300).with_aspect_ratio(1.5).with_seed(9).with_time(2.5))
            .render(|p: &mut PlayCanvas<'_>| {
                seen = Some((p.seed(), p.t(), p.aspect_ratio(), p.original_scale()));
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, Some((9, 2.5, 1.5, 300.0)));
    }

    #[test]
    fn test_sketch_error() {
        let result = Exporter::default().render(|p: &mut PlayCanvas<'_>| {
            p.draw_lines(&[])?;
            Ok(())
        });
        assert!(matches!(result, Err(RasterError::Sketch(PlayError::EmptyPoints))));
    }

    #[test]
    fn test_text_left_out() {
        let exporter = Exporter::new(ExportConfig::new(40).with_seed(1));
        let with_text = exporter
            .render(|p: &mut PlayCanvas<'_>| {
                star(p)?;
                p.text(&TextConfig::new(Point::new(0.1, 0.5), TextSize::Fixed(0.2)), "hello");
                Ok(())
            })
            .unwrap();
        let without_text = exporter.render(star).unwrap();
        assert_eq!(with_text.pixmap().data(), without_text.pixmap().data());
    }

    #[test]
    fn test_export_file() {
        let path = std::env::temp_dir().join(format!("play_raster_{}.png", std::process::id()));
        let exporter = Exporter::new(ExportConfig::new(64).with_seed(1));
        exporter.export(star, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
        assert_eq!(bytes, exporter.render_png(star).unwrap());
    }
}

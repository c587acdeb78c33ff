//! Play CLI
//!
//! List, export and animate the built-in Play sketches.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use play_animation::{DriverConfig, FrameDriver, FrameFlag};
use play_core::{Rng, Size};
use play_raster::{ExportConfig, Exporter, PixmapContext};

mod config;
mod sketches;

use config::PlayConfig;
use sketches::{SketchEntry, SketchSelector, SKETCHES};

#[derive(Parser)]
#[command(name = "play")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render Play sketches to PNG", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./play.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in sketches
    List,

    /// Render a single frame to PNG
    Export {
        #[command(flatten)]
        render: RenderArgs,

        /// Output file (defaults to <sketch>-<seed>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an animation as numbered PNG frames
    Animate {
        #[command(flatten)]
        render: RenderArgs,

        /// Number of frames to write
        #[arg(short, long)]
        frames: Option<u32>,

        /// Frames per second of sketch time
        #[arg(long)]
        fps: Option<u32>,

        /// Directory for the frames (defaults to <sketch>-<seed>/)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

/// Flags shared by the rendering commands
#[derive(Args, Clone, Debug, Default)]
struct RenderArgs {
    /// Sketch name or index (see `play list`)
    #[arg(short, long)]
    sketch: Option<SketchSelector>,

    /// Generator seed
    #[arg(long)]
    seed: Option<u64>,

    /// Output width in pixels
    #[arg(short, long)]
    width: Option<u32>,

    /// Width over height
    #[arg(short, long)]
    aspect_ratio: Option<f64>,
}

/// Settings after merging flags over the config file
#[derive(Clone, Debug, PartialEq)]
struct RenderSettings {
    selector: SketchSelector,
    seed: Option<u64>,
    width: u32,
    aspect_ratio: f64,
}

impl RenderSettings {
    fn resolve(config: &PlayConfig, args: &RenderArgs) -> Self {
        Self {
            selector: args
                .sketch
                .clone()
                .or_else(|| config.sketch.name.clone())
                .unwrap_or_default(),
            seed: args.seed.or(config.sketch.seed),
            width: args.width.unwrap_or(config.output.width),
            aspect_ratio: args.aspect_ratio.unwrap_or(config.output.aspect_ratio),
        }
    }

    fn sketch(&self) -> Result<&'static SketchEntry> {
        sketches::find(&self.selector).with_context(|| {
            let names: Vec<&str> = SKETCHES.iter().map(|entry| entry.name).collect();
            format!("Unknown sketch '{}'. Available: {:?}", self.selector, names)
        })
    }

    /// The configured seed, or a fresh one that is logged so the run can be
    /// repeated
    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            let seed = Rng::from_entropy().seed();
            info!("Using random seed {}", seed);
            seed
        })
    }

    fn export_config(&self, seed: u64) -> ExportConfig {
        ExportConfig::new(self.width)
            .with_aspect_ratio(self.aspect_ratio)
            .with_seed(seed)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = PlayConfig::load(cli.config.as_deref())?;
    debug!(?config, "loaded config");

    match cli.command {
        Commands::List => cmd_list(),

        Commands::Export { render, output } => {
            cmd_export(&RenderSettings::resolve(&config, &render), output.as_deref())
        }

        Commands::Animate {
            render,
            frames,
            fps,
            out_dir,
        } => cmd_animate(
            &RenderSettings::resolve(&config, &render),
            frames.unwrap_or(config.animate.frames),
            fps.unwrap_or(config.animate.fps),
            out_dir.as_deref(),
        ),
    }
}

fn cmd_list() -> Result<()> {
    for (index, entry) in SKETCHES.iter().enumerate() {
        println!("{index:>3}  {}", entry.name);
    }
    Ok(())
}

fn cmd_export(settings: &RenderSettings, output: Option<&Path>) -> Result<()> {
    let entry = settings.sketch()?;
    let seed = settings.seed();
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(entry, seed, "png"));

    info!("Exporting {} (seed {}) to {}", entry.name, seed, output.display());

    Exporter::new(settings.export_config(seed))
        .export(entry.sketch, &output)
        .with_context(|| format!("Failed to export {}", entry.name))?;

    info!("Wrote {}", output.display());
    Ok(())
}

fn cmd_animate(
    settings: &RenderSettings,
    frames: u32,
    fps: u32,
    out_dir: Option<&Path>,
) -> Result<()> {
    if fps == 0 {
        anyhow::bail!("fps must be at least 1");
    }

    let entry = settings.sketch()?;
    let seed = settings.seed();
    let out_dir = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(entry, seed, ""));
    let (width, height) = settings.export_config(seed).pixel_size()?;

    info!(
        "Animating {} (seed {}) for {} frames at {} fps into {}",
        entry.name,
        seed,
        frames,
        fps,
        out_dir.display()
    );

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let context = PixmapContext::new(width, height)?;
    let driver_config =
        DriverConfig::new(Size::new(width as f64, height as f64), seed).playing(true);
    let mut driver = FrameDriver::new(
        context,
        FrameFlag::new(),
        Box::new(entry.sketch),
        driver_config,
    )
    .with_context(|| format!("Failed to start {}", entry.name))?;

    let frame_time = Duration::from_secs_f64(1.0 / fps as f64);
    let mut written = 0;
    for frame in 0..frames {
        if !driver.scheduler_mut().take_request() {
            warn!("Animation stopped after {} frames", frame);
            break;
        }
        driver
            .on_frame(frame_time * frame)
            .with_context(|| format!("{} failed on frame {}", entry.name, frame))?;

        let path = out_dir.join(format!("frame_{frame:04}.png"));
        driver.context().save_png(&path)?;
        written += 1;
        debug!(path = %path.display(), "wrote frame");
    }

    info!("Wrote {} frames to {}", written, out_dir.display());
    Ok(())
}

/// `<slug>-<seed>` with an optional extension
fn default_output(entry: &SketchEntry, seed: u64, extension: &str) -> PathBuf {
    let mut path = PathBuf::from(format!("{}-{}", sketches::slug(entry.name), seed));
    if !extension.is_empty() {
        path.set_extension(extension);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let config = PlayConfig::from_toml(
            "[sketch]\nname = \"Star\"\nseed = 1\n[output]\nwidth = 300\naspect_ratio = 2.0",
        )
        .unwrap();

        let from_file = RenderSettings::resolve(&config, &RenderArgs::default());
        assert_eq!(from_file.selector, SketchSelector::Name("Star".into()));
        assert_eq!(from_file.seed, Some(1));
        assert_eq!(from_file.width, 300);
        assert_eq!(from_file.aspect_ratio, 2.0);

        let args = RenderArgs {
            sketch: Some(SketchSelector::Index(1)),
            seed: Some(9),
            width: Some(64),
            aspect_ratio: None,
        };
        let merged = RenderSettings::resolve(&config, &args);
        assert_eq!(merged.selector, SketchSelector::Index(1));
        assert_eq!(merged.seed, Some(9));
        assert_eq!(merged.width, 64);
        assert_eq!(merged.aspect_ratio, 2.0);
        assert_eq!(merged.seed(), 9);
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = RenderSettings::resolve(&PlayConfig::default(), &RenderArgs::default());
        assert_eq!(settings.selector, SketchSelector::Index(0));
        assert_eq!(settings.seed, None);
        assert_eq!(settings.sketch().unwrap().name, "Rainbow Drips");
    }

    #[test]
    fn test_unknown_sketch() {
        let args = RenderArgs {
            sketch: Some("Nope".parse().unwrap()),
            ..RenderArgs::default()
        };
        let settings = RenderSettings::resolve(&PlayConfig::default(), &args);
        let message = settings.sketch().unwrap_err().to_string();
        assert!(message.contains("Nope"));
        assert!(message.contains("Chaikin Blob"));
    }

    #[test]
    fn test_default_output() {
        let entry = &SKETCHES[0];
        assert_eq!(default_output(entry, 42, "png"), PathBuf::from("rainbow-drips-42.png"));
        assert_eq!(default_output(entry, 42, ""), PathBuf::from("rainbow-drips-42"));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "play",
            "-v",
            "export",
            "--sketch",
            "2",
            "--seed",
            "42",
            "--aspect-ratio",
            "1.5",
            "-o",
            "star.png",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Export { render, output } => {
                assert_eq!(render.sketch, Some(SketchSelector::Index(2)));
                assert_eq!(render.seed, Some(42));
                assert_eq!(render.aspect_ratio, Some(1.5));
                assert_eq!(output, Some(PathBuf::from("star.png")));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_animate_writes_frames() {
        let dir = std::env::temp_dir().join(format!("play_cli_frames_{}", std::process::id()));
        let settings = RenderSettings {
            selector: SketchSelector::Name("Star".into()),
            seed: Some(42),
            width: 32,
            aspect_ratio: 1.0,
        };
        cmd_animate(&settings, 3, 10, Some(dir.as_path())).unwrap();

        for frame in 0..3 {
            assert!(dir.join(format!("frame_{frame:04}.png")).exists());
        }
        assert!(!dir.join("frame_0003.png").exists());
        fs::remove_dir_all(&dir).unwrap();

        assert!(cmd_animate(&settings, 3, 0, Some(dir.as_path())).is_err());
    }
}

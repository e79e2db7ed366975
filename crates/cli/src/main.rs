#![deny(unsafe_code)]
//! CLI binary for the dot-field generator.
//!
//! Subcommands:
//! - `render` — build a field, advance N frames, write one PNG
//! - `frames` — same, writing a PNG for every frame
//! - `positions` — print dot positions after N frames
//! - `replay <seed.json>` — run a saved [`Seed`] and write its PNG

mod error;

use clap::{Args, Parser, Subcommand};
use dot_field_core::seed::{DEFAULT_SEED, DEMO_DENSITY, DEMO_HEIGHT, DEMO_WIDTH};
use dot_field_core::{DVec2, DotField, MotionParams, Seed, Srgb};
use dot_field_render::snapshot::save_field_png;
use dot_field_render::ScatterStyle;
use error::CliError;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "dot-field", about = "Random dot field generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct FieldArgs {
    /// Field width.
    #[arg(short = 'W', long, default_value_t = DEMO_WIDTH)]
    width: f64,

    /// Field height.
    #[arg(short = 'H', long, default_value_t = DEMO_HEIGHT)]
    height: f64,

    /// Fraction of unit area covered by dots.
    #[arg(short, long, default_value_t = DEMO_DENSITY)]
    density: f64,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of frames to advance.
    #[arg(short, long, default_value_t = 0)]
    frames: usize,
}

#[derive(Args)]
struct MotionArgs {
    /// Motion mode: translation, cw or ccw.
    #[arg(short, long, default_value = "translation")]
    mode: String,

    /// Translation direction, x component.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    dx: f64,

    /// Translation direction, y component.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    dy: f64,

    /// Units per frame (translation) or radians per frame (rotation).
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    speed: f64,
}

#[derive(Args)]
struct StyleArgs {
    /// Image width in pixels.
    #[arg(long, default_value_t = 800)]
    pixel_width: usize,

    /// Image height in pixels.
    #[arg(long, default_value_t = 600)]
    pixel_height: usize,

    /// Marker diameter in pixels.
    #[arg(long, default_value_t = dot_field_render::DEFAULT_MARKER_SIZE)]
    marker_size: f64,

    /// Dot color as hex.
    #[arg(long, default_value = "#000000")]
    color: String,

    /// Background color as hex.
    #[arg(long, default_value = "#ffffff")]
    background: String,
}

#[derive(Subcommand)]
enum Command {
    /// Advance a field N frames and write a PNG snapshot.
    Render {
        #[command(flatten)]
        field: FieldArgs,
        #[command(flatten)]
        motion: MotionArgs,
        #[command(flatten)]
        style: StyleArgs,
        /// Output file path.
        #[arg(short, long, default_value = "dots.png")]
        output: PathBuf,
    },
    /// Write one PNG per frame, starting with the initial layout.
    Frames {
        #[command(flatten)]
        field: FieldArgs,
        #[command(flatten)]
        motion: MotionArgs,
        #[command(flatten)]
        style: StyleArgs,
        /// Output directory (created if missing).
        #[arg(long, default_value = "frames")]
        dir: PathBuf,
    },
    /// Print dot positions after N frames.
    Positions {
        #[command(flatten)]
        field: FieldArgs,
        #[command(flatten)]
        motion: MotionArgs,
    },
    /// Run a seed file and write a PNG snapshot.
    Replay {
        /// Path to a JSON seed file.
        seed_file: PathBuf,
        #[command(flatten)]
        style: StyleArgs,
        /// Output file path.
        #[arg(short, long, default_value = "dots.png")]
        output: PathBuf,
    },
}

impl FieldArgs {
    /// The seed reported alongside the output; `motion` is recorded as its params.
    fn to_seed(&self, motion: &MotionParams) -> Seed {
        let mut seed = Seed::new(self.width, self.height, self.density, self.seed);
        seed.frames = self.frames;
        seed.params = motion.to_json();
        seed
    }
}

impl MotionArgs {
    /// Non-finite values are kept as given and propagate into the positions.
    fn to_params(&self) -> Result<MotionParams, CliError> {
        Ok(MotionParams {
            motion: self.mode.parse()?,
            direction: DVec2::new(self.dx, self.dy),
            speed: self.speed,
        })
    }
}

impl StyleArgs {
    fn to_style(&self) -> Result<ScatterStyle, CliError> {
        Ok(ScatterStyle {
            marker_size: self.marker_size,
            color: Srgb::from_hex(&self.color)?,
            background: Srgb::from_hex(&self.background)?,
        })
    }

    fn save(&self, field: &DotField, path: &Path) -> Result<(), CliError> {
        let style = self.to_style()?;
        save_field_png(field, &style, self.pixel_width, self.pixel_height, path)?;
        Ok(())
    }
}

fn report(json_mode: bool, seed: &Seed, dots: usize, output: &Path) -> Result<(), CliError> {
    if json_mode {
        let info = json!({
            "seed": seed,
            "dots": dots,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {dots} dots ({}x{}, {} frames, seed {}) -> {}",
            seed.width,
            seed.height,
            seed.frames,
            seed.seed,
            output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render {
            field,
            motion,
            style,
            output,
        } => {
            let params = motion.to_params()?;
            let seed = field.to_seed(&params);
            let dots = seed.run_with(&params);
            style.save(&dots, &output)?;
            report(cli.json, &seed, dots.len(), &output)?;
        }
        Command::Frames {
            field,
            motion,
            style,
            dir,
        } => {
            let params = motion.to_params()?;
            let seed = field.to_seed(&params);
            std::fs::create_dir_all(&dir)?;
            let mut dots = seed.build();
            let mut written = Vec::with_capacity(seed.frames + 1);
            for frame in 0..=seed.frames {
                if frame > 0 {
                    dots.step(&params);
                }
                let path = dir.join(format!("frame_{frame:04}.png"));
                style.save(&dots, &path)?;
                written.push(path.display().to_string());
            }
            tracing::info!(frames = written.len(), dir = %dir.display(), "frames written");
            if cli.json {
                let info = json!({"seed": seed, "dots": dots.len(), "files": written});
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!("wrote {} frames to {}", written.len(), dir.display());
            }
        }
        Command::Positions { field, motion } => {
            let params = motion.to_params()?;
            let dots = field.to_seed(&params).run_with(&params);
            if cli.json {
                let points: Vec<[f64; 2]> =
                    dots.positions().iter().map(|p| p.to_array()).collect();
                println!("{}", serde_json::to_string(&points)?);
            } else {
                for p in dots.positions() {
                    println!("{} {}", p.x, p.y);
                }
            }
        }
        Command::Replay {
            seed_file,
            style,
            output,
        } => {
            let text = std::fs::read_to_string(&seed_file)?;
            let seed: Seed = serde_json::from_str(&text).map_err(|e| {
                CliError::Input(format!("invalid seed file {}: {e}", seed_file.display()))
            })?;
            let dots = seed.run()?;
            style.save(&dots, &output)?;
            report(cli.json, &seed, dots.len(), &output)?;
        }
    }

    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use dot_field_core::Motion;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults_to_the_demo_field() {
        let cli = Cli::parse_from(["dot-field", "render"]);
        let Command::Render { field, motion, .. } = cli.command else {
            panic!("expected render");
        };
        let params = motion.to_params().unwrap();
        assert_eq!(params, MotionParams::default());
        let seed = field.to_seed(&params);
        assert_eq!(seed.build().len(), 300);
        assert_eq!(seed.frames, 0);
    }

    #[test]
    fn non_finite_speed_reaches_the_field_unchanged() {
        let cli = Cli::parse_from([
            "dot-field",
            "positions",
            "--mode",
            "ccw",
            "--speed",
            "NaN",
            "--frames",
            "1",
        ]);
        let Command::Positions { field, motion } = cli.command else {
            panic!("expected positions");
        };
        let params = motion.to_params().unwrap();
        assert_eq!(params.motion, Motion::Ccw);
        assert!(params.speed.is_nan());
        let dots = field.to_seed(&params).run_with(&params);
        assert_eq!(dots.len(), 300);
        assert!(dots.positions().iter().all(|p| p.x.is_nan() && p.y.is_nan()));
    }

    #[test]
    fn infinite_direction_is_not_replaced_by_the_default() {
        let cli = Cli::parse_from(["dot-field", "positions", "--dx", "inf", "--frames", "1"]);
        let Command::Positions { field, motion } = cli.command else {
            panic!("expected positions");
        };
        let params = motion.to_params().unwrap();
        assert_eq!(params.direction, DVec2::new(f64::INFINITY, 0.0));
        let dots = field.to_seed(&params).run_with(&params);
        assert!(dots.positions().iter().all(|p| p.x == f64::INFINITY));
    }

    #[test]
    fn negative_direction_components_parse() {
        let cli = Cli::parse_from(["dot-field", "positions", "--dx", "-1.5", "--dy", "-2"]);
        let Command::Positions { motion, .. } = cli.command else {
            panic!("expected positions");
        };
        assert_eq!(motion.dx, -1.5);
        assert_eq!(motion.dy, -2.0);
    }

    #[test]
    fn unsupported_mode_maps_to_field_exit_code() {
        let cli = Cli::parse_from(["dot-field", "positions", "--mode", "diagonal"]);
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("diagonal"));
    }

    #[test]
    fn bad_color_maps_to_input_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x.png");
        let cli = Cli::parse_from([
            "dot-field",
            "render",
            "--color",
            "nope",
            "--output",
            out.to_str().unwrap(),
        ]);
        assert_eq!(run(cli).unwrap_err().exit_code(), 12);
    }

    #[test]
    fn frames_writes_initial_plus_each_frame() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "dot-field",
            "frames",
            "--frames",
            "2",
            "--pixel-width",
            "40",
            "--pixel-height",
            "30",
            "--dir",
            dir.path().to_str().unwrap(),
        ]);
        run(cli).unwrap_or_else(|e| panic!("frames failed: {e}"));
        for name in ["frame_0000.png", "frame_0001.png", "frame_0002.png"] {
            assert!(dir.path().join(name).exists(), "missing {name}");
        }
    }

    #[test]
    fn replay_runs_a_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.json");
        let out = dir.path().join("replay.png");
        let mut seed = Seed::new(20.0, 15.0, 0.1, 7);
        seed.frames = 3;
        seed.params = json!({"mode": "ccw", "speed": 0.1});
        std::fs::write(&seed_path, serde_json::to_string(&seed).unwrap()).unwrap();
        let cli = Cli::parse_from([
            "dot-field",
            "replay",
            seed_path.to_str().unwrap(),
            "--pixel-width",
            "40",
            "--pixel-height",
            "30",
            "--output",
            out.to_str().unwrap(),
        ]);
        run(cli).unwrap_or_else(|e| panic!("replay failed: {e}"));
        assert!(out.exists());
    }

    #[test]
    fn replay_with_malformed_seed_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.json");
        std::fs::write(&seed_path, "{\"width\": 1}").unwrap();
        let cli = Cli::parse_from(["dot-field", "replay", seed_path.to_str().unwrap()]);
        assert_eq!(run(cli).unwrap_err().exit_code(), 12);
    }
}

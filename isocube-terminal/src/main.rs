/// isocube - Rotating isometric cube in the terminal
///
/// Controls:
///   - Mouse click, Q or ESC: Quit
use std::io::{self, stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use isocube_core::{parse::parse_angles, RotationAngles};
use isocube_terminal::{prompt_angles, write_projection, AppConfig, ConfigOverrides, TerminalApp};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "isocube", version, about = "Rotating isometric cube in the terminal")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./isocube.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the cube until a click or Q
    Run(RunArgs),
    /// Print projected vertex coordinates for a number of frames
    Project(ProjectArgs),
}

#[derive(Args, Default)]
struct RunArgs {
    /// Per-frame rotation "X Y Z" in degrees; prompted for when omitted
    #[arg(short, long, value_parser = parse_angles, allow_hyphen_values = true)]
    angles: Option<RotationAngles>,
    /// Logical window width
    #[arg(long)]
    width: Option<u32>,
    /// Logical window height
    #[arg(long)]
    height: Option<u32>,
    /// Half the cube's side length
    #[arg(short, long)]
    scale: Option<f64>,
    /// Time each frame stays on screen, in milliseconds
    #[arg(long)]
    dwell_ms: Option<u64>,
    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,
}

#[derive(Args)]
struct ProjectArgs {
    /// Per-frame rotation "X Y Z" in degrees
    #[arg(short, long, value_parser = parse_angles, allow_hyphen_values = true)]
    angles: RotationAngles,
    /// Number of frames to print
    #[arg(short, long, default_value = "1")]
    frames: u64,
    /// Half the cube's side length
    #[arg(short, long)]
    scale: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            config
                .apply_overrides(&ConfigOverrides {
                    width: args.width,
                    height: args.height,
                    scale: args.scale,
                    dwell_ms: args.dwell_ms,
                    max_frames: args.frames,
                })
                .context("invalid command line options")?;

            let angles = match args.angles.or_else(|| config.angles()) {
                Some(angles) => angles,
                None => prompt_angles(&mut io::stdin().lock(), &mut stdout())
                    .context("failed to read rotation angles")?,
            };

            let app = TerminalApp::new(config.window.title.clone(), config.session_settings(angles));
            let report = app.run().context("render session failed")?;
            println!("Rendered {} frames.", report.frames_rendered);
        }
        Commands::Project(args) => {
            config
                .apply_overrides(&ConfigOverrides {
                    scale: args.scale,
                    ..ConfigOverrides::default()
                })
                .context("invalid command line options")?;
            write_projection(&mut stdout().lock(), &args.angles, config.shape.scale, args.frames)?;
        }
    }

    Ok(())
}

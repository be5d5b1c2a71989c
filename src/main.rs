//! Face gesture cursor: move the pointer with head turns, click with a
//! smile, right-click with an eyebrow raise.

use anyhow::Result;
use clap::Parser;
use face_gesture_cursor::{
    app::{AppConfig, GestureCursorApp, OutputMode},
    config::{Config, EXAMPLE_CONFIG},
};
use log::info;
use std::{path::PathBuf, time::Duration};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark stream, one detector result per line (stdin when omitted or "-")
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Log pointer events instead of moving the X11 pointer
    #[arg(long)]
    headless: bool,

    /// Stop after this many seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Exit when the landmark stream ends
    #[arg(long)]
    exit_on_eof: bool,

    /// Enable debug output
    #[arg(short = 'v', long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Face Gesture Cursor");

    let settings = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            match Config::from_file(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Failed to load config file: {}. Using defaults.", e);
                    Config::default()
                }
            }
        }
        None => Config::default(),
    };

    let run_for = match args.duration {
        Some(secs) if secs > 0.0 => match Duration::try_from_secs_f64(secs) {
            Ok(limit) => Some(limit),
            Err(e) => anyhow::bail!("--duration {secs} is out of range: {e}"),
        },
        Some(secs) => anyhow::bail!("--duration must be a positive number of seconds, got {secs}"),
        None => None,
    };

    let config = AppConfig {
        input: args.input,
        output: if args.headless {
            OutputMode::Headless
        } else {
            OutputMode::X11
        },
        run_for,
        exit_on_eof: args.exit_on_eof,
        settings,
    };

    let mut app = GestureCursorApp::new(config)?;
    let summary = app.run()?;
    info!(
        "Processed {} frames ({} dropped) over {} render ticks, {} clicks, {} context menus",
        summary.frames, summary.frames_dropped, summary.ticks, summary.clicks, summary.context_menus
    );

    Ok(())
}

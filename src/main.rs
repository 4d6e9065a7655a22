//! `ifcspace` command line tool.
//!
//! ```text
//! ifcspace volume   house.json                      # interior volume
//! ifcspace sections house.json --max 3 --step 0.25  # story area profile
//! ```
//!
//! Reports go to stdout; logs go to stderr (`RUST_LOG` overrides the level).

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use ifcspace::analysis::{
    interior_volume, story_sections, AnalysisConfig, AnalysisEvent, Progress,
};
use ifcspace::scene::Scene;
use ifcspace::topology::TopologyStore;

#[derive(Parser, Debug)]
#[command(name = "ifcspace")]
#[command(about = "Interior volume and story area analysis of building models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate the interior volume bounded by walls and roofs
    Volume(VolumeArgs),
    /// Slice the building at a series of heights and sum section areas
    Sections(SectionsArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Scene file (JSON)
    scene: PathBuf,

    /// Analysis settings file (JSON); missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Wait for Enter after every stage
    #[arg(long)]
    step_through: bool,
}

#[derive(Args, Debug)]
struct VolumeArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct SectionsArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Height of the first section
    #[arg(long)]
    start: Option<f64>,

    /// Highest section height (inclusive)
    #[arg(long)]
    max: Option<f64>,

    /// Distance between sections
    #[arg(long)]
    step: Option<f64>,

    /// Half size of the square slice face
    #[arg(long)]
    extent: Option<f64>,
}

/// Progress sink that optionally pauses at checkpoints.
struct Pacer {
    step_through: bool,
}

impl Progress for Pacer {
    fn on_event(&mut self, event: &AnalysisEvent) {
        if !self.step_through || !event.is_checkpoint() {
            return;
        }
        let summary = serde_json::to_string(event).unwrap_or_else(|_| format!("{event:?}"));
        eprint!("{summary} -- press Enter to continue");
        let _ = io::stderr().flush();
        let _ = io::stdin().lock().read_line(&mut String::new());
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn load_scene(path: &Path) -> Result<Scene> {
    Scene::load(path).with_context(|| format!("Failed to load scene {}", path.display()))
}

fn print_report<R: Serialize + std::fmt::Display>(report: &R, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn run_volume(args: &VolumeArgs) -> Result<()> {
    let config = load_config(args.common.config.as_deref())?;
    let scene = load_scene(&args.common.scene)?;
    let mut pacer = Pacer {
        step_through: args.common.step_through,
    };

    let mut store = TopologyStore::new();
    let products = scene.build(&mut store, &mut pacer);
    let report = interior_volume(&mut store, &products, &config.volume, &mut pacer)
        .context("Interior volume analysis failed")?;
    print_report(&report, args.common.json)
}

fn run_sections(args: &SectionsArgs) -> Result<()> {
    let mut config = load_config(args.common.config.as_deref())?;
    let settings = &mut config.sections;
    if let Some(start) = args.start {
        settings.start = start;
    }
    if let Some(max) = args.max {
        settings.max = max;
    }
    if let Some(step) = args.step {
        settings.step = step;
    }
    if let Some(extent) = args.extent {
        settings.extent = extent;
    }

    let scene = load_scene(&args.common.scene)?;
    let mut pacer = Pacer {
        step_through: args.common.step_through,
    };

    let mut store = TopologyStore::new();
    let products = scene.build(&mut store, &mut pacer);
    let report = story_sections(&mut store, &products, &config.sections, &mut pacer)
        .context("Story section analysis failed")?;
    print_report(&report, args.common.json)
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for ifcspace.
    // Override with RUST_LOG env var (e.g. RUST_LOG=ifcspace=debug).
    let env_filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::WARN.into())
        .add_directive("ifcspace=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Volume(args) => run_volume(&args),
        Commands::Sections(args) => run_sections(&args),
    }
}

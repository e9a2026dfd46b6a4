use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use roadmap_graph::app::{LaunchOptions, RoadmapApp};
use roadmap_graph::engine::{LayoutConfig, SurfaceConfig};

const PANEL_ALLOWANCE: [f32; 2] = [600.0, 40.0];

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Project JSON file: one record or an array of records. Defaults to a built-in sample.
    #[arg(long)]
    project: Option<PathBuf>,

    /// Record to show when the file holds several projects.
    #[arg(long)]
    project_id: Option<String>,

    /// JSON file overriding layout parameters.
    #[arg(long)]
    layout_config: Option<PathBuf>,

    /// Drawing surface width in points.
    #[arg(long, default_value_t = 1000.0)]
    width: f32,

    /// Drawing surface height in points.
    #[arg(long, default_value_t = 700.0)]
    height: f32,

    #[arg(long)]
    fullscreen: bool,

    /// Start with animation paused.
    #[arg(long)]
    paused: bool,

    /// Seed for random initial placement.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// -v info, -vv debug, -vvv trace
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    use std::io::Write;

    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let layout = match &args.layout_config {
        Some(path) => LayoutConfig::load(path).context("could not apply --layout-config")?,
        None => LayoutConfig::default(),
    };
    let surface = SurfaceConfig {
        width: args.width.max(1.0),
        height: args.height.max(1.0),
        fullscreen: args.fullscreen,
        animating: !args.paused,
        ..SurfaceConfig::default()
    };
    log::debug!("layout {layout:?}, surface {}x{}", surface.width, surface.height);

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_inner_size([
            surface.width + PANEL_ALLOWANCE[0],
            surface.height + PANEL_ALLOWANCE[1],
        ])
        .with_fullscreen(surface.fullscreen);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let launch = LaunchOptions {
        project_path: args.project,
        project_id: args.project_id,
        layout,
        surface,
        seed: args.seed,
    };

    eframe::run_native(
        "roadmap-graph",
        options,
        Box::new(move |cc| Ok(Box::new(RoadmapApp::new(cc, launch)))),
    )
    .map_err(|error| anyhow!("failed to open window: {error}"))
}

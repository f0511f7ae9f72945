//! SVGL command line - render an OBJ or STL mesh to an SVG file
//!
//! Settings come from an optional TOML file; flags override it.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use svgl_cli::{App, RenderConfig};
use svgl_core::RenderMode;

#[derive(Debug, Parser)]
#[command(name = "svgl", version, about = "Render a 3D mesh to SVG")]
struct Args {
    /// Mesh file (.obj or .stl)
    input: PathBuf,

    /// Output SVG file [default: INPUT with an .svg extension]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// TOML render configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render mode, e.g. wireframe or face-light
    #[arg(short, long)]
    mode: Option<RenderMode>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Seed for the random-subset wireframe
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(&self, config: &mut RenderConfig) {
        if let Some(mode) = self.mode {
            config.material.mode = mode;
        }
        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        if self.seed.is_some() {
            config.canvas.seed = self.seed;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => RenderConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    args.apply(&mut config);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("svg"));
    info!(
        "rendering {} as {} at {}x{}",
        args.input.display(),
        config.material.mode,
        config.canvas.width,
        config.canvas.height
    );

    App::new(config).run(&args.input, &output)
}

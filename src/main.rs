use std::path::PathBuf;

use anyhow::{bail, Result};
use bevy::prelude::*;
use clap::Parser;

use logo_sphere::{LogoSpherePlugin, SceneConfig};

const DEFAULT_LAYERS: [&str; 2] = ["assets/config/scene.ron", "assets/config/scene.local.ron"];

#[derive(Parser, Debug)]
#[command(about = "Looping dot-sphere to logo animation", version)]
struct Args {
    /// Config layer (repeatable, later files override earlier ones).
    #[arg(long = "config")]
    configs: Vec<PathBuf>,
    /// Seed for the randomized layout.
    #[arg(long)]
    seed: Option<u64>,
    /// Exit after this many seconds.
    #[arg(long)]
    auto_close: Option<f32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let explicit = !args.configs.is_empty();
    let layers: Vec<PathBuf> = if explicit {
        args.configs.clone()
    } else {
        DEFAULT_LAYERS.iter().map(PathBuf::from).collect()
    };
    let (mut cfg, used, errors) = SceneConfig::load_layered(&layers);
    // Explicitly requested layers must all load; the default local layer is optional.
    if explicit && !errors.is_empty() {
        bail!("config load failed: {}", errors.join("; "));
    }

    if let Some(seed) = args.seed {
        cfg.layout_seed = Some(seed);
    }
    if let Some(secs) = args.auto_close {
        cfg.window.auto_close = secs;
    }

    let title = cfg.window.title.clone();
    let resolution = (cfg.window.width, cfg.window.height);
    let warnings = cfg.validate();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title,
            resolution: resolution.into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }));

    // Logged after DefaultPlugins so the subscriber is installed.
    info!(layers = ?used, "config loaded");
    for e in &errors {
        warn!("config: {e}");
    }
    for w in &warnings {
        warn!("config: {w}");
    }

    app.insert_resource(cfg).add_plugins(LogoSpherePlugin);
    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("app exited with code {code}"),
    }
}

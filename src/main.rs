use anyhow::bail;
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use vb_rendering::RenderingPlugin;
use volley_block::{load_config, open_replay, ReplayOptions, VolleyBlockPlugin, DEFAULT_SEED};

#[derive(Parser, Debug)]
#[command(about = "Pose-driven volleyball blocking game", version)]
struct Args {
    /// Config layer (repeatable, later wins). Default: assets/config/game.ron + game.local.ron.
    #[arg(long = "config")]
    config: Vec<PathBuf>,
    /// JSON-lines pose recording to replay instead of playing on keyboard only.
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Pace the replay by its timestamps.
    #[arg(long)]
    realtime: bool,
    /// Seed for passes and spiker aims.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (cfg, report) = load_config(&args.config);
    let replay =
        ReplayOptions::from_config(&cfg.capture).with_overrides(args.replay, args.realtime);
    let capture = open_replay(&replay)?;

    let window = Window {
        title: cfg.window.title.clone(),
        resolution: (cfg.window.width, cfg.window.height).into(),
        resizable: false,
        ..Default::default()
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }))
    .add_plugins(VolleyBlockPlugin {
        config: cfg,
        report,
        seed: args.seed.unwrap_or(DEFAULT_SEED),
    })
    .add_plugins(RenderingPlugin);
    if let Some(handle) = capture {
        app.insert_resource(handle);
    }

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("volley_block exited with code {code}"),
    }
}

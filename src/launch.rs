//! Start-up wiring shared by the game binary and headless tests: layered
//! config, the optional replay capture thread, and the simulation plugins.

use anyhow::Context;
use bevy::prelude::*;
use event_core::EventCorePlugin;
use std::path::PathBuf;
use vb_capture::{spawn_capture, CaptureHandle, Pacing, ReplaySource};
use vb_config::{CaptureConfig, GameConfig};
use vb_core::{CorePlugin, GameConfigRes, RngSeed};
use vb_gameplay::GameplayPlugin;
use vb_physics::PhysicsPlugin;

use crate::auto_close::AutoClosePlugin;

/// Base layer then local override; later layers win.
pub const CONFIG_LAYERS: [&str; 2] = ["assets/config/game.ron", "assets/config/game.local.ron"];
pub const DEFAULT_SEED: u64 = 12345;

/// What config loading found, logged once the log plugin is up.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ConfigReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Load `paths` as layers (or [`CONFIG_LAYERS`] when empty). Never fails.
pub fn load_config(paths: &[PathBuf]) -> (GameConfig, ConfigReport) {
    let (cfg, used, errors) = if paths.is_empty() {
        GameConfig::load_layered(CONFIG_LAYERS)
    } else {
        GameConfig::load_layered(paths)
    };
    let warnings = cfg.validate();
    (
        cfg,
        ConfigReport {
            used,
            errors,
            warnings,
        },
    )
}

pub fn log_config_report(report: Res<ConfigReport>) {
    for e in &report.errors {
        warn!("CONFIG LOAD ISSUE: {e}");
    }
    for w in &report.warnings {
        warn!("CONFIG WARNING: {w}");
    }
    if report.used.is_empty() {
        info!("No config layers found; using defaults");
    } else {
        info!(used = ?report.used, "Config layers loaded");
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayOptions {
    pub path: Option<PathBuf>,
    pub realtime: bool,
    pub looping: bool,
}

impl ReplayOptions {
    pub fn from_config(cfg: &CaptureConfig) -> Self {
        Self {
            path: cfg.replay_path.as_ref().map(PathBuf::from),
            realtime: cfg.realtime,
            looping: cfg.loop_replay,
        }
    }

    /// Command-line values win over the config file.
    pub fn with_overrides(mut self, path: Option<PathBuf>, realtime: bool) -> Self {
        if path.is_some() {
            self.path = path;
        }
        self.realtime |= realtime;
        self
    }
}

/// Start the capture thread for a replay, if one is configured.
pub fn open_replay(opts: &ReplayOptions) -> anyhow::Result<Option<CaptureHandle>> {
    let Some(path) = &opts.path else {
        return Ok(None);
    };
    let source = ReplaySource::open(path)
        .with_context(|| format!("opening pose recording {}", path.display()))?
        .looping(opts.looping);
    let pacing = if opts.realtime {
        Pacing::Realtime
    } else {
        Pacing::AsFast
    };
    let handle = spawn_capture(source, pacing).context("starting capture thread")?;
    Ok(Some(handle))
}

/// Everything except windowing and rendering.
pub struct VolleyBlockPlugin {
    pub config: GameConfig,
    pub report: ConfigReport,
    pub seed: u64,
}

impl Plugin for VolleyBlockPlugin {
    fn build(&self, app: &mut App) {
        // Resources first: the plugins below read them while building.
        app.insert_resource(GameConfigRes(self.config.clone()))
            .insert_resource(RngSeed(self.seed))
            .insert_resource(self.report.clone())
            .insert_resource(Time::<Fixed>::from_hz(self.config.court.tick_rate()))
            .add_plugins((
                CorePlugin,
                PhysicsPlugin,
                EventCorePlugin::default(),
                GameplayPlugin,
                AutoClosePlugin,
            ))
            .add_systems(Startup, log_config_report);
    }
}

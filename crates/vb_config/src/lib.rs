// Pure data crate (no Bevy dependency).
// Provides: data structures, layered loading, validation producing warnings (non-fatal), and tests.
//
// Court space is the pixel space of the playfield: origin top-left, y grows downward.
// Gesture thresholds are expressed in normalised image space ([0,1], y downward).

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            title: "Volleyball Blocking".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CourtConfig {
    pub width: f32,
    pub height: f32,
    /// Line the blocker stands on (bottom edge of the player rect).
    pub floor_y: f32,
    /// A spiked ball must be above this line for a block to count as a kill block.
    pub kill_line_y: f32,
    /// Ball leaves its bounce phase once its centre rises to this line.
    pub apex_y: f32,
    pub grid_interval: f32,
    /// Fixed simulation rate; all per-tick speeds below assume this rate.
    pub tick_hz: f64,
}
impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            floor_y: 432.0,
            kill_line_y: 260.0,
            apex_y: 100.0,
            grid_interval: 50.0,
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

/// Simulation rate used when `court.tick_hz` is unusable.
pub const DEFAULT_TICK_HZ: f64 = 60.0;

impl CourtConfig {
    /// `tick_hz` if it is a finite positive rate, otherwise [`DEFAULT_TICK_HZ`].
    pub fn tick_rate(&self) -> f64 {
        if self.tick_hz.is_finite() && self.tick_hz > 0.0 {
            self.tick_hz
        } else {
            DEFAULT_TICK_HZ
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: f32,
    /// Horizontal pixels per tick under keyboard control.
    pub move_speed: f32,
    /// Added to vertical velocity each tick while airborne.
    pub gravity: f32,
    /// Jump power used before any gesture has produced one.
    pub default_jump_power: f32,
    /// Rendering scale applied to the pose sprite (sprite side = size * sprite_scale).
    pub sprite_scale: f32,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: 32.0,
            move_speed: 5.0,
            gravity: 0.5,
            default_jump_power: 15.0,
            sprite_scale: 5.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub gravity: f32,
    /// Upward speed held constant during the bounce phase after a pass.
    pub bounce_speed: f32,
    /// Horizontal speed range (magnitude) given by a pass.
    pub pass_speed_min: i32,
    pub pass_speed_max: i32,
    /// Horizontal speed given by a spike.
    pub spike_speed: f32,
}
impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            gravity: 0.3,
            bounce_speed: 5.0,
            pass_speed_min: 2,
            pass_speed_max: 4,
            spike_speed: 5.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct NpcConfig {
    pub width: f32,
    pub height: f32,
    pub follow_speed: f32,
    pub stun_secs: f32,
    /// Centre lines of the two passers.
    pub upper_y: f32,
    pub lower_y: f32,
}
impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            width: 48.0,
            height: 48.0,
            follow_speed: 5.0,
            stun_secs: 1.0,
            upper_y: 300.0,
            lower_y: 500.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpikerConfig {
    pub width: f32,
    pub height: f32,
    pub origin_y: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    /// Spiker only takes off under a ball falling faster than this.
    pub trigger_fall_speed: f32,
    /// Horizontal distance to the ball under which the spiker counts as aligned.
    pub align_tolerance: f32,
}
impl Default for SpikerConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 80.0,
            origin_y: 330.0,
            jump_speed: 12.0,
            gravity: 0.5,
            trigger_fall_speed: 5.0,
            align_tolerance: 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PowerTierConfig {
    pub min_active: usize,
    pub power: f32,
}
impl Default for PowerTierConfig {
    fn default() -> Self {
        Self {
            min_active: 1,
            power: 14.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Samples kept per predicate.
    pub window_len: usize,
    /// Minimum seconds between predicate samples.
    pub sample_interval: f64,
    /// Head counts as lowered below floor + standing_height * head_ratio.
    pub head_ratio: f32,
    /// Knees count as bent below knee_level + |knee_level - floor| * knee_ratio.
    pub knee_ratio: f32,
    /// Raised wrists closer than this are a middle block.
    pub middle_distance: f32,
    /// Minimum seconds between two jump firings.
    pub jump_cooldown: f64,
    /// Flip x so the player sees a mirror image.
    pub mirror: bool,
    /// Descending breakpoints; the first tier whose min_active is reached wins.
    pub power_tiers: Vec<PowerTierConfig>,
    pub base_power: f32,
}
impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            window_len: 6,
            sample_interval: 0.1,
            head_ratio: 0.5,
            knee_ratio: 0.2,
            middle_distance: 0.2,
            jump_cooldown: 1.0,
            mirror: true,
            power_tiers: vec![
                PowerTierConfig {
                    min_active: 5,
                    power: 20.0,
                },
                PowerTierConfig {
                    min_active: 3,
                    power: 16.0,
                },
                PowerTierConfig {
                    min_active: 1,
                    power: 14.0,
                },
            ],
            base_power: 12.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    /// JSON-lines landmark recording replayed by the capture thread. None = keyboard only.
    pub replay_path: Option<String>,
    /// Pace replayed frames by their timestamps instead of as fast as possible.
    pub realtime: bool,
    /// Restart the recording when it ends.
    pub loop_replay: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub court: CourtConfig,
    pub player: PlayerConfig,
    pub ball: BallConfig,
    pub npc: NpcConfig,
    pub spiker: SpikerConfig,
    pub gesture: GestureConfig,
    pub capture: CaptureConfig,
    pub draw_grid: bool,
    pub draw_block_box: bool,
}

impl GameConfig {
    /// Load from a single RON file (errors contain human-readable context).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Load file; on failure returns default config plus error string.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load multiple layers; later overrides earlier (deep merge).
    /// Skips missing files; returns (config, used_paths, errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }

        for p in paths {
            let path_ref = p.as_ref();
            if !path_ref.exists() {
                continue;
            }
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }

        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }

    /// Produce validation warnings (non-fatal) for suspicious values.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }

        let c = &self.court;
        if c.width <= 0.0 || c.height <= 0.0 {
            w.push("court dimensions must be > 0".into());
        }
        if c.floor_y <= 0.0 || c.floor_y > c.height {
            w.push(format!(
                "court.floor_y {} outside court height 0..{}",
                c.floor_y, c.height
            ));
        }
        if c.apex_y >= c.kill_line_y {
            w.push(format!(
                "court.apex_y {} should be above (smaller than) kill_line_y {}",
                c.apex_y, c.kill_line_y
            ));
        }
        if !(c.tick_hz.is_finite() && c.tick_hz > 0.0) {
            w.push(format!(
                "court.tick_hz {} must be finite and > 0; running at {DEFAULT_TICK_HZ}",
                c.tick_hz
            ));
        } else if !(20.0..=240.0).contains(&c.tick_hz) {
            w.push(format!(
                "court.tick_hz {} unusual; per-tick speeds are tuned for 60",
                c.tick_hz
            ));
        }
        if c.grid_interval <= 0.0 {
            w.push("court.grid_interval must be > 0".into());
        }

        if self.player.size <= 0.0 {
            w.push("player.size must be > 0".into());
        }
        if self.player.gravity <= 0.0 {
            w.push(format!(
                "player.gravity {} not positive; jumps never land",
                self.player.gravity
            ));
        }
        if self.player.move_speed < 0.0 {
            w.push("player.move_speed negative".into());
        }

        let b = &self.ball;
        if b.radius <= 0.0 {
            w.push("ball.radius must be > 0".into());
        }
        if b.gravity <= 0.0 {
            w.push(format!("ball.gravity {} not positive; ball floats", b.gravity));
        }
        if b.pass_speed_min > b.pass_speed_max {
            w.push(format!(
                "ball.pass_speed_min ({}) greater than max ({})",
                b.pass_speed_min, b.pass_speed_max
            ));
        }
        if b.pass_speed_min <= 0 {
            w.push("ball.pass_speed_min must be > 0 (passes always head back to centre)".into());
        }

        if self.npc.stun_secs < 0.0 {
            w.push("npc.stun_secs negative".into());
        }
        if self.npc.follow_speed <= 0.0 {
            w.push("npc.follow_speed must be > 0".into());
        }
        if self.spiker.jump_speed <= 0.0 || self.spiker.gravity <= 0.0 {
            w.push("spiker.jump_speed and spiker.gravity must be > 0".into());
        }

        let g = &self.gesture;
        if g.window_len == 0 {
            w.push("gesture.window_len is 0; treated as 1".into());
        } else if !(5..=30).contains(&g.window_len) {
            w.push(format!(
                "gesture.window_len {} outside typical 5..=30",
                g.window_len
            ));
        }
        if g.sample_interval < 0.0 {
            w.push("gesture.sample_interval negative".into());
        }
        if g.jump_cooldown < 0.0 {
            w.push("gesture.jump_cooldown negative".into());
        }
        if !(0.0..=1.0).contains(&g.head_ratio) {
            w.push(format!("gesture.head_ratio {} outside 0..1", g.head_ratio));
        }
        if !(0.0..=1.0).contains(&g.knee_ratio) {
            w.push(format!("gesture.knee_ratio {} outside 0..1", g.knee_ratio));
        }
        if g.middle_distance <= 0.0 {
            w.push("gesture.middle_distance must be > 0".into());
        }
        if g.power_tiers.is_empty() {
            w.push("gesture.power_tiers empty; jump power is always base_power".into());
        }
        if g.power_tiers.iter().any(|t| t.min_active == 0) {
            w.push("gesture.power_tiers entry with min_active 0 shadows base_power".into());
        }
        if g.power_tiers.iter().any(|t| t.power < g.base_power) {
            w.push("gesture.power_tiers entry weaker than base_power".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_sample_config() {
        let sample = r#"(
            window: (width: 800.0, height: 480.0, title: "Test"),
            court: (width: 800.0, height: 480.0, floor_y: 360.0, kill_line_y: 160.0, apex_y: 80.0),
            player: (size: 24.0, gravity: 0.6),
            ball: (radius: 8.0, gravity: 0.25),
            gesture: (
                window_len: 10,
                jump_cooldown: 2.0,
                mirror: false,
                power_tiers: [(min_active: 4, power: 18.0)],
                base_power: 11.0,
            ),
            capture: (replay_path: Some("rec.jsonl"), realtime: true),
            draw_grid: true,
        )"#;
        let cfg = GameConfig::load_from_file(write_temp(sample).path()).expect("parse config");
        assert_eq!(cfg.window.width, 800.0);
        assert_eq!(cfg.court.floor_y, 360.0);
        assert_eq!(cfg.player.size, 24.0);
        assert_eq!(cfg.gesture.window_len, 10);
        assert_eq!(cfg.gesture.power_tiers.len(), 1);
        assert_eq!(cfg.capture.replay_path.as_deref(), Some("rec.jsonl"));
        assert!(cfg.capture.realtime);
        assert!(!cfg.gesture.mirror);
        // Omitted sections keep defaults.
        assert_eq!(cfg.npc, NpcConfig::default());
        assert!(cfg.validate().is_empty(), "unexpected warnings: {:?}", cfg.validate());
    }

    #[test]
    fn defaults_validate_clean() {
        assert!(GameConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_detects_warnings() {
        let mut bad = GameConfig::default();
        bad.window.width = -1.0;
        bad.court.floor_y = 900.0;
        bad.court.apex_y = 300.0;
        bad.player.gravity = 0.0;
        bad.ball.pass_speed_min = 6;
        bad.gesture.window_len = 0;
        bad.gesture.head_ratio = 1.5;
        bad.gesture.power_tiers.clear();
        let warnings = bad.validate();
        let joined = warnings.join(" | ");
        assert!(joined.contains("window dimensions must be > 0"));
        assert!(joined.contains("court.floor_y 900"));
        assert!(joined.contains("court.apex_y"));
        assert!(joined.contains("player.gravity"));
        assert!(joined.contains("ball.pass_speed_min (6)"));
        assert!(joined.contains("gesture.window_len is 0"));
        assert!(joined.contains("gesture.head_ratio"));
        assert!(joined.contains("power_tiers empty"));
    }

    #[test]
    fn unusable_tick_rate_falls_back() {
        let mut court = CourtConfig::default();
        assert_eq!(court.tick_rate(), 60.0);
        court.tick_hz = 120.0;
        assert_eq!(court.tick_rate(), 120.0);
        for bad in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            court.tick_hz = bad;
            assert_eq!(court.tick_rate(), DEFAULT_TICK_HZ, "{bad}");
        }
        let mut cfg = GameConfig::default();
        cfg.court.tick_hz = 0.0;
        assert!(cfg.validate().iter().any(|w| w.contains("court.tick_hz 0")));
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = GameConfig::load_or_default("this/file/does/not/exist.ron");
        assert!(err.is_some());
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn layered_merge_overrides() {
        let base = r"(
            court: (floor_y: 420.0),
            gesture: (jump_cooldown: 1.5, window_len: 8),
        )";
        let override_one = r#"(
            window: (title: "Local"),
            gesture: (jump_cooldown: 0.5),
        )"#;
        let a = write_temp(base);
        let b = write_temp(override_one);
        let (cfg, used, errors) = GameConfig::load_layered([a.path(), b.path()]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.court.floor_y, 420.0);
        assert_eq!(cfg.window.title, "Local");
        assert_eq!(cfg.gesture.jump_cooldown, 0.5);
        // Sibling keys in a merged section survive the overlay.
        assert_eq!(cfg.gesture.window_len, 8);
    }

    #[test]
    fn layered_merge_adds_keys_missing_from_base_section() {
        let a = write_temp("(gesture: (jump_cooldown: 1.5))");
        let b = write_temp("(gesture: (mirror: false), court: (tick_hz: 30.0))");
        let (cfg, used, errors) = GameConfig::load_layered([a.path(), b.path()]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.gesture.jump_cooldown, 1.5);
        assert!(!cfg.gesture.mirror);
        assert_eq!(cfg.court.tick_hz, 30.0);
    }

    #[test]
    fn layered_skips_missing_and_reports_parse_errors() {
        let broken = write_temp("(court: (floor_y: ");
        let (cfg, used, errors) =
            GameConfig::load_layered([Path::new("missing/layer.ron"), broken.path()]);
        assert!(used.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("parse error"));
        assert_eq!(cfg, GameConfig::default());
    }

    // Helper: create a temp file with given contents; returns handle (kept for lifetime)
    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        f.write_all(contents.as_bytes()).expect("write tmp");
        f
    }
}

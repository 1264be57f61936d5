//! The owned classifier: one object holding baseline, windows and cooldown state.
//!
//! Call [`GestureClassifier::update`] once per received pose frame (or with
//! `None` when the estimator found nobody). The returned [`GestureSnapshot`]
//! is everything the game needs to drive the player.

use crate::{
    baseline::Baseline,
    block::{classify_block, BlockType},
    jump::JumpDetector,
    landmarks::BodyLandmarks,
    power::PowerTable,
    predicates::{GesturePredicate, PredicateThresholds},
    window::PredicateHistory,
};
use vb_config::GestureConfig;

/// Longest rolling window a config may ask for.
pub const MAX_WINDOW_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct GestureSettings {
    pub window_len: usize,
    pub sample_interval: f64,
    pub thresholds: PredicateThresholds,
    pub middle_distance: f32,
    pub jump_cooldown: f64,
    pub mirror: bool,
    pub power: PowerTable,
}

impl From<&GestureConfig> for GestureSettings {
    fn from(cfg: &GestureConfig) -> Self {
        Self {
            window_len: cfg.window_len.clamp(1, MAX_WINDOW_LEN),
            sample_interval: cfg.sample_interval.max(0.0),
            thresholds: PredicateThresholds {
                head_ratio: cfg.head_ratio,
                knee_ratio: cfg.knee_ratio,
            },
            middle_distance: cfg.middle_distance,
            jump_cooldown: cfg.jump_cooldown,
            mirror: cfg.mirror,
            power: PowerTable::from(cfg),
        }
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self::from(&GestureConfig::default())
    }
}

/// Per-frame control output.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSnapshot {
    /// A body was seen this frame.
    pub detected: bool,
    /// Horizontal position in `[0,1]`; held from the last detection.
    pub move_x: f32,
    /// A jump fired this frame.
    pub jump: bool,
    /// Power of the current pose; valid whether or not `jump` fired.
    pub jump_power: f32,
    pub block: BlockType,
    /// Window-aggregated predicate flags in [`GesturePredicate::ALL`] order.
    pub active: [bool; 5],
    /// The baseline was (re)captured this frame.
    pub baseline_captured: bool,
}

impl GestureSnapshot {
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    pub fn is_active(&self, predicate: GesturePredicate) -> bool {
        self.active[predicate.index()]
    }
}

impl Default for GestureSnapshot {
    fn default() -> Self {
        Self {
            detected: false,
            move_x: 0.5,
            jump: false,
            jump_power: 0.0,
            block: BlockType::None,
            active: [false; 5],
            baseline_captured: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    settings: GestureSettings,
    baseline: Baseline,
    calibrated: bool,
    recalibrate_pending: bool,
    history: PredicateHistory,
    jump: JumpDetector,
    last_sample: Option<f64>,
    latest: GestureSnapshot,
}

impl GestureClassifier {
    pub fn new(settings: GestureSettings) -> Self {
        let history = PredicateHistory::new(settings.window_len);
        let jump = JumpDetector::new(settings.jump_cooldown);
        let latest = GestureSnapshot {
            jump_power: settings.power.base(),
            ..Default::default()
        };
        Self {
            settings,
            baseline: Baseline::default(),
            calibrated: false,
            recalibrate_pending: false,
            history,
            jump,
            last_sample: None,
            latest,
        }
    }

    pub fn from_config(cfg: &GestureConfig) -> Self {
        Self::new(GestureSettings::from(cfg))
    }

    /// Feed one frame observed at `now` seconds.
    pub fn update(&mut self, now: f64, body: Option<&BodyLandmarks>) -> GestureSnapshot {
        let Some(raw) = body else {
            self.latest.detected = false;
            self.latest.jump = false;
            self.latest.baseline_captured = false;
            return self.latest.clone();
        };
        let body = if self.settings.mirror {
            raw.mirrored()
        } else {
            *raw
        };

        let mut captured = false;
        if !self.calibrated || self.recalibrate_pending {
            self.baseline = Baseline::capture(&body);
            self.calibrated = true;
            self.recalibrate_pending = false;
            self.history.clear();
            self.last_sample = None;
            captured = true;
        }

        let due = self
            .last_sample
            .map_or(true, |t| now - t >= self.settings.sample_interval);
        if due {
            for p in GesturePredicate::ALL {
                let sample = p.evaluate(&body, &self.baseline, &self.settings.thresholds);
                self.history.record(p, sample);
            }
            self.last_sample = Some(now);
        }

        let active = self.history.active();
        let jump_power = self.settings.power.power_for(self.history.active_count());
        let airborne = body.mean_ankle_y() < self.baseline.knee_level;
        let jump = self.jump.check(now, airborne);

        self.latest = GestureSnapshot {
            detected: true,
            move_x: body.mean_shoulder_x().clamp(0.0, 1.0),
            jump,
            jump_power,
            block: classify_block(&body, self.settings.middle_distance),
            active,
            baseline_captured: captured,
        };
        self.latest.clone()
    }

    /// Capture a fresh baseline from the next detected frame.
    pub fn request_recalibration(&mut self) {
        self.recalibrate_pending = true;
    }

    /// Forget baseline, windows and cooldown.
    pub fn reset(&mut self) {
        self.baseline = Baseline::default();
        self.calibrated = false;
        self.recalibrate_pending = false;
        self.history.clear();
        self.jump.reset();
        self.last_sample = None;
        self.latest = GestureSnapshot {
            jump_power: self.settings.power.base(),
            ..Default::default()
        };
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    pub fn latest(&self) -> &GestureSnapshot {
        &self.latest
    }

    pub fn history(&self) -> &PredicateHistory {
        &self.history
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

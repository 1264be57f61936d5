use crate::landmarks::BodyLandmarks;
use serde::{Deserialize, Serialize};

/// Fallback used for every baseline measurement until a pose is captured.
pub const UNCALIBRATED: f32 = 0.1;

/// Reference measurements taken from a standing pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Mean ankle y.
    pub floor_y: f32,
    /// Nose y minus floor y (negative for an upright pose since y grows downward).
    pub standing_height: f32,
    /// Mean knee y.
    pub knee_level: f32,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            floor_y: UNCALIBRATED,
            standing_height: UNCALIBRATED,
            knee_level: UNCALIBRATED,
        }
    }
}

impl Baseline {
    pub fn capture(body: &BodyLandmarks) -> Self {
        let floor_y = body.mean_ankle_y();
        Self {
            floor_y,
            standing_height: body.nose.y - floor_y,
            knee_level: body.mean_knee_y(),
        }
    }
}

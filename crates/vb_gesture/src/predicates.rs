//! Boolean pose conditions sampled into the rolling windows.

use crate::{baseline::Baseline, landmarks::BodyLandmarks};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GesturePredicate {
    HeadLowered,
    KneesBent,
    HandsBelowKnees,
    HandsBelowHips,
    HandsBelowShoulders,
}

/// Ratios applied to the baseline by the relative predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredicateThresholds {
    pub head_ratio: f32,
    pub knee_ratio: f32,
}

impl Default for PredicateThresholds {
    fn default() -> Self {
        Self {
            head_ratio: 0.5,
            knee_ratio: 0.2,
        }
    }
}

impl GesturePredicate {
    pub const ALL: [GesturePredicate; 5] = [
        GesturePredicate::HeadLowered,
        GesturePredicate::KneesBent,
        GesturePredicate::HandsBelowKnees,
        GesturePredicate::HandsBelowHips,
        GesturePredicate::HandsBelowShoulders,
    ];

    /// Position in [`GesturePredicate::ALL`]; used to index per-predicate arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            GesturePredicate::HeadLowered => "Head lowered",
            GesturePredicate::KneesBent => "Knees bent",
            GesturePredicate::HandsBelowKnees => "Hands below knees",
            GesturePredicate::HandsBelowHips => "Hands below hips",
            GesturePredicate::HandsBelowShoulders => "Hands below shoulders",
        }
    }

    pub fn evaluate(
        self,
        body: &BodyLandmarks,
        baseline: &Baseline,
        t: &PredicateThresholds,
    ) -> bool {
        match self {
            GesturePredicate::HeadLowered => {
                body.nose.y > baseline.floor_y + baseline.standing_height * t.head_ratio
            }
            GesturePredicate::KneesBent => {
                let span = (baseline.knee_level - baseline.floor_y).abs();
                body.mean_knee_y() > baseline.knee_level + span * t.knee_ratio
            }
            GesturePredicate::HandsBelowKnees => {
                body.left_wrist.y > body.left_knee.y && body.right_wrist.y > body.right_knee.y
            }
            GesturePredicate::HandsBelowHips => {
                body.left_wrist.y > body.left_hip.y && body.right_wrist.y > body.right_hip.y
            }
            GesturePredicate::HandsBelowShoulders => {
                body.left_wrist.y > body.left_shoulder.y
                    && body.right_wrist.y > body.right_shoulder.y
            }
        }
    }
}

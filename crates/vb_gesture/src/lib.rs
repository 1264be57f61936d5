//! Gesture classifier: turns per-frame body landmarks into game controls.
//!
//! Pure crate (no Bevy dependency). The game wraps [`GestureClassifier`] in a
//! resource; offline tools drive it directly.

pub mod baseline;
pub mod block;
pub mod classifier;
pub mod jump;
pub mod landmarks;
pub mod power;
pub mod predicates;
pub mod window;

pub use baseline::Baseline;
pub use block::{classify_block, BlockType};
pub use classifier::{GestureClassifier, GestureSettings, GestureSnapshot};
pub use jump::JumpDetector;
pub use landmarks::{BodyLandmarks, Landmark};
pub use power::{PowerTable, PowerTier};
pub use predicates::{GesturePredicate, PredicateThresholds};
pub use window::{PredicateHistory, RollingWindow};

/// Canned poses shared by unit tests and downstream crates' tests.
#[cfg(any(test, feature = "test-poses"))]
pub mod test_support {
    use crate::landmarks::{BodyLandmarks, Landmark};

    /// Upright: ankles 0.9, knees 0.7, nose 0.1, arms hanging.
    pub fn standing_body() -> BodyLandmarks {
        BodyLandmarks {
            nose: Landmark::new(0.5, 0.1),
            left_shoulder: Landmark::new(0.4, 0.3),
            right_shoulder: Landmark::new(0.6, 0.3),
            left_elbow: Landmark::new(0.35, 0.45),
            right_elbow: Landmark::new(0.65, 0.45),
            left_wrist: Landmark::new(0.35, 0.5),
            right_wrist: Landmark::new(0.65, 0.5),
            left_hip: Landmark::new(0.45, 0.55),
            right_hip: Landmark::new(0.55, 0.55),
            left_knee: Landmark::new(0.45, 0.7),
            right_knee: Landmark::new(0.55, 0.7),
            left_ankle: Landmark::new(0.45, 0.9),
            right_ankle: Landmark::new(0.55, 0.9),
        }
    }

    /// Deep squat with hands near the floor; every predicate holds against a standing baseline.
    pub fn crouched_body() -> BodyLandmarks {
        let mut b = standing_body();
        b.nose.y = 0.6;
        b.left_shoulder.y = 0.5;
        b.right_shoulder.y = 0.5;
        b.left_elbow.y = 0.65;
        b.right_elbow.y = 0.65;
        b.left_wrist.y = 0.85;
        b.right_wrist.y = 0.85;
        b.left_hip.y = 0.65;
        b.right_hip.y = 0.65;
        b.left_knee.y = 0.8;
        b.right_knee.y = 0.8;
        b
    }

    /// Standing pose lifted so the ankles sit above the standing knee level.
    pub fn jumping_body() -> BodyLandmarks {
        let b = standing_body();
        let lift = |l: Landmark| Landmark::new(l.x, l.y - 0.25);
        BodyLandmarks {
            nose: lift(b.nose),
            left_shoulder: lift(b.left_shoulder),
            right_shoulder: lift(b.right_shoulder),
            left_elbow: lift(b.left_elbow),
            right_elbow: lift(b.right_elbow),
            left_wrist: lift(b.left_wrist),
            right_wrist: lift(b.right_wrist),
            left_hip: lift(b.left_hip),
            right_hip: lift(b.right_hip),
            left_knee: lift(b.left_knee),
            right_knee: lift(b.right_knee),
            left_ankle: lift(b.left_ankle),
            right_ankle: lift(b.right_ankle),
        }
    }

    /// Standing pose with both arms raised over the head, wrists at the given x.
    pub fn blocking_body(left_wrist_x: f32, right_wrist_x: f32) -> BodyLandmarks {
        let mut b = standing_body();
        b.left_elbow.y = 0.2;
        b.right_elbow.y = 0.2;
        b.left_wrist = Landmark::new(left_wrist_x, 0.05);
        b.right_wrist = Landmark::new(right_wrist_x, 0.05);
        b
    }
}

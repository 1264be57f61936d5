//! Body landmarks in normalised image space.
//!
//! Pose estimators report 33 MediaPipe-ordered keypoints; the classifier only
//! needs the nose plus the shoulder..ankle chain on both sides.

use serde::{Deserialize, Serialize};

/// MediaPipe pose indices for the keypoints we read.
pub mod index {
    pub const NOSE: usize = 0;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
    /// Shortest point list that still contains every index above.
    pub const REQUIRED_LEN: usize = RIGHT_ANKLE + 1;
}

/// A 2D keypoint, `x`/`y` in `[0,1]` with `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn mirrored(&self) -> Self {
        Self::new(1.0 - self.x, self.y)
    }
}

impl From<[f32; 2]> for Landmark {
    fn from(p: [f32; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

/// The named subset of a pose the classifier works with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyLandmarks {
    pub nose: Landmark,
    pub left_shoulder: Landmark,
    pub right_shoulder: Landmark,
    pub left_elbow: Landmark,
    pub right_elbow: Landmark,
    pub left_wrist: Landmark,
    pub right_wrist: Landmark,
    pub left_hip: Landmark,
    pub right_hip: Landmark,
    pub left_knee: Landmark,
    pub right_knee: Landmark,
    pub left_ankle: Landmark,
    pub right_ankle: Landmark,
}

impl BodyLandmarks {
    /// Pick the named keypoints out of a MediaPipe-ordered list.
    /// Returns `None` when the list is too short to contain the ankles.
    pub fn from_points<P: Copy + Into<Landmark>>(points: &[P]) -> Option<Self> {
        if points.len() < index::REQUIRED_LEN {
            return None;
        }
        let at = |i: usize| -> Landmark { points[i].into() };
        Some(Self {
            nose: at(index::NOSE),
            left_shoulder: at(index::LEFT_SHOULDER),
            right_shoulder: at(index::RIGHT_SHOULDER),
            left_elbow: at(index::LEFT_ELBOW),
            right_elbow: at(index::RIGHT_ELBOW),
            left_wrist: at(index::LEFT_WRIST),
            right_wrist: at(index::RIGHT_WRIST),
            left_hip: at(index::LEFT_HIP),
            right_hip: at(index::RIGHT_HIP),
            left_knee: at(index::LEFT_KNEE),
            right_knee: at(index::RIGHT_KNEE),
            left_ankle: at(index::LEFT_ANKLE),
            right_ankle: at(index::RIGHT_ANKLE),
        })
    }

    /// Flatten back into a MediaPipe-ordered list (unused slots zeroed).
    pub fn to_points(&self) -> Vec<[f32; 2]> {
        let mut pts = vec![[0.0, 0.0]; index::REQUIRED_LEN];
        let mut put = |i: usize, l: &Landmark| pts[i] = [l.x, l.y];
        put(index::NOSE, &self.nose);
        put(index::LEFT_SHOULDER, &self.left_shoulder);
        put(index::RIGHT_SHOULDER, &self.right_shoulder);
        put(index::LEFT_ELBOW, &self.left_elbow);
        put(index::RIGHT_ELBOW, &self.right_elbow);
        put(index::LEFT_WRIST, &self.left_wrist);
        put(index::RIGHT_WRIST, &self.right_wrist);
        put(index::LEFT_HIP, &self.left_hip);
        put(index::RIGHT_HIP, &self.right_hip);
        put(index::LEFT_KNEE, &self.left_knee);
        put(index::RIGHT_KNEE, &self.right_knee);
        put(index::LEFT_ANKLE, &self.left_ankle);
        put(index::RIGHT_ANKLE, &self.right_ankle);
        pts
    }

    /// Flip every keypoint horizontally (for a camera image shown as a mirror).
    pub fn mirrored(&self) -> Self {
        Self {
            nose: self.nose.mirrored(),
            left_shoulder: self.left_shoulder.mirrored(),
            right_shoulder: self.right_shoulder.mirrored(),
            left_elbow: self.left_elbow.mirrored(),
            right_elbow: self.right_elbow.mirrored(),
            left_wrist: self.left_wrist.mirrored(),
            right_wrist: self.right_wrist.mirrored(),
            left_hip: self.left_hip.mirrored(),
            right_hip: self.right_hip.mirrored(),
            left_knee: self.left_knee.mirrored(),
            right_knee: self.right_knee.mirrored(),
            left_ankle: self.left_ankle.mirrored(),
            right_ankle: self.right_ankle.mirrored(),
        }
    }

    pub fn mean_ankle_y(&self) -> f32 {
        (self.left_ankle.y + self.right_ankle.y) * 0.5
    }

    pub fn mean_knee_y(&self) -> f32 {
        (self.left_knee.y + self.right_knee.y) * 0.5
    }

    pub fn mean_shoulder_x(&self) -> f32 {
        (self.left_shoulder.x + self.right_shoulder.x) * 0.5
    }

    /// Both elbows higher in the image than their shoulders.
    pub fn elbows_raised(&self) -> bool {
        self.left_elbow.y < self.left_shoulder.y && self.right_elbow.y < self.right_shoulder.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_list_is_no_detection() {
        let pts = vec![[0.5_f32, 0.5]; index::RIGHT_ANKLE];
        assert!(BodyLandmarks::from_points(&pts).is_none());
    }

    #[test]
    fn picks_mediapipe_indices() {
        let mut pts = vec![[0.0_f32, 0.0]; 33];
        pts[index::NOSE] = [0.5, 0.1];
        pts[index::LEFT_ANKLE] = [0.4, 0.9];
        pts[index::RIGHT_ANKLE] = [0.6, 0.8];
        let body = BodyLandmarks::from_points(&pts).expect("full list");
        assert_eq!(body.nose, Landmark::new(0.5, 0.1));
        assert!((body.mean_ankle_y() - 0.85).abs() < 1e-6);
        assert_eq!(BodyLandmarks::from_points(&body.to_points()), Some(body));
    }

    #[test]
    fn mirror_flips_x_only() {
        let l = Landmark::new(0.25, 0.7).mirrored();
        assert_eq!(l, Landmark::new(0.75, 0.7));
    }
}

use crate::landmarks::BodyLandmarks;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockType {
    #[default]
    None,
    Left,
    Right,
    Middle,
    Split,
}

impl BlockType {
    pub fn is_active(self) -> bool {
        self != BlockType::None
    }

    pub fn label(self) -> &'static str {
        match self {
            BlockType::None => "None",
            BlockType::Left => "Left",
            BlockType::Right => "Right",
            BlockType::Middle => "Middle",
            BlockType::Split => "Split",
        }
    }
}

/// Classify arm position. Expects landmarks already mirrored if the image is flipped.
pub fn classify_block(body: &BodyLandmarks, middle_distance: f32) -> BlockType {
    if !body.elbows_raised() {
        return BlockType::None;
    }
    let (lw, rw, nose) = (&body.left_wrist, &body.right_wrist, &body.nose);
    if lw.x < nose.x && rw.x < nose.x {
        BlockType::Left
    } else if lw.x > nose.x && rw.x > nose.x {
        BlockType::Right
    } else if lw.distance(rw) < middle_distance {
        BlockType::Middle
    } else {
        BlockType::Split
    }
}

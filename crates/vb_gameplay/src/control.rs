//! Player control: gestures when a pose feed is live, keyboard otherwise or on top.

use bevy::prelude::*;
use vb_core::{CourtBody, GameConfigRes, Player};
use vb_gesture::{BlockType, GesturePredicate};
use vb_physics::{clamp_horizontal, clamp_to_floor, integrate, move_horizontal};

use crate::gesture::GestureState;

/// Per-tick pose intents that do not live on [`Player`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlIntent {
    pub bump: bool,
    pub knees_bent: bool,
}

/// Held-key snapshot, decoupled from `ButtonInput` so tests can drive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardControls {
    pub left: bool,
    pub right: bool,
    pub block_left: bool,
    pub block_right: bool,
    pub block_middle: bool,
    pub knees_bent: bool,
    pub bump: bool,
}

impl KeyboardControls {
    pub fn read(keys: &ButtonInput<KeyCode>) -> Self {
        Self {
            left: keys.pressed(KeyCode::KeyA),
            right: keys.pressed(KeyCode::KeyD),
            block_left: keys.pressed(KeyCode::ArrowLeft),
            block_right: keys.pressed(KeyCode::ArrowRight),
            block_middle: keys.pressed(KeyCode::ArrowUp),
            knees_bent: keys.pressed(KeyCode::ArrowDown),
            bump: keys.pressed(KeyCode::KeyS),
        }
    }

    pub fn block(&self) -> BlockType {
        match (self.block_left, self.block_right, self.block_middle) {
            (true, true, _) => BlockType::Split,
            (true, false, _) => BlockType::Left,
            (false, true, _) => BlockType::Right,
            (false, false, true) => BlockType::Middle,
            (false, false, false) => BlockType::None,
        }
    }

    pub fn direction(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }
}

pub fn apply_controls(
    cfg: Res<GameConfigRes>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    gesture: Res<GestureState>,
    mut q: Query<(&mut CourtBody, &mut Player, &mut ControlIntent)>,
) {
    let c = &cfg.0;
    let kb = keys
        .map(|k| KeyboardControls::read(&k))
        .unwrap_or_default();
    let snap = &gesture.snapshot;

    for (mut body, mut player, mut intent) in &mut q {
        if gesture.live && snap.detected {
            body.center.x = snap.move_x * c.court.width;
            clamp_horizontal(&mut body, c.court.width);
        }
        let dir = kb.direction();
        if dir != 0.0 {
            move_horizontal(&mut body, dir * c.player.move_speed, c.court.width);
        }

        let kb_block = kb.block();
        player.block = if kb_block.is_active() || !gesture.live {
            kb_block
        } else {
            snap.block
        };
        if gesture.live {
            player.jump_power = snap.jump_power;
        }
        intent.bump = kb.bump;
        intent.knees_bent =
            kb.knees_bent || (gesture.live && snap.is_active(GesturePredicate::KneesBent));
    }
}

/// Gravity while airborne; landing restores `grounded`.
pub fn step_player(cfg: Res<GameConfigRes>, mut q: Query<(&mut CourtBody, &mut Player)>) {
    let c = &cfg.0;
    for (mut body, mut player) in &mut q {
        if !player.grounded {
            integrate(&mut body, c.player.gravity);
            if clamp_to_floor(&mut body, c.court.floor_y) {
                player.grounded = true;
            }
        }
        clamp_horizontal(&mut body, c.court.width);
    }
}

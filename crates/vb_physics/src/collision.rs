//! Rectangle overlap, ball contact rules and the block hit box.

use bevy::prelude::*;
use rand::Rng;
use vb_core::{Aim, Ball, CourtBody, Side};
use vb_gesture::BlockType;

/// Strict AABB overlap; touching edges do not count.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// What the ball can hit this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactKind {
    Passer(Side),
    Spiker(Aim),
}

impl ContactKind {
    /// Side the ball takes after touching this NPC.
    pub fn side(self) -> Side {
        match self {
            ContactKind::Passer(side) => side,
            ContactKind::Spiker(_) => Side::Spiker,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactCandidate {
    pub kind: ContactKind,
    pub rect: Rect,
    pub stunned: bool,
}

/// Index of the first candidate the ball touches this step, if any.
///
/// Only a falling ball can make contact, stunned NPCs are ignored, and a ball
/// last hit by the spiker passes through the upper passer.
pub fn select_contact(
    ball_body: &CourtBody,
    ball: &Ball,
    candidates: &[ContactCandidate],
) -> Option<usize> {
    if ball_body.velocity.y <= 0.0 {
        return None;
    }
    let ball_rect = ball_body.rect();
    candidates.iter().position(|c| {
        !c.stunned
            && !(ball.side == Side::Spiker && c.kind == ContactKind::Passer(Side::Upper))
            && overlaps(ball_rect, c.rect)
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactParams {
    pub spike_speed: f32,
    pub bounce_speed: f32,
    pub pass_speed_min: i32,
    pub pass_speed_max: i32,
    pub court_center_x: f32,
}

/// Horizontal pass speed pointing back toward the court centre.
pub fn pass_velocity(ball_x: f32, center_x: f32, min: i32, max: i32, rng: &mut impl Rng) -> f32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let speed = rng.gen_range(lo..=hi) as f32;
    if ball_x < center_x {
        speed
    } else {
        -speed
    }
}

/// Apply the effect of touching `kind` to the ball.
pub fn apply_contact(
    ball_body: &mut CourtBody,
    ball: &mut Ball,
    kind: ContactKind,
    p: &ContactParams,
    rng: &mut impl Rng,
) {
    ball.side = kind.side();
    match kind {
        ContactKind::Spiker(aim) => {
            ball.bouncing = false;
            ball_body.velocity.x = aim.sign() * p.spike_speed;
        }
        ContactKind::Passer(_) => {
            ball.bouncing = true;
            ball_body.velocity.y = -p.bounce_speed;
            ball_body.velocity.x = pass_velocity(
                ball_body.center.x,
                p.court_center_x,
                p.pass_speed_min,
                p.pass_speed_max,
                rng,
            );
        }
    }
}

/// Block hit box relative to the player's rect, in multiples of the player size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxOffset {
    /// Pixel shift added after stepping one player size up and left from the rect corner.
    pub shift: Vec2,
    /// Box size in player sizes.
    pub scale: Vec2,
}

impl BoxOffset {
    pub fn for_block(block: BlockType) -> Option<Self> {
        let (sx, sy, w, h) = match block {
            BlockType::None => return None,
            BlockType::Left => (-30.0, -50.0, 3.0, 5.0),
            BlockType::Right => (40.0, -50.0, 3.0, 5.0),
            BlockType::Middle => (5.0, -50.0, 3.0, 5.0),
            BlockType::Split => (-30.0, -20.0, 5.0, 4.0),
        };
        Some(Self {
            shift: Vec2::new(sx, sy),
            scale: Vec2::new(w, h),
        })
    }
}

/// Hit box covered by the player's arms for `block`; `None` when not blocking.
pub fn block_box(player_rect: Rect, player_size: f32, block: BlockType) -> Option<Rect> {
    let off = BoxOffset::for_block(block)?;
    let min = player_rect.min - Vec2::splat(player_size) + off.shift;
    Some(Rect::from_corners(min, min + off.scale * player_size))
}

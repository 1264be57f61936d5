//! Fallback colors for actors without sprite art, plus court and UI colors.

use bevy::prelude::*;
use vb_core::{PlayerPose, Side};

pub struct Palette;
impl Palette {
    /// Sand-orange court floor.
    pub const BG: Color = Color::srgb(1.0, 0.55, 0.15);
    pub const GRID: Color = Color::srgba(0.5, 0.5, 0.5, 0.6);
    pub const FLOOR: Color = Color::srgb(0.35, 0.2, 0.1);
    pub const KILL_LINE: Color = Color::srgba(0.9, 0.1, 0.1, 0.8);
    pub const NET: Color = Color::srgba(1.0, 1.0, 1.0, 0.55);
    pub const BLOCK_BOX: Color = Color::WHITE;
    pub const BALL: Color = Color::srgb(0.55, 0.55, 0.55);
    pub const PASSER_LOWER: Color = Color::srgb(0.2, 0.55, 0.9);
    pub const PASSER_UPPER: Color = Color::srgb(0.2, 0.8, 0.45);
    pub const SPIKER: Color = Color::srgb(0.85, 0.2, 0.25);
    pub const STUNNED: Color = Color::srgb(0.4, 0.4, 0.45);
    pub const OVERLAY: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);
    pub const OVERLAY_TEXT: Color = Color::BLACK;
    pub const HUD_TEXT: Color = Color::BLACK;
}

/// Player fallback color per pose, so a missing sprite set still shows state.
pub fn pose_color(pose: PlayerPose) -> Color {
    match pose {
        PlayerPose::Idle => Color::srgb(0.95, 0.95, 1.0),
        PlayerPose::Bump => Color::srgb(1.0, 1.0, 0.15),
        PlayerPose::KneesBent => Color::srgb(0.8, 0.8, 0.6),
        PlayerPose::LeftBlock | PlayerPose::RightBlock => Color::srgb(0.3, 0.6, 1.0),
        PlayerPose::MiddleBlock => Color::srgb(0.2, 0.35, 0.95),
        PlayerPose::SplitBlock => Color::srgb(0.6, 0.3, 1.0),
    }
}

pub fn passer_color(side: Side) -> Color {
    match side {
        Side::Upper => Palette::PASSER_UPPER,
        Side::Lower | Side::Spiker => Palette::PASSER_LOWER,
    }
}

//! Court lines and the block-box outline, drawn with gizmos each frame.

use bevy::prelude::*;
use vb_config::GameConfig;
use vb_core::{court_to_world, CourtBody, Player};
use vb_physics::block_box;

#[cfg(not(any(test, feature = "headless")))]
use crate::palette::Palette;
#[cfg(not(any(test, feature = "headless")))]
use vb_core::GameConfigRes;

/// Grid segments in court space: verticals every `interval` from x = 0, then horizontals.
pub fn grid_segments(width: f32, height: f32, interval: f32) -> Vec<(Vec2, Vec2)> {
    if interval <= 0.0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut x = 0.0;
    while x < width {
        out.push((Vec2::new(x, 0.0), Vec2::new(x, height)));
        x += interval;
    }
    let mut y = 0.0;
    while y < height {
        out.push((Vec2::new(0.0, y), Vec2::new(width, y)));
        y += interval;
    }
    out
}

/// The player's block box in world space, if a block is up.
pub fn block_box_world(cfg: &GameConfig, body: &CourtBody, player: &Player) -> Option<Rect> {
    let court = Vec2::new(cfg.court.width, cfg.court.height);
    block_box(body.rect(), cfg.player.size, player.block).map(|r| {
        let c = court_to_world(r.center(), court);
        Rect::from_center_size(c, r.size())
    })
}

#[cfg(not(any(test, feature = "headless")))]
pub fn draw_court(cfg: Res<GameConfigRes>, mut gizmos: Gizmos) {
    let c = &cfg.0;
    let court = Vec2::new(c.court.width, c.court.height);
    let to_world = |p: Vec2| court_to_world(p, court);
    if c.draw_grid {
        for (a, b) in grid_segments(court.x, court.y, c.court.grid_interval) {
            gizmos.line_2d(to_world(a), to_world(b), Palette::GRID);
        }
    }
    let floor = c.court.floor_y;
    gizmos.line_2d(
        to_world(Vec2::new(0.0, floor)),
        to_world(Vec2::new(court.x, floor)),
        Palette::FLOOR,
    );
    let kill = c.court.kill_line_y;
    gizmos.line_2d(
        to_world(Vec2::new(0.0, kill)),
        to_world(Vec2::new(court.x, kill)),
        Palette::KILL_LINE,
    );
}

#[cfg(not(any(test, feature = "headless")))]
pub fn draw_block_box(
    cfg: Res<GameConfigRes>,
    players: Query<(&CourtBody, &Player)>,
    mut gizmos: Gizmos,
) {
    if !cfg.0.draw_block_box {
        return;
    }
    for (body, player) in &players {
        if let Some(r) = block_box_world(&cfg.0, body, player) {
            gizmos.rect_2d(
                Isometry2d::from_translation(r.center()),
                r.size(),
                Palette::BLOCK_BOX,
            );
        }
    }
}

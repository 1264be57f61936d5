use bevy::prelude::*;
use event_core::{EventQueue, EventSourceTag, FrameCounter, GameEvent};
use vb_config::GameConfig;
use vb_core::{Ball, CourtBody, GameConfigRes, MatchPhase, Player, PlayerPose, RallyStats, Side};
use vb_physics::{block_box, overlaps};

use crate::{control::ControlIntent, LOG_TARGET};

/// A block stops the spike: blocking, ball inside the block box, above the kill line, last hit by the spiker.
pub fn is_kill_block(
    cfg: &GameConfig,
    player_body: &CourtBody,
    player: &Player,
    ball_body: &CourtBody,
    ball: &Ball,
) -> bool {
    if ball.side != Side::Spiker || ball_body.center.y >= cfg.court.kill_line_y {
        return false;
    }
    block_box(player_body.rect(), cfg.player.size, player.block)
        .is_some_and(|hit_box| overlaps(ball_body.rect(), hit_box))
}

pub fn check_kill_block(
    cfg: Res<GameConfigRes>,
    frame: Res<FrameCounter>,
    mut phase: ResMut<MatchPhase>,
    mut stats: ResMut<RallyStats>,
    mut queue: ResMut<EventQueue>,
    players: Query<(&CourtBody, &Player)>,
    balls: Query<(&CourtBody, &Ball)>,
) {
    for (pb, player) in &players {
        for (bb, ball) in &balls {
            if is_kill_block(&cfg.0, pb, player, bb, ball) {
                *phase = MatchPhase::KillBlock;
                stats.kill_blocks += 1;
                info!(
                    target: LOG_TARGET,
                    block = player.block.label(),
                    ball_y = bb.center.y,
                    total = stats.kill_blocks,
                    "KILL BLOCK"
                );
                queue.enqueue_game(GameEvent::KillBlock, EventSourceTag::System, frame.0);
                return;
            }
        }
    }
}

/// Sprite pose: an active block wins, then bump, then knees bent.
pub fn choose_pose(player: &Player, intent: &ControlIntent) -> PlayerPose {
    if let Some(pose) = PlayerPose::for_block(player.block) {
        pose
    } else if intent.bump {
        PlayerPose::Bump
    } else if intent.knees_bent {
        PlayerPose::KneesBent
    } else {
        PlayerPose::Idle
    }
}

pub fn select_player_pose(mut q: Query<(&mut Player, &ControlIntent)>) {
    for (mut player, intent) in &mut q {
        let pose = choose_pose(&player, intent);
        if player.pose != pose {
            player.pose = pose;
        }
    }
}

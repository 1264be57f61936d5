//! NPC behaviour: passers shadow the ball, the spiker times a jump under it.

use bevy::prelude::*;
use event_core::{EventQueue, EventSourceTag, FrameCounter, GameEvent};
use rand::Rng;
use vb_core::{Aim, Ball, CourtBody, GameConfigRes, GameRng, Passer, Side, Spiker};
use vb_physics::{follow_x, integrate, Stun};

use crate::LOG_TARGET;

/// Passers follow the ball horizontally and hold their lane. Stunned passers stand still.
pub fn passers_follow_ball(
    cfg: Res<GameConfigRes>,
    balls: Query<&CourtBody, With<Ball>>,
    mut passers: Query<(&mut CourtBody, &Passer), (Without<Ball>, Without<Stun>)>,
) {
    let Ok(ball) = balls.single() else {
        return;
    };
    for (mut body, passer) in &mut passers {
        follow_x(&mut body, ball.center.x, cfg.0.npc.follow_speed);
        body.center.y = passer.home_y;
    }
}

/// Should the spiker take off under this ball?
pub fn spiker_ready(spiker: &CourtBody, ball_body: &CourtBody, ball: &Ball, cfg: &vb_config::SpikerConfig) -> bool {
    ball.side == Side::Upper
        && ball_body.velocity.y > cfg.trigger_fall_speed
        && (ball_body.center.x - spiker.center.x).abs() < cfg.align_tolerance
}

#[allow(clippy::type_complexity)]
pub fn spiker_ai(
    cfg: Res<GameConfigRes>,
    frame: Res<FrameCounter>,
    mut rng: ResMut<GameRng>,
    mut queue: ResMut<EventQueue>,
    balls: Query<(&CourtBody, &Ball)>,
    mut spikers: Query<(&mut CourtBody, &mut Spiker, Has<Stun>), Without<Ball>>,
) {
    let c = &cfg.0;
    let Ok((ball_body, ball)) = balls.single() else {
        return;
    };
    for (mut body, mut spiker, stunned) in &mut spikers {
        if spiker.jumping {
            integrate(&mut body, c.spiker.gravity);
            if body.velocity.y > 0.0 && body.center.y >= spiker.origin_y {
                body.center.y = spiker.origin_y;
                body.velocity.y = 0.0;
                spiker.jumping = false;
                spiker.primed = false;
            }
            continue;
        }
        if stunned {
            continue;
        }
        follow_x(&mut body, ball_body.center.x, c.npc.follow_speed);
        if spiker_ready(&body, ball_body, ball, &c.spiker) {
            spiker.aim = if rng.0.gen_bool(0.5) {
                Aim::Left
            } else {
                Aim::Right
            };
            spiker.jumping = true;
            spiker.primed = true;
            body.velocity.y = -c.spiker.jump_speed;
            debug!(target: LOG_TARGET, aim = ?spiker.aim, "spiker jumps");
            queue.enqueue_game(GameEvent::SpikeLaunched, EventSourceTag::System, frame.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, vy: f32) -> CourtBody {
        let mut b = CourtBody::new(Vec2::new(x, 150.0), Vec2::splat(20.0));
        b.velocity.y = vy;
        b
    }

    #[test]
    fn spiker_waits_for_fast_upper_ball() {
        let cfg = vb_config::SpikerConfig::default();
        let spiker = CourtBody::new(Vec2::new(500.0, 330.0), Vec2::new(40.0, 80.0));
        let upper = Ball {
            side: Side::Upper,
            bouncing: false,
        };
        assert!(spiker_ready(&spiker, &ball_at(505.0, 6.0), &upper, &cfg));
        assert!(!spiker_ready(&spiker, &ball_at(505.0, 4.0), &upper, &cfg), "too slow");
        assert!(!spiker_ready(&spiker, &ball_at(520.0, 6.0), &upper, &cfg), "not aligned");
        let lower = Ball::default();
        assert!(!spiker_ready(&spiker, &ball_at(505.0, 6.0), &lower, &cfg), "wrong side");
    }
}

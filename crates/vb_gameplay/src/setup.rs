//! Spawning the rally actors and putting them back in place.

use bevy::prelude::*;
use vb_config::GameConfig;
use vb_core::{Ball, CourtBody, GameConfigRes, Passer, Player, Side, Spiker};
use vb_physics::Stun;

/// Where a new rally drops the ball (court space).
pub fn serve_position(cfg: &GameConfig) -> Vec2 {
    Vec2::new(cfg.court.width * 0.25, cfg.court.apex_y + cfg.ball.radius * 5.0)
}

pub fn player_start(cfg: &GameConfig) -> CourtBody {
    let size = Vec2::splat(cfg.player.size);
    CourtBody::new(
        Vec2::new(cfg.court.width * 0.5, cfg.court.floor_y - size.y * 0.5),
        size,
    )
}

pub fn ball_start(cfg: &GameConfig) -> CourtBody {
    CourtBody::new(serve_position(cfg), Vec2::splat(cfg.ball.radius * 2.0))
}

fn passer_start(cfg: &GameConfig, y: f32) -> CourtBody {
    CourtBody::new(
        Vec2::new(cfg.court.width * 0.25, y),
        Vec2::new(cfg.npc.width, cfg.npc.height),
    )
}

fn spiker_start(cfg: &GameConfig) -> CourtBody {
    CourtBody::new(
        Vec2::new(cfg.court.width * 0.5, cfg.spiker.origin_y),
        Vec2::new(cfg.spiker.width, cfg.spiker.height),
    )
}

/// Startup: one player, one ball, the two passers and the spiker.
pub fn spawn_rally(mut commands: Commands, cfg: Res<GameConfigRes>) {
    let c = &cfg.0;
    commands.spawn((
        Name::new("Player"),
        player_start(c),
        Player::new(c.player.default_jump_power),
        crate::control::ControlIntent::default(),
    ));
    commands.spawn((Name::new("Ball"), ball_start(c), Ball::default()));
    commands.spawn((
        Name::new("LowerPasser"),
        passer_start(c, c.npc.lower_y),
        Passer {
            side: Side::Lower,
            home_y: c.npc.lower_y,
        },
    ));
    commands.spawn((
        Name::new("UpperPasser"),
        passer_start(c, c.npc.upper_y),
        Passer {
            side: Side::Upper,
            home_y: c.npc.upper_y,
        },
    ));
    commands.spawn((
        Name::new("Spiker"),
        spiker_start(c),
        Spiker::new(c.spiker.origin_y),
    ));
}

/// Put every actor back at its start and clear stuns. Used by the reset handler.
pub fn reset_rally(world: &mut World) {
    let cfg = world.resource::<GameConfigRes>().0.clone();

    let mut players = world.query::<(&mut CourtBody, &mut Player)>();
    for (mut body, mut player) in players.iter_mut(world) {
        let keep_power = player.jump_power;
        *body = player_start(&cfg);
        *player = Player::new(keep_power);
    }
    let mut balls = world.query::<(&mut CourtBody, &mut Ball)>();
    for (mut body, mut ball) in balls.iter_mut(world) {
        *body = ball_start(&cfg);
        *ball = Ball::default();
    }
    let mut passers = world.query::<(&mut CourtBody, &Passer)>();
    for (mut body, passer) in passers.iter_mut(world) {
        *body = passer_start(&cfg, passer.home_y);
    }
    let mut spikers = world.query::<(&mut CourtBody, &mut Spiker)>();
    for (mut body, mut spiker) in spikers.iter_mut(world) {
        *body = spiker_start(&cfg);
        *spiker = Spiker::new(cfg.spiker.origin_y);
    }
    let stunned: Vec<Entity> = world
        .query_filtered::<Entity, With<Stun>>()
        .iter(world)
        .collect();
    for e in stunned {
        world.entity_mut(e).remove::<Stun>();
    }
}

/// Re-serve when the ball comes to rest on the court floor.
pub fn serve_dead_ball(cfg: Res<GameConfigRes>, mut q: Query<(&mut CourtBody, &mut Ball)>) {
    let c = &cfg.0;
    for (mut body, mut ball) in &mut q {
        if body.bottom() >= c.court.height && body.velocity.y == 0.0 {
            *body = ball_start(c);
            *ball = Ball::default();
            debug!(target: crate::LOG_TARGET, "ball dead, re-serving");
        }
    }
}

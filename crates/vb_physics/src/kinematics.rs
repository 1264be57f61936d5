//! Per-tick arcade stepping. Velocities are pixels per fixed tick and gravity is
//! added to vertical velocity once per tick, after the position update.

use bevy::prelude::*;
use vb_core::{Ball, CourtBody};

/// Explicit Euler: move by the current velocity, then accelerate.
pub fn integrate(body: &mut CourtBody, gravity: f32) {
    body.center += body.velocity;
    body.velocity.y += gravity;
}

/// Rest the body on `floor_y` if it reached it while moving down. Returns true on contact.
pub fn clamp_to_floor(body: &mut CourtBody, floor_y: f32) -> bool {
    if body.bottom() >= floor_y && body.velocity.y >= 0.0 {
        body.center.y = floor_y - body.size.y * 0.5;
        body.velocity.y = 0.0;
        true
    } else {
        false
    }
}

/// Keep the body inside `[0, width]` horizontally. Returns true when clamped.
pub fn clamp_horizontal(body: &mut CourtBody, width: f32) -> bool {
    let half = body.size.x * 0.5;
    let max_center = (width - half).max(half);
    let clamped = body.center.x.clamp(half, max_center);
    if clamped != body.center.x {
        body.center.x = clamped;
        body.velocity.x = 0.0;
        true
    } else {
        false
    }
}

/// Start a jump if grounded. Returns whether the jump happened.
pub fn player_jump(body: &mut CourtBody, grounded: &mut bool, power: f32) -> bool {
    if !*grounded {
        return false;
    }
    body.velocity.y = -power.abs();
    *grounded = false;
    true
}

/// Shift horizontally by `dx`, staying inside the court.
pub fn move_horizontal(body: &mut CourtBody, dx: f32, width: f32) {
    body.center.x += dx;
    clamp_horizontal(body, width);
}

/// Step toward `target_x` at `speed`, snapping when within one step.
pub fn follow_x(body: &mut CourtBody, target_x: f32, speed: f32) {
    let dx = target_x - body.center.x;
    if dx.abs() <= speed {
        body.center.x = target_x;
    } else {
        body.center.x += speed * dx.signum();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallStepParams {
    pub gravity: f32,
    pub bounce_speed: f32,
    pub apex_y: f32,
    pub court: Vec2,
}

/// Advance the ball one tick: constant rise while bouncing, gravity otherwise,
/// then clamp to the court floor and side walls.
pub fn step_ball(body: &mut CourtBody, ball: &mut Ball, p: &BallStepParams) {
    if ball.bouncing {
        body.velocity.y = -p.bounce_speed;
        body.center += body.velocity;
        if body.center.y <= p.apex_y {
            ball.bouncing = false;
        }
    } else {
        integrate(body, p.gravity);
    }
    clamp_to_floor(body, p.court.y);
    clamp_horizontal(body, p.court.x);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> CourtBody {
        CourtBody::new(Vec2::new(100.0, 100.0), Vec2::splat(20.0))
    }

    #[test]
    fn euler_moves_then_accelerates() {
        let mut b = body();
        b.velocity = Vec2::new(2.0, -3.0);
        integrate(&mut b, 0.5);
        assert_eq!(b.center, Vec2::new(102.0, 97.0));
        assert_eq!(b.velocity, Vec2::new(2.0, -2.5));
    }

    #[test]
    fn floor_clamp_zeroes_fall() {
        let mut b = body();
        b.center.y = 395.0;
        b.velocity.y = 8.0;
        assert!(clamp_to_floor(&mut b, 400.0));
        assert_eq!(b.center.y, 390.0);
        assert_eq!(b.velocity.y, 0.0);
    }

    #[test]
    fn rising_body_is_not_floored() {
        let mut b = body();
        b.center.y = 395.0;
        b.velocity.y = -8.0;
        assert!(!clamp_to_floor(&mut b, 400.0));
    }

    #[test]
    fn horizontal_clamp_keeps_body_inside() {
        let mut b = body();
        move_horizontal(&mut b, -500.0, 1000.0);
        assert_eq!(b.left(), 0.0);
        move_horizontal(&mut b, 5000.0, 1000.0);
        assert_eq!(b.center.x, 990.0);
    }

    #[test]
    fn jump_only_from_ground() {
        let mut b = body();
        let mut grounded = true;
        assert!(player_jump(&mut b, &mut grounded, 15.0));
        assert_eq!(b.velocity.y, -15.0);
        assert!(!grounded);
        b.velocity.y = -3.0;
        assert!(!player_jump(&mut b, &mut grounded, 15.0));
        assert_eq!(b.velocity.y, -3.0);
    }

    #[test]
    fn jump_lands_back_on_floor() {
        let mut b = CourtBody::new(Vec2::new(100.0, 384.0), Vec2::splat(32.0));
        let mut grounded = true;
        player_jump(&mut b, &mut grounded, 15.0);
        let mut min_top = f32::MAX;
        for _ in 0..200 {
            integrate(&mut b, 0.5);
            min_top = min_top.min(b.top());
            if clamp_to_floor(&mut b, 400.0) {
                grounded = true;
                break;
            }
        }
        assert!(grounded);
        assert_eq!(b.bottom(), 400.0);
        // Apex of v^2 / 2g = 225 px above the start (within one tick).
        assert!((368.0 - min_top - 225.0).abs() <= 15.0, "min_top {min_top}");
    }

    #[test]
    fn follow_snaps_within_one_step() {
        let mut b = body();
        follow_x(&mut b, 103.0, 5.0);
        assert_eq!(b.center.x, 103.0);
        follow_x(&mut b, 200.0, 5.0);
        assert_eq!(b.center.x, 108.0);
        follow_x(&mut b, 0.0, 5.0);
        assert_eq!(b.center.x, 103.0);
    }

    #[test]
    fn bounce_rises_until_apex_then_falls() {
        let params = BallStepParams {
            gravity: 0.3,
            bounce_speed: 5.0,
            apex_y: 100.0,
            court: Vec2::new(1000.0, 600.0),
        };
        let mut b = CourtBody::new(Vec2::new(500.0, 300.0), Vec2::splat(20.0));
        let mut ball = Ball {
            bouncing: true,
            ..Default::default()
        };
        let mut ticks = 0;
        while ball.bouncing {
            step_ball(&mut b, &mut ball, &params);
            assert_eq!(b.velocity.y, -5.0);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(ticks, 40);
        assert!(b.center.y <= 100.0);
        step_ball(&mut b, &mut ball, &params);
        assert!((b.velocity.y - (-4.7)).abs() < 1e-5);
    }

    #[test]
    fn ball_rests_on_court_floor() {
        let params = BallStepParams {
            gravity: 0.3,
            bounce_speed: 5.0,
            apex_y: 100.0,
            court: Vec2::new(1000.0, 600.0),
        };
        let mut b = CourtBody::new(Vec2::new(500.0, 585.0), Vec2::splat(20.0));
        b.velocity.y = 9.0;
        let mut ball = Ball::default();
        step_ball(&mut b, &mut ball, &params);
        assert_eq!(b.bottom(), 600.0);
        assert_eq!(b.velocity.y, 0.0);
    }
}

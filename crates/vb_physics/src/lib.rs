// Arcade physics: hand-rolled kinematics instead of a rigid-body engine.
// Pure helpers live in `kinematics` / `collision`; the plugin wires the ball
// step, stun timers and contact resolution into the fixed schedule.

pub mod collision;
pub mod kinematics;
pub mod stun;

use bevy::prelude::*;
use vb_core::{
    match_playing, Ball, ContactSet, CourtBody, GameConfigRes, GameRng, MotionSet, Passer,
    RallyStats, Spiker,
};

pub use collision::{
    apply_contact, block_box, overlaps, pass_velocity, select_contact, BoxOffset,
    ContactCandidate, ContactKind, ContactParams,
};
pub use kinematics::{
    clamp_horizontal, clamp_to_floor, follow_x, integrate, move_horizontal, player_jump,
    step_ball, BallStepParams,
};
pub use stun::{tick_stuns, Stun};

const LOG_TARGET: &str = "vb_physics";

/// Fired when the ball touches an NPC.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BallContact {
    pub npc: Entity,
    pub kind: ContactKind,
}

pub fn step_ball_system(cfg: Res<GameConfigRes>, mut q: Query<(&mut CourtBody, &mut Ball)>) {
    let c = &cfg.0;
    let params = BallStepParams {
        gravity: c.ball.gravity,
        bounce_speed: c.ball.bounce_speed,
        apex_y: c.court.apex_y,
        court: Vec2::new(c.court.width, c.court.height),
    };
    for (mut body, mut ball) in &mut q {
        step_ball(&mut body, &mut ball, &params);
    }
}

#[allow(clippy::type_complexity)]
pub fn resolve_contacts_system(
    mut commands: Commands,
    cfg: Res<GameConfigRes>,
    mut rng: ResMut<GameRng>,
    mut contacts: EventWriter<BallContact>,
    mut balls: Query<(&mut CourtBody, &mut Ball)>,
    mut npcs: Query<
        (
            Entity,
            &CourtBody,
            Option<&Passer>,
            Option<&mut Spiker>,
            Has<Stun>,
        ),
        (Without<Ball>, Or<(With<Passer>, With<Spiker>)>),
    >,
) {
    let c = &cfg.0;
    let params = ContactParams {
        spike_speed: c.ball.spike_speed,
        bounce_speed: c.ball.bounce_speed,
        pass_speed_min: c.ball.pass_speed_min,
        pass_speed_max: c.ball.pass_speed_max,
        court_center_x: c.court.width * 0.5,
    };

    let mut entities = Vec::new();
    let mut candidates = Vec::new();
    for (e, body, passer, spiker, stunned) in &npcs {
        let kind = match (passer, spiker) {
            (Some(p), _) => ContactKind::Passer(p.side),
            (None, Some(s)) => ContactKind::Spiker(s.aim),
            (None, None) => continue,
        };
        entities.push(e);
        candidates.push(ContactCandidate {
            kind,
            rect: body.rect(),
            stunned,
        });
    }

    for (mut ball_body, mut ball) in &mut balls {
        let Some(i) = select_contact(&ball_body, &ball, &candidates) else {
            continue;
        };
        let (npc, kind) = (entities[i], candidates[i].kind);
        apply_contact(&mut ball_body, &mut ball, kind, &params, &mut rng.0);
        candidates[i].stunned = true;
        commands.entity(npc).insert(Stun::new(c.npc.stun_secs));
        if let ContactKind::Spiker(aim) = kind {
            if let Ok((_, _, _, Some(mut spiker), _)) = npcs.get_mut(npc) {
                spiker.primed = false;
            }
            info!(target: LOG_TARGET, ?aim, vx = ball_body.velocity.x, "spike");
        } else {
            debug!(target: LOG_TARGET, ?kind, vx = ball_body.velocity.x, "pass");
        }
        contacts.write(BallContact { npc, kind });
    }
}

/// Rally counters from this tick's contacts.
pub fn tally_contacts(mut contacts: EventReader<BallContact>, mut stats: ResMut<RallyStats>) {
    for contact in contacts.read() {
        match contact.kind {
            ContactKind::Spiker(_) => stats.spikes_faced += 1,
            ContactKind::Passer(_) => stats.passes += 1,
        }
    }
}

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BallContact>().add_systems(
            FixedUpdate,
            (
                step_ball_system.in_set(MotionSet),
                (tick_stuns, resolve_contacts_system, tally_contacts)
                    .chain()
                    .in_set(ContactSet),
            )
                .run_if(match_playing),
        );
    }
}

use bevy::prelude::*;
use event_core::{EventHandler, EventResult, GameEvent};
use vb_core::{CourtBody, MatchPhase, Player, RallyStats};
use vb_physics::player_jump;

use crate::{gesture::GestureState, setup::reset_rally, LOG_TARGET};

/// Launches the player. Jumps while not playing, or while airborne, are dropped.
pub struct JumpHandler;
impl EventHandler for JumpHandler {
    fn handle(&mut self, ev: &GameEvent, world: &mut World) -> EventResult {
        let GameEvent::Jump { power, source } = ev else {
            return EventResult::Ignored;
        };
        if !world.resource::<MatchPhase>().is_playing() {
            return EventResult::Ignored;
        }
        let mut jumped = false;
        let mut q = world.query::<(&mut CourtBody, &mut Player)>();
        for (mut body, mut player) in q.iter_mut(world) {
            let p = power.unwrap_or(player.jump_power);
            if player_jump(&mut body, &mut player.grounded, p) {
                debug!(target: LOG_TARGET, power = p, ?source, "jump");
                jumped = true;
            }
        }
        if jumped {
            EventResult::Handled
        } else {
            EventResult::Ignored
        }
    }
    fn name(&self) -> &'static str {
        "JumpHandler"
    }
}

/// Pause, reset, recalibrate and quit.
pub struct MatchFlowHandler;
impl EventHandler for MatchFlowHandler {
    fn handle(&mut self, ev: &GameEvent, world: &mut World) -> EventResult {
        match ev {
            GameEvent::Recalibrate => {
                let Some(mut gesture) = world.get_resource_mut::<GestureState>() else {
                    return EventResult::Error("no gesture state".into());
                };
                gesture.classifier.request_recalibration();
                info!(target: LOG_TARGET, "recalibration requested");
                EventResult::Handled
            }
            GameEvent::ResetRally => {
                restart(world);
                EventResult::Handled
            }
            GameEvent::TogglePause => {
                let phase = *world.resource::<MatchPhase>();
                match phase {
                    MatchPhase::Playing => *world.resource_mut::<MatchPhase>() = MatchPhase::Paused,
                    MatchPhase::Paused => *world.resource_mut::<MatchPhase>() = MatchPhase::Playing,
                    // Unpausing out of a kill block starts the next rally.
                    MatchPhase::KillBlock => restart(world),
                }
                info!(target: LOG_TARGET, phase = ?*world.resource::<MatchPhase>(), "phase");
                EventResult::Handled
            }
            GameEvent::Quit => {
                world.send_event(AppExit::Success);
                EventResult::Handled
            }
            _ => EventResult::Ignored,
        }
    }
    fn name(&self) -> &'static str {
        "MatchFlowHandler"
    }
}

fn restart(world: &mut World) {
    reset_rally(world);
    *world.resource_mut::<MatchPhase>() = MatchPhase::Playing;
    let mut stats = world.resource_mut::<RallyStats>();
    stats.resets += 1;
    info!(target: LOG_TARGET, resets = stats.resets, "rally reset");
}

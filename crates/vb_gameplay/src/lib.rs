//! The rally itself: spawns the actors, turns pose frames and keys into
//! player intent, drives the passers and the spiker, and applies the
//! kill-block rule. Match flow (jump, pause, reset, recalibrate, quit) runs
//! through `event_core` handlers.

pub mod control;
pub mod gesture;
pub mod handlers;
pub mod npc;
pub mod rules;
pub mod setup;

use bevy::prelude::*;
use event_core::{
    CooldownMiddleware, EventCoreAppExt, EventCorePlugin, KeyMappingMiddleware,
};
use vb_core::{match_playing, CaptureSet, ControlSet, CorePlugin, MotionSet, RuleSet};
use vb_physics::{step_ball_system, PhysicsPlugin};

pub use control::{apply_controls, step_player, ControlIntent, KeyboardControls};
pub use gesture::{drain_pose_feed, GestureState};
pub use handlers::{JumpHandler, MatchFlowHandler};
pub use npc::{passers_follow_ball, spiker_ai, spiker_ready};
pub use rules::{check_kill_block, choose_pose, is_kill_block, select_player_pose};
pub use setup::{reset_rally, serve_dead_ball, serve_position, spawn_rally};

pub(crate) const LOG_TARGET: &str = "vb_gameplay";

/// Frames a repeated pause / reset / recalibrate press is ignored for.
pub const FLOW_COOLDOWN_FRAMES: u64 = 10;

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<CorePlugin>() {
            app.add_plugins(CorePlugin);
        }
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<EventCorePlugin>() {
            app.add_plugins(EventCorePlugin::default());
        }

        app.init_resource::<GestureState>()
            .add_systems(Startup, spawn_rally)
            .add_systems(FixedUpdate, drain_pose_feed.in_set(CaptureSet))
            .add_systems(
                FixedUpdate,
                (
                    apply_controls.in_set(ControlSet),
                    (step_player, passers_follow_ball, spiker_ai)
                        .chain()
                        .in_set(MotionSet)
                        .before(step_ball_system),
                    (check_kill_block, select_player_pose, serve_dead_ball)
                        .chain()
                        .in_set(RuleSet),
                )
                    .run_if(match_playing),
            )
            .register_middleware(KeyMappingMiddleware::with_default_bindings())
            .register_middleware(CooldownMiddleware::new(FLOW_COOLDOWN_FRAMES).only(&[
                "TogglePause",
                "ResetRally",
                "Recalibrate",
            ]))
            .register_handler(JumpHandler)
            .register_handler(MatchFlowHandler);
    }
}

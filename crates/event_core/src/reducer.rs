use crate::{
    EventEnvelope, EventPayload, EventQueue, EventResult, EventSourceTag, FrameCounter,
    GameEvent, HandlerRegistry, MiddlewareChain,
};
use bevy::prelude::*;

const LOG_TARGET: &str = "event_core";

/// Exclusive system: drains current frame's queue, applies middleware sequentially, dispatches to handlers.
pub fn reducer_system(world: &mut World) {
    let frame_idx = world.resource::<FrameCounter>().0;
    // Drain events first (drop borrow afterwards)
    let events: Vec<EventEnvelope> = world.resource_mut::<EventQueue>().drain_incoming();
    for env in events.into_iter() {
        let maybe_final = world.resource_mut::<MiddlewareChain>().run(env);
        let Some(final_env) = maybe_final else {
            continue;
        };
        let result = match &final_env.payload {
            EventPayload::Game(g) => {
                // Use resource_scope to borrow registry & world simultaneously.
                world.resource_scope(|world, mut handlers: Mut<HandlerRegistry>| {
                    handlers.dispatch(g, world)
                })
            }
            // Unmapped raw input.
            EventPayload::Input(_) => EventResult::Ignored,
        };
        if let EventResult::Error(e) = &result {
            warn!(target: LOG_TARGET, kind = final_env.kind(), "handler error: {e}");
        }
        world
            .resource_mut::<EventQueue>()
            .push_journal(crate::queue::JournalEntry {
                event: final_env,
                result,
                frame_processed: frame_idx,
            });
    }
    // Promote deferred events
    world.resource_mut::<EventQueue>().promote_next_frame();
}

/// Helper for handlers to emit new events (which will be deferred to next frame).
pub fn emit_game_event(world: &mut World, game_event: GameEvent) {
    let frame = world.resource::<FrameCounter>().0;
    world
        .resource_mut::<EventQueue>()
        .enqueue_game(game_event, EventSourceTag::Handler, frame + 1);
}

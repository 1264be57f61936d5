//! Frame-stamped event reduction for the game.
//!
//! Raw key / mouse presses and gameplay signals are enqueued as
//! [`EventEnvelope`]s, run through a [`MiddlewareChain`] (key mapping,
//! debounce, cooldown, filters) and dispatched to registered
//! [`EventHandler`]s by an exclusive reducer in `PostUpdate`. Every processed
//! event lands in a bounded journal.

mod event;
pub mod handlers;
mod middleware;
mod queue;
mod reducer;

pub use event::*;
pub use middleware::*;
pub use queue::*;
pub use reducer::*;

use bevy::prelude::*;

/// Raw input is enqueued here; game systems that enqueue in `Update` may order after it.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct InputCollectSet;

pub struct EventCorePlugin {
    pub journal_capacity: usize,
}

impl Default for EventCorePlugin {
    fn default() -> Self {
        Self {
            journal_capacity: 512,
        }
    }
}

impl Plugin for EventCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameCounter>()
            .insert_resource(EventQueue::with_capacity(self.journal_capacity))
            .init_resource::<HandlerRegistry>()
            .init_resource::<MiddlewareChain>()
            .add_systems(PreUpdate, increment_frame_counter)
            .add_systems(Update, collect_input.in_set(InputCollectSet))
            .add_systems(PostUpdate, reducer_system);
    }
}

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct FrameCounter(pub u64);
fn increment_frame_counter(mut fc: ResMut<FrameCounter>) {
    fc.0 += 1;
}

/// Forward this frame's key and mouse presses as raw input events.
/// Input resources are optional so headless apps run without them.
pub fn collect_input(
    frame: Res<FrameCounter>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    mut queue: ResMut<EventQueue>,
) {
    if let Some(keys) = keys {
        for k in keys.get_just_pressed() {
            queue.enqueue_input(InputEvent::KeyDown(*k), frame.0);
        }
    }
    if let Some(mouse) = mouse {
        for b in mouse.get_just_pressed() {
            queue.enqueue_input(InputEvent::MouseDown(*b), frame.0);
        }
    }
}

pub trait EventCoreAppExt {
    fn register_handler<H: EventHandler + Send + Sync + 'static>(
        &mut self,
        handler: H,
    ) -> &mut Self;
    fn register_middleware<M: Middleware + Send + Sync + 'static>(&mut self, mw: M) -> &mut Self;
}

impl EventCoreAppExt for App {
    fn register_handler<H: EventHandler + Send + Sync + 'static>(
        &mut self,
        handler: H,
    ) -> &mut Self {
        let mut reg = self.world_mut().resource_mut::<HandlerRegistry>();
        reg.register(handler);
        self
    }
    fn register_middleware<M: Middleware + Send + Sync + 'static>(&mut self, mw: M) -> &mut Self {
        let mut chain = self.world_mut().resource_mut::<MiddlewareChain>();
        chain.add(mw);
        self
    }
}

use bevy::prelude::*;
use event_core::*;

fn jump() -> GameEvent {
    GameEvent::Jump {
        power: Some(16.0),
        source: ControlSource::Gesture,
    }
}

#[test]
fn debounce_blocks_duplicates_same_frame() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EventCorePlugin::default())
        .register_handler(handlers::TallyHandler)
        .register_middleware(DebounceMiddleware::new(0));
    let frame = app.world().resource::<FrameCounter>().0;
    for _ in 0..5 {
        app.world_mut()
            .resource_mut::<EventQueue>()
            .enqueue_game(jump(), EventSourceTag::Test, frame);
    }
    app.update();
    // Only first should pass
    assert_eq!(app.world().resource::<handlers::EventTally>().get("Jump"), 1);
}

#[test]
fn cooldown_blocks_until_frame_passes() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EventCorePlugin::default())
        .register_handler(handlers::TallyHandler)
        .register_middleware(CooldownMiddleware::new(2));
    let mut frame = app.world().resource::<FrameCounter>().0;
    for _ in 0..5 {
        app.world_mut()
            .resource_mut::<EventQueue>()
            .enqueue_game(jump(), EventSourceTag::Test, frame);
        app.update();
        frame += 1;
    }
    // Stamped frames 0..5 with a 2-frame cooldown pass at 0, 2 and 4.
    assert_eq!(app.world().resource::<handlers::EventTally>().get("Jump"), 3);
}

#[test]
fn restricted_cooldown_ignores_other_kinds() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EventCorePlugin::default())
        .register_handler(handlers::TallyHandler)
        .register_middleware(CooldownMiddleware::new(60).only(&["Jump"]));
    let frame = app.world().resource::<FrameCounter>().0;
    {
        let mut q = app.world_mut().resource_mut::<EventQueue>();
        for _ in 0..3 {
            q.enqueue_game(jump(), EventSourceTag::Test, frame);
            q.enqueue_game(GameEvent::TogglePause, EventSourceTag::Test, frame);
        }
    }
    app.update();
    let tally = app.world().resource::<handlers::EventTally>();
    assert_eq!(tally.get("Jump"), 1);
    assert_eq!(tally.get("TogglePause"), 3);
}

use bevy::prelude::*;
use event_core::*;

fn base_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EventCorePlugin::default())
        .register_handler(handlers::TallyHandler)
        .register_middleware(KeyMappingMiddleware::with_default_bindings());
    app
}

fn press(app: &mut App, input: InputEvent) {
    let frame = app.world().resource::<FrameCounter>().0;
    app.world_mut()
        .resource_mut::<EventQueue>()
        .enqueue_input(input, frame);
}

#[test]
fn key_mapping_converts_input() {
    let mut app = base_app();
    press(&mut app, InputEvent::KeyDown(KeyCode::Space));
    press(&mut app, InputEvent::KeyDown(KeyCode::Escape));
    press(&mut app, InputEvent::MouseDown(MouseButton::Right));
    app.update();
    let journal: Vec<_> = app.world().resource::<EventQueue>().journal().collect();
    assert!(journal.iter().any(|j| matches!(
        j.event.payload,
        EventPayload::Game(GameEvent::Jump {
            power: None,
            source: ControlSource::Keyboard
        })
    )));
    let tally = app.world().resource::<handlers::EventTally>();
    assert_eq!(tally.get("Quit"), 1);
    assert_eq!(tally.get("ResetRally"), 1);
}

#[test]
fn filter_short_circuits() {
    let mut app = base_app();
    app.register_middleware(FilterMiddleware::new("NoPause", |env| {
        !matches!(env.payload, EventPayload::Game(GameEvent::TogglePause))
    }));
    assert_eq!(
        app.world().resource::<MiddlewareChain>().names(),
        vec!["KeyMapping", "NoPause"]
    );
    press(&mut app, InputEvent::KeyDown(KeyCode::KeyP));
    app.update();
    let journal: Vec<_> = app.world().resource::<EventQueue>().journal().collect();
    assert!(!journal
        .iter()
        .any(|j| matches!(j.event.payload, EventPayload::Game(GameEvent::TogglePause))));
}

#[test]
fn collect_input_forwards_just_pressed_keys() {
    let mut app = base_app();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyC);
    app.update();
    assert_eq!(
        app.world().resource::<handlers::EventTally>().get("Recalibrate"),
        1
    );
}

#[test]
fn unbound_keys_are_journaled_as_ignored_input() {
    let mut app = base_app();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyZ);
    app.update();
    let journal: Vec<_> = app.world().resource::<EventQueue>().journal().collect();
    assert_eq!(journal.len(), 1);
    assert!(matches!(
        journal[0].event.payload,
        EventPayload::Input(InputEvent::KeyDown(KeyCode::KeyZ))
    ));
    assert_eq!(journal[0].result, EventResult::Ignored);
    assert!(app.world().get_resource::<handlers::EventTally>().is_none());
}

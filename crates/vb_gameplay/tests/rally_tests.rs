use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use event_core::{EventQueue, EventSourceTag, FrameCounter, GameEvent};
use std::time::Duration;
use vb_capture::{spawn_capture, CaptureHandle, Pacing, PoseFrame, ScriptedSource};
use vb_core::{Ball, CourtBody, GameConfigRes, MatchPhase, Player, RallyStats, Side};
use vb_gameplay::{serve_position, GameplayPlugin, GestureState};
use vb_gesture::test_support::{jumping_body, standing_body};
use vb_gesture::BodyLandmarks;

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    // Fixed ticks are driven by hand below.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.insert_resource(GameConfigRes::default());
    app.add_plugins(GameplayPlugin);
    app.update();
    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn send(app: &mut App, ev: GameEvent) {
    let frame = app.world().resource::<FrameCounter>().0;
    app.world_mut()
        .resource_mut::<EventQueue>()
        .enqueue_game(ev, EventSourceTag::Test, frame);
    app.update();
}

fn feed(app: &mut App, frames: Vec<PoseFrame>) {
    let handle = spawn_capture(ScriptedSource::new(frames), Pacing::AsFast).expect("spawn");
    for _ in 0..200 {
        if handle.is_finished() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(handle.is_finished(), "scripted capture should finish quickly");
    app.insert_resource::<CaptureHandle>(handle);
}

fn player(app: &mut App) -> (CourtBody, Player) {
    let mut q = app.world_mut().query::<(&CourtBody, &Player)>();
    let (b, p) = q.single(app.world()).expect("one player");
    (*b, p.clone())
}

fn ball(app: &mut App) -> (CourtBody, Ball) {
    let mut q = app.world_mut().query::<(&CourtBody, &Ball)>();
    let (b, ball) = q.single(app.world()).expect("one ball");
    (*b, *ball)
}

fn set_ball(app: &mut App, body: CourtBody, state: Ball) {
    let mut q = app.world_mut().query::<(&mut CourtBody, &mut Ball)>();
    let (mut b, mut ball) = q.single_mut(app.world_mut()).expect("one ball");
    *b = body;
    *ball = state;
}

fn journal_kinds(app: &App) -> Vec<&'static str> {
    app.world()
        .resource::<EventQueue>()
        .journal()
        .map(|j| j.event.kind())
        .collect()
}

/// Standing pose with the shoulders centred on `x` (camera space).
fn standing_at(x: f32) -> BodyLandmarks {
    let mut b = standing_body();
    b.left_shoulder.x = x - 0.1;
    b.right_shoulder.x = x + 0.1;
    b
}

#[test]
fn startup_spawns_rally_actors() {
    let mut app = app();
    let cfg = GameConfigRes::default().0;
    let (pb, p) = player(&mut app);
    assert!(p.grounded);
    assert_eq!(pb.bottom(), cfg.court.floor_y);
    let (bb, b) = ball(&mut app);
    assert_eq!(bb.center, serve_position(&cfg));
    assert_eq!(b.side, Side::Lower);
    let mut names = app.world_mut().query::<&Name>();
    let mut found: Vec<String> = names.iter(app.world()).map(|n| n.to_string()).collect();
    found.sort();
    assert_eq!(found, ["Ball", "LowerPasser", "Player", "Spiker", "UpperPasser"]);
}

#[test]
fn keyboard_space_jumps_with_stored_power() {
    let mut app = app();
    send(
        &mut app,
        GameEvent::Jump {
            power: None,
            source: event_core::ControlSource::Keyboard,
        },
    );
    let (pb, p) = player(&mut app);
    assert!(!p.grounded);
    assert_eq!(pb.velocity.y, -15.0);
}

#[test]
fn pose_feed_moves_player_and_jumps() {
    let mut app = app();
    let cfg = GameConfigRes::default().0;

    // Mirrored: shoulders at 0.3 land at 0.7 of the court.
    feed(&mut app, vec![PoseFrame::detected(0.0, standing_at(0.3))]);
    tick(&mut app);
    {
        let g = app.world().resource::<GestureState>();
        assert!(g.live);
        assert!(g.classifier.is_calibrated());
        assert_eq!(g.frames_seen, 1);
    }
    let (pb, _) = player(&mut app);
    assert!((pb.center.x - 0.7 * cfg.court.width).abs() < 1e-3);

    feed(&mut app, vec![PoseFrame::detected(0.5, jumping_body())]);
    tick(&mut app);
    app.update();
    let (pb, p) = player(&mut app);
    assert!(!p.grounded);
    // Arms hang below the shoulders in both frames: one active predicate.
    let power = app.world().resource::<GestureState>().snapshot.jump_power;
    assert!(power > cfg.gesture.base_power);
    assert_eq!(pb.velocity.y, -power);
    assert!(journal_kinds(&app).contains(&"Jump"));
}

#[test]
fn every_queued_pose_frame_is_classified() {
    let mut app = app();
    // Three frames arrive before a single tick; the jump is in the middle.
    feed(
        &mut app,
        vec![
            PoseFrame::detected(0.0, standing_body()),
            PoseFrame::detected(0.5, jumping_body()),
            PoseFrame::detected(0.6, standing_body()),
        ],
    );
    tick(&mut app);
    {
        let g = app.world().resource::<GestureState>();
        assert_eq!(g.frames_seen, 3);
        assert!(g.classifier.is_calibrated());
        assert!(!g.snapshot.jump);
    }
    app.update();
    assert_eq!(
        journal_kinds(&app).iter().filter(|k| **k == "Jump").count(),
        1
    );
    let (pb, p) = player(&mut app);
    assert!(!p.grounded);
    assert!(pb.velocity.y < 0.0);
}

#[test]
fn recalibrate_recaptures_baseline_on_next_frame() {
    let mut app = app();
    feed(&mut app, vec![PoseFrame::detected(0.0, standing_body())]);
    tick(&mut app);
    feed(&mut app, vec![PoseFrame::detected(0.2, standing_body())]);
    tick(&mut app);
    assert!(!app.world().resource::<GestureState>().snapshot.baseline_captured);

    send(&mut app, GameEvent::Recalibrate);
    feed(&mut app, vec![PoseFrame::detected(0.4, standing_body())]);
    tick(&mut app);
    assert!(app.world().resource::<GestureState>().snapshot.baseline_captured);
}

#[test]
fn blocked_spike_above_kill_line_is_kill_block_then_resets() {
    let mut app = app();
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ArrowUp);
    app.insert_resource(keys);

    {
        let mut q = app.world_mut().query::<(&mut CourtBody, &mut Player)>();
        let (mut b, mut p) = q.single_mut(app.world_mut()).expect("one player");
        b.center = Vec2::new(500.0, 166.0);
        p.grounded = false;
    }
    set_ball(
        &mut app,
        CourtBody::new(Vec2::new(500.0, 200.0), Vec2::splat(20.0)),
        Ball {
            side: Side::Spiker,
            bouncing: false,
        },
    );

    tick(&mut app);
    assert_eq!(*app.world().resource::<MatchPhase>(), MatchPhase::KillBlock);
    assert_eq!(app.world().resource::<RallyStats>().kill_blocks, 1);

    // Frozen while the kill block is shown.
    let (frozen, _) = ball(&mut app);
    tick(&mut app);
    assert_eq!(ball(&mut app).0.center, frozen.center);

    app.update();
    assert!(journal_kinds(&app).contains(&"KillBlock"));

    send(&mut app, GameEvent::TogglePause);
    assert_eq!(*app.world().resource::<MatchPhase>(), MatchPhase::Playing);
    assert_eq!(app.world().resource::<RallyStats>().resets, 1);
    let cfg = GameConfigRes::default().0;
    assert_eq!(ball(&mut app).0.center, serve_position(&cfg));
    assert!(player(&mut app).1.grounded);
}

#[test]
fn spike_below_kill_line_is_not_a_kill_block() {
    let mut app = app();
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ArrowUp);
    app.insert_resource(keys);
    set_ball(
        &mut app,
        CourtBody::new(Vec2::new(500.0, 420.0), Vec2::splat(20.0)),
        Ball {
            side: Side::Spiker,
            bouncing: false,
        },
    );
    tick(&mut app);
    assert_eq!(*app.world().resource::<MatchPhase>(), MatchPhase::Playing);
    assert_eq!(app.world().resource::<RallyStats>().kill_blocks, 0);
}

#[test]
fn pause_freezes_and_resumes() {
    let mut app = app();
    send(&mut app, GameEvent::TogglePause);
    assert_eq!(*app.world().resource::<MatchPhase>(), MatchPhase::Paused);
    let before = ball(&mut app).0;
    for _ in 0..5 {
        tick(&mut app);
    }
    assert_eq!(ball(&mut app).0.center, before.center);

    // Past the cooldown window.
    for _ in 0..vb_gameplay::FLOW_COOLDOWN_FRAMES {
        app.update();
    }
    send(&mut app, GameEvent::TogglePause);
    assert_eq!(*app.world().resource::<MatchPhase>(), MatchPhase::Playing);
    tick(&mut app);
    assert_ne!(ball(&mut app).0.velocity, before.velocity);
}

#[test]
fn jump_ignored_while_paused() {
    let mut app = app();
    send(&mut app, GameEvent::TogglePause);
    send(
        &mut app,
        GameEvent::Jump {
            power: Some(20.0),
            source: event_core::ControlSource::Keyboard,
        },
    );
    assert!(player(&mut app).1.grounded);
}

#[test]
fn quit_requests_exit() {
    let mut app = app();
    send(&mut app, GameEvent::Quit);
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}

#[test]
fn served_ball_is_returned_by_a_passer() {
    let mut app = app();
    let cfg = GameConfigRes::default().0;
    let mut bumped = false;
    for _ in 0..600 {
        tick(&mut app);
        let (b, state) = ball(&mut app);
        bumped |= state.bouncing;
        assert!(b.center.x >= 0.0 && b.center.x <= cfg.court.width);
        assert!(b.bottom() <= cfg.court.height + 1e-3);
    }
    assert!(bumped, "a passer should return the serve");
    assert!(app.world().resource::<RallyStats>().passes >= 1);
}

use bevy::prelude::*;
use std::fmt;

/// Where a control event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlSource {
    Gesture,
    Keyboard,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// `power: None` jumps with the player's current jump power.
    Jump { power: Option<f32>, source: ControlSource },
    Recalibrate,
    ResetRally,
    TogglePause,
    /// A block stopped a spike above the kill line.
    KillBlock,
    SpikeLaunched,
    Quit,
}

impl GameEvent {
    /// Stable per-variant key used by middlewares and tallies.
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Jump { .. } => "Jump",
            GameEvent::Recalibrate => "Recalibrate",
            GameEvent::ResetRally => "ResetRally",
            GameEvent::TogglePause => "TogglePause",
            GameEvent::KillBlock => "KillBlock",
            GameEvent::SpikeLaunched => "SpikeLaunched",
            GameEvent::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    MouseDown(MouseButton),
}

/// Unified payload type wrapping game + raw input events.
#[derive(Clone)]
pub enum EventPayload {
    Game(GameEvent),
    Input(InputEvent),
}
impl fmt::Debug for EventPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Game(g) => write!(f, "Game::{g:?}"),
            Self::Input(i) => write!(f, "Input::{i:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSourceTag {
    System,
    Input,
    Gesture,
    Handler,
    Test,
}

/// Envelope adds metadata required for middleware and journaling.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub payload: EventPayload,
    pub source: EventSourceTag,
    pub frame_enqueued: u64,
}

impl EventEnvelope {
    pub fn new(payload: EventPayload, source: EventSourceTag, frame: u64) -> Self {
        Self {
            payload,
            source,
            frame_enqueued: frame,
        }
    }

    pub fn kind(&self) -> &'static str {
        match &self.payload {
            EventPayload::Game(g) => g.kind(),
            EventPayload::Input(_) => "Input",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    Handled,
    Ignored,
    Error(String),
}

pub trait EventHandler: Send + Sync {
    fn handle(&mut self, ev: &GameEvent, world: &mut World) -> EventResult;
    fn name(&self) -> &'static str;
}

/// Registry storing boxed handler trait objects.
#[derive(Resource, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn EventHandler>>,
}
impl HandlerRegistry {
    pub fn register<H: EventHandler + 'static>(&mut self, h: H) {
        self.handlers.push(Box::new(h));
    }
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }
    /// Offer the event to every handler in registration order; the first error stops dispatch.
    pub fn dispatch(&mut self, ev: &GameEvent, world: &mut World) -> EventResult {
        let mut any = false;
        for h in self.handlers.iter_mut() {
            match h.handle(ev, world) {
                EventResult::Handled => any = true,
                EventResult::Ignored => {}
                e @ EventResult::Error(_) => return e,
            }
        }
        if any {
            EventResult::Handled
        } else {
            EventResult::Ignored
        }
    }
}

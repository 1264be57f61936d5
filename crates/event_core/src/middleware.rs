use crate::{ControlSource, EventEnvelope, EventPayload, GameEvent, InputEvent};
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

pub trait Middleware: Send + Sync {
    fn name(&self) -> &'static str;
    fn process(&mut self, ev: EventEnvelope) -> Option<EventEnvelope>;
}

#[derive(Resource, Default)]
pub struct MiddlewareChain {
    chain: Vec<Box<dyn Middleware>>,
}
impl MiddlewareChain {
    pub fn add<M: Middleware + 'static>(&mut self, mw: M) {
        self.chain.push(Box::new(mw));
    }
    pub fn names(&self) -> Vec<&'static str> {
        self.chain.iter().map(|m| m.name()).collect()
    }
    /// Pass the event through every middleware in order; `None` once any of them drops it.
    pub fn run(&mut self, ev: EventEnvelope) -> Option<EventEnvelope> {
        let mut cur = ev;
        for mw in self.chain.iter_mut() {
            cur = mw.process(cur)?;
        }
        Some(cur)
    }
}

/// Simple filter middleware using predicate closure (boxed) mainly for tests.
pub struct FilterMiddleware {
    predicate: Box<dyn Fn(&EventEnvelope) -> bool + Send + Sync>,
    name: &'static str,
}
impl FilterMiddleware {
    pub fn new(
        name: &'static str,
        pred: impl Fn(&EventEnvelope) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(pred),
            name,
        }
    }
}
impl Middleware for FilterMiddleware {
    fn name(&self) -> &'static str {
        self.name
    }
    fn process(&mut self, ev: EventEnvelope) -> Option<EventEnvelope> {
        (self.predicate)(&ev).then_some(ev)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyMappingOutput {
    Game(GameEvent),
}

/// Transforms raw key / mouse presses into game events. Unmapped input passes through.
#[derive(Default)]
pub struct KeyMappingMiddleware {
    keys: HashMap<KeyCode, KeyMappingOutput>,
    buttons: HashMap<MouseButton, KeyMappingOutput>,
}

impl KeyMappingMiddleware {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Space jump, C recalibrate, R / right mouse reset, P pause, Q / Escape quit.
    pub fn with_default_bindings() -> Self {
        let mut km = Self::empty();
        km.map(
            KeyCode::Space,
            KeyMappingOutput::Game(GameEvent::Jump {
                power: None,
                source: ControlSource::Keyboard,
            }),
        )
        .map(KeyCode::KeyC, KeyMappingOutput::Game(GameEvent::Recalibrate))
        .map(KeyCode::KeyR, KeyMappingOutput::Game(GameEvent::ResetRally))
        .map(KeyCode::KeyP, KeyMappingOutput::Game(GameEvent::TogglePause))
        .map(KeyCode::KeyQ, KeyMappingOutput::Game(GameEvent::Quit))
        .map(KeyCode::Escape, KeyMappingOutput::Game(GameEvent::Quit))
        .map_button(
            MouseButton::Right,
            KeyMappingOutput::Game(GameEvent::ResetRally),
        );
        km
    }

    pub fn map(&mut self, key: KeyCode, out: KeyMappingOutput) -> &mut Self {
        self.keys.insert(key, out);
        self
    }

    pub fn map_button(&mut self, button: MouseButton, out: KeyMappingOutput) -> &mut Self {
        self.buttons.insert(button, out);
        self
    }
}

impl Middleware for KeyMappingMiddleware {
    fn name(&self) -> &'static str {
        "KeyMapping"
    }
    fn process(&mut self, ev: EventEnvelope) -> Option<EventEnvelope> {
        let mapped = match &ev.payload {
            EventPayload::Input(InputEvent::KeyDown(code)) => self.keys.get(code),
            EventPayload::Input(InputEvent::MouseDown(button)) => self.buttons.get(button),
            EventPayload::Game(_) => None,
        };
        match mapped {
            Some(KeyMappingOutput::Game(game_ev)) => Some(EventEnvelope {
                payload: EventPayload::Game(game_ev.clone()),
                ..ev
            }),
            None => Some(ev),
        }
    }
}

/// Debounce duplicate events of same kind within a frame window.
pub struct DebounceMiddleware {
    window_frames: u64,
    last_seen: HashMap<&'static str, u64>,
}
impl DebounceMiddleware {
    pub fn new(window_frames: u64) -> Self {
        Self {
            window_frames,
            last_seen: HashMap::new(),
        }
    }
}
impl Middleware for DebounceMiddleware {
    fn name(&self) -> &'static str {
        "Debounce"
    }
    fn process(&mut self, ev: EventEnvelope) -> Option<EventEnvelope> {
        let key = ev.kind();
        let frame = ev.frame_enqueued;
        if let Some(&last) = self.last_seen.get(key) {
            if frame.saturating_sub(last) <= self.window_frames {
                return None;
            }
        }
        self.last_seen.insert(key, frame);
        Some(ev)
    }
}

/// Cooldown middleware enforcing minimum frame separation per event kind.
/// Restrict it to some kinds with [`CooldownMiddleware::only`].
pub struct CooldownMiddleware {
    cooldown: u64,
    kinds: Option<HashSet<&'static str>>,
    last_processed: HashMap<&'static str, u64>,
}
impl CooldownMiddleware {
    pub fn new(cooldown_frames: u64) -> Self {
        Self {
            cooldown: cooldown_frames,
            kinds: None,
            last_processed: HashMap::new(),
        }
    }
    pub fn only(mut self, kinds: &[&'static str]) -> Self {
        self.kinds = Some(kinds.iter().copied().collect());
        self
    }
}
impl Middleware for CooldownMiddleware {
    fn name(&self) -> &'static str {
        "Cooldown"
    }
    fn process(&mut self, ev: EventEnvelope) -> Option<EventEnvelope> {
        let key = ev.kind();
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(key) {
                return Some(ev);
            }
        }
        let frame = ev.frame_enqueued;
        if let Some(&last) = self.last_processed.get(key) {
            if frame < last + self.cooldown {
                return None;
            }
        }
        self.last_processed.insert(key, frame);
        Some(ev)
    }
}

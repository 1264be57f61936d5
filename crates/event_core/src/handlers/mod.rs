use crate::{EventHandler, EventResult, GameEvent};
use bevy::prelude::*;
use std::collections::BTreeMap;

/// Count of handled events per kind.
#[derive(Resource, Default, Debug)]
pub struct EventTally {
    pub counts: BTreeMap<&'static str, u32>,
}

impl EventTally {
    pub fn get(&self, kind: &str) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }
}

/// Records every game event it sees. Never claims the event as handled.
pub struct TallyHandler;
impl EventHandler for TallyHandler {
    fn handle(&mut self, ev: &GameEvent, world: &mut World) -> EventResult {
        let mut t = world.get_resource_or_insert_with::<EventTally>(Default::default);
        *t.counts.entry(ev.kind()).or_default() += 1;
        EventResult::Ignored
    }
    fn name(&self) -> &'static str {
        "TallyHandler"
    }
}

use crate::{EventEnvelope, EventPayload, EventResult, EventSourceTag, GameEvent, InputEvent};
use bevy::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub event: EventEnvelope,
    pub result: EventResult,
    pub frame_processed: u64,
}

/// Events waiting for the reducer plus a bounded journal of processed ones.
/// Events stamped for a later frame stay deferred until promoted.
#[derive(Resource)]
pub struct EventQueue {
    due: VecDeque<EventEnvelope>,
    deferred: VecDeque<EventEnvelope>,
    journal: VecDeque<JournalEntry>,
    cap: usize,
}

impl EventQueue {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            due: VecDeque::new(),
            deferred: VecDeque::new(),
            journal: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Shrinking drops the oldest entries.
    pub fn set_journal_capacity(&mut self, cap: usize) {
        self.cap = cap;
        let excess = self.journal.len().saturating_sub(cap);
        self.journal.drain(..excess);
    }

    pub fn enqueue(&mut self, ev: EventEnvelope, current_frame: u64) {
        let lane = if ev.frame_enqueued > current_frame {
            &mut self.deferred
        } else {
            &mut self.due
        };
        lane.push_back(ev);
    }

    /// Take every event due this frame, in arrival order.
    pub fn drain_incoming(&mut self) -> Vec<EventEnvelope> {
        self.due.drain(..).collect()
    }

    pub fn promote_next_frame(&mut self) {
        self.due.append(&mut self.deferred);
    }

    pub fn pending(&self) -> usize {
        self.due.len() + self.deferred.len()
    }

    pub fn push_journal(&mut self, entry: JournalEntry) {
        if self.cap == 0 {
            return;
        }
        while self.journal.len() >= self.cap {
            self.journal.pop_front();
        }
        self.journal.push_back(entry);
    }

    pub fn journal(&self) -> impl DoubleEndedIterator<Item = &JournalEntry> {
        self.journal.iter()
    }

    pub fn enqueue_game(&mut self, game: GameEvent, source: EventSourceTag, frame: u64) {
        let env = EventEnvelope::new(EventPayload::Game(game), source, frame);
        self.enqueue(env, frame);
    }

    pub fn enqueue_input(&mut self, input: InputEvent, frame: u64) {
        let env = EventEnvelope::new(EventPayload::Input(input), EventSourceTag::Input, frame);
        self.enqueue(env, frame);
    }
}

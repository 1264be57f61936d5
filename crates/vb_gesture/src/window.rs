use crate::predicates::GesturePredicate;
use std::collections::VecDeque;

/// Fixed-length FIFO of recent predicate samples.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    samples: VecDeque<bool>,
    capacity: usize,
}

impl RollingWindow {
    /// A zero capacity is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: bool) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// True when any retained sample is true.
    pub fn any(&self) -> bool {
        self.samples.iter().any(|s| *s)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// One rolling window per predicate, all sharing the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateHistory {
    windows: [RollingWindow; 5],
}

impl PredicateHistory {
    pub fn new(window_len: usize) -> Self {
        Self {
            windows: std::array::from_fn(|_| RollingWindow::new(window_len)),
        }
    }

    pub fn record(&mut self, predicate: GesturePredicate, sample: bool) {
        self.windows[predicate.index()].push(sample);
    }

    pub fn window(&self, predicate: GesturePredicate) -> &RollingWindow {
        &self.windows[predicate.index()]
    }

    /// Per-predicate "active" flags in [`GesturePredicate::ALL`] order.
    pub fn active(&self) -> [bool; 5] {
        std::array::from_fn(|i| self.windows[i].any())
    }

    pub fn active_count(&self) -> usize {
        self.windows.iter().filter(|w| w.any()).count()
    }

    pub fn clear(&mut self) {
        for w in &mut self.windows {
            w.clear();
        }
    }
}

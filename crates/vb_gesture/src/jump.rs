/// Cooldown gate for jump firings. Timestamps are seconds supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpDetector {
    cooldown: f64,
    last_fire: Option<f64>,
}

impl JumpDetector {
    pub fn new(cooldown: f64) -> Self {
        Self {
            cooldown: cooldown.max(0.0),
            last_fire: None,
        }
    }

    /// Returns true (and records `now`) when `airborne` holds and the cooldown has elapsed.
    pub fn check(&mut self, now: f64, airborne: bool) -> bool {
        if !airborne {
            return false;
        }
        let ready = match self.last_fire {
            None => true,
            Some(last) => now - last >= self.cooldown,
        };
        if ready {
            self.last_fire = Some(now);
        }
        ready
    }

    pub fn last_fire(&self) -> Option<f64> {
        self.last_fire
    }

    pub fn reset(&mut self) {
        self.last_fire = None;
    }
}

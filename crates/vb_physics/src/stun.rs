use bevy::prelude::*;

/// Present while an NPC ignores the ball and stops steering. Removed when the timer finishes.
#[derive(Component, Debug, Clone)]
pub struct Stun(pub Timer);

impl Stun {
    pub fn new(secs: f32) -> Self {
        Self(Timer::from_seconds(secs.max(0.0), TimerMode::Once))
    }

    pub fn remaining_secs(&self) -> f32 {
        self.0.remaining_secs()
    }
}

pub fn tick_stuns(mut commands: Commands, time: Res<Time>, mut q: Query<(Entity, &mut Stun)>) {
    for (e, mut stun) in &mut q {
        if stun.0.tick(time.delta()).finished() {
            commands.entity(e).remove::<Stun>();
        }
    }
}

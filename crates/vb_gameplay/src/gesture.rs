use bevy::prelude::*;
use event_core::{ControlSource, EventQueue, EventSourceTag, FrameCounter, GameEvent};
use vb_capture::CaptureHandle;
use vb_core::GameConfigRes;
use vb_gesture::{GestureClassifier, GestureSnapshot};

use crate::LOG_TARGET;

/// The game's classifier plus its latest output.
#[derive(Resource, Debug, Clone)]
pub struct GestureState {
    pub classifier: GestureClassifier,
    pub snapshot: GestureSnapshot,
    /// Any pose frame has arrived since startup. Keyboard controls win until then.
    pub live: bool,
    pub frames_seen: u64,
}

impl GestureState {
    pub fn new(classifier: GestureClassifier) -> Self {
        let snapshot = classifier.latest().clone();
        Self {
            classifier,
            snapshot,
            live: false,
            frames_seen: 0,
        }
    }
}

impl FromWorld for GestureState {
    fn from_world(world: &mut World) -> Self {
        let cfg = world
            .get_resource::<GameConfigRes>()
            .map(|c| c.0.gesture.clone())
            .unwrap_or_default();
        Self::new(GestureClassifier::from_config(&cfg))
    }
}

/// Classify every frame that arrived since the last tick, oldest first.
///
/// Controls follow the last snapshot. A jump fired anywhere in the batch is
/// queued once, with the power of the latest firing.
pub fn drain_pose_feed(
    feed: Option<Res<CaptureHandle>>,
    frame: Res<FrameCounter>,
    mut state: ResMut<GestureState>,
    mut queue: ResMut<EventQueue>,
) {
    let Some(feed) = feed else {
        return;
    };
    let mut batch = feed.drain_all();
    if batch.is_empty() {
        return;
    }
    batch.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let st = &mut *state;
    st.live = true;
    let mut jump_power = None;
    for pose in &batch {
        st.frames_seen += 1;
        let snap = st.classifier.update(pose.timestamp, pose.landmarks.as_ref());
        if snap.baseline_captured {
            let b = st.classifier.baseline();
            info!(
                target: LOG_TARGET,
                floor = b.floor_y,
                height = b.standing_height,
                knee = b.knee_level,
                "baseline captured"
            );
        }
        if snap.jump {
            jump_power = Some(snap.jump_power);
        }
        st.snapshot = snap;
    }
    if batch.len() > 1 {
        debug!(target: LOG_TARGET, frames = batch.len(), "classified pose backlog");
    }

    if let Some(power) = jump_power {
        queue.enqueue_game(
            GameEvent::Jump {
                power: Some(power),
                source: ControlSource::Gesture,
            },
            EventSourceTag::Gesture,
            frame.0,
        );
    }
}

//! Offline pass over a pose recording: run the classifier frame by frame and
//! report baseline, indicator transitions, block changes and jumps.

use std::io::Write;
use vb_capture::PoseSource;
use vb_gesture::{BlockType, GestureClassifier, GesturePredicate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSummary {
    pub frames: usize,
    pub detected: usize,
    pub jumps: usize,
    pub max_power: f32,
    /// Frames each predicate was active for, in [`GesturePredicate::ALL`] order.
    pub active_frames: [usize; 5],
}

pub fn analyze<S: PoseSource>(
    source: &mut S,
    classifier: &mut GestureClassifier,
    out: &mut impl Write,
) -> anyhow::Result<AnalysisSummary> {
    let mut summary = AnalysisSummary::default();
    let mut prev_active = [false; 5];
    let mut prev_block = BlockType::None;

    while let Some(frame) = source.next_frame()? {
        summary.frames += 1;
        let t = frame.timestamp;
        let snap = classifier.update(t, frame.landmarks.as_ref());
        if !snap.detected {
            continue;
        }
        summary.detected += 1;

        if snap.baseline_captured {
            let b = classifier.baseline();
            writeln!(
                out,
                "{t:8.2}s baseline floor={:.3} height={:.3} knees={:.3}",
                b.floor_y, b.standing_height, b.knee_level
            )?;
        }
        for p in GesturePredicate::ALL {
            let i = p.index();
            if snap.active[i] {
                summary.active_frames[i] += 1;
            }
            if snap.active[i] != prev_active[i] {
                let state = if snap.active[i] { "on" } else { "off" };
                writeln!(out, "{t:8.2}s {}: {state}", p.label())?;
            }
        }
        prev_active = snap.active;

        if snap.block != prev_block {
            writeln!(out, "{t:8.2}s block {}", snap.block.label())?;
            prev_block = snap.block;
        }
        if snap.jump {
            summary.jumps += 1;
            summary.max_power = summary.max_power.max(snap.jump_power);
            writeln!(
                out,
                "{t:8.2}s JUMP power={:.0} ({} indicators)",
                snap.jump_power,
                snap.active_count()
            )?;
        }
    }
    Ok(summary)
}

//! Background capture thread.
//!
//! The thread owns the [`PoseSource`] and pushes frames into an mpsc channel.
//! The game drains the channel once per tick and classifies every frame in it.
//! Shutdown is cooperative: an `AtomicBool` checked between frames, plus the
//! channel disconnecting when the handle is dropped.

use crate::{
    error::{CaptureError, CaptureResult},
    frame::PoseFrame,
    source::PoseSource,
};
use bevy::{
    log::{info, warn},
    prelude::Resource,
};
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
        Arc, Mutex,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

const LOG_TARGET: &str = "vb_capture";
/// Longest single sleep while pacing, so shutdown stays responsive.
const PACING_SLICE: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Deliver frames at the wall-clock rate implied by their timestamps.
    Realtime,
    /// Deliver frames as fast as the consumer accepts them.
    #[default]
    AsFast,
}

/// Owning handle to a running capture thread.
#[derive(Resource)]
pub struct CaptureHandle {
    rx: Mutex<Receiver<PoseFrame>>,
    shutdown: Arc<AtomicBool>,
    join: Option<JoinHandle<usize>>,
    name: String,
}

pub fn spawn_capture<S: PoseSource>(source: S, pacing: Pacing) -> CaptureResult<CaptureHandle> {
    let (tx, rx) = mpsc::channel();
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    let name = source.name().to_string();
    let join = thread::Builder::new()
        .name(format!("capture:{name}"))
        .spawn(move || run_capture(source, pacing, tx, flag))
        .map_err(|e| CaptureError::Spawn(e.to_string()))?;
    info!(target: LOG_TARGET, %name, ?pacing, "capture thread started");
    Ok(CaptureHandle {
        rx: Mutex::new(rx),
        shutdown,
        join: Some(join),
        name,
    })
}

fn run_capture<S: PoseSource>(
    mut source: S,
    pacing: Pacing,
    tx: Sender<PoseFrame>,
    shutdown: Arc<AtomicBool>,
) -> usize {
    let started = Instant::now();
    let mut first_ts: Option<f64> = None;
    let mut sent = 0usize;
    while !shutdown.load(Ordering::Relaxed) {
        let frame = match source.next_frame() {
            Ok(Some(f)) => f,
            Ok(None) => {
                info!(target: LOG_TARGET, name = source.name(), sent, "source exhausted");
                break;
            }
            Err(e) => {
                warn!(target: LOG_TARGET, name = source.name(), "capture stopped: {e}");
                break;
            }
        };
        if pacing == Pacing::Realtime {
            let base = *first_ts.get_or_insert(frame.timestamp);
            let due = Duration::from_secs_f64((frame.timestamp - base).max(0.0));
            while !shutdown.load(Ordering::Relaxed) {
                let elapsed = started.elapsed();
                if elapsed >= due {
                    break;
                }
                thread::sleep((due - elapsed).min(PACING_SLICE));
            }
        }
        if tx.send(frame).is_err() {
            break;
        }
        sent += 1;
    }
    sent
}

impl CaptureHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every frame received since the last drain, oldest first.
    pub fn drain_all(&self) -> Vec<PoseFrame> {
        let rx = self.rx.lock().unwrap_or_else(|p| p.into_inner());
        let mut out = Vec::new();
        while let Ok(f) = rx.try_recv() {
            out.push(f);
        }
        out
    }

    /// The thread has exited (source exhausted, failed or shut down).
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(|j| j.is_finished())
    }

    /// Signal the thread and wait for it. Returns the number of frames it sent.
    pub fn shutdown(&mut self) -> usize {
        self.shutdown.store(true, Ordering::Relaxed);
        let Some(join) = self.join.take() else {
            return 0;
        };
        match join.join() {
            Ok(sent) => sent,
            Err(_) => {
                warn!(target: LOG_TARGET, name = %self.name, "capture thread panicked");
                0
            }
        }
    }
}

impl fmt::Debug for CaptureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureHandle")
            .field("name", &self.name)
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;

    fn frames(n: usize) -> Vec<PoseFrame> {
        (0..n).map(|i| PoseFrame::empty(i as f64 * 0.01)).collect()
    }

    fn wait_finished(h: &CaptureHandle) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !h.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(h.is_finished(), "capture thread did not finish");
    }

    #[test]
    fn drains_everything_in_order() {
        let h = spawn_capture(ScriptedSource::new(frames(10)), Pacing::AsFast).expect("spawn");
        wait_finished(&h);
        let got = h.drain_all();
        assert_eq!(got.len(), 10);
        assert!(got.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(h.drain_all().is_empty());
    }

    #[test]
    fn debug_names_the_source() {
        let h = spawn_capture(ScriptedSource::new(frames(2)), Pacing::AsFast).expect("spawn");
        wait_finished(&h);
        let text = format!("{h:?}");
        assert!(text.contains("CaptureHandle"));
        assert!(text.contains(h.name()));
        assert!(text.contains("finished: true"));
    }

    #[test]
    fn shutdown_stops_realtime_thread_early() {
        // 100 frames a second apart would take minutes in realtime.
        let slow: Vec<PoseFrame> = (0..100).map(|i| PoseFrame::empty(i as f64)).collect();
        let mut h = spawn_capture(ScriptedSource::new(slow), Pacing::Realtime).expect("spawn");
        let begun = Instant::now();
        let sent = h.shutdown();
        assert!(sent < 100);
        assert!(begun.elapsed() < Duration::from_secs(2));
        assert!(h.is_finished());
    }
}

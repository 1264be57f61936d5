use crate::{
    error::{CaptureError, CaptureResult},
    frame::{parse_line, PoseFrame},
};
use bevy::log::{debug, warn};
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

const LOG_TARGET: &str = "vb_capture";

/// Anything that produces pose frames. Runs on the capture thread.
pub trait PoseSource: Send + 'static {
    /// Next frame, or `Ok(None)` when the source is exhausted.
    fn next_frame(&mut self) -> CaptureResult<Option<PoseFrame>>;
    fn name(&self) -> &str;
}

impl PoseSource for Box<dyn PoseSource> {
    fn next_frame(&mut self) -> CaptureResult<Option<PoseFrame>> {
        (**self).next_frame()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Replays a JSON-lines landmark recording.
///
/// Malformed lines are logged and skipped. When looping, the recording is
/// reopened at end of file and timestamps keep increasing across passes.
pub struct ReplaySource {
    reader: Box<dyn BufRead + Send>,
    path: Option<PathBuf>,
    name: String,
    looping: bool,
    line_no: usize,
    frames_this_pass: usize,
    skipped: usize,
    time_offset: f64,
    last_timestamp: f64,
}

impl ReplaySource {
    pub fn open(path: impl AsRef<Path>) -> CaptureResult<Self> {
        let path = path.as_ref();
        let file = open_recording(path)?;
        let mut src = Self::from_reader(BufReader::new(file));
        src.name = path.display().to_string();
        src.path = Some(path.to_path_buf());
        Ok(src)
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            path: None,
            name: "replay".into(),
            looping: false,
            line_no: 0,
            frames_this_pass: 0,
            skipped: 0,
            time_offset: 0.0,
            last_timestamp: 0.0,
        }
    }

    /// Restart from the top at end of file. Only effective for sources opened from a path.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Malformed lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn rewind(&mut self) -> CaptureResult<bool> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        if !self.looping || self.frames_this_pass == 0 {
            return Ok(false);
        }
        self.reader = Box::new(BufReader::new(open_recording(path)?));
        self.line_no = 0;
        self.frames_this_pass = 0;
        self.time_offset = self.last_timestamp;
        debug!(target: LOG_TARGET, name = %self.name, offset = self.time_offset, "replay looped");
        Ok(true)
    }
}

fn open_recording(path: &Path) -> CaptureResult<File> {
    if !path.exists() {
        return Err(CaptureError::NotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

impl PoseSource for ReplaySource {
    fn next_frame(&mut self) -> CaptureResult<Option<PoseFrame>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                if self.rewind()? {
                    continue;
                }
                return Ok(None);
            }
            self.line_no += 1;
            match parse_line(&line, self.line_no) {
                Ok(Some(mut frame)) => {
                    frame.timestamp += self.time_offset;
                    self.last_timestamp = frame.timestamp;
                    self.frames_this_pass += 1;
                    return Ok(Some(frame));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.skipped += 1;
                    warn!(target: LOG_TARGET, name = %self.name, "skipping: {e}");
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// In-memory frame queue; used by tests and tools.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<PoseFrame>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = PoseFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl PoseSource for ScriptedSource {
    fn next_frame(&mut self) -> CaptureResult<Option<PoseFrame>> {
        Ok(self.frames.pop_front())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::to_line;
    use std::io::{Cursor, Write};
    use vb_gesture::test_support::standing_body;

    fn recording(frames: &[PoseFrame], extra: &[&str]) -> String {
        let mut out = String::new();
        for f in frames {
            out.push_str(&to_line(f).expect("encode"));
            out.push('\n');
        }
        for l in extra {
            out.push_str(l);
            out.push('\n');
        }
        out
    }

    fn drain(src: &mut impl PoseSource) -> Vec<PoseFrame> {
        let mut v = Vec::new();
        while let Some(f) = src.next_frame().expect("frame") {
            v.push(f);
        }
        v
    }

    #[test]
    fn replay_skips_malformed_and_blank_lines() {
        let text = recording(
            &[PoseFrame::detected(0.0, standing_body())],
            &["", "garbage", r#"{"t": 0.2, "points": []}"#],
        );
        let mut src = ReplaySource::from_reader(Cursor::new(text.into_bytes()));
        let frames = drain(&mut src);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1], PoseFrame::empty(0.2));
        assert_eq!(src.skipped(), 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ReplaySource::open("does/not/exist.jsonl").err().expect("error");
        assert!(matches!(err, CaptureError::NotFound(_)));
    }

    #[test]
    fn looping_replay_keeps_time_monotonic() {
        let text = recording(
            &[
                PoseFrame::detected(0.5, standing_body()),
                PoseFrame::empty(1.0),
            ],
            &[],
        );
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        f.write_all(text.as_bytes()).expect("write");
        let mut src = ReplaySource::open(f.path()).expect("open").looping(true);
        let ts: Vec<f64> = (0..5)
            .map(|_| src.next_frame().expect("frame").expect("looping never ends").timestamp)
            .collect();
        assert_eq!(ts, vec![0.5, 1.0, 1.5, 2.0, 2.5]);
    }

    #[test]
    fn scripted_source_pops_in_order() {
        let mut src = ScriptedSource::new([PoseFrame::empty(0.0), PoseFrame::empty(1.0)]);
        assert_eq!(src.remaining(), 2);
        let frames = drain(&mut src);
        assert_eq!(frames[1].timestamp, 1.0);
        assert_eq!(src.name(), "scripted");
    }
}

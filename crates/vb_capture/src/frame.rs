use crate::error::{CaptureError, CaptureResult};
use serde::{Deserialize, Serialize};
use vb_gesture::BodyLandmarks;

/// One pose estimator result. `landmarks` is `None` when nobody was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseFrame {
    /// Seconds since the start of the capture.
    pub timestamp: f64,
    pub landmarks: Option<BodyLandmarks>,
}

impl PoseFrame {
    pub fn detected(timestamp: f64, landmarks: BodyLandmarks) -> Self {
        Self {
            timestamp,
            landmarks: Some(landmarks),
        }
    }

    pub fn empty(timestamp: f64) -> Self {
        Self {
            timestamp,
            landmarks: None,
        }
    }
}

/// Wire form of one recording line: `{"t": 0.5, "points": [[x, y], ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    pub t: f64,
    #[serde(default)]
    pub points: Vec<[f32; 2]>,
}

impl RawFrame {
    pub fn into_frame(self) -> PoseFrame {
        PoseFrame {
            timestamp: self.t,
            landmarks: BodyLandmarks::from_points(&self.points),
        }
    }
}

impl From<&PoseFrame> for RawFrame {
    fn from(f: &PoseFrame) -> Self {
        Self {
            t: f.timestamp,
            points: f.landmarks.map(|l| l.to_points()).unwrap_or_default(),
        }
    }
}

/// Parse one recording line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str, line_no: usize) -> CaptureResult<Option<PoseFrame>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<RawFrame>(trimmed)
        .map(|raw| Some(raw.into_frame()))
        .map_err(|source| CaptureError::Parse {
            line: line_no,
            source,
        })
}

/// Serialise a frame as a single recording line (no trailing newline).
pub fn to_line(frame: &PoseFrame) -> CaptureResult<String> {
    Ok(serde_json::to_string(&RawFrame::from(frame))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vb_gesture::test_support::standing_body;

    #[test]
    fn parses_full_frame() {
        let line = to_line(&PoseFrame::detected(1.25, standing_body())).expect("encode");
        let frame = parse_line(&line, 1).expect("parse").expect("frame");
        assert_eq!(frame.timestamp, 1.25);
        assert_eq!(frame.landmarks, Some(standing_body()));
    }

    #[test]
    fn missing_or_short_points_mean_no_detection() {
        let f = parse_line(r#"{"t": 0.5}"#, 1).expect("parse").expect("frame");
        assert_eq!(f, PoseFrame::empty(0.5));
        let f = parse_line(r#"{"t": 0.6, "points": [[0.5, 0.5]]}"#, 2)
            .expect("parse")
            .expect("frame");
        assert!(f.landmarks.is_none());
    }

    #[test]
    fn blank_line_is_skipped() {
        assert!(parse_line("   ", 3).expect("blank").is_none());
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let err = parse_line("{not json", 7).unwrap_err();
        assert!(matches!(err, CaptureError::Parse { line: 7, .. }));
        assert!(err.to_string().contains("line 7"));
    }
}

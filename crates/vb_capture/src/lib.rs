//! Pose capture: frame sources and the background thread that feeds the game.
//!
//! Real camera + pose estimator pipelines live outside this workspace; they plug
//! in by implementing [`PoseSource`]. Shipped sources replay a JSON-lines
//! recording ([`ReplaySource`]) or pop scripted frames ([`ScriptedSource`]).

pub mod error;
pub mod frame;
pub mod source;
pub mod thread;

pub use error::{CaptureError, CaptureResult};
pub use frame::{parse_line, to_line, PoseFrame, RawFrame};
pub use source::{PoseSource, ReplaySource, ScriptedSource};
pub use thread::{spawn_capture, CaptureHandle, Pacing};

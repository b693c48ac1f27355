//! livecap: live microphone captioning.
//!
//! Captures audio frames from a microphone, segments them into utterances
//! with an energy-based voice activity detector, transcribes each segment,
//! and optionally translates the result. The pipeline is three worker
//! threads joined by bounded queues:
//!
//! ```text
//! capture ──frames──▶ segmentation ──segments──▶ captioner ──captions──▶ UI
//! ```
//!
//! Typical usage: build a [`Config`], construct a [`Recorder`] and start it
//! with a [`FrameSource`], then hand the segment receiver to a
//! [`Captioner`].

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod captioner;
pub mod config;
pub mod defaults;
pub mod error;
pub mod queue;
pub mod recorder;
pub mod segment;
pub mod stt;
pub mod translate;

pub use audio::{Frame, FrameSource, MockFrameSource, ScriptPhase, rms};
pub use captioner::{Caption, Captioner};
pub use config::Config;
pub use error::{LivecapError, Result};
pub use queue::{Pop, QueueReceiver, QueueSender};
pub use recorder::{Recorder, RecorderHandle};
pub use segment::{Segment, Segmenter, SegmenterConfig};
pub use stt::{MockTranscriber, Transcriber, Transcription};
pub use translate::{MockTranslator, Translator};

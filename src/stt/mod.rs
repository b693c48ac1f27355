//! Speech-to-text interfaces.

pub mod transcriber;

pub use transcriber::{MockTranscriber, Transcriber, Transcription};

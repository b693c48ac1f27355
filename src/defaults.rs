//! Default configuration constants for livecap.
//!
//! Shared across config types so the library, tests, and any host
//! application agree on one set of tuned values.

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and provides a good balance
/// between quality and computational efficiency.
pub const SAMPLE_RATE: u32 = 16_000;

/// Default frame size in samples (~64ms at 16kHz).
///
/// The capture source delivers exactly this many samples per read; every
/// internal duration is measured in multiples of it.
pub const FRAME_SIZE: usize = 1024;

/// Default channel count (mono).
pub const CHANNELS: u16 = 1;

/// Default RMS energy threshold below which a frame counts as silence.
pub const SILENCE_THRESHOLD: f32 = 0.01;

/// Default sustained silence, in seconds, required to end an utterance.
///
/// The hysteresis window: brief dips below the threshold shorter than this
/// do not terminate a segment.
pub const SILENCE_SECS: f32 = 0.5;

/// Default minimum segment duration in seconds.
///
/// Segments shorter than this are too small to contain a word and waste a
/// transcription call, so the segmenter keeps accumulating past brief speech.
pub const MIN_RECORD_SECS: f32 = 0.5;

/// Default maximum segment duration in seconds.
///
/// Hard ceiling on segment length: bounds both memory growth and the latency
/// before a long utterance reaches the transcription engine.
pub const MAX_RECORD_SECS: f32 = 5.0;

/// Default overlap carried from one segment into the next, in seconds.
///
/// Zero disables carry-over. Enable (e.g. 0.2) when boundary words are being
/// clipped by an aggressive silence cutoff.
pub const OVERLAP_SECS: f32 = 0.0;

/// Timeout for blocking pops inside the worker loops, in milliseconds.
///
/// Bounds shutdown latency: workers re-check the stop flag at least this
/// often while waiting for data.
pub const POP_TIMEOUT_MS: u64 = 1000;

/// Frame queue capacity between the capture and segmentation workers.
pub const FRAME_QUEUE_CAPACITY: usize = 1024;

/// Segment output channel capacity.
pub const SEGMENT_QUEUE_CAPACITY: usize = 16;

/// Caption output channel capacity.
pub const CAPTION_QUEUE_CAPACITY: usize = 16;

/// Default transcription engine identifier.
pub const DEFAULT_ENGINE: &str = "whisper-large-v3-turbo";

/// Default language code for transcription.
///
/// "auto" lets the engine detect the spoken language. Set a specific code
/// (e.g. "ja", "en") to force a language.
pub const DEFAULT_LANGUAGE: &str = "auto";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Default translation target language.
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Minimum RMS energy for a segment to be worth transcribing.
///
/// Segments below this are silence/ambient noise — skip the engine entirely.
/// Set 10× below the VAD threshold so only truly silent max-duration
/// segments are rejected.
pub const MIN_SEGMENT_ENERGY: f32 = 0.001;

/// Transcripts that exactly match one of these are dropped.
///
/// Whisper-family models hallucinate these phrases on silent or noisy audio.
pub const FILTER_PHRASES: &[&str] = &[
    "ご視聴ありがとうございました",
    "おやすみなさい。",
    "ありがとうございました",
    "お疲れ様でした",
    "お待ちしております",
];

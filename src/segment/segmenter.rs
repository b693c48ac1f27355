//! Utterance segmentation state machine.
//!
//! Consumes capture frames in order, classifies each by RMS energy, and
//! cuts the stream into bounded segments using silence hysteresis plus
//! min/max duration policy. Synchronous and single-threaded; the recorder
//! worker owns the pop/timeout/shutdown loop around it.

use crate::audio::energy::rms;
use crate::audio::frame::Frame;
use crate::config::Config;
use crate::segment::Segment;

/// Segmentation parameters with all durations pre-converted to internal
/// units, so the hot loop never touches floating-point time math.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    pub sample_rate: u32,
    /// Samples per frame.
    pub frame_size: usize,
    /// When false, energy is ignored and only the max cutoff applies.
    pub vad_enabled: bool,
    /// RMS energy at or below which a frame counts as silence.
    pub silence_threshold: f32,
    /// Consecutive silent frames required to end a confirmed utterance.
    ///
    /// Rounded up from the configured duration so the hysteresis window
    /// always covers at least the full silence duration.
    pub silence_frames_needed: u32,
    /// Segment length floor in samples.
    pub min_record_samples: usize,
    /// Segment length ceiling in samples.
    pub max_record_samples: usize,
    /// Whole frames re-seeded into the next segment.
    pub overlap_frames: usize,
}

impl SegmenterConfig {
    /// Derives internal units from a validated `Config`.
    pub fn from_config(config: &Config) -> Self {
        let rate = config.audio.sample_rate as f64;
        let frame_size = config.audio.frame_size;
        let frame = frame_size as f64;

        Self {
            sample_rate: config.audio.sample_rate,
            frame_size,
            vad_enabled: config.vad.enabled,
            silence_threshold: config.vad.silence_threshold,
            silence_frames_needed: ((config.vad.silence_secs as f64 * rate) / frame).ceil() as u32,
            min_record_samples: (config.vad.min_record_secs as f64 * rate) as usize,
            max_record_samples: (config.vad.max_record_secs as f64 * rate) as usize,
            overlap_frames: ((config.vad.overlap_secs as f64 * rate) / frame).floor() as usize,
        }
    }

    fn overlap_samples(&self) -> usize {
        self.overlap_frames * self.frame_size
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// State machine that cuts a frame stream into utterance segments.
pub struct Segmenter {
    config: SegmenterConfig,
    /// Samples of the segment being accumulated.
    pending: Vec<f32>,
    /// Trailing samples of the last finalized segment, seeding the next pass.
    overlap_tail: Vec<f32>,
    /// True between the first frame of a pass and its finalization.
    pass_open: bool,
    /// Current run of sub-threshold frames.
    consecutive_silence: u32,
    /// Whether any frame of this pass crossed the threshold.
    is_speaking: bool,
}

impl Segmenter {
    /// Creates a segmenter with the given configuration.
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
            overlap_tail: Vec::new(),
            pass_open: false,
            consecutive_silence: 0,
            is_speaking: false,
        }
    }

    /// Returns true if a segmentation pass has unfinalized audio.
    pub fn has_pending(&self) -> bool {
        self.pass_open && !self.pending.is_empty()
    }

    /// Number of samples accumulated in the open pass.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Feeds one frame, returning a finalized segment when a boundary is hit.
    pub fn push_frame(&mut self, frame: Frame) -> Option<Segment> {
        if !self.pass_open {
            self.begin_pass();
        }

        self.pending.extend_from_slice(&frame.samples);

        if self.config.vad_enabled {
            if rms(&frame.samples) > self.config.silence_threshold {
                self.is_speaking = true;
                self.consecutive_silence = 0;
            } else {
                self.consecutive_silence += 1;
            }
        }

        // Hard ceiling first: fires regardless of speech state.
        if self.pending.len() >= self.config.max_record_samples {
            return Some(self.finalize(true));
        }

        // End of utterance: speech was confirmed, the silence run covers the
        // hysteresis window, and the floor is satisfied.
        if self.is_speaking
            && self.consecutive_silence >= self.config.silence_frames_needed
            && self.pending.len() >= self.config.min_record_samples
        {
            return Some(self.finalize(true));
        }

        None
    }

    /// Finalizes the open pass at shutdown, bypassing the minimum floor.
    ///
    /// Returns `None` when nothing is pending. No overlap tail is retained;
    /// there is no next pass.
    pub fn flush(&mut self) -> Option<Segment> {
        if !self.has_pending() {
            return None;
        }
        self.overlap_tail.clear();
        Some(self.finalize(false))
    }

    fn begin_pass(&mut self) {
        self.pending.clear();
        self.pending.extend_from_slice(&self.overlap_tail);
        self.overlap_tail.clear();
        self.consecutive_silence = 0;
        self.is_speaking = false;
        self.pass_open = true;
    }

    fn finalize(&mut self, retain_overlap: bool) -> Segment {
        let samples = std::mem::take(&mut self.pending);

        if retain_overlap {
            let keep = self.config.overlap_samples();
            if keep > 0 && samples.len() > keep {
                self.overlap_tail = samples[samples.len() - keep..].to_vec();
            } else {
                self.overlap_tail.clear();
            }
        }

        self.pass_open = false;
        self.consecutive_silence = 0;
        self.is_speaking = false;

        Segment::new(samples, self.config.sample_rate)
    }
}

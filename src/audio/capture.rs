//! Frame source abstraction for audio capture devices.

use crate::error::{LivecapError, Result};

/// A device that delivers fixed-size frames of normalized mono samples.
///
/// Implementations own their device handle exclusively; the capture worker
/// is the only caller for the lifetime of a recording. Swappable so tests
/// run against a scripted source instead of real hardware.
pub trait FrameSource: Send {
    /// Opens the device and begins capturing.
    fn start(&mut self) -> Result<()>;

    /// Stops capturing and releases the device.
    fn stop(&mut self) -> Result<()>;

    /// Reads the next frame, blocking until a full frame is available.
    ///
    /// A full frame contains exactly the configured frame size in samples.
    /// An empty vector from a finite source means the source is exhausted;
    /// from a live source it means no data yet (normal at startup).
    fn read_frame(&mut self) -> Result<Vec<f32>>;

    /// True for sources that end on their own (files, scripted tests).
    fn is_finite(&self) -> bool {
        false
    }
}

/// One phase of a scripted mock capture: `count` identical frames.
#[derive(Debug, Clone)]
pub struct ScriptPhase {
    pub samples: Vec<f32>,
    pub count: usize,
}

impl ScriptPhase {
    /// A phase of constant-amplitude frames (RMS equals the amplitude).
    pub fn constant(amplitude: f32, frame_size: usize, count: usize) -> Self {
        Self {
            samples: vec![amplitude; frame_size],
            count,
        }
    }
}

/// Mock frame source for testing.
///
/// Plays back scripted phases in order, then reports exhaustion (finite
/// mode) or keeps returning empty reads (live mode).
#[derive(Debug, Clone)]
pub struct MockFrameSource {
    phases: Vec<ScriptPhase>,
    phase_index: usize,
    emitted_in_phase: usize,
    started: bool,
    finite: bool,
    fail_start: bool,
    fail_read: bool,
    fail_stop: bool,
    error_message: String,
}

impl MockFrameSource {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            phase_index: 0,
            emitted_in_phase: 0,
            started: false,
            finite: true,
            fail_start: false,
            fail_read: false,
            fail_stop: false,
            error_message: "mock capture error".to_string(),
        }
    }

    /// Script the frames this source will play back.
    pub fn with_phases(mut self, phases: Vec<ScriptPhase>) -> Self {
        self.phases = phases;
        self
    }

    /// Behave like a live microphone: empty reads after the script instead
    /// of end-of-stream.
    pub fn as_live_source(mut self) -> Self {
        self.finite = false;
        self
    }

    /// Fail on `start`.
    pub fn with_start_failure(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Fail on `read_frame`.
    pub fn with_read_failure(mut self) -> Self {
        self.fail_read = true;
        self
    }

    /// Fail on `stop`.
    pub fn with_stop_failure(mut self) -> Self {
        self.fail_stop = true;
        self
    }

    /// Set the message used by injected failures.
    pub fn with_error_message(mut self, message: &str) -> Self {
        self.error_message = message.to_string();
        self
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn capture_error(&self) -> LivecapError {
        LivecapError::AudioCapture {
            message: self.error_message.clone(),
        }
    }
}

impl Default for MockFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for MockFrameSource {
    fn start(&mut self) -> Result<()> {
        if self.fail_start {
            return Err(self.capture_error());
        }
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.fail_stop {
            return Err(self.capture_error());
        }
        self.started = false;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Vec<f32>> {
        if self.fail_read {
            return Err(self.capture_error());
        }

        while self.phase_index < self.phases.len() {
            let phase = &self.phases[self.phase_index];
            if self.emitted_in_phase < phase.count {
                self.emitted_in_phase += 1;
                return Ok(phase.samples.clone());
            }
            self.phase_index += 1;
            self.emitted_in_phase = 0;
        }

        // Script exhausted: end-of-stream for finite sources, "no data yet"
        // for live ones.
        Ok(Vec::new())
    }

    fn is_finite(&self) -> bool {
        self.finite
    }
}

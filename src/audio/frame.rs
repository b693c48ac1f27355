//! The atomic unit of captured audio.

/// A fixed-size block of mono samples delivered by the capture source.
///
/// Immutable once queued: the capture worker creates it, the frame queue
/// owns it until the segmenter dequeues it.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Sequence number for ordering and gap detection.
    pub sequence: u64,
    /// Normalized samples in [-1.0, 1.0].
    pub samples: Vec<f32>,
}

impl Frame {
    pub fn new(sequence: u64, samples: Vec<f32>) -> Self {
        Self { sequence, samples }
    }

    /// Duration of this frame in milliseconds.
    pub fn duration_ms(&self, sample_rate: u32) -> u32 {
        (self.samples.len() as u32 * 1000) / sample_rate
    }
}

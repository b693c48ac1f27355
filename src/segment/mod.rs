//! Segment type and the segmentation state machine.

pub mod segmenter;

pub use segmenter::{Segmenter, SegmenterConfig};

/// A finalized, bounded span of audio handed to a transcription engine.
///
/// Built from whole capture frames; immutable after finalization.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Normalized mono samples.
    pub samples: Vec<f32>,
    /// Source sample rate in Hz.
    pub sample_rate: u32,
}

impl Segment {
    /// Creates a segment from finalized samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples in the segment.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the segment holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the segment in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        (self.samples.len() as u64 * 1000 / self.sample_rate as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_len_and_duration() {
        let segment = Segment::new(vec![0.0; 8000], 16000);
        assert_eq!(segment.len(), 8000);
        assert!(!segment.is_empty());
        assert_eq!(segment.duration_ms(), 500);
    }

    #[test]
    fn test_empty_segment() {
        let segment = Segment::new(Vec::new(), 16000);
        assert!(segment.is_empty());
        assert_eq!(segment.duration_ms(), 0);
    }
}

use crate::defaults;
use crate::error::{LivecapError, Result};
use crate::segment::Segment;
use std::sync::{Arc, Mutex, PoisonError};

/// Result of transcribing one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    /// Transcribed text.
    pub text: String,
    /// Language the engine detected or was forced to use.
    pub language: String,
}

/// Trait for speech-to-text engines.
///
/// Engine selection and model identity are configuration; the pipeline only
/// sees this interface. Implementations must be shareable across threads.
pub trait Transcriber: Send + Sync {
    /// Transcribes a finished segment.
    ///
    /// `language` is a hint: `"auto"` requests detection, anything else
    /// forces that language.
    fn transcribe(&self, segment: &Segment, language: &str) -> Result<Transcription>;

    /// Identifier of the loaded engine/model.
    fn engine_name(&self) -> &str;

    /// Whether the engine is loaded and usable.
    fn is_ready(&self) -> bool;
}

/// Allow sharing one engine across consumers.
impl<T: Transcriber> Transcriber for Arc<T> {
    fn transcribe(&self, segment: &Segment, language: &str) -> Result<Transcription> {
        (**self).transcribe(segment, language)
    }

    fn engine_name(&self) -> &str {
        (**self).engine_name()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Mock transcription engine for testing.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    engine_name: String,
    response: String,
    language: String,
    should_fail: bool,
    /// Sample counts of every segment received, for pipeline assertions.
    received_lengths: Arc<Mutex<Vec<usize>>>,
}

impl MockTranscriber {
    pub fn new(engine_name: &str) -> Self {
        Self {
            engine_name: engine_name.to_string(),
            response: "mock transcription".to_string(),
            language: "en".to_string(),
            should_fail: false,
            received_lengths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return a specific text for every segment.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Report a specific detected language.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Fail every transcribe call.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Sample counts of the segments transcribed so far.
    pub fn received_lengths(&self) -> Vec<usize> {
        self.received_lengths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, segment: &Segment, language: &str) -> Result<Transcription> {
        if self.should_fail {
            return Err(LivecapError::Transcription {
                message: "mock transcription failure".to_string(),
            });
        }

        self.received_lengths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(segment.len());

        let language = if language == defaults::AUTO_LANGUAGE {
            self.language.clone()
        } else {
            language.to_string()
        };

        Ok(Transcription {
            text: self.response.clone(),
            language,
        })
    }

    fn engine_name(&self) -> &str {
        &self.engine_name
    }

    fn is_ready(&self) -> bool {
        !self.should_fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(samples: usize) -> Segment {
        Segment::new(vec![0.0; samples], 16000)
    }

    #[test]
    fn test_mock_returns_response_and_detected_language() {
        let transcriber = MockTranscriber::new("test-engine")
            .with_response("こんにちは")
            .with_language("ja");

        let result = transcriber.transcribe(&segment(1024), "auto").unwrap();
        assert_eq!(result.text, "こんにちは");
        assert_eq!(result.language, "ja");
    }

    #[test]
    fn test_mock_honors_forced_language() {
        let transcriber = MockTranscriber::new("test-engine").with_language("ja");
        let result = transcriber.transcribe(&segment(1024), "en").unwrap();
        assert_eq!(result.language, "en");
    }

    #[test]
    fn test_mock_failure() {
        let transcriber = MockTranscriber::new("test-engine").with_failure();
        assert!(!transcriber.is_ready());
        assert!(matches!(
            transcriber.transcribe(&segment(1024), "auto"),
            Err(LivecapError::Transcription { .. })
        ));
    }

    #[test]
    fn test_mock_records_segment_lengths() {
        let transcriber = MockTranscriber::new("test-engine");
        transcriber.transcribe(&segment(1024), "auto").unwrap();
        transcriber.transcribe(&segment(2048), "auto").unwrap();
        assert_eq!(transcriber.received_lengths(), vec![1024, 2048]);
    }

    #[test]
    fn test_engine_name() {
        let transcriber = MockTranscriber::new("whisper-large-v3-turbo");
        assert_eq!(transcriber.engine_name(), "whisper-large-v3-turbo");
    }

    #[test]
    fn test_trait_is_object_safe() {
        let transcriber: Box<dyn Transcriber> =
            Box::new(MockTranscriber::new("boxed").with_response("ok"));
        let result = transcriber.transcribe(&segment(16), "auto").unwrap();
        assert_eq!(result.text, "ok");
    }

    #[test]
    fn test_arc_sharing() {
        let transcriber = Arc::new(MockTranscriber::new("shared"));
        let clone = transcriber.clone();
        clone.transcribe(&segment(512), "auto").unwrap();
        assert_eq!(transcriber.received_lengths(), vec![512]);
    }
}

//! Translation interface for transcribed text.

use crate::error::{LivecapError, Result};

/// Trait for text translation engines.
///
/// Invoked downstream of transcription, only when translation is enabled
/// and a direction could be determined from the detected language.
pub trait Translator: Send + Sync {
    /// Translates `text` from `source` to `target` language.
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// Mock translator for testing.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    response: Option<String>,
    should_fail: bool,
}

impl MockTranslator {
    /// By default, echoes the input tagged with the target language.
    pub fn new() -> Self {
        Self {
            response: None,
            should_fail: false,
        }
    }

    /// Return a fixed translation for every call.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = Some(response.to_string());
        self
    }

    /// Fail every translate call.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for MockTranslator {
    fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String> {
        if self.should_fail {
            return Err(LivecapError::Translation {
                message: "mock translation failure".to_string(),
            });
        }
        Ok(match &self.response {
            Some(response) => response.clone(),
            None => format!("[{target}] {text}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_echoes_with_target_tag() {
        let translator = MockTranslator::new();
        let result = translator.translate("こんにちは", "ja", "en").unwrap();
        assert_eq!(result, "[en] こんにちは");
    }

    #[test]
    fn test_mock_fixed_response() {
        let translator = MockTranslator::new().with_response("hello");
        assert_eq!(translator.translate("こんにちは", "ja", "en").unwrap(), "hello");
    }

    #[test]
    fn test_mock_failure() {
        let translator = MockTranslator::new().with_failure();
        assert!(matches!(
            translator.translate("x", "ja", "en"),
            Err(LivecapError::Translation { .. })
        ));
    }

    #[test]
    fn test_trait_is_object_safe() {
        let translator: Box<dyn Translator> = Box::new(MockTranslator::new());
        assert!(translator.translate("hi", "en", "ja").is_ok());
    }
}

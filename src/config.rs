use crate::defaults;
use crate::error::{LivecapError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub vad: VadConfig,
    pub stt: SttConfig,
    pub translation: TranslationConfig,
    pub filter: FilterConfig,
}

/// Audio capture configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub device: Option<String>,
    pub sample_rate: u32,
    /// Samples per capture frame.
    pub frame_size: usize,
    pub channels: u16,
    /// Segmentation worker pop timeout in milliseconds (bounds shutdown latency).
    pub pop_timeout_ms: u64,
}

/// Voice activity detection and segmentation policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VadConfig {
    /// When false, segments are cut purely by max duration (fixed mode).
    pub enabled: bool,
    /// RMS energy at or below which a frame counts as silence.
    pub silence_threshold: f32,
    /// Sustained silence required to end an utterance, in seconds.
    pub silence_secs: f32,
    /// Minimum segment duration in seconds.
    pub min_record_secs: f32,
    /// Maximum segment duration in seconds (hard ceiling).
    pub max_record_secs: f32,
    /// Trailing audio re-seeded into the next segment, in seconds.
    pub overlap_secs: f32,
}

/// Transcription engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub engine: String,
    pub language: String,
}

/// Translation stage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub target_language: String,
}

/// Transcript filtering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// Transcripts exactly matching one of these phrases are dropped.
    pub phrases: Vec<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            sample_rate: defaults::SAMPLE_RATE,
            frame_size: defaults::FRAME_SIZE,
            channels: defaults::CHANNELS,
            pop_timeout_ms: defaults::POP_TIMEOUT_MS,
        }
    }
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            silence_threshold: defaults::SILENCE_THRESHOLD,
            silence_secs: defaults::SILENCE_SECS,
            min_record_secs: defaults::MIN_RECORD_SECS,
            max_record_secs: defaults::MAX_RECORD_SECS,
            overlap_secs: defaults::OVERLAP_SECS,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            engine: defaults::DEFAULT_ENGINE.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target_language: defaults::DEFAULT_TARGET_LANGUAGE.to_string(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            phrases: defaults::FILTER_PHRASES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Missing fields use default values; invalid TOML is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LivecapError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                LivecapError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file, or return defaults if it is missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(LivecapError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported:
    /// - LIVECAP_ENGINE → stt.engine
    /// - LIVECAP_LANGUAGE → stt.language
    /// - LIVECAP_TARGET_LANGUAGE → translation.target_language
    /// - LIVECAP_AUDIO_DEVICE → audio.device
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(engine) = std::env::var("LIVECAP_ENGINE")
            && !engine.is_empty()
        {
            self.stt.engine = engine;
        }

        if let Ok(language) = std::env::var("LIVECAP_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language;
        }

        if let Ok(target) = std::env::var("LIVECAP_TARGET_LANGUAGE")
            && !target.is_empty()
        {
            self.translation.target_language = target;
        }

        if let Ok(device) = std::env::var("LIVECAP_AUDIO_DEVICE")
            && !device.is_empty()
        {
            self.audio.device = Some(device);
        }

        self
    }

    /// Validates the parameter combination, failing fast before any worker
    /// is launched.
    pub fn validate(&self) -> Result<()> {
        fn invalid(key: &str, message: &str) -> LivecapError {
            LivecapError::ConfigInvalidValue {
                key: key.to_string(),
                message: message.to_string(),
            }
        }

        if self.audio.sample_rate == 0 {
            return Err(invalid("audio.sample_rate", "must be positive"));
        }
        if self.audio.frame_size == 0 {
            return Err(invalid("audio.frame_size", "must be positive"));
        }
        if self.audio.channels == 0 {
            return Err(invalid("audio.channels", "must be positive"));
        }
        if self.audio.pop_timeout_ms == 0 {
            return Err(invalid("audio.pop_timeout_ms", "must be positive"));
        }
        if !self.vad.silence_threshold.is_finite() || self.vad.silence_threshold < 0.0 {
            return Err(invalid(
                "vad.silence_threshold",
                "must be a non-negative number",
            ));
        }
        if !(self.vad.silence_secs > 0.0) {
            return Err(invalid("vad.silence_secs", "must be positive"));
        }
        if !(self.vad.min_record_secs > 0.0) {
            return Err(invalid("vad.min_record_secs", "must be positive"));
        }
        if !(self.vad.max_record_secs > 0.0) {
            return Err(invalid("vad.max_record_secs", "must be positive"));
        }
        if self.vad.min_record_secs > self.vad.max_record_secs {
            return Err(invalid(
                "vad.min_record_secs",
                "must not exceed vad.max_record_secs",
            ));
        }
        if !(self.vad.overlap_secs >= 0.0) {
            return Err(invalid("vad.overlap_secs", "must be non-negative"));
        }
        if self.vad.overlap_secs >= self.vad.max_record_secs {
            return Err(invalid(
                "vad.overlap_secs",
                "must be shorter than vad.max_record_secs",
            ));
        }
        Ok(())
    }
}

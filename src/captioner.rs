//! Caption worker: segments → transcription → optional translation.
//!
//! Drains the recorder's segment channel, runs each segment through the
//! transcription engine, optionally translates, and emits captions in
//! segment order. Engine failures are reported and the segment dropped;
//! they never terminate the worker. Only a closed-and-drained segment
//! channel ends it.

use crate::audio::energy::rms;
use crate::config::Config;
use crate::defaults;
use crate::queue::{self, Pop, QueueReceiver, QueueSender};
use crate::segment::Segment;
use crate::stt::Transcriber;
use crate::translate::Translator;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One transcribed (and possibly translated) utterance, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    /// Transcribed text.
    pub text: String,
    /// Translation, when enabled and a direction was determined.
    pub translation: Option<String>,
    /// Detected or forced language of `text`.
    pub language: String,
}

/// Consumer that turns segments into captions.
pub struct Captioner {
    transcriber: Arc<dyn Transcriber>,
    translator: Option<Arc<dyn Translator>>,
    /// Translation only runs when this is set in config, even if a
    /// translator is attached.
    translation_enabled: bool,
    /// Language hint passed to the engine ("auto" or a code).
    language: String,
    /// Translation target; segments already in it are not translated.
    target_language: String,
    /// Transcripts matching one of these exactly are dropped.
    filter_phrases: Vec<String>,
    /// Segments quieter than this skip the engine entirely.
    min_energy: f32,
}

impl Captioner {
    /// Creates a captioner from the shared configuration.
    pub fn new(config: &Config, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            transcriber,
            translator: None,
            translation_enabled: config.translation.enabled,
            language: config.stt.language.clone(),
            target_language: config.translation.target_language.clone(),
            filter_phrases: config.filter.phrases.clone(),
            min_energy: defaults::MIN_SEGMENT_ENERGY,
        }
    }

    /// Attaches a translator. It only runs when translation is enabled in
    /// the configuration.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Overrides the energy floor below which segments are skipped.
    pub fn with_min_energy(mut self, min_energy: f32) -> Self {
        self.min_energy = min_energy;
        self
    }

    /// Processes one segment. `None` means dropped: too quiet, an engine
    /// failure, an empty transcript, or a filtered phrase.
    pub fn caption_segment(&self, segment: &Segment) -> Option<Caption> {
        // Silence-only segments (e.g. a max-duration cut of pure silence)
        // are not worth an engine call.
        if rms(&segment.samples) < self.min_energy {
            return None;
        }

        let transcription = match self.transcriber.transcribe(segment, &self.language) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("livecap: {e}");
                return None;
            }
        };

        let text = transcription.text.trim();
        if text.is_empty() || self.filter_phrases.iter().any(|p| p == text) {
            return None;
        }

        let translation = self.translate(text, &transcription.language);

        Some(Caption {
            text: text.to_string(),
            translation,
            language: transcription.language,
        })
    }

    /// Translation direction comes from the detected language: only runs
    /// when the text is not already in the target language.
    fn translate(&self, text: &str, source: &str) -> Option<String> {
        if !self.translation_enabled {
            return None;
        }
        let translator = self.translator.as_ref()?;
        if source.is_empty() || source == self.target_language {
            return None;
        }
        match translator.translate(text, source, &self.target_language) {
            Ok(translated) => Some(translated),
            Err(e) => {
                eprintln!("livecap: {e}");
                None
            }
        }
    }

    /// Runs the caption loop until the segment channel closes.
    ///
    /// Long stretches with no segments (silence) just keep waiting; the
    /// presentation side must tolerate that, and it does — the caption
    /// channel simply stays quiet.
    pub fn run(self, segments: QueueReceiver<Segment>, captions: QueueSender<Caption>) {
        loop {
            match segments.pop(Duration::from_millis(defaults::POP_TIMEOUT_MS)) {
                Pop::Item(segment) => {
                    if let Some(caption) = self.caption_segment(&segment)
                        && captions.push(caption).is_err()
                    {
                        break;
                    }
                }
                Pop::TimedOut => continue,
                Pop::Closed => break,
            }
        }
        captions.close();
    }

    /// Spawns the caption loop on its own thread, returning the caption
    /// receiver for the presentation layer.
    pub fn spawn(
        self,
        segments: QueueReceiver<Segment>,
    ) -> (QueueReceiver<Caption>, JoinHandle<()>) {
        let (caption_tx, caption_rx) = queue::channel(defaults::CAPTION_QUEUE_CAPACITY);
        let handle = thread::spawn(move || self.run(segments, caption_tx));
        (caption_rx, handle)
    }
}

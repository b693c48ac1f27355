//! End-to-end pipeline tests: scripted frame source through recorder,
//! segmenter, and captioner to the caption channel.

use livecap::{
    Caption, Captioner, Config, MockFrameSource, MockTranscriber, MockTranslator, Pop,
    QueueReceiver, Recorder, ScriptPhase,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const CHUNK: usize = 1024;
const POP: Duration = Duration::from_secs(2);

fn test_config() -> Config {
    let mut config = Config::default();
    config.audio.pop_timeout_ms = 20;
    config
}

fn collect_captions(rx: &QueueReceiver<Caption>) -> Vec<Caption> {
    let mut captions = Vec::new();
    loop {
        match rx.pop(POP) {
            Pop::Item(caption) => captions.push(caption),
            Pop::Closed => break,
            Pop::TimedOut => panic!("caption channel neither delivered nor closed"),
        }
    }
    captions
}

#[test]
fn test_utterance_reaches_caption_channel() {
    let config = test_config();
    let source = Box::new(MockFrameSource::new().with_phases(vec![
        ScriptPhase::constant(0.02, CHUNK, 5),
        ScriptPhase::constant(0.0, CHUNK, 10),
    ]));

    let transcriber = MockTranscriber::new("mock").with_response("hello there");
    let lengths = transcriber.clone();

    let recorder = Recorder::new(config.clone()).unwrap();
    let (segment_rx, handle) = recorder.start(source).unwrap();

    let captioner = Captioner::new(&config, Arc::new(transcriber));
    let (caption_rx, caption_handle) = captioner.spawn(segment_rx);

    let captions = collect_captions(&caption_rx);
    handle.stop();
    caption_handle.join().unwrap();

    // The 13-frame utterance surfaces; the silent 2-frame end-of-stream
    // flush is stopped by the energy gate before the engine sees it.
    assert_eq!(captions.len(), 1);
    assert_eq!(captions[0].text, "hello there");
    assert_eq!(lengths.received_lengths(), vec![13 * CHUNK]);
}

#[test]
fn test_translation_stage_end_to_end() {
    let mut config = test_config();
    config.translation.enabled = true;
    let source = Box::new(MockFrameSource::new().with_phases(vec![
        ScriptPhase::constant(0.02, CHUNK, 5),
        ScriptPhase::constant(0.0, CHUNK, 10),
    ]));

    let transcriber = MockTranscriber::new("mock")
        .with_response("こんにちは")
        .with_language("ja");

    let recorder = Recorder::new(config.clone()).unwrap();
    let (segment_rx, handle) = recorder.start(source).unwrap();

    let captioner = Captioner::new(&config, Arc::new(transcriber))
        .with_translator(Arc::new(MockTranslator::new()));
    let (caption_rx, caption_handle) = captioner.spawn(segment_rx);

    let captions = collect_captions(&caption_rx);
    handle.stop();
    caption_handle.join().unwrap();

    assert!(!captions.is_empty());
    assert_eq!(captions[0].language, "ja");
    assert_eq!(captions[0].translation.as_deref(), Some("[en] こんにちは"));
}

#[test]
fn test_hallucinated_phrases_never_surface() {
    let config = test_config();
    let source = Box::new(MockFrameSource::new().with_phases(vec![
        ScriptPhase::constant(0.02, CHUNK, 5),
        ScriptPhase::constant(0.0, CHUNK, 10),
    ]));

    let transcriber =
        MockTranscriber::new("mock").with_response("ご視聴ありがとうございました");

    let recorder = Recorder::new(config.clone()).unwrap();
    let (segment_rx, handle) = recorder.start(source).unwrap();

    let captioner = Captioner::new(&config, Arc::new(transcriber));
    let (caption_rx, caption_handle) = captioner.spawn(segment_rx);

    let captions = collect_captions(&caption_rx);
    handle.stop();
    caption_handle.join().unwrap();

    assert!(captions.is_empty());
}

#[test]
fn test_engine_failure_does_not_kill_pipeline() {
    // Every transcription fails; the pipeline still drains all segments and
    // closes the caption channel cleanly.
    let config = test_config();
    let source = Box::new(MockFrameSource::new().with_phases(vec![
        ScriptPhase::constant(0.02, CHUNK, 79),
        ScriptPhase::constant(0.02, CHUNK, 79),
    ]));

    let recorder = Recorder::new(config.clone()).unwrap();
    let (segment_rx, handle) = recorder.start(source).unwrap();

    let captioner = Captioner::new(&config, Arc::new(MockTranscriber::new("mock").with_failure()));
    let (caption_rx, caption_handle) = captioner.spawn(segment_rx);

    let captions = collect_captions(&caption_rx);
    handle.stop();
    caption_handle.join().unwrap();

    assert!(captions.is_empty());
}

#[test]
fn test_stop_flushes_through_to_captions() {
    // A live source goes quiet mid-utterance; stopping the recorder must
    // still deliver the partial segment to the captioner.
    let config = test_config();
    let source = Box::new(
        MockFrameSource::new()
            .with_phases(vec![ScriptPhase::constant(0.02, CHUNK, 12)])
            .as_live_source(),
    );

    let transcriber = MockTranscriber::new("mock").with_response("cut short");

    let recorder = Recorder::new(config.clone()).unwrap();
    let (segment_rx, handle) = recorder.start(source).unwrap();

    let captioner = Captioner::new(&config, Arc::new(transcriber));
    let (caption_rx, caption_handle) = captioner.spawn(segment_rx);

    thread::sleep(Duration::from_millis(200));
    handle.stop();

    let captions = collect_captions(&caption_rx);
    caption_handle.join().unwrap();

    assert_eq!(captions.len(), 1);
    assert_eq!(captions[0].text, "cut short");
}

//! Recorder lifecycle: capture and segmentation workers.
//!
//! A `Recorder` is an explicitly constructed, caller-owned instance — no
//! process-wide singleton. `start` spawns the capture worker (device reads →
//! frame queue) and the segmentation worker (frame queue → state machine →
//! segment channel); `RecorderHandle::stop` signals shutdown, lets the
//! segmenter flush any partial segment, and joins both threads.

use crate::audio::capture::FrameSource;
use crate::audio::frame::Frame;
use crate::config::Config;
use crate::defaults;
use crate::error::Result;
use crate::queue::{self, Pop, QueueReceiver, QueueSender};
use crate::segment::{Segment, Segmenter, SegmenterConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Poll interval when a live source has no samples yet.
const EMPTY_READ_BACKOFF: Duration = Duration::from_millis(10);

/// Configured recorder, ready to start.
pub struct Recorder {
    config: Config,
}

impl Recorder {
    /// Creates a recorder, validating the configuration up front.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Starts capturing and segmenting.
    ///
    /// Opens the source before spawning anything, so an open failure is
    /// reported synchronously and no thread leaks. Consumes the recorder:
    /// double-start is impossible by construction.
    ///
    /// Returns the segment receiver and a handle that stops the pipeline.
    pub fn start(
        self,
        mut source: Box<dyn FrameSource>,
    ) -> Result<(QueueReceiver<Segment>, RecorderHandle)> {
        source.start()?;

        let running = Arc::new(AtomicBool::new(true));
        let (frame_tx, frame_rx) = queue::channel::<Frame>(defaults::FRAME_QUEUE_CAPACITY);
        let (segment_tx, segment_rx) = queue::channel::<Segment>(defaults::SEGMENT_QUEUE_CAPACITY);

        let capture = spawn_capture_worker(source, frame_tx, running.clone());

        let segmenter = Segmenter::new(SegmenterConfig::from_config(&self.config));
        let pop_timeout = Duration::from_millis(self.config.audio.pop_timeout_ms);
        let segmentation = spawn_segmentation_worker(
            segmenter,
            frame_rx,
            segment_tx,
            running.clone(),
            pop_timeout,
        );

        let handle = RecorderHandle {
            running,
            threads: vec![capture, segmentation],
        };
        Ok((segment_rx, handle))
    }
}

/// Handle to a running recorder.
pub struct RecorderHandle {
    running: Arc<AtomicBool>,
    threads: Vec<JoinHandle<()>>,
}

impl RecorderHandle {
    /// Returns true while the pipeline has not been stopped or failed.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stops the pipeline and joins both workers.
    ///
    /// The segmentation worker flushes any pending partial segment as a
    /// short final segment and closes the output channel before exiting, so
    /// a consumer draining the segment receiver sees everything.
    pub fn stop(mut self) {
        self.running.store(false, Ordering::SeqCst);
        for handle in self.threads.drain(..) {
            if let Err(panic_info) = handle.join() {
                let msg = panic_info
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| panic_info.downcast_ref::<String>().map(|s| s.as_str()))
                    .unwrap_or("unknown panic");
                eprintln!("livecap: recorder thread panicked: {msg}");
            }
        }
    }
}

/// Capture worker: device reads → frame queue.
///
/// A read error is fatal: it clears the running flag (propagating shutdown)
/// and still closes the queue and stops the device in order.
fn spawn_capture_worker(
    mut source: Box<dyn FrameSource>,
    frame_tx: QueueSender<Frame>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut sequence: u64 = 0;

        while running.load(Ordering::SeqCst) {
            let samples = match source.read_frame() {
                Ok(samples) => samples,
                Err(e) => {
                    eprintln!("livecap: audio capture failed: {e}");
                    running.store(false, Ordering::SeqCst);
                    break;
                }
            };

            if samples.is_empty() {
                if source.is_finite() {
                    // Source exhausted: clean end-of-stream.
                    break;
                }
                // Live source warming up.
                thread::sleep(EMPTY_READ_BACKOFF);
                continue;
            }

            let frame = Frame::new(sequence, samples);
            sequence += 1;

            // A rejected push means the segmentation side is gone.
            if frame_tx.push(frame).is_err() {
                break;
            }
        }

        frame_tx.close();
        if let Err(e) = source.stop() {
            eprintln!("livecap: failed to stop frame source: {e}");
        }
    })
}

/// Segmentation worker: frame queue → state machine → segment channel.
fn spawn_segmentation_worker(
    mut segmenter: Segmenter,
    frame_rx: QueueReceiver<Frame>,
    segment_tx: QueueSender<Segment>,
    running: Arc<AtomicBool>,
    pop_timeout: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            match frame_rx.pop(pop_timeout) {
                Pop::Item(frame) => {
                    if let Some(segment) = segmenter.push_frame(frame)
                        && segment_tx.push(segment).is_err()
                    {
                        break;
                    }
                }
                Pop::TimedOut => {
                    // Not an error: the periodic shutdown check.
                    if !running.load(Ordering::SeqCst) {
                        if let Some(segment) = segmenter.flush() {
                            let _ = segment_tx.push(segment);
                        }
                        break;
                    }
                }
                Pop::Closed => {
                    // Queue drained after capture ended: flush and finish.
                    if let Some(segment) = segmenter.flush() {
                        let _ = segment_tx.push(segment);
                    }
                    break;
                }
            }
        }

        segment_tx.close();
    })
}

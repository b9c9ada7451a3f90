//! Speaker output for remote conversation audio
//!
//! Opens the default output device at the remote API's fixed format
//! (24 kHz, 16-bit signed, mono) and starts playing immediately. The
//! cpal stream is not `Send`, so it is built and owned by a dedicated
//! thread that drains the shared ring until the output is closed.

use bytes::Bytes;
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::StreamConfig;
use crossbeam_channel::{bounded, Receiver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::audio::buffer::{create_shared_ring, PlaybackQueue};
use crate::audio::device::get_default_output_device;
use crate::constants::{OUTPUT_CHANNELS, OUTPUT_SAMPLE_RATE, PLAYBACK_BUFFER_BYTES};
use crate::error::AudioError;

/// Speaker playback of remote API audio.
///
/// Lifecycle is strictly linear: constructed (already playing) -> closed.
/// `close` is idempotent and also runs on drop, so the device is released
/// on every exit path of the owning scope.
pub struct SpeakerOutput {
    /// Producer-facing buffer surface
    queue: Arc<PlaybackQueue>,

    /// Whether the output thread should keep the stream alive
    running: Arc<AtomicBool>,

    /// Stream thread handle
    thread_handle: Option<JoinHandle<()>>,

    /// Channel for stream errors
    error_rx: Receiver<AudioError>,
}

impl SpeakerOutput {
    /// Open the default output device and begin continuous playback.
    ///
    /// Fails if no default output device exists. Stream construction
    /// errors after that point surface through [`Self::check_errors`].
    pub fn new() -> Result<Self, AudioError> {
        let device = get_default_output_device()?;
        tracing::info!("Opening speaker output on {}", device.name);

        let config = StreamConfig {
            channels: OUTPUT_CHANNELS,
            sample_rate: cpal::SampleRate(OUTPUT_SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let ring = create_shared_ring(PLAYBACK_BUFFER_BYTES);
        let queue = Arc::new(PlaybackQueue::new(ring.clone()));

        let (error_tx, error_rx) = bounded::<AudioError>(16);
        let running = Arc::new(AtomicBool::new(true));
        let running_for_loop = running.clone();
        let error_tx_for_build = error_tx.clone();

        let handle = thread::Builder::new()
            .name("speaker-output".to_string())
            .spawn(move || {
                let cpal_device = device.into_inner();

                let stream = cpal_device.build_output_stream(
                    &config,
                    move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                        ring.read_samples(data);
                    },
                    move |err| {
                        let _ = error_tx.try_send(AudioError::StreamError(err.to_string()));
                    },
                    None,
                );

                match stream {
                    Ok(stream) => {
                        if let Err(e) = stream.play() {
                            tracing::error!("Failed to start output stream: {}", e);
                            let _ = error_tx_for_build
                                .try_send(AudioError::StreamError(e.to_string()));
                            return;
                        }

                        // Keep thread alive while running
                        while running_for_loop.load(Ordering::Relaxed) {
                            thread::sleep(std::time::Duration::from_millis(10));
                        }

                        // Stream is dropped here, stopping playback
                    }
                    Err(e) => {
                        tracing::error!("Failed to build output stream: {}", e);
                        let _ =
                            error_tx_for_build.try_send(AudioError::StreamError(e.to_string()));
                    }
                }
            })
            .map_err(|e| AudioError::StreamError(e.to_string()))?;

        Ok(Self {
            queue,
            running,
            thread_handle: Some(handle),
            error_rx,
        })
    }

    /// Append a chunk of PCM bytes for playback (fire-and-forget)
    pub fn enqueue(&self, chunk: Bytes) {
        self.queue.enqueue(chunk);
    }

    /// Drop all buffered unplayed audio, for barge-in
    pub fn clear(&self) {
        self.queue.clear();
    }

    /// Stop the device and release the stream.
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub fn close(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
            tracing::info!("Speaker output closed");
        }
    }

    /// Whether the output thread is still alive
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && self.thread_handle.is_some()
    }

    /// Bytes queued and not yet drained by the device
    pub fn pending_bytes(&self) -> usize {
        self.queue.pending_bytes()
    }

    /// Number of empty chunks rejected so far
    pub fn empty_chunk_count(&self) -> usize {
        self.queue.empty_chunk_count()
    }

    /// Check for stream errors
    pub fn check_errors(&self) -> Option<AudioError> {
        self.error_rx.try_recv().ok()
    }
}

impl Drop for SpeakerOutput {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Device-backed tests only run where an output device exists, as on
    // CI there may be none.

    #[test]
    fn test_close_is_idempotent() {
        let Ok(mut output) = SpeakerOutput::new() else {
            return;
        };
        assert!(output.is_running());

        output.close();
        assert!(!output.is_running());

        output.close();
        assert!(!output.is_running());
    }

    #[test]
    fn test_enqueue_and_clear_through_output() {
        let Ok(output) = SpeakerOutput::new() else {
            return;
        };

        output.enqueue(Bytes::new());
        assert_eq!(output.empty_chunk_count(), 1);

        output.clear();
        assert_eq!(output.pending_bytes(), 0);
    }
}

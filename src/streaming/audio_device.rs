//! Audio device integration using rodio
//!
//! Plays the keyer's tone stream to the system audio device. The render
//! state machine is handed to the device at construction and driven from
//! rodio's playback thread, one fixed-size buffer at a time.

use crate::keyer::RenderState;
use crate::{KeytoneError, Result};
use rodio::{OutputStream, Sink, Source};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::StreamConfig;

/// Audio source that pulls samples out of the render state machine
struct KeyerSource {
    state: RenderState,
    sample_rate: u32,
    channels: u16,
    finished: Arc<AtomicBool>,
    /// Interleaved buffer holding one render-loop invocation
    buffer: Vec<f32>,
    /// Current position in the internal buffer
    buffer_pos: usize,
}

impl KeyerSource {
    fn new(state: RenderState, config: &StreamConfig, finished: Arc<AtomicBool>) -> Self {
        let buffer_len = config.frames_per_buffer * config.channels as usize;
        KeyerSource {
            state,
            sample_rate: config.sample_rate,
            channels: config.channels,
            finished,
            buffer: vec![0.0f32; buffer_len],
            buffer_pos: buffer_len, // Start by rendering a fresh buffer
        }
    }
}

impl Source for KeyerSource {
    fn current_frame_len(&self) -> Option<usize> {
        // Stream parameters never change mid-flight
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        // The keyer plays until the stream is torn down
        None
    }
}

impl Iterator for KeyerSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.finished.load(Ordering::Relaxed) {
            return None;
        }

        // Refill the internal buffer with one render-loop invocation.
        // An empty element queue yields silence, so the stream stays alive
        // through idle periods.
        if self.buffer_pos >= self.buffer.len() {
            self.state.render(&mut self.buffer);
            self.buffer_pos = 0;
        }

        let sample = self.buffer[self.buffer_pos];
        self.buffer_pos += 1;
        Some(sample)
    }
}

/// Audio playback device using rodio
pub struct AudioDevice {
    _stream: OutputStream,
    _sink: Sink,
    running: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl AudioDevice {
    /// Open the default output device and start rendering.
    ///
    /// # Arguments
    /// * `config` - Fixed stream parameters agreed with the render loop
    /// * `state` - Render state machine; ownership moves to the playback
    ///   thread, which is the only mutator from here on
    pub fn new(config: &StreamConfig, state: RenderState) -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| KeytoneError::AudioDevice(format!("failed to create stream: {e}")))?;

        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| KeytoneError::AudioDevice(format!("failed to create sink: {e}")))?;

        // End-of-stream signal for shutdown coordination
        let finished = Arc::new(AtomicBool::new(false));

        let source = KeyerSource::new(state, config, Arc::clone(&finished));
        sink.append(source);

        let running = Arc::new(AtomicBool::new(true));

        Ok(AudioDevice {
            _stream: stream,
            _sink: sink,
            running,
            finished,
        })
    }

    /// Pause playback
    pub fn pause(&self) {
        self._sink.pause();
    }

    /// Resume playback
    pub fn play(&self) {
        self._sink.play();
    }

    /// Check if the audio device is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Signal that no more tone output is wanted.
    ///
    /// Lets the playback stream terminate instead of rendering idle
    /// silence forever.
    pub fn finish(&self) {
        self.finished.store(true, Ordering::Relaxed);
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        // Pause on drop
        self.pause();
        self.running.store(false, Ordering::Relaxed);
    }
}

//! Element hand-off and audio output
//!
//! The sequencer queue is the single piece of state shared between the
//! input-event thread and the render thread. Everything else here is
//! stream plumbing: the fixed stream parameters and the statistics the
//! render path publishes for the shutdown epilogue.

#[cfg(feature = "streaming")]
mod audio_device;
mod queue;

#[cfg(feature = "streaming")]
pub use audio_device::AudioDevice;
pub use queue::{ElementQueue, DEFAULT_QUEUE_CAPACITY};

use crate::morse::Timing;
use crate::{KeytoneError, Result};

/// Default output sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Output channel count; both channels always carry the identical signal
pub const CHANNELS: u16 = 2;

/// Default render buffer size in frames
pub const DEFAULT_FRAMES_PER_BUFFER: usize = 256;

/// Fixed parameters of the output stream.
///
/// The audio backend invokes the render loop with exactly
/// `frames_per_buffer` frames per call, at `sample_rate`, for `channels`
/// interleaved channels. Agreed once at startup and never renegotiated.
#[derive(Clone, Copy, Debug)]
pub struct StreamConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved output channels
    pub channels: u16,
    /// Frames per render-loop invocation
    pub frames_per_buffer: usize,
}

impl StreamConfig {
    /// Create a config with the default buffer size and channel layout.
    pub fn new(sample_rate: u32) -> Self {
        StreamConfig {
            sample_rate,
            channels: CHANNELS,
            frames_per_buffer: DEFAULT_FRAMES_PER_BUFFER,
        }
    }

    /// Buffer latency in milliseconds.
    pub fn latency_ms(&self) -> f32 {
        self.frames_per_buffer as f32 / self.sample_rate as f32 * 1000.0
    }

    /// Check the config against a timing table.
    ///
    /// The state machine detects element boundaries by exact sample-count
    /// equality and advances its clock a whole buffer at a time, so the dit
    /// duration must be at least one buffer long or a boundary could be
    /// stepped over.
    pub fn validate(&self, timing: &Timing) -> Result<()> {
        if self.frames_per_buffer == 0 {
            return Err(KeytoneError::Config(
                "frames per buffer must be non-zero".into(),
            ));
        }
        if self.channels != CHANNELS {
            return Err(KeytoneError::Config(format!(
                "unsupported channel count {} (output is identical-channel stereo)",
                self.channels
            )));
        }
        if timing.dit() < self.frames_per_buffer as u64 {
            return Err(KeytoneError::Config(format!(
                "dit duration {} samples is shorter than the render buffer ({} frames)",
                timing.dit(),
                self.frames_per_buffer
            )));
        }
        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

/// Render statistics for the shutdown epilogue.
///
/// Published by the render path through a `try_lock`, read by the process
/// owner once the stream is down.
#[derive(Clone, Debug, Default)]
pub struct KeyerStats {
    /// Total frames rendered (audible or silent)
    pub samples_rendered: u64,
    /// Elements dequeued and played to completion start
    pub elements_played: u64,
}

//! Keyboard-driven Morse code keyer with real-time tone synthesis
//!
//! Translates discrete keypress events into an audible Morse-code tone
//! stream, synthesized sample-by-sample on the real-time audio path.
//!
//! # Architecture
//! - Bit-packed symbol table mapping letters to dit/dah shift registers
//! - Lock-free single-producer/single-consumer element queue between the
//!   input-event thread and the render thread
//! - Per-sample timing state machine sequencing dit/dah/gap elements
//! - Precomputed sine wave table (no per-sample transcendentals)
//! - Fixed-size render loop writing identical left/right channels
//!
//! # Crate feature flags
//! - `streaming` (default): Real-time audio output (enables optional `rodio` dep)
//!
//! # Quick start
//! ## Render without an audio device
//! ```
//! use std::sync::Arc;
//! use keytone::{ElementQueue, RenderState, StreamConfig, Timing, WaveTable};
//!
//! let timing = Timing::from_dit_samples(50);
//! let config = StreamConfig {
//!     sample_rate: 44_100,
//!     channels: 2,
//!     frames_per_buffer: 50,
//! };
//! let queue = Arc::new(ElementQueue::new());
//! let table = WaveTable::new(440.0, config.sample_rate, timing.dah() as usize);
//! let mut state = RenderState::new(Arc::clone(&queue), table, timing, &config);
//!
//! if let Some(symbol) = keytone::morse::lookup('e') {
//!     queue.push_symbol(symbol);
//! }
//! let mut buffer = vec![0.0f32; config.frames_per_buffer * config.channels as usize];
//! state.render(&mut buffer);
//! ```
//!
//! ## Real-time streaming
//! ```no_run
//! # #[cfg(feature = "streaming")]
//! # {
//! use std::sync::Arc;
//! use keytone::{AudioDevice, ElementQueue, RenderState, StreamConfig, Timing, WaveTable};
//!
//! let config = StreamConfig::new(44_100);
//! let timing = Timing::standard(config.sample_rate);
//! let queue = Arc::new(ElementQueue::new());
//! let table = WaveTable::new(600.0, config.sample_rate, timing.dah() as usize);
//! let state = RenderState::new(Arc::clone(&queue), table, timing, &config);
//! let _device = AudioDevice::new(&config, state).unwrap();
//! // push symbols from the input-event thread
//! # }
//! ```

#![warn(missing_docs)]

// Domain modules
pub mod input; // Keyboard event records and the blocking reader
pub mod keyer; // Waveform source and render-time state machine (core)
pub mod morse; // Element model, timing tables, symbol table
pub mod streaming; // Element queue, stream config, audio output

/// Error types for keyer operations
#[derive(thiserror::Error, Debug)]
pub enum KeytoneError {
    /// Input device unopenable or unreadable
    #[error("Input device error: {0}")]
    InputDevice(String),

    /// IO error from filesystem or device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDevice(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for KeytoneError {
    /// Converts a String into `KeytoneError::Other`.
    ///
    /// Convenience conversion for generic string errors. Prefer the specific
    /// variant constructors (`Config`, `InputDevice`, `AudioDevice`) where
    /// the error class is known.
    fn from(msg: String) -> Self {
        KeytoneError::Other(msg)
    }
}

impl From<&str> for KeytoneError {
    /// Converts a string slice into `KeytoneError::Other`.
    fn from(msg: &str) -> Self {
        KeytoneError::Other(msg.to_string())
    }
}

/// Result type for keyer operations
pub type Result<T> = std::result::Result<T, KeytoneError>;

// Public API exports
pub use input::{EventReader, InputEvent, KeyCode};
pub use keyer::{RenderState, WaveTable};
pub use morse::{lookup, Element, MorseSymbol, Timing};
#[cfg(feature = "streaming")]
pub use streaming::AudioDevice;
pub use streaming::{ElementQueue, KeyerStats, StreamConfig};

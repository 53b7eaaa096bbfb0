//! Render-time timing state machine
//!
//! One decision per output frame: track the elapsed offset within the
//! active element, cut the tone at the element boundary, and after the
//! fixed one-unit inter-element gap pull the next element from the queue.
//! An empty queue parks the machine in the idle state (continuous silence,
//! one boundary evaluation per buffer) until new input arrives.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::morse::Timing;
use crate::streaming::{ElementQueue, KeyerStats, StreamConfig};

use super::WaveTable;

/// Mutable render-thread state.
///
/// Owned exclusively by the render thread: constructed before the stream
/// opens, mutated only inside [`render`](RenderState::render), dropped when
/// the stream closes. The element queue is the only shared structure it
/// touches, and only through the wait-free consumer side.
pub struct RenderState {
    /// Element clock base carried across buffers
    t: u64,
    /// Offset at which the active element's audible portion ends
    next_t: u64,
    /// Whether the output is currently unmuted
    emit: bool,
    /// Circular read index into the wave table
    wave_index: usize,
    timing: Timing,
    table: WaveTable,
    queue: Arc<ElementQueue>,
    frames_per_buffer: u64,
    channels: usize,
    stats: Arc<Mutex<KeyerStats>>,
    pending_samples: u64,
    pending_elements: u64,
}

impl RenderState {
    /// Create render state for a fixed stream configuration.
    pub fn new(
        queue: Arc<ElementQueue>,
        table: WaveTable,
        timing: Timing,
        config: &StreamConfig,
    ) -> Self {
        RenderState {
            t: 0,
            next_t: 0,
            emit: false,
            wave_index: 0,
            timing,
            table,
            queue,
            frames_per_buffer: config.frames_per_buffer as u64,
            channels: config.channels as usize,
            stats: Arc::new(Mutex::new(KeyerStats::default())),
            pending_samples: 0,
            pending_elements: 0,
        }
    }

    /// Handle to the statistics published by the render path.
    pub fn stats(&self) -> Arc<Mutex<KeyerStats>> {
        Arc::clone(&self.stats)
    }

    /// One state-machine step for the frame at element-relative offset `j`.
    ///
    /// Crossing the gap boundary resets the element clock, so `j` is taken
    /// by reference and rewound together with `t`.
    #[inline]
    fn advance(&mut self, j: &mut u64) {
        if *j == self.next_t {
            // Audible portion over; the inter-element gap starts here.
            self.emit = false;
        } else if *j == self.next_t + self.timing.inter_element_gap() {
            *j = 0;
            self.t = 0;
            self.wave_index = 0;
            self.emit = false;
            match self.queue.try_pop() {
                Some(element) => {
                    self.next_t = self.timing.duration_of(element);
                    self.emit = element.is_audible();
                    self.pending_elements += 1;
                }
                None => {
                    // Idle: park the boundary past the end of the buffer so
                    // nothing fires until new input arrives.
                    self.next_t = self.frames_per_buffer + 1;
                }
            }
        }
    }

    /// Render one fixed-size buffer of interleaved frames.
    ///
    /// For every frame: one state-machine step, then the wave-table sample
    /// (or silence) written identically to all channels. Bounded time,
    /// no allocation, no blocking; the statistics flush below uses
    /// `try_lock` and falls through on contention.
    pub fn render(&mut self, out: &mut [f32]) {
        debug_assert_eq!(
            out.len(),
            self.frames_per_buffer as usize * self.channels,
            "render buffer must match the agreed frame count"
        );
        let frames = (out.len() / self.channels) as u64;

        let mut j = self.t;
        for frame in out.chunks_exact_mut(self.channels) {
            self.advance(&mut j);
            let value = if self.emit {
                self.table.sample_at(self.wave_index)
            } else {
                0.0
            };
            self.wave_index = (self.wave_index + 1) % self.table.len();
            for channel in frame.iter_mut() {
                *channel = value;
            }
            j += 1;
        }

        self.t += frames;
        self.pending_samples += frames;
        self.flush_stats();
    }

    fn flush_stats(&mut self) {
        if let Some(mut stats) = self.stats.try_lock() {
            stats.samples_rendered += self.pending_samples;
            stats.elements_played += self.pending_elements;
            self.pending_samples = 0;
            self.pending_elements = 0;
        }
    }
}

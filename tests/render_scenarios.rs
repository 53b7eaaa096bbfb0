//! Whole-pipeline render scenarios
//!
//! Drives the event -> symbol -> queue -> render path with a deterministic
//! timing table (dit = 50 samples, render buffer = 50 frames) and checks
//! the produced signal sample-by-sample. No audio backend involved.

use std::sync::Arc;

use keytone::input::{InputEvent, EV_KEY, KEY_STATE_PRESSED};
use keytone::{lookup, ElementQueue, RenderState, StreamConfig, Timing, WaveTable};

const DIT: u64 = 50;
const FRAMES: usize = 50;
const SAMPLE_RATE: u32 = 44_100;
const FREQ: f32 = 440.0;

fn pipeline() -> (Arc<ElementQueue>, RenderState) {
    let timing = Timing::from_dit_samples(DIT);
    let config = StreamConfig {
        sample_rate: SAMPLE_RATE,
        channels: 2,
        frames_per_buffer: FRAMES,
    };
    config.validate(&timing).expect("test config must be valid");
    let queue = Arc::new(ElementQueue::new());
    let table = WaveTable::new(FREQ, SAMPLE_RATE, timing.dah() as usize);
    let state = RenderState::new(Arc::clone(&queue), table, timing, &config);
    (queue, state)
}

/// Render fixed-size buffers and collect the left channel.
fn render_left(state: &mut RenderState, buffers: usize) -> Vec<f32> {
    let mut left = Vec::with_capacity(buffers * FRAMES);
    let mut buffer = vec![0.0f32; FRAMES * 2];
    for _ in 0..buffers {
        state.render(&mut buffer);
        left.extend(buffer.chunks_exact(2).map(|frame| frame[0]));
    }
    left
}

/// Expected signal: tone windows `(start, end)` in absolute samples, each
/// beginning at the wave table's phase origin, silence everywhere else.
fn expected_signal(windows: &[(usize, usize)], len: usize) -> Vec<f32> {
    let table = WaveTable::new(FREQ, SAMPLE_RATE, (3 * DIT) as usize);
    let mut signal = vec![0.0f32; len];
    for &(start, end) in windows {
        for (i, sample) in signal.iter_mut().enumerate().take(end.min(len)).skip(start) {
            *sample = table.sample_at(i - start);
        }
    }
    signal
}

fn assert_signal(actual: &[f32], windows: &[(usize, usize)]) {
    let expected = expected_signal(windows, actual.len());
    for (i, (&got, &want)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(got, want, "sample {i} diverges from the expected schedule");
    }
}

// With dit = frames-per-buffer the machine's boundaries stay buffer-aligned:
// the initial gap ends at sample 50, so the first queued element always
// starts there.

#[test]
fn e_renders_one_dit_then_silence_until_next_push() {
    let (queue, mut state) = pipeline();
    queue.push_symbol(lookup('e').unwrap());

    let left = render_left(&mut state, 20);
    assert_signal(&left, &[(50, 100)]);

    // Drained queue: repeated invocations stay all-zero indefinitely
    let idle = render_left(&mut state, 40);
    assert!(idle.iter().all(|&s| s == 0.0));
}

#[test]
fn t_renders_one_dah() {
    let (queue, mut state) = pipeline();
    queue.push_symbol(lookup('t').unwrap());

    let left = render_left(&mut state, 20);
    assert_signal(&left, &[(50, 200)]);
}

#[test]
fn a_renders_dit_gap_dah_then_post_letter_silence() {
    let (queue, mut state) = pipeline();
    queue.push_symbol(lookup('a').unwrap());

    // 50 audible, 50 silent (inter-element gap), 150 audible, then nothing
    let left = render_left(&mut state, 30);
    assert_signal(&left, &[(50, 100), (150, 300)]);
}

#[test]
fn letters_play_strictly_in_order_with_full_gaps() {
    let (queue, mut state) = pipeline();
    queue.push_symbol(lookup('a').unwrap());
    queue.push_symbol(lookup('b').unwrap());

    // A: dit [50,100), dah [150,300); its trailing inter-element gap plus
    // the three-unit letter break plus that break's own trailing gap keep
    // everything silent until B starts.
    // B (-...): dah [550,700), dits at [750,800), [850,900), [950,1000).
    let left = render_left(&mut state, 30);
    assert_signal(
        &left,
        &[
            (50, 100),
            (150, 300),
            (550, 700),
            (750, 800),
            (850, 900),
            (950, 1000),
        ],
    );

    // Letter-to-letter spacing: A's elements (1 + 3 units) + inter-element
    // gaps (2 units) + letter break (3 units) + its gap (1 unit) = 10 units
    let a_start = 50;
    let b_start = 550;
    assert_eq!(b_start - a_start, 10 * DIT as usize);
}

#[test]
fn word_break_plays_out_in_full_between_letters() {
    let (queue, mut state) = pipeline();
    queue.push_symbol(lookup('e').unwrap());
    queue.push_symbol(lookup(' ').unwrap());
    queue.push_symbol(lookup('e').unwrap());

    // First dit [50,100); letter break and word break then play serially,
    // never coalesced: 1 (gap) + 3 (letter break) + 1 (gap) + 7 (word
    // break) + 1 (gap) = 13 units of silence before the next dit at 750.
    let left = render_left(&mut state, 30);
    assert_signal(&left, &[(50, 100), (750, 800)]);
}

#[test]
fn unmapped_key_leaves_queue_and_output_untouched() {
    let (queue, mut state) = pipeline();
    let (baseline_queue, mut baseline_state) = pipeline();

    // KEY_1 = 2: a key-down transition outside the mapped set
    let event = InputEvent {
        tv_sec: 0,
        tv_usec: 0,
        kind: EV_KEY,
        code: 2,
        value: KEY_STATE_PRESSED,
    };
    if let Some(key) = event.key() {
        if let Some(symbol) = lookup(key.symbol()) {
            queue.push_symbol(symbol);
        }
    }

    assert!(queue.is_empty());
    assert!(baseline_queue.is_empty());

    let rendered = render_left(&mut state, 10);
    let baseline = render_left(&mut baseline_state, 10);
    assert_eq!(rendered, baseline, "unmapped key must be a no-op");
}

#[test]
fn event_records_drive_the_full_pipeline() {
    let (queue, mut state) = pipeline();

    let press = |code: u16| InputEvent {
        tv_sec: 0,
        tv_usec: 0,
        kind: EV_KEY,
        code,
        value: KEY_STATE_PRESSED,
    };
    let release = |code: u16| InputEvent {
        value: 0,
        ..press(code)
    };
    let autorepeat = |code: u16| InputEvent {
        value: 2,
        ..press(code)
    };

    // KEY_E = 18; release and autorepeat must not enqueue anything
    let records = [press(18), autorepeat(18), release(18), press(1)];
    for event in &records {
        let Some(key) = event.key() else { continue };
        let Some(symbol) = lookup(key.symbol()) else {
            continue;
        };
        queue.push_symbol(symbol);
    }

    let left = render_left(&mut state, 20);
    assert_signal(&left, &[(50, 100)]);
}

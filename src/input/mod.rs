//! Keyboard input events
//!
//! Decodes the raw Linux `input_event` record stream delivered by an
//! event device node and classifies key-down transitions of the mapped
//! key set. Everything else (repeats, releases, non-key events, unmapped
//! scan codes) is a no-op for the keyer.

mod event;
mod reader;

pub use event::{parse_event, InputEvent, KeyCode, EVENT_SIZE, EV_KEY, KEY_STATE_PRESSED};
pub use reader::EventReader;

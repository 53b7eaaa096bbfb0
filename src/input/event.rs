//! Raw input-event records and scan-code mapping
//!
//! Linux event devices deliver fixed-size `input_event` records:
//! a 16-byte timestamp (seconds and microseconds), a 16-bit event type,
//! a 16-bit code and a 32-bit value, all in host byte order (little-endian
//! on the supported targets).

use nom::number::complete::{le_i32, le_i64, le_u16};
use nom::IResult;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;

/// Size of one `input_event` record in bytes (64-bit timeval layout)
pub const EVENT_SIZE: usize = 24;

/// Event type carrying key state transitions
pub const EV_KEY: u16 = 0x01;

/// Event value marking a key-down transition (0 = release, 2 = autorepeat)
pub const KEY_STATE_PRESSED: i32 = 1;

/// One decoded `input_event` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// Timestamp seconds
    pub tv_sec: i64,
    /// Timestamp microseconds
    pub tv_usec: i64,
    /// Event type (`EV_KEY`, `EV_SYN`, ...)
    pub kind: u16,
    /// Type-specific code; the scan code for key events
    pub code: u16,
    /// Type-specific value; the key state for key events
    pub value: i32,
}

impl InputEvent {
    /// Whether this record is a key-down transition.
    ///
    /// Releases and autorepeats are not key-downs; a held key emits one
    /// symbol, not a stream of them.
    #[inline]
    pub fn is_key_press(&self) -> bool {
        self.kind == EV_KEY && self.value == KEY_STATE_PRESSED
    }

    /// The mapped key behind a key-down record, if any.
    #[inline]
    pub fn key(&self) -> Option<KeyCode> {
        if self.is_key_press() {
            KeyCode::from_raw(self.code)
        } else {
            None
        }
    }
}

/// Parse one `input_event` record from the head of `input`.
pub fn parse_event(input: &[u8]) -> IResult<&[u8], InputEvent> {
    let (input, tv_sec) = le_i64(input)?;
    let (input, tv_usec) = le_i64(input)?;
    let (input, kind) = le_u16(input)?;
    let (input, code) = le_u16(input)?;
    let (input, value) = le_i32(input)?;
    Ok((
        input,
        InputEvent {
            tv_sec,
            tv_usec,
            kind,
            code,
            value,
        },
    ))
}

/// Scan codes of the mapped key set.
///
/// Values are the Linux `KEY_*` constants. Only these keys produce
/// output; every other scan code is silently ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum KeyCode {
    KeyQ = 16,
    KeyW = 17,
    KeyE = 18,
    KeyR = 19,
    KeyT = 20,
    KeyY = 21,
    KeyU = 22,
    KeyI = 23,
    KeyO = 24,
    KeyP = 25,
    KeyA = 30,
    KeyS = 31,
    KeyD = 32,
    KeyF = 33,
    KeyG = 34,
    KeyH = 35,
    KeyJ = 36,
    KeyK = 37,
    KeyL = 38,
    KeyZ = 44,
    KeyX = 45,
    KeyC = 46,
    KeyV = 47,
    KeyB = 48,
    KeyN = 49,
    KeyM = 50,
    Space = 57,
}

impl KeyCode {
    /// Map a raw scan code onto the supported key set.
    #[inline]
    pub fn from_raw(code: u16) -> Option<Self> {
        Self::from_u16(code)
    }

    /// The symbol-table identifier this key stands for.
    pub fn symbol(self) -> char {
        match self {
            KeyCode::KeyA => 'a',
            KeyCode::KeyB => 'b',
            KeyCode::KeyC => 'c',
            KeyCode::KeyD => 'd',
            KeyCode::KeyE => 'e',
            KeyCode::KeyF => 'f',
            KeyCode::KeyG => 'g',
            KeyCode::KeyH => 'h',
            KeyCode::KeyI => 'i',
            KeyCode::KeyJ => 'j',
            KeyCode::KeyK => 'k',
            KeyCode::KeyL => 'l',
            KeyCode::KeyM => 'm',
            KeyCode::KeyN => 'n',
            KeyCode::KeyO => 'o',
            KeyCode::KeyP => 'p',
            KeyCode::KeyQ => 'q',
            KeyCode::KeyR => 'r',
            KeyCode::KeyS => 's',
            KeyCode::KeyT => 't',
            KeyCode::KeyU => 'u',
            KeyCode::KeyV => 'v',
            KeyCode::KeyW => 'w',
            KeyCode::KeyX => 'x',
            KeyCode::KeyY => 'y',
            KeyCode::KeyZ => 'z',
            KeyCode::Space => ' ',
        }
    }
}

/// Serialize a record the way the kernel lays it out. Test support.
#[cfg(test)]
pub(crate) fn encode_event(event: &InputEvent) -> [u8; EVENT_SIZE] {
    let mut bytes = [0u8; EVENT_SIZE];
    bytes[0..8].copy_from_slice(&event.tv_sec.to_le_bytes());
    bytes[8..16].copy_from_slice(&event.tv_usec.to_le_bytes());
    bytes[16..18].copy_from_slice(&event.kind.to_le_bytes());
    bytes[18..20].copy_from_slice(&event.code.to_le_bytes());
    bytes[20..24].copy_from_slice(&event.value.to_le_bytes());
    bytes
}

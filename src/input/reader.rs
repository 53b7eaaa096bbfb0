//! Blocking event-device reader
//!
//! Reads fixed-size `input_event` records from a device node and hands
//! them to a callback. The cancellation token is polled between records
//! (and whenever a signal interrupts the blocking read), never mid-record.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{KeytoneError, Result};

use super::event::{parse_event, InputEvent, EVENT_SIZE};

/// Outcome of one blocking record read.
enum RecordRead {
    /// A full record was assembled
    Complete,
    /// The cancellation token was observed set
    Cancelled,
}

/// Blocking reader over a keyboard event device.
///
/// Owned and driven by the (non-real-time) event thread. A read failure is
/// fatal to the event loop; cancellation is a clean return.
pub struct EventReader {
    device: File,
    shutdown: Arc<AtomicBool>,
}

impl EventReader {
    /// Open an event device node for reading.
    ///
    /// The `shutdown` token is the process-wide cancellation signal; the
    /// reader only observes it, ownership stays with the process owner.
    pub fn open<P: AsRef<Path>>(path: P, shutdown: Arc<AtomicBool>) -> Result<Self> {
        let path = path.as_ref();
        let device = File::open(path).map_err(|e| {
            KeytoneError::InputDevice(format!("cannot open {}: {e}", path.display()))
        })?;
        Ok(EventReader { device, shutdown })
    }

    /// Deliver events to `on_event` until cancellation or a read failure.
    ///
    /// Returns `Ok(())` when the cancellation token ends the loop; any
    /// read failure (including end-of-stream on the device) is an error
    /// the caller escalates into process shutdown.
    pub fn run<F>(&mut self, mut on_event: F) -> Result<()>
    where
        F: FnMut(&InputEvent),
    {
        let mut record = [0u8; EVENT_SIZE];
        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                return Ok(());
            }
            match self.read_record(&mut record)? {
                RecordRead::Cancelled => return Ok(()),
                RecordRead::Complete => {
                    if let Ok((_, event)) = parse_event(&record) {
                        on_event(&event);
                    }
                }
            }
        }
    }

    /// Assemble one full record from the device.
    ///
    /// Blocks until the record is complete. A signal that interrupts the
    /// read is used as a poll point for the cancellation token.
    fn read_record(&mut self, record: &mut [u8; EVENT_SIZE]) -> Result<RecordRead> {
        let mut filled = 0;
        while filled < EVENT_SIZE {
            match self.device.read(&mut record[filled..]) {
                Ok(0) => {
                    return Err(KeytoneError::InputDevice(
                        "input device closed (end of stream)".into(),
                    ));
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {
                    if self.shutdown.load(Ordering::Relaxed) {
                        return Ok(RecordRead::Cancelled);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(RecordRead::Complete)
    }
}

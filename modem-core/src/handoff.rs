//! Line handoff between the receive interrupt and the command task.
//!
//! The receive side calls [`LineBuffer::feed`] for every byte. When a line
//! completes, the buffer is marked unavailable and the command task is woken.
//! Until the task calls [`LineBuffer::release`], further bytes are dropped:
//! there is never more than one line in flight, and nothing is queued.
//!
//! # Example
//!
//! ```
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use modem_core::{LineBuffer, LineEvent};
//!
//! let buffer = LineBuffer::<NoopRawMutex>::new();
//! for &b in b"ATI" {
//!     buffer.feed(b);
//! }
//! assert_eq!(buffer.feed(b'\r'), Some(LineEvent::Complete));
//! assert_eq!(buffer.feed(b'x'), None); // busy, dropped
//!
//! let line = buffer.pending_line().unwrap();
//! assert_eq!(&line[..], b"ATI");
//! buffer.release();
//! assert!(buffer.is_available());
//! ```

use core::cell::RefCell;

use at_proto::{LineAssembler, LineEvent, LINE_CAPACITY};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use heapless::Vec;
use portable_atomic::{AtomicBool, Ordering};

/// A completed command line, copied out of the receive buffer.
pub type Line<const N: usize = LINE_CAPACITY> = Vec<u8, N>;

/// Receive buffer shared by the interrupt and the command task.
///
/// With `CriticalSectionRawMutex` the buffer can live in a `static` and be
/// fed from an interrupt-priority executor.
pub struct LineBuffer<M: RawMutex, const N: usize = LINE_CAPACITY> {
    line: Mutex<M, RefCell<LineAssembler<N>>>,
    /// Cleared when a line completes, set once the task has consumed it.
    available: AtomicBool,
    ready: Signal<M, ()>,
}

impl<M: RawMutex, const N: usize> LineBuffer<M, N> {
    /// Create an empty, available buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line: Mutex::new(RefCell::new(LineAssembler::new())),
            available: AtomicBool::new(true),
            ready: Signal::new(),
        }
    }

    // --- Receive (interrupt) side ---

    /// Feed one received byte.
    ///
    /// Returns `None` if the byte was dropped because a completed line is
    /// still waiting to be processed. Never blocks.
    pub fn feed(&self, byte: u8) -> Option<LineEvent> {
        if !self.is_available() {
            return None;
        }

        let event = self.line.lock(|line| line.borrow_mut().push(byte));
        if event == LineEvent::Complete {
            self.available.store(false, Ordering::Release);
            self.ready.signal(());
        }
        Some(event)
    }

    /// Store one content byte without interpreting control characters.
    ///
    /// Returns `None` if the byte was dropped, as for [`feed`](Self::feed).
    pub fn append_byte(&self, byte: u8) -> Option<LineEvent> {
        if !self.is_available() {
            return None;
        }
        Some(self.line.lock(|line| line.borrow_mut().append_byte(byte)))
    }

    /// Remove the last typed character, if input is being accepted.
    pub fn backspace(&self) {
        if self.is_available() {
            self.line.lock(|line| line.borrow_mut().backspace());
        }
    }

    /// Whether bytes are currently accepted.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    // --- Command task side ---

    /// Wait until a completed line is pending.
    pub async fn wait(&self) {
        self.ready.wait().await;
    }

    /// Copy of the pending line, `None` if nothing is pending.
    pub fn pending_line(&self) -> Option<Line<N>> {
        if self.is_available() {
            return None;
        }
        Some(self.line.lock(|line| line.borrow().snapshot()))
    }

    /// Clear the buffer and accept input again.
    pub fn release(&self) {
        self.line.lock(|line| line.borrow_mut().clear());
        self.ready.reset();
        self.available.store(true, Ordering::Release);
    }

    /// Number of bytes typed so far.
    pub fn len(&self) -> usize {
        self.line.lock(|line| line.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: RawMutex, const N: usize> Default for LineBuffer<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

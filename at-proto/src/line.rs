//! Byte-at-a-time line assembly for the AT console.
//!
//! The assembler is fed one byte per receive interrupt. A carriage return
//! completes the line (the terminator itself is never stored), a backspace
//! removes the last stored character, and a line that would fill the buffer
//! is discarded so the next command starts from a clean slate.

use heapless::Vec;

/// Receive buffer size in bytes.
///
/// A completed line holds at most `LINE_CAPACITY - 1` bytes: the byte that
/// would fill the buffer triggers [`LineEvent::Overflow`] instead.
pub const LINE_CAPACITY: usize = 64;

/// Line terminator (enter key).
pub const CARRIAGE_RETURN: u8 = 0x0D;

/// Backspace key.
pub const BACKSPACE: u8 = 0x08;

/// Outcome of feeding one byte to a [`LineAssembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineEvent {
    /// Byte consumed, the line is still being typed.
    Continue,
    /// Terminator received; [`LineAssembler::line`] holds the command.
    Complete,
    /// The line reached capacity and was discarded.
    Overflow,
}

/// Fixed-capacity line editor.
///
/// `N` is the storage size; see [`LINE_CAPACITY`] for the length rules.
#[derive(Debug, Clone)]
pub struct LineAssembler<const N: usize = LINE_CAPACITY> {
    buf: Vec<u8, N>,
}

impl<const N: usize> LineAssembler<N> {
    /// Create an empty assembler.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Feed a received byte, handling terminator and backspace.
    pub fn push(&mut self, byte: u8) -> LineEvent {
        match byte {
            CARRIAGE_RETURN => LineEvent::Complete,
            BACKSPACE => {
                self.backspace();
                LineEvent::Continue
            }
            _ => self.append_byte(byte),
        }
    }

    /// Store a plain byte.
    ///
    /// Reaching capacity clears the buffer and reports [`LineEvent::Overflow`].
    pub fn append_byte(&mut self, byte: u8) -> LineEvent {
        if self.buf.push(byte).is_err() || self.buf.len() == N {
            self.clear();
            return LineEvent::Overflow;
        }
        LineEvent::Continue
    }

    /// Remove the most recently stored character. No-op on an empty line.
    pub fn backspace(&mut self) {
        let _ = self.buf.pop();
    }

    /// Bytes typed so far, without terminator.
    #[inline]
    #[must_use]
    pub fn line(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Copy of the bytes typed so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<u8, N> {
        self.buf.clone()
    }

    /// Storage size in bytes.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drop the current contents.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    fn feed_all<const N: usize>(asm: &mut LineAssembler<N>, bytes: &[u8]) -> Vec<LineEvent> {
        bytes.iter().map(|&b| asm.push(b)).collect()
    }

    #[test]
    fn test_complete_line_excludes_terminator() {
        let mut asm = LineAssembler::<LINE_CAPACITY>::new();
        let events = feed_all(&mut asm, b"AT+M+bob\r");

        assert_eq!(events.last(), Some(&LineEvent::Complete));
        assert_eq!(
            events.iter().filter(|e| **e == LineEvent::Complete).count(),
            1
        );
        assert_eq!(asm.line(), b"AT+M+bob");
        assert_eq!(asm.len(), 8);
    }

    #[test]
    fn test_backspace_removes_last_character() {
        let mut asm = LineAssembler::<LINE_CAPACITY>::new();
        feed_all(&mut asm, b"ATX\x08I");
        assert_eq!(asm.line(), b"ATI");
    }

    #[test]
    fn test_backspace_on_empty_line_clamps() {
        let mut asm = LineAssembler::<LINE_CAPACITY>::new();
        assert_eq!(asm.push(BACKSPACE), LineEvent::Continue);
        assert_eq!(asm.push(BACKSPACE), LineEvent::Continue);
        assert!(asm.is_empty());

        feed_all(&mut asm, b"A\x08\x08\x08T");
        assert_eq!(asm.line(), b"T");
    }

    #[test]
    fn test_longest_line_still_completes() {
        let mut asm = LineAssembler::<8>::new();
        let events = feed_all(&mut asm, b"1234567\r");
        assert!(!events.contains(&LineEvent::Overflow));
        assert_eq!(events.last(), Some(&LineEvent::Complete));
        assert_eq!(asm.line(), b"1234567");
    }

    #[test]
    fn test_overflow_at_capacity_resets() {
        let mut asm = LineAssembler::<8>::new();
        let events = feed_all(&mut asm, b"12345678");
        assert_eq!(events.last(), Some(&LineEvent::Overflow));
        assert_eq!(asm.len(), 0);

        // Input resumes normally after the discarded line
        let events = feed_all(&mut asm, b"ATH\r");
        assert_eq!(events.last(), Some(&LineEvent::Complete));
        assert_eq!(asm.line(), b"ATH");
    }

    #[test]
    fn test_default_capacity_overflow() {
        let mut asm = LineAssembler::<LINE_CAPACITY>::default();
        for _ in 0..LINE_CAPACITY - 1 {
            assert_eq!(asm.push(b'x'), LineEvent::Continue);
        }
        assert_eq!(asm.push(b'x'), LineEvent::Overflow);
        assert!(asm.is_empty());
        assert_eq!(asm.capacity(), LINE_CAPACITY);
    }
}

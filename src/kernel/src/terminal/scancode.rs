//! Scancode set 1 decoding for the polled keyboard.
//!
//! Raw byte in, classified key event out. The mapping is the US QWERTY
//! subset of scancode set 1: four contiguous key-row ranges plus a handful
//! of discrete control codes. Everything else, break codes included, is
//! [`KeyEvent::Unrecognized`] and callers drop it on the floor.

/// A classified keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable ASCII character.
    Char(u8),
    /// The Enter key: submit the current line.
    Enter,
    /// The Backspace key.
    Backspace,
    /// The Tab key. The editor inserts it as an ordinary character.
    Tab,
    /// The Escape key. Nothing in the console reacts to it today.
    Escape,
    /// Lead byte (0xE0) of a two-byte extended sequence.
    ExtendedPrefix,
    /// A code outside the recognized set; silently ignored by callers.
    Unrecognized,
}

// Key-row lookup tables, indexed by offset from the row's first scancode.
const DIGIT_ROW: &[u8; 12] = b"1234567890-=";
const UPPER_ROW: &[u8; 12] = b"qwertyuiop[]";
const HOME_ROW: &[u8; 11] = b"asdfghjkl;'";
const LOWER_ROW: &[u8; 10] = b"zxcvbnm,./";

/// Stateful scancode decoder.
///
/// Decoding is a pure lookup except for extended sequences: after the 0xE0
/// lead byte the decoder consumes and discards exactly one following byte
/// (reported as [`KeyEvent::Unrecognized`]). Extended keys are not part of
/// this console's vocabulary, and swallowing the second byte keeps it from
/// being misread as a printable key.
pub struct ScancodeDecoder {
    skip_next: bool,
}

impl ScancodeDecoder {
    /// Creates a decoder in the ground state.
    pub const fn new() -> Self {
        ScancodeDecoder { skip_next: false }
    }

    /// Classifies one raw scancode.
    pub fn decode(&mut self, code: u8) -> KeyEvent {
        if self.skip_next {
            // Second byte of an extended sequence, discarded by policy.
            self.skip_next = false;
            return KeyEvent::Unrecognized;
        }
        match code {
            0x01 => KeyEvent::Escape,
            0x0E => KeyEvent::Backspace,
            0x0F => KeyEvent::Tab,
            0x1C => KeyEvent::Enter,
            0x39 => KeyEvent::Char(b' '),
            0xE0 => {
                self.skip_next = true;
                KeyEvent::ExtendedPrefix
            }
            0x02..=0x0D => KeyEvent::Char(DIGIT_ROW[(code - 0x02) as usize]),
            0x10..=0x1B => KeyEvent::Char(UPPER_ROW[(code - 0x10) as usize]),
            0x1E..=0x28 => KeyEvent::Char(HOME_ROW[(code - 0x1E) as usize]),
            0x2C..=0x35 => KeyEvent::Char(LOWER_ROW[(code - 0x2C) as usize]),
            _ => KeyEvent::Unrecognized,
        }
    }
}

impl Default for ScancodeDecoder {
    fn default() -> Self {
        Self::new()
    }
}

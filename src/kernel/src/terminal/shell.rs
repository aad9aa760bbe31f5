//! Line editor and command history.
//!
//! Turns the decoder's key events into a submitted command line: printable
//! characters accumulate in a bounded buffer and echo to the screen,
//! Backspace erases, Enter submits. Submitted non-blank lines are recorded
//! in a bounded, append-only history log.

use heapless::{String, Vec};

use super::scancode::KeyEvent;
use crate::arch::x86_64::vga::{Color, Vga};

/// Input buffer capacity. The final slot stays reserved for a line
/// terminator, so the longest accepted line is `MAX_LINE - 1` characters.
pub const MAX_LINE: usize = 256;

/// History log capacity. Once full, new entries are dropped, not rotated.
pub const MAX_HISTORY: usize = 50;

/// One command line.
pub type Line = String<MAX_LINE>;

/// The append-only history log, oldest entry first.
pub type HistoryLog = Vec<Line, MAX_HISTORY>;

/// Prompt text, drawn in two colors by [`Shell::prompt`].
const PROMPT_NAME: &str = "kestrel";
const PROMPT_TAIL: &str = "> ";

/// The interactive line editor.
pub struct Shell {
    line: Line,
    history: HistoryLog,
}

impl Shell {
    /// Creates a shell with an empty buffer and history.
    pub fn new() -> Self {
        Shell {
            line: Line::new(),
            history: HistoryLog::new(),
        }
    }

    /// Draws the prompt at the cursor.
    pub fn prompt(&self, con: &mut Vga) {
        con.set_color(Color::LightGreen, Color::Black);
        con.put_str(PROMPT_NAME);
        con.set_color(Color::White, Color::Black);
        con.put_str(PROMPT_TAIL);
    }

    /// Feeds one key event through the editor.
    ///
    /// Returns the submitted line when the event was Enter; the buffer is
    /// already reset and the newline echoed by the time it is returned.
    /// Events the editor has no use for (Escape, the extended-sequence
    /// artifacts, unrecognized codes) fall through without effect.
    pub fn handle_key(&mut self, event: KeyEvent, con: &mut Vga) -> Option<Line> {
        match event {
            KeyEvent::Char(byte) => {
                self.insert(byte, con);
                None
            }
            KeyEvent::Tab => {
                // An ordinary character as far as the editor is concerned.
                self.insert(b'\t', con);
                None
            }
            KeyEvent::Backspace => {
                self.backspace(con);
                None
            }
            KeyEvent::Enter => Some(self.submit(con)),
            KeyEvent::Escape | KeyEvent::ExtendedPrefix | KeyEvent::Unrecognized => None,
        }
    }

    /// The current, not-yet-submitted input.
    pub fn input(&self) -> &str {
        &self.line
    }

    /// The recorded history, oldest first.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Appends a character and echoes it, or drops it silently when the
    /// buffer has reached its last usable slot.
    fn insert(&mut self, byte: u8, con: &mut Vga) {
        if self.line.len() < MAX_LINE - 1 && self.line.push(byte as char).is_ok() {
            con.put_char(byte);
        }
    }

    /// Removes the last buffered character and erases its glyph: cursor
    /// back, space over it, cursor back again. A no-op on an empty buffer,
    /// so the cursor never retreats into the prompt.
    fn backspace(&mut self, con: &mut Vga) {
        if self.line.pop().is_some() {
            con.put_char(b'\x08');
            con.put_char(b' ');
            con.put_char(b'\x08');
        }
    }

    /// Ends the line: echo the newline, record non-blank submissions in
    /// the history, hand the line back, and reset the buffer.
    fn submit(&mut self, con: &mut Vga) -> Line {
        con.put_char(b'\n');
        let line = self.line.clone();
        self.line.clear();
        if line.bytes().any(|b| b != b' ' && b != b'\t') && self.history.push(line.clone()).is_err()
        {
            log::debug!("history log full; submission not recorded");
        }
        line
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

//! Boot-time console self-checks.
//!
//! Runs before the screen is claimed for the console, so the checks may
//! scribble freely; bring-up clears the display right afterwards. A
//! failure panics, which is the correct end state for a console whose
//! decode tables are wrong.

use crate::arch::x86_64::vga::Vga;
use crate::serial_println;
use crate::terminal::scancode::{KeyEvent, ScancodeDecoder};
use crate::terminal::shell::{Shell, MAX_HISTORY, MAX_LINE};

/// Runs all self-checks.
pub fn run_all(con: &mut Vga) {
    serial_println!("Running console self-checks...");

    check_scancode_tables();
    check_extended_sequences();
    check_integer_rendering(con);
    check_line_capacity(con);
    check_history_capacity(con);

    serial_println!("All console self-checks passed!");
}

fn check_scancode_tables() {
    serial_println!("check_scancode_tables... ");
    let mut decoder = ScancodeDecoder::new();

    assert_eq!(decoder.decode(0x1E), KeyEvent::Char(b'a'));
    assert_eq!(decoder.decode(0x39), KeyEvent::Char(b' '));
    assert_eq!(decoder.decode(0x02), KeyEvent::Char(b'1'));
    assert_eq!(decoder.decode(0x0B), KeyEvent::Char(b'0'));
    assert_eq!(decoder.decode(0x10), KeyEvent::Char(b'q'));
    assert_eq!(decoder.decode(0x35), KeyEvent::Char(b'/'));
    assert_eq!(decoder.decode(0x1C), KeyEvent::Enter);
    assert_eq!(decoder.decode(0x0E), KeyEvent::Backspace);
    assert_eq!(decoder.decode(0x0F), KeyEvent::Tab);
    assert_eq!(decoder.decode(0x01), KeyEvent::Escape);
    // Break codes and anything else out of range are ignored.
    assert_eq!(decoder.decode(0x9E), KeyEvent::Unrecognized);
    assert_eq!(decoder.decode(0x81), KeyEvent::Unrecognized);
    serial_println!("[ok]");
}

fn check_extended_sequences() {
    serial_println!("check_extended_sequences... ");
    let mut decoder = ScancodeDecoder::new();

    assert_eq!(decoder.decode(0xE0), KeyEvent::ExtendedPrefix);
    // The byte after the prefix is swallowed even if it would otherwise
    // decode (0x48 is an extended arrow, but also nothing printable).
    assert_eq!(decoder.decode(0x48), KeyEvent::Unrecognized);
    // Decoding resumes normally afterwards.
    assert_eq!(decoder.decode(0x1E), KeyEvent::Char(b'a'));
    serial_println!("[ok]");
}

fn check_integer_rendering(con: &mut Vga) {
    serial_println!("check_integer_rendering... ");

    con.set_cursor(0, 0);
    con.put_uint(0);
    assert_eq!(con.char_at(0, 0), b'0');

    con.set_cursor(0, 1);
    con.put_uint(1234);
    assert_eq!(con.char_at(0, 1), b'1');
    assert_eq!(con.char_at(3, 1), b'4');

    con.set_cursor(0, 2);
    con.put_int(-7);
    assert_eq!(con.char_at(0, 2), b'-');
    assert_eq!(con.char_at(1, 2), b'7');
    serial_println!("[ok]");
}

fn check_line_capacity(con: &mut Vga) {
    serial_println!("check_line_capacity... ");
    let mut shell = Shell::new();

    for _ in 0..MAX_LINE + 10 {
        shell.handle_key(KeyEvent::Char(b'x'), con);
    }
    // The final slot is reserved; everything past it was dropped.
    assert_eq!(shell.input().len(), MAX_LINE - 1);
    serial_println!("[ok]");
}

fn check_history_capacity(con: &mut Vga) {
    serial_println!("check_history_capacity... ");
    let mut shell = Shell::new();

    for _ in 0..MAX_HISTORY + 1 {
        shell.handle_key(KeyEvent::Char(b'h'), con);
        shell.handle_key(KeyEvent::Enter, con);
    }
    assert_eq!(shell.history().len(), MAX_HISTORY);
    serial_println!("[ok]");
}

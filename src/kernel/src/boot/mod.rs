//! Boot status lines with colored state indicators.
//!
//! The user-facing half of bring-up reporting; the structured half goes to
//! the serial log.

pub mod banner;

use crate::arch::x86_64::vga::{Color, Vga};

/// Boot status indicators.
#[derive(Debug, Clone, Copy)]
pub enum Status {
    /// Success - `[ OK ]` in green
    Ok,
    /// Failure - `[FAIL]` in red
    Fail,
    /// Warning - `[WARN]` in yellow
    Warn,
    /// Informational - `[INFO]` in cyan
    Info,
}

/// Prints a boot stage line: `[ OK ] Message text`.
pub fn log(con: &mut Vga, status: Status, message: &str) {
    print_status(con, status);
    con.put_char(b' ');
    con.put_str(message);
    con.put_char(b'\n');
}

/// Prints an indented detail line under the previous stage.
pub fn log_detail(con: &mut Vga, message: &str) {
    con.put_str("       ");
    con.put_str(message);
    con.put_char(b'\n');
}

fn print_status(con: &mut Vga, status: Status) {
    let (text, color) = match status {
        Status::Ok => ("[ OK ]", Color::LightGreen),
        Status::Fail => ("[FAIL]", Color::LightRed),
        Status::Warn => ("[WARN]", Color::Yellow),
        Status::Info => ("[INFO]", Color::LightCyan),
    };
    con.set_color(color, Color::Black);
    con.put_str(text);
    con.set_color(Color::White, Color::Black);
}

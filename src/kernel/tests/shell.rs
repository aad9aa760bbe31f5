//! Decoder, line editor, and dispatch behavior, end to end against the
//! real display plus scripted keyboard hardware.

#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(kestrel_kernel::testutil::test_runner)]
#![reexport_test_harness_main = "test_main"]

use core::panic::PanicInfo;
use heapless::String;
use kestrel_hal::{Delay, KeyboardPort};
use kestrel_kernel::arch::x86_64::vga::{Vga, BUFFER_HEIGHT, BUFFER_WIDTH};
use kestrel_kernel::terminal::shell::{HistoryLog, MAX_HISTORY, MAX_LINE};
use kestrel_kernel::terminal::{self, Command, KeyEvent, ScancodeDecoder, Shell};

#[no_mangle]
pub extern "C" fn _start() -> ! {
    kestrel_kernel::init();
    test_main();
    kestrel_kernel::testutil::exit_qemu(kestrel_kernel::testutil::QemuExitCode::Success);
    loop {}
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    kestrel_kernel::testutil::test_panic_handler(info)
}

/// Scans the whole grid for a row containing `needle`.
fn screen_contains(con: &Vga, needle: &str) -> bool {
    for row in 0..BUFFER_HEIGHT {
        let mut text: String<BUFFER_WIDTH> = String::new();
        for column in 0..BUFFER_WIDTH {
            let _ = text.push(con.char_at(column, row) as char);
        }
        if text.contains(needle) {
            return true;
        }
    }
    false
}

/// A port that never has anything to say.
struct SilentPort;

impl KeyboardPort for SilentPort {
    fn scancode_ready(&mut self) -> bool {
        false
    }

    fn read_scancode(&mut self) -> u8 {
        unreachable!("read from a port that never reported ready")
    }
}

/// A port that becomes ready after a fixed number of status polls.
struct ScriptedPort {
    ready_after: usize,
    polls: usize,
    code: u8,
}

impl KeyboardPort for ScriptedPort {
    fn scancode_ready(&mut self) -> bool {
        self.polls += 1;
        self.polls > self.ready_after
    }

    fn read_scancode(&mut self) -> u8 {
        self.code
    }
}

/// Counts idle calls instead of pausing.
struct CountingDelay {
    idles: usize,
}

impl Delay for CountingDelay {
    fn idle(&mut self) {
        self.idles += 1;
    }
}

// ---------------------------------------------------------------------------
// Scancode decoding
// ---------------------------------------------------------------------------

#[test_case]
fn decode_table_spot_checks() {
    let mut decoder = ScancodeDecoder::new();
    assert_eq!(decoder.decode(0x1E), KeyEvent::Char(b'a'));
    assert_eq!(decoder.decode(0x39), KeyEvent::Char(b' '));
    assert_eq!(decoder.decode(0x1C), KeyEvent::Enter);
    assert_eq!(decoder.decode(0x0E), KeyEvent::Backspace);
    assert_eq!(decoder.decode(0x0D), KeyEvent::Char(b'='));
    assert_eq!(decoder.decode(0x28), KeyEvent::Char(b'\''));
    assert_eq!(decoder.decode(0x33), KeyEvent::Char(b','));
}

#[test_case]
fn break_codes_are_unrecognized() {
    let mut decoder = ScancodeDecoder::new();
    // Release of 'a' (0x1E | 0x80) and a couple of others.
    assert_eq!(decoder.decode(0x9E), KeyEvent::Unrecognized);
    assert_eq!(decoder.decode(0xAA), KeyEvent::Unrecognized);
    assert_eq!(decoder.decode(0xFF), KeyEvent::Unrecognized);
}

#[test_case]
fn extended_prefix_swallows_one_byte() {
    let mut decoder = ScancodeDecoder::new();
    assert_eq!(decoder.decode(0xE0), KeyEvent::ExtendedPrefix);
    // Even a code that normally prints ('a') is discarded right after the
    // prefix; extended sequences never leak characters.
    assert_eq!(decoder.decode(0x1E), KeyEvent::Unrecognized);
    // Back to normal on the byte after that.
    assert_eq!(decoder.decode(0x1E), KeyEvent::Char(b'a'));
}

// ---------------------------------------------------------------------------
// Line editing
// ---------------------------------------------------------------------------

#[test_case]
fn buffer_rejects_past_capacity() {
    let mut con = Vga::new();
    con.clear();
    let mut shell = Shell::new();
    for _ in 0..MAX_LINE - 1 {
        shell.handle_key(KeyEvent::Char(b'x'), &mut con);
    }
    assert_eq!(shell.input().len(), MAX_LINE - 1);

    // The rejected append leaves the contents untouched.
    shell.handle_key(KeyEvent::Char(b'y'), &mut con);
    assert_eq!(shell.input().len(), MAX_LINE - 1);
    assert!(shell.input().bytes().all(|b| b == b'x'));
}

#[test_case]
fn backspace_on_empty_buffer_is_idempotent() {
    let mut con = Vga::new();
    con.clear();
    let mut shell = Shell::new();
    let before = con.cursor();
    shell.handle_key(KeyEvent::Backspace, &mut con);
    assert_eq!(shell.input().len(), 0);
    assert_eq!(con.cursor(), before);
}

#[test_case]
fn backspace_erases_the_glyph() {
    let mut con = Vga::new();
    con.clear();
    let mut shell = Shell::new();
    shell.handle_key(KeyEvent::Char(b'a'), &mut con);
    shell.handle_key(KeyEvent::Char(b'b'), &mut con);
    shell.handle_key(KeyEvent::Backspace, &mut con);
    assert_eq!(shell.input(), "a");
    assert_eq!(con.cursor(), (1, 0));
    assert_eq!(con.char_at(1, 0), b' ');
}

#[test_case]
fn history_caps_and_keeps_order() {
    let mut con = Vga::new();
    con.clear();
    let mut shell = Shell::new();
    // Distinct two-digit lines: "00", "01", ... "50".
    for i in 0..MAX_HISTORY + 1 {
        shell.handle_key(KeyEvent::Char(b'0' + (i / 10) as u8), &mut con);
        shell.handle_key(KeyEvent::Char(b'0' + (i % 10) as u8), &mut con);
        shell.handle_key(KeyEvent::Enter, &mut con);
    }
    let history = shell.history();
    assert_eq!(history.len(), MAX_HISTORY);
    assert_eq!(history[0], "00");
    assert_eq!(history[MAX_HISTORY - 1], "49");
    // "50" was silently dropped, not rotated in.
}

#[test_case]
fn blank_lines_are_not_recorded() {
    let mut con = Vga::new();
    con.clear();
    let mut shell = Shell::new();
    shell.handle_key(KeyEvent::Char(b' '), &mut con);
    shell.handle_key(KeyEvent::Tab, &mut con);
    let submitted = shell.handle_key(KeyEvent::Enter, &mut con);
    assert!(submitted.is_some());
    assert!(shell.history().is_empty());
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[test_case]
fn help_lists_every_builtin() {
    let mut con = Vga::new();
    con.clear();
    let history = HistoryLog::new();
    Command::parse("help").unwrap().execute(&mut con, &history);
    for name in [
        "help", "clear", "echo", "ls", "pwd", "whoami", "date", "uname", "sysinfo", "history",
        "exit", "reboot",
    ] {
        assert!(screen_contains(&con, name));
    }
}

#[test_case]
fn unknown_command_is_reported_not_fatal() {
    let mut con = Vga::new();
    con.clear();
    let history = HistoryLog::new();
    Command::parse("totally-unknown-cmd")
        .unwrap()
        .execute(&mut con, &history);
    assert!(screen_contains(&con, "command not found: totally-unknown-cmd"));
    assert!(screen_contains(&con, "help"));
}

#[test_case]
fn echo_joins_arguments() {
    let mut con = Vga::new();
    con.clear();
    let history = HistoryLog::new();
    Command::parse("echo hello   world\t!")
        .unwrap()
        .execute(&mut con, &history);
    assert!(screen_contains(&con, "hello world !"));
}

#[test_case]
fn whitespace_only_line_parses_to_nothing() {
    assert!(Command::parse("").is_none());
    assert!(Command::parse("   \t  ").is_none());
}

#[test_case]
fn history_command_is_one_indexed() {
    let mut con = Vga::new();
    con.clear();
    let mut history = HistoryLog::new();
    let mut entry = heapless::String::new();
    let _ = entry.push_str("uname");
    let _ = history.push(entry);
    Command::parse("history").unwrap().execute(&mut con, &history);
    assert!(screen_contains(&con, "1  uname"));
}

// ---------------------------------------------------------------------------
// Polling helpers with scripted hardware
// ---------------------------------------------------------------------------

#[test_case]
fn poll_returns_nothing_on_idle_port() {
    let mut port = SilentPort;
    assert_eq!(terminal::poll_scancode(&mut port), None);
}

#[test_case]
fn probe_gives_up_after_bounded_attempts() {
    let mut port = SilentPort;
    let mut delay = CountingDelay { idles: 0 };
    assert_eq!(terminal::probe_scancode(&mut port, &mut delay, 32), None);
    assert_eq!(delay.idles, 32);
}

#[test_case]
fn probe_reports_input_when_present() {
    let mut port = ScriptedPort {
        ready_after: 5,
        polls: 0,
        code: 0x1E,
    };
    let mut delay = CountingDelay { idles: 0 };
    assert_eq!(
        terminal::probe_scancode(&mut port, &mut delay, 32),
        Some(0x1E)
    );
    assert!(delay.idles < 32);
}

#[test_case]
fn wait_blocks_until_the_key_arrives() {
    let mut port = ScriptedPort {
        ready_after: 9,
        polls: 0,
        code: 0x39,
    };
    let mut delay = CountingDelay { idles: 0 };
    assert_eq!(terminal::wait_scancode(&mut port, &mut delay), 0x39);
    assert_eq!(delay.idles, 9);
}

// ---------------------------------------------------------------------------
// Whole pipeline: scancodes in, command out
// ---------------------------------------------------------------------------

#[test_case]
fn typed_help_reaches_the_dispatcher() {
    let mut con = Vga::new();
    con.clear();
    let mut decoder = ScancodeDecoder::new();
    let mut shell = Shell::new();

    // h, e, l, p, Enter in scancode set 1.
    let mut submitted = None;
    for code in [0x23u8, 0x12, 0x26, 0x19, 0x1C] {
        let event = decoder.decode(code);
        if let Some(line) = shell.handle_key(event, &mut con) {
            submitted = Some(line);
        }
    }

    let line = submitted.expect("Enter should submit the line");
    assert_eq!(&line[..], "help");
    assert_eq!(Command::parse(&line), Some(Command::Help));
    assert_eq!(shell.history().len(), 1);
}

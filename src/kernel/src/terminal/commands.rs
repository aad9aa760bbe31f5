//! Built-in shell commands.
//!
//! A submitted line is tokenized into a bounded argument vector; the first
//! token picks the builtin. Every command is self-contained: the only
//! side effect beyond screen output is the reset request behind `reboot`.

use heapless::Vec;

use super::shell::HistoryLog;
use crate::arch::x86_64::vga::{Color, Vga};
use crate::arch::x86_64::{self, ps2};

/// Maximum number of tokens taken from one line; surplus is dropped.
pub const MAX_ARGS: usize = 16;

/// A tokenized argument vector borrowing from the submitted line.
pub type Argv<'a> = Vec<&'a str, MAX_ARGS>;

// Fixed facts reported by the descriptive builtins. Nothing on this
// machine can be queried live, so they are compile-time strings.
const USER: &str = "kestrel";
const HOSTNAME: &str = "kestrelos";
const WORKING_DIR: &str = "/home/kestrel";
const RELEASE: &str = "0.1.0";
const MACHINE: &str = "x86_64";
const DATE_STAMP: &str = "Wed Aug  6 12:00:00 UTC 2025";

/// Builtin names and one-line descriptions, as printed by `help`.
const BUILTINS: &[(&str, &str)] = &[
    ("help", "Show this help message"),
    ("clear", "Clear the screen"),
    ("echo", "Print its arguments"),
    ("ls", "List the system files"),
    ("pwd", "Print the working directory"),
    ("whoami", "Print the current user"),
    ("date", "Print the date stamp"),
    ("uname", "Print system identification"),
    ("sysinfo", "Show the system information block"),
    ("history", "Show submitted commands, oldest first"),
    ("exit", "Say goodbye (the console keeps running)"),
    ("reboot", "Request a system reset"),
];

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Display the builtin table.
    Help,
    /// Clear the screen.
    Clear,
    /// Reprint the arguments, space-joined.
    Echo(Argv<'a>),
    /// List the (simulated) system files.
    Ls,
    /// Print the working directory.
    Pwd,
    /// Print the current user.
    Whoami,
    /// Print the date stamp.
    Date,
    /// Print system identification.
    Uname,
    /// Show the system information block.
    Sysinfo,
    /// Show the history log, 1-indexed.
    History,
    /// Farewell message; the loop continues.
    Exit,
    /// Farewell message, then a reset request to the keyboard controller.
    Reboot,
    /// Anything that matched no builtin name.
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Tokenizes a submitted line and matches the first token.
    ///
    /// Returns `None` for a line with no tokens at all; nothing runs and
    /// the caller just redraws the prompt.
    pub fn parse(line: &'a str) -> Option<Command<'a>> {
        let mut argv: Argv<'a> = Vec::new();
        for token in line.split([' ', '\t']) {
            if token.is_empty() {
                continue;
            }
            if argv.push(token).is_err() {
                log::warn!("argument vector full; surplus tokens dropped");
                break;
            }
        }
        let name = *argv.first()?;
        Some(match name {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "echo" => {
                let mut args = Argv::new();
                for &token in &argv[1..] {
                    let _ = args.push(token);
                }
                Command::Echo(args)
            }
            "ls" => Command::Ls,
            "pwd" => Command::Pwd,
            "whoami" => Command::Whoami,
            "date" => Command::Date,
            "uname" => Command::Uname,
            "sysinfo" => Command::Sysinfo,
            "history" => Command::History,
            "exit" => Command::Exit,
            "reboot" => Command::Reboot,
            _ => Command::Unknown(name),
        })
    }

    /// Runs the command, writing through the console.
    pub fn execute(&self, con: &mut Vga, history: &HistoryLog) {
        match self {
            Command::Help => cmd_help(con),
            Command::Clear => con.clear(),
            Command::Echo(args) => cmd_echo(con, args),
            Command::Ls => cmd_ls(con),
            Command::Pwd => {
                con.put_str(WORKING_DIR);
                con.put_char(b'\n');
            }
            Command::Whoami => {
                con.put_str(USER);
                con.put_char(b'\n');
            }
            Command::Date => {
                con.put_str(DATE_STAMP);
                con.put_char(b'\n');
            }
            Command::Uname => cmd_uname(con),
            Command::Sysinfo => cmd_sysinfo(con),
            Command::History => cmd_history(con, history),
            Command::Exit => {
                con.put_str("Goodbye. There is no host to return to; the console stays up.\n");
            }
            Command::Reboot => cmd_reboot(con),
            Command::Unknown(name) => cmd_unknown(con, name),
        }
    }
}

/// Display the builtin table.
fn cmd_help(con: &mut Vga) {
    con.put_char(b'\n');
    con.set_color(Color::Cyan, Color::Black);
    con.put_str("KestrelOS built-in commands\n");
    con.put_str("---------------------------\n");
    con.set_color(Color::White, Color::Black);
    for &(name, blurb) in BUILTINS {
        con.put_str("  ");
        con.put_str(name);
        for _ in name.len()..10 {
            con.put_char(b' ');
        }
        con.put_str(blurb);
        con.put_char(b'\n');
    }
    con.put_char(b'\n');
}

/// Reprint the arguments, space-joined.
fn cmd_echo(con: &mut Vga, args: &Argv) {
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            con.put_char(b' ');
        }
        con.put_str(arg);
    }
    con.put_char(b'\n');
}

/// Fixed listing of the system files.
fn cmd_ls(con: &mut Vga) {
    con.put_str("kestrel.bin\n");
    con.put_str("kestrel.ld\n");
    con.put_str("Makefile\n");
    con.put_str("README.md\n");
}

/// One-line system identification.
fn cmd_uname(con: &mut Vga) {
    con.put_str("KestrelOS ");
    con.put_str(RELEASE);
    con.put_char(b' ');
    con.put_str(MACHINE);
    con.put_char(b'\n');
}

/// Static system-information block. Every fact is fixed at build time.
fn cmd_sysinfo(con: &mut Vga) {
    con.put_char(b'\n');
    con.set_color(Color::LightCyan, Color::Black);
    con.put_str("        ");
    con.put_str(USER);
    con.put_char(b'@');
    con.put_str(HOSTNAME);
    con.put_char(b'\n');
    con.set_color(Color::LightGray, Color::Black);
    con.put_str("        ----------------\n");
    con.set_color(Color::LightGreen, Color::Black);
    con.put_str("OS:      KestrelOS ");
    con.put_str(MACHINE);
    con.put_char(b'\n');
    con.set_color(Color::LightBlue, Color::Black);
    con.put_str("Kernel:  ");
    con.put_str(RELEASE);
    con.put_char(b'\n');
    con.set_color(Color::LightRed, Color::Black);
    con.put_str("Memory:  512M\n");
    con.set_color(Color::Yellow, Color::Black);
    con.put_str("Shell:   kestrel-shell\n");
    con.set_color(Color::White, Color::Black);
    con.put_char(b'\n');
}

/// Show the history log, 1-indexed, oldest first.
fn cmd_history(con: &mut Vga, history: &HistoryLog) {
    for (index, entry) in history.iter().enumerate() {
        con.put_str("  ");
        con.put_uint(index as u64 + 1);
        con.put_str("  ");
        con.put_str(entry);
        con.put_char(b'\n');
    }
}

/// Farewell, then ask the keyboard controller to pulse the reset line.
fn cmd_reboot(con: &mut Vga) {
    con.put_str("Rebooting...\n");
    log::info!("reset requested via keyboard controller");
    ps2::request_cpu_reset();
    // The request is fire-and-forget; park the CPU until it lands.
    x86_64::halt_loop();
}

/// Unknown command notice with a pointer at `help`.
fn cmd_unknown(con: &mut Vga, name: &str) {
    con.set_color(Color::LightRed, Color::Black);
    con.put_str("command not found: ");
    con.put_str(name);
    con.put_char(b'\n');
    con.set_color(Color::White, Color::Black);
    con.put_str("Type 'help' for the list of built-in commands.\n");
}

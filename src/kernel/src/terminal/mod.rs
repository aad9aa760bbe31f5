//! Terminal subsystem: keyboard polling, scancode decoding, line editing,
//! and command dispatch.
//!
//! # Architecture
//!
//! - `scancode`: raw scancode to key event classification
//! - `shell`: bounded line editor and history log
//! - `commands`: built-in command table and dispatch
//!
//! The polling helpers below are the only path from a keyboard port to a
//! scancode; they enforce the ready-before-read protocol so the decode and
//! edit layers never touch the hardware contract.

pub mod commands;
pub mod scancode;
pub mod shell;

pub use commands::Command;
pub use scancode::{KeyEvent, ScancodeDecoder};
pub use shell::Shell;

use kestrel_hal::{Delay, KeyboardPort};

/// Non-blocking poll: the pending scancode, if the port has one.
pub fn poll_scancode<P: KeyboardPort>(port: &mut P) -> Option<u8> {
    if port.scancode_ready() {
        Some(port.read_scancode())
    } else {
        None
    }
}

/// Blocks until a scancode arrives, running the injected delay between
/// polls so the port is not hammered at full CPU speed.
pub fn wait_scancode<P: KeyboardPort, D: Delay>(port: &mut P, delay: &mut D) -> u8 {
    loop {
        if let Some(code) = poll_scancode(port) {
            return code;
        }
        delay.idle();
    }
}

/// Bounded probe: polls `attempts` times, then concludes no input is
/// available.
///
/// This is an advisory liveness check, not a correctness mechanism; the
/// main loop keeps polling forever regardless of what it reports.
pub fn probe_scancode<P: KeyboardPort, D: Delay>(
    port: &mut P,
    delay: &mut D,
    attempts: usize,
) -> Option<u8> {
    for _ in 0..attempts {
        if let Some(code) = poll_scancode(port) {
            return Some(code);
        }
        delay.idle();
    }
    None
}

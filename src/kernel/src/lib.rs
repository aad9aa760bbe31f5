//! KestrelOS Kernel
//!
//! A freestanding interactive console: the kernel owns the VGA text
//! display, polls the PS/2 keyboard controller, assembles keystrokes into
//! a command line, and dispatches a fixed set of built-in commands.
//!
//! # Architecture
//!
//! - `arch`: platform-specific drivers (VGA, PS/2 controller, serial)
//! - `terminal`: scancode decoding, line editing, command dispatch
//! - `boot`: banner and boot status reporting
//! - `logger`: `log` facade wired to the serial port
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with the
//! invariant that makes the usage correct.

#![no_std]
#![warn(missing_docs)]

pub mod arch;
pub mod boot;
pub mod logger;
pub mod terminal;
pub mod tests;
pub mod testutil;

/// Initializes core kernel services.
///
/// Called first in the boot process: brings up serial output and installs
/// the logger so every later stage can report.
pub fn init() {
    #[cfg(target_arch = "x86_64")]
    arch::x86_64::serial::init();
    logger::init();
}

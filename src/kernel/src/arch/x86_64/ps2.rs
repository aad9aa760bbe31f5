//! Polled PS/2 keyboard controller access.
//!
//! The controller speaks through two byte-wide ports: data at 0x60 and the
//! shared status/command register at 0x64. This console never enables the
//! keyboard interrupt; input is taken by testing the status register's
//! output-buffer bit and reading the data port only when it is set.

use bitflags::bitflags;
use x86_64::instructions::port::{Port, PortReadOnly, PortWriteOnly};

use kestrel_hal::KeyboardPort;

/// Scancode data register.
const DATA_PORT: u16 = 0x60;

/// Status register (read) / controller command register (write).
const STATUS_COMMAND_PORT: u16 = 0x64;

/// Controller command that pulses the CPU reset line.
const CMD_RESET_CPU: u8 = 0xFE;

bitflags! {
    /// Keyboard controller status register bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct KbcStatus: u8 {
        /// A byte is waiting in the output (controller-to-host) buffer.
        const OUTPUT_FULL = 1 << 0;
        /// The input (host-to-controller) buffer is still busy.
        const INPUT_FULL = 1 << 1;
    }
}

/// Handle on the PS/2 controller's I/O ports.
pub struct Ps2Controller {
    data: Port<u8>,
    status: PortReadOnly<u8>,
}

impl Ps2Controller {
    /// Creates the port handle.
    pub const fn new() -> Self {
        Ps2Controller {
            data: Port::new(DATA_PORT),
            status: PortReadOnly::new(STATUS_COMMAND_PORT),
        }
    }
}

impl Default for Ps2Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardPort for Ps2Controller {
    fn scancode_ready(&mut self) -> bool {
        // SAFETY: reading the status register has no side effects on the
        // controller state and 0x64 is always present on PC hardware.
        let raw = unsafe { self.status.read() };
        KbcStatus::from_bits_truncate(raw).contains(KbcStatus::OUTPUT_FULL)
    }

    fn read_scancode(&mut self) -> u8 {
        debug_assert!(
            self.scancode_ready(),
            "scancode read without a ready status observation"
        );
        // SAFETY: the trait contract guarantees the output buffer is full,
        // which is the one state in which reading 0x60 is defined.
        unsafe { self.data.read() }
    }
}

/// Requests a system reset by writing the reset command to the controller.
///
/// Fire-and-forget: the controller sends no acknowledgement and the reset
/// lands whenever the hardware gets around to it, so callers should park
/// the CPU afterwards.
pub fn request_cpu_reset() {
    let mut status: PortReadOnly<u8> = PortReadOnly::new(STATUS_COMMAND_PORT);
    let mut command: PortWriteOnly<u8> = PortWriteOnly::new(STATUS_COMMAND_PORT);

    // Give the controller a bounded chance to drain its input buffer so
    // the command byte is not lost behind an in-flight one.
    for _ in 0..1000 {
        // SAFETY: status reads are side-effect free; see scancode_ready.
        let raw = unsafe { status.read() };
        if !KbcStatus::from_bits_truncate(raw).contains(KbcStatus::INPUT_FULL) {
            break;
        }
        core::hint::spin_loop();
    }

    // SAFETY: writing a controller command to 0x64 is the architected
    // reset request; no further port traffic follows.
    unsafe { command.write(CMD_RESET_CPU) };
}

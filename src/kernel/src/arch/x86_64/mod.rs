//! x86_64 architecture support.
//!
//! VGA text output, the polled PS/2 keyboard controller, and serial port
//! communication.

pub mod ps2;
pub mod serial;
pub mod vga;

pub use vga::{Color, Vga};

use kestrel_hal::Delay;

/// Halts the CPU until the next interrupt.
///
/// With interrupts never enabled this sleeps for good, which is exactly
/// what the terminal paths (panic, post-reset-request) want.
#[inline]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Halts the CPU in an infinite loop.
pub fn halt_loop() -> ! {
    loop {
        hlt();
    }
}

/// Busy-wait idle strategy for the polling loop.
///
/// A bounded burst of `spin_loop` hints between polls keeps the loop from
/// hammering the keyboard port at full speed.
pub struct SpinDelay {
    spins: u32,
}

impl SpinDelay {
    /// Creates a delay of `spins` pause hints per idle call.
    pub const fn new(spins: u32) -> Self {
        SpinDelay { spins }
    }
}

impl Delay for SpinDelay {
    fn idle(&mut self) {
        for _ in 0..self.spins {
            core::hint::spin_loop();
        }
    }
}

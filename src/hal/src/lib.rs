//! KestrelOS hardware abstraction layer (HAL) traits.
//!
//! These traits mark the two hardware seams the console polls across: the
//! keyboard controller port and the idle pause between polls. The kernel
//! provides the real implementations; tests substitute scripted ones so the
//! polling and decode logic can run without hardware.

#![no_std]

/// A polled keyboard controller.
///
/// The protocol is strict: `read_scancode` may only be called after
/// `scancode_ready` has returned `true`, and each ready observation covers
/// exactly one read. Reading an idle controller is undefined at the
/// hardware level, so implementations are entitled to assume the caller
/// held up its end.
pub trait KeyboardPort {
    /// Returns `true` when a scancode is waiting in the output buffer.
    fn scancode_ready(&mut self) -> bool;

    /// Reads the pending scancode.
    ///
    /// Precondition: the most recent `scancode_ready` call returned `true`.
    fn read_scancode(&mut self) -> u8;
}

/// An idle strategy for busy-wait loops.
///
/// Injected into every polling helper so the pacing of a wait can be
/// swapped out, or counted in tests, without touching the poll logic.
pub trait Delay {
    /// Pauses briefly between polls.
    fn idle(&mut self);
}

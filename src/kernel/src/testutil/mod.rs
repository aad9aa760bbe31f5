//! Test infrastructure for bare-metal testing with QEMU.
//!
//! Test binaries in `tests/` opt into `custom_test_frameworks`, point the
//! runner at [`test_runner`], and route their panic handler through
//! [`test_panic_handler`]; results go over serial and QEMU exits through
//! the isa-debug-exit device.

use crate::serial_println;

/// QEMU exit codes for signaling test results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum QemuExitCode {
    /// All tests passed.
    Success = 0x10,
    /// One or more tests failed.
    Failed = 0x11,
}

/// Exits QEMU with the given code via the isa-debug-exit device.
///
/// QEMU must be started with `-device isa-debug-exit,iobase=0xf4,iosize=0x04`
/// (the bootimage `test-args` do this). The observed exit code is
/// `(value << 1) | 1`: `Success` becomes 33, `Failed` becomes 35.
pub fn exit_qemu(exit_code: QemuExitCode) {
    #[cfg(target_arch = "x86_64")]
    {
        use x86_64::instructions::port::Port;

        // SAFETY: writing the isa-debug-exit port is a QEMU exit request;
        // with the device configured there is nothing left to corrupt.
        unsafe {
            let mut port = Port::new(0xf4);
            port.write(exit_code as u32);
        }
    }
}

/// Trait for types that can be run as tests.
pub trait Testable {
    /// Runs the test and reports its result over serial.
    fn run(&self);
}

impl<T: Fn()> Testable for T {
    fn run(&self) {
        serial_println!("test {} ... ", core::any::type_name::<T>());
        self();
        serial_println!("[ok]");
    }
}

/// Custom test runner: runs every test, then exits QEMU with success.
pub fn test_runner(tests: &[&dyn Testable]) {
    serial_println!("Running {} tests", tests.len());
    for test in tests {
        test.run();
    }
    exit_qemu(QemuExitCode::Success);
}

/// Panic handler for test binaries: report the failure, exit QEMU.
pub fn test_panic_handler(info: &core::panic::PanicInfo) -> ! {
    serial_println!("[failed]");
    serial_println!("Error: {}", info);
    exit_qemu(QemuExitCode::Failed);
    crate::arch::x86_64::halt_loop()
}

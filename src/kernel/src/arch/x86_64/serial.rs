//! Serial port output for x86_64.
//!
//! COM1 (0x3F8) carries the structured log stream and panic reports so
//! they survive off-screen; the VGA console stays reserved for the user.

use core::fmt::{self, Write};
use spin::Mutex;
use uart_16550::SerialPort;

/// COM1 I/O port address.
const COM1_PORT: u16 = 0x3F8;

/// Global serial port instance, lazily initialized.
///
/// The spinlock keeps concurrent writers (main path vs. panic path) from
/// interleaving bytes.
pub static SERIAL: spin::Once<Mutex<SerialPort>> = spin::Once::new();

/// Initializes the global serial port. Idempotent.
pub fn init() {
    SERIAL.call_once(|| {
        // SAFETY: 0x3F8 is the standard COM1 address on x86 and the kernel
        // has full I/O port access; uart_16550 runs the init sequence.
        let mut serial = unsafe { SerialPort::new(COM1_PORT) };
        serial.init();
        Mutex::new(serial)
    });
}

/// Returns the serial port, initializing it on first use.
fn serial() -> &'static Mutex<SerialPort> {
    init();
    SERIAL.get().expect("serial port not initialized")
}

/// Prints to the serial port without a newline.
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        $crate::arch::x86_64::serial::_print(format_args!($($arg)*))
    };
}

/// Prints to the serial port with a newline.
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($($arg:tt)*) => ($crate::serial_print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    serial().lock().write_fmt(args).expect("serial write failed");
}

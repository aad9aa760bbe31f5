#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(kestrel_kernel::testutil::test_runner)]
#![reexport_test_harness_main = "test_main"]

use core::panic::PanicInfo;
use kestrel_kernel::arch::x86_64::vga::Vga;
use kestrel_kernel::serial_println;
use kestrel_kernel::testutil::{exit_qemu, QemuExitCode};

#[no_mangle]
pub extern "C" fn _start() -> ! {
    kestrel_kernel::init();
    test_main();
    exit_qemu(QemuExitCode::Success);
    loop {}
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    kestrel_kernel::testutil::test_panic_handler(info)
}

#[test_case]
fn vga_write_does_not_fault() {
    let mut con = Vga::new();
    con.clear();
    con.put_str("console output right after boot\n");
}

#[test_case]
fn serial_write_does_not_fault() {
    serial_println!("serial output right after boot");
}

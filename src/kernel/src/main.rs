//! KestrelOS Kernel Entry Point
//!
//! Bring-up and the console loop: clear the screen, print the banner and
//! boot status, then poll the keyboard forever, feeding decoded keys
//! through the line editor and dispatching submitted commands.

#![no_std]
#![no_main]

use bootloader::{entry_point, BootInfo};
use core::fmt::Write;
use core::panic::PanicInfo;
use kestrel_hal::Delay;
use kestrel_kernel::arch::x86_64::{self, ps2::Ps2Controller, SpinDelay};
use kestrel_kernel::arch::x86_64::vga::{self, Color, Vga};
use kestrel_kernel::boot::{self, Status};
use kestrel_kernel::serial_println;
use kestrel_kernel::terminal::{self, Command, ScancodeDecoder, Shell};

entry_point!(kernel_main);

/// Loop iterations between heartbeat repaints.
const HEARTBEAT_INTERVAL: u64 = 50_000;

/// Poll attempts for the bring-up keyboard liveness probe.
const PROBE_ATTEMPTS: usize = 1_000;

/// Pause hints per idle call in the polling loop.
const IDLE_SPINS: u32 = 64;

/// Kernel entry point.
///
/// Called by the bootloader after setting up the initial environment.
/// There is no way back out; the loop runs until a reset request lands.
fn kernel_main(_boot_info: &'static BootInfo) -> ! {
    // ========================================================================
    // Phase 1: Core services and self-checks
    // ========================================================================
    kestrel_kernel::init();

    let mut con = Vga::new();
    let mut keyboard = Ps2Controller::new();
    let mut delay = SpinDelay::new(IDLE_SPINS);

    // Self-checks scribble on the pre-boot screen; it is cleared next.
    kestrel_kernel::tests::run_all(&mut con);

    // ========================================================================
    // Phase 2: Console bring-up
    // ========================================================================
    con.clear();
    boot::banner::print_banner(&mut con);

    boot::log(&mut con, Status::Ok, "Serial port initialized");
    boot::log(&mut con, Status::Ok, "VGA text console ready");
    boot::log(&mut con, Status::Ok, "Console self-checks passed");

    // Advisory liveness probe: report whether the controller already has a
    // byte queued (usually a leftover from the firmware keyboard test).
    match terminal::probe_scancode(&mut keyboard, &mut delay, PROBE_ATTEMPTS) {
        Some(code) => {
            boot::log(&mut con, Status::Info, "Keyboard controller has pending input");
            boot::log_detail(&mut con, "pre-boot scancode discarded");
            log::debug!("discarded pre-boot scancode {:#04x}", code);
        }
        None => boot::log(&mut con, Status::Ok, "Keyboard controller idle"),
    }
    log::info!("console bring-up complete");

    con.set_color(Color::LightCyan, Color::Black);
    con.put_str("\nType 'help' for available commands.\n\n");
    con.set_color(Color::White, Color::Black);

    // ========================================================================
    // Phase 3: The console loop
    // ========================================================================
    let mut decoder = ScancodeDecoder::new();
    let mut shell = Shell::new();
    shell.prompt(&mut con);

    let mut ticks: u64 = 0;
    loop {
        ticks += 1;
        if ticks % HEARTBEAT_INTERVAL == 0 {
            draw_heartbeat(&mut con, ticks / HEARTBEAT_INTERVAL);
        }

        if let Some(code) = terminal::poll_scancode(&mut keyboard) {
            let event = decoder.decode(code);
            if let Some(line) = shell.handle_key(event, &mut con) {
                if let Some(command) = Command::parse(&line) {
                    command.execute(&mut con, shell.history());
                }
                shell.prompt(&mut con);
            }
        }

        delay.idle();
    }
}

/// Repaints the loop counter in the top-right corner, then restores the
/// cursor and attribute so the console never notices.
fn draw_heartbeat(con: &mut Vga, beats: u64) {
    let (column, row) = con.cursor();
    let attribute = con.attribute();

    con.set_cursor(vga::BUFFER_WIDTH - 15, 0);
    con.set_color(Color::LightRed, Color::Black);
    con.put_str("tick:");
    con.put_uint(beats);

    con.set_attribute(attribute);
    con.set_cursor(column, row);
}

/// Panic handler.
///
/// Reports over serial first, then claims a fresh writer for the screen;
/// the console's own writer is out of reach here and its cursor state is
/// forfeit anyway.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    serial_println!("KERNEL PANIC: {}", info);

    let mut con = Vga::new();
    con.set_color(Color::LightRed, Color::Black);
    con.put_str("\n\n!!! KERNEL PANIC !!!\n");
    con.set_color(Color::White, Color::Black);
    let _ = writeln!(con, "{}", info);

    x86_64::halt_loop()
}

//! Boot banner and branding.

use crate::arch::x86_64::vga::{Color, Vga};

/// Print the KestrelOS boot banner and the first-use hint.
pub fn print_banner(con: &mut Vga) {
    con.set_color(Color::Cyan, Color::Black);
    con.put_str(" _  __        _            _  ___  ____  \n");
    con.put_str("| |/ /___ ___| |_ _ __ ___| |/ _ \\/ ___| \n");
    con.put_str("| ' // _ \\ __| __| '__/ _ \\ | | | \\___ \\ \n");
    con.put_str("| . \\  __\\__ \\ |_| | |  __/ | |_| |___) |\n");
    con.put_str("|_|\\_\\___|___/\\__|_|  \\___|_|\\___/|____/ \n");
    con.put_char(b'\n');
    con.set_color(Color::White, Color::Black);
    con.put_str(" KestrelOS v0.1.0\n");
    con.put_char(b'\n');
}

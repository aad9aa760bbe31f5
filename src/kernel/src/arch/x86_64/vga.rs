//! VGA text mode display driver.
//!
//! Owns the 80x25 character grid at 0xB8000, tracking the cursor and the
//! active color attribute. Output that runs past the bottom row scrolls the
//! surface up by one row; the cursor never leaves the grid.

use core::fmt;
use core::ptr;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// Number of rows in VGA text mode.
pub const BUFFER_HEIGHT: usize = 25;

/// Number of columns in VGA text mode.
pub const BUFFER_WIDTH: usize = 80;

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

/// Packed foreground/background attribute byte.
///
/// Low nibble is the foreground, high nibble the background. Opaque so the
/// pairing cannot be built from a stray byte; obtained from [`Vga::attribute`]
/// or built by the driver itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Packs a foreground and background color into one attribute byte.
    const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }
}

/// A single character cell: character code plus attribute byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
struct ScreenChar {
    ascii_character: u8,
    color_code: ColorCode,
}

/// The VGA text buffer layout.
#[repr(transparent)]
struct Buffer {
    chars: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

/// VGA text mode writer.
///
/// A single `Vga` value is created at bring-up and passed by exclusive
/// reference to everything that writes to the screen, which keeps the
/// single-writer discipline visible in the signatures instead of hidden
/// behind module state.
///
/// Invariant: the cursor always satisfies `column < BUFFER_WIDTH` and
/// `row < BUFFER_HEIGHT` between calls.
pub struct Vga {
    /// Current column position (0 to BUFFER_WIDTH-1).
    column: usize,
    /// Current row position (0 to BUFFER_HEIGHT-1).
    row: usize,
    /// Attribute applied to subsequently written cells.
    color_code: ColorCode,
    /// Pointer to the VGA buffer.
    ///
    /// SAFETY: the VGA buffer at 0xB8000 is always mapped in x86 protected
    /// mode and stays valid for the lifetime of the kernel.
    buffer: *mut Buffer,
}

// SAFETY: Vga only touches the buffer through volatile operations on
// memory-mapped hardware that exists for the kernel's lifetime, and the
// value itself is handed around by exclusive reference.
unsafe impl Send for Vga {}

impl Vga {
    /// Creates a writer over the VGA text buffer.
    ///
    /// The console owns exactly one of these; the panic path builds its own
    /// short-lived second writer, which is sound (all cell access is
    /// volatile) but forfeits the cursor state of the first.
    pub fn new() -> Self {
        Vga {
            column: 0,
            row: 0,
            color_code: ColorCode::new(Color::White, Color::Black),
            // SAFETY: 0xB8000 is the standard VGA text buffer address on
            // x86 hardware and in QEMU; the mapping is always present.
            buffer: VGA_BUFFER_ADDR as *mut Buffer,
        }
    }

    /// Sets the foreground and background colors for subsequent writes.
    ///
    /// Already-written cells keep the attribute they were written with.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.color_code = ColorCode::new(foreground, background);
    }

    /// Returns the active attribute, for save/restore around out-of-band
    /// paints like the heartbeat counter.
    pub fn attribute(&self) -> ColorCode {
        self.color_code
    }

    /// Restores a previously saved attribute.
    pub fn set_attribute(&mut self, code: ColorCode) {
        self.color_code = code;
    }

    /// Returns the cursor position as `(column, row)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    /// Moves the cursor. Out-of-range coordinates are clamped to the grid.
    pub fn set_cursor(&mut self, column: usize, row: usize) {
        self.column = column.min(BUFFER_WIDTH - 1);
        self.row = row.min(BUFFER_HEIGHT - 1);
    }

    /// Reads back the character code stored at a cell.
    ///
    /// Diagnostic surface for the QEMU-hosted tests; the console itself
    /// never inspects what it has drawn.
    pub fn char_at(&self, column: usize, row: usize) -> u8 {
        debug_assert!(column < BUFFER_WIDTH && row < BUFFER_HEIGHT);
        // SAFETY: indices are within the fixed grid; volatile read because
        // the buffer is memory-mapped I/O.
        unsafe { ptr::read_volatile(&(*self.buffer).chars[row][column]).ascii_character }
    }

    /// Fills the whole surface with spaces and homes the cursor.
    pub fn clear(&mut self) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row);
        }
        self.column = 0;
        self.row = 0;
    }

    /// Writes a single byte at the cursor.
    ///
    /// `\n` starts a new row. `\b` moves the cursor one cell left without
    /// blanking anything (the visible erase is the line editor's three-step
    /// sequence, not the driver's). Anything else is stored under the
    /// active attribute and the cursor advances, wrapping to a fresh row
    /// after the last column so it never rests outside the grid.
    pub fn put_char(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            b'\x08' => {
                if self.column > 0 {
                    self.column -= 1;
                }
            }
            byte => {
                self.write_cell(self.column, self.row, byte);
                self.column += 1;
                if self.column >= BUFFER_WIDTH {
                    self.new_line();
                }
            }
        }
    }

    /// Writes each byte of `s` via [`Vga::put_char`]. No trailing newline.
    pub fn put_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.put_char(byte);
        }
    }

    /// Renders `n` in decimal with no leading zeros; `0` prints as `"0"`.
    pub fn put_uint(&mut self, mut n: u64) {
        if n == 0 {
            self.put_char(b'0');
            return;
        }
        // 20 bytes cover u64::MAX; digits come out least significant first.
        let mut digits = [0u8; 20];
        let mut used = 0;
        while n > 0 {
            digits[used] = b'0' + (n % 10) as u8;
            n /= 10;
            used += 1;
        }
        while used > 0 {
            used -= 1;
            self.put_char(digits[used]);
        }
    }

    /// Renders `n` in decimal, with a leading `-` for negative values.
    pub fn put_int(&mut self, n: i64) {
        if n < 0 {
            self.put_char(b'-');
        }
        self.put_uint(n.unsigned_abs());
    }

    /// Stores one cell under the active attribute.
    fn write_cell(&mut self, column: usize, row: usize, byte: u8) {
        debug_assert!(column < BUFFER_WIDTH && row < BUFFER_HEIGHT);
        // SAFETY: indices are within the fixed grid (cursor invariant plus
        // the debug assertion); volatile write because the buffer is
        // memory-mapped I/O the hardware reads asynchronously.
        unsafe {
            ptr::write_volatile(
                &mut (*self.buffer).chars[row][column],
                ScreenChar {
                    ascii_character: byte,
                    color_code: self.color_code,
                },
            );
        }
    }

    /// Advances to the next row, scrolling the surface once the cursor
    /// would leave the bottom.
    fn new_line(&mut self) {
        self.column = 0;
        if self.row + 1 < BUFFER_HEIGHT {
            self.row += 1;
            return;
        }
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                // SAFETY: row is in [1, BUFFER_HEIGHT), so row-1 is also in
                // range; volatile because this is memory-mapped I/O.
                unsafe {
                    let cell = ptr::read_volatile(&(*self.buffer).chars[row][col]);
                    ptr::write_volatile(&mut (*self.buffer).chars[row - 1][col], cell);
                }
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1);
    }

    /// Blanks a single row under the active attribute.
    fn clear_row(&mut self, row: usize) {
        debug_assert!(row < BUFFER_HEIGHT, "row index out of bounds");
        let blank = ScreenChar {
            ascii_character: b' ',
            color_code: self.color_code,
        };
        for col in 0..BUFFER_WIDTH {
            // SAFETY: row is asserted in range, col stays below
            // BUFFER_WIDTH; volatile write to memory-mapped I/O.
            unsafe {
                ptr::write_volatile(&mut (*self.buffer).chars[row][col], blank);
            }
        }
    }
}

impl Default for Vga {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for Vga {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            match byte {
                // Printable ASCII or newline
                0x20..=0x7e | b'\n' => self.put_char(byte),
                // Non-printable: show placeholder
                _ => self.put_char(0xfe),
            }
        }
        Ok(())
    }
}

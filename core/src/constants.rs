/// Size of the flat address space in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Where loaded programs begin and where the program counter starts.
pub const PROGRAM_START: u16 = 0x200;

/// Base address of the built-in glyph bitmaps.
pub const GLYPH_BASE: u16 = 0x050;

/// Bytes per glyph; each glyph is a 4x5 bitmap, one row per byte.
pub const GLYPH_SIZE: u16 = 5;

/// Maximum call depth.
pub const STACK_DEPTH: usize = 16;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Horizontal display resolution in pixels.
pub const DISPLAY_WIDTH: usize = 64;

/// Vertical display resolution in pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// Bitmaps for the glyphs 0..F, copied into memory at `GLYPH_BASE` during
/// construction and immutable afterwards. Each row is one byte with the 4
/// pixel columns in the high nibble.
pub const GLYPH_SPRITES: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

//! # Character Display HAL
//!
//! Hardware abstraction for HD44780-style character LCDs.
//!
//! ## Philosophy
//!
//! The display is a capability, not a renderer. Callers position the cursor and
//! write bytes; the controller owns its font table and DDRAM.
//!
//! ## Design Principles
//!
//! 1. **Minimal**: Clear, mode, cursor, bytes, raw command
//! 2. **Testable**: `BufferedDisplay` mirrors the visible cells in memory
//! 3. **Deterministic**: Same call sequence → same cells

use crate::glyph;

/// Visible columns
pub const LCD_WIDTH: usize = 16;
/// Visible rows
pub const LCD_HEIGHT: usize = 2;

/// HD44780 "clear display" instruction
pub const CMD_CLEAR: u8 = 0x01;
/// HD44780 "display on/off control" instruction base
pub const CMD_DISPLAY_CONTROL: u8 = 0x08;
const DISPLAY_ON: u8 = 0x04;
const CURSOR_ON: u8 = 0x02;
const BLINK_ON: u8 = 0x01;

/// Display control state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayMode {
    pub cursor_visible: bool,
    pub blink: bool,
}

impl DisplayMode {
    /// Cursor shown, not blinking (editing screens)
    pub const EDITING: Self = Self {
        cursor_visible: true,
        blink: false,
    };

    /// Cursor hidden (read-only screens)
    pub const VIEWING: Self = Self {
        cursor_visible: false,
        blink: false,
    };

    /// Encodes the mode as a display-control instruction (display always on)
    pub const fn command_byte(self) -> u8 {
        let mut cmd = CMD_DISPLAY_CONTROL | DISPLAY_ON;
        if self.cursor_visible {
            cmd |= CURSOR_ON;
        }
        if self.blink {
            cmd |= BLINK_ON;
        }
        cmd
    }

    /// Decodes a display-control instruction
    pub const fn from_command(cmd: u8) -> Option<Self> {
        if cmd & 0xF8 != CMD_DISPLAY_CONTROL {
            return None;
        }
        Some(Self {
            cursor_visible: cmd & CURSOR_ON != 0,
            blink: cmd & BLINK_ON != 0,
        })
    }
}

/// Character display trait
///
/// Coordinates are `(col, row)` with the origin at the top-left cell.
pub trait CharDisplay {
    /// Clears all cells and homes the cursor
    fn clear(&mut self);

    /// Sends a raw controller instruction
    fn write_command(&mut self, raw: u8);

    /// Moves the write position
    fn move_cursor(&mut self, col: usize, row: usize);

    /// Writes one byte at the write position and advances it
    fn write_char(&mut self, byte: u8);

    /// Sets cursor visibility and blinking
    fn set_mode(&mut self, mode: DisplayMode) {
        self.write_command(mode.command_byte());
    }

    /// Writes bytes starting at the write position
    fn write_string(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_char(byte);
        }
    }
}

/// In-memory display that keeps the visible cells
///
/// Writes beyond the visible width are dropped, as they land in DDRAM that the
/// panel never shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedDisplay {
    cells: [[u8; LCD_WIDTH]; LCD_HEIGHT],
    cursor: (usize, usize),
    mode: DisplayMode,
    writes: usize,
}

impl BufferedDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; LCD_WIDTH]; LCD_HEIGHT],
            cursor: (0, 0),
            mode: DisplayMode::default(),
            writes: 0,
        }
    }

    /// Raw bytes of a row
    pub fn row(&self, row: usize) -> &[u8] {
        self.cells.get(row).map(|r| &r[..]).unwrap_or(&[])
    }

    /// Cell at `(col, row)`
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Row as Unicode characters (glyphs mapped)
    pub fn row_chars(&self, row: usize) -> impl Iterator<Item = char> + '_ {
        self.row(row).iter().map(|&b| glyph::to_char(b))
    }

    /// Current write position `(col, row)`
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Number of bytes written since creation
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Default for BufferedDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl CharDisplay for BufferedDisplay {
    fn clear(&mut self) {
        self.cells = [[b' '; LCD_WIDTH]; LCD_HEIGHT];
        self.cursor = (0, 0);
    }

    fn write_command(&mut self, raw: u8) {
        if raw == CMD_CLEAR {
            self.clear();
        } else if let Some(mode) = DisplayMode::from_command(raw) {
            self.mode = mode;
        }
    }

    fn move_cursor(&mut self, col: usize, row: usize) {
        self.cursor = (col, row);
    }

    fn write_char(&mut self, byte: u8) {
        let (col, row) = self.cursor;
        if row < LCD_HEIGHT && col < LCD_WIDTH {
            self.cells[row][col] = byte;
        }
        self.cursor.0 = col.saturating_add(1);
        self.writes += 1;
    }
}

//! Bounded text field with cursor and scroll-window rendering

use core::ops::Range;

use alloc::string::String;
use hal::{glyph, CharDisplay};
use heapless::Vec;
use serde::{Deserialize, Serialize};

/// Where a field lives on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldGeometry {
    pub row: usize,
    pub col: usize,
    /// Visible cells
    pub width: usize,
}

impl FieldGeometry {
    pub const fn new(row: usize, col: usize, width: usize) -> Self {
        Self { row, col, width }
    }
}

/// Bounded, editable byte buffer with a cursor
///
/// Holds at most `N - 1` bytes. The cursor is always in `0..=len`.
/// Edits never touch the display; call [`Field::refresh`] afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<const N: usize> {
    geometry: FieldGeometry,
    buf: Vec<u8, N>,
    cursor: usize,
}

impl<const N: usize> Field<N> {
    pub const fn new(geometry: FieldGeometry) -> Self {
        Self {
            geometry,
            buf: Vec::new(),
            cursor: 0,
        }
    }

    pub fn geometry(&self) -> FieldGeometry {
        self.geometry
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Buffer size including the slot the firmware reserves for a terminator
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns true if `extra` more bytes fit
    pub fn has_room(&self, extra: usize) -> bool {
        self.buf.len() + extra < N
    }

    /// Inserts `byte` at the cursor and advances past it
    ///
    /// Returns false, leaving the field untouched, if it is full.
    pub fn insert_char(&mut self, byte: u8) -> bool {
        if !self.has_room(1) {
            return false;
        }
        if self.buf.insert(self.cursor, byte).is_err() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Inserts `name` followed by `(` as one edit
    ///
    /// Returns false, leaving the field untouched, if the whole unit does not
    /// fit.
    pub fn insert_token(&mut self, name: &[u8]) -> bool {
        if !self.has_room(name.len() + 1) {
            return false;
        }
        for &byte in name.iter().chain(core::iter::once(&glyph::OPEN_PAREN)) {
            if self.buf.insert(self.cursor, byte).is_err() {
                return false;
            }
            self.cursor += 1;
        }
        true
    }

    /// Removes the byte left of the cursor
    pub fn delete_before_cursor(&mut self) -> Option<u8> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.buf.remove(self.cursor))
    }

    /// Moves one byte left, wrapping to the end
    pub fn move_left(&mut self) {
        self.cursor = if self.cursor > 0 {
            self.cursor - 1
        } else {
            self.buf.len()
        };
    }

    /// Moves one byte right, wrapping to the start
    pub fn move_right(&mut self) {
        self.cursor = if self.cursor < self.buf.len() {
            self.cursor + 1
        } else {
            0
        };
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
    }

    /// Replaces the content and puts the cursor at the end
    ///
    /// Bytes past the capacity are dropped.
    pub fn set_text(&mut self, text: &[u8]) {
        self.buf.clear();
        for &byte in text.iter().take(N.saturating_sub(1)) {
            // Cannot fail: at most N - 1 bytes are pushed
            let _ = self.buf.push(byte);
        }
        self.cursor = self.buf.len();
    }

    /// Removes `span` and puts the cursor at its start
    pub(crate) fn remove_span(&mut self, span: Range<usize>) {
        let end = span.end.min(self.buf.len());
        let start = span.start.min(end);
        let count = end - start;
        if count == 0 {
            return;
        }
        let len = self.buf.len();
        self.buf.copy_within(end..len, start);
        self.buf.truncate(len - count);
        self.cursor = start;
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.buf.len());
    }

    /// Content with display glyphs mapped to Unicode
    pub fn to_display_string(&self) -> String {
        self.buf.iter().map(|&b| glyph::to_char(b)).collect()
    }

    /// Draws the visible window and places the display cursor
    ///
    /// While the cursor fits, the buffer is drawn left-aligned and padded.
    /// Otherwise the window scrolls so that the cursor sits in the last
    /// visible cell.
    pub fn refresh<D: CharDisplay + ?Sized>(&self, display: &mut D) {
        let FieldGeometry { row, col, width } = self.geometry;
        if width == 0 {
            return;
        }
        let last = width - 1;

        if self.cursor < last {
            display.move_cursor(col, row);
            let shown = self.buf.len().min(width);
            display.write_string(&self.buf[..shown]);
            for _ in shown..width {
                display.write_char(b' ');
            }
            display.move_cursor(col + self.cursor, row);
        } else {
            display.move_cursor(col + last, row);
            display.write_char(b' ');

            display.move_cursor(col, row);
            let start = self.cursor - last;
            let end = (self.cursor + 1).min(self.buf.len());
            if start < end {
                display.write_string(&self.buf[start..end]);
            }
            display.move_cursor(col + last, row);
        }
    }
}

//! Atomic editing units
//!
//! A function name is stored as plain lowercase letters followed by `(`, but
//! the cursor treats `sin(` as a single position. Every other byte is a unit
//! on its own. The free-variable symbol is never part of a name.

use core::ops::Range;

use hal::glyph::{self, is_name_byte};

/// Span `[start, end)` of the unit containing `index`
///
/// Returns an empty span at `index` if it is past the end.
pub fn unit_at(buf: &[u8], index: usize) -> Range<usize> {
    let Some(&byte) = buf.get(index) else {
        return index..index;
    };

    if byte == glyph::OPEN_PAREN {
        return name_start(buf, index)..index + 1;
    }

    if is_name_byte(byte) {
        let start = name_start(buf, index);
        let mut end = index;
        while end < buf.len() && is_name_byte(buf[end]) {
            end += 1;
        }
        if buf.get(end) == Some(&glyph::OPEN_PAREN) {
            end += 1;
        }
        return start..end;
    }

    index..index + 1
}

/// Cursor position one unit left of `cursor`
///
/// `cursor` must be greater than zero.
pub fn unit_before(buf: &[u8], cursor: usize) -> Range<usize> {
    let span = unit_at(buf, cursor - 1);
    span.start..cursor
}

fn name_start(buf: &[u8], mut index: usize) -> usize {
    while index > 0 && is_name_byte(buf[index - 1]) {
        index -= 1;
    }
    index
}

//! Expression field
//!
//! A [`Field`] that moves and deletes whole function names and counts the
//! free-variable symbols it holds.

use alloc::string::String;
use hal::{glyph, CharDisplay};

use crate::buffer::{Field, FieldGeometry};
use crate::snapshot::FieldSnapshot;
use crate::unit::{unit_at, unit_before};

/// Expression buffer size (255 usable bytes)
pub const EXPR_CAPACITY: usize = 256;

/// Expression field position: the whole top row
pub const EXPR_GEOMETRY: FieldGeometry = FieldGeometry::new(0, 0, 16);

/// Token-aware expression editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprField {
    field: Field<EXPR_CAPACITY>,
    variables: usize,
}

impl ExprField {
    pub const fn new() -> Self {
        Self {
            field: Field::new(EXPR_GEOMETRY),
            variables: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.field.as_bytes()
    }

    pub fn cursor(&self) -> usize {
        self.field.cursor()
    }

    pub fn len(&self) -> usize {
        self.field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    /// Free-variable symbols currently in the buffer
    pub fn variables(&self) -> usize {
        self.variables
    }

    pub fn insert_char(&mut self, byte: u8) -> bool {
        let inserted = self.field.insert_char(byte);
        if inserted && byte == glyph::VARIABLE {
            self.variables += 1;
        }
        inserted
    }

    /// Inserts `name(` as one unit
    pub fn insert_token(&mut self, name: &[u8]) -> bool {
        self.field.insert_token(name)
    }

    /// Removes the unit left of the cursor
    pub fn delete_before_cursor(&mut self) -> bool {
        let cursor = self.field.cursor();
        if cursor == 0 {
            return false;
        }
        let span = unit_before(self.field.as_bytes(), cursor);
        let removed = self.field.as_bytes()[span.clone()]
            .iter()
            .filter(|&&b| b == glyph::VARIABLE)
            .count();
        self.variables = self.variables.saturating_sub(removed);
        self.field.remove_span(span);
        true
    }

    /// Moves one unit left, wrapping to the end
    pub fn move_left(&mut self) {
        let cursor = self.field.cursor();
        let target = if cursor > 0 {
            unit_before(self.field.as_bytes(), cursor).start
        } else {
            self.field.len()
        };
        self.field.set_cursor(target);
    }

    /// Moves one unit right, wrapping to the start
    pub fn move_right(&mut self) {
        let cursor = self.field.cursor();
        let target = if cursor < self.field.len() {
            unit_at(self.field.as_bytes(), cursor).end
        } else {
            0
        };
        self.field.set_cursor(target);
    }

    pub fn clear(&mut self) {
        self.field.clear();
        self.variables = 0;
    }

    /// Replaces the content, recounting free-variable symbols
    pub fn set_text(&mut self, text: &[u8]) {
        self.field.set_text(text);
        self.variables = self
            .field
            .as_bytes()
            .iter()
            .filter(|&&b| b == glyph::VARIABLE)
            .count();
    }

    pub fn refresh<D: CharDisplay + ?Sized>(&self, display: &mut D) {
        self.field.refresh(display);
    }

    pub fn to_display_string(&self) -> String {
        self.field.to_display_string()
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::of(&self.field)
    }
}

impl Default for ExprField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal::BufferedDisplay;

    fn typed(text: &[u8]) -> ExprField {
        let mut field = ExprField::new();
        for &b in text {
            assert!(field.insert_char(b));
        }
        field
    }

    #[test]
    fn test_insert_then_delete_token_restores_state() {
        let mut field = typed(b"2*");
        field.move_left();
        let before = field.clone();

        assert!(field.insert_token(b"sin"));
        assert_eq!(field.as_bytes(), b"2sin(*");
        assert!(field.delete_before_cursor());
        assert_eq!(field, before);
    }

    #[test]
    fn test_moves_jump_over_names() {
        let mut field = typed(b"1+");
        field.insert_token(b"acos");
        field.insert_char(b'0');
        // "1+acos(0", cursor at 8
        field.move_left();
        assert_eq!(field.cursor(), 7);
        field.move_left();
        assert_eq!(field.cursor(), 2);
        field.move_left();
        assert_eq!(field.cursor(), 1);

        field.move_right();
        assert_eq!(field.cursor(), 2);
        field.move_right();
        assert_eq!(field.cursor(), 7);
    }

    #[test]
    fn test_moves_wrap() {
        let mut field = typed(b"12");
        field.move_right();
        assert_eq!(field.cursor(), 0);
        field.move_left();
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_left_then_right_is_identity() {
        let mut field = typed(b"123+4");
        field.move_left();
        field.move_left();
        let cursor = field.cursor();
        field.move_left();
        field.move_right();
        assert_eq!(field.cursor(), cursor);
    }

    #[test]
    fn test_variable_counting() {
        let mut field = typed(b"x+x");
        assert_eq!(field.variables(), 2);
        field.delete_before_cursor();
        assert_eq!(field.variables(), 1);
        field.delete_before_cursor();
        field.delete_before_cursor();
        assert_eq!(field.variables(), 0);
        assert!(field.is_empty());
        assert!(!field.delete_before_cursor());
    }

    #[test]
    fn test_variable_before_name_is_kept() {
        let mut field = typed(b"x");
        field.insert_token(b"sin");
        assert!(field.delete_before_cursor());
        assert_eq!(field.as_bytes(), b"x");
        assert_eq!(field.variables(), 1);
    }

    #[test]
    fn test_full_field_does_not_count_variable() {
        let mut field = ExprField::new();
        for _ in 0..EXPR_CAPACITY - 1 {
            assert!(field.insert_char(b'1'));
        }
        assert!(!field.insert_char(glyph::VARIABLE));
        assert_eq!(field.variables(), 0);
        assert_eq!(field.len(), EXPR_CAPACITY - 1);
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut field = typed(b"2x");
        field.clear();
        assert_eq!(field.variables(), 0);
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn test_set_text_recounts() {
        let mut field = ExprField::new();
        field.set_text(b"x^2+x");
        assert_eq!(field.variables(), 2);
        assert_eq!(field.cursor(), 5);
    }

    #[test]
    fn test_refresh_uses_top_row() {
        let mut display = BufferedDisplay::new();
        let field = typed(b"1+2");
        field.refresh(&mut display);
        let row: String = display.row_chars(0).collect();
        assert_eq!(row.trim_end(), "1+2");
        assert_eq!(display.cursor(), (3, 0));
    }
}

//! Per-mode key layouts
//!
//! Keys are matched by physical position `(col, row)` and shift state. The
//! same key means different things in different modes.

use hal::glyph;
use input_types::KeyCode;

/// Big table step
pub const TABLE_BIG_STEP: i32 = 10;

/// Expression field edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Insert(u8),
    /// Function name, inserted together with its `(`
    InsertFunction(&'static [u8]),
    Clear,
    Delete,
    Left,
    Right,
}

/// Number field edits: digits, the decimal point and motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberEdit {
    Insert(u8),
    Clear,
    Delete,
    Left,
    Right,
}

impl From<NumberEdit> for EditAction {
    fn from(edit: NumberEdit) -> Self {
        match edit {
            NumberEdit::Insert(byte) => EditAction::Insert(byte),
            NumberEdit::Clear => EditAction::Clear,
            NumberEdit::Delete => EditAction::Delete,
            NumberEdit::Left => EditAction::Left,
            NumberEdit::Right => EditAction::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Edit(EditAction),
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    Edit(NumberEdit),
    Confirm,
    Escape,
    Minus,
    SelectStart,
    SelectStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    Exit,
    /// Move the offset by this many steps
    Move(i32),
    Reset,
}

/// Digit on an unshifted key, if any
fn digit(col: u8, row: u8) -> Option<u8> {
    let digit = match (col, row) {
        (0, 0) => b'1',
        (1, 0) => b'2',
        (2, 0) => b'3',
        (0, 1) => b'4',
        (1, 1) => b'5',
        (2, 1) => b'6',
        (0, 2) => b'7',
        (1, 2) => b'8',
        (2, 2) => b'9',
        (1, 3) => b'0',
        _ => return None,
    };
    Some(digit)
}

/// Edits available on every editable field
fn number_edit(key: KeyCode) -> Option<NumberEdit> {
    let (col, row) = (key.col(), key.row());
    if key.is_shifted() {
        return match (col, row) {
            (0, 1) => Some(NumberEdit::Left),
            (2, 1) => Some(NumberEdit::Right),
            _ => None,
        };
    }
    match (col, row) {
        (3, 0) => Some(NumberEdit::Clear),
        (3, 1) => Some(NumberEdit::Delete),
        (3, 2) => Some(NumberEdit::Insert(glyph::DECIMAL_POINT)),
        _ => digit(col, row).map(NumberEdit::Insert),
    }
}

pub fn input_action(key: KeyCode) -> Option<InputAction> {
    let (col, row) = (key.col(), key.row());
    if !key.is_shifted() {
        return match (col, row) {
            (3, 3) => Some(InputAction::Confirm),
            (0, 3) => Some(InputAction::Edit(EditAction::Insert(glyph::OPEN_PAREN))),
            (2, 3) => Some(InputAction::Edit(EditAction::Insert(glyph::CLOSE_PAREN))),
            _ => number_edit(key).map(|edit| InputAction::Edit(edit.into())),
        };
    }

    let edit = match (col, row) {
        (0, 0) => EditAction::InsertFunction(b"sin"),
        (1, 0) => EditAction::InsertFunction(b"cos"),
        (2, 0) => EditAction::InsertFunction(b"tan"),
        (0, 3) => EditAction::InsertFunction(b"asin"),
        (1, 3) => EditAction::InsertFunction(b"acos"),
        (2, 3) => EditAction::InsertFunction(b"atan"),
        (2, 2) => EditAction::InsertFunction(b"log"),
        (0, 2) => EditAction::Insert(glyph::VARIABLE),
        (1, 1) => EditAction::Insert(glyph::PI),
        (1, 2) => EditAction::Insert(glyph::POW),
        (3, 0) => EditAction::Insert(glyph::ADD),
        (3, 1) => EditAction::Insert(glyph::SUB),
        (3, 2) => EditAction::Insert(glyph::MUL),
        (3, 3) => EditAction::Insert(glyph::DIV),
        _ => return number_edit(key).map(|edit| InputAction::Edit(edit.into())),
    };
    Some(InputAction::Edit(edit))
}

pub fn settings_action(key: KeyCode) -> Option<SettingsAction> {
    if let Some(edit) = number_edit(key) {
        return Some(SettingsAction::Edit(edit));
    }
    match (key.col(), key.row(), key.is_shifted()) {
        (3, 3, false) => Some(SettingsAction::Confirm),
        (0, 0, true) => Some(SettingsAction::Escape),
        (3, 1, true) => Some(SettingsAction::Minus),
        (1, 0, true) => Some(SettingsAction::SelectStart),
        (1, 2, true) => Some(SettingsAction::SelectStep),
        _ => None,
    }
}

/// Table keys ignore shift
pub fn table_action(key: KeyCode) -> Option<TableAction> {
    let key = key.unshifted();
    match (key.col(), key.row()) {
        (0, 0) => Some(TableAction::Exit),
        (0, 1) => Some(TableAction::Move(-TABLE_BIG_STEP)),
        (1, 0) => Some(TableAction::Move(-1)),
        (1, 1) => Some(TableAction::Reset),
        (1, 2) => Some(TableAction::Move(1)),
        (2, 1) => Some(TableAction::Move(TABLE_BIG_STEP)),
        _ => None,
    }
}

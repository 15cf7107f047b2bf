//! Character codes shared by the editor, the compiler and the display
//!
//! The two non-ASCII glyphs come from the HD44780 character ROM (A00 table).
//! Everything else is plain ASCII.

/// Free variable used for tabulation
pub const VARIABLE: u8 = b'x';
/// Decimal point
pub const DECIMAL_POINT: u8 = b'.';
/// Opening parenthesis
pub const OPEN_PAREN: u8 = b'(';
/// Closing parenthesis
pub const CLOSE_PAREN: u8 = b')';
/// The constant pi (ROM glyph 0b1111_0111)
pub const PI: u8 = 0xF7;
/// Addition
pub const ADD: u8 = b'+';
/// Subtraction and negation
pub const SUB: u8 = b'-';
/// Multiplication
pub const MUL: u8 = b'*';
/// Division sign (ROM glyph 0b1111_1101)
pub const DIV: u8 = 0xFD;
/// Exponentiation
pub const POW: u8 = b'^';

/// Returns true if `byte` can be part of a function name
///
/// Names are lowercase ASCII; the variable symbol is excluded.
pub fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_lowercase() && byte != VARIABLE
}

/// Maps a display byte to the closest Unicode character
pub fn to_char(byte: u8) -> char {
    match byte {
        PI => 'π',
        DIV => '÷',
        0x20..=0x7E => byte as char,
        _ => '?',
    }
}

/// Maps a Unicode character to the display byte that renders it
pub fn from_char(ch: char) -> Option<u8> {
    match ch {
        'π' => Some(PI),
        '÷' | '/' => Some(DIV),
        ' '..='~' => Some(ch as u8),
        _ => None,
    }
}

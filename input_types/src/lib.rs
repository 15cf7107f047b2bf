#![no_std]

//! # Input Types
//!
//! Logical key codes produced by the 4x4 keypad matrix.
//!
//! ## Philosophy
//!
//! - **Codes, not meanings**: A key code names a physical matrix position plus
//!   the shift line. What the key *does* is decided by whichever mode is active.
//! - **Dense**: 16 physical keys × {unshifted, shifted} = 32 codes in `0..32`.
//! - **Testable**: Codes are serializable and can be injected for testing.
//!
//! ## Numbering
//!
//! A physical key is named by `(col, row)`, both in `0..4`. Its unshifted index
//! is `(3 - row) * 4 + (3 - col)`, so key `(3, 3)` is index 0 and key `(0, 0)`
//! is index 15. Shifted codes add 16.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of matrix rows (driven lines)
pub const MATRIX_ROWS: u8 = 4;
/// Number of matrix columns (sensed lines)
pub const MATRIX_COLS: u8 = 4;
/// Number of physical keys
pub const PHYSICAL_KEYS: u8 = MATRIX_ROWS * MATRIX_COLS;
/// Number of logical key codes (physical keys × shift state)
pub const LOGICAL_KEYS: u8 = PHYSICAL_KEYS * 2;

const SHIFT_BIT: u8 = 1 << 4;

/// Logical key code
///
/// Always in `0..LOGICAL_KEYS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct KeyCode(u8);

impl KeyCode {
    /// Creates the code for physical key `(col, row)` with the given shift state
    ///
    /// `col` and `row` are reduced modulo the matrix size.
    pub const fn new(col: u8, row: u8, shift: bool) -> Self {
        let col = col % MATRIX_COLS;
        let row = row % MATRIX_ROWS;
        let index = (MATRIX_ROWS - 1 - row) * MATRIX_COLS + (MATRIX_COLS - 1 - col);
        if shift {
            Self(index | SHIFT_BIT)
        } else {
            Self(index)
        }
    }

    /// Unshifted code for `(col, row)`
    pub const fn plain(col: u8, row: u8) -> Self {
        Self::new(col, row, false)
    }

    /// Shifted code for `(col, row)`
    pub const fn shifted(col: u8, row: u8) -> Self {
        Self::new(col, row, true)
    }

    /// Creates a code from its dense index
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < LOGICAL_KEYS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Creates a code from a scanner resolution
    ///
    /// `line` is the driven matrix line and `bit` the sensed column bit;
    /// the scanner numbers keys `4 * line + bit`.
    pub const fn from_matrix(line: u8, bit: u8, shift: bool) -> Self {
        let index = (line % MATRIX_ROWS) * MATRIX_COLS + (bit % MATRIX_COLS);
        if shift {
            Self(index | SHIFT_BIT)
        } else {
            Self(index)
        }
    }

    /// Returns the dense index
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the physical column
    pub const fn col(self) -> u8 {
        MATRIX_COLS - 1 - (self.0 & !SHIFT_BIT) % MATRIX_COLS
    }

    /// Returns the physical row
    pub const fn row(self) -> u8 {
        MATRIX_ROWS - 1 - (self.0 & !SHIFT_BIT) / MATRIX_COLS
    }

    /// Returns true if the shift line was asserted
    pub const fn is_shifted(self) -> bool {
        self.0 & SHIFT_BIT != 0
    }

    /// Returns the same physical key without shift
    pub const fn unshifted(self) -> Self {
        Self(self.0 & !SHIFT_BIT)
    }

    /// Iterates all 32 codes in index order
    pub fn all() -> impl Iterator<Item = KeyCode> {
        (0..LOGICAL_KEYS).map(KeyCode)
    }
}

/// Error for out-of-range key indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKeyIndex(pub u8);

impl fmt::Display for InvalidKeyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key index {} out of range", self.0)
    }
}

impl TryFrom<u8> for KeyCode {
    type Error = InvalidKeyIndex;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(InvalidKeyIndex(index))
    }
}

impl From<KeyCode> for u8 {
    fn from(code: KeyCode) -> u8 {
        code.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.is_shifted() { 'S' } else { 'K' };
        write!(f, "{}{}{}", prefix, self.col(), self.row())
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn test_corner_indices() {
        assert_eq!(KeyCode::plain(3, 3).index(), 0);
        assert_eq!(KeyCode::plain(0, 3).index(), 3);
        assert_eq!(KeyCode::plain(3, 0).index(), 12);
        assert_eq!(KeyCode::plain(0, 0).index(), 15);
        assert_eq!(KeyCode::shifted(3, 3).index(), 16);
        assert_eq!(KeyCode::shifted(0, 0).index(), 31);
    }

    #[test]
    fn test_col_row_roundtrip() {
        for row in 0..MATRIX_ROWS {
            for col in 0..MATRIX_COLS {
                for shift in [false, true] {
                    let code = KeyCode::new(col, row, shift);
                    assert_eq!(code.col(), col);
                    assert_eq!(code.row(), row);
                    assert_eq!(code.is_shifted(), shift);
                }
            }
        }
    }

    #[test]
    fn test_from_matrix_matches_layout() {
        // line 0, bit 0 is the first scanned position: key (3, 3)
        assert_eq!(KeyCode::from_matrix(0, 0, false), KeyCode::plain(3, 3));
        // line 3, bit 3 is key (0, 0)
        assert_eq!(KeyCode::from_matrix(3, 3, false), KeyCode::plain(0, 0));
        assert_eq!(KeyCode::from_matrix(2, 1, true), KeyCode::shifted(2, 1));
    }

    #[test]
    fn test_unshifted() {
        let code = KeyCode::shifted(1, 2);
        assert!(code.is_shifted());
        assert_eq!(code.unshifted(), KeyCode::plain(1, 2));
        assert_eq!(KeyCode::plain(1, 2).unshifted(), KeyCode::plain(1, 2));
    }

    #[test]
    fn test_from_index_bounds() {
        assert!(KeyCode::from_index(31).is_some());
        assert!(KeyCode::from_index(32).is_none());
        assert_eq!(KeyCode::try_from(40u8), Err(InvalidKeyIndex(40)));
    }

    #[test]
    fn test_all_codes_distinct() {
        let codes: Vec<KeyCode> = KeyCode::all().collect();
        assert_eq!(codes.len(), LOGICAL_KEYS as usize);
        for (i, code) in codes.iter().enumerate() {
            assert_eq!(code.index() as usize, i);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyCode::plain(0, 1).to_string(), "K01");
        assert_eq!(KeyCode::shifted(3, 2).to_string(), "S32");
    }

    #[test]
    fn test_serialization() {
        let code = KeyCode::shifted(2, 0);
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, code.index().to_string());
        let deserialized: KeyCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, deserialized);
    }

    #[test]
    fn test_deserialize_out_of_range() {
        let result: Result<KeyCode, _> = serde_json::from_str("99");
        assert!(result.is_err());
    }
}

//! Simulated keypad matrix
//!
//! Holds at most one physical key closed, plus the shift line. Column bits
//! are reported only while the key's line is driven, so the real scanner
//! timing applies.

use hal::KeypadMatrix;
use input_types::{KeyCode, MATRIX_COLS};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimKeypad {
    pressed: Option<KeyCode>,
    driven: Option<u8>,
    /// Line drives since creation
    drives: u64,
}

impl SimKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the contact for `key`, asserting shift if the code is shifted
    pub fn press(&mut self, key: KeyCode) {
        self.pressed = Some(key);
    }

    /// Opens every contact
    pub fn release(&mut self) {
        self.pressed = None;
    }

    pub fn pressed(&self) -> Option<KeyCode> {
        self.pressed
    }

    pub fn driven_line(&self) -> Option<u8> {
        self.driven
    }

    pub fn drive_count(&self) -> u64 {
        self.drives
    }
}

impl KeypadMatrix for SimKeypad {
    fn drive_line(&mut self, line: u8) {
        self.driven = Some(line);
        self.drives += 1;
    }

    fn release_line(&mut self, line: u8) {
        if self.driven == Some(line) {
            self.driven = None;
        }
    }

    fn read_columns(&mut self) -> u8 {
        let (Some(key), Some(line)) = (self.pressed, self.driven) else {
            return 0;
        };
        let index = key.unshifted().index();
        if index / MATRIX_COLS == line {
            1 << (index % MATRIX_COLS)
        } else {
            0
        }
    }

    fn shift_pressed(&mut self) -> bool {
        self.pressed.is_some_and(KeyCode::is_shifted)
    }
}

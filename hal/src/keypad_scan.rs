//! Periodic keypad matrix scanner
//!
//! One call to [`KeyScanner::tick`] per timer tick advances the scan by one
//! matrix line. Each line is sampled on the tick *after* it was driven, which
//! gives the contacts a full tick period to settle.
//!
//! After all four lines have been driven the 16-bit snapshot is resolved:
//!
//! - the lowest set bit wins if several keys are closed
//! - the shift line adds 16 to the code
//! - a key fires only on the press edge: the previous resolution must have
//!   been "no key", so holding a key never repeats it
//!
//! The snapshot is rebuilt from scratch every cycle, which debounces contact
//! chatter to the cycle period (40 ms at 100 Hz).

use input_types::{KeyCode, MATRIX_COLS, MATRIX_ROWS};
use log::trace;

use crate::keypad::KeypadMatrix;

/// Debounced, edge-triggered matrix scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScanner {
    /// Closed contacts seen this cycle, bit `4 * line + column`
    snapshot: u16,
    /// Line currently driven
    line: u8,
    /// Lines driven so far in this cycle
    phase: u8,
    /// Resolution of the previous full cycle
    held: Option<KeyCode>,
}

impl KeyScanner {
    pub const fn new() -> Self {
        Self {
            snapshot: 0,
            line: MATRIX_ROWS - 1,
            phase: 0,
            held: None,
        }
    }

    /// Advances the scan by one line
    ///
    /// Returns a key code on the tick that completes a cycle in which a key
    /// was newly pressed.
    pub fn tick<K: KeypadMatrix + ?Sized>(&mut self, matrix: &mut K) -> Option<KeyCode> {
        let columns = matrix.read_columns() & 0x0F;
        self.snapshot |= u16::from(columns) << (MATRIX_COLS * self.line);
        matrix.release_line(self.line);

        self.line = (self.line + 1) % MATRIX_ROWS;
        matrix.drive_line(self.line);

        self.phase += 1;
        if self.phase < MATRIX_ROWS {
            return None;
        }
        self.phase = 0;

        let key = self.resolve(matrix);
        self.snapshot = 0;

        let fired = match (self.held, key) {
            (None, Some(code)) => Some(code),
            _ => None,
        };
        self.held = key;

        if let Some(code) = fired {
            trace!("keypad: {} pressed", code);
        }
        fired
    }

    /// Key resolved by the last full cycle, if any is still held
    pub fn held(&self) -> Option<KeyCode> {
        self.held
    }

    /// Forgets all scan state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn resolve<K: KeypadMatrix + ?Sized>(&self, matrix: &mut K) -> Option<KeyCode> {
        if self.snapshot == 0 {
            return None;
        }
        let index = self.snapshot.trailing_zeros() as u8;
        let shift = matrix.shift_pressed();
        Some(KeyCode::from_matrix(
            index / MATRIX_COLS,
            index % MATRIX_COLS,
            shift,
        ))
    }
}

impl Default for KeyScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fake matrix with a set of closed contacts, indexed `4 * line + bit`
    struct FakeMatrix {
        closed: u16,
        shift: bool,
        driven: Option<u8>,
        drives: usize,
    }

    impl FakeMatrix {
        fn new() -> Self {
            Self {
                closed: 0,
                shift: false,
                driven: None,
                drives: 0,
            }
        }

        fn press(&mut self, code: KeyCode) {
            let index = code.unshifted().index();
            self.closed |= 1 << index;
            self.shift = code.is_shifted();
        }

        fn release_all(&mut self) {
            self.closed = 0;
            self.shift = false;
        }
    }

    impl KeypadMatrix for FakeMatrix {
        fn drive_line(&mut self, line: u8) {
            assert!(self.driven.is_none(), "two lines driven at once");
            self.driven = Some(line);
            self.drives += 1;
        }

        fn release_line(&mut self, line: u8) {
            if self.driven == Some(line) {
                self.driven = None;
            }
        }

        fn read_columns(&mut self) -> u8 {
            match self.driven {
                Some(line) => ((self.closed >> (4 * line)) & 0x0F) as u8,
                None => 0,
            }
        }

        fn shift_pressed(&mut self) -> bool {
            self.shift
        }
    }

    fn run_cycle(scanner: &mut KeyScanner, matrix: &mut FakeMatrix) -> Option<KeyCode> {
        let mut fired = None;
        for _ in 0..MATRIX_ROWS {
            if let Some(code) = scanner.tick(matrix) {
                assert!(fired.is_none(), "more than one key per cycle");
                fired = Some(code);
            }
        }
        fired
    }

    #[test]
    fn test_idle_matrix_fires_nothing() {
        let mut scanner = KeyScanner::new();
        let mut matrix = FakeMatrix::new();
        for _ in 0..10 {
            assert_eq!(run_cycle(&mut scanner, &mut matrix), None);
        }
        assert_eq!(matrix.drives, 40);
    }

    #[test]
    fn test_press_fires_once() {
        let mut scanner = KeyScanner::new();
        let mut matrix = FakeMatrix::new();
        // (3, 3) sits on line 0, sampled within the first cycle
        matrix.press(KeyCode::plain(3, 3));

        assert_eq!(run_cycle(&mut scanner, &mut matrix), Some(KeyCode::plain(3, 3)));
        assert_eq!(run_cycle(&mut scanner, &mut matrix), None);
        assert_eq!(run_cycle(&mut scanner, &mut matrix), None);
        assert_eq!(scanner.held(), Some(KeyCode::plain(3, 3)));
    }

    #[test]
    fn test_release_then_press_fires_again() {
        let mut scanner = KeyScanner::new();
        let mut matrix = FakeMatrix::new();
        matrix.press(KeyCode::plain(2, 2));

        assert_eq!(run_cycle(&mut scanner, &mut matrix), Some(KeyCode::plain(2, 2)));

        matrix.release_all();
        assert_eq!(run_cycle(&mut scanner, &mut matrix), None);
        assert_eq!(scanner.held(), None);

        matrix.press(KeyCode::plain(2, 2));
        assert_eq!(run_cycle(&mut scanner, &mut matrix), Some(KeyCode::plain(2, 2)));
    }

    #[test]
    fn test_last_line_is_seen_one_cycle_later() {
        let mut scanner = KeyScanner::new();
        let mut matrix = FakeMatrix::new();
        // (0, 0) sits on line 3, which is sampled on the first tick of a cycle
        matrix.press(KeyCode::plain(0, 0));

        assert_eq!(run_cycle(&mut scanner, &mut matrix), None);
        assert_eq!(run_cycle(&mut scanner, &mut matrix), Some(KeyCode::plain(0, 0)));
    }

    #[test]
    fn test_shift_adds_sixteen() {
        let mut scanner = KeyScanner::new();
        let mut matrix = FakeMatrix::new();
        matrix.press(KeyCode::shifted(3, 2));

        let fired = run_cycle(&mut scanner, &mut matrix).unwrap();
        assert!(fired.is_shifted());
        assert_eq!(fired, KeyCode::shifted(3, 2));
        assert_eq!(fired.index(), KeyCode::plain(3, 2).index() + 16);
    }

    #[test]
    fn test_lowest_index_wins() {
        let mut scanner = KeyScanner::new();
        let mut matrix = FakeMatrix::new();
        matrix.press(KeyCode::plain(1, 2));
        matrix.press(KeyCode::plain(2, 3));

        let fired = run_cycle(&mut scanner, &mut matrix).unwrap();
        assert_eq!(fired, KeyCode::plain(2, 3));
    }

    #[test]
    fn test_switching_keys_without_release_does_not_fire() {
        let mut scanner = KeyScanner::new();
        let mut matrix = FakeMatrix::new();
        matrix.press(KeyCode::plain(3, 3));
        assert!(run_cycle(&mut scanner, &mut matrix).is_some());

        matrix.release_all();
        matrix.press(KeyCode::plain(2, 3));
        assert_eq!(run_cycle(&mut scanner, &mut matrix), None);
    }

    #[test]
    fn test_reset() {
        let mut scanner = KeyScanner::new();
        let mut matrix = FakeMatrix::new();
        matrix.press(KeyCode::plain(3, 3));
        run_cycle(&mut scanner, &mut matrix);
        scanner.reset();
        assert_eq!(scanner, KeyScanner::new());
    }
}

//! Keypad matrix abstraction
//!
//! This module provides the hardware interface for a 4x4 key matrix plus a
//! dedicated shift line.
//!
//! ## Philosophy
//!
//! - **Hardware is just a source**: The matrix reports line levels, not keys
//! - **One line at a time**: Exactly one row is driven while columns are sensed
//! - **Testable**: Can mock hardware via fake implementations
//!
//! ## Design
//!
//! The interface is minimal and non-blocking. Debouncing, key resolution and
//! shift handling live in [`crate::keypad_scan::KeyScanner`].

/// Keypad matrix trait
///
/// Architecture-specific implementations drive matrix lines and sense columns.
///
/// ## Implementation Notes
///
/// - **Active level is hidden**: `read_columns` returns 1 bits for closed
///   contacts regardless of pull-up or pull-down wiring
/// - **Non-blocking**: All methods return immediately
/// - **Settling**: The scanner reads a line one tick after driving it
pub trait KeypadMatrix {
    /// Starts driving `line` (0..4)
    fn drive_line(&mut self, line: u8);

    /// Stops driving `line`
    fn release_line(&mut self, line: u8);

    /// Samples the four sensed columns of the currently driven line
    ///
    /// Bit `n` is set if column `n` is closed. Only the low nibble is used.
    fn read_columns(&mut self) -> u8;

    /// Returns true if the shift line is asserted
    fn shift_pressed(&mut self) -> bool;
}

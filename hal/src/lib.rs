#![cfg_attr(not(test), no_std)]

//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the hardware traits the calculator core consumes.
//!
//! ## Philosophy
//!
//! **The board must be fully abstracted and swappable.**
//!
//! No pin, port or controller assumptions should leak into core logic.
//! The HAL provides traits that board-specific crates implement, plus the
//! board-independent pieces that sit directly on top of them.
//!
//! ## Design Principles
//!
//! 1. **Trait-based**: Keypad, display, timer and interrupt access go through traits
//! 2. **No allocation**: Everything here works without a heap
//! 3. **Testable**: Every trait has an in-memory implementation

pub mod display;
pub mod glyph;
pub mod interrupts;
pub mod keypad;
pub mod keypad_scan;
pub mod timer;

pub use display::{BufferedDisplay, CharDisplay, DisplayMode, LCD_HEIGHT, LCD_WIDTH};
pub use interrupts::{without_interrupts, InterruptFlag, InterruptHal};
pub use keypad::KeypadMatrix;
pub use keypad_scan::KeyScanner;
pub use timer::{ticks_to_millis, ManualTimer, TimerDevice, TICK_HZ};

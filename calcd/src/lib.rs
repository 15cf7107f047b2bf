//! # Calculator Host Simulator
//!
//! Runs the calculator firmware on a workstation.
//!
//! ## Philosophy
//!
//! - **Same code path as the device**: Keys go through the matrix scanner,
//!   not straight into the calculator
//! - **Host owns I/O**: The firmware writes to an LCD; only the host prints
//! - **Deterministic**: Time is a tick counter advanced by the script
//!
//! ## Responsibilities
//!
//! The host:
//! - Parses key scripts into timed presses
//! - Simulates the keypad matrix and the 16×2 LCD
//! - Renders the LCD after each key or at the end of the run
//! - Dumps the final calculator state as JSON

pub mod input_script;
pub mod runtime;
pub mod sim_keypad;

pub use input_script::{InputScript, InputScriptError, ScriptedInput};
pub use runtime::{
    render_lcd, ConfigError, HostRuntime, HostRuntimeConfig, HostRuntimeError, MIN_HOLD_TICKS,
};
pub use sim_keypad::SimKeypad;

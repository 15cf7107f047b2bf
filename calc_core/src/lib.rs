//! # Calc Core
//!
//! Mode state machine for a two-line LCD scientific calculator.
//!
//! ## Philosophy
//!
//! - **One event stream**: Every change starts with a key from the scanner
//! - **Closed set of modes**: Input, Result, Table, Settings, Error
//! - **Run to completion**: A key is fully handled, screen included, before
//!   the next tick is serviced
//! - **Capabilities in**: Display and number formatting are passed in, never global
//!
//! ## Design
//!
//! The core provides:
//! - Calculator: State machine dispatching keys per mode
//! - KeyOutcome: Structured results from key handling
//! - keymap: Per-mode key layouts
//! - Firmware: Tick-driven loop tying scanner, calculator and hardware together
//! - CalculatorSnapshot: Deterministic state for testing

pub mod core;
pub mod firmware;
pub mod keymap;
pub mod mode;
pub mod number;
pub mod settings;
pub mod snapshot;
pub mod strings;

pub use crate::core::{Calculator, KeyOutcome, TableSample, TABLE_VALUE_WIDTH};
pub use firmware::Firmware;
pub use keymap::{EditAction, InputAction, NumberEdit, SettingsAction, TableAction, TABLE_BIG_STEP};
pub use mode::{ModeKind, StableMode};
pub use number::{parse_leading_float, FixedPoint, NumberFormat, OUTPUT_PRECISION};
pub use settings::{SettingsField, TableRange, TableSettings, NUMBER_CAPACITY};
pub use snapshot::CalculatorSnapshot;

//! Static screen text
//!
//! Error messages live with [`calc_engine::CalcError`].

/// Second line of the error screen
pub const PRESS_ANY_KEY: &[u8] = b"Press any key";
/// Settings label in front of the start field
pub const START_LABEL: &[u8] = b"START=";
/// Settings label in front of the step field
pub const STEP_LABEL: &[u8] = b"STEP=";
/// Table label for the sampled x
pub const X_LABEL: &[u8] = b"X=";
/// Table label for the computed y
pub const Y_LABEL: &[u8] = b"Y=";
/// Shown instead of y when a sample fails
pub const ERROR_LABEL: &[u8] = b"ERROR";

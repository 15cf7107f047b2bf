//! Calculation errors and their LCD messages

use thiserror::Error;

/// Errors raised while compiling or evaluating, or by the settings screen
///
/// The display text is the message shown on the error screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CalcError {
    /// Malformed expression
    #[error("Syntax Error")]
    Syntax,

    /// Division by zero or an inverse trig argument outside [-1, 1]
    #[error("Math. Error")]
    Math,

    /// A fixed-capacity buffer would overflow
    #[error("Not enough mem.")]
    NoMemory,

    /// Zero table step
    #[error("Range Error")]
    Range,
}

impl CalcError {
    pub const ALL: [CalcError; 4] = [
        CalcError::Syntax,
        CalcError::Math,
        CalcError::NoMemory,
        CalcError::Range,
    ];

    /// Stable numeric code, 1-based
    pub const fn code(self) -> u8 {
        match self {
            CalcError::Syntax => 1,
            CalcError::Math => 2,
            CalcError::NoMemory => 3,
            CalcError::Range => 4,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(CalcError::Syntax),
            2 => Some(CalcError::Math),
            3 => Some(CalcError::NoMemory),
            4 => Some(CalcError::Range),
            _ => None,
        }
    }

    /// Error screen text
    pub const fn message(self) -> &'static str {
        ERROR_MESSAGES[(self.code() - 1) as usize]
    }
}

/// Error screen texts indexed by `code - 1`
pub const ERROR_MESSAGES: [&str; 4] = [
    "Syntax Error",
    "Math. Error",
    "Not enough mem.",
    "Range Error",
];

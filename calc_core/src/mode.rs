//! Calculator modes

use serde::{Deserialize, Serialize};

/// Active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    /// Expression entry
    Input,
    /// Value of a constant expression
    Result,
    /// x/y browsing
    Table,
    /// Table start and step entry
    Settings,
    /// Error message, any key returns
    Error,
}

impl ModeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKind::Input => "INPUT",
            ModeKind::Result => "RESULT",
            ModeKind::Table => "TABLE",
            ModeKind::Settings => "SETTINGS",
            ModeKind::Error => "ERROR",
        }
    }
}

/// Mode the error screen returns to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StableMode {
    #[default]
    Input,
    Settings,
}

impl From<StableMode> for ModeKind {
    fn from(stable: StableMode) -> Self {
        match stable {
            StableMode::Input => ModeKind::Input,
            StableMode::Settings => ModeKind::Settings,
        }
    }
}

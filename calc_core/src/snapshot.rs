//! Calculator snapshot for deterministic state testing

use editor_core::FieldSnapshot;
use serde::{Deserialize, Serialize};

use crate::mode::{ModeKind, StableMode};
use crate::settings::SettingsField;

/// Complete calculator state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSnapshot {
    pub mode: ModeKind,
    pub stable_mode: StableMode,
    pub expression: FieldSnapshot,
    /// Free-variable symbols in the expression
    pub variables: usize,
    pub start: FieldSnapshot,
    pub step: FieldSnapshot,
    pub selected: SettingsField,
    pub table_start: f32,
    pub table_step: f32,
    pub table_offset: i32,
    pub last_result: Option<f32>,
    /// Code of the last error shown
    pub last_error: Option<u8>,
}

impl CalculatorSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in state tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update([self.mode as u8, self.stable_mode as u8, self.selected as u8]);

        for field in [&self.expression, &self.start, &self.step] {
            hasher.update(&field.bytes);
            hasher.update(field.cursor.to_le_bytes());
        }
        hasher.update(self.variables.to_le_bytes());

        hasher.update(self.table_start.to_bits().to_le_bytes());
        hasher.update(self.table_step.to_bits().to_le_bytes());
        hasher.update(self.table_offset.to_le_bytes());
        hasher.update(self.last_result.map_or(u32::MAX, f32::to_bits).to_le_bytes());
        hasher.update([self.last_error.unwrap_or(0)]);

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Calculator;
    use hal::BufferedDisplay;
    use input_types::KeyCode;

    #[test]
    fn test_snapshot_hash_deterministic() {
        let calc = Calculator::new();
        let snapshot = calc.snapshot();
        assert_eq!(snapshot.hash(), snapshot.hash(), "Hash should be deterministic");
    }

    #[test]
    fn test_same_keys_same_hash() {
        let keys = [KeyCode::plain(0, 0), KeyCode::shifted(3, 0), KeyCode::plain(1, 0)];
        let run = || {
            let mut calc = Calculator::new();
            let mut display = BufferedDisplay::new();
            calc.boot(&mut display);
            for key in keys {
                calc.apply_key(key, &mut display);
            }
            calc.snapshot()
        };
        assert_eq!(run().hash(), run().hash());
    }

    #[test]
    fn test_snapshot_hash_different_for_different_state() {
        let mut calc = Calculator::new();
        let mut display = BufferedDisplay::new();
        calc.boot(&mut display);
        let before = calc.snapshot();
        calc.apply_key(KeyCode::plain(0, 0), &mut display);
        let after = calc.snapshot();
        assert_ne!(before.hash(), after.hash(), "Different states should have different hashes");
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let mut calc = Calculator::new();
        let mut display = BufferedDisplay::new();
        calc.boot(&mut display);
        calc.apply_key(KeyCode::shifted(1, 1), &mut display); // pi

        let snapshot = calc.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"mode\":\"Input\""));
        let back: CalculatorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.expression.text, "π");
    }
}

//! Field snapshot for deterministic state testing

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::buffer::{Field, FieldGeometry};

/// Complete field state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub geometry: FieldGeometry,
    /// Content with display glyphs mapped to Unicode
    pub text: String,
    /// Raw display bytes
    pub bytes: Vec<u8>,
    pub cursor: usize,
}

impl FieldSnapshot {
    pub fn of<const N: usize>(field: &Field<N>) -> Self {
        Self {
            geometry: field.geometry(),
            text: field.to_display_string(),
            bytes: field.as_bytes().to_vec(),
            cursor: field.cursor(),
        }
    }

    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in state tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(self.geometry.row.to_le_bytes());
        hasher.update(self.geometry.col.to_le_bytes());
        hasher.update(self.geometry.width.to_le_bytes());
        hasher.update(&self.bytes);
        hasher.update(self.cursor.to_le_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}

impl<const N: usize> Field<N> {
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::of(self)
    }
}

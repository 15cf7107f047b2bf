//! Table settings: start/step fields and the sampled range

use editor_core::{Field, FieldGeometry};
use hal::LCD_WIDTH;
use serde::{Deserialize, Serialize};

use crate::number::parse_leading_float;

/// Number field buffer size (15 usable bytes)
pub const NUMBER_CAPACITY: usize = 16;

/// Start field: after "START=" on the top row
pub const START_GEOMETRY: FieldGeometry = FieldGeometry::new(0, 6, LCD_WIDTH - 6);

/// Step field: after "STEP=" on the bottom row
pub const STEP_GEOMETRY: FieldGeometry = FieldGeometry::new(1, 5, LCD_WIDTH - 5);

pub type NumberField = Field<NUMBER_CAPACITY>;

/// Which settings field receives edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SettingsField {
    #[default]
    Start,
    Step,
}

/// Start and step text, kept across settings sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSettings {
    pub start: NumberField,
    pub step: NumberField,
    pub selected: SettingsField,
}

impl TableSettings {
    pub const fn new() -> Self {
        Self {
            start: Field::new(START_GEOMETRY),
            step: Field::new(STEP_GEOMETRY),
            selected: SettingsField::Start,
        }
    }

    pub fn selected_field(&self) -> &NumberField {
        match self.selected {
            SettingsField::Start => &self.start,
            SettingsField::Step => &self.step,
        }
    }

    pub fn selected_field_mut(&mut self) -> &mut NumberField {
        match self.selected {
            SettingsField::Start => &mut self.start,
            SettingsField::Step => &mut self.step,
        }
    }

    /// Parsed start and step; `None` if the step is zero
    pub fn range(&self) -> Option<TableRange> {
        let start = parse_leading_float(self.start.as_bytes());
        let step = parse_leading_float(self.step.as_bytes());
        if step == 0.0 {
            return None;
        }
        Some(TableRange { start, step })
    }
}

impl Default for TableSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Sampled x values: `start + offset * step`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableRange {
    pub start: f32,
    pub step: f32,
}

impl TableRange {
    pub fn x_at(&self, offset: i32) -> f32 {
        self.start + offset as f32 * self.step
    }
}

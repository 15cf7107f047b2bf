//! Calculator mode state machine
//!
//! Every key goes to [`Calculator::apply_key`], which dispatches on the
//! active mode. Entering a mode runs its entry action, which draws that
//! mode's screen; handlers within a mode only redraw what they change.

use calc_engine::{compile, CalcError, Evaluator, Program};
use editor_core::ExprField;
use hal::{glyph, CharDisplay, DisplayMode, LCD_WIDTH};
use input_types::KeyCode;
use log::debug;

use crate::keymap::{self, EditAction, InputAction, NumberEdit, SettingsAction, TableAction};
use crate::mode::{ModeKind, StableMode};
use crate::number::{FixedPoint, NumberFormat, OUTPUT_PRECISION};
use crate::settings::{NumberField, SettingsField, TableRange, TableSettings};
use crate::snapshot::CalculatorSnapshot;
use crate::strings;

/// Width of the x and y values on the table screen
pub const TABLE_VALUE_WIDTH: usize = LCD_WIDTH - 2;

/// Outcome from applying a key to the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key has no meaning in the active mode
    Ignored,
    /// Same mode, state or screen changed
    Changed,
    /// Switched modes
    ModeChanged { from: ModeKind, to: ModeKind },
}

/// Last table sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSample {
    pub offset: i32,
    pub x: f32,
    pub y: Result<f32, CalcError>,
}

/// Calculator state machine
pub struct Calculator<F: NumberFormat = FixedPoint> {
    mode: ModeKind,
    stable: StableMode,
    expr: ExprField,
    settings: TableSettings,
    program: Program,
    evaluator: Evaluator,
    range: TableRange,
    offset: i32,
    last_result: Option<f32>,
    last_error: Option<CalcError>,
    last_sample: Option<TableSample>,
    format: F,
}

impl Calculator<FixedPoint> {
    pub fn new() -> Self {
        Self::with_format(FixedPoint)
    }
}

impl Default for Calculator<FixedPoint> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: NumberFormat> Calculator<F> {
    pub fn with_format(format: F) -> Self {
        Self {
            mode: ModeKind::Input,
            stable: StableMode::Input,
            expr: ExprField::new(),
            settings: TableSettings::new(),
            program: Program::default(),
            evaluator: Evaluator::new(),
            range: TableRange {
                start: 0.0,
                step: 1.0,
            },
            offset: 0,
            last_result: None,
            last_error: None,
            last_sample: None,
            format,
        }
    }

    /// Power-up: shows the input screen
    pub fn boot<D: CharDisplay + ?Sized>(&mut self, display: &mut D) {
        self.enter_input(display);
    }

    /// Apply a key event and return the outcome
    pub fn apply_key<D: CharDisplay + ?Sized>(&mut self, key: KeyCode, display: &mut D) -> KeyOutcome {
        let from = self.mode;
        let handled = match self.mode {
            ModeKind::Input => self.handle_input(key, display),
            ModeKind::Result => {
                // dismiss, then treat the key as typed in input mode
                self.enter_input(display);
                self.handle_input(key, display);
                true
            }
            ModeKind::Table => self.handle_table(key, display),
            ModeKind::Settings => self.handle_settings(key, display),
            ModeKind::Error => {
                self.reenter_stable(display);
                true
            }
        };

        let to = self.mode;
        if from != to {
            KeyOutcome::ModeChanged { from, to }
        } else if handled {
            KeyOutcome::Changed
        } else {
            KeyOutcome::Ignored
        }
    }

    // Public accessors for rendering/testing
    pub fn mode(&self) -> ModeKind {
        self.mode
    }

    pub fn stable_mode(&self) -> StableMode {
        self.stable
    }

    pub fn expression(&self) -> &ExprField {
        &self.expr
    }

    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    pub fn table_offset(&self) -> i32 {
        self.offset
    }

    pub fn table_range(&self) -> TableRange {
        self.range
    }

    /// x of the current table row
    pub fn table_x(&self) -> f32 {
        self.range.x_at(self.offset)
    }

    pub fn last_result(&self) -> Option<f32> {
        self.last_result
    }

    pub fn last_error(&self) -> Option<CalcError> {
        self.last_error
    }

    pub fn last_sample(&self) -> Option<TableSample> {
        self.last_sample
    }

    pub fn snapshot(&self) -> CalculatorSnapshot {
        CalculatorSnapshot {
            mode: self.mode,
            stable_mode: self.stable,
            expression: self.expr.snapshot(),
            variables: self.expr.variables(),
            start: self.settings.start.snapshot(),
            step: self.settings.step.snapshot(),
            selected: self.settings.selected,
            table_start: self.range.start,
            table_step: self.range.step,
            table_offset: self.offset,
            last_result: self.last_result,
            last_error: self.last_error.map(CalcError::code),
        }
    }

    // Mode entry actions

    fn enter_input<D: CharDisplay + ?Sized>(&mut self, display: &mut D) {
        self.switch_mode(ModeKind::Input);
        self.stable = StableMode::Input;
        display.clear();
        display.set_mode(DisplayMode::EDITING);
        self.expr.refresh(display);
    }

    fn enter_result<D: CharDisplay + ?Sized>(&mut self, value: f32, display: &mut D) {
        self.switch_mode(ModeKind::Result);
        self.last_result = Some(value);
        display.move_cursor(0, 1);
        let text = self.format.format(value, LCD_WIDTH, OUTPUT_PRECISION);
        display.write_string(text.as_bytes());
        display.move_cursor(self.expr.cursor().min(LCD_WIDTH - 1), 0);
    }

    fn enter_settings<D: CharDisplay + ?Sized>(&mut self, display: &mut D) {
        self.switch_mode(ModeKind::Settings);
        self.stable = StableMode::Settings;
        self.settings.selected = SettingsField::Start;

        display.clear();
        display.set_mode(DisplayMode::EDITING);
        display.write_string(strings::START_LABEL);
        display.write_string(self.settings.start.as_bytes());
        display.move_cursor(0, 1);
        display.write_string(strings::STEP_LABEL);
        display.write_string(self.settings.step.as_bytes());
        self.settings.selected_field().refresh(display);
    }

    fn enter_table<D: CharDisplay + ?Sized>(&mut self, range: TableRange, display: &mut D) {
        self.switch_mode(ModeKind::Table);
        self.range = range;
        self.offset = 0;

        display.set_mode(DisplayMode::VIEWING);
        display.move_cursor(0, 0);
        display.write_string(strings::X_LABEL);
        display.move_cursor(0, 1);
        display.write_string(strings::Y_LABEL);
        self.update_table(display);
    }

    fn enter_error<D: CharDisplay + ?Sized>(&mut self, err: CalcError, display: &mut D) {
        debug!("error: {} (returns to {:?})", err, self.stable);
        self.switch_mode(ModeKind::Error);
        self.last_error = Some(err);

        display.clear();
        display.set_mode(DisplayMode::VIEWING);
        display.write_string(err.message().as_bytes());
        display.move_cursor(0, 1);
        display.write_string(strings::PRESS_ANY_KEY);
    }

    fn reenter_stable<D: CharDisplay + ?Sized>(&mut self, display: &mut D) {
        match self.stable {
            StableMode::Input => self.enter_input(display),
            StableMode::Settings => self.enter_settings(display),
        }
    }

    fn switch_mode(&mut self, mode: ModeKind) {
        if self.mode != mode {
            debug!("mode: {} -> {}", self.mode.as_str(), mode.as_str());
        }
        self.mode = mode;
    }

    // Private mode handlers

    fn handle_input<D: CharDisplay + ?Sized>(&mut self, key: KeyCode, display: &mut D) -> bool {
        let Some(action) = keymap::input_action(key) else {
            return false;
        };
        match action {
            InputAction::Edit(edit) => {
                apply_expr_edit(&mut self.expr, edit);
                self.expr.refresh(display);
            }
            InputAction::Confirm => self.confirm_expression(display),
        }
        true
    }

    fn confirm_expression<D: CharDisplay + ?Sized>(&mut self, display: &mut D) {
        self.program = match compile(self.expr.as_bytes()) {
            Ok(program) => program,
            Err(err) => return self.enter_error(err, display),
        };

        // x = 0 only checks an expression with a variable for validity
        let trial = self.evaluator.evaluate(&self.program, 0.0);
        if self.expr.variables() > 0 {
            match trial {
                Err(err) if err != CalcError::Math => self.enter_error(err, display),
                _ => self.enter_settings(display),
            }
        } else {
            match trial {
                Ok(value) => self.enter_result(value, display),
                Err(err) => self.enter_error(err, display),
            }
        }
    }

    fn handle_settings<D: CharDisplay + ?Sized>(&mut self, key: KeyCode, display: &mut D) -> bool {
        let Some(action) = keymap::settings_action(key) else {
            return false;
        };
        match action {
            SettingsAction::Edit(edit) => {
                let field = self.settings.selected_field_mut();
                apply_number_edit(field, edit);
                field.refresh(display);
            }
            SettingsAction::Minus => {
                if self.settings.selected != SettingsField::Start {
                    return false;
                }
                self.settings.start.insert_char(glyph::SUB);
                self.settings.start.refresh(display);
            }
            SettingsAction::SelectStart | SettingsAction::SelectStep => {
                self.settings.selected = if action == SettingsAction::SelectStart {
                    SettingsField::Start
                } else {
                    SettingsField::Step
                };
                self.settings.selected_field().refresh(display);
            }
            SettingsAction::Escape => self.enter_input(display),
            SettingsAction::Confirm => match self.settings.range() {
                Some(range) => self.enter_table(range, display),
                None => self.enter_error(CalcError::Range, display),
            },
        }
        true
    }

    fn handle_table<D: CharDisplay + ?Sized>(&mut self, key: KeyCode, display: &mut D) -> bool {
        let Some(action) = keymap::table_action(key) else {
            return false;
        };
        match action {
            TableAction::Exit => {
                self.enter_input(display);
                return true;
            }
            TableAction::Move(delta) => self.offset = self.offset.saturating_add(delta),
            TableAction::Reset => self.offset = 0,
        }
        self.update_table(display);
        true
    }

    /// Draws x and y for the current offset
    ///
    /// A failed sample prints a label instead of leaving the table.
    fn update_table<D: CharDisplay + ?Sized>(&mut self, display: &mut D) {
        let x = self.table_x();
        display.move_cursor(2, 0);
        let text = self.format.format(x, TABLE_VALUE_WIDTH, OUTPUT_PRECISION);
        display.write_string(text.as_bytes());

        let y = self.evaluator.evaluate(&self.program, x);
        display.move_cursor(2, 1);
        match y {
            Ok(value) => {
                let text = self.format.format(value, TABLE_VALUE_WIDTH, OUTPUT_PRECISION);
                display.write_string(text.as_bytes());
            }
            Err(_) => {
                for _ in 0..TABLE_VALUE_WIDTH - strings::ERROR_LABEL.len() {
                    display.write_char(b' ');
                }
                display.write_string(strings::ERROR_LABEL);
            }
        }

        self.last_sample = Some(TableSample {
            offset: self.offset,
            x,
            y,
        });
    }
}

fn apply_expr_edit(expr: &mut ExprField, edit: EditAction) {
    match edit {
        EditAction::Insert(byte) => {
            expr.insert_char(byte);
        }
        EditAction::InsertFunction(name) => {
            expr.insert_token(name);
        }
        EditAction::Clear => expr.clear(),
        EditAction::Delete => {
            expr.delete_before_cursor();
        }
        EditAction::Left => expr.move_left(),
        EditAction::Right => expr.move_right(),
    }
}

fn apply_number_edit(field: &mut NumberField, edit: NumberEdit) {
    match edit {
        NumberEdit::Insert(byte) => {
            field.insert_char(byte);
        }
        NumberEdit::Clear => field.clear(),
        NumberEdit::Delete => {
            field.delete_before_cursor();
        }
        NumberEdit::Left => field.move_left(),
        NumberEdit::Right => field.move_right(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal::BufferedDisplay;

    fn setup() -> (Calculator, BufferedDisplay) {
        let mut calc = Calculator::new();
        let mut display = BufferedDisplay::new();
        calc.boot(&mut display);
        (calc, display)
    }

    fn row(display: &BufferedDisplay, row: usize) -> String {
        display.row_chars(row).collect()
    }

    const ENTER: KeyCode = KeyCode::plain(3, 3);

    #[test]
    fn test_boot_shows_input() {
        let (calc, display) = setup();
        assert_eq!(calc.mode(), ModeKind::Input);
        assert_eq!(display.mode(), DisplayMode::EDITING);
        assert_eq!(row(&display, 0).trim(), "");
    }

    #[test]
    fn test_digit_edits_expression() {
        let (mut calc, mut display) = setup();
        let outcome = calc.apply_key(KeyCode::plain(0, 0), &mut display);
        assert_eq!(outcome, KeyOutcome::Changed);
        assert_eq!(calc.expression().as_bytes(), b"1");
        assert_eq!(row(&display, 0).trim_end(), "1");
    }

    #[test]
    fn test_confirm_constant_goes_to_result() {
        let (mut calc, mut display) = setup();
        calc.apply_key(KeyCode::plain(1, 0), &mut display); // 2
        let outcome = calc.apply_key(ENTER, &mut display);
        assert_eq!(
            outcome,
            KeyOutcome::ModeChanged {
                from: ModeKind::Input,
                to: ModeKind::Result
            }
        );
        assert_eq!(calc.last_result(), Some(2.0));
        assert_eq!(row(&display, 1), "          2.0000");
        assert_eq!(display.cursor(), (1, 0));
    }

    #[test]
    fn test_error_returns_to_input() {
        let (mut calc, mut display) = setup();
        calc.apply_key(KeyCode::plain(0, 3), &mut display); // (
        calc.apply_key(ENTER, &mut display);
        assert_eq!(calc.mode(), ModeKind::Error);
        assert_eq!(calc.last_error(), Some(CalcError::Syntax));
        assert_eq!(row(&display, 0).trim_end(), "Syntax Error");
        assert_eq!(row(&display, 1).trim_end(), "Press any key");
        assert_eq!(display.mode(), DisplayMode::VIEWING);

        calc.apply_key(KeyCode::plain(0, 0), &mut display);
        assert_eq!(calc.mode(), ModeKind::Input);
        // the key is not replayed
        assert_eq!(calc.expression().as_bytes(), b"(");
    }

    #[test]
    fn test_table_ignores_unmapped_keys() {
        let (mut calc, mut display) = setup();
        calc.apply_key(KeyCode::shifted(0, 2), &mut display); // x
        calc.apply_key(ENTER, &mut display);
        assert_eq!(calc.mode(), ModeKind::Settings);
        calc.apply_key(KeyCode::shifted(1, 2), &mut display); // select step
        calc.apply_key(KeyCode::plain(0, 0), &mut display); // 1
        calc.apply_key(ENTER, &mut display);
        assert_eq!(calc.mode(), ModeKind::Table);

        assert_eq!(calc.apply_key(ENTER, &mut display), KeyOutcome::Ignored);
        assert_eq!(calc.mode(), ModeKind::Table);
    }

    #[test]
    fn test_minus_only_in_start_field() {
        let (mut calc, mut display) = setup();
        calc.apply_key(KeyCode::shifted(0, 2), &mut display);
        calc.apply_key(ENTER, &mut display);

        let minus = KeyCode::shifted(3, 1);
        assert_eq!(calc.apply_key(minus, &mut display), KeyOutcome::Changed);
        assert_eq!(calc.settings().start.as_bytes(), b"-");

        calc.apply_key(KeyCode::shifted(1, 2), &mut display);
        assert_eq!(calc.apply_key(minus, &mut display), KeyOutcome::Ignored);
        assert!(calc.settings().step.is_empty());
    }
}

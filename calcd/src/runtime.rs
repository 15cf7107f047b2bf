//! # Host Runtime
//!
//! Drives the firmware with scripted key presses against simulated hardware.
//!
//! Time only moves when the script says so: each key is held for
//! `press_ticks` and released for `release_ticks`, and every elapsed tick
//! runs the firmware's scan loop. Keys therefore reach the calculator through
//! the same debounce path as on the device.

use calc_core::{Calculator, CalculatorSnapshot, Firmware};
use hal::{ticks_to_millis, BufferedDisplay, InterruptFlag, ManualTimer, LCD_HEIGHT, LCD_WIDTH};
use input_types::{KeyCode, MATRIX_ROWS};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

use crate::input_script::{InputScript, InputScriptError, ScriptedInput};
use crate::sim_keypad::SimKeypad;

/// Shortest hold that always spans a full scan cycle
pub const MIN_HOLD_TICKS: u32 = 2 * MATRIX_ROWS as u32;

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be at least {min} ticks, got {value}")]
    HoldTooShort {
        field: &'static str,
        min: u32,
        value: u32,
    },
}

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("State dump failed: {0}")]
    Dump(#[from] serde_json::Error),
}

/// Host runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostRuntimeConfig {
    /// Ticks each scripted key is held down
    pub press_ticks: u32,
    /// Ticks of release after each key
    pub release_ticks: u32,
    /// Maximum scripted inputs to run (0 = unlimited)
    pub max_steps: usize,
    /// Render the LCD after every key, not just at the end
    pub echo_every_key: bool,
    /// Script text
    pub script: Option<String>,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            press_ticks: MIN_HOLD_TICKS,
            release_ticks: MIN_HOLD_TICKS,
            max_steps: 0,
            echo_every_key: false,
            script: None,
        }
    }
}

impl HostRuntimeConfig {
    /// Parses and validates a JSON config; missing fields take defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks that every key press is long enough to be scanned
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("press_ticks", self.press_ticks),
            ("release_ticks", self.release_ticks),
        ] {
            if value < MIN_HOLD_TICKS {
                return Err(ConfigError::HoldTooShort {
                    field,
                    min: MIN_HOLD_TICKS,
                    value,
                });
            }
        }
        Ok(())
    }
}

type SimFirmware = Firmware<SimKeypad, BufferedDisplay, InterruptFlag>;

/// Host runtime
pub struct HostRuntime {
    config: HostRuntimeConfig,
    firmware: SimFirmware,
    timer: ManualTimer,
    script: InputScript,
    /// Scripted inputs consumed
    steps: usize,
    /// Keys the calculator actually received
    keys_dispatched: usize,
}

impl HostRuntime {
    /// Validates the config, parses the script and boots the firmware
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        config.validate()?;
        let script = match &config.script {
            Some(text) => InputScript::from_text(text)?,
            None => InputScript::new(),
        };

        let mut firmware = Firmware::new(
            SimKeypad::new(),
            BufferedDisplay::new(),
            InterruptFlag::new(),
        );
        firmware.boot();
        info!("firmware booted, {} scripted inputs", script.remaining());

        Ok(Self {
            config,
            firmware,
            timer: ManualTimer::new(),
            script,
            steps: 0,
            keys_dispatched: 0,
        })
    }

    /// Runs the script to completion (or `max_steps`), then renders the LCD
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), HostRuntimeError> {
        loop {
            if self.config.max_steps > 0 && self.steps >= self.config.max_steps {
                info!("stopping after {} steps", self.steps);
                break;
            }

            let Some(input) = self.script.next_input() else {
                break;
            };
            self.step(input, out)?;
            self.steps += 1;
        }

        write!(out, "{}", render_lcd(self.display()))?;
        Ok(())
    }

    /// Executes one scripted input
    pub fn step<W: Write>(&mut self, input: ScriptedInput, out: &mut W) -> Result<(), HostRuntimeError> {
        match input {
            ScriptedInput::Key(key) => {
                let dispatched = self.press(key);
                if dispatched != 1 {
                    warn!("{} dispatched {} times", key, dispatched);
                }
                if self.config.echo_every_key {
                    writeln!(out, "{} -> {}", key, self.calculator().mode().as_str())?;
                    write!(out, "{}", render_lcd(self.display()))?;
                }
            }
            ScriptedInput::Wait(ticks) => {
                debug!("idle for {} ticks", ticks);
                self.idle(ticks);
            }
        }
        Ok(())
    }

    /// Holds `key` for `press_ticks`, then releases it for `release_ticks`
    ///
    /// Returns the number of keys the firmware dispatched meanwhile.
    pub fn press(&mut self, key: KeyCode) -> usize {
        self.firmware.keypad_mut().press(key);
        let mut dispatched = self.idle(u64::from(self.config.press_ticks));
        self.firmware.keypad_mut().release();
        dispatched += self.idle(u64::from(self.config.release_ticks));
        self.keys_dispatched += dispatched;
        dispatched
    }

    /// Lets `ticks` timer ticks elapse
    pub fn idle(&mut self, ticks: u64) -> usize {
        self.timer.advance(ticks);
        self.firmware.run_pending(&mut self.timer)
    }

    /// Writes the calculator state as pretty JSON
    pub fn dump_state<W: Write>(&self, out: &mut W) -> Result<(), HostRuntimeError> {
        serde_json::to_writer_pretty(&mut *out, &self.snapshot())?;
        writeln!(out)?;
        Ok(())
    }

    // Public accessors for rendering/testing
    pub fn snapshot(&self) -> CalculatorSnapshot {
        self.firmware.calculator().snapshot()
    }

    pub fn calculator(&self) -> &Calculator {
        self.firmware.calculator()
    }

    pub fn display(&self) -> &BufferedDisplay {
        self.firmware.display()
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn keys_dispatched(&self) -> usize {
        self.keys_dispatched
    }

    pub fn ticks(&self) -> u64 {
        self.firmware.ticks_seen()
    }

    /// Simulated time at the firmware's tick rate
    pub fn elapsed_ms(&self) -> u64 {
        ticks_to_millis(self.ticks())
    }
}

/// Renders the LCD as a framed text block
///
/// The row holding a visible cursor is marked with `<`, and a caret under
/// the frame points at its column.
pub fn render_lcd(display: &BufferedDisplay) -> String {
    let border = "-".repeat(LCD_WIDTH);
    let (cursor_col, cursor_row) = display.cursor();
    let cursor_shown = display.mode().cursor_visible && cursor_col < LCD_WIDTH;

    let mut output = String::new();
    let _ = writeln!(output, "+{}+", border);
    for row in 0..LCD_HEIGHT {
        let text: String = display.row_chars(row).collect();
        let marker = if cursor_shown && cursor_row == row { " <" } else { "" };
        let _ = writeln!(output, "|{}|{}", text, marker);
    }
    let _ = writeln!(output, "+{}+", border);
    if cursor_shown {
        let _ = writeln!(output, "{:>width$}", '^', width = cursor_col + 2);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::ModeKind;

    fn runtime(script: &str) -> HostRuntime {
        let config = HostRuntimeConfig {
            script: Some(script.to_string()),
            ..HostRuntimeConfig::default()
        };
        HostRuntime::new(config).unwrap()
    }

    #[test]
    fn test_runtime_creation() {
        let runtime = HostRuntime::new(HostRuntimeConfig::default()).unwrap();
        assert_eq!(runtime.step_count(), 0);
        assert_eq!(runtime.calculator().mode(), ModeKind::Input);
    }

    #[test]
    fn test_each_key_dispatches_once() {
        let mut runtime = runtime("1 2 + 3");
        let mut out = Vec::new();
        runtime.run(&mut out).unwrap();
        assert_eq!(runtime.step_count(), 4);
        assert_eq!(runtime.keys_dispatched(), 4);
        assert_eq!(runtime.calculator().expression().as_bytes(), b"12+3");
    }

    #[test]
    fn test_held_key_ticks() {
        let mut runtime = runtime("7");
        runtime.run(&mut Vec::new()).unwrap();
        assert_eq!(runtime.ticks(), u64::from(2 * MIN_HOLD_TICKS));
        assert_eq!(runtime.elapsed_ms(), 160);
    }

    #[test]
    fn test_wait_only_advances_time() {
        let mut runtime = runtime("wait 30");
        runtime.run(&mut Vec::new()).unwrap();
        assert_eq!(runtime.ticks(), 30);
        assert_eq!(runtime.elapsed_ms(), 300);
        assert_eq!(runtime.keys_dispatched(), 0);
    }

    #[test]
    fn test_max_steps() {
        let config = HostRuntimeConfig {
            script: Some("1 2 3 4 5".to_string()),
            max_steps: 2,
            ..HostRuntimeConfig::default()
        };
        let mut runtime = HostRuntime::new(config).unwrap();
        runtime.run(&mut Vec::new()).unwrap();
        assert_eq!(runtime.step_count(), 2);
        assert_eq!(runtime.calculator().expression().as_bytes(), b"12");
    }

    #[test]
    fn test_short_press_rejected() {
        let config = HostRuntimeConfig {
            press_ticks: 3,
            ..HostRuntimeConfig::default()
        };
        assert!(matches!(
            HostRuntime::new(config),
            Err(HostRuntimeError::Config(ConfigError::HoldTooShort {
                field: "press_ticks",
                ..
            }))
        ));
    }

    #[test]
    fn test_bad_script_rejected() {
        let config = HostRuntimeConfig {
            script: Some("1\nfrobnicate".to_string()),
            ..HostRuntimeConfig::default()
        };
        assert!(matches!(
            HostRuntime::new(config),
            Err(HostRuntimeError::Script(InputScriptError::ParseError { line: 2, .. }))
        ));
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config = HostRuntimeConfig::from_json(r#"{ "press_ticks": 12 }"#).unwrap();
        assert_eq!(config.press_ticks, 12);
        assert_eq!(config.release_ticks, MIN_HOLD_TICKS);
        assert_eq!(config.script, None);
    }

    #[test]
    fn test_config_unknown_field() {
        assert!(matches!(
            HostRuntimeConfig::from_json(r#"{ "colour": "red" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_render_lcd_frame() {
        let mut runtime = runtime("2 + 3 enter");
        let mut out = Vec::new();
        runtime.run(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "+----------------+");
        assert_eq!(lines[1], "|2+3             | <");
        assert_eq!(lines[2], "|          5.0000|");
        assert_eq!(lines[3], "+----------------+");
        assert_eq!(lines[4], "    ^");
    }

    #[test]
    fn test_echo_every_key() {
        let config = HostRuntimeConfig {
            script: Some("4 5".to_string()),
            echo_every_key: true,
            ..HostRuntimeConfig::default()
        };
        let mut runtime = HostRuntime::new(config).unwrap();
        let mut out = Vec::new();
        runtime.run(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("K01 -> INPUT"));
        assert!(text.contains("K11 -> INPUT"));
        // two echoed frames plus the final one
        assert_eq!(text.matches("+----------------+").count(), 6);
    }

    #[test]
    fn test_dump_state_is_snapshot_json() {
        let mut runtime = runtime("9 enter");
        runtime.run(&mut Vec::new()).unwrap();

        let mut out = Vec::new();
        runtime.dump_state(&mut out).unwrap();
        let snapshot: CalculatorSnapshot = serde_json::from_slice(&out).unwrap();
        assert_eq!(snapshot, runtime.snapshot());
        assert_eq!(snapshot.mode, ModeKind::Result);
        assert_eq!(snapshot.last_result, Some(9.0));
    }
}

//! # Input Script Parser
//!
//! Line-based key scripts for deterministic runs and demos.
//!
//! ## Format
//!
//! Each line holds one or more whitespace-separated actions:
//! - Key names: `0`-`9`, `.`, `(`, `)`, `+`, `-`, `*`, `/`, `^`, `pi`, `x`
//! - Functions: `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `log`
//! - Editing: `clear`, `del`, `enter`, `left`, `right`
//! - Settings: `esc`, `up` (select start), `down` (select step), `minus`
//! - Table: `exit`, `reset`, `next`, `prev`, `page-next`, `page-prev`
//! - Raw keys: `K<col><row>` unshifted, `S<col><row>` shifted
//! - Idle time: `wait <ticks>`
//! - Comments: everything after `#`
//!
//! A line starting with `"` is a string: each character up to the closing
//! quote is typed as its key. Whitespace inside the string is skipped.
//!
//! Several names share a physical key (`+` and `clear` are different keys,
//! but `-` and `minus` are the same one); the meaning is decided by the mode
//! the calculator is in when the key arrives.
//!
//! ## Example
//!
//! ```text
//! # tabulate sin(x) from 0 in steps of 15
//! sin x ) enter
//! 0 down 1 5 enter
//! next next
//! ```

use input_types::KeyCode;
use std::collections::VecDeque;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,

    #[error("Invalid wait count: {0}")]
    InvalidWait(String),
}

/// A single scripted input action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedInput {
    /// Press and release one key
    Key(KeyCode),
    /// Idle for this many ticks
    Wait(u64),
}

/// Parsed key script
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    inputs: VecDeque<ScriptedInput>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut inputs = VecDeque::new();

        for (index, line) in text.lines().enumerate() {
            let line_num = index + 1;
            let parsed = Self::parse_line(line, line_num).map_err(|e| match e {
                InputScriptError::ParseError { .. } => e,
                other => InputScriptError::ParseError {
                    line: line_num,
                    message: other.to_string(),
                },
            })?;
            inputs.extend(parsed);
        }

        if inputs.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { inputs })
    }

    fn parse_line(line: &str, line_num: usize) -> Result<Vec<ScriptedInput>, InputScriptError> {
        let line = line.trim();

        if let Some(quoted) = line.strip_prefix('"') {
            let Some(end) = quoted.find('"') else {
                return Err(InputScriptError::ParseError {
                    line: line_num,
                    message: "unterminated string".to_string(),
                });
            };
            let rest = quoted[end + 1..].trim();
            if !rest.is_empty() && !rest.starts_with('#') {
                return Err(InputScriptError::ParseError {
                    line: line_num,
                    message: format!("unexpected text after string: {}", rest),
                });
            }
            return quoted[..end]
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| Self::char_to_keycode(c).map(ScriptedInput::Key))
                .collect();
        }

        let code = match line.find('#') {
            Some(start) => &line[..start],
            None => line,
        };

        let mut inputs = Vec::new();
        let mut words = code.split_whitespace();
        while let Some(word) = words.next() {
            if word == "wait" {
                let count = words
                    .next()
                    .ok_or_else(|| InputScriptError::InvalidWait(String::new()))?;
                let ticks = count
                    .parse::<u64>()
                    .map_err(|_| InputScriptError::InvalidWait(count.to_string()))?;
                inputs.push(ScriptedInput::Wait(ticks));
            } else {
                inputs.push(ScriptedInput::Key(Self::parse_keycode(word)?));
            }
        }
        Ok(inputs)
    }

    /// Parses a key name to a key code
    pub fn parse_keycode(name: &str) -> Result<KeyCode, InputScriptError> {
        if let Some(code) = Self::parse_raw(name) {
            return Ok(code);
        }

        let code = match name.to_lowercase().as_str() {
            "pi" | "π" => KeyCode::shifted(1, 1),
            "sin" => KeyCode::shifted(0, 0),
            "cos" => KeyCode::shifted(1, 0),
            "tan" => KeyCode::shifted(2, 0),
            "asin" => KeyCode::shifted(0, 3),
            "acos" => KeyCode::shifted(1, 3),
            "atan" => KeyCode::shifted(2, 3),
            "log" | "ln" => KeyCode::shifted(2, 2),

            "clear" => KeyCode::plain(3, 0),
            "del" | "delete" => KeyCode::plain(3, 1),
            "enter" => KeyCode::plain(3, 3),
            "left" => KeyCode::shifted(0, 1),
            "right" => KeyCode::shifted(2, 1),

            "esc" | "escape" => KeyCode::shifted(0, 0),
            "up" => KeyCode::shifted(1, 0),
            "down" => KeyCode::shifted(1, 2),
            "minus" => KeyCode::shifted(3, 1),

            "exit" => KeyCode::plain(0, 0),
            "reset" => KeyCode::plain(1, 1),
            "next" => KeyCode::plain(1, 2),
            "prev" => KeyCode::plain(1, 0),
            "page-next" => KeyCode::plain(2, 1),
            "page-prev" => KeyCode::plain(0, 1),

            _ => {
                let mut chars = name.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::char_to_keycode(c),
                    _ => Err(InputScriptError::InvalidKeyName(name.to_string())),
                };
            }
        };
        Ok(code)
    }

    /// `K<col><row>` or `S<col><row>`
    fn parse_raw(name: &str) -> Option<KeyCode> {
        let &[prefix, col @ b'0'..=b'3', row @ b'0'..=b'3'] = name.as_bytes() else {
            return None;
        };
        let (col, row) = (col - b'0', row - b'0');
        match prefix {
            b'K' => Some(KeyCode::plain(col, row)),
            b'S' => Some(KeyCode::shifted(col, row)),
            _ => None,
        }
    }

    /// Converts a typed character to the key that enters it
    fn char_to_keycode(c: char) -> Result<KeyCode, InputScriptError> {
        let code = match c {
            '1' => KeyCode::plain(0, 0),
            '2' => KeyCode::plain(1, 0),
            '3' => KeyCode::plain(2, 0),
            '4' => KeyCode::plain(0, 1),
            '5' => KeyCode::plain(1, 1),
            '6' => KeyCode::plain(2, 1),
            '7' => KeyCode::plain(0, 2),
            '8' => KeyCode::plain(1, 2),
            '9' => KeyCode::plain(2, 2),
            '0' => KeyCode::plain(1, 3),
            '.' => KeyCode::plain(3, 2),
            '(' => KeyCode::plain(0, 3),
            ')' => KeyCode::plain(2, 3),
            '+' => KeyCode::shifted(3, 0),
            '-' => KeyCode::shifted(3, 1),
            '*' => KeyCode::shifted(3, 2),
            '/' | '÷' => KeyCode::shifted(3, 3),
            '^' => KeyCode::shifted(1, 2),
            'x' => KeyCode::shifted(0, 2),
            'π' => KeyCode::shifted(1, 1),
            _ => return Err(InputScriptError::InvalidKeyName(c.to_string())),
        };
        Ok(code)
    }

    /// Returns the next input, if any
    pub fn next_input(&mut self) -> Option<ScriptedInput> {
        self.inputs.pop_front()
    }

    pub fn has_more(&self) -> bool {
        !self.inputs.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(script: &str) -> Vec<ScriptedInput> {
        let mut script = InputScript::from_text(script).unwrap();
        let mut out = Vec::new();
        while let Some(input) = script.next_input() {
            out.push(input);
        }
        out
    }

    #[test]
    fn test_parse_single_key() {
        assert_eq!(keys("enter"), vec![ScriptedInput::Key(KeyCode::plain(3, 3))]);
    }

    #[test]
    fn test_parse_several_keys_per_line() {
        assert_eq!(
            keys("2 + 3 enter"),
            vec![
                ScriptedInput::Key(KeyCode::plain(1, 0)),
                ScriptedInput::Key(KeyCode::shifted(3, 0)),
                ScriptedInput::Key(KeyCode::plain(2, 0)),
                ScriptedInput::Key(KeyCode::plain(3, 3)),
            ]
        );
    }

    #[test]
    fn test_parse_quoted_string() {
        assert_eq!(
            keys("\"1.5 * x\""),
            vec![
                ScriptedInput::Key(KeyCode::plain(0, 0)),
                ScriptedInput::Key(KeyCode::plain(3, 2)),
                ScriptedInput::Key(KeyCode::plain(1, 1)),
                ScriptedInput::Key(KeyCode::shifted(3, 2)),
                ScriptedInput::Key(KeyCode::shifted(0, 2)),
            ]
        );
    }

    #[test]
    fn test_parse_raw_keys() {
        assert_eq!(
            keys("K00 S33"),
            vec![
                ScriptedInput::Key(KeyCode::plain(0, 0)),
                ScriptedInput::Key(KeyCode::shifted(3, 3)),
            ]
        );
        assert!(InputScript::from_text("K44").is_err());
    }

    #[test]
    fn test_named_keys_share_physical_keys() {
        assert_eq!(
            InputScript::parse_keycode("esc"),
            InputScript::parse_keycode("sin")
        );
        assert_eq!(
            InputScript::parse_keycode("minus"),
            InputScript::parse_keycode("-")
        );
        assert_eq!(
            InputScript::parse_keycode("exit"),
            InputScript::parse_keycode("1")
        );
        assert_eq!(
            InputScript::parse_keycode("page-next"),
            InputScript::parse_keycode("6")
        );
    }

    #[test]
    fn test_parse_wait() {
        assert_eq!(
            keys("wait 25\n5"),
            vec![
                ScriptedInput::Wait(25),
                ScriptedInput::Key(KeyCode::plain(1, 1)),
            ]
        );
    }

    #[test]
    fn test_invalid_wait() {
        let result = InputScript::from_text("wait soon");
        assert!(matches!(
            result,
            Err(InputScriptError::ParseError { line: 1, .. })
        ));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let script = "# header\n\n1 # one\n\"2\" # two\n";
        assert_eq!(keys(script).len(), 2);
    }

    #[test]
    fn test_empty_script() {
        let result = InputScript::from_text("# nothing\n\n");
        assert_eq!(result.unwrap_err(), InputScriptError::EmptyScript);
    }

    #[test]
    fn test_invalid_key_reports_line() {
        let result = InputScript::from_text("1\n2\nbogus");
        match result {
            Err(InputScriptError::ParseError { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("bogus"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            InputScript::from_text("\"12"),
            Err(InputScriptError::ParseError { line: 1, .. })
        ));
    }

    #[test]
    fn test_remaining() {
        let mut script = InputScript::from_text("1 2 3").unwrap();
        assert_eq!(script.remaining(), 3);
        script.next_input();
        assert_eq!(script.remaining(), 2);
        assert!(script.has_more());
    }
}

//! Infix to postfix compiler
//!
//! A single left-to-right pass tokenizes the expression and reorders it with
//! the shunting-yard algorithm. Operators of equal precedence leave the stack
//! before the newcomer is pushed, so every binary operator (power included)
//! groups left to right: `2^3^2` is `(2^3)^2`.
//!
//! Negation and functions share the tightest precedence and go through the
//! same pop rule. A prefix operator directly after another one therefore
//! pops it with no operand behind it: `--2` and `-sin(30)` compile, but
//! fail with a syntax error when evaluated.

use core::f32::consts::PI;

use hal::glyph::{self, is_name_byte};
use heapless::Vec;
use log::debug;

use crate::error::CalcError;
use crate::evaluator::Evaluator;
use crate::token::{Operator, Token};

/// Postfix token stream capacity
pub const TOKEN_CAPACITY: usize = 32;
/// Literal stream capacity
pub const LITERAL_CAPACITY: usize = 32;
/// Operator stack capacity
pub const OPERATOR_STACK_CAPACITY: usize = 32;

/// Compiled expression
///
/// `Token::Number` entries consume `literals` in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub(crate) tokens: Vec<Token, TOKEN_CAPACITY>,
    pub(crate) literals: Vec<f32, LITERAL_CAPACITY>,
}

impl Program {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn literals(&self) -> &[f32] {
        &self.literals
    }

    pub fn uses_variable(&self) -> bool {
        self.tokens.contains(&Token::Variable)
    }

    /// Evaluates with the free variable bound to `x`
    pub fn evaluate(&self, x: f32) -> Result<f32, CalcError> {
        Evaluator::new().evaluate(self, x)
    }
}

/// Compiles an expression buffer
pub fn compile(expr: &[u8]) -> Result<Program, CalcError> {
    Compiler::new().run(expr).map_err(|err| {
        debug!("compile failed: {:?}", err);
        err
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Paren,
    Op(Operator),
}

struct Compiler {
    program: Program,
    ops: Vec<Pending, OPERATOR_STACK_CAPACITY>,
    /// Last token was a value or `)`, so `-` means subtraction
    after_operand: bool,
}

impl Compiler {
    fn new() -> Self {
        Self {
            program: Program::default(),
            ops: Vec::new(),
            after_operand: false,
        }
    }

    fn run(mut self, expr: &[u8]) -> Result<Program, CalcError> {
        let mut i = 0;
        while i < expr.len() {
            let byte = expr[i];

            if byte.is_ascii_digit() || byte == glyph::DECIMAL_POINT {
                let (value, end) = scan_number(expr, i)?;
                self.emit_literal(value)?;
                i = end;
                continue;
            }

            if is_name_byte(byte) {
                let end = expr[i..]
                    .iter()
                    .position(|&b| !is_name_byte(b))
                    .map_or(expr.len(), |n| i + n);
                let op = Operator::from_name(&expr[i..end]).ok_or(CalcError::Syntax)?;
                if expr.get(end) != Some(&glyph::OPEN_PAREN) {
                    return Err(CalcError::Syntax);
                }
                self.push_operator(op)?;
                i = end;
                continue;
            }

            match byte {
                glyph::PI => self.emit_literal(PI)?,
                glyph::VARIABLE => self.emit_operand(Token::Variable)?,
                glyph::OPEN_PAREN => {
                    self.push(Pending::Paren)?;
                    self.after_operand = false;
                }
                glyph::CLOSE_PAREN => self.close_paren()?,
                glyph::SUB if !self.after_operand => self.push_operator(Operator::Negate)?,
                _ => {
                    let op = Operator::from_symbol(byte).ok_or(CalcError::Syntax)?;
                    self.push_operator(op)?;
                }
            }
            i += 1;
        }

        while let Some(pending) = self.ops.pop() {
            match pending {
                // unclosed '('
                Pending::Paren => return Err(CalcError::Syntax),
                Pending::Op(op) => self.emit(Token::Op(op))?,
            }
        }
        Ok(self.program)
    }

    fn emit(&mut self, token: Token) -> Result<(), CalcError> {
        if self.program.tokens.len() + 1 >= TOKEN_CAPACITY {
            return Err(CalcError::NoMemory);
        }
        self.program
            .tokens
            .push(token)
            .map_err(|_| CalcError::NoMemory)
    }

    fn emit_operand(&mut self, token: Token) -> Result<(), CalcError> {
        self.emit(token)?;
        self.after_operand = true;
        Ok(())
    }

    fn emit_literal(&mut self, value: f32) -> Result<(), CalcError> {
        if self.program.literals.len() + 1 >= LITERAL_CAPACITY {
            return Err(CalcError::NoMemory);
        }
        self.emit_operand(Token::Number)?;
        self.program
            .literals
            .push(value)
            .map_err(|_| CalcError::NoMemory)
    }

    fn push(&mut self, pending: Pending) -> Result<(), CalcError> {
        if self.ops.len() + 1 >= OPERATOR_STACK_CAPACITY {
            return Err(CalcError::NoMemory);
        }
        self.ops.push(pending).map_err(|_| CalcError::NoMemory)
    }

    fn push_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        while let Some(&Pending::Op(top)) = self.ops.last() {
            if top.precedence() > op.precedence() {
                break;
            }
            self.ops.pop();
            self.emit(Token::Op(top))?;
        }
        self.push(Pending::Op(op))?;
        self.after_operand = false;
        Ok(())
    }

    fn close_paren(&mut self) -> Result<(), CalcError> {
        loop {
            match self.ops.pop() {
                None => return Err(CalcError::Syntax),
                Some(Pending::Paren) => break,
                Some(Pending::Op(op)) => self.emit(Token::Op(op))?,
            }
        }
        self.after_operand = true;
        Ok(())
    }
}

/// Scans the number starting at `start`
///
/// Returns the value and the index just past the number.
fn scan_number(expr: &[u8], start: usize) -> Result<(f32, usize), CalcError> {
    let mut end = start;
    let mut seen_point = false;
    let mut digits = 0;
    while let Some(&byte) = expr.get(end) {
        if byte == glyph::DECIMAL_POINT {
            if seen_point {
                return Err(CalcError::Syntax);
            }
            seen_point = true;
        } else if byte.is_ascii_digit() {
            digits += 1;
        } else {
            break;
        }
        end += 1;
    }
    if digits == 0 {
        return Err(CalcError::Syntax);
    }

    let mut value = 0.0f32;
    let mut scale = 1.0f32;
    let mut fraction = false;
    for &byte in &expr[start..end] {
        if byte == glyph::DECIMAL_POINT {
            fraction = true;
            continue;
        }
        value = value * 10.0 + f32::from(byte - b'0');
        if fraction {
            scale *= 10.0;
        }
    }
    Ok((value / scale, end))
}

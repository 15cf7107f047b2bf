//! Postfix stack machine

use heapless::Vec;
use log::debug;

use crate::compiler::Program;
use crate::error::CalcError;
use crate::token::{Operator, Token};

/// Operand stack capacity
pub const OPERAND_STACK_CAPACITY: usize = 32;

/// Runs compiled programs
///
/// The operand stack is cleared at the start of every run, so one evaluator
/// can be reused for a whole table of samples.
#[derive(Debug, Default)]
pub struct Evaluator {
    stack: Vec<f32, OPERAND_STACK_CAPACITY>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Evaluates `program` with the free variable bound to `x`
    ///
    /// Trigonometric functions work in degrees and `log` is the natural
    /// logarithm.
    pub fn evaluate(&mut self, program: &Program, x: f32) -> Result<f32, CalcError> {
        self.run(program, x).map_err(|err| {
            debug!("evaluation at x={} failed: {:?}", x, err);
            err
        })
    }

    fn run(&mut self, program: &Program, x: f32) -> Result<f32, CalcError> {
        self.stack.clear();
        let mut literals = program.literals().iter().copied();

        for &token in program.tokens() {
            let value = match token {
                Token::Number => literals.next().ok_or(CalcError::Syntax)?,
                Token::Variable => x,
                Token::Op(op) => self.apply(op)?,
            };
            self.push(value)?;
        }

        if self.stack.len() != 1 {
            return Err(CalcError::Syntax);
        }
        self.stack.pop().ok_or(CalcError::Syntax)
    }

    fn push(&mut self, value: f32) -> Result<(), CalcError> {
        if self.stack.len() + 1 >= OPERAND_STACK_CAPACITY {
            return Err(CalcError::NoMemory);
        }
        self.stack.push(value).map_err(|_| CalcError::NoMemory)
    }

    fn pop(&mut self) -> Result<f32, CalcError> {
        // underflow means the stream was malformed
        self.stack.pop().ok_or(CalcError::Syntax)
    }

    fn apply(&mut self, op: Operator) -> Result<f32, CalcError> {
        if self.stack.len() < op.arity() {
            return Err(CalcError::Syntax);
        }
        if op.is_prefix() {
            let operand = self.pop()?;
            apply_unary(op, operand)
        } else {
            let right = self.pop()?;
            let left = self.pop()?;
            apply_binary(op, left, right)
        }
    }
}

fn apply_unary(op: Operator, v: f32) -> Result<f32, CalcError> {
    let result = match op {
        Operator::Negate => -v,
        Operator::Log => v.ln(),
        Operator::Sin => v.to_radians().sin(),
        Operator::Cos => v.to_radians().cos(),
        Operator::Tan => v.to_radians().tan(),
        Operator::Asin => unit_interval(v)?.asin().to_degrees(),
        Operator::Acos => unit_interval(v)?.acos().to_degrees(),
        Operator::Atan => v.atan().to_degrees(),
        _ => return Err(CalcError::Syntax),
    };
    Ok(result)
}

fn apply_binary(op: Operator, left: f32, right: f32) -> Result<f32, CalcError> {
    let result = match op {
        Operator::Add => left + right,
        Operator::Sub => left - right,
        Operator::Mul => left * right,
        Operator::Div => {
            if right == 0.0 {
                return Err(CalcError::Math);
            }
            left / right
        }
        Operator::Pow => left.powf(right),
        _ => return Err(CalcError::Syntax),
    };
    Ok(result)
}

fn unit_interval(v: f32) -> Result<f32, CalcError> {
    if (-1.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(CalcError::Math)
    }
}

//! # Calc Engine
//!
//! Expression compiler and evaluator for the keypad calculator.
//!
//! ## Philosophy
//!
//! - **Bounded**: Every stack and stream has a fixed capacity; overflowing one
//!   is a reported error, never a reallocation
//! - **Pure**: Compiling and evaluating have no state that outlives the call
//! - **Single precision**: All values are `f32`
//!
//! ## Design
//!
//! - `compile`: tokenizer + shunting-yard, producing a postfix `Program`
//! - `Evaluator`: operand-stack machine running a `Program` for a given `x`
//! - `CalcError`: the four error kinds and their screen messages

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod token;

pub use compiler::{compile, Program, LITERAL_CAPACITY, OPERATOR_STACK_CAPACITY, TOKEN_CAPACITY};
pub use error::{CalcError, ERROR_MESSAGES};
pub use evaluator::{Evaluator, OPERAND_STACK_CAPACITY};
pub use token::{Operator, Token, FUNCTIONS};

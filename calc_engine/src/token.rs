//! Postfix tokens and operator properties

use hal::glyph;

/// One entry of a compiled postfix stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Next value from the literal stream
    Number,
    /// The free variable
    Variable,
    Op(Operator),
}

/// Operators, including the prefix functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Negate,
    Log,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    /// Binding strength; lower binds tighter
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 3,
            Operator::Mul | Operator::Div => 2,
            Operator::Pow => 1,
            _ => 0,
        }
    }

    /// Number of operands consumed
    pub const fn arity(self) -> usize {
        if self.is_prefix() {
            1
        } else {
            2
        }
    }

    /// Negation and functions, written before their operand
    pub const fn is_prefix(self) -> bool {
        matches!(
            self,
            Operator::Negate
                | Operator::Log
                | Operator::Sin
                | Operator::Cos
                | Operator::Tan
                | Operator::Asin
                | Operator::Acos
                | Operator::Atan
        )
    }

    /// Binary operator written as `byte`
    pub const fn from_symbol(byte: u8) -> Option<Self> {
        match byte {
            glyph::ADD => Some(Operator::Add),
            glyph::SUB => Some(Operator::Sub),
            glyph::MUL => Some(Operator::Mul),
            glyph::DIV => Some(Operator::Div),
            glyph::POW => Some(Operator::Pow),
            _ => None,
        }
    }

    /// Function called `name`
    pub fn from_name(name: &[u8]) -> Option<Self> {
        FUNCTIONS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, op)| op)
    }
}

/// Function names as typed into the expression
pub const FUNCTIONS: [(&[u8], Operator); 7] = [
    (b"sin", Operator::Sin),
    (b"cos", Operator::Cos),
    (b"tan", Operator::Tan),
    (b"asin", Operator::Asin),
    (b"acos", Operator::Acos),
    (b"atan", Operator::Atan),
    (b"log", Operator::Log),
];

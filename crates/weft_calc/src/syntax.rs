//! Node kinds and payloads of the calculator trees.

use std::fmt;

use serde::{Serialize, Serializer};
use weft_ast::Tree;

/// Node kinds produced by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxKind {
    Calculator,
    Bracket,
    Number,
    Operator,
    Name,
}

/// Node kinds produced by the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExprKind {
    Calculator,
    /// Operands bound tighter than their surroundings; carries a [`Literal::Level`].
    Group,
    Bracket,
    /// A name applied to a bracket; carries a [`Literal::Name`].
    Function,
    /// A name not followed by a bracket.
    Variable,
    Number,
    Operator,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    /// Parses an operator character.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    /// Returns the character this operator is written as.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    /// Returns the binding strength of this operator.
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Additive,
            Self::Mul | Self::Div => Precedence::Multiplicative,
            Self::Pow => Precedence::Exponent,
        }
    }
}

/// Operator binding strength, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precedence {
    Additive,
    Multiplicative,
    Exponent,
}

impl Precedence {
    /// Returns the next tighter level.
    pub fn tighter(self) -> Option<Self> {
        match self {
            Self::Additive => Some(Self::Multiplicative),
            Self::Multiplicative => Some(Self::Exponent),
            Self::Exponent => None,
        }
    }
}

/// Scalar payload shared by both trees.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Operator(Operator),
    Name(String),
    Level(Precedence),
}

impl Literal {
    /// Returns the operator, if this is one.
    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the name, if this is one.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// Tree produced by [`read`](crate::read).
pub type SyntaxTree = Tree<SyntaxKind, Literal>;

/// Tree produced by [`transform`](crate::transform).
pub type ExprTree = Tree<ExprKind, Literal>;

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Calculator => "calculator",
            Self::Bracket => "bracket",
            Self::Number => "number",
            Self::Operator => "operator",
            Self::Name => "name",
        })
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Calculator => "calculator",
            Self::Group => "group",
            Self::Bracket => "bracket",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Number => "number",
            Self::Operator => "operator",
        })
    }
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Additive => "additive",
            Self::Multiplicative => "multiplicative",
            Self::Exponent => "exponent",
        })
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Operator(op) => write!(f, "{}", op.symbol()),
            Self::Name(name) => f.write_str(name),
            Self::Level(level) => write!(f, "{level}"),
        }
    }
}

impl Serialize for Literal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::Operator(op) => serializer.serialize_char(op.symbol()),
            Self::Name(name) => serializer.serialize_str(name),
            Self::Level(level) => level.serialize(serializer),
        }
    }
}

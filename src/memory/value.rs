//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the tagged result of evaluating
//! any expression. Every expression yields exactly one `Value`; there is no
//! null, no implicit coercion between the two tags, and arrays are never
//! first-class values (they live only in environment cells).

use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    /// Get the integer value, returns None if not an Int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the boolean value, returns None if not a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The tag name used in type-mismatch diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "boolean",
        }
    }
}

/// The textual form used by `print`: ints in decimal, booleans as
/// `true`/`false`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

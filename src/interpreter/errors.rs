//! Runtime error types for the Imp interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can
//! occur during program execution (as opposed to parse errors).
//!
//! All runtime errors are fatal: they abort the run and are surfaced to the
//! caller verbatim. The interpreted language has no exception-handling
//! construct, so there is no recoverable path inside a program.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Read of a name with no value: never declared, or declared but never
    /// assigned, or indexed as an array when it is not one
    UnboundVariable {
        name: String,
        location: SourceLocation,
    },

    /// Operand or assigned value carries the wrong tag
    TypeMismatch {
        expected: String,
        got: String,
        location: SourceLocation,
    },

    /// Division or modulo with a zero right operand
    DivisionByZero {
        operation: String,
        location: SourceLocation,
    },

    /// Array index outside the declared length
    IndexOutOfBounds {
        index: i64,
        length: usize,
        location: SourceLocation,
    },

    /// Structurally valid operand with an unusable value (negative exponent)
    InvalidOperand {
        message: String,
        location: SourceLocation,
    },

    /// Integer overflow in an arithmetic operation
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// A `break` executed with no enclosing loop to absorb it
    BreakOutsideLoop { location: SourceLocation },

    /// The configured statement cap was exhausted (test harness use only;
    /// unlimited by default)
    StepLimitExceeded { limit: u64 },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::UnboundVariable { location, .. } => Some(location),
            RuntimeError::TypeMismatch { location, .. } => Some(location),
            RuntimeError::DivisionByZero { location, .. } => Some(location),
            RuntimeError::IndexOutOfBounds { location, .. } => Some(location),
            RuntimeError::InvalidOperand { location, .. } => Some(location),
            RuntimeError::IntegerOverflow { location, .. } => Some(location),
            RuntimeError::BreakOutsideLoop { location } => Some(location),
            RuntimeError::StepLimitExceeded { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UnboundVariable { name, location } => {
                write!(
                    f,
                    "Unbound variable '{}' at line {}",
                    name, location.line
                )
            }
            RuntimeError::TypeMismatch {
                expected,
                got,
                location,
            } => {
                write!(
                    f,
                    "Type mismatch at line {}: expected {}, got {}",
                    location.line, expected, got
                )
            }
            RuntimeError::DivisionByZero {
                operation,
                location,
            } => {
                write!(
                    f,
                    "Division by zero in '{}' at line {}",
                    operation, location.line
                )
            }
            RuntimeError::IndexOutOfBounds {
                index,
                length,
                location,
            } => {
                write!(
                    f,
                    "Index out of bounds at line {}: index {} out of bounds for length {}",
                    location.line, index, length
                )
            }
            RuntimeError::InvalidOperand { message, location } => {
                write!(f, "Invalid operand at line {}: {}", location.line, message)
            }
            RuntimeError::IntegerOverflow {
                operation,
                location,
            } => {
                write!(
                    f,
                    "Integer overflow in operation: {} at line {}",
                    operation, location.line
                )
            }
            RuntimeError::BreakOutsideLoop { location } => {
                write!(
                    f,
                    "'break' outside of any loop at line {}",
                    location.line
                )
            }
            RuntimeError::StepLimitExceeded { limit } => {
                write!(f, "Statement limit exceeded: {} statements executed", limit)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

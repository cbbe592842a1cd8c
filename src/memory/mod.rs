//! The interpreter's memory model
//!
//! - [`value`]: tagged runtime values ([`value::Value`])
//! - [`environment`]: the flat, run-scoped identifier table
//!   ([`environment::Environment`])
//!
//! There is no heap and no call stack: the language has no functions and no
//! dynamic allocation, so all state lives in a single table of named cells.

pub mod environment;
pub mod value;

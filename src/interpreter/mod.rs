//! Imp interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the [`engine::Interpreter`] struct and the `run()` entry
//!   point
//! - [`statements`]: statement execution and the
//!   [`statements::ControlSignal`] break-propagation type
//! - [`expressions`]: pure expression evaluation
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! The interpreter walks the AST depth-first, one pass, to completion or to
//! the first runtime error. Statements return a control signal (so `break`
//! can travel to its nearest enclosing loop); expressions return a tagged
//! value and are free of side effects.

pub mod engine;
pub mod errors;
pub mod expressions;
pub mod statements;

//! # Introduction
//!
//! `impish` parses and executes *Imp*, a small C-like imperative language
//! with integers, booleans, fixed-size int arrays, `if`/`else`, `while`,
//! `do`-`while`, `break`, and `print`.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter → printed lines
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an AST with a
//!    hand-written recursive descent parser.
//! 2. [`interpreter`] — walks the AST, threading a control signal through
//!    statements and a tagged value through expressions.
//! 3. [`memory`] — the runtime state: tagged [`memory::value::Value`]s in a
//!    single flat [`memory::environment::Environment`] scoped to one run.
//!
//! ## Example
//!
//! ```
//! use impish::interpreter::engine::Interpreter;
//! use impish::parser::parser::Parser;
//!
//! let mut parser = Parser::new("{ int x; x = 3; print(x + 2); }").unwrap();
//! let program = parser.parse_program().unwrap();
//!
//! let mut interpreter = Interpreter::new(program);
//! interpreter.run().unwrap();
//! assert_eq!(interpreter.output(), ["5"]);
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;

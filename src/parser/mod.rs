//! Imp source code parser
//!
//! This module transforms Imp source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # The Imp Language
//!
//! A small C-like imperative language:
//! - Types: `int`, `boolean`, fixed-size `int` arrays
//! - Statements: `if`/`else`, `while`, `do`-`while`, `break`, `print`,
//!   assignment, nested blocks
//! - Expressions: arithmetic (`+ - * / % ^`), relational
//!   (`< <= > >= == !=`), logical (`&& || !`)
//!
//! A program is a single block; declarations sit at the head of each block.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one production method per
//! grammar rule and one-token lookahead. No external parser generator
//! dependencies. The parser stops at the first malformed construct; it never
//! returns a partial AST.

pub mod ast;
pub mod lexer;
pub mod parser;

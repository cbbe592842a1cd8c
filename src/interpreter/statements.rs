//! Statement execution
//!
//! Interpreting a statement yields a [`ControlSignal`] rather than a value:
//! either the statement fell through normally, or a `break` is travelling
//! upward looking for its nearest enclosing loop. Only loops absorb the
//! signal; everything else passes it through.
//!
//! All statement execution methods are `pub(crate)` methods on the
//! [`Interpreter`] struct so they can reach the environment and the output
//! buffer.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::environment::Cell;
use crate::memory::value::Value;
use crate::parser::ast::*;

/// Out-of-band result of interpreting a statement
///
/// `Break` carries the location of the originating `break` statement so
/// that a signal escaping the whole program can be reported accurately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Fall through to the next statement
    Normal,
    /// Terminate the innermost enclosing loop
    Break(SourceLocation),
}

impl Interpreter {
    /// Execute a block: declarations first, then statements in order.
    ///
    /// Stops early and propagates `Break` upward if any statement yields it.
    pub(crate) fn execute_block(&mut self, block: &Block) -> Result<ControlSignal, RuntimeError> {
        for decl in &block.decls {
            self.env.declare(&decl.name, &decl.var_type);
        }

        for stmt in &block.stmts {
            if let ControlSignal::Break(loc) = self.execute_statement(stmt)? {
                return Ok(ControlSignal::Break(loc));
            }
        }

        Ok(ControlSignal::Normal)
    }

    /// Execute a single statement
    pub(crate) fn execute_statement(&mut self, stmt: &Stmt) -> Result<ControlSignal, RuntimeError> {
        self.tick()?;

        match stmt {
            Stmt::If {
                condition,
                then_branch,
                location,
            } => self.execute_if(condition, then_branch, None, *location),

            Stmt::IfElse {
                condition,
                then_branch,
                else_branch,
                location,
            } => self.execute_if(condition, then_branch, Some(else_branch), *location),

            Stmt::While {
                condition,
                body,
                location,
            } => self.execute_while(condition, body, *location),

            Stmt::DoWhile {
                body,
                condition,
                location,
            } => self.execute_do_while(body, condition, *location),

            Stmt::Break { location } => Ok(ControlSignal::Break(*location)),

            Stmt::Print { expr, .. } => self.execute_print(expr),

            Stmt::Assign {
                name,
                value,
                location,
            } => self.execute_assign(name, value, *location),

            Stmt::AssignElement {
                name,
                index,
                value,
                location,
            } => self.execute_assign_element(name, index, value, *location),

            Stmt::Block(block) => self.execute_block(block),
        }
    }

    /// Execute if / if-else
    ///
    /// The condition must be boolean. A `Break` inside either branch
    /// propagates; only loops absorb it.
    fn execute_if(
        &mut self,
        condition: &Expr,
        then_branch: &Block,
        else_branch: Option<&Block>,
        location: SourceLocation,
    ) -> Result<ControlSignal, RuntimeError> {
        if self.condition_value(condition, location)? {
            self.execute_block(then_branch)
        } else if let Some(else_block) = else_branch {
            self.execute_block(else_block)
        } else {
            Ok(ControlSignal::Normal)
        }
    }

    /// Execute while: re-check the condition before every iteration.
    ///
    /// A `Break` from the body is absorbed here and the loop yields
    /// `Normal` to its parent.
    fn execute_while(
        &mut self,
        condition: &Expr,
        body: &Block,
        location: SourceLocation,
    ) -> Result<ControlSignal, RuntimeError> {
        while self.condition_value(condition, location)? {
            self.tick()?;
            if let ControlSignal::Break(_) = self.execute_block(body)? {
                break;
            }
        }

        Ok(ControlSignal::Normal)
    }

    /// Execute do-while: the body runs once before the first condition check.
    fn execute_do_while(
        &mut self,
        body: &Block,
        condition: &Expr,
        location: SourceLocation,
    ) -> Result<ControlSignal, RuntimeError> {
        loop {
            self.tick()?;
            if let ControlSignal::Break(_) = self.execute_block(body)? {
                break;
            }
            if !self.condition_value(condition, location)? {
                break;
            }
        }

        Ok(ControlSignal::Normal)
    }

    /// Execute print: append the value's textual form to the run's output
    fn execute_print(&mut self, expr: &Expr) -> Result<ControlSignal, RuntimeError> {
        let value = self.evaluate_expr(expr)?;
        self.output.push(value.to_string());
        Ok(ControlSignal::Normal)
    }

    /// Execute scalar assignment
    ///
    /// If the name is already bound, the new value's tag must match the
    /// cell's declared type; otherwise a fresh scalar cell is bound.
    fn execute_assign(
        &mut self,
        name: &str,
        value: &Expr,
        location: SourceLocation,
    ) -> Result<ControlSignal, RuntimeError> {
        let value = self.evaluate_expr(value)?;

        match self.env.cell_mut(name) {
            Some(Cell::Int(slot)) => match value.as_int() {
                Some(n) => *slot = Some(n),
                None => {
                    return Err(RuntimeError::TypeMismatch {
                        expected: "int".to_string(),
                        got: value.type_name().to_string(),
                        location,
                    });
                }
            },
            Some(Cell::Bool(slot)) => match value.as_bool() {
                Some(b) => *slot = Some(b),
                None => {
                    return Err(RuntimeError::TypeMismatch {
                        expected: "boolean".to_string(),
                        got: value.type_name().to_string(),
                        location,
                    });
                }
            },
            Some(cell @ Cell::IntArray(_)) => {
                return Err(RuntimeError::TypeMismatch {
                    expected: cell.type_name().to_string(),
                    got: value.type_name().to_string(),
                    location,
                });
            }
            None => {
                let cell = match value {
                    Value::Int(n) => Cell::Int(Some(n)),
                    Value::Bool(b) => Cell::Bool(Some(b)),
                };
                self.env.bind(name.to_string(), cell);
            }
        }

        Ok(ControlSignal::Normal)
    }

    /// Execute array element assignment: bounds-check, then mutate in place
    fn execute_assign_element(
        &mut self,
        name: &str,
        index: &Expr,
        value: &Expr,
        location: SourceLocation,
    ) -> Result<ControlSignal, RuntimeError> {
        let index = self.evaluate_index(index)?;
        let value = self.evaluate_expr(value)?;

        let new = value.as_int().ok_or_else(|| RuntimeError::TypeMismatch {
            expected: "int".to_string(),
            got: value.type_name().to_string(),
            location,
        })?;

        let Some(Cell::IntArray(elements)) = self.env.cell_mut(name) else {
            return Err(RuntimeError::UnboundVariable {
                name: name.to_string(),
                location,
            });
        };

        let length = elements.len();
        if index < 0 || index as usize >= length {
            return Err(RuntimeError::IndexOutOfBounds {
                index,
                length,
                location,
            });
        }

        elements[index as usize] = new;
        Ok(ControlSignal::Normal)
    }
}

//! The run-scoped identifier table
//!
//! [`Environment`] maps identifiers to [`Cell`]s for the duration of one
//! program run. The table is flat: the language's blocks do not open new
//! scopes, so every declaration in the program lands here. The environment
//! is created empty, owned exclusively by the interpreter, mutated only by
//! assignment statements, and dropped when the run ends.

use crate::parser::ast::Type;
use rustc_hash::FxHashMap;

/// One environment slot.
///
/// A declaration reserves a typed cell; scalar cells stay unassigned
/// (`None`) until the first assignment, so reading them is indistinguishable
/// from reading an unbound name. Array cells get zero-filled backing storage
/// immediately, since element assignment and bounds checks need the declared
/// length from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Int(Option<i64>),
    Bool(Option<bool>),
    IntArray(Vec<i64>),
}

impl Cell {
    /// The tag name used in type-mismatch diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Int(_) => "int",
            Cell::Bool(_) => "boolean",
            Cell::IntArray(_) => "int array",
        }
    }
}

/// Flat mapping from identifier to value cell
#[derive(Debug, Clone, Default)]
pub struct Environment {
    cells: FxHashMap<String, Cell>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Reserve a cell for a declared variable. Re-declaring a name replaces
    /// its cell.
    pub fn declare(&mut self, name: &str, var_type: &Type) {
        let cell = match var_type {
            Type::Int => Cell::Int(None),
            Type::Boolean => Cell::Bool(None),
            Type::IntArray(len) => Cell::IntArray(vec![0; *len]),
        };
        self.cells.insert(name.to_string(), cell);
    }

    /// Bind a cell directly (used when assignment targets an undeclared name)
    pub fn bind(&mut self, name: String, cell: Cell) {
        self.cells.insert(name, cell);
    }

    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    pub fn cell_mut(&mut self, name: &str) -> Option<&mut Cell> {
        self.cells.get_mut(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_scalars_start_unassigned() {
        let mut env = Environment::new();
        env.declare("x", &Type::Int);
        env.declare("b", &Type::Boolean);

        assert_eq!(env.cell("x"), Some(&Cell::Int(None)));
        assert_eq!(env.cell("b"), Some(&Cell::Bool(None)));
        assert_eq!(env.cell("missing"), None);
    }

    #[test]
    fn test_declared_arrays_are_zero_filled() {
        let mut env = Environment::new();
        env.declare("a", &Type::IntArray(3));

        assert_eq!(env.cell("a"), Some(&Cell::IntArray(vec![0, 0, 0])));
    }

    #[test]
    fn test_bind_overwrites() {
        let mut env = Environment::new();
        env.bind("x".to_string(), Cell::Int(Some(1)));
        env.bind("x".to_string(), Cell::Int(Some(2)));

        assert_eq!(env.cell("x"), Some(&Cell::Int(Some(2))));
    }
}

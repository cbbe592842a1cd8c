//! Expression evaluation
//!
//! Expressions are pure: evaluating one never touches the environment except
//! to read it, so every method here takes `&self`. Operands are always
//! evaluated eagerly, left before right, including both sides of `&&` and
//! `||`. There is no short-circuiting.
//!
//! All arithmetic is checked; overflow is an error, not a wrap.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::environment::Cell;
use crate::memory::value::Value;
use crate::parser::ast::*;

impl Interpreter {
    /// Evaluate an expression to a tagged value
    pub(crate) fn evaluate_expr(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntLiteral(n, _) => Ok(Value::Int(*n)),
            Expr::BoolLiteral(b, _) => Ok(Value::Bool(*b)),
            Expr::Variable(name, location) => self.evaluate_variable(name, *location),
            Expr::Unary {
                op,
                operand,
                location,
            } => self.evaluate_unary(*op, operand, *location),
            Expr::Binary {
                op,
                left,
                right,
                location,
            } => self.evaluate_binary(*op, left, right, *location),
            Expr::Logical {
                op,
                left,
                right,
                location,
            } => self.evaluate_logical(*op, left, right, *location),
            Expr::Relational {
                op,
                left,
                right,
                location,
            } => self.evaluate_relational(*op, left, right, *location),
            Expr::ArrayAccess {
                name,
                index,
                location,
            } => self.evaluate_array_access(name, index, *location),
        }
    }

    /// Evaluate a loop or branch condition, which must be boolean
    pub(crate) fn condition_value(
        &self,
        condition: &Expr,
        location: SourceLocation,
    ) -> Result<bool, RuntimeError> {
        let value = self.evaluate_expr(condition)?;
        value.as_bool().ok_or_else(|| RuntimeError::TypeMismatch {
            expected: "boolean".to_string(),
            got: value.type_name().to_string(),
            location,
        })
    }

    /// Evaluate an array index expression, which must be an int
    pub(crate) fn evaluate_index(&self, index: &Expr) -> Result<i64, RuntimeError> {
        let value = self.evaluate_expr(index)?;
        value.as_int().ok_or_else(|| RuntimeError::TypeMismatch {
            expected: "int".to_string(),
            got: value.type_name().to_string(),
            location: index.location(),
        })
    }

    /// Look up a scalar variable
    ///
    /// Declared-but-never-assigned cells read as unbound; using an array
    /// name as a scalar is a type mismatch.
    fn evaluate_variable(
        &self,
        name: &str,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match self.env.cell(name) {
            Some(Cell::Int(Some(n))) => Ok(Value::Int(*n)),
            Some(Cell::Bool(Some(b))) => Ok(Value::Bool(*b)),
            Some(Cell::Int(None)) | Some(Cell::Bool(None)) | None => {
                Err(RuntimeError::UnboundVariable {
                    name: name.to_string(),
                    location,
                })
            }
            Some(cell @ Cell::IntArray(_)) => Err(RuntimeError::TypeMismatch {
                expected: "int or boolean".to_string(),
                got: cell.type_name().to_string(),
                location,
            }),
        }
    }

    /// Evaluate unary `-` (int) and `!` (boolean)
    fn evaluate_unary(
        &self,
        op: UnOp,
        operand: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let value = self.evaluate_expr(operand)?;

        match op {
            UnOp::Neg => {
                let n = self.expect_int(&value, location)?;
                n.checked_neg()
                    .ok_or(RuntimeError::IntegerOverflow {
                        operation: format!("-{}", n),
                        location,
                    })
                    .map(Value::Int)
            }
            UnOp::Not => {
                let b = self.expect_bool(&value, location)?;
                Ok(Value::Bool(!b))
            }
        }
    }

    /// Evaluate binary arithmetic; both operands eagerly, left before right
    fn evaluate_binary(
        &self,
        op: BinOp,
        left: &Expr,
        right: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let left_val = self.evaluate_expr(left)?;
        let right_val = self.evaluate_expr(right)?;

        let a = self.expect_int(&left_val, location)?;
        let b = self.expect_int(&right_val, location)?;

        let result = match op {
            BinOp::Add => a.checked_add(b),
            BinOp::Sub => a.checked_sub(b),
            BinOp::Mul => a.checked_mul(b),
            BinOp::Div => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero {
                        operation: format!("{} / {}", a, b),
                        location,
                    });
                }
                a.checked_div(b)
            }
            BinOp::Mod => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero {
                        operation: format!("{} % {}", a, b),
                        location,
                    });
                }
                a.checked_rem(b)
            }
            BinOp::Pow => {
                if b < 0 {
                    return Err(RuntimeError::InvalidOperand {
                        message: format!("exponent must be non-negative, got {}", b),
                        location,
                    });
                }
                u32::try_from(b)
                    .ok()
                    .and_then(|exp| a.checked_pow(exp))
            }
        };

        result
            .ok_or(RuntimeError::IntegerOverflow {
                operation: format!("{} {} {}", a, op, b),
                location,
            })
            .map(Value::Int)
    }

    /// Evaluate `&&` / `||`: both operands are always evaluated
    fn evaluate_logical(
        &self,
        op: LogicOp,
        left: &Expr,
        right: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let left_val = self.evaluate_expr(left)?;
        let right_val = self.evaluate_expr(right)?;

        let a = self.expect_bool(&left_val, location)?;
        let b = self.expect_bool(&right_val, location)?;

        let result = match op {
            LogicOp::And => a && b,
            LogicOp::Or => a || b,
        };

        Ok(Value::Bool(result))
    }

    /// Evaluate relational and equality operators
    ///
    /// Ordering requires ints on both sides; `==`/`!=` compare values of
    /// the same tag, either tag.
    fn evaluate_relational(
        &self,
        op: RelOp,
        left: &Expr,
        right: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let left_val = self.evaluate_expr(left)?;
        let right_val = self.evaluate_expr(right)?;

        let result = match op {
            RelOp::Lt | RelOp::Le | RelOp::Gt | RelOp::Ge => {
                let a = self.expect_int(&left_val, location)?;
                let b = self.expect_int(&right_val, location)?;
                match op {
                    RelOp::Lt => a < b,
                    RelOp::Le => a <= b,
                    RelOp::Gt => a > b,
                    RelOp::Ge => a >= b,
                    _ => unreachable!(),
                }
            }
            RelOp::Eq | RelOp::Ne => {
                let equal = match (left_val, right_val) {
                    (Value::Int(a), Value::Int(b)) => a == b,
                    (Value::Bool(a), Value::Bool(b)) => a == b,
                    (a, b) => {
                        return Err(RuntimeError::TypeMismatch {
                            expected: a.type_name().to_string(),
                            got: b.type_name().to_string(),
                            location,
                        });
                    }
                };
                match op {
                    RelOp::Eq => equal,
                    _ => !equal,
                }
            }
        };

        Ok(Value::Bool(result))
    }

    /// Evaluate an array element read: the name must hold an array cell and
    /// the index must be inside the declared length
    fn evaluate_array_access(
        &self,
        name: &str,
        index: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let index = self.evaluate_index(index)?;

        let Some(Cell::IntArray(elements)) = self.env.cell(name) else {
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

        Ok(Value::Int(elements[index as usize]))
    }

    fn expect_int(&self, value: &Value, location: SourceLocation) -> Result<i64, RuntimeError> {
        value.as_int().ok_or_else(|| RuntimeError::TypeMismatch {
            expected: "int".to_string(),
            got: value.type_name().to_string(),
            location,
        })
    }

    fn expect_bool(&self, value: &Value, location: SourceLocation) -> Result<bool, RuntimeError> {
        value.as_bool().ok_or_else(|| RuntimeError::TypeMismatch {
            expected: "boolean".to_string(),
            got: value.type_name().to_string(),
            location,
        })
    }
}

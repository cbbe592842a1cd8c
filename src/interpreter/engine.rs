// Execution engine for the Imp interpreter

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::statements::ControlSignal;
use crate::memory::environment::Environment;
use crate::parser::ast::Program;

/// The main interpreter that executes an Imp program
///
/// Owns the environment and the collected `print` output for exactly one
/// run. Execution is single-threaded and fully synchronous: the program
/// either runs to completion, stops at the first runtime error, or (with no
/// step limit configured) loops until the process is terminated.
pub struct Interpreter {
    /// Parsed program
    pub(crate) program: Program,

    /// The flat identifier table for this run
    pub(crate) env: Environment,

    /// Lines emitted by `print`, in program order
    pub(crate) output: Vec<String>,

    /// Number of statements executed so far
    pub(crate) steps: u64,

    /// Optional cap on executed statements, for bounding intentionally
    /// infinite loops in test harnesses
    pub(crate) step_limit: Option<u64>,
}

impl Interpreter {
    /// Create a new interpreter with the parsed program
    pub fn new(program: Program) -> Self {
        Interpreter {
            program,
            env: Environment::new(),
            output: Vec::new(),
            steps: 0,
            step_limit: None,
        }
    }

    /// Create an interpreter that aborts with
    /// [`RuntimeError::StepLimitExceeded`] after executing `limit`
    /// statements.
    pub fn with_step_limit(program: Program, limit: u64) -> Self {
        Interpreter {
            step_limit: Some(limit),
            ..Interpreter::new(program)
        }
    }

    /// Run the program from start to finish
    ///
    /// A `break` signal escaping the root block means the statement had no
    /// enclosing loop; it is reported on first evaluation rather than at
    /// parse time.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let block = self.program.block.clone();
        match self.execute_block(&block)? {
            ControlSignal::Normal => Ok(()),
            ControlSignal::Break(location) => Err(RuntimeError::BreakOutsideLoop { location }),
        }
    }

    /// The lines printed so far, in program order
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Count one executed statement against the configured cap
    pub(crate) fn tick(&mut self) -> Result<(), RuntimeError> {
        self.steps += 1;
        if let Some(limit) = self.step_limit {
            if self.steps > limit {
                return Err(RuntimeError::StepLimitExceeded { limit });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parser::Parser;

    fn parse(source: &str) -> Program {
        Parser::new(source)
            .expect("lexing failed")
            .parse_program()
            .expect("parsing failed")
    }

    #[test]
    fn test_run_collects_output_in_order() {
        let program = parse("{ print(1); print(2); print(3); }");
        let mut interpreter = Interpreter::new(program);
        interpreter.run().unwrap();

        assert_eq!(interpreter.output(), ["1", "2", "3"]);
    }

    #[test]
    fn test_break_escaping_the_root_block() {
        let program = parse("{ break; }");
        let mut interpreter = Interpreter::new(program);
        let err = interpreter.run().unwrap_err();

        assert!(matches!(err, RuntimeError::BreakOutsideLoop { .. }));
    }

    #[test]
    fn test_break_in_branch_outside_loop() {
        // Propagates through the `if` and still has no loop to absorb it
        let program = parse("{ if (true) { break; } }");
        let mut interpreter = Interpreter::new(program);
        let err = interpreter.run().unwrap_err();

        assert!(matches!(err, RuntimeError::BreakOutsideLoop { .. }));
    }

    #[test]
    fn test_step_limit_bounds_infinite_loop() {
        let program = parse("{ while (true) { print(0); } }");
        let mut interpreter = Interpreter::with_step_limit(program, 50);
        let err = interpreter.run().unwrap_err();

        assert_eq!(err, RuntimeError::StepLimitExceeded { limit: 50 });
        assert!(!interpreter.output().is_empty());
    }
}

// Error taxonomy tests: parse-time and evaluation-time failures

use impish::interpreter::engine::Interpreter;
use impish::interpreter::errors::RuntimeError;
use impish::parser::parser::{ParseError, Parser};

/// Parse and run a program, returning the runtime error it must produce.
fn run_err(source: &str) -> RuntimeError {
    let mut parser = Parser::new(source).expect("Parser creation failed");
    let program = parser.parse_program().expect("Parsing failed");

    let mut interpreter = Interpreter::new(program);
    interpreter
        .run()
        .expect_err("Execution unexpectedly succeeded")
}

// ===== Evaluation-time errors =====

#[test]
fn test_division_by_zero() {
    assert!(matches!(
        run_err("{ print(1 / 0); }"),
        RuntimeError::DivisionByZero { .. }
    ));
    assert!(matches!(
        run_err("{ print(0 / 0); }"),
        RuntimeError::DivisionByZero { .. }
    ));
    assert!(matches!(
        run_err("{ print(7 % 0); }"),
        RuntimeError::DivisionByZero { .. }
    ));
}

#[test]
fn test_and_evaluates_both_operands() {
    // No short-circuit: the failing right operand surfaces even though the
    // left operand alone decides the result.
    assert!(matches!(
        run_err("{ print(false && 1 / 0 == 0); }"),
        RuntimeError::DivisionByZero { .. }
    ));
}

#[test]
fn test_or_evaluates_both_operands() {
    assert!(matches!(
        run_err("{ print(true || 1 / 0 == 0); }"),
        RuntimeError::DivisionByZero { .. }
    ));
}

#[test]
fn test_unbound_variable() {
    match run_err("{ print(nope); }") {
        RuntimeError::UnboundVariable { name, .. } => assert_eq!(name, "nope"),
        other => panic!("Expected UnboundVariable, got {:?}", other),
    }
}

#[test]
fn test_declared_but_unassigned_reads_as_unbound() {
    assert!(matches!(
        run_err("{ int x; print(x); }"),
        RuntimeError::UnboundVariable { .. }
    ));
}

#[test]
fn test_index_out_of_bounds() {
    match run_err("{ int a[3]; a[0] = 1; print(a[3]); }") {
        RuntimeError::IndexOutOfBounds { index, length, .. } => {
            assert_eq!(index, 3);
            assert_eq!(length, 3);
        }
        other => panic!("Expected IndexOutOfBounds, got {:?}", other),
    }
}

#[test]
fn test_negative_index_out_of_bounds() {
    match run_err("{ int a[3]; print(a[-1]); }") {
        RuntimeError::IndexOutOfBounds { index, length, .. } => {
            assert_eq!(index, -1);
            assert_eq!(length, 3);
        }
        other => panic!("Expected IndexOutOfBounds, got {:?}", other),
    }
}

#[test]
fn test_element_assignment_out_of_bounds() {
    assert!(matches!(
        run_err("{ int a[2]; a[2] = 9; }"),
        RuntimeError::IndexOutOfBounds {
            index: 2,
            length: 2,
            ..
        }
    ));
}

#[test]
fn test_indexing_a_scalar_is_unbound() {
    // Only declared arrays can be indexed; a scalar name is "not a declared
    // array" and reads as unbound.
    assert!(matches!(
        run_err("{ int x; x = 1; print(x[0]); }"),
        RuntimeError::UnboundVariable { .. }
    ));
}

#[test]
fn test_type_mismatch_on_assignment() {
    assert!(matches!(
        run_err("{ int x; x = true; }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        run_err("{ boolean b; b = 3; }"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_type_mismatch_in_operators() {
    assert!(matches!(
        run_err("{ print(-true); }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        run_err("{ print(!3); }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        run_err("{ print(1 + true); }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        run_err("{ print(true && 1); }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        run_err("{ print(true < false); }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        run_err("{ print(1 == true); }"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_non_boolean_condition() {
    assert!(matches!(
        run_err("{ if (1) { print(0); } }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        run_err("{ while (0) { print(0); } }"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_array_name_used_as_scalar() {
    assert!(matches!(
        run_err("{ int a[2]; print(a); }"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_negative_exponent_is_invalid_operand() {
    assert!(matches!(
        run_err("{ print(2 ^ -1); }"),
        RuntimeError::InvalidOperand { .. }
    ));
}

#[test]
fn test_integer_overflow_is_detected() {
    assert!(matches!(
        run_err("{ print(2 ^ 63); }"),
        RuntimeError::IntegerOverflow { .. }
    ));
    assert!(matches!(
        run_err("{ int x; x = 9223372036854775807; print(x + 1); }"),
        RuntimeError::IntegerOverflow { .. }
    ));
}

#[test]
fn test_break_outside_loop() {
    assert!(matches!(
        run_err("{ print(1); break; }"),
        RuntimeError::BreakOutsideLoop { .. }
    ));
}

#[test]
fn test_error_aborts_at_first_failure() {
    // Nothing after the failing statement runs
    let mut parser = Parser::new("{ print(1); print(1 / 0); print(2); }").unwrap();
    let program = parser.parse_program().unwrap();

    let mut interpreter = Interpreter::new(program);
    assert!(interpreter.run().is_err());
    assert_eq!(interpreter.output(), ["1"]);
}

// ===== Parse-time errors =====

#[test]
fn test_missing_closing_paren() {
    let mut parser = Parser::new("{ print(1; }").unwrap();
    let err = parser.parse_program().unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn test_missing_condition_parens() {
    let mut parser = Parser::new("{ while true { print(1); } }").unwrap();
    let err = parser.parse_program().unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn test_do_without_trailing_semicolon() {
    let mut parser = Parser::new("{ do { print(1); } while (false) }").unwrap();
    let err = parser.parse_program().unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn test_truncated_program_is_end_of_input() {
    let mut parser = Parser::new("{ while (true) {").unwrap();
    let err = parser.parse_program().unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn test_parse_failure_reports_location() {
    let mut parser = Parser::new("{\n  x = ;\n}").unwrap();
    let err = parser.parse_program().unwrap_err();

    match err {
        ParseError::UnexpectedToken { location, .. } => {
            assert_eq!(location.line, 2);
        }
        other => panic!("Expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_unknown_character_is_a_lex_error() {
    assert!(matches!(Parser::new("{ x = 1 @ 2; }"), Err(ParseError::Lex(_))));
}

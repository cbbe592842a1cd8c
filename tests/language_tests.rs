// End-to-end scenario tests for the Imp interpreter

use impish::interpreter::engine::Interpreter;
use impish::parser::parser::Parser;
use std::fs;
use std::path::Path;

/// Parse and run a program, returning its printed lines.
fn run(source: &str) -> Vec<String> {
    let mut parser = Parser::new(source).expect("Parser creation failed");
    let program = parser.parse_program().expect("Parsing failed");

    let mut interpreter = Interpreter::new(program);
    interpreter.run().expect("Execution failed");
    interpreter.output().to_vec()
}

#[test]
fn test_round_trip_int() {
    let output = run("{ int x; x = 3; print(x + 2); }");
    assert_eq!(output, ["5"]);
}

#[test]
fn test_round_trip_boolean() {
    let output = run("{ boolean b; b = true && false; print(b); }");
    assert_eq!(output, ["false"]);
}

#[test]
fn test_array_sum() {
    let source = r#"
        {
            int a[3];
            a[0] = 1;
            a[1] = 2;
            a[2] = 3;
            print(a[1] + a[2]);
        }
    "#;
    assert_eq!(run(source), ["5"]);
}

#[test]
fn test_do_while_body_runs_before_condition() {
    let output = run("{ do { print(1); } while (false); }");
    assert_eq!(output, ["1"]);
}

#[test]
fn test_while_false_never_runs() {
    let output = run("{ while (false) { print(1); } print(2); }");
    assert_eq!(output, ["2"]);
}

#[test]
fn test_while_counts_down() {
    let source = r#"
        {
            int i;
            i = 3;
            while (i > 0) {
                print(i);
                i = i - 1;
            }
        }
    "#;
    assert_eq!(run(source), ["3", "2", "1"]);
}

#[test]
fn test_break_terminates_only_innermost_loop() {
    // The inner loop breaks immediately; the outer loop keeps iterating and
    // reaches the print each time around. A step cap bounds the
    // intentionally infinite outer loop.
    let source = r#"
        {
            while (true) {
                while (true) {
                    break;
                }
                print(1);
            }
        }
    "#;
    let mut parser = Parser::new(source).unwrap();
    let program = parser.parse_program().unwrap();

    let mut interpreter = Interpreter::with_step_limit(program, 200);
    let err = interpreter.run().unwrap_err();

    assert!(matches!(
        err,
        impish::interpreter::errors::RuntimeError::StepLimitExceeded { limit: 200 }
    ));
    // The break did not escape the outer loop: 1 was printed, repeatedly.
    assert!(!interpreter.output().is_empty());
    assert!(interpreter.output().iter().all(|line| line == "1"));
}

#[test]
fn test_break_exits_loop_once() {
    let source = r#"
        {
            while (true) {
                while (true) {
                    break;
                }
                print(1);
                break;
            }
            print(2);
        }
    "#;
    assert_eq!(run(source), ["1", "2"]);
}

#[test]
fn test_break_inside_if_terminates_loop() {
    let source = r#"
        {
            int i;
            i = 0;
            while (true) {
                i = i + 1;
                if (i == 4) {
                    break;
                }
            }
            print(i);
        }
    "#;
    assert_eq!(run(source), ["4"]);
}

#[test]
fn test_if_else_branches() {
    let source = r#"
        {
            int x;
            x = 10;
            if (x < 5) {
                print(0);
            } else {
                print(1);
            }
            if (x > 5) {
                print(2);
            }
        }
    "#;
    assert_eq!(run(source), ["1", "2"]);
}

#[test]
fn test_nested_block_shares_flat_environment() {
    let source = r#"
        {
            int x;
            x = 1;
            {
                int y;
                y = x + 1;
                x = y * 2;
            }
            print(x);
        }
    "#;
    assert_eq!(run(source), ["4"]);
}

#[test]
fn test_exponentiation() {
    assert_eq!(run("{ print(2 ^ 10); }"), ["1024"]);
    assert_eq!(run("{ print(5 ^ 0); }"), ["1"]);
    // Right-associative: 2 ^ (3 ^ 2) = 512, not (2 ^ 3) ^ 2 = 64
    assert_eq!(run("{ print(2 ^ 3 ^ 2); }"), ["512"]);
}

#[test]
fn test_operator_precedence() {
    assert_eq!(run("{ print(1 + 2 * 3); }"), ["7"]);
    assert_eq!(run("{ print((1 + 2) * 3); }"), ["9"]);
    assert_eq!(run("{ print(10 - 4 - 3); }"), ["3"]);
    assert_eq!(run("{ print(2 * 3 ^ 2); }"), ["18"]);
    assert_eq!(run("{ print(7 % 4 + 1); }"), ["4"]);
}

#[test]
fn test_relational_and_equality() {
    assert_eq!(run("{ print(1 < 2); }"), ["true"]);
    assert_eq!(run("{ print(2 <= 2); }"), ["true"]);
    assert_eq!(run("{ print(1 > 2); }"), ["false"]);
    assert_eq!(run("{ print(3 >= 4); }"), ["false"]);
    assert_eq!(run("{ print(5 == 5); }"), ["true"]);
    assert_eq!(run("{ print(5 != 5); }"), ["false"]);
    assert_eq!(run("{ print(true == false); }"), ["false"]);
    assert_eq!(run("{ print(true != false); }"), ["true"]);
}

#[test]
fn test_unary_operators() {
    assert_eq!(run("{ print(-3 + 5); }"), ["2"]);
    assert_eq!(run("{ print(--3); }"), ["3"]);
    assert_eq!(run("{ print(!true); }"), ["false"]);
    assert_eq!(run("{ print(!!true); }"), ["true"]);
}

#[test]
fn test_assignment_rebinds_undeclared_names() {
    // Assignment to an undeclared name binds a fresh cell of the value's type
    let source = r#"
        {
            x = 41;
            x = x + 1;
            print(x);
        }
    "#;
    assert_eq!(run(source), ["42"]);
}

#[test]
fn test_array_element_used_as_index() {
    let source = r#"
        {
            int a[3];
            a[0] = 2;
            a[2] = 7;
            print(a[a[0]]);
        }
    "#;
    assert_eq!(run(source), ["7"]);
}

#[test]
fn test_showcase_demo_file() {
    let path = Path::new("demos/showcase.imp");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    assert_eq!(
        run(&source),
        ["30", "5", "1024", "-1", "3", "false", "true", "true", "1"]
    );
}

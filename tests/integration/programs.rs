//! Integration tests for whole programs.
//!
//! Component: loader + engine
//!
//! These tests verify:
//! - Programs loaded from a directory run to completion
//! - Loops built from direction changes and skips
//! - Comment rows, CRLF sources and vertical literals
//! - Errors carry the cell they were raised at

#![cfg(test)]

use crate::common::*;

use tier::*;

// =============================================================================
// Complete Programs
// =============================================================================

mod complete_programs {
    use super::*;

    #[test]
    fn hello_world() {
        let outcome = run(r#""Hello, World!\n"{#"#);
        assert_eq!(outcome.output, "Hello, World!\n");
        assert_eq!(outcome.summary.status, ExecutionStatus::Halted);
    }

    #[test]
    fn countdown_loop() {
        // Arrange: slot 0 holds the decrement, slot 1 the counter.
        let source = "'1'['3'>{-[:])=^#\n       ^       <\n";

        // Act
        let outcome = run(source);

        // Assert
        assert_eq!(outcome.output, "321");
        assert_slots(outcome.stack(0), &[(0, Value::Int(1)), (1, Value::Int(0))]);
    }

    #[test]
    fn sum_of_two_inputs() {
        let outcome = run_tiers(&[(0, "}[}+[{#")], "'3'\n'4'\n");
        assert_eq!(outcome.output, "7");
    }

    #[test]
    fn float_division() {
        let outcome = run("'4'['1'/[{#");
        assert_eq!(outcome.output, "0.25");
    }

    #[test]
    fn negative_stack_pointer() {
        let outcome = run("]'5'{#");
        assert_slots(outcome.stack(0), &[(-1, Value::Int(5))]);
        assert_eq!(outcome.output, "5");
    }

    #[test]
    fn vertical_literal() {
        let outcome = run(" _\n;@\n '\n 5\n '\n {\n #\n");
        assert_eq!(outcome.output, "5");
    }

    #[test]
    fn crlf_source() {
        let outcome = run("_\r\n'\r\n6\r\n'\r\n{\r\n#\r\n");
        assert_eq!(outcome.output, "6");
    }

    #[test]
    fn letters_and_digits_are_inert() {
        let outcome = run("abc 123 xyz.#");
        assert_eq!(outcome.output, "");
        assert_eq!(outcome.summary.ticks, 13);
    }

    #[test]
    fn empty_marker_is_inert() {
        let outcome = run("££#");
        assert_eq!(outcome.summary.ticks, 3);
    }
}

// =============================================================================
// Runtime Errors
// =============================================================================

mod runtime_errors {
    use super::*;

    #[test]
    fn unknown_instruction_location() {
        let err = run_err(&[(0, "_\né\n")], "");
        assert_eq!(err.location(), Some(&CellLocation::new(0, 1, 0)));
        assert_eq!(err.category(), ErrorCategory::Runtime);
        assert!(err.to_string().contains("unknown instruction 'é'"));
    }

    #[test]
    fn division_by_zero() {
        let err = run_err(&[(0, "'5'/#")], "");
        assert!(matches!(err, TierError::DivisionByZero { operator: '/', .. }));
    }

    #[test]
    fn overflow() {
        let err = run_err(&[(0, "'2'['9223372036854775807'+#")], "");
        assert!(matches!(err, TierError::Overflow { operator: '+', .. }));
    }

    #[test]
    fn text_in_arithmetic() {
        let err = run_err(&[(0, "'1'[\"x\"*#")], "");
        assert!(matches!(
            err,
            TierError::TypeMismatch { left: ValueKind::Text, right: ValueKind::Integer, .. }
        ));
    }

    #[test]
    fn endless_program_hits_tick_limit() {
        let err = run_err(&[(0, ">  ")], "");
        assert!(matches!(err, TierError::TickLimitExceeded { limit: 100_000, .. }));
    }

    #[test]
    fn missing_entry_point() {
        let program = ProgramDir::with_tiers(&[(1, "#")]);
        let err = load_directory(program.path()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.to_string().contains("0.tier"));
    }
}

//! Integration tests for jumps.
//!
//! Component: mode state machine + engine
//!
//! These tests verify:
//! - Landing position for every direction of travel
//! - Negative and missing tiers
//! - Per-tier stacks against the shared temp register

#![cfg(test)]

use crate::common::*;

use tier::*;

mod landing {
    use super::*;

    #[test]
    fn east_lands_on_the_marker_column() {
        let outcome = run_tiers(&[(0, ">@12@"), (12, "x'9'{#")], "");
        assert_eq!(outcome.output, "9");
        assert_eq!(outcome.engine.state().pc.tier, 12);
    }

    #[test]
    fn negative_address_ends_at_decimal_point() {
        let outcome = run_tiers(&[(0, "@-3."), (-3, "'1'{#")], "");
        assert_eq!(outcome.output, "1");
        assert_eq!(outcome.engine.state().pc.tier, -3);
    }

    #[test]
    fn west_keeps_heading_west() {
        let outcome = run_tiers(&[(0, "<@3@"), (3, "{'4'#")], "");
        assert_eq!(outcome.output, "4");
        assert_eq!(outcome.engine.state().velocity, Velocity::West);
    }

    #[test]
    fn south_moves_back_along_the_row_axis() {
        let outcome = run_tiers(&[(0, "_\n@\n4\n@\n"), (4, "\n'\n8\n'\n{\n#\n")], "");
        assert_eq!(outcome.output, "8");
    }
}

mod tiers {
    use super::*;

    #[test]
    fn stacks_are_per_tier_and_ts_is_shared() {
        let outcome = run_tiers(&[(0, "'5'(@1@"), (1, "    ~#")], "");
        assert_slots(outcome.stack(0), &[(0, Value::Int(5))]);
        assert_slots(outcome.stack(1), &[(1, Value::Int(5))]);
        assert_eq!(outcome.ts(), &Value::ZERO);
    }

    #[test]
    fn missing_tier_gets_an_empty_stack() {
        let program = ProgramDir::with_tiers(&[(0, "@9@")]);
        let mut engine = engine_for(&program, "");
        let err = engine.run().unwrap_err();

        assert!(matches!(err, TierError::TickLimitExceeded { .. }));
        assert_eq!(engine.state().pc.tier, 9);
        assert!(engine.state().stacks.get(9).unwrap().is_empty());
    }

    #[test]
    fn malformed_address() {
        let err = run_err(&[(0, "@x@")], "");
        match err {
            TierError::MalformedJumpAddress { address, location } => {
                assert_eq!(address, "x");
                assert_eq!(location, CellLocation::new(0, 0, 2));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}

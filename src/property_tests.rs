//! Property-based tests for Tier.
//!
//! Uses proptest to check the stack, motion and literal invariants across
//! randomly generated inputs.

#[cfg(test)]
mod tests {
    use crate::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;
    use std::io::Cursor;

    fn velocity() -> impl Strategy<Value = Velocity> {
        prop_oneof![
            Just(Velocity::North),
            Just(Velocity::South),
            Just(Velocity::East),
            Just(Velocity::West),
        ]
    }

    fn stack_from(writes: &[(i64, i64)], sp: i64) -> TierStack {
        let mut stack = TierStack::new();
        for &(index, value) in writes {
            stack.write(index, Value::Int(value));
        }
        stack.set_sp(sp);
        stack
    }

    // ========================================================================
    // Stack Property Tests
    // ========================================================================

    proptest! {
        /// top() is the greatest populated index, or sp when that is higher.
        #[test]
        fn prop_top_is_max_of_indices_and_sp(
            writes in prop::collection::vec((-50i64..50, any::<i64>()), 0..20),
            sp in -60i64..60,
        ) {
            let stack = stack_from(&writes, sp);
            let expected = writes.iter().map(|&(i, _)| i).chain([sp]).max().unwrap();
            prop_assert_eq!(stack.top(), expected);
        }

        /// push then popTop hands back the pushed value and nothing else moves.
        #[test]
        fn prop_push_then_pop_top(
            writes in prop::collection::vec((-50i64..50, any::<i64>()), 0..20),
            sp in -60i64..60,
            value in any::<i64>(),
        ) {
            let mut stack = stack_from(&writes, sp);
            let before = stack.clone();

            stack.push(Value::Int(value));
            prop_assert_eq!(stack.pop_top(), Value::Int(value));
            prop_assert_eq!(stack, before);
        }

        /// popShift keeps slots below sp, moves slots above it down by one.
        #[test]
        fn prop_pop_shift_preserves_order(
            writes in prop::collection::vec((-20i64..20, any::<i64>()), 1..20),
            sp in -20i64..20,
        ) {
            let mut stack = stack_from(&writes, sp);
            let before: BTreeMap<i64, Value> =
                stack.slots().map(|(i, v)| (i, v.clone())).collect();
            let top = stack.top();

            let evicted = stack.pop_shift();
            prop_assert_eq!(evicted, before.get(&sp).cloned().unwrap_or(Value::ZERO));

            for (&index, value) in before.range(..sp) {
                prop_assert_eq!(stack.read(index), value.clone());
            }
            for index in sp..top {
                prop_assert_eq!(stack.is_set(index), before.contains_key(&(index + 1)));
                prop_assert_eq!(
                    stack.read(index),
                    before.get(&(index + 1)).cloned().unwrap_or(Value::ZERO)
                );
            }
            if top > sp || before.contains_key(&sp) {
                prop_assert!(!stack.is_set(top));
            }
        }
    }

    // ========================================================================
    // Motion Property Tests
    // ========================================================================

    proptest! {
        /// Every motion leaves the PC inside the bounding box.
        #[test]
        fn prop_shift_stays_in_bounds(
            column in 0i64..30,
            row in 0i64..30,
            max_column in 0i64..30,
            max_row in 0i64..30,
            vel in velocity(),
            steps in -100i64..100,
        ) {
            let bounds = Bounds::new(max_column, max_row);
            let mut pc = Position::new(column.min(max_column), row.min(max_row), 0);
            pc.shift(vel, steps, bounds);
            prop_assert!((0..=max_column).contains(&pc.column));
            prop_assert!((0..=max_row).contains(&pc.row));
        }

        /// Stepping forward then back returns to the start.
        #[test]
        fn prop_shift_is_reversible(
            column in 0i64..10,
            row in 0i64..10,
            vel in velocity(),
            steps in 0i64..50,
        ) {
            let bounds = Bounds::new(9, 9);
            let start = Position::new(column, row, 3);
            let mut pc = start;
            pc.shift(vel, steps, bounds);
            pc.shift(vel, -steps, bounds);
            prop_assert_eq!(pc, start);
        }
    }

    // ========================================================================
    // Engine Property Tests
    // ========================================================================

    proptest! {
        /// Pop instructions leave exactly the popped value in ts.
        #[test]
        fn prop_pops_place_value_in_ts(n in -1_000_000i64..1_000_000, shift in any::<bool>()) {
            let op = if shift { ':' } else { '$' };
            let source = format!("'{}'{}#", n, op);
            let grid = Grid::from_tiers([(0, source.as_str())]);
            let mut engine = Engine::new(grid, EngineConfig::seeded(0), Cursor::new(Vec::new()), Vec::new());
            engine.run().unwrap();
            prop_assert_eq!(&engine.state().ts, &Value::Int(n));
            prop_assert!(engine.state().stack().unwrap().is_empty());
        }

        /// Printing an integer literal prints its decimal form.
        #[test]
        fn prop_print_integer(n in any::<i64>()) {
            let source = format!("'{}'{{#", n);
            let grid = Grid::from_tiers([(0, source.as_str())]);
            let mut engine = Engine::new(grid, EngineConfig::seeded(0), Cursor::new(Vec::new()), Vec::new());
            engine.run().unwrap();
            prop_assert_eq!(String::from_utf8(engine.into_output()).unwrap(), n.to_string());
        }

        /// Jumps land on the column of the initiating marker in the target tier.
        #[test]
        fn prop_jump_lands_on_marker_column(tier in -999i64..999, pad in 0usize..5) {
            let source = format!("{}@{}@", " ".repeat(pad), tier);
            let grid = Grid::from_tiers([(0, source.as_str())]);
            let mut engine = Engine::new(grid, EngineConfig::seeded(0), Cursor::new(Vec::new()), Vec::new());
            let ticks = pad + tier.to_string().len() + 2;
            for _ in 0..ticks {
                engine.step().unwrap();
            }
            prop_assert_eq!(engine.state().pc, Position::new(pad as i64, 0, tier));
        }
    }
}

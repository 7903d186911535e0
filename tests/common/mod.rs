//! Shared test utilities for Tier integration tests.
//!
//! This module provides:
//! - Program directories on disk
//! - Engine builders over in-memory input and output
//! - Assertion helpers for stacks and run outcomes

#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::Path;

use tempfile::TempDir;
use tier::*;

pub type TestEngine = Engine<Grid, Cursor<Vec<u8>>, Vec<u8>>;

// =============================================================================
// Program Directories
// =============================================================================

/// A temporary program directory.
pub struct ProgramDir {
    dir: TempDir,
}

impl ProgramDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Directory with one file per `(tier id, source)` pair.
    pub fn with_tiers(tiers: &[(i64, &str)]) -> Self {
        let program = Self::new();
        for &(id, source) in tiers {
            program.write_tier(id, source);
        }
        program
    }

    pub fn write_tier(&self, id: i64, source: &str) {
        self.write_file(&format!("{}.tier", id), source);
    }

    pub fn write_file(&self, name: &str, contents: &str) {
        fs::write(self.dir.path().join(name), contents).expect("failed to write file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

// =============================================================================
// Engine Builders
// =============================================================================

/// Default configuration for tests: reproducible and bounded.
pub fn test_config() -> EngineConfig {
    EngineConfig::seeded(0).with_max_ticks(100_000)
}

/// Load `program` and build an engine reading `input`.
pub fn engine_for(program: &ProgramDir, input: &str) -> TestEngine {
    let grid = load_directory(program.path()).expect("failed to load program");
    Engine::new(grid, test_config(), Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

/// Result of a finished run.
pub struct Outcome {
    pub output: String,
    pub summary: RunSummary,
    pub engine: TestEngine,
}

impl Outcome {
    /// Stack of `tier`.
    pub fn stack(&self, tier: i64) -> &TierStack {
        self.engine
            .state()
            .stacks
            .get(tier)
            .unwrap_or_else(|| panic!("tier {} has no stack", tier))
    }

    pub fn ts(&self) -> &Value {
        &self.engine.state().ts
    }
}

/// Run tiers from disk to completion.
///
/// # Panics
/// Panics if the run fails, which is appropriate for test code.
pub fn run_tiers(tiers: &[(i64, &str)], input: &str) -> Outcome {
    let program = ProgramDir::with_tiers(tiers);
    let mut engine = engine_for(&program, input);
    let summary = engine.run().unwrap_or_else(|e| panic!("run failed: {}", e));
    let output = String::from_utf8(engine.output().clone()).expect("output is not UTF-8");
    Outcome {
        output,
        summary,
        engine,
    }
}

/// Run a single-tier program.
pub fn run(source: &str) -> Outcome {
    run_tiers(&[(0, source)], "")
}

/// Run tiers and return the error they stop with.
pub fn run_err(tiers: &[(i64, &str)], input: &str) -> TierError {
    let program = ProgramDir::with_tiers(tiers);
    match engine_for(&program, input).run() {
        Ok(summary) => panic!("expected an error, run ended with {:?}", summary),
        Err(e) => e,
    }
}

// =============================================================================
// Assertion Helpers
// =============================================================================

/// Assert the slots of a stack, in index order.
pub fn assert_slots(stack: &TierStack, expected: &[(i64, Value)]) {
    let actual: Vec<(i64, Value)> = stack.slots().map(|(i, v)| (i, v.clone())).collect();
    assert_eq!(actual, expected, "unexpected stack contents");
}

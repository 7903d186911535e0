//! Interpreter for Tier, a two-dimensional esoteric language.
//!
//! A program is a directory of character grids, one per tier. A program
//! counter walks the grid in one of four directions and every cell it visits
//! is an instruction. Each tier owns a sparse stack; the temp register and the
//! velocity are shared.
//!
//! ```no_run
//! use tier::{load_directory, Engine, EngineConfig};
//!
//! let grid = load_directory("programs/hello")?;
//! let mut engine = Engine::with_stdio(grid, EngineConfig::default());
//! let summary = engine.run()?;
//! println!("{} ticks", summary.ticks);
//! # Ok::<(), tier::TierError>(())
//! ```

// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: Runtime (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod runtime;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: VM (depends on core, runtime)
// ═══════════════════════════════════════════════════════════════════════════
pub mod vm;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 3: Tooling (depends on all)
// ═══════════════════════════════════════════════════════════════════════════
pub mod tooling;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use crate::core::error::{CellLocation, ErrorCategory, LiteralSource, TierError, TierResult};
pub use crate::core::{BinaryOp, Bounds, Position, StackStore, TierStack, Value, ValueKind, Velocity};
pub use runtime::{load_directory, Grid, SourceGrid};
pub use vm::{
    DebugSink, Engine, EngineConfig, ExecutionStatus, Instruction, Mode, ModeKind, RunSummary,
    SinkSignal, Snapshot, VmState,
};
pub use tooling::{TraceFormat, TraceSink};

mod property_tests;

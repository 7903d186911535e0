//! The execution engine.
//!
//! - **instruction**: the character → operation table
//! - **mode**: the mode state machine and its buffers
//! - **state**: PC, velocity, ts and the stack store
//! - **engine**: the tick loop
//! - **sink**: per-tick observers (trace, visual debugger)
//!
//! # Layer 2 - Depends on core and runtime

pub mod config;
pub mod engine;
pub mod instruction;
pub mod mode;
pub mod sink;
pub mod state;

pub use config::EngineConfig;
pub use engine::{Engine, RunSummary};
pub use instruction::{is_inert, Instruction};
pub use mode::{Action, Mode, ModeKind};
pub use sink::{DebugSink, RecordedTick, RecordingSink, SinkSignal, Snapshot};
pub use state::{ExecutionStatus, VmState};

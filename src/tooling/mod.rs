//! Debug sinks shipped with the interpreter.
//!
//! - **trace**: verbose per-tick trace as text or JSON Lines
//! - **debugger**: the terminal step-through debugger (`visual` feature)

pub mod trace;
#[cfg(feature = "visual")]
pub mod debugger;

pub use trace::{TraceFormat, TraceSink};
#[cfg(feature = "visual")]
pub use debugger::VisualDebugger;

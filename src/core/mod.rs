//! Core types for the Tier interpreter.
//!
//! - **Value**: integers, floats and text, with the operator matrix
//! - **Position**: the program counter, velocity and wraparound bounds
//! - **Stack**: per-tier sparse stacks
//! - **Error**: the error hierarchy
//!
//! # Layer 0 - No Internal Dependencies

pub mod error;
pub mod position;
pub mod stack;
pub mod value;

pub use error::{CellLocation, ErrorCategory, LiteralSource, TierError, TierResult};
pub use position::{Bounds, Position, Velocity};
pub use stack::{StackStore, TierStack};
pub use value::{BinaryOp, Value, ValueKind};

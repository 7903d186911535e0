//! Integration tests for Tier.
//!
//! This module organises integration tests by component.

pub mod cli;
pub mod jumps;
pub mod programs;
pub mod sinks;

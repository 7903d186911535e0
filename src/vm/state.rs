//! Mutable engine state.

use serde::Serialize;

use super::mode::Mode;
use crate::core::{Position, StackStore, TierStack, Value, Velocity};
use crate::runtime::loader::ENTRY_TIER;

/// Status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Still ticking.
    Running,
    /// Stopped by `#`.
    Halted,
    /// Stopped by a debug sink.
    Aborted,
}

/// Complete state of the engine between ticks.
#[derive(Debug, Clone)]
pub struct VmState {
    /// Program counter.
    pub pc: Position,
    /// Direction of travel, shared by every tier.
    pub velocity: Velocity,
    /// Current mode and its buffer.
    pub mode: Mode,
    /// The temp register, shared by every tier.
    pub ts: Value,
    /// One stack per tier.
    pub stacks: StackStore,
    pub status: ExecutionStatus,
}

impl VmState {
    /// Fresh state with one empty stack per tier and the PC at the origin of
    /// the entry tier, heading east.
    pub fn new(tiers: impl IntoIterator<Item = i64>, initial_ts: Value) -> Self {
        let mut stacks = StackStore::with_tiers(tiers);
        stacks.tier_mut(ENTRY_TIER);
        Self {
            pc: Position::new(0, 0, ENTRY_TIER),
            velocity: Velocity::default(),
            mode: Mode::default(),
            ts: initial_ts,
            stacks,
            status: ExecutionStatus::Running,
        }
    }

    /// Stack of the tier under the PC.
    pub fn stack(&self) -> Option<&TierStack> {
        self.stacks.get(self.pc.tier)
    }

    /// Mutable stack of the tier under the PC.
    pub fn stack_mut(&mut self) -> &mut TierStack {
        self.stacks.tier_mut(self.pc.tier)
    }
}

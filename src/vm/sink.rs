//! Debug sinks: per-tick observers of the engine.

use super::mode::ModeKind;
use crate::core::{Position, TierResult, TierStack, Value, Velocity};

/// Read-only view of the engine after a tick has been resolved.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Ticks completed before this one.
    pub tick: u64,
    /// Character that was read, `None` for an empty cell.
    pub character: Option<char>,
    /// Where the character was read.
    pub pc: Position,
    pub velocity: Velocity,
    pub ts: &'a Value,
    pub mode: ModeKind,
    /// Contents of the active literal or address buffer.
    pub buffer: &'a str,
    /// Stack pointer of the current tier.
    pub sp: i64,
    /// Stack of the current tier.
    pub stack: &'a TierStack,
}

/// What a sink wants the engine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkSignal {
    Continue,
    Abort,
}

/// Observer notified once per tick.
pub trait DebugSink {
    /// Inspect a tick. May block, e.g. waiting for a key.
    fn observe(&mut self, snapshot: &Snapshot<'_>) -> TierResult<SinkSignal>;

    /// Called before the engine blocks on standard input.
    fn suspend(&mut self) -> TierResult<()> {
        Ok(())
    }

    /// Called after the blocking read returns.
    fn resume(&mut self) -> TierResult<()> {
        Ok(())
    }

    /// Called once when the run ends, however it ends.
    fn finish(&mut self) -> TierResult<()> {
        Ok(())
    }
}

/// Sink that records every snapshot it sees, for tests and tooling.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub records: Vec<RecordedTick>,
    /// Abort once this many ticks were observed.
    pub abort_after: Option<usize>,
    pub suspensions: usize,
}

/// Owned copy of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTick {
    pub character: Option<char>,
    pub pc: Position,
    pub velocity: Velocity,
    pub ts: Value,
    pub mode: ModeKind,
    pub sp: i64,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aborting_after(ticks: usize) -> Self {
        Self {
            abort_after: Some(ticks),
            ..Self::default()
        }
    }
}

impl DebugSink for RecordingSink {
    fn observe(&mut self, snapshot: &Snapshot<'_>) -> TierResult<SinkSignal> {
        self.records.push(RecordedTick {
            character: snapshot.character,
            pc: snapshot.pc,
            velocity: snapshot.velocity,
            ts: snapshot.ts.clone(),
            mode: snapshot.mode,
            sp: snapshot.sp,
        });
        match self.abort_after {
            Some(n) if self.records.len() >= n => Ok(SinkSignal::Abort),
            _ => Ok(SinkSignal::Continue),
        }
    }

    fn suspend(&mut self) -> TierResult<()> {
        self.suspensions += 1;
        Ok(())
    }
}

/// Forward every call to a shared sink so the caller can inspect it after the run.
impl<S: DebugSink> DebugSink for std::rc::Rc<std::cell::RefCell<S>> {
    fn observe(&mut self, snapshot: &Snapshot<'_>) -> TierResult<SinkSignal> {
        self.borrow_mut().observe(snapshot)
    }

    fn suspend(&mut self) -> TierResult<()> {
        self.borrow_mut().suspend()
    }

    fn resume(&mut self) -> TierResult<()> {
        self.borrow_mut().resume()
    }

    fn finish(&mut self) -> TierResult<()> {
        self.borrow_mut().finish()
    }
}

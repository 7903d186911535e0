//! Verbose per-tick trace.
//!
//! One record per tick, either as a readable text block or as JSON Lines.

use std::io::Write;

use serde::Serialize;

use crate::core::{Position, TierError, TierResult, Value, Velocity};
use crate::vm::{DebugSink, ModeKind, SinkSignal, Snapshot};

/// Output format of the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TraceFormat {
    /// Human-readable block per tick.
    #[default]
    Text,
    /// One JSON object per line.
    #[value(name = "json")]
    JsonLines,
}

#[derive(Debug, Serialize)]
struct TraceRecord<'a> {
    tick: u64,
    character: Option<char>,
    pc: Position,
    velocity: Velocity,
    ts: &'a Value,
    mode: ModeKind,
    buffer: &'a str,
    sp: i64,
    stack: Vec<StackSlot<'a>>,
}

#[derive(Debug, Serialize)]
struct StackSlot<'a> {
    index: i64,
    value: &'a Value,
}

/// Debug sink that writes every tick to `writer`.
pub struct TraceSink<W: Write> {
    writer: W,
    format: TraceFormat,
}

impl<W: Write> TraceSink<W> {
    pub fn new(writer: W, format: TraceFormat) -> Self {
        Self { writer, format }
    }

    pub fn format(&self) -> TraceFormat {
        self.format
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_text(&mut self, snapshot: &Snapshot<'_>) -> std::io::Result<()> {
        let cell = match snapshot.character {
            Some(ch) => format!("'{}'", ch),
            None => "empty".to_string(),
        };
        writeln!(
            self.writer,
            "tick {}: {} at {} heading {} ({})",
            snapshot.tick, cell, snapshot.pc, snapshot.velocity, snapshot.mode
        )?;
        if !snapshot.buffer.is_empty() {
            writeln!(self.writer, "  buffer: {:?}", snapshot.buffer)?;
        }
        let slots: Vec<String> = snapshot
            .stack
            .slots()
            .map(|(index, value)| format!("{}: {}", index, value))
            .collect();
        writeln!(
            self.writer,
            "  ts: {}  sp: {}  stack: {{{}}}",
            snapshot.ts,
            snapshot.sp,
            slots.join(", ")
        )
    }

    fn write_json(&mut self, snapshot: &Snapshot<'_>) -> TierResult<()> {
        let record = TraceRecord {
            tick: snapshot.tick,
            character: snapshot.character,
            pc: snapshot.pc,
            velocity: snapshot.velocity,
            ts: snapshot.ts,
            mode: snapshot.mode,
            buffer: snapshot.buffer,
            sp: snapshot.sp,
            stack: snapshot
                .stack
                .slots()
                .map(|(index, value)| StackSlot { index, value })
                .collect(),
        };
        serde_json::to_writer(&mut self.writer, &record)
            .map_err(|e| TierError::io("write trace", e.into()))?;
        writeln!(self.writer).map_err(|e| TierError::io("write trace", e))
    }
}

impl<W: Write> DebugSink for TraceSink<W> {
    fn observe(&mut self, snapshot: &Snapshot<'_>) -> TierResult<SinkSignal> {
        match self.format {
            TraceFormat::Text => self
                .write_text(snapshot)
                .map_err(|e| TierError::io("write trace", e))?,
            TraceFormat::JsonLines => self.write_json(snapshot)?,
        }
        Ok(SinkSignal::Continue)
    }

    fn finish(&mut self) -> TierResult<()> {
        self.writer.flush().map_err(|e| TierError::io("flush trace", e))
    }
}

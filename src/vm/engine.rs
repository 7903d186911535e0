//! The tick loop.
//!
//! Each tick reads one cell, resolves it against the current mode, carries out
//! the resulting action and advances the PC. Debug sinks see the state after
//! the action and before the advance.

use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use super::config::EngineConfig;
use super::instruction::Instruction;
use super::mode::Action;
use super::sink::{DebugSink, SinkSignal, Snapshot};
use super::state::{ExecutionStatus, VmState};
use crate::core::{
    CellLocation, LiteralSource, Position, TierError, TierResult, TierStack, Value,
};
use crate::runtime::grid::SourceGrid;

/// Outcome of [`Engine::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed, including the final one.
    pub ticks: u64,
    /// `Halted` or `Aborted`.
    pub status: ExecutionStatus,
}

/// Executes a program grid.
pub struct Engine<G, R, W> {
    grid: G,
    config: EngineConfig,
    input: R,
    output: W,
    sinks: Vec<Box<dyn DebugSink>>,
    rng: StdRng,
    state: VmState,
    ticks: u64,
}

impl<G: SourceGrid> Engine<G, StdinLock<'static>, Stdout> {
    /// Engine wired to the process's standard input and output.
    pub fn with_stdio(grid: G, config: EngineConfig) -> Self {
        Engine::new(grid, config, io::stdin().lock(), io::stdout())
    }
}

impl<G: SourceGrid, R: BufRead, W: Write> Engine<G, R, W> {
    pub fn new(grid: G, config: EngineConfig, input: R, output: W) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = VmState::new(grid.tiers(), config.initial_ts.clone());
        Self {
            grid,
            config,
            input,
            output,
            sinks: Vec::new(),
            rng,
            state,
            ticks: 0,
        }
    }

    /// Attach a sink. Sinks are notified in attach order.
    pub fn attach(&mut self, sink: Box<dyn DebugSink>) {
        self.sinks.push(sink);
    }

    pub fn state(&self) -> &VmState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut VmState {
        &mut self.state
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run until `#`, an abort or an error.
    ///
    /// Sinks are finished whichever way the run ends.
    pub fn run(&mut self) -> TierResult<RunSummary> {
        info!(
            tiers = ?self.grid.tiers(),
            bounds = ?self.grid.bounds(),
            "run started"
        );
        let outcome = self.run_loop();
        let finished = self.finish_sinks();
        let summary = outcome?;
        finished?;
        info!(ticks = summary.ticks, status = ?summary.status, "run finished");
        Ok(summary)
    }

    fn run_loop(&mut self) -> TierResult<RunSummary> {
        loop {
            match self.step()? {
                ExecutionStatus::Running => {
                    if !self.config.tick_delay.is_zero() {
                        thread::sleep(self.config.tick_delay);
                    }
                }
                status => {
                    return Ok(RunSummary {
                        ticks: self.ticks,
                        status,
                    })
                }
            }
        }
    }

    fn finish_sinks(&mut self) -> TierResult<()> {
        let mut first_error = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.finish() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Execute one tick. Does nothing once the run has stopped.
    pub fn step(&mut self) -> TierResult<ExecutionStatus> {
        if self.state.status != ExecutionStatus::Running {
            return Ok(self.state.status);
        }
        let pc = self.state.pc;
        if let Some(limit) = self.config.max_ticks {
            if self.ticks >= limit {
                return Err(TierError::TickLimitExceeded {
                    limit,
                    location: pc.location(),
                });
            }
        }

        let cell = self.grid.char_at(pc);
        let mode = std::mem::take(&mut self.state.mode);
        let (mode, action) = mode.resolve(cell);
        self.state.mode = mode;

        trace!(
            tick = self.ticks,
            pc = %pc,
            cell = ?cell,
            action = ?action,
            "tick"
        );

        let advance = self.perform(action, pc.location())?;
        self.ticks += 1;

        if self.notify(cell, pc)? == SinkSignal::Abort {
            info!(tick = self.ticks, "aborted by debug sink");
            self.state.status = ExecutionStatus::Aborted;
            return Ok(self.state.status);
        }

        if advance {
            self.state.pc.advance(self.state.velocity, self.grid.bounds());
        }
        Ok(self.state.status)
    }

    /// Carry out `action`. Returns whether the PC advances this tick.
    fn perform(&mut self, action: Action, location: CellLocation) -> TierResult<bool> {
        match action {
            Action::Continue => {}
            Action::Execute(instr) => self.execute(instr, location)?,
            Action::CommitNumber(digits) => {
                let value = Value::parse_literal(&digits, location)?;
                self.commit(value);
            }
            Action::CommitText(text) => self.commit(Value::Text(text)),
            Action::Relocate(address) => {
                self.relocate(address, location)?;
                return Ok(false);
            }
            Action::Unknown(character) => {
                return Err(TierError::UnknownInstruction { character, location });
            }
        }
        Ok(true)
    }

    /// Store a finished literal at sp, moving the old value into ts.
    fn commit(&mut self, value: Value) {
        let stack = self.state.stacks.tier_mut(self.state.pc.tier);
        let sp = stack.sp();
        self.state.ts = stack.read(sp);
        stack.write(sp, value);
    }

    /// Finish a jump: step back over the address and its marker, then switch tier.
    fn relocate(&mut self, address: String, location: CellLocation) -> TierResult<()> {
        let tier = match address.parse::<i64>() {
            Ok(tier) => tier,
            Err(_) => return Err(TierError::MalformedJumpAddress { address, location }),
        };
        let steps = address.chars().count() as i64 + 1;
        let from = self.state.pc;
        self.state.pc.shift(self.state.velocity, -steps, self.grid.bounds());
        self.state.pc.tier = tier;

        if !self.state.stacks.contains(tier) {
            warn!(tier, "jumped to a tier without source, creating an empty stack");
            self.state.stacks.tier_mut(tier);
        }
        debug!(from = %from, to = %self.state.pc, "jump");
        Ok(())
    }

    fn execute(&mut self, instr: Instruction, location: CellLocation) -> TierResult<()> {
        let state = &mut self.state;
        let stack = state.stacks.tier_mut(state.pc.tier);

        match instr {
            Instruction::Face(velocity) => state.velocity = velocity,

            // Mode changes are made by `Mode::resolve` before dispatch.
            Instruction::Jump | Instruction::NumberLiteral | Instruction::StringLiteral => {}

            Instruction::IncrementPointer => stack.move_pointer(1),
            Instruction::DecrementPointer => stack.move_pointer(-1),

            Instruction::PushTemp => {
                let ts = std::mem::replace(&mut state.ts, Value::ZERO);
                stack.push(ts);
            }
            Instruction::LoadTemp => state.ts = stack.current(),
            Instruction::StoreTemp => stack.write(stack.sp(), state.ts.clone()),
            Instruction::PointerToTemp => state.ts = Value::Int(stack.sp()),

            Instruction::Halt => {
                info!(pc = %state.pc, "halt");
                state.status = ExecutionStatus::Halted;
            }

            Instruction::Print => {
                let text = stack.current().to_string().replace("\\n", "\n");
                self.output
                    .write_all(text.as_bytes())
                    .and_then(|()| self.output.flush())
                    .map_err(|e| TierError::io("write output", e))?;
            }
            Instruction::Input => {
                let value = self.read_input(location)?;
                let stack = self.state.stack_mut();
                stack.write(stack.sp(), value);
            }

            Instruction::Binary(op) => {
                let lhs = stack.current();
                let rhs = stack.read(stack.sp() - 1);
                let result = lhs.apply(op, &rhs, location)?;
                stack.push(result);
                state.ts = Value::ZERO;
            }

            Instruction::SkipIfGreater => {
                let lhs = stack.current();
                let rhs = stack.read(stack.sp() - 1);
                if lhs.greater_than(&rhs, location)? {
                    self.skip();
                }
            }
            Instruction::SkipIfZero => {
                if stack.current().is_zero() {
                    self.skip();
                }
            }

            Instruction::Not => {
                let value = stack.current();
                let negated = Value::Int(if value.is_truthy() { 0 } else { 1 });
                stack.write(stack.sp(), negated);
                state.ts = value;
            }
            Instruction::RandomBit => {
                state.ts = stack.current();
                let bit: i64 = self.rng.gen_range(0..=1);
                stack.write(stack.sp(), Value::Int(bit));
            }

            Instruction::PopShift => state.ts = stack.pop_shift(),
            Instruction::PopTop => state.ts = stack.pop_top(),
        }
        Ok(())
    }

    /// Advance one extra cell.
    fn skip(&mut self) {
        self.state.pc.advance(self.state.velocity, self.grid.bounds());
    }

    /// Read one line for `}`, with every sink suspended around the read.
    fn read_input(&mut self, location: CellLocation) -> TierResult<Value> {
        for sink in self.sinks.iter_mut() {
            sink.suspend()?;
        }
        let mut line = String::new();
        let read = self.input.read_line(&mut line);
        for sink in self.sinks.iter_mut() {
            sink.resume()?;
        }

        if read.map_err(|e| TierError::io("read input", e))? == 0 {
            return Err(TierError::InputExhausted { location });
        }
        let line = line.trim_end_matches(['\n', '\r']);
        Value::parse_quoted(line, LiteralSource::Input).map_err(|err| match err {
            TierError::MalformedLiteral { text, origin, .. } => TierError::MalformedLiteral {
                text,
                origin,
                location: Some(location),
            },
            other => other,
        })
    }

    fn notify(&mut self, character: Option<char>, pc: Position) -> TierResult<SinkSignal> {
        if self.sinks.is_empty() {
            return Ok(SinkSignal::Continue);
        }
        let empty = TierStack::new();
        let stack = self.state.stack().unwrap_or(&empty);
        let snapshot = Snapshot {
            tick: self.ticks - 1,
            character,
            pc,
            velocity: self.state.velocity,
            ts: &self.state.ts,
            mode: self.state.mode.kind(),
            buffer: self.state.mode.buffer(),
            sp: stack.sp(),
            stack,
        };
        for sink in self.sinks.iter_mut() {
            if sink.observe(&snapshot)? == SinkSignal::Abort {
                return Ok(SinkSignal::Abort);
            }
        }
        Ok(SinkSignal::Continue)
    }
}

//! Integration tests for debug sinks.
//!
//! Component: sink + engine + trace
//!
//! These tests verify:
//! - Sinks see every tick, including jump completions
//! - The JSON Lines trace has one record per tick
//! - Aborting from a sink stops the run

#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::*;

use tier::vm::RecordingSink;
use tier::*;

#[test]
fn recording_sink_sees_every_tick() {
    let program = ProgramDir::with_tiers(&[(0, "@1@"), (1, "#")]);
    let sink = Rc::new(RefCell::new(RecordingSink::new()));
    let mut engine = engine_for(&program, "");
    engine.attach(Box::new(Rc::clone(&sink)));

    let summary = engine.run().unwrap();

    let sink = sink.borrow();
    assert_eq!(sink.records.len() as u64, summary.ticks);
    let modes: Vec<ModeKind> = sink.records.iter().map(|r| r.mode).collect();
    assert_eq!(
        modes,
        vec![ModeKind::Jumping, ModeKind::Jumping, ModeKind::Normal, ModeKind::Normal]
    );
    // The jump completes on the terminator cell.
    assert_eq!(sink.records[2].character, Some('@'));
    assert_eq!(sink.records[2].pc, Position::new(2, 0, 0));
    assert_eq!(sink.records[3].pc, Position::new(0, 0, 1));
}

#[test]
fn json_trace_has_one_record_per_tick() {
    let program = ProgramDir::with_tiers(&[(0, "'7'[#")]);
    let trace = Rc::new(RefCell::new(TraceSink::new(Vec::new(), TraceFormat::JsonLines)));
    let mut engine = engine_for(&program, "");
    engine.attach(Box::new(Rc::clone(&trace)));

    let summary = engine.run().unwrap();

    let bytes = trace.borrow().writer().clone();
    let text = String::from_utf8(bytes).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len() as u64, summary.ticks);

    assert_eq!(records[1]["mode"], "reading_number");
    assert_eq!(records[1]["buffer"], "7");
    assert_eq!(records[2]["stack"][0]["value"], 7);
    assert_eq!(records[3]["sp"], 1);
    assert_eq!(records[4]["character"], "#");
}

#[test]
fn text_trace_mentions_each_tick() {
    let program = ProgramDir::with_tiers(&[(0, ">#")]);
    let trace = Rc::new(RefCell::new(TraceSink::new(Vec::new(), TraceFormat::Text)));
    let mut engine = engine_for(&program, "");
    engine.attach(Box::new(Rc::clone(&trace)));
    engine.run().unwrap();

    let text = String::from_utf8(trace.borrow().writer().clone()).unwrap();
    assert!(text.contains("tick 0: '>' at [0, 0, 0]"));
    assert!(text.contains("tick 1: '#' at [1, 0, 0]"));
}

#[test]
fn abort_stops_the_run() {
    let program = ProgramDir::with_tiers(&[(0, ">  ")]);
    let mut engine = engine_for(&program, "");
    engine.attach(Box::new(RecordingSink::aborting_after(5)));

    let summary = engine.run().unwrap();
    assert_eq!(summary.status, ExecutionStatus::Aborted);
    assert_eq!(summary.ticks, 5);
    assert_eq!(engine.step().unwrap(), ExecutionStatus::Aborted);
}

//! Step-through visual debugger.
//!
//! Draws the current tier with the PC highlighted in a per-mode colour,
//! alongside the registers and the tier's stack.
//!
//! # Keys
//!
//! - Without a timestep every tick waits: Enter continues, any other key aborts.
//! - With a timestep ticks run on their own: Enter pauses until the next key,
//!   any other key aborts.

use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::{DefaultTerminal, Frame};

use crate::core::{TierError, TierResult};
use crate::vm::{DebugSink, ModeKind, SinkSignal, Snapshot};

/// Highlight colour of the PC cell for each mode.
pub fn mode_color(mode: ModeKind) -> Color {
    match mode {
        ModeKind::Normal => Color::Red,
        ModeKind::ReadingNumber => Color::Green,
        ModeKind::ReadingString => Color::Yellow,
        ModeKind::Jumping => Color::Cyan,
    }
}

/// Terminal debug sink.
pub struct VisualDebugger {
    terminal: Option<DefaultTerminal>,
    lines: BTreeMap<i64, Vec<String>>,
    timestep: Duration,
}

impl VisualDebugger {
    /// `lines` holds every tier's source rows, as kept by the grid.
    pub fn new(lines: BTreeMap<i64, Vec<String>>, timestep: Duration) -> Self {
        Self {
            terminal: None,
            lines,
            timestep,
        }
    }

    fn release(&mut self) -> TierResult<()> {
        if self.terminal.take().is_some() {
            ratatui::try_restore().map_err(|e| TierError::io("restore terminal", e))?;
        }
        Ok(())
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        if self.terminal.is_none() {
            self.terminal = Some(ratatui::try_init()?);
        }
        let lines = self.lines.get(&snapshot.pc.tier).map(Vec::as_slice).unwrap_or(&[]);
        if let Some(terminal) = self.terminal.as_mut() {
            terminal.draw(|frame| render(frame, snapshot, lines))?;
        }
        Ok(())
    }

    fn wait_for_keys(&self) -> io::Result<SinkSignal> {
        if self.timestep.is_zero() {
            return Ok(match next_key()? {
                KeyCode::Enter => SinkSignal::Continue,
                _ => SinkSignal::Abort,
            });
        }
        if !event::poll(Duration::ZERO)? {
            return Ok(SinkSignal::Continue);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Enter {
                    next_key()?;
                    Ok(SinkSignal::Continue)
                } else {
                    Ok(SinkSignal::Abort)
                }
            }
            _ => Ok(SinkSignal::Continue),
        }
    }
}

impl DebugSink for VisualDebugger {
    fn observe(&mut self, snapshot: &Snapshot<'_>) -> TierResult<SinkSignal> {
        self.draw(snapshot).map_err(|e| TierError::io("draw debugger", e))?;
        self.wait_for_keys().map_err(|e| TierError::io("read key", e))
    }

    /// Hand the terminal back so the input line can be typed.
    fn suspend(&mut self) -> TierResult<()> {
        self.release()
    }

    fn finish(&mut self) -> TierResult<()> {
        self.release()
    }
}

impl Drop for VisualDebugger {
    fn drop(&mut self) {
        if self.terminal.take().is_some() {
            ratatui::restore();
        }
    }
}

/// Block until a key is pressed.
fn next_key() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()? {
            // Ignore release events.
            if key.kind == KeyEventKind::Press {
                return Ok(key.code);
            }
        }
    }
}

fn render(frame: &mut Frame, snapshot: &Snapshot<'_>, lines: &[String]) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(frame.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[1]);

    render_status(frame, rows[0], snapshot);
    render_source(frame, columns[0], snapshot, lines);
    render_stack(frame, columns[1], snapshot);
}

fn render_status(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) {
    let mut spans = vec![
        Span::raw(format!("tick {}  ", snapshot.tick)),
        Span::raw(format!("pc {}  ", snapshot.pc)),
        Span::raw(format!("vel {}  ", snapshot.velocity)),
        Span::styled(
            format!("{}", snapshot.mode),
            Style::default().fg(mode_color(snapshot.mode)),
        ),
        Span::raw(format!("  sp {}  ts {}", snapshot.sp, snapshot.ts)),
    ];
    if !snapshot.buffer.is_empty() {
        spans.push(Span::raw(format!("  buffer {:?}", snapshot.buffer)));
    }
    let status = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Tier "));
    frame.render_widget(status, area);
}

fn render_source(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>, lines: &[String]) {
    let highlight = Style::default()
        .bg(mode_color(snapshot.mode))
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);

    let mut text: Vec<Line> = lines
        .iter()
        .enumerate()
        .map(|(row, line)| {
            if row as i64 == snapshot.pc.row {
                highlight_row(line, snapshot.pc.column, highlight)
            } else {
                Line::raw(line.clone())
            }
        })
        .collect();
    // The PC can sit below the tier's last line.
    while (text.len() as i64) <= snapshot.pc.row {
        let row = text.len() as i64;
        if row == snapshot.pc.row {
            text.push(highlight_row("", snapshot.pc.column, highlight));
        } else {
            text.push(Line::raw(""));
        }
    }

    let title = format!(" {}.tier ", snapshot.pc.tier);
    let source = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(source, area);
}

fn highlight_row(line: &str, column: i64, style: Style) -> Line<'static> {
    let mut chars: Vec<char> = line.chars().collect();
    let column = column.max(0) as usize;
    if chars.len() <= column {
        chars.resize(column + 1, ' ');
    }
    let before: String = chars[..column].iter().collect();
    let after: String = chars[column + 1..].iter().collect();
    Line::from(vec![
        Span::raw(before),
        Span::styled(chars[column].to_string(), style),
        Span::raw(after),
    ])
}

fn render_stack(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) {
    let mut indices: Vec<i64> = snapshot.stack.slots().map(|(i, _)| i).collect();
    if !snapshot.stack.is_set(snapshot.sp) {
        indices.push(snapshot.sp);
    }
    indices.sort_unstable_by(|a, b| b.cmp(a));

    let items: Vec<ListItem> = indices
        .into_iter()
        .map(|index| {
            let marker = if index == snapshot.sp { "►" } else { " " };
            let item = ListItem::new(format!(
                "{}{}: {}",
                marker,
                index,
                snapshot.stack.read(index)
            ));
            if index == snapshot.sp {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let stack = List::new(items).block(Block::default().borders(Borders::ALL).title(" Stack "));
    frame.render_widget(stack, area);
}

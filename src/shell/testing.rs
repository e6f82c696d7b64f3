//! Test doubles for driving the session without a terminal or a backend.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

use crate::engine::{Engine, LocatedError, ResultPage, ResumeToken};
use crate::error::ShellError;
use crate::input::{LineEvent, LineSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asked {
    Prompt(String),
    Question(String),
}

/// Replays scripted events for both line reads and questions, in order.
#[derive(Default)]
pub struct ScriptedSource {
    script: VecDeque<LineEvent>,
    pub asked: Vec<Asked>,
    latch: Rc<Cell<bool>>,
    echo: Option<SharedBuffer>,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = LineEvent>) -> Self {
        ScriptedSource {
            script: events.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| LineEvent::Line(l.to_string())))
    }

    /// Echoes each prompt and answer into `buffer`, as the terminal would.
    pub fn echoing(mut self, buffer: &SharedBuffer) -> Self {
        self.echo = Some(buffer.clone());
        self
    }

    /// Shared flag reported through `take_interrupt`.
    pub fn latch(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.latch)
    }

    pub fn questions(&self) -> usize {
        self.asked
            .iter()
            .filter(|a| matches!(a, Asked::Question(_)))
            .count()
    }

    fn next(&mut self, prompt: &str) -> LineEvent {
        let event = self.script.pop_front().unwrap_or(LineEvent::Eof);
        if let Some(echo) = &mut self.echo {
            let answer = match &event {
                LineEvent::Line(text) => text.as_str(),
                LineEvent::Interrupted | LineEvent::Eof => "",
            };
            let _ = writeln!(echo, "{}{}", prompt, answer);
        }
        event
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, prompt: &str) -> Result<LineEvent, ShellError> {
        self.asked.push(Asked::Prompt(prompt.to_string()));
        Ok(self.next(prompt))
    }

    fn question(&mut self, text: &str) -> Result<LineEvent, ShellError> {
        self.asked.push(Asked::Question(text.to_string()));
        Ok(self.next(text))
    }

    fn take_interrupt(&mut self) -> bool {
        self.latch.replace(false)
    }
}

/// Answers each call with the next scripted result and records the calls.
#[derive(Default)]
pub struct ScriptedEngine {
    responses: VecDeque<Result<ResultPage, LocatedError>>,
    pub calls: Vec<(String, Option<ResumeToken>)>,
    interrupt: Option<Rc<Cell<bool>>>,
}

impl ScriptedEngine {
    pub fn new(responses: impl IntoIterator<Item = Result<ResultPage, LocatedError>>) -> Self {
        ScriptedEngine {
            responses: responses.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Simulates Ctrl-C arriving while each call runs.
    pub fn interrupting(mut self, latch: Rc<Cell<bool>>) -> Self {
        self.interrupt = Some(latch);
        self
    }
}

impl Engine for ScriptedEngine {
    fn execute(
        &mut self,
        query: &str,
        resume: Option<&ResumeToken>,
    ) -> Result<ResultPage, LocatedError> {
        self.calls.push((query.to_string(), resume.cloned()));
        if let Some(latch) = &self.interrupt {
            latch.set(true);
        }
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(LocatedError::new("no scripted response")))
    }
}

/// In-memory terminal output that several writers can share.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Drops color and cursor escape sequences.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Replays output on a tiny terminal model and returns the visible lines.
///
/// Understands newlines, `ESC[<n>A` (cursor up) and `ESC[J` (clear below);
/// color sequences are ignored.
pub fn screen(output: &str) -> Vec<String> {
    let mut lines: Vec<Vec<char>> = vec![Vec::new()];
    let (mut row, mut col) = (0usize, 0usize);
    let mut chars = output.chars();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                let mut params = String::new();
                let mut command = ' ';
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        command = next;
                        break;
                    }
                    if next != '[' {
                        params.push(next);
                    }
                }
                match command {
                    'A' => row = row.saturating_sub(params.parse().unwrap_or(1)),
                    'J' => {
                        lines.truncate(row + 1);
                        lines[row].truncate(col);
                    }
                    _ => {}
                }
            }
            '\n' => {
                row += 1;
                col = 0;
                if lines.len() <= row {
                    lines.push(Vec::new());
                }
            }
            _ => {
                let line = &mut lines[row];
                if col < line.len() {
                    line[col] = c;
                } else {
                    line.resize(col, ' ');
                    line.push(c);
                }
                col += 1;
            }
        }
    }

    let mut visible: Vec<String> = lines.into_iter().map(|l| l.into_iter().collect()).collect();
    while visible.last().is_some_and(|l| l.is_empty()) {
        visible.pop();
    }
    visible
}

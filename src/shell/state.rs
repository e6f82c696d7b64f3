use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

pub const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];
pub const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingLine,
    Dispatching,
    AwaitingInterruptConfirmation,
    Terminated,
}

/// Something that happened to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Line(String),
    Interrupt,
    /// Answer to the exit confirmation question.
    Answer(String),
    /// The dispatched query finished, successfully or not.
    Completed,
    EndOfInput,
}

/// What the session loop must do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Idle,
    Dispatch(String),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Blank,
    Comment,
    Exit,
    Query(String),
}

/// Classifies a raw line. Exit keywords are case-sensitive.
pub fn classify(raw: &str) -> Input {
    let query = raw.trim();
    if query.is_empty() {
        Input::Blank
    } else if query.starts_with(COMMENT_MARKER) {
        Input::Comment
    } else if EXIT_KEYWORDS.contains(&query) {
        Input::Exit
    } else {
        Input::Query(query.to_string())
    }
}

static EXIT_CONFIRM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^y(es)?$").expect("exit confirmation pattern is valid"));

pub fn confirms_exit(answer: &str) -> bool {
    EXIT_CONFIRM.is_match(answer)
}

/// The session's state machine.
///
/// An interrupt while a query runs is latched and becomes the exit question
/// once the query completes. An interrupt while that question is already
/// pending is ignored, so there is never more than one question open.
#[derive(Debug, Clone)]
pub struct SessionState {
    phase: Phase,
    prompt: String,
    interrupt_latched: bool,
}

impl SessionState {
    pub fn new(prompt: impl Into<String>) -> Self {
        SessionState {
            phase: Phase::AwaitingLine,
            prompt: prompt.into(),
            interrupt_latched: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    pub fn handle(&mut self, event: Event) -> Action {
        let before = self.phase;
        let action = self.transition(event);
        if before != self.phase {
            debug!(from = ?before, to = ?self.phase, "session transition");
        }
        action
    }

    fn transition(&mut self, event: Event) -> Action {
        use Phase::*;

        match (self.phase, event) {
            (Terminated, _) => Action::Exit,

            (AwaitingLine, Event::Line(raw)) => match classify(&raw) {
                Input::Blank | Input::Comment => Action::Idle,
                Input::Exit => self.terminate(),
                Input::Query(query) => {
                    self.phase = Dispatching;
                    Action::Dispatch(query)
                }
            },
            (AwaitingLine, Event::Interrupt) => {
                self.phase = AwaitingInterruptConfirmation;
                Action::Idle
            }
            (AwaitingLine, Event::EndOfInput) => self.terminate(),

            (Dispatching, Event::Interrupt) => {
                self.interrupt_latched = true;
                Action::Idle
            }
            (Dispatching, Event::Completed) => {
                self.phase = if std::mem::take(&mut self.interrupt_latched) {
                    AwaitingInterruptConfirmation
                } else {
                    AwaitingLine
                };
                Action::Idle
            }

            (AwaitingInterruptConfirmation, Event::Answer(answer)) => {
                if confirms_exit(&answer) {
                    self.terminate()
                } else {
                    self.phase = AwaitingLine;
                    Action::Idle
                }
            }
            (AwaitingInterruptConfirmation, Event::EndOfInput) => self.terminate(),

            // Lines can't arrive mid-dispatch or mid-question, answers only
            // arrive to the question, and a second interrupt is ignored.
            (_, event) => {
                debug!(phase = ?self.phase, ?event, "event ignored");
                Action::Idle
            }
        }
    }

    fn terminate(&mut self) -> Action {
        self.phase = Phase::Terminated;
        Action::Exit
    }
}

//! The interactive session: read a line, run it, show the result, repeat.

use std::io::Write;

use tracing::debug;

mod cursor;
pub mod locate;
pub mod pagination;
pub mod render;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use crate::engine::Engine;
use crate::error::ShellError;
use crate::highlight::Theme;
use crate::input::{LineEvent, LineSource};
use pagination::Paginator;
use render::PageRenderer;
use state::{Action, Event, Phase, SessionState};

pub const EXIT_QUESTION: &str = "Are you sure you want to exit? ";

pub struct Shell<S: LineSource, E: Engine, W: Write> {
    source: S,
    engine: E,
    out: W,
    state: SessionState,
    renderer: PageRenderer,
    theme: Theme,
}

impl<S: LineSource, E: Engine, W: Write> Shell<S, E, W> {
    pub fn new(source: S, engine: E, out: W, prompt: &str, theme: Theme) -> Self {
        Shell {
            source,
            engine,
            out,
            state: SessionState::new(prompt),
            renderer: PageRenderer::new(theme),
            theme,
        }
    }

    /// Runs until an exit keyword, a confirmed interrupt or end of input.
    /// Errors returned from here are fatal; failed queries are reported
    /// inline and the loop carries on.
    pub fn run(&mut self) -> Result<(), ShellError> {
        while !self.state.is_terminated() {
            let event = self.next_event()?;
            if let Action::Dispatch(query) = self.state.handle(event) {
                self.dispatch(&query)?;
            }
        }
        debug!("session ended");
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn next_event(&mut self) -> Result<Event, ShellError> {
        let event = match self.state.phase() {
            Phase::AwaitingLine => {
                if self.source.take_interrupt() {
                    return Ok(Event::Interrupt);
                }
                match self.source.read_line(self.state.prompt())? {
                    LineEvent::Line(line) => Event::Line(line),
                    LineEvent::Interrupted => Event::Interrupt,
                    LineEvent::Eof => Event::EndOfInput,
                }
            }
            Phase::AwaitingInterruptConfirmation => match self.source.question(EXIT_QUESTION)? {
                LineEvent::Line(answer) => Event::Answer(answer),
                LineEvent::Interrupted => Event::Interrupt,
                LineEvent::Eof => Event::EndOfInput,
            },
            Phase::Dispatching => Event::Completed,
            Phase::Terminated => Event::EndOfInput,
        };
        Ok(event)
    }

    /// The only place query failures are caught.
    fn dispatch(&mut self, query: &str) -> Result<(), ShellError> {
        debug!(query, "dispatching");
        let mut paginator = Paginator::new(
            &mut self.engine,
            &mut self.source,
            &mut self.renderer,
            self.theme,
        );

        let interrupted = match paginator.run(&mut self.out, query) {
            Ok(outcome) => {
                debug!(pages = outcome.pages, "query finished");
                outcome.interrupted
            }
            Err(ShellError::Query(error)) => {
                debug!(error = %error, "query failed");
                locate::report(&mut self.out, &error, self.state.prompt(), &self.theme)?;
                false
            }
            Err(e) => return Err(e),
        };

        if interrupted || self.source.take_interrupt() {
            self.state.handle(Event::Interrupt);
        }
        self.state.handle(Event::Completed);
        self.out.flush()?;
        Ok(())
    }
}

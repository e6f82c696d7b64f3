use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::cursor;
use super::render::PageRenderer;
use crate::engine::Engine;
use crate::error::ShellError;
use crate::highlight::Theme;
use crate::input::{LineEvent, LineSource};

pub const NEXT_PAGE_QUESTION: &str = "Load the next page? [Y/n] ";

/// `yes`, `y`, or just Enter.
static LOAD_NEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^y(es)?$|^\s*$").expect("next page pattern is valid")
});

/// How a pagination run ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub pages: usize,
    /// Ctrl-C was pressed at the next-page question.
    pub interrupted: bool,
}

/// Runs one query to completion, page by page.
///
/// Engine failures are returned as [`ShellError::Query`] and end the run;
/// nothing is retried.
pub struct Paginator<'a, E: Engine + ?Sized, S: LineSource + ?Sized> {
    engine: &'a mut E,
    source: &'a mut S,
    renderer: &'a mut PageRenderer,
    theme: Theme,
}

impl<'a, E: Engine + ?Sized, S: LineSource + ?Sized> Paginator<'a, E, S> {
    pub fn new(
        engine: &'a mut E,
        source: &'a mut S,
        renderer: &'a mut PageRenderer,
        theme: Theme,
    ) -> Self {
        Paginator {
            engine,
            source,
            renderer,
            theme,
        }
    }

    pub fn run(&mut self, out: &mut dyn Write, query: &str) -> Result<Outcome, ShellError> {
        let mut outcome = Outcome::default();

        let page = self.engine.execute(query, None)?;
        outcome.pages += 1;
        self.renderer.render(out, Some(&page))?;
        out.flush()?;
        let mut marker = page.into_continuation();

        while let Some(token) = marker.take() {
            match self.ask_next_page()? {
                Some(true) => {}
                Some(false) => break,
                None => {
                    outcome.interrupted = true;
                    break;
                }
            }

            self.rejoin(out)?;

            debug!(page = outcome.pages + 1, "loading next page");
            let page = self.engine.execute(query, Some(&token))?;
            outcome.pages += 1;
            self.renderer.render(out, Some(&page))?;
            out.flush()?;
            marker = page.into_continuation();
        }

        // The last closing line belongs to this query only.
        self.renderer.take_pending_close();
        Ok(outcome)
    }

    /// `None` when the question was interrupted.
    fn ask_next_page(&mut self) -> Result<Option<bool>, ShellError> {
        let question = self.theme.attention(NEXT_PAGE_QUESTION);
        match self.source.question(&question)? {
            LineEvent::Line(answer) => Ok(Some(LOAD_NEXT.is_match(&answer))),
            LineEvent::Interrupted => Ok(None),
            LineEvent::Eof => Ok(Some(false)),
        }
    }

    /// Steps back over the answered question onto the previous page's
    /// closing line, adds the separator and wipes the question.
    fn rejoin(&mut self, out: &mut dyn Write) -> Result<(), ShellError> {
        match self.renderer.take_pending_close() {
            Some(closing) => {
                cursor::move_up(out, 2)?;
                writeln!(out, "{},", closing)?;
            }
            None => cursor::move_up(out, 1)?,
        }
        cursor::clear_down(out)?;
        Ok(())
    }
}

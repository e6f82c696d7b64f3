use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use tracing::trace;

use super::QueryHelper;
use crate::engine::Suggester;
use crate::error::ShellError;
use crate::highlight::Theme;

/// What one read from the terminal produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Raw text of the line, untrimmed.
    Line(String),
    Interrupted,
    Eof,
}

/// Where the session gets its input. Each call blocks until the user has
/// answered; nothing else is read meanwhile.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<LineEvent, ShellError>;

    fn question(&mut self, text: &str) -> Result<LineEvent, ShellError>;

    /// Returns and clears an interrupt that arrived while no read was in
    /// progress, e.g. while a query was running.
    fn take_interrupt(&mut self) -> bool;
}

/// Interactive terminal input backed by rustyline.
pub struct TerminalSource {
    editor: Editor<QueryHelper, DefaultHistory>,
    interrupted: Arc<AtomicBool>,
}

impl TerminalSource {
    pub fn new(
        suggester: Box<dyn Suggester>,
        prompt: &str,
        theme: Theme,
    ) -> Result<Self, ShellError> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .history_ignore_dups(true)?
            .build();

        let mut editor = Editor::<QueryHelper, DefaultHistory>::with_config(config)?;
        editor.set_helper(Some(QueryHelper::new(suggester, prompt, theme)));

        // While the editor owns the terminal, Ctrl-C comes back from
        // `readline` as `Interrupted`. Outside of it, the signal lands here.
        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })?;

        Ok(TerminalSource {
            editor,
            interrupted,
        })
    }

    fn read(&mut self, prompt: &str) -> Result<LineEvent, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(LineEvent::Line(line)),
            Err(ReadlineError::Interrupted) => {
                trace!("interrupt while reading");
                Ok(LineEvent::Interrupted)
            }
            Err(ReadlineError::Eof) => Ok(LineEvent::Eof),
            Err(e) => Err(e.into()),
        }
    }
}

impl LineSource for TerminalSource {
    fn read_line(&mut self, prompt: &str) -> Result<LineEvent, ShellError> {
        let event = self.read(prompt)?;
        if let LineEvent::Line(line) = &event {
            if !line.trim().is_empty() {
                self.editor.add_history_entry(line.as_str())?;
            }
        }
        Ok(event)
    }

    fn question(&mut self, text: &str) -> Result<LineEvent, ShellError> {
        self.read(text)
    }

    fn take_interrupt(&mut self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }
}

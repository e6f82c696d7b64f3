use std::borrow::Cow;

use crate::engine::Suggester;
use crate::highlight::Theme;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Line editor helper: completion comes from the suggestion engine, the
/// main prompt is drawn bold.
pub struct QueryHelper {
    suggester: Box<dyn Suggester>,
    prompt: String,
    theme: Theme,
}

impl QueryHelper {
    pub fn new(suggester: Box<dyn Suggester>, prompt: impl Into<String>, theme: Theme) -> Self {
        QueryHelper {
            suggester,
            prompt: prompt.into(),
            theme,
        }
    }

    /// The suggestion is the only candidate and replaces the whole partial
    /// line. No suggestion means no candidates, so the typed text stays.
    pub fn candidates(&self, partial: &str) -> Vec<Pair> {
        let suggestion = self.suggester.suggest(partial);
        if suggestion.is_empty() {
            return Vec::new();
        }

        vec![Pair {
            display: suggestion.clone(),
            replacement: suggestion,
        }]
    }
}

impl Helper for QueryHelper {}

impl Highlighter for QueryHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        if prompt == self.prompt {
            Cow::Owned(self.theme.prompt(prompt))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        false
    }
}

impl Hinter for QueryHelper {
    type Hint = String;
}

impl Validator for QueryHelper {}

impl Completer for QueryHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = line.get(..pos).unwrap_or(line);
        Ok((0, self.candidates(line_up_to_cursor)))
    }
}

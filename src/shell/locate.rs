use std::io::{self, Write};

use crate::engine::LocatedError;
use crate::highlight::Theme;

/// Column of the caret within the query, if the error says where it is.
///
/// The offending token's start wins; otherwise the caret goes one past the
/// end of the token before it.
pub fn locate(error: &LocatedError) -> Option<usize> {
    let start = error.token.as_ref().and_then(|t| t.start_offset);
    let after_previous = error
        .previous_token
        .as_ref()
        .and_then(|t| t.end_offset)
        .map(|end| end + 1);

    start.or(after_previous)
}

/// Draws a caret under the echoed `prompt + query` line, then the message.
pub fn report(
    out: &mut dyn Write,
    error: &LocatedError,
    prompt: &str,
    theme: &Theme,
) -> io::Result<()> {
    if let Some(column) = locate(error) {
        let padding = " ".repeat(column + prompt.chars().count());
        writeln!(out, "{}{}", theme.attention(&padding), theme.error("^"))?;
    }
    writeln!(out, "{}", theme.error(&error.message))
}

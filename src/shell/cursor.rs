//! Cursor control used to redraw the tail of the transcript.

use std::io::{self, Write};

use crossterm::cursor::MoveUp;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

pub fn move_up(out: &mut dyn Write, lines: u16) -> io::Result<()> {
    out.queue(MoveUp(lines))?;
    Ok(())
}

/// Clears from the cursor to the end of the screen.
pub fn clear_down(out: &mut dyn Write) -> io::Result<()> {
    out.queue(Clear(ClearType::FromCursorDown))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_sequences() {
        let mut out = Vec::new();
        move_up(&mut out, 2).unwrap();
        clear_down(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[2A\x1b[J");
    }
}

mod completer;
mod source;

pub use completer::QueryHelper;
pub use source::{LineEvent, LineSource, TerminalSource};

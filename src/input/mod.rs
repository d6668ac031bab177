//! Where command lines come from.

use std::io::{BufRead, Write};
use std::path::Path;

mod completer;
mod editor;

pub use completer::ShellCompleter;
pub use editor::EditorInput;

use crate::error::ShellError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// One line, without its line terminator.
    Line(String),
    /// The user pressed Ctrl-C while editing.
    Interrupted,
    Eof,
}

pub trait LineSource {
    /// Shows `prompt` and blocks for the next line.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError>;

    /// Tells the source where relative paths now point.
    fn set_cwd(&mut self, _cwd: &Path) {}
}

/// Reads lines from any `BufRead`, printing the prompt to `prompt_out`.
///
/// Used when stdin is not a terminal, and in tests.
pub struct PlainInput<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> PlainInput<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for PlainInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        // A closed stdout must not turn every read into an error.
        let _ = self.prompt_out.write_all(prompt.as_bytes());
        let _ = self.prompt_out.flush();

        let mut line = String::new();
        self.reader.read_line(&mut line)?;

        // Input that ends without a newline is dropped, not run.
        if line.pop() != Some('\n') {
            return Ok(ReadOutcome::Eof);
        }
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(ReadOutcome::Line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_plain_input_reads_lines_then_eof() {
        let mut prompts = Vec::new();
        let mut input = PlainInput::new(Cursor::new("ls\r\npwd\nlast"), &mut prompts);

        assert_eq!(input.read_line("> ").unwrap(), ReadOutcome::Line("ls".into()));
        assert_eq!(input.read_line("> ").unwrap(), ReadOutcome::Line("pwd".into()));
        assert_eq!(input.read_line("> ").unwrap(), ReadOutcome::Eof);
        drop(input);

        assert_eq!(prompts, b"> > > ");
    }

    #[test]
    fn test_plain_input_unterminated_line_is_eof() {
        let mut input = PlainInput::new(Cursor::new("touch made"), std::io::sink());
        assert_eq!(input.read_line("").unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_plain_input_blank_line() {
        let mut input = PlainInput::new(Cursor::new("\n"), std::io::sink());
        assert_eq!(input.read_line("").unwrap(), ReadOutcome::Line(String::new()));
        assert_eq!(input.read_line("").unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_plain_input_invalid_utf8_is_an_error() {
        let mut input = PlainInput::new(Cursor::new(&b"\xff\xfe\nok\n"[..]), std::io::sink());
        assert!(input.read_line("").is_err());
        assert_eq!(input.read_line("").unwrap(), ReadOutcome::Line("ok".into()));
    }
}

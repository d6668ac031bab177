use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};

use super::{LineSource, ReadOutcome, ShellCompleter};
use crate::error::ShellError;

/// Terminal line editing with completion, highlighting and in-memory history.
pub struct EditorInput {
    editor: Editor<ShellCompleter, DefaultHistory>,
}

impl EditorInput {
    pub fn new(cwd: &Path, color: bool) -> Result<Self, ShellError> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(true)
            .history_ignore_space(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(ShellCompleter::new(cwd, color)));
        Ok(Self { editor })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn set_cwd(&mut self, cwd: &Path) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_cwd(cwd);
        }
    }
}

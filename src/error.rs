use std::io;

use thiserror::Error;

/// Failures of the shell itself: startup, logging setup and the input stream.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("{0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("Ctrl-C error: {0}")]
    CtrlC(#[from] ctrlc::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

/// Failures of a single command invocation. None of these end the loop.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Wrong number of arguments; carries the usage line.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// A filesystem primitive failed; `context` names the operation.
    #[error("{context}: {source}")]
    Fs {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Unknown command: {0}")]
    NotFound(String),

    /// Writing to the output stream failed.
    #[error("Error writing output: {0}")]
    Output(#[from] io::Error),
}

impl CommandError {
    /// Builds a mapper for `map_err` that tags an I/O error with `context`.
    pub fn fs(context: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let context = context.into();
        move |source| CommandError::Fs { context, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_display() {
        let usage = CommandError::Usage("cp <source> <dest>");
        assert_eq!(usage.to_string(), "Usage: cp <source> <dest>");

        let missing = CommandError::NotFound("zzz".to_string());
        assert_eq!(missing.to_string(), "Unknown command: zzz");

        let fs = CommandError::fs("Error moving file")(io::Error::new(
            io::ErrorKind::NotFound,
            "No such file or directory",
        ));
        assert_eq!(fs.to_string(), "Error moving file: No such file or directory");
    }

    #[test]
    fn test_io_error_converts_to_output() {
        let err: CommandError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(matches!(err, CommandError::Output(_)));
        assert_eq!(err.to_string(), "Error writing output: pipe closed");
    }
}

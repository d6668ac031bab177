use std::io::Write;

use tracing::debug;

use crate::{
    config::Config,
    core::commands::{CommandExecutor, Flow},
    fs::FileSystem,
    input::{LineSource, ReadOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    AwaitingInput,
    Terminated,
}

/// The read-eval-print loop.
pub struct Shell<F: FileSystem> {
    executor: CommandExecutor<F>,
    prompt: String,
    state: ShellState,
}

impl<F: FileSystem> Shell<F> {
    pub fn new(fs: F, config: &Config) -> Self {
        Shell {
            executor: CommandExecutor::new(fs, config),
            prompt: config.prompt.clone(),
            state: ShellState::AwaitingInput,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> ShellState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn executor(&self) -> &CommandExecutor<F> {
        &self.executor
    }

    /// Loops until `exit` or end of input. Nothing a command does can stop it.
    pub fn run<I: LineSource + ?Sized>(
        &mut self,
        input: &mut I,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) {
        while self.state == ShellState::AwaitingInput {
            self.step(input, out, err);
        }
        debug!("shell terminated");
    }

    /// One prompt, one read, at most one command.
    pub fn step<I: LineSource + ?Sized>(
        &mut self,
        input: &mut I,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) {
        if self.state == ShellState::Terminated {
            return;
        }

        if let Ok(cwd) = self.executor.fs().current_dir() {
            input.set_cwd(&cwd);
        }

        match input.read_line(&self.prompt) {
            Ok(ReadOutcome::Line(line)) => {
                if self.executor.execute_line(&line, out, err) == Flow::Exit {
                    self.state = ShellState::Terminated;
                }
            }
            Ok(ReadOutcome::Interrupted) => {
                let _ = writeln!(out, "^C");
            }
            Ok(ReadOutcome::Eof) => {
                debug!("end of input");
                self.state = ShellState::Terminated;
            }
            Err(e) => {
                debug!(error = %e, "failed to read input");
                let _ = writeln!(err, "Error reading input: {}", e);
            }
        }
    }
}

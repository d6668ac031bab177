use std::io::Write;

use tracing::debug;

mod dirs;
mod files;
mod text;

use crate::config::Config;
use crate::core::line::CommandLine;
use crate::error::CommandError;
use crate::fs::FileSystem;

/// Name that ends the loop. It is not a handler.
pub const EXIT: &str = "exit";

/// What the loop does after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything a handler may touch for one invocation.
pub struct Context<'a, F: FileSystem + ?Sized> {
    pub fs: &'a mut F,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub window_size: usize,
}

impl<F: FileSystem + ?Sized> Context<'_, F> {
    /// Writes `error` where it belongs: unknown commands to stdout, the rest
    /// to stderr. A failing stream is ignored; there's nowhere left to report.
    pub fn report(&mut self, error: &CommandError) {
        let stream = match error {
            CommandError::NotFound(_) => &mut *self.out,
            _ => &mut *self.err,
        };
        let _ = writeln!(stream, "{}", error);
    }
}

pub trait Command<F: FileSystem + ?Sized> {
    fn execute(&self, args: &[String], ctx: &mut Context<'_, F>) -> Result<(), CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Ls,
    Cat,
    Cd,
    Pwd,
    Touch,
    Mkdir,
    Rm,
    Cp,
    Mv,
    Echo,
    Head,
    Tail,
    Whoami,
}

impl Builtin {
    pub const ALL: [Builtin; 13] = [
        Builtin::Ls,
        Builtin::Cat,
        Builtin::Cd,
        Builtin::Pwd,
        Builtin::Touch,
        Builtin::Mkdir,
        Builtin::Rm,
        Builtin::Cp,
        Builtin::Mv,
        Builtin::Echo,
        Builtin::Head,
        Builtin::Tail,
        Builtin::Whoami,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Ls => "ls",
            Builtin::Cat => "cat",
            Builtin::Cd => "cd",
            Builtin::Pwd => "pwd",
            Builtin::Touch => "touch",
            Builtin::Mkdir => "mkdir",
            Builtin::Rm => "rm",
            Builtin::Cp => "cp",
            Builtin::Mv => "mv",
            Builtin::Echo => "echo",
            Builtin::Head => "head",
            Builtin::Tail => "tail",
            Builtin::Whoami => "whoami",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }
}

impl<F: FileSystem + ?Sized> Command<F> for Builtin {
    fn execute(&self, args: &[String], ctx: &mut Context<'_, F>) -> Result<(), CommandError> {
        match self {
            Builtin::Ls => dirs::ls(args, ctx),
            Builtin::Cat => files::cat(args, ctx),
            Builtin::Cd => dirs::cd(args, ctx),
            Builtin::Pwd => dirs::pwd(ctx),
            Builtin::Touch => files::touch(args, ctx),
            Builtin::Mkdir => dirs::mkdir(args, ctx),
            Builtin::Rm => files::rm(args, ctx),
            Builtin::Cp => files::cp(args, ctx),
            Builtin::Mv => files::mv(args, ctx),
            Builtin::Echo => text::echo(args, ctx),
            Builtin::Head => text::head(args, ctx),
            Builtin::Tail => text::tail(args, ctx),
            Builtin::Whoami => text::whoami(ctx),
        }
    }
}

/// Whether `name` is something the shell runs: a builtin or `exit`.
pub fn is_command(name: &str) -> bool {
    name == EXIT || Builtin::from_name(name).is_some()
}

/// Routes command lines to builtins against one filesystem.
pub struct CommandExecutor<F: FileSystem> {
    fs: F,
    window_size: usize,
}

impl<F: FileSystem> CommandExecutor<F> {
    pub fn new(fs: F, config: &Config) -> Self {
        Self {
            fs,
            window_size: config.window_size,
        }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Tokenizes and runs one raw input line.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write, err: &mut dyn Write) -> Flow {
        match CommandLine::parse(line) {
            Some(command) => self.execute(&command, out, err),
            None => Flow::Continue,
        }
    }

    /// Runs one command. Failures are written out here and never returned.
    pub fn execute(
        &mut self,
        command: &CommandLine,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Flow {
        if command.name == EXIT {
            debug!("exit requested");
            return Flow::Exit;
        }

        let mut ctx = Context {
            fs: &mut self.fs,
            out,
            err,
            window_size: self.window_size,
        };

        let result = match Builtin::from_name(&command.name) {
            Some(builtin) => {
                debug!(command = builtin.name(), args = command.args.len(), "dispatching");
                builtin.execute(&command.args, &mut ctx)
            }
            None => Err(CommandError::NotFound(command.name.clone())),
        };

        if let Err(e) = result {
            debug!(command = %command.name, error = %e, "command failed");
            ctx.report(&e);
        }
        let _ = ctx.out.flush();
        Flow::Continue
    }
}

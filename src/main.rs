use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use fsh::config::{Config, InputMode, DEFAULT_PROMPT, DEFAULT_WINDOW_SIZE};
use fsh::error::ShellError;
use fsh::fs::{FileSystem, OsFileSystem};
use fsh::input::{EditorInput, LineSource, PlainInput};
use fsh::shell::Shell;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// fsh - a small interactive shell for everyday file operations
#[derive(Parser, Debug)]
#[command(name = "fsh", version, about)]
struct Args {
    /// Number of lines printed by head and tail
    #[arg(short = 'n', long = "lines", env = "FSH_LINES", default_value_t = DEFAULT_WINDOW_SIZE)]
    lines: usize,

    /// Prompt shown before each command
    #[arg(short, long, env = "FSH_PROMPT", default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Read plain lines even when stdin is a terminal
    #[arg(long)]
    plain: bool,

    /// Disable syntax highlighting
    #[arg(long)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn config(&self) -> Config {
        let input_mode = if self.plain {
            InputMode::Plain
        } else {
            InputMode::Auto
        };
        Config::new()
            .with_window_size(self.lines)
            .with_prompt(self.prompt.clone())
            .with_input_mode(input_mode)
            .with_color(!self.no_color)
    }
}

fn init_logging(debug: bool) -> Result<(), ShellError> {
    let filter = if debug {
        EnvFilter::new("fsh=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ShellError::Logging(e.to_string()))
}

fn run(config: Config) -> Result<(), ShellError> {
    let fs = OsFileSystem::new()?;
    let cwd = fs.current_dir()?;

    ctrlc::set_handler(move || {
        println!("\nUse 'exit' to exit the shell");
    })?;

    let interactive = config.input_mode == InputMode::Auto && io::stdin().is_terminal();
    debug!(interactive, cwd = %cwd.display(), "starting shell");

    let mut input: Box<dyn LineSource> = if interactive {
        Box::new(EditorInput::new(&cwd, config.color)?)
    } else {
        Box::new(PlainInput::new(io::stdin().lock(), io::stdout()))
    };

    let mut shell = Shell::new(fs, &config);
    shell.run(input.as_mut(), &mut io::stdout(), &mut io::stderr());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.debug) {
        eprintln!("fsh: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args.config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fsh: {}", e);
            ExitCode::FAILURE
        }
    }
}

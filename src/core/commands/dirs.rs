use std::path::Path;

use tracing::debug;

use super::Context;
use crate::error::CommandError;
use crate::fs::FileSystem;

pub(super) fn ls<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    let dir = args.first().map_or(".", String::as_str);
    let entries = ctx
        .fs
        .read_dir(Path::new(dir))
        .map_err(CommandError::fs("Error reading directory"))?;

    for entry in entries {
        if entry.is_dir {
            writeln!(ctx.out, "{}/", entry.name)?;
        } else {
            writeln!(ctx.out, "{}\t{}", entry.name, entry.size)?;
        }
    }
    Ok(())
}

/// Changes to the first argument. There is no home-directory default.
pub(super) fn cd<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    let target = args.first().ok_or(CommandError::Usage("cd <directory>"))?;
    ctx.fs
        .set_current_dir(Path::new(target))
        .map_err(CommandError::fs("Error changing directory"))?;

    if let Ok(cwd) = ctx.fs.current_dir() {
        debug!(cwd = %cwd.display(), "working directory changed");
    }
    Ok(())
}

pub(super) fn pwd<F: FileSystem + ?Sized>(ctx: &mut Context<'_, F>) -> Result<(), CommandError> {
    let cwd = ctx
        .fs
        .current_dir()
        .map_err(CommandError::fs("Error getting working directory"))?;
    writeln!(ctx.out, "{}", cwd.display())?;
    Ok(())
}

pub(super) fn mkdir<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(CommandError::Usage("mkdir <directory>"));
    }

    for dir in args {
        if let Err(e) = ctx.fs.create_dir(Path::new(dir)) {
            let error = CommandError::fs(format!("Error creating directory {}", dir))(e);
            ctx.report(&error);
        }
    }
    Ok(())
}

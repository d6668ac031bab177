use std::path::Path;

use super::Context;
use crate::core::window::{self, WindowMode};
use crate::error::CommandError;
use crate::fs::FileSystem;

pub(super) fn echo<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    writeln!(ctx.out, "{}", args.join(" "))?;
    Ok(())
}

pub(super) fn head<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    print_window(args, ctx, WindowMode::Head)
}

pub(super) fn tail<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    print_window(args, ctx, WindowMode::Tail)
}

fn print_window<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
    mode: WindowMode,
) -> Result<(), CommandError> {
    let filename = args.first().ok_or(match mode {
        WindowMode::Head => CommandError::Usage("head <filename>"),
        WindowMode::Tail => CommandError::Usage("tail <filename>"),
    })?;

    let content = ctx
        .fs
        .read(Path::new(filename))
        .map_err(CommandError::fs("Error opening file"))?;
    let lines = window::split_lines(&content);

    for line in window::select(&lines, ctx.window_size, mode) {
        ctx.out.write_all(line)?;
        ctx.out.write_all(b"\n")?;
    }
    Ok(())
}

pub(super) fn whoami<F: FileSystem + ?Sized>(ctx: &mut Context<'_, F>) -> Result<(), CommandError> {
    let user = ctx
        .fs
        .env_var("USER")
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    writeln!(ctx.out, "{}", user)?;
    Ok(())
}

use std::borrow::Cow;

use inksac::prelude::*;

use crate::core::commands::is_command;

/// Colors the command word of the line being edited: cyan when it names a
/// command, red otherwise.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl SyntaxHighlighter {
    pub fn new(enabled: bool) -> Self {
        let support = if enabled {
            check_color_support().unwrap_or(ColorSupport::NoColor)
        } else {
            ColorSupport::NoColor
        };
        Self {
            color_support: support,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    pub fn highlight_command<'l>(&self, input: &'l str) -> Cow<'l, str> {
        if !self.is_enabled() {
            return Cow::Borrowed(input);
        }

        let Some((start, end)) = command_span(input) else {
            return Cow::Borrowed(input);
        };
        let word = &input[start..end];

        let style = if is_command(word) {
            Style::builder().foreground(Color::Cyan).bold().build()
        } else {
            Style::builder().foreground(Color::Red).build()
        };

        Cow::Owned(format!(
            "{}{}{}",
            &input[..start],
            word.style(style),
            &input[end..]
        ))
    }
}

/// Byte range of the first whitespace-delimited word.
fn command_span(input: &str) -> Option<(usize, usize)> {
    let start = input.find(|c: char| !c.is_whitespace())?;
    let end = input[start..]
        .find(char::is_whitespace)
        .map_or(input.len(), |len| start + len);
    Some((start, end))
}

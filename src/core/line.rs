/// One tokenized input line: a command name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Splits `input` on runs of whitespace. `None` for a blank line.
    pub fn parse(input: &str) -> Option<Self> {
        let mut tokens = input.split_whitespace().map(String::from);
        let name = tokens.next()?;
        Some(CommandLine {
            name,
            args: tokens.collect(),
        })
    }
}

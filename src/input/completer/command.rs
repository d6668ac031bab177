use rustyline::completion::Pair;

use crate::core::commands::{Builtin, EXIT};

/// Completes the first word against the fixed command set.
#[derive(Clone)]
pub struct CommandCompleter {
    commands: Vec<&'static str>,
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut commands: Vec<&'static str> = Builtin::ALL.iter().map(|b| b.name()).collect();
        commands.push(EXIT);
        commands.sort_unstable();
        Self { commands }
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let input = input.trim();
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn displays(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.display).collect()
    }

    #[test]
    fn test_prefix_matches() {
        let completer = CommandCompleter::new();
        assert_eq!(displays(completer.complete_command("c")), ["cat", "cd", "cp"]);
        assert_eq!(displays(completer.complete_command("ex")), ["exit"]);
        assert!(completer.complete_command("zz").is_empty());
    }

    #[test]
    fn test_empty_prefix_lists_everything() {
        let completer = CommandCompleter::new();
        assert_eq!(completer.complete_command("").len(), Builtin::ALL.len() + 1);
    }

    #[test]
    fn test_replacement_adds_space() {
        let completer = CommandCompleter::new();
        let pairs = completer.complete_command("pw");
        assert_eq!(pairs[0].replacement, "pwd ");
    }
}

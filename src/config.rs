pub const DEFAULT_WINDOW_SIZE: usize = 10;
pub const DEFAULT_PROMPT: &str = "> ";

/// How the shell reads its command lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Line editor when stdin is a terminal, plain reads otherwise.
    #[default]
    Auto,
    /// Always read plain lines from stdin.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of lines `head` and `tail` print.
    pub window_size: usize,
    pub prompt: String,
    pub input_mode: InputMode,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            window_size: DEFAULT_WINDOW_SIZE,
            prompt: DEFAULT_PROMPT.to_string(),
            input_mode: InputMode::Auto,
            color: true,
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

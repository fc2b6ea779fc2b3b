//! Environment struct (program name, terminal detection)

/// Execution environment
#[derive(Debug, Clone)]
pub struct Environment {
    pub stderr_isatty: bool,
    pub program_name: String,
}

impl Environment {
    pub fn init() -> Self {
        Self::default()
    }

    /// Whether interactive progress output should be drawn
    pub fn show_progress(&self, quiet: bool) -> bool {
        self.stderr_isatty && !quiet
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            stderr_isatty: atty::is(atty::Stream::Stderr),
            program_name: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

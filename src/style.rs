//! Console styling.
//!
//! Colors are a value handed to whoever prints, never a global, so output
//! can be rendered plain for files, pipes and tests.

use std::io::{self, IsTerminal};

use owo_colors::OwoColorize;

/// Colors cycled across summary rows.
#[derive(Debug, Clone, Copy)]
enum Accent {
    Cyan,
    Yellow,
    Magenta,
    Blue,
    Green,
}

const ACCENT_CYCLE: [Accent; 5] = [
    Accent::Cyan,
    Accent::Yellow,
    Accent::Magenta,
    Accent::Blue,
    Accent::Green,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    pub const fn plain() -> Self {
        Self { color: false }
    }

    pub const fn colored() -> Self {
        Self { color: true }
    }

    /// Colored only when allowed and stdout is a terminal.
    pub fn detect(allow_color: bool) -> Self {
        Self::detect_on(allow_color, &io::stdout())
    }

    /// Colored only when allowed and `stream` is a terminal. Use this for
    /// anything not written to stdout.
    pub fn detect_on(allow_color: bool, stream: &impl IsTerminal) -> Self {
        Self {
            color: allow_color && stream.is_terminal(),
        }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    /// Paint `text` with the accent for row `index`.
    pub fn accent(&self, index: usize, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match ACCENT_CYCLE[index % ACCENT_CYCLE.len()] {
            Accent::Cyan => text.bright_cyan().to_string(),
            Accent::Yellow => text.bright_yellow().to_string(),
            Accent::Magenta => text.bright_magenta().to_string(),
            Accent::Blue => text.bright_blue().to_string(),
            Accent::Green => text.bright_green().to_string(),
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        if self.color {
            text.bright_green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        if self.color {
            text.bright_yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.bright_red().to_string()
        } else {
            text.to_string()
        }
    }
}

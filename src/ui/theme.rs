//! Console palette for registrar output
//!
//! Every styled string goes through [`Theme::paint`] with the [`Tone`] of the
//! thing being shown, so record keys, grades and status lines look the same
//! in the menu and in one-shot commands.

use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// What a piece of console text means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Section and menu titles
    Title,
    /// A change that was applied or a file that was written
    Done,
    Failure,
    Caution,
    /// Field labels in detail views
    Label,
    /// A student ID or course code
    Key,
    Grade,
    Prompt,
}

#[derive(Debug, Clone)]
pub struct Theme {
    colored: bool,
}

impl Theme {
    /// Colours follow `NO_COLOR`, then `CLICOLOR_FORCE`, then whether stdout
    /// is a terminal.
    pub fn detect() -> Self {
        let colored = if std::env::var_os("NO_COLOR").is_some() {
            false
        } else if std::env::var_os("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
            true
        } else {
            console::Term::stdout().is_term()
        };
        Self { colored }
    }

    pub fn colored() -> Self {
        Self { colored: true }
    }

    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    pub fn style(&self, tone: Tone) -> Style {
        if !self.colored {
            return Style::new();
        }
        match tone {
            Tone::Title => Style::new().cyan().bold(),
            Tone::Done => Style::new().green().bold(),
            Tone::Failure => Style::new().red().bold(),
            Tone::Caution => Style::new().yellow().bold(),
            Tone::Label => Style::new().white().dimmed(),
            Tone::Key => Style::new().magenta(),
            Tone::Grade => Style::new().yellow(),
            Tone::Prompt => Style::new().bright_blue(),
        }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        text.style(self.style(tone)).to_string()
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

//! # Output Configuration
//!
//! Controls whether report headings are styled. Styling never changes the
//! text itself, only wraps it in terminal escapes.
//!
//! In `auto` mode the usual conventions are respected:
//! - `NO_COLOR` (any value) disables color (https://no-color.org/)
//! - `CLICOLOR=0` disables color
//! - `CLICOLOR_FORCE` (non-empty, not `0`) forces color even without a TTY
//! - `TERM=dumb` disables color
//! - otherwise color follows stdout TTY detection from `console`

use clap::ValueEnum;
use console::style;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// Output configuration for report styling.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve a `--color` choice against the process environment.
    pub fn new(choice: ColorChoice) -> Self {
        Self::resolve(
            choice,
            |key| std::env::var(key).ok(),
            || console::Term::stdout().features().colors_supported(),
        )
    }

    /// Plain output, used when stdout is not a terminal we care about.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    fn resolve(
        choice: ColorChoice,
        env: impl Fn(&str) -> Option<String>,
        tty_colors: impl FnOnce() -> bool,
    ) -> Self {
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if env("NO_COLOR").is_some() {
                    false
                } else if env("CLICOLOR").is_some_and(|v| v == "0") {
                    false
                } else if env("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
                    true
                } else if env("TERM").is_some_and(|v| v == "dumb") {
                    false
                } else {
                    tty_colors()
                }
            }
        };
        Self { use_color }
    }

    /// Render the heading line of a divergent path.
    pub fn heading(&self, text: &str) -> String {
        if self.use_color {
            style(text).bold().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

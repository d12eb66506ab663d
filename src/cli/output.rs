//! Colored terminal output for command results.
//!
//! Results go to stdout, warnings and errors to stderr. Logging through the
//! `log` facade is separate and controlled by `RUST_LOG`. Colors follow
//! `colored`'s detection, so piped output and `NO_COLOR` stay plain.

use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Prints user-facing messages, honouring `--quiet`.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Plain line on stdout.
    pub fn println(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{message}")
    }

    /// Step in progress.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.println(&prefixed("→".cyan(), message))
    }

    /// Completed step.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.println(&prefixed("✓".green().bold(), message))
    }

    /// Indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.println(&format!("  {}", message.dimmed()))
    }

    /// Section heading.
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.println(&title.bold().to_string())?;
        self.println(&"─".repeat(title.chars().count()))
    }

    /// Warning on stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stderr().lock(), "{}", prefixed("⚠".yellow().bold(), message))
    }

    /// Error on stderr. Printed even when quiet.
    pub fn error(&self, message: &str) -> io::Result<()> {
        writeln!(
            io::stderr().lock(),
            "{}",
            prefixed("✗".red().bold(), &message.red().to_string())
        )
    }
}

fn prefixed(glyph: ColoredString, message: &str) -> String {
    format!("{glyph} {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_keeps_message_text_intact() {
        colored::control::set_override(false);
        assert_eq!(prefixed("✓".green(), "Generated Mail"), "✓ Generated Mail");
        colored::control::unset_override();
    }

    #[test]
    fn quiet_suppresses_stdout_lines() {
        let output = OutputManager::new(true);
        assert!(output.success("hidden").is_ok());
        assert!(output.section("hidden").is_ok());
    }
}

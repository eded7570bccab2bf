//! Command-line interface for `classroom`.
//!
//! # Examples
//!
//! ```bash
//! # Run with default settings
//! classroom
//!
//! # Open on the directory screen with data in a custom folder
//! classroom --page directory --data-dir ./class-data
//!
//! # Run headless self-check (for CI)
//! classroom --self-check
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::messages::Page;

/// Classroom - terminal exercises for lists, forms and a member directory.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(
    name = "classroom",
    author,
    version,
    about = "Classroom - todo lists, GPA calculator and member directory in the terminal"
)]
pub struct Cli {
    /// Directory holding saved records and the log file
    ///
    /// Defaults to the platform data directory (e.g. ~/.local/share/classroom)
    #[arg(long, short = 'd', env = "CLASSROOM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Screen to open first
    ///
    /// One of: practice, todo-basic, todo-extended, todo-form,
    /// todo-validated, gpa, directory
    #[arg(long, short = 'p', env = "CLASSROOM_PAGE")]
    pub page: Option<Page>,

    /// Force color output off
    ///
    /// Respects `NO_COLOR` environment variable
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Force color output on (overrides `NO_COLOR`)
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Disable alternate screen mode
    #[arg(long, env = "CLASSROOM_NO_ALT_SCREEN")]
    pub no_alt_screen: bool,

    /// Run headless self-check and exit
    ///
    /// Drives every screen without a TTY; useful for CI
    #[arg(long)]
    pub self_check: bool,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Check if running in headless mode.
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.self_check
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::try_parse_from(["classroom"]).unwrap();

        assert!(cli.page.is_none());
        assert!(!cli.no_alt_screen);
        assert!(!cli.self_check);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parses_page() {
        let cli = Cli::try_parse_from(["classroom", "--page", "gpa"]).unwrap();
        assert_eq!(cli.page, Some(Page::Gpa));

        let cli = Cli::try_parse_from(["classroom", "-p", "todo-validated"]).unwrap();
        assert_eq!(cli.page, Some(Page::TodoValidated));
    }

    #[test]
    fn cli_rejects_unknown_page() {
        assert!(Cli::try_parse_from(["classroom", "--page", "settings"]).is_err());
    }

    #[test]
    fn cli_parses_data_dir() {
        let cli = Cli::try_parse_from(["classroom", "--data-dir", "/tmp/class"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/class")));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "classroom",
            "--no-color",
            "--no-alt-screen",
            "--self-check",
            "-vv",
        ])
        .unwrap();

        assert!(cli.no_color);
        assert!(cli.no_alt_screen);
        assert!(cli.is_headless());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_force_color_conflicts_with_no_color() {
        let result = Cli::try_parse_from(["classroom", "--no-color", "--force-color"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_help_works() {
        let result = Cli::try_parse_from(["classroom", "--help"]);
        assert!(result.is_err());
    }
}

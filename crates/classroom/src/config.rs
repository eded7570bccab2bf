//! Runtime configuration for `classroom`.
//!
//! The [`Config`] struct is the single source of truth for runtime options,
//! independent of whether they came from flags or the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::messages::Page;

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "classroom";

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "classroom.log";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where records and the log file live.
    pub data_dir: PathBuf,

    /// Screen shown at startup.
    pub start_page: Page,

    /// Color output mode.
    pub color_mode: ColorMode,

    /// Whether to use alternate screen mode.
    pub alt_screen: bool,

    /// Whether running in headless self-check mode.
    pub self_check: bool,

    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            start_page: Page::default(),
            color_mode: ColorMode::Auto,
            alt_screen: true,
            self_check: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Create config from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let color_mode = if cli.force_color {
            ColorMode::Always
        } else if cli.no_color {
            ColorMode::Never
        } else {
            ColorMode::Auto
        };

        Self {
            data_dir: cli.data_dir.clone().unwrap_or_else(default_data_dir),
            start_page: cli.page.unwrap_or_default(),
            color_mode,
            alt_screen: !cli.no_alt_screen,
            self_check: cli.self_check,
            verbosity: cli.verbose,
        }
    }

    /// Check if colors should be used.
    #[must_use]
    pub fn use_color(&self) -> bool {
        match self.color_mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty()),
        }
    }

    /// Path of the log file.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    /// Default tracing filter directive for the verbosity level.
    #[must_use]
    pub const fn log_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Check if running in headless mode.
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.self_check
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory path is unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(ConfigError::DataDirNotDirectory(self.data_dir.clone()));
        }

        Ok(())
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        [
            format!("Data dir: {}", self.data_dir.display()),
            format!("Start page: {}", self.start_page),
            format!("Color mode: {:?}", self.color_mode),
            format!(
                "Alt screen: {}",
                if self.alt_screen { "on" } else { "off" }
            ),
            format!("Self-check: {}", self.self_check),
            format!("Verbosity: {}", self.verbosity),
        ]
        .join("\n")
    }
}

/// Platform data directory for the app, or `./.classroom` when the
/// platform has none.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || Path::new(".").join(format!(".{APP_DIR_NAME}")),
        |dir| dir.join(APP_DIR_NAME),
    )
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Color unless `NO_COLOR` is set.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Data directory path is empty.
    #[error("Data directory path is empty")]
    EmptyDataDir,

    /// Data directory path points at a file.
    #[error("Data directory is not a directory: {0}")]
    DataDirNotDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default() {
        let config = Config::default();

        assert_eq!(config.start_page, Page::Practice);
        assert_eq!(config.color_mode, ColorMode::Auto);
        assert!(config.alt_screen);
        assert!(!config.self_check);
        assert!(config.data_dir.ends_with(APP_DIR_NAME) || config.data_dir.ends_with(".classroom"));
    }

    #[test]
    fn config_from_cli_defaults() {
        let cli = Cli::try_parse_from(["classroom"]).unwrap();
        let config = Config::from_cli(&cli);

        assert_eq!(config.start_page, Page::Practice);
        assert!(config.alt_screen);
        assert_eq!(config.log_directive(), "warn");
    }

    #[test]
    fn config_from_cli_color_modes() {
        let cli = Cli::try_parse_from(["classroom", "--no-color"]).unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.color_mode, ColorMode::Never);
        assert!(!config.use_color());

        let cli = Cli::try_parse_from(["classroom", "--force-color"]).unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.color_mode, ColorMode::Always);
        assert!(config.use_color());
    }

    #[test]
    fn config_from_cli_flags() {
        let cli = Cli::try_parse_from([
            "classroom",
            "--data-dir",
            "/tmp/classroom-test",
            "--page",
            "directory",
            "--no-alt-screen",
            "--self-check",
            "-vvv",
        ])
        .unwrap();
        let config = Config::from_cli(&cli);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/classroom-test"));
        assert_eq!(config.start_page, Page::Directory);
        assert!(!config.alt_screen);
        assert!(config.is_headless());
        assert_eq!(config.log_directive(), "trace");
        assert_eq!(
            config.log_file(),
            PathBuf::from("/tmp/classroom-test").join(LOG_FILE_NAME)
        );
    }

    #[test]
    fn config_validate_missing_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("not-yet-created"),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_validate_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config {
            data_dir: file.path().to_path_buf(),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DataDirNotDirectory(file.path().to_path_buf()))
        );
    }

    #[test]
    fn config_validate_rejects_empty() {
        let config = Config {
            data_dir: PathBuf::new(),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyDataDir));
    }

    #[test]
    fn config_serde_round_trip() {
        let config = Config {
            data_dir: PathBuf::from("/data"),
            start_page: Page::Gpa,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""start_page":"gpa""#));
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn config_diagnostic_string() {
        let config = Config::default();
        let diag = config.to_diagnostic_string();
        assert!(diag.contains("Data dir:"));
        assert!(diag.contains("Start page: Practice"));
    }
}

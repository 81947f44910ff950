use std::path::PathBuf;

use thiserror::Error;

use crate::core::naming::{Issue, Mode, TemplateError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config file does not exist: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Error reading config file ({}): {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        source: config::ConfigError,
    },

    #[error("Regex must be provided by `-r`/`-p` flag or in the config file ({mode} mode)")]
    MissingRegex { mode: Mode },

    #[error("Unknown {mode} preset '{name}'")]
    UnknownPreset { mode: Mode, name: String },

    #[error("Failed to parse regex: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("Failed to parse template: {0}")]
    TemplateError(#[from] TemplateError),

    #[error("Refusing to rename '{}': {}", .path.display(), join_issues(.issues))]
    InvalidName { path: PathBuf, issues: Vec<Issue> },

    #[error("Target already exists: {}", .0.display())]
    TargetExists(PathBuf),

    #[error("Failed to rename '{}' -> '{}': {source}", .from.display(), .to.display())]
    RenameError {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("{failed} of {total} files could not be renamed")]
    Incomplete { failed: usize, total: usize },
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

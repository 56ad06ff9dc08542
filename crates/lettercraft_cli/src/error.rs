//! Error types for command-line input.

use thiserror::Error;

/// Errors caused by what the user typed rather than by content or I/O.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Template not found: {0}")]
    UnknownTemplate(String),

    #[error("Unknown variable '{variable}' for template '{template}'")]
    UnknownVariable { variable: String, template: String },

    #[error("Invalid argument '{0}': expected KEY=VALUE")]
    InvalidPair(String),

    #[error("Invalid argument {flag}: {message}")]
    InvalidValue { flag: String, message: String },
}

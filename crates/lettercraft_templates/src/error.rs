//! Error types for templates and catalogues.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while managing templates and variable catalogues.
///
/// Rendering never fails; these cover catalogue validation, library edits
/// and loading content from disk.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template already exists: {0}")]
    AlreadyExists(String),

    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    #[error("Duplicate variable id in catalogue: {0}")]
    DuplicateVariableId(String),

    #[error("Duplicate variable name in catalogue: {0}")]
    DuplicateVariableName(String),

    #[error("Invalid variable definition {variable}: {message}")]
    InvalidVariable { variable: String, message: String },

    #[error("Invalid template file {path}: {message}")]
    InvalidTemplateFile { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

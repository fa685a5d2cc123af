use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Run arguments file not found: {path:?}")]
    RunArgumentsNotFound { path: PathBuf },

    #[error("No template for module {module:?} at {path:?}")]
    TemplateNotFound { module: String, path: PathBuf },

    #[error("Module name must not be empty")]
    EmptyModuleName,

    #[error(transparent)]
    Module(#[from] modrun::Error),
}

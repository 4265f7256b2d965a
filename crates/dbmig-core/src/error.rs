//! Error types for dbmig-core

use thiserror::Error;

/// Core error type for dbmig
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Required environment variable missing or empty
    #[error("[C001] Missing environment variable: {name}")]
    MissingEnv { name: String },
}

/// Result type alias for [`CoreError`]
pub type CoreResult<T> = Result<T, CoreError>;

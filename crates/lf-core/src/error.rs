//! Error types for lf-core

use thiserror::Error;

/// Core error type for Lakeflow
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Project directory not found
    #[error("[E004] Project directory not found: {path}")]
    ProjectNotFound { path: String },

    /// E005: Model file not found
    #[error("[E005] Model not found: {name}")]
    ModelNotFound { name: String },

    /// E006: Duplicate model name across model paths
    #[error("[E006] Duplicate model name: {name}")]
    DuplicateModel { name: String },

    /// E007: Same model described by more than one schema file
    #[error("[E007] Duplicate schema entry for model: {name}")]
    DuplicateSchemaEntry { name: String },

    /// E008: Unsupported schema descriptor version
    #[error("[E008] Unsupported schema version: {version} (expected 2)")]
    UnsupportedSchemaVersion { version: u32 },

    /// E009: Schema descriptor parse error
    #[error("[E009] Failed to parse schema file {path}: {message}")]
    SchemaParse { path: String, message: String },

    /// E010: IO error
    #[error("[E010] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E011: IO error with file path context
    #[error("[E011] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

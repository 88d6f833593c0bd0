//! Error types for lf-run

use lf_core::CoreError;
use lf_db::DbError;
use lf_jinja::JinjaError;
use thiserror::Error;

/// Run engine errors
#[derive(Error, Debug)]
pub enum RunError {
    /// Project/config/schema layer error (R001)
    #[error("[R001] {0}")]
    Core(#[from] CoreError),

    /// Template render failure for a model (R002)
    #[error("[R002] Failed to render model '{model}': {source}")]
    Render {
        model: String,
        source: JinjaError,
    },

    /// Database layer error (R003)
    #[error("[R003] {0}")]
    Db(#[from] DbError),

    /// Enforced contract did not match the model's output (R004)
    #[error("[R004] {report}")]
    ContractMismatch { model: String, report: String },

    /// A constraint was violated at runtime (R005)
    #[error("[R005] {message}")]
    ConstraintViolation { relation: String, message: String },

    /// Incremental schema drift with on_schema_change: fail (R006)
    #[error("[R006] Schema change detected for '{model}': {message}")]
    SchemaChange { model: String, message: String },

    /// Model configuration is inconsistent (R007)
    #[error("[R007] Invalid config for model '{model}': {message}")]
    InvalidModelConfig { model: String, message: String },

    /// Clone operation failed (R008)
    #[error("[R008] Clone failed: {message}")]
    CloneFailed { message: String },
}

/// Result type alias for RunError
pub type RunResult<T> = Result<T, RunError>;

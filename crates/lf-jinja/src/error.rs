//! Error types for lf-jinja

use std::error::Error as StdError;
use thiserror::Error;

/// Templating errors
#[derive(Error, Debug)]
pub enum JinjaError {
    /// Template render failure (J001)
    #[error("[J001] Template render failed: {0}")]
    Render(String),

    /// Config capture state poisoned (J002)
    #[error("[J002] Config capture mutex poisoned: {0}")]
    CapturePoisoned(String),
}

impl From<minijinja::Error> for JinjaError {
    fn from(err: minijinja::Error) -> Self {
        // include the source chain; minijinja's Display alone drops the
        // underlying cause for nested errors
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        JinjaError::Render(message)
    }
}

/// Result type alias for JinjaError
pub type JinjaResult<T> = Result<T, JinjaError>;

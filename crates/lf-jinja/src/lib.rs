//! lf-jinja - Jinja templating for Lakeflow model SQL
//!
//! Provides the template environment models are rendered in: `config()`
//! capture, `var()` lookup, `ref()` resolution to schema-qualified names,
//! `this`, and `is_incremental()`.

pub mod environment;
pub mod error;
pub mod functions;

pub use environment::{JinjaEnvironment, RenderContext};
pub use error::{JinjaError, JinjaResult};
pub use functions::IncrementalState;

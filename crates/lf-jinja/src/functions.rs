//! Template functions: config(), var(), ref(), is_incremental()

use lf_core::sql_utils::qualified_name;
use minijinja::value::{Kwargs, Value};
use minijinja::Error;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Captured config values from config() calls
pub(crate) type ConfigCapture = Arc<Mutex<HashMap<String, Value>>>;

/// State backing the is_incremental() function
#[derive(Debug, Clone, Default)]
pub struct IncrementalState {
    /// Whether the model is configured as incremental
    pub is_incremental_model: bool,
    /// Whether the model's table already exists in the database
    pub relation_exists: bool,
    /// Whether --full-refresh was specified
    pub full_refresh: bool,
}

impl IncrementalState {
    /// True when this run should merge into the existing table rather than
    /// recreate it
    pub fn is_incremental_run(&self) -> bool {
        self.is_incremental_model && self.relation_exists && !self.full_refresh
    }
}

pub(crate) fn make_is_incremental_fn(
    state: IncrementalState,
) -> impl Fn() -> bool + Send + Sync + Clone + 'static {
    move || state.is_incremental_run()
}

/// Create the config() function that captures model configuration.
///
/// ```jinja
/// {{ config(materialized='table', unique_key='id') }}
/// ```
pub(crate) fn make_config_fn(
    capture: ConfigCapture,
) -> impl Fn(Kwargs) -> Result<String, Error> + Send + Sync + Clone + 'static {
    move |kwargs: Kwargs| {
        let mut captured = capture.lock().map_err(|e| {
            Error::new(
                minijinja::ErrorKind::InvalidOperation,
                format!("config mutex poisoned: {e}"),
            )
        })?;
        for key in kwargs.args() {
            let value = kwargs.get::<Value>(key).map_err(|e| {
                Error::new(
                    minijinja::ErrorKind::InvalidOperation,
                    format!("failed to get config kwarg '{}': {}", key, e),
                )
            })?;
            captured.insert(key.to_string(), value);
        }
        // config() renders to nothing
        Ok(String::new())
    }
}

/// Create the ref() function resolving a model name to its quoted,
/// schema-qualified relation name.
///
/// ```jinja
/// select * from {{ ref('raw_numbers') }}
/// ```
pub(crate) fn make_ref_fn(
    schema: String,
) -> impl Fn(&str) -> Result<String, Error> + Send + Sync + Clone + 'static {
    move |name: &str| {
        if name.is_empty() {
            return Err(Error::new(
                minijinja::ErrorKind::InvalidOperation,
                "ref() requires a model name",
            ));
        }
        Ok(qualified_name(&schema, name))
    }
}

/// Create the var() function.
///
/// ```jinja
/// {{ var('start_date') }}
/// {{ var('missing', 'fallback') }}
/// ```
pub(crate) fn make_var_fn(
    vars: HashMap<String, serde_json::Value>,
) -> impl Fn(&str, Option<Value>) -> Result<Value, Error> + Send + Sync + Clone + 'static {
    move |name: &str, default: Option<Value>| {
        if let Some(value) = vars.get(name) {
            Ok(json_to_value(value))
        } else if let Some(default) = default {
            Ok(default)
        } else {
            Err(Error::new(
                minijinja::ErrorKind::UndefinedError,
                format!("var '{}' is not defined and no default was given", name),
            ))
        }
    }
}

/// Convert a YAML value into JSON for template consumption
pub(crate) fn yaml_to_json(value: &serde_yaml::Value) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

fn json_to_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::from(()),
        serde_json::Value::Bool(b) => Value::from(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else {
                Value::from(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::from(s.clone()),
        serde_json::Value::Array(items) => {
            Value::from(items.iter().map(json_to_value).collect::<Vec<_>>())
        }
        serde_json::Value::Object(map) => Value::from_iter(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_value(v))),
        ),
    }
}

#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;

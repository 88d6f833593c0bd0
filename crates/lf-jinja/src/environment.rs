//! Jinja environment setup for model rendering

use crate::error::{JinjaError, JinjaResult};
use crate::functions::{
    make_config_fn, make_is_incremental_fn, make_ref_fn, make_var_fn, yaml_to_json, ConfigCapture,
    IncrementalState,
};
use lf_core::sql_utils::qualified_name;
use minijinja::{Environment, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Everything a model render needs to know about its surroundings
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Target schema for ref()/this resolution
    pub schema: String,
    /// Name of the model being rendered
    pub model: String,
    /// Project vars
    pub vars: HashMap<String, serde_yaml::Value>,
    /// State for is_incremental()
    pub incremental: IncrementalState,
}

/// Jinja templating environment for one model render
pub struct JinjaEnvironment<'a> {
    env: Environment<'a>,
    config_capture: ConfigCapture,
}

impl<'a> JinjaEnvironment<'a> {
    /// Build an environment for rendering one model
    pub fn for_model(ctx: &RenderContext) -> Self {
        let mut env = Environment::new();
        let config_capture: ConfigCapture = Arc::new(Mutex::new(HashMap::new()));

        let json_vars: HashMap<String, serde_json::Value> = ctx
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), yaml_to_json(v)))
            .collect();

        env.add_function("config", make_config_fn(config_capture.clone()));
        env.add_function("var", make_var_fn(json_vars));
        env.add_function("ref", make_ref_fn(ctx.schema.clone()));
        env.add_function(
            "is_incremental",
            make_is_incremental_fn(ctx.incremental.clone()),
        );
        env.add_global(
            "this",
            Value::from(qualified_name(&ctx.schema, &ctx.model)),
        );

        Self {
            env,
            config_capture,
        }
    }

    /// Render a template string
    pub fn render(&self, template: &str) -> JinjaResult<String> {
        self.config_capture
            .lock()
            .map_err(|e| JinjaError::CapturePoisoned(e.to_string()))?
            .clear();
        let result = self.env.render_str(template, ()).map_err(JinjaError::from)?;
        Ok(result)
    }

    /// Render a template and return both the result and the captured config
    pub fn render_with_config(
        &self,
        template: &str,
    ) -> JinjaResult<(String, HashMap<String, Value>)> {
        let rendered = self.render(template)?;
        let config = self
            .config_capture
            .lock()
            .map_err(|e| JinjaError::CapturePoisoned(e.to_string()))?
            .clone();
        Ok((rendered, config))
    }
}

#[cfg(test)]
#[path = "environment_test.rs"]
mod tests;

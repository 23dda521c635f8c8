//! MiniJinja-based template implementation
//!
//! This module provides [`JinjaTemplate`], a named prompt template backed by the
//! Jinja2-compatible MiniJinja engine. Template syntax is validated eagerly at
//! construction so a malformed prompt fails at registration time rather than in
//! the middle of an analysis run.

use crate::{PromptError, Result};
use minijinja::Environment;

/// A named prompt template backed by MiniJinja
///
/// # Template Syntax
///
/// Standard Jinja2 syntax is supported:
/// - Variables: `{{ variable }}`
/// - Filters: `{{ name | upper }}`
/// - Conditionals: `{% if condition %}...{% endif %}`
/// - Loops: `{% for item in items %}...{% endfor %}`
///
/// # Examples
///
/// ```
/// use callshift_prompt::JinjaTemplate;
/// use serde_json::json;
///
/// let template = JinjaTemplate::new("greeting", "Hello, {{ name }}!").unwrap();
/// let result = template.render(&json!({ "name": "World" })).unwrap();
/// assert_eq!(result, "Hello, World!");
/// ```
pub struct JinjaTemplate {
    name: String,
    source: String,
}

impl JinjaTemplate {
    /// Create a new template, validating the source eagerly
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::TemplateParseFailed`] if the source is not valid
    /// Jinja2 syntax.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = source.into();

        // Compile once up front so syntax errors surface at registration time
        let env = Environment::new();
        if let Err(e) = env.template_from_str(&source) {
            return Err(PromptError::TemplateParseFailed {
                name,
                detail: e.to_string(),
            });
        }

        Ok(Self { name, source })
    }

    /// The template's registry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw template source
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render the template with the given variables
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::RenderFailed`] if rendering fails, for example
    /// when a strict filter receives an undefined value.
    pub fn render(&self, vars: &serde_json::Value) -> Result<String> {
        // Create a new environment for each render to avoid lifetime issues
        let env = Environment::new();
        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(&self.source, value)
            .map_err(|e| PromptError::RenderFailed {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("source_len", &self.source.len())
            .finish()
    }
}

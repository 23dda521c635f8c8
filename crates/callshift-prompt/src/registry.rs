//! Prompt template registry
//!
//! This module provides [`PromptRegistry`], a thread-safe registry for managing
//! and accessing prompt templates by name.

use crate::{JinjaTemplate, PromptError, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A thread-safe registry for managing prompt templates
///
/// `PromptRegistry` provides a centralized location for storing and retrieving
/// prompt templates. Registration replaces any previous template with the same
/// name, and lookup returns cheap `Arc` clones so renders never hold the lock.
///
/// # Examples
///
/// ```
/// use callshift_prompt::{JinjaTemplate, PromptRegistry};
/// use serde_json::json;
///
/// let registry = PromptRegistry::new();
/// let template = JinjaTemplate::new("greeting", "Hello, {{ name }}!").unwrap();
/// registry.register(template);
///
/// let result = registry.render("greeting", &json!({ "name": "World" })).unwrap();
/// assert_eq!(result, "Hello, World!");
/// ```
pub struct PromptRegistry {
    templates: RwLock<HashMap<String, Arc<JinjaTemplate>>>,
}

impl PromptRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Register a template
    ///
    /// If a template with the same name already exists, it will be replaced.
    pub fn register(&self, template: JinjaTemplate) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(template.name().to_string(), Arc::new(template));
        }
    }

    /// Register a template wrapped in Arc
    pub fn register_arc(&self, template: Arc<JinjaTemplate>) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(template.name().to_string(), template);
        }
    }

    /// Register multiple templates at once
    pub fn register_all(&self, templates: Vec<JinjaTemplate>) {
        for template in templates {
            self.register(template);
        }
    }

    /// Get a template by name
    ///
    /// Returns `None` if the template is not registered.
    pub fn get(&self, name: &str) -> Option<Arc<JinjaTemplate>> {
        self.templates.read().ok()?.get(name).cloned()
    }

    /// Check if a template is registered
    pub fn contains(&self, name: &str) -> bool {
        self.templates
            .read()
            .map(|t| t.contains_key(name))
            .unwrap_or(false)
    }

    /// Remove a template by name
    ///
    /// Returns the removed template if it existed.
    pub fn remove(&self, name: &str) -> Option<Arc<JinjaTemplate>> {
        self.templates.write().ok()?.remove(name)
    }

    /// Render a registered template with the given variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The template is not registered
    /// - Rendering fails
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?;

        template.render(vars)
    }

    /// List all registered template names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .templates
            .read()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all templates
    pub fn clear(&self) {
        if let Ok(mut templates) = self.templates.write() {
            templates.clear();
        }
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PromptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRegistry")
            .field("templates", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(name: &str) -> JinjaTemplate {
        JinjaTemplate::new(name, "Hello, {{ name }}!").unwrap()
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = PromptRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let registry = PromptRegistry::new();
        registry.register(sample("greeting"));

        assert!(registry.contains("greeting"));
        assert!(registry.get("greeting").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_replaces_existing() {
        let registry = PromptRegistry::new();
        registry.register(sample("greeting"));
        registry.register(JinjaTemplate::new("greeting", "Goodbye, {{ name }}!").unwrap());

        assert_eq!(registry.len(), 1);
        let result = registry.render("greeting", &json!({ "name": "World" })).unwrap();
        assert_eq!(result, "Goodbye, World!");
    }

    #[test]
    fn test_register_arc() {
        let registry = PromptRegistry::new();
        let template = Arc::new(sample("shared"));
        registry.register_arc(Arc::clone(&template));

        assert!(registry.contains("shared"));
    }

    #[test]
    fn test_register_all() {
        let registry = PromptRegistry::new();
        registry.register_all(vec![sample("a"), sample("b"), sample("c")]);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.list(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let registry = PromptRegistry::new();
        assert!(registry.get("missing").is_none());
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn test_remove() {
        let registry = PromptRegistry::new();
        registry.register(sample("temp"));

        let removed = registry.remove("temp");
        assert!(removed.is_some());
        assert!(!registry.contains("temp"));
        assert!(registry.remove("temp").is_none());
    }

    #[test]
    fn test_render() {
        let registry = PromptRegistry::new();
        registry.register(sample("greeting"));

        let result = registry.render("greeting", &json!({ "name": "World" })).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_render_unregistered_fails() {
        let registry = PromptRegistry::new();
        let result = registry.render("missing", &json!({}));
        assert!(matches!(
            result,
            Err(PromptError::TemplateNotRegistered(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_list_is_sorted() {
        let registry = PromptRegistry::new();
        registry.register(sample("zeta"));
        registry.register(sample("alpha"));
        registry.register(sample("mid"));

        assert_eq!(registry.list(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_clear() {
        let registry = PromptRegistry::new();
        registry.register_all(vec![sample("a"), sample("b")]);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_shared_across_threads() {
        let registry = Arc::new(PromptRegistry::new());
        registry.register(sample("shared"));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.render("shared", &json!({ "name": "thread" })).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "Hello, thread!");
        }
    }
}

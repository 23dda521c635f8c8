//! Error types for prompt template management

use thiserror::Error;

/// Errors that can occur when parsing, registering, or rendering templates
#[derive(Error, Debug)]
pub enum PromptError {
    /// The requested template has not been registered
    #[error("Template not registered: {0}")]
    TemplateNotRegistered(String),

    /// The template source failed to parse
    #[error("Failed to parse template '{name}': {detail}")]
    TemplateParseFailed { name: String, detail: String },

    /// Rendering failed (missing variable, filter error, etc.)
    #[error("Failed to render template '{name}': {detail}")]
    RenderFailed { name: String, detail: String },
}

/// Result type alias for prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PromptError::TemplateNotRegistered("greeting".to_string());
        assert_eq!(err.to_string(), "Template not registered: greeting");

        let err = PromptError::TemplateParseFailed {
            name: "bad".to_string(),
            detail: "unexpected end of template".to_string(),
        };
        assert!(err.to_string().contains("bad"));
        assert!(err.to_string().contains("unexpected end"));
    }

    #[test]
    fn test_render_failed_display() {
        let err = PromptError::RenderFailed {
            name: "analysis".to_string(),
            detail: "undefined value".to_string(),
        };
        assert!(err.to_string().starts_with("Failed to render"));
    }
}

//! Prompt template management for callshift-rs
//!
//! This crate provides a small, type-safe system for managing the prompt
//! templates used by the earnings-call analysis pipeline.
//!
//! # Features
//!
//! - **Variable interpolation**: Jinja2 syntax (`{{ variable }}`) for dynamic content
//! - **Eager validation**: template syntax errors surface at registration time
//! - **Template registry**: centralized, thread-safe template storage and lookup
//!
//! # Quick Start
//!
//! ```
//! use callshift_prompt::{JinjaTemplate, PromptRegistry};
//! use serde_json::json;
//!
//! let registry = PromptRegistry::new();
//!
//! let template = JinjaTemplate::new(
//!     "analyze",
//!     "Analyze this {{ company }} transcript for {{ quarter }}.",
//! ).unwrap();
//! registry.register(template);
//!
//! let prompt = registry
//!     .render("analyze", &json!({ "company": "BHARTI", "quarter": "Q3_2026" }))
//!     .unwrap();
//! assert_eq!(prompt, "Analyze this BHARTI transcript for Q3_2026.");
//! ```

mod error;
mod jinja;
mod registry;

// Re-export core types
pub use error::{PromptError, Result};
pub use jinja::JinjaTemplate;
pub use registry::PromptRegistry;

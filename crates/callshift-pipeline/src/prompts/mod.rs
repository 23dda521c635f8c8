//! Prompt templates and response schemas for the analysis agents
//!
//! This module is the per-topic prompt catalogue: every agent call resolves
//! its instruction template here by registry key, paired with a response
//! schema from [`schema`]. Templates are organized into:
//! - `system`: System prompts for each agent
//! - `user`: User message templates
//! - `schema`: Gemini response schemas

mod schema;
mod system;
mod user;

pub use schema::{evasiveness_schema, insight_schema, snapshot_schema};
pub use system::*;
pub use user::*;

use callshift_prompt::{PromptRegistry, Result};

/// Register all pipeline prompts with the given registry
///
/// # Errors
///
/// Returns an error if any template source fails to parse.
pub fn register_prompts(registry: &PromptRegistry) -> Result<()> {
    // Thematic extraction system prompts
    registry.register(capital_liquidity()?);
    registry.register(revenue_growth()?);
    registry.register(operational_margin()?);
    registry.register(macro_risk()?);

    // Comparison and scoring system prompts
    registry.register(temporal_delta()?);
    registry.register(evasiveness()?);

    // User message templates
    registry.register(extract_prompt()?);
    registry.register(compare_prompt()?);
    registry.register(evasiveness_prompt()?);

    Ok(())
}

//! The analysis agents
//!
//! Three LLM-backed agents with different failure policies:
//!
//! - [`ThematicAgent`]: per-(topic, quarter) extraction, fail-absent
//! - [`EvasivenessAgent`]: current-quarter directness score, fail-open to a
//!   neutral default
//! - [`DeltaAgent`]: per-topic quarter comparison, fail-absent
//!
//! Every call races the configured timeout and sends a JSON response schema;
//! a timeout or unparseable response is recovered locally and never escalates
//! past the agent. Only a prompt-template failure, which means the pipeline
//! itself is misassembled, surfaces as an error.

mod delta;
mod evasiveness;
mod thematic;

pub use delta::DeltaAgent;
pub use evasiveness::{EvasivenessAgent, NEUTRAL_EVASIVENESS};
pub use thematic::ThematicAgent;

//! The fixed set of analysis topics
//!
//! Every pipeline run extracts all four topics for both quarters. Each topic
//! resolves to its own extraction instruction set via the prompt registry,
//! keyed by [`Topic::system_prompt_key`].

use serde::{Deserialize, Serialize};

/// A thematic analysis area of an earnings call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// Balance sheet strength, deleveraging, capex funding
    #[serde(rename = "Capital & Liquidity")]
    CapitalLiquidity,

    /// Revenue trajectory, subscriber/customer metrics, pricing
    #[serde(rename = "Revenue & Growth")]
    RevenueGrowth,

    /// Margins, cost programs, operating leverage
    #[serde(rename = "Operational Margin")]
    OperationalMargin,

    /// Macro environment, regulation, competitive risk
    #[serde(rename = "Macro & Risk")]
    MacroRisk,
}

impl Topic {
    /// All topics in canonical order
    pub const ALL: [Topic; 4] = [
        Topic::CapitalLiquidity,
        Topic::RevenueGrowth,
        Topic::OperationalMargin,
        Topic::MacroRisk,
    ];

    /// Human-readable section label used in payloads and prompts
    pub fn label(&self) -> &'static str {
        match self {
            Topic::CapitalLiquidity => "Capital & Liquidity",
            Topic::RevenueGrowth => "Revenue & Growth",
            Topic::OperationalMargin => "Operational Margin",
            Topic::MacroRisk => "Macro & Risk",
        }
    }

    /// Short identifier used in registry keys and logs
    pub fn slug(&self) -> &'static str {
        match self {
            Topic::CapitalLiquidity => "capital_liquidity",
            Topic::RevenueGrowth => "revenue_growth",
            Topic::OperationalMargin => "operational_margin",
            Topic::MacroRisk => "macro_risk",
        }
    }

    /// Registry key of this topic's extraction system prompt
    pub fn system_prompt_key(&self) -> String {
        format!("shift.system.{}", self.slug())
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_topics_in_order() {
        assert_eq!(Topic::ALL.len(), 4);
        assert_eq!(Topic::ALL[0], Topic::CapitalLiquidity);
        assert_eq!(Topic::ALL[3], Topic::MacroRisk);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Topic::CapitalLiquidity.label(), "Capital & Liquidity");
        assert_eq!(Topic::RevenueGrowth.label(), "Revenue & Growth");
        assert_eq!(Topic::OperationalMargin.label(), "Operational Margin");
        assert_eq!(Topic::MacroRisk.label(), "Macro & Risk");
    }

    #[test]
    fn test_prompt_keys() {
        assert_eq!(
            Topic::CapitalLiquidity.system_prompt_key(),
            "shift.system.capital_liquidity"
        );
        assert_eq!(Topic::MacroRisk.system_prompt_key(), "shift.system.macro_risk");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Topic::RevenueGrowth).unwrap();
        assert_eq!(json, r#""Revenue & Growth""#);

        let topic: Topic = serde_json::from_str(r#""Macro & Risk""#).unwrap();
        assert_eq!(topic, Topic::MacroRisk);
    }

    #[test]
    fn test_display_matches_label() {
        for topic in Topic::ALL {
            assert_eq!(topic.to_string(), topic.label());
        }
    }
}

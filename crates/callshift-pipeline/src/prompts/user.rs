//! User message templates for the analysis agents

use callshift_prompt::{JinjaTemplate, Result};

/// Create the thematic extraction user message template
pub fn extract_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        "shift.user.extract",
        r"Analyze this earnings call transcript for {{ topic }} insights.

Company: {{ company }}
Quarter: {{ quarter }}

TRANSCRIPT:
{{ transcript }}",
    )
}

/// Create the quarter comparison user message template
///
/// Takeaway and quote blocks arrive pre-rendered; the caller substitutes
/// fallback text when a snapshot side is empty.
pub fn compare_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        "shift.user.compare",
        r"Compare these two quarters for the **{{ topic }}** domain.

PREVIOUS QUARTER ({{ quarter_previous }}):
Key Takeaways:
{{ takeaways_previous }}

Key Quotes:
{{ quotes_previous }}

CURRENT QUARTER ({{ quarter_current }}):
Key Takeaways:
{{ takeaways_current }}

Key Quotes:
{{ quotes_current }}

Identify all semantic shifts, classify signals, and assign UI components.",
    )
}

/// Create the evasiveness scoring user message template
pub fn evasiveness_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        "shift.user.evasiveness",
        r"Rate the executive evasiveness in this {{ company }} {{ quarter }} earnings call:

{{ transcript_tail }}",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_user_prompts_created() {
        assert!(extract_prompt().is_ok());
        assert!(compare_prompt().is_ok());
        assert!(evasiveness_prompt().is_ok());
    }

    #[test]
    fn test_extract_prompt_render() {
        let template = extract_prompt().unwrap();
        let rendered = template
            .render(&json!({
                "topic": "Revenue & Growth",
                "company": "BHARTI",
                "quarter": "Q3_2026",
                "transcript": "Operator: welcome."
            }))
            .unwrap();

        assert!(rendered.starts_with(
            "Analyze this earnings call transcript for Revenue & Growth insights."
        ));
        assert!(rendered.contains("Company: BHARTI"));
        assert!(rendered.contains("Quarter: Q3_2026"));
        assert!(rendered.ends_with("TRANSCRIPT:\nOperator: welcome."));
    }

    #[test]
    fn test_compare_prompt_render() {
        let template = compare_prompt().unwrap();
        let rendered = template
            .render(&json!({
                "topic": "Capital & Liquidity",
                "quarter_previous": "Q2_2026",
                "quarter_current": "Q3_2026",
                "takeaways_previous": "- Deleveraging on track",
                "quotes_previous": "\"net debt fell to 2.1x EBITDA\"",
                "takeaways_current": "No takeaways extracted",
                "quotes_current": "No quotes extracted"
            }))
            .unwrap();

        assert!(rendered.contains("**Capital & Liquidity**"));
        assert!(rendered.contains("PREVIOUS QUARTER (Q2_2026):"));
        assert!(rendered.contains("CURRENT QUARTER (Q3_2026):"));
        assert!(rendered.contains("- Deleveraging on track"));
        assert!(rendered.contains("No takeaways extracted"));
    }

    #[test]
    fn test_evasiveness_prompt_render() {
        let template = evasiveness_prompt().unwrap();
        let rendered = template
            .render(&json!({
                "company": "SBI",
                "quarter": "Q1_2026",
                "transcript_tail": "Analyst: what about slippages?"
            }))
            .unwrap();

        assert!(rendered.starts_with(
            "Rate the executive evasiveness in this SBI Q1_2026 earnings call:"
        ));
        assert!(rendered.ends_with("Analyst: what about slippages?"));
    }
}

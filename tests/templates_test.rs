//! Tests for enhancer templates module

use promptcraft::enhancer::templates::{
    ADVISORY_FAILED, ADVISORY_UNAVAILABLE, ENHANCE_INSTRUCTION_TEMPLATE, FALLBACK_SUFFIX,
    FORM_UI_HTML,
};
use promptcraft::service::render_enhance_instruction;

// ========================================================================
// ENHANCE_INSTRUCTION_TEMPLATE Tests
// ========================================================================

#[test]
fn test_instruction_template_has_single_placeholder() {
    assert_eq!(ENHANCE_INSTRUCTION_TEMPLATE.matches("{original_prompt}").count(), 1);
}

#[test]
fn test_instruction_template_quotes_prompt() {
    assert!(ENHANCE_INSTRUCTION_TEMPLATE.starts_with("You are an expert prompt engineer."));
    assert!(ENHANCE_INSTRUCTION_TEMPLATE.ends_with("The prompt is: \"{original_prompt}\""));
}

#[test]
fn test_render_instruction_empty_value() {
    let rendered = render_enhance_instruction("");
    assert!(rendered.ends_with("The prompt is: \"\""));
    assert!(!rendered.contains("{original_prompt}"));
}

#[test]
fn test_render_instruction_unicode_value() {
    let rendered = render_enhance_instruction("解释所有权 🚀");
    assert!(rendered.contains("\"解释所有权 🚀\""));
}

#[test]
fn test_render_instruction_multiline_prompt() {
    let prompt = "Topic: x\n\nSpecific Requirements:\ny";
    assert!(render_enhance_instruction(prompt).contains(prompt));
}

// ========================================================================
// Fallback and advisory text
// ========================================================================

#[test]
fn test_fallback_suffix() {
    assert!(FALLBACK_SUFFIX.starts_with("Please provide a detailed and well-structured response."));
    assert!(!FALLBACK_SUFFIX.ends_with('\n'));
}

#[test]
fn test_advisories_differ() {
    assert!(ADVISORY_UNAVAILABLE.contains("Could not connect to AI service"));
    assert_ne!(ADVISORY_UNAVAILABLE, ADVISORY_FAILED);
}

// ========================================================================
// FORM_UI_HTML Tests
// ========================================================================

#[test]
fn test_form_ui_html_is_valid_html() {
    assert!(FORM_UI_HTML.starts_with("<!DOCTYPE html>"));
    assert!(FORM_UI_HTML.contains("<html lang=\"en\">"));
    assert!(FORM_UI_HTML.trim_end().ends_with("</html>"));
    assert!(FORM_UI_HTML.contains("<meta charset=\"UTF-8\">"));
}

#[test]
fn test_form_ui_html_has_title() {
    assert!(FORM_UI_HTML.contains("<title>PromptCraft</title>"));
}

#[test]
fn test_form_ui_html_has_all_input_fields() {
    for field in ["topic", "context", "requirements", "audience", "tone"] {
        assert!(
            FORM_UI_HTML.contains(&format!("id=\"{}\"", field)),
            "missing field {}",
            field
        );
        assert!(FORM_UI_HTML.contains(&format!("data-field=\"{}\"", field)));
    }
}

#[test]
fn test_form_ui_html_uses_api_routes() {
    for route in [
        "/api/levels",
        "/api/state",
        "/api/level",
        "/api/generate",
        "/api/export",
    ] {
        assert!(FORM_UI_HTML.contains(route), "missing route {}", route);
    }
}

#[test]
fn test_form_ui_html_has_result_actions() {
    assert!(FORM_UI_HTML.contains("id=\"copy\""));
    assert!(FORM_UI_HTML.contains("id=\"download\""));
    assert!(FORM_UI_HTML.contains("id=\"save\""));
    assert!(FORM_UI_HTML.contains("navigator.clipboard.writeText"));
}

#[test]
fn test_form_ui_html_disables_submit_while_generating() {
    assert!(FORM_UI_HTML.contains("'generating'"));
    assert!(FORM_UI_HTML.contains("Generating..."));
}

//! Tests for http_logger module

use promptcraft::http_logger::{
    is_sensitive_header, mask_token, render_entry, request_headers, truncate_utf8_safe,
    HttpRequestLog, HttpResponseLog,
};

fn sample_request() -> HttpRequestLog {
    HttpRequestLog {
        method: "POST".to_string(),
        url: "https://router.huggingface.co/v1/chat/completions".to_string(),
        headers: request_headers("req-1", "hf_abcdefghijklmnop"),
        body: Some(r#"{"model":"google/gemma-2-9b-it","max_tokens":500}"#.to_string()),
    }
}

#[test]
fn test_truncate_utf8_safe_ascii() {
    let s = "Hello, World!";
    assert_eq!(truncate_utf8_safe(s, 100), s);
    assert!(truncate_utf8_safe(s, 5).starts_with("Hello"));
}

#[test]
fn test_truncate_utf8_safe_unicode() {
    let s = "你好世界Hello";
    // 10 bytes lands inside the fourth character
    let truncated = truncate_utf8_safe(s, 10);
    assert!(truncated.starts_with("你好世..."));
    assert!(truncated.contains("[truncated, total 17 bytes]"));
}

#[test]
fn test_mask_token_bearer() {
    assert_eq!(mask_token("Bearer abcdefghijklmnop"), "Bearer abcd...mnop");
    assert_eq!(mask_token("Bearer short"), "Bearer ****");
}

#[test]
fn test_mask_token_generic() {
    assert_eq!(mask_token("abcdefghijklmnop"), "abcd...mnop");
    assert_eq!(mask_token("short"), "****");
}

#[test]
fn test_is_sensitive_header() {
    assert!(is_sensitive_header("Authorization"));
    assert!(is_sensitive_header("authorization"));
    assert!(is_sensitive_header("Set-Cookie"));
    assert!(is_sensitive_header("Cookie"));
    assert!(!is_sensitive_header("Content-Type"));
    assert!(!is_sensitive_header("x-request-id"));
}

#[test]
fn test_request_headers_carry_bearer_key() {
    let headers = request_headers("req-1", "hf_key");
    assert!(headers.contains(&("x-request-id".to_string(), "req-1".to_string())));
    assert!(headers.contains(&("Authorization".to_string(), "Bearer hf_key".to_string())));
}

#[test]
fn test_render_entry_masks_credentials() {
    let response = HttpResponseLog {
        status: 200,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(r#"{"choices":[]}"#.to_string()),
    };
    let entry = render_entry(
        "2026-01-01 00:00:00.000",
        &sample_request(),
        Some(&response),
        42,
        None,
    );

    assert!(entry.contains("[2026-01-01 00:00:00.000] POST https://router.huggingface.co/v1/chat/completions"));
    assert!(entry.contains("Authorization: Bearer hf_a...mnop"));
    assert!(!entry.contains("hf_abcdefghijklmnop"));
    assert!(entry.contains("--- Response (42ms) ---\nStatus: 200"));
    assert!(entry.contains("\"max_tokens\": 500"));
}

#[test]
fn test_render_entry_with_transport_error() {
    let entry = render_entry(
        "2026-01-01 00:00:00.000",
        &sample_request(),
        None,
        30000,
        Some("operation timed out"),
    );

    assert!(!entry.contains("--- Response"));
    assert!(entry.contains("Error (30000ms)"));
    assert!(entry.contains("operation timed out"));
}

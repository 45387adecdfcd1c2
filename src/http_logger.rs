//! HTTP Exchange Logger
//!
//! Appends every enhancement request and response to `.promptcraft/http_requests.log`
//! when `PROMPTCRAFT_HTTP_LOG` is set to `1`, `true`, `yes` or `on`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use chrono::Local;
use tracing::warn;

/// Environment variable to control HTTP logging
const ENV_HTTP_LOG: &str = "PROMPTCRAFT_HTTP_LOG";

/// Directory holding the log file, relative to the working directory
const LOG_DIR: &str = ".promptcraft";

const LOG_FILE_NAME: &str = "http_requests.log";

/// Maximum body size to log (10KB)
const MAX_BODY_SIZE: usize = 10000;

/// Headers whose values never reach the log in clear text
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
];

/// Serializes appends from concurrent requests
static LOG_MUTEX: Mutex<()> = Mutex::new(());

/// Check if HTTP logging is enabled
pub fn is_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var(ENV_HTTP_LOG)
            .map(|v| is_truthy(&v))
            .unwrap_or(false)
    })
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// HTTP request log entry
pub struct HttpRequestLog {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// HTTP response log entry
pub struct HttpResponseLog {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Headers sent by the enhancement transports, as they should appear in the log
pub fn request_headers(request_id: &str, api_key: &str) -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("x-request-id".to_string(), request_id.to_string()),
        ("Authorization".to_string(), format!("Bearer {}", api_key)),
    ]
}

/// Extract headers from a reqwest Response
pub fn extract_response_headers(response: &reqwest::Response) -> Vec<(String, String)> {
    response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or("<binary>").to_string(),
            )
        })
        .collect()
}

/// Log one request with its response or transport error
pub fn log_request(
    request: &HttpRequestLog,
    response: Option<&HttpResponseLog>,
    duration_ms: u64,
    error: Option<&str>,
) {
    if !is_enabled() {
        return;
    }

    let dir = PathBuf::from(LOG_DIR);
    if let Err(e) = fs::create_dir_all(&dir) {
        warn!("Failed to create {} directory: {}", LOG_DIR, e);
        return;
    }

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
    let entry = render_entry(&timestamp, request, response, duration_ms, error);

    if let Err(e) = append(&dir.join(LOG_FILE_NAME), &entry) {
        warn!("Failed to write HTTP log: {}", e);
    }
}

/// Render a log entry; sensitive headers are masked and bodies truncated
pub fn render_entry(
    timestamp: &str,
    request: &HttpRequestLog,
    response: Option<&HttpResponseLog>,
    duration_ms: u64,
    error: Option<&str>,
) -> String {
    let separator = "=".repeat(80);
    let mut out = format!(
        "\n{}\n[{}] {} {}\n{}\n",
        separator, timestamp, request.method, request.url, separator
    );

    push_headers(&mut out, "Request Headers", &request.headers);
    if let Some(body) = &request.body {
        push_section(&mut out, "Request Body", &format_body(body));
    }

    if let Some(resp) = response {
        out.push_str(&format!(
            "\n--- Response ({}ms) ---\nStatus: {}\n",
            duration_ms, resp.status
        ));
        push_headers(&mut out, "Response Headers", &resp.headers);
        if let Some(body) = &resp.body {
            push_section(&mut out, "Response Body", &format_body(body));
        }
    }

    if let Some(err) = error {
        push_section(&mut out, &format!("Error ({}ms)", duration_ms), err);
    }

    out.push_str(&format!("\n{}\n", separator));
    out
}

fn push_headers(out: &mut String, title: &str, headers: &[(String, String)]) {
    out.push_str(&format!("\n--- {} ---\n", title));
    for (name, value) in headers {
        let value = if is_sensitive_header(name) {
            mask_token(value)
        } else {
            value.clone()
        };
        out.push_str(&format!("{}: {}\n", name, value));
    }
}

fn push_section(out: &mut String, title: &str, content: &str) {
    out.push_str(&format!("\n--- {} ---\n{}\n", title, content));
}

fn append(path: &Path, content: &str) -> std::io::Result<()> {
    let _guard = LOG_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())
}

/// Check if a header is sensitive and should be masked
pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|h| name.eq_ignore_ascii_case(h))
}

/// Keep the first and last four characters of a secret, keeping any `Bearer ` prefix
pub fn mask_token(value: &str) -> String {
    let (prefix, secret) = match value.strip_prefix("Bearer ") {
        Some(token) => ("Bearer ", token),
        None => ("", value),
    };

    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return format!("{}****", prefix);
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}...{}", prefix, head, tail)
}

/// Pretty-print JSON bodies, then truncate
fn format_body(body: &str) -> String {
    let pretty = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| body.to_string());
    truncate_utf8_safe(&pretty, MAX_BODY_SIZE)
}

/// Truncate string at a UTF-8 character boundary
pub fn truncate_utf8_safe(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...\n[truncated, total {} bytes]", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn test_format_body_pretty_prints_json() {
        let formatted = format_body(r#"{"a":1}"#);
        assert_eq!(formatted, "{\n  \"a\": 1\n}");
    }
}

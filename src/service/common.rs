//! Common types and utilities for the enhancement transports

use std::fmt;
use std::time::Instant;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{Config, ENV_API_KEY};
use crate::enhancer::templates::ENHANCE_INSTRUCTION_TEMPLATE;
use crate::error::EnhanceError;
use crate::http_logger::{self, HttpRequestLog, HttpResponseLog};

/// Placeholder for the drafted prompt inside the instruction template
const PROMPT_PLACEHOLDER: &str = "{original_prompt}";

/// Call convention used to reach the enhancement model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    /// Provider router: model named only in the request body
    Router,
    /// Model-scoped route with the model id in the URL path
    ModelRoute,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Router => write!(f, "router"),
            Self::ModelRoute => write!(f, "model-route"),
        }
    }
}

/// Chat message sent to the completion endpoint
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Chat completion response structure
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Wrap the drafted prompt in the enhancement instruction.
/// Uses split+concat so placeholder-like text inside the prompt is left alone.
pub fn render_enhance_instruction(prompt: &str) -> String {
    match ENHANCE_INSTRUCTION_TEMPLATE.split_once(PROMPT_PLACEHOLDER) {
        Some((before, after)) => {
            let mut rendered = String::with_capacity(before.len() + prompt.len() + after.len());
            rendered.push_str(before);
            rendered.push_str(prompt);
            rendered.push_str(after);
            rendered
        }
        None => format!("{}{}", ENHANCE_INSTRUCTION_TEMPLATE, prompt),
    }
}

/// Map common authentication failures to consistent errors
pub fn map_auth_error(status: StatusCode, transport: Transport) -> Option<EnhanceError> {
    let message = match status.as_u16() {
        401 => "API key invalid or expired",
        403 => "access denied, API key may be disabled",
        _ => return None,
    };
    Some(EnhanceError::Unauthorized {
        transport,
        message: message.to_string(),
    })
}

/// Pull `choices[0].message.content` out of a response body, unchanged.
/// Whitespace-only content counts as empty.
pub fn extract_reply(body: &str, transport: Transport) -> Result<String, EnhanceError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| EnhanceError::response(transport, format!("{} - {}", e, body)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(EnhanceError::EmptyResponse { transport })
}

/// Build the request body shared by both transports
pub(crate) fn build_chat_request(config: &Config, prompt: &str, stream: Option<bool>) -> ChatRequest {
    ChatRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage::user(render_enhance_instruction(prompt))],
        max_tokens: config.max_tokens,
        stream,
    }
}

/// POST a chat request and return the assistant's reply text
pub(crate) async fn post_chat(
    client: &Client,
    config: &Config,
    transport: Transport,
    url: &str,
    payload: &ChatRequest,
) -> Result<String, EnhanceError> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or(EnhanceError::MissingCredential(ENV_API_KEY))?;

    let request_id = Uuid::new_v4().to_string();
    let http_request_log = if http_logger::is_enabled() {
        Some(HttpRequestLog {
            method: "POST".to_string(),
            url: url.to_string(),
            headers: http_logger::request_headers(&request_id, api_key),
            body: serde_json::to_string(payload).ok(),
        })
    } else {
        None
    };

    info!("Calling {} transport: {}", transport, url);
    let start_time = Instant::now();

    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", api_key))
        .header("x-request-id", &request_id)
        .json(payload)
        .send()
        .await;

    let duration_ms = start_time.elapsed().as_millis() as u64;
    debug!("{} transport responded in {}ms", transport, duration_ms);

    let resp = match response {
        Ok(resp) => resp,
        Err(e) => {
            if let Some(ref req_log) = http_request_log {
                http_logger::log_request(req_log, None, duration_ms, Some(&e.to_string()));
            }
            return Err(EnhanceError::http(transport, e));
        }
    };

    let status = resp.status();
    let response_headers = if http_request_log.is_some() {
        http_logger::extract_response_headers(&resp)
    } else {
        Vec::new()
    };
    let body_text = resp
        .text()
        .await
        .map_err(|e| EnhanceError::http(transport, e))?;

    if let Some(ref req_log) = http_request_log {
        let response_log = HttpResponseLog {
            status: status.as_u16(),
            headers: response_headers,
            body: Some(body_text.clone()),
        };
        http_logger::log_request(req_log, Some(&response_log), duration_ms, None);
    }

    if let Some(err) = map_auth_error(status, transport) {
        return Err(err);
    }

    if !status.is_success() {
        return Err(EnhanceError::status(transport, status, body_text));
    }

    extract_reply(&body_text, transport)
}

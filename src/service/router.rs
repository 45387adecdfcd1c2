//! Primary transport: provider router chat completions

use reqwest::Client;

use crate::config::Config;
use crate::error::EnhanceError;

use super::common::{build_chat_request, post_chat, Transport};

pub(crate) fn build_router_url(base_url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let base_url = base_url.strip_suffix("/v1").unwrap_or(base_url);
    format!("{}/v1/chat/completions", base_url)
}

/// Ask the model behind the provider router to enhance `prompt`
pub async fn call_router_endpoint(
    client: &Client,
    config: &Config,
    prompt: &str,
) -> Result<String, EnhanceError> {
    let payload = build_chat_request(config, prompt, None);
    let url = build_router_url(&config.base_url);
    post_chat(client, config, Transport::Router, &url, &payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_router_url() {
        assert_eq!(
            build_router_url("https://router.huggingface.co"),
            "https://router.huggingface.co/v1/chat/completions"
        );
        assert_eq!(
            build_router_url("https://router.huggingface.co/"),
            "https://router.huggingface.co/v1/chat/completions"
        );
        assert_eq!(
            build_router_url("https://router.huggingface.co/v1"),
            "https://router.huggingface.co/v1/chat/completions"
        );
    }
}

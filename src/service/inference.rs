//! Secondary transport: model-scoped inference route

use reqwest::Client;

use crate::config::Config;
use crate::error::EnhanceError;

use super::common::{build_chat_request, post_chat, Transport};

/// Provider segment of the model-scoped route
const PROVIDER: &str = "hf-inference";

pub(crate) fn build_model_route_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/{}/models/{}/v1/chat/completions",
        base_url.trim_end_matches('/'),
        PROVIDER,
        model.trim_matches('/')
    )
}

/// Same request as the router transport, addressed through the model's own route
pub async fn call_model_route_endpoint(
    client: &Client,
    config: &Config,
    prompt: &str,
) -> Result<String, EnhanceError> {
    let payload = build_chat_request(config, prompt, Some(false));
    let url = build_model_route_url(&config.base_url, &config.model);
    post_chat(client, config, Transport::ModelRoute, &url, &payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_model_route_url() {
        assert_eq!(
            build_model_route_url("https://router.huggingface.co/", "google/gemma-2-9b-it"),
            "https://router.huggingface.co/hf-inference/models/google/gemma-2-9b-it/v1/chat/completions"
        );
    }
}

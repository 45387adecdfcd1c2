//! Prompt Enhancer - two-tier remote enhancement with a local fallback
//!
//! Tries, in order:
//! - the provider router transport
//! - the model-scoped route transport (plain HTTP/1 client)
//! - a deterministic local rewrite of the draft
//!
//! Errors from either transport are logged and never reach the caller.

use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::EnhanceError;
use crate::service::{call_model_route_endpoint, call_router_endpoint};

use super::templates::FALLBACK_SUFFIX;

/// Where an enhanced prompt came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancementSource {
    Primary,
    Secondary,
    LocalFallback,
}

/// Result of running the enhancement chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enhancement {
    pub text: String,
    pub source: EnhancementSource,
}

impl Enhancement {
    /// True when neither remote transport produced the text
    pub fn is_degraded(&self) -> bool {
        self.source == EnhancementSource::LocalFallback
    }
}

/// Deterministic local rewrite used when both transports fail
pub fn local_fallback(prompt: &str) -> String {
    format!("{}\n\n{}", prompt, FALLBACK_SUFFIX)
}

/// Prompt Enhancer
pub struct PromptEnhancer {
    config: Arc<Config>,
    client: Client,
    fallback_client: Client,
}

impl PromptEnhancer {
    /// Create a new PromptEnhancer; every request is bounded by `config.timeout`
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let fallback_client = Client::builder()
            .timeout(config.timeout)
            .http1_only()
            .build()?;

        if !config.has_credential() {
            warn!("No API key configured, prompts will not be enhanced remotely");
        }

        Ok(Self {
            config,
            client,
            fallback_client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Enhance a prompt. Always resolves to some text.
    pub async fn enhance(&self, prompt: &str) -> String {
        self.enhance_detailed(prompt).await.text
    }

    /// Enhance a prompt and report which tier produced the result
    pub async fn enhance_detailed(&self, prompt: &str) -> Enhancement {
        info!("Starting prompt enhancement...");

        match self.try_primary(prompt).await {
            Ok(text) => {
                info!("Enhancement complete via primary transport");
                return Enhancement {
                    text,
                    source: EnhancementSource::Primary,
                };
            }
            Err(e) => warn!("Primary enhancement failed, trying fallback: {}", e),
        }

        match self.try_secondary(prompt).await {
            Ok(text) => {
                info!("Enhancement complete via secondary transport");
                Enhancement {
                    text,
                    source: EnhancementSource::Secondary,
                }
            }
            Err(e) => {
                error!("Fallback enhancement also failed: {}", e);
                Enhancement {
                    text: local_fallback(prompt),
                    source: EnhancementSource::LocalFallback,
                }
            }
        }
    }

    /// Primary tier only
    pub async fn try_primary(&self, prompt: &str) -> Result<String, EnhanceError> {
        call_router_endpoint(&self.client, &self.config, prompt).await
    }

    /// Secondary tier only
    pub async fn try_secondary(&self, prompt: &str) -> Result<String, EnhanceError> {
        call_model_route_endpoint(&self.fallback_client, &self.config, prompt).await
    }
}

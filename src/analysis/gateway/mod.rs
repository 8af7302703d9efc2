//! Resilient access to the external reasoning service: input sanitation,
//! idempotent response caching, retry with backoff, and salvage parsing of
//! JSON-shaped replies.

mod cache;
mod http;
mod parse;

pub use http::HttpChatTransport;
pub use parse::salvage_json;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use cache::PromptCache;

use crate::config::EngineConfig;

/// One fully specified upstream call.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

/// Single-attempt transport to the reasoning service. The gateway layers
/// caching and retry on top, so implementations stay one-shot.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, TransportError>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for std::sync::Arc<T> {
    async fn complete(&self, request: ChatRequest) -> Result<String, TransportError> {
        (**self).complete(request).await
    }
}

/// Failure taxonomy for one transport attempt. Every variant is treated
/// as transient and retried up to the configured budget.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("rate limited by reasoning service: {0}")]
    RateLimited(String),
    #[error("connection failure: {0}")]
    Connection(String),
    #[error("service error (status {status}): {detail}")]
    Service { status: u16, detail: String },
    #[error("request rejected for invalid encoding: {0}")]
    InvalidEncoding(String),
    #[error("empty reply from reasoning service")]
    EmptyReply,
}

/// Raised once the retry budget is exhausted. Callers treat this as
/// "analysis unavailable" and substitute their fallback payload; it must
/// never abort the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("reasoning service unavailable after {attempts} attempts: {detail}")]
    Unavailable { attempts: u32, detail: String },
}

/// Strip characters the upstream service rejects. Invalid encoding units
/// are replaced at the ingestion boundary; null bytes are dropped here.
pub(crate) fn sanitize_text(text: &str) -> String {
    text.replace('\u{0}', "")
}

fn ascii_subset(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii()).collect()
}

/// Cached, retrying front for a `ChatTransport`. The cache is owned by the
/// gateway instance, not shared globally across engines.
pub struct ReasoningGateway<T: ChatTransport> {
    transport: T,
    config: EngineConfig,
    cache: PromptCache,
}

impl<T: ChatTransport> ReasoningGateway<T> {
    pub fn new(transport: T, config: EngineConfig) -> Self {
        Self {
            transport,
            config,
            cache: PromptCache::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn request(&self, system: &str, user: &str) -> ChatRequest {
        ChatRequest {
            system: system.to_string(),
            user: user.to_string(),
            model: self.config.model_name.clone(),
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
        }
    }

    /// Send a system/user prompt pair, returning the (sanitized) reply
    /// text. Identical calls within this gateway's lifetime return the
    /// cached reply without a new upstream call.
    pub async fn converse(&self, system: &str, user: &str) -> Result<String, GatewayError> {
        let system = sanitize_text(system);
        let user = sanitize_text(user);

        if let Some(hit) = self.cache.get(&system, &user).await {
            info!("using cached reasoning reply");
            return Ok(hit);
        }

        // Degradation may rewrite the outgoing prompts mid-retry; the cache
        // key stays pinned to the original sanitized pair so identical
        // callers still hit.
        let mut outgoing_system = system.clone();
        let mut outgoing_user = user.clone();

        let attempts = self.config.max_retries.max(1);
        let mut last_failure = String::new();

        for attempt in 0..attempts {
            debug!(attempt = attempt + 1, attempts, "reasoning service call");

            match self
                .transport
                .complete(self.request(&outgoing_system, &outgoing_user))
                .await
            {
                Ok(content) => {
                    let content = sanitize_text(content.trim());
                    debug!(attempt = attempt + 1, "reasoning service call succeeded");
                    self.cache.insert(&system, &user, content.clone()).await;
                    return Ok(content);
                }
                Err(TransportError::RateLimited(detail)) => {
                    warn!(attempt = attempt + 1, "rate limited");
                    last_failure = format!("rate limited: {detail}");
                    if attempt + 1 < attempts {
                        let wait = self.config.retry_delay * 2u32.pow(attempt);
                        debug!(wait_secs = wait.as_secs_f64(), "backing off");
                        sleep(wait).await;
                    }
                }
                Err(TransportError::InvalidEncoding(detail)) => {
                    warn!(attempt = attempt + 1, detail = %detail, "encoding rejected, degrading prompts to ASCII");
                    last_failure = format!("invalid encoding: {detail}");
                    outgoing_system = ascii_subset(&outgoing_system);
                    outgoing_user = ascii_subset(&outgoing_user);
                    if attempt + 1 < attempts {
                        sleep(self.config.retry_delay).await;
                    }
                }
                Err(err) => {
                    warn!(attempt = attempt + 1, error = %err, "reasoning service call failed");
                    last_failure = err.to_string();
                    if attempt + 1 < attempts {
                        sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        error!(attempts, detail = %last_failure, "reasoning service exhausted retry budget");
        Err(GatewayError::Unavailable {
            attempts,
            detail: last_failure,
        })
    }

    #[cfg(test)]
    pub(crate) async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatRequest, ChatTransport, TransportError};
use crate::config::EngineConfig;

/// Chat-completions transport for an OpenAI-compatible endpoint.
pub struct HttpChatTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpChatTransport {
    pub fn new(config: &EngineConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| TransportError::Connection(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn classify(err: reqwest::Error) -> TransportError {
        if err.is_timeout() || err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Service {
                status: err.status().map(|status| status.as_u16()).unwrap_or(0),
                detail: err.to_string(),
            }
        }
    }
}

#[derive(Serialize)]
struct CompletionPayload<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionReply {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn complete(&self, request: ChatRequest) -> Result<String, TransportError> {
        let payload = CompletionPayload {
            model: &request.model,
            messages: [
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        if status.as_u16() == 429 {
            let detail = response.text().await.unwrap_or_default();
            return Err(TransportError::RateLimited(detail));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TransportError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        let reply: CompletionReply = response.json().await.map_err(|err| {
            TransportError::Service {
                status: status.as_u16(),
                detail: format!("malformed completion payload: {err}"),
            }
        })?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(TransportError::EmptyReply);
        }

        Ok(content)
    }
}

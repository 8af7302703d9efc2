use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::analysis::domain::{Finding, RiskLevel};
use crate::analysis::gateway::{ChatRequest, ChatTransport, TransportError};
use crate::config::EngineConfig;

/// Engine settings with a negligible retry delay so failure-path tests
/// stay fast.
pub(super) fn test_config() -> EngineConfig {
    let mut config = EngineConfig::with_api_key("test-key");
    config.retry_delay = Duration::from_millis(1);
    config
}

pub(super) fn finding(rule_id: &str, risk_level: RiskLevel, severity_weight: f64) -> Finding {
    Finding {
        rule_id: rule_id.to_string(),
        description: format!("{rule_id} description"),
        risk_level,
        category: "General".to_string(),
        severity_weight,
    }
}

/// Minimal valid clause reply with the given risk level.
pub(super) fn clause_reply(risk_level: &str) -> String {
    format!(
        r#"{{
            "plain_english_explanation": "Explains the clause.",
            "risk_level": "{risk_level}",
            "risk_reason": "Because of the wording.",
            "confidence_percentage": 90,
            "affected_party": "Vendor",
            "suggested_alternative_clause": "Use balanced language.",
            "negotiation_insight": "Push for a cap.",
            "legal_concerns": ["concern"],
            "missing_protections": []
        }}"#
    )
}

/// Transport that replays a scripted sequence of outcomes and records
/// every request, so tests can assert retry, cache, and degradation
/// behavior without a network.
pub(super) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<String, TransportError>>>,
    default_reply: Option<String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    pub(super) fn new(script: Vec<Result<String, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            default_reply: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Replays the script, then keeps answering with `reply`.
    pub(super) fn with_default(
        script: Vec<Result<String, TransportError>>,
        reply: &str,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            default_reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn always(reply: &str) -> Arc<Self> {
        Self::with_default(Vec::new(), reply)
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn complete(&self, request: ChatRequest) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request);

        let scripted = self.script.lock().expect("script poisoned").pop_front();
        match scripted {
            Some(outcome) => outcome,
            None => match &self.default_reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(TransportError::Connection("script exhausted".to_string())),
            },
        }
    }
}

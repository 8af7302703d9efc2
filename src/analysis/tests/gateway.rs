use std::sync::Arc;

use super::common::{test_config, ScriptedTransport};
use crate::analysis::gateway::{GatewayError, ReasoningGateway, TransportError};

#[tokio::test]
async fn identical_prompts_hit_the_cache() {
    let transport = ScriptedTransport::always("cached answer");
    let gateway = ReasoningGateway::new(Arc::clone(&transport), test_config());

    let first = gateway.converse("system", "user").await.unwrap();
    let second = gateway.converse("system", "user").await.unwrap();

    assert_eq!(first, "cached answer");
    assert_eq!(second, "cached answer");
    assert_eq!(transport.calls(), 1);
    assert_eq!(gateway.cached_entries().await, 1);
}

#[tokio::test]
async fn distinct_prompts_each_reach_the_service() {
    let transport = ScriptedTransport::always("answer");
    let gateway = ReasoningGateway::new(Arc::clone(&transport), test_config());

    gateway.converse("system", "first clause").await.unwrap();
    gateway.converse("system", "second clause").await.unwrap();

    assert_eq!(transport.calls(), 2);
    assert_eq!(gateway.cached_entries().await, 2);
}

#[tokio::test]
async fn rate_limit_is_retried_until_success() {
    let transport = ScriptedTransport::with_default(
        vec![
            Err(TransportError::RateLimited("slow down".to_string())),
            Err(TransportError::RateLimited("slow down".to_string())),
        ],
        "eventual answer",
    );
    let gateway = ReasoningGateway::new(Arc::clone(&transport), test_config());

    let reply = gateway.converse("system", "user").await.unwrap();

    assert_eq!(reply, "eventual answer");
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn retry_budget_exhaustion_surfaces_unavailable() {
    let transport = ScriptedTransport::new(vec![
        Err(TransportError::Connection("refused".to_string())),
        Err(TransportError::Connection("refused".to_string())),
        Err(TransportError::Connection("refused".to_string())),
    ]);
    let gateway = ReasoningGateway::new(Arc::clone(&transport), test_config());

    let err = gateway.converse("system", "user").await.unwrap_err();

    let GatewayError::Unavailable { attempts, detail } = err;
    assert_eq!(attempts, 3);
    assert!(detail.contains("refused"));
    assert_eq!(transport.calls(), 3);
    // Failures are never cached.
    assert_eq!(gateway.cached_entries().await, 0);
}

#[tokio::test]
async fn empty_replies_count_against_the_retry_budget() {
    let transport =
        ScriptedTransport::with_default(vec![Err(TransportError::EmptyReply)], "real answer");
    let gateway = ReasoningGateway::new(Arc::clone(&transport), test_config());

    let reply = gateway.converse("system", "user").await.unwrap();

    assert_eq!(reply, "real answer");
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn encoding_rejection_degrades_retries_to_ascii() {
    let transport = ScriptedTransport::with_default(
        vec![Err(TransportError::InvalidEncoding("bad bytes".to_string()))],
        "degraded answer",
    );
    let gateway = ReasoningGateway::new(Arc::clone(&transport), test_config());

    let reply = gateway
        .converse("system — héllo", "clause with “smart quotes”")
        .await
        .unwrap();
    assert_eq!(reply, "degraded answer");

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    // First attempt goes out verbatim; the retry is ASCII-only.
    assert!(requests[0].user.contains('“'));
    assert!(requests[1].system.is_ascii());
    assert!(requests[1].user.is_ascii());
}

#[tokio::test]
async fn degraded_success_is_cached_under_the_original_prompts() {
    let transport = ScriptedTransport::with_default(
        vec![Err(TransportError::InvalidEncoding("bad bytes".to_string()))],
        "degraded answer",
    );
    let gateway = ReasoningGateway::new(Arc::clone(&transport), test_config());

    gateway.converse("system", "résumé clause").await.unwrap();
    let again = gateway.converse("system", "résumé clause").await.unwrap();

    assert_eq!(again, "degraded answer");
    // Two attempts for the first call, none for the repeat.
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn null_bytes_are_stripped_before_sending() {
    let transport = ScriptedTransport::always("answer");
    let gateway = ReasoningGateway::new(Arc::clone(&transport), test_config());

    gateway
        .converse("sys\u{0}tem", "cla\u{0}use text")
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].system, "system");
    assert_eq!(requests[0].user, "clause text");
}

#[tokio::test]
async fn replies_are_trimmed_and_sanitized() {
    let transport = ScriptedTransport::always("  padded\u{0} answer  \n");
    let gateway = ReasoningGateway::new(Arc::clone(&transport), test_config());

    let reply = gateway.converse("system", "user").await.unwrap();
    assert_eq!(reply, "padded answer");
}

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

/// Pacing gate invoked after each clause completes. Injected so tests can
/// swap the production pause for a no-op.
#[async_trait]
pub trait AnalysisPacer: Send + Sync {
    async fn clause_completed(&self, clause_index: usize);
}

/// Pauses after every `every`-th clause to respect upstream rate limits.
#[derive(Debug, Clone)]
pub struct FixedIntervalPacer {
    every: usize,
    pause: Duration,
}

impl FixedIntervalPacer {
    pub fn new(every: usize, pause: Duration) -> Self {
        Self {
            every: every.max(1),
            pause,
        }
    }
}

impl Default for FixedIntervalPacer {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1))
    }
}

#[async_trait]
impl AnalysisPacer for FixedIntervalPacer {
    async fn clause_completed(&self, clause_index: usize) {
        if clause_index % self.every == 0 {
            debug!(clause_index, pause_secs = self.pause.as_secs_f64(), "pacing pause");
            sleep(self.pause).await;
        }
    }
}

/// Pacer that never pauses.
#[derive(Debug, Clone, Default)]
pub struct NoopPacer;

#[async_trait]
impl AnalysisPacer for NoopPacer {
    async fn clause_completed(&self, _clause_index: usize) {}
}

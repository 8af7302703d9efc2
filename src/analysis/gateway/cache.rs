use std::collections::HashMap;

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

/// Prompt prefix length feeding the cache key. Prompts longer than this
/// share a key when their prefixes agree.
const KEY_PREFIX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey([u8; 32]);

/// Process-lifetime response cache, scoped to one gateway instance.
/// Unbounded with no eviction: call volume is bounded by clause count.
#[derive(Debug, Default)]
pub struct PromptCache {
    entries: RwLock<HashMap<CacheKey, String>>,
}

impl PromptCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(system: &str, user: &str) -> CacheKey {
        let mut hasher = Sha256::new();
        let system_prefix: String = system.chars().take(KEY_PREFIX_CHARS).collect();
        let user_prefix: String = user.chars().take(KEY_PREFIX_CHARS).collect();
        hasher.update(system_prefix.as_bytes());
        hasher.update([0xff]);
        hasher.update(user_prefix.as_bytes());
        CacheKey(hasher.finalize().into())
    }

    pub async fn get(&self, system: &str, user: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries.get(&Self::key(system, user)).cloned()
    }

    pub async fn insert(&self, system: &str, user: &str, response: String) {
        let mut entries = self.entries.write().await;
        entries.insert(Self::key(system, user), response);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

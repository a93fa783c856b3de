use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use vocab_types::TrainingUnit;

use crate::error::TokenNotFound;

/// Pending save-tokens, keyed by the user who received them.
///
/// Expiry is whole-cache: if nothing touched the cache for longer than the
/// TTL, every binding is dropped before the next access is served.
pub struct TokenCache {
    ttl: Duration,
    state: Mutex<CacheState>,
}

struct CacheState {
    units: HashMap<(i64, String), TrainingUnit>,
    last_touch: Instant,
}

impl CacheState {
    /// Clear on expiry, then record this access
    fn touch(&mut self, ttl: Duration) {
        let now = Instant::now();
        if now.duration_since(self.last_touch) > ttl && !self.units.is_empty() {
            tracing::info!(dropped = self.units.len(), "save-token cache expired");
            self.units.clear();
        }
        self.last_touch = now;
    }
}

impl TokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(CacheState {
                units: HashMap::new(),
                last_touch: Instant::now(),
            }),
        }
    }

    /// Register the bindings of a sent block for `user_id`
    pub async fn put(&self, user_id: i64, bindings: HashMap<String, TrainingUnit>) {
        let mut state = self.state.lock().await;
        state.touch(self.ttl);
        for (token, unit) in bindings {
            state.units.insert((user_id, token), unit);
        }
    }

    /// Take the unit bound to `token`. A token can be redeemed once.
    pub async fn resolve(&self, user_id: i64, token: &str) -> Result<TrainingUnit, TokenNotFound> {
        let mut state = self.state.lock().await;
        state.touch(self.ttl);
        state
            .units
            .remove(&(user_id, token.to_string()))
            .ok_or_else(|| TokenNotFound {
                token: token.to_string(),
            })
    }

    pub async fn clear(&self) {
        self.state.lock().await.units.clear();
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.units.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vocab_types::SenseDefinition;

    use super::*;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    fn bindings(tokens: &[&str]) -> HashMap<String, TrainingUnit> {
        tokens
            .iter()
            .map(|t| {
                (
                    t.to_string(),
                    TrainingUnit::new(
                        "fox",
                        SenseDefinition {
                            definition: format!("def for {t}"),
                            ..Default::default()
                        },
                    ),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn token_is_redeemed_once() {
        let cache = TokenCache::new(HOUR);
        cache.put(1, bindings(&["/save_a"])).await;

        let unit = cache.resolve(1, "/save_a").await.unwrap();
        assert_eq!(unit.sense.definition, "def for /save_a");
        assert_eq!(
            cache.resolve(1, "/save_a").await,
            Err(TokenNotFound {
                token: "/save_a".into()
            })
        );
    }

    #[tokio::test]
    async fn tokens_are_scoped_per_user() {
        let cache = TokenCache::new(HOUR);
        cache.put(1, bindings(&["/save_a"])).await;
        cache.put(2, bindings(&["/save_a"])).await;

        assert!(cache.resolve(3, "/save_a").await.is_err());
        assert!(cache.resolve(2, "/save_a").await.is_ok());
        assert!(cache.resolve(1, "/save_a").await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_clears_before_resolve() {
        let cache = TokenCache::new(HOUR);
        cache.put(1, bindings(&["/save_a", "/save_b"])).await;

        tokio::time::advance(HOUR + Duration::from_secs(1)).await;
        assert!(cache.resolve(1, "/save_a").await.is_err());
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_clears_before_put() {
        let cache = TokenCache::new(HOUR);
        cache.put(1, bindings(&["/save_a"])).await;

        tokio::time::advance(HOUR + Duration::from_secs(1)).await;
        cache.put(1, bindings(&["/save_b"])).await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.resolve(1, "/save_a").await.is_err());
        assert!(cache.resolve(1, "/save_b").await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn every_access_extends_the_window() {
        let cache = TokenCache::new(HOUR);
        cache.put(1, bindings(&["/save_a", "/save_b"])).await;

        tokio::time::advance(HOUR - Duration::from_secs(1)).await;
        assert!(cache.resolve(1, "/save_missing").await.is_err());
        tokio::time::advance(HOUR - Duration::from_secs(1)).await;

        assert!(cache.resolve(1, "/save_a").await.is_ok());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_puts_and_resolves() {
        let cache = Arc::new(TokenCache::new(HOUR));
        let mut tasks = tokio::task::JoinSet::new();
        for user in 0..32 {
            let cache = cache.clone();
            tasks.spawn(async move {
                cache.put(user, bindings(&["/save_x", "/save_y"])).await;
                cache.resolve(user, "/save_x").await.is_ok()
            });
        }
        while let Some(result) = tasks.join_next().await {
            assert!(result.unwrap());
        }
        assert_eq!(cache.len().await, 32);
    }

    #[tokio::test]
    async fn clear_empties() {
        let cache = TokenCache::new(HOUR);
        cache.put(1, bindings(&["/save_a"])).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}

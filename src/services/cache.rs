use crate::models::Profile;
use crate::services::roster::RosterError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Roster fetch failed: {0}")]
    FetchError(Arc<RosterError>),
}

const ROSTER_KEY: &str = "roster";

/// In-memory roster snapshot with a time-to-live
///
/// Owned by the application state and shared between workers. Concurrent
/// misses are coalesced into a single fetch.
pub struct RosterCache {
    snapshots: moka::future::Cache<&'static str, Arc<Vec<Profile>>>,
    ttl_secs: u64,
}

impl RosterCache {
    /// Create a new roster cache
    pub fn new(ttl_secs: u64) -> Self {
        let snapshots = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { snapshots, ttl_secs }
    }

    /// Return the cached snapshot, or run `fetch` to populate it
    ///
    /// `fetch` is only polled on a miss.
    pub async fn get_or_fetch<F>(&self, fetch: F) -> Result<Arc<Vec<Profile>>, CacheError>
    where
        F: Future<Output = Result<Vec<Profile>, RosterError>>,
    {
        self.snapshots
            .try_get_with(ROSTER_KEY, async {
                let profiles = fetch.await?;
                tracing::info!("Roster refreshed ({} profiles, TTL: {}s)", profiles.len(), self.ttl_secs);
                Ok::<_, RosterError>(Arc::new(profiles))
            })
            .await
            .map_err(CacheError::FetchError)
    }

    /// Current snapshot, if one is cached
    pub async fn snapshot(&self) -> Option<Arc<Vec<Profile>>> {
        self.snapshots.get(ROSTER_KEY).await
    }

    /// Replace the cached snapshot
    pub async fn replace(&self, profiles: Vec<Profile>) {
        self.snapshots.insert(ROSTER_KEY, Arc::new(profiles)).await;
        tracing::trace!("Roster snapshot replaced");
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let roster_size = self.snapshot().await.map(|s| s.len());
        CacheStats {
            cached: roster_size.is_some(),
            roster_size,
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub cached: bool,
    pub roster_size: Option<usize>,
    pub ttl_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::code::PersonalityCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn roster() -> Vec<Profile> {
        vec![Profile {
            name: Some("Jun".to_string()),
            name_kor: None,
            name_eng: Some("Jun".to_string()),
            team: "Mobile".to_string(),
            mbti: PersonalityCode::parse("ISTP"),
            welcome_url: None,
        }]
    }

    #[test]
    fn test_fetch_once_then_cached() {
        tokio_test::block_on(async {
            let cache = RosterCache::new(60);
            let calls = AtomicUsize::new(0);

            for _ in 0..3 {
                let snapshot = cache
                    .get_or_fetch(async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(roster())
                    })
                    .await
                    .unwrap();
                assert_eq!(snapshot.len(), 1);
            }

            assert_eq!(calls.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn test_fetch_error_not_cached() {
        tokio_test::block_on(async {
            let cache = RosterCache::new(60);

            let result = cache
                .get_or_fetch(async { Err(RosterError::Unauthorized) })
                .await;
            assert!(matches!(result, Err(CacheError::FetchError(_))));
            assert!(cache.snapshot().await.is_none());

            cache.replace(roster()).await;
            let stats = cache.stats().await;
            assert!(stats.cached);
            assert_eq!(stats.roster_size, Some(1));
        });
    }
}

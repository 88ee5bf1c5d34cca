//! Fetch orchestration: cache lookup, quota gate, and rate-limit retry
//!
//! The `Fetcher` glues the lookup cache, the quota tracker, and the
//! external API client together. Given a post link or bare id it serves a
//! cache hit for free, fails fast when the monthly quota is gone, and on a
//! rate-limit response sleeps until the reported reset time and retries
//! exactly once. The cache write and quota increment happen only after a
//! confirmed successful fetch.

use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

use crate::cache::PostCache;
use crate::data::{extract_post_id, ApiError, FetchOutcome, PostRecord, PostSource};
use crate::quota::QuotaTracker;

/// Errors surfaced to the user for one fetch request
///
/// Every failure is terminal for the current request; nothing here triggers
/// an unbounded retry loop.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The input could not be parsed into a post id
    #[error("Invalid post link '{0}'. Expected https://x.com/user/status/<id> or a bare numeric id")]
    InvalidInput(String),

    /// The monthly call budget is used up and the post is not cached
    #[error("Monthly API quota exhausted ({budget}/{budget} calls used); resets in {days_until_reset} days")]
    QuotaExceeded {
        /// The monthly budget that was exhausted
        budget: u32,
        /// Days until the quota resets
        days_until_reset: i64,
    },

    /// The API reports the post does not exist
    #[error("Post {id} not found. It may have been deleted or made private")]
    NotFound {
        /// The id that was looked up
        id: String,
    },

    /// The API rate-limited both the original call and the single retry
    #[error("Rate limited by the API; next window opens at {retry_at}")]
    RateLimited {
        /// When the API will accept calls again
        retry_at: DateTime<Utc>,
    },

    /// The API call itself failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing the cache entry or quota file failed
    #[error("Failed to persist local state: {0}")]
    Storage(#[from] std::io::Error),
}

/// Orchestrates a single post fetch across cache, quota, and upstream API
pub struct Fetcher {
    /// Upstream post source (the real API client, or a scripted fake)
    source: Box<dyn PostSource>,
    /// Durable post cache
    cache: PostCache,
    /// Monthly call budget tracker
    quota: QuotaTracker,
}

impl Fetcher {
    /// Creates a fetcher over the given source, cache, and quota tracker
    pub fn new(source: Box<dyn PostSource>, cache: PostCache, quota: QuotaTracker) -> Self {
        Self {
            source,
            cache,
            quota,
        }
    }

    /// Read access to the post cache (for the stats sidebar)
    pub fn cache(&self) -> &PostCache {
        &self.cache
    }

    /// Read access to the quota tracker (for the stats sidebar)
    pub fn quota(&self) -> &QuotaTracker {
        &self.quota
    }

    /// Fetches one post by link or bare id
    ///
    /// A cached post is returned immediately without consuming quota or
    /// touching the network. On a cache miss the quota gate runs first,
    /// then a single API call; a rate-limit response is retried exactly
    /// once after sleeping out the reported reset window. Cache and quota
    /// are updated only after a successful fetch, in that order.
    pub async fn fetch(&mut self, input: &str) -> Result<PostRecord, FetchError> {
        let id = extract_post_id(input)
            .ok_or_else(|| FetchError::InvalidInput(input.trim().to_string()))?;

        if let Some(record) = self.cache.get(&id) {
            return Ok(record);
        }

        if !self.quota.can_call() {
            return Err(FetchError::QuotaExceeded {
                budget: self.quota.budget(),
                days_until_reset: self.quota.days_until_reset(),
            });
        }

        let mut outcome = self.source.lookup(&id).await?;

        if let FetchOutcome::RateLimited { reset } = outcome {
            wait_for_reset(reset).await;
            outcome = self.source.lookup(&id).await?;
        }

        match outcome {
            FetchOutcome::Found(record) => {
                self.cache.put(&id, &record)?;
                self.quota.record_call()?;
                Ok(record)
            }
            FetchOutcome::NotFound => Err(FetchError::NotFound { id }),
            // A second rate limit is surfaced as-is, carrying the new reset
            FetchOutcome::RateLimited { reset } => {
                Err(FetchError::RateLimited { retry_at: reset })
            }
        }
    }
}

/// Sleeps until just past the rate-limit reset time
///
/// A reset already in the past still waits one second, matching the API's
/// guidance to back off before re-requesting.
async fn wait_for_reset(reset: DateTime<Utc>) {
    let wait_secs = (reset - Utc::now()).num_seconds().max(0) as u64 + 1;
    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
}

//! X API v2 single-post lookup client
//!
//! This module provides the `PostSource` trait the fetch orchestrator talks
//! to, and the real `XApiClient` implementation backed by the
//! `GET /2/tweets/:id` endpoint with bearer-token auth.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use super::{Author, Engagement, MediaItem, MediaKind, PostRecord, VideoVariant};

/// Base URL for the X API v2 tweet lookup endpoint
const X_API_BASE_URL: &str = "https://api.x.com/2/tweets";

/// Query parameters requesting every field the `PostRecord` needs
const LOOKUP_QUERY: &str = "expansions=author_id,attachments.media_keys\
&tweet.fields=created_at,public_metrics\
&user.fields=username,name,profile_image_url,description\
&media.fields=url,type,preview_image_url,variants";

/// Errors that can occur when talking to the X API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Credentials were rejected by the API
    #[error("Authentication failed; check the configured bearer token")]
    Unauthorized,

    /// The API returned a status code we have no handling for
    #[error("Unexpected API status code: {0}")]
    UnexpectedStatus(u16),
}

/// Outcome of one upstream lookup attempt
///
/// Not-found and rate-limit responses are expected outcomes rather than
/// errors: the orchestrator handles each differently, so they are modeled
/// as variants instead of being folded into `ApiError`.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The post exists and was fully parsed
    Found(PostRecord),
    /// The post does not exist, was deleted, or is not visible
    NotFound,
    /// The API refused the call until the given reset time
    RateLimited {
        /// When the current rate-limit window resets
        reset: DateTime<Utc>,
    },
}

/// Upstream source of post records
///
/// The orchestrator depends on this seam instead of the concrete client so
/// tests can script outcomes without a network.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Looks up a single post by id
    async fn lookup(&self, id: &str) -> Result<FetchOutcome, ApiError>;
}

/// Client for the X API v2 single-tweet lookup
#[derive(Debug, Clone)]
pub struct XApiClient {
    client: Client,
    bearer_token: String,
    base_url: String,
}

impl XApiClient {
    /// Creates a new client using the given bearer token
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bearer_token: bearer_token.into(),
            base_url: X_API_BASE_URL.to_string(),
        }
    }

    /// Creates a client pointed at a custom base URL
    ///
    /// Useful for exercising the HTTP path against a local stub server.
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl PostSource for XApiClient {
    async fn lookup(&self, id: &str) -> Result<FetchOutcome, ApiError> {
        let url = format!("{}/{}?{}", self.base_url, id, LOOKUP_QUERY);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                let reset = parse_reset_header(&response).unwrap_or_else(Utc::now);
                Ok(FetchOutcome::RateLimited { reset })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Ok(FetchOutcome::NotFound),
            s if !s.is_success() => Err(ApiError::UnexpectedStatus(s.as_u16())),
            _ => {
                let text = response.text().await?;
                parse_lookup(&text)
            }
        }
    }
}

/// Reads the `x-rate-limit-reset` header (unix seconds) from a 429 response
fn parse_reset_header(response: &reqwest::Response) -> Option<DateTime<Utc>> {
    let secs = response
        .headers()
        .get("x-rate-limit-reset")?
        .to_str()
        .ok()?
        .parse::<i64>()
        .ok()?;
    DateTime::from_timestamp(secs, 0)
}

/// Parses a lookup response body into a `FetchOutcome`
///
/// A body carrying only an `errors` array (deleted or protected posts come
/// back this way with HTTP 200) maps to `NotFound`.
fn parse_lookup(body: &str) -> Result<FetchOutcome, ApiError> {
    let response: LookupResponse = serde_json::from_str(body)?;

    let data = match response.data {
        Some(data) => data,
        None => return Ok(FetchOutcome::NotFound),
    };

    let created_at = data
        .created_at
        .ok_or_else(|| ApiError::MissingField("created_at".to_string()))?;

    let metrics = data.public_metrics.unwrap_or_default();
    let includes = response.includes.unwrap_or_default();

    let author = resolve_author(data.author_id.as_deref(), &includes.users)?;
    let media = resolve_media(data.attachments.as_ref(), &includes.media);

    Ok(FetchOutcome::Found(PostRecord {
        id: data.id,
        text: data.text,
        created_at,
        metrics: Engagement {
            likes: metrics.like_count,
            reposts: metrics.retweet_count,
            quotes: metrics.quote_count,
            replies: metrics.reply_count,
        },
        media,
        author,
        fetched_at: Utc::now(),
    }))
}

/// Picks the post author out of the expanded users
///
/// Matches on `author_id` when present, falling back to the first expanded
/// user (the API lists the author first).
fn resolve_author(author_id: Option<&str>, users: &[WireUser]) -> Result<Author, ApiError> {
    let user = match author_id {
        Some(id) => users.iter().find(|u| u.id == id).or_else(|| users.first()),
        None => users.first(),
    }
    .ok_or_else(|| ApiError::MissingField("includes.users".to_string()))?;

    Ok(Author {
        handle: user.username.clone(),
        name: user.name.clone(),
        avatar_url: user.profile_image_url.clone(),
        bio: user.description.clone(),
    })
}

/// Builds the media list in the order the post's attachment keys declare
fn resolve_media(attachments: Option<&WireAttachments>, media: &[WireMedia]) -> Vec<MediaItem> {
    let keys = match attachments {
        Some(attachments) => &attachments.media_keys,
        None => return Vec::new(),
    };

    let by_key: HashMap<&str, &WireMedia> =
        media.iter().map(|m| (m.media_key.as_str(), m)).collect();

    keys.iter()
        .filter_map(|key| by_key.get(key.as_str()))
        .map(|m| MediaItem {
            kind: m.kind,
            url: m.url.clone(),
            preview_image_url: m.preview_image_url.clone(),
            variants: m
                .variants
                .iter()
                .flatten()
                .map(|v| VideoVariant {
                    content_type: v.content_type.clone(),
                    url: v.url.clone(),
                    bit_rate: v.bit_rate,
                })
                .collect(),
        })
        .collect()
}

// Wire types mirroring the X API v2 lookup response shape.

#[derive(Debug, Deserialize)]
struct LookupResponse {
    data: Option<WireTweet>,
    includes: Option<WireIncludes>,
}

#[derive(Debug, Deserialize)]
struct WireTweet {
    id: String,
    text: String,
    created_at: Option<DateTime<Utc>>,
    author_id: Option<String>,
    public_metrics: Option<WireMetrics>,
    attachments: Option<WireAttachments>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMetrics {
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    retweet_count: u64,
    #[serde(default)]
    quote_count: u64,
    #[serde(default)]
    reply_count: u64,
}

#[derive(Debug, Deserialize)]
struct WireAttachments {
    #[serde(default)]
    media_keys: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireIncludes {
    #[serde(default)]
    users: Vec<WireUser>,
    #[serde(default)]
    media: Vec<WireMedia>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    username: String,
    name: String,
    profile_image_url: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMedia {
    media_key: String,
    #[serde(rename = "type")]
    kind: MediaKind,
    url: Option<String>,
    preview_image_url: Option<String>,
    variants: Option<Vec<WireVariant>>,
}

#[derive(Debug, Deserialize)]
struct WireVariant {
    content_type: String,
    url: String,
    bit_rate: Option<u64>,
}

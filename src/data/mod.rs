//! Core data models for postpeek
//!
//! This module contains the data types describing a fetched X post —
//! text, engagement counts, media attachments, and author metadata —
//! along with post-id extraction from user-supplied links.

pub mod api;

pub use api::{ApiError, FetchOutcome, PostSource, XApiClient};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully-denormalized record of one fetched post
///
/// Created on the first successful fetch and never mutated afterwards.
/// Everything the UI and the plain-text export need lives here, so a cache
/// hit requires no further lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Unique post identifier (the numeric status id)
    pub id: String,
    /// Full text body of the post
    pub text: String,
    /// When the post was published
    pub created_at: DateTime<Utc>,
    /// Engagement counts at fetch time
    pub metrics: Engagement,
    /// Media attached to the post, in the order the API reports them
    pub media: Vec<MediaItem>,
    /// Author display metadata
    pub author: Author,
    /// When this record was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Public engagement counts for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Engagement {
    /// Number of likes
    pub likes: u64,
    /// Number of reposts (retweets)
    pub reposts: u64,
    /// Number of quote posts
    pub quotes: u64,
    /// Number of replies
    pub replies: u64,
}

/// Author display metadata for a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Account handle without the leading @
    pub handle: String,
    /// Display name
    pub name: String,
    /// Profile image URL, if the API returned one
    pub avatar_url: Option<String>,
    /// Profile bio, if present
    pub bio: Option<String>,
}

/// Kinds of media that can be attached to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    AnimatedGif,
}

/// One media attachment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// What kind of media this is
    pub kind: MediaKind,
    /// Direct URL (photos carry this; videos usually do not)
    pub url: Option<String>,
    /// Preview image URL for videos and GIFs
    pub preview_image_url: Option<String>,
    /// Video variants by content type and bit rate (empty for photos)
    pub variants: Vec<VideoVariant>,
}

/// A single playable variant of a video attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoVariant {
    /// MIME content type, e.g. "video/mp4"
    pub content_type: String,
    /// URL of this variant
    pub url: String,
    /// Bit rate in bits per second, absent for streaming playlists
    pub bit_rate: Option<u64>,
}

impl MediaItem {
    /// Returns the URL of the highest-bit-rate MP4 variant, if any
    ///
    /// Streaming playlist variants (no bit rate) are skipped in favor of
    /// direct MP4 files.
    pub fn best_video_url(&self) -> Option<&str> {
        self.variants
            .iter()
            .filter(|v| v.content_type == "video/mp4")
            .max_by_key(|v| v.bit_rate.unwrap_or(0))
            .map(|v| v.url.as_str())
    }
}

/// Extracts a post id from a link or bare id string
///
/// Accepts either a bare numeric id (`"42"`) or any URL containing a
/// `status/<digits>` segment, such as
/// `https://x.com/alice/status/42` or the twitter.com equivalent.
/// Query strings and trailing path segments after the id are ignored.
///
/// # Returns
/// * `Some(id)` with the numeric id as a string
/// * `None` if no id can be extracted
pub fn extract_post_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Bare numeric id
    if input.chars().all(|c| c.is_ascii_digit()) {
        return Some(input.to_string());
    }

    // URL form: take the digit run following the last "status/" segment
    let (_, rest) = input.rsplit_once("status/")?;
    let id: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(content_type: &str, url: &str, bit_rate: Option<u64>) -> VideoVariant {
        VideoVariant {
            content_type: content_type.to_string(),
            url: url.to_string(),
            bit_rate,
        }
    }

    #[test]
    fn test_extract_post_id_from_full_url() {
        assert_eq!(
            extract_post_id("https://x.com/alice/status/42"),
            Some("42".to_string())
        );
    }

    #[test]
    fn test_extract_post_id_from_twitter_domain() {
        assert_eq!(
            extract_post_id("https://twitter.com/bob/status/123456789"),
            Some("123456789".to_string())
        );
    }

    #[test]
    fn test_extract_post_id_ignores_query_string() {
        assert_eq!(
            extract_post_id("https://x.com/alice/status/42?s=20&t=abc"),
            Some("42".to_string())
        );
    }

    #[test]
    fn test_extract_post_id_ignores_trailing_path() {
        assert_eq!(
            extract_post_id("https://x.com/alice/status/42/photo/1"),
            Some("42".to_string())
        );
    }

    #[test]
    fn test_extract_post_id_bare_id() {
        assert_eq!(extract_post_id("987654321"), Some("987654321".to_string()));
    }

    #[test]
    fn test_extract_post_id_trims_whitespace() {
        assert_eq!(
            extract_post_id("  https://x.com/alice/status/42 "),
            Some("42".to_string())
        );
    }

    #[test]
    fn test_extract_post_id_rejects_url_without_status() {
        assert_eq!(extract_post_id("https://x.com/alice"), None);
    }

    #[test]
    fn test_extract_post_id_rejects_status_without_digits() {
        assert_eq!(extract_post_id("https://x.com/alice/status/"), None);
    }

    #[test]
    fn test_extract_post_id_rejects_empty_input() {
        assert_eq!(extract_post_id(""), None);
        assert_eq!(extract_post_id("   "), None);
    }

    #[test]
    fn test_extract_post_id_rejects_plain_text() {
        assert_eq!(extract_post_id("not a link"), None);
    }

    #[test]
    fn test_best_video_url_picks_highest_bitrate_mp4() {
        let item = MediaItem {
            kind: MediaKind::Video,
            url: None,
            preview_image_url: Some("https://pbs.twimg.com/preview.jpg".to_string()),
            variants: vec![
                variant(
                    "application/x-mpegURL",
                    "https://video.example/playlist.m3u8",
                    None,
                ),
                variant("video/mp4", "https://video.example/low.mp4", Some(256_000)),
                variant(
                    "video/mp4",
                    "https://video.example/high.mp4",
                    Some(2_176_000),
                ),
            ],
        };

        assert_eq!(
            item.best_video_url(),
            Some("https://video.example/high.mp4")
        );
    }

    #[test]
    fn test_best_video_url_none_for_photo() {
        let item = MediaItem {
            kind: MediaKind::Photo,
            url: Some("https://pbs.twimg.com/media/abc.jpg".to_string()),
            preview_image_url: None,
            variants: Vec::new(),
        };

        assert_eq!(item.best_video_url(), None);
    }

    #[test]
    fn test_post_record_serialization_roundtrip() {
        let record = PostRecord {
            id: "42".to_string(),
            text: "hello world".to_string(),
            created_at: Utc::now(),
            metrics: Engagement {
                likes: 10,
                reposts: 2,
                quotes: 1,
                replies: 3,
            },
            media: vec![MediaItem {
                kind: MediaKind::Photo,
                url: Some("https://pbs.twimg.com/media/abc.jpg".to_string()),
                preview_image_url: None,
                variants: Vec::new(),
            }],
            author: Author {
                handle: "alice".to_string(),
                name: "Alice".to_string(),
                avatar_url: Some("https://pbs.twimg.com/profile.jpg".to_string()),
                bio: None,
            },
            fetched_at: Utc::now(),
        };

        let json = serde_json::to_string(&record).expect("Failed to serialize PostRecord");
        let deserialized: PostRecord =
            serde_json::from_str(&json).expect("Failed to deserialize PostRecord");

        assert_eq!(deserialized, record);
    }

    #[test]
    fn test_media_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&MediaKind::AnimatedGif).unwrap(),
            "\"animated_gif\""
        );
        let kind: MediaKind = serde_json::from_str("\"photo\"").unwrap();
        assert_eq!(kind, MediaKind::Photo);
    }
}

//! Plain-text export of fetched posts
//!
//! Appends a human-readable summary block for one post to a text file,
//! mirroring the fields shown in the detail view.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::data::PostRecord;

/// Default export file, created in the working directory
pub const DEFAULT_EXPORT_FILE: &str = "post_data.txt";

/// Appends a summary block for the given post to `path`
///
/// Each call appends one block; the file accumulates blocks across
/// sessions rather than being overwritten.
pub fn append_summary(record: &PostRecord, path: &Path) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let separator = "=".repeat(50);
    writeln!(file)?;
    writeln!(file, "{}", separator)?;
    writeln!(file, "Post ID: {}", record.id)?;
    writeln!(file, "Author: @{}", record.author.handle)?;
    writeln!(file, "Posted: {}", record.created_at)?;
    writeln!(file, "Text: {}", record.text)?;
    writeln!(file, "Likes: {}", record.metrics.likes)?;
    writeln!(file, "Reposts: {}", record.metrics.reposts)?;
    writeln!(file, "Quote Count: {}", record.metrics.quotes)?;
    writeln!(file, "Reply Count: {}", record.metrics.replies)?;
    writeln!(file, "{}", separator)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Author, Engagement};
    use chrono::Utc;
    use std::fs;
    use tempfile::TempDir;

    fn sample_record() -> PostRecord {
        PostRecord {
            id: "42".to_string(),
            text: "exported post".to_string(),
            created_at: Utc::now(),
            metrics: Engagement {
                likes: 9,
                reposts: 3,
                quotes: 1,
                replies: 2,
            },
            media: Vec::new(),
            author: Author {
                handle: "alice".to_string(),
                name: "Alice".to_string(),
                avatar_url: None,
                bio: None,
            },
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_append_summary_writes_all_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("post_data.txt");

        append_summary(&sample_record(), &path).expect("Export should succeed");

        let content = fs::read_to_string(&path).expect("Should read export file");
        assert!(content.contains("Post ID: 42"));
        assert!(content.contains("Author: @alice"));
        assert!(content.contains("Text: exported post"));
        assert!(content.contains("Likes: 9"));
        assert!(content.contains("Reposts: 3"));
        assert!(content.contains("Quote Count: 1"));
        assert!(content.contains("Reply Count: 2"));
    }

    #[test]
    fn test_append_summary_appends_across_calls() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("post_data.txt");

        append_summary(&sample_record(), &path).expect("First export should succeed");
        append_summary(&sample_record(), &path).expect("Second export should succeed");

        let content = fs::read_to_string(&path).expect("Should read export file");
        assert_eq!(
            content.matches("Post ID: 42").count(),
            2,
            "Both blocks should be present"
        );
    }
}

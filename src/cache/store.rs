//! On-disk post cache keyed by post id
//!
//! Each cached post lives in its own `<id>.json` file under an
//! XDG-compliant cache directory. Reads never touch the network; writes
//! are idempotent overwrites of immutable records.

use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

use crate::data::PostRecord;

/// Durable mapping from post id to its fetched record
///
/// The cache stores records as JSON files in an XDG-compliant cache
/// directory (`~/.cache/postpeek/posts/` on Linux). There is no TTL and no
/// automatic eviction: a cached post is served as-is until the cache is
/// cleared.
#[derive(Debug, Clone)]
pub struct PostCache {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl PostCache {
    /// Creates a new PostCache using the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g. no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "postpeek")?;
        let cache_dir = project_dirs.cache_dir().join("posts");
        Some(Self { cache_dir })
    }

    /// Creates a new PostCache with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path to the cache file for the given post id
    fn entry_path(&self, id: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", id))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Reads a cached post record
    ///
    /// Never performs network I/O. A cache file that cannot be parsed is
    /// removed so the next fetch replaces it cleanly.
    ///
    /// # Returns
    /// * `Some(PostRecord)` if the entry exists and parses
    /// * `None` if the entry is absent or corrupt
    pub fn get(&self, id: &str) -> Option<PostRecord> {
        let path = self.entry_path(id);
        let content = fs::read_to_string(&path).ok()?;

        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(_) => {
                // Corrupt entry: drop it so the next fetch rewrites it
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Writes a post record into the cache
    ///
    /// Idempotent: writing the same id twice overwrites the entry with
    /// identical content and produces no error.
    pub fn put(&self, id: &str, record: &PostRecord) -> std::io::Result<()> {
        self.ensure_dir()?;

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.entry_path(id), json)
    }

    /// Counts the cached posts (shown in the stats sidebar)
    pub fn len(&self) -> usize {
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
            .count()
    }

    /// Returns true if no posts are cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every cached post
    ///
    /// # Returns
    /// The number of entries removed.
    pub fn clear(&self) -> std::io::Result<usize> {
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            // A cache directory that was never created is already clear
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

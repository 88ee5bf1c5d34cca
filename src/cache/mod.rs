//! Post cache module
//!
//! This module provides a durable lookup cache mapping post ids to fetched
//! post records, stored as one JSON file per post. Entries are write-once
//! and never expire: staleness is accepted to conserve API quota, and the
//! only eviction is an explicit cache clear.

mod store;

pub use store::PostCache;

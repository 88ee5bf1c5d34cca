//! postpeek library
//!
//! This module exposes the cache, quota, fetch, and configuration modules
//! for use in integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod export;
pub mod fetch;
pub mod quota;

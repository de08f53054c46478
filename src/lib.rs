//! forumgrab - incremental forum thread crawler and archiver.
//!
//! Discovers discussion threads from a forum listing, paginates through each
//! thread with duplicate-tail detection, stores raw page markup on disk, and
//! builds a summary manifest of the crawled corpus.

pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod fingerprint;
pub mod index;
pub mod normalize;
pub mod storage;
pub mod utils;
pub mod verify;

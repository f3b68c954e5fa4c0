//! # Leadbook Common Library
//!
//! Shared code for the Leadbook crates including:
//! - Error type shared by storage and configuration code
//! - Configuration loading (TOML bootstrap, root folder resolution)
//! - SQLite database initialization
//! - Durable key-value store abstraction

pub mod config;
pub mod db;
pub mod error;
pub mod store;

pub use error::{Error, Result};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};

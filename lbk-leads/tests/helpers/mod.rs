//! Test Helper Utilities
//!
//! Shared utilities for testing lbk-leads

#![allow(dead_code)]

pub mod store_utils;

pub use store_utils::{create_test_store, memory_session, session_over, FailingStore};

use lbk_leads::services::RawFile;

/// CSV upload from header + data lines
pub fn csv_file(name: &str, lines: &[&str]) -> RawFile {
    let mut content = lines.join("\n");
    content.push('\n');
    RawFile::new(name, content)
}

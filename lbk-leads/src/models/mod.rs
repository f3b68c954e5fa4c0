//! Data models for lbk-leads
//!
//! - Lead records and their tri-state status cycle
//! - Imported file registry with per-file progress snapshots
//! - The in-memory corpus owned by the signed-in account
//! - Import batch results

pub mod account;
pub mod corpus;
pub mod import_result;
pub mod imported_file;
pub mod lead;

pub use account::{Account, AccountSummary};
pub use corpus::{Corpus, RemovedFile};
pub use import_result::{FileOutcome, FileOutcomeKind, ImportResult};
pub use imported_file::{ImportedFile, ProgressEntry};
pub use lead::{identity_key, Lead, LeadStatus};

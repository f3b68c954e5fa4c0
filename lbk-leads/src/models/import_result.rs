//! Import batch results
//!
//! One [`FileOutcome`] per uploaded file. A failed or skipped file never
//! aborts the batch; its outcome just says why.

use serde::{Deserialize, Serialize};

/// What happened to one file of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcomeKind {
    /// Rows were merged into the corpus
    Imported {
        imported: usize,
        duplicates_removed: usize,
        /// Saved progress from an earlier import of the same content was reapplied
        progress_restored: bool,
    },
    /// Content fingerprint already registered; nothing changed
    AlreadyUploaded,
    /// File could not be read; nothing changed
    Failed {
        error_code: String,
        error_message: String,
    },
}

/// Outcome of one file plus the user-facing messages describing it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub file_name: String,
    #[serde(flatten)]
    pub kind: FileOutcomeKind,
    pub messages: Vec<String>,
}

impl FileOutcome {
    pub fn imported(
        file_name: String,
        imported: usize,
        duplicates_removed: usize,
        progress_restored: bool,
    ) -> Self {
        let mut messages = Vec::new();
        if progress_restored {
            messages.push(format!("Progress restored for \"{}\"", file_name));
        }

        let mut summary = format!("{} leads imported from \"{}\"", imported, file_name);
        if duplicates_removed > 0 {
            summary.push_str(&format!(" ({} duplicates removed)", duplicates_removed));
        }
        messages.push(summary);

        Self {
            file_name,
            kind: FileOutcomeKind::Imported {
                imported,
                duplicates_removed,
                progress_restored,
            },
            messages,
        }
    }

    pub fn already_uploaded(file_name: String) -> Self {
        let messages = vec![format!("File \"{}\" already uploaded", file_name)];
        Self {
            file_name,
            kind: FileOutcomeKind::AlreadyUploaded,
            messages,
        }
    }

    pub fn failed(file_name: String, error_code: &str, error_message: String) -> Self {
        let messages = vec![format!("Error reading \"{}\": {}", file_name, error_message)];
        Self {
            file_name,
            kind: FileOutcomeKind::Failed {
                error_code: error_code.to_string(),
                error_message,
            },
            messages,
        }
    }

    /// Leads this file added to the corpus
    pub fn imported_count(&self) -> usize {
        match self.kind {
            FileOutcomeKind::Imported { imported, .. } => imported,
            _ => 0,
        }
    }

    pub fn duplicates_removed(&self) -> usize {
        match self.kind {
            FileOutcomeKind::Imported { duplicates_removed, .. } => duplicates_removed,
            _ => 0,
        }
    }
}

/// Result of an import batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub files: Vec<FileOutcome>,
}

impl ImportResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
    }

    /// Total leads added across the batch
    pub fn leads_added(&self) -> usize {
        self.files.iter().map(FileOutcome::imported_count).sum()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.files.iter().map(FileOutcome::duplicates_removed).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.kind, FileOutcomeKind::Failed { .. }))
            .count()
    }

    /// All user-facing messages in file order
    pub fn messages(&self) -> Vec<String> {
        self.files.iter().flat_map(|f| f.messages.iter().cloned()).collect()
    }
}

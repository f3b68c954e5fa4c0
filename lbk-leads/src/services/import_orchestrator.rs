//! Import orchestrator
//!
//! Drives each uploaded file through the pipeline:
//! FINGERPRINT → PARSE → NORMALIZE → DEDUPE → RECONCILE → MERGE
//!
//! Files are processed strictly one after another. Each file deduplicates
//! against the corpus as it stands after the previous file merged, so two
//! files of one batch sharing a lead only import it once. The corpus is only
//! touched after a file's pipeline fully succeeded; a failing file leaves it
//! exactly as it was and the batch continues.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::fingerprinter::fingerprint_bytes;
use super::lead_deduplicator::dedupe;
use super::progress_reconciler::reconcile;
use super::row_normalizer::normalize;
use super::row_reader::{read_rows, RawFile};
use crate::models::{Corpus, FileOutcome, ImportResult, ImportedFile, Lead};

/// What to do with a file whose content fingerprint is already registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Report "already uploaded" and leave the corpus untouched
    #[default]
    Skip,
    /// Reprocess the file, restore the registry entry's saved progress onto
    /// the leads it adds, and update that entry in place
    Reconcile,
}

/// Import pipeline entry point
#[derive(Debug, Clone, Default)]
pub struct ImportOrchestrator {
    default_policy: DuplicatePolicy,
}

impl ImportOrchestrator {
    pub fn new(default_policy: DuplicatePolicy) -> Self {
        Self { default_policy }
    }

    pub fn default_policy(&self) -> DuplicatePolicy {
        self.default_policy
    }

    /// Policy for one request; `force` always reprocesses
    pub fn policy_for(&self, force: bool) -> DuplicatePolicy {
        if force {
            DuplicatePolicy::Reconcile
        } else {
            self.default_policy
        }
    }

    /// Import a batch of files into `corpus`
    ///
    /// Never fails as a whole: every file gets its own outcome in the result.
    pub async fn import_files(
        &self,
        files: Vec<RawFile>,
        corpus: &mut Corpus,
        policy: DuplicatePolicy,
    ) -> ImportResult {
        let mut result = ImportResult::new();

        tracing::info!(files = files.len(), ?policy, "Starting import batch");

        for file in files {
            let outcome = self.import_file(file, corpus, policy).await;
            result.push(outcome);
        }

        tracing::info!(
            leads_added = result.leads_added(),
            duplicates_removed = result.duplicates_removed(),
            failed = result.failed_count(),
            total_leads = corpus.leads.len(),
            "Import batch complete"
        );

        result
    }

    async fn import_file(
        &self,
        file: RawFile,
        corpus: &mut Corpus,
        policy: DuplicatePolicy,
    ) -> FileOutcome {
        let file_name = file.name.clone();
        let hash = fingerprint_bytes(&file.bytes);
        let registered = corpus.file_index_by_fingerprint(&hash);

        if registered.is_some() && policy == DuplicatePolicy::Skip {
            tracing::info!(file = %file_name, %hash, "File already uploaded, skipping");
            return FileOutcome::already_uploaded(file_name);
        }

        let rows = match read_rows(file).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "Failed to read file");
                return FileOutcome::failed(file_name, e.code(), e.to_string());
            }
        };

        let candidates: Vec<Lead> = rows
            .iter()
            .map(|row| normalize(row, &file_name))
            .filter(|lead| !lead.is_blank())
            .collect();

        tracing::debug!(
            file = %file_name,
            rows = rows.len(),
            candidates = candidates.len(),
            "Normalized rows"
        );

        let deduped = dedupe(candidates, &corpus.leads);

        let snapshot = registered.map(|index| corpus.files[index].progress.as_slice());
        let unique = reconcile(deduped.unique, snapshot);

        let imported = unique.len();
        corpus.append_leads(unique);

        let now = Utc::now();
        match registered {
            Some(index) => corpus.files[index].refresh(now, imported),
            None => corpus
                .files
                .push(ImportedFile::new(file_name.clone(), hash, now, imported)),
        }

        tracing::info!(
            file = %file_name,
            imported,
            duplicates_removed = deduped.duplicates,
            progress_restored = registered.is_some(),
            "File imported"
        );

        FileOutcome::imported(file_name, imported, deduped.duplicates, registered.is_some())
    }
}

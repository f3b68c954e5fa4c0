//! In-memory lead corpus owned by the signed-in account
//!
//! The corpus is loaded wholesale, mutated in memory, and written back
//! wholesale after every mutation (see `session`).

use chrono::{DateTime, Utc};

use super::imported_file::ImportedFile;
use super::lead::Lead;
use crate::services::fingerprinter::Fingerprint;

/// All leads plus the registry of imported files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub leads: Vec<Lead>,
    pub files: Vec<ImportedFile>,
    /// Next sequence id to hand out; only ever grows
    next_sequence_id: u64,
}

/// Result of removing a file from the registry
#[derive(Debug, Clone)]
pub struct RemovedFile {
    pub file: ImportedFile,
    pub leads_removed: usize,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a corpus from stored parts
    ///
    /// Sequence ids continue from the corpus size, or past the highest stored
    /// id if that is larger, so ids are never handed out twice.
    pub fn from_parts(leads: Vec<Lead>, files: Vec<ImportedFile>) -> Self {
        let past_highest = leads.iter().map(|l| l.id + 1).max().unwrap_or(0);
        let next_sequence_id = past_highest.max(leads.len() as u64);
        Self {
            leads,
            files,
            next_sequence_id,
        }
    }

    pub fn next_sequence_id(&self) -> u64 {
        self.next_sequence_id
    }

    /// Assign sequence ids to `leads` and append them
    pub fn append_leads(&mut self, leads: Vec<Lead>) {
        self.leads.reserve(leads.len());
        for mut lead in leads {
            lead.id = self.next_sequence_id;
            self.next_sequence_id += 1;
            self.leads.push(lead);
        }
    }

    /// Registry index of the file with this content fingerprint
    pub fn file_index_by_fingerprint(&self, fingerprint: &Fingerprint) -> Option<usize> {
        self.files.iter().position(|f| &f.hash == fingerprint)
    }

    pub fn lead(&self, id: u64) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    /// Advance a lead's status and record it in its file's progress snapshot
    ///
    /// Returns the updated lead, or `None` if no lead has this id.
    pub fn toggle_lead(&mut self, id: u64, now: DateTime<Utc>) -> Option<Lead> {
        let lead = self.leads.iter_mut().find(|l| l.id == id)?;
        lead.advance_status(now);
        let lead = lead.clone();

        match self.files.iter_mut().find(|f| f.name == lead.source_file) {
            Some(file) => {
                file.record_progress(&lead);
            }
            None => {
                tracing::debug!(
                    lead_id = id,
                    file = %lead.source_file,
                    "No registry entry for lead's source file, progress not snapshotted"
                );
            }
        }

        Some(lead)
    }

    /// Remove the registry entry at `index` and every lead imported from it
    pub fn remove_file(&mut self, index: usize) -> Option<RemovedFile> {
        if index >= self.files.len() {
            return None;
        }

        let file = self.files.remove(index);
        let before = self.leads.len();
        self.leads.retain(|l| l.source_file != file.name);

        Some(RemovedFile {
            leads_removed: before - self.leads.len(),
            file,
        })
    }
}

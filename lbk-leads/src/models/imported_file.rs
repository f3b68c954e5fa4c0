//! Imported file registry entries and their progress snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lead::{identity_key, Lead, LeadStatus};
use crate::services::fingerprinter::Fingerprint;

/// Last known progress of one lead identity within a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Email as it appeared on the lead; compared case-insensitively
    pub email: String,

    pub status: LeadStatus,

    #[serde(rename = "dateCompleted", default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProgressEntry {
    pub fn identity_key(&self) -> Option<String> {
        identity_key(&self.email)
    }
}

/// Record of one completed import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedFile {
    /// Display name (the uploaded file name)
    pub name: String,

    /// Content fingerprint used for "already uploaded" detection
    pub hash: Fingerprint,

    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,

    /// Leads actually added by the most recent import (post-dedup)
    #[serde(rename = "leadCount", default)]
    pub lead_count: usize,

    /// Progress of every lead ever associated with this file
    #[serde(rename = "leadsProgress", default)]
    pub progress: Vec<ProgressEntry>,
}

impl ImportedFile {
    /// New registry entry with an empty progress snapshot
    pub fn new(
        name: String,
        hash: Fingerprint,
        uploaded_at: DateTime<Utc>,
        lead_count: usize,
    ) -> Self {
        Self {
            name,
            hash,
            uploaded_at,
            lead_count,
            progress: Vec::new(),
        }
    }

    /// Update after the same content was imported again; the snapshot is kept
    pub fn refresh(&mut self, uploaded_at: DateTime<Utc>, lead_count: usize) {
        self.uploaded_at = uploaded_at;
        self.lead_count = lead_count;
    }

    /// Record the lead's current status in the snapshot
    ///
    /// Upserts by identity key. Leads without an email have no identity and
    /// are not recorded. Returns true when the snapshot changed.
    pub fn record_progress(&mut self, lead: &Lead) -> bool {
        let Some(key) = lead.identity_key() else {
            return false;
        };

        let entry = ProgressEntry {
            email: lead.email.clone(),
            status: lead.status,
            completed_at: lead.completed_at,
        };

        match self
            .progress
            .iter_mut()
            .find(|p| p.identity_key().as_deref() == Some(key.as_str()))
        {
            Some(existing) => *existing = entry,
            None => self.progress.push(entry),
        }

        true
    }
}

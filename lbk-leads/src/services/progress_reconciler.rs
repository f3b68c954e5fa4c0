//! Progress reconciliation
//!
//! Re-uploading an edited working file must not wipe completion work. Saved
//! status and completion date from the file's progress snapshot are reapplied
//! onto freshly imported leads with a matching identity key.

use std::collections::HashMap;

use crate::models::{Lead, ProgressEntry};

/// Reapply saved progress onto matching candidates
///
/// With no snapshot the candidates are returned unchanged. Leads without an
/// email are never matched. When a snapshot holds several entries for one
/// identity the first one wins.
pub fn reconcile(mut candidates: Vec<Lead>, snapshot: Option<&[ProgressEntry]>) -> Vec<Lead> {
    let Some(snapshot) = snapshot else {
        return candidates;
    };

    let mut saved: HashMap<String, &ProgressEntry> = HashMap::with_capacity(snapshot.len());
    for entry in snapshot {
        if let Some(key) = entry.identity_key() {
            saved.entry(key).or_insert(entry);
        }
    }

    let mut restored = 0usize;
    for lead in candidates.iter_mut() {
        let Some(key) = lead.identity_key() else {
            continue;
        };
        if let Some(entry) = saved.get(&key) {
            lead.status = entry.status;
            lead.completed_at = entry.completed_at;
            restored += 1;
        }
    }

    tracing::debug!(restored, snapshot_entries = snapshot.len(), "Reconciled progress");

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use chrono::Utc;

    fn lead(email: &str) -> Lead {
        Lead::new("Someone", email, "", "a.csv")
    }

    fn entry(email: &str, status: LeadStatus) -> ProgressEntry {
        ProgressEntry {
            email: email.to_string(),
            status,
            completed_at: (status == LeadStatus::Completed).then(Utc::now),
        }
    }

    #[test]
    fn test_no_snapshot_leaves_candidates_unchanged() {
        let candidates = vec![lead("jo@x.com"), lead("")];
        let result = reconcile(candidates.clone(), None);
        assert_eq!(result, candidates);
    }

    #[test]
    fn test_matching_entry_restores_status_and_date() {
        let snapshot = vec![entry("JO@x.com", LeadStatus::Completed)];

        let result = reconcile(vec![lead("jo@X.com"), lead("am@y.com")], Some(&snapshot));

        assert_eq!(result[0].status, LeadStatus::Completed);
        assert_eq!(result[0].completed_at, snapshot[0].completed_at);
        assert_eq!(result[1].status, LeadStatus::Todo);
        assert_eq!(result[1].completed_at, None);
    }

    #[test]
    fn test_leads_without_email_not_reconciled() {
        let snapshot = vec![entry("", LeadStatus::Completed)];

        let result = reconcile(vec![lead("")], Some(&snapshot));

        assert_eq!(result[0].status, LeadStatus::Todo);
    }

    #[test]
    fn test_first_snapshot_entry_wins() {
        let snapshot = vec![
            entry("jo@x.com", LeadStatus::InProgress),
            entry("jo@x.com", LeadStatus::Completed),
        ];

        let result = reconcile(vec![lead("jo@x.com")], Some(&snapshot));

        assert_eq!(result[0].status, LeadStatus::InProgress);
        assert_eq!(result[0].completed_at, None);
    }
}

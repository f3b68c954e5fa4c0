//! Lead record and its tri-state progress
//!
//! Field names on the wire match the stored corpus format
//! (`{id, name, email, company, status, dateCompleted, fileName}`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lead progress status
///
/// Ordered cycle: `Todo → InProgress → Completed → Todo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl LeadStatus {
    /// Next status in the cycle
    pub fn next(self) -> Self {
        match self {
            LeadStatus::Todo => LeadStatus::InProgress,
            LeadStatus::InProgress => LeadStatus::Completed,
            LeadStatus::Completed => LeadStatus::Todo,
        }
    }

    /// Human-readable label used in exports and messages
    pub fn label(self) -> &'static str {
        match self {
            LeadStatus::Todo => "To Do",
            LeadStatus::InProgress => "In Progress",
            LeadStatus::Completed => "Completed",
        }
    }

    /// Inverse of [`LeadStatus::label`], case-insensitive
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "to do" | "todo" => Some(LeadStatus::Todo),
            "in progress" | "in-progress" => Some(LeadStatus::InProgress),
            "completed" => Some(LeadStatus::Completed),
            _ => None,
        }
    }
}

/// A single contact record tracked through the to-do workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Sequence id, stable for the lifetime of the lead
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub company: String,

    #[serde(default)]
    pub status: LeadStatus,

    /// Set iff `status == Completed`
    #[serde(rename = "dateCompleted", default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Display name of the file this lead was imported from
    #[serde(rename = "fileName", default)]
    pub source_file: String,
}

impl Lead {
    /// Fresh lead with no progress and no sequence id yet
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company: impl Into<String>,
        source_file: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            company: company.into(),
            status: LeadStatus::Todo,
            completed_at: None,
            source_file: source_file.into(),
        }
    }

    /// Case-insensitive identity key; `None` for leads without an email
    pub fn identity_key(&self) -> Option<String> {
        identity_key(&self.email)
    }

    /// True when name, email and company are all empty
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.company.is_empty()
    }

    /// Advance to the next status, maintaining the completion timestamp
    pub fn advance_status(&mut self, now: DateTime<Utc>) {
        self.set_status(self.status.next(), now);
    }

    /// Move to `status`; entering `Completed` stamps `now`, any other status clears it
    pub fn set_status(&mut self, status: LeadStatus, now: DateTime<Utc>) {
        self.status = status;
        self.completed_at = match status {
            LeadStatus::Completed => Some(now),
            _ => None,
        };
    }
}

/// Identity key for an email value: trimmed and lower-cased, `None` when empty
pub fn identity_key(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_cycle() {
        assert_eq!(LeadStatus::Todo.next(), LeadStatus::InProgress);
        assert_eq!(LeadStatus::InProgress.next(), LeadStatus::Completed);
        assert_eq!(LeadStatus::Completed.next(), LeadStatus::Todo);
    }

    #[test]
    fn test_advance_status_three_times_returns_to_todo() {
        let now = Utc::now();
        let mut lead = Lead::new("Jo Lee", "jo@x.com", "", "a.csv");

        lead.advance_status(now);
        assert_eq!(lead.status, LeadStatus::InProgress);
        assert_eq!(lead.completed_at, None);

        lead.advance_status(now);
        assert_eq!(lead.status, LeadStatus::Completed);
        assert_eq!(lead.completed_at, Some(now));

        lead.advance_status(now);
        assert_eq!(lead.status, LeadStatus::Todo);
        assert_eq!(lead.completed_at, None);
    }

    #[test]
    fn test_identity_key_is_case_insensitive() {
        let lead = Lead::new("", "  Jo@X.com ", "", "a.csv");
        assert_eq!(lead.identity_key().as_deref(), Some("jo@x.com"));
        assert_eq!(Lead::new("Jo", "", "", "a.csv").identity_key(), None);
    }

    #[test]
    fn test_status_labels_roundtrip() {
        for status in [LeadStatus::Todo, LeadStatus::InProgress, LeadStatus::Completed] {
            assert_eq!(LeadStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(LeadStatus::from_label("done-ish"), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let lead = Lead::new("Jo Lee", "jo@x.com", "Acme", "a.csv");
        let json = serde_json::to_value(&lead).unwrap();

        assert_eq!(json["status"], "todo");
        assert_eq!(json["fileName"], "a.csv");
        assert!(json["dateCompleted"].is_null());

        let parsed: Lead = serde_json::from_str(
            r#"{"id":3,"name":"A","email":"a@b.c","company":"","status":"in-progress",
                "dateCompleted":null,"fileName":"f.csv"}"#,
        )
        .unwrap();
        assert_eq!(parsed.id, 3);
        assert_eq!(parsed.status, LeadStatus::InProgress);
    }
}

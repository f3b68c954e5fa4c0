//! Filtered lead listings and progress statistics

use serde::{Deserialize, Serialize};

use crate::models::{Lead, LeadStatus};

/// Status filter for lead listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadFilter {
    #[default]
    All,
    Todo,
    Progress,
    Done,
}

impl LeadFilter {
    pub fn matches(self, status: LeadStatus) -> bool {
        match self {
            LeadFilter::All => true,
            LeadFilter::Todo => status == LeadStatus::Todo,
            LeadFilter::Progress => status == LeadStatus::InProgress,
            LeadFilter::Done => status == LeadStatus::Completed,
        }
    }
}

/// Leads passing `filter` whose name, email or company contains `search`
/// (case-insensitive). An empty search matches everything.
pub fn filter_leads<'a>(leads: &'a [Lead], filter: LeadFilter, search: &str) -> Vec<&'a Lead> {
    let needle = search.trim().to_lowercase();
    leads
        .iter()
        .filter(|lead| filter.matches(lead.status))
        .filter(|lead| {
            needle.is_empty()
                || lead.name.to_lowercase().contains(&needle)
                || lead.email.to_lowercase().contains(&needle)
                || lead.company.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Counters shown alongside the lead list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeadStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub to_go: usize,
    pub progress_percent: u32,
}

impl LeadStats {
    pub fn from_leads(leads: &[Lead]) -> Self {
        let total = leads.len();
        let in_progress = leads
            .iter()
            .filter(|l| l.status == LeadStatus::InProgress)
            .count();
        let completed = leads
            .iter()
            .filter(|l| l.status == LeadStatus::Completed)
            .count();

        let progress_percent = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };

        Self {
            total,
            in_progress,
            completed,
            to_go: total - in_progress - completed,
            progress_percent,
        }
    }
}

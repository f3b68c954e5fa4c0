//! CSV export of the working lead set

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Lead, LeadStatus};

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No leads to export")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown status label: {0}")]
    UnknownStatus(String),

    #[error("Export buffer error: {0}")]
    Buffer(String),
}

/// One exported row; column names are the file's header line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Date Completed")]
    pub date_completed: String,
    #[serde(rename = "Source File")]
    pub source_file: String,
}

impl From<&Lead> for ExportRow {
    fn from(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            email: lead.email.clone(),
            company: lead.company.clone(),
            status: lead.status.label().to_string(),
            date_completed: lead
                .completed_at
                .map(|at| at.with_timezone(&Local).format("%-m/%-d/%Y").to_string())
                .unwrap_or_default(),
            source_file: lead.source_file.clone(),
        }
    }
}

impl ExportRow {
    pub fn lead_status(&self) -> Result<LeadStatus, ExportError> {
        LeadStatus::from_label(&self.status)
            .ok_or_else(|| ExportError::UnknownStatus(self.status.clone()))
    }
}

/// Finished export: suggested download name plus CSV text
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content: String,
}

/// Download name stamped with `today`
pub fn export_file_name(today: NaiveDate) -> String {
    format!("leads_export_{}.csv", today.format("%Y-%m-%d"))
}

/// Render leads as CSV
pub fn export_leads(leads: &[Lead], today: NaiveDate) -> Result<ExportFile, ExportError> {
    if leads.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for lead in leads {
        writer.serialize(ExportRow::from(lead))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    let content = String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))?;

    tracing::info!(leads = leads.len(), "Exported leads");

    Ok(ExportFile {
        file_name: export_file_name(today),
        content,
    })
}

/// Parse a previously exported file back into rows
pub fn read_export(text: &str) -> Result<Vec<ExportRow>, ExportError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: ExportRow = row?;
        row.lead_status()?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_empty_corpus_rejected() {
        assert!(matches!(export_leads(&[], today()), Err(ExportError::Empty)));
    }

    #[test]
    fn test_file_name_and_header() {
        let leads = [Lead::new("Jo Lee", "jo@x.com", "", "a.csv")];
        let export = export_leads(&leads, today()).unwrap();

        assert_eq!(export.file_name, "leads_export_2024-03-09.csv");
        let mut lines = export.content.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Email,Company,Status,Date Completed,Source File")
        );
        assert_eq!(lines.next(), Some("Jo Lee,jo@x.com,,To Do,,a.csv"));
    }

    #[test]
    fn test_status_labels_and_completion_date() {
        // Midday UTC lands on the same calendar date in every timezone within ±11h
        let completed_at = Utc.with_ymd_and_hms(2024, 2, 5, 12, 0, 0).unwrap();
        let mut done = Lead::new("Ann", "ann@y.com", "Acme", "b.csv");
        done.status = LeadStatus::Completed;
        done.completed_at = Some(completed_at);
        let mut busy = Lead::new("Bo", "bo@z.com", "", "b.csv");
        busy.status = LeadStatus::InProgress;

        let rows: Vec<ExportRow> = [&done, &busy].into_iter().map(ExportRow::from).collect();

        assert_eq!(rows[0].status, "Completed");
        assert!(rows[0].date_completed.starts_with("2/"));
        assert!(rows[0].date_completed.ends_with("/2024"));
        assert_eq!(rows[1].status, "In Progress");
        assert_eq!(rows[1].date_completed, "");
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let mut leads = vec![
            Lead::new("Jo Lee", "jo@x.com", "Lee, Lee & Co", "a.csv"),
            Lead::new("", "", "Quoted \"Inc\"", "a.csv"),
        ];
        leads[0].set_status(LeadStatus::Completed, Utc::now());

        let export = export_leads(&leads, today()).unwrap();
        let rows = read_export(&export.content).unwrap();

        assert_eq!(rows.len(), 2);
        for (row, lead) in rows.iter().zip(&leads) {
            assert_eq!(row.name, lead.name);
            assert_eq!(row.email, lead.email);
            assert_eq!(row.company, lead.company);
            assert_eq!(row.lead_status().unwrap(), lead.status);
        }
    }

    #[test]
    fn test_read_export_rejects_unknown_status() {
        let text = "Name,Email,Company,Status,Date Completed,Source File\nJo,,,Maybe,,a.csv\n";
        assert!(matches!(read_export(text), Err(ExportError::UnknownStatus(_))));
    }
}

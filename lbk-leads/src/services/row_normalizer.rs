//! Row normalization
//!
//! Spreadsheets arrive hand-edited with inconsistent headers. Each logical
//! field is looked up through an ordered list of accepted header spellings;
//! the first non-empty value wins. Normalization never fails: a sparse row
//! yields a sparse lead, and callers drop leads that come out blank.

use super::row_reader::Row;
use crate::models::Lead;

const FIRST_NAME_KEYS: &[&str] = &["First Name", "first name", "FIRST NAME", "firstName"];
const LAST_NAME_KEYS: &[&str] = &["Last Name", "last name", "LAST NAME", "lastName"];
const FULL_NAME_KEYS: &[&str] = &["Name", "name", "NAME"];
const EMAIL_KEYS: &[&str] = &["Email", "email", "EMAIL"];
const COMPANY_KEYS: &[&str] = &[
    "Company Name",
    "Company name",
    "company name",
    "COMPANY NAME",
    "Company",
    "company",
    "COMPANY",
];

/// First non-empty (trimmed) value among `keys`, in priority order
pub fn resolve<'a>(row: &'a Row, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Map an arbitrary row to a fresh lead from `source_file`
///
/// **Name resolution:**
/// 1. "first last" from the first/last name columns, if either is present
/// 2. otherwise the full-name column
/// 3. otherwise empty
pub fn normalize(row: &Row, source_file: &str) -> Lead {
    let first = resolve(row, FIRST_NAME_KEYS).unwrap_or_default();
    let last = resolve(row, LAST_NAME_KEYS).unwrap_or_default();
    let combined = format!("{} {}", first, last).trim().to_string();

    let name = if combined.is_empty() {
        resolve(row, FULL_NAME_KEYS).unwrap_or_default().to_string()
    } else {
        combined
    };

    let email = resolve(row, EMAIL_KEYS).unwrap_or_default();
    let company = resolve(row, COMPANY_KEYS).unwrap_or_default();

    Lead::new(name, email, company, source_file)
}

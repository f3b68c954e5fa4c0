//! Local account record
//!
//! Accounts only scope storage keys. The password is compared as plain text;
//! this is not a security boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            name,
            email,
            password,
            created_at: Utc::now(),
        }
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Account as shown to clients (no password)
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
        }
    }
}

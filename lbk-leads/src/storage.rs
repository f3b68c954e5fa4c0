//! Corpus store
//!
//! Key scheme over a [`KeyValueStore`]:
//! - `user-{email}`: account record
//! - `current-user`: email of the signed-in account
//! - `leads-{email}`: all leads of the account
//! - `files-{email}`: imported file registry of the account
//!
//! Every value is a JSON document, read and written wholesale.

use std::sync::Arc;

use lbk_common::{KeyValueStore, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Account, Corpus, ImportedFile, Lead};

pub const CURRENT_USER_KEY: &str = "current-user";

pub fn account_key(email: &str) -> String {
    format!("user-{}", email)
}

pub fn leads_key(email: &str) -> String {
    format!("leads-{}", email)
}

pub fn files_key(email: &str) -> String {
    format!("files-{}", email)
}

/// Typed access to account-scoped documents
#[derive(Clone)]
pub struct CorpusStore {
    store: Arc<dyn KeyValueStore>,
}

impl CorpusStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn load_account(&self, email: &str) -> Result<Option<Account>> {
        self.get_json(&account_key(email)).await
    }

    pub async fn save_account(&self, account: &Account) -> Result<()> {
        self.set_json(&account_key(&account.email), account).await
    }

    /// Email of the signed-in account, if any
    pub async fn current_user(&self) -> Result<Option<String>> {
        self.get_json(CURRENT_USER_KEY).await
    }

    pub async fn set_current_user(&self, email: &str) -> Result<()> {
        self.set_json(CURRENT_USER_KEY, &email).await
    }

    pub async fn clear_current_user(&self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY).await
    }

    /// Load leads and file registry; missing documents load as empty
    pub async fn load_corpus(&self, email: &str) -> Result<Corpus> {
        let leads: Vec<Lead> = self.get_json(&leads_key(email)).await?.unwrap_or_default();
        let files: Vec<ImportedFile> = self.get_json(&files_key(email)).await?.unwrap_or_default();

        tracing::debug!(email, leads = leads.len(), files = files.len(), "Loaded corpus");

        Ok(Corpus::from_parts(leads, files))
    }

    /// Write leads and file registry back wholesale
    pub async fn save_corpus(&self, email: &str, corpus: &Corpus) -> Result<()> {
        self.set_json(&leads_key(email), &corpus.leads).await?;
        self.set_json(&files_key(email), &corpus.files).await?;

        tracing::debug!(
            email,
            leads = corpus.leads.len(),
            files = corpus.files.len(),
            "Saved corpus"
        );

        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.store.set(key, &text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use crate::services::Fingerprint;
    use chrono::Utc;
    use lbk_common::MemoryStore;

    fn store() -> (Arc<MemoryStore>, CorpusStore) {
        let memory = Arc::new(MemoryStore::new());
        let corpus_store = CorpusStore::new(memory.clone());
        (memory, corpus_store)
    }

    #[tokio::test]
    async fn test_missing_corpus_loads_empty() {
        let (_, store) = store();
        let corpus = store.load_corpus("jo@x.com").await.unwrap();
        assert!(corpus.leads.is_empty());
        assert!(corpus.files.is_empty());
    }

    #[tokio::test]
    async fn test_corpus_saved_under_account_keys() {
        let (memory, store) = store();
        let mut corpus = Corpus::new();
        corpus.append_leads(vec![Lead::new("Jo", "jo@x.com", "", "a.csv")]);
        corpus.files.push(ImportedFile::new(
            "a.csv".to_string(),
            Fingerprint::from("42"),
            Utc::now(),
            1,
        ));
        corpus.toggle_lead(0, Utc::now()).unwrap();

        store.save_corpus("me@home.com", &corpus).await.unwrap();

        let raw = memory.get("leads-me@home.com").await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["status"], "in-progress");
        assert_eq!(json[0]["fileName"], "a.csv");

        let raw = memory.get("files-me@home.com").await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["hash"], "42");
        assert_eq!(json[0]["leadsProgress"][0]["email"], "jo@x.com");

        let loaded = store.load_corpus("me@home.com").await.unwrap();
        assert_eq!(loaded.leads[0].status, LeadStatus::InProgress);
        assert_eq!(loaded.next_sequence_id(), 1);
        assert!(store.load_corpus("other@home.com").await.unwrap().leads.is_empty());
    }

    #[tokio::test]
    async fn test_current_user_pointer() {
        let (_, store) = store();
        assert_eq!(store.current_user().await.unwrap(), None);

        store.set_current_user("jo@x.com").await.unwrap();
        assert_eq!(store.current_user().await.unwrap().as_deref(), Some("jo@x.com"));

        store.clear_current_user().await.unwrap();
        assert_eq!(store.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let (memory, store) = store();
        memory.set("leads-jo@x.com", "not json").await.unwrap();
        assert!(store.load_corpus("jo@x.com").await.is_err());
    }
}

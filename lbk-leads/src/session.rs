//! Session context
//!
//! Holds the signed-in account and its in-memory corpus. Every mutating
//! operation changes the corpus in memory first and then writes it back
//! wholesale. A failed write does not undo the change: the in-memory corpus
//! stays valid for the rest of the session and the caller gets a warning.

use chrono::{Local, Utc};

use crate::error::{LeadsError, LeadsResult};
use crate::models::{Account, AccountSummary, Corpus, ImportResult, Lead, RemovedFile};
use crate::services::{export_leads, ExportFile, ImportOrchestrator, RawFile};
use crate::storage::CorpusStore;

/// Result of a mutating operation plus a persistence warning, if the write failed
#[derive(Debug, Clone)]
pub struct Persisted<T> {
    pub value: T,
    pub warning: Option<String>,
}

struct ActiveSession {
    account: Account,
    corpus: Corpus,
}

/// Owns the current account's corpus and mediates all access to it
pub struct SessionManager {
    store: CorpusStore,
    orchestrator: ImportOrchestrator,
    active: Option<ActiveSession>,
}

impl SessionManager {
    pub fn new(store: CorpusStore, orchestrator: ImportOrchestrator) -> Self {
        Self {
            store,
            orchestrator,
            active: None,
        }
    }

    /// Reopen the session recorded in the store, if its account still exists
    pub async fn restore(&mut self) -> LeadsResult<Option<AccountSummary>> {
        let Some(email) = self.store.current_user().await? else {
            return Ok(None);
        };

        let Some(account) = self.store.load_account(&email).await? else {
            tracing::warn!(email = %email, "Session pointer refers to a missing account, ignoring");
            return Ok(None);
        };

        self.open(account).await.map(Some)
    }

    pub async fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> LeadsResult<AccountSummary> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(LeadsError::InvalidInput(
                "name, email and password are required".to_string(),
            ));
        }

        if self.store.load_account(email).await?.is_some() {
            return Err(LeadsError::AccountExists);
        }

        let account = Account::new(name.to_string(), email.to_string(), password.to_string());
        self.store.save_account(&account).await?;

        tracing::info!(email = %account.email, "Account created");

        self.open(account).await
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> LeadsResult<AccountSummary> {
        let email = email.trim();
        let account = self
            .store
            .load_account(email)
            .await?
            .ok_or(LeadsError::AccountNotFound)?;

        if !account.password_matches(password) {
            return Err(LeadsError::IncorrectPassword);
        }

        self.open(account).await
    }

    /// Forget the session; stored data is untouched
    pub async fn sign_out(&mut self) -> LeadsResult<()> {
        let Some(session) = self.active.take() else {
            return Err(LeadsError::NotSignedIn);
        };

        self.store.clear_current_user().await?;

        tracing::info!(email = %session.account.email, "Signed out");
        Ok(())
    }

    pub fn account(&self) -> Option<AccountSummary> {
        self.active.as_ref().map(|s| AccountSummary::from(&s.account))
    }

    pub fn corpus(&self) -> LeadsResult<&Corpus> {
        self.active
            .as_ref()
            .map(|s| &s.corpus)
            .ok_or(LeadsError::NotSignedIn)
    }

    /// Import uploaded files; `force` reprocesses already registered content
    pub async fn import_files(
        &mut self,
        files: Vec<RawFile>,
        force: bool,
    ) -> LeadsResult<Persisted<ImportResult>> {
        let policy = self.orchestrator.policy_for(force);
        let session = self.active.as_mut().ok_or(LeadsError::NotSignedIn)?;

        let result = self
            .orchestrator
            .import_files(files, &mut session.corpus, policy)
            .await;

        Ok(self.persist(result).await)
    }

    /// Advance a lead's status and snapshot it on its source file
    pub async fn toggle_lead(&mut self, id: u64) -> LeadsResult<Persisted<Lead>> {
        let session = self.active.as_mut().ok_or(LeadsError::NotSignedIn)?;
        let lead = session
            .corpus
            .toggle_lead(id, Utc::now())
            .ok_or(LeadsError::LeadNotFound(id))?;

        tracing::info!(lead_id = id, status = lead.status.label(), "Lead status changed");

        Ok(self.persist(lead).await)
    }

    /// Remove a registry entry and the leads imported from it
    pub async fn remove_file(&mut self, index: usize) -> LeadsResult<Persisted<RemovedFile>> {
        let session = self.active.as_mut().ok_or(LeadsError::NotSignedIn)?;
        let removed = session
            .corpus
            .remove_file(index)
            .ok_or(LeadsError::FileNotFound(index))?;

        tracing::info!(
            file = %removed.file.name,
            leads_removed = removed.leads_removed,
            "File removed"
        );

        Ok(self.persist(removed).await)
    }

    /// CSV export of all leads, stamped with today's local date
    pub fn export(&self) -> LeadsResult<ExportFile> {
        let corpus = self.corpus()?;
        Ok(export_leads(&corpus.leads, Local::now().date_naive())?)
    }

    async fn open(&mut self, account: Account) -> LeadsResult<AccountSummary> {
        let corpus = self.store.load_corpus(&account.email).await?;
        self.store.set_current_user(&account.email).await?;

        tracing::info!(
            email = %account.email,
            leads = corpus.leads.len(),
            files = corpus.files.len(),
            "Session opened"
        );

        let summary = AccountSummary::from(&account);
        self.active = Some(ActiveSession { account, corpus });
        Ok(summary)
    }

    async fn persist<T>(&self, value: T) -> Persisted<T> {
        let Some(session) = self.active.as_ref() else {
            return Persisted { value, warning: None };
        };

        let warning = match self
            .store
            .save_corpus(&session.account.email, &session.corpus)
            .await
        {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(
                    email = %session.account.email,
                    error = %e,
                    "Failed to save corpus, keeping in-memory state"
                );
                Some(format!("Changes could not be saved: {}", e))
            }
        };

        Persisted { value, warning }
    }
}

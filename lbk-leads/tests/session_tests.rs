//! Session context integration tests
//!
//! Accounts, session pointer, wholesale persistence and persistence failures.

mod helpers;

use std::sync::Arc;

use helpers::{create_test_store, csv_file, memory_session, session_over, FailingStore};
use lbk_common::KeyValueStore;
use lbk_leads::models::LeadStatus;
use lbk_leads::services::{DuplicatePolicy, ExportError};
use lbk_leads::LeadsError;

#[tokio::test]
async fn test_operations_require_session() {
    let (_, mut session) = memory_session(DuplicatePolicy::Skip);

    assert!(matches!(session.corpus(), Err(LeadsError::NotSignedIn)));
    assert!(matches!(session.toggle_lead(0).await, Err(LeadsError::NotSignedIn)));
    assert!(matches!(session.remove_file(0).await, Err(LeadsError::NotSignedIn)));
    assert!(matches!(session.export(), Err(LeadsError::NotSignedIn)));
    assert!(matches!(
        session.import_files(vec![csv_file("a.csv", &["Email", "jo@x.com"])], false).await,
        Err(LeadsError::NotSignedIn)
    ));
    assert!(matches!(session.sign_out().await, Err(LeadsError::NotSignedIn)));
}

#[tokio::test]
async fn test_sign_up_then_duplicate_sign_up() {
    let (store, mut session) = memory_session(DuplicatePolicy::Skip);

    let account = session.sign_up("Jo", "jo@x.com", "secret").await.unwrap();
    assert_eq!(account.name, "Jo");
    assert_eq!(session.account().unwrap().email, "jo@x.com");

    // Account record and session pointer are stored
    assert!(store.get("user-jo@x.com").await.unwrap().is_some());
    assert_eq!(
        store.get("current-user").await.unwrap().as_deref(),
        Some("\"jo@x.com\"")
    );

    assert!(matches!(
        session.sign_up("Other", "jo@x.com", "x").await,
        Err(LeadsError::AccountExists)
    ));
}

#[tokio::test]
async fn test_sign_up_requires_fields() {
    let (_, mut session) = memory_session(DuplicatePolicy::Skip);
    assert!(matches!(
        session.sign_up("Jo", "   ", "secret").await,
        Err(LeadsError::InvalidInput(_))
    ));
    assert!(session.account().is_none());
}

#[tokio::test]
async fn test_sign_in_errors() {
    let (_, mut session) = memory_session(DuplicatePolicy::Skip);
    session.sign_up("Jo", "jo@x.com", "secret").await.unwrap();
    session.sign_out().await.unwrap();

    assert!(matches!(
        session.sign_in("nobody@x.com", "secret").await,
        Err(LeadsError::AccountNotFound)
    ));
    assert!(matches!(
        session.sign_in("jo@x.com", "wrong").await,
        Err(LeadsError::IncorrectPassword)
    ));
    assert!(session.account().is_none());

    session.sign_in("jo@x.com", "secret").await.unwrap();
    assert_eq!(session.account().unwrap().email, "jo@x.com");
}

#[tokio::test]
async fn test_corpus_survives_sign_out_and_sign_in() {
    let (store, mut session) = memory_session(DuplicatePolicy::Skip);
    session.sign_up("Jo", "jo@x.com", "secret").await.unwrap();
    session
        .import_files(vec![csv_file("a.csv", &["Email,Name", "a@x.com,A", "b@x.com,B"])], false)
        .await
        .unwrap();
    session.toggle_lead(1).await.unwrap();

    session.sign_out().await.unwrap();
    assert!(session.account().is_none());
    assert_eq!(store.get("current-user").await.unwrap(), None);
    // Storage untouched by sign-out
    assert!(store.get("leads-jo@x.com").await.unwrap().is_some());

    session.sign_in("jo@x.com", "secret").await.unwrap();
    let corpus = session.corpus().unwrap();
    assert_eq!(corpus.leads.len(), 2);
    assert_eq!(corpus.leads[1].status, LeadStatus::InProgress);
    assert_eq!(corpus.files[0].progress.len(), 1);
}

#[tokio::test]
async fn test_accounts_are_isolated() {
    let (_, mut session) = memory_session(DuplicatePolicy::Skip);
    session.sign_up("Jo", "jo@x.com", "pw").await.unwrap();
    session
        .import_files(vec![csv_file("a.csv", &["Email", "a@x.com"])], false)
        .await
        .unwrap();
    session.sign_out().await.unwrap();

    session.sign_up("Am", "am@y.com", "pw").await.unwrap();
    assert!(session.corpus().unwrap().leads.is_empty());

    // Same content is new for this account
    let result = session
        .import_files(vec![csv_file("a.csv", &["Email", "a@x.com"])], false)
        .await
        .unwrap()
        .value;
    assert_eq!(result.leads_added(), 1);
}

#[tokio::test]
async fn test_restore_reopens_last_session() {
    let (_temp_dir, sqlite) = create_test_store().await.unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(sqlite);

    let mut first = session_over(store.clone(), DuplicatePolicy::Skip);
    first.sign_up("Jo", "jo@x.com", "pw").await.unwrap();
    first
        .import_files(vec![csv_file("a.csv", &["Email", "a@x.com"])], false)
        .await
        .unwrap();
    drop(first);

    // Process restart against the same database
    let mut second = session_over(store.clone(), DuplicatePolicy::Skip);
    let restored = second.restore().await.unwrap();

    assert_eq!(restored.unwrap().email, "jo@x.com");
    assert_eq!(second.corpus().unwrap().leads.len(), 1);
}

#[tokio::test]
async fn test_restore_without_pointer_or_account() {
    let (store, mut session) = memory_session(DuplicatePolicy::Skip);
    assert!(session.restore().await.unwrap().is_none());

    store.set("current-user", "\"ghost@x.com\"").await.unwrap();
    assert!(session.restore().await.unwrap().is_none());
    assert!(session.account().is_none());
}

#[tokio::test]
async fn test_remove_file_persists_and_reports() {
    let (store, mut session) = memory_session(DuplicatePolicy::Skip);
    session.sign_up("Jo", "jo@x.com", "pw").await.unwrap();
    session
        .import_files(
            vec![
                csv_file("a.csv", &["Email", "a@x.com", "b@x.com"]),
                csv_file("b.csv", &["Email", "c@x.com"]),
            ],
            false,
        )
        .await
        .unwrap();

    let removed = session.remove_file(0).await.unwrap();
    assert!(removed.warning.is_none());
    assert_eq!(removed.value.file.name, "a.csv");
    assert_eq!(removed.value.leads_removed, 2);

    let stored: serde_json::Value =
        serde_json::from_str(&store.get("files-jo@x.com").await.unwrap().unwrap()).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["name"], "b.csv");

    assert!(matches!(session.remove_file(5).await, Err(LeadsError::FileNotFound(5))));
    assert!(matches!(session.toggle_lead(0).await, Err(LeadsError::LeadNotFound(0))));
}

#[tokio::test]
async fn test_export_empty_corpus() {
    let (_, mut session) = memory_session(DuplicatePolicy::Skip);
    session.sign_up("Jo", "jo@x.com", "pw").await.unwrap();

    assert!(matches!(
        session.export(),
        Err(LeadsError::Export(ExportError::Empty))
    ));
}

#[tokio::test]
async fn test_persistence_failure_keeps_in_memory_state() {
    // Given: a signed-in session whose store starts rejecting writes
    let store = Arc::new(FailingStore::new());
    let mut session = session_over(store.clone(), DuplicatePolicy::Skip);
    session.sign_up("Jo", "jo@x.com", "pw").await.unwrap();
    store.set_fail_writes(true);

    // When: leads are imported and toggled
    let imported = session
        .import_files(vec![csv_file("a.csv", &["Email", "a@x.com"])], false)
        .await
        .unwrap();
    let toggled = session.toggle_lead(0).await.unwrap();

    // Then: each operation succeeds in memory and carries a warning
    assert_eq!(imported.value.leads_added(), 1);
    assert!(imported.warning.unwrap().contains("could not be saved"));
    assert_eq!(toggled.value.status, LeadStatus::InProgress);
    assert!(toggled.warning.is_some());
    assert_eq!(session.corpus().unwrap().leads.len(), 1);

    // And: nothing reached the store
    assert_eq!(store.get("leads-jo@x.com").await.unwrap(), None);

    // Once the store recovers, the next mutation writes everything
    store.set_fail_writes(false);
    let toggled = session.toggle_lead(0).await.unwrap();
    assert!(toggled.warning.is_none());
    assert!(store.get("leads-jo@x.com").await.unwrap().is_some());
}

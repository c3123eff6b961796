//! Submission and results handling on top of the document store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{info, warn};

use crate::auth::CredentialVerifier;
use crate::core::{
    Distribution, Result, Submission, SurveyError, SurveyStore, validate_submission,
};
use crate::storage::JsonDocumentStore;

/// Aggregate view handed to the initiator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub distribution: Distribution,
    pub results: Vec<Submission>,
}

impl From<SurveyStore> for ResultsView {
    fn from(store: SurveyStore) -> Self {
        Self {
            distribution: store.distribution,
            results: store.results,
        }
    }
}

struct Inner {
    store: JsonDocumentStore,
    // Held across load..save so concurrent submissions cannot lose updates.
    writer: Mutex<()>,
    verifier: Arc<dyn CredentialVerifier>,
}

#[derive(Clone)]
pub struct SurveyService {
    inner: Arc<Inner>,
}

impl SurveyService {
    pub fn new(store: JsonDocumentStore, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                writer: Mutex::new(()),
                verifier,
            }),
        }
    }

    pub fn data_path(&self) -> &Path {
        self.inner.store.path()
    }

    /// Creates the document if missing and reports a counter/result mismatch
    /// on an existing one. The cached counters are left as they are.
    pub async fn initialize(&self) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || -> Result<()> {
            let _guard = inner.writer.lock()?;
            if inner.store.initialize()? {
                info!(path = %inner.store.path().display(), "created survey store");
                return Ok(());
            }
            let existing = inner.store.load()?;
            if !existing.is_consistent() {
                let tally = Distribution::tally(&existing.results);
                warn!(
                    path = %inner.store.path().display(),
                    stored_excellent = existing.distribution.excellent,
                    stored_good_or_below = existing.distribution.good_or_below,
                    tallied_excellent = tally.excellent,
                    tallied_good_or_below = tally.good_or_below,
                    "distribution does not match recorded results"
                );
            }
            info!(
                path = %inner.store.path().display(),
                submissions = existing.results.len(),
                "opened existing survey store"
            );
            Ok(())
        })
        .await?
    }

    /// Validates and records one respondent's scores.
    pub async fn submit(&self, responder_id: Option<String>, scores: Vec<i64>) -> Result<Submission> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.submit_blocking(responder_id, scores)).await?
    }

    /// Returns the tally to the initiator. The store is not read unless the
    /// credential checks out.
    pub async fn results(&self, credential: Option<&str>) -> Result<ResultsView> {
        if !self.inner.verifier.verify(credential) {
            warn!(presented = credential.is_some(), "rejected results request");
            return Err(SurveyError::Unauthorized);
        }
        let inner = Arc::clone(&self.inner);
        let store = tokio::task::spawn_blocking(move || inner.store.load()).await??;
        Ok(ResultsView::from(store))
    }
}

impl Inner {
    fn submit_blocking(&self, responder_id: Option<String>, scores: Vec<i64>) -> Result<Submission> {
        let _guard = self.writer.lock()?;
        let mut store = self.store.load()?;

        if let Err(reason) = validate_submission(responder_id.as_deref(), &scores, &store.settings) {
            info!(responder_id = ?responder_id, %reason, "rejected submission");
            return Err(reason.into());
        }

        let submission = Submission::new(responder_id.unwrap_or_default(), scores);
        store.accept(submission.clone());
        self.store.save(&store)?;

        info!(
            responder_id = %submission.responder_id,
            submissions = store.results.len(),
            "accepted submission"
        );
        Ok(submission)
    }
}

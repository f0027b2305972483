use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Document not found")]
    NotFound,
    #[error("Document version conflict")]
    VersionConflict,
    #[error("Document already exists")]
    AlreadyExists,
}

/// Envelope around a stored entity. `version` increments on every update and
/// backs the compare-and-swap contract of [`Collection::update`].
#[derive(Debug, Clone)]
pub struct Document<T> {
    pub id: Uuid,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub data: T,
}

/// One entity type's storage. The store offers no transaction spanning two
/// documents; callers that need a cross-document fact to stay consistent must
/// sequence their own writes and reconcile on interruption.
#[derive(Clone)]
pub struct Collection<T> {
    docs: Arc<RwLock<HashMap<Uuid, Document<T>>>>,
}

impl<T: Clone + Send + Sync> Collection<T> {
    pub fn new() -> Self {
        Self { docs: Arc::new(RwLock::new(HashMap::new())) }
    }

    pub async fn insert(&self, data: T) -> Document<T> {
        let doc =
            Document { id: Uuid::now_v7(), version: 1, created_at: Utc::now(), data };
        self.docs.write().await.insert(doc.id, doc.clone());
        doc
    }

    /// Insert guarded by an exclusion predicate, checked and applied under a
    /// single lock acquisition: fails with `AlreadyExists` if any document
    /// matches. A check-then-insert done as two separate calls would leave a
    /// window for a racing writer; this closes it.
    pub async fn insert_if_absent<P>(&self, pred: P, data: T) -> Result<Document<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let mut docs = self.docs.write().await;
        if docs.values().any(|d| pred(&d.data)) {
            return Err(StoreError::AlreadyExists);
        }
        let doc =
            Document { id: Uuid::now_v7(), version: 1, created_at: Utc::now(), data };
        docs.insert(doc.id, doc.clone());
        Ok(doc)
    }

    #[allow(dead_code)]
    pub async fn get(&self, id: &Uuid) -> Option<Document<T>> {
        self.docs.read().await.get(id).cloned()
    }

    pub async fn find_one<P>(&self, pred: P) -> Option<Document<T>>
    where
        P: Fn(&T) -> bool,
    {
        self.docs.read().await.values().find(|d| pred(&d.data)).cloned()
    }

    /// All matches, oldest first. v7 ids are time-ordered, so the id is the
    /// tie-breaker within one timestamp.
    pub async fn find_many<P>(&self, pred: P) -> Vec<Document<T>>
    where
        P: Fn(&T) -> bool,
    {
        let mut matches: Vec<Document<T>> =
            self.docs.read().await.values().filter(|d| pred(&d.data)).cloned().collect();
        matches.sort_by_key(|d| (d.created_at, d.id));
        matches
    }

    /// Compare-and-swap update: succeeds only if the caller read the latest
    /// version. A concurrent writer that got in first surfaces as
    /// `VersionConflict`, so racing mutations of one document resolve to a
    /// single winner.
    pub async fn update(
        &self,
        id: &Uuid,
        expected_version: u64,
        data: T,
    ) -> Result<Document<T>, StoreError> {
        let mut docs = self.docs.write().await;
        let doc = docs.get_mut(id).ok_or(StoreError::NotFound)?;
        if doc.version != expected_version {
            return Err(StoreError::VersionConflict);
        }
        doc.version += 1;
        doc.data = data;
        Ok(doc.clone())
    }

    /// Atomic find-and-delete. Of two racing callers, exactly one receives
    /// the document; the other gets `None`.
    pub async fn take_one<P>(&self, pred: P) -> Option<Document<T>>
    where
        P: Fn(&T) -> bool,
    {
        let mut docs = self.docs.write().await;
        let id = docs.values().find(|d| pred(&d.data)).map(|d| d.id)?;
        docs.remove(&id)
    }

}

impl<T: Clone + Send + Sync> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

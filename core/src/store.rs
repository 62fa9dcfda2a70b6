//! # DID Store
//!
//! In-memory registry of created DIDs, keyed by DID string.
//!
//! Creation itself never touches the store: [`crate::wallet::create_local_did`]
//! is pure, and callers that want duplicate detection insert the resulting
//! record here. `DashMap`'s entry API makes [`DidStore::insert_if_absent`]
//! atomic, so concurrent creators racing on the same seed see exactly one
//! winner.
//!
//! Nothing is persisted. Dropping the store drops every secret in it.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;
use tracing::debug;

use crate::wallet::DidInfo;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this DID already exists.
    #[error("DID already exists: {0}")]
    DuplicateDid(String),
}

/// A stored record together with its insertion time.
#[derive(Debug, Clone)]
pub struct StoredDid {
    pub info: DidInfo,
    pub created_at: DateTime<Utc>,
}

/// Thread-safe map of DID → record.
#[derive(Debug, Default)]
pub struct DidStore {
    records: DashMap<String, StoredDid>,
}

impl DidStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `info` unless its DID is already present.
    ///
    /// An existing record is never replaced, even if it carries the same key.
    pub fn insert_if_absent(&self, info: DidInfo) -> Result<(), StoreError> {
        match self.records.entry(info.did().to_string()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateDid(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(did = %entry.key(), method = %info.method(), "stored DID");
                entry.insert(StoredDid {
                    info,
                    created_at: Utc::now(),
                });
                Ok(())
            }
        }
    }

    pub fn get(&self, did: &str) -> Option<StoredDid> {
        self.records.get(did).map(|r| r.value().clone())
    }

    pub fn contains(&self, did: &str) -> bool {
        self.records.contains_key(did)
    }

    pub fn remove(&self, did: &str) -> Option<StoredDid> {
        self.records.remove(did).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All stored DIDs, sorted.
    pub fn dids(&self) -> Vec<String> {
        let mut dids: Vec<String> = self.records.iter().map(|r| r.key().clone()).collect();
        dids.sort();
        dids
    }
}

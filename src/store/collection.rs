//! In-memory view over a record store.
//!
//! A [`Collection`] only changes its records after the store has confirmed a
//! write, and refetches the whole list after every mutation.

use super::{PatchableStore, RecordStore};
use crate::{
    errors::{Error, Result},
    models::{Identified, Validate},
};
use tracing::{debug, instrument, warn};

pub struct Collection<S: RecordStore> {
    store: S,
    records: Vec<S::Record>,
}

impl<S: RecordStore> Collection<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[S::Record] {
        &self.records
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&self, id: i64) -> Option<&S::Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Replaces the records with a fresh list from the store.
    ///
    /// On failure the previous records are kept.
    #[instrument(skip_all, fields(kind = S::PLURAL))]
    pub async fn refresh(&mut self) -> Result<()> {
        match self.store.list().await {
            Ok(records) => {
                debug!("Loaded {} {}", records.len(), S::PLURAL);
                self.records = records;
                Ok(())
            }
            Err(e) => Err(Error::store(format!("load {}", S::PLURAL), e)),
        }
    }

    /// Validates and stores a draft, then refetches.
    ///
    /// Validation errors are returned as-is; store errors name the action.
    #[instrument(skip_all, fields(kind = S::KIND))]
    pub async fn add(&mut self, draft: S::Draft) -> Result<S::Record> {
        draft.validate()?;
        let record = self
            .store
            .create(draft)
            .await
            .map_err(|e| Error::store(format!("add {}", S::KIND), e))?;
        self.sync_after_write(&record).await;
        Ok(record)
    }

    /// Deletes a record, then refetches.
    #[instrument(skip(self), fields(kind = S::KIND))]
    pub async fn remove(&mut self, id: i64) -> Result<()> {
        self.store
            .delete(id)
            .await
            .map_err(|e| Error::store(format!("delete {}", S::KIND), e))?;
        self.records.retain(|r| r.id() != id);
        if let Err(e) = self.refresh().await {
            warn!("Refetch after delete failed: {e}");
        }
        Ok(())
    }

    /// Refetches after a confirmed write. If the refetch fails the confirmed
    /// record is merged into the current list instead.
    async fn sync_after_write(&mut self, record: &S::Record) {
        if let Err(e) = self.refresh().await {
            warn!("Refetch after write failed: {e}");
            match self.records.iter_mut().find(|r| r.id() == record.id()) {
                Some(existing) => *existing = record.clone(),
                None => self.records.push(record.clone()),
            }
        }
    }
}

impl<S: PatchableStore> Collection<S> {
    /// Validates and applies a partial update, then refetches.
    #[instrument(skip(self, patch), fields(kind = S::KIND))]
    pub async fn patch(&mut self, id: i64, patch: S::Patch) -> Result<S::Record> {
        patch.validate()?;
        let record = self
            .store
            .update(id, patch)
            .await
            .map_err(|e| Error::store(format!("update {}", S::KIND), e))?;
        self.sync_after_write(&record).await;
        Ok(record)
    }
}

//! The catalog: a store plus the operations that keep it consistent.
//!
//! Every sanctioned operation runs inside [`Catalog::atomic`], which opens a
//! savepoint, releases it on success and rolls back on any error. Validation
//! happens before the first write, so the rollback only matters for errors
//! raised by the store itself (a uniqueness violation the pre-check missed)
//! or by a cascade.

use lida_foundation::{AttrChange, EntityRef, Error, ErrorContext, Result};
use lida_storage::{
    IsotopologueRecord, MemoryStore, MoleculeRecord, StateRecord, Store, TransitionRecord,
};

use crate::config::EngineConfig;
use crate::derivation::{Derived, SyncContext};
use crate::sync::{Selection, sync};

/// A catalog of molecules, isotopologues, states and transitions.
///
/// Generic over the storage collaborator; defaults to [`MemoryStore`].
#[derive(Clone, Debug)]
pub struct Catalog<S = MemoryStore> {
    store: S,
    config: EngineConfig,
}

impl Catalog {
    /// Creates an empty in-memory catalog with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an empty in-memory catalog.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_store(MemoryStore::new(), config)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Store> Catalog<S> {
    /// Creates a catalog over an existing store.
    ///
    /// The store is trusted to be consistent; run [`resync_all`](Self::resync_all)
    /// if it was written by anything other than a catalog.
    #[must_use]
    pub fn with_store(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store, writable.
    ///
    /// Writes made through it bypass every cascade.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the catalog, returning its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a read-only derivation context over the current store.
    #[must_use]
    pub fn context(&self) -> SyncContext<'_> {
        SyncContext::new(&self.store, &self.config)
    }

    // =========================================================================
    // Generic access
    // =========================================================================

    /// Loads any record by id.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn load<R: Derived>(&self, id: R::Id) -> Result<R> {
        R::relation(&self.store)
            .get(id)
            .ok_or_else(|| Error::not_found(id))
    }

    /// Dry sync: recomputes the selected attributes of `record` in memory
    /// without writing anything.
    ///
    /// # Errors
    ///
    /// See [`sync`](crate::sync::sync).
    pub fn sync<R: Derived>(
        &self,
        record: &mut R,
        selection: &Selection,
    ) -> Result<Vec<AttrChange>> {
        sync(record, selection, &self.context())
    }

    /// Recomputes the selected attributes of a stored record and commits the
    /// result. Fires no cascades.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound`, `UnknownAttribute`, or any derivation error;
    /// nothing is written on error.
    pub fn sync_and_commit<R: Derived>(
        &mut self,
        id: R::Id,
        selection: &Selection,
    ) -> Result<Vec<AttrChange>> {
        let context = ErrorContext::new()
            .with_operation("sync_and_commit")
            .with_entity(id);
        self.atomic(context, |catalog| catalog.resync::<R>(id, selection))
    }

    /// Re-runs a full sync of every record (molecules, then isotopologues,
    /// states and transitions) and commits each one that changed.
    ///
    /// Repairs caches left stale by writes that bypassed the catalog. Fires no
    /// cascades. Returns the change list of every record that changed.
    ///
    /// # Errors
    ///
    /// Propagates the first derivation error; nothing is written on error.
    pub fn resync_all(&mut self) -> Result<Vec<(EntityRef, Vec<AttrChange>)>> {
        let context = ErrorContext::new().with_operation("resync_all");
        self.atomic(context, |catalog| {
            let mut report = Vec::new();
            catalog.resync_kind::<MoleculeRecord>(&mut report)?;
            catalog.resync_kind::<IsotopologueRecord>(&mut report)?;
            catalog.resync_kind::<StateRecord>(&mut report)?;
            catalog.resync_kind::<TransitionRecord>(&mut report)?;
            let changes: usize = report.iter().map(|(_, c)| c.len()).sum();
            log::info!(
                "resync: {} attributes updated on {} entities",
                changes,
                report.len()
            );
            Ok(report)
        })
    }

    fn resync_kind<R: Derived>(
        &mut self,
        report: &mut Vec<(EntityRef, Vec<AttrChange>)>,
    ) -> Result<()> {
        for id in R::relation(&self.store).ids() {
            let changes = self.resync::<R>(id, &Selection::All)?;
            if !changes.is_empty() {
                report.push((id.into(), changes));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Internal plumbing
    // =========================================================================

    /// Runs `f` inside a savepoint. On error the store is rolled back and the
    /// error gets `context` unless it already carries one.
    pub(crate) fn atomic<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let savepoint = self.store.savepoint();
        match f(self) {
            Ok(value) => {
                self.store.release(savepoint);
                Ok(value)
            }
            Err(err) => {
                self.store.rollback(savepoint)?;
                if err.context.is_some() {
                    Err(err)
                } else {
                    Err(err.with_context(context))
                }
            }
        }
    }

    /// Inserts a fully synced record.
    pub(crate) fn insert<R: Derived>(&mut self, record: R) -> Result<R::Id> {
        let id = R::relation_mut(&mut self.store).insert(record)?;
        self.verify::<R>(id)?;
        Ok(id)
    }

    /// Writes a whole record.
    pub(crate) fn commit<R: Derived>(&mut self, record: R) -> Result<()> {
        let id = record.id();
        R::relation_mut(&mut self.store).update(record)?;
        self.verify::<R>(id)
    }

    /// Writes one field of a stored record, bypassing its save path.
    pub(crate) fn patch<R: Derived>(
        &mut self,
        id: R::Id,
        apply: &mut dyn FnMut(&mut R),
    ) -> Result<()> {
        R::relation_mut(&mut self.store).patch(id, apply)?;
        self.verify::<R>(id)
    }

    /// Loads, syncs and commits a stored record if anything changed.
    pub(crate) fn resync<R: Derived>(
        &mut self,
        id: R::Id,
        selection: &Selection,
    ) -> Result<Vec<AttrChange>> {
        let mut record = self.load::<R>(id)?;
        let changes = self.sync(&mut record, selection)?;
        if !changes.is_empty() {
            self.commit(record)?;
        }
        Ok(changes)
    }

    /// With `verify_after_commit` on, checks that a full sync of the stored
    /// record would change nothing.
    fn verify<R: Derived>(&self, id: R::Id) -> Result<()> {
        if !self.config.verify_after_commit {
            return Ok(());
        }
        let mut record = self.load::<R>(id)?;
        let changes = self.sync(&mut record, &Selection::All)?;
        if let Some(change) = changes.first() {
            return Err(Error::internal(format!(
                "{}({id}) is stale after commit: {change}",
                R::KIND
            )));
        }
        Ok(())
    }
}

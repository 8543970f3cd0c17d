//! The storage collaborator: four relations plus savepoints.

use lida_foundation::Result;

use crate::record::{IsotopologueRecord, MoleculeRecord, StateRecord, TransitionRecord};
use crate::relation::{Record, Relation};

/// Opaque handle returned by [`Store::savepoint`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Savepoint(pub(crate) u64);

/// Storage for the whole catalog.
///
/// The engine opens a savepoint before each sanctioned operation, releases it
/// on success and rolls back to it on any error, so that a failed operation
/// leaves nothing behind.
pub trait Store {
    /// The molecule relation.
    fn molecules(&self) -> &dyn Relation<MoleculeRecord>;
    /// The molecule relation, writable.
    fn molecules_mut(&mut self) -> &mut dyn Relation<MoleculeRecord>;
    /// The isotopologue relation.
    fn isotopologues(&self) -> &dyn Relation<IsotopologueRecord>;
    /// The isotopologue relation, writable.
    fn isotopologues_mut(&mut self) -> &mut dyn Relation<IsotopologueRecord>;
    /// The state relation.
    fn states(&self) -> &dyn Relation<StateRecord>;
    /// The state relation, writable.
    fn states_mut(&mut self) -> &mut dyn Relation<StateRecord>;
    /// The transition relation.
    fn transitions(&self) -> &dyn Relation<TransitionRecord>;
    /// The transition relation, writable.
    fn transitions_mut(&mut self) -> &mut dyn Relation<TransitionRecord>;

    /// Marks the current state so it can be restored.
    fn savepoint(&mut self) -> Savepoint;

    /// Restores the state marked by `savepoint`, discarding it and any
    /// savepoints taken after it.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the savepoint is unknown.
    fn rollback(&mut self, savepoint: Savepoint) -> Result<()>;

    /// Discards `savepoint` (and any taken after it), keeping all writes.
    fn release(&mut self, savepoint: Savepoint);
}

/// Record types that know which relation of a [`Store`] holds them.
pub trait Stored: Record {
    /// Returns the relation holding this record type.
    fn relation(store: &dyn Store) -> &dyn Relation<Self>;
    /// Returns the relation holding this record type, writable.
    fn relation_mut(store: &mut dyn Store) -> &mut dyn Relation<Self>;
}

impl Stored for MoleculeRecord {
    fn relation(store: &dyn Store) -> &dyn Relation<Self> {
        store.molecules()
    }

    fn relation_mut(store: &mut dyn Store) -> &mut dyn Relation<Self> {
        store.molecules_mut()
    }
}

impl Stored for IsotopologueRecord {
    fn relation(store: &dyn Store) -> &dyn Relation<Self> {
        store.isotopologues()
    }

    fn relation_mut(store: &mut dyn Store) -> &mut dyn Relation<Self> {
        store.isotopologues_mut()
    }
}

impl Stored for StateRecord {
    fn relation(store: &dyn Store) -> &dyn Relation<Self> {
        store.states()
    }

    fn relation_mut(store: &mut dyn Store) -> &mut dyn Relation<Self> {
        store.states_mut()
    }
}

impl Stored for TransitionRecord {
    fn relation(store: &dyn Store) -> &dyn Relation<Self> {
        store.transitions()
    }

    fn relation_mut(store: &mut dyn Store) -> &mut dyn Relation<Self> {
        store.transitions_mut()
    }
}

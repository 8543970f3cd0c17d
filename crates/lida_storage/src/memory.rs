//! In-memory store on persistent maps.
//!
//! Rows live in `im::OrdMap`s and natural-key indices in `im::HashMap`s, so
//! cloning a relation is O(1) and a savepoint is just a clone of the four
//! relations.

use im::{HashMap, OrdMap};
use lida_foundation::{Error, Result};

use crate::record::{IsotopologueRecord, MoleculeRecord, StateRecord, TransitionRecord};
use crate::relation::{Record, Relation};
use crate::store::{Savepoint, Store};

// =============================================================================
// MemoryRelation
// =============================================================================

/// One relation held in memory.
#[derive(Clone, Debug)]
pub struct MemoryRelation<R: Record> {
    rows: OrdMap<R::Id, R>,
    index: HashMap<R::Key, R::Id>,
    /// Last assigned row number. Ids are never reused.
    last_id: u64,
}

impl<R: Record> Default for MemoryRelation<R> {
    fn default() -> Self {
        Self {
            rows: OrdMap::new(),
            index: HashMap::new(),
            last_id: 0,
        }
    }
}

impl<R: Record> MemoryRelation<R> {
    /// Creates an empty relation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that none of `record`'s keys belongs to a row other than `own`.
    fn check_keys(&self, record: &R, own: Option<R::Id>) -> Result<()> {
        for key in record.keys() {
            if let Some(&holder) = self.index.get(&key) {
                if Some(holder) != own {
                    return Err(Error::duplicate(R::KIND, key.to_string()));
                }
            }
        }
        Ok(())
    }

    fn write(&mut self, record: R) -> Result<()> {
        let id = record.id();
        let Some(old) = self.rows.get(&id) else {
            return Err(Error::not_found(id));
        };
        self.check_keys(&record, Some(id))?;
        for key in old.keys() {
            self.index.remove(&key);
        }
        for key in record.keys() {
            self.index.insert(key, id);
        }
        self.rows.insert(id, record);
        Ok(())
    }
}

impl<R: Record> Relation<R> for MemoryRelation<R> {
    fn insert(&mut self, mut record: R) -> Result<R::Id> {
        self.check_keys(&record, None)?;
        self.last_id += 1;
        record.set_id(self.last_id);
        let id = record.id();
        for key in record.keys() {
            self.index.insert(key, id);
        }
        self.rows.insert(id, record);
        Ok(id)
    }

    fn get(&self, id: R::Id) -> Option<R> {
        self.rows.get(&id).cloned()
    }

    fn find(&self, key: &R::Key) -> Option<R> {
        self.index.get(key).and_then(|id| self.rows.get(id)).cloned()
    }

    fn update(&mut self, record: R) -> Result<()> {
        self.write(record)
    }

    fn patch(&mut self, id: R::Id, apply: &mut dyn FnMut(&mut R)) -> Result<()> {
        let mut record = self.get(id).ok_or_else(|| Error::not_found(id))?;
        apply(&mut record);
        if record.id() != id {
            return Err(Error::internal(format!("patch changed the id of {id:?}")));
        }
        self.write(record)
    }

    fn delete(&mut self, id: R::Id) -> Result<R> {
        let record = self.rows.remove(&id).ok_or_else(|| Error::not_found(id))?;
        for key in record.keys() {
            self.index.remove(&key);
        }
        Ok(record)
    }

    fn count(&self, predicate: &dyn Fn(&R) -> bool) -> usize {
        self.rows.values().filter(|r| predicate(r)).count()
    }

    fn filter(&self, predicate: &dyn Fn(&R) -> bool) -> Vec<R> {
        self.rows.values().filter(|r| predicate(r)).cloned().collect()
    }

    fn ids(&self) -> Vec<R::Id> {
        self.rows.keys().copied().collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

#[derive(Clone, Debug, Default)]
struct Tables {
    molecules: MemoryRelation<MoleculeRecord>,
    isotopologues: MemoryRelation<IsotopologueRecord>,
    states: MemoryRelation<StateRecord>,
    transitions: MemoryRelation<TransitionRecord>,
}

/// The reference [`Store`]: everything in memory, savepoints by structural
/// sharing.
///
/// Clone is O(1).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Tables,
    savepoints: Vec<(Savepoint, Tables)>,
    next_savepoint: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open savepoints.
    #[must_use]
    pub fn open_savepoints(&self) -> usize {
        self.savepoints.len()
    }
}

impl Store for MemoryStore {
    fn molecules(&self) -> &dyn Relation<MoleculeRecord> {
        &self.tables.molecules
    }

    fn molecules_mut(&mut self) -> &mut dyn Relation<MoleculeRecord> {
        &mut self.tables.molecules
    }

    fn isotopologues(&self) -> &dyn Relation<IsotopologueRecord> {
        &self.tables.isotopologues
    }

    fn isotopologues_mut(&mut self) -> &mut dyn Relation<IsotopologueRecord> {
        &mut self.tables.isotopologues
    }

    fn states(&self) -> &dyn Relation<StateRecord> {
        &self.tables.states
    }

    fn states_mut(&mut self) -> &mut dyn Relation<StateRecord> {
        &mut self.tables.states
    }

    fn transitions(&self) -> &dyn Relation<TransitionRecord> {
        &self.tables.transitions
    }

    fn transitions_mut(&mut self) -> &mut dyn Relation<TransitionRecord> {
        &mut self.tables.transitions
    }

    fn savepoint(&mut self) -> Savepoint {
        self.next_savepoint += 1;
        let savepoint = Savepoint(self.next_savepoint);
        self.savepoints.push((savepoint, self.tables.clone()));
        savepoint
    }

    fn rollback(&mut self, savepoint: Savepoint) -> Result<()> {
        let Some(position) = self.savepoints.iter().position(|(s, _)| *s == savepoint) else {
            return Err(Error::internal(format!("unknown savepoint {savepoint:?}")));
        };
        if let Some((_, tables)) = self.savepoints.split_off(position).into_iter().next() {
            self.tables = tables;
        }
        Ok(())
    }

    fn release(&mut self, savepoint: Savepoint) {
        if let Some(position) = self.savepoints.iter().position(|(s, _)| *s == savepoint) {
            self.savepoints.truncate(position);
        }
    }
}

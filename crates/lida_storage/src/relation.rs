//! The relation interface the engine persists through.

use std::fmt;
use std::hash::Hash;

use lida_foundation::{EntityKind, EntityRef, Result};

/// A row type stored in a [`Relation`].
pub trait Record: Clone + fmt::Debug {
    /// Typed row identifier.
    type Id: Copy + Ord + Hash + fmt::Debug + fmt::Display + Into<EntityRef>;
    /// Natural key type. A record may have several keys, each unique.
    type Key: Clone + Eq + Hash + fmt::Debug + fmt::Display;
    /// Entity kind of this row type.
    const KIND: EntityKind;

    /// Returns the row identifier.
    fn id(&self) -> Self::Id;

    /// Assigns the row identifier (called by [`Relation::insert`]).
    fn set_id(&mut self, raw: u64);

    /// Returns every natural key of this row.
    fn keys(&self) -> Vec<Self::Key>;
}

/// Synchronous storage for one record kind.
///
/// Implementations must enforce natural-key uniqueness themselves and report
/// a violation as a `DuplicateEntity` error. The engine checks first, but the
/// relation is the authority.
pub trait Relation<R: Record> {
    /// Inserts a new row, assigning its identifier.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntity` if any of the row's keys is taken.
    fn insert(&mut self, record: R) -> Result<R::Id>;

    /// Point lookup by identifier.
    fn get(&self, id: R::Id) -> Option<R>;

    /// Point lookup by natural key.
    fn find(&self, key: &R::Key) -> Option<R>;

    /// Writes a whole row.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` for an unknown id and `DuplicateEntity` if
    /// the row's keys now collide with another row.
    fn update(&mut self, record: R) -> Result<()>;

    /// Applies a targeted field write to one row.
    ///
    /// # Errors
    ///
    /// As for [`update`](Self::update).
    fn patch(&mut self, id: R::Id, apply: &mut dyn FnMut(&mut R)) -> Result<()>;

    /// Removes a row, returning it.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` for an unknown id.
    fn delete(&mut self, id: R::Id) -> Result<R>;

    /// Counts rows matching `predicate`.
    fn count(&self, predicate: &dyn Fn(&R) -> bool) -> usize;

    /// Returns rows matching `predicate`, in id order.
    fn filter(&self, predicate: &dyn Fn(&R) -> bool) -> Vec<R>;

    /// Returns every row id, in id order.
    fn ids(&self) -> Vec<R::Id>;

    /// Returns the number of rows.
    fn len(&self) -> usize;

    /// Returns true if there are no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

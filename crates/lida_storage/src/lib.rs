//! Row storage for the Lida catalog.
//!
//! This crate provides:
//! - [`MoleculeRecord`], [`IsotopologueRecord`], [`StateRecord`], [`TransitionRecord`] - Rows with cached fields
//! - [`Relation`] - Insert, lookup, update, patch, delete, count and filter for one row type
//! - [`Store`] - The four relations plus savepoints
//! - [`MemoryStore`] - Persistent-map implementation with O(1) savepoints

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod memory;
pub mod record;
pub mod relation;
pub mod store;

pub use memory::{MemoryRelation, MemoryStore};
pub use record::{
    IsotopologueKey, IsotopologueRecord, Lifetime, MoleculeKey, MoleculeRecord, StateKey,
    StateRecord, TransitionKey, TransitionRecord,
};
pub use relation::{Record, Relation};
pub use store::{Savepoint, Store, Stored};

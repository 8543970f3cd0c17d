//! Derivation registry, sync engine, entity lifecycle and cascades for Lida.
//!
//! This crate provides:
//! - [`Catalog`] - The sanctioned create, update and delete operations over a [`lida_storage::Store`]
//! - [`Derived`] and [`Derivation`] - Per-kind registries of cached attributes
//! - [`sync`] and [`Selection`] - Recomputing cached attributes and diffing them
//! - [`Mutation`] - The events the cascade propagator reacts to
//! - [`EngineConfig`] - Sort-key width, degrees-of-freedom rule and self-checks
//!
//! # Architecture
//!
//! ```text
//! create_state ──► validate ──► sync (all) ──► insert ──► propagate
//!                                                           │
//!             ┌──────────────────────────┬──────────────────┘
//!             ▼                          ▼
//!   isotopologue.number_states   transitions.delta_energy (on energy change)
//!             │
//!             ▼
//!        commit, or roll back the whole operation on error
//! ```
//!
//! Every sanctioned operation runs inside a storage savepoint. A failure at
//! any step, cascades included, leaves the store exactly as it was.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cascade;
pub mod catalog;
pub mod config;
pub mod derivation;
pub mod entity;
pub mod sync;

pub use cascade::Mutation;
pub use catalog::Catalog;
pub use config::{EngineConfig, VibrationalModes};
pub use derivation::{Derivation, Derived, FieldMut, SyncContext};
pub use entity::{
    IsotopologueView, NewIsotopologue, NewState, NewTransition, StateUpdate, TransitionUpdate,
    infer_ground_el_state,
};
pub use sync::{Selection, sync};

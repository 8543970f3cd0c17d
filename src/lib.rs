//! Lida - Consistency engine for a catalog of molecular states and transitions
//!
//! This crate re-exports all layers of the Lida system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: lida_engine     - Derivation registry, sync, entity operations, cascades
//! Layer 2: lida_storage    - Relations, savepoints, in-memory store
//! Layer 1: lida_notation   - Formula, electronic and vibrational grammars
//! Layer 0: lida_foundation - Core types (ids, attribute values, Error)
//! ```

pub use lida_engine as engine;
pub use lida_foundation as foundation;
pub use lida_notation as notation;
pub use lida_storage as storage;

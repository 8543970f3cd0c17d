//! Core identifiers, attribute values, and error types for Lida.
//!
//! This crate provides:
//! - [`MoleculeId`], [`IsotopologueId`], [`StateId`], [`TransitionId`] - Typed row identifiers
//! - [`EntityKind`] and [`EntityRef`] - Kind tags and kind-erased references
//! - [`AttrValue`] and [`AttrChange`] - Cached attribute values and sync diffs
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::{EntityKind, EntityRef, IsotopologueId, MoleculeId, StateId, TransitionId};
pub use value::{AttrChange, AttrValue};

//! The derivation registry.
//!
//! Each entity kind declares a fixed, ordered list of [`Derivation`]s: an
//! attribute name, a pure function computing that attribute from the record
//! and the rest of the graph, and an accessor for the field that caches it.
//! Order matters: a derivation sees the values written by every derivation
//! before it in the same sync.
//!
//! The registry holds no state and performs no writes.

use lida_foundation::{AttrValue, Error, IsotopologueId, MoleculeId, Result, StateId};
use lida_storage::{IsotopologueRecord, MoleculeRecord, StateRecord, Store, Stored};

use crate::config::EngineConfig;

// =============================================================================
// Sync Context
// =============================================================================

/// Read-only view of the graph handed to derivations.
#[derive(Clone, Copy)]
pub struct SyncContext<'a> {
    store: &'a dyn Store,
    config: &'a EngineConfig,
}

impl<'a> SyncContext<'a> {
    /// Creates a context over `store`.
    #[must_use]
    pub fn new(store: &'a dyn Store, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Returns the store.
    #[must_use]
    pub fn store(&self) -> &'a dyn Store {
        self.store
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Loads a molecule.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn molecule(&self, id: MoleculeId) -> Result<MoleculeRecord> {
        self.store.molecules().get(id).ok_or_else(|| Error::not_found(id))
    }

    /// Loads an isotopologue.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn isotopologue(&self, id: IsotopologueId) -> Result<IsotopologueRecord> {
        self.store
            .isotopologues()
            .get(id)
            .ok_or_else(|| Error::not_found(id))
    }

    /// Loads a state.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn state(&self, id: StateId) -> Result<StateRecord> {
        self.store.states().get(id).ok_or_else(|| Error::not_found(id))
    }
}

// =============================================================================
// Field Access
// =============================================================================

/// Mutable access to one cached field of a record.
#[derive(Debug)]
pub enum FieldMut<'a> {
    /// A text field.
    Text(&'a mut String),
    /// A signed integer field.
    Int(&'a mut i64),
    /// A count field.
    Count(&'a mut u64),
    /// A float field.
    Float(&'a mut f64),
}

impl FieldMut<'_> {
    /// Returns the current value.
    #[must_use]
    pub fn get(&self) -> AttrValue {
        match self {
            Self::Text(s) => AttrValue::Text((**s).clone()),
            Self::Int(n) => AttrValue::Int(**n),
            Self::Count(n) => AttrValue::Count(**n),
            Self::Float(x) => AttrValue::Float(**x),
        }
    }

    /// Overwrites the field.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if `value` has the wrong type for the field.
    pub fn set(self, value: AttrValue) -> Result<()> {
        match (self, value) {
            (Self::Text(slot), AttrValue::Text(s)) => *slot = s,
            (Self::Int(slot), AttrValue::Int(n)) => *slot = n,
            (Self::Count(slot), AttrValue::Count(n)) => *slot = n,
            (Self::Float(slot), AttrValue::Float(x)) => *slot = x,
            (field, value) => {
                return Err(Error::internal(format!(
                    "cannot store {} value in {} field",
                    value.type_name(),
                    field.get().type_name()
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Derivation
// =============================================================================

/// Computes an attribute from a record and its context.
pub type DeriveFn<R> = fn(&R, &SyncContext<'_>) -> Result<AttrValue>;

/// Borrows the field caching an attribute.
pub type FieldFn<R> = fn(&mut R) -> FieldMut<'_>;

/// One named derivation rule.
pub struct Derivation<R> {
    /// Registered attribute name.
    pub attribute: &'static str,
    pub(crate) derive: DeriveFn<R>,
    pub(crate) field: FieldFn<R>,
}

impl<R> Derivation<R> {
    /// Computes the attribute's value from `record`.
    ///
    /// # Errors
    ///
    /// Propagates whatever the rule returns (grammar errors for stored labels
    /// that no longer parse, missing related rows).
    pub fn derive(&self, record: &R, ctx: &SyncContext<'_>) -> Result<AttrValue> {
        (self.derive)(record, ctx)
    }

    /// Returns the value currently cached on `record`.
    #[must_use]
    pub fn stored(&self, record: &mut R) -> AttrValue {
        (self.field)(record).get()
    }

    /// Writes `value` into the cached field of `record`.
    ///
    /// # Errors
    ///
    /// Returns `Internal` on a type mismatch.
    pub fn store(&self, record: &mut R, value: AttrValue) -> Result<()> {
        (self.field)(record).set(value)
    }
}

impl<R> std::fmt::Debug for Derivation<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Derivation")
            .field("attribute", &self.attribute)
            .finish_non_exhaustive()
    }
}

/// Builds a [`Derivation`] caching its value in the record field of the same
/// name.
macro_rules! derivation {
    ($attribute:ident: $slot:ident = $derive:expr) => {
        $crate::derivation::Derivation {
            attribute: stringify!($attribute),
            derive: $derive,
            field: |record| $crate::derivation::FieldMut::$slot(&mut record.$attribute),
        }
    };
}

pub(crate) use derivation;

/// Record types with a derivation registry.
pub trait Derived: Stored + 'static {
    /// The registry, in evaluation order.
    const DERIVATIONS: &'static [Derivation<Self>];

    /// Looks up a registered derivation by attribute name.
    #[must_use]
    fn derivation(attribute: &str) -> Option<&'static Derivation<Self>> {
        Self::DERIVATIONS.iter().find(|d| d.attribute == attribute)
    }

    /// Returns the registered attribute names, in evaluation order.
    #[must_use]
    fn attributes() -> Vec<&'static str> {
        Self::DERIVATIONS.iter().map(|d| d.attribute).collect()
    }

    /// Human-readable description of the record, used in logs and errors.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if a related row needed for the description
    /// is missing.
    fn describe(&self, store: &dyn Store) -> Result<String>;
}

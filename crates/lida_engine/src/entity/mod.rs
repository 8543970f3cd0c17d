//! The four entity kinds: their derivation registries and the sanctioned
//! operations that create, mutate and delete them.
//!
//! Ownership runs molecule → isotopologue → state; transitions reference
//! (but do not own) their two states. Deleting an owner deletes its
//! dependents through the same operations a caller would use, so every
//! cascade still fires.

mod isotopologue;
pub(crate) mod molecule;
mod state;
mod transition;

use lida_foundation::{EntityRef, Result};
use lida_storage::{IsotopologueRecord, MoleculeRecord, StateRecord, Store, TransitionRecord};

use crate::catalog::Catalog;
use crate::derivation::Derived;

pub use isotopologue::{IsotopologueView, NewIsotopologue, infer_ground_el_state};
pub use state::{NewState, StateUpdate};
pub use transition::{NewTransition, TransitionUpdate};

impl<S: Store> Catalog<S> {
    /// Human-readable form of any entity: a molecule's formula, an
    /// isotopologue's molecule, `"CO2+ a(2Π);v=(0,0,0)"` for a state and
    /// `"<initial> → <final>"` for a transition.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity (or a row it renders) is
    /// missing.
    pub fn display(&self, entity: EntityRef) -> Result<String> {
        let store = self.store();
        match entity {
            EntityRef::Molecule(id) => self.load::<MoleculeRecord>(id)?.describe(store),
            EntityRef::Isotopologue(id) => self.load::<IsotopologueRecord>(id)?.describe(store),
            EntityRef::State(id) => self.load::<StateRecord>(id)?.describe(store),
            EntityRef::Transition(id) => self.load::<TransitionRecord>(id)?.describe(store),
        }
    }

    /// Debug form of any entity: `"<id>:<Kind>(<display>)"`.
    ///
    /// # Errors
    ///
    /// As for [`display`](Self::display).
    pub fn repr(&self, entity: EntityRef) -> Result<String> {
        Ok(format!(
            "{}:{}({})",
            entity.raw(),
            entity.kind(),
            self.display(entity)?
        ))
    }
}

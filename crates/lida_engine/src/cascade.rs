//! The cascade propagator.
//!
//! Sanctioned operations report what they changed as a [`Mutation`]; the
//! propagator re-syncs exactly the dependent caches that mutation can affect:
//!
//! ```text
//! StateSaved / StateDeleted            -> isotopologue.number_states
//! TransitionSaved / TransitionDeleted  -> initial.number_transitions_from
//!                                         final.number_transitions_to
//!                                         isotopologue.number_transitions
//! EnergyChanged                        -> delta_energy of every incident
//!                                         transition (single-field patch)
//! ```
//!
//! Count re-syncs commit through the normal path, which never fires another
//! mutation. The energy cascade writes `delta_energy` with a patch rather than
//! a transition save, so it cannot loop back into the transition cascade.
//!
//! Writes that bypass the catalog's operations fire nothing; use
//! [`Catalog::resync_all`] to repair caches after them.

use lida_foundation::{IsotopologueId, Result, StateId};
use lida_storage::{IsotopologueRecord, StateRecord, Store, TransitionRecord};

use crate::catalog::Catalog;
use crate::derivation::Derived;
use crate::sync::Selection;

/// A mutation made by a sanctioned operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// A state was created or updated.
    StateSaved {
        /// Its isotopologue.
        isotopologue: IsotopologueId,
    },
    /// A state was deleted.
    StateDeleted {
        /// Its former isotopologue.
        isotopologue: IsotopologueId,
    },
    /// A transition was created or updated.
    TransitionSaved {
        /// Upper state.
        initial: StateId,
        /// Lower state.
        final_state: StateId,
        /// Shared isotopologue.
        isotopologue: IsotopologueId,
    },
    /// A transition was deleted.
    TransitionDeleted {
        /// Former upper state.
        initial: StateId,
        /// Former lower state.
        final_state: StateId,
        /// Shared isotopologue.
        isotopologue: IsotopologueId,
    },
    /// A state's energy changed.
    EnergyChanged {
        /// The state.
        state: StateId,
    },
}

impl<S: Store> Catalog<S> {
    /// Re-syncs every cache `mutation` can affect, in a fixed order.
    ///
    /// # Errors
    ///
    /// Propagates derivation and storage errors. Callers run this inside
    /// [`atomic`](Catalog::atomic), so a failed cascade undoes the mutation.
    pub(crate) fn propagate(&mut self, mutation: Mutation) -> Result<()> {
        log::trace!("cascade: {mutation:?}");
        match mutation {
            Mutation::StateSaved { isotopologue } | Mutation::StateDeleted { isotopologue } => {
                self.cascade_step::<IsotopologueRecord>(isotopologue, "number_states")
            }
            Mutation::TransitionSaved {
                initial,
                final_state,
                isotopologue,
            }
            | Mutation::TransitionDeleted {
                initial,
                final_state,
                isotopologue,
            } => {
                self.cascade_step::<StateRecord>(initial, "number_transitions_from")?;
                self.cascade_step::<StateRecord>(final_state, "number_transitions_to")?;
                self.cascade_step::<IsotopologueRecord>(isotopologue, "number_transitions")
            }
            Mutation::EnergyChanged { state } => self.propagate_energy(state),
        }
    }

    fn cascade_step<R: Derived>(
        &mut self,
        id: R::Id,
        attribute: &'static str,
    ) -> Result<()> {
        let changes = self.resync::<R>(id, &Selection::only([attribute]))?;
        for change in &changes {
            log::trace!("cascade: {}({id}) {change}", R::KIND);
        }
        Ok(())
    }

    /// Recomputes `delta_energy` of every transition touching `state` and
    /// patches that one field.
    fn propagate_energy(&mut self, state: StateId) -> Result<()> {
        let incident = self
            .store()
            .transitions()
            .filter(&|t| t.initial_state == state || t.final_state == state);
        let only_delta = Selection::only(["delta_energy"]);
        for mut transition in incident {
            let changes = self.sync(&mut transition, &only_delta)?;
            if changes.is_empty() {
                continue;
            }
            let delta_energy = transition.delta_energy;
            self.patch::<TransitionRecord>(transition.id, &mut |t| {
                t.delta_energy = delta_energy;
            })?;
            log::trace!(
                "cascade: Transition({}) delta_energy -> {delta_energy}",
                transition.id
            );
        }
        Ok(())
    }
}

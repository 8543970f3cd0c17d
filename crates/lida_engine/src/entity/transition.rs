//! Transitions: decay channels between two states of one isotopologue.

use lida_foundation::{
    AttrValue, EntityKind, Error, ErrorContext, Result, StateId, TransitionId,
};
use lida_storage::{StateRecord, Store, TransitionKey, TransitionRecord};

use crate::cascade::Mutation;
use crate::catalog::Catalog;
use crate::derivation::{Derivation, Derived, SyncContext, derivation};
use crate::sync::Selection;

fn delta_energy(t: &TransitionRecord, ctx: &SyncContext<'_>) -> Result<AttrValue> {
    let initial = ctx.state(t.initial_state)?;
    let final_state = ctx.state(t.final_state)?;
    Ok((final_state.energy - initial.energy).into())
}

/// `"<molecule html> <state html>"` of one endpoint.
fn endpoint_html(state: &StateRecord, ctx: &SyncContext<'_>) -> Result<String> {
    let iso = ctx.isotopologue(state.isotopologue)?;
    let molecule = ctx.molecule(iso.molecule)?;
    Ok(format!("{} {}", molecule.html, state.state_html))
}

fn html(t: &TransitionRecord, ctx: &SyncContext<'_>) -> Result<AttrValue> {
    let initial = endpoint_html(&ctx.state(t.initial_state)?, ctx)?;
    let final_state = endpoint_html(&ctx.state(t.final_state)?, ctx)?;
    Ok(format!("{initial} → {final_state}").into())
}

impl Derived for TransitionRecord {
    const DERIVATIONS: &'static [Derivation<Self>] = &[
        derivation!(delta_energy: Float = delta_energy),
        derivation!(html: Text = html),
    ];

    fn describe(&self, store: &dyn Store) -> Result<String> {
        let endpoint = |id: StateId| -> Result<String> {
            store
                .states()
                .get(id)
                .ok_or_else(|| Error::not_found(id))?
                .describe(store)
        };
        Ok(format!(
            "{} → {}",
            endpoint(self.initial_state)?,
            endpoint(self.final_state)?
        ))
    }
}

/// Input for [`Catalog::create_transition`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewTransition {
    /// Channel-specific decay time constant.
    pub partial_lifetime: f64,
    /// Fraction of decays through this channel.
    pub branching_ratio: Option<f64>,
}

impl NewTransition {
    /// Starts a transition with no branching ratio.
    #[must_use]
    pub fn new(partial_lifetime: f64) -> Self {
        Self {
            partial_lifetime,
            branching_ratio: None,
        }
    }

    /// Builder method to set the branching ratio.
    #[must_use]
    pub fn with_branching_ratio(mut self, ratio: f64) -> Self {
        self.branching_ratio = Some(ratio);
        self
    }
}

/// Changes accepted by [`Catalog::update_transition`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransitionUpdate {
    /// New partial lifetime.
    pub partial_lifetime: Option<f64>,
    /// New branching ratio; `Some(None)` clears it.
    pub branching_ratio: Option<Option<f64>>,
}

fn check_partial_lifetime(entity: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(Error::range(
            entity,
            "partial_lifetime",
            value.to_string(),
            "must be >= 0",
        ));
    }
    Ok(())
}

fn check_branching_ratio(entity: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(ratio) if !(0.0..=1.0).contains(&ratio) => Err(Error::range(
            entity,
            "branching_ratio",
            ratio.to_string(),
            "must lie in [0, 1]",
        )),
        _ => Ok(()),
    }
}

impl<S: Store> Catalog<S> {
    /// Creates a transition from `initial` down to `final_state`.
    ///
    /// # Errors
    ///
    /// - `EntityNotFound` if either state is missing
    /// - `Range` for identical endpoints, a negative partial lifetime or a
    ///   branching ratio outside `[0, 1]`
    /// - `ConfigurationOrder` if the states belong to different isotopologues
    /// - `DuplicateEntity` if the pair already has a transition
    pub fn create_transition(
        &mut self,
        initial: StateId,
        final_state: StateId,
        new: NewTransition,
    ) -> Result<TransitionId> {
        let context = ErrorContext::new()
            .with_operation("create_transition")
            .with_entity(initial);
        self.atomic(context, |catalog| {
            let upper = catalog.state(initial)?;
            let lower = catalog.state(final_state)?;
            let entity = format!(
                "{} → {}",
                upper.describe(catalog.store())?,
                lower.describe(catalog.store())?
            );

            if initial == final_state {
                return Err(Error::range(
                    entity,
                    "final_state",
                    final_state.to_string(),
                    "initial and final states must differ",
                ));
            }
            if upper.isotopologue != lower.isotopologue {
                return Err(Error::configuration_order(
                    entity,
                    "both states must belong to the same isotopologue",
                ));
            }
            let key = TransitionKey {
                initial_state: initial,
                final_state,
            };
            if catalog.store().transitions().find(&key).is_some() {
                return Err(Error::duplicate(EntityKind::Transition, entity));
            }
            check_partial_lifetime(&entity, new.partial_lifetime)?;
            check_branching_ratio(&entity, new.branching_ratio)?;

            let isotopologue = upper.isotopologue;
            let mut record = TransitionRecord::new(
                isotopologue,
                initial,
                final_state,
                new.partial_lifetime,
                new.branching_ratio,
            );
            catalog.sync(&mut record, &Selection::All)?;
            let id = catalog.insert(record)?;
            catalog.propagate(Mutation::TransitionSaved {
                initial,
                final_state,
                isotopologue,
            })?;
            Ok(id)
        })
    }

    /// Loads a transition.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn transition(&self, id: TransitionId) -> Result<TransitionRecord> {
        self.load(id)
    }

    /// Looks a transition up by its endpoints.
    #[must_use]
    pub fn transition_between(
        &self,
        initial: StateId,
        final_state: StateId,
    ) -> Option<TransitionRecord> {
        self.store().transitions().find(&TransitionKey {
            initial_state: initial,
            final_state,
        })
    }

    /// Returns the transitions starting at `state`, in id order.
    #[must_use]
    pub fn transitions_from(&self, state: StateId) -> Vec<TransitionRecord> {
        self.store()
            .transitions()
            .filter(&|t| t.initial_state == state)
    }

    /// Changes a transition's partial lifetime and/or branching ratio.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` or `Range`.
    pub fn update_transition(&mut self, id: TransitionId, update: TransitionUpdate) -> Result<()> {
        let context = ErrorContext::new()
            .with_operation("update_transition")
            .with_entity(id);
        self.atomic(context, |catalog| {
            let mut record = catalog.transition(id)?;
            let entity = record.describe(catalog.store())?;
            if let Some(partial_lifetime) = update.partial_lifetime {
                check_partial_lifetime(&entity, partial_lifetime)?;
                record.partial_lifetime = partial_lifetime;
            }
            if let Some(branching_ratio) = update.branching_ratio {
                check_branching_ratio(&entity, branching_ratio)?;
                record.branching_ratio = branching_ratio;
            }
            let mutation = Mutation::TransitionSaved {
                initial: record.initial_state,
                final_state: record.final_state,
                isotopologue: record.isotopologue,
            };
            catalog.commit(record)?;
            catalog.propagate(mutation)
        })
    }

    /// Deletes a transition.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn delete_transition(&mut self, id: TransitionId) -> Result<TransitionRecord> {
        let context = ErrorContext::new()
            .with_operation("delete_transition")
            .with_entity(id);
        self.atomic(context, |catalog| catalog.remove_transition(id))
    }

    pub(crate) fn remove_transition(&mut self, id: TransitionId) -> Result<TransitionRecord> {
        let record = self.store_mut().transitions_mut().delete(id)?;
        self.propagate(Mutation::TransitionDeleted {
            initial: record.initial_state,
            final_state: record.final_state,
            isotopologue: record.isotopologue,
        })?;
        Ok(record)
    }
}

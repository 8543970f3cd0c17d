//! States: quantum configurations of an isotopologue.
//!
//! A state is keyed by its canonical electronic and vibrational labels. Its
//! cached renderings are derived in a fixed order; the combined forms join
//! the non-empty electronic and vibrational parts with `"; "`:
//!
//! ```text
//! el_state_str ─┬─ el_state_html ── el_state_html_notags
//!               │
//! vib_state_str ┼─ vib_state_html ─ vib_state_html_alt ─ vib_state_html_notags
//!               │                                        vib_state_sort_key
//!               ▼
//!   state_html ── state_html_notags ── state_sort_key
//! ```

use lida_foundation::{AttrValue, EntityKind, Error, ErrorContext, IsotopologueId, Result, StateId};
use lida_notation::{ElectronicLabel, QuantumLabels, VibrationalLabel, strip_markup};
use lida_storage::{IsotopologueRecord, Lifetime, StateKey, StateRecord, Store};

use crate::cascade::Mutation;
use crate::catalog::Catalog;
use crate::derivation::{Derivation, Derived, SyncContext, derivation};
use crate::sync::Selection;

// =============================================================================
// Derivations
// =============================================================================

fn electronic(s: &StateRecord) -> Result<ElectronicLabel> {
    ElectronicLabel::parse(&s.el_state_str)
}

fn vibrational(s: &StateRecord) -> Result<VibrationalLabel> {
    VibrationalLabel::parse(&s.vib_state_str)
}

fn join(parts: [&str; 2]) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn el_state_str(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(electronic(s)?.canonical().into())
}

fn el_state_html(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(electronic(s)?.html().into())
}

fn el_state_html_notags(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(strip_markup(&s.el_state_html).into())
}

fn vib_state_str(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(vibrational(s)?.canonical().into())
}

fn vib_state_html(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(vibrational(s)?.html().into())
}

fn vib_state_html_alt(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(vibrational(s)?.html_alt().into())
}

fn vib_state_html_notags(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(strip_markup(&s.vib_state_html).into())
}

fn vib_state_sort_key(s: &StateRecord, ctx: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(vibrational(s)?.sort_key(ctx.config().sort_key_width).into())
}

fn state_html(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(join([&s.el_state_html, &s.vib_state_html]).into())
}

fn state_html_notags(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(strip_markup(&s.state_html).into())
}

fn state_sort_key(s: &StateRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(join([&s.el_state_str, &s.vib_state_sort_key]).into())
}

fn number_transitions_from(s: &StateRecord, ctx: &SyncContext<'_>) -> Result<AttrValue> {
    let id = s.id;
    Ok(ctx.store().transitions().count(&|t| t.initial_state == id).into())
}

fn number_transitions_to(s: &StateRecord, ctx: &SyncContext<'_>) -> Result<AttrValue> {
    let id = s.id;
    Ok(ctx.store().transitions().count(&|t| t.final_state == id).into())
}

impl Derived for StateRecord {
    const DERIVATIONS: &'static [Derivation<Self>] = &[
        derivation!(el_state_str: Text = el_state_str),
        derivation!(el_state_html: Text = el_state_html),
        derivation!(el_state_html_notags: Text = el_state_html_notags),
        derivation!(vib_state_str: Text = vib_state_str),
        derivation!(vib_state_html: Text = vib_state_html),
        derivation!(vib_state_html_alt: Text = vib_state_html_alt),
        derivation!(vib_state_html_notags: Text = vib_state_html_notags),
        derivation!(vib_state_sort_key: Text = vib_state_sort_key),
        derivation!(state_html: Text = state_html),
        derivation!(state_html_notags: Text = state_html_notags),
        derivation!(state_sort_key: Text = state_sort_key),
        derivation!(number_transitions_from: Count = number_transitions_from),
        derivation!(number_transitions_to: Count = number_transitions_to),
    ];

    /// `"CO2+ a(2Π);v=(0,0,0)"`.
    fn describe(&self, store: &dyn Store) -> Result<String> {
        let iso = store
            .isotopologues()
            .get(self.isotopologue)
            .ok_or_else(|| Error::not_found(self.isotopologue))?;
        Ok(state_display(&iso.describe(store)?, &self.el_state_str, &self.vib_state_str))
    }
}

/// Renders a state as `"<molecule> <el>;v=<vib>"`, leaving out whichever
/// label is empty and the spaces inside the vibrational label.
pub(crate) fn state_display(molecule: &str, el: &str, vib: &str) -> String {
    let vib = if vib.is_empty() {
        String::new()
    } else {
        format!("v={}", vib.replace(' ', ""))
    };
    let labels: Vec<&str> = [el, vib.as_str()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    format!("{molecule} {}", labels.join(";"))
}

// =============================================================================
// Operations
// =============================================================================

/// Input for [`Catalog::create_state`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewState {
    /// Electronic label, any accepted spelling ("" when unresolved).
    pub el_state_str: String,
    /// Vibrational label ("" when unresolved).
    pub vib_state_str: String,
    /// Vibrational quantum-label descriptor, e.g. `"(v1, v2, v3)"`.
    ///
    /// Required with a vibrational label unless the isotopologue already
    /// declares one.
    pub vib_quantum_labels: String,
    /// Energy.
    pub energy: f64,
    /// Lifetime.
    pub lifetime: Lifetime,
}

impl NewState {
    /// Starts a state with no labels.
    #[must_use]
    pub fn new(energy: f64, lifetime: Lifetime) -> Self {
        Self {
            el_state_str: String::new(),
            vib_state_str: String::new(),
            vib_quantum_labels: String::new(),
            energy,
            lifetime,
        }
    }

    /// Builder method to set the electronic label.
    #[must_use]
    pub fn with_el(mut self, el_state_str: impl Into<String>) -> Self {
        self.el_state_str = el_state_str.into();
        self
    }

    /// Builder method to set the vibrational label and its descriptor.
    #[must_use]
    pub fn with_vib(
        mut self,
        vib_state_str: impl Into<String>,
        vib_quantum_labels: impl Into<String>,
    ) -> Self {
        self.vib_state_str = vib_state_str.into();
        self.vib_quantum_labels = vib_quantum_labels.into();
        self
    }
}

/// Changes accepted by [`Catalog::update_state`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateUpdate {
    /// New energy.
    pub energy: Option<f64>,
    /// New lifetime.
    pub lifetime: Option<Lifetime>,
}

impl StateUpdate {
    /// Builder method to set the energy.
    #[must_use]
    pub fn energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Builder method to set the lifetime.
    #[must_use]
    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = Some(lifetime);
        self
    }
}

fn check_energy(entity: &str, energy: f64) -> Result<()> {
    if energy.is_finite() {
        Ok(())
    } else {
        Err(Error::range(entity, "energy", energy.to_string(), "must be finite"))
    }
}

/// Validates a lifetime, folding `+inf` into [`Lifetime::Infinite`].
fn check_lifetime(entity: &str, lifetime: Lifetime) -> Result<Lifetime> {
    match lifetime {
        Lifetime::Finite(t) if t.is_infinite() && t > 0.0 => Ok(Lifetime::Infinite),
        Lifetime::Finite(t) if t.is_nan() || t < 0.0 => Err(Error::range(
            entity,
            "lifetime",
            t.to_string(),
            "must be >= 0 or infinite",
        )),
        other => Ok(other),
    }
}

impl<S: Store> Catalog<S> {
    /// Attaches a new state to an isotopologue.
    ///
    /// The labels are canonicalized first, so `"1SIGMA-"` and `"1Σ-"` name
    /// the same state. The first state with a vibrational label fixes the
    /// isotopologue's vibrational dimensionality.
    ///
    /// # Errors
    ///
    /// - `GrammarParse` for a malformed label or descriptor
    /// - `DuplicateEntity` if the canonical labels are taken
    /// - `DimensionMismatch` if the vibrational dimensionality disagrees with
    ///   the isotopologue, the descriptor or the molecule's modes
    /// - `ConfigurationOrder` if neither label is given, if the electronic
    ///   label's presence disagrees with the isotopologue's ground label, or if
    ///   a vibrational label comes without any descriptor
    /// - `Range` for a negative or NaN lifetime or a non-finite energy
    pub fn create_state(&mut self, isotopologue: IsotopologueId, new: NewState) -> Result<StateId> {
        let context = ErrorContext::new()
            .with_operation("create_state")
            .with_entity(isotopologue);
        self.atomic(context, |catalog| {
            let mut iso = catalog.isotopologue(isotopologue)?;
            let owner = iso.describe(catalog.store())?;

            if new.el_state_str.is_empty() && new.vib_state_str.is_empty() {
                return Err(Error::configuration_order(
                    owner,
                    "a state needs an electronic or a vibrational label",
                ));
            }
            let el = ElectronicLabel::parse(&new.el_state_str)?;
            let vib = VibrationalLabel::parse(&new.vib_state_str)?;
            let entity = state_display(&owner, el.canonical(), &vib.canonical());

            let key = StateKey {
                isotopologue,
                el_state_str: el.canonical().to_string(),
                vib_state_str: vib.canonical(),
            };
            if catalog.store().states().find(&key).is_some() {
                return Err(Error::duplicate(EntityKind::State, entity));
            }

            check_energy(&entity, new.energy)?;
            let lifetime = check_lifetime(&entity, new.lifetime)?;

            let labels = catalog.check_vibrational_dimension(&iso, &entity, &vib, &new)?;

            if !el.is_empty() && iso.ground_el_state_str.is_empty() {
                return Err(Error::configuration_order(
                    entity,
                    format!("set the ground electronic state of {owner} before attaching electronic states"),
                ));
            }
            if el.is_empty() && !iso.ground_el_state_str.is_empty() {
                return Err(Error::configuration_order(
                    entity,
                    format!(
                        "{owner} resolves electronic states (ground {}); every state needs an electronic label",
                        iso.ground_el_state_str
                    ),
                ));
            }

            if let Some(labels) = labels {
                catalog.apply_quantum_labels(iso.clone(), &labels)?;
                iso = catalog.isotopologue(isotopologue)?;
            }

            let mut record = StateRecord::new(
                iso.id,
                el.canonical(),
                vib.canonical(),
                new.energy,
                lifetime,
            );
            catalog.sync(&mut record, &Selection::All)?;
            let id = catalog.insert(record)?;
            catalog.propagate(Mutation::StateSaved { isotopologue })?;
            Ok(id)
        })
    }

    /// Checks a new state's vibrational dimensionality. Returns the
    /// descriptor to store on the isotopologue when this state is the first.
    fn check_vibrational_dimension(
        &self,
        iso: &IsotopologueRecord,
        entity: &str,
        vib: &VibrationalLabel,
        new: &NewState,
    ) -> Result<Option<QuantumLabels>> {
        let first = self.store().states().count(&|s| s.isotopologue == iso.id) == 0;

        if vib.is_empty() {
            if iso.vib_state_dim > 0 {
                return Err(Error::dimension_mismatch(
                    entity,
                    iso.vib_state_dim,
                    0,
                    "isotopologue resolves vibrational states",
                ));
            }
            return Ok(None);
        }

        if first && !new.vib_quantum_labels.is_empty() {
            let labels = QuantumLabels::parse(&new.vib_quantum_labels)?;
            if labels.dimension() != vib.dimension() {
                return Err(Error::dimension_mismatch(
                    entity,
                    labels.dimension(),
                    vib.dimension(),
                    "vibrational quantum labels",
                ));
            }
            return Ok(Some(labels));
        }

        if iso.vib_quantum_labels.is_empty() {
            return Err(Error::configuration_order(
                entity,
                "a vibrational label needs vibrational quantum labels",
            ));
        }
        if vib.dimension() != iso.vib_state_dim {
            return Err(Error::dimension_mismatch(
                entity,
                iso.vib_state_dim,
                vib.dimension(),
                "isotopologue vibrational dimension",
            ));
        }
        Ok(None)
    }

    /// Loads a state.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn state(&self, id: StateId) -> Result<StateRecord> {
        self.load(id)
    }

    /// Looks a state up by its labels, canonicalizing the electronic label
    /// the same way [`create_state`](Self::create_state) does.
    ///
    /// # Errors
    ///
    /// Returns `GrammarParse` if either label is malformed.
    pub fn state_by_labels(
        &self,
        isotopologue: IsotopologueId,
        el_state_str: &str,
        vib_state_str: &str,
    ) -> Result<Option<StateRecord>> {
        let key = StateKey {
            isotopologue,
            el_state_str: ElectronicLabel::parse(el_state_str)?.canonical().to_string(),
            vib_state_str: VibrationalLabel::parse(vib_state_str)?.canonical(),
        };
        Ok(self.store().states().find(&key))
    }

    /// Returns every state of an isotopologue, ordered by sort key.
    #[must_use]
    pub fn states_of(&self, isotopologue: IsotopologueId) -> Vec<StateRecord> {
        let mut states = self
            .store()
            .states()
            .filter(&|s| s.isotopologue == isotopologue);
        states.sort_by(|a, b| a.state_sort_key.cmp(&b.state_sort_key));
        states
    }

    /// Changes a state's energy and/or lifetime.
    ///
    /// An energy change re-derives `delta_energy` of every transition
    /// touching the state.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` or `Range`.
    pub fn update_state(&mut self, id: StateId, update: StateUpdate) -> Result<()> {
        let context = ErrorContext::new()
            .with_operation("update_state")
            .with_entity(id);
        self.atomic(context, |catalog| {
            let mut record = catalog.state(id)?;
            let entity = record.describe(catalog.store())?;
            let before = record.energy;
            if let Some(energy) = update.energy {
                check_energy(&entity, energy)?;
                record.energy = energy;
            }
            if let Some(lifetime) = update.lifetime {
                record.lifetime = check_lifetime(&entity, lifetime)?;
            }
            let isotopologue = record.isotopologue;
            let energy_changed = record.energy.to_bits() != before.to_bits();
            catalog.commit(record)?;

            catalog.propagate(Mutation::StateSaved { isotopologue })?;
            if energy_changed {
                catalog.propagate(Mutation::EnergyChanged { state: id })?;
            }
            Ok(())
        })
    }

    /// Deletes a state and every transition touching it.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn delete_state(&mut self, id: StateId) -> Result<StateRecord> {
        let context = ErrorContext::new()
            .with_operation("delete_state")
            .with_entity(id);
        self.atomic(context, |catalog| catalog.remove_state(id))
    }

    pub(crate) fn remove_state(&mut self, id: StateId) -> Result<StateRecord> {
        self.state(id)?;
        let incident: Vec<_> = self
            .store()
            .transitions()
            .filter(&|t| t.initial_state == id || t.final_state == id)
            .into_iter()
            .map(|t| t.id)
            .collect();
        for transition in incident {
            self.remove_transition(transition)?;
        }
        let record = self.store_mut().states_mut().delete(id)?;
        self.propagate(Mutation::StateDeleted {
            isotopologue: record.isotopologue,
        })?;
        Ok(record)
    }
}

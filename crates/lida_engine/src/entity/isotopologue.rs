//! Isotopologues: the isotopic variant of a molecule that states attach to.

use lida_foundation::{
    AttrValue, EntityKind, Error, ErrorContext, IsotopologueId, MoleculeId, Result, StateId,
};
use lida_notation::{ElectronicLabel, Formula, QuantumLabels};
use lida_storage::{IsotopologueKey, IsotopologueRecord, Lifetime, MoleculeKey, StateRecord, Store};

use crate::catalog::Catalog;
use crate::derivation::{Derivation, Derived, SyncContext, derivation};
use crate::entity::molecule::canonical_formula;
use crate::sync::Selection;

// =============================================================================
// Derivations
// =============================================================================

fn iso_formula(i: &IsotopologueRecord) -> Result<Formula> {
    Formula::parse(&i.iso_formula)
}

fn iso_slug(i: &IsotopologueRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(iso_formula(i)?.slug().into())
}

fn html(i: &IsotopologueRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(iso_formula(i)?.html().into())
}

fn mass(i: &IsotopologueRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(iso_formula(i)?.mass()?.into())
}

fn vib_quantum_labels_html(
    i: &IsotopologueRecord,
    _: &SyncContext<'_>,
) -> Result<AttrValue> {
    Ok(QuantumLabels::parse(&i.vib_quantum_labels)?.html().into())
}

fn number_states(
    i: &IsotopologueRecord,
    ctx: &SyncContext<'_>,
) -> Result<AttrValue> {
    let id = i.id;
    Ok(ctx.store().states().count(&|s| s.isotopologue == id).into())
}

fn number_transitions(
    i: &IsotopologueRecord,
    ctx: &SyncContext<'_>,
) -> Result<AttrValue> {
    let id = i.id;
    Ok(ctx
        .store()
        .transitions()
        .count(&|t| t.isotopologue == id)
        .into())
}

impl Derived for IsotopologueRecord {
    const DERIVATIONS: &'static [Derivation<Self>] = &[
        derivation!(iso_slug: Text = iso_slug),
        derivation!(html: Text = html),
        derivation!(mass: Float = mass),
        derivation!(vib_quantum_labels_html: Text = vib_quantum_labels_html),
        derivation!(number_states: Count = number_states),
        derivation!(number_transitions: Count = number_transitions),
    ];

    /// An isotopologue displays as its molecule.
    fn describe(&self, store: &dyn Store) -> Result<String> {
        store
            .molecules()
            .get(self.molecule)
            .map(|m| m.formula)
            .ok_or_else(|| Error::not_found(self.molecule))
    }
}

// =============================================================================
// Read helpers
// =============================================================================

/// Derived read-only views of an isotopologue row.
pub trait IsotopologueView {
    /// Markup of the ground electronic label ("" when unset).
    ///
    /// # Errors
    ///
    /// Returns `GrammarParse` if the stored label no longer parses.
    fn ground_el_state_html(&self) -> Result<String>;

    /// True if states carry electronic labels.
    fn resolves_el(&self) -> bool;

    /// True if states carry vibrational labels.
    fn resolves_vib(&self) -> bool;
}

impl IsotopologueView for IsotopologueRecord {
    fn ground_el_state_html(&self) -> Result<String> {
        Ok(ElectronicLabel::parse(&self.ground_el_state_str)?
            .html()
            .to_string())
    }

    fn resolves_el(&self) -> bool {
        !self.ground_el_state_str.is_empty()
    }

    fn resolves_vib(&self) -> bool {
        self.vib_state_dim > 0
    }
}

/// Picks the ground electronic label out of a dataset's states: the unique
/// label carrying an infinite lifetime. Labels are canonicalized first, so
/// `"X(1SIGMA+)"` and `"X(1Σ+)"` count as one.
///
/// # Errors
///
/// Returns `GrammarParse` for a malformed label and `ConfigurationOrder` if
/// no label, or more than one, has an infinite lifetime.
pub fn infer_ground_el_state<'a, I>(candidates: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, Lifetime)>,
{
    let mut stable: Vec<String> = Vec::new();
    for (label, lifetime) in candidates {
        if !lifetime.is_infinite() {
            continue;
        }
        let canonical = ElectronicLabel::parse(label)?.canonical().to_string();
        if !stable.contains(&canonical) {
            stable.push(canonical);
        }
    }
    match stable.len() {
        1 => Ok(stable.swap_remove(0)),
        0 => Err(Error::configuration_order(
            "dataset",
            "no state has an infinite lifetime",
        )),
        _ => Err(Error::configuration_order(
            "dataset",
            format!("several stable electronic states: {}", stable.join(", ")),
        )),
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Input for [`Catalog::create_isotopologue`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewIsotopologue {
    /// Canonical isotopic formula, e.g. `"(12C)(16O)"`.
    pub iso_formula: String,
    /// `InChIKey` of the species.
    pub inchi_key: String,
    /// Dataset name.
    pub dataset_name: String,
    /// Dataset version.
    pub version: String,
}

impl NewIsotopologue {
    /// Starts from an isotopic formula.
    #[must_use]
    pub fn new(iso_formula: impl Into<String>) -> Self {
        Self {
            iso_formula: iso_formula.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the `InChIKey`.
    #[must_use]
    pub fn with_inchi_key(mut self, inchi_key: impl Into<String>) -> Self {
        self.inchi_key = inchi_key.into();
        self
    }

    /// Builder method to set the dataset provenance.
    #[must_use]
    pub fn with_dataset(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dataset_name = name.into();
        self.version = version.into();
        self
    }
}

impl From<&str> for NewIsotopologue {
    fn from(iso_formula: &str) -> Self {
        Self::new(iso_formula)
    }
}

impl<S: Store> Catalog<S> {
    /// Creates the isotopologue of an existing molecule.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` for an unknown molecule, `GrammarParse` for a
    /// malformed or non-canonical isotopic formula (or one with no tabulated
    /// mass), and `DuplicateEntity` if the formula is taken or the molecule
    /// already has an isotopologue.
    pub fn create_isotopologue(
        &mut self,
        molecule: MoleculeId,
        new: NewIsotopologue,
    ) -> Result<IsotopologueId> {
        let context = ErrorContext::new()
            .with_operation("create_isotopologue")
            .with_entity(molecule);
        self.atomic(context, |catalog| {
            let owner = catalog.molecule(molecule)?;
            canonical_formula(&new.iso_formula)?;
            let relation = catalog.store().isotopologues();
            if relation
                .find(&IsotopologueKey::IsoFormula(new.iso_formula.clone()))
                .is_some()
            {
                return Err(Error::duplicate(EntityKind::Isotopologue, new.iso_formula));
            }
            if relation.find(&IsotopologueKey::Molecule(molecule)).is_some() {
                return Err(Error::duplicate(
                    EntityKind::Isotopologue,
                    format!("molecule {}", owner.formula),
                ));
            }

            let mut record = IsotopologueRecord::new(molecule, new.iso_formula);
            record.inchi_key = new.inchi_key;
            record.dataset_name = new.dataset_name;
            record.version = new.version;
            catalog.sync(&mut record, &Selection::All)?;
            catalog.insert(record)
        })
    }

    /// Loads an isotopologue.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn isotopologue(&self, id: IsotopologueId) -> Result<IsotopologueRecord> {
        self.load(id)
    }

    /// Looks an isotopologue up by its canonical isotopic formula.
    #[must_use]
    pub fn isotopologue_by_iso_formula(&self, iso_formula: &str) -> Option<IsotopologueRecord> {
        self.store()
            .isotopologues()
            .find(&IsotopologueKey::IsoFormula(iso_formula.to_string()))
    }

    /// Looks an isotopologue up by its molecule's formula.
    #[must_use]
    pub fn isotopologue_by_formula(&self, formula: &str) -> Option<IsotopologueRecord> {
        let molecule = self
            .store()
            .molecules()
            .find(&MoleculeKey(formula.to_string()))?;
        self.store()
            .isotopologues()
            .find(&IsotopologueKey::Molecule(molecule.id))
    }

    /// Sets the ground electronic label, canonicalizing it. Must be called
    /// before any state is attached.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationOrder` if the isotopologue already has states
    /// and `GrammarParse` for a malformed label.
    pub fn set_ground_el_state_str(&mut self, id: IsotopologueId, label: &str) -> Result<()> {
        let context = ErrorContext::new()
            .with_operation("set_ground_el_state_str")
            .with_entity(id);
        self.atomic(context, |catalog| {
            let mut record = catalog.isotopologue(id)?;
            catalog.require_no_states(&record, "ground electronic state")?;
            record.ground_el_state_str = ElectronicLabel::parse(label)?.canonical().to_string();
            catalog.commit(record)
        })
    }

    /// Sets the vibrational quantum-label descriptor (e.g. `"(v1, v2, v3)"`)
    /// and with it the vibrational dimensionality. Must be called before any
    /// state is attached; the first state may also set it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationOrder` if the isotopologue already has states,
    /// `GrammarParse` for a malformed descriptor and `DimensionMismatch` if
    /// the molecule has fewer vibrational modes.
    pub fn set_vib_quantum_labels(&mut self, id: IsotopologueId, labels: &str) -> Result<()> {
        let context = ErrorContext::new()
            .with_operation("set_vib_quantum_labels")
            .with_entity(id);
        self.atomic(context, |catalog| {
            let record = catalog.isotopologue(id)?;
            catalog.require_no_states(&record, "vibrational quantum labels")?;
            let labels = QuantumLabels::parse(labels)?;
            catalog.apply_quantum_labels(record, &labels)
        })
    }

    /// Deletes an isotopologue together with its states and transitions.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn delete_isotopologue(&mut self, id: IsotopologueId) -> Result<IsotopologueRecord> {
        let context = ErrorContext::new()
            .with_operation("delete_isotopologue")
            .with_entity(id);
        self.atomic(context, |catalog| catalog.remove_isotopologue(id))
    }

    pub(crate) fn remove_isotopologue(&mut self, id: IsotopologueId) -> Result<IsotopologueRecord> {
        self.isotopologue(id)?;
        let states: Vec<StateId> = self
            .store()
            .states()
            .filter(&|s| s.isotopologue == id)
            .into_iter()
            .map(|s| s.id)
            .collect();
        for state in states {
            self.remove_state(state)?;
        }
        self.store_mut().isotopologues_mut().delete(id)
    }

    /// Checks the dimensionality bound and stores a descriptor.
    pub(crate) fn apply_quantum_labels(
        &mut self,
        mut record: IsotopologueRecord,
        labels: &QuantumLabels,
    ) -> Result<()> {
        let molecule = self.molecule(record.molecule)?;
        let modes = self.config().vibrational_modes;
        if let Some(limit) = modes.max_dimension(molecule.number_atoms) {
            if labels.dimension() > limit {
                return Err(Error::dimension_mismatch(
                    format!("{} {}", molecule.formula, labels),
                    limit,
                    labels.dimension(),
                    modes.rule(),
                ));
            }
        }
        record.vib_quantum_labels = labels.canonical();
        record.vib_state_dim = labels.dimension();
        self.sync(&mut record, &Selection::only(["vib_quantum_labels_html"]))?;
        self.commit(record)
    }

    fn require_no_states(&self, record: &IsotopologueRecord, what: &str) -> Result<()> {
        let id = record.id;
        let attached = self.store().states().count(&|s: &StateRecord| s.isotopologue == id);
        if attached > 0 {
            return Err(Error::configuration_order(
                record.describe(self.store())?,
                format!("{what} must be set before states are attached ({attached} exist)"),
            ));
        }
        Ok(())
    }
}

//! Row types for the four relations.
//!
//! A record carries the fields a caller supplies (formula, labels, energies)
//! and the cached fields the engine derives from them (markup, slugs, sort
//! keys, counts). Storage never computes anything; it only keeps rows and
//! enforces natural-key uniqueness.

use std::fmt;

use lida_foundation::{EntityKind, IsotopologueId, MoleculeId, StateId, TransitionId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::relation::Record;

// =============================================================================
// Lifetime
// =============================================================================

/// A state lifetime: a non-negative number of seconds, or infinite for ground
/// and metastable states.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Lifetime {
    /// Finite lifetime.
    Finite(f64),
    /// The state does not decay.
    Infinite,
}

impl Lifetime {
    /// Returns true for [`Lifetime::Infinite`].
    #[must_use]
    pub const fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// Returns the finite value, if any.
    #[must_use]
    pub const fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(t) => Some(t),
            Self::Infinite => None,
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(t) => write!(f, "{t}"),
            Self::Infinite => f.write_str("inf"),
        }
    }
}

// =============================================================================
// Molecule
// =============================================================================

/// A molecule row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoleculeRecord {
    /// Row identifier (0 until inserted).
    pub id: MoleculeId,
    /// Canonical formula, unique across molecules.
    pub formula: String,
    /// Free-text name.
    pub name: String,
    /// Cached URL-safe identifier.
    pub slug: String,
    /// Cached formula markup.
    pub html: String,
    /// Cached net charge.
    pub charge: i64,
    /// Cached atom count.
    pub number_atoms: u64,
}

impl MoleculeRecord {
    /// Creates an unsaved row with empty caches.
    #[must_use]
    pub fn new(formula: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: MoleculeId::new(0),
            formula: formula.into(),
            name: name.into(),
            slug: String::new(),
            html: String::new(),
            charge: 0,
            number_atoms: 0,
        }
    }
}

/// Natural key of a molecule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoleculeKey(pub String);

impl fmt::Display for MoleculeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Record for MoleculeRecord {
    type Id = MoleculeId;
    type Key = MoleculeKey;
    const KIND: EntityKind = EntityKind::Molecule;

    fn id(&self) -> MoleculeId {
        self.id
    }

    fn set_id(&mut self, raw: u64) {
        self.id = MoleculeId::new(raw);
    }

    fn keys(&self) -> Vec<MoleculeKey> {
        vec![MoleculeKey(self.formula.clone())]
    }
}

// =============================================================================
// Isotopologue
// =============================================================================

/// An isotopologue row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IsotopologueRecord {
    /// Row identifier (0 until inserted).
    pub id: IsotopologueId,
    /// Owning molecule; at most one isotopologue per molecule.
    pub molecule: MoleculeId,
    /// Canonical isotopic formula, unique across isotopologues.
    pub iso_formula: String,
    /// `InChIKey` of the species.
    pub inchi_key: String,
    /// Name of the dataset the states came from.
    pub dataset_name: String,
    /// Dataset version.
    pub version: String,
    /// Canonical ground electronic label ("" when electronically unresolved).
    pub ground_el_state_str: String,
    /// Canonical vibrational quantum-label descriptor.
    pub vib_quantum_labels: String,
    /// Vibrational dimensionality shared by every state.
    pub vib_state_dim: usize,
    /// Cached slug of the isotopic formula.
    pub iso_slug: String,
    /// Cached isotopic formula markup.
    pub html: String,
    /// Cached mass in u.
    pub mass: f64,
    /// Cached descriptor markup.
    pub vib_quantum_labels_html: String,
    /// Cached number of states.
    pub number_states: u64,
    /// Cached number of transitions.
    pub number_transitions: u64,
}

impl IsotopologueRecord {
    /// Creates an unsaved row with empty caches.
    #[must_use]
    pub fn new(molecule: MoleculeId, iso_formula: impl Into<String>) -> Self {
        Self {
            id: IsotopologueId::new(0),
            molecule,
            iso_formula: iso_formula.into(),
            inchi_key: String::new(),
            dataset_name: String::new(),
            version: String::new(),
            ground_el_state_str: String::new(),
            vib_quantum_labels: String::new(),
            vib_state_dim: 0,
            iso_slug: String::new(),
            html: String::new(),
            mass: 0.0,
            vib_quantum_labels_html: String::new(),
            number_states: 0,
            number_transitions: 0,
        }
    }
}

/// Natural keys of an isotopologue.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IsotopologueKey {
    /// Unique isotopic formula.
    IsoFormula(String),
    /// Unique owning molecule.
    Molecule(MoleculeId),
}

impl fmt::Display for IsotopologueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsoFormula(formula) => f.write_str(formula),
            Self::Molecule(id) => write!(f, "molecule {id}"),
        }
    }
}

impl Record for IsotopologueRecord {
    type Id = IsotopologueId;
    type Key = IsotopologueKey;
    const KIND: EntityKind = EntityKind::Isotopologue;

    fn id(&self) -> IsotopologueId {
        self.id
    }

    fn set_id(&mut self, raw: u64) {
        self.id = IsotopologueId::new(raw);
    }

    fn keys(&self) -> Vec<IsotopologueKey> {
        vec![
            IsotopologueKey::IsoFormula(self.iso_formula.clone()),
            IsotopologueKey::Molecule(self.molecule),
        ]
    }
}

// =============================================================================
// State
// =============================================================================

/// A state row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateRecord {
    /// Row identifier (0 until inserted).
    pub id: StateId,
    /// Owning isotopologue.
    pub isotopologue: IsotopologueId,
    /// Energy (any sign).
    pub energy: f64,
    /// Lifetime.
    pub lifetime: Lifetime,
    /// Canonical electronic label.
    pub el_state_str: String,
    /// Canonical vibrational label.
    pub vib_state_str: String,
    /// Cached electronic markup.
    pub el_state_html: String,
    /// Cached electronic search text.
    pub el_state_html_notags: String,
    /// Cached vibrational markup.
    pub vib_state_html: String,
    /// Cached additive vibrational markup.
    pub vib_state_html_alt: String,
    /// Cached vibrational search text.
    pub vib_state_html_notags: String,
    /// Cached vibrational sort key.
    pub vib_state_sort_key: String,
    /// Cached combined markup.
    pub state_html: String,
    /// Cached combined search text.
    pub state_html_notags: String,
    /// Cached combined sort key.
    pub state_sort_key: String,
    /// Cached number of transitions starting here.
    pub number_transitions_from: u64,
    /// Cached number of transitions ending here.
    pub number_transitions_to: u64,
}

impl StateRecord {
    /// Creates an unsaved row with empty caches.
    #[must_use]
    pub fn new(
        isotopologue: IsotopologueId,
        el_state_str: impl Into<String>,
        vib_state_str: impl Into<String>,
        energy: f64,
        lifetime: Lifetime,
    ) -> Self {
        Self {
            id: StateId::new(0),
            isotopologue,
            energy,
            lifetime,
            el_state_str: el_state_str.into(),
            vib_state_str: vib_state_str.into(),
            el_state_html: String::new(),
            el_state_html_notags: String::new(),
            vib_state_html: String::new(),
            vib_state_html_alt: String::new(),
            vib_state_html_notags: String::new(),
            vib_state_sort_key: String::new(),
            state_html: String::new(),
            state_html_notags: String::new(),
            state_sort_key: String::new(),
            number_transitions_from: 0,
            number_transitions_to: 0,
        }
    }
}

/// Natural key of a state: (isotopologue, electronic label, vibrational label).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    /// Owning isotopologue.
    pub isotopologue: IsotopologueId,
    /// Canonical electronic label.
    pub el_state_str: String,
    /// Canonical vibrational label.
    pub vib_state_str: String,
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "isotopologue {}, el={:?}, vib={:?}",
            self.isotopologue, self.el_state_str, self.vib_state_str
        )
    }
}

impl Record for StateRecord {
    type Id = StateId;
    type Key = StateKey;
    const KIND: EntityKind = EntityKind::State;

    fn id(&self) -> StateId {
        self.id
    }

    fn set_id(&mut self, raw: u64) {
        self.id = StateId::new(raw);
    }

    fn keys(&self) -> Vec<StateKey> {
        vec![StateKey {
            isotopologue: self.isotopologue,
            el_state_str: self.el_state_str.clone(),
            vib_state_str: self.vib_state_str.clone(),
        }]
    }
}

// =============================================================================
// Transition
// =============================================================================

/// A transition row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransitionRecord {
    /// Row identifier (0 until inserted).
    pub id: TransitionId,
    /// Isotopologue shared by both endpoints.
    pub isotopologue: IsotopologueId,
    /// Upper (decaying) state.
    pub initial_state: StateId,
    /// Lower state.
    pub final_state: StateId,
    /// Channel-specific decay time constant.
    pub partial_lifetime: f64,
    /// Fraction of decays through this channel.
    pub branching_ratio: Option<f64>,
    /// Cached final energy minus initial energy.
    pub delta_energy: f64,
    /// Cached markup.
    pub html: String,
}

impl TransitionRecord {
    /// Creates an unsaved row with empty caches.
    #[must_use]
    pub fn new(
        isotopologue: IsotopologueId,
        initial_state: StateId,
        final_state: StateId,
        partial_lifetime: f64,
        branching_ratio: Option<f64>,
    ) -> Self {
        Self {
            id: TransitionId::new(0),
            isotopologue,
            initial_state,
            final_state,
            partial_lifetime,
            branching_ratio,
            delta_energy: 0.0,
            html: String::new(),
        }
    }
}

/// Natural key of a transition: (initial, final).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionKey {
    /// Upper state.
    pub initial_state: StateId,
    /// Lower state.
    pub final_state: StateId,
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.initial_state, self.final_state)
    }
}

impl Record for TransitionRecord {
    type Id = TransitionId;
    type Key = TransitionKey;
    const KIND: EntityKind = EntityKind::Transition;

    fn id(&self) -> TransitionId {
        self.id
    }

    fn set_id(&mut self, raw: u64) {
        self.id = TransitionId::new(raw);
    }

    fn keys(&self) -> Vec<TransitionKey> {
        vec![TransitionKey {
            initial_state: self.initial_state,
            final_state: self.final_state,
        }]
    }
}

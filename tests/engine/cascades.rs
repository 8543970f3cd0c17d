//! Integration tests for cascades
//!
//! Tests that counts and energy differences follow every sanctioned mutation.

use lida_engine::{Catalog, NewState, NewTransition, StateUpdate, TransitionUpdate};
use lida_foundation::{IsotopologueId, StateId, TransitionId};
use lida_storage::Lifetime;

struct Ladder {
    catalog: Catalog,
    iso: IsotopologueId,
    states: [StateId; 3],
    transitions: [TransitionId; 2],
}

/// CO v=0,1,2 with transitions 1→0 and 2→1.
fn ladder() -> Ladder {
    let mut catalog = Catalog::new();
    let molecule = catalog.create_molecule("CO", "carbon monoxide").unwrap();
    let iso = catalog
        .create_isotopologue(molecule, "(12C)(16O)".into())
        .unwrap();
    catalog.set_ground_el_state_str(iso, "X(1SIGMA+)").unwrap();
    catalog.set_vib_quantum_labels(iso, "v").unwrap();

    let mut create = |v: &str, energy: f64, lifetime: Lifetime| {
        catalog
            .create_state(
                iso,
                NewState::new(energy, lifetime)
                    .with_el("X(1SIGMA+)")
                    .with_vib(v, ""),
            )
            .unwrap()
    };
    let states = [
        create("0", 0.0, Lifetime::Infinite),
        create("1", 0.26, Lifetime::Finite(0.033)),
        create("2", 0.52, Lifetime::Finite(0.017)),
    ];
    let transitions = [
        catalog
            .create_transition(states[1], states[0], NewTransition::new(0.033))
            .unwrap(),
        catalog
            .create_transition(states[2], states[1], NewTransition::new(0.017))
            .unwrap(),
    ];
    Ladder {
        catalog,
        iso,
        states,
        transitions,
    }
}

fn counts(catalog: &Catalog, state: StateId) -> (u64, u64) {
    let record = catalog.state(state).unwrap();
    (record.number_transitions_from, record.number_transitions_to)
}

// =============================================================================
// Counts
// =============================================================================

#[test]
fn counts_after_creation() {
    let Ladder {
        catalog,
        iso,
        states,
        ..
    } = ladder();
    let record = catalog.isotopologue(iso).unwrap();
    assert_eq!(record.number_states, 3);
    assert_eq!(record.number_transitions, 2);
    assert_eq!(counts(&catalog, states[0]), (0, 1));
    assert_eq!(counts(&catalog, states[1]), (1, 1));
    assert_eq!(counts(&catalog, states[2]), (1, 0));
}

#[test]
fn counts_after_transition_delete() {
    let Ladder {
        mut catalog,
        iso,
        states,
        transitions,
    } = ladder();
    catalog.delete_transition(transitions[1]).unwrap();

    assert_eq!(catalog.isotopologue(iso).unwrap().number_transitions, 1);
    assert_eq!(counts(&catalog, states[1]), (1, 0));
    assert_eq!(counts(&catalog, states[2]), (0, 0));
}

#[test]
fn state_delete_removes_incident_transitions() {
    let Ladder {
        mut catalog,
        iso,
        states,
        ..
    } = ladder();
    catalog.delete_state(states[1]).unwrap();

    let record = catalog.isotopologue(iso).unwrap();
    assert_eq!(record.number_states, 2);
    assert_eq!(record.number_transitions, 0);
    assert_eq!(counts(&catalog, states[0]), (0, 0));
    assert_eq!(counts(&catalog, states[2]), (0, 0));
    assert!(catalog.store_is_consistent());
}

#[test]
fn failed_creation_leaves_counts_alone() {
    let Ladder {
        mut catalog,
        iso,
        states,
        ..
    } = ladder();
    catalog
        .create_transition(states[2], states[0], NewTransition::new(-1.0))
        .unwrap_err();
    assert_eq!(catalog.isotopologue(iso).unwrap().number_transitions, 2);
    assert_eq!(counts(&catalog, states[0]), (0, 1));
}

// =============================================================================
// Energy
// =============================================================================

#[test]
fn delta_energy_at_creation() {
    let Ladder {
        catalog,
        transitions,
        ..
    } = ladder();
    let delta = catalog.transition(transitions[0]).unwrap().delta_energy;
    assert!((delta + 0.26).abs() < 1e-12);
}

#[test]
fn energy_change_reaches_both_directions() {
    let Ladder {
        mut catalog,
        states,
        transitions,
        ..
    } = ladder();
    catalog
        .update_state(states[1], StateUpdate::default().energy(0.3))
        .unwrap();

    let down = catalog.transition(transitions[0]).unwrap().delta_energy;
    let up = catalog.transition(transitions[1]).unwrap().delta_energy;
    assert!((down + 0.3).abs() < 1e-12);
    assert!((up + 0.22).abs() < 1e-12);
}

#[test]
fn lifetime_change_leaves_transitions_alone() {
    let Ladder {
        mut catalog,
        states,
        transitions,
        ..
    } = ladder();
    let before = catalog.transition(transitions[0]).unwrap();
    catalog
        .update_state(states[1], StateUpdate::default().lifetime(Lifetime::Finite(0.05)))
        .unwrap();
    assert_eq!(catalog.transition(transitions[0]).unwrap(), before);
    assert_eq!(
        catalog.state(states[1]).unwrap().lifetime,
        Lifetime::Finite(0.05)
    );
}

#[test]
fn transition_update_keeps_counts() {
    let Ladder {
        mut catalog,
        iso,
        transitions,
        ..
    } = ladder();
    catalog
        .update_transition(
            transitions[0],
            TransitionUpdate {
                partial_lifetime: Some(0.04),
                branching_ratio: Some(Some(1.0)),
            },
        )
        .unwrap();
    let record = catalog.transition(transitions[0]).unwrap();
    assert_eq!(record.branching_ratio, Some(1.0));
    assert_eq!(catalog.isotopologue(iso).unwrap().number_transitions, 2);
}

// =============================================================================
// Markup
// =============================================================================

#[test]
fn transition_markup_follows_molecule_formula() {
    let Ladder {
        mut catalog,
        transitions,
        ..
    } = ladder();
    assert_eq!(
        catalog.transition(transitions[0]).unwrap().html,
        "CO X<sup>1</sup>Σ<sup>+</sup>; <i>v</i>=1 → CO X<sup>1</sup>Σ<sup>+</sup>; <i>v</i>=0"
    );

    let molecule = catalog.molecule_by_formula("CO").unwrap().id;
    catalog.update_molecule_formula(molecule, "CO+").unwrap();
    assert!(
        catalog
            .transition(transitions[0])
            .unwrap()
            .html
            .starts_with("CO<sup>+</sup> X<sup>1</sup>Σ<sup>+</sup>; <i>v</i>=1 → ")
    );
}

// =============================================================================
// Helpers
// =============================================================================

trait Consistent {
    fn store_is_consistent(&self) -> bool;
}

impl Consistent for Catalog {
    /// A full dry resync of a clone finds nothing to repair.
    fn store_is_consistent(&self) -> bool {
        self.clone().resync_all().unwrap().is_empty()
    }
}

//! Integration tests for entity operations
//!
//! Tests creation rules: canonical labels, dimensionality and configuration
//! order.

use lida_engine::{Catalog, NewState, NewTransition};
use lida_foundation::{ErrorKind, IsotopologueId};
use lida_storage::Lifetime;

/// Water with no ground electronic state: vibrational states only.
fn water() -> (Catalog, IsotopologueId) {
    let mut catalog = Catalog::new();
    let molecule = catalog.create_molecule("H2O", "water").unwrap();
    let iso = catalog
        .create_isotopologue(molecule, "(1H)2(16O)".into())
        .unwrap();
    (catalog, iso)
}

/// Carbon monoxide resolving electronic states.
fn carbon_monoxide() -> (Catalog, IsotopologueId) {
    let mut catalog = Catalog::new();
    let molecule = catalog.create_molecule("CO", "carbon monoxide").unwrap();
    let iso = catalog
        .create_isotopologue(molecule, "(12C)(16O)".into())
        .unwrap();
    catalog.set_ground_el_state_str(iso, "X(1SIGMA+)").unwrap();
    (catalog, iso)
}

fn vib(label: &str, energy: f64) -> NewState {
    NewState::new(energy, Lifetime::Finite(1e-3)).with_vib(label, "(v1, v2, v3)")
}

// =============================================================================
// Dimensionality
// =============================================================================

#[test]
fn first_state_fixes_dimension() {
    let (mut catalog, iso) = water();
    catalog.create_state(iso, vib("(0, 0, 0)", 0.0)).unwrap();
    let record = catalog.isotopologue(iso).unwrap();
    assert_eq!(record.vib_state_dim, 3);
    assert_eq!(record.vib_quantum_labels, "(v1, v2, v3)");

    let err = catalog
        .create_state(iso, NewState::new(0.2, Lifetime::Finite(1.0)).with_vib("(1, 0)", ""))
        .unwrap_err();
    assert!(err.is_dimension_mismatch());
    assert_eq!(catalog.states_of(iso).len(), 1);
}

#[test]
fn descriptor_must_match_label() {
    let (mut catalog, iso) = water();
    let err = catalog
        .create_state(
            iso,
            NewState::new(0.0, Lifetime::Infinite).with_vib("(0, 0)", "(v1, v2, v3)"),
        )
        .unwrap_err();
    assert!(err.is_dimension_mismatch());
    assert_eq!(catalog.isotopologue(iso).unwrap().vib_state_dim, 0);
}

#[test]
fn vibrational_label_needs_descriptor() {
    let (mut catalog, iso) = water();
    let err = catalog
        .create_state(iso, NewState::new(0.0, Lifetime::Infinite).with_vib("(0, 0, 0)", ""))
        .unwrap_err();
    assert!(err.is_configuration_order());
}

#[test]
fn dimension_bounded_by_molecule() {
    let (mut catalog, iso) = carbon_monoxide();
    let err = catalog
        .create_state(
            iso,
            NewState::new(0.0, Lifetime::Infinite)
                .with_el("X(1SIGMA+)")
                .with_vib("(0, 0)", "(v1, v2)"),
        )
        .unwrap_err();
    assert!(err.is_dimension_mismatch());
}

// =============================================================================
// Canonical keys
// =============================================================================

#[test]
fn spellings_of_one_state_collide() {
    let mut catalog = Catalog::new();
    let molecule = catalog.create_molecule("O2", "oxygen").unwrap();
    let iso = catalog
        .create_isotopologue(molecule, "(16O)2".into())
        .unwrap();
    catalog.set_ground_el_state_str(iso, "X(3SIGMA-g)").unwrap();
    catalog
        .create_state(iso, NewState::new(1.0, Lifetime::Finite(1.0)).with_el("1SIGMA-"))
        .unwrap();
    let err = catalog
        .create_state(iso, NewState::new(1.0, Lifetime::Finite(1.0)).with_el("1Σ-"))
        .unwrap_err();
    assert!(err.is_duplicate());

    let found = catalog.state_by_labels(iso, "1SIGMA-", "").unwrap().unwrap();
    assert_eq!(found.el_state_str, "1Σ-");
    assert_eq!(found.el_state_html, "<sup>1</sup>Σ<sup>-</sup>");
}

#[test]
fn malformed_labels_write_nothing() {
    let (mut catalog, iso) = water();
    for bad in ["(1,1,1)", "(1)", "-1", "00"] {
        let err = catalog.create_state(iso, vib(bad, 0.0)).unwrap_err();
        assert!(err.is_grammar_parse(), "{bad:?} should fail");
    }
    assert!(catalog.states_of(iso).is_empty());
    assert_eq!(catalog.isotopologue(iso).unwrap().vib_state_dim, 0);
}

#[test]
fn oversized_numbers_are_grammar_errors() {
    let mut catalog = Catalog::new();
    let err = catalog.create_molecule("H4294967295H", "hydrogen").unwrap_err();
    assert!(err.is_grammar_parse());
    assert!(catalog.molecule_by_formula("H4294967295H").is_none());

    let molecule = catalog.create_molecule("Ar", "argon").unwrap();
    let iso = catalog.create_isotopologue(molecule, "(40Ar)".into()).unwrap();
    let err = catalog
        .set_ground_el_state_str(iso, "4294967295[4294967295/2]_1")
        .unwrap_err();
    assert!(err.is_grammar_parse());
    assert!(catalog.isotopologue(iso).unwrap().ground_el_state_str.is_empty());

    catalog
        .set_ground_el_state_str(iso, "(4294967295/2,4294967295/2)_1")
        .unwrap();
    assert_eq!(
        catalog.isotopologue(iso).unwrap().ground_el_state_str,
        "(4294967295/2, 4294967295/2)_1"
    );
}

// =============================================================================
// Ground electronic state consistency
// =============================================================================

#[test]
fn electronic_label_needs_ground_state() {
    let (mut catalog, iso) = water();
    let err = catalog
        .create_state(iso, NewState::new(0.0, Lifetime::Infinite).with_el("X(1SIGMA+)"))
        .unwrap_err();
    assert!(err.is_configuration_order());
}

#[test]
fn resolved_isotopologue_needs_electronic_label() {
    let (mut catalog, iso) = carbon_monoxide();
    catalog.set_vib_quantum_labels(iso, "v").unwrap();
    let err = catalog
        .create_state(iso, NewState::new(0.0, Lifetime::Infinite).with_vib("0", ""))
        .unwrap_err();
    assert!(err.is_configuration_order());
}

#[test]
fn state_needs_a_label() {
    let (mut catalog, iso) = water();
    let err = catalog
        .create_state(iso, NewState::new(0.0, Lifetime::Infinite))
        .unwrap_err();
    assert!(err.is_configuration_order());
}

// =============================================================================
// Numeric domains
// =============================================================================

#[test]
fn lifetime_and_energy_domains() {
    let (mut catalog, iso) = water();
    let state = |energy: f64, lifetime: Lifetime| {
        NewState::new(energy, lifetime).with_vib("(0, 0, 0)", "(v1, v2, v3)")
    };
    for rejected in [
        state(0.0, Lifetime::Finite(-1.0)),
        state(0.0, Lifetime::Finite(f64::NAN)),
        state(f64::NAN, Lifetime::Infinite),
        state(f64::INFINITY, Lifetime::Infinite),
    ] {
        assert!(catalog.create_state(iso, rejected).unwrap_err().is_range());
    }

    let id = catalog
        .create_state(iso, state(-0.5, Lifetime::Finite(f64::INFINITY)))
        .unwrap();
    assert_eq!(catalog.state(id).unwrap().lifetime, Lifetime::Infinite);
}

#[test]
fn transition_domains() {
    let (mut catalog, iso) = water();
    let upper = catalog.create_state(iso, vib("(0, 1, 0)", 0.2)).unwrap();
    let lower = catalog.create_state(iso, vib("(0, 0, 0)", 0.0)).unwrap();

    assert!(
        catalog
            .create_transition(upper, upper, NewTransition::new(1.0))
            .unwrap_err()
            .is_range()
    );
    assert!(
        catalog
            .create_transition(upper, lower, NewTransition::new(1.0).with_branching_ratio(1.5))
            .unwrap_err()
            .is_range()
    );
    assert!(
        catalog
            .create_transition(upper, lower, NewTransition::new(-1.0))
            .unwrap_err()
            .is_range()
    );

    catalog
        .create_transition(upper, lower, NewTransition::new(1.0).with_branching_ratio(1.0))
        .unwrap();
    assert!(
        catalog
            .create_transition(upper, lower, NewTransition::new(2.0))
            .unwrap_err()
            .is_duplicate()
    );
}

#[test]
fn transitions_stay_within_an_isotopologue() {
    let (mut catalog, water_iso) = water();
    let molecule = catalog.create_molecule("CO", "").unwrap();
    let co_iso = catalog
        .create_isotopologue(molecule, "(12C)(16O)".into())
        .unwrap();
    let upper = catalog.create_state(water_iso, vib("(0, 0, 0)", 0.0)).unwrap();
    let lower = catalog
        .create_state(co_iso, NewState::new(0.0, Lifetime::Infinite).with_vib("0", "v"))
        .unwrap();
    let err = catalog
        .create_transition(upper, lower, NewTransition::new(1.0))
        .unwrap_err();
    assert!(err.is_configuration_order());
}

// =============================================================================
// Error context
// =============================================================================

#[test]
fn errors_name_the_operation() {
    let (mut catalog, iso) = water();
    let err = catalog
        .create_state(iso, NewState::new(0.0, Lifetime::Infinite))
        .unwrap_err();
    let context = err.context.unwrap();
    assert_eq!(context.operation, Some("create_state"));
    assert_eq!(context.entity, Some(iso.into()));
    assert!(matches!(err.kind, ErrorKind::ConfigurationOrder { .. }));
}

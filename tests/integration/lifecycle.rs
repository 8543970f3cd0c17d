//! Entity lifecycle across the whole graph
//!
//! Tests cascading deletes, administrative renames and atomicity.

use lida::engine::{Catalog, NewState, NewTransition};
use lida::foundation::{EntityRef, MoleculeId, StateId};
use lida::storage::{Lifetime, MemoryStore, Relation, Store};

fn co2_cation() -> (Catalog, MoleculeId, [StateId; 2]) {
    let mut catalog = Catalog::new();
    let molecule = catalog
        .create_molecule("CO2+", "carbon dioxide cation")
        .unwrap();
    let iso = catalog
        .create_isotopologue(molecule, "(12C)(16O)2+".into())
        .unwrap();
    catalog.set_ground_el_state_str(iso, "X(2PIg)").unwrap();
    let upper = catalog
        .create_state(
            iso,
            NewState::new(2.0, Lifetime::Finite(1.2e-7))
                .with_el("A(2PIu)")
                .with_vib("(0, 0, 0)", "(v1, v2, v3)"),
        )
        .unwrap();
    let lower = catalog
        .create_state(
            iso,
            NewState::new(0.0, Lifetime::Infinite)
                .with_el("X(2PIg)")
                .with_vib("(0, 0, 0)", ""),
        )
        .unwrap();
    catalog
        .create_transition(upper, lower, NewTransition::new(1.2e-7).with_branching_ratio(1.0))
        .unwrap();
    (catalog, molecule, [upper, lower])
}

fn row_counts(store: &MemoryStore) -> [usize; 4] {
    [
        store.molecules().len(),
        store.isotopologues().len(),
        store.states().len(),
        store.transitions().len(),
    ]
}

#[test]
fn molecule_delete_cascades() {
    let (mut catalog, molecule, _) = co2_cation();
    assert_eq!(row_counts(catalog.store()), [1, 1, 2, 1]);
    catalog.delete_molecule(molecule).unwrap();
    assert_eq!(row_counts(catalog.store()), [0, 0, 0, 0]);
    assert!(catalog.molecule(molecule).unwrap_err().is_not_found());
}

#[test]
fn ids_are_not_reused() {
    let (mut catalog, molecule, _) = co2_cation();
    catalog.delete_molecule(molecule).unwrap();
    let again = catalog.create_molecule("CO2+", "").unwrap();
    assert_ne!(again, molecule);
}

#[test]
fn state_display_uses_canonical_labels() {
    let (catalog, _, [upper, _]) = co2_cation();
    assert_eq!(
        catalog.display(upper.into()).unwrap(),
        "CO2+ A(2Πu);v=(0,0,0)"
    );
    let state = catalog.state(upper).unwrap();
    assert_eq!(state.vib_state_html, "<b><i>v</i></b>=<b>0</b>");
    assert_eq!(state.vib_state_html_notags, "v=0");
}

#[test]
fn rename_rejects_a_taken_formula() {
    let (mut catalog, molecule, _) = co2_cation();
    catalog.create_molecule("CO2", "carbon dioxide").unwrap();
    let err = catalog.update_molecule_formula(molecule, "CO2").unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(catalog.molecule(molecule).unwrap().formula, "CO2+");
}

#[test]
fn rename_rejects_too_few_modes() {
    let (mut catalog, molecule, _) = co2_cation();
    let err = catalog.update_molecule_formula(molecule, "CO+").unwrap_err();
    assert!(err.is_dimension_mismatch());
    assert_eq!(catalog.molecule(molecule).unwrap().formula, "CO2+");
}

#[test]
fn missing_entities_render_as_errors() {
    let catalog = Catalog::new();
    let err = catalog
        .display(EntityRef::State(StateId::new(3)))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn failed_operation_closes_its_savepoint() {
    let (mut catalog, molecule, _) = co2_cation();
    catalog.create_molecule("CO2+", "").unwrap_err();
    catalog.delete_molecule(MoleculeId::new(99)).unwrap_err();
    assert_eq!(catalog.store().open_savepoints(), 0);
    assert!(catalog.molecule(molecule).is_ok());
}

//! Integration tests for relations
//!
//! Tests insert, lookup, patch, delete and natural-key enforcement.

use lida_foundation::{IsotopologueId, MoleculeId, StateId};
use lida_storage::{
    IsotopologueKey, IsotopologueRecord, Lifetime, MemoryStore, MoleculeKey, MoleculeRecord,
    Relation, StateKey, StateRecord, Store, TransitionKey, TransitionRecord,
};

fn store_with_molecule(formula: &str) -> (MemoryStore, MoleculeId) {
    let mut store = MemoryStore::new();
    let id = store
        .molecules_mut()
        .insert(MoleculeRecord::new(formula, ""))
        .unwrap();
    (store, id)
}

// =============================================================================
// Molecules
// =============================================================================

#[test]
fn ids_start_at_one() {
    let (_, id) = store_with_molecule("CO");
    assert_eq!(id.get(), 1);
}

#[test]
fn find_by_natural_key() {
    let (store, id) = store_with_molecule("CO");
    let found = store
        .molecules()
        .find(&MoleculeKey("CO".to_string()))
        .unwrap();
    assert_eq!(found.id, id);
    assert!(store.molecules().find(&MoleculeKey("CO2".to_string())).is_none());
}

#[test]
fn update_moves_natural_key() {
    let (mut store, id) = store_with_molecule("CO");
    let mut record = store.molecules().get(id).unwrap();
    record.formula = "CO+".to_string();
    store.molecules_mut().update(record).unwrap();
    assert!(store.molecules().find(&MoleculeKey("CO".to_string())).is_none());
    assert!(store.molecules().find(&MoleculeKey("CO+".to_string())).is_some());
}

#[test]
fn update_cannot_steal_a_key() {
    let (mut store, _) = store_with_molecule("CO");
    let other = store
        .molecules_mut()
        .insert(MoleculeRecord::new("CO2", ""))
        .unwrap();
    let mut record = store.molecules().get(other).unwrap();
    record.formula = "CO".to_string();
    assert!(store.molecules_mut().update(record).unwrap_err().is_duplicate());
}

#[test]
fn patch_writes_one_field() {
    let (mut store, id) = store_with_molecule("CO");
    store
        .molecules_mut()
        .patch(id, &mut |m| m.name = "carbon monoxide".to_string())
        .unwrap();
    let record = store.molecules().get(id).unwrap();
    assert_eq!(record.name, "carbon monoxide");
    assert_eq!(record.formula, "CO");
}

#[test]
fn missing_rows_are_not_found() {
    let mut store = MemoryStore::new();
    let missing = MoleculeId::new(7);
    assert!(store.molecules().get(missing).is_none());
    assert!(store.molecules_mut().delete(missing).unwrap_err().is_not_found());
    assert!(
        store
            .molecules_mut()
            .patch(missing, &mut |_| {})
            .unwrap_err()
            .is_not_found()
    );
}

// =============================================================================
// Isotopologues, states and transitions
// =============================================================================

#[test]
fn isotopologue_has_two_keys() {
    let (mut store, molecule) = store_with_molecule("CO");
    let iso = store
        .isotopologues_mut()
        .insert(IsotopologueRecord::new(molecule, "(12C)(16O)"))
        .unwrap();
    let by_formula = IsotopologueKey::IsoFormula("(12C)(16O)".to_string());
    assert_eq!(store.isotopologues().find(&by_formula).unwrap().id, iso);
    assert_eq!(
        store
            .isotopologues()
            .find(&IsotopologueKey::Molecule(molecule))
            .unwrap()
            .id,
        iso
    );

    let err = store
        .isotopologues_mut()
        .insert(IsotopologueRecord::new(molecule, "(13C)(16O)"))
        .unwrap_err();
    assert!(err.is_duplicate());
}

#[test]
fn states_keyed_by_labels() {
    let mut store = MemoryStore::new();
    let iso = IsotopologueId::new(1);
    let states = store.states_mut();
    states
        .insert(StateRecord::new(iso, "X(1Σ+)", "0", 0.0, Lifetime::Infinite))
        .unwrap();
    states
        .insert(StateRecord::new(iso, "X(1Σ+)", "1", 0.26, Lifetime::Finite(0.03)))
        .unwrap();
    let err = states
        .insert(StateRecord::new(iso, "X(1Σ+)", "1", 0.3, Lifetime::Finite(0.03)))
        .unwrap_err();
    assert!(err.is_duplicate());

    let key = StateKey {
        isotopologue: iso,
        el_state_str: "X(1Σ+)".to_string(),
        vib_state_str: "1".to_string(),
    };
    assert!((store.states().find(&key).unwrap().energy - 0.26).abs() < 1e-12);
}

#[test]
fn count_and_filter() {
    let mut store = MemoryStore::new();
    let iso = IsotopologueId::new(1);
    for (i, (initial, final_state)) in [(2, 1), (3, 1), (3, 2)].into_iter().enumerate() {
        store
            .transitions_mut()
            .insert(TransitionRecord::new(
                iso,
                StateId::new(initial),
                StateId::new(final_state),
                1.0 + f64::from(u32::try_from(i).unwrap()),
                None,
            ))
            .unwrap();
    }
    let into_ground = |t: &TransitionRecord| t.final_state == StateId::new(1);
    assert_eq!(store.transitions().count(&into_ground), 2);
    assert_eq!(store.transitions().filter(&into_ground).len(), 2);
    assert_eq!(store.transitions().len(), 3);

    let key = TransitionKey {
        initial_state: StateId::new(3),
        final_state: StateId::new(2),
    };
    assert!(store.transitions().find(&key).is_some());
}

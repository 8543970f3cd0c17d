//! Integration tests for the sync engine
//!
//! Tests selections, dry syncs, repair passes and configuration.

use lida_engine::{
    Catalog, EngineConfig, NewState, NewTransition, Selection, StateUpdate, VibrationalModes,
};
use lida_foundation::{AttrValue, EntityRef, ErrorKind, IsotopologueId, StateId};
use lida_storage::{IsotopologueRecord, Lifetime, Relation, StateRecord, Store};

fn water_with_state(config: EngineConfig) -> (Catalog, IsotopologueId, StateId) {
    let mut catalog = Catalog::with_config(config);
    let molecule = catalog.create_molecule("H2O", "water").unwrap();
    let iso = catalog
        .create_isotopologue(molecule, "(1H)2(16O)".into())
        .unwrap();
    let state = catalog
        .create_state(
            iso,
            NewState::new(0.2, Lifetime::Finite(1.0)).with_vib("(0, 1, 0)", "(v1, v2, v3)"),
        )
        .unwrap();
    (catalog, iso, state)
}

// =============================================================================
// Selections
// =============================================================================

#[test]
fn fresh_records_are_in_sync() {
    let (catalog, _, state) = water_with_state(EngineConfig::default());
    let mut record = catalog.state(state).unwrap();
    assert!(catalog.sync(&mut record, &Selection::All).unwrap().is_empty());
}

#[test]
fn dry_sync_writes_nothing() {
    let (mut catalog, _, state) = water_with_state(EngineConfig::default());
    catalog
        .store_mut()
        .states_mut()
        .patch(state, &mut |s| s.vib_state_html = String::new())
        .unwrap();

    let mut record = catalog.state(state).unwrap();
    let changes = catalog.sync(&mut record, &Selection::All).unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].attribute, "vib_state_html");
    assert_eq!(
        changes[0].new,
        AttrValue::from("<b><i>v</i></b>=(0, 1, 0)")
    );
    assert_eq!(record.vib_state_html, "<b><i>v</i></b>=(0, 1, 0)");
    assert_eq!(catalog.state(state).unwrap().vib_state_html, "");
}

#[test]
fn excluded_attributes_are_skipped() {
    let (mut catalog, _, state) = water_with_state(EngineConfig::default());
    catalog
        .store_mut()
        .states_mut()
        .patch(state, &mut |s| s.vib_state_html = String::new())
        .unwrap();

    let mut record = catalog.state(state).unwrap();
    let skip = Selection::skip(["vib_state_html"]);
    assert!(catalog.sync(&mut record, &skip).unwrap().is_empty());
}

#[test]
fn unknown_attribute_is_rejected() {
    let (catalog, _, state) = water_with_state(EngineConfig::default());
    let mut record = catalog.state(state).unwrap();
    let err = catalog
        .sync(&mut record, &Selection::only(["energy"]))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownAttribute { .. }));
}

#[test]
fn sync_and_commit_persists_selection() {
    let (mut catalog, iso, _) = water_with_state(EngineConfig::default());
    catalog
        .store_mut()
        .isotopologues_mut()
        .patch(iso, &mut |i| {
            i.html = String::new();
            i.number_states = 0;
        })
        .unwrap();

    let counts = Selection::only(["number_states"]);
    let changes = catalog
        .sync_and_commit::<IsotopologueRecord>(iso, &counts)
        .unwrap();
    assert_eq!(changes.len(), 1);
    let record = catalog.isotopologue(iso).unwrap();
    assert_eq!(record.number_states, 1);
    assert_eq!(record.html, "");
}

// =============================================================================
// Repair
// =============================================================================

#[test]
fn resync_all_repairs_bypassed_writes() {
    let (mut catalog, iso, state) = water_with_state(EngineConfig::default());
    let extra = catalog
        .store_mut()
        .states_mut()
        .insert(StateRecord::new(iso, "", "(0, 0, 0)", 0.0, Lifetime::Infinite))
        .unwrap();
    assert_eq!(catalog.isotopologue(iso).unwrap().number_states, 1);

    let report = catalog.resync_all().unwrap();
    let touched: Vec<EntityRef> = report.iter().map(|(entity, _)| *entity).collect();
    assert_eq!(touched, [EntityRef::from(iso), EntityRef::from(extra)]);
    assert_eq!(catalog.isotopologue(iso).unwrap().number_states, 2);
    assert_eq!(catalog.state(extra).unwrap().vib_state_sort_key, "(00, 00, 00)");
    assert_eq!(catalog.state(state).unwrap().vib_state_sort_key, "(00, 01, 00)");

    assert!(catalog.resync_all().unwrap().is_empty());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn sort_key_width_is_configurable() {
    let config = EngineConfig::default().with_sort_key_width(3);
    let (catalog, _, state) = water_with_state(config);
    let record = catalog.state(state).unwrap();
    assert_eq!(record.vib_state_sort_key, "(000, 001, 000)");
    assert_eq!(record.state_sort_key, "(000, 001, 000)");
}

#[test]
fn linear_molecules_get_an_extra_mode() {
    let setup = |modes: VibrationalModes| {
        let config = EngineConfig::default().with_vibrational_modes(modes);
        let mut catalog = Catalog::with_config(config);
        let molecule = catalog.create_molecule("CO2", "carbon dioxide").unwrap();
        let iso = catalog
            .create_isotopologue(molecule, "(12C)(16O)2".into())
            .unwrap();
        catalog.set_vib_quantum_labels(iso, "(v1, v2, l2, v3)")
    };
    assert!(setup(VibrationalModes::NonLinear).unwrap_err().is_dimension_mismatch());
    assert!(setup(VibrationalModes::Linear).is_ok());
    assert!(setup(VibrationalModes::Unbounded).is_ok());
}

#[test]
fn strict_config_accepts_sanctioned_operations() {
    let (mut catalog, iso, state) = water_with_state(EngineConfig::strict());
    let ground = catalog
        .create_state(
            iso,
            NewState::new(0.0, Lifetime::Infinite).with_vib("(0, 0, 0)", ""),
        )
        .unwrap();
    catalog
        .create_transition(state, ground, NewTransition::new(1.0))
        .unwrap();
    catalog
        .update_state(ground, StateUpdate::default().energy(-0.1))
        .unwrap();
    catalog.delete_state(ground).unwrap();
    assert_eq!(catalog.isotopologue(iso).unwrap().number_states, 1);
}

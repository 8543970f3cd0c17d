//! Integration tests for vibrational labels
//!
//! Tests strict parsing, markup, sort keys and quantum-label descriptors.

use lida_notation::{
    DEFAULT_SORT_KEY_WIDTH, QuantumLabels, VibrationalLabel, parse_quantum_labels,
    parse_vibrational, sort_key,
};

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn scalar_round_trip() {
    let label = VibrationalLabel::parse("5").unwrap();
    assert_eq!(label.quanta(), &[5]);
    assert_eq!(label.canonical(), "5");
    assert_eq!(label.html(), "<i>v</i>=5");
}

#[test]
fn vector_parse() {
    let (quanta, html, html_alt) = parse_vibrational("(1, 0, 2)").unwrap();
    assert_eq!(quanta, vec![1, 0, 2]);
    assert_eq!(html, "<b><i>v</i></b>=(1, 0, 2)");
    assert_eq!(html_alt, "<i>v</i><sub>1</sub>+2<i>v</i><sub>3</sub>");
}

#[test]
fn malformed_labels_rejected() {
    for bad in ["(1,1,1)", "(1)", "-1", "00", "(1, 1", "1.5", "(1,  2)"] {
        let err = VibrationalLabel::parse(bad).unwrap_err();
        assert!(err.is_grammar_parse(), "{bad:?} should fail");
    }
}

#[test]
fn empty_label_is_unresolved() {
    let label = VibrationalLabel::parse("").unwrap();
    assert!(label.is_empty());
    assert_eq!(label.dimension(), 0);
    assert_eq!(label.html(), "");
    assert_eq!(label.sort_key(DEFAULT_SORT_KEY_WIDTH), "");
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn vector_ground_renders_bold_zero() {
    let label = VibrationalLabel::parse("(0, 0, 0)").unwrap();
    assert_eq!(label.html(), "<b><i>v</i></b>=<b>0</b>");
    assert_eq!(label.html_alt(), "<b>0</b>");
}

#[test]
fn additive_form_skips_zero_modes() {
    let label = VibrationalLabel::parse("(0, 1, 0, 3)").unwrap();
    assert_eq!(label.html_alt(), "<i>v</i><sub>2</sub>+3<i>v</i><sub>4</sub>");
}

// =============================================================================
// Sort keys
// =============================================================================

#[test]
fn sort_keys_order_numerically() {
    let mut labels = vec!["(1, 10)", "(1, 2)", "(0, 11)", "(10, 0)"];
    labels.sort_by_key(|l| sort_key(l, 2).unwrap());
    assert_eq!(labels, ["(0, 11)", "(1, 2)", "(1, 10)", "(10, 0)"]);
}

#[test]
fn scalar_sort_key_is_parenthesised() {
    assert_eq!(sort_key("5", 2).unwrap(), "(05)");
    assert_eq!(sort_key("5", 3).unwrap(), "(005)");
}

// =============================================================================
// Quantum labels
// =============================================================================

#[test]
fn descriptor_dimensions() {
    assert_eq!(QuantumLabels::parse("").unwrap().dimension(), 0);
    assert_eq!(QuantumLabels::parse("v").unwrap().dimension(), 1);
    assert_eq!(parse_quantum_labels("(v1, v2, v3)").unwrap().dimension(), 3);
}

#[test]
fn descriptor_markup() {
    let labels = parse_quantum_labels("(v1, v2, v3)").unwrap();
    assert_eq!(
        labels.html(),
        "(<i>v</i><sub>1</sub>, <i>v</i><sub>2</sub>, <i>v</i><sub>3</sub>)"
    );
}

#[test]
fn malformed_descriptors_rejected() {
    for bad in ["(v1)", "(v1,v2)", "1v", "(v1, v1)"] {
        assert!(QuantumLabels::parse(bad).is_err(), "{bad:?} should fail");
    }
}

// =============================================================================
// Properties
// =============================================================================

mod properties {
    use lida_notation::VibrationalLabel;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sort_key_order_matches_quanta_order(
            a in prop::collection::vec(0u32..100, 3),
            b in prop::collection::vec(0u32..100, 3),
        ) {
            let key_a = VibrationalLabel::from_quanta(&a).sort_key(2);
            let key_b = VibrationalLabel::from_quanta(&b).sort_key(2);
            prop_assert_eq!(key_a.cmp(&key_b), a.cmp(&b));
        }

        #[test]
        fn rendered_labels_parse_back(quanta in prop::collection::vec(0u32..1000, 2..6)) {
            let canonical = VibrationalLabel::from_quanta(&quanta).canonical();
            let parsed = VibrationalLabel::parse(&canonical).unwrap();
            prop_assert_eq!(parsed.quanta(), quanta.as_slice());
        }
    }
}

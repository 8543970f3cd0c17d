//! Integration tests for electronic labels
//!
//! Tests notation dispatch, canonical forms and markup across sub-grammars.

use lida_notation::{ElectronicLabel, Notation, canonicalize_electronic, strip_markup};

fn canonical(input: &str) -> String {
    ElectronicLabel::parse(input).unwrap().canonical().to_string()
}

// =============================================================================
// Canonicalization
// =============================================================================

#[test]
fn ascii_and_greek_spellings_agree() {
    assert_eq!(canonical("1SIGMA-"), "1Σ-");
    assert_eq!(canonical("1Σ-"), "1Σ-");
    assert_eq!(canonical("X(2PI)"), "X(2Π)");
    assert_eq!(canonical("a(3DELTA)"), "a(3Δ)");
}

#[test]
fn canonical_forms_are_fixed_points() {
    for input in [
        "X(2PI)",
        "A(3SIGMA+g)",
        "2PI_3/2",
        "2P_3/2",
        "3Po_2",
        "(3/2, 1/2)_2",
        "2[3/2]o_1",
        "1s2 2s2 2p6",
        "[Ne] 3s2 3p1",
    ] {
        let once = canonical(input);
        assert_eq!(canonical(&once), once, "{input:?}");
    }
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(canonical("  X(1SIGMA+) "), "X(1Σ+)");
}

#[test]
fn empty_label_is_unresolved() {
    let label = ElectronicLabel::parse("").unwrap();
    assert!(label.is_empty());
    assert_eq!(label.notation(), None);
    assert_eq!(label.html(), "");
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn each_notation_is_recognized() {
    let cases = [
        ("X(2PI)", Notation::MolecularTerm),
        ("2P_3/2", Notation::AtomicTerm),
        ("(3/2, 1/2)_2", Notation::JjCoupling),
        ("2[3/2]o_1", Notation::RacahCoupling),
        ("[Ne].3s2.3p", Notation::Configuration),
    ];
    for (input, notation) in cases {
        let label = ElectronicLabel::parse(input).unwrap();
        assert_eq!(label.notation(), Some(notation), "{input:?}");
    }
}

#[test]
fn unrecognized_labels_are_grammar_errors() {
    for bad in ["hello", "v=0", "X(2PI", "2P_5/2"] {
        let err = ElectronicLabel::parse(bad).unwrap_err();
        assert!(err.is_grammar_parse(), "{bad:?} should fail");
    }
}

// =============================================================================
// Markup
// =============================================================================

#[test]
fn molecular_markup() {
    let (_, html) = canonicalize_electronic("X(2PI)").unwrap();
    assert_eq!(html, "X<sup>2</sup>Π");
    let (_, html) = canonicalize_electronic("1SIGMA-").unwrap();
    assert_eq!(html, "<sup>1</sup>Σ<sup>-</sup>");
}

#[test]
fn atomic_markup() {
    let (_, html) = canonicalize_electronic("2P_3/2").unwrap();
    assert_eq!(html, "<sup>2</sup>P<sub>3/2</sub>");
}

#[test]
fn stripped_markup_is_search_text() {
    let (canonical, html) = canonicalize_electronic("1SIGMA-").unwrap();
    assert_eq!(strip_markup(&html), canonical);
}

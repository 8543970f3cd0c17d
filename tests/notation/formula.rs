//! Integration tests for chemical formulas
//!
//! Tests canonical forms, markup, slugs and masses.

use lida_notation::Formula;

#[test]
fn molecule_formula() {
    let formula = Formula::parse("CO2+").unwrap();
    assert_eq!(formula.canonical(), "CO2+");
    assert_eq!(formula.html(), "CO<sub>2</sub><sup>+</sup>");
    assert_eq!(formula.slug(), "CO2_p");
    assert_eq!(formula.charge(), 1);
    assert_eq!(formula.number_atoms(), 3);
}

#[test]
fn isotopic_formula() {
    let formula = Formula::parse("(1H)2(16O)+").unwrap();
    assert_eq!(formula.html(), "<sup>1</sup>H<sub>2</sub><sup>16</sup>O<sup>+</sup>");
    assert_eq!(formula.slug(), "1H2-16O_p");
    assert!(formula.has_isotopes());
}

#[test]
fn canonical_check() {
    assert!(Formula::is_canonical("H2O"));
    assert!(!Formula::is_canonical("H2O1"));
    assert!(!Formula::is_canonical("CO2+1"));
    assert_eq!(Formula::parse("C1O2").unwrap().canonical(), "CO2");
}

#[test]
fn unknown_element_rejected() {
    assert!(Formula::parse("Xx2").unwrap_err().is_grammar_parse());
}

#[test]
fn isotopic_mass() {
    let mass = Formula::parse("(12C)(16O)").unwrap().mass().unwrap();
    assert!((mass - 27.994_914_619_56).abs() < 1e-9);
}

#[test]
fn untabulated_isotope_has_no_mass() {
    let formula = Formula::parse("(99C)").unwrap();
    assert!(formula.mass().unwrap_err().is_grammar_parse());
}

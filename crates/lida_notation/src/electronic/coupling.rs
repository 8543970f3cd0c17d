//! Coupling notations: jj terms `(j1, j2)_J` and Racah terms `2s+1[K]o_J`.

use lida_foundation::Result;

use super::{ElectronicLabel, Notation, TermParser, couples};

pub(super) fn matches_jj(input: &str) -> bool {
    input.starts_with('(')
}

/// Digits immediately followed by `[`.
pub(super) fn matches_racah(input: &str) -> bool {
    let rest = input.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.len() < input.len() && rest.starts_with('[')
}

pub(super) fn parse_jj(input: &str) -> Result<ElectronicLabel> {
    let mut p = TermParser::new(input, Notation::JjCoupling);

    p.expect('(')?;
    let j1 = p.half_int("j1")?;
    p.expect(',')?;
    p.cursor.eat(' ');
    let j2 = p.half_int("j2")?;
    p.expect(')')?;
    let j = if p.cursor.eat('_') {
        Some(p.half_int("J")?)
    } else {
        None
    };
    p.expect_end()?;

    let pair = format!("({j1}, {j2})");
    match j {
        Some(j) => {
            if !couples(j1.twice(), j2.twice(), j.twice()) {
                return Err(p.invalid(format!("J={j} is not reachable from j1={j1}, j2={j2}")));
            }
            Ok(ElectronicLabel::new(
                format!("{pair}_{j}"),
                format!("{pair}<sub>{j}</sub>"),
                Notation::JjCoupling,
            ))
        }
        None => Ok(ElectronicLabel::new(pair.clone(), pair, Notation::JjCoupling)),
    }
}

pub(super) fn parse_racah(input: &str) -> Result<ElectronicLabel> {
    let mut p = TermParser::new(input, Notation::RacahCoupling);

    let multiplicity = p.positive("multiplicity")?;
    p.expect('[')?;
    let k = p.half_int("K")?;
    p.expect(']')?;
    let odd = p.cursor.eat('o');
    let j = if p.cursor.eat('_') {
        Some(p.half_int("J")?)
    } else {
        None
    };
    p.expect_end()?;

    let parity = if odd { "o" } else { "" };
    let parity_html = if odd { "<sup>o</sup>" } else { "" };
    let core = format!("{multiplicity}[{k}]{parity}");
    let core_html = format!("<sup>{multiplicity}</sup>[{k}]{parity_html}");
    match j {
        Some(j) => {
            if !couples(k.twice(), multiplicity - 1, j.twice()) {
                return Err(p.invalid(format!(
                    "J={j} is not reachable from K={k} with multiplicity {multiplicity}"
                )));
            }
            Ok(ElectronicLabel::new(
                format!("{core}_{j}"),
                format!("{core_html}<sub>{j}</sub>"),
                Notation::RacahCoupling,
            ))
        }
        None => Ok(ElectronicLabel::new(core, core_html, Notation::RacahCoupling)),
    }
}

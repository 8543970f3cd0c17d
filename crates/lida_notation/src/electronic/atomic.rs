//! Atomic LS-coupling term symbols: `2P_3/2`, `3Po_2`, `1S`.

use lida_foundation::Result;

use super::{ElectronicLabel, Notation, TermParser, couples};

/// Orbital angular momentum letters, indexed by L. `J` is skipped.
const L_LETTERS: [char; 16] = [
    'S', 'P', 'D', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'O', 'Q', 'R', 'T', 'U',
];

fn orbital(c: char) -> Option<u32> {
    L_LETTERS
        .iter()
        .position(|&l| l == c)
        .and_then(|l| u32::try_from(l).ok())
}

/// Digits followed by an L letter.
pub(super) fn matches(input: &str) -> bool {
    let rest = input.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.len() < input.len() && rest.chars().next().and_then(orbital).is_some()
}

pub(super) fn parse(input: &str) -> Result<ElectronicLabel> {
    let mut p = TermParser::new(input, Notation::AtomicTerm);

    let multiplicity = p.positive("multiplicity")?;
    let Some((letter, l)) = p.cursor.bump().and_then(|c| Some((c, orbital(c)?))) else {
        return Err(p.error("expected an orbital angular momentum letter"));
    };
    let odd = p.cursor.eat('o');
    let j = p.optional_j("J")?;
    p.expect_end()?;

    if let Some(j) = j {
        let twice_s = multiplicity - 1;
        if !couples(2 * l, twice_s, j.twice()) {
            return Err(p.invalid(format!(
                "J={j} is not reachable from L={l} with multiplicity {multiplicity}"
            )));
        }
    }

    let parity = if odd { "o" } else { "" };
    let (canonical, html) = match j {
        Some(j) => (
            format!("{multiplicity}{letter}{parity}_{j}"),
            format!("<sup>{multiplicity}</sup>{letter}{}<sub>{j}</sub>", parity_html(odd)),
        ),
        None => (
            format!("{multiplicity}{letter}{parity}"),
            format!("<sup>{multiplicity}</sup>{letter}{}", parity_html(odd)),
        ),
    };
    Ok(ElectronicLabel::new(canonical, html, Notation::AtomicTerm))
}

fn parity_html(odd: bool) -> &'static str {
    if odd { "<sup>o</sup>" } else { "" }
}

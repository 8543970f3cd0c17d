//! Electron configurations: `1s2.2s2.2p6`, `[Ne].3s2.3p`.

use lida_foundation::Result;

use super::{ElectronicLabel, Notation, TermParser};
use crate::cursor::canonical_uint;

/// Subshell letters indexed by l. `j` is skipped.
const SUBSHELLS: [char; 8] = ['s', 'p', 'd', 'f', 'g', 'h', 'i', 'k'];

/// Noble-gas cores and the `(n, l)` subshells each one closes.
const CORES: [(&str, &[(u32, u32)]); 6] = [
    ("He", &[(1, 0)]),
    ("Ne", &[(1, 0), (2, 0), (2, 1)]),
    ("Ar", &[(1, 0), (2, 0), (2, 1), (3, 0), (3, 1)]),
    (
        "Kr",
        &[(1, 0), (2, 0), (2, 1), (3, 0), (3, 1), (3, 2), (4, 0), (4, 1)],
    ),
    (
        "Xe",
        &[
            (1, 0), (2, 0), (2, 1), (3, 0), (3, 1), (3, 2), (4, 0), (4, 1),
            (4, 2), (5, 0), (5, 1),
        ],
    ),
    (
        "Rn",
        &[
            (1, 0), (2, 0), (2, 1), (3, 0), (3, 1), (3, 2), (4, 0), (4, 1),
            (4, 2), (5, 0), (5, 1), (4, 3), (5, 2), (6, 0), (6, 1),
        ],
    ),
];

fn azimuthal(c: char) -> Option<u32> {
    SUBSHELLS
        .iter()
        .position(|&s| s == c)
        .and_then(|l| u32::try_from(l).ok())
}

/// A noble-gas core, or digits followed by a subshell letter.
pub(super) fn matches(input: &str) -> bool {
    if input.starts_with('[') {
        return true;
    }
    let rest = input.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.len() < input.len() && rest.chars().next().and_then(azimuthal).is_some()
}

struct Subshell {
    n: u32,
    l: u32,
    occupancy: u32,
}

impl Subshell {
    fn letter(&self) -> char {
        usize::try_from(self.l)
            .ok()
            .and_then(|l| SUBSHELLS.get(l).copied())
            .unwrap_or('?')
    }

    fn canonical(&self) -> String {
        if self.occupancy == 1 {
            format!("{}{}", self.n, self.letter())
        } else {
            format!("{}{}{}", self.n, self.letter(), self.occupancy)
        }
    }

    fn html(&self) -> String {
        if self.occupancy == 1 {
            format!("{}{}", self.n, self.letter())
        } else {
            format!("{}{}<sup>{}</sup>", self.n, self.letter(), self.occupancy)
        }
    }
}

pub(super) fn parse(input: &str) -> Result<ElectronicLabel> {
    let mut p = TermParser::new(input, Notation::Configuration);

    let mut core: Option<(&str, &[(u32, u32)])> = None;
    if p.cursor.eat('[') {
        let symbol = p.cursor.take_while(|c| c.is_ascii_alphabetic());
        let Some(&found) = CORES.iter().find(|(name, _)| *name == symbol) else {
            return Err(p.error(format!("{symbol:?} is not a noble-gas core")));
        };
        p.expect(']')?;
        core = Some(found);
        if !p.cursor.is_eof() && !(p.cursor.eat('.') || p.cursor.eat(' ')) {
            return Err(p.error("expected '.' after the core"));
        }
        if p.cursor.is_eof() && input.len() > found.0.len() + 2 {
            return Err(p.error("expected a subshell"));
        }
    }

    let mut subshells: Vec<Subshell> = Vec::new();
    while !p.cursor.is_eof() || (core.is_none() && subshells.is_empty()) {
        if !subshells.is_empty() && !(p.cursor.eat('.') || p.cursor.eat(' ')) {
            return Err(p.error("expected '.' between subshells"));
        }
        let subshell = subshell(&mut p)?;

        if subshell.l >= subshell.n {
            return Err(p.invalid(format!(
                "subshell {}{} needs n > l",
                subshell.n,
                subshell.letter()
            )));
        }
        let capacity = 2 * (2 * subshell.l + 1);
        if subshell.occupancy > capacity {
            return Err(p.invalid(format!(
                "subshell {}{} holds at most {capacity} electrons",
                subshell.n,
                subshell.letter()
            )));
        }
        let key = (subshell.n, subshell.l);
        if subshells.iter().any(|s| (s.n, s.l) == key) {
            return Err(p.invalid(format!(
                "subshell {}{} repeated",
                subshell.n,
                subshell.letter()
            )));
        }
        if let Some((name, closed)) = core {
            if closed.contains(&key) {
                return Err(p.invalid(format!(
                    "subshell {}{} is already closed in [{name}]",
                    subshell.n,
                    subshell.letter()
                )));
            }
        }
        subshells.push(subshell);
    }

    let core_text = core.map(|(name, _)| format!("[{name}]")).unwrap_or_default();
    let shells: Vec<String> = subshells.iter().map(Subshell::canonical).collect();
    let canonical = match (core_text.is_empty(), shells.is_empty()) {
        (_, true) => core_text.clone(),
        (true, false) => shells.join("."),
        (false, false) => format!("{core_text}.{}", shells.join(".")),
    };
    let html: String = std::iter::once(core_text)
        .chain(subshells.iter().map(Subshell::html))
        .collect();
    Ok(ElectronicLabel::new(canonical, html, Notation::Configuration))
}

fn subshell(p: &mut TermParser<'_>) -> Result<Subshell> {
    let n = p.positive("principal quantum number")?;
    let Some(l) = p.cursor.bump().and_then(azimuthal) else {
        return Err(p.error("expected a subshell letter"));
    };
    let digits = p.cursor.digits();
    let occupancy = if digits.is_empty() {
        1
    } else {
        match canonical_uint(digits) {
            Some(k) if k > 0 => k,
            _ => return Err(p.error(format!("bad occupancy {digits:?}"))),
        }
    };
    Ok(Subshell { n, l, occupancy })
}

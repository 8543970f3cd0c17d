//! Electronic state labels.
//!
//! Several notations are in use for electronic states. Each one is a small
//! grammar with a cheap syntactic fingerprint; [`ElectronicLabel::parse`] tries
//! the fingerprints in a fixed order and parses the input with the first
//! grammar that claims it:
//!
//! 1. molecular term symbols: `X(2Π)`, `1SIGMA-`, `A(3Σ+g)`, `2Π_3/2`
//! 2. atomic term symbols: `2P_3/2`, `3Po_2`, `1S`
//! 3. coupling notations: `(3/2, 1/2)_2` (jj) and `2[3/2]o_1` (Racah)
//! 4. configurations: `1s2.2s2.2p6`, `[Ne].3s2.3p`
//!
//! The fingerprints overlap at the edges and the order is what resolves
//! them. A parse failure under the chosen grammar is reported as is; the
//! next grammar is never tried.

mod atomic;
mod configuration;
mod coupling;
mod molecular;

use std::fmt;

use lida_foundation::{Error, Result};

use crate::cursor::{Cursor, canonical_uint};

/// The notation an electronic label was written in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Molecular term symbol (`X(2Π)`).
    MolecularTerm,
    /// Atomic LS-coupling term symbol (`2P_3/2`).
    AtomicTerm,
    /// jj-coupling term (`(3/2, 1/2)_2`).
    JjCoupling,
    /// Racah (jK-coupling) term (`2[3/2]o_1`).
    RacahCoupling,
    /// Electron configuration (`[Ne].3s2.3p`).
    Configuration,
}

impl Notation {
    /// Returns the grammar name used in parse errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MolecularTerm => "molecular term symbol",
            Self::AtomicTerm => "atomic term symbol",
            Self::JjCoupling => "jj coupling",
            Self::RacahCoupling => "Racah coupling",
            Self::Configuration => "electron configuration",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct Grammar {
    notation: Notation,
    matches: fn(&str) -> bool,
    parse: fn(&str) -> Result<ElectronicLabel>,
}

/// Grammars in dispatch order.
const GRAMMARS: [Grammar; 5] = [
    Grammar {
        notation: Notation::MolecularTerm,
        matches: molecular::matches,
        parse: molecular::parse,
    },
    Grammar {
        notation: Notation::AtomicTerm,
        matches: atomic::matches,
        parse: atomic::parse,
    },
    Grammar {
        notation: Notation::JjCoupling,
        matches: coupling::matches_jj,
        parse: coupling::parse_jj,
    },
    Grammar {
        notation: Notation::RacahCoupling,
        matches: coupling::matches_racah,
        parse: coupling::parse_racah,
    },
    Grammar {
        notation: Notation::Configuration,
        matches: configuration::matches,
        parse: configuration::parse,
    },
];

/// Returns the notation whose fingerprint claims `input`, if any.
#[must_use]
pub fn detect_notation(input: &str) -> Option<Notation> {
    let input = input.trim();
    GRAMMARS
        .iter()
        .find(|g| (g.matches)(input))
        .map(|g| g.notation)
}

// =============================================================================
// ElectronicLabel
// =============================================================================

/// A canonicalized electronic label and its HTML rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ElectronicLabel {
    canonical: String,
    html: String,
    notation: Option<Notation>,
}

impl ElectronicLabel {
    /// Parses and canonicalizes an electronic label.
    ///
    /// Surrounding whitespace is ignored and the empty string is the
    /// "not resolved" label.
    ///
    /// # Errors
    ///
    /// Returns a grammar parse error if no notation recognizes the input, or
    /// if the recognizing notation rejects it.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        match GRAMMARS.iter().find(|g| (g.matches)(trimmed)) {
            Some(grammar) => (grammar.parse)(trimmed),
            None => Err(Error::grammar(
                "electronic",
                input,
                "not a recognized electronic state notation",
            )),
        }
    }

    pub(crate) fn new(canonical: String, html: String, notation: Notation) -> Self {
        Self {
            canonical,
            html,
            notation: Some(notation),
        }
    }

    /// Returns the canonical form.
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Returns the HTML rendering.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Returns the notation that produced this label (`None` when empty).
    #[must_use]
    pub fn notation(&self) -> Option<Notation> {
        self.notation
    }

    /// Returns true for the unresolved label.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Splits into `(canonical, html)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.canonical, self.html)
    }
}

impl fmt::Display for ElectronicLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Canonicalizes an electronic label into `(canonical, html)`.
///
/// # Errors
///
/// See [`ElectronicLabel::parse`].
pub fn canonicalize_electronic(input: &str) -> Result<(String, String)> {
    Ok(ElectronicLabel::parse(input)?.into_parts())
}

// =============================================================================
// Shared parsing pieces
// =============================================================================

/// An angular momentum quantum number stored as twice its value, so that
/// `3/2` is `HalfInt(3)` and `2` is `HalfInt(4)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct HalfInt(u32);

impl HalfInt {
    pub(crate) fn twice(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HalfInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}/2", self.0)
        }
    }
}

/// Returns true if `twice_j` is reachable by coupling `twice_a` and `twice_b`:
/// `|a - b| <= j <= a + b` in integer steps.
pub(crate) fn couples(twice_a: u32, twice_b: u32, twice_j: u32) -> bool {
    let (a, b, j) = (u64::from(twice_a), u64::from(twice_b), u64::from(twice_j));
    j >= a.abs_diff(b) && j <= a + b && (a + b + j) % 2 == 0
}

/// Cursor wrapper that reports errors against one grammar.
pub(crate) struct TermParser<'src> {
    pub(crate) cursor: Cursor<'src>,
    notation: Notation,
}

impl<'src> TermParser<'src> {
    pub(crate) fn new(input: &'src str, notation: Notation) -> Self {
        Self {
            cursor: Cursor::new(input),
            notation,
        }
    }

    pub(crate) fn error(&self, message: impl fmt::Display) -> Error {
        Error::grammar(
            self.notation.name(),
            self.cursor.source(),
            format!("{message} at offset {}", self.cursor.position()),
        )
    }

    /// Reports an error that concerns the label as a whole.
    pub(crate) fn invalid(&self, message: impl Into<String>) -> Error {
        Error::grammar(self.notation.name(), self.cursor.source(), message)
    }

    pub(crate) fn expect(&mut self, c: char) -> Result<()> {
        if self.cursor.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected {c:?}")))
        }
    }

    pub(crate) fn expect_end(&self) -> Result<()> {
        if self.cursor.is_eof() {
            Ok(())
        } else {
            Err(self.error(format!("unexpected {:?}", self.cursor.rest())))
        }
    }

    /// Reads a canonical positive integer (a multiplicity or shell number).
    pub(crate) fn positive(&mut self, what: &str) -> Result<u32> {
        let digits = self.cursor.digits();
        match canonical_uint(digits) {
            Some(n) if n > 0 => Ok(n),
            _ => Err(self.error(format!("expected {what}"))),
        }
    }

    /// Reads `n` or `n/2`, where `n/2` must have an odd numerator.
    pub(crate) fn half_int(&mut self, what: &str) -> Result<HalfInt> {
        let digits = self.cursor.digits();
        let n = canonical_uint(digits).ok_or_else(|| self.error(format!("expected {what}")))?;
        if self.cursor.eat('/') {
            if self.cursor.digits() != "2" {
                return Err(self.error(format!("{what} must be a whole or half integer")));
            }
            if n % 2 == 0 {
                return Err(self.error(format!("{what} {n}/2 is not in lowest terms")));
            }
            Ok(HalfInt(n))
        } else {
            n.checked_mul(2)
                .map(HalfInt)
                .ok_or_else(|| self.error(format!("{what} too large")))
        }
    }

    /// Reads an optional `_J` or bare `J` suffix.
    pub(crate) fn optional_j(&mut self, what: &str) -> Result<Option<HalfInt>> {
        if self.cursor.eat('_') {
            return self.half_int(what).map(Some);
        }
        if self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            return self.half_int(what).map(Some);
        }
        Ok(None)
    }
}

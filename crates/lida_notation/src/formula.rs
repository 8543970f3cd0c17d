//! Chemical formulas: `CO2+`, `H2O`, `(12C)(16O)`, `(1H)2(16O)+`.
//!
//! A formula is a sequence of parts followed by an optional charge. A part is
//! an element symbol or a parenthesised isotope (`(13C)`), each with an
//! optional multiplier. Parsing accepts some redundant spellings (`C1O2`,
//! `H2O+1`) so that callers can detect them with [`Formula::is_canonical`].

use std::fmt;

use lida_foundation::{Error, Result};

use crate::cursor::{Cursor, canonical_uint};
use crate::elements::{ELECTRON_MASS, element, is_element, isotope_mass};

const GRAMMAR: &str = "formula";

/// One element or isotope with its multiplier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FormulaPart {
    /// Element symbol.
    pub symbol: String,
    /// Mass number for isotope parts (`(13C)`).
    pub mass_number: Option<u32>,
    /// Multiplier (at least 1).
    pub count: u32,
}

impl FormulaPart {
    fn token(&self) -> String {
        let mut token = String::new();
        if let Some(a) = self.mass_number {
            token.push_str(&a.to_string());
        }
        token.push_str(&self.symbol);
        if self.count > 1 {
            token.push_str(&self.count.to_string());
        }
        token
    }
}

/// A parsed chemical formula.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Formula {
    parts: Vec<FormulaPart>,
    charge: i32,
}

impl Formula {
    /// Parses a formula.
    ///
    /// # Errors
    ///
    /// Returns a grammar parse error for unknown element symbols, zero
    /// multipliers, malformed isotope groups and misplaced charges, and when
    /// the total atom count does not fit in a `u32`.
    pub fn parse(input: &str) -> Result<Self> {
        let mut cursor = Cursor::new(input);
        let mut parts = Vec::new();
        let mut atoms: u32 = 0;

        while let Some(c) = cursor.peek() {
            let (symbol, mass_number) = if c == '(' {
                cursor.bump();
                let digits = cursor.digits();
                let Some(a) = canonical_uint(digits).filter(|&a| a > 0) else {
                    return Err(fail(input, &cursor, "expected an isotope mass number"));
                };
                let symbol = symbol(&mut cursor)
                    .ok_or_else(|| fail(input, &cursor, "expected an element symbol"))?;
                if !cursor.eat(')') {
                    return Err(fail(input, &cursor, "expected ')'"));
                }
                (symbol, Some(a))
            } else if c.is_ascii_uppercase() {
                let symbol = symbol(&mut cursor)
                    .ok_or_else(|| fail(input, &cursor, "unknown element symbol"))?;
                (symbol, None)
            } else {
                break;
            };

            let digits = cursor.digits();
            let count = if digits.is_empty() {
                1
            } else {
                match digits.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(fail(input, &cursor, format!("bad multiplier {digits:?}"))),
                }
            };
            atoms = atoms
                .checked_add(count)
                .ok_or_else(|| fail(input, &cursor, "too many atoms"))?;
            parts.push(FormulaPart {
                symbol: symbol.to_string(),
                mass_number,
                count,
            });
        }

        if parts.is_empty() {
            return Err(fail(input, &cursor, "expected an element"));
        }

        let charge = match cursor.peek() {
            None => 0,
            Some(sign @ ('+' | '-')) => {
                cursor.bump();
                let digits = cursor.digits();
                let magnitude = if digits.is_empty() {
                    1
                } else {
                    match digits.parse::<i32>() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(fail(input, &cursor, format!("bad charge {digits:?}"))),
                    }
                };
                if sign == '+' { magnitude } else { -magnitude }
            }
            Some(other) => return Err(fail(input, &cursor, format!("unexpected {other:?}"))),
        };
        if !cursor.is_eof() {
            return Err(fail(input, &cursor, format!("unexpected {:?}", cursor.rest())));
        }

        Ok(Self { parts, charge })
    }

    /// Returns true if `input` parses and is already in canonical form.
    #[must_use]
    pub fn is_canonical(input: &str) -> bool {
        Self::parse(input).is_ok_and(|f| f.canonical() == input)
    }

    /// Returns the parts in written order.
    #[must_use]
    pub fn parts(&self) -> &[FormulaPart] {
        &self.parts
    }

    /// Returns the net charge.
    #[must_use]
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Returns the total number of atoms.
    ///
    /// [`Formula::parse`] rejects formulas whose total overflows, so the sum
    /// always fits.
    #[must_use]
    pub fn number_atoms(&self) -> u32 {
        self.parts
            .iter()
            .fold(0u32, |total, p| total.saturating_add(p.count))
    }

    /// Returns true if any part names a specific isotope.
    #[must_use]
    pub fn has_isotopes(&self) -> bool {
        self.parts.iter().any(|p| p.mass_number.is_some())
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Renders the formula as HTML: `CO<sub>2</sub><sup>+</sup>`,
    /// `<sup>12</sup>C<sup>16</sup>O`, `Ca<sup>2+</sup>`.
    #[must_use]
    pub fn html(&self) -> String {
        let mut html = String::new();
        for part in &self.parts {
            if let Some(a) = part.mass_number {
                html.push_str(&format!("<sup>{a}</sup>"));
            }
            html.push_str(&part.symbol);
            if part.count > 1 {
                html.push_str(&format!("<sub>{}</sub>", part.count));
            }
        }
        match self.charge {
            0 => {}
            1 => html.push_str("<sup>+</sup>"),
            -1 => html.push_str("<sup>-</sup>"),
            q if q > 0 => html.push_str(&format!("<sup>{q}+</sup>")),
            q => html.push_str(&format!("<sup>{}-</sup>", q.unsigned_abs())),
        }
        html
    }

    /// Returns a URL-safe identifier: `CO2_p`, `12C-16O`, `1H2-16O_p`, `H2O_m`.
    ///
    /// Isotope formulas separate their parts with `-` so that mass numbers
    /// cannot run into the preceding multiplier.
    #[must_use]
    pub fn slug(&self) -> String {
        let tokens: Vec<String> = self.parts.iter().map(FormulaPart::token).collect();
        let mut slug = if self.has_isotopes() {
            tokens.join("-")
        } else {
            tokens.concat()
        };
        match self.charge {
            0 => {}
            1 => slug.push_str("_p"),
            -1 => slug.push_str("_m"),
            q if q > 0 => slug.push_str(&format!("_p{q}")),
            q => slug.push_str(&format!("_m{}", q.unsigned_abs())),
        }
        slug
    }

    /// Returns the mass in u, using standard atomic weights for plain element
    /// parts and tabulated isotope masses for isotope parts, less the mass of
    /// the electrons removed by a positive charge.
    ///
    /// # Errors
    ///
    /// Returns a grammar parse error naming the isotope when an isotope part
    /// has no tabulated mass.
    pub fn mass(&self) -> Result<f64> {
        let mut mass = 0.0;
        for part in &self.parts {
            let unit = match part.mass_number {
                Some(a) => isotope_mass(&part.symbol, a).ok_or_else(|| {
                    Error::grammar(
                        GRAMMAR,
                        self.canonical(),
                        format!("no mass tabulated for isotope {a}{}", part.symbol),
                    )
                })?,
                None => element(&part.symbol)
                    .map(|e| e.weight)
                    .ok_or_else(|| Error::internal(format!("unknown element {}", part.symbol)))?,
            };
            mass += unit * f64::from(part.count);
        }
        Ok(mass - f64::from(self.charge) * ELECTRON_MASS)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            if let Some(a) = part.mass_number {
                write!(f, "({a}{})", part.symbol)?;
            } else {
                f.write_str(&part.symbol)?;
            }
            if part.count > 1 {
                write!(f, "{}", part.count)?;
            }
        }
        match self.charge {
            0 => Ok(()),
            1 => f.write_str("+"),
            -1 => f.write_str("-"),
            q => write!(f, "{q:+}"),
        }
    }
}

fn fail(input: &str, cursor: &Cursor<'_>, message: impl fmt::Display) -> Error {
    Error::grammar(
        GRAMMAR,
        input,
        format!("{message} at offset {}", cursor.position()),
    )
}

/// Reads the longest element symbol at the cursor: an uppercase letter and up
/// to two lowercase letters.
fn symbol<'src>(cursor: &mut Cursor<'src>) -> Option<&'src str> {
    let rest = cursor.rest();
    let first = rest.chars().next().filter(char::is_ascii_uppercase)?;
    let lower = rest[1..]
        .chars()
        .take(2)
        .take_while(char::is_ascii_lowercase)
        .count();
    let len = (0..=lower)
        .rev()
        .map(|extra| first.len_utf8() + extra)
        .find(|&len| is_element(&rest[..len]))?;
    let symbol = &rest[..len];
    cursor.eat_str(symbol);
    Some(symbol)
}

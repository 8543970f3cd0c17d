//! Vibrational labels and the vibrational quantum-label descriptor.
//!
//! A vibrational label is either a bare non-negative integer (`"5"`, scalar
//! mode) or a parenthesised, comma-space separated list of at least two
//! non-negative integers (`"(1, 0, 2)"`, vector mode). The empty string is a
//! valid label meaning "vibrationally unresolved".
//!
//! Parsing is strict: a label is accepted only if every quantum is written
//! exactly as it would be re-serialized, so the canonical form of any accepted
//! label is the label itself.

use std::fmt;

use lida_foundation::{Error, Result};

use crate::cursor::canonical_uint;

/// Grammar name used in parse errors.
const GRAMMAR: &str = "vibrational";

/// Grammar name used in descriptor parse errors.
const LABELS_GRAMMAR: &str = "vibrational quantum labels";

/// Separator between vector elements, both in input and canonical output.
const SEPARATOR: &str = ", ";

/// Default zero-padding width of [`VibrationalLabel::sort_key`].
pub const DEFAULT_SORT_KEY_WIDTH: usize = 2;

// =============================================================================
// VibrationalLabel
// =============================================================================

/// A parsed vibrational label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VibrationalLabel {
    quanta: Vec<u32>,
}

impl VibrationalLabel {
    /// Parses a vibrational label.
    ///
    /// # Errors
    ///
    /// Returns a grammar parse error for negative values, non-integer tokens,
    /// unbalanced parentheses, separators other than `", "`, single-element
    /// vectors, and non-canonical integer spellings such as `"05"`.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self::default());
        }

        let opens = input.starts_with('(');
        let closes = input.ends_with(')');
        if opens != closes {
            return Err(Error::grammar(GRAMMAR, input, "mismatched parentheses"));
        }

        if !opens {
            let quantum = parse_quantum(input, input)?;
            return Ok(Self {
                quanta: vec![quantum],
            });
        }

        let inner = &input[1..input.len() - 1];
        let tokens: Vec<&str> = inner.split(SEPARATOR).collect();
        if tokens.len() < 2 {
            let message = if inner.contains(',') {
                "quanta must be separated by \", \""
            } else {
                "vector form needs at least two quanta"
            };
            return Err(Error::grammar(GRAMMAR, input, message));
        }

        let quanta = tokens
            .into_iter()
            .map(|token| parse_quantum(input, token))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { quanta })
    }

    /// Builds a label directly from its quanta.
    ///
    /// An empty slice gives the unresolved label; one quantum gives a scalar
    /// label; two or more give a vector label.
    #[must_use]
    pub fn from_quanta(quanta: &[u32]) -> Self {
        Self {
            quanta: quanta.to_vec(),
        }
    }

    /// Returns the quanta, one per mode.
    #[must_use]
    pub fn quanta(&self) -> &[u32] {
        &self.quanta
    }

    /// Returns the number of modes (0 for the unresolved label).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.quanta.len()
    }

    /// Returns true for the unresolved (empty) label.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quanta.is_empty()
    }

    /// Returns true for a vector label whose quanta are all zero.
    #[must_use]
    pub fn is_vector_ground(&self) -> bool {
        self.quanta.len() > 1 && self.quanta.iter().all(|&q| q == 0)
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Renders the label as HTML.
    ///
    /// Scalar labels render as `<i>v</i>=N` and vector labels as
    /// `<b><i>v</i></b>=(a, b, c)`; the all-zero vector renders as
    /// `<b><i>v</i></b>=<b>0</b>`.
    #[must_use]
    pub fn html(&self) -> String {
        match self.quanta.as_slice() {
            [] => String::new(),
            [q] => format!("<i>v</i>={q}"),
            _ if self.is_vector_ground() => "<b><i>v</i></b>=<b>0</b>".to_string(),
            _ => format!("<b><i>v</i></b>={self}"),
        }
    }

    /// Renders the additive form, e.g. `<i>v</i><sub>2</sub>+3<i>v</i><sub>4</sub>`
    /// for `(0, 1, 0, 3)`.
    ///
    /// Scalar labels render as in [`html`](Self::html).
    #[must_use]
    pub fn html_alt(&self) -> String {
        match self.quanta.as_slice() {
            [] => String::new(),
            [_] => self.html(),
            _ if self.is_vector_ground() => "<b>0</b>".to_string(),
            quanta => quanta
                .iter()
                .enumerate()
                .filter(|&(_, &q)| q > 0)
                .map(|(mode, &q)| {
                    let coefficient = if q == 1 { String::new() } else { q.to_string() };
                    format!("{coefficient}<i>v</i><sub>{}</sub>", mode + 1)
                })
                .collect::<Vec<_>>()
                .join("+"),
        }
    }

    /// Returns a sort key whose lexicographic order matches the numeric order
    /// of the quanta, provided every quantum fits in `width` digits.
    ///
    /// Each quantum is zero-padded to `width` and the result is parenthesised,
    /// so `"5"` becomes `"(05)"` and `"(1, 10)"` becomes `"(01, 10)"` at width 2.
    /// Quanta wider than `width` are written in full and will sort out of
    /// order. The unresolved label has an empty key.
    #[must_use]
    pub fn sort_key(&self, width: usize) -> String {
        if self.quanta.is_empty() {
            return String::new();
        }
        let padded: Vec<String> = self
            .quanta
            .iter()
            .map(|q| format!("{q:0width$}"))
            .collect();
        format!("({})", padded.join(SEPARATOR))
    }
}

impl fmt::Display for VibrationalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quanta.as_slice() {
            [] => Ok(()),
            [q] => write!(f, "{q}"),
            quanta => {
                write!(f, "(")?;
                for (i, q) in quanta.iter().enumerate() {
                    if i > 0 {
                        f.write_str(SEPARATOR)?;
                    }
                    write!(f, "{q}")?;
                }
                write!(f, ")")
            }
        }
    }
}

fn parse_quantum(input: &str, token: &str) -> Result<u32> {
    if let Some(magnitude) = token.strip_prefix('-') {
        if canonical_uint(magnitude).is_some() {
            return Err(Error::grammar(
                GRAMMAR,
                input,
                format!("negative quantum {token}"),
            ));
        }
    }
    canonical_uint(token).ok_or_else(|| {
        Error::grammar(
            GRAMMAR,
            input,
            format!("{token:?} is not a canonical non-negative integer"),
        )
    })
}

/// Parses a vibrational label into `(quanta, html, html_alt)`.
///
/// # Errors
///
/// See [`VibrationalLabel::parse`].
pub fn parse_vibrational(input: &str) -> Result<(Vec<u32>, String, String)> {
    let label = VibrationalLabel::parse(input)?;
    let html = label.html();
    let html_alt = label.html_alt();
    Ok((label.quanta, html, html_alt))
}

/// Parses a vibrational label and returns its zero-padded sort key.
///
/// # Errors
///
/// See [`VibrationalLabel::parse`].
pub fn sort_key(input: &str, width: usize) -> Result<String> {
    Ok(VibrationalLabel::parse(input)?.sort_key(width))
}

// =============================================================================
// QuantumLabels
// =============================================================================

/// The descriptor naming an isotopologue's vibrational modes, e.g. `"v"` or
/// `"(v1, v2, v3)"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QuantumLabels {
    labels: Vec<String>,
}

impl QuantumLabels {
    /// Parses a descriptor.
    ///
    /// # Errors
    ///
    /// Returns a grammar parse error for malformed identifiers, bad
    /// separators, single-element vectors and repeated mode names.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self::default());
        }

        let opens = input.starts_with('(');
        if opens != input.ends_with(')') {
            return Err(Error::grammar(LABELS_GRAMMAR, input, "mismatched parentheses"));
        }

        let tokens: Vec<&str> = if opens {
            let inner = &input[1..input.len() - 1];
            let tokens: Vec<&str> = inner.split(SEPARATOR).collect();
            if tokens.len() < 2 {
                return Err(Error::grammar(
                    LABELS_GRAMMAR,
                    input,
                    "vector form needs at least two comma-space separated labels",
                ));
            }
            tokens
        } else {
            vec![input]
        };

        let mut labels: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            if !is_identifier(token) {
                return Err(Error::grammar(
                    LABELS_GRAMMAR,
                    input,
                    format!("{token:?} is not a mode label"),
                ));
            }
            if labels.iter().any(|l| l == token) {
                return Err(Error::grammar(
                    LABELS_GRAMMAR,
                    input,
                    format!("mode label {token:?} repeated"),
                ));
            }
            labels.push(token.to_string());
        }
        Ok(Self { labels })
    }

    /// Returns the mode names.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the number of modes described.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.labels.len()
    }

    /// Returns true when no modes are described.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Renders the descriptor as HTML.
    #[must_use]
    pub fn html(&self) -> String {
        match self.labels.as_slice() {
            [] => String::new(),
            [label] => label_html(label),
            labels => {
                let parts: Vec<String> = labels.iter().map(|l| label_html(l)).collect();
                format!("({})", parts.join(SEPARATOR))
            }
        }
    }
}

impl fmt::Display for QuantumLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.labels.as_slice() {
            [] => Ok(()),
            [label] => f.write_str(label),
            labels => write!(f, "({})", labels.join(SEPARATOR)),
        }
    }
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// `v1` -> `<i>v</i><sub>1</sub>`: the leading letters are the symbol and
/// anything after them is the subscript.
fn label_html(label: &str) -> String {
    let split = label
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(label.len());
    let (symbol, subscript) = label.split_at(split);
    if subscript.is_empty() {
        format!("<i>{symbol}</i>")
    } else {
        format!("<i>{symbol}</i><sub>{subscript}</sub>")
    }
}

/// Parses a vibrational quantum-label descriptor.
///
/// # Errors
///
/// See [`QuantumLabels::parse`].
pub fn parse_quantum_labels(input: &str) -> Result<QuantumLabels> {
    QuantumLabels::parse(input)
}

//! Character cursor shared by the notation grammars.
//!
//! Every grammar in this crate is a small hand-written recursive descent
//! parser over a [`Cursor`]. The cursor only moves forward; grammars that need
//! to try an alternative take a copy (`Cursor` is `Copy`) and restore it.

/// Forward-only cursor over a notation string.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Cursor<'src> {
    /// Full source text being parsed.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor at the start of `source`.
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
        }
    }

    /// Returns the full source text.
    pub(crate) fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the unconsumed text.
    pub(crate) fn rest(&self) -> &'src str {
        self.rest
    }

    /// Returns the current byte offset.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Returns true when everything has been consumed.
    pub(crate) fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// Peeks at the next character without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Consumes and returns the next character.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        let len = c.len_utf8();
        self.rest = &self.rest[len..];
        self.position += len;
        Some(c)
    }

    /// Consumes `c` if it is next.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes `s` if the remaining text starts with it.
    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        if self.rest.starts_with(s) {
            self.rest = &self.rest[s.len()..];
            self.position += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes the longest prefix whose characters satisfy `pred`.
    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'src str {
        let len = self
            .rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest.len(), |(i, _)| i);
        let taken = &self.rest[..len];
        self.rest = &self.rest[len..];
        self.position += len;
        taken
    }

    /// Consumes a run of ASCII digits (possibly empty).
    pub(crate) fn digits(&mut self) -> &'src str {
        self.take_while(|c| c.is_ascii_digit())
    }
}

/// Parses an unsigned integer token written exactly as its canonical decimal
/// spelling: no sign, no leading zeros (except `"0"` itself), no whitespace.
pub(crate) fn canonical_uint(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

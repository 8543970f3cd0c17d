//! Integration tests for Layer 1: Notation
//!
//! Tests for electronic, vibrational and formula grammars.

mod electronic;
mod formula;
mod vibrational;

//! Cross-layer integration tests
//!
//! Tests that exercise the catalog end to end, from notation strings to
//! stored rows.

mod lifecycle;

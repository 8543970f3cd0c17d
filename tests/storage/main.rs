//! Integration tests for Layer 2: Storage
//!
//! Tests for relations, natural keys and savepoints.

mod relations;

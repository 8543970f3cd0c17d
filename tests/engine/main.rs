//! Integration tests for Layer 3: Engine
//!
//! Tests for entity operations, sync, and cascades.

mod cascades;
mod entities;
mod sync;

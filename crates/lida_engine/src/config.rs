//! Configuration for the catalog engine.

use lida_notation::DEFAULT_SORT_KEY_WIDTH;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rule bounding the vibrational dimensionality of an isotopologue by its
/// atom count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VibrationalModes {
    /// Polyatomic species have 3N-6 modes.
    #[default]
    NonLinear,
    /// Polyatomic species have 3N-5 modes.
    Linear,
    /// No bound at all.
    Unbounded,
}

impl VibrationalModes {
    /// Returns the largest vibrational dimensionality allowed for a species
    /// of `number_atoms` atoms, or `None` when unbounded.
    ///
    /// Diatomics always have one mode and monatomic species none.
    #[must_use]
    pub fn max_dimension(self, number_atoms: u64) -> Option<usize> {
        let n = usize::try_from(number_atoms).unwrap_or(usize::MAX);
        match (self, n) {
            (Self::Unbounded, _) => None,
            (_, 0 | 1) => Some(0),
            (_, 2) => Some(1),
            (Self::NonLinear, n) => Some(n.saturating_mul(3) - 6),
            (Self::Linear, n) => Some(n.saturating_mul(3) - 5),
        }
    }

    /// Name used in dimension mismatch reports.
    #[must_use]
    pub const fn rule(self) -> &'static str {
        match self {
            Self::NonLinear => "degrees of freedom (3N-6)",
            Self::Linear => "degrees of freedom (3N-5)",
            Self::Unbounded => "unbounded",
        }
    }
}

/// Configuration for a [`Catalog`](crate::Catalog).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Zero-padding width of vibrational sort keys.
    pub sort_key_width: usize,

    /// Rule bounding vibrational dimensionality.
    pub vibrational_modes: VibrationalModes,

    /// Emit a `debug!` line for every attribute a sync changes.
    pub log_sync_changes: bool,

    /// Re-run a dry sync after every commit and fail if it would change
    /// anything.
    pub verify_after_commit: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sort_key_width: DEFAULT_SORT_KEY_WIDTH,
            vibrational_modes: VibrationalModes::default(),
            log_sync_changes: true,
            verify_after_commit: false,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that self-checks every commit.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            verify_after_commit: true,
            ..Self::default()
        }
    }

    /// Builder method to set the sort key width.
    #[must_use]
    pub fn with_sort_key_width(mut self, width: usize) -> Self {
        self.sort_key_width = width;
        self
    }

    /// Builder method to set the vibrational mode rule.
    #[must_use]
    pub fn with_vibrational_modes(mut self, modes: VibrationalModes) -> Self {
        self.vibrational_modes = modes;
        self
    }

    /// Builder method to enable/disable per-attribute sync logging.
    #[must_use]
    pub fn with_log_sync_changes(mut self, log: bool) -> Self {
        self.log_sync_changes = log;
        self
    }

    /// Builder method to enable/disable post-commit verification.
    #[must_use]
    pub fn with_verify_after_commit(mut self, verify: bool) -> Self {
        self.verify_after_commit = verify;
        self
    }
}

//! The sync engine.
//!
//! [`sync`] re-evaluates the selected derivations of one record, in registry
//! order, and writes every changed value into the in-memory record. It never
//! persists anything: the caller decides when (and whether) to commit, which
//! lets a cascade recompute one field of a neighbour and write back only that
//! field.

use std::collections::BTreeSet;

use lida_foundation::{AttrChange, EntityRef, Error, Result};

use crate::derivation::{Derived, SyncContext};

// =============================================================================
// Selection
// =============================================================================

/// Which registered attributes a sync re-evaluates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every registered attribute.
    #[default]
    All,
    /// Only the named attributes.
    Include(BTreeSet<&'static str>),
    /// Every registered attribute except the named ones.
    Exclude(BTreeSet<&'static str>),
}

impl Selection {
    /// Selects only `attributes`.
    #[must_use]
    pub fn only<I: IntoIterator<Item = &'static str>>(attributes: I) -> Self {
        Self::Include(attributes.into_iter().collect())
    }

    /// Selects everything but `attributes`.
    #[must_use]
    pub fn skip<I: IntoIterator<Item = &'static str>>(attributes: I) -> Self {
        Self::Exclude(attributes.into_iter().collect())
    }

    /// Returns true if `attribute` is selected.
    #[must_use]
    pub fn selects(&self, attribute: &str) -> bool {
        match self {
            Self::All => true,
            Self::Include(names) => names.contains(attribute),
            Self::Exclude(names) => !names.contains(attribute),
        }
    }

    /// Checks that every named attribute is registered for `R`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAttribute` for the first name `R` does not register.
    pub fn validate<R: Derived>(&self) -> Result<()> {
        let names = match self {
            Self::All => return Ok(()),
            Self::Include(names) | Self::Exclude(names) => names,
        };
        match names.iter().find(|name| R::derivation(name).is_none()) {
            Some(name) => Err(Error::unknown_attribute(R::KIND, *name)),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Sync
// =============================================================================

/// Re-evaluates the selected derivations of `record` and returns what changed.
///
/// Each derivation sees the values written by those before it. Nothing is
/// persisted.
///
/// # Errors
///
/// Returns `UnknownAttribute` for a selection naming an unregistered
/// attribute, and propagates any derivation error. On error `record` may hold
/// some recomputed values; the stored row is untouched.
pub fn sync<R: Derived>(
    record: &mut R,
    selection: &Selection,
    ctx: &SyncContext<'_>,
) -> Result<Vec<AttrChange>> {
    selection.validate::<R>()?;

    let mut changes = Vec::new();
    for derivation in R::DERIVATIONS {
        if !selection.selects(derivation.attribute) {
            continue;
        }
        let new = derivation.derive(record, ctx)?;
        let old = derivation.stored(record);
        if new != old {
            derivation.store(record, new.clone())?;
            changes.push(AttrChange::new(derivation.attribute, old, new));
        }
    }

    if ctx.config().log_sync_changes && !changes.is_empty() {
        log_changes(record, &changes, ctx);
    }
    Ok(changes)
}

fn log_changes<R: Derived>(record: &R, changes: &[AttrChange], ctx: &SyncContext<'_>) {
    let entity: EntityRef = record.id().into();
    let repr = match record.describe(ctx.store()) {
        Ok(display) => format!("{}:{}({display})", entity.raw(), entity.kind()),
        Err(_) => entity.to_string(),
    };
    for change in changes {
        log::debug!("{repr}: {change}");
    }
}

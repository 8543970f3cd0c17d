//! Typed identifiers for the four entity kinds.
//!
//! Every kind gets its own newtype so that a `StateId` can never be passed
//! where a `TransitionId` is expected. [`EntityRef`] erases the kind when an
//! error or a log line needs to point at "some entity".

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four kinds of entity held in the catalog.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityKind {
    /// A stateless chemical species.
    Molecule,
    /// One isotopic composition of a molecule.
    Isotopologue,
    /// One quantum state of an isotopologue.
    State,
    /// A decay channel between two states.
    Transition,
}

impl EntityKind {
    /// Returns the kind name as used in reprs and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Molecule => "Molecule",
            Self::Isotopologue => "Isotopologue",
            Self::State => "State",
            Self::Transition => "Transition",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(u64);

        impl $name {
            /// Creates an identifier from its raw row number.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw row number.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Returns the entity kind this identifier belongs to.
            #[must_use]
            pub const fn kind(self) -> EntityKind {
                EntityKind::$kind
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for EntityRef {
            fn from(id: $name) -> Self {
                EntityRef::$kind(id)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`EntityKind::Molecule`] row.
    MoleculeId => Molecule
);
entity_id!(
    /// Identifier of an [`EntityKind::Isotopologue`] row.
    IsotopologueId => Isotopologue
);
entity_id!(
    /// Identifier of a [`EntityKind::State`] row.
    StateId => State
);
entity_id!(
    /// Identifier of a [`EntityKind::Transition`] row.
    TransitionId => Transition
);

/// A reference to an entity of any kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityRef {
    /// A molecule.
    Molecule(MoleculeId),
    /// An isotopologue.
    Isotopologue(IsotopologueId),
    /// A state.
    State(StateId),
    /// A transition.
    Transition(TransitionId),
}

impl EntityRef {
    /// Returns the kind of the referenced entity.
    #[must_use]
    pub const fn kind(self) -> EntityKind {
        match self {
            Self::Molecule(_) => EntityKind::Molecule,
            Self::Isotopologue(_) => EntityKind::Isotopologue,
            Self::State(_) => EntityKind::State,
            Self::Transition(_) => EntityKind::Transition,
        }
    }

    /// Returns the raw row number.
    #[must_use]
    pub const fn raw(self) -> u64 {
        match self {
            Self::Molecule(id) => id.get(),
            Self::Isotopologue(id) => id.get(),
            Self::State(id) => id.get(),
            Self::Transition(id) => id.get(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.raw())
    }
}

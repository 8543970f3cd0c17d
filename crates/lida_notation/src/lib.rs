//! Notation grammars for the Lida spectroscopy catalog.
//!
//! Every label stored in the catalog is canonicalized on the way in, so two
//! spellings of the same physical state always produce the same stored string.
//!
//! # Architecture
//!
//! ```text
//! "X(2PI)"        "(1, 0, 2)"        "(12C)(16O)+"
//!     │               │                   │
//!     ▼               ▼                   ▼
//! ┌──────────┐   ┌─────────────┐    ┌───────────┐
//! │ DISPATCH │   │ VIBRATIONAL │    │  FORMULA  │
//! │ by shape │   │   strict    │    │  parts +  │
//! └──────────┘   │   parser    │    │  charge   │
//!     │          └─────────────┘    └───────────┘
//!     ▼               │                   │
//! molecular │ atomic │ coupling │ configuration
//!     │               │                   │
//!     ▼               ▼                   ▼
//! canonical + html   quanta + html     canonical + html
//!                    + sort key        + slug + mass
//! ```
//!
//! # Modules
//!
//! - [`electronic`] - Electronic labels and the notation dispatcher
//! - [`vibrational`] - Vibrational labels, sort keys, quantum-label descriptors
//! - [`formula`] - Chemical formulas
//! - [`elements`] - Periodic table and isotope masses
//! - [`markup`] - Tag stripping for search text

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod cursor;
pub mod electronic;
pub mod elements;
pub mod formula;
pub mod markup;
pub mod vibrational;

pub use electronic::{ElectronicLabel, Notation, canonicalize_electronic, detect_notation};
pub use formula::{Formula, FormulaPart};
pub use markup::strip_markup;
pub use vibrational::{
    DEFAULT_SORT_KEY_WIDTH, QuantumLabels, VibrationalLabel, parse_quantum_labels,
    parse_vibrational, sort_key,
};

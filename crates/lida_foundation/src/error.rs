//! Error types for the Lida catalog core.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every invariant violation is detected before anything is written, so an
//! error always means "nothing was committed".

use std::fmt;

use thiserror::Error;

use crate::id::{EntityKind, EntityRef};

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Lida operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a notation parse error carrying the offending input verbatim.
    #[must_use]
    pub fn grammar(
        grammar: &'static str,
        input: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::GrammarParse {
            grammar,
            input: input.into(),
            message: message.into(),
        })
    }

    /// Creates a natural-key uniqueness violation.
    #[must_use]
    pub fn duplicate(kind: EntityKind, key: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateEntity {
            kind,
            key: key.into(),
        })
    }

    /// Creates a vibrational dimensionality disagreement.
    #[must_use]
    pub fn dimension_mismatch(
        entity: impl Into<String>,
        expected: usize,
        actual: usize,
        rule: &'static str,
    ) -> Self {
        Self::new(ErrorKind::DimensionMismatch {
            entity: entity.into(),
            expected,
            actual,
            rule,
        })
    }

    /// Creates a prerequisite-ordering violation.
    #[must_use]
    pub fn configuration_order(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigurationOrder {
            entity: entity.into(),
            message: message.into(),
        })
    }

    /// Creates an out-of-domain value error.
    #[must_use]
    pub fn range(
        entity: impl Into<String>,
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::Range {
            entity: entity.into(),
            field,
            value: value.into(),
            message: message.into(),
        })
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn not_found(entity: impl Into<EntityRef>) -> Self {
        Self::new(ErrorKind::EntityNotFound(entity.into()))
    }

    /// Creates an unknown attribute error (a selection naming an attribute the
    /// kind does not register).
    #[must_use]
    pub fn unknown_attribute(kind: EntityKind, attribute: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAttribute {
            kind,
            attribute: attribute.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true for malformed notation strings.
    #[must_use]
    pub fn is_grammar_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::GrammarParse { .. })
    }

    /// Returns true for natural-key uniqueness violations.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self.kind, ErrorKind::DuplicateEntity { .. })
    }

    /// Returns true for vibrational dimensionality disagreements.
    #[must_use]
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::DimensionMismatch { .. })
    }

    /// Returns true for prerequisite-ordering violations.
    #[must_use]
    pub fn is_configuration_order(&self) -> bool {
        matches!(self.kind, ErrorKind::ConfigurationOrder { .. })
    }

    /// Returns true for out-of-domain values.
    #[must_use]
    pub fn is_range(&self) -> bool {
        matches!(self.kind, ErrorKind::Range { .. })
    }

    /// Returns true when a referenced entity does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::EntityNotFound(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A notation string did not parse under the grammar selected for it.
    #[error("{grammar} parse error in {input:?}: {message}")]
    GrammarParse {
        /// Name of the grammar that rejected the input.
        grammar: &'static str,
        /// The offending input, verbatim.
        input: String,
        /// What was wrong.
        message: String,
    },

    /// An entity with the same natural key already exists.
    #[error("{kind}({key}) already exists")]
    DuplicateEntity {
        /// Kind of the duplicated entity.
        kind: EntityKind,
        /// Rendering of the natural key.
        key: String,
    },

    /// Vibrational dimensionality disagreement.
    #[error("dimension mismatch for {entity}: expected {expected}, got {actual} ({rule})")]
    DimensionMismatch {
        /// The entity being created or configured.
        entity: String,
        /// Dimensionality required by the rule.
        expected: usize,
        /// Dimensionality supplied.
        actual: usize,
        /// The rule that was violated.
        rule: &'static str,
    },

    /// A dependent entity was created before a prerequisite was configured,
    /// or a prerequisite was changed after dependents exist.
    #[error("configuration order violated for {entity}: {message}")]
    ConfigurationOrder {
        /// The entity being created or configured.
        entity: String,
        /// Which prerequisite was missing or late.
        message: String,
    },

    /// A numeric field outside its valid domain.
    #[error("{field}={value} out of range for {entity}: {message}")]
    Range {
        /// The entity being created or updated.
        entity: String,
        /// The field name.
        field: &'static str,
        /// Rendering of the rejected value.
        value: String,
        /// The valid domain.
        message: String,
    },

    /// A referenced entity does not exist.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityRef),

    /// A sync selection named an attribute the entity kind does not register.
    #[error("{kind} has no derived attribute {attribute:?}")]
    UnknownAttribute {
        /// The entity kind.
        kind: EntityKind,
        /// The attribute name supplied.
        attribute: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The sanctioned operation that failed (e.g. `create_state`).
    pub operation: Option<&'static str>,
    /// The entity the operation was acting on, if it already existed.
    pub entity: Option<EntityRef>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Sets the entity reference.
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<EntityRef>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(entity) = self.entity {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "on {entity}")?;
        }
        Ok(())
    }
}

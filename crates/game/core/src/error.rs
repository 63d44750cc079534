//! Common error infrastructure for raid-core.
//!
//! Domain-specific errors (`ActionError`, `PartyError`, `CatalogError`, ...)
//! live next to the code that raises them. This module holds the pieces they
//! share: a severity classification and the [`GameError`] trait.

/// Severity level of an error, used to decide how a host reacts to it.
///
/// - **Validation**: the request was refused and nothing was mutated. Hosts
///   normally prevent these client-side, so they are a backstop.
/// - **Fatal**: the catalog or state is structurally wrong (a skill id with no
///   definition, a corrupt skill). The action must be aborted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all raid-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by whether state may have been touched, not by impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the error variant, handy for metrics and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

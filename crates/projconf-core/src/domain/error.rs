// ============================================================================
// domain/error.rs - REGISTRY AND TEMPLATE ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through cached attribute values)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Resolution Errors
    // ========================================================================
    #[error("Attribute '{name}' is not defined by any loaded layer")]
    UndefinedAttribute { name: String },

    #[error("Attribute '{name}' has no value")]
    UnsetAttribute { name: String },

    #[error("Attribute '{name}' is {found}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Attribute '{name}' depends on itself: {chain}")]
    CyclicAttribute { name: String, chain: String },

    // ========================================================================
    // Value Errors
    // ========================================================================
    #[error("Invalid dependency '{spec}': {reason}")]
    InvalidDependency { spec: String, reason: String },

    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // ========================================================================
    // Content Errors
    // ========================================================================
    #[error("Homepage {url} has no lead paragraph")]
    HomepageLeadMissing { url: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UndefinedAttribute { name } => vec![
                format!("Define '{}' in scripts/projconf.toml", name),
                format!("Or pass it on the command line: --set {}=...", name),
                "Run 'projconf attributes' to see what is defined".into(),
            ],
            Self::UnsetAttribute { name } => vec![
                format!("'{}' defaults to nothing for this ecosystem", name),
                format!("Give it a value: --set {}=...", name),
            ],
            Self::TypeMismatch { name, expected, .. } => vec![
                format!("'{}' must be {}", name, expected),
                "Check the value in your settings file".into(),
            ],
            Self::InvalidDependency { .. } => vec![
                "Maven dependencies look like group:artifact:version[:scope]".into(),
                "NuGet dependencies look like Package:Version".into(),
            ],
            Self::HomepageLeadMissing { url } => vec![
                format!("The page at {} needs a <p> paragraph", url),
                "Or set md_description explicitly".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedAttribute { .. } | Self::UnsetAttribute { .. } => {
                ErrorCategory::Configuration
            }
            Self::TypeMismatch { .. }
            | Self::InvalidDependency { .. }
            | Self::InvalidSetting { .. }
            | Self::InvalidUrl { .. } => ErrorCategory::Validation,
            Self::HomepageLeadMissing { .. } => ErrorCategory::NotFound,
            Self::CyclicAttribute { .. } => ErrorCategory::Internal,
        }
    }
}

/// Domain-level result alias.
pub type DomainResult<T> = Result<T, DomainError>;

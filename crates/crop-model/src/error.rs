use thiserror::Error;

/// Programming errors in how a component was wired up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown context type '{0}' (expected pesticides, rainfall, or temperature)")]
    UnknownContextType(String),
}

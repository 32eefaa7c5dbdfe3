use thiserror::Error;

/// Errors that can occur during tokenization and filtering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("canonical document requires a non-empty doc_id")]
    MissingDocId,
    /// No terms survived stop-word filtering. Such documents carry no signal
    /// and are excluded from every later stage.
    #[error("document {doc_id} has no terms after stop-word filtering")]
    EmptyDocument { doc_id: String },
}

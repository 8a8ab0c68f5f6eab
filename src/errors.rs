use thiserror::Error;

/// Input validation failures. All are fatal: the core never produces a
/// partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("duplicate entity id: {0}")]
    DuplicateEntityId(String),

    #[error("relationship {relationship_id} references unknown entity id {entity_id}")]
    UnknownEntityReference {
        relationship_id: String,
        entity_id: String,
    },

    #[error("duplicate relationship id: {0}")]
    DuplicateRelationshipId(String),

    #[error("entity {entity_id} confidence {confidence} is outside [0, 1]")]
    EntityConfidenceOutOfRange { entity_id: String, confidence: f64 },

    #[error("relationship {relationship_id} confidence {confidence} is outside [0, 1]")]
    RelationshipConfidenceOutOfRange {
        relationship_id: String,
        confidence: f64,
    },
}

/// Configuration errors, checked once at the start of `resolve()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be within {min}..={max}, got {value}")]
    ThresholdOutOfRange {
        field: &'static str,
        value: String,
        min: &'static str,
        max: &'static str,
    },

    #[error("unknown confidence consolidation method: {0}")]
    UnknownConsolidationMethod(String),
}

/// Top-level error returned by this crate's public API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal invariant violation: {0}")]
    Internal(String),
}

pub type ResolutionResultT<T> = Result<T, ResolutionError>;

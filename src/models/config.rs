use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// How member confidences are fused when multiple relationships collapse
/// into one during same-pair consolidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceConsolidationMethod {
    Max,
    Average,
    Weighted,
}

impl ConfidenceConsolidationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceConsolidationMethod::Max => "max",
            ConfidenceConsolidationMethod::Average => "average",
            ConfidenceConsolidationMethod::Weighted => "weighted",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "max" => Ok(Self::Max),
            "average" => Ok(Self::Average),
            "weighted" => Ok(Self::Weighted),
            other => Err(ConfigError::UnknownConsolidationMethod(other.to_string())),
        }
    }
}

/// All tunable thresholds and toggles for a resolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// `tau_sim`: minimum `partial_ratio` (0..=100) for two entity names to
    /// cluster together.
    pub entity_similarity_threshold: f64,
    /// `tau_acro`: minimum `ratio` (0..=100) for a single-word entity's
    /// uppercased name to count as an acronym of a multi-word entity.
    pub entity_acronym_threshold: f64,
    pub enable_acronym_matching: bool,
    /// `tau_disc`: minimum composite similarity (0..=1) for a proposed
    /// connection to be emitted.
    pub connection_similarity_threshold: f64,
    pub description_weight: f64,
    pub name_weight: f64,
    pub enable_transitive_discovery: bool,
    pub enable_domain_rules: bool,
    pub confidence_consolidation_method: ConfidenceConsolidationMethod,
    pub min_discovery_confidence: f64,
    pub max_discoveries_per_run: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            entity_similarity_threshold: 80.0,
            entity_acronym_threshold: 98.0,
            enable_acronym_matching: true,
            connection_similarity_threshold: 0.6,
            description_weight: 0.4,
            name_weight: 0.6,
            enable_transitive_discovery: true,
            enable_domain_rules: true,
            confidence_consolidation_method: ConfidenceConsolidationMethod::Max,
            min_discovery_confidence: 0.5,
            max_discoveries_per_run: 1000,
        }
    }
}

impl ResolutionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_range(
            "entity_similarity_threshold",
            self.entity_similarity_threshold,
            0.0,
            100.0,
        )?;
        Self::check_range(
            "entity_acronym_threshold",
            self.entity_acronym_threshold,
            0.0,
            100.0,
        )?;
        Self::check_range(
            "connection_similarity_threshold",
            self.connection_similarity_threshold,
            0.0,
            1.0,
        )?;
        Self::check_range("description_weight", self.description_weight, 0.0, 1.0)?;
        Self::check_range("name_weight", self.name_weight, 0.0, 1.0)?;
        Self::check_range(
            "min_discovery_confidence",
            self.min_discovery_confidence,
            0.0,
            1.0,
        )?;
        Ok(())
    }

    fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
        if value < min || value > max {
            Err(ConfigError::ThresholdOutOfRange {
                field,
                value: value.to_string(),
                min: if min == 0.0 { "0" } else { "nonzero" },
                max: if max == 1.0 { "1" } else { "100" },
            })
        } else {
            Ok(())
        }
    }
}

use super::ids::EntityId;
use super::relationship::PredicateType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The four discovery methods, also used as the string stored in
/// `ConnectionDiscovery::discovery_method` and the
/// `metadata["discovery_methods"]` set built during dedup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMethod {
    SimilarityAnalysis,
    TransitiveInference,
    DomainRules,
    PatternMatching,
}

impl DiscoveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMethod::SimilarityAnalysis => "similarity_analysis",
            DiscoveryMethod::TransitiveInference => "transitive_inference",
            DiscoveryMethod::DomainRules => "domain_rules",
            DiscoveryMethod::PatternMatching => "pattern_matching",
        }
    }
}

/// A newly proposed (not extracted) relationship between two existing
/// canonical entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionDiscovery {
    pub id: String,
    pub subject_entity_id: EntityId,
    pub object_entity_id: EntityId,
    pub suggested_predicate: PredicateType,
    pub confidence: f64,
    pub discovery_method: DiscoveryMethod,
    #[serde(default)]
    pub supporting_evidence: Vec<String>,
    #[serde(default)]
    pub similarity_features: HashMap<String, f64>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

use super::ids::{EntityId, RelationshipId};
use serde::{Deserialize, Serialize};

/// Closed set of relationship predicates this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateType {
    #[serde(rename = "hasDefinition")]
    HasDefinition,
    #[serde(rename = "calculatedBy")]
    CalculatedBy,
    #[serde(rename = "belongsTo")]
    BelongsTo,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "hasType")]
    HasType,
    #[serde(rename = "dependsOn")]
    DependsOn,
    #[serde(rename = "derivedFrom")]
    DerivedFrom,
    #[serde(rename = "measures")]
    Measures,
    #[serde(rename = "locatedIn")]
    LocatedIn,
}

impl PredicateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateType::HasDefinition => "hasDefinition",
            PredicateType::CalculatedBy => "calculatedBy",
            PredicateType::BelongsTo => "belongsTo",
            PredicateType::Contains => "contains",
            PredicateType::HasType => "hasType",
            PredicateType::DependsOn => "dependsOn",
            PredicateType::DerivedFrom => "derivedFrom",
            PredicateType::Measures => "measures",
            PredicateType::LocatedIn => "locatedIn",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub subject_id: EntityId,
    pub predicate: PredicateType,
    pub object_id: EntityId,
    pub confidence: f64,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub source_chunk_id: Option<String>,
}

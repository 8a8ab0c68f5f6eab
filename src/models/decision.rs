use super::ids::{EntityId, RelationshipId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipResolutionAction {
    KeepCanonical,
    Consolidate,
}

/// Records why a set of input entities collapsed into one canonical entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityResolutionDecision {
    pub id: String,
    pub canonical_entity_id: EntityId,
    pub duplicate_entity_ids: Vec<EntityId>,
    pub similarity_score: f64,
    pub resolution_method: String,
    pub confidence: f64,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

/// Records why a set of input relationships collapsed into one relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipResolutionDecision {
    pub id: String,
    pub action: RelationshipResolutionAction,
    pub canonical_relationship_id: RelationshipId,
    pub merged_relationship_ids: Vec<RelationshipId>,
    pub consolidated_confidence: f64,
    pub consolidation_method: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

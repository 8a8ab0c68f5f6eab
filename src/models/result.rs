use super::config::ResolutionConfig;
use super::decision::{EntityResolutionDecision, RelationshipResolutionDecision};
use super::discovery::{ConnectionDiscovery, DiscoveryMethod};
use super::entity::CanonicalEntity;
use super::ids::EntityId;
use super::relationship::Relationship;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ResolutionStats {
    pub entities_processed: usize,
    pub entities_merged: usize,
    pub relationships_processed: usize,
    pub relationships_consolidated: usize,
    pub new_connections_discovered: usize,
    pub duplicate_entities_removed: usize,
    pub resolution_duration_seconds: f64,
}

impl ResolutionStats {
    pub fn entity_merge_rate(&self) -> f64 {
        if self.entities_processed == 0 {
            0.0
        } else {
            self.entities_merged as f64 / self.entities_processed as f64
        }
    }

    pub fn relationship_consolidation_rate(&self) -> f64 {
        if self.relationships_processed == 0 {
            0.0
        } else {
            self.relationships_consolidated as f64 / self.relationships_processed as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub entity_decisions: Vec<EntityResolutionDecision>,
    pub relationship_decisions: Vec<RelationshipResolutionDecision>,
    pub discovered_connections: Vec<ConnectionDiscovery>,
    pub canonical_entities: Vec<CanonicalEntity>,
    pub consolidated_relationships: Vec<Relationship>,
    pub stats: ResolutionStats,
    /// Snapshot of the config this run was resolved with.
    pub config_used: ResolutionConfig,
    /// Ids of the upstream extraction runs that produced `entities` and
    /// `relationships`. The core does not interpret these, only carries
    /// them through — run ids and timestamps are stamped by the caller
    /// (`spec.md`'s persistence layer owns run-scoped identity).
    pub source_run_ids: Vec<String>,
}

impl ResolutionResult {
    /// Duplicate entity id -> canonical entity id, derived from
    /// `entity_decisions`.
    pub fn merged_entity_mapping(&self) -> HashMap<EntityId, EntityId> {
        let mut mapping = HashMap::new();
        for decision in &self.entity_decisions {
            for duplicate_id in &decision.duplicate_entity_ids {
                mapping.insert(duplicate_id.clone(), decision.canonical_entity_id.clone());
            }
        }
        mapping
    }

    pub fn discoveries_by_method(&self, method: DiscoveryMethod) -> Vec<&ConnectionDiscovery> {
        self.discovered_connections
            .iter()
            .filter(|d| d.discovery_method == method)
            .collect()
    }

    pub fn high_confidence_discoveries(&self, min_confidence: f64) -> Vec<&ConnectionDiscovery> {
        self.discovered_connections
            .iter()
            .filter(|d| d.confidence >= min_confidence)
            .collect()
    }
}

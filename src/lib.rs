//! Deterministic entity resolution, relationship consolidation, and
//! connection discovery for a business-metrics knowledge graph.
//!
//! The public entry point is [`resolve`], which runs a fixed three-stage
//! pipeline: entity resolution, relationship resolution, then connection
//! discovery. Every stage is deterministic given the same input and
//! [`ResolutionConfig`] — grouping operations iterate in first-observed
//! order and the final discovery list is fully ordered, so the same input
//! always produces byte-identical output.

pub mod connection_discovery;
pub mod entity_resolution;
pub mod errors;
pub mod fuzzy;
pub mod models;
pub mod relationship_resolution;

#[cfg(feature = "telemetry")]
pub mod telemetry;

use errors::{ResolutionError, ValidationError};
use models::{Entity, EntityId, Relationship, RelationshipId, ResolutionConfig, ResolutionResult, ResolutionStats};
use std::collections::HashSet;
use std::time::Instant;
use tracing::info;

/// Runs the full resolution pipeline over `entities` and `relationships`.
///
/// Validates `config` and the inputs first: duplicate ids, relationships
/// referencing unknown entities, and out-of-range confidences are all
/// rejected before any resolution work happens, since a partially-resolved
/// result would not be reproducible. `source_run_ids` identifies the
/// upstream extraction runs `entities`/`relationships` came from and is
/// carried through to the result unchanged; this crate assigns no run id
/// or timestamp of its own, since the caller's persistence layer owns
/// run-scoped identity.
pub fn resolve(
    entities: &[Entity],
    relationships: &[Relationship],
    config: &ResolutionConfig,
    source_run_ids: &[String],
) -> Result<ResolutionResult, ResolutionError> {
    config.validate()?;
    validate_inputs(entities, relationships)?;

    let span = tracing::info_span!(
        "resolve",
        entities_in = entities.len(),
        relationships_in = relationships.len()
    );
    let _enter = span.enter();

    let started_at = Instant::now();

    let (canonical_entities, entity_decisions, remap) = entity_resolution::resolve(entities, config);
    let (consolidated_relationships, relationship_decisions) = relationship_resolution::resolve(relationships, &remap, config);
    let discovered_connections = connection_discovery::discover(&canonical_entities, &consolidated_relationships, config);

    let entities_merged: usize = entity_decisions.iter().map(|d| d.duplicate_entity_ids.len()).sum();

    let stats = ResolutionStats {
        entities_processed: entities.len(),
        entities_merged,
        relationships_processed: relationships.len(),
        relationships_consolidated: relationship_decisions.len(),
        new_connections_discovered: discovered_connections.len(),
        // Computed identically to `entities_merged`: every duplicate entity
        // folded into a canonical one is, by construction, also removed
        // from the canonical set.
        duplicate_entities_removed: entities_merged,
        resolution_duration_seconds: started_at.elapsed().as_secs_f64(),
    };

    info!(
        canonical_entities = canonical_entities.len(),
        consolidated_relationships = consolidated_relationships.len(),
        discovered_connections = stats.new_connections_discovered,
        duration_seconds = stats.resolution_duration_seconds,
        "resolution pipeline complete"
    );

    Ok(ResolutionResult {
        entity_decisions,
        relationship_decisions,
        discovered_connections,
        canonical_entities,
        consolidated_relationships,
        stats,
        config_used: config.clone(),
        source_run_ids: source_run_ids.to_vec(),
    })
}

fn validate_inputs(entities: &[Entity], relationships: &[Relationship]) -> Result<(), ValidationError> {
    let mut seen_entity_ids: HashSet<&EntityId> = HashSet::new();
    for entity in entities {
        if !seen_entity_ids.insert(&entity.id) {
            return Err(ValidationError::DuplicateEntityId(entity.id.to_string()));
        }
        if !(0.0..=1.0).contains(&entity.confidence) {
            return Err(ValidationError::EntityConfidenceOutOfRange {
                entity_id: entity.id.to_string(),
                confidence: entity.confidence,
            });
        }
    }

    let mut seen_relationship_ids: HashSet<&RelationshipId> = HashSet::new();
    for relationship in relationships {
        if !seen_relationship_ids.insert(&relationship.id) {
            return Err(ValidationError::DuplicateRelationshipId(relationship.id.to_string()));
        }
        if !(0.0..=1.0).contains(&relationship.confidence) {
            return Err(ValidationError::RelationshipConfidenceOutOfRange {
                relationship_id: relationship.id.to_string(),
                confidence: relationship.confidence,
            });
        }
        if !seen_entity_ids.contains(&relationship.subject_id) {
            return Err(ValidationError::UnknownEntityReference {
                relationship_id: relationship.id.to_string(),
                entity_id: relationship.subject_id.to_string(),
            });
        }
        if !seen_entity_ids.contains(&relationship.object_id) {
            return Err(ValidationError::UnknownEntityReference {
                relationship_id: relationship.id.to_string(),
                entity_id: relationship.object_id.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{EntityType, PredicateType};

    fn entity(id: &str, ty: EntityType, name: &str) -> Entity {
        Entity {
            id: EntityId::from(id),
            entity_type: ty,
            name: name.to_string(),
            description: None,
            confidence: 0.9,
            attributes: Default::default(),
            source_chunk_id: None,
        }
    }

    fn relationship(id: &str, subject: &str, predicate: PredicateType, object: &str) -> Relationship {
        Relationship {
            id: RelationshipId::from(id),
            subject_id: EntityId::from(subject),
            predicate,
            object_id: EntityId::from(object),
            confidence: 0.9,
            context: None,
            source_chunk_id: None,
        }
    }

    #[test]
    fn rejects_duplicate_entity_ids() {
        let entities = vec![entity("1", EntityType::Kpi, "a"), entity("1", EntityType::Kpi, "b")];
        let result = resolve(&entities, &[], &ResolutionConfig::default(), &[]);
        assert!(matches!(result, Err(ResolutionError::Validation(ValidationError::DuplicateEntityId(_)))));
    }

    #[test]
    fn rejects_relationship_with_unknown_entity() {
        let entities = vec![entity("1", EntityType::Kpi, "a")];
        let relationships = vec![relationship("r1", "1", PredicateType::DependsOn, "missing")];
        let result = resolve(&entities, &relationships, &ResolutionConfig::default(), &[]);
        assert!(matches!(
            result,
            Err(ResolutionError::Validation(ValidationError::UnknownEntityReference { .. }))
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = ResolutionConfig::default();
        config.name_weight = 2.0;
        let result = resolve(&[], &[], &config, &[]);
        assert!(matches!(result, Err(ResolutionError::Config(_))));
    }

    #[test]
    fn trivial_duplicate_entities_merge_into_one_canonical() {
        let entities = vec![entity("1", EntityType::Kpi, "Customer Churn"), entity("2", EntityType::Kpi, "Customer Churn")];
        let result = resolve(&entities, &[], &ResolutionConfig::default(), &[]).unwrap();

        assert_eq!(result.canonical_entities.len(), 1);
        assert_eq!(result.stats.entities_processed, 2);
        assert_eq!(result.stats.entities_merged, 1);
        assert_eq!(result.stats.duplicate_entities_removed, 1);
    }

    #[test]
    fn empty_input_produces_empty_result() {
        let result = resolve(&[], &[], &ResolutionConfig::default(), &[]).unwrap();
        assert!(result.canonical_entities.is_empty());
        assert!(result.consolidated_relationships.is_empty());
        assert!(result.discovered_connections.is_empty());
        assert_eq!(result.stats.entities_processed, 0);
    }
}

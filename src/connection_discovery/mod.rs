mod dedup;
mod domain_rules;
mod method_a;
mod patterns;
mod prep;
mod similarity;
mod transitive;

use crate::models::{ConnectionDiscovery, Entity, Relationship, ResolutionConfig};
use tracing::{debug, info};

/// Runs all four discovery methods, deduplicates their proposals, and
/// applies the confidence floor and run-size cap that the orchestration
/// layer enforces downstream of discovery.
pub fn discover(entities: &[Entity], relationships: &[Relationship], config: &ResolutionConfig) -> Vec<ConnectionDiscovery> {
    let span = tracing::info_span!("connection_discovery", entities = entities.len(), relationships = relationships.len());
    let _enter = span.enter();

    let existing_pairs = prep::existing_pairs(relationships);
    let patterns = prep::build_patterns(entities, relationships);

    let mut discoveries = method_a::discover(entities, &existing_pairs, &patterns, config);
    debug!(count = discoveries.len(), method = "similarity_analysis", "discovery method complete");

    if config.enable_transitive_discovery {
        let found = transitive::discover(entities, relationships, &existing_pairs);
        debug!(count = found.len(), method = "transitive_inference", "discovery method complete");
        discoveries.extend(found);
    }

    if config.enable_domain_rules {
        let found = domain_rules::discover(entities, &existing_pairs, config);
        debug!(count = found.len(), method = "domain_rules", "discovery method complete");
        discoveries.extend(found);
    }

    let found = patterns::discover(entities, &existing_pairs, &patterns, config);
    debug!(count = found.len(), method = "pattern_matching", "discovery method complete");
    discoveries.extend(found);

    let mut deduped = dedup::deduplicate(discoveries);
    deduped.retain(|d| d.confidence >= config.min_discovery_confidence);
    deduped.truncate(config.max_discoveries_per_run);

    info!(discoveries = deduped.len(), "connection discovery complete");
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, EntityType, PredicateType, RelationshipId};
    use indexmap::IndexMap;

    fn entity(id: &str, ty: EntityType, name: &str) -> Entity {
        Entity {
            id: EntityId::from(id),
            entity_type: ty,
            name: name.to_string(),
            description: None,
            confidence: 0.9,
            attributes: IndexMap::new(),
            source_chunk_id: None,
        }
    }

    #[test]
    fn discover_respects_min_confidence_floor() {
        let entities = vec![
            entity("1", EntityType::Kpi, "Customer Churn"),
            entity("2", EntityType::Metric, "Customer Churn Rate"),
        ];
        let mut config = ResolutionConfig::default();
        config.min_discovery_confidence = 1.1;

        let discoveries = discover(&entities, &[], &config);
        assert!(discoveries.is_empty());
    }

    #[test]
    fn discover_truncates_to_max_per_run() {
        let entities: Vec<Entity> = (0..6)
            .map(|i| entity(&format!("k{i}"), EntityType::Kpi, &format!("Churn {i}")))
            .chain((0..6).map(|i| entity(&format!("m{i}"), EntityType::Metric, &format!("Churn {i}"))))
            .collect();
        let mut config = ResolutionConfig::default();
        config.connection_similarity_threshold = 0.0;
        config.min_discovery_confidence = 0.0;
        config.max_discoveries_per_run = 3;

        let discoveries = discover(&entities, &[], &config);
        assert!(discoveries.len() <= 3);
    }

    #[test]
    fn disabling_transitive_and_domain_rules_leaves_similarity_and_patterns() {
        let relationships = vec![Relationship {
            id: RelationshipId::from("r1"),
            subject_id: EntityId::from("a"),
            predicate: PredicateType::DependsOn,
            object_id: EntityId::from("b"),
            confidence: 0.9,
            context: None,
            source_chunk_id: None,
        }];
        let entities = vec![
            entity("a", EntityType::Kpi, "Churn"),
            entity("b", EntityType::Metric, "Churn"),
            entity("c", EntityType::Metric, "Churn Rate"),
        ];
        let mut config = ResolutionConfig::default();
        config.enable_transitive_discovery = false;
        config.enable_domain_rules = false;

        let discoveries = discover(&entities, &relationships, &config);
        assert!(discoveries.iter().all(|d| {
            d.discovery_method == crate::models::DiscoveryMethod::SimilarityAnalysis
                || d.discovery_method == crate::models::DiscoveryMethod::PatternMatching
        }));
    }
}

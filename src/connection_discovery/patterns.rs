use super::prep;
use super::similarity::entity_similarity;
use crate::models::{ConnectionDiscovery, DiscoveryMethod, Entity, EntityId, EntityType, PredicateType, ResolutionConfig};
use itertools::iproduct;
use serde_json::json;
use std::collections::{HashMap, HashSet};

/// Method D: for every ordered pair of distinct, unconnected entities,
/// suggests the most common predicate observed for that type pair, gated
/// directly on the combined pattern/similarity confidence.
pub fn discover(
    entities: &[Entity],
    existing_pairs: &HashSet<(EntityId, EntityId)>,
    patterns: &HashMap<(EntityType, EntityType), Vec<PredicateType>>,
    config: &ResolutionConfig,
) -> Vec<ConnectionDiscovery> {
    let mut discoveries = Vec::new();

    for (entity1, entity2) in iproduct!(entities, entities) {
        if entity1.id == entity2.id {
            continue;
        }
        if prep::are_connected(&entity1.id, &entity2.id, existing_pairs) {
            continue;
        }

        let type_pair = (entity1.entity_type, entity2.entity_type);
        let Some(common_predicates) = patterns.get(&type_pair) else { continue };
        if common_predicates.is_empty() {
            continue;
        }

        let suggested_predicate = common_predicates[0];
        let pattern_strength = (common_predicates.len() as f64 / 10.0).min(1.0);
        let (similarity, _) = entity_similarity(entity1, entity2, config);
        let pattern_confidence = pattern_strength * 0.6 + similarity * 0.4;

        if pattern_confidence < config.connection_similarity_threshold {
            continue;
        }

        discoveries.push(ConnectionDiscovery {
            id: format!("pattern-{}-{}", entity1.id, entity2.id),
            subject_entity_id: entity1.id.clone(),
            object_entity_id: entity2.id.clone(),
            suggested_predicate,
            confidence: pattern_confidence,
            discovery_method: DiscoveryMethod::PatternMatching,
            supporting_evidence: vec![
                format!(
                    "Common pattern: {} --[{}]--> {}",
                    entity1.entity_type.as_str(),
                    suggested_predicate.as_str(),
                    entity2.entity_type.as_str()
                ),
                format!("Pattern frequency: {}", common_predicates.len()),
            ],
            similarity_features: [
                ("pattern_strength".to_string(), pattern_confidence),
                ("pattern_frequency".to_string(), common_predicates.len() as f64),
            ]
            .into_iter()
            .collect(),
            metadata: [
                ("entity_type_pair".to_string(), json!([entity1.entity_type.as_str(), entity2.entity_type.as_str()])),
                (
                    "available_patterns".to_string(),
                    json!(common_predicates.iter().map(PredicateType::as_str).collect::<Vec<_>>()),
                ),
            ]
            .into_iter()
            .collect(),
        });
    }

    discoveries
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn proposes_most_common_predicate_for_type_pair() {
        let entities = vec![entity("a", EntityType::Column, "id"), entity("b", EntityType::Table, "orders")];
        let existing_pairs = HashSet::new();
        let mut patterns = HashMap::new();
        patterns.insert((EntityType::Column, EntityType::Table), vec![PredicateType::BelongsTo]);
        let mut config = ResolutionConfig::default();
        config.connection_similarity_threshold = 0.1;

        let discoveries = discover(&entities, &existing_pairs, &patterns, &config);
        assert_eq!(discoveries.len(), 1);
        assert_eq!(discoveries[0].suggested_predicate, PredicateType::BelongsTo);
    }

    #[test]
    fn no_pattern_for_type_pair_yields_nothing() {
        let entities = vec![entity("a", EntityType::Column, "id"), entity("b", EntityType::Table, "orders")];
        let existing_pairs = HashSet::new();
        let patterns = HashMap::new();
        let config = ResolutionConfig::default();

        let discoveries = discover(&entities, &existing_pairs, &patterns, &config);
        assert!(discoveries.is_empty());
    }
}

use super::prep;
use super::similarity::entity_similarity;
use crate::models::{ConnectionDiscovery, DiscoveryMethod, Entity, EntityType, PredicateType, ResolutionConfig};
use rayon::prelude::*;
use serde_json::json;
use std::collections::{HashMap, HashSet};

/// Method A: proposes a connection for every unordered pair of entities not
/// already connected, when their composite similarity clears the
/// configured threshold.
pub fn discover(
    entities: &[Entity],
    existing_pairs: &HashSet<(crate::models::EntityId, crate::models::EntityId)>,
    patterns: &HashMap<(EntityType, EntityType), Vec<PredicateType>>,
    config: &ResolutionConfig,
) -> Vec<ConnectionDiscovery> {
    (0..entities.len())
        .into_par_iter()
        .map(|i| {
            let entity1 = &entities[i];
            let mut found = Vec::new();

            for entity2 in &entities[i + 1..] {
                if prep::are_connected(&entity1.id, &entity2.id, existing_pairs) {
                    continue;
                }

                let (similarity, features) = entity_similarity(entity1, entity2, config);
                if similarity < config.connection_similarity_threshold {
                    continue;
                }

                let Some(predicate) = suggest_predicate(entity1, entity2, patterns) else {
                    continue;
                };

                found.push(ConnectionDiscovery {
                    id: format!("sim-{}-{}", entity1.id, entity2.id),
                    subject_entity_id: entity1.id.clone(),
                    object_entity_id: entity2.id.clone(),
                    suggested_predicate: predicate,
                    confidence: similarity,
                    discovery_method: DiscoveryMethod::SimilarityAnalysis,
                    supporting_evidence: vec![
                        format!("Name similarity: {:.2}", features.get("name_similarity").copied().unwrap_or(0.0)),
                        format!(
                            "Description similarity: {:.2}",
                            features.get("description_similarity").copied().unwrap_or(0.0)
                        ),
                        format!("Attribute overlap: {:.2}", features.get("attribute_overlap").copied().unwrap_or(0.0)),
                    ],
                    similarity_features: features,
                    metadata: [
                        ("entity1_name".to_string(), json!(entity1.name)),
                        ("entity2_name".to_string(), json!(entity2.name)),
                        ("entity1_type".to_string(), json!(entity1.entity_type.as_str())),
                        ("entity2_type".to_string(), json!(entity2.entity_type.as_str())),
                    ]
                    .into_iter()
                    .collect(),
                });
            }

            found
        })
        .flatten()
        .collect()
}

/// `patterns[..][0]` when available (the pattern suggester deliberately
/// only consults the single most frequent predicate, even though patterns
/// stores up to three), else a fixed default table, else `dependsOn`.
fn suggest_predicate(
    e1: &Entity,
    e2: &Entity,
    patterns: &HashMap<(EntityType, EntityType), Vec<PredicateType>>,
) -> Option<PredicateType> {
    let type_pair = (e1.entity_type, e2.entity_type);
    if let Some(preds) = patterns.get(&type_pair) {
        return preds.first().copied();
    }

    use EntityType::*;
    use PredicateType::*;
    let default = match type_pair {
        (Kpi, Metric) => DependsOn,
        (Metric, Formula) => CalculatedBy,
        (Metric, Table) => DerivedFrom,
        (Column, Table) => BelongsTo,
        (Definition, Kpi) => HasDefinition,
        _ => DependsOn,
    };
    Some(default)
}

use super::prep;
use crate::models::{ConnectionDiscovery, DiscoveryMethod, Entity, EntityId, EntityType, PredicateType, Relationship};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde_json::json;
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref TRANSITIVE_RULES: HashMap<(PredicateType, PredicateType), PredicateType> = {
        use PredicateType::*;
        HashMap::from([
            ((BelongsTo, BelongsTo), BelongsTo),
            ((DependsOn, DependsOn), DependsOn),
            ((DerivedFrom, DerivedFrom), DerivedFrom),
            ((Contains, BelongsTo), Contains),
            ((HasDefinition, DependsOn), HasDefinition),
        ])
    };
    static ref TRANSITIVITY_COMPATIBLE_TYPES: HashSet<(EntityType, EntityType)> = {
        use EntityType::*;
        HashSet::from([(Kpi, Metric), (Metric, Table), (Column, Table), (Formula, Kpi)])
    };
}

fn types_compatible_for_transitivity(a: EntityType, b: EntityType) -> bool {
    TRANSITIVITY_COMPATIBLE_TYPES.contains(&(a, b)) || TRANSITIVITY_COMPATIBLE_TYPES.contains(&(b, a))
}

/// Max confidence over every relationship from `from` to `to` regardless
/// of its predicate, mirroring the original's constituent-edge lookup.
fn edge_confidence(relationships: &[Relationship], from: &EntityId, to: &EntityId) -> f64 {
    relationships
        .iter()
        .filter(|r| &r.subject_id == from && &r.object_id == to)
        .map(|r| r.confidence)
        .fold(0.0, f64::max)
}

/// Method B: two-hop `A --p1--> X --p2--> B` chains where `(p1, p2)` has a
/// known transitive predicate and `A`/`B` aren't already directly
/// connected.
pub fn discover(
    entities: &[Entity],
    relationships: &[Relationship],
    existing_pairs: &HashSet<(EntityId, EntityId)>,
) -> Vec<ConnectionDiscovery> {
    let entity_map: HashMap<&EntityId, &Entity> = entities.iter().map(|e| (&e.id, e)).collect();

    let mut outgoing: IndexMap<EntityId, Vec<(EntityId, PredicateType)>> = IndexMap::new();
    for rel in relationships {
        outgoing.entry(rel.subject_id.clone()).or_default().push((rel.object_id.clone(), rel.predicate));
    }

    let mut discoveries = Vec::new();

    for entity1 in entities {
        let Some(hop1) = outgoing.get(&entity1.id) else { continue };
        for (intermediate_id, p1) in hop1 {
            let Some(hop2) = outgoing.get(intermediate_id) else { continue };
            for (target_id, p2) in hop2 {
                if target_id == &entity1.id {
                    continue;
                }
                if prep::are_connected(&entity1.id, target_id, existing_pairs) {
                    continue;
                }

                let (Some(&target_entity), Some(&intermediate_entity)) =
                    (entity_map.get(target_id), entity_map.get(intermediate_id))
                else {
                    continue;
                };

                let Some(&transitive_predicate) = TRANSITIVE_RULES.get(&(*p1, *p2)) else {
                    continue;
                };

                let rel1_confidence = edge_confidence(relationships, &entity1.id, intermediate_id);
                let rel2_confidence = edge_confidence(relationships, intermediate_id, target_id);
                let mut confidence = (rel1_confidence * rel2_confidence).sqrt() * 0.8;
                if types_compatible_for_transitivity(entity1.entity_type, target_entity.entity_type) {
                    confidence *= 1.1;
                }
                let confidence = confidence.min(1.0);

                discoveries.push(ConnectionDiscovery {
                    id: format!("transitive-{}-{}", entity1.id, target_id),
                    subject_entity_id: entity1.id.clone(),
                    object_entity_id: target_id.clone(),
                    suggested_predicate: transitive_predicate,
                    confidence,
                    discovery_method: DiscoveryMethod::TransitiveInference,
                    supporting_evidence: vec![
                        format!("{} --[{}]--> {}", entity1.name, p1.as_str(), intermediate_entity.name),
                        format!("{} --[{}]--> {}", intermediate_entity.name, p2.as_str(), target_entity.name),
                        format!("Inferred: {} --[{}]--> {}", entity1.name, transitive_predicate.as_str(), target_entity.name),
                    ],
                    similarity_features: [("transitive_strength".to_string(), confidence)].into_iter().collect(),
                    metadata: [
                        ("intermediate_entity_id".to_string(), json!(intermediate_id.to_string())),
                        ("intermediate_entity_name".to_string(), json!(intermediate_entity.name)),
                        ("path_predicates".to_string(), json!([p1.as_str(), p2.as_str()])),
                    ]
                    .into_iter()
                    .collect(),
                });
            }
        }
    }

    discoveries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelationshipId;

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

    fn rel(id: &str, subject: &str, predicate: PredicateType, object: &str, confidence: f64) -> Relationship {
        Relationship {
            id: RelationshipId::from(id),
            subject_id: EntityId::from(subject),
            predicate,
            object_id: EntityId::from(object),
            confidence,
            context: None,
            source_chunk_id: None,
        }
    }

    #[test]
    fn infers_chain_with_expected_confidence() {
        let entities = vec![
            entity("a", EntityType::Table, "orders"),
            entity("x", EntityType::Table, "order_items"),
            entity("b", EntityType::Table, "products"),
        ];
        let relationships = vec![
            rel("r1", "a", PredicateType::BelongsTo, "x", 0.9),
            rel("r2", "x", PredicateType::BelongsTo, "b", 0.8),
        ];
        let existing_pairs = prep::existing_pairs(&relationships);

        let discoveries = discover(&entities, &relationships, &existing_pairs);

        assert_eq!(discoveries.len(), 1);
        assert_eq!(discoveries[0].suggested_predicate, PredicateType::BelongsTo);
        let expected = (0.9_f64 * 0.8).sqrt() * 0.8;
        assert!((discoveries[0].confidence - expected).abs() < 1e-9);
    }

    #[test]
    fn skips_self_loop_back_to_origin() {
        let entities = vec![entity("a", EntityType::Table, "a"), entity("b", EntityType::Table, "b")];
        let relationships = vec![
            rel("r1", "a", PredicateType::BelongsTo, "b", 0.9),
            rel("r2", "b", PredicateType::BelongsTo, "a", 0.9),
        ];
        let existing_pairs = prep::existing_pairs(&relationships);
        let discoveries = discover(&entities, &relationships, &existing_pairs);
        assert!(discoveries.is_empty());
    }
}

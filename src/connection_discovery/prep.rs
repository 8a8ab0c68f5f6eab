use crate::models::{Entity, EntityId, EntityType, PredicateType, Relationship};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Symmetrized set of entity-id pairs already connected by some existing
/// relationship. Built directly from the relationship list, independent of
/// whether both endpoints are still present in `entities`.
pub fn existing_pairs(relationships: &[Relationship]) -> HashSet<(EntityId, EntityId)> {
    let mut pairs = HashSet::new();
    for rel in relationships {
        pairs.insert((rel.subject_id.clone(), rel.object_id.clone()));
        pairs.insert((rel.object_id.clone(), rel.subject_id.clone()));
    }
    pairs
}

pub fn are_connected(a: &EntityId, b: &EntityId, pairs: &HashSet<(EntityId, EntityId)>) -> bool {
    pairs.contains(&(a.clone(), b.clone()))
}

/// For each ordered `(subject_type, object_type)` pair, the up-to-3 most
/// frequent predicates seen on existing relationships between entities of
/// those types, most frequent first. Ties are broken by first-seen order
/// among predicates for that type pair (mirrors `Counter.most_common`'s
/// stable tie-break).
pub fn build_patterns(
    entities: &[Entity],
    relationships: &[Relationship],
) -> HashMap<(EntityType, EntityType), Vec<PredicateType>> {
    let entity_map: HashMap<&EntityId, &Entity> = entities.iter().map(|e| (&e.id, e)).collect();

    let mut counts: IndexMap<(EntityType, EntityType), IndexMap<PredicateType, u32>> = IndexMap::new();
    for rel in relationships {
        let (Some(subject), Some(object)) = (entity_map.get(&rel.subject_id), entity_map.get(&rel.object_id)) else {
            continue;
        };
        let type_pair = (subject.entity_type, object.entity_type);
        *counts.entry(type_pair).or_default().entry(rel.predicate).or_insert(0) += 1;
    }

    let mut patterns = HashMap::new();
    for (type_pair, predicate_counts) in counts {
        let mut entries: Vec<(PredicateType, u32)> = predicate_counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(3);
        patterns.insert(type_pair, entries.into_iter().map(|(p, _)| p).collect());
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelationshipId;

    fn entity(id: &str, ty: EntityType) -> Entity {
        Entity {
            id: EntityId::from(id),
            entity_type: ty,
            name: id.to_string(),
            description: None,
            confidence: 0.9,
            attributes: Default::default(),
            source_chunk_id: None,
        }
    }

    fn rel(subject: &str, predicate: PredicateType, object: &str) -> Relationship {
        Relationship {
            id: RelationshipId::from("r"),
            subject_id: EntityId::from(subject),
            predicate,
            object_id: EntityId::from(object),
            confidence: 0.9,
            context: None,
            source_chunk_id: None,
        }
    }

    #[test]
    fn existing_pairs_are_symmetric() {
        let pairs = existing_pairs(&[rel("a", PredicateType::DependsOn, "b")]);
        assert!(are_connected(&EntityId::from("a"), &EntityId::from("b"), &pairs));
        assert!(are_connected(&EntityId::from("b"), &EntityId::from("a"), &pairs));
        assert!(!are_connected(&EntityId::from("a"), &EntityId::from("c"), &pairs));
    }

    #[test]
    fn patterns_keep_top_three_most_frequent() {
        let entities = vec![entity("a", EntityType::Kpi), entity("b", EntityType::Metric)];
        let relationships = vec![
            rel("a", PredicateType::DependsOn, "b"),
            rel("a", PredicateType::DependsOn, "b"),
            rel("a", PredicateType::Measures, "b"),
        ];
        let patterns = build_patterns(&entities, &relationships);
        let top = &patterns[&(EntityType::Kpi, EntityType::Metric)];
        assert_eq!(top[0], PredicateType::DependsOn);
        assert_eq!(top[1], PredicateType::Measures);
    }
}

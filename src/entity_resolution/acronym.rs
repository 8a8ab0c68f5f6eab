use crate::fuzzy::ratio;
use crate::models::{Entity, EntityId, EntityResolutionDecision, IdRemap};
use indexmap::IndexMap;
use serde_json::json;
use std::collections::HashSet;

fn acronym_of(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Folds single-word entities that are acronyms of a multi-word entity of
/// the same type into that multi-word entity, mutating `canonical` and
/// `remap` in place. Returns the decisions recorded, one per fold.
///
/// A single-word entity can be claimed by at most one multi-word entity:
/// the id-remap this crate maintains must be a function, so once a
/// single-word entity is folded it is no longer eligible for a second
/// acronym match even if another multi-word name produces the same
/// acronym.
pub fn merge_acronyms(
    canonical: &mut IndexMap<EntityId, Entity>,
    remap: &mut IdRemap,
    acronym_threshold: f64,
) -> Vec<EntityResolutionDecision> {
    let multi_word_ids: Vec<EntityId> = canonical
        .values()
        .filter(|e| e.name.contains(' '))
        .map(|e| e.id.clone())
        .collect();
    let single_word_ids: Vec<EntityId> = canonical
        .values()
        .filter(|e| !e.name.contains(' '))
        .map(|e| e.id.clone())
        .collect();

    let mut claimed: HashSet<EntityId> = HashSet::new();
    let mut decisions = Vec::new();
    let mut to_remove: Vec<EntityId> = Vec::new();

    for multi_id in &multi_word_ids {
        let multi = canonical.get(multi_id).expect("multi-word id is canonical").clone();
        let acronym = acronym_of(&multi.name);

        for single_id in &single_word_ids {
            if claimed.contains(single_id) {
                continue;
            }
            let single = canonical.get(single_id).expect("single-word id is canonical");
            if single.entity_type != multi.entity_type {
                continue;
            }

            let score = ratio(&acronym, &single.name.to_uppercase());
            if score >= acronym_threshold {
                decisions.push(EntityResolutionDecision {
                    id: format!("acronym-{}-{}", multi.id, single.id),
                    canonical_entity_id: multi.id.clone(),
                    duplicate_entity_ids: vec![single.id.clone()],
                    similarity_score: score / 100.0,
                    resolution_method: "acronym_match".to_string(),
                    confidence: 0.9,
                    metadata: [
                        ("acronym".to_string(), json!(acronym)),
                        ("full_form".to_string(), json!(multi.name)),
                        ("acronym_form".to_string(), json!(single.name)),
                    ]
                    .into_iter()
                    .collect(),
                });

                claimed.insert(single_id.clone());
                to_remove.push(single_id.clone());
                remap.retarget_and_insert(single_id.clone(), multi_id.clone());
                break;
            }
        }
    }

    for id in to_remove {
        canonical.shift_remove(&id);
    }

    decisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityType;

    fn entity(id: &str, name: &str) -> Entity {
        Entity {
            id: EntityId::from(id),
            entity_type: EntityType::Metric,
            name: name.to_string(),
            description: None,
            confidence: 0.8,
            attributes: Default::default(),
            source_chunk_id: None,
        }
    }

    #[test]
    fn acronym_folds_single_word_into_multi_word() {
        let mut canonical = IndexMap::new();
        canonical.insert(EntityId::from("m"), entity("m", "Customer Acquisition Cost"));
        canonical.insert(EntityId::from("s"), entity("s", "CAC"));
        let mut remap = IdRemap::new();

        let decisions = merge_acronyms(&mut canonical, &mut remap, 98.0);

        assert_eq!(decisions.len(), 1);
        assert_eq!(canonical.len(), 1);
        assert!(canonical.contains_key(&EntityId::from("m")));
        assert_eq!(remap.resolve(&EntityId::from("s")), EntityId::from("m"));
    }

    #[test]
    fn single_word_entity_claimed_only_once() {
        let mut canonical = IndexMap::new();
        canonical.insert(EntityId::from("m1"), entity("m1", "Customer Acquisition Cost"));
        canonical.insert(EntityId::from("m2"), entity("m2", "Content Access Control"));
        canonical.insert(EntityId::from("s"), entity("s", "CAC"));
        let mut remap = IdRemap::new();

        let decisions = merge_acronyms(&mut canonical, &mut remap, 98.0);

        assert_eq!(decisions.len(), 1);
        assert_eq!(canonical.len(), 2);
    }
}

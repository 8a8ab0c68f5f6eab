use super::select_best;
use crate::models::{EntityId, PredicateType, Relationship, RelationshipResolutionAction, RelationshipResolutionDecision};
use indexmap::IndexMap;
use serde_json::json;

/// Removes exact `(subject_id, predicate, object_id)` duplicates, keeping
/// the highest-priority relationship per group. Groups are visited in the
/// order they were first observed.
pub fn remove_exact_duplicates(
    relationships: &[Relationship],
) -> (Vec<Relationship>, Vec<RelationshipResolutionDecision>) {
    let mut groups: IndexMap<(EntityId, PredicateType, EntityId), Vec<Relationship>> = IndexMap::new();
    for relationship in relationships {
        groups
            .entry((
                relationship.subject_id.clone(),
                relationship.predicate,
                relationship.object_id.clone(),
            ))
            .or_default()
            .push(relationship.clone());
    }

    let mut deduplicated = Vec::new();
    let mut decisions = Vec::new();

    for ((subject_id, predicate, object_id), group) in groups {
        if group.len() == 1 {
            deduplicated.push(group.into_iter().next().unwrap());
            continue;
        }

        let best = select_best::select_best_relationship(&group).clone();
        let duplicate_ids: Vec<_> = group.iter().filter(|r| r.id != best.id).map(|r| r.id.clone()).collect();

        if !duplicate_ids.is_empty() {
            decisions.push(RelationshipResolutionDecision {
                id: format!("dedupe-{}", best.id),
                action: RelationshipResolutionAction::KeepCanonical,
                canonical_relationship_id: best.id.clone(),
                merged_relationship_ids: duplicate_ids.clone(),
                consolidated_confidence: best.confidence,
                consolidation_method: "exact_duplicate_removal".to_string(),
                metadata: [
                    (
                        "canonical_form".to_string(),
                        json!(format!("{subject_id} --[{}]--> {object_id}", predicate.as_str())),
                    ),
                    ("duplicates_removed".to_string(), json!(duplicate_ids.len())),
                    ("consolidation_reason".to_string(), json!("exact_subject_predicate_object_match")),
                ]
                .into_iter()
                .collect(),
            });
        }

        deduplicated.push(best);
    }

    (deduplicated, decisions)
}

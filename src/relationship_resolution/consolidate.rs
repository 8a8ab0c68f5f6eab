use super::{fuse, select_best};
use crate::models::{EntityId, PredicateType, Relationship, ResolutionConfig, RelationshipResolutionAction, RelationshipResolutionDecision};
use indexmap::IndexMap;
use serde_json::json;

/// Groups deduplicated relationships by unordered endpoint pair, then by
/// predicate within each pair, consolidating any predicate subgroup with
/// more than one member. Groups are visited in first-observed order.
pub fn consolidate_same_pair(
    relationships: &[Relationship],
    config: &ResolutionConfig,
) -> (Vec<Relationship>, Vec<RelationshipResolutionDecision>) {
    let mut pair_groups: IndexMap<(EntityId, EntityId), Vec<Relationship>> = IndexMap::new();
    for relationship in relationships {
        let mut pair = [relationship.subject_id.clone(), relationship.object_id.clone()];
        pair.sort();
        let [a, b] = pair;
        pair_groups.entry((a, b)).or_default().push(relationship.clone());
    }

    let mut consolidated = Vec::new();
    let mut decisions = Vec::new();

    for (_, pair_relationships) in pair_groups {
        if pair_relationships.len() == 1 {
            consolidated.push(pair_relationships.into_iter().next().unwrap());
            continue;
        }

        let mut predicate_groups: IndexMap<PredicateType, Vec<Relationship>> = IndexMap::new();
        for relationship in pair_relationships {
            predicate_groups.entry(relationship.predicate).or_default().push(relationship);
        }

        for (_, group) in predicate_groups {
            if group.len() == 1 {
                consolidated.push(group.into_iter().next().unwrap());
                continue;
            }

            let base = select_best::select_best_relationship(&group).clone();
            let consolidated_confidence = fuse::fuse_confidence(&group, config.confidence_consolidation_method);
            let consolidated_context = fuse::merge_contexts(&group);

            let merged_ids: Vec<_> = group.iter().filter(|r| r.id != base.id).map(|r| r.id.clone()).collect();

            if !merged_ids.is_empty() {
                decisions.push(RelationshipResolutionDecision {
                    id: format!("consolidate-{}", base.id),
                    action: RelationshipResolutionAction::Consolidate,
                    canonical_relationship_id: base.id.clone(),
                    merged_relationship_ids: merged_ids,
                    consolidated_confidence,
                    consolidation_method: format!(
                        "predicate_group_{}",
                        config.confidence_consolidation_method.as_str()
                    ),
                    metadata: [
                        ("relationships_consolidated".to_string(), json!(group.len())),
                        ("confidence_method".to_string(), json!(config.confidence_consolidation_method.as_str())),
                        (
                            "original_confidences".to_string(),
                            json!(group.iter().map(|r| r.confidence).collect::<Vec<_>>()),
                        ),
                        (
                            "contexts_merged".to_string(),
                            json!(group.iter().filter(|r| r.context.is_some()).count()),
                        ),
                    ]
                    .into_iter()
                    .collect(),
                });
            }

            consolidated.push(Relationship {
                id: base.id,
                subject_id: base.subject_id,
                predicate: base.predicate,
                object_id: base.object_id,
                confidence: consolidated_confidence,
                context: consolidated_context,
                source_chunk_id: base.source_chunk_id,
            });
        }
    }

    (consolidated, decisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelationshipId;

    fn relationship(id: &str, subject: &str, object: &str, predicate: PredicateType, confidence: f64) -> Relationship {
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
    fn same_predicate_same_pair_consolidates() {
        let relationships = vec![
            relationship("r1", "a", "b", PredicateType::DependsOn, 0.6),
            relationship("r2", "a", "b", PredicateType::DependsOn, 0.9),
        ];
        let config = ResolutionConfig::default();
        let (consolidated, decisions) = consolidate_same_pair(&relationships, &config);

        assert_eq!(consolidated.len(), 1);
        assert_eq!(consolidated[0].confidence, 0.9);
        assert_eq!(decisions.len(), 1);
    }

    #[test]
    fn different_predicates_same_pair_survive_separately() {
        let relationships = vec![
            relationship("r1", "a", "b", PredicateType::DependsOn, 0.6),
            relationship("r2", "a", "b", PredicateType::Measures, 0.9),
        ];
        let config = ResolutionConfig::default();
        let (consolidated, decisions) = consolidate_same_pair(&relationships, &config);

        assert_eq!(consolidated.len(), 2);
        assert!(decisions.is_empty());
    }

    #[test]
    fn reversed_endpoint_order_groups_together() {
        let relationships = vec![
            relationship("r1", "a", "b", PredicateType::DependsOn, 0.6),
            relationship("r2", "b", "a", PredicateType::DependsOn, 0.9),
        ];
        let config = ResolutionConfig::default();
        let (consolidated, _decisions) = consolidate_same_pair(&relationships, &config);
        assert_eq!(consolidated.len(), 1);
    }
}

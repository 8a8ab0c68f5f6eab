mod consolidate;
mod dedupe;
mod fuse;
mod rewrite;
mod select_best;

use crate::models::{IdRemap, Relationship, RelationshipResolutionDecision, ResolutionConfig};
use tracing::info;

/// Rewrites endpoints through the entity id-remap, removes exact
/// duplicates, and consolidates relationships sharing an endpoint pair and
/// predicate.
pub fn resolve(
    relationships: &[Relationship],
    remap: &IdRemap,
    config: &ResolutionConfig,
) -> (Vec<Relationship>, Vec<RelationshipResolutionDecision>) {
    let span = tracing::info_span!("relationship_resolution", relationships_in = relationships.len());
    let _enter = span.enter();

    let rewritten = rewrite::rewrite_endpoints(relationships, remap);
    let (deduplicated, mut decisions) = dedupe::remove_exact_duplicates(&rewritten);
    let (consolidated, consolidate_decisions) = consolidate::consolidate_same_pair(&deduplicated, config);
    decisions.extend(consolidate_decisions);

    info!(
        consolidated_relationships = consolidated.len(),
        decisions = decisions.len(),
        "relationship resolution complete"
    );

    (consolidated, decisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, PredicateType, RelationshipId};

    fn relationship(id: &str, subject: &str, predicate: PredicateType, object: &str, confidence: f64) -> Relationship {
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
    fn rewrite_then_dedup_then_consolidate() {
        let relationships = vec![
            relationship("r1", "dup", PredicateType::DependsOn, "b", 0.5),
            relationship("r2", "canon", PredicateType::DependsOn, "b", 0.9),
        ];
        let mut remap = IdRemap::new();
        remap.insert(EntityId::from("dup"), EntityId::from("canon"));
        let config = ResolutionConfig::default();

        let (resolved, decisions) = resolve(&relationships, &remap, &config);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].confidence, 0.9);
        assert_eq!(decisions.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let remap = IdRemap::new();
        let config = ResolutionConfig::default();
        let (resolved, decisions) = resolve(&[], &remap, &config);
        assert!(resolved.is_empty());
        assert!(decisions.is_empty());
    }
}

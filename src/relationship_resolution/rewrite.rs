use crate::models::{IdRemap, Relationship};

/// Rewrites subject/object ids through the entity id-remap. Self-edges
/// (subject and object resolving to the same canonical id) are retained,
/// not filtered.
pub fn rewrite_endpoints(relationships: &[Relationship], remap: &IdRemap) -> Vec<Relationship> {
    relationships
        .iter()
        .map(|r| Relationship {
            id: r.id.clone(),
            subject_id: remap.resolve(&r.subject_id),
            predicate: r.predicate,
            object_id: remap.resolve(&r.object_id),
            confidence: r.confidence,
            context: r.context.clone(),
            source_chunk_id: r.source_chunk_id.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, PredicateType, RelationshipId};

    fn relationship(id: &str, subject: &str, object: &str) -> Relationship {
        Relationship {
            id: RelationshipId::from(id),
            subject_id: EntityId::from(subject),
            predicate: PredicateType::DependsOn,
            object_id: EntityId::from(object),
            confidence: 0.8,
            context: None,
            source_chunk_id: None,
        }
    }

    #[test]
    fn rewrites_mapped_endpoints_and_keeps_self_edges() {
        let mut remap = IdRemap::new();
        remap.insert(EntityId::from("dup"), EntityId::from("canon"));

        let relationships = vec![relationship("r1", "dup", "dup")];
        let rewritten = rewrite_endpoints(&relationships, &remap);

        assert_eq!(rewritten[0].subject_id, EntityId::from("canon"));
        assert_eq!(rewritten[0].object_id, EntityId::from("canon"));
    }
}

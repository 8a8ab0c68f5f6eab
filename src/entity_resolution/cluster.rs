use crate::fuzzy::{normalize_name, partial_ratio};
use crate::models::Entity;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Single-pass, non-transitive clustering of entities of one type by raw
/// name, then by fuzzy similarity between distinct raw names.
///
/// Returns clusters as lists of indices into `entities`, in the order the
/// clusters were formed (the order the downstream medoid/cross-cluster
/// steps must observe for determinism).
pub fn group_by_fuzzy_match(entities: &[Entity], similarity_threshold: f64) -> Vec<Vec<usize>> {
    let mut name_to_indices: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (idx, entity) in entities.iter().enumerate() {
        name_to_indices.entry(entity.name.as_str()).or_default().push(idx);
    }

    let cleaned: IndexMap<&str, String> = name_to_indices
        .keys()
        .map(|name| (*name, normalize_name(name)))
        .collect();

    let unique_names: Vec<&str> = name_to_indices.keys().copied().collect();
    let mut used: HashSet<&str> = HashSet::new();
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for name in &unique_names {
        if used.contains(name) {
            continue;
        }

        let mut cluster_indices = Vec::new();
        let mut cluster_used = Vec::new();

        for other in &unique_names {
            if used.contains(other) {
                continue;
            }
            let score = partial_ratio(&cleaned[name], &cleaned[other]);
            if score >= similarity_threshold {
                cluster_indices.extend(name_to_indices[other].iter().copied());
                cluster_used.push(*other);
            }
        }

        if !cluster_indices.is_empty() {
            clusters.push(cluster_indices);
            used.extend(cluster_used);
        }
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, EntityType};

    fn entity(id: &str, name: &str) -> Entity {
        Entity {
            id: EntityId::from(id),
            entity_type: EntityType::Kpi,
            name: name.to_string(),
            description: None,
            confidence: 0.9,
            attributes: Default::default(),
            source_chunk_id: None,
        }
    }

    #[test]
    fn exact_duplicate_names_always_cluster() {
        let entities = vec![entity("1", "CAC"), entity("2", "CAC")];
        let clusters = group_by_fuzzy_match(&entities, 100.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 2);
    }

    #[test]
    fn threshold_100_keeps_dissimilar_names_apart() {
        let entities = vec![entity("1", "Revenue"), entity("2", "Revenu")];
        let clusters = group_by_fuzzy_match(&entities, 100.0);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn threshold_0_collapses_everything() {
        let entities = vec![entity("1", "Revenue"), entity("2", "Churn Rate"), entity("3", "MAU")];
        let clusters = group_by_fuzzy_match(&entities, 0.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }
}

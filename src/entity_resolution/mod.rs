mod acronym;
mod cluster;
mod medoid;

use crate::fuzzy::{normalize_name, partial_ratio};
use crate::models::{Entity, EntityId, EntityResolutionDecision, EntityType, IdRemap, ResolutionConfig};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::json;
use tracing::{debug, info};

struct TypeGroupResult {
    canonical: Vec<Entity>,
    decisions: Vec<EntityResolutionDecision>,
    remap_entries: Vec<(EntityId, EntityId)>,
}

/// Resolves a flat list of entities into canonical entities, the decisions
/// that produced them, and the id-remap from retired ids to canonical ids.
pub fn resolve(entities: &[Entity], config: &ResolutionConfig) -> (Vec<Entity>, Vec<EntityResolutionDecision>, IdRemap) {
    let span = tracing::info_span!("entity_resolution", entities_in = entities.len());
    let _enter = span.enter();

    let mut by_type: IndexMap<EntityType, Vec<Entity>> = IndexMap::new();
    for entity in entities {
        by_type.entry(entity.entity_type).or_default().push(entity.clone());
    }
    // IndexMap preserves first-seen insertion order; `type_groups` keeps
    // that order, and rayon's `par_iter().map().collect()` is an
    // order-preserving parallel map, so `type_results` lines up with
    // `type_groups` positionally regardless of thread scheduling.
    let type_groups: Vec<(EntityType, Vec<Entity>)> = by_type.into_iter().collect();

    let type_results: Vec<TypeGroupResult> = type_groups
        .par_iter()
        .map(|(_, type_entities)| resolve_type_group(type_entities, config))
        .collect();

    let mut canonical: IndexMap<EntityId, Entity> = IndexMap::new();
    let mut decisions = Vec::new();
    let mut remap = IdRemap::new();

    for result in type_results {
        for entity in result.canonical {
            canonical.insert(entity.id.clone(), entity);
        }
        decisions.extend(result.decisions);
        for (retired, target) in result.remap_entries {
            remap.insert(retired, target);
        }
    }

    if config.enable_acronym_matching {
        let acronym_decisions =
            acronym::merge_acronyms(&mut canonical, &mut remap, config.entity_acronym_threshold);
        decisions.extend(acronym_decisions);
    }

    info!(
        canonical_entities = canonical.len(),
        decisions = decisions.len(),
        "entity resolution complete"
    );

    (canonical.into_values().collect(), decisions, remap)
}

fn resolve_type_group(entities: &[Entity], config: &ResolutionConfig) -> TypeGroupResult {
    let clusters = cluster::group_by_fuzzy_match(entities, config.entity_similarity_threshold);

    let mut canonical: IndexMap<EntityId, Entity> = IndexMap::new();
    let mut decisions = Vec::new();
    let mut remap_entries = Vec::new();

    for cluster_indices in clusters {
        let cluster_entities: Vec<Entity> = cluster_indices.iter().map(|&i| entities[i].clone()).collect();

        if cluster_entities.len() == 1 {
            let entity = cluster_entities.into_iter().next().unwrap();
            canonical.insert(entity.id.clone(), entity);
            continue;
        }

        let medoid_idx = medoid::select_medoid(&cluster_entities);
        let medoid_entity = cluster_entities[medoid_idx].clone();

        let existing_match = find_matching_canonical(
            &canonical,
            medoid_entity.entity_type,
            &medoid_entity.name,
            config.entity_similarity_threshold,
        );

        let (final_canonical_id, duplicate_ids) = if let Some(existing_id) = existing_match {
            let duplicate_ids: Vec<EntityId> = cluster_entities.iter().map(|e| e.id.clone()).collect();
            (existing_id, duplicate_ids)
        } else {
            canonical.insert(medoid_entity.id.clone(), medoid_entity.clone());
            let duplicate_ids: Vec<EntityId> = cluster_entities
                .iter()
                .filter(|e| e.id != medoid_entity.id)
                .map(|e| e.id.clone())
                .collect();
            (medoid_entity.id.clone(), duplicate_ids)
        };

        if !duplicate_ids.is_empty() {
            for duplicate_id in &duplicate_ids {
                remap_entries.push((duplicate_id.clone(), final_canonical_id.clone()));
            }

            let duplicate_names: Vec<String> = cluster_entities
                .iter()
                .filter(|e| duplicate_ids.contains(&e.id))
                .map(|e| e.name.clone())
                .collect();

            debug!(
                canonical_id = %final_canonical_id,
                cluster_size = cluster_entities.len(),
                "merged entity cluster"
            );

            decisions.push(EntityResolutionDecision {
                id: format!("cluster-{final_canonical_id}"),
                canonical_entity_id: final_canonical_id,
                duplicate_entity_ids: duplicate_ids,
                similarity_score: medoid::cluster_similarity(&cluster_entities),
                resolution_method: "fuzzy_match_medoid".to_string(),
                confidence: medoid::resolution_confidence(&cluster_entities),
                metadata: [
                    ("cluster_size".to_string(), json!(cluster_entities.len())),
                    ("canonical_name".to_string(), json!(medoid_entity.name)),
                    ("duplicate_names".to_string(), json!(duplicate_names)),
                ]
                .into_iter()
                .collect(),
            });
        }
    }

    TypeGroupResult {
        canonical: canonical.into_values().collect(),
        decisions,
        remap_entries,
    }
}

/// Finds the already-committed canonical entity of the same type whose
/// normalized name best matches `name`, if any scores at or above
/// `threshold`. Ties (equal best score) keep the first-inserted canonical,
/// matching the accumulation order of `canonical`.
fn find_matching_canonical(
    canonical: &IndexMap<EntityId, Entity>,
    entity_type: EntityType,
    name: &str,
    threshold: f64,
) -> Option<EntityId> {
    let cleaned_name = normalize_name(name);
    let mut best_score = 0.0_f64;
    let mut best_id = None;

    for existing in canonical.values() {
        if existing.entity_type != entity_type {
            continue;
        }
        let score = partial_ratio(&cleaned_name, &normalize_name(&existing.name));
        if score > best_score && score >= threshold {
            best_score = score;
            best_id = Some(existing.id.clone());
        }
    }

    best_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityType;

    fn entity(id: &str, ty: EntityType, name: &str, confidence: f64) -> Entity {
        Entity {
            id: EntityId::from(id),
            entity_type: ty,
            name: name.to_string(),
            description: None,
            confidence,
            attributes: Default::default(),
            source_chunk_id: None,
        }
    }

    #[test]
    fn trivial_duplicate_collapses_to_one_canonical() {
        let entities = vec![
            entity("1", EntityType::Metric, "Monthly Active Users", 0.9),
            entity("2", EntityType::Metric, "Monthly Active Users", 0.8),
        ];
        let config = ResolutionConfig::default();
        let (canonical, decisions, remap) = resolve(&entities, &config);

        assert_eq!(canonical.len(), 1);
        assert_eq!(decisions.len(), 1);
        assert_eq!(remap.len(), 1);
    }

    #[test]
    fn distinct_types_never_merge() {
        let entities = vec![
            entity("1", EntityType::Metric, "Revenue", 0.9),
            entity("2", EntityType::Kpi, "Revenue", 0.9),
        ];
        let config = ResolutionConfig::default();
        let (canonical, decisions, _remap) = resolve(&entities, &config);

        assert_eq!(canonical.len(), 2);
        assert!(decisions.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let config = ResolutionConfig::default();
        let (canonical, decisions, remap) = resolve(&[], &config);
        assert!(canonical.is_empty());
        assert!(decisions.is_empty());
        assert!(remap.is_empty());
    }
}

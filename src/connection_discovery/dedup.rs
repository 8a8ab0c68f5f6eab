use crate::models::{ConnectionDiscovery, EntityId, PredicateType};
use indexmap::IndexMap;
use serde_json::json;
use std::collections::HashSet;

/// Collapses proposals that share `(subject, object, predicate)` across
/// methods, keeping the highest-confidence member, merging its evidence
/// with the rest (order-preserving, first occurrence wins rather than the
/// hash-ordered `set()` the original used), and recording which methods
/// contributed. Output is sorted by `(confidence desc, subject, object,
/// predicate)` for full determinism.
pub fn deduplicate(discoveries: Vec<ConnectionDiscovery>) -> Vec<ConnectionDiscovery> {
    let mut groups: IndexMap<(EntityId, EntityId, PredicateType), Vec<ConnectionDiscovery>> = IndexMap::new();
    for discovery in discoveries {
        let key = (discovery.subject_entity_id.clone(), discovery.object_entity_id.clone(), discovery.suggested_predicate);
        groups.entry(key).or_default().push(discovery);
    }

    let mut deduped = Vec::with_capacity(groups.len());
    for (_, group) in groups {
        if group.len() == 1 {
            deduped.push(group.into_iter().next().unwrap());
            continue;
        }

        // `Iterator::max_by` keeps the last element on a tie; the original's
        // `max(group, key=lambda d: d.confidence)` keeps the first. Track
        // `best_index` only on strictly-greater confidence to match it.
        let mut best_index = 0;
        for (i, discovery) in group.iter().enumerate().skip(1) {
            if discovery.confidence > group[best_index].confidence {
                best_index = i;
            }
        }

        let mut merged_evidence = Vec::new();
        let mut seen_evidence = HashSet::new();
        let mut merged_methods = Vec::new();
        let mut seen_methods = HashSet::new();
        for discovery in &group {
            for evidence in &discovery.supporting_evidence {
                if seen_evidence.insert(evidence.clone()) {
                    merged_evidence.push(evidence.clone());
                }
            }
            let method_name = discovery.discovery_method.as_str();
            if seen_methods.insert(method_name) {
                merged_methods.push(method_name);
            }
        }

        let mut best = group.into_iter().nth(best_index).unwrap();
        best.supporting_evidence = merged_evidence;
        best.metadata.insert("discovery_methods".to_string(), json!(merged_methods));
        deduped.push(best);
    }

    deduped.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap()
            .then_with(|| a.subject_entity_id.cmp(&b.subject_entity_id))
            .then_with(|| a.object_entity_id.cmp(&b.object_entity_id))
            .then_with(|| a.suggested_predicate.as_str().cmp(b.suggested_predicate.as_str()))
    });

    deduped
}

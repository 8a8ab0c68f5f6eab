use crate::fuzzy::{partial_ratio, ratio};
use crate::models::{Entity, ResolutionConfig};
use std::collections::HashMap;

/// Composite similarity between two entities, plus the individual feature
/// scores it was built from (`name_similarity`, `description_similarity`,
/// `attribute_overlap`, `type_compatibility`).
pub fn entity_similarity(e1: &Entity, e2: &Entity, config: &ResolutionConfig) -> (f64, HashMap<String, f64>) {
    let mut features = HashMap::new();

    let name_sim = partial_ratio(&e1.name.to_lowercase(), &e2.name.to_lowercase()) / 100.0;
    features.insert("name_similarity".to_string(), name_sim);

    let desc_sim = match (&e1.description, &e2.description) {
        (Some(d1), Some(d2)) => partial_ratio(&d1.to_lowercase(), &d2.to_lowercase()) / 100.0,
        _ => 0.0,
    };
    features.insert("description_similarity".to_string(), desc_sim);

    let attr_sim = attribute_similarity(e1, e2);
    features.insert("attribute_overlap".to_string(), attr_sim);

    let type_compat = if e1.entity_type == e2.entity_type { 1.0 } else { 0.8 };
    features.insert("type_compatibility".to_string(), type_compat);

    let overall = (name_sim * config.name_weight + desc_sim * config.description_weight + attr_sim * 0.2) * type_compat;

    (overall, features)
}

fn attribute_similarity(e1: &Entity, e2: &Entity) -> f64 {
    if e1.attributes.is_empty() || e2.attributes.is_empty() {
        return 0.0;
    }

    let common_keys: Vec<&String> = e1.attributes.keys().filter(|k| e2.attributes.contains_key(*k)).collect();
    if common_keys.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;
    for key in &common_keys {
        let v1 = e1.attributes[*key].to_comparable_string();
        let v2 = e2.attributes[*key].to_comparable_string();
        total += if v1 == v2 { 1.0 } else { ratio(&v1, &v2) / 100.0 };
    }
    total / common_keys.len() as f64
}

use crate::models::{ConfidenceConsolidationMethod, Relationship};
use std::collections::HashSet;

/// Fuses confidence scores across a group per the configured policy.
pub fn fuse_confidence(relationships: &[Relationship], method: ConfidenceConsolidationMethod) -> f64 {
    if relationships.len() == 1 {
        return relationships[0].confidence;
    }

    let confidences: Vec<f64> = relationships.iter().map(|r| r.confidence).collect();

    match method {
        ConfidenceConsolidationMethod::Max => confidences.iter().cloned().fold(f64::MIN, f64::max),
        ConfidenceConsolidationMethod::Average => confidences.iter().sum::<f64>() / confidences.len() as f64,
        ConfidenceConsolidationMethod::Weighted => {
            let weights: Vec<f64> = relationships
                .iter()
                .map(|r| (r.context.as_deref().unwrap_or("").len() as f64).max(1.0))
                .collect();
            let total_weight: f64 = weights.iter().sum();
            if total_weight > 0.0 {
                confidences.iter().zip(&weights).map(|(c, w)| c * w).sum::<f64>() / total_weight
            } else {
                confidences.iter().sum::<f64>() / confidences.len() as f64
            }
        }
    }
}

/// Concatenates distinct non-empty contexts (case-insensitive dedup,
/// original casing and input order preserved) with `" | "`.
pub fn merge_contexts(relationships: &[Relationship]) -> Option<String> {
    let contexts: Vec<&str> = relationships
        .iter()
        .filter_map(|r| r.context.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    if contexts.is_empty() {
        return None;
    }
    if contexts.len() == 1 {
        return Some(contexts[0].to_string());
    }

    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for context in contexts {
        let key = context.to_lowercase();
        if seen.insert(key) {
            unique.push(context);
        }
    }

    if unique.len() > 1 {
        Some(unique.join(" | "))
    } else {
        unique.first().map(|s| s.to_string())
    }
}

use crate::fuzzy::{normalize_name, partial_ratio};
use crate::models::Entity;
use rayon::prelude::*;

/// Index of the medoid entity: the one with the highest total pairwise
/// similarity to the rest of the cluster. Ties within 10 points of the max
/// are broken by highest confidence, then by id.
pub fn select_medoid(entities: &[Entity]) -> usize {
    if entities.len() == 1 {
        return 0;
    }

    let cleaned: Vec<String> = entities.iter().map(|e| normalize_name(&e.name)).collect();

    let scores: Vec<f64> = (0..entities.len())
        .into_par_iter()
        .map(|i| {
            (0..entities.len())
                .filter(|&j| j != i)
                .map(|j| partial_ratio(&cleaned[i], &cleaned[j]))
                .sum()
        })
        .collect();

    let max_score = scores.iter().cloned().fold(f64::MIN, f64::max);

    let mut candidates: Vec<usize> = (0..entities.len())
        .filter(|&i| (scores[i] - max_score).abs() < 10.0)
        .collect();

    if candidates.len() > 1 {
        candidates.sort_by(|&a, &b| {
            entities[b]
                .confidence
                .partial_cmp(&entities[a].confidence)
                .unwrap()
                .then_with(|| entities[b].id.as_str().cmp(entities[a].id.as_str()))
        });
        candidates[0]
    } else {
        candidates[0]
    }
}

/// Average pairwise `partial_ratio` within a cluster, normalized to
/// `[0, 1]`. `1.0` for clusters with fewer than two members.
pub fn cluster_similarity(entities: &[Entity]) -> f64 {
    if entities.len() < 2 {
        return 1.0;
    }

    let cleaned: Vec<String> = entities.iter().map(|e| normalize_name(&e.name)).collect();

    let mut total = 0.0;
    let mut comparisons = 0usize;
    for i in 0..entities.len() {
        for j in (i + 1)..entities.len() {
            total += partial_ratio(&cleaned[i], &cleaned[j]);
            comparisons += 1;
        }
    }

    if comparisons == 0 {
        1.0
    } else {
        (total / comparisons as f64) / 100.0
    }
}

/// `(avg_member_confidence + avg_pairwise_similarity) / 2`, boosted by
/// `0.1` when the average similarity exceeds `0.9`, capped at `1.0`.
pub fn resolution_confidence(entities: &[Entity]) -> f64 {
    if entities.len() < 2 {
        return 1.0;
    }

    let avg_confidence: f64 = entities.iter().map(|e| e.confidence).sum::<f64>() / entities.len() as f64;
    let similarity = cluster_similarity(entities);

    let mut confidence = (avg_confidence + similarity) / 2.0;
    if similarity > 0.9 {
        confidence = (confidence + 0.1).min(1.0);
    }
    confidence
}

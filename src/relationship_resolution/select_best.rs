use crate::models::Relationship;

/// Picks the highest-priority relationship from a group: highest
/// confidence, then longest context, then largest id (lexicographic) as a
/// recency proxy.
pub fn select_best_relationship(relationships: &[Relationship]) -> &Relationship {
    relationships
        .iter()
        .max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap()
                .then_with(|| {
                    let a_len = a.context.as_deref().unwrap_or("").len();
                    let b_len = b.context.as_deref().unwrap_or("").len();
                    a_len.cmp(&b_len)
                })
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        })
        .expect("relationships is non-empty")
}

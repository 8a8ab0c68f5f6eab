use super::similarity::entity_similarity;
use crate::models::{ConnectionDiscovery, DiscoveryMethod, Entity, EntityId, EntityType, PredicateType, ResolutionConfig};
use itertools::iproduct;
use serde_json::json;
use std::collections::HashSet;

/// Method C: fixed domain rules for KPI/Metric/Table/Column/Formula
/// relationships, each gated by a fraction of the similarity threshold
/// looser than Method A's own gate.
pub fn discover(
    entities: &[Entity],
    existing_pairs: &HashSet<(EntityId, EntityId)>,
    config: &ResolutionConfig,
) -> Vec<ConnectionDiscovery> {
    let by_type = |ty: EntityType| -> Vec<&Entity> { entities.iter().filter(|e| e.entity_type == ty).collect() };

    let kpis = by_type(EntityType::Kpi);
    let metrics = by_type(EntityType::Metric);
    let tables = by_type(EntityType::Table);
    let columns = by_type(EntityType::Column);
    let formulas = by_type(EntityType::Formula);

    let mut discoveries = Vec::new();

    if !kpis.is_empty() && !metrics.is_empty() {
        discoveries.extend(kpi_depends_on_metric(&kpis, &metrics, existing_pairs, config));
    }

    if !metrics.is_empty() {
        if !tables.is_empty() {
            discoveries.extend(metric_derived_from_table(&metrics, &tables, existing_pairs, config));
        }
        if !columns.is_empty() {
            discoveries.extend(metric_measures_column(&metrics, &columns, existing_pairs, config));
        }
    }

    if !formulas.is_empty() {
        if !kpis.is_empty() {
            discoveries.extend(target_calculated_by_formula(&formulas, &kpis, existing_pairs, config));
        }
        if !metrics.is_empty() {
            discoveries.extend(target_calculated_by_formula(&formulas, &metrics, existing_pairs, config));
        }
    }

    discoveries
}

fn connected(a: &EntityId, b: &EntityId, pairs: &HashSet<(EntityId, EntityId)>) -> bool {
    pairs.contains(&(a.clone(), b.clone()))
}

fn kpi_depends_on_metric(
    kpis: &[&Entity],
    metrics: &[&Entity],
    existing_pairs: &HashSet<(EntityId, EntityId)>,
    config: &ResolutionConfig,
) -> Vec<ConnectionDiscovery> {
    let mut discoveries = Vec::new();
    for (kpi, metric) in iproduct!(kpis, metrics) {
        if connected(&kpi.id, &metric.id, existing_pairs) {
            continue;
        }
        let (similarity, features) = entity_similarity(kpi, metric, config);
        if similarity < config.connection_similarity_threshold * 0.7 {
            continue;
        }
        discoveries.push(ConnectionDiscovery {
            id: format!("domain-kpi-metric-{}-{}", kpi.id, metric.id),
            subject_entity_id: kpi.id.clone(),
            object_entity_id: metric.id.clone(),
            suggested_predicate: PredicateType::DependsOn,
            confidence: (similarity * 1.1).min(0.9),
            discovery_method: DiscoveryMethod::DomainRules,
            supporting_evidence: vec![
                "Domain rule: KPIs typically depend on metrics".to_string(),
                format!("Similarity score: {:.2}", similarity),
            ],
            similarity_features: features,
            metadata: [
                ("rule_type".to_string(), json!("kpi_depends_on_metric")),
                ("kpi_name".to_string(), json!(kpi.name)),
                ("metric_name".to_string(), json!(metric.name)),
            ]
            .into_iter()
            .collect(),
        });
    }
    discoveries
}

fn metric_derived_from_table(
    metrics: &[&Entity],
    tables: &[&Entity],
    existing_pairs: &HashSet<(EntityId, EntityId)>,
    config: &ResolutionConfig,
) -> Vec<ConnectionDiscovery> {
    let mut discoveries = Vec::new();
    for (metric, table) in iproduct!(metrics, tables) {
        if connected(&metric.id, &table.id, existing_pairs) {
            continue;
        }
        let (similarity, features) = entity_similarity(metric, table, config);
        if similarity < config.connection_similarity_threshold * 0.6 {
            continue;
        }
        discoveries.push(ConnectionDiscovery {
            id: format!("domain-metric-table-{}-{}", metric.id, table.id),
            subject_entity_id: metric.id.clone(),
            object_entity_id: table.id.clone(),
            suggested_predicate: PredicateType::DerivedFrom,
            confidence: similarity.min(0.85),
            discovery_method: DiscoveryMethod::DomainRules,
            supporting_evidence: vec![
                "Domain rule: Metrics are typically derived from tables".to_string(),
                format!("Similarity score: {:.2}", similarity),
            ],
            similarity_features: features,
            metadata: [
                ("rule_type".to_string(), json!("metric_derived_from_table")),
                ("metric_name".to_string(), json!(metric.name)),
                ("table_name".to_string(), json!(table.name)),
            ]
            .into_iter()
            .collect(),
        });
    }
    discoveries
}

fn metric_measures_column(
    metrics: &[&Entity],
    columns: &[&Entity],
    existing_pairs: &HashSet<(EntityId, EntityId)>,
    config: &ResolutionConfig,
) -> Vec<ConnectionDiscovery> {
    let mut discoveries = Vec::new();
    for (metric, column) in iproduct!(metrics, columns) {
        if connected(&metric.id, &column.id, existing_pairs) {
            continue;
        }
        let (similarity, features) = entity_similarity(metric, column, config);
        if similarity < config.connection_similarity_threshold * 0.7 {
            continue;
        }
        discoveries.push(ConnectionDiscovery {
            id: format!("domain-metric-column-{}-{}", metric.id, column.id),
            subject_entity_id: metric.id.clone(),
            object_entity_id: column.id.clone(),
            suggested_predicate: PredicateType::Measures,
            confidence: similarity.min(0.8),
            discovery_method: DiscoveryMethod::DomainRules,
            supporting_evidence: vec![
                "Domain rule: Metrics typically measure specific columns".to_string(),
                format!("Similarity score: {:.2}", similarity),
            ],
            similarity_features: features,
            metadata: [
                ("rule_type".to_string(), json!("metric_measures_column")),
                ("metric_name".to_string(), json!(metric.name)),
                ("column_name".to_string(), json!(column.name)),
            ]
            .into_iter()
            .collect(),
        });
    }
    discoveries
}

/// Shared by both the KPI and Metric formula targets: `target`'s value is
/// suggested to be `calculatedBy` `formula`.
fn target_calculated_by_formula(
    formulas: &[&Entity],
    targets: &[&Entity],
    existing_pairs: &HashSet<(EntityId, EntityId)>,
    config: &ResolutionConfig,
) -> Vec<ConnectionDiscovery> {
    let mut discoveries = Vec::new();
    for (formula, target) in iproduct!(formulas, targets) {
        if connected(&formula.id, &target.id, existing_pairs) {
            continue;
        }
        let (similarity, features) = entity_similarity(formula, target, config);
        if similarity < config.connection_similarity_threshold * 0.6 {
            continue;
        }
        discoveries.push(ConnectionDiscovery {
            id: format!("domain-formula-{}-{}", formula.id, target.id),
            subject_entity_id: target.id.clone(),
            object_entity_id: formula.id.clone(),
            suggested_predicate: PredicateType::CalculatedBy,
            confidence: similarity.min(0.8),
            discovery_method: DiscoveryMethod::DomainRules,
            supporting_evidence: vec![
                format!("Domain rule: {}s can be calculated by formulas", target.entity_type.as_str()),
                format!("Similarity score: {:.2}", similarity),
            ],
            similarity_features: features,
            metadata: [
                ("rule_type".to_string(), json!(format!("{}_calculated_by_formula", target.entity_type.as_str()))),
                ("formula_name".to_string(), json!(formula.name)),
                ("target_name".to_string(), json!(target.name)),
            ]
            .into_iter()
            .collect(),
        });
    }
    discoveries
}

use super::ids::EntityId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Closed set of entity kinds this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "KPI")]
    Kpi,
    #[serde(rename = "Table")]
    Table,
    #[serde(rename = "Column")]
    Column,
    #[serde(rename = "Metric")]
    Metric,
    #[serde(rename = "DataSource")]
    DataSource,
    #[serde(rename = "Domain")]
    Domain,
    #[serde(rename = "Formula")]
    Formula,
    #[serde(rename = "Definition")]
    Definition,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Kpi => "KPI",
            EntityType::Table => "Table",
            EntityType::Column => "Column",
            EntityType::Metric => "Metric",
            EntityType::DataSource => "DataSource",
            EntityType::Domain => "Domain",
            EntityType::Formula => "Formula",
            EntityType::Definition => "Definition",
        }
    }
}

/// A scalar attribute value. Closed rather than an open JSON value so that
/// attribute-overlap comparisons (`connection_discovery::similarity`) are
/// total and never have to guess how to stringify nested structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Number(f64),
    Bool(bool),
}

impl AttributeValue {
    /// Lowercased string form, used for exact- and fuzzy-equality checks.
    pub fn to_comparable_string(&self) -> String {
        match self {
            AttributeValue::String(s) => s.to_lowercase(),
            AttributeValue::Number(n) => n.to_string(),
            AttributeValue::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub confidence: f64,
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeValue>,
    #[serde(default)]
    pub source_chunk_id: Option<String>,
}

/// An entity that survived resolution and is a member of the output graph.
/// Structurally identical to `Entity`; the distinct name marks that it has
/// been through clustering/medoid election and its `id` is authoritative.
pub type CanonicalEntity = Entity;

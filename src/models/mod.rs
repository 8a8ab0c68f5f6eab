mod config;
mod decision;
mod discovery;
mod entity;
mod ids;
mod relationship;
mod remap;
mod result;

pub use config::{ConfidenceConsolidationMethod, ResolutionConfig};
pub use decision::{EntityResolutionDecision, RelationshipResolutionAction, RelationshipResolutionDecision};
pub use discovery::{ConnectionDiscovery, DiscoveryMethod};
pub use entity::{AttributeValue, CanonicalEntity, Entity, EntityType};
pub use ids::{EntityId, RelationshipId};
pub use relationship::{PredicateType, Relationship};
pub use remap::IdRemap;
pub use result::{ResolutionResult, ResolutionStats};

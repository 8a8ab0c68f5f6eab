use super::ids::EntityId;
use std::collections::HashMap;

/// Mapping from a retired entity id to the canonical id it was folded into.
///
/// Total over the input ids, idempotent on canonical ids (a canonical id
/// maps to itself, or rather resolves to itself since it is never inserted
/// as a key), and closed: every target is itself a canonical id.
#[derive(Debug, Clone, Default)]
pub struct IdRemap {
    retired_to_canonical: HashMap<EntityId, EntityId>,
}

impl IdRemap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, retired: EntityId, canonical: EntityId) {
        self.retired_to_canonical.insert(retired, canonical);
    }

    /// Retires `old_canonical` in favor of `new_canonical`: every existing
    /// entry that currently targets `old_canonical` is rewritten to target
    /// `new_canonical`, then `old_canonical -> new_canonical` is inserted.
    /// Keeps the remap closed (every target is itself a surviving
    /// canonical id) when a previously-canonical entity is folded into
    /// another canonical entity after the fact (e.g. the acronym pass).
    pub fn retarget_and_insert(&mut self, old_canonical: EntityId, new_canonical: EntityId) {
        for target in self.retired_to_canonical.values_mut() {
            if *target == old_canonical {
                *target = new_canonical.clone();
            }
        }
        self.retired_to_canonical.insert(old_canonical, new_canonical);
    }

    /// Resolve an id to its canonical form. Ids not present in the map are
    /// assumed already canonical (the implicit identity mapping).
    pub fn resolve(&self, id: &EntityId) -> EntityId {
        match self.retired_to_canonical.get(id) {
            Some(canonical) => canonical.clone(),
            None => id.clone(),
        }
    }

    pub fn is_retired(&self, id: &EntityId) -> bool {
        self.retired_to_canonical.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.retired_to_canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retired_to_canonical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_id_resolves_to_itself() {
        let remap = IdRemap::new();
        let id = EntityId::from("e1");
        assert_eq!(remap.resolve(&id), id);
    }

    #[test]
    fn mapped_id_resolves_to_canonical() {
        let mut remap = IdRemap::new();
        remap.insert(EntityId::from("dup"), EntityId::from("canon"));
        assert_eq!(remap.resolve(&EntityId::from("dup")), EntityId::from("canon"));
        assert!(remap.is_retired(&EntityId::from("dup")));
        assert!(!remap.is_retired(&EntityId::from("canon")));
    }
}

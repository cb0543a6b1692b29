use crate::metadata::{EntityId, EntityType};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// Model
///
/// The structural model under construction. Entity types keep insertion
/// order; ids are never reused within one model.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Model {
    entity_types: Vec<EntityType>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    annotations: BTreeMap<String, String>,

    #[serde(skip)]
    next_id: u32,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entity_types(&self) -> &[EntityType] {
        &self.entity_types
    }

    #[must_use]
    pub fn entity_type(&self, id: EntityId) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn find_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name() == name)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entity_type(id).is_some()
    }

    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    #[must_use]
    pub const fn annotations(&self) -> &BTreeMap<String, String> {
        &self.annotations
    }

    /// Dependent entities holding foreign keys that point at `principal`,
    /// paired with each foreign key's property list.
    #[must_use]
    pub fn foreign_keys_targeting(&self, principal: EntityId) -> Vec<(EntityId, Vec<String>)> {
        self.entity_types
            .iter()
            .flat_map(|entity| {
                entity
                    .foreign_keys()
                    .iter()
                    .filter(|fk| fk.principal_entity() == principal)
                    .map(|fk| (entity.id(), fk.properties().to_vec()))
            })
            .collect()
    }

    //
    // mutation
    //

    pub(crate) fn add_entity_type(&mut self, name: &str) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entity_types.push(EntityType::new(id, name));

        id
    }

    pub(crate) fn entity_type_mut(&mut self, id: EntityId) -> Option<&mut EntityType> {
        self.entity_types.iter_mut().find(|e| e.id() == id)
    }

    pub(crate) fn remove_entity_type(&mut self, id: EntityId) -> Option<EntityType> {
        let position = self.entity_types.iter().position(|e| e.id() == id)?;

        Some(self.entity_types.remove(position))
    }

    pub(crate) fn set_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations.insert(key.into(), value.into());
    }
}

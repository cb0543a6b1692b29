use crate::metadata::{ForeignKey, Index, Key, Property};
use derive_more::Display;
use serde::Serialize;

///
/// EntityId
///
/// Stable identity of an entity type within one model. Survives renames.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[display("#{_0}")]
pub struct EntityId(u32);

impl EntityId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

///
/// EntityType
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityType {
    id: EntityId,
    name: String,
    properties: Vec<Property>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_key: Option<Key>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    alternate_keys: Vec<Key>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    foreign_keys: Vec<ForeignKey>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    indexes: Vec<Index>,
}

impl EntityType {
    pub(crate) fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            properties: Vec::new(),
            primary_key: None,
            alternate_keys: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub const fn primary_key(&self) -> Option<&Key> {
        self.primary_key.as_ref()
    }

    #[must_use]
    pub fn alternate_keys(&self) -> &[Key] {
        &self.alternate_keys
    }

    /// Primary key first, then alternate keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.primary_key.iter().chain(self.alternate_keys.iter())
    }

    #[must_use]
    pub fn find_key(&self, properties: &[String]) -> Option<&Key> {
        self.keys().find(|key| key.properties() == properties)
    }

    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    #[must_use]
    pub fn find_foreign_key(&self, properties: &[String]) -> Option<&ForeignKey> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.properties() == properties)
    }

    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    #[must_use]
    pub fn find_index(&self, properties: &[String]) -> Option<&Index> {
        self.indexes.iter().find(|ix| ix.properties() == properties)
    }

    //
    // mutation (crate-internal; builders own dispatch)
    //

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn push_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub(crate) fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.name() == name)
    }

    // Drops the property along with every key and index that mentions it.
    // Foreign keys are left to the caller, which has to announce their removal.
    pub(crate) fn remove_property(&mut self, name: &str) -> Option<Property> {
        let position = self.properties.iter().position(|p| p.name() == name)?;
        let removed = self.properties.remove(position);

        if self.primary_key.as_ref().is_some_and(|key| key.contains(name)) {
            self.primary_key = None;
        }
        self.alternate_keys.retain(|key| !key.contains(name));
        self.indexes.retain(|ix| !ix.contains(name));

        Some(removed)
    }

    pub(crate) fn replace_primary_key(&mut self, key: Option<Key>) -> Option<Key> {
        std::mem::replace(&mut self.primary_key, key)
    }

    pub(crate) fn push_alternate_key(&mut self, key: Key) {
        self.alternate_keys.push(key);
    }

    pub(crate) fn remove_alternate_key(&mut self, properties: &[String]) -> Option<Key> {
        let position = self
            .alternate_keys
            .iter()
            .position(|key| key.properties() == properties)?;

        Some(self.alternate_keys.remove(position))
    }

    pub(crate) fn push_foreign_key(&mut self, foreign_key: ForeignKey) {
        self.foreign_keys.push(foreign_key);
    }

    pub(crate) fn foreign_key_mut(&mut self, properties: &[String]) -> Option<&mut ForeignKey> {
        self.foreign_keys
            .iter_mut()
            .find(|fk| fk.properties() == properties)
    }

    pub(crate) fn remove_foreign_key(&mut self, properties: &[String]) -> Option<ForeignKey> {
        let position = self
            .foreign_keys
            .iter()
            .position(|fk| fk.properties() == properties)?;

        Some(self.foreign_keys.remove(position))
    }

    pub(crate) fn push_index(&mut self, index: Index) {
        self.indexes.push(index);
    }

    pub(crate) fn index_mut(&mut self, properties: &[String]) -> Option<&mut Index> {
        self.indexes
            .iter_mut()
            .find(|ix| ix.properties() == properties)
    }

    pub(crate) fn remove_index(&mut self, properties: &[String]) -> Option<Index> {
        let position = self
            .indexes
            .iter()
            .position(|ix| ix.properties() == properties)?;

        Some(self.indexes.remove(position))
    }
}

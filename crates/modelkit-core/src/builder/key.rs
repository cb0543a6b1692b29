use crate::{
    builder::{BuildContext, BuilderHandle, EntityTypeBuilder},
    error::ModelError,
    metadata::{EntityId, Key, join_names},
};

///
/// KeyBuilder
///
/// Handle for a primary or alternate key, identified by its property list.
///

pub struct KeyBuilder<'m> {
    ctx: BuildContext<'m>,
    entity: EntityId,
    properties: Vec<String>,
}

impl<'m> KeyBuilder<'m> {
    pub(crate) const fn new(ctx: BuildContext<'m>, entity: EntityId, properties: Vec<String>) -> Self {
        Self {
            ctx,
            entity,
            properties,
        }
    }

    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    #[must_use]
    pub const fn entity_id(&self) -> EntityId {
        self.entity
    }

    pub fn metadata(&self) -> Result<&Key, ModelError> {
        self.ctx
            .model()
            .entity_type(self.entity)
            .and_then(|entity| entity.find_key(&self.properties))
            .ok_or_else(|| {
                ModelError::builder_not_found(format!(
                    "{} is no longer part of the model",
                    self.describe()
                ))
            })
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.ctx
            .model()
            .entity_type(self.entity)
            .and_then(|entity| entity.primary_key())
            .is_some_and(|key| key.properties() == self.properties.as_slice())
    }

    /// Handle for the entity type that declares this key.
    pub fn declaring_entity(&mut self) -> EntityTypeBuilder<'_> {
        EntityTypeBuilder::new(self.ctx.reborrow(), self.entity)
    }

    pub(crate) fn into_target(self) -> (EntityId, Vec<String>) {
        (self.entity, self.properties)
    }
}

impl BuilderHandle for KeyBuilder<'_> {
    fn is_attached(&self) -> bool {
        self.metadata().is_ok()
    }

    fn describe(&self) -> String {
        format!("key ({}) on {}", join_names(&self.properties), self.entity)
    }
}

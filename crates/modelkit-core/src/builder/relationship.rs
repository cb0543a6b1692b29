use crate::{
    builder::{BuildContext, BuilderHandle, EntityTypeBuilder},
    error::ModelError,
    metadata::{EntityId, ForeignKey, join_names},
};

///
/// RelationshipBuilder
///
/// Handle for a foreign key, identified by its declaring entity type and
/// dependent property list.
///

pub struct RelationshipBuilder<'m> {
    ctx: BuildContext<'m>,
    entity: EntityId,
    properties: Vec<String>,
}

impl<'m> RelationshipBuilder<'m> {
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

    pub fn metadata(&self) -> Result<&ForeignKey, ModelError> {
        self.ctx
            .model()
            .entity_type(self.entity)
            .and_then(|entity| entity.find_foreign_key(&self.properties))
            .ok_or_else(|| self.detached())
    }

    pub fn unique(&mut self, unique: bool) -> Result<(), ModelError> {
        self.foreign_key_mut()?.set_unique(unique);

        Ok(())
    }

    pub fn required(&mut self, required: bool) -> Result<(), ModelError> {
        self.foreign_key_mut()?.set_required(required);

        Ok(())
    }

    /// Handle for the dependent entity type that declares this foreign key.
    pub fn declaring_entity(&mut self) -> EntityTypeBuilder<'_> {
        EntityTypeBuilder::new(self.ctx.reborrow(), self.entity)
    }

    pub(crate) fn into_target(self) -> (EntityId, Vec<String>) {
        (self.entity, self.properties)
    }

    fn foreign_key_mut(&mut self) -> Result<&mut ForeignKey, ModelError> {
        let err = self.detached();

        self.ctx
            .model_mut()
            .entity_type_mut(self.entity)
            .and_then(|entity| entity.foreign_key_mut(&self.properties))
            .ok_or(err)
    }

    fn detached(&self) -> ModelError {
        ModelError::builder_not_found(format!("{} is no longer part of the model", self.describe()))
    }
}

impl BuilderHandle for RelationshipBuilder<'_> {
    fn is_attached(&self) -> bool {
        self.metadata().is_ok()
    }

    fn describe(&self) -> String {
        format!("foreign key ({}) on {}", join_names(&self.properties), self.entity)
    }
}

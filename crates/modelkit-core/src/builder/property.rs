use crate::{
    builder::{BuildContext, BuilderHandle, EntityTypeBuilder},
    error::ModelError,
    metadata::{EntityId, Property, ValueGenerated},
};

///
/// PropertyBuilder
///

pub struct PropertyBuilder<'m> {
    ctx: BuildContext<'m>,
    entity: EntityId,
    name: String,
}

impl<'m> PropertyBuilder<'m> {
    pub(crate) fn new(ctx: BuildContext<'m>, entity: EntityId, name: &str) -> Self {
        Self {
            ctx,
            entity,
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn entity_id(&self) -> EntityId {
        self.entity
    }

    pub fn metadata(&self) -> Result<&Property, ModelError> {
        self.ctx
            .model()
            .entity_type(self.entity)
            .and_then(|entity| entity.property(&self.name))
            .ok_or_else(|| self.detached())
    }

    pub fn required(&mut self, required: bool) -> Result<(), ModelError> {
        self.property_mut()?.set_required(required);

        Ok(())
    }

    pub fn value_generated(&mut self, value_generated: ValueGenerated) -> Result<(), ModelError> {
        self.property_mut()?.set_value_generated(value_generated);

        Ok(())
    }

    /// Handle for the entity type that declares this property.
    pub fn declaring_entity(&mut self) -> EntityTypeBuilder<'_> {
        EntityTypeBuilder::new(self.ctx.reborrow(), self.entity)
    }

    pub(crate) fn into_target(self) -> (EntityId, String) {
        (self.entity, self.name)
    }

    fn property_mut(&mut self) -> Result<&mut Property, ModelError> {
        let err = self.detached();

        self.ctx
            .model_mut()
            .entity_type_mut(self.entity)
            .and_then(|entity| entity.property_mut(&self.name))
            .ok_or(err)
    }

    fn detached(&self) -> ModelError {
        ModelError::builder_not_found(format!("{} is no longer part of the model", self.describe()))
    }
}

impl BuilderHandle for PropertyBuilder<'_> {
    fn is_attached(&self) -> bool {
        self.metadata().is_ok()
    }

    fn describe(&self) -> String {
        format!("property '{}' on {}", self.name, self.entity)
    }
}

use crate::{
    builder::{BuildContext, BuilderHandle, EntityTypeBuilder, validate_name},
    error::ModelError,
    metadata::{EntityId, Model},
};
use tracing::debug;

///
/// ModelBuilder
///
/// Handle for the model as a whole. Entry point for adding and ignoring
/// entity types, and the handle model-initializing conventions receive.
///

pub struct ModelBuilder<'m> {
    ctx: BuildContext<'m>,
}

impl<'m> ModelBuilder<'m> {
    pub(crate) const fn new(ctx: BuildContext<'m>) -> Self {
        Self { ctx }
    }

    #[must_use]
    pub fn model(&self) -> &Model {
        self.ctx.model()
    }

    /// Return the entity type called `name`, adding it if needed.
    ///
    /// A new entity type is announced to entity-type-added conventions;
    /// `Ok(None)` means one of them vetoed it and it was removed again.
    pub fn entity(&mut self, name: &str) -> Result<Option<EntityTypeBuilder<'_>>, ModelError> {
        validate_name("entity type", name)?;

        if let Some(existing) = self.ctx.model().find_entity_type(name) {
            let id = existing.id();
            return Ok(Some(EntityTypeBuilder::new(self.ctx.reborrow(), id)));
        }

        let id = self.ctx.model_mut().add_entity_type(name);
        let dispatcher = self.ctx.dispatcher();
        let survivor = dispatcher
            .on_entity_type_added(EntityTypeBuilder::new(self.ctx.reborrow(), id))?
            .map(|builder| builder.id());

        match survivor {
            Some(id) => Ok(Some(EntityTypeBuilder::new(self.ctx.reborrow(), id))),
            None => {
                debug!(entity = %id, name, "entity type vetoed by convention; removing");
                self.remove_entity(id)?;

                Ok(None)
            }
        }
    }

    /// Handle for an existing entity type, without dispatching anything.
    pub fn entity_by_id(&mut self, id: EntityId) -> Option<EntityTypeBuilder<'_>> {
        if self.ctx.model().contains(id) {
            Some(EntityTypeBuilder::new(self.ctx.reborrow(), id))
        } else {
            None
        }
    }

    /// Consume this handle and return one for entity type `id`, keeping the
    /// full `'m` borrow. Used by conventions that substitute a handle.
    #[must_use]
    pub fn into_entity(self, id: EntityId) -> Option<EntityTypeBuilder<'m>> {
        if self.ctx.model().contains(id) {
            Some(EntityTypeBuilder::new(self.ctx, id))
        } else {
            None
        }
    }

    /// Remove the entity type called `name` from the model.
    ///
    /// Foreign keys on other entity types that point at it are removed first,
    /// each announced to foreign-key-removed conventions. Returns whether
    /// anything was removed.
    pub fn ignore(&mut self, name: &str) -> Result<bool, ModelError> {
        let Some(id) = self.ctx.model().find_entity_type(name).map(|e| e.id()) else {
            return Ok(false);
        };

        self.remove_entity(id)?;

        Ok(true)
    }

    pub fn annotation(&mut self, key: &str, value: impl Into<String>) -> Result<(), ModelError> {
        validate_name("annotation", key)?;
        self.ctx.model_mut().set_annotation(key, value);

        Ok(())
    }

    // remove_entity
    fn remove_entity(&mut self, id: EntityId) -> Result<(), ModelError> {
        let dependents = self.ctx.model().foreign_keys_targeting(id);
        for (dependent, properties) in dependents {
            if dependent == id {
                continue;
            }
            EntityTypeBuilder::new(self.ctx.reborrow(), dependent).detach_foreign_key(&properties)?;
        }

        if let Some(removed) = self.ctx.model_mut().remove_entity_type(id) {
            debug!(entity = %id, name = removed.name(), "entity type removed");
        }

        Ok(())
    }
}

impl BuilderHandle for ModelBuilder<'_> {
    fn is_attached(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "model".to_string()
    }
}

use crate::{
    builder::{
        BuildContext, BuilderHandle, KeyBuilder, ModelBuilder, PropertyBuilder, RelationshipBuilder,
        validate_name, validate_property_list,
    },
    error::ModelError,
    metadata::{
        EntityId, EntityType, ForeignKey, Index, IndexOrigin, Key, Model, Property, PropertyKind,
        owned_names,
    },
};
use tracing::debug;

///
/// EntityTypeBuilder
///
/// Handle for one entity type. Identified by `EntityId`, so renames made by
/// earlier conventions do not invalidate it.
///

pub struct EntityTypeBuilder<'m> {
    ctx: BuildContext<'m>,
    id: EntityId,
}

impl<'m> EntityTypeBuilder<'m> {
    pub(crate) const fn new(ctx: BuildContext<'m>, id: EntityId) -> Self {
        Self { ctx, id }
    }

    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn model(&self) -> &Model {
        self.ctx.model()
    }

    pub fn metadata(&self) -> Result<&EntityType, ModelError> {
        self.ctx
            .model()
            .entity_type(self.id)
            .ok_or_else(|| detached(self.id))
    }

    pub fn name(&self) -> Result<&str, ModelError> {
        self.metadata().map(EntityType::name)
    }

    /// Give up this handle for one on the whole model, for conventions that
    /// need to substitute a different entity type.
    #[must_use]
    pub fn into_model(self) -> ModelBuilder<'m> {
        ModelBuilder::new(self.ctx)
    }

    /// Rename the entity type. Renaming to its current name is a no-op.
    pub fn rename(&mut self, name: &str) -> Result<(), ModelError> {
        validate_name("entity type", name)?;

        if let Some(existing) = self.ctx.model().find_entity_type(name) {
            if existing.id() == self.id {
                return Ok(());
            }
            return Err(ModelError::builder_conflict(format!(
                "entity type '{name}' already exists"
            )));
        }

        self.entity_mut()?.set_name(name);

        Ok(())
    }

    /// Return the property called `name`, adding it if needed.
    ///
    /// A new property is announced to property-added conventions; `Ok(None)`
    /// means one of them vetoed it and it was removed again.
    pub fn property(
        &mut self,
        name: &str,
        kind: PropertyKind,
    ) -> Result<Option<PropertyBuilder<'_>>, ModelError> {
        validate_name("property", name)?;

        let existing = self.metadata()?.property(name).map(Property::kind);
        match existing {
            Some(existing) if existing == kind => {
                return Ok(Some(PropertyBuilder::new(self.ctx.reborrow(), self.id, name)));
            }
            Some(existing) => {
                return Err(ModelError::builder_conflict(format!(
                    "property '{name}' on {} is {existing}, not {kind}",
                    self.id
                )));
            }
            None => {}
        }

        self.entity_mut()?.push_property(Property::new(name, kind));

        let dispatcher = self.ctx.dispatcher();
        let survivor = dispatcher
            .on_property_added(PropertyBuilder::new(self.ctx.reborrow(), self.id, name))?
            .map(PropertyBuilder::into_target);

        match survivor {
            Some((entity, property)) => Ok(Some(PropertyBuilder::new(
                self.ctx.reborrow(),
                entity,
                &property,
            ))),
            None => {
                debug!(entity = %self.id, property = name, "property vetoed by convention; removing");
                self.unwind_property(name)?;

                Ok(None)
            }
        }
    }

    /// Handle for an existing property, without dispatching anything.
    pub fn find_property(&mut self, name: &str) -> Option<PropertyBuilder<'_>> {
        let exists = self
            .ctx
            .model()
            .entity_type(self.id)
            .is_some_and(|entity| entity.property(name).is_some());

        exists.then(|| PropertyBuilder::new(self.ctx.reborrow(), self.id, name))
    }

    /// Make `properties` the primary key.
    ///
    /// Setting the current primary key again returns its handle without
    /// dispatching. On veto the previous primary key is restored.
    pub fn primary_key(
        &mut self,
        properties: &[&str],
    ) -> Result<Option<KeyBuilder<'_>>, ModelError> {
        let properties = self.resolve_key_properties("primary key", properties)?;

        let entity = self.metadata()?;
        if entity
            .primary_key()
            .is_some_and(|key| key.properties() == properties.as_slice())
        {
            return Ok(Some(KeyBuilder::new(self.ctx.reborrow(), self.id, properties)));
        }
        if !self.ctx.model().foreign_keys_targeting(self.id).is_empty() {
            return Err(ModelError::builder_conflict(format!(
                "primary key of {} is referenced by foreign keys",
                self.id
            )));
        }

        let previous = self
            .entity_mut()?
            .replace_primary_key(Some(Key::new(properties.clone())));

        let dispatcher = self.ctx.dispatcher();
        let survivor = dispatcher
            .on_key_added(KeyBuilder::new(self.ctx.reborrow(), self.id, properties.clone()))?
            .map(KeyBuilder::into_target);

        match survivor {
            Some((entity, key)) => Ok(Some(KeyBuilder::new(self.ctx.reborrow(), entity, key))),
            None => {
                debug!(entity = %self.id, key = ?properties, "primary key vetoed by convention; restoring previous");
                if let Some(entity) = self.ctx.model_mut().entity_type_mut(self.id)
                    && entity
                        .primary_key()
                        .is_some_and(|key| key.properties() == properties.as_slice())
                {
                    entity.replace_primary_key(previous);
                }

                Ok(None)
            }
        }
    }

    /// Add an alternate key over `properties`, or return the existing key
    /// (primary or alternate) with the same property list.
    pub fn alternate_key(
        &mut self,
        properties: &[&str],
    ) -> Result<Option<KeyBuilder<'_>>, ModelError> {
        let properties = self.resolve_key_properties("alternate key", properties)?;

        if self.metadata()?.find_key(&properties).is_some() {
            return Ok(Some(KeyBuilder::new(self.ctx.reborrow(), self.id, properties)));
        }

        self.entity_mut()?
            .push_alternate_key(Key::new(properties.clone()));

        let dispatcher = self.ctx.dispatcher();
        let survivor = dispatcher
            .on_key_added(KeyBuilder::new(self.ctx.reborrow(), self.id, properties.clone()))?
            .map(KeyBuilder::into_target);

        match survivor {
            Some((entity, key)) => Ok(Some(KeyBuilder::new(self.ctx.reborrow(), entity, key))),
            None => {
                debug!(entity = %self.id, key = ?properties, "alternate key vetoed by convention; removing");
                if let Some(entity) = self.ctx.model_mut().entity_type_mut(self.id) {
                    entity.remove_alternate_key(&properties);
                }

                Ok(None)
            }
        }
    }

    /// Add a foreign key from `properties` to the primary key of the entity
    /// type called `principal`.
    ///
    /// On veto the foreign key is removed again and that removal is announced,
    /// so conventions that already reacted to it can clean up.
    pub fn foreign_key(
        &mut self,
        principal: &str,
        properties: &[&str],
    ) -> Result<Option<RelationshipBuilder<'_>>, ModelError> {
        validate_property_list("foreign key", properties)?;
        let properties = owned_names(properties);

        let (principal_id, principal_key) = {
            let model = self.ctx.model();
            let principal_entity = model.find_entity_type(principal).ok_or_else(|| {
                ModelError::builder_not_found(format!("principal entity type '{principal}' not found"))
            })?;
            let key = principal_entity.primary_key().ok_or_else(|| {
                ModelError::builder_conflict(format!(
                    "principal entity type '{principal}' has no primary key"
                ))
            })?;

            (principal_entity.id(), key.properties().to_vec())
        };

        if principal_key.len() != properties.len() {
            return Err(ModelError::builder_conflict(format!(
                "foreign key ({}) has {} properties but the primary key of '{principal}' has {}",
                properties.join(", "),
                properties.len(),
                principal_key.len()
            )));
        }

        let entity = self.metadata()?;
        self.ensure_properties_exist(entity, &properties)?;
        if let Some(existing) = entity.find_foreign_key(&properties) {
            if existing.principal_entity() == principal_id {
                return Ok(Some(RelationshipBuilder::new(
                    self.ctx.reborrow(),
                    self.id,
                    properties,
                )));
            }
            return Err(ModelError::builder_conflict(format!(
                "foreign key ({}) on {} already points at {}",
                properties.join(", "),
                self.id,
                existing.principal_entity()
            )));
        }

        let declaring = self.id;
        self.entity_mut()?.push_foreign_key(ForeignKey::new(
            declaring,
            properties.clone(),
            principal_id,
            principal_key,
        ));

        let dispatcher = self.ctx.dispatcher();
        let survivor = dispatcher
            .on_foreign_key_added(RelationshipBuilder::new(
                self.ctx.reborrow(),
                self.id,
                properties.clone(),
            ))?
            .map(RelationshipBuilder::into_target);

        match survivor {
            Some((entity, foreign_key)) => Ok(Some(RelationshipBuilder::new(
                self.ctx.reborrow(),
                entity,
                foreign_key,
            ))),
            None => {
                debug!(entity = %self.id, foreign_key = ?properties, "foreign key vetoed by convention; removing");
                if self.ctx.model().contains(self.id) {
                    self.detach_foreign_key(&properties)?;
                }

                Ok(None)
            }
        }
    }

    /// Remove the foreign key over `properties` and announce the removal.
    /// Returns the removed foreign key, or `None` if there was none.
    pub fn remove_foreign_key(
        &mut self,
        properties: &[&str],
    ) -> Result<Option<ForeignKey>, ModelError> {
        self.detach_foreign_key(&owned_names(properties))
    }

    /// Add a non-dispatched index. Returns `false` if it already exists; an
    /// existing index a convention added becomes explicit.
    pub fn index(&mut self, properties: &[&str], unique: bool) -> Result<bool, ModelError> {
        self.add_index(properties, unique, IndexOrigin::Explicit)
    }

    /// Add an index on behalf of a convention. Only indexes added this way
    /// can be taken back with `remove_convention_index`.
    pub fn convention_index(
        &mut self,
        properties: &[&str],
        unique: bool,
    ) -> Result<bool, ModelError> {
        self.add_index(properties, unique, IndexOrigin::Convention)
    }

    /// Remove the index over `properties`. Returns whether one was removed.
    pub fn remove_index(&mut self, properties: &[&str]) -> Result<bool, ModelError> {
        let properties = owned_names(properties);

        Ok(self.entity_mut()?.remove_index(&properties).is_some())
    }

    /// Remove the index over `properties` only if a convention added it.
    pub fn remove_convention_index(&mut self, properties: &[&str]) -> Result<bool, ModelError> {
        let properties = owned_names(properties);

        let by_convention = self
            .metadata()?
            .find_index(&properties)
            .is_some_and(|ix| ix.origin() == IndexOrigin::Convention);
        if !by_convention {
            return Ok(false);
        }

        Ok(self.entity_mut()?.remove_index(&properties).is_some())
    }

    //
    // crate-internal
    //

    pub(crate) fn detach_foreign_key(
        &mut self,
        properties: &[String],
    ) -> Result<Option<ForeignKey>, ModelError> {
        let Some(removed) = self.entity_mut()?.remove_foreign_key(properties) else {
            return Ok(None);
        };

        let dispatcher = self.ctx.dispatcher();
        dispatcher.on_foreign_key_removed(self, &removed)?;

        Ok(Some(removed))
    }

    fn add_index(
        &mut self,
        properties: &[&str],
        unique: bool,
        origin: IndexOrigin,
    ) -> Result<bool, ModelError> {
        validate_property_list("index", properties)?;
        let properties = owned_names(properties);

        let entity = self.metadata()?;
        self.ensure_properties_exist(entity, &properties)?;
        if let Some(existing) = entity.find_index(&properties) {
            let claim = origin.is_explicit() && !existing.origin().is_explicit();
            if claim && let Some(index) = self.entity_mut()?.index_mut(&properties) {
                index.set_origin(IndexOrigin::Explicit);
            }
            return Ok(false);
        }

        self.entity_mut()?
            .push_index(Index::with_origin(properties, unique, origin));

        Ok(true)
    }

    fn entity_mut(&mut self) -> Result<&mut EntityType, ModelError> {
        let id = self.id;

        self.ctx
            .model_mut()
            .entity_type_mut(id)
            .ok_or_else(|| detached(id))
    }

    fn resolve_key_properties(
        &self,
        what: &str,
        properties: &[&str],
    ) -> Result<Vec<String>, ModelError> {
        validate_property_list(what, properties)?;
        let properties = owned_names(properties);

        let entity = self.metadata()?;
        self.ensure_properties_exist(entity, &properties)?;
        for name in &properties {
            if let Some(property) = entity.property(name)
                && !property.kind().supports_key()
            {
                return Err(ModelError::builder_conflict(format!(
                    "property '{name}' on {} is {} and cannot be part of a key",
                    self.id,
                    property.kind()
                )));
            }
        }

        Ok(properties)
    }

    fn ensure_properties_exist(
        &self,
        entity: &EntityType,
        properties: &[String],
    ) -> Result<(), ModelError> {
        match properties.iter().find(|name| entity.property(name).is_none()) {
            Some(missing) => Err(ModelError::builder_not_found(format!(
                "property '{missing}' not found on {}",
                self.id
            ))),
            None => Ok(()),
        }
    }

    // Undo a vetoed property: announce removal of foreign keys that use it,
    // and of foreign keys anywhere that target a primary key over it, then
    // drop it together with keys and indexes over it.
    fn unwind_property(&mut self, name: &str) -> Result<(), ModelError> {
        let Some(entity) = self.ctx.model().entity_type(self.id) else {
            return Ok(());
        };

        let own_keys: Vec<Vec<String>> = entity
            .foreign_keys()
            .iter()
            .filter(|fk| fk.contains(name))
            .map(|fk| fk.properties().to_vec())
            .collect();
        let primary_key_lost = entity.primary_key().is_some_and(|key| key.contains(name));

        for properties in own_keys {
            self.detach_foreign_key(&properties)?;
        }

        if primary_key_lost {
            let referencing = self.ctx.model().foreign_keys_targeting(self.id);
            for (dependent, properties) in referencing {
                if dependent == self.id {
                    self.detach_foreign_key(&properties)?;
                } else {
                    EntityTypeBuilder::new(self.ctx.reborrow(), dependent)
                        .detach_foreign_key(&properties)?;
                }
            }
        }

        self.entity_mut()?.remove_property(name);

        Ok(())
    }
}

impl BuilderHandle for EntityTypeBuilder<'_> {
    fn is_attached(&self) -> bool {
        self.ctx.model().contains(self.id)
    }

    fn describe(&self) -> String {
        format!("entity type {}", self.id)
    }
}

fn detached(id: EntityId) -> ModelError {
    ModelError::builder_not_found(format!("entity type {id} is no longer part of the model"))
}

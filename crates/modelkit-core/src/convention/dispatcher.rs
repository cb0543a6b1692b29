use crate::{
    builder::{
        BuilderHandle, EntityTypeBuilder, KeyBuilder, ModelBuilder, PropertyBuilder,
        RelationshipBuilder,
    },
    convention::ConventionSet,
    error::ModelError,
    metadata::ForeignKey,
};
use std::sync::Arc;

///
/// ConventionDispatcher
///
/// Runs the ordered handler chain for each model-change event.
///
/// Mutating chains thread the builder handle through every handler and stop
/// at the first veto. The foreign-key-removed chain always runs to the end.
/// Handler faults come back exactly as the handler produced them.
///

#[derive(Clone, Debug)]
pub struct ConventionDispatcher {
    conventions: Arc<ConventionSet>,
}

impl ConventionDispatcher {
    #[must_use]
    pub const fn new(conventions: Arc<ConventionSet>) -> Self {
        Self { conventions }
    }

    #[must_use]
    pub fn conventions(&self) -> &ConventionSet {
        &self.conventions
    }

    pub fn on_entity_type_added<'m>(
        &self,
        builder: EntityTypeBuilder<'m>,
    ) -> Result<Option<EntityTypeBuilder<'m>>, ModelError> {
        ensure_attached(&builder)?;

        run_chain(self.conventions.entity_type_added(), builder, |c, b| {
            c.apply(b)
        })
    }

    pub fn on_property_added<'m>(
        &self,
        builder: PropertyBuilder<'m>,
    ) -> Result<Option<PropertyBuilder<'m>>, ModelError> {
        ensure_attached(&builder)?;

        run_chain(self.conventions.property_added(), builder, |c, b| c.apply(b))
    }

    pub fn on_key_added<'m>(
        &self,
        builder: KeyBuilder<'m>,
    ) -> Result<Option<KeyBuilder<'m>>, ModelError> {
        ensure_attached(&builder)?;

        run_chain(self.conventions.key_added(), builder, |c, b| c.apply(b))
    }

    pub fn on_foreign_key_added<'m>(
        &self,
        builder: RelationshipBuilder<'m>,
    ) -> Result<Option<RelationshipBuilder<'m>>, ModelError> {
        ensure_attached(&builder)?;

        run_chain(self.conventions.foreign_key_added(), builder, |c, b| {
            c.apply(b)
        })
    }

    /// Notify handlers that `foreign_key` was removed from the entity behind
    /// `builder`. No handler can stop the others from running.
    pub fn on_foreign_key_removed(
        &self,
        builder: &mut EntityTypeBuilder<'_>,
        foreign_key: &ForeignKey,
    ) -> Result<(), ModelError> {
        ensure_attached(&*builder)?;
        if foreign_key.declaring_entity() != builder.id() {
            return Err(ModelError::dispatch_argument(format!(
                "foreign key {foreign_key} is declared on {}, not on {}",
                foreign_key.declaring_entity(),
                builder.describe()
            )));
        }

        for convention in self.conventions.foreign_key_removed() {
            convention.apply(builder, foreign_key)?;
        }

        Ok(())
    }

    pub fn on_model_initializing<'m>(
        &self,
        builder: ModelBuilder<'m>,
    ) -> Result<Option<ModelBuilder<'m>>, ModelError> {
        ensure_attached(&builder)?;

        run_chain(self.conventions.model_initializing(), builder, |c, b| {
            c.apply(b)
        })
    }
}

// Reject a handle whose node is no longer part of the model.
fn ensure_attached(builder: &impl BuilderHandle) -> Result<(), ModelError> {
    if builder.is_attached() {
        Ok(())
    } else {
        Err(ModelError::dispatch_argument(format!(
            "{} is not attached to the model",
            builder.describe()
        )))
    }
}

// Feed each handler the previous handler's output; the first `None` wins.
fn run_chain<C, B>(
    conventions: &[Arc<C>],
    builder: B,
    apply: impl Fn(&C, B) -> Result<Option<B>, ModelError>,
) -> Result<Option<B>, ModelError>
where
    C: ?Sized,
{
    let mut current = builder;
    for convention in conventions {
        match apply(&**convention, current)? {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

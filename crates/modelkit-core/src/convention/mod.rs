//! Conventions and the ordered dispatch chain that runs them.
//!
//! A convention is a rule invoked after a specific kind of structural change.
//! It can leave the change alone, refine it through the builder it receives,
//! or veto it by returning `None`. Each event kind has its own trait so a
//! `ConventionSet` can never hand the wrong builder to a handler.

mod dispatcher;
mod set;
pub mod stock;

#[cfg(test)]
mod tests;

use crate::{
    builder::{
        EntityTypeBuilder, KeyBuilder, ModelBuilder, PropertyBuilder, RelationshipBuilder,
    },
    error::ModelError,
    metadata::ForeignKey,
};
use derive_more::Display;

// re-exports
pub use dispatcher::ConventionDispatcher;
pub use set::{ConventionSet, ConventionSetBuilder};

///
/// ConventionEvent
///
/// The six model-change events a convention can observe.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ConventionEvent {
    #[display("entity_type_added")]
    EntityTypeAdded,
    #[display("property_added")]
    PropertyAdded,
    #[display("key_added")]
    KeyAdded,
    #[display("foreign_key_added")]
    ForeignKeyAdded,
    #[display("foreign_key_removed")]
    ForeignKeyRemoved,
    #[display("model_initializing")]
    ModelInitializing,
}

impl ConventionEvent {
    pub const ALL: [Self; 6] = [
        Self::EntityTypeAdded,
        Self::PropertyAdded,
        Self::KeyAdded,
        Self::ForeignKeyAdded,
        Self::ForeignKeyRemoved,
        Self::ModelInitializing,
    ];

    /// Whether handlers for this event can veto by returning `None`.
    #[must_use]
    pub const fn can_veto(self) -> bool {
        !matches!(self, Self::ForeignKeyRemoved)
    }
}

///
/// Convention
///
/// Common supertrait of every handler shape.
///

pub trait Convention: Send + Sync {
    /// Stable name used in diagnostics and configuration.
    fn name(&self) -> &'static str;
}

///
/// EntityTypeAddedConvention
///

pub trait EntityTypeAddedConvention: Convention {
    fn apply<'m>(
        &self,
        builder: EntityTypeBuilder<'m>,
    ) -> Result<Option<EntityTypeBuilder<'m>>, ModelError>;
}

///
/// PropertyAddedConvention
///

pub trait PropertyAddedConvention: Convention {
    fn apply<'m>(
        &self,
        builder: PropertyBuilder<'m>,
    ) -> Result<Option<PropertyBuilder<'m>>, ModelError>;
}

///
/// KeyAddedConvention
///

pub trait KeyAddedConvention: Convention {
    fn apply<'m>(&self, builder: KeyBuilder<'m>) -> Result<Option<KeyBuilder<'m>>, ModelError>;
}

///
/// ForeignKeyAddedConvention
///

pub trait ForeignKeyAddedConvention: Convention {
    fn apply<'m>(
        &self,
        builder: RelationshipBuilder<'m>,
    ) -> Result<Option<RelationshipBuilder<'m>>, ModelError>;
}

///
/// ForeignKeyRemovedConvention
///
/// Reacts to a removal that has already happened. There is nothing to
/// veto, so the handler only reports its own faults.
///

pub trait ForeignKeyRemovedConvention: Convention {
    fn apply(
        &self,
        builder: &mut EntityTypeBuilder<'_>,
        foreign_key: &ForeignKey,
    ) -> Result<(), ModelError>;
}

///
/// ModelInitializingConvention
///

pub trait ModelInitializingConvention: Convention {
    fn apply<'m>(
        &self,
        builder: ModelBuilder<'m>,
    ) -> Result<Option<ModelBuilder<'m>>, ModelError>;
}

//! Core of modelkit: the structural model, the builder handles that edit it,
//! and the ordered convention chains that run after every edit.
#![warn(unreachable_pub)]

pub mod builder;
pub mod convention;
pub mod error;
pub mod metadata;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Default maximum length for entity type and property names.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Annotation key stamped on every model by `ProductVersionConvention`.
pub const PRODUCT_VERSION_ANNOTATION: &str = "ProductVersion";

///
/// Prelude
///
/// Vocabulary needed to write a convention.
///

pub mod prelude {
    pub use crate::{
        builder::{
            BuilderHandle, EntityTypeBuilder, KeyBuilder, ModelBuilder, PropertyBuilder,
            RelationshipBuilder,
        },
        convention::{
            Convention, ConventionDispatcher, ConventionEvent, ConventionSet,
            EntityTypeAddedConvention, ForeignKeyAddedConvention, ForeignKeyRemovedConvention,
            KeyAddedConvention, ModelInitializingConvention, PropertyAddedConvention,
        },
        error::ModelError,
        metadata::{EntityId, ForeignKey, Model, PropertyKind, ValueGenerated},
        session::ModelSession,
    };
}

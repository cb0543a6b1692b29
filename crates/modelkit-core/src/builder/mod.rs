//! Builder handles threaded through convention chains.
//!
//! Every handle borrows the model mutably for `'m` and names one node by a
//! stable identity. Add operations follow the same sequence: validate, apply
//! the structural change, dispatch, and undo the change if a convention
//! vetoed it.

mod entity;
mod key;
mod model;
mod property;
mod relationship;


use crate::{convention::ConventionDispatcher, error::ModelError, metadata::Model};
use std::collections::BTreeSet;

// re-exports
pub use entity::EntityTypeBuilder;
pub use key::KeyBuilder;
pub use model::ModelBuilder;
pub use property::PropertyBuilder;
pub use relationship::RelationshipBuilder;

///
/// BuilderHandle
///
/// What the dispatcher needs to know about a handle before running a chain.
///

pub trait BuilderHandle {
    /// Whether the node this handle names still exists in the model.
    fn is_attached(&self) -> bool;

    /// Short human-readable identity, used in error messages.
    fn describe(&self) -> String;
}

///
/// BuildContext
///
/// The borrowed pair every handle carries: the model being edited and the
/// dispatcher that announces edits.
///

pub(crate) struct BuildContext<'m> {
    model: &'m mut Model,
    dispatcher: &'m ConventionDispatcher,
}

impl<'m> BuildContext<'m> {
    pub(crate) const fn new(model: &'m mut Model, dispatcher: &'m ConventionDispatcher) -> Self {
        Self { model, dispatcher }
    }

    pub(crate) fn reborrow(&mut self) -> BuildContext<'_> {
        BuildContext {
            model: &mut *self.model,
            dispatcher: self.dispatcher,
        }
    }

    pub(crate) const fn dispatcher(&self) -> &'m ConventionDispatcher {
        self.dispatcher
    }

    pub(crate) fn model(&self) -> &Model {
        &*self.model
    }

    pub(crate) fn model_mut(&mut self) -> &mut Model {
        &mut *self.model
    }
}

// Names must be non-blank; length and charset rules belong to conventions.
fn validate_name(what: &str, name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::builder_argument(format!("{what} name is empty")));
    }

    Ok(())
}

// Property lists for keys, foreign keys and indexes: non-empty, no repeats.
fn validate_property_list(what: &str, properties: &[&str]) -> Result<(), ModelError> {
    if properties.is_empty() {
        return Err(ModelError::builder_argument(format!(
            "{what} needs at least one property"
        )));
    }

    let mut seen = BTreeSet::new();
    for property in properties {
        validate_name("property", property)?;
        if !seen.insert(*property) {
            return Err(ModelError::builder_argument(format!(
                "{what} lists property '{property}' more than once"
            )));
        }
    }

    Ok(())
}

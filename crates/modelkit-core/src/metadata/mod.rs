//! Mutable structural model edited by the builders.
//!
//! Nothing in here dispatches conventions. The `builder` module owns the
//! change-then-dispatch sequence; these types only store state and keep
//! their own local invariants (unique names, keys over known properties).

mod entity;
mod foreign_key;
mod index;
mod key;
mod model;
mod property;

pub use entity::{EntityId, EntityType};
pub use foreign_key::ForeignKey;
pub use index::{Index, IndexOrigin};
pub use key::Key;
pub use model::Model;
pub use property::{Property, PropertyKind, ValueGenerated};

// Owned copy of a borrowed property list, the identity form stored on nodes.
pub(crate) fn owned_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

// Render a property list the way keys and indexes display it.
pub(crate) fn join_names(names: &[String]) -> String {
    names.join(", ")
}

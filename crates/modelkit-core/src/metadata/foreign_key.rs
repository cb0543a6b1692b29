use crate::metadata::{EntityId, join_names};
use serde::Serialize;
use std::{
    fmt::{self, Display},
    ops::Not,
};

///
/// ForeignKey
///
/// Dependent-side properties referencing the principal entity's primary key.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ForeignKey {
    declaring_entity: EntityId,
    properties: Vec<String>,
    principal_entity: EntityId,
    principal_key: Vec<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    unique: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    required: bool,
}

impl ForeignKey {
    #[must_use]
    pub const fn new(
        declaring_entity: EntityId,
        properties: Vec<String>,
        principal_entity: EntityId,
        principal_key: Vec<String>,
    ) -> Self {
        Self {
            declaring_entity,
            properties,
            principal_entity,
            principal_key,
            unique: false,
            required: false,
        }
    }

    #[must_use]
    pub const fn declaring_entity(&self) -> EntityId {
        self.declaring_entity
    }

    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    #[must_use]
    pub const fn principal_entity(&self) -> EntityId {
        self.principal_entity
    }

    #[must_use]
    pub fn principal_key(&self) -> &[String] {
        &self.principal_key
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }

    pub(crate) const fn set_unique(&mut self, unique: bool) {
        self.unique = unique;
    }

    pub(crate) const fn set_required(&mut self, required: bool) {
        self.required = required;
    }
}

impl Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) -> {}({})",
            join_names(&self.properties),
            self.principal_entity,
            join_names(&self.principal_key)
        )
    }
}

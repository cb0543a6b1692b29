use crate::metadata::join_names;
use serde::Serialize;
use std::{
    fmt::{self, Display},
    ops::Not,
};

///
/// Index
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Index {
    properties: Vec<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    unique: bool,

    #[serde(default, skip_serializing_if = "IndexOrigin::is_explicit")]
    origin: IndexOrigin,
}

impl Index {
    /// An index declared through the builder.
    #[must_use]
    pub const fn new(properties: Vec<String>, unique: bool) -> Self {
        Self::with_origin(properties, unique, IndexOrigin::Explicit)
    }

    #[must_use]
    pub const fn with_origin(properties: Vec<String>, unique: bool, origin: IndexOrigin) -> Self {
        Self {
            properties,
            unique,
            origin,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> IndexOrigin {
        self.origin
    }

    pub(crate) const fn set_origin(&mut self, origin: IndexOrigin) {
        self.origin = origin;
    }

    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }

    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.properties.len() < other.properties.len()
            && other.properties.starts_with(&self.properties)
    }

    /// Whether lookups over `properties` can use this index.
    #[must_use]
    pub fn covers(&self, properties: &[String]) -> bool {
        !properties.is_empty() && self.properties.starts_with(properties)
    }
}

///
/// IndexOrigin
///
/// Who asked for an index. Conventions only ever remove the ones they added.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOrigin {
    #[default]
    Explicit,
    Convention,
}

impl IndexOrigin {
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit)
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties = join_names(&self.properties);

        if self.unique {
            write!(f, "UNIQUE ({properties})")
        } else {
            write!(f, "({properties})")
        }
    }
}

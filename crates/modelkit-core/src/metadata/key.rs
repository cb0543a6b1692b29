use crate::metadata::join_names;
use serde::Serialize;
use std::fmt::{self, Display};

///
/// Key
///
/// Ordered property list identifying an entity instance.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Key {
    properties: Vec<String>,
}

impl Key {
    #[must_use]
    pub const fn new(properties: Vec<String>) -> Self {
        Self { properties }
    }

    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }

    /// Whether `properties` is a leading prefix of (or equal to) this key.
    #[must_use]
    pub fn covers(&self, properties: &[String]) -> bool {
        !properties.is_empty() && self.properties.starts_with(properties)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", join_names(&self.properties))
    }
}

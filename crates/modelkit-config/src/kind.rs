use derive_more::Display;
use modelkit_core::convention::ConventionEvent;
use serde::{Deserialize, Serialize};

///
/// ConventionKind
///
/// Names a stock convention in a config file.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
#[serde(rename_all = "snake_case")]
pub enum ConventionKind {
    #[display("foreign_key_index")]
    ForeignKeyIndex,
    #[display("identifier_length")]
    IdentifierLength,
    #[display("key")]
    Key,
    #[display("key_discovery")]
    KeyDiscovery,
    #[display("product_version")]
    ProductVersion,
}

impl ConventionKind {
    /// Events this convention can be registered for.
    #[must_use]
    pub const fn events(self) -> &'static [ConventionEvent] {
        match self {
            Self::ForeignKeyIndex => &[
                ConventionEvent::ForeignKeyAdded,
                ConventionEvent::ForeignKeyRemoved,
            ],
            Self::IdentifierLength | Self::KeyDiscovery => &[
                ConventionEvent::EntityTypeAdded,
                ConventionEvent::PropertyAdded,
            ],
            Self::Key => &[ConventionEvent::KeyAdded],
            Self::ProductVersion => &[ConventionEvent::ModelInitializing],
        }
    }

    #[must_use]
    pub fn handles(self, event: ConventionEvent) -> bool {
        self.events().contains(&event)
    }
}

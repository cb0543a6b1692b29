use crate::{
    MAX_IDENTIFIER_LEN,
    builder::{EntityTypeBuilder, PropertyBuilder},
    convention::{Convention, EntityTypeAddedConvention, PropertyAddedConvention},
    error::ModelError,
};
use tracing::debug;

///
/// IdentifierLengthConvention
///
/// Vetoes entity types and properties whose names are not ASCII or exceed
/// the configured length.
///

#[derive(Clone, Copy, Debug)]
pub struct IdentifierLengthConvention {
    max_len: usize,
}

impl IdentifierLengthConvention {
    pub const NAME: &'static str = "identifier_length";

    #[must_use]
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    #[must_use]
    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    // Reason the name is unacceptable, if it is.
    fn reject_reason(&self, name: &str) -> Option<String> {
        if !name.is_ascii() {
            return Some(format!("'{name}' must be ASCII"));
        }
        if name.len() > self.max_len {
            return Some(format!("'{name}' exceeds max length {}", self.max_len));
        }

        None
    }
}

impl Default for IdentifierLengthConvention {
    fn default() -> Self {
        Self::new(MAX_IDENTIFIER_LEN)
    }
}

impl Convention for IdentifierLengthConvention {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl EntityTypeAddedConvention for IdentifierLengthConvention {
    fn apply<'m>(
        &self,
        builder: EntityTypeBuilder<'m>,
    ) -> Result<Option<EntityTypeBuilder<'m>>, ModelError> {
        if let Some(reason) = self.reject_reason(builder.name()?) {
            debug!(entity = %builder.id(), %reason, "entity type name rejected");
            return Ok(None);
        }

        Ok(Some(builder))
    }
}

impl PropertyAddedConvention for IdentifierLengthConvention {
    fn apply<'m>(
        &self,
        builder: PropertyBuilder<'m>,
    ) -> Result<Option<PropertyBuilder<'m>>, ModelError> {
        if let Some(reason) = self.reject_reason(builder.name()) {
            debug!(entity = %builder.entity_id(), %reason, "property name rejected");
            return Ok(None);
        }

        Ok(Some(builder))
    }
}

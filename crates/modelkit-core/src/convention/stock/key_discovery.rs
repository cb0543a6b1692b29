use crate::{
    builder::{EntityTypeBuilder, PropertyBuilder},
    convention::{Convention, EntityTypeAddedConvention, PropertyAddedConvention},
    error::ModelError,
};

///
/// KeyDiscoveryConvention
///
/// Picks a primary key by name when none is set: `Id` first, then
/// `<EntityName>Id`, both matched ASCII case-insensitively. Only properties
/// whose kind can be part of a key are candidates.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct KeyDiscoveryConvention;

impl KeyDiscoveryConvention {
    pub const NAME: &'static str = "key_discovery";

    fn discover(entity: &mut EntityTypeBuilder<'_>) -> Result<(), ModelError> {
        let metadata = entity.metadata()?;
        if metadata.primary_key().is_some() {
            return Ok(());
        }

        let entity_key = format!("{}id", metadata.name());
        let candidates = || {
            metadata
                .properties()
                .iter()
                .filter(|p| p.kind().supports_key())
        };
        let found = candidates()
            .find(|p| p.name().eq_ignore_ascii_case("id"))
            .or_else(|| candidates().find(|p| p.name().eq_ignore_ascii_case(&entity_key)))
            .map(|p| p.name().to_string());

        if let Some(name) = found {
            entity.primary_key(&[name.as_str()])?;
        }

        Ok(())
    }
}

impl Convention for KeyDiscoveryConvention {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl EntityTypeAddedConvention for KeyDiscoveryConvention {
    fn apply<'m>(
        &self,
        mut builder: EntityTypeBuilder<'m>,
    ) -> Result<Option<EntityTypeBuilder<'m>>, ModelError> {
        Self::discover(&mut builder)?;

        Ok(Some(builder))
    }
}

impl PropertyAddedConvention for KeyDiscoveryConvention {
    fn apply<'m>(
        &self,
        mut builder: PropertyBuilder<'m>,
    ) -> Result<Option<PropertyBuilder<'m>>, ModelError> {
        Self::discover(&mut builder.declaring_entity())?;

        Ok(Some(builder))
    }
}

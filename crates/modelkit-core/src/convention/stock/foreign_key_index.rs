use crate::{
    builder::{EntityTypeBuilder, RelationshipBuilder},
    convention::{Convention, ForeignKeyAddedConvention, ForeignKeyRemovedConvention},
    error::ModelError,
    metadata::ForeignKey,
};

///
/// ForeignKeyIndexConvention
///
/// Keeps an index over every foreign key's properties so joins from the
/// dependent side can seek. An existing key or index whose leading
/// properties match already serves, so nothing is added then. When the last
/// foreign key over a property list goes away, the index this convention
/// added for it goes too; indexes declared through the builder stay.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ForeignKeyIndexConvention;

impl ForeignKeyIndexConvention {
    pub const NAME: &'static str = "foreign_key_index";
}

impl Convention for ForeignKeyIndexConvention {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl ForeignKeyAddedConvention for ForeignKeyIndexConvention {
    fn apply<'m>(
        &self,
        mut builder: RelationshipBuilder<'m>,
    ) -> Result<Option<RelationshipBuilder<'m>>, ModelError> {
        let properties = builder.properties().to_vec();
        let unique = builder.metadata()?.is_unique();

        let mut entity = builder.declaring_entity();
        let metadata = entity.metadata()?;
        let covered = metadata.keys().any(|key| key.covers(&properties))
            || metadata.indexes().iter().any(|ix| ix.covers(&properties));

        if !covered {
            let names: Vec<&str> = properties.iter().map(String::as_str).collect();
            entity.convention_index(&names, unique)?;
        }

        Ok(Some(builder))
    }
}

impl ForeignKeyRemovedConvention for ForeignKeyIndexConvention {
    fn apply(
        &self,
        builder: &mut EntityTypeBuilder<'_>,
        foreign_key: &ForeignKey,
    ) -> Result<(), ModelError> {
        let properties = foreign_key.properties();
        let still_used = builder
            .metadata()?
            .foreign_keys()
            .iter()
            .any(|fk| fk.properties() == properties);
        if still_used {
            return Ok(());
        }

        let names: Vec<&str> = properties.iter().map(String::as_str).collect();
        builder.remove_convention_index(&names)?;

        Ok(())
    }
}

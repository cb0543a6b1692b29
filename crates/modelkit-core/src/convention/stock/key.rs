use crate::{
    builder::KeyBuilder,
    convention::{Convention, KeyAddedConvention},
    error::ModelError,
    metadata::ValueGenerated,
};

///
/// KeyConvention
///
/// Primary-key properties are required. A single integer primary key is
/// generated by the store on add unless something already configured it.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct KeyConvention;

impl KeyConvention {
    pub const NAME: &'static str = "key";
}

impl Convention for KeyConvention {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl KeyAddedConvention for KeyConvention {
    fn apply<'m>(&self, mut builder: KeyBuilder<'m>) -> Result<Option<KeyBuilder<'m>>, ModelError> {
        if !builder.is_primary() {
            return Ok(Some(builder));
        }

        let properties = builder.properties().to_vec();
        let single = properties.len() == 1;

        let mut entity = builder.declaring_entity();
        for name in &properties {
            let Some(mut property) = entity.find_property(name) else {
                continue;
            };
            property.required(true)?;

            let metadata = property.metadata()?;
            if single
                && metadata.kind().is_int()
                && metadata.value_generated() == ValueGenerated::Never
            {
                property.value_generated(ValueGenerated::OnAdd)?;
            }
        }

        Ok(Some(builder))
    }
}

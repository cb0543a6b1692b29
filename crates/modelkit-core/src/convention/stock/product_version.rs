use crate::{
    PRODUCT_VERSION_ANNOTATION,
    builder::ModelBuilder,
    convention::{Convention, ModelInitializingConvention},
    error::ModelError,
};

///
/// ProductVersionConvention
///
/// Stamps the model with the version of modelkit that built it.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ProductVersionConvention;

impl ProductVersionConvention {
    pub const NAME: &'static str = "product_version";
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
}

impl Convention for ProductVersionConvention {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl ModelInitializingConvention for ProductVersionConvention {
    fn apply<'m>(
        &self,
        mut builder: ModelBuilder<'m>,
    ) -> Result<Option<ModelBuilder<'m>>, ModelError> {
        builder.annotation(PRODUCT_VERSION_ANNOTATION, Self::VERSION)?;

        Ok(Some(builder))
    }
}

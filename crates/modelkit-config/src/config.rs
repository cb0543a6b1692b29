use crate::{CONFIG_FILE_NAME, ConfigError, ConventionKind};
use modelkit_core::{
    MAX_IDENTIFIER_LEN,
    convention::{
        ConventionEvent, ConventionSet, ConventionSetBuilder, EntityTypeAddedConvention,
        ForeignKeyAddedConvention, ForeignKeyRemovedConvention, KeyAddedConvention,
        ModelInitializingConvention, PropertyAddedConvention,
        stock::{
            ForeignKeyIndexConvention, IdentifierLengthConvention, KeyConvention,
            KeyDiscoveryConvention, ProductVersionConvention,
        },
    },
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::Arc};
use tracing::debug;

///
/// ConventionConfig
///
/// Which stock conventions run for each event, and in what order.
/// Every section is optional; missing ones take the stock defaults.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConventionConfig {
    pub naming: NamingConfig,
    pub conventions: EventConventions,
}

impl ConventionConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loading convention config");
        Self::from_toml_str(&source)
    }

    /// Load `modelkit.toml` from `dir`, falling back to the defaults when the
    /// file does not exist.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if !path.is_file() {
            debug!(path = %path.display(), "no convention config; using defaults");
            return Ok(Self::default());
        }

        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.naming.max_identifier_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "naming.max_identifier_len",
                message: "must be greater than 0".to_string(),
            });
        }

        for event in ConventionEvent::ALL {
            let kinds = self.conventions.for_event(event);
            for (i, kind) in kinds.iter().enumerate() {
                if !kind.handles(event) {
                    return Err(ConfigError::UnsupportedEvent { kind: *kind, event });
                }
                if kinds[..i].contains(kind) {
                    return Err(ConfigError::DuplicateConvention { kind: *kind, event });
                }
            }
        }

        Ok(())
    }

    /// Build the convention set this config describes. A convention listed
    /// under several events is registered as one shared instance.
    pub fn assemble(&self) -> Result<ConventionSet, ConfigError> {
        self.validate()?;

        let stock = Stock::new(&self.naming);
        let mut builder = ConventionSet::builder();
        for event in ConventionEvent::ALL {
            for kind in self.conventions.for_event(event) {
                builder = stock.register(builder, *kind, event)?;
            }
        }

        let set = builder.build();
        debug!(conventions = ?set, "assembled convention set");

        Ok(set)
    }
}

///
/// NamingConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    pub max_identifier_len: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            max_identifier_len: MAX_IDENTIFIER_LEN,
        }
    }
}

///
/// EventConventions
///
/// Ordered convention lists, one per event.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventConventions {
    pub entity_type_added: Vec<ConventionKind>,
    pub property_added: Vec<ConventionKind>,
    pub key_added: Vec<ConventionKind>,
    pub foreign_key_added: Vec<ConventionKind>,
    pub foreign_key_removed: Vec<ConventionKind>,
    pub model_initializing: Vec<ConventionKind>,
}

impl EventConventions {
    /// No conventions for any event.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            entity_type_added: Vec::new(),
            property_added: Vec::new(),
            key_added: Vec::new(),
            foreign_key_added: Vec::new(),
            foreign_key_removed: Vec::new(),
            model_initializing: Vec::new(),
        }
    }

    #[must_use]
    pub fn for_event(&self, event: ConventionEvent) -> &[ConventionKind] {
        match event {
            ConventionEvent::EntityTypeAdded => &self.entity_type_added,
            ConventionEvent::PropertyAdded => &self.property_added,
            ConventionEvent::KeyAdded => &self.key_added,
            ConventionEvent::ForeignKeyAdded => &self.foreign_key_added,
            ConventionEvent::ForeignKeyRemoved => &self.foreign_key_removed,
            ConventionEvent::ModelInitializing => &self.model_initializing,
        }
    }
}

impl Default for EventConventions {
    fn default() -> Self {
        use ConventionKind::{ForeignKeyIndex, IdentifierLength, Key, KeyDiscovery, ProductVersion};

        Self {
            entity_type_added: vec![IdentifierLength, KeyDiscovery],
            property_added: vec![IdentifierLength, KeyDiscovery],
            key_added: vec![Key],
            foreign_key_added: vec![ForeignKeyIndex],
            foreign_key_removed: vec![ForeignKeyIndex],
            model_initializing: vec![ProductVersion],
        }
    }
}

///
/// Stock
///
/// One instance of each stock convention, shared across events.
///

struct Stock {
    foreign_key_index: Arc<ForeignKeyIndexConvention>,
    identifier_length: Arc<IdentifierLengthConvention>,
    key: Arc<KeyConvention>,
    key_discovery: Arc<KeyDiscoveryConvention>,
    product_version: Arc<ProductVersionConvention>,
}

impl Stock {
    fn new(naming: &NamingConfig) -> Self {
        Self {
            foreign_key_index: Arc::new(ForeignKeyIndexConvention),
            identifier_length: Arc::new(IdentifierLengthConvention::new(
                naming.max_identifier_len,
            )),
            key: Arc::new(KeyConvention),
            key_discovery: Arc::new(KeyDiscoveryConvention),
            product_version: Arc::new(ProductVersionConvention),
        }
    }

    fn register(
        &self,
        builder: ConventionSetBuilder,
        kind: ConventionKind,
        event: ConventionEvent,
    ) -> Result<ConventionSetBuilder, ConfigError> {
        let builder = match event {
            ConventionEvent::EntityTypeAdded => {
                let convention: Arc<dyn EntityTypeAddedConvention> = match kind {
                    ConventionKind::IdentifierLength => self.identifier_length.clone(),
                    ConventionKind::KeyDiscovery => self.key_discovery.clone(),
                    _ => return Err(ConfigError::UnsupportedEvent { kind, event }),
                };
                builder.entity_type_added(convention)
            }
            ConventionEvent::PropertyAdded => {
                let convention: Arc<dyn PropertyAddedConvention> = match kind {
                    ConventionKind::IdentifierLength => self.identifier_length.clone(),
                    ConventionKind::KeyDiscovery => self.key_discovery.clone(),
                    _ => return Err(ConfigError::UnsupportedEvent { kind, event }),
                };
                builder.property_added(convention)
            }
            ConventionEvent::KeyAdded => {
                let convention: Arc<dyn KeyAddedConvention> = match kind {
                    ConventionKind::Key => self.key.clone(),
                    _ => return Err(ConfigError::UnsupportedEvent { kind, event }),
                };
                builder.key_added(convention)
            }
            ConventionEvent::ForeignKeyAdded => {
                let convention: Arc<dyn ForeignKeyAddedConvention> = match kind {
                    ConventionKind::ForeignKeyIndex => self.foreign_key_index.clone(),
                    _ => return Err(ConfigError::UnsupportedEvent { kind, event }),
                };
                builder.foreign_key_added(convention)
            }
            ConventionEvent::ForeignKeyRemoved => {
                let convention: Arc<dyn ForeignKeyRemovedConvention> = match kind {
                    ConventionKind::ForeignKeyIndex => self.foreign_key_index.clone(),
                    _ => return Err(ConfigError::UnsupportedEvent { kind, event }),
                };
                builder.foreign_key_removed(convention)
            }
            ConventionEvent::ModelInitializing => {
                let convention: Arc<dyn ModelInitializingConvention> = match kind {
                    ConventionKind::ProductVersion => self.product_version.clone(),
                    _ => return Err(ConfigError::UnsupportedEvent { kind, event }),
                };
                builder.model_initializing(convention)
            }
        };

        Ok(builder)
    }
}

///
/// TESTS
///

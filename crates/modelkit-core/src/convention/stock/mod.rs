//! Stock conventions shipped with modelkit.
//!
//! Each is stateless apart from its configuration and can be registered for
//! every event it implements from a single shared instance.

mod foreign_key_index;
mod identifier;
mod key;
mod key_discovery;
mod product_version;

pub use foreign_key_index::ForeignKeyIndexConvention;
pub use identifier::IdentifierLengthConvention;
pub use key::KeyConvention;
pub use key_discovery::KeyDiscoveryConvention;
pub use product_version::ProductVersionConvention;

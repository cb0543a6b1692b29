//! TOML configuration for assembling a `ConventionSet` out of the stock
//! conventions.
#![warn(unreachable_pub)]

mod config;
mod error;
mod kind;

pub use config::{ConventionConfig, EventConventions, NamingConfig};
pub use error::ConfigError;
pub use kind::ConventionKind;

/// File name `ConventionConfig::load_dir` looks for.
pub const CONFIG_FILE_NAME: &str = "modelkit.toml";

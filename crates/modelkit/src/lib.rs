//! ## Crate layout
//! - `core`: the model, builder handles, conventions and their dispatcher.
//! - `config`: TOML-driven assembly of the stock convention set.
//! - `error`: the public error type every fallible call here returns.
//!
//! `prelude` carries what application code needs to build a model and to
//! write its own conventions.

pub use modelkit_config as config;
pub use modelkit_core as core;

pub mod error;

use modelkit_config::ConventionConfig;
use modelkit_core::{convention::ConventionSet, session::ModelSession};
use std::{path::Path, sync::Arc};

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assemble the conventions `config` describes, ready to share between
/// sessions.
pub fn conventions(config: &ConventionConfig) -> Result<Arc<ConventionSet>, Error> {
    Ok(Arc::new(config.assemble()?))
}

/// Start a session with the stock conventions.
pub fn session() -> Result<ModelSession, Error> {
    session_with(&ConventionConfig::default())
}

/// Start a session with the conventions `config` describes.
pub fn session_with(config: &ConventionConfig) -> Result<ModelSession, Error> {
    Ok(ModelSession::new(conventions(config)?)?)
}

/// Start a session configured by `modelkit.toml` in `dir`, or the stock
/// conventions when there is none.
pub fn session_from_dir(dir: impl AsRef<Path>) -> Result<ModelSession, Error> {
    session_with(&ConventionConfig::load_dir(dir)?)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        config::{ConventionConfig, ConventionKind},
        core::prelude::*,
    };
}

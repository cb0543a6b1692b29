use crate::ConventionKind;
use modelkit_core::convention::ConventionEvent;
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read convention config '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid convention config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("convention '{kind}' cannot observe {event}")]
    UnsupportedEvent {
        kind: ConventionKind,
        event: ConventionEvent,
    },

    #[error("convention '{kind}' is listed more than once for {event}")]
    DuplicateConvention {
        kind: ConventionKind,
        event: ConventionEvent,
    },

    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}
